pub mod del;
pub mod gen;

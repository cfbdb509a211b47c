pub mod unit;

pub use unit::{
    generate_unit_name, normalize_unit_name, working_directory_value, RestartPolicy, Scope,
    UnitDescriptor,
};

//! Shell text generation primitives.
//!
//! `quote` is the escaping layer every generated line goes through;
//! `heredoc` embeds whole files without escaping them byte by byte.

pub mod heredoc;
pub mod quote;

pub use heredoc::{inline_file, Sentinel, WriteOptions, DEFAULT_SENTINEL};
pub use quote::{quote, quote_join, split};

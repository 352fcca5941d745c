//! Shared helpers

mod string;

pub use string::{char_len, truncate_str, truncate_with_ellipsis};

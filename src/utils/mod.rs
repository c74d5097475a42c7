pub mod text;

pub use text::{first_non_blank_line, truncate_chars};

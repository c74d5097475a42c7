pub mod dispatch;

pub use dispatch::{dispatch, error_exit_code, write_report};

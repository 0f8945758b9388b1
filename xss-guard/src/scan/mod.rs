//! Structural scanning of request values.
//!
//! This module ties the pieces together:
//!
//! - **`options`**: Scan configuration (`ScanOptions`, `RecordFailureMode`)
//! - **`scanner`**: The recursive walk (`Scanner`)
//!
//! Leaf policies live in `crate::policy`, the email bypass in `crate::email`.

mod options;
mod scanner;

pub use options::{RecordFailureMode, ScanOptions};
pub use scanner::Scanner;

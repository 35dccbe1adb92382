// Structural and semantic checks over a staged import.
pub mod report;
pub mod validator;

pub use report::{ValidationIssue, ValidationReport};
pub use validator::validate;

//! Semantic validation
//!
//! Runs once per compilation unit after imports are resolved; every rule
//! violation fails the whole file.

pub mod validator;

pub use validator::Validator;

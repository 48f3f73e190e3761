//! Input validation and resource limits.

pub mod validation;

pub mod employee;
pub mod leave;
pub mod reports;
pub mod validation;
pub mod workdays;

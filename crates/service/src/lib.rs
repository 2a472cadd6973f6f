//! Service layer providing business-oriented operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod directory;
pub mod errors;
pub mod leave;
pub mod runtime;
pub mod storage;

pub use errors::{respond, ServiceError};

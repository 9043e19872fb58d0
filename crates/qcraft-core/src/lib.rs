pub mod error;
pub mod gateway;
pub mod iteration;
pub mod library;
pub mod persona;
pub mod session;
pub mod share;

// Re-export common error type
pub use error::{QcraftError, Result};

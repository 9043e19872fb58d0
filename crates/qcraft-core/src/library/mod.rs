//! Community library domain module.

pub mod gateway;
pub mod model;

pub use gateway::LibraryGateway;
pub use model::{LibraryComment, LibraryEntry, NewLibraryEntry, SubmitReceipt};

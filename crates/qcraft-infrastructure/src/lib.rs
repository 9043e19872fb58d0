pub mod dto;
pub mod json_history_repository;
pub mod json_session_repository;
pub mod paths;
pub mod storage;

pub use crate::json_history_repository::JsonHistoryRepository;
pub use crate::json_session_repository::JsonSessionStateRepository;
pub use crate::paths::QcraftPaths;

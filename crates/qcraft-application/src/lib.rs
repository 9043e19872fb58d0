//! Application layer: use cases composed from the domain core and the
//! injected gateways/repositories.

pub mod library_service;
pub mod questions_service;
pub mod refinement_session;
pub mod share_service;
pub mod stage_ticker;

pub use library_service::LibraryService;
pub use questions_service::QuestionsService;
pub use refinement_session::RefinementSession;
pub use share_service::ShareService;
pub use stage_ticker::{StageListener, StageTicker, advance_stage};

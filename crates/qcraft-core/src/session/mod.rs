//! Session domain module: in-progress refinement state, the stage ladder,
//! and session persistence.

pub mod repository;
pub mod stages;
pub mod state;

pub use repository::SessionStateRepository;
pub use stages::{STAGE_TICK, STAGES, Stage};
pub use state::RefinementState;

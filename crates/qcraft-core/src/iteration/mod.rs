//! Iteration domain module: the refinement-cycle record, grouping queries,
//! and the history persistence trait.

pub mod grouping;
pub mod model;
pub mod repository;

pub use grouping::{filter_groups, group_by_original};
pub use model::{ExpertAnswer, ExpertAnswers, Iteration};
pub use repository::HistoryRepository;

pub mod ask;
pub mod history;
pub mod library;
pub mod share;
pub mod wiring;

//! Persona domain module.

pub mod model;

pub use model::Persona;

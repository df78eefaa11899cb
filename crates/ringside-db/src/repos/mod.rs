//! Repository implementations

mod boxer;

pub use boxer::BoxerRepo;

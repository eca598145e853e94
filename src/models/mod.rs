// src/models/mod.rs
pub mod video;

pub use video::{GenerationRequest, Outcome};

// src/handlers/mod.rs
pub mod system;
pub mod video;

// Top-down action RPG player controller

pub mod core;
pub mod engine;
pub mod game;

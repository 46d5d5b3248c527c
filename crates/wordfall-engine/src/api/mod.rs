pub mod game;
pub mod types;
pub mod commands;
pub mod collaborators;

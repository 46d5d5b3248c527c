pub mod config;
pub mod run_state;
pub mod stats;
pub mod time;
pub mod rng;

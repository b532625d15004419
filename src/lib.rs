//! Blazing Runner - Terminal Endless Runner Library
//!
//! This module exposes the game logic for testing and external use.

pub mod audio;
pub mod build_info;
pub mod config;
pub mod constants;
pub mod high_score;
pub mod input;
pub mod runner;
pub mod utils;

pub use config::RunnerConfig;
pub use runner::{GamePhase, RunnerSession};

// UI module lives in the binary; it is tightly coupled to the terminal

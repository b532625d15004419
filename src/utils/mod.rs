//! Utility modules: persistence helpers and logger setup.

pub mod logging;
pub mod persistence;

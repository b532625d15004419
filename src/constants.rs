// Host timing
pub const REALTIME_FRAME_MS: u64 = 16; // ~60 FPS driver loop
pub const INPUT_POLL_MS: u64 = 4;
pub const MAX_TICK_MS: u64 = 100; // clamp after pauses or lag

// Obstacle displacement is expressed against a nominal 60 Hz tick
pub const REFERENCE_FPS: f64 = 60.0;

// Save files live in ~/.blazing-runner/
pub const DATA_DIR_NAME: &str = ".blazing-runner";
pub const HIGH_SCORE_FILE: &str = "high_score.json";
pub const CONFIG_FILE: &str = "config.json";
pub const LOG_FILE: &str = "runner.log";
pub const ASSET_DIR: &str = "assets";

// Score display
pub const SCORE_DIGITS: usize = 6;

//! Endless runner core: entities, spawning, difficulty, collision and the
//! session state machine. Host-free; driven by `RunnerSession::tick`.

pub mod collision;
pub mod difficulty;
pub mod obstacle;
pub mod player;
pub mod scenery;
pub mod session;
pub mod spawner;

pub use collision::{first_collision, Rect};
pub use difficulty::{BoostOutcome, Difficulty, DifficultyUpdate};
pub use obstacle::{prune_off_screen, scroll_displacement, Obstacle};
pub use player::Player;
pub use scenery::Scenery;
pub use session::{GameOverSummary, GamePhase, RunnerSession, TickReport};
pub use spawner::{SpawnContext, SpawnDecision, Spawner};

pub mod game_common;
pub mod runner_scene;

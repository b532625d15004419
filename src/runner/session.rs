//! Session orchestration: the Ready/Running/Over state machine and the
//! per-tick update.

use super::collision::first_collision;
use super::difficulty::{BoostOutcome, Difficulty};
use super::obstacle::{prune_off_screen, Obstacle};
use super::player::Player;
use super::scenery::Scenery;
use super::spawner::{SpawnContext, SpawnDecision, Spawner};
use crate::audio::{Cue, CuePlayer};
use crate::config::RunnerConfig;
use crate::constants::MAX_TICK_MS;
use crate::high_score::ScoreStore;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

/// Session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the first jump.
    Ready,
    Running,
    /// A collision ended the run. Only a full reload leaves this phase.
    Over,
}

impl GamePhase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ready => "Ready",
            Self::Running => "Running",
            Self::Over => "Over",
        }
    }
}

/// End-of-run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOverSummary {
    pub score: u64,
    pub high_score: u64,
    pub new_record: bool,
}

/// Everything that happened during one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    pub spawned: bool,
    pub deferred: bool,
    /// Spawn happened after a long quiet stretch.
    pub stale_spawn: bool,
    pub pruned: usize,
    /// An obstacle was credited as cleared.
    pub cleared: bool,
    pub boost: BoostOutcome,
    pub adapted: bool,
    /// Set on the tick that ended the run.
    pub game_over: Option<GameOverSummary>,
}

/// One play session. Owns all mutable game state plus its collaborators.
pub struct RunnerSession<A: CuePlayer, S: ScoreStore> {
    pub player: Player,
    /// Live obstacles, oldest (leftmost) first.
    pub obstacles: Vec<Obstacle>,
    pub spawner: Spawner,
    pub difficulty: Difficulty,
    pub scenery: Scenery,
    pub score: u64,
    pub high_score: u64,
    /// Running time in ms, used to timestamp spawns.
    pub clock_ms: f64,
    phase: GamePhase,
    summary: Option<GameOverSummary>,
    config: RunnerConfig,
    rng: StdRng,
    audio: A,
    scores: S,
}

impl<A: CuePlayer, S: ScoreStore> RunnerSession<A, S> {
    pub fn new(config: RunnerConfig, audio: A, scores: S) -> Self {
        let ground_y = config.field.ground_y();
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let high_score = scores.load();

        Self {
            player: Player::new(&config.player, ground_y),
            obstacles: Vec::new(),
            spawner: Spawner::new(config.spawner.clone()),
            difficulty: Difficulty::new(config.difficulty.clone()),
            scenery: Scenery::default(),
            score: 0,
            high_score,
            clock_ms: 0.0,
            phase: GamePhase::Ready,
            summary: None,
            config,
            rng,
            audio,
            scores,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Outcome of the finished run, once Over.
    pub fn summary(&self) -> Option<&GameOverSummary> {
        self.summary.as_ref()
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn score_store(&self) -> &S {
        &self.scores
    }

    pub fn speed(&self) -> f64 {
        self.difficulty.speed
    }

    /// Current run is ahead of the stored best.
    pub fn is_new_record(&self) -> bool {
        self.score > 0 && self.score > self.high_score
    }

    /// Jump/start input. Starts the run from Ready, jumps while Running,
    /// and is ignored once the run is over.
    pub fn press_jump(&mut self) -> bool {
        match self.phase {
            GamePhase::Ready => self.start(),
            GamePhase::Running => {
                if !self.player.jump() {
                    return false;
                }
                self.scenery.flash();
                self.fire_cue(Cue::Jump);
                true
            }
            GamePhase::Over => false,
        }
    }

    /// Ready -> Running with a full reset of the run state.
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::Ready {
            return false;
        }

        self.score = 0;
        self.clock_ms = 0.0;
        self.obstacles.clear();
        self.player.reset();
        self.difficulty.reset();
        self.spawner.reset();
        self.scenery.reset();
        self.high_score = self.scores.load();
        self.phase = GamePhase::Running;

        log::info!("Run started (high score {})", self.high_score);
        true
    }

    /// Advance the run by `elapsed`. Does nothing unless Running.
    pub fn tick(&mut self, elapsed: Duration) -> TickReport {
        let mut report = TickReport::default();
        if self.phase != GamePhase::Running {
            return report;
        }

        let dt_ms = (elapsed.as_secs_f64() * 1000.0).min(MAX_TICK_MS as f64);
        let dt = dt_ms / 1000.0;
        self.clock_ms += dt_ms;

        // 1. Player physics
        self.player.update(dt);

        // 2. Difficulty: ramp, boost, adaptation
        let update = self.difficulty.update(dt, self.score, &mut self.player);
        report.boost = update.boost;
        report.adapted = update.adapted;
        match update.boost {
            BoostOutcome::Boosted => {
                log::info!("Speed boost at score {}: {:.0}", self.score, self.speed());
                self.fire_cue(Cue::SpeedBoost);
            }
            BoostOutcome::Capped => {
                log::debug!("Speed capped at {:.0}", self.speed());
            }
            BoostOutcome::None => {}
        }

        // 3. Spawning
        let ctx = SpawnContext {
            now_ms: self.clock_ms,
            dt_ms,
            speed: self.difficulty.speed,
            max_speed: self.difficulty.config().max_speed,
            player_jumping: self.player.is_jumping,
            player_rising: self.player.is_rising(),
            field_width: self.config.field.width,
            ground_y: self.config.field.ground_y(),
        };
        match self.spawner.update(&ctx, &mut self.rng) {
            SpawnDecision::Spawned { obstacle, stale } => {
                self.obstacles.push(obstacle);
                report.spawned = true;
                report.stale_spawn = stale;
            }
            SpawnDecision::Deferred => report.deferred = true,
            SpawnDecision::Waiting => {}
        }

        // 4. Scroll and prune
        let speed = self.difficulty.speed;
        for obstacle in &mut self.obstacles {
            obstacle.advance(speed, dt);
        }
        report.pruned = prune_off_screen(&mut self.obstacles);

        // 5. Collision ends the run before anything else is credited
        if let Some(index) = first_collision(&self.player.hitbox(), &self.obstacles) {
            log::debug!("Collision with obstacle {} at x={:.1}", index, self.obstacles[index].x);
            report.game_over = Some(self.end());
            return report;
        }

        // 6. Clearance tracking
        report.cleared = self.track_success();

        // 7. Background and score
        self.scenery.advance(&self.config.field, speed, dt);
        self.score += (speed * dt).floor() as u64;

        report
    }

    /// Credit the nearest obstacle once the descending player is past it.
    fn track_success(&mut self) -> bool {
        if !(self.player.is_airborne() && self.player.is_descending()) {
            return false;
        }
        let Some(nearest) = self.obstacles.first_mut() else {
            return false;
        };
        if nearest.passed || nearest.right() >= self.player.x {
            return false;
        }

        nearest.passed = true;
        self.player.successful_jumps += 1;
        log::debug!("Obstacle cleared ({} in streak)", self.player.successful_jumps);
        true
    }

    /// Running -> Over. Persists the score only if it beats the stored best.
    fn end(&mut self) -> GameOverSummary {
        self.phase = GamePhase::Over;

        let stored = self.scores.load();
        let new_record = self.score > stored;
        if new_record {
            if let Err(e) = self.scores.store(self.score) {
                log::error!("Failed to save high score {}: {}", self.score, e);
            }
            self.high_score = self.score;
        } else {
            self.high_score = stored;
        }

        log::info!(
            "Run over: score {}, high score {}{}",
            self.score,
            self.high_score,
            if new_record { " (new record)" } else { "" }
        );
        self.fire_cue(Cue::GameOver);

        let summary = GameOverSummary {
            score: self.score,
            high_score: self.high_score,
            new_record,
        };
        self.summary = Some(summary);
        summary
    }

    /// Play a cue and drop any failure after logging it.
    fn fire_cue(&mut self, cue: Cue) {
        if let Err(e) = self.audio.play_cue(cue) {
            log::warn!("{}", e);
        }
    }
}

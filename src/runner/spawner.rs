//! Obstacle spawn timing and sizing heuristics.

use super::obstacle::Obstacle;
use crate::config::SpawnerConfig;
use rand::Rng;

/// Inputs to one spawn decision.
#[derive(Debug, Clone, Copy)]
pub struct SpawnContext {
    /// Session clock in ms.
    pub now_ms: f64,
    /// Time elapsed this tick in ms.
    pub dt_ms: f64,
    pub speed: f64,
    pub max_speed: f64,
    pub player_jumping: bool,
    pub player_rising: bool,
    pub field_width: f64,
    pub ground_y: f64,
}

/// Outcome of one spawner tick.
#[derive(Debug, Clone, PartialEq)]
pub enum SpawnDecision {
    /// Timer still running.
    Waiting,
    /// Timer expired while the player was rising close after the last spawn.
    Deferred,
    Spawned {
        obstacle: Obstacle,
        /// No obstacle had spawned for `stale_ms`. Reported only; it does
        /// not change the spawn.
        stale: bool,
    },
}

#[derive(Debug, Clone)]
pub struct Spawner {
    /// Countdown until the next spawn attempt, in ms.
    pub timer_ms: f64,
    pub last_height: f64,
    /// Session time of the most recent spawn.
    pub last_spawn_ms: Option<f64>,
    config: SpawnerConfig,
}

impl Spawner {
    pub fn new(config: SpawnerConfig) -> Self {
        Self {
            timer_ms: config.initial_delay_ms,
            last_height: 0.0,
            last_spawn_ms: None,
            config,
        }
    }

    pub fn reset(&mut self) {
        self.timer_ms = self.config.initial_delay_ms;
        self.last_height = 0.0;
        self.last_spawn_ms = None;
    }

    pub fn config(&self) -> &SpawnerConfig {
        &self.config
    }

    /// Base spacing between spawns. Shrinks as speed approaches max.
    pub fn gap_ms(&self, speed: f64, max_speed: f64) -> f64 {
        let fraction = if max_speed > 0.0 {
            (speed / max_speed).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let factor = 1.0 - fraction * self.config.gap_speed_weight;
        self.config.min_gap_ms + (self.config.max_gap_ms - self.config.min_gap_ms) * factor
    }

    fn since_last_spawn(&self, now_ms: f64) -> f64 {
        self.last_spawn_ms
            .map(|t| now_ms - t)
            .unwrap_or(f64::INFINITY)
    }

    /// Advance the timer and maybe produce an obstacle.
    pub fn update<R: Rng>(&mut self, ctx: &SpawnContext, rng: &mut R) -> SpawnDecision {
        if self.timer_ms > 0.0 {
            self.timer_ms -= ctx.dt_ms;
            return SpawnDecision::Waiting;
        }

        let since_last = self.since_last_spawn(ctx.now_ms);

        // Don't drop an obstacle right under a player still on the way up
        if ctx.player_jumping && ctx.player_rising && since_last < self.config.rising_window_ms {
            self.timer_ms = self.config.defer_ms;
            return SpawnDecision::Deferred;
        }

        let mut height = rng.gen_range(self.config.min_height..self.config.max_height);

        // Follow a tall obstacle with a short one more often than not
        if self.last_height > self.config.tall_threshold
            && rng.gen::<f64>() < self.config.relief_chance
        {
            height = rng.gen_range(self.config.relief_min_height..self.config.relief_max_height);
        }

        // TODO: decide whether a long quiet stretch should force an extra
        // spawn; for now it is only reported on the decision.
        let stale = since_last.is_finite() && since_last > self.config.stale_ms;

        let width = rng.gen_range(self.config.min_width..self.config.max_width);
        let obstacle = Obstacle::spawn(ctx.field_width, ctx.ground_y, width, height);

        self.last_height = height;
        self.last_spawn_ms = Some(ctx.now_ms);
        self.timer_ms =
            self.gap_ms(ctx.speed, ctx.max_speed) + rng.gen::<f64>() * self.config.jitter_ms;

        SpawnDecision::Spawned { obstacle, stale }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    fn ctx(now_ms: f64) -> SpawnContext {
        SpawnContext {
            now_ms,
            dt_ms: 16.0,
            speed: 300.0,
            max_speed: 700.0,
            player_jumping: false,
            player_rising: false,
            field_width: 800.0,
            ground_y: 260.0,
        }
    }

    #[test]
    fn test_first_call_spawns_immediately() {
        let mut spawner = Spawner::new(SpawnerConfig::default());
        let mut rng = create_test_rng();

        match spawner.update(&ctx(0.0), &mut rng) {
            SpawnDecision::Spawned { obstacle, stale } => {
                assert!(!stale);
                assert!((obstacle.x - 800.0).abs() < f64::EPSILON);
                assert!((obstacle.rect().bottom() - 260.0).abs() < 1e-9);
                assert!(obstacle.width >= 20.0 && obstacle.width < 40.0);
                assert!(obstacle.height >= 20.0 && obstacle.height < 60.0);
            }
            other => panic!("expected spawn, got {:?}", other),
        }
        assert_eq!(spawner.last_spawn_ms, Some(0.0));
        assert!(spawner.timer_ms > 0.0);
    }

    #[test]
    fn test_no_spawn_while_timer_positive() {
        let mut spawner = Spawner::new(SpawnerConfig::default());
        let mut rng = create_test_rng();
        spawner.timer_ms = 100.0;

        assert_eq!(spawner.update(&ctx(0.0), &mut rng), SpawnDecision::Waiting);
        assert!((spawner.timer_ms - 84.0).abs() < 1e-9);
    }

    #[test]
    fn test_timer_counts_down_to_spawn() {
        let mut spawner = Spawner::new(SpawnerConfig::default());
        let mut rng = create_test_rng();
        spawner.timer_ms = 40.0;

        let mut now = 0.0;
        let mut waits = 0;
        loop {
            match spawner.update(&ctx(now), &mut rng) {
                SpawnDecision::Waiting => waits += 1,
                SpawnDecision::Spawned { .. } => break,
                SpawnDecision::Deferred => panic!("grounded player never defers"),
            }
            now += 16.0;
        }
        // 40 -> 24 -> 8 -> -8, then the spawn check
        assert_eq!(waits, 3);
    }

    #[test]
    fn test_defers_under_rising_player() {
        let mut spawner = Spawner::new(SpawnerConfig::default());
        let mut rng = create_test_rng();
        spawner.last_spawn_ms = Some(1_000.0);
        spawner.timer_ms = 0.0;

        let mut c = ctx(1_300.0);
        c.player_jumping = true;
        c.player_rising = true;

        assert_eq!(spawner.update(&c, &mut rng), SpawnDecision::Deferred);
        assert!((spawner.timer_ms - 200.0).abs() < f64::EPSILON);
        assert_eq!(spawner.last_spawn_ms, Some(1_000.0));
    }

    #[test]
    fn test_no_deferral_once_falling_or_window_passed() {
        let mut rng = create_test_rng();

        let mut falling = ctx(1_300.0);
        falling.player_jumping = true;
        let mut spawner = Spawner::new(SpawnerConfig::default());
        spawner.last_spawn_ms = Some(1_000.0);
        assert!(matches!(
            spawner.update(&falling, &mut rng),
            SpawnDecision::Spawned { .. }
        ));

        let mut late = ctx(1_600.0);
        late.player_jumping = true;
        late.player_rising = true;
        let mut spawner = Spawner::new(SpawnerConfig::default());
        spawner.last_spawn_ms = Some(1_000.0);
        assert!(matches!(
            spawner.update(&late, &mut rng),
            SpawnDecision::Spawned { .. }
        ));
    }

    #[test]
    fn test_relief_after_tall_obstacle() {
        let config = SpawnerConfig {
            relief_chance: 1.0,
            ..SpawnerConfig::default()
        };
        let mut rng = create_test_rng();

        for _ in 0..50 {
            let mut spawner = Spawner::new(config.clone());
            spawner.last_height = 58.0;
            match spawner.update(&ctx(0.0), &mut rng) {
                SpawnDecision::Spawned { obstacle, .. } => {
                    assert!(obstacle.height >= 20.0 && obstacle.height < 35.0);
                }
                other => panic!("expected spawn, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_no_relief_after_short_obstacle() {
        let config = SpawnerConfig {
            relief_chance: 1.0,
            ..SpawnerConfig::default()
        };
        let mut rng = create_test_rng();

        for _ in 0..50 {
            let mut spawner = Spawner::new(config.clone());
            spawner.last_height = 40.0;
            if let SpawnDecision::Spawned { obstacle, .. } = spawner.update(&ctx(0.0), &mut rng) {
                assert!(obstacle.height >= 30.0 && obstacle.height < 60.0);
            }
        }
    }

    #[test]
    fn test_stale_flag_reported_without_extra_spawn() {
        let mut spawner = Spawner::new(SpawnerConfig::default());
        let mut rng = create_test_rng();
        spawner.last_spawn_ms = Some(0.0);

        match spawner.update(&ctx(5_000.0), &mut rng) {
            SpawnDecision::Spawned { stale, .. } => assert!(stale),
            other => panic!("expected spawn, got {:?}", other),
        }

        // Next call is an ordinary wait: staleness never forces a spawn
        assert_eq!(spawner.update(&ctx(5_016.0), &mut rng), SpawnDecision::Waiting);
    }

    #[test]
    fn test_gap_shrinks_with_speed() {
        let spawner = Spawner::new(SpawnerConfig::default());
        let slow = spawner.gap_ms(300.0, 700.0);
        let fast = spawner.gap_ms(700.0, 700.0);
        assert!(fast < slow);
        // At max speed 70% of the range is removed
        assert!((fast - (600.0 + 800.0 * 0.3)).abs() < 1e-9);
    }

    #[test]
    fn test_timer_reset_within_gap_and_jitter() {
        let mut spawner = Spawner::new(SpawnerConfig::default());
        let mut rng = create_test_rng();
        spawner.update(&ctx(0.0), &mut rng);

        let gap = spawner.gap_ms(300.0, 700.0);
        assert!(spawner.timer_ms >= gap);
        assert!(spawner.timer_ms < gap + 300.0);
    }
}

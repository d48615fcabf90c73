use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::config::GameConfig;

use super::collision::collides;
use super::entity::{Debris, MoveInput, Player, Resource};
use super::spawner::SpawnKind;
use super::state::{GameState, StateListener};

/// All mutable state of one run: entities, counters and the queue of spawns
/// waiting for the next frame. Owned by the game and stepped once per frame.
pub struct Session {
    config: GameConfig,
    player: Player,
    debris: Vec<Debris>,
    resources: Vec<Resource>,
    pending: Vec<SpawnKind>,
    state: GameState,
    rng: StdRng,
    listener: Box<dyn StateListener>,
}

impl Session {
    /// Starts a run and emits the initial snapshot.
    pub fn new(config: GameConfig, listener: impl StateListener + 'static) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let player = Player::new(
            100.0_f32.min(config.field_width - config.player_size),
            config.field_height / 2.0 - config.player_size / 2.0,
            config.player_size,
        );
        let mut session = Self {
            config,
            player,
            debris: Vec::new(),
            resources: Vec::new(),
            pending: Vec::new(),
            state: GameState::default(),
            rng,
            listener: Box::new(listener),
        };
        info!(
            width = session.config.field_width,
            height = session.config.field_height,
            seed = ?session.config.seed,
            "session started"
        );
        session.emit();
        session
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn debris(&self) -> &[Debris] {
        &self.debris
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Queues a spawn for the start of the next frame. Ignored once the game
    /// is over, matching timers that check the flag before spawning.
    pub fn queue_spawn(&mut self, kind: SpawnKind) {
        if !self.state.game_over {
            self.pending.push(kind);
        }
    }

    /// Advances the run by one frame.
    pub fn tick(&mut self, input: MoveInput) {
        if self.state.game_over {
            return;
        }

        for kind in std::mem::take(&mut self.pending) {
            self.spawn(kind);
        }

        self.player.step(
            input,
            self.config.player_speed,
            self.config.field_width,
            self.config.field_height,
        );
        let player = self.player.hitbox();

        let debris_speed = self.config.debris_base_speed + self.state.level as f32;
        for i in (0..self.debris.len()).rev() {
            let d = &mut self.debris[i];
            d.x -= debris_speed;
            if collides(&player, &d.hitbox()) {
                self.finish("debris collision");
                return;
            }
            if d.is_off_field() {
                self.debris.remove(i);
            }
        }

        let resource_speed = self.config.resource_speed;
        for i in (0..self.resources.len()).rev() {
            let r = &mut self.resources[i];
            r.x -= resource_speed;
            let hit = collides(&player, &r.hitbox());
            let gone = r.is_off_field();
            if hit {
                self.resources.remove(i);
                self.collect();
            } else if gone {
                self.resources.remove(i);
                self.miss();
                if self.state.game_over {
                    return;
                }
            }
        }
    }

    /// Resets a finished run. Returns `false` and does nothing while the game
    /// is still going.
    pub fn restart(&mut self) -> bool {
        if !self.state.game_over {
            return false;
        }
        let final_state = self.state;
        self.debris.clear();
        self.resources.clear();
        self.pending.clear();
        self.state = GameState::default();
        info!(
            previous_score = final_state.score,
            previous_level = final_state.level,
            "session restarted"
        );
        self.emit();
        true
    }

    fn spawn(&mut self, kind: SpawnKind) {
        let cap = self.config.max_live_entities;
        let x = self.config.field_width;
        match kind {
            SpawnKind::Debris => {
                if self.debris.len() >= cap {
                    debug!(live = self.debris.len(), cap, "debris spawn dropped");
                    return;
                }
                let size = self.config.debris_size;
                let y = self.random_y(size);
                self.debris.push(Debris { x, y, size });
            }
            SpawnKind::Resource => {
                if self.resources.len() >= cap {
                    debug!(live = self.resources.len(), cap, "resource spawn dropped");
                    return;
                }
                let diameter = self.config.resource_diameter;
                let y = self.random_y(diameter);
                self.resources.push(Resource { x, y, diameter });
            }
        }
    }

    fn random_y(&mut self, size: f32) -> f32 {
        let max = (self.config.field_height - size).max(0.0);
        self.rng.gen_range(0.0..=max)
    }

    fn collect(&mut self) {
        self.state.score = self
            .state
            .score
            .saturating_add(self.config.score_per_resource);
        self.state.progress = self
            .state
            .progress
            .saturating_add(self.config.progress_per_resource)
            .min(100);
        self.emit();
        if self.state.progress >= 100 {
            self.state.level += 1;
            self.state.progress = 0;
            info!(level = self.state.level, score = self.state.score, "level up");
            self.emit();
        }
    }

    fn miss(&mut self) {
        let max = self.config.max_misses;
        self.state.missed = (self.state.missed + 1).min(max);
        if self.state.missed >= max {
            self.finish("too many missed resources");
        } else {
            debug!(missed = self.state.missed, "resource missed");
            self.emit();
        }
    }

    fn finish(&mut self, cause: &str) {
        self.state.game_over = true;
        info!(
            cause,
            score = self.state.score,
            level = self.state.level,
            missed = self.state.missed,
            "game over"
        );
        self.emit();
    }

    fn emit(&mut self) {
        self.listener.on_update(self.state);
    }
}

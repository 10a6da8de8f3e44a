//! Session state and its read-only snapshot
//!
//! A session owns every entity plus the seeded random source. Nothing here
//! survives a restart except the random stream.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::avatar::{Avatar, AvatarTuning};
use super::ground::Ground;
use super::obstacle::{ObstacleStream, ObstacleTuning};
use super::silhouette::{Sprites, WingFrame};
use crate::config::SessionConfig;
use crate::error::ConfigError;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Simulation advancing every tick
    Running,
    /// Run ended; frozen until restarted
    Terminal,
}

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndCause {
    Obstacle { id: u32 },
    Ground,
    Ceiling,
}

/// Outcome of a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameEvents {
    /// Obstacles passed this tick (each adds one point)
    pub passes: u32,
    /// True on the one tick the session turned Terminal
    pub ended: bool,
    pub cause: Option<EndCause>,
}

/// Avatar as the renderer needs it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AvatarPose {
    pub x: f32,
    pub y: f32,
    /// Unrotated sprite size
    pub width: f32,
    pub height: f32,
    pub tilt: f32,
    pub frame: WingFrame,
}

/// Obstacle as the renderer needs it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u32,
    pub x: f32,
    pub width: f32,
    pub gap_center_y: f32,
    pub gap_top: f32,
    pub gap_bottom: f32,
    /// Screen y of the top barrier's top-left
    pub top_barrier_y: f32,
    /// Screen y of the bottom barrier's top-left
    pub bottom_barrier_y: f32,
    pub passed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundView {
    pub y: f32,
    pub x1: f32,
    pub x2: f32,
    pub tile_width: f32,
}

/// Read-only view of a session, taken once per tick by the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub playfield: Vec2,
    pub avatar: AvatarPose,
    pub obstacles: Vec<ObstacleView>,
    pub ground: GroundView,
    pub score: u32,
    pub state: SessionState,
    pub tick: u64,
}

/// One game session: avatar, obstacles, ground, score and state
#[derive(Debug, Clone)]
pub struct GameSession {
    pub config: SessionConfig,
    /// Seed the random source started from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub sprites: Sprites,
    pub avatar: Avatar,
    pub obstacles: ObstacleStream,
    pub ground: Ground,
    pub score: u32,
    pub state: SessionState,
    pub end_cause: Option<EndCause>,
    /// Impulses queued since the last tick
    pub pending_impulses: u32,
    /// Ticks simulated since the last (re)start
    pub time_ticks: u64,
    /// Number of restarts since construction
    pub restarts: u32,
}

/// Build a session with an entropy seed
pub fn new_session(config: SessionConfig) -> Result<GameSession, ConfigError> {
    GameSession::new(config, rand::random())
}

impl GameSession {
    /// Create a session with procedural sprites sized from the config
    pub fn new(config: SessionConfig, seed: u64) -> Result<Self, ConfigError> {
        let sprites = Sprites::procedural(
            config.avatar_width,
            config.avatar_height,
            config.obstacle_width,
            config.obstacle_height,
        );
        Self::with_sprites(config, sprites, seed)
    }

    /// Create a session with caller-supplied collision silhouettes
    pub fn with_sprites(
        config: SessionConfig,
        sprites: Sprites,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        check_sprites(&config, &sprites)?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let avatar = Avatar::new(config.avatar_spawn, AvatarTuning::from(&config));
        let obstacles = ObstacleStream::new(ObstacleTuning::from(&config), &mut rng);
        let ground = Ground::from_config(&config);
        log::info!("Session started (seed {})", seed);
        Ok(Self {
            config,
            seed,
            rng,
            sprites,
            avatar,
            obstacles,
            ground,
            score: 0,
            state: SessionState::Running,
            end_cause: None,
            pending_impulses: 0,
            time_ticks: 0,
            restarts: 0,
        })
    }

    /// Register one jump input for the next tick
    pub fn queue_impulse(&mut self) {
        self.pending_impulses += 1;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    /// Rebuild every entity from the config; the random stream carries on
    pub fn restart(&mut self) {
        log::info!(
            "Restarting session (previous score {}, {} ticks)",
            self.score,
            self.time_ticks
        );
        self.avatar = Avatar::new(self.config.avatar_spawn, AvatarTuning::from(&self.config));
        self.obstacles = ObstacleStream::new(ObstacleTuning::from(&self.config), &mut self.rng);
        self.ground = Ground::from_config(&self.config);
        self.score = 0;
        self.state = SessionState::Running;
        self.end_cause = None;
        self.pending_impulses = 0;
        self.time_ticks = 0;
        self.restarts += 1;
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot {
        let tuning = &self.obstacles.tuning;
        Snapshot {
            playfield: Vec2::new(self.config.playfield_width, self.config.playfield_height),
            avatar: AvatarPose {
                x: self.avatar.x(),
                y: self.avatar.y(),
                width: self.config.avatar_width as f32,
                height: self.config.avatar_height as f32,
                tilt: self.avatar.tilt,
                frame: self.avatar.frame,
            },
            obstacles: self
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    id: o.id,
                    x: o.x,
                    width: tuning.width,
                    gap_center_y: o.gap_center_y,
                    gap_top: o.gap_top(tuning),
                    gap_bottom: o.gap_bottom(tuning),
                    top_barrier_y: o.top_barrier_y(tuning),
                    bottom_barrier_y: o.bottom_barrier_y(tuning),
                    passed: o.passed,
                })
                .collect(),
            ground: GroundView {
                y: self.ground.y,
                x1: self.ground.x1,
                x2: self.ground.x2,
                tile_width: self.ground.tile_width,
            },
            score: self.score,
            state: self.state,
            tick: self.time_ticks,
        }
    }
}

fn check_sprites(config: &SessionConfig, sprites: &Sprites) -> Result<(), ConfigError> {
    let avatar_size = (config.avatar_width, config.avatar_height);
    for frame in &sprites.avatar {
        if frame.size() != avatar_size {
            return Err(ConfigError::SpriteMismatch {
                sprite: "avatar",
                expected: avatar_size,
                actual: frame.size(),
            });
        }
    }
    let barrier_size = (config.obstacle_width, config.obstacle_height);
    for (name, barrier) in [
        ("barrier_top", &sprites.barrier_top),
        ("barrier_bottom", &sprites.barrier_bottom),
    ] {
        if barrier.size() != barrier_size {
            return Err(ConfigError::SpriteMismatch {
                sprite: name,
                expected: barrier_size,
                actual: barrier.size(),
            });
        }
    }
    Ok(())
}

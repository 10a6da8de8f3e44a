//! Platform abstraction layer
//!
//! Input sources and the fixed-timestep driver that wires a session to its
//! collaborators. The simulation itself never sees wall time, only ticks.

use std::collections::BTreeSet;

use crate::audio::{AudioSink, SoundEffect};
use crate::consts::MAX_SUBSTEPS;
use crate::renderer::Renderer;
use crate::sim::{FrameEvents, GameSession, SessionState, Snapshot};

/// Input gathered for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFrame {
    /// Jump presses since the last poll
    pub impulses: u32,
    /// Start a new session before stepping
    pub restart: bool,
    /// Stop the driver
    pub quit: bool,
}

/// Anything that can produce player input
pub trait InputSource {
    /// Called once per tick with the state the player is looking at
    fn poll(&mut self, snapshot: &Snapshot) -> InputFrame;
}

/// Replays input keyed by frame index
///
/// Frames count polls, so they keep counting across restarts.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    impulses: BTreeSet<u64>,
    period: Option<u64>,
    restarts: BTreeSet<u64>,
    quit_at: Option<u64>,
    frame: u64,
}

impl ScriptedInput {
    pub fn new(impulse_frames: impl IntoIterator<Item = u64>) -> Self {
        Self {
            impulses: impulse_frames.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Jump every `period` frames, starting at frame 0
    pub fn every(period: u64) -> Self {
        Self {
            period: Some(period.max(1)),
            ..Default::default()
        }
    }

    pub fn restart_at(mut self, frame: u64) -> Self {
        self.restarts.insert(frame);
        self
    }

    pub fn quit_at(mut self, frame: u64) -> Self {
        self.quit_at = Some(frame);
        self
    }

    /// Frames polled so far
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _snapshot: &Snapshot) -> InputFrame {
        let frame = self.frame;
        self.frame += 1;

        let jump = match self.period {
            Some(period) => frame % period == 0,
            None => self.impulses.contains(&frame),
        };
        InputFrame {
            impulses: u32::from(jump),
            restart: self.restarts.contains(&frame),
            quit: self.quit_at.is_some_and(|q| frame >= q),
        }
    }
}

/// Demo player
///
/// Aims the avatar's centre at a line just above the bottom of the nearest
/// gap that still overlaps or lies ahead of it, and flaps whenever it sinks
/// below that line and is not already climbing.
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Distance above the gap bottom to hold the avatar centre at
    pub clearance: f32,
    last_y: Option<f32>,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new()
    }
}

impl Autopilot {
    pub fn new() -> Self {
        Self {
            clearance: 60.0,
            last_y: None,
        }
    }

    /// Centre line the avatar should stay above
    pub fn target_line(&self, snapshot: &Snapshot) -> f32 {
        let avatar_x = snapshot.avatar.x;
        snapshot
            .obstacles
            .iter()
            .find(|o| o.x + o.width > avatar_x)
            .map(|o| o.gap_bottom - self.clearance)
            // Nothing ahead: cruise mid-sky
            .unwrap_or(snapshot.ground.y * 0.5)
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, snapshot: &Snapshot) -> InputFrame {
        let y = snapshot.avatar.y;
        let rising = self.last_y.is_some_and(|last| y < last);
        self.last_y = Some(y);

        if snapshot.state == SessionState::Terminal {
            return InputFrame::default();
        }

        let centre = y + snapshot.avatar.height * 0.5;
        let flap = !rising && centre > self.target_line(snapshot);
        InputFrame {
            impulses: u32::from(flap),
            ..Default::default()
        }
    }
}

/// Fixed-timestep driver owning a session and its collaborators
#[derive(Debug)]
pub struct App<I, A, R> {
    pub session: GameSession,
    pub input: I,
    pub audio: A,
    pub renderer: R,
    /// Start a new session as soon as the current one ends
    pub auto_restart: bool,
    accumulator: f32,
    quit: bool,
    frames: u64,
}

impl<I: InputSource, A: AudioSink, R: Renderer> App<I, A, R> {
    pub fn new(session: GameSession, input: I, audio: A, renderer: R) -> Self {
        Self {
            session,
            input,
            audio,
            renderer,
            auto_restart: false,
            accumulator: 0.0,
            quit: false,
            frames: 0,
        }
    }

    pub fn with_auto_restart(mut self, auto_restart: bool) -> Self {
        self.auto_restart = auto_restart;
        self
    }

    /// True once an input source asked to stop
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Ticks driven so far, across restarts
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run exactly one tick: poll, queue, step, play sounds, draw
    pub fn frame(&mut self) -> FrameEvents {
        let input = self.input.poll(&self.session.snapshot());
        if input.quit {
            self.quit = true;
            return FrameEvents::default();
        }

        if input.restart || (self.auto_restart && !self.session.is_running()) {
            self.session.restart();
        }

        if input.impulses > 0 && self.session.is_running() {
            for _ in 0..input.impulses {
                self.session.queue_impulse();
            }
            self.audio.play(SoundEffect::Flap);
        }

        let events = self.session.step();
        for _ in 0..events.passes {
            self.audio.play(SoundEffect::Score);
        }
        if events.ended {
            self.audio.play(SoundEffect::Crash);
        }

        self.renderer.draw(&self.session.snapshot());
        self.frames += 1;
        events
    }

    /// Feed wall-clock time; runs as many whole ticks as have accumulated
    ///
    /// Large gaps (a stalled window, a debugger) are clamped so one call
    /// never runs more than [`MAX_SUBSTEPS`] ticks. Returns the ticks run.
    pub fn update(&mut self, dt: f32) -> u32 {
        let tick_dt = self.session.config.tick_dt();
        let dt = dt.clamp(0.0, tick_dt * MAX_SUBSTEPS as f32);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= tick_dt && substeps < MAX_SUBSTEPS && !self.quit {
            self.frame();
            self.accumulator -= tick_dt;
            substeps += 1;
        }
        substeps
    }
}

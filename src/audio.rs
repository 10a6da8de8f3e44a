//! Audio collaborator
//!
//! The simulation never plays sound. The driver turns frame events into
//! [`SoundEffect`]s and hands them to whatever [`AudioSink`] the front-end
//! provides.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Avatar flapped
    Flap,
    /// Obstacle cleared (coin)
    Score,
    /// Session ended
    Crash,
}

/// Anything that can play a sound effect
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Discards every effect
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Headless sink: logs effects at the volume they would play and keeps a
/// history for inspection
#[derive(Debug, Clone)]
pub struct LogAudio {
    master_volume: f32,
    muted: bool,
    pub history: Vec<SoundEffect>,
}

impl Default for LogAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl LogAudio {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            muted: false,
            history: Vec::new(),
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume
        }
    }

    /// Number of times `effect` was played
    pub fn count(&self, effect: SoundEffect) -> usize {
        self.history.iter().filter(|&&e| e == effect).count()
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        log::debug!("Playing {:?} at volume {:.2}", effect, vol);
        self.history.push(effect);
    }
}

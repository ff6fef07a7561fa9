//! Sound cues for game events
//!
//! Procedurally generated effects: each cue is a single oscillator with a
//! short attack and a linear release, so any backend (Web Audio, cpal, ...)
//! can synthesize it without sample files. The engine never plays sound;
//! the audio collaborator turns drained events into cues here.

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Flap impulse
    Flap,
    /// Obstacle passed
    Score,
    /// Run ended
    Hit,
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Waveform {
    Sine,
    Sawtooth,
}

/// Parameters for one synthesized blip
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoundCue {
    pub frequency_hz: f32,
    pub waveform: Waveform,
    /// Time to reach peak gain (s)
    pub attack_s: f32,
    /// Total length, attack included (s)
    pub duration_s: f32,
    /// Gain at the end of the attack, before volume scaling
    pub peak_gain: f32,
}

impl SoundEffect {
    /// Effect for an event (every event has one)
    pub fn for_event(event: &GameEvent) -> Self {
        match event {
            GameEvent::Flap => SoundEffect::Flap,
            GameEvent::Pass { .. } => SoundEffect::Score,
            GameEvent::GameOver { .. } => SoundEffect::Hit,
        }
    }

    pub fn cue(&self) -> SoundCue {
        match self {
            // Short mid beep
            SoundEffect::Flap => SoundCue {
                frequency_hz: 800.0,
                waveform: Waveform::Sine,
                attack_s: 0.01,
                duration_s: 0.1,
                peak_gain: 0.3,
            },
            // Higher, longer beep
            SoundEffect::Score => SoundCue {
                frequency_hz: 1200.0,
                waveform: Waveform::Sine,
                attack_s: 0.01,
                duration_s: 0.2,
                peak_gain: 0.3,
            },
            // Low buzz
            SoundEffect::Hit => SoundCue {
                frequency_hz: 150.0,
                waveform: Waveform::Sawtooth,
                attack_s: 0.01,
                duration_s: 0.3,
                peak_gain: 0.3,
            },
        }
    }
}

/// A cue ready for the backend, with volume already applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedSound {
    pub effect: SoundEffect,
    pub cue: SoundCue,
    /// Final peak gain after master/sfx/mute
    pub gain: f32,
}

/// Volume state and event-to-cue mapping
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Cues for a batch of drained events (empty when silent)
    pub fn plan(&self, events: &[GameEvent]) -> Vec<PlannedSound> {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return Vec::new();
        }
        events
            .iter()
            .map(|event| {
                let effect = SoundEffect::for_event(event);
                let cue = effect.cue();
                PlannedSound {
                    effect,
                    cue,
                    gain: cue.peak_gain * vol,
                }
            })
            .collect()
    }
}

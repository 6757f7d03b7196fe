//! Audio system using rodio
//!
//! Procedurally generated tones - no sound files needed!
//! Playback is fire-and-forget and best effort: a missing device or a failed
//! sink never reaches the game loop.

use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink};

use crate::consts::{CHANNELS, SAMPLE_RATE};
use crate::settings::Settings;
use crate::sim::{GameEvent, PowerUpKind};

/// Volume used by every built-in tone
pub const DEFAULT_TONE_VOLUME: f32 = 0.3;

/// A sine tone request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub frequency_hz: f32,
    pub duration_ms: u32,
    /// Playback volume (0.0 - 1.0)
    pub volume: f32,
}

impl Tone {
    pub const fn new(frequency_hz: f32, duration_ms: u32) -> Self {
        Self {
            frequency_hz,
            duration_ms,
            volume: DEFAULT_TONE_VOLUME,
        }
    }

    /// Game over - low and long
    pub const GAME_OVER: Tone = Tone::new(300.0, 300);
    /// Power-up collected - short high blip
    pub const POWERUP: Tone = Tone::new(700.0, 100);
    /// Block dodged - very short tick
    pub const DODGE: Tone = Tone::new(500.0, 50);
    /// Shield broke but saved the run
    pub const SHIELD_HIT: Tone = Tone::new(900.0, 80);

    /// Tone for a simulation event, if it has one
    pub fn for_event(event: GameEvent) -> Option<Tone> {
        match event {
            GameEvent::GameOver => Some(Tone::GAME_OVER),
            GameEvent::PowerUpCollected(PowerUpKind::Speed | PowerUpKind::Shield) => {
                Some(Tone::POWERUP)
            }
            GameEvent::BlockDodged => Some(Tone::DODGE),
            GameEvent::ShieldAbsorbed => Some(Tone::SHIELD_HIT),
            GameEvent::BoostExpired => None,
        }
    }
}

/// Frames (per channel) needed for `duration_ms`
pub fn frame_count(duration_ms: u32) -> usize {
    (duration_ms as u64 * SAMPLE_RATE as u64 / 1000) as usize
}

/// Build an interleaved stereo 16-bit sine buffer at full scale.
/// Volume is applied at playback, not baked into the samples.
pub fn synthesize(tone: &Tone) -> Vec<i16> {
    let frames = frame_count(tone.duration_ms);
    let step = std::f64::consts::TAU * tone.frequency_hz as f64 / SAMPLE_RATE as f64;

    let mut samples = Vec::with_capacity(frames * CHANNELS as usize);
    for i in 0..frames {
        let value = ((step * i as f64).sin() * i16::MAX as f64) as i16;
        for _ in 0..CHANNELS {
            samples.push(value);
        }
    }
    samples
}

/// Open output device. The stream must stay alive for the handle to play.
struct Output {
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

/// Audio manager for the game
pub struct AudioManager {
    output: Option<Output>,
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
        let output = match OutputStream::try_default() {
            Ok((stream, handle)) => Some(Output {
                _stream: stream,
                handle,
            }),
            Err(e) => {
                log::warn!("No audio output device ({}) - audio disabled", e);
                None
            }
        };
        Self {
            output,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Manager that never touches a device
    pub fn disabled() -> Self {
        Self {
            output: None,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Open the default device and apply volume settings
    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.apply_settings(settings);
        audio
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
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

    pub fn toggle_muted(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Volume a tone would actually play at
    pub fn playback_volume(&self, tone: &Tone) -> f32 {
        self.effective_volume() * tone.volume.clamp(0.0, 1.0)
    }

    /// Synthesize and start a tone. Returns immediately; errors are dropped.
    pub fn play_tone(&self, tone: Tone) {
        let vol = self.playback_volume(&tone);
        if vol <= 0.0 {
            return;
        }

        let Some(output) = &self.output else { return };

        match Sink::try_new(&output.handle) {
            Ok(sink) => {
                sink.set_volume(vol);
                sink.append(SamplesBuffer::new(CHANNELS, SAMPLE_RATE, synthesize(&tone)));
                // Fire-and-forget: the mixer keeps the sound alive
                sink.detach();
            }
            Err(e) => log::debug!("Dropped tone {:?}: {}", tone, e),
        }
    }

    /// Play the sound effect for a simulation event
    pub fn play_event(&self, event: GameEvent) {
        if let Some(tone) = Tone::for_event(event) {
            self.play_tone(tone);
        }
    }
}

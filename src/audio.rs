//! Sound effects, synthesized at startup into in-memory WAV clips.

use crate::config::AUDIO_SAMPLE_RATE;
use log::warn;
use macroquad::audio::{PlaySoundParams, Sound, load_sound_from_bytes, play_sound};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::f32::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Sling released
    Launch,
    /// Ball hits the ground
    Bounce,
    /// Ball hits a log
    WoodKnock,
    /// A target is destroyed
    Pop,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 4] = [
        SoundEffect::Launch,
        SoundEffect::Bounce,
        SoundEffect::WoodKnock,
        SoundEffect::Pop,
    ];

    /// Mono samples in [-1, 1] at `AUDIO_SAMPLE_RATE`.
    pub fn samples(self) -> Vec<f32> {
        match self {
            SoundEffect::Launch => sweep(260.0, 820.0, 0.16, 0.5),
            SoundEffect::Bounce => sweep(140.0, 70.0, 0.12, 0.7),
            SoundEffect::WoodKnock => knock(0.14),
            SoundEffect::Pop => sweep(900.0, 180.0, 0.18, 0.55),
        }
    }
}

// Sine sweep with a linear decay envelope
fn sweep(start_hz: f32, end_hz: f32, seconds: f32, gain: f32) -> Vec<f32> {
    let count = (seconds * AUDIO_SAMPLE_RATE as f32) as usize;
    let mut phase = 0.0f32;
    (0..count)
        .map(|i| {
            let t = i as f32 / count as f32;
            let hz = start_hz + (end_hz - start_hz) * t;
            phase = (phase + TAU * hz / AUDIO_SAMPLE_RATE as f32) % TAU;
            phase.sin() * gain * (1.0 - t)
        })
        .collect()
}

// Filtered noise over a low tone, for wood
fn knock(seconds: f32) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    let tone = sweep(220.0, 180.0, seconds, 0.4);
    let mut smoothed = 0.0f32;
    tone.iter()
        .enumerate()
        .map(|(i, s)| {
            let t = i as f32 / tone.len() as f32;
            smoothed = smoothed * 0.7 + rng.gen_range(-1.0f32..1.0) * 0.3;
            (s + smoothed * 0.5 * (1.0 - t) * (1.0 - t)).clamp(-1.0, 1.0)
        })
        .collect()
}

/// Encode mono samples as a 16-bit PCM WAV file.
pub fn encode_wav(samples: &[f32], sample_rate: u32) -> Vec<u8> {
    let data_len = (samples.len() * 2) as u32;
    let mut bytes = Vec::with_capacity(44 + data_len as usize);
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // Mono
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&(sample_rate * 2).to_le_bytes()); // Byte rate
    bytes.extend_from_slice(&2u16.to_le_bytes()); // Block align
    bytes.extend_from_slice(&16u16.to_le_bytes()); // Bits per sample
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    for sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

#[derive(Default)]
pub struct AudioManager {
    sounds: HashMap<SoundEffect, Sound>,
    muted: bool,
}

impl AudioManager {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn muted() -> Self {
        AudioManager {
            muted: true,
            ..Default::default()
        }
    }

    // Synthesize and upload every effect. Failures leave that effect silent.
    pub async fn load_assets(&mut self) {
        if self.muted {
            return;
        }
        for effect in SoundEffect::ALL {
            let wav = encode_wav(&effect.samples(), AUDIO_SAMPLE_RATE);
            match load_sound_from_bytes(&wav).await {
                Ok(sound) => {
                    self.sounds.insert(effect, sound);
                }
                Err(e) => warn!("Failed to load {:?} sound: {}", effect, e),
            }
        }
    }

    /// Play an effect if it is loaded. `volume` is clamped to [0, 1].
    pub fn play(&self, effect: SoundEffect, volume: f32) {
        if self.muted {
            return;
        }
        if let Some(sound) = self.sounds.get(&effect) {
            play_sound(
                sound,
                PlaySoundParams {
                    looped: false,
                    volume: volume.clamp(0.0, 1.0),
                },
            );
        }
    }
}

//! Sound Effect Synthesis
//!
//! All effects are generated in memory as 16-bit mono PCM and wrapped
//! in a RIFF/WAVE container, ready to be handed to an audio backend.
//! Noise is drawn from [`DeterministicRng`] so the clips are identical
//! on every start.

use std::f64::consts::TAU;
use serde::{Serialize, Deserialize};

use crate::core::DeterministicRng;

/// Output sample rate (Hz)
pub const SAMPLE_RATE: u32 = 44_100;

/// Seed for noise-based clips.
const NOISE_SEED: u64 = 0x50_4E_44;

/// The game's sound effects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Player or UFO shot
    Fire,
    /// Asteroid, UFO or ship destroyed
    Explode,
    /// Engine rumble (looped)
    Thrust,
    /// UFO warble (looped)
    Saucer,
    /// Hyperspace jump
    Hyperspace,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 5] = [
        SoundEffect::Fire,
        SoundEffect::Explode,
        SoundEffect::Thrust,
        SoundEffect::Saucer,
        SoundEffect::Hyperspace,
    ];

    /// Clip length in seconds.
    pub fn duration(self) -> f64 {
        match self {
            SoundEffect::Fire => 0.2,
            SoundEffect::Explode => 0.5,
            SoundEffect::Thrust => 1.0,
            SoundEffect::Saucer => 1.0,
            SoundEffect::Hyperspace => 0.4,
        }
    }

    /// Whether the client plays this clip on a loop.
    pub fn is_looped(self) -> bool {
        matches!(self, SoundEffect::Thrust | SoundEffect::Saucer)
    }

    /// Short lowercase name, for logs and file names.
    pub fn name(self) -> &'static str {
        match self {
            SoundEffect::Fire => "fire",
            SoundEffect::Explode => "explode",
            SoundEffect::Thrust => "thrust",
            SoundEffect::Saucer => "saucer",
            SoundEffect::Hyperspace => "hyperspace",
        }
    }

    /// Generate the clip's samples.
    pub fn samples(self, rng: &mut DeterministicRng) -> Vec<i16> {
        let count = (f64::from(SAMPLE_RATE) * self.duration()) as usize;
        let rate = f64::from(SAMPLE_RATE);

        (0..count)
            .map(|i| {
                let t = i as f64 / rate;
                let progress = i as f64 / count as f64;
                let value = match self {
                    // Descending sweep with fading amplitude
                    SoundEffect::Fire => {
                        let freq = 1500.0 - progress * 1000.0;
                        0.8 * (TAU * freq * t).sin() * (1.0 - progress)
                    }
                    SoundEffect::Explode => {
                        f64::from(rng.next_f32_range(-1.0, 1.0)) * (1.0 - progress)
                    }
                    SoundEffect::Thrust => {
                        let noise = f64::from(rng.next_f32_range(-0.5, 0.5));
                        noise + 0.5 * (TAU * 100.0 * t).sin()
                    }
                    // Two tones swapping every 0.1 s
                    SoundEffect::Saucer => {
                        let freq = if (i / (SAMPLE_RATE as usize / 10)) % 2 == 0 { 400.0 } else { 600.0 };
                        0.7 * (TAU * freq * t).sin()
                    }
                    SoundEffect::Hyperspace => {
                        let freq = 200.0 + progress * 1500.0;
                        0.8 * (TAU * freq * t).sin()
                    }
                };
                to_pcm(value)
            })
            .collect()
    }

    /// Generate the clip as a complete WAV file.
    pub fn wav(self, rng: &mut DeterministicRng) -> Vec<u8> {
        encode_wav(&self.samples(rng), SAMPLE_RATE)
    }
}

/// Every effect rendered to WAV bytes.
#[derive(Clone, Debug)]
pub struct SoundBank {
    clips: Vec<(SoundEffect, Vec<u8>)>,
}

impl SoundBank {
    /// Synthesize all effects.
    pub fn synthesize() -> Self {
        let mut rng = DeterministicRng::new(NOISE_SEED);
        let clips = SoundEffect::ALL
            .iter()
            .map(|&effect| (effect, effect.wav(&mut rng)))
            .collect();
        Self { clips }
    }

    pub fn get(&self, effect: SoundEffect) -> Option<&[u8]> {
        self.clips
            .iter()
            .find(|(e, _)| *e == effect)
            .map(|(_, bytes)| bytes.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (SoundEffect, &[u8])> {
        self.clips.iter().map(|(e, bytes)| (*e, bytes.as_slice()))
    }
}

/// Convert a sample in `[-1, 1]` to 16-bit PCM, truncating like a cast.
#[inline]
fn to_pcm(value: f64) -> i16 {
    (value.clamp(-1.0, 1.0) * f64::from(i16::MAX)) as i16
}

/// Encode mono 16-bit PCM samples as a RIFF/WAVE file.
pub fn encode_wav(samples: &[i16], sample_rate: u32) -> Vec<u8> {
    const CHANNELS: u16 = 1;
    const BITS_PER_SAMPLE: u16 = 16;
    let block_align = CHANNELS * BITS_PER_SAMPLE / 8;
    let byte_rate = sample_rate * u32::from(block_align);
    let data_len = (samples.len() * 2) as u32;

    let mut out = Vec::with_capacity(44 + data_len as usize);

    // RIFF header
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    // fmt chunk
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&CHANNELS.to_le_bytes());
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());

    // data chunk
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for sample in samples {
        out.extend_from_slice(&sample.to_le_bytes());
    }

    out
}

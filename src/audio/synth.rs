//! Synthesised cues played on the default output device.
//!
//! Every cue is rendered once up front; playing one hands a copy of the
//! samples to a detached rodio sink.

use super::AudioSink;
use crate::game::SoundCue;
use fundsp::prelude32 as dsp;
use rodio::{buffer::SamplesBuffer, OutputStream, OutputStreamHandle, Sink, StreamError};

pub const SAMPLE_RATE: u32 = 44_100;

/// Pre-rendered mono samples for each cue.
#[derive(Debug, Clone)]
pub struct CueBank {
    wing: Vec<f32>,
    point: Vec<f32>,
    die: Vec<f32>,
    swoosh: Vec<f32>,
}

impl CueBank {
    pub fn render(sample_rate: u32) -> Self {
        Self {
            wing: wing(sample_rate),
            point: point(sample_rate),
            die: die(sample_rate),
            swoosh: swoosh(sample_rate),
        }
    }

    pub fn samples(&self, cue: SoundCue) -> &[f32] {
        match cue {
            SoundCue::Wing => &self.wing,
            SoundCue::Point => &self.point,
            SoundCue::Die => &self.die,
            SoundCue::Swoosh => &self.swoosh,
        }
    }
}

pub struct SynthSink {
    // Dropping the stream silences every sink attached to it
    _stream: OutputStream,
    handle: OutputStreamHandle,
    bank: CueBank,
}

impl SynthSink {
    /// Opens the default output device.
    pub fn new() -> Result<Self, StreamError> {
        let (stream, handle) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            handle,
            bank: CueBank::render(SAMPLE_RATE),
        })
    }
}

impl AudioSink for SynthSink {
    fn play(&mut self, cue: SoundCue) {
        match Sink::try_new(&self.handle) {
            Ok(sink) => {
                let samples = self.bank.samples(cue).to_vec();
                sink.append(SamplesBuffer::new(1, SAMPLE_RATE, samples));
                sink.detach();
            }
            Err(e) => log::warn!("failed to play {:?}: {}", cue, e),
        }
    }
}

/// Short upward chirp.
fn wing(sample_rate: u32) -> Vec<f32> {
    let length = 0.1;
    let mut node = (dsp::lfo(|t: f32| dsp::xerp(300.0, 700.0, (t / 0.07).min(1.0)))
        >> dsp::sine())
        * dsp::lfo(move |t: f32| dsp::xerp(0.15, 0.001, (t / length).min(1.0)));
    render(&mut node, sample_rate, length)
}

/// Two rising chime notes.
fn point(sample_rate: u32) -> Vec<f32> {
    const NOTES: [f32; 2] = [660.0, 880.0];
    let spacing = 0.09;
    let note_length = 0.14;
    let mut out = vec![0.0; seconds_to_samples(sample_rate, spacing + note_length)];

    for (i, freq) in NOTES.into_iter().enumerate() {
        let mut node = dsp::sine_hz(freq)
            * dsp::lfo(move |t: f32| dsp::xerp(0.12, 0.001, (t / note_length).min(1.0)));
        let note = render(&mut node, sample_rate, note_length);
        let offset = seconds_to_samples(sample_rate, spacing * i as f32);
        for (dst, src) in out.iter_mut().skip(offset).zip(note) {
            *dst += src;
        }
    }
    out
}

/// Falling buzz.
fn die(sample_rate: u32) -> Vec<f32> {
    let length = 0.45;
    let mut node = (dsp::lfo(|t: f32| dsp::lerp(440.0, 90.0, (t / 0.35).min(1.0)))
        >> dsp::saw())
        * dsp::lfo(move |t: f32| dsp::lerp(0.15, 0.0, (t / length).min(1.0)));
    render(&mut node, sample_rate, length)
}

/// Band-passed noise burst.
fn swoosh(sample_rate: u32) -> Vec<f32> {
    let length = 0.12;
    let mut node = (dsp::noise() >> dsp::bandpass_hz(1500.0, 0.7) >> dsp::mul(0.1))
        * dsp::lfo(move |t: f32| dsp::xerp(0.3, 0.001, (t / length).min(1.0)));
    render(&mut node, sample_rate, length)
}

fn seconds_to_samples(sample_rate: u32, seconds: f32) -> usize {
    (sample_rate as f32 * seconds) as usize
}

fn render(node: &mut dyn dsp::AudioUnit, sample_rate: u32, seconds: f32) -> Vec<f32> {
    node.set_sample_rate(sample_rate as f64);
    node.reset();
    (0..seconds_to_samples(sample_rate, seconds))
        .map(|_| node.get_mono())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [SoundCue; 4] = [
        SoundCue::Wing,
        SoundCue::Point,
        SoundCue::Die,
        SoundCue::Swoosh,
    ];

    fn peak(samples: &[f32]) -> f32 {
        samples.iter().fold(0.0f32, |m, s| m.max(s.abs()))
    }

    #[test]
    fn test_every_cue_is_audible_and_unclipped() {
        let bank = CueBank::render(SAMPLE_RATE);
        for cue in ALL {
            let samples = bank.samples(cue);
            assert!(!samples.is_empty(), "{:?} has no samples", cue);
            assert!(samples.iter().all(|s| s.is_finite()));
            let loudest = peak(samples);
            assert!(loudest > 0.001, "{:?} is silent", cue);
            assert!(loudest <= 1.0, "{:?} clips at {}", cue, loudest);
        }
    }

    #[test]
    fn test_cue_lengths() {
        let bank = CueBank::render(SAMPLE_RATE);
        assert_eq!(bank.samples(SoundCue::Wing).len(), seconds_to_samples(SAMPLE_RATE, 0.1));
        assert_eq!(bank.samples(SoundCue::Die).len(), seconds_to_samples(SAMPLE_RATE, 0.45));
        assert!(bank.samples(SoundCue::Die).len() > bank.samples(SoundCue::Point).len());
    }

    #[test]
    fn test_chime_second_note_starts_late() {
        let samples = point(SAMPLE_RATE);
        assert_eq!(samples.len(), seconds_to_samples(SAMPLE_RATE, 0.09 + 0.14));
        // Past the end of the first note only the second one sounds
        let first_end = seconds_to_samples(SAMPLE_RATE, 0.14);
        assert!(peak(&samples[first_end..]) > 0.001);
    }
}

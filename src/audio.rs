//! Sound cues.
//!
//! Built with the `sound` feature, every cue is a synthesised tone played on
//! the default output device. Without it, or when no device opens, the
//! terminal bell marks scoring and crashing.

#[cfg(feature = "sound")]
pub mod synth;

use crate::game::{GameEvent, SoundCue};
use std::io::{self, Write};

pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Rings the terminal bell for the cues worth interrupting for.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn ring(&mut self) -> io::Result<()> {
        self.out.write_all(b"\x07")?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, cue: SoundCue) {
        if matches!(cue, SoundCue::Die | SoundCue::Point) {
            if let Err(e) = self.ring() {
                log::warn!("failed to ring bell: {}", e);
            }
        }
    }
}

impl<S: AudioSink + ?Sized> AudioSink for Box<S> {
    fn play(&mut self, cue: SoundCue) {
        (**self).play(cue);
    }
}

/// A sink with a mute switch.
pub struct Muting<S> {
    inner: S,
    muted: bool,
}

impl<S: AudioSink> Muting<S> {
    pub fn new(inner: S, muted: bool) -> Self {
        Self { inner, muted }
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Flips the switch and returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.muted = !self.muted;
        log::debug!("sound {}", if self.muted { "muted" } else { "unmuted" });
        self.muted
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: AudioSink> AudioSink for Muting<S> {
    fn play(&mut self, cue: SoundCue) {
        if !self.muted {
            self.inner.play(cue);
        }
    }
}

/// The best sink this build and machine support.
pub fn output_sink() -> Box<dyn AudioSink> {
    #[cfg(feature = "sound")]
    {
        match synth::SynthSink::new() {
            Ok(sink) => {
                log::info!("audio output opened");
                return Box::new(sink);
            }
            Err(e) => log::warn!("no audio output ({}), falling back to the bell", e),
        }
    }
    Box::new(TerminalBell::new(io::stdout()))
}

/// Sound cues for a batch of events, in order.
pub fn cues_for(events: &[GameEvent]) -> Vec<SoundCue> {
    events.iter().filter_map(GameEvent::sound).collect()
}

pub fn play_events(sink: &mut dyn AudioSink, events: &[GameEvent]) {
    for cue in cues_for(events) {
        log::trace!("sound {:?}", cue);
        sink.play(cue);
    }
}

//! Fire-and-forget sound cues.

use std::io::{self, Write};

use tracing::debug;

/// Named sound events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCue {
    Eat,
    Pause,
    Resume,
    GameOver,
}

impl AudioCue {
    pub fn name(&self) -> &'static str {
        match self {
            AudioCue::Eat => "eat",
            AudioCue::Pause => "pause",
            AudioCue::Resume => "resume",
            AudioCue::GameOver => "gameOver",
        }
    }
}

/// Somewhere to send cues. Implementations must not fail loudly.
pub trait AudioSink {
    fn play(&mut self, cue: AudioCue);
}

/// Drops every cue
#[derive(Debug, Default)]
pub struct Mute;

impl AudioSink for Mute {
    fn play(&mut self, _cue: AudioCue) {}
}

/// Rings the terminal bell for eat and game over
pub struct TerminalBell<W: Write = io::Stderr> {
    out: W,
}

impl TerminalBell<io::Stderr> {
    pub fn new() -> Self {
        Self { out: io::stderr() }
    }
}

impl Default for TerminalBell<io::Stderr> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    fn ring(&mut self) -> io::Result<()> {
        self.out.write_all(b"\x07")?;
        self.out.flush()
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, cue: AudioCue) {
        if !matches!(cue, AudioCue::Eat | AudioCue::GameOver) {
            return;
        }
        if let Err(err) = self.ring() {
            debug!(%err, cue = cue.name(), "failed to ring terminal bell");
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_bell_rings_for_eat_and_game_over_only() {
        let mut bell = TerminalBell::with_writer(Vec::new());
        bell.play(AudioCue::Eat);
        bell.play(AudioCue::Pause);
        bell.play(AudioCue::Resume);
        bell.play(AudioCue::GameOver);

        assert_eq!(bell.out, b"\x07\x07");
    }

    #[test]
    fn test_bell_swallows_write_errors() {
        let mut bell = TerminalBell::with_writer(BrokenPipe);
        bell.play(AudioCue::GameOver);
    }

    #[test]
    fn test_cue_names() {
        let names: Vec<_> = [AudioCue::Eat, AudioCue::Pause, AudioCue::Resume, AudioCue::GameOver]
            .iter()
            .map(AudioCue::name)
            .collect();
        assert_eq!(names, vec!["eat", "pause", "resume", "gameOver"]);
    }
}

use std::io::{self, Write};

/// Fire-and-forget sound events raised by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Cue {
    Start,
    FruitEaten,
    GameOver,
}

/// Something that can play a [`Cue`]. Failures are swallowed; a missing
/// sound never interrupts play.
pub trait CueSink {
    fn play(&mut self, cue: Cue);
}

/// Rings the terminal bell for every cue.
#[derive(Debug)]
pub struct TerminalBell<W: Write> {
    out: W,
}

impl TerminalBell<io::Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> CueSink for TerminalBell<W> {
    fn play(&mut self, cue: Cue) {
        // The bell has one sound; a double ring marks the end of a run.
        let rings: &[u8] = match cue {
            Cue::Start | Cue::FruitEaten => b"\x07",
            Cue::GameOver => b"\x07\x07",
        };

        if let Err(error) = self.out.write_all(rings).and_then(|()| self.out.flush()) {
            tracing::debug!(?cue, %error, "audio cue dropped");
        }
    }
}

/// Discards every cue (`--mute`).
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl CueSink for Silent {
    fn play(&mut self, _cue: Cue) {}
}

/// Picks the sink for the current session.
#[must_use]
pub fn sink_for(muted: bool) -> Box<dyn CueSink> {
    if muted {
        Box::new(Silent)
    } else {
        Box::new(TerminalBell::stdout())
    }
}

#[cfg(test)]
mod tests {
    use super::{Cue, CueSink, Silent, TerminalBell};

    #[test]
    fn bell_rings_once_per_event_and_twice_at_game_over() {
        let mut bell = TerminalBell::new(Vec::new());

        bell.play(Cue::Start);
        bell.play(Cue::FruitEaten);
        bell.play(Cue::GameOver);

        assert_eq!(bell.out, b"\x07\x07\x07\x07");
    }

    #[test]
    fn silent_sink_accepts_every_cue() {
        let mut sink = Silent;
        sink.play(Cue::Start);
        sink.play(Cue::GameOver);
    }
}

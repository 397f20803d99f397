use itertools::Itertools;
use tracing::debug;

use super::keycode::Keycode;
use super::report::KeyReport;
use super::sink::ReportSink;

/// Chord-oriented keyboard over a report sink.
///
/// Nothing in this crate holds a key across a wait: every chord helper is
/// expected to be followed by [`Keyboard::release_all`], and [`Keyboard::tap`]
/// does both.
#[derive(Debug)]
pub struct Keyboard<S> {
    sink: S,
}

impl<S: ReportSink> Keyboard<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Assert the chord simultaneously.
    pub fn press(&mut self, keys: &[Keycode]) -> crate::Result<()> {
        debug!(chord = %keys.iter().join("+"), "press");
        self.sink.send(&KeyReport::chord(keys))
    }

    /// Release everything. Safe to call with nothing pressed.
    pub fn release_all(&mut self) -> crate::Result<()> {
        self.sink.send(&KeyReport::released())
    }

    /// Press the chord and immediately release it.
    pub fn tap(&mut self, keys: &[Keycode]) -> crate::Result<()> {
        self.press(keys)?;
        self.release_all()
    }

    /// Send a pre-built frame (the layout uses this for shifted strokes).
    pub fn send(&mut self, report: &KeyReport) -> crate::Result<()> {
        self.sink.send(report)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hid::RecordingSink;

    #[test]
    fn tap_presses_then_releases() {
        let mut keyboard = Keyboard::new(RecordingSink::new());
        keyboard.tap(&[Keycode::LeftCtrl, Keycode::T]).unwrap();

        let sent = &keyboard.sink().sent;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0], KeyReport::chord(&[Keycode::LeftCtrl, Keycode::T]));
        assert!(sent[1].is_released());
    }

    #[test]
    fn release_all_with_nothing_pressed_is_safe() {
        let mut keyboard = Keyboard::new(RecordingSink::new());
        keyboard.release_all().unwrap();
        keyboard.release_all().unwrap();

        assert!(keyboard.sink().sent.iter().all(KeyReport::is_released));
    }
}

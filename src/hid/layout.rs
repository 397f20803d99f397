use tracing::debug;

use super::keyboard::Keyboard;
use super::report::KeyReport;
use super::sink::ReportSink;
use crate::error::{Error, Result};

/// The fixed US keymap, the only layout this device speaks. Covers
/// printable ASCII plus newline and tab; anything else is an error
/// surfaced to the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsLayout;

/// One character rendered as a usage ID plus shift state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keystroke {
    pub usage: u8,
    pub shift: bool,
}

impl UsLayout {
    pub fn encode(self, c: char) -> Result<Keystroke> {
        let (usage, shift) = match c {
            'a'..='z' => (0x04 + (c as u8 - b'a'), false),
            'A'..='Z' => (0x04 + (c.to_ascii_lowercase() as u8 - b'a'), true),
            '1'..='9' => (0x1e + (c as u8 - b'1'), false),
            '0' => (0x27, false),
            '\n' => (0x28, false),
            '\t' => (0x2b, false),
            ' ' => (0x2c, false),
            '!' => (0x1e, true),
            '@' => (0x1f, true),
            '#' => (0x20, true),
            '$' => (0x21, true),
            '%' => (0x22, true),
            '^' => (0x23, true),
            '&' => (0x24, true),
            '*' => (0x25, true),
            '(' => (0x26, true),
            ')' => (0x27, true),
            '-' => (0x2d, false),
            '_' => (0x2d, true),
            '=' => (0x2e, false),
            '+' => (0x2e, true),
            '[' => (0x2f, false),
            '{' => (0x2f, true),
            ']' => (0x30, false),
            '}' => (0x30, true),
            '\\' => (0x31, false),
            '|' => (0x31, true),
            ';' => (0x33, false),
            ':' => (0x33, true),
            '\'' => (0x34, false),
            '"' => (0x34, true),
            '`' => (0x35, false),
            '~' => (0x35, true),
            ',' => (0x36, false),
            '<' => (0x36, true),
            '.' => (0x37, false),
            '>' => (0x37, true),
            '/' => (0x38, false),
            '?' => (0x38, true),
            _ => return Err(Error::UnsupportedChar(c)),
        };
        Ok(Keystroke { usage, shift })
    }

    /// Type `s` character by character, releasing after every stroke so no
    /// key is ever left held.
    pub fn type_text<S: ReportSink>(self, keyboard: &mut Keyboard<S>, s: &str) -> Result<()> {
        debug!(text = s, "type");
        for c in s.chars() {
            let stroke = self.encode(c)?;
            keyboard.send(&KeyReport::keystroke(stroke.usage, stroke.shift))?;
            keyboard.release_all()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hid::RecordingSink;
    use assert_matches::assert_matches;

    #[test]
    fn letters_map_with_case() {
        let layout = UsLayout;
        assert_eq!(
            layout.encode('t').unwrap(),
            Keystroke {
                usage: 0x17,
                shift: false
            }
        );
        assert_eq!(
            layout.encode('T').unwrap(),
            Keystroke {
                usage: 0x17,
                shift: true
            }
        );
    }

    #[test]
    fn digits_wrap_zero_to_the_end_of_the_row() {
        let layout = UsLayout;
        assert_eq!(layout.encode('1').unwrap().usage, 0x1e);
        assert_eq!(layout.encode('9').unwrap().usage, 0x26);
        assert_eq!(layout.encode('0').unwrap().usage, 0x27);
    }

    #[test]
    fn url_characters_are_covered() {
        let layout = UsLayout;
        for c in "https://chrome-dino-game.github.io/".chars() {
            layout.encode(c).unwrap();
        }
        for c in "https://quizzitymc.github.io/picohacker/dinosaurinvasion.html".chars() {
            layout.encode(c).unwrap();
        }
    }

    #[test]
    fn colon_is_shifted_semicolon() {
        let layout = UsLayout;
        assert_eq!(
            layout.encode(':').unwrap(),
            Keystroke {
                usage: 0x33,
                shift: true
            }
        );
    }

    #[test]
    fn unsupported_char_is_an_error() {
        let layout = UsLayout;
        assert_matches!(layout.encode('é'), Err(Error::UnsupportedChar('é')));
        assert_matches!(layout.encode('✓'), Err(Error::UnsupportedChar(_)));
    }

    #[test]
    fn type_text_releases_after_every_stroke() {
        let layout = UsLayout;
        let mut keyboard = Keyboard::new(RecordingSink::new());
        layout.type_text(&mut keyboard, "ab").unwrap();

        let sent = &keyboard.sink().sent;
        assert_eq!(sent.len(), 4);
        assert_eq!(sent[0], KeyReport::keystroke(0x04, false));
        assert!(sent[1].is_released());
        assert_eq!(sent[2], KeyReport::keystroke(0x05, false));
        assert!(sent[3].is_released());
    }

    #[test]
    fn type_text_stops_at_first_unsupported_char() {
        let layout = UsLayout;
        let mut keyboard = Keyboard::new(RecordingSink::new());
        let err = layout.type_text(&mut keyboard, "a£b").unwrap_err();

        assert_matches!(err, Error::UnsupportedChar('£'));
        assert_eq!(keyboard.sink().sent.len(), 2);
    }
}

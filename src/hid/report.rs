use super::keycode::Keycode;

/// Wire size of a boot-protocol keyboard input report: one modifier
/// bitmask byte, one reserved byte, six regular-key slots.
pub const REPORT_LEN: usize = 8;

/// Keys asserted in a single report frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyReport {
    modifiers: u8,
    keys: [u8; 6],
}

impl KeyReport {
    /// The all-released report.
    pub fn released() -> Self {
        Self::default()
    }

    /// Report asserting the given chord. Modifier keys fold into the
    /// bitmask; the rest fill the six regular slots in any order. Keys
    /// beyond the sixth slot are dropped (boot-protocol rollover).
    pub fn chord(keys: &[Keycode]) -> Self {
        let mut report = Self::default();
        for &key in keys {
            report.press(key);
        }
        report
    }

    /// Report asserting one raw usage ID, optionally shifted. This is the
    /// form the layout produces when typing text.
    pub fn keystroke(usage: u8, shift: bool) -> Self {
        let mut report = Self::default();
        report.keys[0] = usage;
        if shift {
            report.press(Keycode::LeftShift);
        }
        report
    }

    pub fn press(&mut self, key: Keycode) {
        if let Some(bit) = key.modifier_bit() {
            self.modifiers |= bit;
            return;
        }
        let usage = key.usage();
        if self.keys.contains(&usage) {
            return;
        }
        if let Some(slot) = self.keys.iter_mut().find(|slot| **slot == 0) {
            *slot = usage;
        }
    }

    pub fn is_released(&self) -> bool {
        self.modifiers == 0 && self.keys == [0; 6]
    }

    /// Wire form, ready for the gadget endpoint.
    pub fn as_bytes(&self) -> [u8; REPORT_LEN] {
        let mut bytes = [0u8; REPORT_LEN];
        bytes[0] = self.modifiers;
        bytes[2..].copy_from_slice(&self.keys);
        bytes
    }
}

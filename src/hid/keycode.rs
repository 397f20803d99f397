//! Key symbols and their USB HID usage IDs (keyboard/keypad page).

/// The keys this device can send by name. The discriminant is the usage ID
/// itself; characters typed through the layout carry raw usage IDs and do
/// not need a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[repr(u8)]
pub enum Keycode {
    A = 0x04,
    B = 0x05,
    C = 0x06,
    D = 0x07,
    E = 0x08,
    F = 0x09,
    G = 0x0a,
    H = 0x0b,
    I = 0x0c,
    J = 0x0d,
    K = 0x0e,
    L = 0x0f,
    M = 0x10,
    N = 0x11,
    O = 0x12,
    P = 0x13,
    Q = 0x14,
    R = 0x15,
    S = 0x16,
    T = 0x17,
    U = 0x18,
    V = 0x19,
    W = 0x1a,
    X = 0x1b,
    Y = 0x1c,
    Z = 0x1d,
    Enter = 0x28,
    Escape = 0x29,
    Backspace = 0x2a,
    Tab = 0x2b,
    Space = 0x2c,
    LeftCtrl = 0xe0,
    LeftShift = 0xe1,
    LeftAlt = 0xe2,
    LeftGui = 0xe3,
}

impl Keycode {
    pub fn usage(self) -> u8 {
        self as u8
    }

    /// Bit this key sets in the report's modifier byte, if it is one of
    /// the modifiers.
    pub fn modifier_bit(self) -> Option<u8> {
        match self {
            Keycode::LeftCtrl => Some(0x01),
            Keycode::LeftShift => Some(0x02),
            Keycode::LeftAlt => Some(0x04),
            Keycode::LeftGui => Some(0x08),
            _ => None,
        }
    }

    pub fn is_modifier(self) -> bool {
        self.modifier_bit().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usages_follow_the_hid_table() {
        assert_eq!(Keycode::A.usage(), 0x04);
        assert_eq!(Keycode::T.usage(), 0x17);
        assert_eq!(Keycode::W.usage(), 0x1a);
        assert_eq!(Keycode::Enter.usage(), 0x28);
        assert_eq!(Keycode::Space.usage(), 0x2c);
    }

    #[test]
    fn modifier_bits() {
        assert_eq!(Keycode::LeftCtrl.modifier_bit(), Some(0x01));
        assert_eq!(Keycode::LeftShift.modifier_bit(), Some(0x02));
        assert_eq!(Keycode::Space.modifier_bit(), None);
        assert!(Keycode::LeftCtrl.is_modifier());
        assert!(!Keycode::T.is_modifier());
    }

    #[test]
    fn display_names_keys() {
        assert_eq!(Keycode::LeftCtrl.to_string(), "LeftCtrl");
        assert_eq!(Keycode::Space.to_string(), "Space");
    }
}

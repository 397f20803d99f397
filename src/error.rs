use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures that can end a run. Acquisition problems on the GPIO side are
/// not errors: they degrade into absent handles at startup and stay absent
/// for the life of the process.
#[derive(Debug, Error)]
pub enum Error {
    /// A character in the text to type has no mapping in the US layout.
    #[error("character {0:?} is not covered by the US keyboard layout")]
    UnsupportedChar(char),

    /// The HID gadget endpoint could not be opened or written.
    #[error("HID gadget I/O failed: {0}")]
    Gadget(#[from] io::Error),
}

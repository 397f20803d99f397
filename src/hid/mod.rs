//! The emulated USB keyboard: boot-protocol reports pushed at a gadget
//! endpoint, a chord-oriented keyboard on top, and the fixed US layout
//! used to type text.

pub mod keyboard;
pub mod keycode;
pub mod layout;
pub mod report;
pub mod sink;

pub use keyboard::Keyboard;
pub use keycode::Keycode;
pub use layout::UsLayout;
pub use report::KeyReport;
pub use sink::{HidGadget, RecordingSink, ReportSink};

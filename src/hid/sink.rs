use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use tracing::info;

use super::report::KeyReport;
use crate::error::Result;

/// Destination for keyboard reports. The session machinery only ever
/// talks to this seam; production writes to the kernel gadget endpoint,
/// tests record.
pub trait ReportSink {
    fn send(&mut self, report: &KeyReport) -> Result<()>;
}

/// The kernel's USB gadget keyboard endpoint, `/dev/hidg0` on a stock
/// configfs setup.
#[derive(Debug)]
pub struct HidGadget {
    device: File,
}

impl HidGadget {
    /// Open the gadget device. Unlike the GPIO lines this is fatal when it
    /// fails: without the emulated keyboard there is nothing to do.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let device = OpenOptions::new().write(true).open(path.as_ref())?;
        info!(path = %path.as_ref().display(), "opened HID gadget endpoint");
        Ok(Self { device })
    }
}

impl ReportSink for HidGadget {
    fn send(&mut self, report: &KeyReport) -> Result<()> {
        self.device.write_all(&report.as_bytes())?;
        self.device.flush()?;
        Ok(())
    }
}

/// Test sink that records every report and can be told to start failing
/// at a given send.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub sent: Vec<KeyReport>,
    fail_at: Option<usize>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink whose `n`th send (1-based) and every send after it fail.
    pub fn failing_at(n: usize) -> Self {
        Self {
            sent: Vec::new(),
            fail_at: Some(n),
        }
    }

    /// Reports equal to the given chord frame.
    pub fn count_of(&self, report: &KeyReport) -> usize {
        self.sent.iter().filter(|sent| *sent == report).count()
    }
}

impl ReportSink for RecordingSink {
    fn send(&mut self, report: &KeyReport) -> Result<()> {
        if let Some(n) = self.fail_at {
            if self.sent.len() + 1 >= n {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "endpoint gone").into());
            }
        }
        self.sent.push(*report);
        Ok(())
    }
}

use std::cell::Cell;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

/// Where the kernel exposes GPIO lines.
pub const SYSFS_GPIO_ROOT: &str = "/sys/class/gpio";

/// A digital input line. `read` returns the current logical level; the
/// trigger button sits behind a pull-up and is active-low, so "pressed"
/// reads `false`.
pub trait DigitalInput {
    fn read(&self) -> bool;
}

/// A digital output line. Infallible once acquired.
pub trait DigitalOutput {
    fn write(&mut self, high: bool);
}

/// Input line under a sysfs GPIO tree.
#[derive(Debug)]
pub struct SysfsInput {
    value_path: PathBuf,
}

/// Output line under a sysfs GPIO tree.
#[derive(Debug)]
pub struct SysfsOutput {
    value_path: PathBuf,
}

fn line_dir(root: &Path, line: u32) -> std::io::Result<PathBuf> {
    let dir = root.join(format!("gpio{line}"));
    if !dir.exists() {
        fs::write(root.join("export"), line.to_string())?;
    }
    Ok(dir)
}

fn setup_input(root: &Path, line: u32) -> std::io::Result<SysfsInput> {
    let dir = line_dir(root, line)?;
    fs::write(dir.join("direction"), "in")?;
    Ok(SysfsInput {
        value_path: dir.join("value"),
    })
}

fn setup_output(root: &Path, line: u32) -> std::io::Result<SysfsOutput> {
    let dir = line_dir(root, line)?;
    fs::write(dir.join("direction"), "out")?;
    fs::write(dir.join("value"), "0")?;
    Ok(SysfsOutput {
        value_path: dir.join("value"),
    })
}

/// Configure `line` under `root` as an input. Returns `None` on failure;
/// the absence is permanent for the process lifetime and callers must not
/// retry.
pub fn acquire_input(root: impl AsRef<Path>, line: u32) -> Option<SysfsInput> {
    match setup_input(root.as_ref(), line) {
        Ok(input) => {
            info!(line, "configured trigger input");
            Some(input)
        }
        Err(err) => {
            warn!(line, %err, "input setup failed; trigger disabled for this run");
            None
        }
    }
}

/// Configure `line` under `root` as an output, initialized low. Same
/// failure contract as [`acquire_input`].
pub fn acquire_output(root: impl AsRef<Path>, line: u32) -> Option<SysfsOutput> {
    match setup_output(root.as_ref(), line) {
        Ok(output) => {
            info!(line, "configured indicator output");
            Some(output)
        }
        Err(err) => {
            warn!(line, %err, "output setup failed; indicator disabled for this run");
            None
        }
    }
}

impl DigitalInput for SysfsInput {
    fn read(&self) -> bool {
        // A failed read on an already-exported line reports the pulled-up
        // idle level.
        match fs::read_to_string(&self.value_path) {
            Ok(value) => value.trim() != "0",
            Err(_) => true,
        }
    }
}

impl DigitalOutput for SysfsOutput {
    fn write(&mut self, high: bool) {
        let _ = fs::write(&self.value_path, if high { "1" } else { "0" });
    }
}

/// Test input that reads the idle (high) level until its programmed poll,
/// and low from then on. Counts every read.
#[derive(Debug)]
pub struct ScriptedInput {
    activate_at: Option<u32>,
    polls: Cell<u32>,
}

impl ScriptedInput {
    /// Activates (reads low) from the `n`th read onward, 1-based.
    pub fn activates_at(n: u32) -> Self {
        Self {
            activate_at: Some(n),
            polls: Cell::new(0),
        }
    }

    /// Never activates.
    pub fn idle() -> Self {
        Self {
            activate_at: None,
            polls: Cell::new(0),
        }
    }

    pub fn polls(&self) -> u32 {
        self.polls.get()
    }
}

impl DigitalInput for ScriptedInput {
    fn read(&self) -> bool {
        let n = self.polls.get() + 1;
        self.polls.set(n);
        match self.activate_at {
            Some(at) => n < at,
            None => true,
        }
    }
}

/// Test output that records every level written.
#[derive(Debug, Default)]
pub struct RecordingOutput {
    pub writes: Vec<bool>,
}

impl RecordingOutput {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DigitalOutput for RecordingOutput {
    fn write(&mut self, high: bool) {
        self.writes.push(high);
    }
}

use std::time::Duration;

use crate::clock::Clock;
use crate::gpio::DigitalOutput;

/// Status LED driver.
///
/// The output may be absent when acquisition failed at startup; every
/// operation here is total over both cases and never fails. An absent
/// output makes each call a silent no-op that consumes no time.
#[derive(Debug)]
pub struct Indicator<O> {
    output: Option<O>,
}

impl<O: DigitalOutput> Indicator<O> {
    pub fn new(output: Option<O>) -> Self {
        Self { output }
    }

    pub fn is_present(&self) -> bool {
        self.output.is_some()
    }

    pub fn output(&self) -> Option<&O> {
        self.output.as_ref()
    }

    /// Hold the LED at the given level.
    pub fn set_steady(&mut self, on: bool) {
        if let Some(out) = self.output.as_mut() {
            out.write(on);
        }
    }

    /// `count` on/off cycles, each level held for `period`. Blocks the
    /// calling thread for the whole burst, `2 * count * period`; nothing
    /// else runs while it plays.
    pub fn blink_burst(&mut self, count: u32, period: Duration, clock: &impl Clock) {
        let Some(out) = self.output.as_mut() else {
            return;
        };
        for _ in 0..count {
            out.write(true);
            clock.sleep(period);
            out.write(false);
            clock.sleep(period);
        }
    }
}

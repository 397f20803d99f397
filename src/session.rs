use tracing::{debug, info};

use crate::clock::Clock;
use crate::config::TimingConfig;
use crate::error::Result;
use crate::gpio::{DigitalInput, DigitalOutput};
use crate::hid::{Keyboard, Keycode, ReportSink};
use crate::indicator::Indicator;

/// How one play window ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The trigger read active; the window was abandoned mid-flight.
    Triggered,
    /// The window elapsed without a trigger. Death is assumed from
    /// elapsed time alone; the game itself is never observed.
    Died,
}

/// The restart-and-jump controller.
///
/// Owns nothing; borrows the keyboard, the optional trigger input, the
/// indicator and the clock from the orchestrator for the duration of the
/// run. The trigger is polled once per jump, so a press is seen at most
/// one `jump_interval` late.
pub struct Session<'a, S, I, O, C> {
    keyboard: &'a mut Keyboard<S>,
    trigger: Option<&'a I>,
    indicator: &'a mut Indicator<O>,
    clock: &'a C,
    timing: &'a TimingConfig,
}

impl<'a, S, I, O, C> Session<'a, S, I, O, C>
where
    S: ReportSink,
    I: DigitalInput,
    O: DigitalOutput,
    C: Clock,
{
    pub fn new(
        keyboard: &'a mut Keyboard<S>,
        trigger: Option<&'a I>,
        indicator: &'a mut Indicator<O>,
        clock: &'a C,
        timing: &'a TimingConfig,
    ) -> Self {
        Self {
            keyboard,
            trigger,
            indicator,
            clock,
            timing,
        }
    }

    fn trigger_activated(&self) -> bool {
        // Active-low: pressed reads false. Absent input can never fire.
        self.trigger.is_some_and(|t| !t.read())
    }

    /// One restart-and-jump window.
    pub fn run_cycle(&mut self) -> Result<CycleOutcome> {
        self.indicator.set_steady(true);

        info!("pressing Space to start/restart the game");
        self.keyboard.tap(&[Keycode::Space])?;
        self.clock.sleep(self.timing.start_delay);

        let cycle_start = self.clock.now();
        while self.clock.now() - cycle_start < self.timing.play_session {
            if self.trigger_activated() {
                info!("trigger button pressed");
                return Ok(CycleOutcome::Triggered);
            }

            debug!("jump (Space)");
            self.keyboard.tap(&[Keycode::Space])?;
            self.clock.sleep(self.timing.jump_interval);
        }

        Ok(CycleOutcome::Died)
    }

    /// Run cycles until the trigger fires, waiting out the restart delay
    /// between windows. Returns whether the trigger fired, which is the
    /// only way back: with the input absent or never pressed this loops
    /// for the life of the process.
    pub fn run(&mut self) -> Result<bool> {
        loop {
            match self.run_cycle()? {
                CycleOutcome::Triggered => return Ok(true),
                CycleOutcome::Died => {
                    info!(
                        wait = ?self.timing.death_restart_delay,
                        "assuming death, waiting to restart"
                    );
                    self.indicator.set_steady(false);
                    self.clock.sleep(self.timing.death_restart_delay);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::TestClock;
    use crate::gpio::{RecordingOutput, ScriptedInput};
    use crate::hid::{KeyReport, RecordingSink};

    fn space() -> KeyReport {
        KeyReport::chord(&[Keycode::Space])
    }

    #[test]
    fn exhausted_window_sends_boundary_press_count() {
        // 10.0s window at 0.7s cadence: jumps at 0.0 through 9.8 elapsed,
        // floor(10.0 / 0.7) + 1 = 15 of them, then the window is over.
        let mut keyboard = Keyboard::new(RecordingSink::new());
        let trigger = ScriptedInput::idle();
        let mut indicator = Indicator::new(Some(RecordingOutput::new()));
        let clock = TestClock::new();
        let timing = TimingConfig::default();

        let outcome = Session::new(
            &mut keyboard,
            Some(&trigger),
            &mut indicator,
            &clock,
            &timing,
        )
        .run_cycle()
        .unwrap();

        assert_eq!(outcome, CycleOutcome::Died);
        // One restart press plus fifteen jumps.
        assert_eq!(keyboard.sink().count_of(&space()), 16);
        assert_eq!(trigger.polls(), 15);
    }

    #[test]
    fn trigger_on_third_poll_stops_after_two_jumps() {
        let mut keyboard = Keyboard::new(RecordingSink::new());
        let trigger = ScriptedInput::activates_at(3);
        let mut indicator = Indicator::new(Some(RecordingOutput::new()));
        let clock = TestClock::new();
        let timing = TimingConfig::default();

        let outcome = Session::new(
            &mut keyboard,
            Some(&trigger),
            &mut indicator,
            &clock,
            &timing,
        )
        .run_cycle()
        .unwrap();

        assert_eq!(outcome, CycleOutcome::Triggered);
        // Restart press plus exactly two jumps before the third poll hit.
        assert_eq!(keyboard.sink().count_of(&space()), 3);
        assert_eq!(trigger.polls(), 3);
    }

    #[test]
    fn detection_latency_is_bounded_by_jump_interval() {
        let mut keyboard = Keyboard::new(RecordingSink::new());
        let trigger = ScriptedInput::activates_at(2);
        let mut indicator = Indicator::new(Some(RecordingOutput::new()));
        let clock = TestClock::new();
        let timing = TimingConfig::default();

        Session::new(
            &mut keyboard,
            Some(&trigger),
            &mut indicator,
            &clock,
            &timing,
        )
        .run_cycle()
        .unwrap();

        // The press "arrived" after the first poll; it was seen one jump
        // interval later, never more.
        assert_eq!(clock.now(), timing.start_delay + timing.jump_interval);
    }

    #[test]
    fn absent_trigger_dies_without_a_single_poll() {
        let mut keyboard = Keyboard::new(RecordingSink::new());
        let mut indicator = Indicator::new(Some(RecordingOutput::new()));
        let clock = TestClock::new();
        let timing = TimingConfig::default();

        let outcome = Session::<_, ScriptedInput, _, _>::new(
            &mut keyboard,
            None,
            &mut indicator,
            &clock,
            &timing,
        )
        .run_cycle()
        .unwrap();

        assert_eq!(outcome, CycleOutcome::Died);
        assert_eq!(keyboard.sink().count_of(&space()), 16);
    }

    #[test]
    fn run_crosses_death_wait_into_the_next_cycle() {
        // Idle through cycle one (15 polls), fire on the first poll of
        // cycle two.
        let mut keyboard = Keyboard::new(RecordingSink::new());
        let trigger = ScriptedInput::activates_at(16);
        let mut indicator = Indicator::new(Some(RecordingOutput::new()));
        let clock = TestClock::new();
        let timing = TimingConfig::default();

        let triggered = Session::new(
            &mut keyboard,
            Some(&trigger),
            &mut indicator,
            &clock,
            &timing,
        )
        .run()
        .unwrap();

        assert!(triggered);
        // 16 presses in cycle one, restart press in cycle two, no jumps.
        assert_eq!(keyboard.sink().count_of(&space()), 17);
        // Indicator went on, off for the death wait, on again.
        assert_eq!(
            indicator.output().unwrap().writes,
            vec![true, false, true]
        );
    }

    #[test]
    fn cycle_window_shorter_than_interval_sends_no_jumps() {
        let mut keyboard = Keyboard::new(RecordingSink::new());
        let trigger = ScriptedInput::idle();
        let mut indicator = Indicator::new(Some(RecordingOutput::new()));
        let clock = TestClock::new();
        let timing = TimingConfig {
            play_session: std::time::Duration::ZERO,
            ..TimingConfig::default()
        };

        let outcome = Session::new(
            &mut keyboard,
            Some(&trigger),
            &mut indicator,
            &clock,
            &timing,
        )
        .run_cycle()
        .unwrap();

        assert_eq!(outcome, CycleOutcome::Died);
        // Only the restart press; the window never admitted a jump.
        assert_eq!(keyboard.sink().count_of(&space()), 1);
        assert_eq!(trigger.polls(), 0);
    }

    #[test]
    fn report_errors_propagate_out_of_the_cycle() {
        let mut keyboard = Keyboard::new(RecordingSink::failing_at(1));
        let trigger = ScriptedInput::idle();
        let mut indicator = Indicator::new(Some(RecordingOutput::new()));
        let clock = TestClock::new();
        let timing = TimingConfig::default();

        let result = Session::new(
            &mut keyboard,
            Some(&trigger),
            &mut indicator,
            &clock,
            &timing,
        )
        .run_cycle();

        assert!(result.is_err());
    }
}

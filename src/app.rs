use tracing::{error, info, warn};

use crate::clock::{Clock, MonotonicClock};
use crate::config::{AppConfig, DISTRESS_BLINK_COUNT, DISTRESS_BLINK_PERIOD};
use crate::error::Result;
use crate::gpio::{self, DigitalInput, DigitalOutput, SYSFS_GPIO_ROOT};
use crate::hid::{HidGadget, Keyboard, Keycode, ReportSink, UsLayout};
use crate::indicator::Indicator;
use crate::pages;
use crate::session::Session;

/// The fallible run sequence, generic over the hardware seams.
fn drive<S, I, O, C>(
    keyboard: &mut Keyboard<S>,
    trigger: Option<&I>,
    indicator: &mut Indicator<O>,
    clock: &C,
    config: &AppConfig,
) -> Result<bool>
where
    S: ReportSink,
    I: DigitalInput,
    O: DigitalOutput,
    C: Clock,
{
    let layout = UsLayout;
    let timing = &config.timing;

    info!(wait = ?timing.initial_wait, "waiting for the host to recognize the keyboard");
    clock.sleep(timing.initial_wait);

    pages::open_in_new_tab(
        keyboard,
        layout,
        &config.dino_url,
        timing.page_load_wait,
        clock,
    )?;

    if trigger.is_some() {
        info!("game loop starting; press the trigger button to run the invasion sequence");
    } else {
        warn!("game loop starting with no trigger input; the sequence can never fire");
    }

    let triggered = Session::new(keyboard, trigger, indicator, clock, timing).run()?;

    if triggered {
        info!("trigger sequence: opening the invasion page");
        indicator.blink_burst(timing.blink_count, timing.blink_period, clock);
        pages::open_in_new_tab(
            keyboard,
            layout,
            &config.invasion_url,
            timing.trigger_page_wait,
            clock,
        )?;

        info!("closing the tab (Ctrl+W)");
        keyboard.tap(&[Keycode::LeftCtrl, Keycode::W])?;
        clock.sleep(timing.close_tab_delay);
        info!("tab close sent; task complete");
    }

    Ok(triggered)
}

/// Run the sequence with the failure policy and cleanup wrapped around
/// it: an error is logged and answered with one fast distress blink, and
/// every exit path (success, trigger completion or failure) releases all
/// keys and leaves the indicator off.
pub fn run_with<S, I, O, C>(
    keyboard: &mut Keyboard<S>,
    trigger: Option<&I>,
    indicator: &mut Indicator<O>,
    clock: &C,
    config: &AppConfig,
) -> Result<bool>
where
    S: ReportSink,
    I: DigitalInput,
    O: DigitalOutput,
    C: Clock,
{
    let outcome = drive(keyboard, trigger, indicator, clock, config);

    if let Err(err) = &outcome {
        error!(%err, "run failed");
        indicator.blink_burst(DISTRESS_BLINK_COUNT, DISTRESS_BLINK_PERIOD, clock);
    }

    // Key release is best-effort: the sink may be the thing that failed.
    if keyboard.release_all().is_err() {
        warn!("could not release keys during cleanup");
    }
    indicator.set_steady(false);
    info!("all keys released, indicator off");

    outcome
}

/// Production wiring: gadget keyboard, sysfs GPIO lines, wall clock.
/// GPIO acquisition failures degrade into absent handles; a missing
/// gadget endpoint is fatal.
pub fn run(config: &AppConfig) -> Result<bool> {
    let mut keyboard = Keyboard::new(HidGadget::open(&config.hidg_path)?);
    let trigger = gpio::acquire_input(SYSFS_GPIO_ROOT, config.trigger_line);
    let mut indicator = Indicator::new(gpio::acquire_output(SYSFS_GPIO_ROOT, config.indicator_line));
    let clock = MonotonicClock::new();

    run_with(
        &mut keyboard,
        trigger.as_ref(),
        &mut indicator,
        &clock,
        config,
    )
}

use std::time::Duration;

use tracing::info;

use crate::clock::Clock;
use crate::error::Result;
use crate::hid::{Keyboard, Keycode, ReportSink, UsLayout};

/// Settle after Ctrl+T while the browser creates the tab.
const NEW_TAB_SETTLE: Duration = Duration::from_secs(1);
/// Settle after typing into the address bar.
const ADDRESS_SETTLE: Duration = Duration::from_millis(500);

/// Open `url` in a new tab on the remote host: Ctrl+T, type the address,
/// Enter, then wait `settle_wait` for the page to become interactive.
///
/// One macro from the caller's point of view: the first failed action
/// aborts the rest and there is no partial-completion signal. The browser
/// never acknowledges anything; the settles are all we have.
pub fn open_in_new_tab<S: ReportSink>(
    keyboard: &mut Keyboard<S>,
    layout: UsLayout,
    url: &str,
    settle_wait: Duration,
    clock: &impl Clock,
) -> Result<()> {
    info!("opening new tab (Ctrl+T)");
    keyboard.tap(&[Keycode::LeftCtrl, Keycode::T])?;
    clock.sleep(NEW_TAB_SETTLE);

    info!(url, "typing address");
    layout.type_text(keyboard, url)?;
    clock.sleep(ADDRESS_SETTLE);

    info!("pressing Enter to load");
    keyboard.tap(&[Keycode::Enter])?;

    info!(wait = ?settle_wait, "waiting for the page");
    clock.sleep(settle_wait);
    Ok(())
}

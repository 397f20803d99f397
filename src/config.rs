use std::path::PathBuf;
use std::time::Duration;

/// Fixed timing plan for a whole run.
///
/// Every wait in the crate comes out of this struct; nothing sleeps on an
/// ad-hoc constant except the two in-macro settles in [`crate::pages`].
/// The browser gives us no feedback channel, so correctness rests on these
/// values matching real page and browser latency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingConfig {
    /// Settle after startup while the host enumerates the keyboard.
    pub initial_wait: Duration,
    /// Settle after opening the dino page.
    pub page_load_wait: Duration,
    /// Pause after the start/restart press before jumping begins.
    pub start_delay: Duration,
    /// Cadence of jump presses. Also the trigger polling granularity:
    /// a button press is seen at most one interval late.
    pub jump_interval: Duration,
    /// Pause after an assumed death before the next restart press.
    pub death_restart_delay: Duration,
    /// Settle after opening the invasion page (it is meant to be seen).
    pub trigger_page_wait: Duration,
    /// Pause after sending Ctrl+W.
    pub close_tab_delay: Duration,
    /// Length of one play window. Death is assumed once it elapses; the
    /// game state is never observed. Must exceed `jump_interval`, or a
    /// window passes without a single jump.
    pub play_session: Duration,
    /// On/off cycles of the success blink once the trigger fires.
    pub blink_count: u32,
    /// Hold time for each success-blink level.
    pub blink_period: Duration,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            initial_wait: Duration::from_secs(2),
            page_load_wait: Duration::from_secs(2),
            start_delay: Duration::from_millis(500),
            jump_interval: Duration::from_millis(700),
            death_restart_delay: Duration::from_secs(2),
            trigger_page_wait: Duration::from_secs(15),
            close_tab_delay: Duration::from_millis(500),
            play_session: Duration::from_secs(10),
            blink_count: 3,
            blink_period: Duration::from_millis(200),
        }
    }
}

/// Distress blink emitted when a run fails: faster and longer than the
/// success pattern.
pub const DISTRESS_BLINK_COUNT: u32 = 15;
pub const DISTRESS_BLINK_PERIOD: Duration = Duration::from_millis(80);

/// Everything the production wiring needs. There are no flags, files or
/// environment variables behind this; a run is configured here and only
/// here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub timing: TimingConfig,
    /// GPIO line of the trigger button (pull-up, active-low).
    pub trigger_line: u32,
    /// GPIO line of the status LED.
    pub indicator_line: u32,
    /// Page the session loop plays.
    pub dino_url: String,
    /// Page opened once the trigger fires.
    pub invasion_url: String,
    /// Keyboard endpoint of the USB gadget.
    pub hidg_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            timing: TimingConfig::default(),
            trigger_line: 25,
            indicator_line: 23,
            dino_url: "https://chrome-dino-game.github.io/".to_string(),
            invasion_url: "https://quizzitymc.github.io/picohacker/dinosaurinvasion.html"
                .to_string(),
            hidg_path: PathBuf::from("/dev/hidg0"),
        }
    }
}

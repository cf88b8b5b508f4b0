//! Application-level configuration constants.

// Timer cadence
pub const CLOCK_TICK_MS: u32 = 1_000;
pub const VOTING_POWER_TICK_MS: u32 = 43_200;

// Typeahead behavior
pub const TYPEAHEAD_DEBOUNCE_MS: u32 = 150;
pub const TYPEAHEAD_MIN_QUERY_LEN: usize = 1;
pub const TYPEAHEAD_MAX_MATCHES: usize = 5;

// Default bot status at page load
pub const DEFAULT_RECHARGE_DISPLAY: &str = "3:47:15";
pub const DEFAULT_VOTING_POWER_DISPLAY: &str = "83.47%";

// Fail-soft renders for unparseable status values
pub const CLOCK_FALLBACK_DISPLAY: &str = "00:00:00";
pub const VOTING_POWER_FALLBACK_DISPLAY: &str = "0.00";

// Carousel selectors
pub const MANAGERS_CAROUSEL_SELECTOR: &str = ".board-managers__carousel";
pub const PROJECTS_CAROUSEL_SELECTOR: &str = ".board-projects__carousel";

use log::{debug, info, warn};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// Voting power regeneration parameters
pub mod defaults {
    pub const VOTING_POWER_STEP: f64 = 0.01;
    pub const VOTING_POWER_MAX: f64 = 100.0;
}

/// Pseudo-category understood by the filter controls only; no contribution
/// carries it.
pub const ALL_CATEGORY: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Contribution {
    pub moderator: String,
    pub author: String,
    pub repository: String,
    pub category: String,
    pub score: u8,
    pub staff_pick: bool,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Moderator {
    pub account: String,
    pub supermoderator: bool,
}

// Custom error type for dataset loading
#[derive(Debug)]
pub enum DatasetError {
    EmptyDataset(&'static str),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::EmptyDataset(name) => {
                write!(f, "Embedded dataset '{}' produced no usable rows", name)
            }
        }
    }
}

impl std::error::Error for DatasetError {}

/// Parse the embedded contributions CSV. Rows that fail to deserialize are
/// skipped with a log entry, and rows repeating an already-seen URL are
/// dropped.
pub fn read_contributions_from_csv_str(
    csv_content: &str,
) -> Result<Vec<Contribution>, Box<dyn std::error::Error>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(csv_content.as_bytes());

    let mut contributions = Vec::new();
    let mut seen_urls = HashSet::new();

    for (i, record) in reader.deserialize::<Contribution>().enumerate() {
        // Row numbers are 1-based and the header occupies the first line
        let row = i + 2;
        let contribution = match record {
            Ok(c) => c,
            Err(e) => {
                debug!("Warning: skipping contribution row {}: {}", row, e);
                continue;
            }
        };

        if !seen_urls.insert(contribution.url.clone()) {
            debug!(
                "Warning: duplicate contribution url '{}' on row {}, skipping",
                contribution.url, row
            );
            continue;
        }

        contributions.push(contribution);
    }

    if contributions.is_empty() {
        warn!("Contribution dataset is empty after parsing");
        return Err(Box::new(DatasetError::EmptyDataset("contributions")));
    }

    info!("Loaded {} contributions from embedded CSV", contributions.len());
    Ok(contributions)
}

/// Parse the embedded moderators JSON.
pub fn read_moderators_from_json_str(
    json_content: &str,
) -> Result<Vec<Moderator>, Box<dyn std::error::Error>> {
    let moderators: Vec<Moderator> = serde_json::from_str(json_content)?;
    if moderators.is_empty() {
        warn!("Moderator dataset is empty");
        return Err(Box::new(DatasetError::EmptyDataset("moderators")));
    }
    info!("Loaded {} moderators from embedded JSON", moderators.len());
    Ok(moderators)
}

/// Supermoderator accounts, in dataset order.
pub fn manager_accounts(moderators: &[Moderator]) -> Vec<String> {
    moderators
        .iter()
        .filter(|m| m.supermoderator)
        .map(|m| m.account.clone())
        .collect()
}

/// All moderator accounts, in dataset order.
pub fn moderator_accounts(moderators: &[Moderator]) -> Vec<String> {
    moderators.iter().map(|m| m.account.clone()).collect()
}

/// Distinct contribution authors, first-seen order.
pub fn distinct_authors(contributions: &[Contribution]) -> Vec<String> {
    let mut seen = HashSet::new();
    contributions
        .iter()
        .filter(|c| seen.insert(c.author.clone()))
        .map(|c| c.author.clone())
        .collect()
}

/// Distinct repositories, first-seen order.
pub fn distinct_repositories(contributions: &[Contribution]) -> Vec<String> {
    let mut seen = HashSet::new();
    contributions
        .iter()
        .filter(|c| seen.insert(c.repository.clone()))
        .map(|c| c.repository.clone())
        .collect()
}

/// Categories present in the dataset, sorted for a stable control row.
pub fn known_categories(contributions: &[Contribution]) -> Vec<String> {
    contributions
        .iter()
        .map(|c| c.category.clone())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

/// Outcome of one countdown tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockTick {
    Running(u32),
    Expired,
}

/// Countdown toward an absolute wall-clock deadline.
///
/// Remaining time is recomputed from the deadline on every tick rather than
/// decremented, so delayed or missed ticks cannot drift the clock.
#[derive(Debug, Clone, PartialEq)]
pub struct RechargeClock {
    deadline_ms: f64,
    expired: bool,
}

impl RechargeClock {
    pub fn new(total_seconds: u32, now_ms: f64) -> Self {
        let deadline_ms = now_ms + f64::from(total_seconds) * 1000.0;
        debug!(
            "Recharge clock armed: {} seconds remaining, deadline at {}",
            total_seconds, deadline_ms
        );
        Self {
            deadline_ms,
            expired: false,
        }
    }

    pub fn deadline_ms(&self) -> f64 {
        self.deadline_ms
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// One tick against the current wall clock. Remaining time rounds to the
    /// nearest whole second; the first negative result expires the clock
    /// permanently.
    pub fn tick(&mut self, now_ms: f64) -> ClockTick {
        if self.expired {
            return ClockTick::Expired;
        }
        let remaining = ((self.deadline_ms - now_ms) / 1000.0).round();
        if remaining < 0.0 {
            debug!("Recharge clock expired");
            self.expired = true;
            return ClockTick::Expired;
        }
        ClockTick::Running(remaining as u32)
    }
}

/// Format a second count as `H:M:SS`, with hours and minutes unpadded and
/// seconds zero-padded to two digits (299 seconds renders as "0:4:59").
pub fn format_clock(total_seconds: u32) -> String {
    let hours = total_seconds / 3600;
    let minutes = total_seconds % 3600 / 60;
    let seconds = total_seconds % 60;
    format!("{}:{}:{:02}", hours, minutes, seconds)
}

/// Outcome of one voting power regeneration step.
#[derive(Debug, Clone, PartialEq)]
pub enum PowerTick {
    Running(f64),
    Saturated,
}

/// Slowly regenerating voting power percentage, capped at 100.
#[derive(Debug, Clone, PartialEq)]
pub struct VotingPower {
    current: f64,
    saturated: bool,
}

impl VotingPower {
    pub fn new(percent: f64) -> Self {
        debug!("Voting power ticker armed at {:.2}", percent);
        Self {
            current: percent,
            saturated: false,
        }
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn is_saturated(&self) -> bool {
        self.saturated
    }

    /// One regeneration step. Crossing the cap clamps the value to exactly
    /// 100 and saturates the ticker for good.
    pub fn tick(&mut self) -> PowerTick {
        if self.saturated {
            return PowerTick::Saturated;
        }
        self.current += defaults::VOTING_POWER_STEP;
        if self.current > defaults::VOTING_POWER_MAX {
            self.current = defaults::VOTING_POWER_MAX;
            self.saturated = true;
            info!("Voting power fully recharged");
            return PowerTick::Saturated;
        }
        PowerTick::Running(self.current)
    }
}

/// Format a voting power percentage with exactly two decimal places.
pub fn format_voting_power(percent: f64) -> String {
    format!("{:.2}", percent)
}

/// Active category filter plus the "all" control's own state.
///
/// Visibility rule: a category is visible when the active set is empty or
/// when it is a member. Deselecting the last active category therefore
/// shows everything again, while the "all" control stays inactive until it
/// is clicked itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ContributionFilter {
    active: HashSet<String>,
    all_active: bool,
}

impl Default for ContributionFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl ContributionFilter {
    pub fn new() -> Self {
        Self {
            active: HashSet::new(),
            all_active: true,
        }
    }

    /// Flip one category's membership, or reset everything via the "all"
    /// pseudo-category.
    pub fn toggle(&mut self, category: &str) {
        if category == ALL_CATEGORY {
            self.active.clear();
            self.all_active = true;
            debug!("Filter reset, every category visible");
            return;
        }
        self.all_active = false;
        if !self.active.remove(category) {
            self.active.insert(category.to_string());
        }
        debug!(
            "Filter toggled '{}', {} categories active",
            category,
            self.active.len()
        );
    }

    pub fn is_visible(&self, category: &str) -> bool {
        self.active.is_empty() || self.active.contains(category)
    }

    pub fn is_category_active(&self, category: &str) -> bool {
        self.active.contains(category)
    }

    pub fn is_all_active(&self) -> bool {
        self.all_active
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn visible_count(&self, contributions: &[Contribution]) -> usize {
        contributions
            .iter()
            .filter(|c| self.is_visible(&c.category))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contribution(author: &str, category: &str, url: &str) -> Contribution {
        Contribution {
            moderator: "espoem".to_string(),
            author: author.to_string(),
            repository: "utopian-io/utopian.info".to_string(),
            category: category.to_string(),
            score: 70,
            staff_pick: false,
            url: url.to_string(),
        }
    }

    #[test]
    fn test_clock_initial_render() {
        assert_eq!(format_clock(300), "0:5:00");
        assert_eq!(format_clock(0), "0:0:00");
        assert_eq!(format_clock(3661), "1:1:01");
        assert_eq!(format_clock(86399), "23:59:59");
        assert_eq!(format_clock(360000), "100:0:00");
    }

    #[test]
    fn test_clock_counts_down_by_wall_clock() {
        let t0 = 1_700_000_000_000.0;
        let mut clock = RechargeClock::new(300, t0);
        assert_eq!(clock.tick(t0 + 1_000.0), ClockTick::Running(299));
        assert_eq!(format_clock(299), "0:4:59");
        // A delayed tick recomputes from the deadline instead of drifting
        assert_eq!(clock.tick(t0 + 5_000.0), ClockTick::Running(295));
    }

    #[test]
    fn test_clock_rounds_to_nearest_second() {
        let t0 = 0.0;
        let mut clock = RechargeClock::new(300, t0);
        assert_eq!(clock.tick(t0 + 400.0), ClockTick::Running(300));
        assert_eq!(clock.tick(t0 + 600.0), ClockTick::Running(299));
    }

    #[test]
    fn test_clock_expires_once_past_deadline() {
        let t0 = 1_700_000_000_000.0;
        let mut clock = RechargeClock::new(300, t0);
        for elapsed_s in 1..=300u32 {
            let tick = clock.tick(t0 + f64::from(elapsed_s) * 1_000.0);
            assert_eq!(tick, ClockTick::Running(300 - elapsed_s));
        }
        assert!(!clock.is_expired());
        assert_eq!(clock.tick(t0 + 301_000.0), ClockTick::Expired);
        assert!(clock.is_expired());
        // Expiry is permanent
        assert_eq!(clock.tick(t0 + 302_000.0), ClockTick::Expired);
        assert_eq!(clock.tick(t0), ClockTick::Expired);
    }

    #[test]
    fn test_clock_never_renders_negative() {
        let t0 = 0.0;
        let mut clock = RechargeClock::new(2, t0);
        assert_eq!(clock.tick(t0 + 2_000.0), ClockTick::Running(0));
        assert_eq!(clock.tick(t0 + 3_000.0), ClockTick::Expired);
    }

    #[test]
    fn test_voting_power_saturates_after_two_ticks_from_99_99() {
        let mut power = VotingPower::new(99.99);
        match power.tick() {
            PowerTick::Running(value) => assert_eq!(format_voting_power(value), "100.00"),
            PowerTick::Saturated => panic!("first tick must still be running"),
        }
        assert_eq!(power.tick(), PowerTick::Saturated);
        assert!(power.is_saturated());
        assert_eq!(power.current(), 100.0);
        assert_eq!(format_voting_power(power.current()), "100.00");
        // Saturation is permanent
        assert_eq!(power.tick(), PowerTick::Saturated);
        assert_eq!(power.current(), 100.0);
    }

    #[test]
    fn test_voting_power_is_monotone_and_capped() {
        let mut power = VotingPower::new(83.47);
        let mut previous = power.current();
        let mut ticks = 0;
        while !power.is_saturated() {
            power.tick();
            assert!(power.current() >= previous);
            assert!(power.current() <= 100.0);
            previous = power.current();
            ticks += 1;
            assert!(ticks <= 2_000, "ticker failed to saturate");
        }
        assert!(ticks > 1_000);
        assert_eq!(power.current(), 100.0);
    }

    #[test]
    fn test_voting_power_above_cap_saturates_immediately() {
        let mut power = VotingPower::new(120.0);
        assert_eq!(power.tick(), PowerTick::Saturated);
        assert_eq!(power.current(), 100.0);
    }

    #[test]
    fn test_filter_starts_unfiltered() {
        let filter = ContributionFilter::new();
        assert!(filter.is_all_active());
        assert_eq!(filter.active_count(), 0);
        assert!(filter.is_visible("development"));
        assert!(!filter.is_category_active("development"));
    }

    #[test]
    fn test_filter_bug_then_all_scenario() {
        let cards = vec![
            contribution("amosbastian", "bug-hunting", "https://example.com/1"),
            contribution("jestemkioskiem", "development", "https://example.com/2"),
            contribution("tensor", "bug-hunting", "https://example.com/3"),
        ];
        let mut filter = ContributionFilter::new();

        filter.toggle("bug-hunting");
        assert!(filter.is_visible("bug-hunting"));
        assert!(!filter.is_visible("development"));
        assert!(!filter.is_all_active());
        assert!(filter.is_category_active("bug-hunting"));
        assert_eq!(filter.visible_count(&cards), 2);

        filter.toggle(ALL_CATEGORY);
        assert!(filter.is_all_active());
        assert!(!filter.is_category_active("bug-hunting"));
        assert!(filter.is_visible("development"));
        assert_eq!(filter.visible_count(&cards), 3);
    }

    #[test]
    fn test_filter_deselecting_last_category_shows_everything() {
        let cards = vec![
            contribution("amosbastian", "bug-hunting", "https://example.com/1"),
            contribution("jestemkioskiem", "development", "https://example.com/2"),
        ];
        let mut filter = ContributionFilter::new();

        filter.toggle("development");
        assert_eq!(filter.visible_count(&cards), 1);
        filter.toggle("development");
        assert_eq!(filter.active_count(), 0);
        assert_eq!(filter.visible_count(&cards), 2);
        // The "all" control only re-activates when clicked itself
        assert!(!filter.is_all_active());
    }

    #[test]
    fn test_filter_accumulates_categories() {
        let cards = vec![
            contribution("amosbastian", "bug-hunting", "https://example.com/1"),
            contribution("jestemkioskiem", "development", "https://example.com/2"),
            contribution("emrebeyler", "tutorials", "https://example.com/3"),
        ];
        let mut filter = ContributionFilter::new();
        filter.toggle("bug-hunting");
        filter.toggle("development");
        assert_eq!(filter.visible_count(&cards), 2);
        assert!(!filter.is_visible("tutorials"));
    }

    #[test]
    fn test_contributions_csv_skips_bad_and_duplicate_rows() {
        let csv_content = "\
moderator,author,repository,category,score,staff_pick,url
espoem,amosbastian,utopian-io/utopian.info,bug-hunting,81,true,https://example.com/1
espoem,tensor,steemit/steem-js,development,not-a-number,false,https://example.com/2
codingdefined,jestemkioskiem,utopian-io/utopian.info,development,64,false,https://example.com/1
codingdefined,emrebeyler,emre/dpay,development,92,false,https://example.com/3
";
        let contributions = read_contributions_from_csv_str(csv_content).unwrap();
        assert_eq!(contributions.len(), 2);
        assert_eq!(contributions[0].author, "amosbastian");
        assert!(contributions[0].staff_pick);
        assert_eq!(contributions[1].author, "emrebeyler");
    }

    #[test]
    fn test_contributions_csv_rejects_empty_dataset() {
        assert!(read_contributions_from_csv_str("").is_err());
        let header_only = "moderator,author,repository,category,score,staff_pick,url\n";
        assert!(read_contributions_from_csv_str(header_only).is_err());
    }

    #[test]
    fn test_embedded_datasets_parse() {
        let contributions =
            read_contributions_from_csv_str(include_str!("contributions.csv")).unwrap();
        assert!(contributions.len() >= 12);
        let categories = known_categories(&contributions);
        assert!(categories.contains(&"development".to_string()));
        assert!(!categories.contains(&ALL_CATEGORY.to_string()));

        let moderators = read_moderators_from_json_str(include_str!("moderators.json")).unwrap();
        let managers = manager_accounts(&moderators);
        assert!(!managers.is_empty());
        assert!(managers.len() < moderators.len());
    }

    #[test]
    fn test_dataset_derivations_dedupe_and_keep_order() {
        let cards = vec![
            contribution("amosbastian", "bug-hunting", "https://example.com/1"),
            contribution("tensor", "development", "https://example.com/2"),
            contribution("amosbastian", "tutorials", "https://example.com/3"),
        ];
        assert_eq!(distinct_authors(&cards), vec!["amosbastian", "tensor"]);
        assert_eq!(
            distinct_repositories(&cards),
            vec!["utopian-io/utopian.info"]
        );
        assert_eq!(
            known_categories(&cards),
            vec!["bug-hunting", "development", "tutorials"]
        );
    }

    #[test]
    fn test_moderators_json_roundtrip() {
        let json_content = r#"[
            {"account": "elear", "supermoderator": true},
            {"account": "espoem", "supermoderator": false}
        ]"#;
        let moderators = read_moderators_from_json_str(json_content).unwrap();
        assert_eq!(manager_accounts(&moderators), vec!["elear"]);
        assert_eq!(moderator_accounts(&moderators), vec!["elear", "espoem"]);
    }
}

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

// Compiled regex for the countdown display
static CLOCK_DISPLAY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+):(\d+):(\d+)$").unwrap());

/// Clock parsing error types for better error handling
#[derive(Debug, PartialEq)]
pub enum ClockParseError {
    EmptyInput,
    InvalidFormat(String),
    FieldOutOfRange,
}

impl std::fmt::Display for ClockParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClockParseError::EmptyInput => write!(f, "Recharge time cannot be empty"),
            ClockParseError::InvalidFormat(hint) => {
                write!(f, "Invalid recharge time format. {}", hint)
            }
            ClockParseError::FieldOutOfRange => write!(f, "Recharge time field is out of range"),
        }
    }
}

impl std::error::Error for ClockParseError {}

/// Parse a countdown display in `H:MM:SS` form into total seconds.
///
/// Fields are variable width and only the shape is validated: numeric but
/// out-of-range fields ("2:75:00") are accepted arithmetically, which keeps
/// the parser total over anything the clock itself ever rendered.
///
/// # Examples
/// ```
/// assert_eq!(parse_clock_display("3:47:15"), Ok(13_635));
/// assert_eq!(parse_clock_display("0:4:59"), Ok(299));
/// ```
pub fn parse_clock_display(input: &str) -> Result<u32, ClockParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ClockParseError::EmptyInput);
    }

    let captures = match CLOCK_DISPLAY_REGEX.captures(trimmed) {
        Some(c) => c,
        None => {
            return Err(ClockParseError::InvalidFormat(
                "Use H:MM:SS, e.g. 3:47:15".to_string(),
            ))
        }
    };

    let hours: u32 = captures[1]
        .parse()
        .map_err(|_| ClockParseError::FieldOutOfRange)?;
    let minutes: u32 = captures[2]
        .parse()
        .map_err(|_| ClockParseError::FieldOutOfRange)?;
    let seconds: u32 = captures[3]
        .parse()
        .map_err(|_| ClockParseError::FieldOutOfRange)?;

    hours
        .checked_mul(3_600)
        .and_then(|h| h.checked_add(minutes.checked_mul(60)?))
        .and_then(|hm| hm.checked_add(seconds))
        .ok_or(ClockParseError::FieldOutOfRange)
}

/// Voting power parsing error types
#[derive(Debug, PartialEq)]
pub enum PowerParseError {
    EmptyInput,
    NotANumber(String),
    OutOfRange(f64),
}

impl std::fmt::Display for PowerParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PowerParseError::EmptyInput => write!(f, "Voting power cannot be empty"),
            PowerParseError::NotANumber(value) => {
                write!(f, "Voting power is not a number: '{}'", value)
            }
            PowerParseError::OutOfRange(value) => {
                write!(f, "Voting power must be a finite non-negative value, got {}", value)
            }
        }
    }
}

impl std::error::Error for PowerParseError {}

/// Parse a voting power display, stripping one trailing `%` if present.
pub fn parse_voting_power(input: &str) -> Result<f64, PowerParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(PowerParseError::EmptyInput);
    }

    let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim();
    let value: f64 = number
        .parse()
        .map_err(|_| PowerParseError::NotANumber(number.to_string()))?;

    if !value.is_finite() || value < 0.0 {
        return Err(PowerParseError::OutOfRange(value));
    }
    Ok(value)
}

/// Case-insensitive matcher for a typeahead query. The query is taken
/// literally: regex metacharacters are escaped before compiling.
pub fn query_matcher(query: &str) -> Option<Regex> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return None;
    }
    RegexBuilder::new(&regex::escape(trimmed))
        .case_insensitive(true)
        .build()
        .ok()
}

/// Entries of `pool` containing `query` case-insensitively, in pool order,
/// capped at `limit`.
pub fn substring_matches(query: &str, pool: &[String], limit: usize) -> Vec<String> {
    let matcher = match query_matcher(query) {
        Some(m) => m,
        None => return Vec::new(),
    };
    pool.iter()
        .filter(|entry| matcher.is_match(entry))
        .take(limit)
        .cloned()
        .collect()
}

/// Split `candidate` around the first case-insensitive occurrence of the
/// query so the hit can be highlighted. None when nothing matches.
pub fn split_on_match<'a>(candidate: &'a str, query: &str) -> Option<(&'a str, &'a str, &'a str)> {
    let matcher = query_matcher(query)?;
    let hit = matcher.find(candidate)?;
    Some((
        &candidate[..hit.start()],
        &candidate[hit.start()..hit.end()],
        &candidate[hit.end()..],
    ))
}

/// Friendlier labels for a couple of categories; everything else renders
/// under its own name.
pub fn category_display_name(category: &str) -> &str {
    match category {
        "social" => "visibility",
        "ideas" => "suggestions",
        _ => category,
    }
}

// src/extract/text.rs

use once_cell::sync::Lazy;
use regex::Regex;

static PERCENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d{1,3})%$").expect("percent pattern"));
static SIGNED_PERCENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?(\d{1,3})%$").expect("signed percent pattern"));

/// Normalise raw cell text: strip surrounding whitespace (incl. `&nbsp;`).
pub fn clean(text: &str) -> &str {
    text.trim()
}

/// Parse a ridership figure such as `"350,000"`.
///
/// Thousands separators are stripped first. Only strictly positive integers
/// are accepted; `"0"`, `"-5"` and `"abc"` all yield `None`.
pub fn parse_riders(text: &str) -> Option<u64> {
    let digits: String = clean(text).chars().filter(|&c| c != ',').collect();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u64>().ok().filter(|&n| n > 0)
}

/// Parse a `D{1,3}%` percentage, clamped into `[0, 100]`.
pub fn parse_percent(text: &str) -> Option<i32> {
    let caps = PERCENT.captures(clean(text))?;
    caps[1].parse::<i32>().ok().map(|v| v.min(100))
}

/// Parse a "% below baseline" figure (`-45%` or `45%`) and convert it to the
/// share of baseline that was actually carried.
pub fn parse_percent_below(text: &str) -> Option<i32> {
    let caps = SIGNED_PERCENT.captures(clean(text))?;
    let below = caps[1].parse::<i32>().ok()?.min(100);
    Some(100 - below)
}

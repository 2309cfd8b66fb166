//! Duration strings such as `30s`, `1h30m` or `1.5ms`.
//!
//! A duration is a sequence of decimal numbers, each with an optional
//! fraction and a mandatory unit: `ns`, `us` (or `µs`), `ms`, `s`, `m`, `h`.
//! The bare string `0` is also accepted. Negative durations cannot be
//! represented by [`Duration`] and are rejected.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use crate::CoercionError;

static COMPONENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]*)(?:\.([0-9]*))?(ns|us|µs|μs|ms|s|m|h)").expect("static regex must compile")
});

const NANOS_PER_SECOND: u128 = 1_000_000_000;

/// Parses a duration string.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use flagbind_core::parse_duration;
///
/// assert_eq!(parse_duration("30s").unwrap(), Duration::from_secs(30));
/// assert_eq!(parse_duration("1h30m").unwrap(), Duration::from_secs(5400));
/// assert_eq!(parse_duration("1.5ms").unwrap(), Duration::from_micros(1500));
/// assert!(parse_duration("30").is_err());
/// ```
pub fn parse_duration(raw: &str) -> Result<Duration, CoercionError> {
    let invalid = || CoercionError::InvalidDuration(raw.to_string());

    let input = raw.strip_prefix('+').unwrap_or(raw);
    if input == "0" {
        return Ok(Duration::ZERO);
    }
    if input.is_empty() {
        return Err(invalid());
    }

    let mut rest = input;
    let mut total: u128 = 0;
    while !rest.is_empty() {
        let caps = COMPONENT_RE.captures(rest).ok_or_else(invalid)?;
        let whole = caps.get(1).map_or("", |m| m.as_str());
        let fraction = caps.get(2).map_or("", |m| m.as_str());
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        let unit = unit_nanos(&caps[3]);

        let mut nanos = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<u128>()
                .ok()
                .and_then(|w| w.checked_mul(unit))
                .ok_or_else(invalid)?
        };
        if !fraction.is_empty() {
            let digits = &fraction[..fraction.len().min(18)];
            let scale = 10u128.pow(digits.len() as u32);
            let value = digits.parse::<u128>().map_err(|_| invalid())?;
            nanos += value * unit / scale;
        }

        total = total.checked_add(nanos).ok_or_else(invalid)?;
        rest = &rest[caps[0].len()..];
    }

    let secs = u64::try_from(total / NANOS_PER_SECOND).map_err(|_| invalid())?;
    Ok(Duration::new(secs, (total % NANOS_PER_SECOND) as u32))
}

fn unit_nanos(unit: &str) -> u128 {
    match unit {
        "ns" => 1,
        "us" | "µs" | "μs" => 1_000,
        "ms" => 1_000_000,
        "s" => NANOS_PER_SECOND,
        "m" => 60 * NANOS_PER_SECOND,
        _ => 3_600 * NANOS_PER_SECOND,
    }
}

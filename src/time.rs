use crate::error::{Error, Result};

/// Minutes in a day. Used as the exclusive upper bound of a full-day window.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

const NOON: u16 = 12 * 60;

/// Parses a 12-hour clock string such as `10:00am` or `4:30pm` into
/// minutes since midnight. `12:00am` is 0 and `12:00pm` is 720.
pub fn parse_clock(s: &str) -> Result<u16> {
    let t = s.trim();
    if t.len() < 6 || !t.is_char_boundary(t.len() - 2) {
        return Err(Error::format(s, "expected H:MMam or H:MMpm"));
    }

    let (clock, suffix) = t.split_at(t.len() - 2);
    let pm = match suffix.to_ascii_lowercase().as_str() {
        "am" => false,
        "pm" => true,
        _ => return Err(Error::format(s, "missing am/pm suffix")),
    };

    let (hour, minute) = clock
        .split_once(':')
        .ok_or_else(|| Error::format(s, "missing ':' between hour and minute"))?;

    if hour.is_empty() || hour.len() > 2 || !hour.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::format(s, "hour is not numeric"));
    }
    if minute.len() != 2 || !minute.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::format(s, "minute must be two digits"));
    }

    let hour: u16 = hour
        .parse()
        .map_err(|_| Error::format(s, "hour is not numeric"))?;
    let minute: u16 = minute
        .parse()
        .map_err(|_| Error::format(s, "minute is not numeric"))?;

    if !(1..=12).contains(&hour) {
        return Err(Error::format(s, "hour must be between 1 and 12"));
    }
    if minute > 59 {
        return Err(Error::format(s, "minute must be between 00 and 59"));
    }

    Ok((hour % 12) * 60 + minute + if pm { NOON } else { 0 })
}

/// Renders minutes since midnight back into `H:MMam` form.
///
/// `1440` (the end of a full-day window) renders as `12:00am`.
pub fn format_clock(minutes: u16) -> String {
    let minutes = minutes % MINUTES_PER_DAY;
    let (hour, minute) = (minutes / 60, minutes % 60);
    let suffix = if hour >= 12 { "pm" } else { "am" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02}{}", display_hour, minute, suffix)
}

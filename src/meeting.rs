use std::{fmt, str::FromStr};

use crate::error::{Error, Result};
use crate::time::{format_clock, parse_clock};

/// Day letters in calendar order: Monday through Sunday, with `R` for
/// Thursday and `U` for Sunday.
pub const DAY_LETTERS: [char; 7] = ['M', 'T', 'W', 'R', 'F', 'S', 'U'];

/// A set of weekdays, one bit per letter of [`DAY_LETTERS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize)]
pub struct Weekdays(u8);

impl Weekdays {
    pub const NONE: Weekdays = Weekdays(0);
    pub const ALL: Weekdays = Weekdays(0b111_1111);

    fn bit(letter: char) -> Option<u8> {
        DAY_LETTERS
            .iter()
            .position(|&d| d == letter)
            .map(|i| 1 << i)
    }

    /// Parses day letters such as `"MWF"`. Order and repeats do not matter.
    pub fn from_letters(letters: &str) -> Result<Weekdays> {
        if letters.is_empty() {
            return Err(Error::format(letters, "no weekday letters"));
        }
        letters.chars().try_fold(Weekdays::NONE, |acc, c| {
            Weekdays::bit(c)
                .map(|b| Weekdays(acc.0 | b))
                .ok_or_else(|| Error::format(letters, format!("unknown weekday letter {:?}", c)))
        })
    }

    pub fn contains(&self, letter: char) -> bool {
        Weekdays::bit(letter).is_some_and(|b| self.0 & b != 0)
    }

    pub fn intersects(&self, other: Weekdays) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        DAY_LETTERS.iter().copied().filter(|&d| self.contains(d))
    }
}

impl fmt::Display for Weekdays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.iter().try_for_each(|d| write!(f, "{}", d))
    }
}

/// One weekly recurring block: the days it meets and its start/end in
/// minutes since midnight. `start < end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct MeetingPattern {
    days: Weekdays,
    start: u16,
    end: u16,
}

impl MeetingPattern {
    /// Fails with [`Error::InvalidInterval`] unless `start < end`.
    pub fn new(days: Weekdays, start: u16, end: u16) -> Result<MeetingPattern> {
        if start >= end {
            return Err(Error::InvalidInterval {
                input: format!("{} {}-{}", days, format_clock(start), format_clock(end)),
                start,
                end,
            });
        }
        Ok(MeetingPattern { days, start, end })
    }

    /// Parses a combined token such as `"MWF 10:00am-10:50am"`.
    pub fn parse(token: &str) -> Result<MeetingPattern> {
        let token = token.trim();
        let split = token
            .find(|c: char| !c.is_ascii_alphabetic())
            .ok_or_else(|| Error::format(token, "missing time range"))?;
        let (letters, range) = token.split_at(split);

        let days = Weekdays::from_letters(letters)?;
        let (start, end) = range
            .trim()
            .split_once('-')
            .ok_or_else(|| Error::format(token, "time range must be <start>-<end>"))?;

        let start = parse_clock(start)?;
        let end = parse_clock(end)?;

        if start >= end {
            return Err(Error::InvalidInterval {
                input: token.to_string(),
                start,
                end,
            });
        }
        Ok(MeetingPattern { days, start, end })
    }

    pub fn days(&self) -> Weekdays {
        self.days
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    pub fn end(&self) -> u16 {
        self.end
    }

    pub fn meets_on(&self, letter: char) -> bool {
        self.days.contains(letter)
    }

    /// Same-day overlap. Touching intervals (one ends when the next starts)
    /// do not overlap.
    pub fn overlaps(&self, other: &MeetingPattern) -> bool {
        self.days.intersects(other.days) && !(self.end <= other.start || self.start >= other.end)
    }
}

impl FromStr for MeetingPattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        MeetingPattern::parse(s)
    }
}

impl fmt::Display for MeetingPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{}",
            self.days,
            format_clock(self.start),
            format_clock(self.end)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pattern() {
        let p: MeetingPattern = "MWF 10:00am-10:50am".parse().unwrap();
        assert_eq!(p.days().to_string(), "MWF");
        assert_eq!(p.start(), 600);
        assert_eq!(p.end(), 650);
        assert!(p.meets_on('W'));
        assert!(!p.meets_on('R'));
    }

    #[test]
    fn test_parse_pattern_without_space() {
        let p = MeetingPattern::parse("TR1:15pm-2:30pm").unwrap();
        assert_eq!(p.days().to_string(), "TR");
        assert_eq!((p.start(), p.end()), (795, 870));
    }

    #[test]
    fn test_parse_pattern_rejects_reversed_interval() {
        let err = MeetingPattern::parse("M 11:00am-10:00am").unwrap_err();
        assert!(matches!(err, Error::InvalidInterval { start: 660, end: 600, .. }));

        let err = MeetingPattern::parse("M 10:00am-10:00am").unwrap_err();
        assert!(matches!(err, Error::InvalidInterval { .. }));
    }

    #[test]
    fn test_parse_pattern_rejects_bad_tokens() {
        for bad in ["", "MWF", "10:00am-11:00am", "MXF 10:00am-11:00am", "M 10:00am", "M 10:00-11:00am"] {
            assert!(MeetingPattern::parse(bad).is_err(), "expected error for {:?}", bad);
        }
    }

    #[test]
    fn test_weekdays_display_is_canonical() {
        let days = Weekdays::from_letters("FWMF").unwrap();
        assert_eq!(days.to_string(), "MWF");
        assert_eq!(Weekdays::ALL.to_string(), "MTWRFSU");
    }

    #[test]
    fn test_overlap_requires_shared_day() {
        let a = MeetingPattern::parse("MWF 10:00am-10:50am").unwrap();
        let b = MeetingPattern::parse("TR 10:00am-11:15am").unwrap();
        let c = MeetingPattern::parse("M 10:30am-11:30am").unwrap();
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(c.overlaps(&a));
    }

    #[test]
    fn test_back_to_back_does_not_overlap() {
        let a = MeetingPattern::parse("M 10:00am-11:00am").unwrap();
        let b = MeetingPattern::parse("M 11:00am-12:00pm").unwrap();
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_display_round_trips_token() {
        let p = MeetingPattern::parse("TR 1:15pm-2:30pm").unwrap();
        assert_eq!(p.to_string(), "TR 1:15pm-2:30pm");
    }
}

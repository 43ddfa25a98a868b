//! Preference window and the preferences file.

use log::warn;
use serde::Deserialize;
use std::{fs, path::Path};

use crate::error::Result;
use crate::meeting::MeetingPattern;
use crate::time::{format_clock, parse_clock, MINUTES_PER_DAY};

/// Earliest start and latest end every accepted meeting must respect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct PreferenceWindow {
    start: u16,
    end: u16,
}

impl PreferenceWindow {
    pub const FULL_DAY: PreferenceWindow = PreferenceWindow {
        start: 0,
        end: MINUTES_PER_DAY,
    };

    /// Returns `None` unless `start < end` and both lie within the day.
    pub fn new(start: u16, end: u16) -> Option<PreferenceWindow> {
        (start < end && end <= MINUTES_PER_DAY).then_some(PreferenceWindow { start, end })
    }

    /// Builds a window from two clock strings. A missing or unparsable
    /// endpoint, or an empty window, falls back to the full day.
    pub fn from_clock_strs(start: Option<&str>, end: Option<&str>) -> PreferenceWindow {
        let (Some(start), Some(end)) = (start, end) else {
            return PreferenceWindow::FULL_DAY;
        };

        match (parse_clock(start), parse_clock(end)) {
            (Ok(s), Ok(e)) => PreferenceWindow::new(s, e).unwrap_or_else(|| {
                warn!(
                    "preferred window {}-{} is empty, using the full day",
                    start, end
                );
                PreferenceWindow::FULL_DAY
            }),
            (Err(err), _) | (_, Err(err)) => {
                warn!("{}, using the full day", err);
                PreferenceWindow::FULL_DAY
            }
        }
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    pub fn end(&self) -> u16 {
        self.end
    }

    pub fn is_full_day(&self) -> bool {
        *self == PreferenceWindow::FULL_DAY
    }

    /// Inclusive at both ends.
    pub fn contains(&self, meeting: &MeetingPattern) -> bool {
        meeting.start() >= self.start && meeting.end() <= self.end
    }
}

impl Default for PreferenceWindow {
    fn default() -> Self {
        PreferenceWindow::FULL_DAY
    }
}

impl std::fmt::Display for PreferenceWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", format_clock(self.start), format_clock(self.end))
    }
}

/// Direction used when ranking schedules by free time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ranking {
    #[default]
    MostFreeFirst,
    LeastFreeFirst,
}

/// Contents of a preferences file.
///
/// ```toml
/// preferred_start = "9:00am"
/// preferred_end = "5:00pm"
/// optimize_free_time = true
/// ranking = "most-free-first"
/// limit = 10
/// parallel = false
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub preferred_start: Option<String>,
    pub preferred_end: Option<String>,
    pub optimize_free_time: bool,
    pub ranking: Ranking,
    pub limit: Option<usize>,
    pub parallel: bool,
}

impl Preferences {
    pub fn load(path: impl AsRef<Path>) -> Result<Preferences> {
        let text = fs::read_to_string(path)?;
        Preferences::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Preferences> {
        Ok(toml::from_str(text)?)
    }

    pub fn window(&self) -> PreferenceWindow {
        PreferenceWindow::from_clock_strs(
            non_blank(&self.preferred_start),
            non_blank(&self.preferred_end),
        )
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_from_clock_strs() {
        let w = PreferenceWindow::from_clock_strs(Some("9:00am"), Some("5:00pm"));
        assert_eq!((w.start(), w.end()), (540, 1020));
        assert_eq!(w.to_string(), "9:00am-5:00pm");
    }

    #[test]
    fn test_window_falls_back_to_full_day() {
        assert!(PreferenceWindow::from_clock_strs(None, Some("5:00pm")).is_full_day());
        assert!(PreferenceWindow::from_clock_strs(Some("9am"), Some("5:00pm")).is_full_day());
        assert!(PreferenceWindow::from_clock_strs(Some("5:00pm"), Some("9:00am")).is_full_day());
        assert_eq!(PreferenceWindow::default().end(), 1440);
    }

    #[test]
    fn test_window_contains_is_inclusive() {
        let w = PreferenceWindow::new(540, 1020).unwrap();
        assert!(w.contains(&MeetingPattern::parse("M 9:00am-5:00pm").unwrap()));
        assert!(!w.contains(&MeetingPattern::parse("F 8:00am-9:00am").unwrap()));
        assert!(!w.contains(&MeetingPattern::parse("F 4:30pm-5:15pm").unwrap()));
    }

    #[test]
    fn test_preferences_from_toml() {
        let prefs = Preferences::from_toml(
            r#"
            preferred_start = "9:00am"
            preferred_end = "5:00pm"
            optimize_free_time = true
            ranking = "least-free-first"
            limit = 3
            "#,
        )
        .unwrap();

        assert!(prefs.optimize_free_time);
        assert_eq!(prefs.ranking, Ranking::LeastFreeFirst);
        assert_eq!(prefs.limit, Some(3));
        assert!(!prefs.parallel);
        assert_eq!(prefs.window().start(), 540);
    }

    #[test]
    fn test_preferences_defaults() {
        let prefs = Preferences::from_toml("").unwrap();
        assert!(!prefs.optimize_free_time);
        assert_eq!(prefs.ranking, Ranking::MostFreeFirst);
        assert!(prefs.window().is_full_day());

        let blank = Preferences::from_toml("preferred_start = \"\"\npreferred_end = \"\"").unwrap();
        assert!(blank.window().is_full_day());
    }

    #[test]
    fn test_preferences_rejects_bad_toml() {
        assert!(matches!(
            Preferences::from_toml("optimize_free_time = \"maybe\""),
            Err(crate::error::Error::Config(_))
        ));
    }
}

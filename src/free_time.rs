use log::debug;
use std::fmt;

use crate::meeting::{MeetingPattern, DAY_LETTERS};
use crate::preference::Ranking;
use crate::scheduler::Schedule;

/// 7:00am, start of the day bound used for free time.
pub const DAY_START: u16 = 7 * 60;
/// 11:00pm, end of the day bound used for free time.
pub const DAY_END: u16 = 23 * 60;

/// Idle minutes inside 7:00am-11:00pm, summed over all seven weekdays.
///
/// Meetings are clipped to the day bound, so the result is always between
/// 0 and `7 * 960`. Minutes shared by overlapping meetings count once.
pub fn free_minutes<'a, I>(meetings: I) -> u32
where
    I: IntoIterator<Item = &'a MeetingPattern>,
{
    let meetings: Vec<&MeetingPattern> = meetings.into_iter().collect();

    DAY_LETTERS
        .iter()
        .map(|&day| {
            let mut intervals: Vec<(u16, u16)> = meetings
                .iter()
                .filter(|m| m.meets_on(day))
                .map(|m| (m.start().max(DAY_START), m.end().min(DAY_END)))
                .filter(|(start, end)| start < end)
                .collect();
            intervals.sort_unstable();
            free_in_day(&intervals)
        })
        .sum()
}

// `intervals` sorted by start, each within the day bound
fn free_in_day(intervals: &[(u16, u16)]) -> u32 {
    let (free, busy_until) =
        intervals
            .iter()
            .fold((0u32, DAY_START), |(free, busy_until), &(start, end)| {
                let gap = start.saturating_sub(busy_until);
                (free + u32::from(gap), busy_until.max(end))
            });

    free + u32::from(DAY_END - busy_until)
}

/// Weekly free minutes of a schedule's meetings.
pub fn score(schedule: &Schedule) -> u32 {
    free_minutes(schedule.meetings())
}

/// A schedule with its weekly free minutes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredSchedule<'a> {
    schedule: Schedule<'a>,
    free_minutes: u32,
}

impl<'a> ScoredSchedule<'a> {
    pub fn new(schedule: Schedule<'a>) -> ScoredSchedule<'a> {
        let free_minutes = score(&schedule);
        ScoredSchedule {
            schedule,
            free_minutes,
        }
    }

    pub fn schedule(&self) -> &Schedule<'a> {
        &self.schedule
    }

    pub fn free_minutes(&self) -> u32 {
        self.free_minutes
    }
}

impl fmt::Display for ScoredSchedule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Weekly Free Time: {} minutes ({} hours {} mins)",
            self.free_minutes,
            self.free_minutes / 60,
            self.free_minutes % 60
        )?;
        write!(f, "{}", self.schedule)
    }
}

/// Scores every schedule and orders them by free time. Ties keep their
/// enumeration order.
pub fn rank(schedules: Vec<Schedule<'_>>, ranking: Ranking) -> Vec<ScoredSchedule<'_>> {
    let mut scored: Vec<_> = schedules.into_iter().map(ScoredSchedule::new).collect();
    match ranking {
        Ranking::MostFreeFirst => scored.sort_by(|a, b| b.free_minutes.cmp(&a.free_minutes)),
        Ranking::LeastFreeFirst => scored.sort_by_key(|s| s.free_minutes),
    }
    debug!("ranked {} schedules ({:?})", scored.len(), ranking);
    scored
}

//! Build conflict-free weekly class schedules: pick one section per course,
//! drop combinations that overlap or leave the preferred time window, and
//! optionally rank the rest by weekly free time.

#[cfg(test)]
mod arbitrary;
pub mod conflict;
pub mod course;
pub mod error;
pub mod free_time;
pub mod meeting;
pub mod preference;
pub mod scheduler;
pub mod serilize;
pub mod time;

pub use conflict::{has_conflict, ConflictChecker};
pub use course::{Catalog, Course, CourseTable, Section};
pub use error::{Error, Result};
pub use free_time::{rank, score, ScoredSchedule};
pub use meeting::{MeetingPattern, Weekdays};
pub use preference::{PreferenceWindow, Preferences, Ranking};
pub use scheduler::{enumerate, enumerate_parallel, Outcome, Schedule, Scheduler, Schedules};
pub use time::parse_clock;

use log::{debug, info};
use std::{fmt, path::PathBuf, thread};

use crate::conflict::ConflictChecker;
use crate::course::*;
use crate::error::Result;
use crate::free_time::{rank, ScoredSchedule};
use crate::meeting::MeetingPattern;
use crate::preference::{PreferenceWindow, Preferences};

/// One section per offered course, aligned with the catalog's course order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule<'a> {
    entries: Vec<(&'a Course, &'a Section)>,
}

impl<'a> Schedule<'a> {
    pub fn new(entries: Vec<(&'a Course, &'a Section)>) -> Schedule<'a> {
        Schedule { entries }
    }

    pub fn entries(&self) -> &[(&'a Course, &'a Section)] {
        &self.entries
    }

    pub fn meetings(&self) -> impl Iterator<Item = &'a MeetingPattern> + '_ {
        self.entries.iter().map(|&(_, section)| section.meeting())
    }

    pub fn crns(&self) -> Vec<&'a str> {
        self.entries.iter().map(|&(_, section)| section.crn()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Schedule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (course, section) in &self.entries {
            writeln!(f, "  {}: CRN {} | {}", course, section.crn(), section.schedule())?;
        }
        Ok(())
    }
}

/// Lazy, lexicographic walk over one section per course that yields only
/// conflict-free combinations.
///
/// A section that conflicts with the sections chosen before it ends the
/// whole subtree below it, so rejected prefixes are never extended.
pub struct Schedules<'a> {
    offered: Vec<(&'a Course, &'a [Section])>,
    checker: ConflictChecker,
    // next section index to try, one per depth
    cursor: Vec<usize>,
    done: bool,
}

impl<'a> Schedules<'a> {
    pub fn new(offered: Vec<(&'a Course, &'a [Section])>, window: PreferenceWindow) -> Schedules<'a> {
        let offered: Vec<_> = offered
            .into_iter()
            .filter(|(_, sections)| !sections.is_empty())
            .collect();
        let cursor = if offered.is_empty() { vec![] } else { vec![0] };
        Schedules {
            offered,
            checker: ConflictChecker::new(window),
            cursor,
            done: false,
        }
    }

    fn current(&self) -> Schedule<'a> {
        Schedule::new(
            self.cursor
                .iter()
                .zip(&self.offered)
                .map(|(&i, &(course, sections))| (course, &sections[i]))
                .collect(),
        )
    }
}

impl<'a> Iterator for Schedules<'a> {
    type Item = Schedule<'a>;

    fn next(&mut self) -> Option<Schedule<'a>> {
        if self.done {
            return None;
        }
        if self.offered.is_empty() {
            // the product over no courses is the single empty choice
            self.done = true;
            return Some(Schedule::new(vec![]));
        }

        loop {
            let depth = self.cursor.len() - 1;
            let index = self.cursor[depth];
            let sections = self.offered[depth].1;

            if index == sections.len() {
                self.cursor.pop();
                if self.cursor.is_empty() {
                    self.done = true;
                    return None;
                }
                self.checker.pop();
                *self.cursor.last_mut()? += 1;
                continue;
            }

            if !self.checker.try_accept(sections[index].meeting()) {
                self.cursor[depth] += 1;
                continue;
            }

            if depth + 1 == self.offered.len() {
                let schedule = self.current();
                self.checker.pop();
                self.cursor[depth] += 1;
                return Some(schedule);
            }
            self.cursor.push(0);
        }
    }
}

/// All conflict-free schedules for the catalog's offered courses, in
/// enumeration order. Courses without sections are skipped.
pub fn enumerate(catalog: &Catalog, window: PreferenceWindow) -> Schedules<'_> {
    Schedules::new(catalog.offered(), window)
}

/// Same output as [`enumerate`], computed on worker threads that each take a
/// contiguous slice of the first course's sections.
pub fn enumerate_parallel(catalog: &Catalog, window: PreferenceWindow) -> Vec<Schedule<'_>> {
    let offered = catalog.offered();
    let Some((&(first_course, first_sections), rest)) = offered.split_first() else {
        return enumerate(catalog, window).collect();
    };

    let workers = num_cpus::get().clamp(1, first_sections.len());
    let chunk = first_sections.len().div_ceil(workers);
    debug!(
        "enumerating {} courses on {} workers",
        offered.len(),
        workers
    );

    thread::scope(|scope| {
        let handles: Vec<_> = first_sections
            .chunks(chunk)
            .map(|part| {
                let mut offered = Vec::with_capacity(rest.len() + 1);
                offered.push((first_course, part));
                offered.extend_from_slice(rest);
                scope.spawn(move || Schedules::new(offered, window).collect::<Vec<_>>())
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
            .collect()
    })
}

/// Result of a scheduling run: plain schedules, or schedules ranked by
/// weekly free time when optimization is on.
#[derive(Debug)]
pub enum Outcome<'a> {
    Plain(Vec<Schedule<'a>>),
    Ranked(Vec<ScoredSchedule<'a>>),
}

impl Outcome<'_> {
    pub fn len(&self) -> usize {
        match self {
            Outcome::Plain(s) => s.len(),
            Outcome::Ranked(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Outcome<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Plain(schedules) => {
                for (i, s) in schedules.iter().enumerate() {
                    write!(f, "Schedule {}:\n{}", i + 1, s)?;
                }
            }
            Outcome::Ranked(schedules) => {
                for (i, s) in schedules.iter().enumerate() {
                    write!(f, "Schedule {}:\n{}", i + 1, s)?;
                }
            }
        }
        Ok(())
    }
}

pub struct Scheduler {
    catalog: Catalog,
    preferences: Preferences,
}

impl Scheduler {
    pub fn new(catalog: Catalog, preferences: Preferences) -> Scheduler {
        Scheduler {
            catalog,
            preferences,
        }
    }

    /// Reads the requested courses' sections from a CSV section table.
    pub fn load(file_path: PathBuf, courses: &[Course], preferences: Preferences) -> Result<Scheduler> {
        let table = CourseTable::load(file_path)?;
        let catalog = table.catalog(courses)?;
        Ok(Scheduler::new(catalog, preferences))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn window(&self) -> PreferenceWindow {
        self.preferences.window()
    }

    pub fn schedules(&self) -> Schedules<'_> {
        enumerate(&self.catalog, self.window())
    }

    /// Enumerates within the preferred window, ranks by free time when
    /// `optimize_free_time` is set, and applies `limit` last.
    pub fn generate(&self) -> Outcome<'_> {
        let prefs = &self.preferences;
        let window = self.window();
        let limit = prefs.limit.unwrap_or(usize::MAX);
        info!(
            "generating schedules for {} courses within {}",
            self.catalog.offered().len(),
            window
        );

        let outcome = if !prefs.optimize_free_time {
            let schedules = if prefs.parallel {
                let mut all = enumerate_parallel(&self.catalog, window);
                all.truncate(limit);
                all
            } else {
                self.schedules().take(limit).collect()
            };
            Outcome::Plain(schedules)
        } else {
            let all = if prefs.parallel {
                enumerate_parallel(&self.catalog, window)
            } else {
                self.schedules().collect()
            };
            let mut ranked = rank(all, prefs.ranking);
            ranked.truncate(limit);
            Outcome::Ranked(ranked)
        };

        info!("found {} valid schedule(s)", outcome.len());
        outcome
    }
}

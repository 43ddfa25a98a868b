use linked_hash_map::LinkedHashMap;
use log::{debug, warn};
use polars::{lazy::dsl::col, prelude::*};
use std::{clone, fmt, ops::Deref, path::PathBuf, str::FromStr};

use crate::error::{Error, Result};
use crate::meeting::MeetingPattern;

/// Columns a section table must provide.
pub const COLUMNS: [&str; 4] = ["SUBJECT", "COURSE NUMBER", "CRN", "SCHEDULE"];

#[derive(Debug, serde::Serialize, clone::Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Course {
    subject: String,
    number: String,
}

impl Course {
    pub fn new(subject: impl Into<String>, number: impl Into<String>) -> Course {
        Course {
            subject: subject.into(),
            number: number.into(),
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn number(&self) -> &str {
        &self.number
    }
}

impl FromStr for Course {
    type Err = Error;

    // "CSE 174"
    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split_whitespace();
        match (parts.next(), parts.next(), parts.next()) {
            (Some(subject), Some(number), None) => {
                Ok(Course::new(subject.to_uppercase(), number.to_uppercase()))
            }
            _ => Err(Error::format(s, "expected <subject> <number>")),
        }
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.subject, self.number)
    }
}

/// One offered instance of a course. The raw schedule token is kept for
/// display; the parsed meeting is what conflict checks use.
#[derive(Debug, serde::Serialize, clone::Clone, PartialEq, Eq)]
pub struct Section {
    crn: String,
    schedule: String,
    #[serde(skip)]
    meeting: MeetingPattern,
}

impl Section {
    pub fn new(crn: impl Into<String>, schedule: impl Into<String>) -> Result<Section> {
        let schedule = schedule.into();
        let meeting = MeetingPattern::parse(&schedule)?;
        Ok(Section {
            crn: crn.into(),
            schedule,
            meeting,
        })
    }

    pub fn crn(&self) -> &str {
        &self.crn
    }

    pub fn schedule(&self) -> &str {
        &self.schedule
    }

    pub fn meeting(&self) -> &MeetingPattern {
        &self.meeting
    }
}

/// A section row whose schedule token could not be parsed.
#[derive(Debug)]
pub struct RejectedSection {
    pub course: Course,
    pub crn: String,
    pub schedule: String,
    pub error: Error,
}

impl fmt::Display for RejectedSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: CRN {} | {} ({})", self.course, self.crn, self.schedule, self.error)
    }
}

/// Candidate sections per course, in the order courses were added.
#[derive(Debug, Default)]
pub struct Catalog {
    // course -> sections
    courses: LinkedHashMap<Course, Vec<Section>>,
    rejected: Vec<RejectedSection>,
}

impl Catalog {
    pub fn new() -> Catalog {
        Catalog::default()
    }

    /// Registers a course with no sections yet. Re-adding keeps its position.
    pub fn add_course(&mut self, course: Course) {
        self.courses.entry(course).or_insert_with(Vec::new);
    }

    pub fn insert_section(&mut self, course: Course, section: Section) {
        self.courses.entry(course).or_insert_with(Vec::new).push(section);
    }

    /// Parses and adds a section. Returns false if the token was rejected;
    /// the rejection is kept in [`Catalog::rejected`] and the course is still
    /// registered.
    pub fn add_section(&mut self, course: Course, crn: &str, schedule: &str) -> bool {
        match Section::new(crn, schedule) {
            Ok(section) => {
                self.insert_section(course, section);
                true
            }
            Err(error) => {
                warn!("rejecting section {} of {}: {}", crn, course, error);
                self.add_course(course.clone());
                self.rejected.push(RejectedSection {
                    course,
                    crn: crn.to_string(),
                    schedule: schedule.to_string(),
                    error,
                });
                false
            }
        }
    }

    pub fn rejected(&self) -> &[RejectedSection] {
        &self.rejected
    }

    /// Courses that have at least one usable section, in insertion order.
    pub fn offered(&self) -> Vec<(&Course, &[Section])> {
        self.courses
            .iter()
            .filter(|(_, sections)| !sections.is_empty())
            .map(|(course, sections)| (course, sections.as_slice()))
            .collect()
    }

    /// Courses with no usable section. They are left out of every schedule.
    pub fn unavailable(&self) -> Vec<&Course> {
        self.courses
            .iter()
            .filter(|(_, sections)| sections.is_empty())
            .map(|(course, _)| course)
            .collect()
    }

    pub fn find_section(&self, course: &Course, crn: &str) -> Option<&Section> {
        self.get(course)
            .and_then(|sections| sections.iter().find(|s| s.crn == crn))
    }
}

impl Deref for Catalog {
    type Target = LinkedHashMap<Course, Vec<Section>>;

    fn deref(&self) -> &Self::Target {
        &self.courses
    }
}

impl From<Course> for Catalog {
    fn from(course: Course) -> Self {
        let mut catalog = Catalog::new();
        catalog.add_course(course);
        catalog
    }
}

impl TryFrom<DataFrame> for Catalog {
    type Error = Error;

    fn try_from(df: DataFrame) -> Result<Self> {
        CourseTable::from_df(df)?.all_courses()
    }
}

/// Section rows backed by a polars frame with the [`COLUMNS`] layout.
#[derive(Clone)]
pub struct CourseTable {
    df: DataFrame,
}

impl CourseTable {
    /// Reads a CSV section table. Every column is read as text so CRNs and
    /// course numbers keep their leading zeros.
    pub fn load(file_path: impl Into<PathBuf>) -> Result<CourseTable> {
        let df = LazyCsvReader::new(file_path.into())
            .has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;

        CourseTable::from_df(df)
    }

    /// Fails with [`Error::MissingColumn`] if any of [`COLUMNS`] is absent.
    pub fn from_df(df: DataFrame) -> Result<CourseTable> {
        let names = df.get_column_names();
        if let Some(missing) = COLUMNS.iter().find(|c| !names.contains(*c)) {
            return Err(Error::MissingColumn(missing.to_string()));
        }
        Ok(CourseTable { df })
    }

    pub fn to_lazy(&self) -> LazyTable {
        LazyTable::new(self.df.clone().lazy())
    }

    /// Sections for the requested courses, in request order. A requested
    /// course with no rows stays in the catalog with no sections.
    pub fn catalog(&self, courses: &[Course]) -> Result<Catalog> {
        let mut catalog = Catalog::new();
        for course in courses {
            catalog.add_course(course.clone());
        }

        for (course, crn, schedule) in self.rows()? {
            if catalog.contains_key(&course) {
                catalog.add_section(course, &crn, &schedule);
            }
        }

        for course in catalog.unavailable() {
            warn!("no sections found for {}", course);
        }
        debug!(
            "built catalog: {} courses, {} rejected sections",
            catalog.len(),
            catalog.rejected().len()
        );
        Ok(catalog)
    }

    /// Every course in the table, in first-appearance order.
    pub fn all_courses(&self) -> Result<Catalog> {
        let mut catalog = Catalog::new();
        for (course, crn, schedule) in self.rows()? {
            catalog.add_section(course, &crn, &schedule);
        }
        Ok(catalog)
    }

    fn rows(&self) -> Result<Vec<(Course, String, String)>> {
        let df = self.df.select(COLUMNS)?;

        let mut rows = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let Some(row) = df.get(i) else { continue };
            let subject = cell(&row[0]);
            let number = cell(&row[1]);
            if subject.is_empty() || number.is_empty() {
                continue;
            }
            rows.push((Course::new(subject, number), cell(&row[2]), cell(&row[3])));
        }
        Ok(rows)
    }
}

fn cell(value: &AnyValue) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(text) => text.trim().to_string(),
        other => other.to_string().replace('"', "").trim().to_string(),
    }
}

impl Deref for CourseTable {
    type Target = DataFrame;

    fn deref(&self) -> &Self::Target {
        &self.df
    }
}

impl fmt::Display for CourseTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.df)
    }
}

pub struct LazyTable {
    lf: LazyFrame,
}

impl LazyTable {
    pub fn new(lf: LazyFrame) -> Self {
        LazyTable { lf }
    }

    pub fn subject(self, subject: &str) -> Self {
        let lf = self
            .lf
            .filter(col("SUBJECT").eq(lit(subject.to_uppercase())));

        LazyTable { lf }
    }

    pub fn subjects(self, codes: &[&str]) -> Self {
        // all rows whose subject starts with one of codes
        let regex = format!("^({})", codes.join("|"));

        let lf = self
            .lf
            .filter(col("SUBJECT").str().contains(lit(regex), false));

        LazyTable { lf }
    }

    pub fn collect(self) -> Result<CourseTable> {
        let df = self.lf.collect()?;
        Ok(CourseTable { df })
    }
}

impl Deref for LazyTable {
    type Target = LazyFrame;

    fn deref(&self) -> &Self::Target {
        &self.lf
    }
}

use crate::course::Catalog;
use crate::error::Result;
use crate::free_time::ScoredSchedule;
use crate::scheduler::{Outcome, Schedule};

#[derive(serde::Serialize, Debug, PartialEq)]
pub struct SectionInfo {
    pub course: String,
    pub crn: String,
    pub schedule: String,
}

#[derive(serde::Serialize, Debug, PartialEq)]
pub struct ScheduleInfo {
    pub sections: Vec<SectionInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_minutes: Option<u32>,
}

impl From<&Schedule<'_>> for ScheduleInfo {
    fn from(schedule: &Schedule) -> Self {
        let sections = schedule
            .entries()
            .iter()
            .map(|(course, section)| SectionInfo {
                course: course.to_string(),
                crn: section.crn().to_string(),
                schedule: section.schedule().to_string(),
            })
            .collect();

        ScheduleInfo {
            sections,
            free_minutes: None,
        }
    }
}

impl From<&ScoredSchedule<'_>> for ScheduleInfo {
    fn from(scored: &ScoredSchedule) -> Self {
        ScheduleInfo {
            free_minutes: Some(scored.free_minutes()),
            ..ScheduleInfo::from(scored.schedule())
        }
    }
}

#[derive(serde::Serialize, Debug, Default)]
pub struct ScheduleList {
    pub schedules: Vec<ScheduleInfo>,
    /// Requested courses left out because no section was usable.
    pub unavailable: Vec<String>,
    /// Sections dropped because their schedule could not be read.
    pub rejected: Vec<String>,
}

impl ScheduleList {
    pub fn new(outcome: &Outcome, catalog: &Catalog) -> ScheduleList {
        ScheduleList {
            schedules: outcome.into(),
            unavailable: catalog.unavailable().iter().map(|c| c.to_string()).collect(),
            rejected: catalog.rejected().iter().map(|r| r.to_string()).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl From<&Outcome<'_>> for Vec<ScheduleInfo> {
    fn from(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Plain(schedules) => schedules.iter().map(ScheduleInfo::from).collect(),
            Outcome::Ranked(schedules) => schedules.iter().map(ScheduleInfo::from).collect(),
        }
    }
}

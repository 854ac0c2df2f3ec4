//! Learning roadmap
//!
//! The service wraps the plan one level deeper than the header fields:
//!
//! ```json
//! { "role": "...", "level": "...", "duration": "12",
//!   "roadmap": { "stages": [...], "weekly_plan": [...] } }
//! ```
//!
//! Both that layout and a flat one (stages next to role) are accepted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::display_u32;

/// A multi-week learning plan for one role
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "RawRoadmap")]
pub struct Roadmap {
    pub role: String,
    pub level: String,
    /// Planned length in weeks
    pub duration: u32,
    pub stages: Vec<Stage>,
    pub weekly_plan: Vec<WeekPlan>,
    /// First day of week 1, when the service reports it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

/// One stage of the roadmap
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Stage {
    #[serde(default)]
    pub stage: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub actions: Vec<String>,
}

/// Focus areas for a single week
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeekPlan {
    #[serde(default, deserialize_with = "display_u32")]
    pub week: u32,
    #[serde(default)]
    pub focus: Vec<String>,
}

#[derive(Deserialize)]
struct RawRoadmap {
    #[serde(default)]
    role: String,
    #[serde(default)]
    level: String,
    #[serde(default, deserialize_with = "display_u32")]
    duration: u32,
    #[serde(default)]
    stages: Vec<Stage>,
    #[serde(default)]
    weekly_plan: Vec<WeekPlan>,
    #[serde(default)]
    roadmap: Option<RoadmapBody>,
    #[serde(default, alias = "created_at")]
    start_date: Option<String>,
}

#[derive(Deserialize, Default)]
struct RoadmapBody {
    #[serde(default)]
    stages: Vec<Stage>,
    #[serde(default)]
    weekly_plan: Vec<WeekPlan>,
}

impl From<RawRoadmap> for Roadmap {
    fn from(raw: RawRoadmap) -> Self {
        let body = raw.roadmap.unwrap_or_default();
        let stages = if raw.stages.is_empty() {
            body.stages
        } else {
            raw.stages
        };
        let weekly_plan = if raw.weekly_plan.is_empty() {
            body.weekly_plan
        } else {
            raw.weekly_plan
        };

        Self {
            role: raw.role,
            level: raw.level,
            duration: raw.duration,
            stages,
            weekly_plan,
            start_date: raw.start_date.as_deref().and_then(parse_start_date),
        }
    }
}

/// Accepts `2025-09-01` as well as full RFC 3339 timestamps
fn parse_start_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

impl Roadmap {
    /// Sentence shown above the stage list
    pub fn introduction(&self) -> String {
        format!(
            "This is your personalized roadmap for becoming a {}. It is designed for a {} level and spans {} weeks.",
            self.role, self.level, self.duration
        )
    }

    /// Focus areas planned for a given week
    pub fn week(&self, week: u32) -> Option<&WeekPlan> {
        self.weekly_plan.iter().find(|w| w.week == week)
    }
}

/// Experience level offered by the generation form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoadmapLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl RoadmapLevel {
    pub fn all() -> &'static [RoadmapLevel] {
        &[
            RoadmapLevel::Beginner,
            RoadmapLevel::Intermediate,
            RoadmapLevel::Advanced,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RoadmapLevel::Beginner => "beginner",
            RoadmapLevel::Intermediate => "intermediate",
            RoadmapLevel::Advanced => "advanced",
        }
    }

    /// Label for select boxes
    pub fn label(&self) -> &'static str {
        match self {
            RoadmapLevel::Beginner => "Beginner",
            RoadmapLevel::Intermediate => "Intermediate",
            RoadmapLevel::Advanced => "Advanced",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Some(RoadmapLevel::Beginner),
            "intermediate" => Some(RoadmapLevel::Intermediate),
            "advanced" => Some(RoadmapLevel::Advanced),
            _ => None,
        }
    }
}

impl fmt::Display for RoadmapLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

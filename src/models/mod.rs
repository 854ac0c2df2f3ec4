//! Domain models returned by the career-guidance service
//!
//! Everything here is read-only to the client: the remote service creates
//! roadmaps, quizzes and counselling reports, the client only renders them.

pub mod counselling;
pub mod quiz;
pub mod roadmap;
pub mod user;

pub use counselling::{
    CareerPathway, ConcludingSummary, CounsellingReport, ProfileAnalysis, ReportHeader,
    RoleOverview, StrategicGuidance,
};
pub use quiz::{option_index, option_letter, Question, Quiz, QuizResult, MAX_OPTIONS};
pub use roadmap::{Roadmap, RoadmapLevel, Stage, WeekPlan};
pub use user::User;

use serde::{Deserialize, Deserializer};

/// Accepts `12`, `"12"` or `" 12 "` for numeric fields the service echoes
/// back from form input.
pub(crate) fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u64),
        Float(f64),
        Text(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => u32::try_from(n).map_err(serde::de::Error::custom),
        NumberOrString::Float(f) if f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 => {
            Ok(f as u32)
        }
        NumberOrString::Float(f) => Err(serde::de::Error::custom(format!(
            "expected a whole number, got {}",
            f
        ))),
        NumberOrString::Text(s) => s
            .trim()
            .parse::<u32>()
            .map_err(|e| serde::de::Error::custom(format!("invalid number {:?}: {}", s, e))),
    }
}

/// Numbers that are only displayed: `"Week 3"` reads as 3, `"3 months"` as
/// 3, and empty, null or non-numeric values read as 0.
pub(crate) fn display_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Number(u64),
        Float(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    let value = match Option::<Loose>::deserialize(deserializer)? {
        Some(Loose::Number(n)) => u32::try_from(n).unwrap_or(u32::MAX),
        Some(Loose::Float(f)) if f.is_finite() && f >= 0.0 => f.min(u32::MAX as f64) as u32,
        Some(Loose::Text(s)) => first_number(&s).unwrap_or(0),
        Some(Loose::Float(_) | Loose::Other(_)) | None => 0,
    };
    Ok(value)
}

fn first_number(s: &str) -> Option<u32> {
    let digits: String = s
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        #[serde(deserialize_with = "lenient_u32")]
        value: u32,
    }

    #[test]
    fn test_lenient_u32_accepts_numbers_and_strings() {
        let a: Wrapper = serde_json::from_str(r#"{"value": 12}"#).unwrap();
        let b: Wrapper = serde_json::from_str(r#"{"value": " 12 "}"#).unwrap();
        let c: Wrapper = serde_json::from_str(r#"{"value": 12.0}"#).unwrap();
        assert_eq!((a.value, b.value, c.value), (12, 12, 12));
    }

    #[test]
    fn test_lenient_u32_rejects_garbage() {
        assert!(serde_json::from_str::<Wrapper>(r#"{"value": "twelve"}"#).is_err());
        assert!(serde_json::from_str::<Wrapper>(r#"{"value": 1.5}"#).is_err());
    }

    #[derive(Deserialize)]
    struct Shown {
        #[serde(default, deserialize_with = "display_u32")]
        value: u32,
    }

    #[test]
    fn test_display_u32_never_rejects() {
        let read = |json: &str| serde_json::from_str::<Shown>(json).unwrap().value;
        assert_eq!(read(r#"{"value": "Week 3"}"#), 3);
        assert_eq!(read(r#"{"value": "3 months"}"#), 3);
        assert_eq!(read(r#"{"value": ""}"#), 0);
        assert_eq!(read(r#"{"value": null}"#), 0);
        assert_eq!(read(r#"{"value": [1]}"#), 0);
        assert_eq!(read(r#"{}"#), 0);
        assert_eq!(read(r#"{"value": 7}"#), 7);
    }
}

//! Data Transfer Objects
//!
//! Request bodies sent to the career-guidance service and the envelopes its
//! responses arrive in.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{CounsellingReport, Quiz, Roadmap, User};

// ============================================
// AUTH DTOs
// ============================================

/// `POST /users/create`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// `POST /users/login`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response. `user` is optional; some deployments only return a token.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Generic acknowledgement with an optional message
#[derive(Debug, Clone, Deserialize, Default)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

// ============================================
// ROADMAP DTOs
// ============================================

/// `POST /roadmap/generate`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RoadmapRequest {
    pub role: String,
    pub level: String,
    pub skill: String,
    /// Weeks, sent as text like the HTML form does
    pub duration: String,
}

/// `{ "roadmap": ... }`
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RoadmapEnvelope {
    #[serde(default)]
    pub roadmap: Option<Roadmap>,
}

// ============================================
// COUNSELLING DTOs
// ============================================

/// `POST /career/counsel`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CounselRequest {
    pub education: String,
    pub field: String,
    pub skills: String,
    pub intent: String,
}

/// `{ "counseling_report": ... }`
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CounsellingEnvelope {
    #[serde(default, alias = "counselling_report")]
    pub counseling_report: Option<CounsellingReport>,
}

// ============================================
// QUIZ DTOs
// ============================================

/// `POST /quiz/generate`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QuizGenerateRequest {
    pub week: u32,
}

/// `POST /quiz/submit`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QuizSubmission {
    pub week: u32,
    /// Option letter by question index
    pub answers: BTreeMap<usize, String>,
}

/// `{ "quiz": ..., "quizzes": [...] }`
#[derive(Debug, Clone, Deserialize, Default)]
pub struct QuizEnvelope {
    #[serde(default)]
    pub quiz: Option<Quiz>,
    #[serde(default)]
    pub quizzes: Vec<Quiz>,
}

impl QuizEnvelope {
    /// All quizzes in the response, one per week. A top-level `quiz` wins
    /// over a list entry for the same week.
    pub fn into_quizzes(self) -> Vec<Quiz> {
        let mut by_week: BTreeMap<u32, Quiz> = BTreeMap::new();
        for quiz in self.quizzes {
            by_week.insert(quiz.week, quiz);
        }
        if let Some(quiz) = self.quiz {
            by_week.insert(quiz.week, quiz);
        }
        by_week.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_serializes_string_keys() {
        let submission = QuizSubmission {
            week: 3,
            answers: [(0, "A".to_string()), (1, "C".to_string())]
                .into_iter()
                .collect(),
        };
        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"week": 3, "answers": {"0": "A", "1": "C"}})
        );
    }

    #[test]
    fn test_quiz_envelope_merges_by_week() {
        let envelope: QuizEnvelope = serde_json::from_str(
            r#"{
                "quiz": {"week": 2, "questions": [], "submitted": true},
                "quizzes": [
                    {"week": 1, "questions": []},
                    {"week": 2, "questions": []}
                ]
            }"#,
        )
        .unwrap();

        let quizzes = envelope.into_quizzes();
        assert_eq!(quizzes.len(), 2);
        assert_eq!(quizzes[0].week, 1);
        assert!(quizzes[1].submitted);
    }

    #[test]
    fn test_counselling_envelope_alias() {
        let a: CounsellingEnvelope = serde_json::from_str(r#"{"counseling_report": {}}"#).unwrap();
        let b: CounsellingEnvelope = serde_json::from_str(r#"{"counselling_report": {}}"#).unwrap();
        let c: CounsellingEnvelope = serde_json::from_str(r#"{"counseling_report": null}"#).unwrap();
        assert!(a.counseling_report.is_some());
        assert!(b.counseling_report.is_some());
        assert!(c.counseling_report.is_none());
    }
}

//! Career counselling report
//!
//! Opaque to the client beyond rendering. Every field defaults so a partial
//! report still renders.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct CounsellingReport {
    pub report_header: ReportHeader,
    pub profile_analysis: ProfileAnalysis,
    pub strategic_guidance: StrategicGuidance,
    pub detailed_career_pathways: Vec<CareerPathway>,
    pub concluding_summary: ConcludingSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ReportHeader {
    pub title: String,
    pub introduction: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ProfileAnalysis {
    pub education: String,
    pub interest_domain: String,
    pub current_skills: Vec<String>,
    pub stated_goal: String,
    pub key_strengths: Vec<String>,
    pub inferred_challenges: String,
    pub market_alignment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct StrategicGuidance {
    pub situational_overview: String,
    pub clarity_strategy: String,
    pub overarching_recommendation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct CareerPathway {
    pub role: String,
    pub role_overview: RoleOverview,
    pub reality_check: String,
    pub recommended_learning_resources: Vec<String>,
    pub networking_and_branding_tip: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct RoleOverview {
    pub description: String,
    pub day_in_the_life: String,
    pub key_responsibilities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ConcludingSummary {
    pub immediate_actions: Vec<String>,
    pub final_encouragement: String,
}

impl CounsellingReport {
    /// Title used in headings and history lists
    pub fn title(&self) -> &str {
        if self.report_header.title.is_empty() {
            "Career Counselling Report"
        } else {
            &self.report_header.title
        }
    }

    /// Rows of the profile analysis section, in display order
    pub fn profile_rows(&self) -> Vec<(&'static str, String)> {
        let p = &self.profile_analysis;
        vec![
            ("Education", p.education.clone()),
            ("Domain", p.interest_domain.clone()),
            ("Skills", p.current_skills.join(", ")),
            ("Goal", p.stated_goal.clone()),
            ("Strengths", p.key_strengths.join(", ")),
            ("Challenges", p.inferred_challenges.clone()),
            ("Market Alignment", p.market_alignment.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_report_parses() {
        let report: CounsellingReport = serde_json::from_str(
            r#"{
                "report_header": {"title": "Switching to Tech"},
                "profile_analysis": {"current_skills": ["Python", "SQL"]},
                "detailed_career_pathways": [{"role": "Data Analyst"}]
            }"#,
        )
        .unwrap();

        assert_eq!(report.title(), "Switching to Tech");
        assert_eq!(report.detailed_career_pathways[0].role, "Data Analyst");
        assert!(report.concluding_summary.immediate_actions.is_empty());

        let rows = report.profile_rows();
        assert_eq!(rows[2], ("Skills", "Python, SQL".to_string()));
    }

    #[test]
    fn test_untitled_report() {
        assert_eq!(CounsellingReport::default().title(), "Career Counselling Report");
    }
}

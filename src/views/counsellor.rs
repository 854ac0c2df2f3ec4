//! Career counsellor page

use crate::api::{ApiResult, CareerClient, CounselRequest, HttpTransport};
use crate::models::CounsellingReport;
use crate::resource::{Phase, RemoteResource, Settled, Ticket};

use super::{required, FormError, HistoryEntry, HistoryModal, ViewError};

/// Counselling questionnaire
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CounselForm {
    pub education: String,
    pub field: String,
    pub skills: String,
    pub intent: String,
}

impl CounselForm {
    pub fn validate(&self) -> Result<CounselRequest, FormError> {
        Ok(CounselRequest {
            education: required("Education", &self.education)?,
            field: required("Field of interest", &self.field)?,
            skills: required("Current skills", &self.skills)?,
            intent: required("Goal", &self.intent)?,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct CounsellorPage {
    pub resource: RemoteResource<CounsellingReport>,
    pub form: CounselForm,
    pub history: HistoryModal,
    form_error: Option<String>,
}

impl CounsellorPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&self) -> Option<&CounsellingReport> {
        self.resource.value()
    }

    pub fn error(&self) -> Option<&str> {
        self.form_error.as_deref().or(self.resource.error())
    }

    pub fn status_text(&self) -> Option<&'static str> {
        match self.resource.phase() {
            Phase::Loading => Some("Loading your counselling report..."),
            Phase::Submitting => Some("Generating your counselling report..."),
            _ => None,
        }
    }

    pub fn show_form(&self) -> bool {
        self.resource.phase() == Phase::Empty
    }

    pub fn open_history(&mut self) {
        let entries = self.report().map(HistoryEntry::from_report);
        self.history.open_counsellings(entries);
    }

    pub fn begin_counsel(&mut self) -> Result<(Ticket, CounselRequest), ViewError> {
        self.form_error = None;
        let request = self.form.validate().map_err(|e| {
            self.form_error = Some(e.to_string());
            e
        })?;
        let ticket = self.resource.begin_submit()?;
        Ok((ticket, request))
    }

    pub fn finish_counsel(
        &mut self,
        ticket: Ticket,
        result: ApiResult<CounsellingReport>,
    ) -> Settled {
        let settled = self.resource.finish_submit(ticket, result);
        if settled.is_applied() {
            self.form = CounselForm::default();
        }
        settled
    }

    pub async fn load<T: HttpTransport>(&mut self, client: &CareerClient<T>) -> Settled {
        let Ok(ticket) = self.resource.begin_load() else {
            return Settled::Discarded;
        };
        let result = client.fetch_counselling().await;
        self.resource.finish_load(ticket, result)
    }

    pub async fn counsel<T: HttpTransport>(
        &mut self,
        client: &CareerClient<T>,
    ) -> Result<Settled, ViewError> {
        let (ticket, request) = self.begin_counsel()?;
        let result = client.counsel(&request).await;
        Ok(self.finish_counsel(ticket, result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::api::Endpoint;

    const REPORT: &str = r#"{"counseling_report": {
        "report_header": {"title": "Your Path", "introduction": "Hello"},
        "profile_analysis": {"education": "B.Tech", "current_skills": ["Python"]},
        "detailed_career_pathways": [{"role": "Data Analyst"}]
    }}"#;

    fn client() -> (MockTransport, CareerClient<MockTransport>) {
        let mock = MockTransport::new();
        let client = CareerClient::new(mock.clone(), "http://service.test")
            .with_token(Some("tok".into()));
        (mock, client)
    }

    fn filled() -> CounselForm {
        CounselForm {
            education: "B.Tech".into(),
            field: "Software".into(),
            skills: "Python".into(),
            intent: "Stable career".into(),
        }
    }

    #[tokio::test]
    async fn test_existing_report_skips_form() {
        let (mock, client) = client();
        mock.respond(Endpoint::Career, 200, REPORT);

        let mut page = CounsellorPage::new();
        page.load(&client).await;

        assert!(!page.show_form());
        assert_eq!(page.report().unwrap().title(), "Your Path");
        assert_eq!(page.status_text(), None);
    }

    #[tokio::test]
    async fn test_counsel_flow() {
        let (mock, client) = client();
        mock.respond(Endpoint::Career, 200, "{}");
        mock.respond(Endpoint::Counsel, 200, REPORT);

        let mut page = CounsellorPage::new();
        page.load(&client).await;
        assert!(page.show_form());

        page.form = filled();
        let settled = page.counsel(&client).await.unwrap();
        assert!(settled.is_applied());
        assert_eq!(
            page.report().unwrap().detailed_career_pathways[0].role,
            "Data Analyst"
        );
        assert_eq!(page.form, CounselForm::default());

        let request = &mock.requests_to(Endpoint::Counsel)[0];
        assert_eq!(request.header("authorization"), Some("Bearer tok"));
    }

    #[tokio::test]
    async fn test_load_failure_falls_back_to_form() {
        let (_mock, client) = client();

        let mut page = CounsellorPage::new();
        let settled = page.load(&client).await;

        assert!(matches!(settled, Settled::Failed(_)));
        assert!(page.show_form());
        assert!(page.error().unwrap().starts_with("Network error"));
    }

    #[test]
    fn test_history_reflects_current_report() {
        let mut page = CounsellorPage::new();
        page.open_history();
        assert!(page.history.open);
        assert!(page.history.entries.is_empty());
    }

    #[test]
    fn test_required_fields() {
        let mut form = filled();
        form.intent = "  ".into();
        assert_eq!(form.validate(), Err(FormError::MissingField("Goal")));
    }
}

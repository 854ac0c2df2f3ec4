//! Roadmap page: fetch on mount, generation form, detail view

use crate::api::{ApiResult, CareerClient, HttpTransport, RoadmapRequest};
use crate::models::{Roadmap, RoadmapLevel};
use crate::resource::{Phase, RemoteResource, Settled, Ticket};

use super::{required, FormError, HistoryEntry, HistoryModal, ViewError};

/// Generation form inputs, as typed
#[derive(Debug, Clone, PartialEq)]
pub struct RoadmapForm {
    pub role: String,
    pub level: String,
    pub skill: String,
    pub duration: String,
}

impl Default for RoadmapForm {
    fn default() -> Self {
        Self {
            role: String::new(),
            level: RoadmapLevel::Beginner.as_str().to_string(),
            skill: String::new(),
            duration: String::new(),
        }
    }
}

impl RoadmapForm {
    pub fn validate(&self) -> Result<RoadmapRequest, FormError> {
        let role = required("Role", &self.role)?;
        let level = RoadmapLevel::parse(&self.level).ok_or_else(|| FormError::InvalidField {
            field: "Level",
            reason: "choose beginner, intermediate or advanced".to_string(),
        })?;
        let skill = required("Current skills", &self.skill)?;
        let duration = required("Duration", &self.duration)?;
        match duration.parse::<u32>() {
            Ok(weeks) if weeks > 0 => Ok(RoadmapRequest {
                role,
                level: level.as_str().to_string(),
                skill,
                duration: weeks.to_string(),
            }),
            _ => Err(FormError::InvalidField {
                field: "Duration",
                reason: "enter a number of weeks greater than zero".to_string(),
            }),
        }
    }
}

/// Roadmap page state
#[derive(Debug, Clone, Default)]
pub struct RoadmapPage {
    pub resource: RemoteResource<Roadmap>,
    pub form: RoadmapForm,
    pub history: HistoryModal,
    form_error: Option<String>,
}

impl RoadmapPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn roadmap(&self) -> Option<&Roadmap> {
        self.resource.value()
    }

    /// Inline error: form validation first, then the last request failure
    pub fn error(&self) -> Option<&str> {
        self.form_error.as_deref().or(self.resource.error())
    }

    /// Text for the spinner, `None` when nothing is in flight
    pub fn status_text(&self) -> Option<&'static str> {
        match self.resource.phase() {
            Phase::Loading => Some("Loading roadmap..."),
            Phase::Submitting => Some("Generating your roadmap..."),
            _ => None,
        }
    }

    pub fn show_form(&self) -> bool {
        self.resource.phase() == Phase::Empty
    }

    pub fn open_history(&mut self) {
        let entries = self.roadmap().map(HistoryEntry::from_roadmap);
        self.history.open_roadmaps(entries);
    }

    pub fn begin_generate(&mut self) -> Result<(Ticket, RoadmapRequest), ViewError> {
        self.form_error = None;
        let request = self.form.validate().map_err(|e| {
            self.form_error = Some(e.to_string());
            e
        })?;
        let ticket = self.resource.begin_submit()?;
        Ok((ticket, request))
    }

    pub fn finish_generate(&mut self, ticket: Ticket, result: ApiResult<Roadmap>) -> Settled {
        let settled = self.resource.finish_submit(ticket, result);
        if settled.is_applied() {
            self.form = RoadmapForm::default();
        }
        settled
    }

    /// Fetch the existing roadmap
    pub async fn load<T: HttpTransport>(&mut self, client: &CareerClient<T>) -> Settled {
        let Ok(ticket) = self.resource.begin_load() else {
            return Settled::Discarded;
        };
        let result = client.fetch_roadmap().await;
        self.resource.finish_load(ticket, result)
    }

    /// Submit the form and show the generated roadmap
    pub async fn generate<T: HttpTransport>(
        &mut self,
        client: &CareerClient<T>,
    ) -> Result<Settled, ViewError> {
        let (ticket, request) = self.begin_generate()?;
        let result = client.generate_roadmap(&request).await;
        Ok(self.finish_generate(ticket, result))
    }
}

//! History modal

use crate::models::{CounsellingReport, Roadmap};

pub const EMPTY_HISTORY: &str = "No history available yet.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryKind {
    #[default]
    Roadmap,
    Counselling,
}

impl HistoryKind {
    pub fn title(&self) -> &'static str {
        match self {
            HistoryKind::Roadmap => "Previous Roadmaps",
            HistoryKind::Counselling => "Career Counsellings",
        }
    }
}

/// One row of the history list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub title: String,
    pub date: Option<String>,
}

impl HistoryEntry {
    pub fn from_roadmap(roadmap: &Roadmap) -> Self {
        let title = if roadmap.role.is_empty() {
            "Roadmap".to_string()
        } else {
            format!("{} Roadmap", roadmap.role)
        };
        Self {
            title,
            date: roadmap.start_date.map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }

    pub fn from_report(report: &CounsellingReport) -> Self {
        Self {
            title: report.title().to_string(),
            date: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryModal {
    pub open: bool,
    pub kind: HistoryKind,
    pub entries: Vec<HistoryEntry>,
}

impl HistoryModal {
    pub fn open_roadmaps(&mut self, entries: impl IntoIterator<Item = HistoryEntry>) {
        self.open_with(HistoryKind::Roadmap, entries);
    }

    pub fn open_counsellings(&mut self, entries: impl IntoIterator<Item = HistoryEntry>) {
        self.open_with(HistoryKind::Counselling, entries);
    }

    fn open_with(&mut self, kind: HistoryKind, entries: impl IntoIterator<Item = HistoryEntry>) {
        self.kind = kind;
        self.entries = entries.into_iter().collect();
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn title(&self) -> &'static str {
        self.kind.title()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Weekly quiz page
//!
//! Quizzes are kept per week in a [`QuizBook`]. The page works on the
//! current week, computed from the roadmap start date, and generates that
//! week's quiz automatically when the service has none.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::api::{ApiResult, CareerClient, HttpTransport, QuizSubmission};
use crate::models::{option_index, option_letter, Quiz, QuizResult};
use crate::resource::{Phase, RemoteResource, ResourceError, Settled, Ticket};

use super::{FormError, ViewError};

/// Week 1 starts here when the roadmap does not say otherwise
pub const DEFAULT_QUIZ_START: &str = "2025-09-01";

pub fn default_quiz_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 1).unwrap_or_default()
}

/// `floor(days / 7) + 1`, never below week 1
pub fn week_number(start: NaiveDate, today: NaiveDate) -> u32 {
    let days = (today - start).num_days();
    if days < 0 {
        return 1;
    }
    u32::try_from(days / 7 + 1).unwrap_or(u32::MAX)
}

/// Options picked so far, as letters keyed by question index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizAttempt {
    answers: BTreeMap<usize, String>,
}

impl QuizAttempt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options without a letter are ignored
    pub fn select(&mut self, question: usize, option: usize) {
        if let Some(letter) = option_letter(option) {
            self.answers.insert(question, letter.to_string());
        }
    }

    /// Option index picked for a question
    pub fn selected(&self, question: usize) -> Option<usize> {
        self.answers.get(&question).and_then(|l| option_index(l))
    }

    pub fn answered(&self) -> usize {
        self.answers.len()
    }

    /// Every index in `0..total` has an answer
    pub fn is_complete(&self, total: usize) -> bool {
        total > 0 && self.answers.len() == total && (0..total).all(|i| self.answers.contains_key(&i))
    }

    pub fn answers(&self) -> &BTreeMap<usize, String> {
        &self.answers
    }
}

/// A week's quiz with the local answers
#[derive(Debug, Clone, PartialEq)]
pub struct WeekEntry {
    pub quiz: Quiz,
    pub attempt: QuizAttempt,
}

impl WeekEntry {
    fn new(quiz: Quiz) -> Self {
        let attempt = QuizAttempt {
            answers: quiz.answers.clone().unwrap_or_default(),
        };
        Self { quiz, attempt }
    }

    pub fn can_submit(&self) -> bool {
        !self.quiz.is_submitted() && self.attempt.is_complete(self.quiz.total())
    }

    /// Pick an option. Submitted quizzes and out-of-range picks are refused.
    pub fn select(&mut self, question: usize, option: usize) -> Result<(), ViewError> {
        if self.quiz.is_submitted() {
            return Err(ResourceError::AlreadySubmitted.into());
        }
        let options = self
            .quiz
            .questions
            .get(question)
            .map(|q| q.options.len())
            .ok_or_else(|| FormError::InvalidField {
                field: "Question",
                reason: format!(
                    "question {} does not exist (quiz has {})",
                    question + 1,
                    self.quiz.total()
                ),
            })?;
        if option >= options || option_letter(option).is_none() {
            let shown = option_letter(option).map_or_else(|| (option + 1).to_string(), String::from);
            return Err(FormError::InvalidField {
                field: "Answer",
                reason: format!("question {} has no option {}", question + 1, shown),
            }
            .into());
        }
        self.attempt.select(question, option);
        Ok(())
    }

    pub fn submission(&self) -> Result<QuizSubmission, ResourceError> {
        if self.quiz.is_submitted() {
            return Err(ResourceError::AlreadySubmitted);
        }
        let total = self.quiz.total();
        if !self.attempt.is_complete(total) {
            return Err(ResourceError::Incomplete {
                answered: self.attempt.answered(),
                total,
            });
        }
        Ok(QuizSubmission {
            week: self.quiz.week,
            answers: self.attempt.answers.clone(),
        })
    }
}

/// Quiz state for every week the client knows about
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuizBook {
    weeks: BTreeMap<u32, WeekEntry>,
}

impl QuizBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_quizzes(quizzes: impl IntoIterator<Item = Quiz>) -> Self {
        let mut book = Self::new();
        for quiz in quizzes {
            book.insert(quiz);
        }
        book
    }

    /// Add or replace a week's quiz, resetting its local answers
    pub fn insert(&mut self, quiz: Quiz) {
        self.weeks.insert(quiz.week, WeekEntry::new(quiz));
    }

    pub fn get(&self, week: u32) -> Option<&WeekEntry> {
        self.weeks.get(&week)
    }

    pub fn get_mut(&mut self, week: u32) -> Option<&mut WeekEntry> {
        self.weeks.get_mut(&week)
    }

    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    /// Store a scored submission. Only the submitted week changes.
    pub fn apply_result(&mut self, submission: QuizSubmission, result: &QuizResult) {
        if let Some(entry) = self.weeks.get_mut(&submission.week) {
            entry.attempt.answers = submission.answers.clone();
            entry.quiz.apply_result(submission.answers, result);
        }
    }
}

/// Quiz page state
#[derive(Debug, Clone)]
pub struct QuizPage {
    pub book: RemoteResource<QuizBook>,
    week: u32,
    start: NaiveDate,
}

impl QuizPage {
    pub fn new(start: NaiveDate, today: NaiveDate) -> Self {
        Self {
            book: RemoteResource::new(),
            week: week_number(start, today),
            start,
        }
    }

    /// Re-anchor week numbering on the roadmap's start date
    pub fn anchor(&mut self, start: Option<NaiveDate>, today: NaiveDate) {
        if let Some(start) = start {
            self.start = start;
        }
        self.week = week_number(self.start, today);
    }

    pub fn week(&self) -> u32 {
        self.week
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn current(&self) -> Option<&WeekEntry> {
        self.book.value().and_then(|b| b.get(self.week))
    }

    pub fn title(&self) -> String {
        format!("Weekly Quiz – Week {}", self.week)
    }

    pub fn status_text(&self) -> Option<&'static str> {
        match self.book.phase() {
            Phase::Loading => Some("Loading..."),
            Phase::Submitting if self.current().is_none() => Some("Generating your quiz..."),
            Phase::Submitting => Some("Submitting your quiz..."),
            _ => None,
        }
    }

    /// Fetched, but this week's quiz does not exist yet
    pub fn needs_generation(&self) -> bool {
        matches!(self.book.phase(), Phase::Empty | Phase::Populated) && self.current().is_none()
    }

    pub fn can_submit(&self) -> bool {
        !self.book.is_submitting() && self.current().is_some_and(WeekEntry::can_submit)
    }

    pub fn select(&mut self, question: usize, option: usize) -> Result<(), ViewError> {
        if self.book.is_submitting() {
            return Err(ResourceError::AlreadySubmitting.into());
        }
        let week = self.week;
        self.book
            .value_mut()
            .and_then(|b| b.get_mut(week))
            .ok_or(ResourceError::NotReady)?
            .select(question, option)
    }

    pub fn finish_load(&mut self, ticket: Ticket, result: ApiResult<Vec<Quiz>>) -> Settled {
        let week = self.week;
        let result = result.map(|quizzes| {
            let (unnumbered, numbered): (Vec<Quiz>, Vec<Quiz>) =
                quizzes.into_iter().partition(|q| q.week == 0);
            let mut book = QuizBook::from_quizzes(numbered);
            // A quiz without a week number belongs to the current week
            for mut quiz in unnumbered {
                if book.get(week).is_none() {
                    quiz.week = week;
                    book.insert(quiz);
                }
            }
            (!book.is_empty()).then_some(book)
        });
        self.book.finish_load(ticket, result)
    }

    pub fn begin_generate(&mut self) -> Result<(Ticket, u32), ViewError> {
        let ticket = self.book.begin_submit()?;
        Ok((ticket, self.week))
    }

    pub fn finish_generate(&mut self, ticket: Ticket, result: ApiResult<Quiz>) -> Settled {
        let week = self.week;
        self.book.finish_submit_with(ticket, result, |slot, mut quiz| {
            if quiz.week == 0 {
                quiz.week = week;
            }
            slot.get_or_insert_with(QuizBook::new).insert(quiz);
        })
    }

    pub fn begin_submit(&mut self) -> Result<(Ticket, QuizSubmission), ViewError> {
        let submission = self
            .current()
            .ok_or(ResourceError::NotReady)?
            .submission()?;
        let ticket = self.book.begin_submit()?;
        Ok((ticket, submission))
    }

    pub fn finish_submit(
        &mut self,
        ticket: Ticket,
        submission: QuizSubmission,
        result: ApiResult<QuizResult>,
    ) -> Settled {
        self.book.finish_submit_with(ticket, result, |slot, result| {
            if let Some(book) = slot {
                book.apply_result(submission, &result);
            }
        })
    }

    /// Fetch quizzes and generate this week's when missing
    pub async fn load<T: HttpTransport>(&mut self, client: &CareerClient<T>) -> Settled {
        let Ok(ticket) = self.book.begin_load() else {
            return Settled::Discarded;
        };
        let result = client.fetch_quizzes().await;
        let settled = self.finish_load(ticket, result);
        if !settled.is_applied() || !self.needs_generation() {
            return settled;
        }
        self.generate(client).await.unwrap_or(Settled::Discarded)
    }

    pub async fn generate<T: HttpTransport>(
        &mut self,
        client: &CareerClient<T>,
    ) -> Result<Settled, ViewError> {
        let (ticket, week) = self.begin_generate()?;
        tracing::info!(week, "Generating quiz");
        let result = client.generate_quiz(week).await;
        Ok(self.finish_generate(ticket, result))
    }

    pub async fn submit<T: HttpTransport>(
        &mut self,
        client: &CareerClient<T>,
    ) -> Result<Settled, ViewError> {
        let (ticket, submission) = self.begin_submit()?;
        let result = client.submit_quiz(&submission).await;
        Ok(self.finish_submit(ticket, submission, result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::api::Endpoint;
    use crate::models::Question;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn quiz(week: u32, questions: usize) -> Quiz {
        let questions = (0..questions)
            .map(|i| Question {
                question: format!("Question {}", i + 1),
                options: vec!["one".into(), "two".into(), "three".into()],
                answer: None,
            })
            .collect();
        Quiz::new(week, questions)
    }

    fn quiz_json(week: u32) -> String {
        serde_json::json!({
            "quiz": {
                "week": week,
                "questions": [
                    {"question": "2 + 2?", "options": ["3", "4"]},
                    {"question": "HTML stands for?", "options": ["HyperText Markup Language", "Home Tool"]}
                ]
            }
        })
        .to_string()
    }

    fn client() -> (MockTransport, CareerClient<MockTransport>) {
        let mock = MockTransport::new();
        let client = CareerClient::new(mock.clone(), "http://service.test")
            .with_token(Some("tok".into()));
        (mock, client)
    }

    #[test]
    fn test_week_number() {
        let start = date(2025, 9, 1);
        assert_eq!(week_number(start, start), 1);
        assert_eq!(week_number(start, date(2025, 9, 7)), 1);
        assert_eq!(week_number(start, date(2025, 9, 8)), 2);
        assert_eq!(week_number(start, date(2025, 10, 13)), 7);
        assert_eq!(week_number(start, date(2025, 8, 1)), 1);
        assert_eq!(default_quiz_start().to_string(), DEFAULT_QUIZ_START);
    }

    #[test]
    fn test_submission_needs_every_index() {
        let mut entry = WeekEntry::new(quiz(1, 3));
        entry.select(0, 1).unwrap();
        entry.select(2, 0).unwrap();
        assert!(!entry.can_submit());
        assert_eq!(
            entry.submission(),
            Err(ResourceError::Incomplete { answered: 2, total: 3 })
        );

        // out-of-range picks are refused and leave the attempt alone
        assert!(matches!(
            entry.select(5, 0),
            Err(ViewError::Form(FormError::InvalidField { field: "Question", .. }))
        ));
        let err = entry.select(1, 9).unwrap_err();
        assert_eq!(err.to_string(), "Answer: question 2 has no option J");
        assert_eq!(entry.attempt.answered(), 2);

        entry.select(1, 2).unwrap();
        assert!(entry.can_submit());
        let submission = entry.submission().unwrap();
        assert_eq!(submission.answers.get(&0).map(String::as_str), Some("B"));
        assert_eq!(submission.answers.get(&1).map(String::as_str), Some("C"));
        assert_eq!(entry.attempt.selected(2), Some(0));
    }

    #[test]
    fn test_reselecting_replaces_answer() {
        let mut attempt = QuizAttempt::new();
        attempt.select(0, 0);
        attempt.select(0, 3);
        assert_eq!(attempt.answered(), 1);
        assert_eq!(attempt.selected(0), Some(3));
        assert!(attempt.is_complete(1));
        assert!(!QuizAttempt::new().is_complete(0));

        attempt.select(1, 40);
        assert_eq!(attempt.answered(), 1);
    }

    #[test]
    fn test_options_past_z_are_refused() {
        let mut long = quiz(1, 1);
        long.questions[0].options = (0..30).map(|i| format!("option {}", i)).collect();
        let mut entry = WeekEntry::new(long);

        entry.select(0, 25).unwrap();
        assert_eq!(entry.attempt.selected(0), Some(25));
        let err = entry.select(0, 27).unwrap_err();
        assert_eq!(err.to_string(), "Answer: question 1 has no option 28");
        assert_eq!(entry.attempt.selected(0), Some(25));
    }

    #[test]
    fn test_apply_result_touches_only_its_week() {
        let mut book = QuizBook::from_quizzes([quiz(1, 2), quiz(2, 2), quiz(3, 2)]);
        book.get_mut(1).unwrap().select(0, 0).unwrap();
        for (q, o) in [(0, 1), (1, 0)] {
            book.get_mut(2).unwrap().select(q, o).unwrap();
        }
        book.get_mut(3).unwrap().select(1, 1).unwrap();
        let before_1 = book.get(1).cloned();
        let before_3 = book.get(3).cloned();

        let submission = book.get(2).unwrap().submission().unwrap();
        let result = QuizResult {
            score: 1,
            total: Some(2),
            correct_answers: BTreeMap::from([(0, "B".to_string()), (1, "B".to_string())]),
        };
        book.apply_result(submission, &result);

        assert_eq!(book.get(1).cloned(), before_1);
        assert_eq!(book.get(3).cloned(), before_3);
        let week_2 = book.get(2).unwrap();
        assert!(week_2.quiz.is_submitted());
        assert_eq!(week_2.quiz.score, Some(1));
        assert_eq!(week_2.quiz.questions[1].correct_letter(), Some('B'));
        assert_eq!(
            book.get_mut(2).unwrap().select(0, 0),
            Err(ViewError::Resource(ResourceError::AlreadySubmitted))
        );
    }

    #[tokio::test]
    async fn test_missing_week_is_generated() {
        let (mock, client) = client();
        mock.respond(Endpoint::Quizzes, 200, r#"{"quizzes": []}"#);
        mock.respond(Endpoint::GenerateQuiz, 200, &quiz_json(3));

        let mut page = QuizPage::new(date(2025, 9, 1), date(2025, 9, 16));
        assert_eq!(page.week(), 3);
        page.load(&client).await;

        let current = page.current().unwrap();
        assert_eq!(current.quiz.week, 3);
        assert_eq!(current.quiz.total(), 2);
        assert_eq!(page.book.phase(), Phase::Populated);

        let body = mock.requests_to(Endpoint::GenerateQuiz)[0].body.clone().unwrap();
        assert_eq!(body, r#"{"week":3}"#);
    }

    #[tokio::test]
    async fn test_existing_week_is_not_regenerated() {
        let (mock, client) = client();
        mock.respond(Endpoint::Quizzes, 200, &quiz_json(1));

        let mut page = QuizPage::new(date(2025, 9, 1), date(2025, 9, 2));
        page.load(&client).await;

        assert!(page.current().is_some());
        assert!(mock.requests_to(Endpoint::GenerateQuiz).is_empty());
    }

    #[tokio::test]
    async fn test_unnumbered_quiz_is_current_week() {
        let (mock, client) = client();
        mock.respond(
            Endpoint::Quizzes,
            200,
            r#"{"quiz": {"questions": [{"question": "2 + 2?", "options": ["3", "4"]}]}}"#,
        );

        let mut page = QuizPage::new(date(2025, 9, 1), date(2025, 9, 16));
        page.load(&client).await;

        let current = page.current().unwrap();
        assert_eq!(current.quiz.week, 3);
        assert_eq!(current.quiz.total(), 1);
        assert!(!page.needs_generation());
        assert!(mock.requests_to(Endpoint::GenerateQuiz).is_empty());
    }

    #[test]
    fn test_unnumbered_quiz_does_not_replace_numbered_week() {
        let mut page = QuizPage::new(date(2025, 9, 1), date(2025, 9, 2));
        let ticket = page.book.begin_load().unwrap();
        page.finish_load(ticket, Ok(vec![quiz(0, 4), quiz(1, 2)]));

        assert_eq!(page.current().unwrap().quiz.total(), 2);
        assert_eq!(page.book.value().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_reveals_score() {
        let (mock, client) = client();
        mock.respond(Endpoint::Quizzes, 200, &quiz_json(1));
        mock.respond(
            Endpoint::SubmitQuiz,
            200,
            r#"{"score": 2, "total": 2, "correct_answers": {"0": "B", "1": "A"}}"#,
        );

        let mut page = QuizPage::new(date(2025, 9, 1), date(2025, 9, 1));
        page.load(&client).await;
        assert!(!page.can_submit());

        page.select(0, 1).unwrap();
        assert!(!page.can_submit());
        page.select(1, 0).unwrap();
        assert!(page.can_submit());

        let settled = page.submit(&client).await.unwrap();
        assert!(settled.is_applied());

        let current = page.current().unwrap();
        assert_eq!(current.quiz.score, Some(2));
        assert!(!page.can_submit());

        let body: serde_json::Value = serde_json::from_str(
            mock.requests_to(Endpoint::SubmitQuiz)[0].body.as_deref().unwrap(),
        )
        .unwrap();
        assert_eq!(body["week"], 1);
        assert_eq!(body["answers"]["0"], "B");
        assert_eq!(body["answers"]["1"], "A");
    }

    #[tokio::test]
    async fn test_failed_submit_keeps_answers() {
        let (mock, client) = client();
        mock.respond(Endpoint::Quizzes, 200, &quiz_json(1));
        mock.respond(Endpoint::SubmitQuiz, 500, "");

        let mut page = QuizPage::new(date(2025, 9, 1), date(2025, 9, 1));
        page.load(&client).await;
        page.select(0, 0).unwrap();
        page.select(1, 1).unwrap();

        let settled = page.submit(&client).await.unwrap();
        assert_eq!(settled, Settled::Failed("Something went wrong".into()));
        assert!(page.can_submit());
        assert_eq!(page.current().unwrap().attempt.answered(), 2);
    }

    #[test]
    fn test_incomplete_submit_rejected_before_request() {
        let mut page = QuizPage::new(date(2025, 9, 1), date(2025, 9, 1));
        let ticket = page.book.begin_load().unwrap();
        page.finish_load(ticket, Ok(vec![quiz(1, 2)]));

        page.select(0, 0).unwrap();
        assert_eq!(
            page.begin_submit().unwrap_err(),
            ViewError::Resource(ResourceError::Incomplete { answered: 1, total: 2 })
        );
        assert!(!page.book.is_submitting());
    }

    #[test]
    fn test_status_text() {
        let mut page = QuizPage::new(date(2025, 9, 1), date(2025, 9, 1));
        assert_eq!(page.status_text(), Some("Loading..."));

        let ticket = page.book.begin_load().unwrap();
        page.finish_load(ticket, Ok(Vec::new()));
        assert_eq!(page.book.phase(), Phase::Empty);
        assert!(page.needs_generation());

        page.begin_generate().unwrap();
        assert_eq!(page.status_text(), Some("Generating your quiz..."));
        assert_eq!(page.title(), "Weekly Quiz – Week 1");
    }

    #[test]
    fn test_anchor_uses_roadmap_start() {
        let mut page = QuizPage::new(default_quiz_start(), date(2025, 10, 1));
        assert_eq!(page.week(), 5);
        page.anchor(Some(date(2025, 9, 24)), date(2025, 10, 1));
        assert_eq!(page.week(), 2);
        page.anchor(None, date(2025, 10, 8));
        assert_eq!(page.week(), 3);
    }

    #[test]
    fn test_late_generation_discarded_after_dispose() {
        let mut page = QuizPage::new(date(2025, 9, 1), date(2025, 9, 1));
        let ticket = page.book.begin_load().unwrap();
        page.finish_load(ticket, Ok(Vec::new()));

        let (ticket, _) = page.begin_generate().unwrap();
        page.book.dispose();
        assert_eq!(page.finish_generate(ticket, Ok(quiz(1, 1))), Settled::Discarded);
        assert!(page.current().is_none());
    }
}

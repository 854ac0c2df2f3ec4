//! Weekly Quiz Page
//!
//! Loads every quiz the service holds and shows the current week's,
//! generating it first when it does not exist yet. Once submitted the quiz
//! turns read-only and reveals the score and the answer key.

use birjuram::models::{option_letter, Question};
use birjuram::views::{default_quiz_start, QuizPage, WeekEntry};
use birjuram::Phase;
use leptos::*;

use super::log_failure;
use crate::components::{Loading, SignInPrompt};
use crate::state::use_app_state;

#[component]
pub fn QuizView() -> impl IntoView {
    let state = use_app_state();

    view! {
        <Show
            when=move || state.is_signed_in()
            fallback=|| view! { <SignInPrompt what="weekly quiz" /> }
        >
            <QuizScreen />
        </Show>
    }
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

#[component]
fn QuizScreen() -> impl IntoView {
    let state = use_app_state();
    let page = create_rw_signal(QuizPage::new(default_quiz_start(), today()));

    create_effect(move |_| {
        let Some(Ok(ticket)) = page.try_update(|p| p.book.begin_load()) else {
            return;
        };
        let client = state.client();
        spawn_local(async move {
            // Weeks count from the roadmap's start date when there is one
            if let Ok(Some(roadmap)) = client.fetch_roadmap().await {
                page.try_update(|p| p.anchor(roadmap.start_date, today()));
            }

            let result = client.fetch_quizzes().await;
            let settled = page.try_update(|p| p.finish_load(ticket, result));
            log_failure("load quizzes", settled.as_ref());
            if !settled.is_some_and(|s| s.is_applied()) {
                return;
            }

            let started = page.try_update(|p| {
                if p.needs_generation() {
                    p.begin_generate().ok()
                } else {
                    None
                }
            });
            let Some(Some((ticket, week))) = started else {
                return;
            };
            let result = client.generate_quiz(week).await;
            let settled = page.try_update(|p| p.finish_generate(ticket, result));
            log_failure("generate quiz", settled.as_ref());
        });
    });
    on_cleanup(move || {
        page.try_update_untracked(|p| p.book.dispose());
    });

    let on_submit = move |_: ev::MouseEvent| {
        let Some(Ok((ticket, submission))) = page.try_update(QuizPage::begin_submit) else {
            return;
        };
        let client = state.client();
        spawn_local(async move {
            let result = client.submit_quiz(&submission).await;
            let settled = page.try_update(|p| p.finish_submit(ticket, submission, result));
            log_failure("submit quiz", settled.as_ref());
            if settled.is_some_and(|s| s.is_applied()) {
                state.show_success("Quiz submitted");
            }
        });
    };

    let phase = create_memo(move |_| page.with(|p| p.book.phase()));
    let status = create_memo(move |_| page.with(QuizPage::status_text));
    let title = create_memo(move |_| page.with(QuizPage::title));
    let entry = create_memo(move |_| page.with(|p| p.current().cloned()));
    let can_submit = create_memo(move |_| page.with(QuizPage::can_submit));
    let error = create_memo(move |_| page.with(|p| p.book.error().map(String::from)));

    view! {
        {move || match (phase.get(), entry.get()) {
            (Phase::Loading | Phase::Submitting, _) => view! {
                <Loading message=status.get().unwrap_or_default().to_string() />
            }.into_view(),
            (_, None) => view! {
                <div class="flex flex-col items-center justify-center min-h-[60vh] text-center px-6">
                    <h2 class="text-2xl font-bold text-gray-800 mb-2">{title.get()}</h2>
                    <p class="text-gray-600">"No quiz available for this week."</p>
                </div>
            }.into_view(),
            (_, Some(entry)) => view! {
                <div class="flex justify-center px-6 py-10">
                    <div class="bg-white/80 backdrop-blur-md rounded-2xl shadow-lg p-8 w-full max-w-3xl space-y-6">
                        <h2 class="text-3xl font-bold text-blue-600">{title.get()}</h2>
                        <ScoreBanner entry=entry.clone() />
                        {entry
                            .quiz
                            .questions
                            .iter()
                            .enumerate()
                            .map(|(index, question)| view! {
                                <QuestionCard
                                    index=index
                                    question=question.clone()
                                    selected=entry.attempt.selected(index)
                                    locked=entry.quiz.is_submitted()
                                    on_select=move |option| {
                                        page.update(|p| {
                                            if let Err(e) = p.select(index, option) {
                                                web_sys::console::warn_1(&e.to_string().into());
                                            }
                                        })
                                    }
                                />
                            })
                            .collect_view()}
                        <Show when=move || can_submit.get()>
                            <button
                                on:click=on_submit
                                class="w-full bg-blue-600 hover:bg-blue-700 text-white py-3 rounded-xl font-semibold transition"
                            >
                                "Submit Quiz"
                            </button>
                        </Show>
                    </div>
                </div>
            }.into_view(),
        }}

        {move || error.get().map(|e| view! {
            <p class="text-center text-sm text-red-600 mt-4">{e}</p>
        })}
    }
}

#[component]
fn ScoreBanner(entry: WeekEntry) -> impl IntoView {
    let quiz = entry.quiz;
    quiz.score.map(|score| {
        view! {
            <div class="p-4 bg-green-50 border border-green-200 rounded-xl text-green-800 font-semibold">
                {format!("Score: {} / {}", score, quiz.total())}
            </div>
        }
    })
}

#[component]
fn QuestionCard<F>(
    index: usize,
    question: Question,
    selected: Option<usize>,
    locked: bool,
    on_select: F,
) -> impl IntoView
where
    F: Fn(usize) + Copy + 'static,
{
    let correct = question.correct_letter().filter(|_| locked);
    let name = format!("question-{}", index);

    let options = question
        .options
        .iter()
        .enumerate()
        .filter_map(|(option, text)| option_letter(option).map(|letter| (option, letter, text)))
        .map(|(option, letter, text)| {
            let picked = selected == Some(option);
            let class = match (correct, picked) {
                (Some(c), _) if c == letter => "border-green-500 bg-green-50",
                (Some(_), true) => "border-red-400 bg-red-50",
                (_, true) => "border-blue-500 bg-blue-50",
                _ => "border-gray-200",
            };
            view! {
                <label class=format!("flex items-center gap-3 p-3 border rounded-lg cursor-pointer {}", class)>
                    <input
                        type="radio"
                        name=name.clone()
                        checked=picked
                        disabled=locked
                        on:change=move |_| on_select(option)
                    />
                    <span class="font-medium text-gray-800">{format!("{}.", letter)}</span>
                    <span class="text-gray-700">{text.clone()}</span>
                </label>
            }
        })
        .collect_view();

    view! {
        <div class="space-y-2">
            <p class="font-semibold text-gray-800">{format!("{}. {}", index + 1, question.question)}</p>
            <div class="space-y-2">{options}</div>
            {correct.map(|c| view! {
                <p class="text-sm text-green-700">{format!("Correct answer: {}", c)}</p>
            })}
        </div>
    }
}

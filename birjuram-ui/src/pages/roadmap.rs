//! Roadmap Page
//!
//! Fetches the user's roadmap on mount. Without one, shows the generation
//! form; with one, shows the stages and the weekly plan.

use birjuram::models::{Roadmap, RoadmapLevel};
use birjuram::views::{RoadmapForm, RoadmapPage};
use birjuram::Phase;
use leptos::*;

use super::log_failure;
use crate::components::{HistoryModalView, Loading, SignInPrompt};
use crate::state::use_app_state;

#[component]
pub fn RoadmapView() -> impl IntoView {
    let state = use_app_state();

    view! {
        <Show
            when=move || state.is_signed_in()
            fallback=|| view! { <SignInPrompt what="roadmap" /> }
        >
            <RoadmapScreen />
        </Show>
    }
}

#[component]
fn RoadmapScreen() -> impl IntoView {
    let state = use_app_state();
    let page = create_rw_signal(RoadmapPage::new());
    let form = create_rw_signal(RoadmapForm::default());

    create_effect(move |_| {
        let Some(Ok(ticket)) = page.try_update(|p| p.resource.begin_load()) else {
            return;
        };
        let client = state.client();
        spawn_local(async move {
            let result = client.fetch_roadmap().await;
            let settled = page.try_update(|p| p.resource.finish_load(ticket, result));
            log_failure("load roadmap", settled.as_ref());
        });
    });
    on_cleanup(move || {
        page.try_update_untracked(|p| p.resource.dispose());
    });

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let started = page.try_update(|p| {
            p.form = form.get_untracked();
            p.begin_generate()
        });
        let Some(Ok((ticket, request))) = started else {
            return;
        };

        let client = state.client();
        spawn_local(async move {
            let result = client.generate_roadmap(&request).await;
            let settled = page.try_update(|p| p.finish_generate(ticket, result));
            log_failure("generate roadmap", settled.as_ref());
            if settled.is_some_and(|s| s.is_applied()) {
                form.set(RoadmapForm::default());
                state.show_success("Roadmap generated");
            }
        });
    };

    let phase = create_memo(move |_| page.with(|p| p.resource.phase()));
    let status = create_memo(move |_| page.with(RoadmapPage::status_text));
    let roadmap = create_memo(move |_| page.with(|p| p.roadmap().cloned()));
    let error = create_memo(move |_| page.with(|p| p.error().map(String::from)));
    let history = Signal::derive(move || page.with(|p| p.history.clone()));

    view! {
        {move || match (phase.get(), roadmap.get()) {
            (Phase::Loading | Phase::Submitting, _) => view! {
                <Loading message=status.get().unwrap_or_default().to_string() />
            }.into_view(),
            (_, Some(roadmap)) => view! {
                <RoadmapDetail roadmap=roadmap on_history=move || page.update(RoadmapPage::open_history) />
            }.into_view(),
            (_, None) => view! {
                <RoadmapFormView form=form error=error on_submit=on_submit />
            }.into_view(),
        }}

        <HistoryModalView
            modal=history
            on_close=move |_| page.update(|p| p.history.close())
        />
    }
}

#[component]
fn RoadmapFormView<F>(
    form: RwSignal<RoadmapForm>,
    #[prop(into)] error: Signal<Option<String>>,
    on_submit: F,
) -> impl IntoView
where
    F: Fn(ev::SubmitEvent) + 'static,
{
    let input_class = "w-full px-4 py-2 border rounded-lg focus:ring-2 focus:ring-blue-500 outline-none text-gray-800 placeholder-gray-500";

    view! {
        <div class="flex justify-center px-6 py-10">
            <form on:submit=on_submit class="bg-white/80 backdrop-blur-md rounded-2xl shadow-lg p-8 w-full max-w-lg space-y-5">
                <h2 class="text-3xl font-bold text-center text-blue-600">"Generate Your Roadmap"</h2>

                <div>
                    <label class="block text-gray-700 font-medium mb-1">"Target Role"</label>
                    <input
                        type="text"
                        required
                        placeholder="e.g., Frontend Developer"
                        prop:value=move || form.with(|f| f.role.clone())
                        on:input=move |ev| form.update(|f| f.role = event_target_value(&ev))
                        class=input_class
                    />
                </div>

                <div>
                    <label class="block text-gray-700 font-medium mb-1">"Experience Level"</label>
                    <select
                        required
                        prop:value=move || form.with(|f| f.level.clone())
                        on:change=move |ev| form.update(|f| f.level = event_target_value(&ev))
                        class=input_class
                    >
                        {RoadmapLevel::all().iter().map(|level| view! {
                            <option value=level.as_str()>{level.label()}</option>
                        }).collect_view()}
                    </select>
                </div>

                <div>
                    <label class="block text-gray-700 font-medium mb-1">"Current Skills"</label>
                    <input
                        type="text"
                        required
                        placeholder="e.g., HTML, CSS, JavaScript"
                        prop:value=move || form.with(|f| f.skill.clone())
                        on:input=move |ev| form.update(|f| f.skill = event_target_value(&ev))
                        class=input_class
                    />
                </div>

                <div>
                    <label class="block text-gray-700 font-medium mb-1">"Duration (weeks)"</label>
                    <input
                        type="number"
                        min="1"
                        required
                        placeholder="e.g., 12"
                        prop:value=move || form.with(|f| f.duration.clone())
                        on:input=move |ev| form.update(|f| f.duration = event_target_value(&ev))
                        class=input_class
                    />
                </div>

                {move || error.get().map(|e| view! { <p class="text-sm text-red-600">{e}</p> })}

                <button
                    type="submit"
                    class="w-full bg-blue-600 hover:bg-blue-700 text-white py-3 rounded-xl font-semibold transition"
                >
                    "Generate Roadmap"
                </button>
            </form>
        </div>
    }
}

#[component]
fn RoadmapDetail<F>(roadmap: Roadmap, on_history: F) -> impl IntoView
where
    F: Fn() + 'static,
{
    let stages = roadmap
        .stages
        .iter()
        .enumerate()
        .map(|(i, stage)| {
            view! {
                <div class="p-5 bg-blue-50 border border-blue-200 rounded-xl">
                    <h3 class="text-lg font-semibold text-blue-700">
                        {format!("Stage {}: {}", i + 1, stage.stage)}
                    </h3>
                    <p class="mt-2 text-gray-700">
                        <span class="font-medium">"Skills: "</span>
                        {stage.skills.join(", ")}
                    </p>
                    <ul class="mt-2 list-disc list-inside text-gray-700">
                        {stage.actions.iter().map(|a| view! { <li>{a.clone()}</li> }).collect_view()}
                    </ul>
                </div>
            }
        })
        .collect_view();

    let weeks = roadmap
        .weekly_plan
        .iter()
        .map(|week| {
            view! {
                <tr class="border-t">
                    <td class="px-4 py-2 font-medium text-gray-800">{format!("Week {}", week.week)}</td>
                    <td class="px-4 py-2 text-gray-700">{week.focus.join(", ")}</td>
                </tr>
            }
        })
        .collect_view();

    view! {
        <div class="flex justify-center px-6 py-10">
            <div class="bg-white/80 backdrop-blur-md rounded-2xl shadow-lg p-8 w-full max-w-4xl space-y-8">
                <div class="flex justify-between items-start">
                    <h2 class="text-3xl font-bold text-blue-600">{format!("{} Roadmap", roadmap.role)}</h2>
                    <button
                        on:click=move |_| on_history()
                        class="text-sm px-4 py-2 border border-blue-600 text-blue-600 rounded-lg hover:bg-blue-50"
                    >
                        "History"
                    </button>
                </div>

                <p class="text-gray-700">{roadmap.introduction()}</p>

                <section class="space-y-4">{stages}</section>

                <section>
                    <h3 class="text-2xl font-semibold text-gray-800 mb-3">"Weekly Plan"</h3>
                    <table class="w-full text-left bg-white rounded-xl overflow-hidden">
                        <thead class="bg-blue-600 text-white">
                            <tr>
                                <th class="px-4 py-2">"Week"</th>
                                <th class="px-4 py-2">"Focus"</th>
                            </tr>
                        </thead>
                        <tbody>{weeks}</tbody>
                    </table>
                </section>
            </div>
        </div>
    }
}

//! Career Counsellor Page

use birjuram::models::{CareerPathway, CounsellingReport};
use birjuram::views::{CounselForm, CounsellorPage};
use birjuram::Phase;
use leptos::*;

use super::log_failure;
use crate::components::{HistoryModalView, Loading, SignInPrompt};
use crate::state::use_app_state;

#[component]
pub fn Counsellor() -> impl IntoView {
    let state = use_app_state();

    view! {
        <Show
            when=move || state.is_signed_in()
            fallback=|| view! { <SignInPrompt what="counselling report" /> }
        >
            <CounsellorScreen />
        </Show>
    }
}

#[component]
fn CounsellorScreen() -> impl IntoView {
    let state = use_app_state();
    let page = create_rw_signal(CounsellorPage::new());
    let form = create_rw_signal(CounselForm::default());

    create_effect(move |_| {
        let Some(Ok(ticket)) = page.try_update(|p| p.resource.begin_load()) else {
            return;
        };
        let client = state.client();
        spawn_local(async move {
            let result = client.fetch_counselling().await;
            let settled = page.try_update(|p| p.resource.finish_load(ticket, result));
            log_failure("load counselling report", settled.as_ref());
        });
    });
    on_cleanup(move || {
        page.try_update_untracked(|p| p.resource.dispose());
    });

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let started = page.try_update(|p| {
            p.form = form.get_untracked();
            p.begin_counsel()
        });
        let Some(Ok((ticket, request))) = started else {
            return;
        };

        let client = state.client();
        spawn_local(async move {
            let result = client.counsel(&request).await;
            let settled = page.try_update(|p| p.finish_counsel(ticket, result));
            log_failure("generate counselling report", settled.as_ref());
            if settled.is_some_and(|s| s.is_applied()) {
                form.set(CounselForm::default());
            }
        });
    };

    let phase = create_memo(move |_| page.with(|p| p.resource.phase()));
    let status = create_memo(move |_| page.with(CounsellorPage::status_text));
    let report = create_memo(move |_| page.with(|p| p.report().cloned()));
    let error = create_memo(move |_| page.with(|p| p.error().map(String::from)));
    let history = Signal::derive(move || page.with(|p| p.history.clone()));

    view! {
        {move || match (phase.get(), report.get()) {
            (Phase::Loading | Phase::Submitting, _) => view! {
                <Loading message=status.get().unwrap_or_default().to_string() />
            }.into_view(),
            (_, Some(report)) => view! {
                <ReportView report=report on_history=move || page.update(CounsellorPage::open_history) />
            }.into_view(),
            (_, None) => view! {
                <CounselFormView form=form error=error on_submit=on_submit />
            }.into_view(),
        }}

        <HistoryModalView
            modal=history
            on_close=move |_| page.update(|p| p.history.close())
        />
    }
}

#[component]
fn CounselFormView<F>(
    form: RwSignal<CounselForm>,
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
                <h2 class="text-3xl font-bold text-center text-blue-600">"Career Counselling"</h2>

                <div>
                    <label class="block text-gray-700 font-medium mb-1">"Education"</label>
                    <input
                        type="text"
                        required
                        placeholder="e.g., B.Tech in Computer Science"
                        prop:value=move || form.with(|f| f.education.clone())
                        on:input=move |ev| form.update(|f| f.education = event_target_value(&ev))
                        class=input_class
                    />
                </div>

                <div>
                    <label class="block text-gray-700 font-medium mb-1">"Field of Interest"</label>
                    <input
                        type="text"
                        required
                        placeholder="e.g., Data Science"
                        prop:value=move || form.with(|f| f.field.clone())
                        on:input=move |ev| form.update(|f| f.field = event_target_value(&ev))
                        class=input_class
                    />
                </div>

                <div>
                    <label class="block text-gray-700 font-medium mb-1">"Current Skills"</label>
                    <input
                        type="text"
                        required
                        placeholder="e.g., Python, SQL"
                        prop:value=move || form.with(|f| f.skills.clone())
                        on:input=move |ev| form.update(|f| f.skills = event_target_value(&ev))
                        class=input_class
                    />
                </div>

                <div>
                    <label class="block text-gray-700 font-medium mb-1">"Your Goal"</label>
                    <textarea
                        required
                        rows="3"
                        placeholder="What do you want to achieve?"
                        prop:value=move || form.with(|f| f.intent.clone())
                        on:input=move |ev| form.update(|f| f.intent = event_target_value(&ev))
                        class=input_class
                    />
                </div>

                {move || error.get().map(|e| view! { <p class="text-sm text-red-600">{e}</p> })}

                <button
                    type="submit"
                    class="w-full bg-blue-600 hover:bg-blue-700 text-white py-3 rounded-xl font-semibold transition"
                >
                    "Get Counselling"
                </button>
            </form>
        </div>
    }
}

fn bullet_list(items: &[String]) -> impl IntoView {
    view! {
        <ul class="list-disc list-inside text-gray-700 space-y-1">
            {items.iter().map(|item| view! { <li>{item.clone()}</li> }).collect_view()}
        </ul>
    }
}

#[component]
fn PathwayCard(pathway: CareerPathway) -> impl IntoView {
    view! {
        <div class="p-5 bg-blue-50 border border-blue-200 rounded-xl space-y-3">
            <h4 class="text-lg font-semibold text-blue-700">{pathway.role.clone()}</h4>
            <p class="text-gray-700">{pathway.role_overview.description.clone()}</p>
            <p class="text-gray-700">
                <span class="font-medium">"A day in the life: "</span>
                {pathway.role_overview.day_in_the_life.clone()}
            </p>
            <div>
                <p class="font-medium text-gray-800">"Key responsibilities"</p>
                {bullet_list(&pathway.role_overview.key_responsibilities)}
            </div>
            <p class="text-gray-700">
                <span class="font-medium">"Reality check: "</span>
                {pathway.reality_check.clone()}
            </p>
            <div>
                <p class="font-medium text-gray-800">"Learning resources"</p>
                {bullet_list(&pathway.recommended_learning_resources)}
            </div>
            <p class="text-gray-700">
                <span class="font-medium">"Networking tip: "</span>
                {pathway.networking_and_branding_tip.clone()}
            </p>
        </div>
    }
}

#[component]
fn ReportView<F>(report: CounsellingReport, on_history: F) -> impl IntoView
where
    F: Fn() + 'static,
{
    let rows = report
        .profile_rows()
        .into_iter()
        .map(|(label, value)| {
            view! {
                <tr class="border-t">
                    <td class="px-4 py-2 font-medium text-gray-800 w-1/3">{label}</td>
                    <td class="px-4 py-2 text-gray-700">{value}</td>
                </tr>
            }
        })
        .collect_view();

    let guidance = &report.strategic_guidance;
    let summary = &report.concluding_summary;

    view! {
        <div class="flex justify-center px-6 py-10">
            <div class="bg-white/80 backdrop-blur-md rounded-2xl shadow-lg p-8 w-full max-w-4xl space-y-8">
                <div class="flex justify-between items-start">
                    <h2 class="text-3xl font-bold text-blue-600">{report.title().to_string()}</h2>
                    <button
                        on:click=move |_| on_history()
                        class="text-sm px-4 py-2 border border-blue-600 text-blue-600 rounded-lg hover:bg-blue-50"
                    >
                        "History"
                    </button>
                </div>

                <p class="text-gray-700">{report.report_header.introduction.clone()}</p>

                <section>
                    <h3 class="text-2xl font-semibold text-gray-800 mb-3">"Profile Analysis"</h3>
                    <table class="w-full text-left bg-white rounded-xl overflow-hidden">
                        <tbody>{rows}</tbody>
                    </table>
                </section>

                <section class="space-y-2">
                    <h3 class="text-2xl font-semibold text-gray-800">"Strategic Guidance"</h3>
                    <p class="text-gray-700">{guidance.situational_overview.clone()}</p>
                    <p class="text-gray-700">{guidance.clarity_strategy.clone()}</p>
                    <p class="text-gray-700 font-medium">{guidance.overarching_recommendation.clone()}</p>
                </section>

                <section class="space-y-4">
                    <h3 class="text-2xl font-semibold text-gray-800">"Career Pathways"</h3>
                    {report
                        .detailed_career_pathways
                        .iter()
                        .cloned()
                        .map(|pathway| view! { <PathwayCard pathway=pathway /> })
                        .collect_view()}
                </section>

                <section class="space-y-2">
                    <h3 class="text-2xl font-semibold text-gray-800">"Next Steps"</h3>
                    {bullet_list(&summary.immediate_actions)}
                    <p class="text-blue-700 font-medium mt-4">{summary.final_encouragement.clone()}</p>
                </section>
            </div>
        </div>
    }
}

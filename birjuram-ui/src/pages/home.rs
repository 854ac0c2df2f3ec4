//! Home Page
//!
//! Hero and feature cards. Card buttons read "View ..." once the user has
//! the matching resource.

use birjuram::views::{HomeView, PresenceOutcome};
use leptos::*;
use leptos_router::*;

use crate::state::use_app_state;

#[component]
pub fn Home() -> impl IntoView {
    let state = use_app_state();
    let home = create_rw_signal(HomeView::new(state.session.get_untracked()));

    // Re-check presence whenever the user logs in or out. Lookups started
    // under an earlier session are dropped by `finish_presence`.
    create_effect(move |_| {
        let session = state.session.get();
        let check = home
            .try_update(|h| {
                h.set_session(session);
                h.begin_presence()
            })
            .flatten();
        let Some(check) = check else {
            return;
        };

        let client = state.client();
        spawn_local(async move {
            let roadmap = client.fetch_roadmap().await;
            let counselling = client.fetch_counselling().await;
            for error in [roadmap.as_ref().err(), counselling.as_ref().err()].into_iter().flatten() {
                web_sys::console::error_1(&format!("Failed to check saved results: {}", error).into());
            }

            let outcome = home.try_update(|h| h.finish_presence(check, roadmap, counselling));
            if outcome == Some(PresenceOutcome::SessionExpired) {
                state.logout();
                state.show_error("Your session has expired. Please log in again.");
            }
        });
    });

    let cards = move || home.with(HomeView::feature_cards);

    view! {
        <header class="flex flex-col items-center justify-center text-center px-6 mt-12">
            <h1 class="text-5xl font-extrabold text-gray-900 leading-tight mt-20 mb-4">
                "Welcome to " <span class="text-blue-600">"Birjuram.Ai"</span>
            </h1>
            <p class="text-lg text-gray-600 max-w-2xl mb-8">
                "Your AI-powered career companion. Get personalized guidance, generate roadmaps, and stay consistent with weekly quizzes."
            </p>
            <Show when=move || !state.is_signed_in()>
                <button
                    on:click=move |_| state.open_register()
                    class="bg-blue-600 hover:bg-blue-700 text-white px-6 py-3 rounded-xl font-semibold shadow-md transition"
                >
                    "Get Started"
                </button>
            </Show>
        </header>

        <section class="flex flex-col items-center justify-center flex-1 px-6 mt-16">
            <div class="grid grid-cols-1 md:grid-cols-3 gap-8 w-full max-w-5xl">
                {move || cards().into_iter().map(|card| view! {
                    <div class="p-8 bg-white/70 backdrop-blur-md rounded-2xl shadow-md hover:shadow-lg transition flex flex-col items-center">
                        <img src=card.icon alt=card.title width="150" height="150" class="mb-4" />
                        <h3 class="text-xl font-semibold text-gray-800 text-center">{card.title}</h3>
                        <p class="text-gray-600 mt-2 mb-6 text-center">{card.description}</p>
                        <A href=card.route class="w-full mt-auto">
                            <span class="block text-center bg-blue-600 hover:bg-blue-700 text-white px-6 py-3 rounded-xl font-semibold shadow-md transition w-full">
                                {card.action}
                            </span>
                        </A>
                    </div>
                }).collect_view()}
            </div>
        </section>
    }
}

//! Loading Component
//!
//! Full-page spinner and the signed-out placeholder.

use leptos::*;

use crate::state::use_app_state;

/// Full-page loading spinner with a status line
#[component]
pub fn Loading(#[prop(into)] message: MaybeSignal<String>) -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-[60vh]">
            <div class="text-center">
                <div class="loading-spinner h-16 w-16 mx-auto mb-4" />
                <p class="text-lg font-semibold text-blue-600">{move || message.get()}</p>
            </div>
        </div>
    }
}

/// Shown in place of a page that needs a session
#[component]
pub fn SignInPrompt(what: &'static str) -> impl IntoView {
    let state = use_app_state();

    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <h2 class="text-2xl font-bold text-gray-800 mb-2">"Login required"</h2>
            <p class="text-gray-600 mb-6">{format!("Log in to see your {}.", what)}</p>
            <button
                on:click=move |_| state.open_login()
                class="bg-blue-600 hover:bg-blue-700 text-white px-6 py-3 rounded-xl font-semibold transition"
            >
                "Login"
            </button>
        </div>
    }
}

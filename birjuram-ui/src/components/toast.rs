//! Toast
//!
//! Renders the single notice held in [`AppState`](crate::state::AppState).
//! A newer notice replaces the one on screen.

use leptos::*;

use crate::state::{use_app_state, Notice, NoticeKind};

fn style(kind: NoticeKind) -> (&'static str, &'static str) {
    match kind {
        NoticeKind::Success => ("✓", "bg-green-600"),
        NoticeKind::Error => ("!", "bg-red-600"),
    }
}

#[component]
pub fn Toast() -> impl IntoView {
    let state = use_app_state();

    move || {
        state.notice.get().map(|Notice { kind, message, .. }| {
            let (icon, background) = style(kind);
            view! {
                <div
                    role="status"
                    class=format!("fixed bottom-6 right-4 z-50 flex items-center gap-3 {} text-white px-4 py-3 rounded-xl shadow-lg", background)
                >
                    <span class="font-bold">{icon}</span>
                    <span class="text-sm font-medium">{message}</span>
                    <button
                        on:click=move |_| state.dismiss_notice()
                        class="ml-2 text-white/70 hover:text-white"
                    >
                        "✕"
                    </button>
                </div>
            }
        })
    }
}

//! History Modal
//!
//! Lists previous roadmaps or counselling reports.

use birjuram::views::{HistoryModal, EMPTY_HISTORY};
use leptos::*;

#[component]
pub fn HistoryModalView(
    #[prop(into)] modal: Signal<HistoryModal>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    move || {
        let modal = modal.get();
        if !modal.open {
            return view! {}.into_view();
        }

        let list = if modal.is_empty() {
            view! { <p class="text-gray-500 text-center py-6">{EMPTY_HISTORY}</p> }.into_view()
        } else {
            modal
                .entries
                .iter()
                .map(|entry| {
                    view! {
                        <li class="flex justify-between items-center p-3 bg-blue-50 rounded-lg">
                            <span class="font-medium text-gray-800">{entry.title.clone()}</span>
                            <span class="text-sm text-gray-500">{entry.date.clone().unwrap_or_default()}</span>
                        </li>
                    }
                })
                .collect_view()
        };

        view! {
            <div class="fixed inset-0 bg-black/40 flex items-center justify-center z-50">
                <div class="bg-white rounded-2xl shadow-xl p-6 w-full max-w-lg">
                    <div class="flex justify-between items-center mb-4">
                        <h2 class="text-xl font-bold text-gray-800">{modal.title()}</h2>
                        <button
                            on:click=move |_| on_close.call(())
                            class="text-gray-400 hover:text-gray-600"
                        >
                            "✕"
                        </button>
                    </div>
                    <ul class="space-y-2">{list}</ul>
                </div>
            </div>
        }
        .into_view()
    }
}

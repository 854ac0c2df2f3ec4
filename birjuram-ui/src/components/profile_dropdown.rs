//! Profile Dropdown
//!
//! Avatar and name; clicking opens a panel with the email and Logout.

use birjuram::views::{NavState, ProfileDropdown};
use leptos::*;

use crate::state::use_app_state;

#[component]
pub fn ProfileMenu() -> impl IntoView {
    let state = use_app_state();
    let dropdown = create_rw_signal(ProfileDropdown::default());
    let nav = create_memo(move |_| state.session.with(|s| NavState::from_session(s.as_ref())));

    let logout = move |_| {
        dropdown.update(ProfileDropdown::close);
        state.logout();
        state.show_success("Logged out");
    };

    move || match nav.get() {
        NavState::Guest => view! {}.into_view(),
        NavState::SignedIn {
            display_name,
            email,
            avatar,
        } => view! {
            <div class="relative">
                <button
                    on:click=move |_| dropdown.update(ProfileDropdown::toggle)
                    class="flex items-center space-x-2 focus:outline-none"
                >
                    <img src=avatar alt="Profile" class="w-10 h-10 rounded-full border-2 border-blue-500" />
                    <span class="font-medium text-gray-700">{display_name}</span>
                </button>

                <Show when=move || dropdown.with(|d| d.open)>
                    <div class="absolute right-0 mt-2 w-48 bg-white rounded-xl shadow-lg py-2 z-50">
                        <p class="px-4 py-2 text-sm text-gray-600 truncate">{email.clone()}</p>
                        <button
                            on:click=logout
                            class="w-full text-left px-4 py-2 text-sm text-red-600 hover:bg-red-50"
                        >
                            "Logout"
                        </button>
                    </div>
                </Show>
            </div>
        }
        .into_view(),
    }
}

//! Navigation Component
//!
//! Header with the brand link and either the auth buttons or the profile menu.

use leptos::*;
use leptos_router::*;

use crate::components::ProfileMenu;
use crate::state::use_app_state;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let state = use_app_state();
    let signed_in = create_memo(move |_| state.is_signed_in());

    view! {
        <nav class="w-full flex justify-between items-center px-8 py-6 z-50">
            <A href="/" class="text-2xl font-extrabold text-blue-600">
                "Birjuram.Ai"
            </A>

            {move || {
                if signed_in.get() {
                    view! { <ProfileMenu /> }.into_view()
                } else {
                    view! {
                        <div class="space-x-4">
                            <button
                                on:click=move |_| state.open_login()
                                class="text-gray-700 hover:text-blue-600 transition font-medium"
                            >
                                "Login"
                            </button>
                            <button
                                on:click=move |_| state.open_register()
                                class="bg-blue-600 hover:bg-blue-700 text-white px-5 py-2 rounded-xl font-medium transition"
                            >
                                "Sign Up"
                            </button>
                        </div>
                    }.into_view()
                }
            }}
        </nav>
    }
}

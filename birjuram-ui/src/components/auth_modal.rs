//! Auth Modal
//!
//! Login and sign-up form in an overlay. Submission goes through the
//! shared [`AuthModal`] state so a second click while a request is in
//! flight is ignored.

use birjuram::views::{AuthModal, AuthMode, AuthOutcome, AuthRequest, LOGIN_SUCCESS};
use leptos::*;

use crate::state::{session_store, use_app_state};

#[component]
pub fn AuthModalView() -> impl IntoView {
    let state = use_app_state();
    let auth = state.auth;

    let open = create_memo(move |_| auth.with(|m| m.open));
    let mode = create_memo(move |_| auth.with(|m| m.mode));
    let submitting = create_memo(move |_| auth.with(AuthModal::is_submitting));

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let Some(Some(request)) = auth.try_update(AuthModal::begin_submit) else {
            return;
        };

        let client = state.client();
        spawn_local(async move {
            match request {
                AuthRequest::Register(request) => {
                    let result = client.register(&request).await;
                    if let Some(AuthOutcome::Failed(e)) =
                        auth.try_update(|m| m.finish_register(result))
                    {
                        web_sys::console::error_1(&format!("Failed to register: {}", e).into());
                    }
                }
                AuthRequest::Login(request) => {
                    let result = client.login(&request).await;
                    let outcome = auth.try_update(|m| m.finish_login(result, &session_store()));
                    match outcome {
                        Some(AuthOutcome::LoggedIn(session)) => {
                            state.signed_in(session);
                            state.show_success(LOGIN_SUCCESS);
                        }
                        Some(AuthOutcome::Failed(e)) => {
                            web_sys::console::error_1(&format!("Failed to log in: {}", e).into());
                        }
                        _ => {}
                    }
                }
            }
        });
    };

    move || {
        if !open.get() {
            return view! {}.into_view();
        }

        view! {
            <div class="fixed inset-0 bg-black/40 flex items-center justify-center z-50">
                <div class="bg-white rounded-2xl shadow-xl p-8 w-full max-w-md relative">
                    <button
                        on:click=move |_| auth.update(AuthModal::close)
                        class="absolute top-4 right-4 text-gray-400 hover:text-gray-600"
                    >
                        "✕"
                    </button>

                    <h2 class="text-2xl font-bold text-center text-gray-800 mb-6">
                        {move || auth.with(|m| m.title())}
                    </h2>

                    {move || auth.with(|m| m.notice().map(String::from)).map(|notice| view! {
                        <p class="mb-4 text-sm text-green-700 bg-green-50 rounded-lg px-3 py-2">{notice}</p>
                    })}

                    <form on:submit=on_submit class="space-y-4">
                        <input
                            type="text"
                            placeholder="Username"
                            required
                            prop:value=move || auth.with(|m| m.username.clone())
                            on:input=move |ev| auth.update(|m| m.username = event_target_value(&ev))
                            class="w-full px-4 py-2 border rounded-lg focus:ring-2 focus:ring-blue-500 outline-none text-gray-800"
                        />

                        <Show when=move || mode.get() == AuthMode::Register>
                            <input
                                type="email"
                                placeholder="Email"
                                required
                                prop:value=move || auth.with(|m| m.email.clone())
                                on:input=move |ev| auth.update(|m| m.email = event_target_value(&ev))
                                class="w-full px-4 py-2 border rounded-lg focus:ring-2 focus:ring-blue-500 outline-none text-gray-800"
                            />
                        </Show>

                        <input
                            type="password"
                            placeholder="Password"
                            required
                            prop:value=move || auth.with(|m| m.password.clone())
                            on:input=move |ev| auth.update(|m| m.password = event_target_value(&ev))
                            class="w-full px-4 py-2 border rounded-lg focus:ring-2 focus:ring-blue-500 outline-none text-gray-800"
                        />

                        {move || auth.with(|m| m.error().map(String::from)).map(|error| view! {
                            <p class="text-sm text-red-600">{error}</p>
                        })}

                        <button
                            type="submit"
                            disabled=move || submitting.get()
                            class="w-full bg-blue-600 hover:bg-blue-700 disabled:bg-blue-300 text-white py-2 rounded-lg font-semibold transition"
                        >
                            {move || auth.with(|m| m.submit_label())}
                        </button>
                    </form>

                    <p class="mt-4 text-center text-sm text-gray-600">
                        {move || match mode.get() {
                            AuthMode::Login => "Don't have an account? ",
                            AuthMode::Register => "Already have an account? ",
                        }}
                        <button
                            on:click=move |_| auth.update(AuthModal::toggle_mode)
                            class="text-blue-600 font-medium hover:underline"
                        >
                            {move || match mode.get() {
                                AuthMode::Login => "Sign Up",
                                AuthMode::Register => "Login",
                            }}
                        </button>
                    </p>
                </div>
            </div>
        }
        .into_view()
    }
}

//! App Root Component
//!
//! Routing, the shared state context and the overlays every page can raise.

use leptos::*;
use leptos_router::*;

use crate::components::{AuthModalView, Nav, Toast};
use crate::pages::{Counsellor, Home, QuizView, RoadmapView};
use crate::state::provide_app_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_app_state();

    view! {
        <Router>
            <div class="min-h-screen bg-gradient-to-br from-blue-50 via-white to-blue-100 flex flex-col">
                <Nav />

                <main class="flex-1 container mx-auto px-4 py-8">
                    <Routes>
                        <Route path="/" view=Home />
                        <Route path="/roadmap" view=RoadmapView />
                        <Route path="/quiz" view=QuizView />
                        <Route path="/counsellor" view=Counsellor />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                <footer class="py-6 text-center text-sm text-gray-500">
                    "© Birjuram.Ai. All rights reserved."
                </footer>

                // Overlays
                <AuthModalView />
                <Toast />
            </div>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <h1 class="text-3xl font-bold text-gray-800 mb-2">"Page Not Found"</h1>
            <p class="text-gray-500 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/"
                class="px-6 py-3 bg-blue-600 hover:bg-blue-700 text-white rounded-lg font-medium transition-colors"
            >
                "Go Home"
            </A>
        </div>
    }
}

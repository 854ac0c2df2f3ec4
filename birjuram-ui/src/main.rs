//! Birjuram Web App
//!
//! AI career guidance in the browser, built with Leptos (WASM).
//!
//! # Features
//!
//! - Personalized learning roadmaps
//! - Weekly quizzes generated from the roadmap
//! - Career counselling reports
//! - Login / sign-up with the session kept in `localStorage`
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. Page state lives in the `birjuram` core crate; this crate
//! renders it and talks to the service through a gloo-net transport.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}

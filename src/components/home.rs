//! Home Page
//!
//! Landing page with a quick-start blurb and a backend liveness line.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::ApiClient;

#[component]
pub fn Home() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let (backend_status, set_backend_status) = signal(Option::<String>::None);

    Effect::new(move |_| {
        let api = api.clone();
        spawn_local(async move {
            match api.health().await {
                Ok(health) => set_backend_status.set(Some(health.status)),
                Err(_) => set_backend_status.set(Some("unreachable".to_string())),
            }
        });
    });

    view! {
        <div class="home">
            <h1>"Welcome to Battle"</h1>
            <p class="tagline">"A full-stack web application skeleton"</p>
            <div class="quick-start">
                <h2>"Quick Start"</h2>
                <ul>
                    <li>"Register a new account or login"</li>
                    <li>"Access the dashboard to manage items"</li>
                    <li>"API docs available at /docs"</li>
                </ul>
            </div>
            <p class="backend-status">
                {move || backend_status.get().map(|status| format!("API status: {status}"))}
            </p>
        </div>
    }
}

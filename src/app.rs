//! Battle Frontend App
//!
//! Router shell: shared header plus the three routes. One session and one
//! API client are created here and provided to every component via context.

use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::api::ApiClient;
use crate::components::{Dashboard, Header, Home, LoginForm};
use crate::session::Session;

#[component]
pub fn App() -> impl IntoView {
    let session = Session::load();
    let api = ApiClient::from_env(session);
    provide_context(api);

    view! {
        <Router>
            <Header/>
            <main class="page">
                <Routes fallback=|| view! { <p class="empty">"Not found."</p> }>
                    <Route path=path!("/") view=Home/>
                    <Route path=path!("/login") view=LoginForm/>
                    <Route path=path!("/dashboard") view=Dashboard/>
                </Routes>
            </main>
        </Router>
    }
}

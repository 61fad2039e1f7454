//! Header Component
//!
//! Shared shell header: brand link plus nav. Login state comes straight off
//! the session signal, so logging in or out updates the nav without a reload.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::api::ApiClient;

#[component]
pub fn Header() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let token = api.session().token;
    let logged_in = move || token.get().is_some();

    let navigate = use_navigate();
    let on_logout = move |_| {
        api.logout();
        navigate("/", Default::default());
    };

    view! {
        <header class="site-header">
            <a class="brand" href="/">"Battle"</a>
            <nav class="site-nav">
                <Show
                    when=logged_in
                    fallback=|| view! { <a href="/login">"Login"</a> }
                >
                    <a href="/dashboard">"Dashboard"</a>
                    <button class="link-btn" on:click=on_logout.clone()>
                        "Logout"
                    </button>
                </Show>
            </nav>
        </header>
    }
}

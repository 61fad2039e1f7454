//! Login Form Component
//!
//! Sign-in and create-account modes in one form; the mode is toggled by the
//! user, never by the server. Create-account registers first and then logs in
//! as a second call: if the login half fails the account still exists, and
//! the form shows that failure like any other.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use wasm_bindgen::JsCast;

use crate::api::ApiClient;

#[component]
pub fn LoginForm() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let navigate = use_navigate();

    let (is_register, set_is_register) = signal(false);
    let (error, set_error) = signal(String::new());
    let (loading, set_loading) = signal(false);
    let (email, set_email) = signal(String::new());
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error.set(String::new());
        set_loading.set(true);

        let api = api.clone();
        let navigate = navigate.clone();
        let register_first = is_register.get();
        let email = email.get();
        let username = username.get();
        let password = password.get();

        spawn_local(async move {
            let result = if register_first {
                match api.register(&email, &username, &password).await {
                    Ok(_) => api.login(&username, &password).await.map(|_| ()),
                    Err(e) => Err(e),
                }
            } else {
                api.login(&username, &password).await.map(|_| ())
            };

            set_loading.set(false);
            match result {
                Ok(()) => navigate("/dashboard", Default::default()),
                Err(e) => set_error.set(e.message),
            }
        });
    };

    view! {
        <div class="auth-form">
            <h2>
                {move || if is_register.get() { "Create Account" } else { "Sign In" }}
            </h2>

            <Show when=move || !error.get().is_empty()>
                <div class="error-banner">{move || error.get()}</div>
            </Show>

            <form on:submit=submit>
                <Show when=move || is_register.get()>
                    <label>
                        "Email"
                        <input
                            type="email"
                            required
                            prop:value=move || email.get()
                            on:input=move |ev| {
                                let target = ev.target().unwrap();
                                let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                                set_email.set(input.value());
                            }
                        />
                    </label>
                </Show>

                <label>
                    "Username"
                    <input
                        type="text"
                        required
                        prop:value=move || username.get()
                        on:input=move |ev| {
                            let target = ev.target().unwrap();
                            let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                            set_username.set(input.value());
                        }
                    />
                </label>

                <label>
                    "Password"
                    <input
                        type="password"
                        required
                        prop:value=move || password.get()
                        on:input=move |ev| {
                            let target = ev.target().unwrap();
                            let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                            set_password.set(input.value());
                        }
                    />
                </label>

                <button type="submit" disabled=move || loading.get()>
                    {move || {
                        if loading.get() {
                            "Loading..."
                        } else if is_register.get() {
                            "Register"
                        } else {
                            "Sign In"
                        }
                    }}
                </button>
            </form>

            <p class="mode-toggle">
                {move || {
                    if is_register.get() {
                        "Already have an account? "
                    } else {
                        "Don't have an account? "
                    }
                }}
                <button
                    type="button"
                    class="link-btn"
                    on:click=move |_| set_is_register.update(|v| *v = !*v)
                >
                    {move || if is_register.get() { "Sign In" } else { "Register" }}
                </button>
            </p>
        </div>
    }
}

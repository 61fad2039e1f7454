//! Dashboard Component
//!
//! Item list plus the create form. Every mutation bumps a reload trigger and
//! the full list is refetched, so the view is always the last successful
//! snapshot from the server. No optimistic updates.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use wasm_bindgen::JsCast;

use crate::api::ApiClient;
use crate::models::{Item, User};

#[component]
pub fn Dashboard() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let navigate = use_navigate();

    let (items, set_items) = signal(Vec::<Item>::new());
    let (me, set_me) = signal(Option::<User>::None);
    let (title, set_title) = signal(String::new());
    let (description, set_description) = signal(String::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(String::new());
    let (reload_trigger, set_reload_trigger) = signal(0u32);

    // Load items on mount and after every mutation. With no token held,
    // redirect to sign-in before any request goes out.
    Effect::new({
        let api = api.clone();
        let navigate = navigate.clone();
        move |_| {
            let trigger = reload_trigger.get();
            if api.token().is_none() {
                navigate("/login", Default::default());
                return;
            }
            web_sys::console::log_1(
                &format!("[DASHBOARD] Loading items, trigger={}", trigger).into(),
            );
            let api = api.clone();
            spawn_local(async move {
                match api.get_items().await {
                    Ok(loaded) => {
                        set_items.set(loaded);
                        set_error.set(String::new());
                    }
                    Err(e) => set_error.set(e.message),
                }
                set_loading.set(false);
            });
        }
    });

    // Greeting is best-effort; a failed lookup stays silent.
    Effect::new({
        let api = api.clone();
        move |_| {
            if api.token().is_none() {
                return;
            }
            let api = api.clone();
            spawn_local(async move {
                if let Ok(user) = api.get_me().await {
                    set_me.set(Some(user));
                }
            });
        }
    });

    let create_item = {
        let api = api.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            let new_title = title.get();
            if new_title.trim().is_empty() {
                return;
            }
            let new_description = description.get();
            let api = api.clone();
            spawn_local(async move {
                let description = if new_description.is_empty() {
                    None
                } else {
                    Some(new_description.as_str())
                };
                match api.create_item(&new_title, description).await {
                    Ok(_) => {
                        set_title.set(String::new());
                        set_description.set(String::new());
                        set_reload_trigger.update(|v| *v += 1);
                    }
                    Err(e) => set_error.set(e.message),
                }
            });
        }
    };

    let delete_item = {
        let api = api.clone();
        move |id: i64| {
            let api = api.clone();
            spawn_local(async move {
                match api.delete_item(id).await {
                    Ok(()) => set_reload_trigger.update(|v| *v += 1),
                    Err(e) => set_error.set(e.message),
                }
            });
        }
    };

    view! {
        <div class="dashboard">
            <Show
                when=move || !loading.get()
                fallback=|| view! { <div class="loading">"Loading..."</div> }
            >
                <h2>"Your Items"</h2>
                {move || {
                    me.get()
                        .map(|user| view! { <p class="greeting">"Signed in as " {user.username}</p> })
                }}

                <Show when=move || !error.get().is_empty()>
                    <div class="error-banner">{move || error.get()}</div>
                </Show>

                <form class="new-item-form" on:submit=create_item.clone()>
                    <h3>"Add New Item"</h3>
                    <input
                        type="text"
                        placeholder="Title"
                        required
                        prop:value=move || title.get()
                        on:input=move |ev| {
                            let target = ev.target().unwrap();
                            let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                            set_title.set(input.value());
                        }
                    />
                    <input
                        type="text"
                        placeholder="Description (optional)"
                        prop:value=move || description.get()
                        on:input=move |ev| {
                            let target = ev.target().unwrap();
                            let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                            set_description.set(input.value());
                        }
                    />
                    <button type="submit">"Add Item"</button>
                </form>

                <div class="item-list">
                    {
                        let delete_item = delete_item.clone();
                        move || {
                            let list = items.get();
                            if list.is_empty() {
                                view! {
                                    <p class="empty">"No items yet. Create one above!"</p>
                                }
                                .into_any()
                            } else {
                                let delete_item = delete_item.clone();
                                list.into_iter()
                                    .map(move |item| {
                                        let delete_item = delete_item.clone();
                                        view! {
                                            <div class="item-card">
                                                <div>
                                                    <h4>{item.title.clone()}</h4>
                                                    {item
                                                        .description
                                                        .clone()
                                                        .map(|d| view! { <p class="item-description">{d}</p> })}
                                                </div>
                                                <button
                                                    class="delete-btn"
                                                    on:click=move |_| delete_item(item.id)
                                                >
                                                    "Delete"
                                                </button>
                                            </div>
                                        }
                                    })
                                    .collect_view()
                                    .into_any()
                            }
                        }
                    }
                </div>
            </Show>
        </div>
    }
}

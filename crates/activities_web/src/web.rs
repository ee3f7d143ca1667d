use std::rc::Rc;

use activities::delegate::REMOVE_CONTROL_CLASS;
use activities::{ActivityClient, CatalogView, ClientConfig, Notice, TaggedElement, View};
use leptos::ev::{MouseEvent, SubmitEvent};
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::ui_model::{ListState, SELECT_PLACEHOLDER};

mod fetch;
mod shell;

use fetch::FetchTransport;
use shell::{ActivityList, MessageBanner};

pub fn start() {
    mount_to_body(|| view! { <App /> });
}

/// Client output lands in signals; the components below only read them.
#[derive(Clone, Copy)]
struct SignalView {
    list: RwSignal<ListState>,
    message: RwSignal<Option<Notice>>,
}

impl View for SignalView {
    fn render_catalog(&self, view: CatalogView) {
        self.list.set(ListState::Ready(view));
    }

    fn show_message(&self, notice: Notice) {
        self.message.set(Some(notice));
    }

    fn alert(&self, text: &str) {
        if let Some(w) = web_sys::window() {
            let _ = w.alert_with_message(text);
        }
    }

    fn report_diagnostic(&self, message: &str) {
        web_sys::console::error_1(&JsValue::from_str(message));
    }
}

struct DomTarget(web_sys::Element);

impl TaggedElement for DomTarget {
    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }
}

#[component]
fn App() -> impl IntoView {
    let list = RwSignal::new(ListState::Loading);
    let message = RwSignal::new(None::<Notice>);
    let (email, set_email) = signal(String::new());
    let (selected, set_selected) = signal(String::new());

    let client = StoredValue::new_local(Rc::new(ActivityClient::new(
        FetchTransport::new(ClientConfig::same_origin()),
        SignalView { list, message },
    )));

    {
        let client = client.get_value();
        spawn_local(async move {
            let _ = client.load_catalog().await;
        });
    }

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let client = client.get_value();
        let activity = selected.get_untracked();
        let email = email.get_untracked();
        spawn_local(async move {
            let _ = client.submit_signup(&activity, &email).await;
        });
    };

    // Single listener for every removal control the list will ever render.
    let on_list_click = move |ev: MouseEvent| {
        let selector = format!(".{REMOVE_CONTROL_CLASS}");
        let Some(control) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            .and_then(|el| el.closest(&selector).ok().flatten())
        else {
            return;
        };
        let client = client.get_value();
        spawn_local(async move {
            let _ = client.handle_click(&DomTarget(control)).await;
        });
    };

    view! {
        <main class="container">
            <header>
                <h1>"Mergington High School"</h1>
                <h2>"Extracurricular Activities"</h2>
            </header>

            <section id="activities-container">
                <h3>"Available Activities"</h3>
                <div id="activities-list" on:click=on_list_click>
                    <ActivityList list=list />
                </div>
            </section>

            <section id="signup-container">
                <h3>"Sign Up for an Activity"</h3>
                <form id="signup-form" on:submit=on_submit>
                    <div class="form-group">
                        <label for="email">"Student Email:"</label>
                        <input
                            type="email"
                            id="email"
                            required
                            placeholder="your-email@mergington.edu"
                            prop:value=move || email.get()
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="activity">"Select Activity:"</label>
                        <select
                            id="activity"
                            required
                            prop:value=move || selected.get()
                            on:change=move |ev| set_selected.set(event_target_value(&ev))
                        >
                            <option value="">{SELECT_PLACEHOLDER}</option>
                            {move || {
                                list.with(|l| {
                                    l.options()
                                        .iter()
                                        .map(|name| {
                                            let value = name.clone();
                                            let label = name.clone();
                                            view! { <option value=value>{label}</option> }
                                        })
                                        .collect_view()
                                })
                            }}
                        </select>
                    </div>
                    <button type="submit">"Sign Up"</button>
                </form>
                <MessageBanner message=message />
            </section>
        </main>
    }
}

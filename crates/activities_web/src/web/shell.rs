use activities::delegate::REMOVE_CONTROL_CLASS;
use activities::{ActivityCard, Notice};
use leptos::prelude::*;

use crate::ui_model::{message_class, ListState, LOADING_TEXT};

/// Cards only. Clicks are handled by the listener on the enclosing
/// `#activities-list`.
#[component]
pub(super) fn ActivityList(list: RwSignal<ListState>) -> impl IntoView {
    move || match list.get() {
        ListState::Loading => view! { <p>{LOADING_TEXT}</p> }.into_any(),
        ListState::Ready(catalog) => catalog
            .cards
            .into_iter()
            .map(|card| view! { <ActivityCardItem card=card /> })
            .collect_view()
            .into_any(),
    }
}

#[component]
fn ActivityCardItem(card: ActivityCard) -> impl IntoView {
    let availability = card.availability();

    view! {
        <div class="activity-card">
            <h4>{card.name}</h4>
            <p>{card.description}</p>
            <p>
                <strong>"Schedule:"</strong>
                " "
                {card.schedule}
            </p>
            <p>
                <strong>"Availability:"</strong>
                " "
                {availability}
            </p>
            <div class="participants">
                <strong>"Participants:"</strong>
                <ul>
                    {card
                        .participants
                        .into_iter()
                        .map(|p| {
                            view! {
                                <li>
                                    {p.email}
                                    " "
                                    <button
                                        class=REMOVE_CONTROL_CLASS
                                        title="Remove participant"
                                        data-activity=p.remove.activity
                                        data-participant=p.remove.participant
                                    >
                                        "❌"
                                    </button>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </div>
        </div>
    }
}

#[component]
pub(super) fn MessageBanner(message: RwSignal<Option<Notice>>) -> impl IntoView {
    view! {
        <div id="message" class=move || message.with(|m| message_class(m.as_ref()))>
            <span>
                {move || message.with(|m| m.as_ref().map(|n| n.text.clone()).unwrap_or_default())}
            </span>
            <Show when=move || message.with(Option::is_some)>
                <button class="message-close" title="Dismiss" on:click=move |_| message.set(None)>
                    "×"
                </button>
            </Show>
        </div>
    }
}

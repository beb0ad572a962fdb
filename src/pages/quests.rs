use leptos::*;

use crate::api;
use crate::app::require_session;
use crate::components::{list_or_placeholder, NavBar};
use crate::logging;
use crate::types::{AppView, Loadable, Quest, QuestBoard};

const NO_QUESTS: &str = "No quests available at this time. Check back later!";

#[component]
fn QuestItem(quest: Quest) -> impl IntoView {
    let class = if quest.completed { "quest-item completed" } else { "quest-item" };
    view! {
        <div class=class>
            <div class="quest-info">
                <h3 class="quest-title">{quest.title}</h3>
                <p class="quest-description">{quest.description}</p>
            </div>
            <div class="quest-reward">
                <span>{format!("+{} XP", quest.reward_xp)}</span>
            </div>
            <div class="quest-status">
                {quest.completed.then(|| view! { <span>"✔"</span> })}
            </div>
        </div>
    }
}

fn quest_list(quests: Option<Vec<Quest>>) -> View {
    list_or_placeholder(quests.unwrap_or_default(), NO_QUESTS, |quest| view! { <QuestItem quest=quest /> })
}

#[component]
pub fn Quests(set_view: WriteSignal<AppView>) -> impl IntoView {
    let Some(session) = require_session(set_view) else {
        return ().into_view();
    };
    let user_id = session.id;

    let (board, set_board) = create_signal(Loadable::<QuestBoard>::Loading);

    create_effect(move |_| {
        spawn_local(async move {
            match api::fetch_quests(user_id).await {
                Ok(b) => set_board.set(Loadable::Ready(b)),
                Err(e) => {
                    logging::error("quests", &format!("loading quests failed: {}", e));
                    set_board.set(Loadable::Failed("Could not load quests.".into()));
                }
            }
        });
    });

    let daily = move || match board.get() {
        Loadable::Loading => view! { <p class="placeholder-text">"Loading..."</p> }.into_view(),
        Loadable::Failed(msg) => view! { <p class="error-message">{msg}</p> }.into_view(),
        Loadable::Ready(b) => quest_list(b.daily),
    };

    // The error is reported once, under the daily list
    let weekly = move || match board.get() {
        Loadable::Loading => view! { <p class="placeholder-text">"Loading..."</p> }.into_view(),
        Loadable::Failed(_) => ().into_view(),
        Loadable::Ready(b) => quest_list(b.weekly),
    };

    view! {
        <div class="quests">
            <NavBar set_view=set_view active=AppView::Quests />

            <section class="quest-section">
                <h2>"Daily Quests"</h2>
                <div id="daily-quests-container">{daily}</div>
            </section>
            <section class="quest-section">
                <h2>"Weekly Quests"</h2>
                <div id="weekly-quests-container">{weekly}</div>
            </section>
        </div>
    }
    .into_view()
}

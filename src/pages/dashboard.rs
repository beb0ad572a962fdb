use leptos::*;

use crate::api;
use crate::app::require_session;
use crate::components::{Hud, NavBar};
use crate::logging;
use crate::pages::planner::WorkoutPlanner;
use crate::types::{AppView, CompletionResult, UserStats};
use crate::view_model::{HudView, MascotMood};

fn load_stats(user_id: u64, set_stats: WriteSignal<Option<UserStats>>) {
    spawn_local(async move {
        match api::fetch_stats(user_id).await {
            Ok(stats) => set_stats.set(Some(stats)),
            // HUD keeps its previous values
            Err(e) => logging::error("dashboard", &format!("loading user stats failed: {}", e)),
        }
    });
}

#[component]
pub fn Dashboard(set_view: WriteSignal<AppView>) -> impl IntoView {
    let Some(session) = require_session(set_view) else {
        return ().into_view();
    };
    let user_id = session.id;
    let username = session.username.clone();

    let (stats, set_stats) = create_signal(Option::<UserStats>::None);
    let (mood, set_mood) = create_signal(MascotMood::Idle);

    load_stats(user_id, set_stats);

    let on_completed = Callback::new(move |_: CompletionResult| load_stats(user_id, set_stats));

    view! {
        <div class="dashboard">
            <NavBar set_view=set_view active=AppView::Dashboard />

            {move || match stats.get() {
                Some(s) => view! { <Hud hud=HudView::from(&s) /> }.into_view(),
                None => view! {
                    <div class="hud">
                        <span id="username-display" class="hud-username">{username.clone()}</span>
                    </div>
                }.into_view(),
            }}

            <div id="mascot-container" class="mascot">
                <img src=move || mood.get().image() alt="Mascot" />
                <p id="mascot-message">{move || mood.get().message()}</p>
            </div>

            <WorkoutPlanner session=session on_completed=on_completed set_mood=set_mood />
        </div>
    }
    .into_view()
}

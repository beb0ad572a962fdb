use leptos::*;

use crate::api;
use crate::app::require_session;
use crate::components::{list_or_placeholder, Hud, NavBar};
use crate::logging;
use crate::types::{AppView, Badge, Loadable, UserStats, WorkoutLogEntry};
use crate::view_model::{history_items, HudView};

#[component]
fn BadgeGrid(badges: Vec<Badge>) -> impl IntoView {
    view! {
        <div id="badges-grid" class="badges-grid">
            {list_or_placeholder(
                badges,
                "No badges unlocked yet. Complete workouts and quests to earn them!",
                |badge| view! {
                    <div class="badge-item" title=badge.description>
                        <img src=badge.image_url alt=badge.name.clone() />
                        <p class="badge-name">{badge.name}</p>
                    </div>
                },
            )}
        </div>
    }
}

#[component]
fn History(log: Vec<WorkoutLogEntry>) -> impl IntoView {
    view! {
        <div id="workout-history-list" class="history-list">
            {list_or_placeholder(
                history_items(&log),
                "No workouts completed yet. Let's get started!",
                |item| view! {
                    <div class="history-item">
                        <strong>{format!("{}:", item.date)}</strong>
                        {format!(" Completed {} exercises ({}). ", item.exercise_count, item.exercise_names)}
                        <span>{format!("+{} XP", item.xp_gained)}</span>
                    </div>
                },
            )}
        </div>
    }
}

#[component]
pub fn Profile(set_view: WriteSignal<AppView>) -> impl IntoView {
    let Some(session) = require_session(set_view) else {
        return ().into_view();
    };
    let user_id = session.id;

    let (data, set_data) = create_signal(Loadable::<(UserStats, Vec<WorkoutLogEntry>)>::Loading);

    create_effect(move |_| {
        spawn_local(async move {
            match api::fetch_profile(user_id).await {
                Ok(profile) => set_data.set(Loadable::Ready(profile)),
                Err(e) => {
                    logging::error("profile", &format!("loading profile data failed: {}", e));
                    set_data.set(Loadable::Failed(
                        "Could not load profile data. Please try refreshing the page.".into(),
                    ));
                }
            }
        });
    });

    view! {
        <div class="profile">
            <NavBar set_view=set_view active=AppView::Profile />

            <main class="profile-main">
                {move || match data.get() {
                    Loadable::Loading => view! { <p class="placeholder-text">"Loading profile..."</p> }.into_view(),
                    Loadable::Failed(msg) => view! { <p class="error-message">{msg}</p> }.into_view(),
                    Loadable::Ready((stats, log)) => {
                        let hud = HudView::from(&stats);
                        let badges = stats.unlocked_badges.unwrap_or_default();
                        view! {
                            <section class="profile-stats">
                                <Hud hud=hud show_streak=true />
                            </section>
                            <section class="profile-badges">
                                <h2>"Badges"</h2>
                                <BadgeGrid badges=badges />
                            </section>
                            <section class="profile-history">
                                <h2>"Recent Workouts"</h2>
                                <History log=log />
                            </section>
                        }.into_view()
                    }
                }}
            </main>
        </div>
    }
    .into_view()
}

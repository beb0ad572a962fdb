use gloo_timers::callback::Timeout;
use leptos::*;

use crate::api::{self, ApiError};
use crate::app::require_session;
use crate::components::{list_or_placeholder, NavBar};
use crate::config::{FRIEND_MESSAGE_CLEAR_MS, NETWORK_ERROR_MESSAGE};
use crate::logging;
use crate::types::{AppView, FriendAction, FriendsData, LeaderboardEntry, Loadable};
use crate::view_model::leaderboard_rows;

#[derive(Clone, Debug, PartialEq)]
struct FormMessage {
    text: String,
    success: bool,
    /// Which submission produced this message.
    generation: u32,
}

/// A clear timer only removes the message it was started for.
fn clear_if_current(slot: &mut Option<FormMessage>, generation: u32) {
    if slot.as_ref().is_some_and(|m| m.generation == generation) {
        *slot = None;
    }
}

fn alert(msg: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(msg);
    }
}

/// Text for the inline add-friend message and the respond alert.
fn failure_text(err: &ApiError) -> String {
    match err {
        ApiError::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
        _ => err
            .server_message()
            .map(str::to_string)
            .unwrap_or_else(|| "Something went wrong.".to_string()),
    }
}

#[component]
pub fn Friends(set_view: WriteSignal<AppView>) -> impl IntoView {
    let Some(session) = require_session(set_view) else {
        return ().into_view();
    };
    let user_id = session.id;

    let (reload, set_reload) = create_signal(0u32);
    let (social, set_social) = create_signal(Loadable::<(FriendsData, Vec<LeaderboardEntry>)>::Loading);
    let (friend_name, set_friend_name) = create_signal(String::new());
    let (message, set_message) = create_signal(Option::<FormMessage>::None);
    let (sending, set_sending) = create_signal(false);
    let message_generation = store_value(0u32);
    let (responding, set_responding) = create_signal(Option::<u64>::None);

    create_effect(move |_| {
        let _ = reload.get();
        spawn_local(async move {
            match api::fetch_social(user_id).await {
                Ok(data) => set_social.set(Loadable::Ready(data)),
                Err(e) => {
                    logging::error("friends", &format!("loading friend data failed: {}", e));
                    set_social.set(Loadable::Failed("Could not load friend data.".into()));
                }
            }
        });
    });

    let add_friend = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let username = friend_name.get_untracked().trim().to_string();
        if username.is_empty() || sending.get_untracked() {
            return;
        }
        set_friend_name.set(String::new());
        set_sending.set(true);
        message_generation.update_value(|g| *g = g.wrapping_add(1));
        let generation = message_generation.get_value();

        spawn_local(async move {
            let outcome = match api::send_friend_request(user_id, &username).await {
                Ok(reply) => FormMessage { text: reply.message.unwrap_or_default(), success: true, generation },
                Err(e) => {
                    logging::error("friends", &format!("friend request failed: {}", e));
                    FormMessage { text: failure_text(&e), success: false, generation }
                }
            };
            let success = outcome.success;
            set_message.set(Some(outcome));
            if success {
                Timeout::new(FRIEND_MESSAGE_CLEAR_MS, move || {
                    set_message.update(|slot| clear_if_current(slot, generation));
                })
                .forget();
            }
            set_sending.set(false);
        });
    };

    let respond = move |requester_id: u64, action: FriendAction| {
        if responding.get_untracked().is_some() {
            return;
        }
        set_responding.set(Some(requester_id));
        spawn_local(async move {
            match api::respond_to_request(user_id, requester_id, action).await {
                Ok(_) => set_reload.update(|n| *n += 1),
                Err(e) => {
                    logging::error("friends", &format!("{} request {} failed: {}", action.as_str(), requester_id, e));
                    alert(&match &e {
                        ApiError::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
                        _ => format!("Error: {}", failure_text(&e)),
                    });
                }
            }
            set_responding.set(None);
        });
    };

    let pending_view = move || match social.get() {
        Loadable::Ready((data, _)) => list_or_placeholder(
            data.pending_requests.unwrap_or_default(),
            "No new friend requests.",
            move |req| {
                let id = req.id;
                view! {
                    <div class="friend-item pending">
                        <span class="friend-name">{req.username}</span>
                        <div class="friend-actions">
                            <button
                                class="button-accept"
                                disabled=move || responding.get().is_some()
                                on:click=move |_| respond(id, FriendAction::Accept)
                            >"Accept"</button>
                            <button
                                class="button-decline"
                                disabled=move || responding.get().is_some()
                                on:click=move |_| respond(id, FriendAction::Decline)
                            >"Decline"</button>
                        </div>
                    </div>
                }
            },
        ),
        Loadable::Loading => view! { <p class="placeholder-text">"Loading..."</p> }.into_view(),
        Loadable::Failed(_) => ().into_view(),
    };

    let friends_view = move || match social.get() {
        Loadable::Ready((data, _)) => list_or_placeholder(
            data.friends.unwrap_or_default(),
            "You haven't added any friends yet.",
            |friend| view! {
                <div class="friend-item">
                    <span class="friend-name">{format!("{} (Level {})", friend.username, friend.level)}</span>
                </div>
            },
        ),
        Loadable::Loading => view! { <p class="placeholder-text">"Loading..."</p> }.into_view(),
        Loadable::Failed(msg) => view! { <p class="error-message">{msg}</p> }.into_view(),
    };

    let leaderboard_view = move || match social.get() {
        Loadable::Ready((_, entries)) => list_or_placeholder(
            leaderboard_rows(&entries, user_id),
            "Leaderboard data is currently unavailable.",
            |row| {
                let class = if row.is_current_user { "leaderboard-item current-user" } else { "leaderboard-item" };
                view! {
                    <li class=class>
                        <span class="rank">{row.rank}</span>
                        <span class="name">{row.username}</span>
                        <span class="xp">{format!("{} XP", row.weekly_xp)}</span>
                    </li>
                }
            },
        ),
        Loadable::Loading => view! { <p class="placeholder-text">"Loading..."</p> }.into_view(),
        Loadable::Failed(_) => ().into_view(),
    };

    view! {
        <div class="friends">
            <NavBar set_view=set_view active=AppView::Friends />

            <section class="friends-section">
                <h2>"Add a Friend"</h2>
                <form id="add-friend-form" on:submit=add_friend>
                    <input
                        id="friend-username"
                        type="text"
                        placeholder="Friend's username"
                        on:input=move |ev| set_friend_name.set(event_target_value(&ev))
                        prop:value=friend_name
                    />
                    <button type="submit" disabled=move || sending.get()>"Send Request"</button>
                </form>
                <p
                    id="friend-request-message"
                    class=move || match message.get() {
                        Some(m) if m.success => "form-message success",
                        Some(_) => "form-message error",
                        None => "form-message",
                    }
                >
                    {move || message.get().map(|m| m.text).unwrap_or_default()}
                </p>
            </section>

            <section class="friends-section">
                <h2>"Pending Requests"</h2>
                <div id="pending-requests-container">{pending_view}</div>
            </section>

            <section class="friends-section">
                <h2>"Friends"</h2>
                <div id="friends-list-container">{friends_view}</div>
            </section>

            <section class="friends-section">
                <h2>"Weekly Leaderboard"</h2>
                <ol id="leaderboard-list" class="leaderboard">{leaderboard_view}</ol>
            </section>
        </div>
    }
    .into_view()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_text_prefers_server_message() {
        let err = ApiError::Status { status: 404, message: Some("User not found.".into()) };
        assert_eq!(failure_text(&err), "User not found.");
    }

    #[test]
    fn failure_text_for_network_errors() {
        assert_eq!(failure_text(&ApiError::Network("offline".into())), NETWORK_ERROR_MESSAGE);
    }

    fn message(text: &str, success: bool, generation: u32) -> FormMessage {
        FormMessage { text: text.into(), success, generation }
    }

    #[test]
    fn stale_clear_timer_keeps_newer_message() {
        // First request succeeded, second failed before the first timer fired
        let mut slot = Some(message("User not found.", false, 2));
        clear_if_current(&mut slot, 1);
        assert_eq!(slot, Some(message("User not found.", false, 2)));
    }

    #[test]
    fn clear_timer_removes_its_own_message() {
        let mut slot = Some(message("Friend request sent.", true, 1));
        clear_if_current(&mut slot, 1);
        assert_eq!(slot, None);
    }
}

use leptos::*;

use crate::logging;
use crate::pages::{Catalog, Dashboard, Friends, Login, Profile, Quests, Register};
use crate::storage;
use crate::types::{AppView, SessionRecord};

/// Gate for every authenticated view. Without a readable session record the
/// app switches to the login view and the caller renders nothing.
pub fn require_session(set_view: WriteSignal<AppView>) -> Option<SessionRecord> {
    let session = guard_session(storage::load_session(), set_view);
    if session.is_none() {
        logging::info("session", "no session record, redirecting to login");
    }
    session
}

fn guard_session(session: Option<SessionRecord>, set_view: WriteSignal<AppView>) -> Option<SessionRecord> {
    if session.is_none() {
        set_view.set(AppView::Login { just_registered: false });
    }
    session
}

#[component]
pub fn App() -> impl IntoView {
    let initial_view = if storage::load_session().is_some() {
        AppView::Dashboard
    } else {
        AppView::Login { just_registered: false }
    };
    let (current_view, set_view) = create_signal(initial_view);

    view! {
        <div class="app">
            {move || {
                match current_view.get() {
                    AppView::Login { just_registered } => view! { <Login set_view=set_view just_registered=just_registered /> }.into_view(),
                    AppView::Register => view! { <Register set_view=set_view /> }.into_view(),
                    AppView::Dashboard => view! { <Dashboard set_view=set_view /> }.into_view(),
                    AppView::Catalog => view! { <Catalog set_view=set_view /> }.into_view(),
                    AppView::Profile => view! { <Profile set_view=set_view /> }.into_view(),
                    AppView::Quests => view! { <Quests set_view=set_view /> }.into_view(),
                    AppView::Friends => view! { <Friends set_view=set_view /> }.into_view(),
                }
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> SessionRecord {
        SessionRecord { id: 3, username: "ana".into(), goals: None, equipment: vec![] }
    }

    #[test]
    fn missing_session_sends_user_to_login() {
        let runtime = create_runtime();
        let (view, set_view) = create_signal(AppView::Dashboard);

        assert_eq!(guard_session(None, set_view), None);
        assert_eq!(view.get_untracked(), AppView::Login { just_registered: false });

        runtime.dispose();
    }

    #[test]
    fn present_session_leaves_view_alone() {
        let runtime = create_runtime();
        let (view, set_view) = create_signal(AppView::Profile);

        assert_eq!(guard_session(Some(record()), set_view), Some(record()));
        assert_eq!(view.get_untracked(), AppView::Profile);

        runtime.dispose();
    }
}

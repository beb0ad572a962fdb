use gloo_timers::callback::Timeout;
use leptos::*;

use crate::config::{TOAST_ENTER_MS, TOAST_FADE_MS, TOAST_VISIBLE_MS};
use crate::storage;
use crate::types::{AppView, Exercise};
use crate::view_model::{HudView, ScheduledToast, ToastKind};

/// Every list on every page goes through here so empty collections get a
/// message instead of a blank container.
pub fn list_or_placeholder<T, V, F>(items: Vec<T>, empty_message: &str, render: F) -> View
where
    F: FnMut(T) -> V,
    V: IntoView,
{
    if items.is_empty() {
        view! { <p class="placeholder-text">{empty_message.to_string()}</p> }.into_view()
    } else {
        items.into_iter().map(render).collect_view()
    }
}

#[component]
pub fn NavBar(set_view: WriteSignal<AppView>, active: AppView) -> impl IntoView {
    let links = [
        (AppView::Dashboard, "Dashboard"),
        (AppView::Catalog, "Exercises"),
        (AppView::Quests, "Quests"),
        (AppView::Profile, "Profile"),
        (AppView::Friends, "Friends"),
    ];

    let do_logout = move |_| {
        storage::clear_session();
        set_view.set(AppView::Login { just_registered: false });
    };

    view! {
        <nav class="main-nav">
            <div class="nav-logo">"FitQuest"</div>
            {links.into_iter().map(|(target, label)| {
                let class = if target == active { "nav-link active" } else { "nav-link" };
                view! {
                    <button class=class on:click=move |_| set_view.set(target.clone())>{label}</button>
                }
            }).collect_view()}
            <button id="logout-btn" class="nav-link logout" on:click=do_logout>"Logout"</button>
        </nav>
    }
}

#[component]
pub fn XpBar(percent: f64, text: String) -> impl IntoView {
    view! {
        <div class="xp-bar">
            <div id="xp-bar-fill" class="xp-bar-fill" style=format!("width: {}%", percent)></div>
        </div>
        <span id="xp-text" class="xp-text">{text}</span>
    }
}

#[component]
pub fn Hud(hud: HudView, #[prop(optional)] show_streak: bool) -> impl IntoView {
    view! {
        <div class="hud">
            <span id="username-display" class="hud-username">{hud.username}</span>
            <span class="hud-level">"Level "<span id="level-display">{hud.level}</span></span>
            {show_streak.then(|| view! { <span id="streak-display" class="hud-streak">{hud.streak_text}</span> })}
            <XpBar percent=hud.xp_percent text=hud.xp_text />
        </div>
    }
}

#[component]
pub fn ExerciseCard(exercise: Exercise) -> impl IntoView {
    view! {
        <div class="exercise-item">
            <h3>{exercise.name}</h3>
            {exercise.video_url.map(|src| view! {
                <video class="exercise-video" src=src loop=true autoplay=true muted=true playsinline=true></video>
            })}
            <div class="details">
                <p>{exercise.description}</p>
                <span><strong>"Suggested:"</strong>" 3 Sets of 8-12 Reps"</span>
            </div>
        </div>
    }
}

// ============ REWARD TOASTS ============

/// A toast on screen. `shown` flips in place so the node stays mounted and
/// the CSS transition can run in both directions.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveToast {
    pub id: u32,
    pub text: String,
    pub kind: ToastKind,
    pub shown: RwSignal<bool>,
}

impl ActiveToast {
    pub fn new(id: u32, text: String, kind: ToastKind) -> Self {
        Self { id, text, kind, shown: create_rw_signal(false) }
    }

    pub fn class(&self) -> String {
        let show = if self.shown.get() { " show" } else { "" };
        format!("notification {}{}", self.kind.class(), show)
    }
}

/// Each toast appears at its scheduled offset, stays for the visible window,
/// then fades out before it is removed.
pub fn schedule_toasts(
    scheduled: Vec<ScheduledToast>,
    set_toasts: WriteSignal<Vec<ActiveToast>>,
    next_id: StoredValue<u32>,
) {
    for ScheduledToast { text, kind, appear_at_ms } in scheduled {
        let id = next_id.get_value();
        next_id.set_value(id.wrapping_add(1));

        Timeout::new(appear_at_ms, move || {
            let toast = ActiveToast::new(id, text, kind);
            let shown = toast.shown;
            set_toasts.update(|t| t.push(toast));
            Timeout::new(TOAST_ENTER_MS, move || shown.set(true)).forget();
            Timeout::new(TOAST_VISIBLE_MS, move || shown.set(false)).forget();
            Timeout::new(TOAST_VISIBLE_MS + TOAST_FADE_MS, move || {
                set_toasts.update(|t| t.retain(|toast| toast.id != id));
            })
            .forget();
        })
        .forget();
    }
}

#[component]
pub fn ToastStack(toasts: ReadSignal<Vec<ActiveToast>>) -> impl IntoView {
    view! {
        <div class="notification-stack">
            <For
                each=move || toasts.get()
                key=|t| t.id
                children=|t| {
                    let text = t.text.clone();
                    view! { <div class=move || t.class()>{text}</div> }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_class_follows_shown_without_replacing_the_toast() {
        let runtime = create_runtime();

        let toast = ActiveToast::new(4, "Badge Unlocked: C".into(), ToastKind::Badge);
        let (toasts, set_toasts) = create_signal(vec![toast.clone()]);
        assert_eq!(toast.class(), "notification badge");

        toast.shown.set(true);
        assert_eq!(toast.class(), "notification badge show");
        // Same entry in the list, only its flag changed
        assert_eq!(toasts.with_untracked(|t| t[0].id), 4);
        assert!(toasts.with_untracked(|t| t[0].shown.get_untracked()));

        toast.shown.set(false);
        assert_eq!(toast.class(), "notification badge");
        set_toasts.update(|t| t.retain(|x| x.id != 4));
        assert!(toasts.with_untracked(Vec::is_empty));

        runtime.dispose();
    }
}

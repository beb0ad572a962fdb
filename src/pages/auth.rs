use leptos::*;

use crate::api::{self, ApiError, Registration};
use crate::config::{EQUIPMENT_CHOICES, GOAL_CHOICES};
use crate::logging;
use crate::storage;
use crate::types::{AppView, SessionRecord};

const ERROR_ID: &str = "error-message";
const NOTICE_ID: &str = "success-message";

#[derive(Clone, Debug, PartialEq)]
enum LoginOutcome {
    Navigate(AppView),
    ShowError(String),
}

/// The session is persisted only when the server accepted the credentials.
fn login_outcome(
    result: Result<SessionRecord, ApiError>,
    persist: impl FnOnce(&SessionRecord) -> Result<(), String>,
) -> LoginOutcome {
    match result {
        Ok(session) => match persist(&session) {
            Ok(()) => LoginOutcome::Navigate(AppView::Dashboard),
            Err(_) => LoginOutcome::ShowError("Could not save your session in this browser.".into()),
        },
        Err(e) => LoginOutcome::ShowError(e.user_message("An error occurred.")),
    }
}

#[component]
pub fn Login(set_view: WriteSignal<AppView>, just_registered: bool) -> impl IntoView {
    let (username, set_username) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(Option::<String>::None);
    let (notice, set_notice) = create_signal(
        just_registered.then(|| "Registration successful! Please log in.".to_string()),
    );
    let (loading, set_loading) = create_signal(false);

    let do_login = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }
        let username = username.get_untracked();
        let password = password.get_untracked();
        set_loading.set(true);
        set_error.set(None);
        set_notice.set(None);

        spawn_local(async move {
            let result = api::login(&username, &password).await;
            match &result {
                Ok(_) => logging::info("auth", &format!("logged in as {}", username)),
                Err(e) => logging::error("auth", &format!("login failed: {}", e)),
            }
            let persist = |s: &SessionRecord| {
                storage::save_session(s).inspect_err(|e| logging::error("auth", e))
            };
            match login_outcome(result, persist) {
                LoginOutcome::Navigate(view) => set_view.set(view),
                LoginOutcome::ShowError(msg) => {
                    set_error.set(Some(msg));
                    set_loading.set(false);
                }
            }
        });
    };

    view! {
        <div class="auth-container">
            <div class="auth-logo">"FITQUEST"</div>
            <form id="login-form" class="auth-card" on:submit=do_login>
                <h2 class="auth-title">"Log in"</h2>

                {move || notice.get().map(|n| view! { <div id=NOTICE_ID class="auth-success">{n}</div> })}
                {move || error.get().map(|e| view! { <div id=ERROR_ID class="auth-error">{e}</div> })}

                <input
                    type="text"
                    name="username"
                    class="auth-input"
                    placeholder="Username"
                    required=true
                    on:input=move |ev| set_username.set(event_target_value(&ev))
                    prop:value=username
                />

                <input
                    type="password"
                    name="password"
                    class="auth-input"
                    placeholder="Password"
                    required=true
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                    prop:value=password
                />

                <button type="submit" class="auth-button" disabled=move || loading.get()>
                    {move || if loading.get() { "Logging in..." } else { "Log in" }}
                </button>

                <div class="auth-switch">
                    "No account? "
                    <button type="button" class="auth-link" on:click=move |_| set_view.set(AppView::Register)>
                        "Register"
                    </button>
                </div>
            </form>
        </div>
    }
}

#[component]
pub fn Register(set_view: WriteSignal<AppView>) -> impl IntoView {
    let (username, set_username) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (goals, set_goals) = create_signal(GOAL_CHOICES[0].to_string());
    let (equipment, set_equipment) = create_signal(Vec::<String>::new());
    let (error, set_error) = create_signal(Option::<String>::None);
    let (loading, set_loading) = create_signal(false);

    let toggle_equipment = move |item: &'static str, checked: bool| {
        set_equipment.update(|list| {
            list.retain(|e| e != item);
            if checked {
                list.push(item.to_string());
            }
        });
    };

    let do_register = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }
        let registration = Registration {
            username: username.get_untracked(),
            password: password.get_untracked(),
            goals: goals.get_untracked(),
            // Keep the checkbox order regardless of click order
            equipment: EQUIPMENT_CHOICES
                .iter()
                .filter(|c| equipment.with_untracked(|sel| sel.iter().any(|s| s == *c)))
                .map(|c| c.to_string())
                .collect(),
        };
        set_loading.set(true);
        set_error.set(None);

        spawn_local(async move {
            match api::register(&registration).await {
                Ok(_) => {
                    logging::info("auth", &format!("registered {}", registration.username));
                    set_view.set(AppView::Login { just_registered: true });
                }
                Err(e) => {
                    logging::error("auth", &format!("registration failed: {}", e));
                    set_error.set(Some(e.user_message("An error occurred during registration.")));
                    set_loading.set(false);
                }
            }
        });
    };

    view! {
        <div class="auth-container">
            <div class="auth-logo">"FITQUEST"</div>
            <form id="register-form" class="auth-card" on:submit=do_register>
                <h2 class="auth-title">"Create account"</h2>

                {move || error.get().map(|e| view! { <div id=ERROR_ID class="auth-error">{e}</div> })}

                <input
                    type="text"
                    name="username"
                    class="auth-input"
                    placeholder="Username"
                    required=true
                    on:input=move |ev| set_username.set(event_target_value(&ev))
                    prop:value=username
                />

                <input
                    type="password"
                    name="password"
                    class="auth-input"
                    placeholder="Password"
                    required=true
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                    prop:value=password
                />

                <label class="auth-label">"Goal"</label>
                <select name="goals" class="auth-input" on:change=move |ev| set_goals.set(event_target_value(&ev))>
                    {GOAL_CHOICES.iter().copied().map(|g| view! {
                        <option value=g selected=move || goals.get() == g>{g}</option>
                    }).collect_view()}
                </select>

                <fieldset class="equipment-choices">
                    <legend>"Available equipment"</legend>
                    {EQUIPMENT_CHOICES.iter().copied().map(|item| {
                        view! {
                            <label class="equipment-choice">
                                <input
                                    type="checkbox"
                                    name="equipment"
                                    value=item
                                    on:change=move |ev| toggle_equipment(item, event_target_checked(&ev))
                                />
                                {item}
                            </label>
                        }
                    }).collect_view()}
                </fieldset>

                <button type="submit" class="auth-button" disabled=move || loading.get()>
                    {move || if loading.get() { "Creating account..." } else { "Create account" }}
                </button>

                <div class="auth-switch">
                    "Already have an account? "
                    <button
                        type="button"
                        class="auth-link"
                        on:click=move |_| set_view.set(AppView::Login { just_registered: false })
                    >
                        "Log in"
                    </button>
                </div>
            </form>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn record() -> SessionRecord {
        SessionRecord { id: 1, username: "ana".into(), goals: None, equipment: vec![] }
    }

    #[test]
    fn rejected_login_shows_server_message_and_stores_nothing() {
        let persisted = Cell::new(false);
        let result = Err(ApiError::Status { status: 401, message: Some("Invalid credentials".into()) });

        let outcome = login_outcome(result, |_| {
            persisted.set(true);
            Ok(())
        });

        assert_eq!(outcome, LoginOutcome::ShowError("Invalid credentials".into()));
        assert!(!persisted.get());
    }

    #[test]
    fn rejected_login_without_body_uses_fallback() {
        let outcome = login_outcome(Err(ApiError::Status { status: 500, message: None }), |_| Ok(()));
        assert_eq!(outcome, LoginOutcome::ShowError("An error occurred.".into()));
    }

    #[test]
    fn accepted_login_persists_then_opens_dashboard() {
        let mut stored = None;
        let outcome = login_outcome(Ok(record()), |s| {
            stored = Some(s.clone());
            Ok(())
        });

        assert_eq!(outcome, LoginOutcome::Navigate(AppView::Dashboard));
        assert_eq!(stored, Some(record()));
    }

    #[test]
    fn notice_and_error_have_separate_ids() {
        assert_ne!(NOTICE_ID, ERROR_ID);
    }

    #[test]
    fn unsaved_session_keeps_user_on_login() {
        let outcome = login_outcome(Ok(record()), |_| Err("quota exceeded".into()));
        assert_eq!(outcome, LoginOutcome::ShowError("Could not save your session in this browser.".into()));
    }
}

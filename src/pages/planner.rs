use gloo_timers::callback::Timeout;
use leptos::*;

use crate::api::{self, ApiError};
use crate::components::{list_or_placeholder, schedule_toasts, ActiveToast, ExerciseCard, ToastStack};
use crate::config::MASCOT_CELEBRATE_MS;
use crate::logging;
use crate::types::{CompletionResult, SessionRecord, Workout};
use crate::view_model::{reward_toasts, MascotMood};

/// What the routine panel is showing. The generated workout lives here and
/// nowhere else until it is completed or replaced.
#[derive(Clone, Debug, PartialEq)]
pub enum PlanState {
    Idle,
    Generating,
    Ready(Workout),
    Completed(CompletionResult),
    Failed(&'static str),
    /// Saving failed; the workout stays so the user can submit it again.
    CompleteFailed(Workout),
}

const SAVE_FAILED: &str = "Error saving progress. Please try again.";

impl PlanState {
    /// The workout the complete button would submit, if any.
    pub fn pending_workout(&self) -> Option<&Workout> {
        match self {
            PlanState::Ready(w) | PlanState::CompleteFailed(w) if !w.is_empty() => Some(w),
            _ => None,
        }
    }

    pub fn can_complete(&self) -> bool {
        self.pending_workout().is_some()
    }

    pub fn after_completion(workout: Workout, outcome: &Result<CompletionResult, ApiError>) -> Self {
        match outcome {
            Ok(result) => PlanState::Completed(result.clone()),
            Err(_) => PlanState::CompleteFailed(workout),
        }
    }
}

#[component]
pub fn WorkoutPlanner(
    session: SessionRecord,
    #[prop(optional)] on_completed: Option<Callback<CompletionResult>>,
    #[prop(optional)] set_mood: Option<WriteSignal<MascotMood>>,
) -> impl IntoView {
    let user_id = session.id;
    let session = store_value(session);

    let (plan, set_plan) = create_signal(PlanState::Idle);
    let (busy, set_busy) = create_signal(false);
    let (toasts, set_toasts) = create_signal(Vec::<ActiveToast>::new());
    let next_toast_id = store_value(0u32);

    let mood = move |m: MascotMood| {
        if let Some(set) = set_mood {
            set.set(m);
        }
    };

    let generate = move |_| {
        if busy.get_untracked() {
            return;
        }
        set_busy.set(true);
        set_plan.set(PlanState::Generating);
        mood(MascotMood::Working);

        spawn_local(async move {
            match api::generate_workout(&session.get_value()).await {
                Ok(workout) => set_plan.set(PlanState::Ready(workout)),
                Err(e) => {
                    logging::error("workout", &format!("generate failed: {}", e));
                    set_plan.set(PlanState::Failed("Could not generate workout."));
                    mood(MascotMood::Idle);
                }
            }
            set_busy.set(false);
        });
    };

    let complete = move |_| {
        let Some(workout) = plan.with_untracked(|p| p.pending_workout().cloned()) else {
            return;
        };
        if busy.get_untracked() {
            return;
        }
        set_busy.set(true);
        mood(MascotMood::Celebrating);

        spawn_local(async move {
            let outcome = api::complete_workout(user_id, &workout).await;
            set_plan.set(PlanState::after_completion(workout, &outcome));
            match outcome {
                Ok(result) => {
                    logging::info("workout", &format!("completed, +{} XP", result.xp_gained));
                    schedule_toasts(reward_toasts(&result), set_toasts, next_toast_id);
                    if let Some(cb) = on_completed {
                        cb.call(result);
                    }
                    Timeout::new(MASCOT_CELEBRATE_MS, move || mood(MascotMood::Idle)).forget();
                }
                Err(e) => {
                    logging::error("workout", &format!("complete failed: {}", e));
                    mood(MascotMood::Idle);
                }
            }
            set_busy.set(false);
        });
    };

    view! {
        <section class="workout-planner">
            <button id="generate-workout-btn" class="button-primary" on:click=generate disabled=move || busy.get()>
                "Generate Workout"
            </button>

            <div id="workout-routine" class="workout-routine">
                {move || match plan.get() {
                    PlanState::Idle => view! {
                        <p class="placeholder-text">"Generate a workout to start your mission."</p>
                    }.into_view(),
                    PlanState::Generating => view! {
                        <p class="placeholder-text">"Generating your mission..."</p>
                    }.into_view(),
                    PlanState::Ready(workout) => list_or_placeholder(
                        workout,
                        "Could not generate a workout.",
                        |exercise| view! { <ExerciseCard exercise=exercise /> },
                    ),
                    PlanState::Completed(result) => view! {
                        <div class="workout-complete-message">
                            <h2>"Mission Complete!"</h2>
                            <p>"You gained "<strong>{format!("{} XP", result.xp_gained)}</strong>"!"</p>
                            {result.leveled_up.then(|| view! { <p class="level-up-message">"LEVEL UP!"</p> })}
                        </div>
                    }.into_view(),
                    PlanState::Failed(msg) => view! { <p class="error-message">{msg}</p> }.into_view(),
                    PlanState::CompleteFailed(workout) => view! {
                        <p class="error-message">{SAVE_FAILED}</p>
                        {workout.into_iter().map(|exercise| view! { <ExerciseCard exercise=exercise /> }).collect_view()}
                    }.into_view(),
                }}
            </div>

            <Show when=move || plan.with(PlanState::can_complete)>
                <button id="complete-workout-btn" class="button-secondary" on:click=complete disabled=move || busy.get()>
                    "Complete Workout"
                </button>
            </Show>

            <ToastStack toasts=toasts />
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Exercise;

    fn workout() -> Workout {
        vec![Exercise {
            name: "Squats".into(),
            description: String::new(),
            muscle_group: None,
            difficulty: None,
            equipment: None,
            video_url: None,
        }]
    }

    #[test]
    fn complete_only_offered_for_non_empty_workout() {
        assert!(!PlanState::Idle.can_complete());
        assert!(!PlanState::Ready(vec![]).can_complete());
        assert!(!PlanState::Failed("x").can_complete());
        assert!(PlanState::Ready(workout()).can_complete());
    }

    #[test]
    fn failed_save_keeps_workout_for_another_try() {
        let outcome = Err(ApiError::Status { status: 500, message: None });
        let state = PlanState::after_completion(workout(), &outcome);

        assert_eq!(state, PlanState::CompleteFailed(workout()));
        assert!(state.can_complete());
        assert_eq!(state.pending_workout(), Some(&workout()));
    }

    #[test]
    fn successful_save_clears_pending_workout() {
        let result = CompletionResult {
            xp_gained: 40,
            leveled_up: true,
            newly_completed_quests: None,
            newly_earned_badges: None,
        };
        let state = PlanState::after_completion(workout(), &Ok(result.clone()));

        assert_eq!(state, PlanState::Completed(result));
        assert!(!state.can_complete());
    }
}

use leptos::*;

use crate::api;
use crate::app::require_session;
use crate::components::{list_or_placeholder, NavBar};
use crate::config::EQUIPMENT_CHOICES;
use crate::logging;
use crate::pages::planner::WorkoutPlanner;
use crate::types::{AppView, Exercise, Loadable};

#[component]
fn CatalogItem(exercise: Exercise) -> impl IntoView {
    let tags = [exercise.muscle_group, exercise.difficulty, exercise.equipment];
    view! {
        <div class="exercise-item catalog-item">
            <h3>{exercise.name}</h3>
            <div class="exercise-tags">
                {tags.into_iter().flatten().map(|t| view! { <span class="tag">{t}</span> }).collect_view()}
            </div>
            <p>{exercise.description}</p>
        </div>
    }
}

#[component]
pub fn Catalog(set_view: WriteSignal<AppView>) -> impl IntoView {
    let Some(session) = require_session(set_view) else {
        return ().into_view();
    };

    let (filter, set_filter) = create_signal(String::new());
    let (exercises, set_exercises) = create_signal(Loadable::<Vec<Exercise>>::Loading);

    // Re-runs on every filter change
    create_effect(move |_| {
        let equipment = filter.get();
        set_exercises.set(Loadable::Loading);
        spawn_local(async move {
            match api::fetch_exercises(&equipment).await {
                Ok(list) => set_exercises.set(Loadable::Ready(list)),
                Err(e) => {
                    logging::error("catalog", &format!("loading exercises failed: {}", e));
                    set_exercises.set(Loadable::Failed("Could not load exercises.".into()));
                }
            }
        });
    });

    view! {
        <div class="catalog">
            <NavBar set_view=set_view active=AppView::Catalog />

            <section class="catalog-section">
                <h1>"Exercise Library"</h1>
                <label for="equipment-filter">"Equipment: "</label>
                <select id="equipment-filter" on:change=move |ev| set_filter.set(event_target_value(&ev))>
                    <option value="">"All"</option>
                    {EQUIPMENT_CHOICES.iter().copied().map(|e| view! { <option value=e>{e}</option> }).collect_view()}
                </select>

                <div id="exercise-list" class="exercise-list">
                    {move || match exercises.get() {
                        Loadable::Loading => view! { <p class="placeholder-text">"Loading exercises..."</p> }.into_view(),
                        Loadable::Failed(msg) => view! { <p class="error-message">{msg}</p> }.into_view(),
                        Loadable::Ready(list) => list_or_placeholder(
                            list,
                            "No exercises match this filter.",
                            |exercise| view! { <CatalogItem exercise=exercise /> },
                        ),
                    }}
                </div>
            </section>

            <WorkoutPlanner session=session />
        </div>
    }
    .into_view()
}

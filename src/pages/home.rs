//! Home Page
//!
//! The user's projects, oldest first, plus an inline create form.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::ErrorDisplay;
use crate::context::{use_api, use_app_context};
use crate::format::{file_count_text, iso_date_text};
use crate::models::ProjectRecord;
use crate::routes::Route;

#[component]
pub fn HomePage() -> impl IntoView {
    let api = use_api();
    let ctx = use_app_context();
    let (projects, set_projects) = signal::<Vec<ProjectRecord>>(Vec::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<String>>(None);

    let (show_form, set_show_form) = signal(false);
    let name = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let (message, set_message) = signal(String::new());

    let list_api = api.clone();
    spawn_local(async move {
        match api::list_projects(&list_api).await {
            Ok(mut list) => {
                api::sort_by_created(&mut list);
                tracing::debug!("[DATA] {} projects", list.len());
                set_projects.set(list);
            }
            Err(e) => set_error.set(Some(e.to_string())),
        }
        set_loading.set(false);
    });

    let reset_form = move || {
        set_show_form.set(false);
        name.set(String::new());
        description.set(String::new());
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_message.set(String::new());
        let api = api.clone();
        let (n, d) = (name.get_untracked(), description.get_untracked());
        spawn_local(async move {
            match api::create_project(&api, &n, &d).await {
                Ok(project) => {
                    tracing::info!("[DATA] created project {}", project.projectname);
                    set_message.set(format!("Project \"{}\" created", project.projectname));
                    set_projects.update(|list| list.push(project));
                    reset_form();
                }
                Err(api::ApiError::Validation(msg)) => set_message.set(msg),
                Err(e) => set_message.set(format!("Error: {}", e)),
            }
        });
    };

    let project_row = move |p: ProjectRecord| {
        let id = p.id.clone();
        let created = p.created_at.as_deref().map(|c| format!("Created: {}", iso_date_text(Some(c))));
        view! {
            <li class="project-item">
                <div class="project-info">
                    <strong>{p.projectname.clone()}</strong>
                    <div class="project-description">{p.description.clone().unwrap_or_default()}</div>
                    {created.map(|c| view! { <div class="project-created">{c}</div> })}
                </div>
                <div class="project-footer">
                    <span class="project-files">{file_count_text(p.files.len())}</span>
                    <button
                        class="project-tab"
                        aria-label=format!("View project {}", p.projectname)
                        on:click=move |_| ctx.navigate(Route::Project { id: id.clone() })
                    >
                        "View Project"
                    </button>
                </div>
            </li>
        }
    };

    view! {
        <div class="home-container">
            <div class="form-wrapper">
                <h1>"Projects"</h1>
                <Show when=move || loading.get()>
                    <div>"Loading projects..."</div>
                </Show>
                <ErrorDisplay message=Signal::derive(move || error.get().map(|e| format!("Error: {}", e))) />
                {move || (!loading.get() && error.with(|e| e.is_none()) && projects.with(|p| p.is_empty()))
                    .then(|| view! { <div>"No projects yet."</div> })}
                <ul class="project-list">
                    <For each=move || projects.get() key=|p| p.id.clone() children=project_row />
                </ul>
                <Show
                    when=move || show_form.get()
                    fallback=move || view! {
                        <button class="project-tab" aria-label="Create New Project" on:click=move |_| set_show_form.set(true)>
                            "+ Create New Project"
                        </button>
                    }
                >
                    <form class="create-project-form" on:submit=on_submit.clone()>
                        <div>
                            <label>"Name"</label>
                            <input prop:value=move || name.get() on:input=move |ev| name.set(event_target_value(&ev)) />
                        </div>
                        <div>
                            <label>"Description"</label>
                            <textarea
                                prop:value=move || description.get()
                                on:input=move |ev| description.set(event_target_value(&ev))
                            ></textarea>
                        </div>
                        <div>
                            <button type="submit" class="main-button">"Save"</button>
                            <button type="button" class="main-button" on:click=move |_| {
                                reset_form();
                                set_message.set(String::new());
                            }>
                                "Cancel"
                            </button>
                        </div>
                    </form>
                </Show>
                {move || (!message.with(|m| m.is_empty())).then(|| view! { <div class="form-message">{message.get()}</div> })}
            </div>
        </div>
    }
}

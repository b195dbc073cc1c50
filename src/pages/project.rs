//! Project Page
//!
//! One project's files by kind, plus name/description editing.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::ErrorDisplay;
use crate::context::{use_api, use_app_context};
use crate::models::{ProjectFile, ProjectRecord};
use crate::routes::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProjectTab {
    Database,
    Filtered,
    Codebook,
    Coding,
}

impl ProjectTab {
    const ALL: [ProjectTab; 4] = [ProjectTab::Database, ProjectTab::Filtered, ProjectTab::Codebook, ProjectTab::Coding];

    fn label(self) -> &'static str {
        match self {
            ProjectTab::Database => "Database",
            ProjectTab::Filtered => "Filtered Database",
            ProjectTab::Codebook => "Codebook",
            ProjectTab::Coding => "Coding",
        }
    }

    /// `file_type` of the project file shown under this tab
    fn file_type(self) -> &'static str {
        match self {
            ProjectTab::Database => "raw_data",
            ProjectTab::Filtered => "filtered_data",
            ProjectTab::Codebook => "codebook",
            ProjectTab::Coding => "coding",
        }
    }

    /// Where the View button leads
    fn view_route(self, file: &ProjectFile) -> Option<Route> {
        let schema = Some(file.schema_name.clone());
        match self {
            ProjectTab::Database => Some(Route::Data { database: schema }),
            ProjectTab::Filtered => Some(Route::FilteredData { database: schema }),
            ProjectTab::Codebook => Some(Route::ViewCodebook { selected: schema }),
            ProjectTab::Coding => Some(Route::ViewCoding { selected: schema }),
        }
    }
}

#[component]
pub fn ProjectPage(#[prop(into)] id: String) -> impl IntoView {
    let api = use_api();
    let ctx = use_app_context();
    let (project, set_project) = signal::<Option<ProjectRecord>>(None);
    let (loading, set_loading) = signal(true);
    let (tab, set_tab) = signal(ProjectTab::Database);

    let editing = RwSignal::new(false);
    let name = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let (error, set_error) = signal::<Option<String>>(None);

    let load_api = api.clone();
    spawn_local(async move {
        match api::list_projects(&load_api).await {
            Ok(list) => set_project.set(api::find_project(&list, &id).cloned()),
            Err(e) => {
                tracing::warn!("[DATA] project lookup failed: {}", e);
                set_project.set(None);
            }
        }
        set_loading.set(false);
    });

    let start_edit = move |_: web_sys::MouseEvent| {
        project.with_untracked(|p| {
            if let Some(p) = p {
                name.set(p.projectname.clone());
                description.set(p.description.clone().unwrap_or_default());
            }
        });
        set_error.set(None);
        editing.set(true);
    };

    let save_edit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(project_id) = project.with_untracked(|p| p.as_ref().map(|p| p.id.clone())) else {
            return;
        };
        let (n, d) = (name.get_untracked(), description.get_untracked());
        let api = api.clone();
        spawn_local(async move {
            match api::update_project(&api, &project_id, &n, &d).await {
                Ok(()) => {
                    tracing::info!("[DATA] updated project {}", project_id);
                    set_project.update(|p| {
                        if let Some(p) = p {
                            p.projectname = n.trim().to_string();
                            p.description = Some(d).filter(|d| !d.is_empty());
                        }
                    });
                    editing.set(false);
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
        });
    };

    let tab_panel = move || {
        let current = tab.get();
        let file = project.with(|p| p.as_ref().and_then(|p| p.file_of_type(current.file_type()).cloned()));
        let view_button = file.as_ref().and_then(|f| current.view_route(f)).map(|route| {
            view! {
                <button type="button" class="main-button" on:click=move |_| ctx.navigate(route.clone())>
                    "View"
                </button>
            }
        });
        view! {
            <div class="project-tab-panel">
                <h2>{current.label()}</h2>
                <div class="project-file-row">
                    <div>{file.as_ref().map_or_else(|| "No file yet".to_string(), |f| f.label().to_string())}</div>
                    {view_button}
                </div>
            </div>
        }
    };

    let loaded = move || {
        let save_edit = save_edit.clone();
        let Some(p) = project.get() else {
            return view! { <div>"Project not found."</div> }.into_any();
        };
        view! {
            <div class="project-header">
                <h1>{p.projectname.clone()}</h1>
                <p class="project-description">{p.description.clone().unwrap_or_default()}</p>
                <Show when=move || !editing.get()>
                    <button class="project-tab" on:click=start_edit>"Edit"</button>
                </Show>
            </div>
            <Show when=move || editing.get()>
                <form class="edit-project-form" on:submit=save_edit.clone()>
                    <label>"Name"</label>
                    <input prop:value=move || name.get() on:input=move |ev| name.set(event_target_value(&ev)) />
                    <label>"Description"</label>
                    <textarea
                        prop:value=move || description.get()
                        on:input=move |ev| description.set(event_target_value(&ev))
                    ></textarea>
                    <button type="submit" class="main-button">"Save"</button>
                    <button type="button" class="main-button" on:click=move |_| editing.set(false)>"Cancel"</button>
                </form>
                <ErrorDisplay message=error />
            </Show>
            <div class="project-tabs">
                {ProjectTab::ALL.into_iter().map(|t| view! {
                    <button
                        type="button"
                        class=move || if tab.get() == t { "project-tab selected" } else { "project-tab" }
                        on:click=move |ev| {
                            ev.stop_propagation();
                            set_tab.set(t);
                        }
                    >
                        {t.label()}
                    </button>
                }).collect_view()}
            </div>
            {tab_panel}
        }
        .into_any()
    };

    view! {
        <div class="home-container">
            <div class="form-wrapper">
                <Show when=move || !loading.get() fallback=|| view! { <div>"Loading project..."</div> }>
                    {loaded.clone()}
                </Show>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(file_type: &str, schema: &str) -> ProjectFile {
        ProjectFile { file_type: file_type.into(), schema_name: schema.into(), display_name: None }
    }

    #[test]
    fn test_tab_view_routes() {
        let record = ProjectRecord {
            id: "7".into(),
            files: vec![file("raw_data", "raw_7"), file("codebook", "cb_7"), file("filtered_data", "flt_7")],
            ..Default::default()
        };
        let route_for = |tab: ProjectTab| record.file_of_type(tab.file_type()).and_then(|f| tab.view_route(f));

        assert_eq!(route_for(ProjectTab::Database), Some(Route::Data { database: Some("raw_7".into()) }));
        assert_eq!(route_for(ProjectTab::Codebook), Some(Route::ViewCodebook { selected: Some("cb_7".into()) }));
        assert_eq!(route_for(ProjectTab::Filtered), Some(Route::FilteredData { database: Some("flt_7".into()) }));
        assert_eq!(route_for(ProjectTab::Coding), None);
    }
}

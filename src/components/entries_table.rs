//! Entries Table Component
//!
//! Posts and comments of one database with page size and client-side
//! search. Clicking a row opens it in an `EntryModal`.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{Entry, EntryModal};
use crate::context::{use_api, use_config};
use crate::models::{Comment, DatabaseEntries, Submission};
use crate::search::{fetch_limit, filter_comments, filter_submissions};

pub const PAGE_SIZES: [u32; 5] = [10, 25, 50, 100, 200];

fn text(field: &Option<String>) -> String {
    field.clone().unwrap_or_default()
}

fn number(field: Option<i64>) -> String {
    field.map(|n| n.to_string()).unwrap_or_default()
}

/// Filtered data keeps only title and selftext per post
fn post_columns(filtered: bool) -> &'static [&'static str] {
    if filtered {
        &["ID", "Title", "Selftext"]
    } else {
        &["ID", "Subreddit", "Title", "Author", "Score"]
    }
}

fn post_cells(s: &Submission, filtered: bool) -> Vec<String> {
    if filtered {
        vec![s.id.clone(), text(&s.title), text(&s.selftext)]
    } else {
        vec![s.id.clone(), text(&s.subreddit), text(&s.title), text(&s.author), number(s.score)]
    }
}

#[component]
pub fn EntriesTable(
    #[prop(into)] database: Signal<Option<String>>,
    /// Column layout for filtered data
    #[prop(optional)] filtered: bool,
) -> impl IntoView {
    let api = use_api();
    let config = use_config();
    let (entries, set_entries) = signal::<Option<DatabaseEntries>>(None);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let (limit, set_limit) = signal(config.entries_page_size);
    let (search, set_search) = signal(String::new());

    // Row opened in the detail modal
    let (selected, set_selected) = signal::<Option<Entry>>(None);

    Effect::new(move |_| {
        let db = database.get().filter(|d| !d.trim().is_empty());
        let page = limit.get();
        let query = search.get();
        let Some(db) = db else {
            set_entries.set(None);
            return;
        };
        let api = api.clone();
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::database_entries(&api, &db, fetch_limit(&query, page)).await {
                Ok(data) => set_entries.set(Some(data)),
                Err(e) => {
                    tracing::warn!("[DATA] entries for {} failed: {}", db, e);
                    set_error.set(Some(format!("Error: {}", e)));
                }
            }
            set_loading.set(false);
        });
    });

    let columns = post_columns(filtered);

    let submission_row = move |s: Submission| {
        let cells = post_cells(&s, filtered);
        view! {
            <tr class="clickable-row" on:click=move |_| set_selected.set(Some(Entry::Submission(s.clone())))>
                {cells.into_iter().map(|c| view! { <td class="truncate">{c}</td> }).collect_view()}
            </tr>
        }
    };

    let comment_row = move |c: Comment| {
        view! {
            <tr class="clickable-row" on:click={
                let c = c.clone();
                move |_| set_selected.set(Some(Entry::Comment(c.clone())))
            }>
                <td>{c.id.clone()}</td>
                <td>{text(&c.subreddit)}</td>
                <td class="truncate">{text(&c.body)}</td>
                <td>{text(&c.author)}</td>
                <td>{number(c.score)}</td>
            </tr>
        }
    };

    let tables = move || {
        let Some(data) = entries.get() else {
            return None;
        };
        let q = search.get();
        let page = limit.get() as usize;
        let posts: Vec<Submission> = filter_submissions(&data.submissions, &q, page).into_iter().cloned().collect();
        let replies: Vec<Comment> = filter_comments(&data.comments, &q, page).into_iter().cloned().collect();
        let no_data = data.submissions.is_empty() && data.comments.is_empty();
        Some(view! {
            {data.message.clone().map(|m| view! { <p class="info-message">{m}</p> })}
            {(!posts.is_empty()).then(|| view! {
                <div class="table-section">
                    <h3>{format!("Sample Posts ({})", posts.len())}</h3>
                    <table class="data-table">
                        <thead>
                            <tr>{columns.iter().map(|h| view! { <th>{*h}</th> }).collect_view()}</tr>
                        </thead>
                        <tbody>{posts.into_iter().map(submission_row).collect_view()}</tbody>
                    </table>
                </div>
            })}
            {(!replies.is_empty()).then(|| view! {
                <div class="table-section">
                    <h3>{format!("Sample Comments ({})", replies.len())}</h3>
                    <table class="data-table">
                        <thead>
                            <tr><th>"ID"</th><th>"Subreddit"</th><th>"Body"</th><th>"Author"</th><th>"Score"</th></tr>
                        </thead>
                        <tbody>{replies.into_iter().map(comment_row).collect_view()}</tbody>
                    </table>
                </div>
            })}
            {no_data.then(|| view! { <p class="no-data">"No data available. Please upload a file first."</p> })}
        })
    };

    view! {
        <div class="data-table-container">
            <div class="table-controls">
                <label for="entry-limit">"Show entries: "</label>
                <select id="entry-limit" class="limit-select" on:change=move |ev| {
                    if let Ok(n) = event_target_value(&ev).parse::<u32>() {
                        set_limit.set(n);
                    }
                }>
                    {PAGE_SIZES.into_iter().map(|n| view! {
                        <option value=n.to_string() prop:selected=move || limit.get() == n>{n.to_string()}</option>
                    }).collect_view()}
                </select>
                <input
                    type="text"
                    class="search-input"
                    placeholder="Search posts/comments..."
                    prop:value=move || search.get()
                    on:input=move |ev| set_search.set(event_target_value(&ev))
                />
            </div>
            {move || error.get().map(|e| view! { <p class="error-message">{e}</p> })}
            {move || (loading.get()).then(|| view! { <p class="loading-message">"Loading database contents..."</p> })}
            {move || (entries.with(|e| e.is_none()) && !loading.get() && error.with(|e| e.is_none()))
                .then(|| view! { <p class="info-message">"Select a database to view its contents."</p> })}
            {tables}
            <EntryModal entry=selected database=database on_close=move |_| set_selected.set(None) />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filtered_layout_shows_title_and_selftext() {
        let s = Submission {
            id: "p1".into(),
            title: Some("Title".into()),
            selftext: Some("Body".into()),
            subreddit: Some("rust".into()),
            score: Some(4),
            ..Default::default()
        };
        assert_eq!(post_columns(true).len(), post_cells(&s, true).len());
        assert_eq!(post_cells(&s, true), vec!["p1", "Title", "Body"]);
        assert_eq!(post_columns(false).len(), post_cells(&s, false).len());
        assert_eq!(post_cells(&s, false), vec!["p1", "rust", "Title", "", "4"]);
    }
}

//! Entry Modal Component
//!
//! Full detail of one clicked post or comment. Posts also load their
//! comments; a reply for a post that is no longer open is dropped.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::context::use_api;
use crate::format::unix_date_text;
use crate::models::{Comment, Submission};

/// Row the modal is showing
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Submission(Submission),
    Comment(Comment),
}

impl Entry {
    pub fn id(&self) -> &str {
        match self {
            Entry::Submission(s) => &s.id,
            Entry::Comment(c) => &c.id,
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            Entry::Submission(_) => "Submission Details",
            Entry::Comment(_) => "Comment Details",
        }
    }

    /// Label/value pairs in display order; absent optional fields are skipped
    pub fn detail_rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = vec![("ID", self.id().to_string())];
        let mut push = |label: &'static str, value: Option<String>| {
            if let Some(v) = value.filter(|v| !v.is_empty()) {
                rows.push((label, v));
            }
        };
        match self {
            Entry::Submission(s) => {
                push("Subreddit", s.subreddit.clone());
                push("Title", s.title.clone());
                push("Selftext", s.selftext.clone());
                push("Author", s.author.clone());
                push("Score", s.score.map(|n| n.to_string()));
                push("Created", Some(unix_date_text(s.created_utc)));
                push("Number of Comments", s.num_comments.map(|n| n.to_string()));
            }
            Entry::Comment(c) => {
                push("Subreddit", c.subreddit.clone());
                push("Body", c.body.clone());
                push("Author", c.author.clone());
                push("Score", c.score.map(|n| n.to_string()));
                push("Created", Some(unix_date_text(c.created_utc)));
                push("Link ID", c.link_id.clone());
                push("Parent ID", c.parent_id.clone());
            }
        }
        rows
    }
}

/// Long text fields get their own block
fn is_long_field(label: &str) -> bool {
    matches!(label, "Selftext" | "Body")
}

/// A comments reply is shown only while its post is still open
fn reply_is_current(open: Option<&Entry>, requested_post: &str) -> bool {
    matches!(open, Some(Entry::Submission(s)) if s.id == requested_post)
}

#[component]
pub fn EntryModal(
    #[prop(into)] entry: Signal<Option<Entry>>,
    #[prop(into)] database: Signal<Option<String>>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let api = use_api();
    let (comments, set_comments) = signal::<Option<Result<Vec<Comment>, String>>>(None);

    Effect::new(move |_| {
        set_comments.set(None);
        let Some(Entry::Submission(post)) = entry.get() else {
            return;
        };
        let Some(db) = database.get_untracked() else {
            return;
        };
        let api = api.clone();
        spawn_local(async move {
            let result = api::submission_comments(&api, &post.id, &db).await.map_err(|e| e.to_string());
            let current = entry.try_with_untracked(|e| reply_is_current(e.as_ref(), &post.id));
            if current == Some(true) {
                set_comments.try_set(Some(result));
            } else {
                tracing::debug!("[DATA] dropped comments for closed post {}", post.id);
            }
        });
    });

    let comments_block = move || {
        comments.get().map(|result| match result {
            Err(msg) => view! { <p class="error-message">{msg}</p> }.into_any(),
            Ok(list) if list.is_empty() => view! { <p class="info-message">"No comments."</p> }.into_any(),
            Ok(list) => view! {
                <ul class="entry-comments">
                    {list.into_iter().map(|c| view! {
                        <li>
                            <strong>{c.author.unwrap_or_default()}</strong>
                            ": "
                            {c.body.unwrap_or_default()}
                        </li>
                    }).collect_view()}
                </ul>
            }.into_any(),
        })
    };

    move || {
        entry.get().map(|e| {
            let is_post = matches!(e, Entry::Submission(_));
            view! {
                <div class="modal-overlay" on:click=move |_| on_close.run(())>
                    <div class="modal-content" on:click=|ev| ev.stop_propagation()>
                        <div class="modal-header">
                            <h2>{e.heading()}</h2>
                            <button class="modal-close" on:click=move |_| on_close.run(())>"×"</button>
                        </div>
                        <div class="modal-body">
                            {e.detail_rows().into_iter().map(|(label, value)| {
                                if is_long_field(label) {
                                    view! {
                                        <div class="detail-row">
                                            <strong>{format!("{}:", label)}</strong>
                                            <div class="detail-text">{value}</div>
                                        </div>
                                    }.into_any()
                                } else {
                                    view! {
                                        <div class="detail-row">
                                            <strong>{format!("{}:", label)}</strong>
                                            " "
                                            {value}
                                        </div>
                                    }.into_any()
                                }
                            }).collect_view()}
                            {is_post.then(|| view! {
                                <div class="detail-row">
                                    <strong>"Comments:"</strong>
                                    {comments_block}
                                </div>
                            })}
                        </div>
                    </div>
                </div>
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: &str) -> Entry {
        Entry::Submission(Submission { id: id.into(), title: Some("Hello".into()), ..Default::default() })
    }

    #[test]
    fn test_reply_dropped_after_post_changes() {
        assert!(reply_is_current(Some(&post("a")), "a"));
        assert!(!reply_is_current(Some(&post("b")), "a"));
        assert!(!reply_is_current(None, "a"));
        let comment = Entry::Comment(Comment { id: "a".into(), ..Default::default() });
        assert!(!reply_is_current(Some(&comment), "a"));
    }

    #[test]
    fn test_detail_rows_skip_missing_fields() {
        let rows = post("p1").detail_rows();
        assert_eq!(rows, vec![("ID", "p1".to_string()), ("Title", "Hello".to_string())]);

        let comment = Entry::Comment(Comment {
            id: "c1".into(),
            body: Some("Agreed".into()),
            score: Some(3),
            created_utc: Some(1_700_000_000.0),
            parent_id: Some("t3_p1".into()),
            ..Default::default()
        });
        assert_eq!(comment.heading(), "Comment Details");
        let labels: Vec<_> = comment.detail_rows().into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["ID", "Body", "Score", "Created", "Parent ID"]);
        assert!(comment.detail_rows().contains(&("Created", "2023-11-14 22:13 UTC".to_string())));
    }
}

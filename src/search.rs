//! Entry Search
//!
//! Client-side filtering of fetched Reddit entries.

use crate::models::{Comment, Submission};

/// Rows fetched while a search term is active
pub const SEARCH_FETCH_LIMIT: u32 = 100_000;

fn contains(field: &Option<String>, needle: &str) -> bool {
    field.as_deref().map_or(false, |f| f.to_lowercase().contains(needle))
}

/// Matches on title, selftext, subreddit or author; capped at `limit`
pub fn filter_submissions<'a>(rows: &'a [Submission], query: &str, limit: usize) -> Vec<&'a Submission> {
    let q = query.trim().to_lowercase();
    rows.iter()
        .filter(|s| {
            q.is_empty()
                || contains(&s.title, &q)
                || contains(&s.selftext, &q)
                || contains(&s.subreddit, &q)
                || contains(&s.author, &q)
        })
        .take(limit)
        .collect()
}

/// Matches on body, subreddit or author; capped at `limit`
pub fn filter_comments<'a>(rows: &'a [Comment], query: &str, limit: usize) -> Vec<&'a Comment> {
    let q = query.trim().to_lowercase();
    rows.iter()
        .filter(|c| q.is_empty() || contains(&c.body, &q) || contains(&c.subreddit, &q) || contains(&c.author, &q))
        .take(limit)
        .collect()
}

/// Server-side limit: everything while searching, one page otherwise
pub fn fetch_limit(query: &str, page_size: u32) -> u32 {
    if query.trim().is_empty() {
        page_size
    } else {
        SEARCH_FETCH_LIMIT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(id: &str, title: &str, author: &str) -> Submission {
        Submission {
            id: id.into(),
            title: Some(title.into()),
            author: Some(author.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_filter_submissions() {
        let rows = vec![
            submission("1", "Rust in production", "ferris"),
            submission("2", "Gardening tips", "alice"),
            submission("3", "More RUST", "bob"),
        ];
        let ids: Vec<_> = filter_submissions(&rows, " rust ", 10).iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(filter_submissions(&rows, "ALICE", 10).len(), 1);
        assert_eq!(filter_submissions(&rows, "", 2).len(), 2);
        assert_eq!(filter_submissions(&rows, "rust", 1).len(), 1);
    }

    #[test]
    fn test_filter_comments() {
        let rows = vec![
            Comment { id: "c1".into(), body: Some("I agree".into()), ..Default::default() },
            Comment { id: "c2".into(), subreddit: Some("AskScience".into()), ..Default::default() },
        ];
        assert_eq!(filter_comments(&rows, "agree", 10).len(), 1);
        assert_eq!(filter_comments(&rows, "askscience", 10)[0].id, "c2");
        assert!(filter_comments(&rows, "zzz", 10).is_empty());
    }

    #[test]
    fn test_fetch_limit() {
        assert_eq!(fetch_limit("", 10), 10);
        assert_eq!(fetch_limit("x", 10), SEARCH_FETCH_LIMIT);
    }
}

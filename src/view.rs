use chrono::{DateTime, Utc};
use clap::ValueEnum;

use crate::models::{RepoRecord, Snapshot};

/// Repositories whose tags sum to strictly more than this count as large
pub const LARGE_REPOSITORY_THRESHOLD: u64 = 100 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FilterMode {
    #[default]
    All,
    /// Repositories with at least one tag
    #[value(name = "active")]
    ActiveOnly,
    /// Repositories whose tags sum to more than 100 MiB
    #[value(name = "large")]
    LargeOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortKey {
    #[default]
    Name,
    #[value(name = "tags")]
    TagCount,
    Size,
    Date,
}

/// Everything the operator has dialed in, as one explicit value. The
/// projection is a pure function of (snapshot, intent); resetting all
/// controls is just `UiIntent::default()`.
#[derive(Debug, Clone, Default)]
pub struct UiIntent {
    /// Case-insensitive substring match against repository names
    pub search_term: String,
    pub filter: FilterMode,
    pub sort: SortKey,
    /// Controls only whether a repository's tag table is rendered, never
    /// membership or position in the projected list
    pub expanded: Option<String>,
}

/// Ordered sequence of repositories to display for the given intent
pub fn project<'a>(snapshot: &'a Snapshot, intent: &UiIntent) -> Vec<&'a RepoRecord> {
    let needle = intent.search_term.to_lowercase();
    let mut repos: Vec<&RepoRecord> = snapshot
        .repositories
        .iter()
        .filter(|r| needle.is_empty() || r.name.to_lowercase().contains(&needle))
        .filter(|r| match intent.filter {
            FilterMode::All => true,
            FilterMode::ActiveOnly => r.tag_count > 0,
            FilterMode::LargeOnly => r.total_size() > LARGE_REPOSITORY_THRESHOLD,
        })
        .collect();

    match intent.sort {
        SortKey::Name => repos.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        }),
        SortKey::TagCount => repos.sort_by(|a, b| b.tag_count.cmp(&a.tag_count)),
        SortKey::Size => repos.sort_by(|a, b| b.total_size().cmp(&a.total_size())),
        // Date ranks by the positional first tag, not the true latest;
        // stats::recently_updated takes the max over all tags instead.
        SortKey::Date => {
            repos.sort_by(|a, b| first_tag_created(b).cmp(&first_tag_created(a)))
        }
    }

    repos
}

fn first_tag_created(repo: &RepoRecord) -> DateTime<Utc> {
    repo.tags
        .first()
        .and_then(|t| t.created)
        .unwrap_or(DateTime::UNIX_EPOCH)
}

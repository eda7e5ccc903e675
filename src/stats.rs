use chrono::{DateTime, Utc};

use crate::models::{RepoRecord, Snapshot};

/// A repository paired with the newest `created` among its tags
#[derive(Debug)]
pub struct RecentEntry<'a> {
    pub repo: &'a RepoRecord,
    pub latest_update: DateTime<Utc>,
}

/// Sum of advisory tag counts across the catalog
pub fn total_tags(snapshot: &Snapshot) -> u64 {
    snapshot.repositories.iter().map(|r| r.tag_count).sum()
}

/// Sum of all tag sizes; absent sizes are already normalized to 0
pub fn total_size(snapshot: &Snapshot) -> u64 {
    snapshot.repositories.iter().map(|r| r.total_size()).sum()
}

/// Repositories ranked by descending tag count, truncated to k. The sort
/// is stable, so ties keep their snapshot order.
pub fn top_repositories(snapshot: &Snapshot, k: usize) -> Vec<&RepoRecord> {
    let mut repos: Vec<&RepoRecord> = snapshot.repositories.iter().collect();
    repos.sort_by(|a, b| b.tag_count.cmp(&a.tag_count));
    repos.truncate(k);
    repos
}

/// Repositories with at least one tag, ranked by the newest `created`
/// among their tags, truncated to k. Tags without a timestamp are excluded
/// from the max; a repository with only timestamp-less tags ranks at the
/// Unix epoch.
pub fn recently_updated(snapshot: &Snapshot, k: usize) -> Vec<RecentEntry<'_>> {
    let mut entries: Vec<RecentEntry<'_>> = snapshot
        .repositories
        .iter()
        .filter(|r| !r.tags.is_empty())
        .map(|repo| RecentEntry {
            repo,
            latest_update: repo
                .tags
                .iter()
                .filter_map(|t| t.created)
                .max()
                .unwrap_or(DateTime::UNIX_EPOCH),
        })
        .collect();
    entries.sort_by(|a, b| b.latest_update.cmp(&a.latest_update));
    entries.truncate(k);
    entries
}

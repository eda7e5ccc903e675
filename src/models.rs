use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

/// GET /api/repositories response
#[derive(Debug, Deserialize)]
pub struct CatalogResponse {
    #[serde(default)]
    pub repositories: Vec<RepoEntry>,
}

/// One repository as served by the dashboard API
#[derive(Debug, Deserialize)]
pub struct RepoEntry {
    pub name: String,
    #[serde(default)]
    pub tag_count: u64,
    #[serde(default)]
    pub tags: Vec<TagEntry>,
}

/// Tags arrive either as bare name strings or as detailed objects
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TagEntry {
    Named(String),
    Detailed(TagDetail),
}

#[derive(Debug, Deserialize)]
pub struct TagDetail {
    pub name: String,
    pub size: Option<u64>,
    pub os: Option<String>,
    pub architecture: Option<String>,
    pub created: Option<String>,
}

/// GET /api/v2/<repo>/manifests/<tag> response; only the digest matters here
#[derive(Debug, Deserialize)]
pub struct ManifestRef {
    #[serde(default)]
    pub digest: String,
}

/// GET /api/health response
#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: String,
}

const UNKNOWN_PLATFORM: &str = "unknown";

/// Full catalog as of one successful refresh. Replaced wholesale; never
/// edited in place after construction.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Token of the refresh that produced this snapshot
    pub revision: u64,
    pub repositories: Vec<RepoRecord>,
}

impl Snapshot {
    /// Normalize a raw catalog response into the domain shape
    pub fn from_catalog(raw: CatalogResponse, revision: u64) -> Self {
        Self {
            revision,
            repositories: raw
                .repositories
                .into_iter()
                .map(RepoRecord::from_entry)
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RepoRecord {
    pub name: String,
    /// Advisory count from the registry; may legitimately diverge from
    /// `tags.len()`
    pub tag_count: u64,
    /// Order as returned by the registry; not guaranteed sorted
    pub tags: Vec<TagRecord>,
}

impl RepoRecord {
    fn from_entry(entry: RepoEntry) -> Self {
        Self {
            name: entry.name,
            tag_count: entry.tag_count,
            tags: entry.tags.into_iter().map(TagRecord::from_entry).collect(),
        }
    }

    /// Summed size of all tags, absent sizes counted as 0
    pub fn total_size(&self) -> u64 {
        self.tags.iter().map(|t| t.size).sum()
    }
}

#[derive(Debug, Clone)]
pub struct TagRecord {
    pub name: String,
    pub size: u64,
    pub os: String,
    pub architecture: String,
    pub created: Option<DateTime<Utc>>,
}

impl TagRecord {
    fn from_entry(entry: TagEntry) -> Self {
        match entry {
            TagEntry::Named(name) => Self {
                name,
                size: 0,
                os: UNKNOWN_PLATFORM.to_string(),
                architecture: UNKNOWN_PLATFORM.to_string(),
                created: None,
            },
            TagEntry::Detailed(detail) => Self {
                name: detail.name,
                size: detail.size.unwrap_or(0),
                os: detail.os.unwrap_or_else(|| UNKNOWN_PLATFORM.to_string()),
                architecture: detail
                    .architecture
                    .unwrap_or_else(|| UNKNOWN_PLATFORM.to_string()),
                created: detail.created.as_deref().and_then(parse_created),
            },
        }
    }
}

/// Parse a created timestamp leniently: RFC 3339 first, then a bare
/// YYYY-MM-DD date at midnight UTC. Anything else counts as absent.
fn parse_created(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog(value: serde_json::Value) -> CatalogResponse {
        serde_json::from_value(value).expect("catalog should deserialize")
    }

    #[test]
    fn test_mixed_tag_shapes_normalize() {
        let raw = catalog(json!({
            "repositories": [{
                "name": "app",
                "tag_count": 2,
                "tags": [
                    "v1",
                    { "name": "v2", "size": 1024, "os": "linux",
                      "architecture": "amd64", "created": "2024-06-02T10:00:00Z" }
                ]
            }]
        }));

        let snap = Snapshot::from_catalog(raw, 1);
        let repo = &snap.repositories[0];
        assert_eq!(repo.tags.len(), 2);

        let bare = &repo.tags[0];
        assert_eq!(bare.name, "v1");
        assert_eq!(bare.size, 0);
        assert_eq!(bare.os, "unknown");
        assert_eq!(bare.architecture, "unknown");
        assert!(bare.created.is_none());

        let detailed = &repo.tags[1];
        assert_eq!(detailed.name, "v2");
        assert_eq!(detailed.size, 1024);
        assert_eq!(detailed.os, "linux");
        assert!(detailed.created.is_some());
    }

    #[test]
    fn test_absent_optional_fields_default() {
        let raw = catalog(json!({
            "repositories": [{
                "name": "app",
                "tag_count": 1,
                "tags": [{ "name": "latest" }]
            }]
        }));

        let snap = Snapshot::from_catalog(raw, 1);
        let tag = &snap.repositories[0].tags[0];
        assert_eq!(tag.size, 0);
        assert_eq!(tag.os, "unknown");
        assert_eq!(tag.architecture, "unknown");
        assert!(tag.created.is_none());
    }

    #[test]
    fn test_missing_tags_field_is_empty() {
        let raw = catalog(json!({
            "repositories": [{ "name": "empty", "tag_count": 0 }]
        }));
        assert!(Snapshot::from_catalog(raw, 1).repositories[0].tags.is_empty());
    }

    #[test]
    fn test_parse_created_rfc3339() {
        let dt = parse_created("2024-06-01T12:30:00+02:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-06-01T10:30:00+00:00");
    }

    #[test]
    fn test_parse_created_bare_date() {
        let dt = parse_created("2024-06-01").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-06-01T00:00:00+00:00");
    }

    #[test]
    fn test_parse_created_garbage_is_absent() {
        assert!(parse_created("not a date").is_none());
        assert!(parse_created("").is_none());
    }

    #[test]
    fn test_total_size_sums_tags() {
        let raw = catalog(json!({
            "repositories": [{
                "name": "app",
                "tag_count": 3,
                "tags": [
                    { "name": "a", "size": 100 },
                    { "name": "b", "size": 28 },
                    "c"
                ]
            }]
        }));
        assert_eq!(Snapshot::from_catalog(raw, 1).repositories[0].total_size(), 128);
    }
}

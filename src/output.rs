use chrono::{DateTime, Utc};
use colored::Colorize;

use crate::deletion::DeleteReceipt;
use crate::models::{RepoRecord, Snapshot};
use crate::stats;
use crate::view::UiIntent;

/// Render a byte count the way the dashboard does (1024 steps, at most
/// two decimals)
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let exp = (((bytes as f64).ln() / 1024f64.ln()).floor() as usize).min(UNITS.len() - 1);
    let value = bytes as f64 / 1024f64.powi(exp as i32);
    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[exp])
}

/// "Today", "Yesterday", "N days ago" buckets, falling back to a plain
/// date past a year
pub fn format_relative(now: DateTime<Utc>, then: DateTime<Utc>) -> String {
    let days = (now - then).num_days().abs();
    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        d if d < 7 => format!("{} days ago", d),
        d if d < 30 => format!("{} weeks ago", d / 7),
        d if d < 365 => format!("{} months ago", d / 30),
        _ => then.format("%b %-d, %Y").to_string(),
    }
}

fn truncate_digest(digest: &str) -> &str {
    if digest.len() > 19 {
        &digest[..19]
    } else {
        digest
    }
}

/// Print the summary panel: health badge, counts, totals, rankings
pub fn print_summary(snapshot: &Snapshot, healthy: bool) {
    let badge = if healthy {
        "online".green().bold()
    } else {
        "unreachable".red().bold()
    };
    println!("{} {}", "Registry:".bold(), badge);
    println!("{}", "═".repeat(60));
    println!("  Repositories : {}", snapshot.repositories.len());
    println!("  Total images : {}", stats::total_tags(snapshot));
    println!(
        "  Total size   : {}",
        format_bytes(stats::total_size(snapshot))
    );

    let top = stats::top_repositories(snapshot, 5);
    if !top.is_empty() {
        println!("\n  {}", "TOP REPOSITORIES".bold());
        for (rank, repo) in top.iter().enumerate() {
            println!(
                "    #{} {:<32} {} {}",
                rank + 1,
                repo.name,
                repo.tag_count,
                if repo.tag_count == 1 { "tag" } else { "tags" }
            );
        }
    }

    let recent = stats::recently_updated(snapshot, 5);
    if !recent.is_empty() {
        let now = Utc::now();
        println!("\n  {}", "RECENTLY UPDATED".bold());
        for entry in &recent {
            println!(
                "    {:<35} {}",
                entry.repo.name,
                format_relative(now, entry.latest_update).dimmed()
            );
        }
    }
}

/// Print the projected repository list; the repository named by
/// `intent.expanded` additionally gets its tag table.
pub fn print_repositories(repos: &[&RepoRecord], intent: &UiIntent, registry_host: Option<&str>) {
    if repos.is_empty() {
        println!("No repositories match.");
        return;
    }

    for repo in repos {
        let status = if repo.tag_count > 0 {
            "Active".green().to_string()
        } else {
            "Empty".dimmed().to_string()
        };
        println!(
            "{:<40} {:>4} {:<4} {:>12}  [{}]",
            repo.name.bold(),
            repo.tag_count,
            if repo.tag_count == 1 { "tag" } else { "tags" },
            format_bytes(repo.total_size()),
            status
        );

        if intent.expanded.as_deref() == Some(repo.name.as_str()) {
            print_tag_table(repo, registry_host);
        }
    }

    println!(
        "\n{} {} shown.",
        repos.len(),
        if repos.len() == 1 {
            "repository"
        } else {
            "repositories"
        }
    );
}

fn print_tag_table(repo: &RepoRecord, registry_host: Option<&str>) {
    if repo.tags.is_empty() {
        println!("  {}", "No tags available for this repository.".dimmed());
        return;
    }

    println!("  {}", "─".repeat(58));
    let now = Utc::now();
    for tag in &repo.tags {
        let platform = format!("{}/{}", tag.os, tag.architecture);
        let pushed = match tag.created {
            Some(created) => format_relative(now, created),
            None => "unavailable".to_string(),
        };
        println!(
            "  {:<26} {:<16} {:>10} {}",
            tag.name,
            platform.dimmed(),
            format_bytes(tag.size),
            pushed.dimmed()
        );
        if let Some(host) = registry_host {
            println!(
                "      {}",
                format!("docker pull {}/{}:{}", host, repo.name, tag.name).dimmed()
            );
        }
    }
    println!("  {}", "─".repeat(58));
}

/// Quick-start hint for an empty registry
pub fn print_quick_start(registry_host: Option<&str>) {
    let host = registry_host.unwrap_or("<registry-host>");
    println!("No repositories yet. Push your first image to get started:");
    println!("  docker tag myimage:latest {}/myimage:latest", host);
    println!("  docker push {}/myimage:latest", host);
}

/// Print the outcome of a deletion plus the garbage-collection reminder
pub fn print_receipt(receipt: &DeleteReceipt) {
    println!(
        "{} {}:{} ({})",
        "Deleted".green().bold(),
        receipt.repository,
        receipt.tag,
        truncate_digest(&receipt.digest).dimmed()
    );

    if let Some(err) = &receipt.refresh_error {
        eprintln!("[WARN] Catalog refresh after deletion failed: {}", err);
    }

    println!(
        "\n{} Run registry garbage collection to reclaim disk space:",
        "REMINDER:".yellow().bold()
    );
    println!("  docker exec <registry-container> bin/registry garbage-collect /etc/docker/registry/config.yml");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes_zero() {
        assert_eq!(format_bytes(0), "0 Bytes");
    }

    #[test]
    fn test_format_bytes_steps() {
        assert_eq!(format_bytes(512), "512 Bytes");
        assert_eq!(format_bytes(1024), "1 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(104857600), "100 MB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3 GB");
    }

    #[test]
    fn test_format_relative_buckets() {
        let now = DateTime::parse_from_rfc3339("2024-06-15T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let at = |s: &str| {
            DateTime::parse_from_rfc3339(s)
                .unwrap()
                .with_timezone(&Utc)
        };

        assert_eq!(format_relative(now, at("2024-06-15T08:00:00Z")), "Today");
        assert_eq!(format_relative(now, at("2024-06-14T08:00:00Z")), "Yesterday");
        assert_eq!(format_relative(now, at("2024-06-12T12:00:00Z")), "3 days ago");
        assert_eq!(format_relative(now, at("2024-06-01T12:00:00Z")), "2 weeks ago");
        assert_eq!(format_relative(now, at("2024-03-15T12:00:00Z")), "3 months ago");
        assert_eq!(format_relative(now, at("2022-01-10T12:00:00Z")), "Jan 10, 2022");
    }

    #[test]
    fn test_truncate_digest_shortens_long_digests() {
        let digest = "sha256:0123456789abcdef0123456789abcdef";
        assert_eq!(truncate_digest(digest), "sha256:0123456789ab");
        assert_eq!(truncate_digest("short"), "short");
    }
}

//! Non-interactive commands: config / scan

use eventcore_foundation::{EventsConfig, PluginCandidate, PluginScanner};

/// Print the effective configuration as JSON
pub fn print_config(config: &EventsConfig) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

/// Scan plugin roots and print what discovery would see
pub fn run_scan(config: &EventsConfig, as_json: bool) -> anyhow::Result<()> {
    let scanner = PluginScanner::from_config(config);
    let candidates = scanner.scan();

    if as_json {
        println!("{}", serde_json::to_string_pretty(&candidates)?);
        return Ok(());
    }

    if candidates.is_empty() {
        println!("No plugins found under:");
        for root in scanner.roots() {
            println!("  {}", root.display());
        }
        return Ok(());
    }

    println!("{:<20} {:<28} {:<8} {}", "Plugin", "Class", "Events", "Definition");
    println!("{}", "-".repeat(80));
    for candidate in &candidates {
        println!("{}", format_row(candidate));
    }

    let with_definition = candidates.iter().filter(|c| c.has_definition).count();
    println!(
        "\n{} plugin(s), {} with an event definition file.",
        candidates.len(),
        with_definition
    );

    Ok(())
}

fn format_row(candidate: &PluginCandidate) -> String {
    let status = if candidate.has_definition { "yes" } else { "-" };
    format!(
        "{:<20} {:<28} {:<8} {}",
        truncate(&candidate.plugin, 20),
        truncate(&candidate.class_name, 28),
        status,
        candidate.definition.display()
    )
}

/// Truncate a string for display
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("blog", 20), "blog");
        assert_eq!(truncate("a_really_long_plugin_name", 10), "a_reall...");
    }

    #[test]
    fn test_format_row() {
        let candidate = PluginCandidate {
            root: PathBuf::from("plugins"),
            plugin: "blog".to_string(),
            class_name: "BlogEvents".to_string(),
            definition: PathBuf::from("plugins/blog/blog_events.toml"),
            has_definition: true,
        };

        let row = format_row(&candidate);
        assert!(row.starts_with("blog"));
        assert!(row.contains("BlogEvents"));
        assert!(row.contains("yes"));
        assert!(row.ends_with("plugins/blog/blog_events.toml"));
    }

    #[test]
    fn test_run_scan_on_temp_root() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(temp.path().join("blog")).unwrap();

        let config = EventsConfig::new().plugin_path(temp.path());
        assert!(run_scan(&config, false).is_ok());
        assert!(run_scan(&config, true).is_ok());
    }
}

//! EventCore init command
//!
//! Initializes a project with .eventcore/events.json and a plugins directory.

use eventcore_foundation::{EventsConfig, JsonStore, DEFAULT_PLUGIN_PATH, EVENTS_CONFIG_FILE};
use std::fs;
use std::path::Path;

/// Initialize EventCore configuration in the current directory
pub fn init_project(force: bool) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    init_in(&cwd, force)
}

fn init_in(root: &Path, force: bool) -> anyhow::Result<()> {
    let store = JsonStore::project(root);

    if store.exists(EVENTS_CONFIG_FILE) && !force {
        println!("✓ EventCore already initialized in this directory.");
        println!("  Use --force to reinitialize.");
        return Ok(());
    }

    println!("Initializing EventCore...");

    if force && store.exists(EVENTS_CONFIG_FILE) {
        store.remove(EVENTS_CONFIG_FILE)?;
        println!("  Removed {}", store.file_path(EVENTS_CONFIG_FILE).display());
    }

    let config = EventsConfig::new().plugin_path(DEFAULT_PLUGIN_PATH);
    store.save(EVENTS_CONFIG_FILE, &config)?;
    println!("  Created {}", store.file_path(EVENTS_CONFIG_FILE).display());

    let plugins = root.join(DEFAULT_PLUGIN_PATH);
    if !plugins.exists() {
        fs::create_dir_all(&plugins)?;
        println!("  Created {}/", DEFAULT_PLUGIN_PATH);
    }

    println!(
        "\nAdd plugins as {}/<name>/<name>_events.{}",
        DEFAULT_PLUGIN_PATH,
        config.definition_extension()
    );

    Ok(())
}

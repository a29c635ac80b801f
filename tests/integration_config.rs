// botfleet: shared dependencies and launcher for sibling bot projects
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests layering of fleet files, extra files, environment and overrides.

use std::io::Write;

use botfleet::config::loader::ConfigLoader;
use botfleet::config::{CONFIG_FILE_NAME, Config};
use botfleet::logging::LogLevel;
use tempfile::NamedTempFile;

// =============================================================================
// Loading from TOML strings
// =============================================================================

#[test]
fn config_parse_full() {
    let toml = r#"
[global]
dry = true
output_log_level = 4

[fleet]
exclude = [".git", "archive_*"]

[link]
hub = "core_bot"
deps_dir = "vendor"

[launch]
entry = "main.js"
runtime = "bun"
new_window = false
window_color = "0A"
title_suffix = ""
"#;
    let config = Config::parse(toml).unwrap();

    assert!(config.global.dry);
    assert_eq!(config.global.output_log_level, LogLevel::DEBUG);
    assert_eq!(config.fleet.exclude, [".git", "archive_*"]);
    assert_eq!(config.link.hub, "core_bot");
    assert_eq!(config.link.deps_dir, "vendor");
    assert_eq!(config.launch.entry, "main.js");
    assert_eq!(config.launch.runtime, "bun");
    assert!(!config.launch.new_window);
    assert_eq!(config.launch.window_color, "0A");
    assert!(config.launch.title_suffix.is_empty());
}

#[test]
fn config_parse_empty_uses_defaults() {
    let config = Config::parse("").unwrap();

    assert!(!config.global.dry);
    assert!(config.fleet.exclude.is_empty());
    assert_eq!(config.link.hub, "ali_g");
    assert_eq!(config.link.deps_dir, "node_modules");
    assert_eq!(config.launch.entry, "index.js");
    assert_eq!(config.launch.runtime, "node");
    assert!(config.launch.new_window);
    assert_eq!(config.launch.window_color, "03");
    assert_eq!(config.launch.title_suffix, "Bot");
}

#[test]
fn config_rejects_hub_with_separator() {
    let err = Config::parse("[link]\nhub = \"../elsewhere\"").unwrap_err();
    assert!(format!("{err:#}").contains("hub"), "{err:#}");
}

#[test]
fn config_rejects_out_of_range_log_level() {
    assert!(Config::parse("[global]\noutput_log_level = 9").is_err());
}

#[test]
fn config_rejects_unknown_section() {
    assert!(Config::parse("[paths]\nprefix = \"/build\"").is_err());
}

// =============================================================================
// Layering
// =============================================================================

#[test]
fn config_fleet_file_then_ini_then_overrides() {
    let root = tempfile::tempdir().unwrap();
    std::fs::write(
        root.path().join(CONFIG_FILE_NAME),
        "[link]\nhub = \"from_root\"\ndeps_dir = \"root_deps\"\n\n[launch]\nruntime = \"deno\"\n",
    )
    .unwrap();

    let mut ini = NamedTempFile::new().unwrap();
    writeln!(ini, "[link]\nhub = \"from_ini\"").unwrap();

    let loader = ConfigLoader::new()
        .add_toml_file_optional(root.path().join(CONFIG_FILE_NAME))
        .add_toml_file(ini.path())
        .apply_overrides(["launch.runtime=bun"])
        .unwrap();
    assert_eq!(loader.loaded_files().len(), 2);

    let config = loader.build().unwrap();
    assert_eq!(config.link.hub, "from_ini");
    assert_eq!(config.link.deps_dir, "root_deps");
    assert_eq!(config.launch.runtime, "bun");
}

#[test]
fn config_missing_fleet_file_is_not_listed() {
    let root = tempfile::tempdir().unwrap();
    let loader = ConfigLoader::new().add_toml_file_optional(root.path().join(CONFIG_FILE_NAME));

    assert!(loader.format_loaded_files().is_empty());
    assert_eq!(loader.build().unwrap().link.hub, "ali_g");
}

#[test]
fn config_missing_ini_is_an_error() {
    let root = tempfile::tempdir().unwrap();
    let result = ConfigLoader::new()
        .add_toml_file(root.path().join("nope.toml"))
        .build();
    assert!(result.is_err());
}

#[test]
fn config_env_overrides_file_but_not_set() {
    // SAFETY: the variable names are unique to this test.
    unsafe {
        std::env::set_var("BOTFLEETITEST_LINK__HUB", "from_env");
        std::env::set_var("BOTFLEETITEST_LAUNCH__RUNTIME", "from_env");
    }

    let config = ConfigLoader::new()
        .add_toml_str("[link]\nhub = \"from_file\"\n\n[launch]\nruntime = \"from_file\"")
        .with_env_prefix("BOTFLEETITEST")
        .apply_overrides(["launch.runtime=from_set"])
        .unwrap()
        .build();

    // SAFETY: same as above
    unsafe {
        std::env::remove_var("BOTFLEETITEST_LINK__HUB");
        std::env::remove_var("BOTFLEETITEST_LAUNCH__RUNTIME");
    }

    let config = config.unwrap();
    assert_eq!(config.link.hub, "from_env");
    assert_eq!(config.launch.runtime, "from_set");
}

#[test]
fn config_later_override_wins() {
    let config = ConfigLoader::new()
        .apply_overrides(["global.dry=false", "global.dry=true"])
        .unwrap()
        .build()
        .unwrap();
    assert!(config.global.dry);
}

#[test]
fn config_format_loaded_files_numbers_sources() {
    let mut first = NamedTempFile::new().unwrap();
    writeln!(first, "[global]\ndry = true").unwrap();

    let loader = ConfigLoader::new()
        .add_toml_file(first.path())
        .add_toml_str("[link]\nhub = \"x\"");
    let lines = loader.format_loaded_files();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("1. [file] "));
    assert_eq!(lines[1], "2. [string] <string>");
}

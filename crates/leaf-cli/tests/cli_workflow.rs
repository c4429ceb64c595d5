//! End-to-end tests of the command layer against a real directory.

use leaf_cli::commands::{cat, config, find, rm, tree, write};
use leaf_cli::types::ExitCode;
use leaf_fs::{LeafConfig, ObjectKind};
use std::path::Path;
use tempfile::TempDir;

fn find_options(pattern: &str, recursive: bool) -> find::FindOptions {
    find::FindOptions {
        pattern: pattern.to_string(),
        recursive,
        first: false,
    }
}

/// Tests that write, tree, find, cat and rm agree with each other.
#[test]
fn test_write_tree_find_remove_flow() {
    let temp = TempDir::new().unwrap();
    let cfg = LeafConfig::default();

    write::write(temp.path(), Path::new("docs/a.json"), "{}", false, &cfg).unwrap();
    write::write(temp.path(), Path::new("docs/notes/b.txt"), "one\n", false, &cfg).unwrap();
    let report =
        write::write(temp.path(), Path::new("docs/notes/b.txt"), "two\n", true, &cfg).unwrap();
    assert!(report.appended);
    assert_eq!(report.file.size, 8);

    let listing = tree::collect(temp.path(), &cfg).unwrap();
    assert_eq!(listing.count, 4);
    assert_eq!(listing.entries[0].path, temp.path().join("docs"));
    assert_eq!(listing.entries[0].kind, ObjectKind::Directory);

    let shallow = find::search(temp.path(), &find_options("*.json", false), &cfg).unwrap();
    assert!(shallow.matches.is_empty());

    let deep = find::search(temp.path(), &find_options("*.json", true), &cfg).unwrap();
    assert_eq!(deep.matches.len(), 1);
    assert_eq!(deep.matches[0].path, temp.path().join("docs/a.json"));

    let content = cat::read(&temp.path().join("docs/notes/b.txt"), &cfg).unwrap();
    assert_eq!(content.content, "one\ntwo\n");

    let removed = rm::remove(temp.path(), Path::new("docs/notes"), &cfg).unwrap();
    assert_eq!(removed.removed.kind, ObjectKind::Directory);
    assert!(!temp.path().join("docs/notes").exists());

    let listing = tree::collect(temp.path(), &cfg).unwrap();
    assert_eq!(listing.count, 2);
}

/// Tests that a missing object maps to the not-found exit code.
#[test]
fn test_missing_object_exit_code() {
    let temp = TempDir::new().unwrap();

    let error = rm::remove(temp.path(), Path::new("nope"), &LeafConfig::default()).unwrap_err();
    assert_eq!(ExitCode::for_error(&error), ExitCode::NOT_FOUND);
}

/// Tests that escaping the root is rejected as invalid input.
#[test]
fn test_parent_component_exit_code() {
    let temp = TempDir::new().unwrap();

    let error = write::write(
        temp.path(),
        Path::new("../outside.txt"),
        "x",
        false,
        &LeafConfig::default(),
    )
    .unwrap_err();
    assert_eq!(ExitCode::for_error(&error), ExitCode::INVALID_INPUT);
}

/// Tests that the hidden-entry setting from the config file reaches the
/// filesystem layer.
#[test]
fn test_config_file_controls_hidden_entries() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("data");
    std::fs::create_dir(&data).unwrap();
    std::fs::write(data.join(".hidden"), "").unwrap();
    std::fs::write(data.join("shown"), "").unwrap();

    let config_file = temp.path().join("config.toml");
    std::fs::write(&config_file, "[fs]\ninclude_hidden = false\n").unwrap();
    let loaded = config::load_config_from(&config_file).unwrap();

    let listing = tree::collect(&data, &loaded.leaf_config()).unwrap();
    assert_eq!(listing.count, 1);
    assert_eq!(listing.entries[0].path, data.join("shown"));

    let listing = tree::collect(&data, &LeafConfig::default()).unwrap();
    assert_eq!(listing.count, 2);
}

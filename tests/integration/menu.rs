//! `menu` command.

use predicates::prelude::*;
use serde_json::{Value, json};

use crate::common::TestSite;

fn classes(entry: &Value) -> Vec<&str> {
    entry["classes"].as_array().unwrap().iter().map(|c| c.as_str().unwrap()).collect()
}

#[test]
fn test_menu_json_marks_active_path() {
    let site = TestSite::new();
    let items = site.json(&["menu", "primary", "--current", "2", "--format", "json"]);

    let home = &items[0];
    assert_eq!(home["title"], "Home");
    assert_eq!(
        classes(home),
        vec!["menu-item-has-children", "current-menu-parent", "menu-item", "menu-item-1"]
    );

    let first = &home["Submenu"][0];
    assert_eq!(classes(first), vec!["current-menu-item", "menu-item", "menu-item-2"]);
    assert_eq!(first["Submenu"], json!([]));

    assert_eq!(classes(&items[1]), vec!["menu-item", "menu-item-5"]);
}

#[test]
fn test_menu_term_matches_only_its_taxonomy() {
    let site = TestSite::new();

    let items = site.json(&["menu", "primary", "--term", "5", "--taxonomy", "category", "-f", "json"]);
    assert!(classes(&items[1]).contains(&"current-menu-item"));

    let items = site.json(&["menu", "primary", "--term", "5", "--taxonomy", "post_tag", "-f", "json"]);
    assert!(!classes(&items[1]).contains(&"current-menu-item"));
}

#[test]
fn test_menu_override_replaces_current() {
    let site = TestSite::new();
    let items = site.json(&["menu", "primary", "--current", "2", "--override", "1", "-f", "json"]);

    assert!(classes(&items[0]).contains(&"current-menu-item"));
    assert!(!classes(&items[0]).contains(&"current-menu-parent"));
    assert!(!classes(&items[0]["Submenu"][0]).contains(&"current-menu-item"));
}

#[test]
fn test_menu_parent_anchor() {
    let site = TestSite::new();

    let items = site.json(&["menu", "primary", "--parent", "1", "-f", "json"]);
    assert_eq!(items.as_array().unwrap().len(), 1);
    assert_eq!(items[0]["title"], "First");

    // No entry links to post 1 as a `post`, so the whole menu is built
    let items = site.json(&["menu", "primary", "--parent", "1", "--parent-type", "post", "-f", "json"]);
    assert_eq!(items.as_array().unwrap().len(), 2);
}

#[test]
fn test_menu_custom_classes_from_config() {
    let site = TestSite::new();
    std::fs::write(
        site.config_path(),
        "[menu]\ncurrent_item_class = \"is-active\"\nitem_class = \"nav-item\"\n",
    )
    .unwrap();

    let items = site.json(&["menu", "primary", "--current", "1", "-f", "json"]);
    assert_eq!(classes(&items[0]), vec!["menu-item-has-children", "is-active", "nav-item", "nav-item-1"]);
}

#[test]
fn test_menu_tree_output() {
    let site = TestSite::new();
    site.dph()
        .env("NO_COLOR", "1")
        .args(["menu", "primary", "--current", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("primary"))
        .stdout(predicate::str::contains("├── Home / [current-menu-parent]"))
        .stdout(predicate::str::contains("│   └── First /first/ [current-menu-item]"))
        .stdout(predicate::str::contains("└── News /news/"));
}

#[test]
fn test_empty_menu() {
    let site = TestSite::new();
    site.dph()
        .args(["menu", "footer"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No menu entries found."));

    assert_eq!(site.json(&["menu", "footer", "-f", "json"]), json!([]));
}

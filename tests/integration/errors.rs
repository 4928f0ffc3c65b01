//! Error reporting and exit codes.

use predicates::prelude::*;

use crate::common::TestSite;

#[test]
fn test_missing_source_file() {
    let site = TestSite::new();
    site.dph_with_source(&site.path().join("nope.json"))
        .args(["post", "1"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Content source not found"))
        .stderr(predicate::str::contains("--source"));
}

#[test]
fn test_invalid_source_file() {
    let site = TestSite::new();
    let broken = site.write("broken.json", "{ \"posts\": [ { \"ID\": \"x\" } ] }");

    site.dph_with_source(&broken)
        .args(["post", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid content source"));
}

#[test]
fn test_unknown_post() {
    let site = TestSite::new();
    site.dph()
        .args(["post", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Post 99 not found"));
}

#[test]
fn test_unknown_menu_location_suggests_closest() {
    let site = TestSite::new();
    site.dph()
        .args(["menu", "primry"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Menu location 'primry' is not registered"))
        .stderr(predicate::str::contains("Did you mean 'primary'?"));
}

#[test]
fn test_unknown_menu_location_lists_available() {
    let site = TestSite::new();
    site.dph()
        .args(["menu", "sidebar"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("footer, primary"));
}

#[test]
fn test_cycle_policy_error() {
    let site = TestSite::new();
    std::fs::write(site.config_path(), "[resolver]\non_cycle = \"error\"\n").unwrap();

    site.dph()
        .args(["post", "2", "--recursive"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Circular relational reference: 2 -> 3 -> 2"))
        .stderr(predicate::str::contains("on_cycle"));
}

#[test]
fn test_depth_limit_error() {
    let site = TestSite::new();
    std::fs::write(site.config_path(), "[resolver]\nmax_depth = 1\non_cycle = \"error\"\n").unwrap();

    site.dph()
        .args(["post", "1", "--recursive"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeded maximum depth of 1"));
}

#[test]
fn test_invalid_config() {
    let site = TestSite::new();
    std::fs::write(site.config_path(), "[menu]\nitem_class = \"\"\n").unwrap();

    site.dph()
        .args(["menu", "primary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("item_class cannot be empty"));
}

#[test]
fn test_invalid_menu_format() {
    let site = TestSite::new();
    site.dph()
        .args(["menu", "primary", "--format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format 'xml'"));
}

//! `post` and `posts` commands.

use serde_json::json;

use crate::common::{TestSite, standard_content};

#[test]
fn test_post_plain_lookup() {
    let site = TestSite::new();
    let post = site.json(&["post", "1"]);

    assert_eq!(post["ID"], 1);
    assert_eq!(post["post_title"], "Home");
    assert_eq!(post["permalink"], "/");
    assert_eq!(post["meta"], json!({}));
    assert!(post.get("fields").is_none());
}

#[test]
fn test_post_with_fields_keeps_references() {
    let site = TestSite::new();
    let post = site.json(&["post", "1", "--acf"]);

    assert_eq!(post["fields"]["hero"], "Welcome");
    assert_eq!(
        post["fields"]["featured"],
        json!([{ "ID": 2, "post_type": "post" }, { "ID": 3, "post_type": "post" }])
    );
}

#[test]
fn test_post_fields_keep_stored_reference_columns() {
    let stored = json!({ "ID": 3, "post_type": "post", "post_title": "Second", "post_name": "second" });
    let mut content = standard_content();
    content["posts"][1]["fields"]["related"] = stored.clone();
    let site = TestSite::with_content(&content);

    let post = site.json(&["post", "2", "--acf"]);
    assert_eq!(post["fields"]["related"], stored);

    let post = site.json(&["post", "2", "--recursive"]);
    assert_eq!(post["fields"]["related"]["permalink"], "/second/");
}

#[test]
fn test_post_recursive_expands_and_stops_at_loops() {
    let site = TestSite::new();
    let post = site.json(&["post", "1", "--recursive"]);

    let first = &post["fields"]["featured"][0];
    assert_eq!(first["post_title"], "First");
    assert_eq!(first["permalink"], "/first/");
    assert_eq!(first["fields"]["related"]["post_title"], "Second");
    // 1 -> 2 -> 3 -> 2 loops, so the innermost reference stays a reference
    assert_eq!(
        first["fields"]["related"]["fields"]["related"],
        json!({ "ID": 2, "post_type": "post" })
    );

    // The same records are expanded again on a separate branch
    let second = &post["fields"]["featured"][1];
    assert_eq!(second["post_title"], "Second");
    assert_eq!(second["fields"]["related"]["post_title"], "First");
}

#[test]
fn test_post_whole_fields() {
    let site = TestSite::new();
    let post = site.json(&["post", "1", "--whole-fields"]);

    let hero = &post["fields"]["hero"];
    assert_eq!(hero["label"], "Hero");
    assert_eq!(hero["key"], "field_hero");
    assert_eq!(hero["name"], "hero");
    assert_eq!(hero["value"], "Welcome");
}

#[test]
fn test_post_meta_selection() {
    let site = TestSite::new();

    let post = site.json(&["post", "1", "--meta", "all"]);
    assert_eq!(post["meta"], json!({ "color": ["blue"], "size": ["L", "XL"] }));

    let post = site.json(&["post", "1", "--meta", "size,missing", "--single"]);
    assert_eq!(post["meta"], json!({ "size": "L", "missing": "" }));

    let post = site.json(&["post", "1", "--meta", "size"]);
    assert_eq!(post["meta"], json!({ "size": ["L", "XL"] }));
}

#[test]
fn test_config_defaults_apply() {
    let site = TestSite::new();
    std::fs::write(site.config_path(), "[defaults]\nrecursive = true\nmeta_keys = \"all\"\n").unwrap();

    let post = site.json(&["post", "2"]);
    assert_eq!(post["fields"]["related"]["post_title"], "Second");
    assert_eq!(post["meta"], json!({}));

    let post = site.json(&["post", "1"]);
    assert_eq!(post["meta"]["color"], json!(["blue"]));
    assert_eq!(post["fields"]["featured"][0]["post_title"], "First");

    // Flags still narrow the configured defaults
    let post = site.json(&["post", "1", "--meta", "color", "--single"]);
    assert_eq!(post["meta"], json!({ "color": "blue" }));

    // An empty key list switches the configured meta off
    let post = site.json(&["post", "1", "--meta", ""]);
    assert_eq!(post["meta"], json!({}));
}

#[test]
fn test_posts_query_filters() {
    let site = TestSite::new();
    let ids = |args: &[&str]| -> Vec<u64> {
        site.json(args).as_array().unwrap().iter().map(|p| p["ID"].as_u64().unwrap()).collect()
    };

    assert_eq!(ids(&["posts"]), vec![1, 2, 3]);
    assert_eq!(ids(&["posts", "--post-type", "post"]), vec![2, 3]);
    assert_eq!(ids(&["posts", "--include", "3,1"]), vec![3, 1]);
    assert_eq!(ids(&["posts", "--limit", "1"]), vec![1]);
    assert_eq!(ids(&["posts", "--limit", "-1"]), vec![1, 2, 3]);
    assert_eq!(ids(&["posts", "--status", "draft"]), vec![4]);
    assert!(ids(&["posts", "--post-type", "product"]).is_empty());
}

#[test]
fn test_posts_permalinks_and_recursion() {
    let site = TestSite::new();
    let posts = site.json(&["posts", "--status", "draft"]);
    assert_eq!(posts[0]["permalink"], "/event/launch/");

    let posts = site.json(&["posts", "--post-type", "post", "--recursive"]);
    assert_eq!(posts[0]["fields"]["related"]["post_title"], "Second");
    assert_eq!(posts[1]["fields"]["related"]["post_title"], "First");
}

#[test]
fn test_toml_content_source() {
    let site = TestSite::new();
    let toml_source = site.write(
        "content.toml",
        r#"
[[posts]]
ID = 7
post_type = "page"
post_name = "about"

[posts.fields]
subtitle = "From TOML"
"#,
    );

    let output = site
        .dph_with_source(&toml_source)
        .args(["post", "7", "--acf"])
        .assert()
        .success();
    let post: serde_json::Value = serde_json::from_slice(&output.get_output().stdout).unwrap();

    assert_eq!(post["permalink"], "/about/");
    assert_eq!(post["fields"]["subtitle"], "From TOML");
}

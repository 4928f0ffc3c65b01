//! Shared fixture for integration tests.

use assert_cmd::Command;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory holding a content file and an isolated config path.
pub struct TestSite {
    temp: TempDir,
    source: PathBuf,
}

impl TestSite {
    /// Site with the standard content from [`standard_content`].
    pub fn new() -> Self {
        Self::with_content(&standard_content())
    }

    pub fn with_content(content: &Value) -> Self {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("content.json");
        fs::write(&source, serde_json::to_string_pretty(content).unwrap()).unwrap();
        Self {
            temp,
            source,
        }
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Write a file into the site directory and return its path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    /// `dph` with `--source` pointing at this site and a config path that
    /// does not exist unless a test writes it.
    pub fn dph(&self) -> Command {
        self.dph_with_source(&self.source)
    }

    pub fn dph_with_source(&self, source: &Path) -> Command {
        let mut cmd = Command::cargo_bin("dph").unwrap();
        cmd.current_dir(self.temp.path())
            .env_remove("RUST_LOG")
            .env_remove("DUSTPRESS_SOURCE")
            .env("DUSTPRESS_CONFIG", self.config_path())
            .arg("--source")
            .arg(source);
        cmd
    }

    pub fn config_path(&self) -> PathBuf {
        self.temp.path().join("config.toml")
    }

    /// Run `dph` with `args`, assert success and parse stdout as JSON.
    pub fn json(&self, args: &[&str]) -> Value {
        let output = self.dph().args(args).assert().success();
        serde_json::from_slice(&output.get_output().stdout).unwrap()
    }
}

/// Small site:
///
/// - 1 page "Home" (front page) with a text field and a relational list to 2, 3
/// - 2 and 3 posts referencing each other
/// - 4 draft event
/// - menu `primary`: Home(1) > First(2), News (category 5)
pub fn standard_content() -> Value {
    json!({
        "front_page": 1,
        "posts": [
            {
                "ID": 1, "post_type": "page", "post_title": "Home", "post_name": "home",
                "fields": {
                    "hero": "Welcome",
                    "featured": [
                        { "ID": 2, "post_type": "post" },
                        { "ID": 3, "post_type": "post" }
                    ]
                },
                "meta": { "color": ["blue"], "size": ["L", "XL"] }
            },
            {
                "ID": 2, "post_type": "post", "post_title": "First", "post_name": "first",
                "fields": { "related": { "ID": 3, "post_type": "post" } }
            },
            {
                "ID": 3, "post_type": "post", "post_title": "Second", "post_name": "second",
                "fields": { "related": { "ID": 2, "post_type": "post" } }
            },
            {
                "ID": 4, "post_type": "event", "post_title": "Launch", "post_name": "launch",
                "post_status": "draft"
            }
        ],
        "field_definitions": {
            "hero": { "key": "field_hero", "label": "Hero", "type": "text" }
        },
        "object_meta": { "term": { "5": { "icon": ["star"] } } },
        "menus": {
            "primary": [
                { "ID": 100, "menu_item_parent": 0, "object_id": 1, "object": "page", "title": "Home", "url": "/" },
                { "ID": 101, "menu_item_parent": 100, "object_id": 2, "object": "post", "title": "First", "url": "/first/" },
                { "ID": 102, "menu_item_parent": 0, "object_id": 5, "object": "category", "title": "News", "url": "/news/" }
            ],
            "footer": []
        }
    })
}

//! `render` command.

use predicates::prelude::*;
use std::fs;

use crate::common::TestSite;

const PAGE_TEMPLATE: &str = r#"<h1>{{ post.post_title }}</h1>
<p>{{ post.fields.hero }}</p>
{% for item in post.fields.featured %}<a href="{{ item.permalink }}">{{ item.post_title }}</a>
{% endfor %}"#;

const MENU_TEMPLATE: &str = r#"{% for item in menus.primary %}<li class="{{ item.classes | join(sep=' ') }}">{{ item.title }}{% for sub in item.Submenu %}<li class="{{ sub.classes | join(sep=' ') }}">{{ sub.title }}</li>{% endfor %}</li>
{% endfor %}"#;

#[test]
fn test_render_post_with_resolved_fields() {
    let site = TestSite::new();
    let template = site.write("page.tera", PAGE_TEMPLATE);

    site.dph()
        .arg("render")
        .arg(&template)
        .args(["--post", "1", "--recursive"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<h1>Home</h1>"))
        .stdout(predicate::str::contains("<p>Welcome</p>"))
        .stdout(predicate::str::contains(r#"<a href="/first/">First</a>"#))
        .stdout(predicate::str::contains(r#"<a href="/second/">Second</a>"#));
}

#[test]
fn test_render_menu_uses_post_as_current() {
    let site = TestSite::new();
    let template = site.write("menu.tera", MENU_TEMPLATE);

    site.dph()
        .arg("render")
        .arg(&template)
        .args(["--post", "2", "--menu", "primary"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"<li class="menu-item-has-children current-menu-parent menu-item menu-item-1">Home"#,
        ))
        .stdout(predicate::str::contains(
            r#"<li class="current-menu-item menu-item menu-item-2">First</li>"#,
        ));
}

#[test]
fn test_render_vars_and_output_file() {
    let site = TestSite::new();
    let template = site.write("site.tera", "{{ site.name }}: {{ post.post_title }}");
    let vars = site.write("vars.json", r#"{ "site": { "name": "Demo" } }"#);
    let output = site.path().join("out.html");

    site.dph()
        .arg("render")
        .arg(&template)
        .args(["--post", "3", "--vars"])
        .arg(&vars)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(fs::read_to_string(&output).unwrap(), "Demo: Second");
}

#[test]
fn test_render_template_error() {
    let site = TestSite::new();
    let template = site.write("broken.tera", "{{ post.missing_column }}");

    site.dph()
        .arg("render")
        .arg(&template)
        .args(["--post", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Template error"));
}

#[test]
fn test_render_unknown_menu() {
    let site = TestSite::new();
    let template = site.write("menu.tera", MENU_TEMPLATE);

    site.dph()
        .arg("render")
        .arg(&template)
        .args(["--menu", "header"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Menu location 'header' is not registered"));
}

//! CLI integration tests

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::Command as AssertCommand;
use predicates::prelude::*;
use tempfile::TempDir;

const TEMPLATE: &str = "<html><title>{{title}}</title><body>{{content}}</body></html>";

fn mdsite_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_mdsite"))
}

/// Binary running inside `site` with an isolated config file
fn mdsite_in(site: &Path) -> AssertCommand {
    let mut cmd = AssertCommand::new(env!("CARGO_BIN_EXE_mdsite"));
    cmd.current_dir(site)
        .arg("--config")
        .arg(site.join("mdsite.toml"))
        .env_remove("MDSITE_CONFIG")
        .env_remove("MDSITE_CONTENT_DIR")
        .env_remove("MDSITE_TEMPLATE_DIR")
        .env_remove("MDSITE_OUTPUT_DIR")
        .env_remove("MDSITE_BIND")
        .env_remove("RUST_LOG");
    cmd
}

fn site_with_template() -> TempDir {
    let site = tempfile::tempdir().unwrap();
    fs::create_dir(site.path().join("content")).unwrap();
    fs::create_dir(site.path().join("templates")).unwrap();
    fs::write(site.path().join("templates/default.html"), TEMPLATE).unwrap();
    site
}

#[test]
fn help_output() {
    let output = mdsite_bin()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("static site generator"));
    assert!(stdout.contains("--content-dir"));
    assert!(stdout.contains("--template-dir"));
    assert!(stdout.contains("--output-dir"));
    assert!(stdout.contains("--serve"));
    assert!(stdout.contains("render"));
}

#[test]
fn version_output() {
    let output = mdsite_bin()
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("mdsite"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn config_help() {
    let output = mdsite_bin()
        .args(["config", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("init"));
    assert!(stdout.contains("set"));
    assert!(stdout.contains("get"));
    assert!(stdout.contains("list"));
    assert!(stdout.contains("path"));
}

#[test]
fn bind_without_serve_is_usage_error() {
    let output = mdsite_bin()
        .args(["--bind", "127.0.0.1:9000"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn serve_with_subcommand_is_usage_error() {
    let site = site_with_template();
    fs::write(site.path().join("content/x.md"), "# X").unwrap();

    mdsite_in(site.path())
        .args(["--serve", "render", "content/x.md"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--serve"));

    assert!(!site.path().join("output").exists());
}

#[test]
fn build_generates_every_page() {
    let site = site_with_template();
    fs::write(
        site.path().join("content/index.md"),
        "# Hello World\n\nThis is *great*.",
    )
    .unwrap();
    fs::write(site.path().join("content/about.md"), "Just text").unwrap();

    mdsite_in(site.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Starting site generation..."))
        .stderr(predicate::str::contains("Found 2 markdown file(s):"))
        .stderr(predicate::str::contains("Generated: output/about.html"))
        .stderr(predicate::str::contains("Generated 2 HTML file(s) in output/"))
        .stderr(predicate::str::contains("Your index.html is ready at:"));

    let index = fs::read_to_string(site.path().join("output/index.html")).unwrap();
    assert!(index.contains("<title>Hello World</title>"));
    assert!(index.contains("<p>This is <em>great</em>.</p>"));

    let about = fs::read_to_string(site.path().join("output/about.html")).unwrap();
    assert!(about.contains("<title>My Static Site</title>"));
}

#[test]
fn build_respects_directory_and_title_flags() {
    let site = tempfile::tempdir().unwrap();
    fs::create_dir_all(site.path().join("docs")).unwrap();
    fs::create_dir_all(site.path().join("theme")).unwrap();
    fs::write(site.path().join("theme/page.html"), TEMPLATE).unwrap();
    fs::write(site.path().join("docs/notes.md"), "no heading here").unwrap();

    mdsite_in(site.path())
        .args(["-c", "docs", "-t", "theme", "--template", "page.html"])
        .args(["-o", "public", "--title", "Notebook"])
        .assert()
        .success();

    let page = fs::read_to_string(site.path().join("public/notes.html")).unwrap();
    assert!(page.contains("<title>Notebook</title>"));
    assert!(!site.path().join("output").exists());
}

#[test]
fn build_reads_directories_from_environment() {
    let site = site_with_template();
    fs::write(site.path().join("content/page.md"), "# Env").unwrap();

    mdsite_in(site.path())
        .env("MDSITE_OUTPUT_DIR", "from-env")
        .assert()
        .success();

    assert!(site.path().join("from-env/page.html").is_file());
}

#[test]
fn build_without_content_dir_fails() {
    let site = tempfile::tempdir().unwrap();

    mdsite_in(site.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("content"));

    assert!(!site.path().join("content").exists());
}

#[test]
fn build_without_markdown_files_fails() {
    let site = site_with_template();
    fs::write(site.path().join("content/readme.txt"), "not markdown").unwrap();

    mdsite_in(site.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No markdown files found"));

    assert!(!site.path().join("output").exists());
}

#[test]
fn build_without_template_generates_nothing() {
    let site = tempfile::tempdir().unwrap();
    fs::create_dir(site.path().join("content")).unwrap();
    fs::write(site.path().join("content/index.md"), "# Home").unwrap();

    mdsite_in(site.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("default.html").and(predicate::str::contains("not found")));

    assert!(!site.path().join("output/index.html").exists());
}

#[test]
fn build_with_unreadable_page_reports_failure() {
    let site = site_with_template();
    fs::write(site.path().join("content/bad.md"), [0xff, 0xfe, 0x00]).unwrap();
    fs::write(site.path().join("content/good.md"), "# Good").unwrap();

    mdsite_in(site.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("bad.md"))
        .stderr(predicate::str::contains("Generated 1 HTML file(s)"));

    assert!(site.path().join("output/good.html").is_file());
    assert!(!site.path().join("output/bad.html").exists());
}

#[test]
fn render_single_file() {
    let site = site_with_template();
    fs::write(site.path().join("content/post.md"), "# Post").unwrap();

    mdsite_in(site.path())
        .args(["render", "content/post.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("post.html"));

    let page = fs::read_to_string(site.path().join("output/post.html")).unwrap();
    assert!(page.contains("<title>Post</title>"));
    assert!(page.contains(r#"<h1 id="post">Post</h1>"#));
}

#[test]
fn render_without_heading_ids() {
    let site = site_with_template();
    fs::write(site.path().join("content/post.md"), "# Post").unwrap();

    mdsite_in(site.path())
        .args(["--no-heading-ids", "render", "content/post.md"])
        .assert()
        .success();

    let page = fs::read_to_string(site.path().join("output/post.html")).unwrap();
    assert!(page.contains("<h1>Post</h1>"));
}

#[test]
fn render_missing_file_fails() {
    let site = site_with_template();

    mdsite_in(site.path())
        .args(["render", "content/missing.md"])
        .assert()
        .code(1);
}

#[test]
fn list_prints_generated_pages() {
    let site = site_with_template();
    fs::create_dir(site.path().join("output")).unwrap();
    fs::write(site.path().join("output/b.html"), "").unwrap();
    fs::write(site.path().join("output/a.html"), "").unwrap();
    fs::write(site.path().join("output/style.css"), "").unwrap();

    mdsite_in(site.path())
        .arg("list")
        .assert()
        .success()
        .stdout("a.html\nb.html\n");
}

#[test]
fn config_set_then_build_uses_file() {
    let site = site_with_template();
    fs::write(site.path().join("content/page.md"), "plain").unwrap();

    mdsite_in(site.path())
        .args(["config", "set", "default_title", "Configured"])
        .assert()
        .success();

    mdsite_in(site.path())
        .args(["config", "get", "default_title"])
        .assert()
        .success()
        .stdout("Configured\n");

    mdsite_in(site.path()).assert().success();

    let page = fs::read_to_string(site.path().join("output/page.html")).unwrap();
    assert!(page.contains("<title>Configured</title>"));
}

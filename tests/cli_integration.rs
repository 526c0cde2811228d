//! Integration tests for the `sc` CLI.
//!
//! Each test creates a temp site directory, runs `sc` as a subprocess,
//! and verifies stdout and/or the persisted store files.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use pretty_assertions::assert_eq;

/// Get the path to the built `sc` binary.
fn sc_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("sc");
    path
}

/// Create a site with settings only; records come from the seed defaults.
fn create_test_site(root: &Path) {
    let site_dir = root.join("site");
    fs::create_dir_all(&site_dir).unwrap();
    fs::write(
        site_dir.join("site.toml"),
        "[ids]\nstrategy = \"timestamp\"\n\n[log]\nfile = false\n",
    )
    .unwrap();
}

/// Run `sc` with the given args in the given directory, returning (stdout, stderr, success).
fn run_sc(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(sc_bin())
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run sc");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

/// Run `sc` expecting success, return stdout.
fn run_sc_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_sc(dir, args);
    if !success {
        panic!(
            "sc {:?} failed:\nstdout: {}\nstderr: {}",
            args, stdout, stderr
        );
    }
    stdout
}

fn read_json(root: &Path, key: &str) -> serde_json::Value {
    let text = fs::read_to_string(root.join("site").join(format!("{}.json", key))).unwrap();
    serde_json::from_str(&text).unwrap()
}

// ---------------------------------------------------------------------------
// Read command tests
// ---------------------------------------------------------------------------

#[test]
fn test_posts_default_feed() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_site(tmp.path());

    let out = run_sc_ok(tmp.path(), &["posts"]);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            "[E] 1 2024-05-20 신규 회원 첫 입금 20% 보너스 이벤트",
            "[G] 2 2024-05-18 VIP 골프 & 호텔 패키지 안내",
            "[N] 3 2024-05-15 시스템 점검 및 보안 업데이트 공지",
        ]
    );
    // Reading never writes
    assert!(!tmp.path().join("site/fc_posts.json").exists());
}

#[test]
fn test_posts_category_filter() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_site(tmp.path());

    let out = run_sc_ok(tmp.path(), &["posts", "--category", "notice"]);
    assert_eq!(out.trim(), "[N] 3 2024-05-15 시스템 점검 및 보안 업데이트 공지");

    let (_, stderr, success) = run_sc(tmp.path(), &["posts", "--category", "promo"]);
    assert!(!success);
    assert!(stderr.contains("unknown category 'promo'"));
}

#[test]
fn test_posts_json() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_site(tmp.path());

    let out = run_sc_ok(tmp.path(), &["posts", "--json"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    let posts = parsed.as_array().unwrap();
    assert_eq!(posts.len(), 3);
    assert_eq!(posts[0]["category"], "Event");
    assert_eq!(
        posts[0]["imageUrl"],
        "https://picsum.photos/seed/casino1/800/400"
    );
}

#[test]
fn test_post_show() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_site(tmp.path());

    let out = run_sc_ok(tmp.path(), &["post", "show", "2"]);
    assert!(out.starts_with("[G] 2 2024-05-18 VIP 골프 & 호텔 패키지 안내\n"));
    assert!(out.contains("category: Guide"));
    assert!(out.contains("image: https://picsum.photos/seed/golf/800/400"));

    let (_, stderr, success) = run_sc(tmp.path(), &["post", "show", "99"]);
    assert!(!success);
    assert!(stderr.contains("post not found: 99"));
}

#[test]
fn test_config_show() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_site(tmp.path());

    let out = run_sc_ok(tmp.path(), &["config"]);
    assert!(out.lines().next().unwrap().ends_with("FANTASTIC CLARK"));
    assert!(out.contains("secondaryColor:   #A020F0"));

    let json: serde_json::Value =
        serde_json::from_str(&run_sc_ok(tmp.path(), &["config", "--json"])).unwrap();
    assert_eq!(json["siteName"], "FANTASTIC CLARK");
    assert_eq!(json["telegramLink"], "https://t.me/fantastic_clark");
}

#[test]
fn test_inquiries_status_filter() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_site(tmp.path());

    let out = run_sc_ok(tmp.path(), &["inquiries", "--status", "pending"]);
    assert_eq!(
        out,
        "[ ] 1 2024-05-21 홍길동 <010-1234-5678>\n    VIP 멤버십 가입 조건이 궁금합니다.\n"
    );
    let out = run_sc_ok(tmp.path(), &["inquiries", "--status", "completed"]);
    assert_eq!(out, "");
}

#[test]
fn test_search() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_site(tmp.path());

    let out = run_sc_ok(tmp.path(), &["search", "vip"]);
    assert!(out.contains("[post:2] VIP 골프 & 호텔 패키지 안내 (in title)"));
    assert!(out.contains("[inquiry:1] 홍길동 (in message)"));
    assert!(!out.contains("[post:3]"));

    // Invalid regex falls back to a literal match
    let out = run_sc_ok(tmp.path(), &["search", "20%("]);
    assert_eq!(out, "");
}

#[test]
fn test_not_a_site() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, stderr, success) = run_sc(tmp.path(), &["posts"]);
    assert!(!success);
    assert!(stderr.contains("not a showcase site"));
}

#[test]
fn test_site_dir_flag() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_site(tmp.path());
    let elsewhere = tempfile::TempDir::new().unwrap();

    let site = tmp.path().to_str().unwrap();
    let out = run_sc_ok(elsewhere.path(), &["-C", site, "posts", "--category", "guide"]);
    assert!(out.contains("VIP 골프"));
}

#[test]
fn test_discovers_site_from_subdirectory() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_site(tmp.path());
    let nested = tmp.path().join("public/assets");
    fs::create_dir_all(&nested).unwrap();

    let out = run_sc_ok(&nested, &["inquiries"]);
    assert!(out.contains("홍길동"));
}

// ---------------------------------------------------------------------------
// Write command tests
// ---------------------------------------------------------------------------

#[test]
fn test_inquire_then_complete() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_site(tmp.path());

    let id = run_sc_ok(tmp.path(), &["inquire", "Kim", "kim@example.com", "Golf package?"]);
    let id = id.trim().to_string();
    assert!(!id.is_empty());

    let saved = read_json(tmp.path(), "fc_inquiries");
    let list = saved.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["id"], id.as_str());
    assert_eq!(list[0]["name"], "Kim");
    assert_eq!(list[0]["status"], "Pending");
    assert_eq!(list[1]["id"], "1");
    // Only the inquiries record was written
    assert!(!tmp.path().join("site/fc_posts.json").exists());
    assert!(!tmp.path().join("site/fc_config.json").exists());

    let out = run_sc_ok(tmp.path(), &["inquiry", "done", &id]);
    assert_eq!(out.trim(), format!("inquiry {} completed", id));
    let saved = read_json(tmp.path(), "fc_inquiries");
    assert_eq!(saved[0]["status"], "Completed");

    let out = run_sc_ok(tmp.path(), &["inquiry", "done", &id]);
    assert_eq!(out.trim(), format!("inquiry {} already completed", id));
}

#[test]
fn test_inquire_requires_name_and_contact() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_site(tmp.path());

    let (_, stderr, success) = run_sc(tmp.path(), &["inquire", "  ", "010"]);
    assert!(!success);
    assert!(stderr.contains("name is required"));

    let (_, stderr, success) = run_sc(tmp.path(), &["inquire", "Lee", ""]);
    assert!(!success);
    assert!(stderr.contains("contact is required"));

    assert!(!tmp.path().join("site/fc_inquiries.json").exists());
}

#[test]
fn test_inquiry_rm() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_site(tmp.path());

    run_sc_ok(tmp.path(), &["inquiry", "rm", "1"]);
    let saved = read_json(tmp.path(), "fc_inquiries");
    assert_eq!(saved, serde_json::json!([]));

    let (_, stderr, success) = run_sc(tmp.path(), &["inquiry", "rm", "1"]);
    assert!(!success);
    assert!(stderr.contains("inquiry not found: 1"));
}

#[test]
fn test_post_add_goes_to_top() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_site(tmp.path());

    let id = run_sc_ok(
        tmp.path(),
        &[
            "post",
            "add",
            "--title",
            "Summer event",
            "--content",
            "Double points all week",
        ],
    );
    let id = id.trim().to_string();

    let saved = read_json(tmp.path(), "fc_posts");
    let posts = saved.as_array().unwrap();
    assert_eq!(posts.len(), 4);
    assert_eq!(posts[0]["id"], id.as_str());
    assert_eq!(posts[0]["category"], "Event");
    assert!(posts[0].get("imageUrl").is_none());
    assert_eq!(posts[1]["id"], "1");
}

#[test]
fn test_post_add_rejects_blank_title() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_site(tmp.path());

    let (_, stderr, success) = run_sc(
        tmp.path(),
        &["post", "add", "--title", " ", "--content", "body"],
    );
    assert!(!success);
    assert!(stderr.contains("title is required"));
    assert!(!tmp.path().join("site/fc_posts.json").exists());
}

#[test]
fn test_post_edit_keeps_position() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_site(tmp.path());

    run_sc_ok(
        tmp.path(),
        &[
            "post", "edit", "2", "--title", "Golf week", "--category", "event", "--image", "",
        ],
    );
    let saved = read_json(tmp.path(), "fc_posts");
    let posts = saved.as_array().unwrap();
    assert_eq!(posts.len(), 3);
    assert_eq!(posts[1]["id"], "2");
    assert_eq!(posts[1]["title"], "Golf week");
    assert_eq!(posts[1]["category"], "Event");
    assert_eq!(posts[1]["date"], "2024-05-18");
    assert!(posts[1].get("imageUrl").is_none());
}

#[test]
fn test_post_rm_requires_yes() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_site(tmp.path());

    let (_, stderr, success) = run_sc(tmp.path(), &["post", "rm", "3"]);
    assert!(!success);
    assert!(stderr.contains("without --yes"));
    assert!(!tmp.path().join("site/fc_posts.json").exists());

    run_sc_ok(tmp.path(), &["post", "rm", "3", "--yes"]);
    let out = run_sc_ok(tmp.path(), &["posts"]);
    assert_eq!(out.lines().count(), 2);
    assert!(!out.contains(" 3 "));
}

#[test]
fn test_config_set() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_site(tmp.path());

    let out = run_sc_ok(tmp.path(), &["config", "set", "site_name", "CLARK VIP"]);
    assert_eq!(out.trim(), "siteName updated");

    let saved = read_json(tmp.path(), "fc_config");
    assert_eq!(saved["siteName"], "CLARK VIP");
    // Other fields keep their defaults
    assert_eq!(saved["primaryColor"], "#8A2BE2");

    let (_, stderr, success) = run_sc(tmp.path(), &["config", "set", "favicon", "x"]);
    assert!(!success);
    assert!(stderr.contains("unknown field 'favicon'"));
}

#[test]
fn test_write_json_outcome() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_site(tmp.path());

    let out = run_sc_ok(tmp.path(), &["--json", "inquiry", "done", "1"]);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["action"], "inquiry_completed");
    assert_eq!(parsed["id"], "1");
    assert_eq!(parsed["changed"], true);
}

// ---------------------------------------------------------------------------
// Recovery
// ---------------------------------------------------------------------------

#[test]
fn test_corrupt_record_falls_back_and_is_logged() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_site(tmp.path());
    fs::write(tmp.path().join("site/fc_posts.json"), "{not json").unwrap();

    // Defaults are served in place of the corrupt payload
    let out = run_sc_ok(tmp.path(), &["posts"]);
    assert_eq!(out.lines().count(), 3);

    let log = run_sc_ok(tmp.path(), &["recovery"]);
    assert!(log.contains("[load] record replaced by default"));
    assert!(log.contains("Key: fc_posts"));
    assert!(log.contains("| {not json"));

    let path = run_sc_ok(tmp.path(), &["recovery", "path"]);
    assert!(path.trim().ends_with(".recovery.log"));

    let out = run_sc_ok(tmp.path(), &["recovery", "prune", "--all"]);
    assert!(out.starts_with("removed "));
}

#[test]
fn test_recovery_empty() {
    let tmp = tempfile::TempDir::new().unwrap();
    create_test_site(tmp.path());
    let out = run_sc_ok(tmp.path(), &["recovery"]);
    assert_eq!(out.trim(), "recovery log is empty");
}

// ---------------------------------------------------------------------------
// Init
// ---------------------------------------------------------------------------

#[test]
fn test_init() {
    let tmp = tempfile::TempDir::new().unwrap();

    let out = run_sc_ok(tmp.path(), &["init"]);
    assert!(out.contains("Initialized site"));

    let toml_content = fs::read_to_string(tmp.path().join("site/site.toml")).unwrap();
    let parsed: toml::Value = toml::from_str(&toml_content).unwrap();
    assert_eq!(parsed["ids"]["strategy"].as_str().unwrap(), "timestamp");

    // Initialized site is usable right away
    let out = run_sc_ok(tmp.path(), &["posts"]);
    assert_eq!(out.lines().count(), 3);

    let (_, stderr, success) = run_sc(tmp.path(), &["init"]);
    assert!(!success);
    assert!(stderr.contains("--force"));
    run_sc_ok(tmp.path(), &["init", "--force"]);
}

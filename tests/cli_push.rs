mod common;

use common::*;

#[test]
fn test_push_to_file_target_mirrors_site_into_target_and_record() {
    let env = TestEnv::builder()
        .with_site_file("index.html", INDEX_HTML)
        .with_site_file("css/site.css", SITE_CSS)
        .with_file_target()
        .build();

    let result = env.run(&["push"]);

    assert!(result.success, "push failed:\n{}", result.combined_output());
    assert!(result.stdout.contains("Push complete"), "{}", result.stdout);
    assert!(result.stdout.contains("3 changes: 1 dir added, 2 files added"));

    let expected = vec!["css/", "css/site.css", "index.html"];
    assert_eq!(env.tree("webroot"), expected);
    assert_eq!(env.tree("deployed"), expected);
    assert_eq!(env.read("webroot/index.html"), INDEX_HTML_MINIFIED);
    assert_eq!(env.read("deployed/index.html"), INDEX_HTML_MINIFIED);
}

#[test]
fn test_second_push_is_up_to_date() {
    let env = TestEnv::builder()
        .with_site_file("index.html", INDEX_HTML)
        .with_site_file("js/app.js", APP_JS)
        .with_file_target()
        .build();

    assert!(env.run(&["push"]).success);
    let result = env.run(&["push"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(
        result.stdout.contains("Already up to date"),
        "second push should send nothing; got:\n{}",
        result.stdout
    );
}

#[test]
fn test_push_removes_what_left_the_site() {
    let env = TestEnv::builder()
        .with_site_file("index.html", INDEX_HTML)
        .with_site_file("old/page.html", INDEX_HTML)
        .with_file_target()
        .build();
    assert!(env.run(&["push"]).success);

    env.remove("public/old");
    let result = env.run(&["push", "--json"]);

    assert!(result.success, "{}", result.combined_output());
    let json = result.json();
    assert_eq!(json["counts"]["file_delete"], 1);
    assert_eq!(json["counts"]["dir_delete"], 1);
    assert_eq!(env.tree("webroot"), vec!["index.html"]);
    assert_eq!(env.tree("deployed"), vec!["index.html"]);
}

#[test]
fn test_push_no_minify_sends_files_verbatim() {
    let env = TestEnv::builder()
        .with_site_file("index.html", INDEX_HTML)
        .with_file_target()
        .build();

    let result = env.run(&["push", "--no-minify"]);

    assert!(result.success, "{}", result.combined_output());
    assert_eq!(env.read("webroot/index.html"), INDEX_HTML);
}

#[test]
fn test_push_minify_disabled_from_environment() {
    let env = TestEnv::builder()
        .with_site_file("index.html", INDEX_HTML)
        .with_file_target()
        .build();

    let result = env.run_with_env(&["push"], &[("SITEPUSH_MINIFY", "off")]);

    assert!(result.success, "{}", result.combined_output());
    assert_eq!(env.read("webroot/index.html"), INDEX_HTML);
}

#[test]
fn test_push_skip_leaves_matching_entries_alone() {
    let env = TestEnv::builder()
        .with_site_file("index.html", INDEX_HTML)
        .with_site_file("drafts/next.html", INDEX_HTML)
        .with_file_target()
        .build();

    let result = env.run(&["push", "--skip", "drafts"]);

    assert!(result.success, "{}", result.combined_output());
    assert_eq!(env.tree("webroot"), vec!["index.html"]);
}

#[test]
fn test_push_json_reports_counts() {
    let env = TestEnv::builder()
        .with_site_file("index.html", INDEX_HTML)
        .with_site_file("css/site.css", SITE_CSS)
        .with_file_target()
        .build();

    let result = env.run(&["push", "--json"]);

    assert!(result.success, "{}", result.combined_output());
    let json = result.json();
    assert_eq!(json["command"], "push");
    assert_eq!(json["transport"], "file");
    assert_eq!(json["counts"]["dir_add"], 1);
    assert_eq!(json["counts"]["file_add"], 2);
    assert_eq!(json["counts"]["file_update"], 0);
}

#[test]
fn test_push_missing_source_dir_fails() {
    let env = TestEnv::builder().with_file_target().build();

    let result = env.run(&["push", "--source-dir", "dist"]);

    assert!(!result.success);
    assert_eq!(result.exit_code, 1);
    assert!(
        result.stderr.contains("Source directory not found"),
        "{}",
        result.stderr
    );
    assert!(env.tree("webroot").is_empty());
}

#[test]
fn test_push_missing_record_dir_fails() {
    let env = TestEnv::builder()
        .with_site_file("index.html", INDEX_HTML)
        .with_config(FILE_TARGET_CONFIG)
        .build();
    env.mkdir("webroot");

    let result = env.run(&["push"]);

    assert_eq!(result.exit_code, 1);
    assert!(
        result.stderr.contains("Destination directory not found"),
        "{}",
        result.stderr
    );
    assert!(env.tree("webroot").is_empty());
}

#[test]
fn test_push_ftp_without_settings_names_every_missing_key() {
    let env = TestEnv::builder()
        .with_site_file("index.html", INDEX_HTML)
        .with_record_dir()
        .build();

    let result = env.run(&["push"]);

    assert_eq!(result.exit_code, 1);
    assert!(
        result
            .stderr
            .contains("missing settings: ftp.host, ftp.user, ftp.password"),
        "{}",
        result.stderr
    );
    assert!(env.tree("deployed").is_empty());
}

#[test]
fn test_push_json_error_document() {
    let env = TestEnv::builder().with_record_dir().build();

    let result = env.run(&["push", "--json", "-s", "nowhere"]);

    assert_eq!(result.exit_code, 1);
    let json = result.json();
    assert_eq!(json["success"], false);
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("Source directory not found"));
}

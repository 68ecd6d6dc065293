use assert_fs::prelude::*;
use lingosheet::{FlatRecord, Sheet, Workbook};
use predicates::prelude::*;
use serde_json::{Value, json};

fn setup_locales() -> assert_fs::TempDir {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("locales/en/agent.json")
        .write_str(r#"{"title": "Agent", "menu": {"open": "Open", "close": "Close"}}"#)
        .unwrap();
    temp.child("locales/zh/agent.json")
        .write_str(r#"{"title": "代理", "menu": {"open": "打开"}}"#)
        .unwrap();
    temp
}

fn run_cli(temp: &assert_fs::TempDir, args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("lingosheet");
    cmd.current_dir(temp.path());

    // Inject --e2e flag for deterministic output
    let mut new_args = args.to_vec();
    new_args.push("--e2e");
    cmd.args(&new_args);

    cmd.assert()
}

fn read_json(temp: &assert_fs::TempDir, relative: &str) -> Value {
    let content = std::fs::read_to_string(temp.path().join(relative))
        .unwrap_or_else(|e| panic!("failed to read {relative}: {e}"));
    serde_json::from_str(&content).unwrap()
}

#[test]
fn test_to_sheets_writes_workbooks() {
    let temp = setup_locales();

    run_cli(&temp, &["to-sheets", "locales"])
        .success()
        .stdout(predicate::str::contains("Generating file..."))
        .stdout(predicate::str::contains(
            "Excel file generated. --> json_output/agent.xlsx",
        ))
        .stdout(predicate::str::contains(
            "Excel file generated. --> json_output/_merge.xlsx",
        ))
        .stdout(predicate::str::contains(
            "Done: 2 file(s) generated, 0 warning(s), 0 error(s) in [DURATION]",
        ));

    temp.child("json_output/agent.xlsx").assert(predicate::path::is_file());
    temp.child("json_output/_merge.xlsx").assert(predicate::path::is_file());
}

#[test]
fn test_round_trip_through_workbooks() {
    let temp = setup_locales();

    run_cli(&temp, &["to-sheets", "locales"]).success();
    run_cli(&temp, &["to-json", "json_output", "locales"])
        .success()
        .stdout(predicate::str::contains(
            "Translated json file generated. --> excel_output/zh/agent.json",
        ));

    assert_eq!(
        read_json(&temp, "excel_output/en/agent.json"),
        read_json(&temp, "locales/en/agent.json")
    );
    assert_eq!(
        read_json(&temp, "excel_output/zh/agent.json"),
        read_json(&temp, "locales/zh/agent.json")
    );
}

#[test]
fn test_merge_option_reads_aggregate_workbook() {
    let temp = setup_locales();

    run_cli(&temp, &["to-sheets", "locales"]).success();
    run_cli(&temp, &["to-json", "json_output", "-m", "-o", "merged"])
        .success()
        .stdout(predicate::str::contains(
            "Generating file... (w/ merge option)",
        ));

    assert_eq!(
        read_json(&temp, "merged/zh/agent.json"),
        json!({"title": "代理", "menu": {"open": "打开"}})
    );
}

#[test]
fn test_missing_key_and_missing_locale_file_do_not_fail() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("sheets").create_dir_all().unwrap();
    temp.child("locales/zh").create_dir_all().unwrap();

    let workbook = Workbook {
        sheets: vec![
            Sheet::new(
                "en",
                vec![
                    FlatRecord::base("agent:title", "Agent"),
                    FlatRecord::base("", "orphan"),
                ],
            ),
            Sheet::new(
                "zh",
                vec![FlatRecord::translated("agent:title", Some("Agent".into()), "代理")],
            ),
        ],
    };
    workbook
        .write(&temp.path().join("sheets/agent.xlsx"))
        .unwrap();

    run_cli(&temp, &["to-json", "sheets", "locales"])
        .success()
        .stderr(predicate::str::contains(
            "Missing key in excel sheet. --> agent.xlsx [en] row 2",
        ))
        .stderr(predicate::str::contains("File not exist. -->"))
        .stdout(predicate::str::contains("1 warning(s), 1 error(s)"));

    assert_eq!(
        read_json(&temp, "excel_output/en/agent.json"),
        json!({"title": "Agent"})
    );
    temp.child("excel_output/zh/agent.json")
        .assert(predicate::path::missing());
}

#[test]
fn test_missing_input_directory_fails() {
    let temp = assert_fs::TempDir::new().unwrap();

    run_cli(&temp, &["to-json", "nope"])
        .failure()
        .stderr(predicate::str::contains("lingosheet::input::not_found"));
}

#[test]
fn test_empty_input_directory_fails() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("locales").create_dir_all().unwrap();

    run_cli(&temp, &["to-sheets", "locales"])
        .failure()
        .stderr(predicate::str::contains("lingosheet::input::empty"));
}

#[test]
fn test_config_file_sets_output_and_indent() {
    let temp = setup_locales();
    temp.child("lingosheet.toml")
        .write_str("sheets_output_dir = \"sheets\"\njson_output_dir = \"out\"\nindent = 2\n")
        .unwrap();

    run_cli(&temp, &["to-sheets", "locales"]).success();
    temp.child("sheets/agent.xlsx").assert(predicate::path::is_file());

    run_cli(&temp, &["to-json", "sheets"]).success();
    temp.child("out/en/agent.json")
        .assert(predicate::str::starts_with("{\n  \"title\": \"Agent\""));
}

#[test]
fn test_malformed_config_fails() {
    let temp = setup_locales();
    temp.child("lingosheet.toml")
        .write_str("indent = \"four\"\n")
        .unwrap();

    run_cli(&temp, &["to-sheets", "locales"])
        .failure()
        .stderr(predicate::str::contains("lingosheet::config::parse_error"));
}

#[test]
fn test_base_language_flag() {
    let temp = setup_locales();

    run_cli(&temp, &["to-sheets", "locales", "--base-language", "zh"]).success();

    let workbook = Workbook::read(&temp.path().join("json_output/agent.xlsx")).unwrap();
    assert_eq!(workbook.sheet_names(), vec!["zh", "en"]);
}

#[test]
fn test_conflicting_row_keeps_existing_translation() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("locales/zh/agent.json")
        .write_str(r#"{"menu": "菜单"}"#)
        .unwrap();
    temp.child("sheets").create_dir_all().unwrap();

    let workbook = Workbook {
        sheets: vec![Sheet::new(
            "zh",
            vec![
                FlatRecord::translated("agent:menu.open", Some("Open".into()), "打开"),
                FlatRecord::translated("agent:title", Some("Agent".into()), "代理"),
            ],
        )],
    };
    workbook
        .write(&temp.path().join("sheets/agent.xlsx"))
        .unwrap();

    run_cli(&temp, &["to-json", "sheets", "locales"])
        .success()
        .stderr(predicate::str::contains(
            "Existing value kept, key skipped. --> agent:menu.open",
        ));

    assert_eq!(
        read_json(&temp, "excel_output/zh/agent.json"),
        json!({"menu": "菜单", "title": "代理"})
    );
}

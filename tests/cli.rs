use std::fs;

use assert_cmd::Command;
use predicates::str::contains;

mod common;

fn yoloviz() -> Command {
    let mut cmd = Command::cargo_bin("yoloviz").unwrap();
    cmd.env_remove("YOLOVIZ_COLOR").env_remove("YOLOVIZ_THICKNESS");
    cmd
}

#[test]
fn runs() {
    yoloviz().assert().success().stdout(contains("yoloviz"));
}

#[test]
fn outputs_tool_name() {
    let mut cmd = yoloviz();
    cmd.arg("-V");
    cmd.assert()
        .success()
        .stdout(format!("yoloviz {}\n", env!("CARGO_PKG_VERSION")));
}

// View subcommand: every case here fails before a window would open.

#[test]
fn view_empty_dataset_fails_without_display() {
    let temp = tempfile::tempdir().expect("create temp dir");

    let mut cmd = yoloviz();
    cmd.arg("view").arg(temp.path());
    cmd.assert().failure().stderr(contains("Dataset empty"));
}

#[test]
fn view_labels_without_images_fails() {
    let temp = tempfile::tempdir().expect("create temp dir");
    fs::create_dir_all(temp.path().join("labels")).expect("create labels dir");

    let mut cmd = yoloviz();
    cmd.arg("view").arg(temp.path());
    cmd.assert()
        .failure()
        .stderr(contains("Directory not found"))
        .stderr(contains("images"));
}

#[test]
fn view_missing_directory_fails() {
    let mut cmd = yoloviz();
    cmd.args(["view", "definitely/not/a/dataset"]);
    cmd.assert().failure().stderr(contains("Directory not found"));
}

#[test]
fn view_rejects_zero_thickness() {
    let temp = tempfile::tempdir().expect("create temp dir");

    let mut cmd = yoloviz();
    cmd.arg("view").arg(temp.path()).args(["--thickness", "0"]);
    cmd.assert().failure().stderr(contains("thickness"));
}

#[test]
fn view_rejects_unknown_color() {
    let temp = tempfile::tempdir().expect("create temp dir");

    let mut cmd = yoloviz();
    cmd.arg("view").arg(temp.path()).args(["-c", "not-a-color"]);
    cmd.assert().failure().stderr(contains("Unsupported color"));
}

// Check subcommand

#[test]
fn check_valid_dataset_succeeds() {
    let temp = tempfile::tempdir().expect("create temp dir");
    common::create_basic_dataset(temp.path());

    let mut cmd = yoloviz();
    cmd.arg("check").arg(temp.path());
    cmd.assert()
        .success()
        .stdout(contains("Checked 3 image(s), 2 with labels, 3 annotation(s)"))
        .stdout(contains("MissingAnnotation"));
}

#[test]
fn check_reports_bad_label_lines() {
    let temp = tempfile::tempdir().expect("create temp dir");
    common::create_basic_dataset(temp.path());
    common::write_labels(&temp.path().join("labels/a.txt"), "0 0.5 0.5 0.5 abc\n");

    let mut cmd = yoloviz();
    cmd.arg("check").arg(temp.path());
    cmd.assert()
        .failure()
        .stdout(contains("InvalidValue"))
        .stdout(contains("a.txt:1"))
        .stderr(contains("Check failed with 1 error(s)"));
}

#[test]
fn check_json_output_format() {
    let temp = tempfile::tempdir().expect("create temp dir");
    common::create_basic_dataset(temp.path());

    let mut cmd = yoloviz();
    cmd.arg("check").arg(temp.path()).args(["--output", "json"]);
    let output = cmd.assert().success().get_output().stdout.clone();

    let report: serde_json::Value = serde_json::from_slice(&output).expect("valid json");
    assert_eq!(report["image_count"], 3);
    assert_eq!(report["annotation_count"], 3);
    assert_eq!(report["issues"][0]["code"], "MissingAnnotation");
    assert_eq!(report["issues"][0]["severity"], "Warning");
}

#[test]
fn check_honours_custom_directory_names() {
    let temp = tempfile::tempdir().expect("create temp dir");
    common::write_png(&temp.path().join("imgs/a.png"), 8, 8);
    common::write_labels(&temp.path().join("anns/a.txt"), "3 0.5 0.5 0.5 0.5\n");

    let mut cmd = yoloviz();
    cmd.arg("check")
        .arg(temp.path())
        .args(["--images-dir", "imgs", "--labels-dir", "anns"]);
    cmd.assert()
        .success()
        .stdout(contains("1 with labels, 1 annotation(s)"))
        .stdout(contains("Check passed"));
}

//! # CLI Tests / 命令行测试
//!
//! Runs the three binaries end to end against a mocked
//! OpenModelicaLibraryTesting output directory.
//!
//! 针对模拟的 OpenModelicaLibraryTesting 输出目录端到端运行三个二进制程序。

mod common;

use assert_cmd::prelude::*;
use common::{setup_runner_dir, write_library_report};
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

/// A binary with a clean, English, colorless environment.
fn command(bin: &str) -> Command {
    let mut cmd = Command::cargo_bin(bin).unwrap();
    cmd.env("OMLT_LANG", "en")
        .env("NO_COLOR", "1")
        .env_remove("PAGES_URL")
        .env_remove("ALLOW_FAILING_TESTS")
        .env_remove("DYGRAPH_SCRIPT")
        .env_remove("OMLT_SETTINGS")
        .env_remove("GITHUB_OUTPUT")
        .env_remove("GITHUB_STEP_SUMMARY");
    cmd
}

fn summarizer(dir: &Path, version: &str, reference_files: &str, root: &Path) -> Command {
    let mut cmd = command("result-summarizer");
    cmd.arg(dir)
        .arg("MyLibrary")
        .arg(version)
        .arg(reference_files)
        .env("GITHUB_OUTPUT", root.join("github_output"))
        .env("GITHUB_STEP_SUMMARY", root.join("summary.md"));
    cmd
}

/// Generating a configuration writes the JSON file and reports its path.
///
/// 生成配置会写入 JSON 文件并报告其路径。
#[test]
fn test_config_generator_writes_file() {
    let temp_dir = tempdir().unwrap();
    let config_file = temp_dir.path().join("configs").join("conf-MyLibrary.json");

    command("config-generator")
        .arg(&config_file)
        .arg(temp_dir.path().join("MyLibrary").join("package.mo"))
        .arg("MyLibrary")
        .arg("pull/5/merge")
        .arg("")
        .arg("csv")
        .arg(".")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote test configuration to"));

    let content = fs::read_to_string(&config_file).unwrap();
    assert!(content.contains("\"libraryVersion\": \"dev-pr-5\""));
    assert!(!content.contains("referenceFiles"));
}

/// The settings overlay named by `OMLT_SETTINGS` ends up in the configuration.
///
/// `OMLT_SETTINGS` 指定的设置覆盖会写入配置。
#[test]
fn test_config_generator_with_settings() {
    let temp_dir = tempdir().unwrap();
    let settings = temp_dir.path().join("settings.toml");
    fs::write(&settings, "ulimit_omc = 1200\n").unwrap();
    let config_file = temp_dir.path().join("conf.json");

    command("config-generator")
        .env("OMLT_SETTINGS", &settings)
        .arg(&config_file)
        .arg("package.mo")
        .arg("MyLibrary")
        .arg("main")
        .arg("")
        .arg("")
        .arg("")
        .assert()
        .success();

    assert!(
        fs::read_to_string(&config_file)
            .unwrap()
            .contains("\"ulimitOmc\": 1200")
    );
}

/// Missing positional arguments are a usage error.
///
/// 缺少位置参数属于用法错误。
#[test]
fn test_config_generator_missing_arguments() {
    command("config-generator")
        .arg("conf.json")
        .arg("package.mo")
        .assert()
        .failure()
        .code(2);
}

/// The archiver copies the report and writes `pages-url` when `PAGES_URL` is set.
///
/// 设置 `PAGES_URL` 时，归档器复制报告并写入 `pages-url`。
#[test]
fn test_result_archiver_copies_report() {
    let (temp_dir, runner) = setup_runner_dir("MyLibrary_main");
    let target = temp_dir.path().join("html");
    let output_file = temp_dir.path().join("github_output");

    command("result-archiver")
        .env("PAGES_URL", "https://user.github.io/repo")
        .env("GITHUB_OUTPUT", &output_file)
        .arg("MyLibrary")
        .arg("main")
        .arg("master")
        .arg(&runner)
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("Copied test report to"));

    assert!(target.join("index.html").is_file());
    assert!(target.join("master/MyLibrary_main/files/dygraph-combined.js").is_file());
    assert_eq!(
        fs::read_to_string(&output_file).unwrap(),
        "pages-url=https://user.github.io/repo/master/MyLibrary_main/MyLibrary_main.html\n"
    );
}

/// A target ending in `.zip` produces an archive instead of a directory.
///
/// 以 `.zip` 结尾的目标会生成归档而不是目录。
#[test]
fn test_result_archiver_zip_mode() {
    let (temp_dir, runner) = setup_runner_dir("MyLibrary_main");
    let target = temp_dir.path().join("html.zip");

    command("result-archiver")
        .arg("MyLibrary")
        .arg("main")
        .arg("master")
        .arg(&runner)
        .arg(&target)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote test report archive"));

    assert!(target.is_file());
}

/// A missing source file fails before anything is written.
///
/// 缺少源文件时在写入任何内容之前失败。
#[test]
fn test_result_archiver_missing_report() {
    let (temp_dir, runner) = setup_runner_dir("MyLibrary_main");
    let target = temp_dir.path().join("html");

    command("result-archiver")
        .arg("MyLibrary")
        .arg("v2.0.0")
        .arg("master")
        .arg(&runner)
        .arg(&target)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Test report source not found"));

    assert!(!target.exists());
}

/// Passing tests exit with success and write all four outputs.
///
/// 测试通过时以成功退出并写入全部四个输出。
#[test]
fn test_result_summarizer_passing() {
    let temp_dir = tempdir().unwrap();
    let dir = temp_dir.path().join("OpenModelicaLibraryTesting");
    write_library_report(&dir, "MyLibrary_main", 2, 2, 2);

    summarizer(&dir, "main", "ReferenceFiles", temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("::notice::All verification tests passing"))
        .stdout(predicate::str::contains("ALL REQUESTED TESTS PASSED"));

    let outputs = fs::read_to_string(temp_dir.path().join("github_output")).unwrap();
    assert_eq!(outputs.lines().count(), 4);
    assert!(
        fs::read_to_string(temp_dir.path().join("summary.md"))
            .unwrap()
            .starts_with("## Summary")
    );
}

/// Failing verification exits with an error and an annotation.
///
/// 验证失败时以错误退出并输出注释。
#[test]
fn test_result_summarizer_failing_verification() {
    let temp_dir = tempdir().unwrap();
    let dir = temp_dir.path().join("OpenModelicaLibraryTesting");
    write_library_report(&dir, "MyLibrary_main", 10, 10, 8);

    summarizer(&dir, "main", "ReferenceFiles", temp_dir.path())
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("::error::Verification tests failed."))
        .stdout(predicate::str::contains("SOME REQUESTED TESTS FAILED"));

    let outputs = fs::read_to_string(temp_dir.path().join("github_output")).unwrap();
    assert!(outputs.contains("verification-tests-passing=false"));
}

/// `ALLOW_FAILING_TESTS` keeps the exit status at zero.
///
/// `ALLOW_FAILING_TESTS` 使退出状态保持为零。
#[test]
fn test_result_summarizer_allow_failing_tests() {
    let temp_dir = tempdir().unwrap();
    let dir = temp_dir.path().join("OpenModelicaLibraryTesting");
    write_library_report(&dir, "MyLibrary_main", 10, 9, 0);

    summarizer(&dir, "main", "", temp_dir.path())
        .env("ALLOW_FAILING_TESTS", "true")
        .assert()
        .success()
        .stdout(predicate::str::contains("::error::Simulation tests failed."))
        .stdout(predicate::str::contains("::warning::Failing tests are allowed"));
}

/// Without `GITHUB_OUTPUT` and `GITHUB_STEP_SUMMARY` everything goes to stdout.
///
/// 未设置 `GITHUB_OUTPUT` 和 `GITHUB_STEP_SUMMARY` 时所有内容输出到标准输出。
#[test]
fn test_result_summarizer_without_github_files() {
    let temp_dir = tempdir().unwrap();
    write_library_report(temp_dir.path(), "MyLibrary_main", 2, 2, 2);

    command("result-summarizer")
        .arg(temp_dir.path())
        .arg("MyLibrary")
        .arg("main")
        .arg("")
        .assert()
        .success()
        .stdout(predicate::str::contains("## Summary"))
        .stdout(predicate::str::contains("simulation-tests-passing=true"));
}

/// A missing report is an error, not a test failure verdict.
///
/// 缺少报告属于错误，而不是测试失败结论。
#[test]
fn test_result_summarizer_missing_report() {
    let temp_dir = tempdir().unwrap();

    summarizer(temp_dir.path(), "main", "", temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read test report"));

    assert!(!temp_dir.path().join("summary.md").exists());
}

/// The interface follows `OMLT_LANG`.
///
/// 界面语言跟随 `OMLT_LANG`。
#[test]
fn test_chinese_help() {
    command("result-summarizer")
        .env("OMLT_LANG", "zh-CN")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("汇总"));
}

use assert_cmd::Command;

#[test]
fn help_lists_subcommands() {
    let mut cmd = Command::cargo_bin("ats-lens").expect("binary builds");
    let assert = cmd.arg("--help").assert().success();
    let output = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    for subcommand in ["extract", "score", "bootstrap", "train", "serve"] {
        assert!(output.contains(subcommand), "missing subcommand {subcommand}");
    }
}

#[test]
fn unknown_subcommand_fails() {
    let mut cmd = Command::cargo_bin("ats-lens").expect("binary builds");
    cmd.arg("frobnicate").assert().failure();
}

#[test]
fn extract_requires_a_file_argument() {
    let mut cmd = Command::cargo_bin("ats-lens").expect("binary builds");
    cmd.arg("extract").assert().failure();
}

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn make_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock is before UNIX_EPOCH")
        .as_nanos();
    let pid = std::process::id();
    let dir = std::env::temp_dir().join(format!("shiftopt-integ-{prefix}-{pid}-{nanos}"));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

fn shiftopt() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_shiftopt"));
    cmd.env_remove("POSIXLY_CORRECT").env_remove("RUST_LOG");
    cmd
}

fn run_ok(cmd: &mut Command) -> String {
    let out: Output = cmd.output().expect("failed to run shiftopt");
    assert!(
        out.status.success(),
        "shiftopt failed:\nstatus: {}\nstderr:\n{}",
        out.status,
        String::from_utf8_lossy(&out.stderr),
    );
    String::from_utf8(out.stdout).expect("stdout is not UTF-8")
}

#[test]
fn help_works() {
    let stdout = run_ok(shiftopt().arg("--help"));
    assert!(
        stdout.contains("--options") && stdout.contains("--longoptions"),
        "unexpected help output:\n{stdout}"
    );
}

#[test]
fn normalizes_ls_example() {
    let stdout = run_ok(shiftopt().args(["-o", "al", "-l", "all", "--", "-al", "/etc"]));
    assert_eq!(stdout, " -a -l -- /etc\n");
}

#[test]
fn quotes_positionals_for_eval() {
    let stdout = run_ok(shiftopt().args(["-o", "b:", "--", "my file", "-bx y"]));
    assert_eq!(stdout, " -b 'x y' -- 'my file'\n");
}

#[test]
fn lines_format_includes_program_name() {
    let stdout = run_ok(shiftopt().args([
        "-n", "prog", "-l", "size::", "-f", "lines", "--", "--size=10", "rest",
    ]));
    assert_eq!(stdout, "prog\n--size\n10\n--\nrest\n");
}

#[test]
fn json_format() {
    let stdout = run_ok(shiftopt().args(["-o", "ab:", "-f", "json", "--", "x", "-abc"]));
    let json: serde_json::Value = serde_json::from_str(&stdout).expect("stdout is not JSON");
    assert_eq!(json["program"], "shiftopt");
    assert_eq!(json["options"], serde_json::json!(["-a", "-b", "c"]));
    assert_eq!(json["positionals"], serde_json::json!(["x"]));
}

#[test]
fn unrecognized_option_fails() {
    let out = shiftopt()
        .args(["-o", "a", "--", "-z"])
        .output()
        .expect("failed to run shiftopt");
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("unrecognized option '-z'"), "stderr:\n{stderr}");
}

#[test]
fn lenient_passes_unknown_options_through() {
    let stdout = run_ok(shiftopt().args(["-o", "a", "--lenient", "--", "-z", "-a"]));
    assert_eq!(stdout, " -z -a --\n");
}

#[test]
fn lenient_marks_missing_argument() {
    let stdout = run_ok(shiftopt().args(["-o", "ab:", "--lenient", "--", "x", "-b"]));
    assert_eq!(stdout, " '-?' -- x\n");
}

#[test]
fn invalid_long_spec_fails() {
    let out = shiftopt()
        .args(["-l", "all,:,x", "--", "--all"])
        .output()
        .expect("failed to run shiftopt");
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("invalid long option entry ':'"), "stderr:\n{stderr}");
}

#[test]
fn posixly_correct_stops_at_first_positional() {
    let stdout = run_ok(
        shiftopt()
            .env("POSIXLY_CORRECT", "1")
            .args(["-o", "a", "--", "file", "-a"]),
    );
    assert_eq!(stdout, " -- file -a\n");
}

#[test]
fn reads_spec_file() {
    let dir = make_temp_dir("spec-file");
    let spec = dir.join("opts.json");
    fs::write(
        &spec,
        r#"{ "name": "tool", "options": "v", "longOptions": ["verbose", "output:"] }"#,
    )
    .expect("failed to write spec file");

    let stdout = run_ok(
        shiftopt()
            .arg("--spec")
            .arg(&spec)
            .args(["-f", "lines", "--", "in", "-v", "--out", "o.txt"]),
    );
    assert_eq!(stdout, "tool\n-v\n--output\no.txt\n--\nin\n");

    let _ = fs::remove_dir_all(&dir);
}

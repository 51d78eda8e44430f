use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

fn cfglayer_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cfglayer"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

const SETUP_CFG: &str = r#"
[tool:pytest]
testpaths = test

[flake8]
exclude = .venv,.git,.tox,docs,venv,bin,lib,deps,build
max-line-length = 88

[isort]
profile = black
known_first_party = xknx,test

[mypy-xknx.telegram.*]
disallow_untyped_defs = true
"#;

const PYLINTRC: &str = r#"
[MASTER]
ignore=test

[MESSAGES CONTROL]
disable=
  missing-docstring,
  invalid-name,
  too-many-lines,
  fixme
"#;

// ===========================================
// Queries
// ===========================================

#[test]
fn test_get_prints_value() {
    let dir = TempDir::new().unwrap();
    let setup = write(&dir, "setup.cfg", SETUP_CFG);

    let output = cfglayer_cmd()
        .arg(&setup)
        .args(["--get", "flake8", "max-line-length"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "88\n");
}

#[test]
fn test_later_file_wins() {
    let dir = TempDir::new().unwrap();
    let setup = write(&dir, "setup.cfg", SETUP_CFG);
    let tox = write(&dir, "tox.ini", "[flake8]\nmax-line-length = 120\n");

    let output = cfglayer_cmd()
        .arg(&setup)
        .arg(&tox)
        .args(["--get", "flake8", "max-line-length"])
        .output()
        .unwrap();

    assert_eq!(String::from_utf8_lossy(&output.stdout), "120\n");
}

#[test]
fn test_get_missing_uses_default() {
    let dir = TempDir::new().unwrap();
    let setup = write(&dir, "setup.cfg", SETUP_CFG);

    let output = cfglayer_cmd()
        .arg(&setup)
        .args(["--get", "flake8", "select", "--default", "E,W"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "E,W\n");
}

#[test]
fn test_get_missing_without_default_fails() {
    let dir = TempDir::new().unwrap();
    let setup = write(&dir, "setup.cfg", SETUP_CFG);

    let output = cfglayer_cmd()
        .arg(&setup)
        .args(["--get", "flake8", "select"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("no option 'select' in section [flake8]"));
}

#[test]
fn test_sections_lists_names() {
    let dir = TempDir::new().unwrap();
    let setup = write(&dir, "setup.cfg", SETUP_CFG);
    let pylintrc = write(&dir, ".pylintrc", PYLINTRC);

    let output = cfglayer_cmd()
        .arg(&setup)
        .arg(&pylintrc)
        .arg("--sections")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let names: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        names,
        vec![
            "MASTER",
            "MESSAGES CONTROL",
            "flake8",
            "isort",
            "mypy-xknx.telegram.*",
            "tool:pytest"
        ]
    );
}

#[test]
fn test_rules_selection() {
    let dir = TempDir::new().unwrap();
    let pylintrc = write(&dir, ".pylintrc", PYLINTRC);

    let output = cfglayer_cmd()
        .arg(&pylintrc)
        .args([
            "--rules",
            "MESSAGES CONTROL",
            "--known-rules",
            "missing-docstring,invalid-name,unused-import",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "unused-import\n");
}

// ===========================================
// Dumps
// ===========================================

#[test]
fn test_dump_section_with_origins() {
    let dir = TempDir::new().unwrap();
    let setup = write(&dir, "setup.cfg", SETUP_CFG);

    let output = cfglayer_cmd()
        .arg(&setup)
        .args(["--section", "isort", "--origins", "--no-color"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("[isort]\n"));
    assert!(stdout.contains(&format!("# {}:11\nknown_first_party = xknx,test", setup.display())));
    assert!(stdout.contains("profile = black"));
}

#[test]
fn test_dump_is_reloadable() {
    let dir = TempDir::new().unwrap();
    let setup = write(&dir, "setup.cfg", SETUP_CFG);
    let pylintrc = write(&dir, ".pylintrc", PYLINTRC);

    let output = cfglayer_cmd()
        .arg(&setup)
        .arg(&pylintrc)
        .output()
        .unwrap();
    assert!(output.status.success());

    let merged = write(&dir, "merged.cfg", &String::from_utf8_lossy(&output.stdout));
    let output = cfglayer_cmd()
        .arg(&merged)
        .args(["--get", "MESSAGES CONTROL", "disable"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "missing-docstring,\ninvalid-name,\ntoo-many-lines,\nfixme\n"
    );
}

#[test]
fn test_dump_toml() {
    let dir = TempDir::new().unwrap();
    let setup = write(&dir, "setup.cfg", SETUP_CFG);

    let output = cfglayer_cmd()
        .arg(&setup)
        .args(["--format", "toml"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[flake8]"));
    assert!(stdout.contains("max-line-length = \"88\""));
    assert!(stdout.contains("[\"mypy-xknx.telegram.*\"]"));
}

// ===========================================
// Errors & discovery
// ===========================================

#[test]
fn test_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    let output = cfglayer_cmd()
        .arg(dir.path().join("setup.cfg"))
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("config file not found"));
}

#[test]
fn test_allow_missing_skips_file() {
    let dir = TempDir::new().unwrap();
    let setup = write(&dir, "setup.cfg", SETUP_CFG);

    let output = cfglayer_cmd()
        .arg(&setup)
        .arg(dir.path().join("tox.ini"))
        .args(["--allow-missing", "--get", "isort", "profile"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "black\n");
}

#[test]
fn test_duplicate_key_fails_with_location() {
    let dir = TempDir::new().unwrap();
    let bad = write(&dir, "setup.cfg", "[flake8]\nmax-line-length = 88\nmax-line-length = 100\n");

    let output = cfglayer_cmd().arg(&bad).output().unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(&format!("{}:3", bad.display())));
    assert!(stderr.contains("defined more than once"));
}

#[test]
fn test_discovers_config_files() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join(".git")).unwrap();
    write(&dir, "setup.cfg", SETUP_CFG);
    write(&dir, "tox.ini", "[flake8]\nmax-line-length = 100\n");

    let sub = dir.path().join("xknx");
    fs::create_dir(&sub).unwrap();

    let output = cfglayer_cmd()
        .current_dir(&sub)
        .args(["--get", "flake8", "max-line-length"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "100\n");
}

#[test]
fn test_verbose_logs_to_stderr() {
    let dir = TempDir::new().unwrap();
    let setup = write(&dir, "setup.cfg", SETUP_CFG);
    let tox = write(&dir, "tox.ini", "[flake8]\nmax-line-length = 100\n");

    let output = cfglayer_cmd()
        .arg(&setup)
        .arg(&tox)
        .args(["-vv", "--sections"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("option overridden"));
    assert!(!String::from_utf8_lossy(&output.stdout).contains("overridden"));
}

#[test]
fn test_no_color_env_keeps_origins_plain() {
    let dir = TempDir::new().unwrap();
    let setup = write(&dir, "setup.cfg", SETUP_CFG);

    let output = cfglayer_cmd()
        .env("NO_COLOR", "1")
        .arg(&setup)
        .args(["--section", "flake8", "--origins"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("[flake8]\n# "));
    assert!(!stdout.contains('\x1b'));
}

#[test]
fn test_color_flag_beats_no_color_env() {
    let dir = TempDir::new().unwrap();
    let setup = write(&dir, "setup.cfg", SETUP_CFG);

    let output = cfglayer_cmd()
        .env("NO_COLOR", "1")
        .arg(&setup)
        .args(["--section", "flake8", "--color"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("\x1b[36m[flake8]"));
}

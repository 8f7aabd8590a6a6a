//! CLI tests for the `reassign` binary.
//!
//! Spawns the binary with `HOME` pointed at a temp directory so the config
//! directory, member lists and a fake page CLI are all under test control.

use std::fs;
use std::path::Path;
use std::process::Command;

use reassign::exit_codes;
use reassign::io::paths::CONFIG_DIR_NAME;
use reassign::test_support::{member_list_json, people_page};

fn config_dir(home: &Path) -> std::path::PathBuf {
    home.join(".config").join(CONFIG_DIR_NAME)
}

#[test]
fn missing_member_lists_exit_invalid() {
    let temp = tempfile::tempdir().expect("tempdir");

    let output = Command::new(env!("CARGO_BIN_EXE_reassign"))
        .env("HOME", temp.path())
        .arg("page-1")
        .output()
        .expect("run reassign");

    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("users.json"), "stderr: {stderr}");
    assert!(config_dir(temp.path()).join("tmp").is_dir());
}

#[test]
fn no_page_ids_is_a_usage_error() {
    let status = Command::new(env!("CARGO_BIN_EXE_reassign"))
        .status()
        .expect("run reassign");
    assert_ne!(status.code(), Some(exit_codes::OK));
}

#[cfg(unix)]
#[test]
fn updates_pages_through_page_cli() {
    use std::os::unix::fs::PermissionsExt;

    let temp = tempfile::tempdir().expect("tempdir");
    let home = temp.path();
    let cfg_dir = config_dir(home);
    let out_dir = home.join("out");
    fs::create_dir_all(&cfg_dir).expect("config dir");
    fs::create_dir_all(&out_dir).expect("out dir");

    fs::write(cfg_dir.join("users.json"), member_list_json(&["a", "c"])).expect("users");
    fs::write(cfg_dir.join("users-ignore.json"), member_list_json(&[])).expect("ignore");

    let fixture = home.join("page-fixture.json");
    fs::write(
        &fixture,
        people_page(&[("To do", &["a", "b"]), ("To do (previous staff)", &[])]),
    )
    .expect("fixture");

    let script = home.join("fake-notion-cli");
    fs::write(
        &script,
        format!(
            "#!/bin/sh\n\
             case \"$1\" in\n\
             page)\n\
               if [ \"$2\" = missing ]; then echo 'object not found' >&2; exit 1; fi\n\
               cat '{fixture}' ;;\n\
             update) cp \"$3\" '{out}/updated-'\"$4\"'.json' ;;\n\
             *) exit 2 ;;\n\
             esac\n",
            fixture = fixture.display(),
            out = out_dir.display(),
        ),
    )
    .expect("script");
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).expect("chmod");
    fs::write(
        cfg_dir.join("config.toml"),
        format!("[cli]\nprogram = \"{}\"\n", script.display()),
    )
    .expect("config");

    let output = Command::new(env!("CARGO_BIN_EXE_reassign"))
        .env("HOME", home)
        .args(["missing", "p1"])
        .output()
        .expect("run reassign");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(exit_codes::OK), "stderr: {stderr}");
    assert!(stderr.contains("error: page=missing"), "stderr: {stderr}");
    assert!(stderr.contains("object not found"), "stderr: {stderr}");
    assert!(
        stdout.contains("page: id=p1 outcome=updated moved=1 added=1"),
        "stdout: {stdout}"
    );

    let written = fs::read_to_string(out_dir.join("updated-p1.json")).expect("update payload");
    let payload: serde_json::Value = serde_json::from_str(&written).expect("parse payload");
    assert_eq!(
        payload["To do"]["people"],
        serde_json::json!([{ "id": "a" }, { "id": "c" }])
    );
    assert_eq!(
        payload["To do (previous staff)"]["people"],
        serde_json::json!([{ "id": "b" }])
    );
    assert!(cfg_dir.join("tmp").join("page.json").is_file());
}

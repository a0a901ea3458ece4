use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

fn cmd() -> Command {
    Command::cargo_bin("provcheck").unwrap()
}

fn write_ipa(path: &Path, members: &[(&str, &[u8])]) {
    let file = fs::File::create(path).unwrap();
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default();
    for (name, contents) in members {
        zip.start_file(*name, options).unwrap();
        zip.write_all(contents).unwrap();
    }
    zip.finish().unwrap();
}

#[test]
fn empty_tree_succeeds_quietly() {
    let temp_dir = TempDir::new().unwrap();

    cmd()
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout("");

    assert!(!temp_dir.path().join("temp_extracted").exists());
}

#[test]
fn archive_without_profile_is_diagnosed() {
    let temp_dir = TempDir::new().unwrap();
    write_ipa(
        &temp_dir.path().join("app.ipa"),
        &[("Payload/App.app/Info.plist", b"<plist/>")],
    );

    cmd()
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(contains("app.ipa: No embedded.mobileprovision found"));
}

#[test]
fn unavailable_decoder_reports_failed_decode() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("a.mobileprovision"), b"signed blob").unwrap();

    cmd()
        .current_dir(temp_dir.path())
        .args(["--decoder", "provcheck-no-such-utility"])
        .assert()
        .success()
        .stdout(contains("a.mobileprovision: Failed to decode"));

    // No decoded sibling and no scratch directory left behind.
    assert!(!temp_dir.path().join("a.mobileprovision.plist").exists());
    assert!(!temp_dir.path().join("temp_extracted").exists());
}

#[test]
fn corrupt_archive_does_not_abort_the_run() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("broken.ipa"), b"not a zip").unwrap();

    cmd()
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(contains("broken.ipa: Error extracting - "));
}

#[cfg(unix)]
mod with_fake_decoder {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    /// Install a decoder stand-in that answers `cms -D -i <in> -o <out>`
    /// by copying the input to the output.
    fn install_copy_decoder(dir: &Path) -> String {
        let tool = dir.join("fake-security");
        fs::write(&tool, "#!/bin/sh\ncp \"$4\" \"$6\"\n").unwrap();
        fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();
        tool.to_string_lossy().into_owned()
    }

    fn manifest(date: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<dict>
    <key>ExpirationDate</key>
    <date>{}</date>
</dict>
</plist>"#,
            date
        )
    }

    #[test]
    fn expired_profile_line() {
        let temp_dir = TempDir::new().unwrap();
        let tools = TempDir::new().unwrap();
        let decoder = install_copy_decoder(tools.path());

        fs::write(
            temp_dir.path().join("a.mobileprovision"),
            manifest("2020-01-01T00:00:00Z"),
        )
        .unwrap();

        cmd()
            .current_dir(temp_dir.path())
            .args(["--decoder", &decoder])
            .assert()
            .success()
            .stdout(contains(
                "a.mobileprovision: EXPIRED (Expires: 2020-01-01 00:00:00)",
            ));
    }

    #[test]
    fn archive_profiles_checked_independently() {
        let temp_dir = TempDir::new().unwrap();
        let tools = TempDir::new().unwrap();
        let decoder = install_copy_decoder(tools.path());

        write_ipa(
            &temp_dir.path().join("app.ipa"),
            &[
                (
                    "Payload/App.app/embedded.mobileprovision",
                    manifest("2020-01-01T00:00:00Z").as_bytes(),
                ),
                (
                    "Payload/App.app/PlugIns/Ext.appex/embedded.mobileprovision",
                    manifest("2099-01-01T00:00:00Z").as_bytes(),
                ),
            ],
        );

        cmd()
            .current_dir(temp_dir.path())
            .args(["--decoder", &decoder])
            .assert()
            .success()
            .stdout(
                contains("embedded.mobileprovision_0: EXPIRED (Expires: 2020-01-01 00:00:00)")
                    .and(contains(
                        "embedded.mobileprovision_1: VALID (Expires: 2099-01-01 00:00:00)",
                    )),
            );

        assert!(!temp_dir.path().join("temp_extracted").exists());
    }

    #[test]
    fn profile_without_expiration_date() {
        let temp_dir = TempDir::new().unwrap();
        let tools = TempDir::new().unwrap();
        let decoder = install_copy_decoder(tools.path());

        fs::write(
            temp_dir.path().join("a.mobileprovision"),
            r#"<?xml version="1.0"?><plist version="1.0"><dict><key>Name</key><string>n</string></dict></plist>"#,
        )
        .unwrap();

        cmd()
            .current_dir(temp_dir.path())
            .args(["--decoder", &decoder])
            .assert()
            .success()
            .stdout(contains("a.mobileprovision: No expiration date found"));
    }

    #[test]
    fn scans_an_explicit_root_directory() {
        let temp_dir = TempDir::new().unwrap();
        let tools = TempDir::new().unwrap();
        let decoder = install_copy_decoder(tools.path());

        let tree = temp_dir.path().join("artifacts/nested");
        fs::create_dir_all(&tree).unwrap();
        fs::write(
            tree.join("deep.mobileprovision"),
            manifest("2099-01-01T00:00:00Z"),
        )
        .unwrap();

        cmd()
            .current_dir(temp_dir.path())
            .args(["artifacts", "--decoder", &decoder])
            .assert()
            .success()
            .stdout(contains(
                "deep.mobileprovision: VALID (Expires: 2099-01-01 00:00:00)",
            ));
    }
}

//! End-to-end CLI tests against a small AMD fixture project.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn jsimports() -> Command {
    cargo_bin_cmd!("jsimports")
}

fn copy_dir_all(src: &Path, dst: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_all(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Copy of the fixture project in a tempdir, safe to mutate.
fn scratch_project() -> TempDir {
    let temp = TempDir::new().expect("tempdir");
    copy_dir_all(&fixtures_path().join("amd_project"), temp.path()).expect("copy fixture");
    temp
}

mod cli_basics {
    use super::*;

    #[test]
    fn shows_help() {
        jsimports()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("jsimports"))
            .stdout(predicate::str::contains("--write"));
    }

    #[test]
    fn shows_version() {
        jsimports()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn rejects_unknown_flags() {
        jsimports().arg("--frobnicate").assert().code(2);
    }

    #[test]
    fn requires_a_target() {
        jsimports().assert().code(2);
    }
}

mod single_file {
    use super::*;

    #[test]
    fn missing_file_exits_nonzero() {
        jsimports()
            .arg(fixtures_path().join("amd_project/src/app/DoesNotExist.js"))
            .assert()
            .failure()
            .stdout(predicate::str::contains("File not found"));
    }

    #[test]
    fn non_module_exits_nonzero() {
        jsimports()
            .arg(fixtures_path().join("amd_project/src/app/notmodule.js"))
            .assert()
            .failure()
            .stdout(predicate::str::contains("Not a module"));
    }

    #[test]
    fn fails_without_a_config_file() {
        let temp = TempDir::new().expect("tempdir");
        let orphan = temp.path().join("Orphan.js");
        fs::write(&orphan, "define([], function() {});\n").expect("write");

        jsimports()
            .arg(&orphan)
            .assert()
            .failure()
            .stderr(predicate::str::contains("jsimports.json"));
    }

    #[test]
    fn canonical_file_prints_unchanged() {
        let path = fixtures_path().join("amd_project/src/app/Ok.js");
        let expected = fs::read_to_string(&path).expect("read fixture");

        jsimports().arg(&path).assert().success().stdout(expected);
    }

    #[test]
    fn resolves_free_identifiers_against_the_module_index() {
        jsimports()
            .arg(fixtures_path().join("amd_project/src/app/Stale.js"))
            .assert()
            .success()
            .stdout(predicate::str::contains("'app/Other'"))
            .stdout(predicate::str::contains("function(Other) {"));
    }

    #[test]
    fn resolves_shims_and_flags_unknown_identifiers() {
        jsimports()
            .arg(fixtures_path().join("amd_project/src/app/UsesShims.js"))
            .assert()
            .success()
            .stdout(predicate::str::contains("'jquery'"))
            .stdout(predicate::str::contains("'underscore'"))
            .stdout(predicate::str::contains(
                "/* <-- manually insert path for Mystery */",
            ));
    }

    #[test]
    fn resolves_plugin_files() {
        jsimports()
            .arg(fixtures_path().join("amd_project/src/app/UsesTemplate.js"))
            .assert()
            .success()
            .stdout(predicate::str::contains("'hbs!templates/widget'"));
    }

    #[test]
    fn keeps_anonymous_dependencies() {
        jsimports()
            .arg(fixtures_path().join("amd_project/src/app/WithAnon.js"))
            .assert()
            .success()
            .stdout(predicate::str::contains("// anonymous dependencies:"))
            .stdout(predicate::str::contains("'cycle/sideeffect'"));
    }

    #[test]
    fn flags_circular_dependencies() {
        jsimports()
            .arg(fixtures_path().join("amd_project/src/cycle/A.js"))
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "'cycle/B' /* WARNING: CIRCULAR DEPENDENCY */",
            ));
    }
}

mod directory_mode {
    use super::*;

    #[test]
    fn reports_ok_and_no_per_module() {
        jsimports()
            .arg(fixtures_path().join("amd_project"))
            .assert()
            .success()
            .stdout(predicate::str::contains("OK app/Ok"))
            .stdout(predicate::str::contains("OK app/Other"))
            .stdout(predicate::str::contains("NO app/Stale"))
            .stdout(predicate::str::contains("NO app/UsesShims"))
            .stdout(predicate::str::contains("NO cycle/A"));
    }

    #[test]
    fn excluded_and_non_module_files_are_skipped() {
        jsimports()
            .arg(fixtures_path().join("amd_project"))
            .assert()
            .success()
            .stdout(predicate::str::contains("Vendored").not())
            .stdout(predicate::str::contains("notmodule").not())
            .stdout(predicate::str::contains("widget").not());
    }
}

mod write_mode {
    use super::*;

    #[test]
    fn rewrites_stale_headers_in_place() {
        let temp = scratch_project();
        let stale = temp.path().join("src/app/Stale.js");

        jsimports().arg(&stale).arg("-w").assert().success();

        let rewritten = fs::read_to_string(&stale).expect("read rewritten");
        assert!(rewritten.starts_with("define([\n\t'app/Other'\n], function(Other) {"));
        assert!(rewritten.contains("\tOther;"));
    }

    #[test]
    fn leaves_canonical_files_untouched() {
        let temp = scratch_project();
        let ok = temp.path().join("src/app/Ok.js");
        let before = fs::read_to_string(&ok).expect("read fixture");

        jsimports().arg(&ok).arg("-w").assert().success();

        assert_eq!(fs::read_to_string(&ok).expect("read again"), before);
    }

    #[test]
    fn directory_write_converges_to_all_ok() {
        let temp = scratch_project();

        jsimports().arg(temp.path()).arg("-w").assert().success();

        // Regeneration is idempotent: a second pass reports every module OK.
        jsimports()
            .arg(temp.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("NO ").not());
    }
}

//! Library integration tests.

use std::fs;

use companion::assets::{AssetKind, AssetProvisioner, ProvisionPolicy, ProvisionStatus};
use companion::host::FixedHostPaths;
use companion::interpreter::runner::ScriptedRunner;
use companion::interpreter::{PathResolver, ResolveError};
use companion::{CompanionError, Platform};
use tempfile::TempDir;

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> companion::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn provisioning_errors_are_companion_errors() {
    let temp = TempDir::new().unwrap();
    let paths = FixedHostPaths::new(temp.path().join("data"), temp.path().join("absent"));

    let err = AssetProvisioner::new(Platform::Windows, &paths)
        .ensure_available(AssetKind::Scripts, || {})
        .unwrap_err();

    assert!(matches!(err, CompanionError::Provisioning { .. }));
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use companion::cli::{Cli, Commands};

    let cli = Cli::parse_from(["companion", "locate", "--json"]);

    if let Commands::Locate(args) = cli.command {
        assert!(args.json);
    } else {
        panic!("Expected Locate command");
    }
}

#[test]
fn windows_resolution_falls_back_to_verified_python() {
    let runner = ScriptedRunner::new()
        .fail("where python3")
        .succeed("where python", "C:\\Users\\Ada Lovelace\\Python\\python.exe\r\n")
        .succeed(
            "\"C:\\Users\\Ada Lovelace\\Python\\python.exe\" -V 2>&1",
            "Python 3.12.0\r\n",
        );

    let resolved = PathResolver::new(runner)
        .resolve(Platform::Windows)
        .unwrap();

    assert_eq!(resolved.path_delimiter, ';');
    assert_eq!(
        resolved.binary_path.to_string_lossy(),
        "C:\\Users\\Ada Lovelace\\Python\\python.exe"
    );
}

#[test]
fn python_two_is_rejected_on_linux() {
    let runner = ScriptedRunner::new()
        .succeed("which python3", "/usr/bin/python3\n")
        .succeed("/usr/bin/python3 -V", "Python 2.7.18\n");

    let err = PathResolver::new(runner)
        .resolve(Platform::Linux)
        .unwrap_err();

    assert!(matches!(
        err,
        ResolveError::VersionMismatch {
            found: 2,
            required: 3,
            ..
        }
    ));
}

#[test]
fn stamped_provisioning_refreshes_on_version_change() {
    let temp = TempDir::new().unwrap();
    let bundle = temp.path().join("bundle");
    fs::create_dir_all(bundle.join("python")).unwrap();
    fs::write(bundle.join("python").join("check_depends.py"), "v1").unwrap();
    let paths = FixedHostPaths::new(temp.path().join("data"), &bundle);

    let v1 = AssetProvisioner::new(Platform::Windows, &paths).with_policy(ProvisionPolicy::Stamped {
        version: "1.0.0".to_string(),
    });
    let first = v1.ensure_available(AssetKind::Scripts, || {}).unwrap();
    assert_eq!(first.status, ProvisionStatus::Copied);

    fs::write(bundle.join("python").join("check_depends.py"), "v2").unwrap();
    let again = v1.ensure_available(AssetKind::Scripts, || {}).unwrap();
    assert_eq!(again.status, ProvisionStatus::AlreadyPresent);

    let v2 = AssetProvisioner::new(Platform::Windows, &paths).with_policy(ProvisionPolicy::Stamped {
        version: "2.0.0".to_string(),
    });
    let refreshed = v2.ensure_available(AssetKind::Scripts, || {}).unwrap();
    assert_eq!(refreshed.status, ProvisionStatus::Copied);
    assert_eq!(
        fs::read_to_string(temp.path().join("data").join("python").join("check_depends.py"))
            .unwrap(),
        "v2"
    );
}

#[cfg(unix)]
#[test]
fn session_presents_each_diagnostic_chunk() {
    use companion::config::CompanionConfig;
    use companion::session::{Session, SessionOutcome};
    use companion::ui::MockUI;

    let temp = TempDir::new().unwrap();
    let scripts = temp.path().join("bundle").join("python");
    fs::create_dir_all(&scripts).unwrap();
    fs::write(
        scripts.join("deps.py"),
        "printf 'missing: numpy' >&2\nsleep 0.2\nprintf 'missing: scipy' >&2\nexit 1\n",
    )
    .unwrap();

    let config = CompanionConfig {
        check_script: "deps.py".to_string(),
        dialog_title: "Modules".to_string(),
        ..Default::default()
    };
    let session = Session::with_runner(
        config,
        Box::new(FixedHostPaths::new(
            temp.path().join("data"),
            temp.path().join("bundle"),
        )),
        Platform::MacOS,
        ScriptedRunner::new()
            .succeed("which python3", "/bin/sh\n")
            .succeed("/bin/sh -V", "Python 3.13.0"),
    );

    let mut ui = MockUI::new();
    let outcome = session.run_check(&mut ui).unwrap();

    let SessionOutcome::Checked(check) = outcome else {
        panic!("expected the check to run");
    };
    assert_eq!(check.exit_code, Some(1));
    let messages: Vec<_> = ui.message_boxes().iter().map(|m| m.message.as_str()).collect();
    assert_eq!(messages, vec!["missing: numpy", "missing: scipy"]);
    assert!(ui.message_boxes().iter().all(|m| m.title == "Modules"));
    assert!(ui.message_boxes().iter().all(|m| m.buttons.is_empty()));
}

//! End-to-end companion flow: provision, resolve, check.

use std::path::{Path, PathBuf};

use crate::assets::{AssetKind, AssetLocation, AssetProvisioner, ProvisionReport};
use crate::check::{CheckOutcome, DependencyChecker};
use crate::config::CompanionConfig;
use crate::error::Result;
use crate::host::{HostDialog, HostPaths};
use crate::interpreter::{
    CommandRunner, PathResolver, ResolveError, ResolvedInterpreter, SystemRunner,
};
use crate::platform::Platform;

/// How a dependency check session ended.
#[derive(Debug)]
pub enum SessionOutcome {
    /// The script ran to completion.
    Checked(CheckOutcome),
    /// No usable interpreter; the companion feature is unavailable.
    Unavailable(ResolveError),
}

impl SessionOutcome {
    /// Process exit code for this outcome.
    ///
    /// The script's own code, or 1 when it was killed or never ran.
    pub fn exit_code(&self) -> i32 {
        match self {
            SessionOutcome::Checked(outcome) => outcome.exit_code.unwrap_or(1),
            SessionOutcome::Unavailable(_) => 1,
        }
    }
}

/// Companion runtime bound to one host.
pub struct Session<R = SystemRunner> {
    config: CompanionConfig,
    paths: Box<dyn HostPaths>,
    platform: Platform,
    resolver: PathResolver<R>,
}

impl Session<SystemRunner> {
    pub fn new(config: CompanionConfig, paths: Box<dyn HostPaths>, platform: Platform) -> Self {
        Session::with_runner(config, paths, platform, SystemRunner)
    }
}

impl<R: CommandRunner> Session<R> {
    /// Session whose lookup commands go through `runner`.
    pub fn with_runner(
        config: CompanionConfig,
        paths: Box<dyn HostPaths>,
        platform: Platform,
        runner: R,
    ) -> Self {
        let resolver = PathResolver::new(runner).with_required_major(config.required_major);
        Self {
            config,
            paths,
            platform,
            resolver,
        }
    }

    pub fn config(&self) -> &CompanionConfig {
        &self.config
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn resolver(&self) -> &PathResolver<R> {
        &self.resolver
    }

    fn provisioner(&self) -> AssetProvisioner<'_> {
        AssetProvisioner::new(self.platform, self.paths.as_ref())
            .with_policy(self.config.provision.policy())
    }

    /// Where `kind` assets come from and run from.
    pub fn location(&self, kind: AssetKind) -> Result<AssetLocation> {
        self.provisioner().location(kind)
    }

    /// Ensure `kind` assets are in place.
    pub fn provision(&self, kind: AssetKind) -> Result<ProvisionReport> {
        self.provisioner().ensure_available(kind, || {
            tracing::debug!("{} assets ready", kind);
        })
    }

    /// Find the companion interpreter. Never cached.
    pub fn locate(&self) -> std::result::Result<ResolvedInterpreter, ResolveError> {
        self.resolver.resolve(self.platform)
    }

    /// Provision scripts, resolve the interpreter and run the dependency check.
    pub fn run_check(&self, dialog: &mut dyn HostDialog) -> Result<SessionOutcome> {
        let report = self.provisioner().ensure_available(AssetKind::Scripts, || {
            tracing::debug!("Scripts ready for dependency check");
        })?;
        self.run_check_in(report.location.run_dir(), dialog)
    }

    /// Resolve the interpreter and run the check from `script_dir`, without
    /// provisioning.
    pub fn run_check_in(
        &self,
        script_dir: &Path,
        dialog: &mut dyn HostDialog,
    ) -> Result<SessionOutcome> {
        let resolved = match self.locate() {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::warn!("Companion interpreter unavailable: {}", e);
                return Ok(SessionOutcome::Unavailable(e));
            }
        };

        let outcome = self.checker().run(&resolved, script_dir, dialog)?;
        Ok(SessionOutcome::Checked(outcome))
    }

    fn checker(&self) -> DependencyChecker {
        DependencyChecker::new()
            .with_script_name(self.config.check_script.as_str())
            .with_dialog_title(self.config.dialog_title.as_str())
    }

    /// Full path of the check script inside `script_dir`.
    pub fn check_script_path(&self, script_dir: &Path) -> PathBuf {
        self.checker().script_path(script_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ProvisionStatus;
    use crate::host::FixedHostPaths;
    use crate::interpreter::runner::ScriptedRunner;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, FixedHostPaths) {
        let temp = TempDir::new().unwrap();
        let bundle = temp.path().join("bundle");
        fs::create_dir_all(bundle.join("python")).unwrap();
        fs::write(bundle.join("python").join("check_depends.py"), "print('ok')").unwrap();
        let paths = FixedHostPaths::new(temp.path().join("data"), bundle);
        (temp, paths)
    }

    #[test]
    fn unavailable_interpreter_is_not_an_error() {
        let (_temp, paths) = fixture();
        let runner = ScriptedRunner::new().fail("which python3");
        let session = Session::with_runner(
            CompanionConfig::default(),
            Box::new(paths),
            Platform::Linux,
            runner,
        );

        let mut ui = MockUI::new();
        let outcome = session.run_check(&mut ui).unwrap();

        assert!(matches!(
            outcome,
            SessionOutcome::Unavailable(ResolveError::NotFound { .. })
        ));
        assert_eq!(outcome.exit_code(), 1);
        assert!(ui.message_boxes().is_empty());
    }

    #[test]
    fn windows_session_provisions_before_resolving() {
        let (temp, paths) = fixture();
        let runner = ScriptedRunner::new()
            .fail("where python3")
            .fail("where python");
        let session = Session::with_runner(
            CompanionConfig::default(),
            Box::new(paths),
            Platform::Windows,
            runner,
        );

        let outcome = session.run_check(&mut MockUI::new()).unwrap();

        assert!(matches!(outcome, SessionOutcome::Unavailable(_)));
        assert!(temp
            .path()
            .join("data")
            .join("python")
            .join("check_depends.py")
            .exists());
        assert_eq!(
            session.resolver().runner().commands(),
            vec!["where python3", "where python"]
        );
    }

    #[test]
    fn provision_is_not_required_off_windows() {
        let (_temp, paths) = fixture();
        let session = Session::with_runner(
            CompanionConfig::default(),
            Box::new(paths),
            Platform::MacOS,
            ScriptedRunner::new(),
        );

        let report = session.provision(AssetKind::Scripts).unwrap();

        assert_eq!(report.status, ProvisionStatus::NotRequired);
    }

    #[test]
    fn required_major_comes_from_config() {
        let (_temp, paths) = fixture();
        let runner = ScriptedRunner::new()
            .succeed("which python3", "/usr/bin/python3\n")
            .succeed("/usr/bin/python3 -V", "Python 4.0.0");
        let config = CompanionConfig {
            required_major: 4,
            ..Default::default()
        };
        let session = Session::with_runner(config, Box::new(paths), Platform::Linux, runner);

        let resolved = session.locate().unwrap();

        assert_eq!(resolved.binary_path, PathBuf::from("/usr/bin/python3"));
    }

    #[test]
    fn script_path_uses_configured_name() {
        let (_temp, paths) = fixture();
        let config = CompanionConfig {
            check_script: "deps_check.py".to_string(),
            ..Default::default()
        };
        let session = Session::new(config, Box::new(paths), Platform::Linux);

        assert_eq!(
            session.check_script_path(Path::new("/opt/app/python")),
            PathBuf::from("/opt/app/python/deps_check.py")
        );
    }

    #[cfg(unix)]
    #[test]
    fn check_runs_script_from_bundled_dir() {
        let (temp, paths) = fixture();
        let bundle_scripts = temp.path().join("bundle").join("python");
        fs::write(
            bundle_scripts.join("check_depends.py"),
            "printf 'missing: numpy' >&2\nexit 2\n",
        )
        .unwrap();
        let runner = ScriptedRunner::new()
            .succeed("which python3", "/bin/sh\n")
            .succeed("/bin/sh -V", "Python 3.12.0");
        let session = Session::with_runner(
            CompanionConfig::default(),
            Box::new(paths),
            Platform::Linux,
            runner,
        );

        let mut ui = MockUI::new();
        let outcome = session.run_check(&mut ui).unwrap();

        assert_eq!(outcome.exit_code(), 2);
        assert_eq!(ui.message_boxes().len(), 1);
        assert_eq!(ui.message_boxes()[0].title, "Python Modules?");
        assert_eq!(ui.message_boxes()[0].message, "missing: numpy");
    }
}

//! Interpreter resolution.
//!
//! Results are never cached: every call re-runs the lookup commands, so an
//! interpreter installed while the host is running is picked up next time.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::decode::decode_utf8;
use crate::platform::Platform;

use super::runner::{CommandRunner, Invocation, SystemRunner};
use super::strategy::{strategy_for, Lookup, PlatformStrategy, Verification};
use super::version::parse_major_version;
use super::{ResolveError, ResolvedInterpreter, REQUIRED_MAJOR};

/// Finds a companion interpreter by running a platform strategy.
#[derive(Debug)]
pub struct PathResolver<R = SystemRunner> {
    runner: R,
    required_major: u32,
    inherited_path: Option<OsString>,
}

impl PathResolver<SystemRunner> {
    /// Resolver running real commands with the process's own `PATH`.
    pub fn system() -> Self {
        Self::new(SystemRunner)
    }
}

impl<R: CommandRunner> PathResolver<R> {
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            required_major: REQUIRED_MAJOR,
            inherited_path: std::env::var_os("PATH"),
        }
    }

    /// Override the major version a verified interpreter must report.
    pub fn with_required_major(mut self, major: u32) -> Self {
        self.required_major = major;
        self
    }

    /// Override the `PATH` appended after a strategy's preferred directory.
    pub fn with_inherited_path(mut self, path: Option<OsString>) -> Self {
        self.inherited_path = path;
        self
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Resolve an interpreter for `platform`.
    pub fn resolve(&self, platform: Platform) -> Result<ResolvedInterpreter, ResolveError> {
        self.resolve_with(strategy_for(platform).as_ref())
    }

    /// Resolve an interpreter using an explicit strategy.
    pub fn resolve_with(
        &self,
        strategy: &dyn PlatformStrategy,
    ) -> Result<ResolvedInterpreter, ResolveError> {
        let mut attempted = Vec::new();

        for lookup in strategy.lookups(self.inherited_path.as_ref()) {
            attempted.push(lookup.command.display());

            let candidate = match self.find_candidate(&lookup) {
                Candidate::Found(path) => path,
                Candidate::LookupFailed => continue,
                Candidate::Empty => {
                    tracing::debug!("`{}` printed no path", lookup.command.display());
                    return Err(ResolveError::NotFound { attempted });
                }
            };

            match lookup.verification {
                Verification::Trusted => {
                    tracing::debug!(
                        "Accepting {} from `{}` without a version check",
                        candidate.display(),
                        lookup.command.display()
                    );
                }
                Verification::Version { merge_stderr } => {
                    self.verify_version(&candidate, &lookup, merge_stderr)?;
                }
            }

            tracing::info!("Resolved companion interpreter: {}", candidate.display());
            return Ok(ResolvedInterpreter::from_binary(
                candidate,
                strategy.path_delimiter(),
            ));
        }

        tracing::debug!("No companion interpreter found on {}", strategy.platform());
        Err(ResolveError::NotFound { attempted })
    }

    /// Run a lookup command and classify what it printed.
    fn find_candidate(&self, lookup: &Lookup) -> Candidate {
        match self.runner.run(&lookup.command) {
            Ok(bytes) => match first_path_line(&decode_utf8(&bytes)) {
                Some(path) => Candidate::Found(PathBuf::from(path)),
                None => Candidate::Empty,
            },
            Err(e) => {
                tracing::debug!("Lookup failed: {}", e);
                Candidate::LookupFailed
            }
        }
    }

    fn verify_version(
        &self,
        candidate: &Path,
        lookup: &Lookup,
        merge_stderr: bool,
    ) -> Result<(), ResolveError> {
        let mut query = Invocation::new(candidate.to_string_lossy())
            .arg("-V")
            .with_path(lookup.command.path.clone());
        if merge_stderr {
            query = query.merged();
        }

        let output = match self.runner.run(&query) {
            Ok(bytes) => decode_utf8(&bytes),
            Err(e) => {
                return Err(ResolveError::VersionUnreadable {
                    path: candidate.to_path_buf(),
                    output: e.to_string(),
                })
            }
        };

        match parse_major_version(&output) {
            Some(major) if major == self.required_major => Ok(()),
            Some(found) => Err(ResolveError::VersionMismatch {
                path: candidate.to_path_buf(),
                found,
                required: self.required_major,
            }),
            None => Err(ResolveError::VersionUnreadable {
                path: candidate.to_path_buf(),
                output: output.trim().to_string(),
            }),
        }
    }
}

/// What a single lookup command produced.
///
/// Only a failed lookup moves on to the next one. A lookup that succeeds
/// without printing a path ends resolution.
#[derive(Debug)]
enum Candidate {
    Found(PathBuf),
    Empty,
    LookupFailed,
}

/// First non-blank line of lookup output with its line ending removed.
fn first_path_line(text: &str) -> Option<&str> {
    text.lines()
        .map(|line| line.trim_end_matches('\r'))
        .find(|line| !line.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::runner::ScriptedRunner;

    fn resolver(runner: ScriptedRunner) -> PathResolver<ScriptedRunner> {
        PathResolver::new(runner).with_inherited_path(Some(OsString::from("/bin")))
    }

    #[test]
    fn strips_trailing_newline_from_lookup() {
        let runner = ScriptedRunner::new()
            .succeed("which python3", "/usr/local/bin/python3\n")
            .succeed("/usr/local/bin/python3 -V", "Python 3.11.2\n");

        let resolved = resolver(runner).resolve(Platform::MacOS).unwrap();
        assert_eq!(resolved.binary_path, PathBuf::from("/usr/local/bin/python3"));
        assert_eq!(resolved.binary_directory, PathBuf::from("/usr/local/bin"));
        assert_eq!(resolved.path_delimiter, ':');
    }

    #[test]
    fn strips_crlf_line_endings() {
        let runner = ScriptedRunner::new()
            .succeed("which python3", "/usr/bin/python3\r\n")
            .succeed("/usr/bin/python3 -V", "Python 3.9.1");

        let resolved = resolver(runner).resolve(Platform::Linux).unwrap();
        assert_eq!(resolved.binary_path, PathBuf::from("/usr/bin/python3"));
    }

    #[test]
    fn version_query_uses_lookup_path() {
        let runner = ScriptedRunner::new()
            .succeed("which python3", "/usr/bin/python3\n")
            .succeed("/usr/bin/python3 -V", "Python 3.11.2");

        let resolver = resolver(runner);
        resolver.resolve(Platform::Linux).unwrap();

        let calls = resolver.runner().calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].path, Some(OsString::from("/usr/bin:/bin")));
        assert_eq!(calls[1].path, calls[0].path);
        assert!(!calls[1].merge_stderr);
    }

    #[test]
    fn python_2_is_a_version_mismatch() {
        let runner = ScriptedRunner::new()
            .succeed("which python3", "/usr/bin/python3\n")
            .succeed("/usr/bin/python3 -V", "Python 2.7.18");

        let err = resolver(runner).resolve(Platform::Linux).unwrap_err();
        assert_eq!(
            err,
            ResolveError::VersionMismatch {
                path: PathBuf::from("/usr/bin/python3"),
                found: 2,
                required: 3,
            }
        );
    }

    #[test]
    fn failed_which_is_not_found() {
        let runner = ScriptedRunner::new().fail("which python3");

        let err = resolver(runner).resolve(Platform::MacOS).unwrap_err();
        assert_eq!(
            err,
            ResolveError::NotFound {
                attempted: vec!["which python3".to_string()]
            }
        );
    }

    #[test]
    fn failed_version_query_is_unreadable() {
        let runner = ScriptedRunner::new()
            .succeed("which python3", "/usr/bin/python3\n")
            .fail("/usr/bin/python3 -V");

        let err = resolver(runner).resolve(Platform::Linux).unwrap_err();
        assert!(matches!(err, ResolveError::VersionUnreadable { .. }));
    }

    #[test]
    fn garbled_version_is_unreadable() {
        let runner = ScriptedRunner::new()
            .succeed("which python3", "/usr/bin/python3\n")
            .succeed("/usr/bin/python3 -V", "Python");

        let err = resolver(runner).resolve(Platform::Linux).unwrap_err();
        assert!(matches!(err, ResolveError::VersionUnreadable { .. }));
    }

    #[test]
    fn windows_python3_is_trusted_without_version_check() {
        let runner = ScriptedRunner::new()
            .succeed("where python3", "C:\\Python311\\python3.exe\r\n")
            .succeed("C:\\Python311\\python3.exe -V", "Python 2.7.18");

        let resolver = resolver(runner);
        let resolved = resolver.resolve(Platform::Windows).unwrap();

        assert_eq!(
            resolved.binary_path,
            PathBuf::from("C:\\Python311\\python3.exe")
        );
        assert_eq!(resolved.binary_directory, PathBuf::from("C:\\Python311"));
        assert_eq!(resolved.path_delimiter, ';');
        assert_eq!(resolver.runner().commands(), vec!["where python3"]);
    }

    #[test]
    fn windows_falls_back_to_python_with_merged_version() {
        let runner = ScriptedRunner::new()
            .fail("where python3")
            .succeed("where python", "C:\\Program Files\\Python\\python.exe\r\n")
            .succeed(
                "\"C:\\Program Files\\Python\\python.exe\" -V 2>&1",
                "Python 3.12.1\r\n",
            );

        let resolver = resolver(runner);
        let resolved = resolver.resolve(Platform::Windows).unwrap();

        assert_eq!(
            resolved.binary_path,
            PathBuf::from("C:\\Program Files\\Python\\python.exe")
        );
        let calls = resolver.runner().calls();
        assert_eq!(calls.len(), 3);
        assert!(calls[2].merge_stderr);
    }

    #[test]
    fn windows_python_2_fallback_is_rejected() {
        let runner = ScriptedRunner::new()
            .fail("where python3")
            .succeed("where python", "C:\\Python27\\python.exe\r\n")
            .succeed("C:\\Python27\\python.exe -V 2>&1", "Python 2.7.18\r\n");

        let err = resolver(runner).resolve(Platform::Windows).unwrap_err();
        assert!(matches!(err, ResolveError::VersionMismatch { found: 2, .. }));
    }

    #[test]
    fn windows_nothing_found_lists_both_lookups() {
        let runner = ScriptedRunner::new()
            .fail("where python3")
            .fail("where python");

        let err = resolver(runner).resolve(Platform::Windows).unwrap_err();
        assert_eq!(
            err,
            ResolveError::NotFound {
                attempted: vec!["where python3".to_string(), "where python".to_string()]
            }
        );
    }

    #[test]
    fn empty_lookup_output_counts_as_not_found() {
        let runner = ScriptedRunner::new()
            .succeed("where python3", "\r\n")
            .succeed("where python", "C:\\Py\\python.exe\r\n")
            .succeed("C:\\Py\\python.exe -V 2>&1", "Python 3.12.0\r\n");

        let resolver = resolver(runner);
        let err = resolver.resolve(Platform::Windows).unwrap_err();

        assert_eq!(
            err,
            ResolveError::NotFound {
                attempted: vec!["where python3".to_string()]
            }
        );
        assert_eq!(resolver.runner().commands(), vec!["where python3"]);
    }

    #[test]
    fn empty_which_output_is_not_found() {
        let runner = ScriptedRunner::new().succeed("which python3", "\n");

        let err = resolver(runner).resolve(Platform::Linux).unwrap_err();
        assert!(matches!(err, ResolveError::NotFound { .. }));
    }

    #[test]
    fn first_of_several_matches_is_used() {
        let runner = ScriptedRunner::new()
            .succeed(
                "where python3",
                "C:\\A\\python3.exe\r\nC:\\B\\python3.exe\r\n",
            );

        let resolved = resolver(runner).resolve(Platform::Windows).unwrap();
        assert_eq!(resolved.binary_path, PathBuf::from("C:\\A\\python3.exe"));
    }

    #[test]
    fn required_major_is_configurable() {
        let runner = ScriptedRunner::new()
            .succeed("which python3", "/usr/bin/python3\n")
            .succeed("/usr/bin/python3 -V", "Python 3.11.2");

        let err = resolver(runner)
            .with_required_major(4)
            .resolve(Platform::Linux)
            .unwrap_err();
        assert!(matches!(
            err,
            ResolveError::VersionMismatch {
                found: 3,
                required: 4,
                ..
            }
        ));
    }

    #[test]
    fn every_call_re_resolves() {
        let runner = ScriptedRunner::new()
            .succeed("which python3", "/usr/bin/python3\n")
            .succeed("/usr/bin/python3 -V", "Python 3.11.2");

        let resolver = resolver(runner);
        resolver.resolve(Platform::Linux).unwrap();
        resolver.resolve(Platform::Linux).unwrap();
        assert_eq!(resolver.runner().calls().len(), 4);
    }
}

//! Per-platform interpreter lookup policy.
//!
//! A strategy describes *which* commands to try and *how much* to trust their
//! answer; the [`PathResolver`](super::PathResolver) does the running.

use std::ffi::OsString;

use crate::platform::Platform;

use super::runner::Invocation;

/// How a lookup's answer is validated before it is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    /// Accept the path as-is.
    Trusted,
    /// Run `<path> -V` and require the configured major version.
    Version {
        /// Read the version from stdout and stderr combined.
        merge_stderr: bool,
    },
}

/// One step of a lookup sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    /// The `which`/`where` style command printing the candidate path.
    pub command: Invocation,
    pub verification: Verification,
}

/// Lookup sequence, verification policy and `PATH` syntax for one OS.
///
/// Lookups are tried in order until one prints a path; that candidate alone
/// decides the outcome, there is no ranking across lookups.
pub trait PlatformStrategy: Send + Sync {
    fn platform(&self) -> Platform;

    /// The ordered lookups, given the caller's inherited `PATH`.
    fn lookups(&self, inherited_path: Option<&OsString>) -> Vec<Lookup>;

    fn path_delimiter(&self) -> char {
        self.platform().path_delimiter()
    }
}

/// Select the strategy for `platform`.
pub fn strategy_for(platform: Platform) -> Box<dyn PlatformStrategy> {
    match platform {
        Platform::MacOS => Box::new(MacOsStrategy),
        Platform::Linux => Box::new(LinuxStrategy),
        Platform::Windows => Box::new(WindowsStrategy),
    }
}

/// `PATH` with `dir` in front of the inherited entries.
fn prefixed_path(dir: &str, delimiter: char, inherited: Option<&OsString>) -> OsString {
    let mut path = OsString::from(dir);
    path.push(delimiter.to_string());
    if let Some(inherited) = inherited {
        path.push(inherited);
    }
    path
}

fn posix_lookups(system_dir: &str, inherited: Option<&OsString>) -> Vec<Lookup> {
    let path = prefixed_path(system_dir, ':', inherited);
    vec![Lookup {
        command: Invocation::new("which")
            .arg("python3")
            .with_path(Some(path)),
        verification: Verification::Version {
            merge_stderr: false,
        },
    }]
}

/// Prefers Homebrew's `/usr/local/bin` over the inherited `PATH`.
#[derive(Debug, Default, Clone, Copy)]
pub struct MacOsStrategy;

impl PlatformStrategy for MacOsStrategy {
    fn platform(&self) -> Platform {
        Platform::MacOS
    }

    fn lookups(&self, inherited_path: Option<&OsString>) -> Vec<Lookup> {
        posix_lookups("/usr/local/bin", inherited_path)
    }
}

/// Prefers the distribution's `/usr/bin` over the inherited `PATH`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LinuxStrategy;

impl PlatformStrategy for LinuxStrategy {
    fn platform(&self) -> Platform {
        Platform::Linux
    }

    fn lookups(&self, inherited_path: Option<&OsString>) -> Vec<Lookup> {
        posix_lookups("/usr/bin", inherited_path)
    }
}

/// `where python3`, then `where python`.
///
/// A `python3` hit is trusted without a version query. Only the generic
/// `python` name is checked, with stderr merged since some Windows builds
/// print the version there.
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsStrategy;

impl PlatformStrategy for WindowsStrategy {
    fn platform(&self) -> Platform {
        Platform::Windows
    }

    fn lookups(&self, _inherited_path: Option<&OsString>) -> Vec<Lookup> {
        vec![
            Lookup {
                command: Invocation::new("where").arg("python3"),
                verification: Verification::Trusted,
            },
            Lookup {
                command: Invocation::new("where").arg("python"),
                verification: Verification::Version { merge_stderr: true },
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macos_prefixes_usr_local_bin() {
        let inherited = OsString::from("/bin");
        let lookups = MacOsStrategy.lookups(Some(&inherited));
        assert_eq!(lookups.len(), 1);
        assert_eq!(lookups[0].command.display(), "which python3");
        assert_eq!(
            lookups[0].command.path,
            Some(OsString::from("/usr/local/bin:/bin"))
        );
    }

    #[test]
    fn linux_prefixes_usr_bin() {
        let lookups = LinuxStrategy.lookups(None);
        assert_eq!(lookups[0].command.path, Some(OsString::from("/usr/bin:")));
        assert_eq!(
            lookups[0].verification,
            Verification::Version {
                merge_stderr: false
            }
        );
    }

    #[test]
    fn windows_trusts_python3_and_verifies_python() {
        let lookups = WindowsStrategy.lookups(None);
        let commands: Vec<_> = lookups.iter().map(|l| l.command.display()).collect();
        assert_eq!(commands, vec!["where python3", "where python"]);
        assert_eq!(lookups[0].verification, Verification::Trusted);
        assert_eq!(
            lookups[1].verification,
            Verification::Version { merge_stderr: true }
        );
        assert!(lookups.iter().all(|l| l.command.path.is_none()));
    }

    #[test]
    fn strategy_for_selects_matching_platform() {
        for platform in [Platform::MacOS, Platform::Linux, Platform::Windows] {
            let strategy = strategy_for(platform);
            assert_eq!(strategy.platform(), platform);
            assert_eq!(strategy.path_delimiter(), platform.path_delimiter());
        }
    }
}

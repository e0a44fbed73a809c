//! Configuration schema.
//!
//! Every field is optional in YAML; missing fields take the defaults below.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::assets::provisioner::ProvisionPolicy;
use crate::check::{DEFAULT_CHECK_SCRIPT, DEFAULT_DIALOG_TITLE};
use crate::interpreter::REQUIRED_MAJOR;

/// Root of `config.yml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompanionConfig {
    /// Names the per-user data directory.
    pub app_name: String,

    /// Pins the application bundle directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle_dir: Option<PathBuf>,

    /// Pins the per-user data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_data_dir: Option<PathBuf>,

    /// Interpreter major version to accept.
    pub required_major: u32,

    /// File name of the dependency-check script inside the scripts directory.
    pub check_script: String,

    /// Title of every diagnostic message box.
    pub dialog_title: String,

    pub provision: ProvisionSettings,
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            bundle_dir: None,
            user_data_dir: None,
            required_major: REQUIRED_MAJOR,
            check_script: DEFAULT_CHECK_SCRIPT.to_string(),
            dialog_title: DEFAULT_DIALOG_TITLE.to_string(),
            provision: ProvisionSettings::default(),
        }
    }
}

fn default_app_name() -> String {
    env!("CARGO_PKG_NAME").to_string()
}

/// How provisioned directories are judged current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// An existing target directory is trusted as-is.
    #[default]
    Existence,
    /// The target must carry a stamp for `provision.version`.
    Stamped,
}

/// The `provision:` block.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProvisionSettings {
    pub policy: PolicyKind,

    /// Version recorded in the stamp; defaults to the crate version.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ProvisionSettings {
    /// The provisioner policy these settings describe.
    pub fn policy(&self) -> ProvisionPolicy {
        match self.policy {
            PolicyKind::Existence => ProvisionPolicy::ExistenceOnly,
            PolicyKind::Stamped => ProvisionPolicy::Stamped {
                version: self
                    .version
                    .clone()
                    .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dependency_check() {
        let config = CompanionConfig::default();
        assert_eq!(config.app_name, "companion");
        assert_eq!(config.required_major, 3);
        assert_eq!(config.check_script, "check_depends.py");
        assert_eq!(config.dialog_title, "Python Modules?");
        assert_eq!(config.provision.policy(), ProvisionPolicy::ExistenceOnly);
    }

    #[test]
    fn empty_mapping_parses_to_defaults() {
        let config: CompanionConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, CompanionConfig::default());
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config: CompanionConfig =
            serde_yaml::from_str("app_name: studio\nbundle_dir: /opt/studio/res").unwrap();
        assert_eq!(config.app_name, "studio");
        assert_eq!(config.bundle_dir, Some(PathBuf::from("/opt/studio/res")));
        assert_eq!(config.check_script, "check_depends.py");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<CompanionConfig, _> = serde_yaml::from_str("interpreter: python2");
        assert!(result.is_err());
    }

    #[test]
    fn stamped_policy_uses_configured_version() {
        let settings: ProvisionSettings =
            serde_yaml::from_str("policy: stamped\nversion: 1.4.0").unwrap();
        assert_eq!(
            settings.policy(),
            ProvisionPolicy::Stamped {
                version: "1.4.0".to_string()
            }
        );
    }

    #[test]
    fn stamped_policy_defaults_to_crate_version() {
        let settings = ProvisionSettings {
            policy: PolicyKind::Stamped,
            version: None,
        };
        assert_eq!(
            settings.policy(),
            ProvisionPolicy::Stamped {
                version: env!("CARGO_PKG_VERSION").to_string()
            }
        );
    }
}

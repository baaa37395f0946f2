//! Host configuration, read from an optional RON file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use pager_core::FailurePolicy;
use pager_engine::{AdminRoutes, FetchSettings};
use serde::{Deserialize, Serialize};

/// How the host reports scroll offsets. Some browsers keep the document at
/// zero and report on the body instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum MeasurementRegime {
    #[default]
    Document,
    Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum PolicySetting {
    Wedge,
    #[default]
    Release,
}

impl From<PolicySetting> for FailurePolicy {
    fn from(setting: PolicySetting) -> Self {
        match setting {
            PolicySetting::Wedge => FailurePolicy::Wedge,
            PolicySetting::Release => FailurePolicy::Release,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagerConfig {
    pub base_url: String,
    pub listing_path: String,
    pub feedback_answer_path: String,
    pub report_path: String,
    pub output_dir: PathBuf,
    pub failure_policy: PolicySetting,
    /// Consecutive failed page requests tolerated before giving up.
    pub retry_limit: u32,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_bytes: u64,
    pub viewport_height: u32,
    pub row_height: u32,
    pub measurement: MeasurementRegime,
}

impl Default for PagerConfig {
    fn default() -> Self {
        let routes = AdminRoutes::default();
        let fetch = FetchSettings::default();
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            listing_path: "/feedback".to_string(),
            feedback_answer_path: routes.feedback_answer,
            report_path: routes.report,
            output_dir: PathBuf::from("output"),
            failure_policy: PolicySetting::default(),
            retry_limit: 3,
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            max_bytes: fetch.max_bytes,
            viewport_height: 720,
            row_height: 48,
            measurement: MeasurementRegime::default(),
        }
    }
}

impl PagerConfig {
    /// Defaults when `path` is `None`; otherwise the file must exist and parse.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_ron(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_ron(text: &str) -> anyhow::Result<Self> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.viewport_height > 0, "viewport_height must be positive");
        anyhow::ensure!(self.row_height > 0, "row_height must be positive");
        anyhow::ensure!(self.request_timeout_secs > 0, "request_timeout_secs must be positive");
        Ok(())
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_bytes,
            ..FetchSettings::default()
        }
    }

    pub fn admin_routes(&self) -> AdminRoutes {
        AdminRoutes {
            feedback_answer: self.feedback_answer_path.clone(),
            report: self.report_path.clone(),
        }
    }

    /// Upper bound on waiting for any single engine event.
    pub fn settle_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs + self.request_timeout_secs + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_ron_keeps_defaults() {
        let config = PagerConfig::from_ron(
            r#"(base_url: "http://admin.local", listing_path: "/ibooknote", failure_policy: Wedge, measurement: Body)"#,
        )
        .unwrap();

        assert_eq!(config.base_url, "http://admin.local");
        assert_eq!(config.listing_path, "/ibooknote");
        assert_eq!(config.failure_policy, PolicySetting::Wedge);
        assert_eq!(config.measurement, MeasurementRegime::Body);
        assert_eq!(config.retry_limit, 3);
        assert_eq!(config.report_path, "/totalstatics");
    }

    #[test]
    fn zero_row_height_is_rejected() {
        assert!(PagerConfig::from_ron("(row_height: 0)").is_err());
    }

    #[test]
    fn missing_path_means_defaults() {
        assert_eq!(PagerConfig::load(None).unwrap(), PagerConfig::default());
    }

    #[test]
    fn missing_file_is_an_error() {
        let temp = tempfile::TempDir::new().unwrap();
        assert!(PagerConfig::load(Some(&temp.path().join("absent.ron"))).is_err());
    }
}

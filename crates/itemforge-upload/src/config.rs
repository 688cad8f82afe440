//! Configuration for the upload layer

use crate::error::UploadError;
use itemforge_domain::{EntityId, Mode};
use serde::{Deserialize, Serialize};

/// Edit summary used for every sandbox write.
pub const TEST_SUMMARY: &str = "test";

/// Configuration for one upload run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Whether to edit real records or redirect everything to the sandbox
    pub live: bool,

    /// The fixed sandbox record all writes go to when not live
    pub sandbox_item: String,

    /// Edit summary for live writes
    pub edit_summary: Option<String>,
}

impl UploadConfig {
    /// Run mode implied by the `live` flag.
    pub fn mode(&self) -> Mode {
        if self.live {
            Mode::Live
        } else {
            Mode::Sandbox
        }
    }

    /// The sandbox record as a checked identifier.
    pub fn sandbox_id(&self) -> Result<EntityId, UploadError> {
        self.sandbox_item
            .parse()
            .map_err(|e: itemforge_domain::IdentifierError| {
                UploadError::BadSandboxItem(e.to_string())
            })
    }

    /// The edit summary for this run: the configured one when live, the
    /// fixed test summary in the sandbox.
    pub fn summary(&self) -> Option<&str> {
        match self.mode() {
            Mode::Live => self.edit_summary.as_deref(),
            Mode::Sandbox => Some(TEST_SUMMARY),
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), UploadError> {
        self.sandbox_id()?;
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, UploadError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| UploadError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, UploadError> {
        toml::to_string_pretty(self).map_err(|e| UploadError::Config(e.to_string()))
    }
}

impl Default for UploadConfig {
    /// Sandbox runs against the well-known sandbox record.
    fn default() -> Self {
        Self {
            live: false,
            sandbox_item: "Q4115189".to_string(),
            edit_summary: None,
        }
    }
}

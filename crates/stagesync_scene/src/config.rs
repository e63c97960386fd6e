//! Stage configuration (loaded once, at processor construction)

use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// What happens to an existing node when its Sprite gets `deleted = true`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeletedPolicy {
    /// Hide the node once and stop updating it until un-deleted.
    #[default]
    Hide,
    /// Leave the node exactly as it was (last visibility/position stay).
    Freeze,
}

/// Construction-time stage settings.
///
/// `width`/`height` обязательны, остальное имеет defaults.
///
/// ```toml
/// width = 800
/// height = 600
/// deleted_policy = "freeze"
/// release_orphaned_nodes = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub deleted_policy: DeletedPolicy,
    /// Destroy nodes whose entity lost its Sprite/Text (or was despawned).
    ///
    /// Off by default: registry entries live as long as the processor,
    /// teardown only via `RenderingProcessor::release`.
    #[serde(default)]
    pub release_orphaned_nodes: bool,
}

impl StageConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            deleted_policy: DeletedPolicy::default(),
            release_orphaned_nodes: false,
        }
    }

    pub fn with_deleted_policy(mut self, policy: DeletedPolicy) -> Self {
        self.deleted_policy = policy;
        self
    }

    pub fn with_release_orphaned_nodes(mut self, release: bool) -> Self {
        self.release_orphaned_nodes = release;
        self
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, RenderError> {
        let config: StageConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidStageSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_defaults() {
        let config = StageConfig::from_toml_str("width = 800\nheight = 600\n").unwrap();
        assert_eq!(config, StageConfig::new(800, 600));
        assert_eq!(config.deleted_policy, DeletedPolicy::Hide);
        assert!(!config.release_orphaned_nodes);
    }

    #[test]
    fn test_toml_overrides() {
        let source = r#"
            width = 320
            height = 240
            deleted_policy = "freeze"
            release_orphaned_nodes = true
        "#;
        let config = StageConfig::from_toml_str(source).unwrap();
        assert_eq!(config.deleted_policy, DeletedPolicy::Freeze);
        assert!(config.release_orphaned_nodes);
    }

    #[test]
    fn test_dimensions_are_required() {
        let err = StageConfig::from_toml_str("width = 800\n").unwrap_err();
        assert!(matches!(err, RenderError::Config(_)));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        let err = StageConfig::from_toml_str("width = 0\nheight = 600\n").unwrap_err();
        assert!(matches!(
            err,
            RenderError::InvalidStageSize { width: 0, height: 600 }
        ));
    }
}

//! Configuration types for Compass layout runs.
//!
//! This module provides configuration structures that control how trees are
//! laid out and how the result is checked. All types implement
//! [`serde::Deserialize`] for loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and validation settings.
//! - [`LayoutConfig`] - Spacing, direction profile and output normalization.
//! - [`ValidationConfig`] - Whether collisions fail the run.
//!
//! # Example
//!
//! ```
//! # use compass::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().min_spacing(), 30.0);
//! assert!(!config.validation().deny_collisions());
//! ```

use serde::Deserialize;

use compass_core::direction::DirectionProfile;

/// Default gap between adjacent rectangles along the direction of placement.
pub const DEFAULT_MIN_SPACING: f32 = 30.0;

/// Top-level configuration combining layout and validation settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Validation configuration section.
    #[serde(default)]
    validation: ValidationConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified sections.
    ///
    /// # Arguments
    ///
    /// * `layout` - Spacing and direction settings.
    /// * `validation` - Collision handling settings.
    pub fn new(layout: LayoutConfig, validation: ValidationConfig) -> Self {
        Self { layout, validation }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the validation configuration.
    pub fn validation(&self) -> &ValidationConfig {
        &self.validation
    }

    /// Returns a copy of this configuration with collision denial set.
    pub fn with_deny_collisions(mut self, deny: bool) -> Self {
        self.validation.deny_collisions = deny;
        self
    }
}

/// Layout configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    /// Minimum gap between adjacent rectangles.
    #[serde(default = "default_min_spacing")]
    min_spacing: f32,

    /// Which directions the input may use.
    #[serde(default)]
    profile: DirectionProfile,

    /// Shift the final layout so its bounding box starts at the origin.
    #[serde(default)]
    normalize: bool,
}

fn default_min_spacing() -> f32 {
    DEFAULT_MIN_SPACING
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            min_spacing: DEFAULT_MIN_SPACING,
            profile: DirectionProfile::default(),
            normalize: false,
        }
    }
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`].
    ///
    /// # Arguments
    ///
    /// * `min_spacing` - Minimum gap between adjacent rectangles.
    /// * `profile` - Accepted set of directions.
    /// * `normalize` - Whether to move the result to the origin.
    pub fn new(min_spacing: f32, profile: DirectionProfile, normalize: bool) -> Self {
        Self {
            min_spacing,
            profile,
            normalize,
        }
    }

    /// Returns the minimum spacing.
    pub fn min_spacing(&self) -> f32 {
        self.min_spacing
    }

    /// Returns the [`DirectionProfile`].
    pub fn profile(&self) -> DirectionProfile {
        self.profile
    }

    /// Returns true if the output is normalized to the origin.
    pub fn normalize(&self) -> bool {
        self.normalize
    }
}

/// Validation configuration.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ValidationConfig {
    /// Fail the run when any two rectangles overlap.
    #[serde(default)]
    deny_collisions: bool,
}

impl ValidationConfig {
    /// Creates a new [`ValidationConfig`].
    pub fn new(deny_collisions: bool) -> Self {
        Self { deny_collisions }
    }

    /// Returns true if collisions fail the run.
    pub fn deny_collisions(&self) -> bool {
        self.deny_collisions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.layout().min_spacing(), DEFAULT_MIN_SPACING);
        assert_eq!(config.layout().profile(), DirectionProfile::Compass);
        assert!(!config.layout().normalize());
        assert!(!config.validation().deny_collisions());
    }

    #[test]
    fn test_with_deny_collisions() {
        let config = AppConfig::default().with_deny_collisions(true);
        assert!(config.validation().deny_collisions());
    }
}

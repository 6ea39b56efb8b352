//! Configuration types for the Sidestep engine and its hosting session.
//!
//! All types implement [`serde::Deserialize`] with every field defaulted, so a
//! configuration file only needs to name the values it overrides.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`EngineConfig`] - Paddings, the initial gap, jump distances and the retry budget.
//! - [`JumpConfig`] - Minimum jump distance tiers keyed by dodge count.
//! - [`TriggerConfig`] - Duplicate-trigger coalescing window.
//! - [`SessionConfig`] - Dodge labels and the easter-egg threshold.
//!
//! # Example
//!
//! ```
//! # use sidestep::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.engine().edge_padding(), 12.0);
//! ```

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Validation failures for configuration values.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("`{field}` must be a non-negative finite number, got {value}")]
    NegativeValue { field: &'static str, value: f32 },

    #[error("`{field}` must be in the range (0, 1], got {value}")]
    FractionOutOfRange { field: &'static str, value: f32 },

    #[error(
        "`escalated_fraction` ({escalated}) must be greater than `base_fraction` ({base})"
    )]
    NoEscalation { base: f32, escalated: f32 },

    #[error("`retry_budget` must be at most {max}, got {value}")]
    RetryBudgetTooLarge { value: u32, max: u32 },

    #[error("`dodge_labels` must contain at least one label")]
    EmptyLabels,
}

/// Upper bound on `retry_budget`. A placement runs inside an input handler.
pub const MAX_RETRY_BUDGET: u32 = 1024;

/// Top-level configuration root.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Placement engine section.
    #[serde(default)]
    engine: EngineConfig,

    /// Trigger coalescing section.
    #[serde(default)]
    trigger: TriggerConfig,

    /// Hosting session section.
    #[serde(default)]
    session: SessionConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its three sections.
    pub fn new(engine: EngineConfig, trigger: TriggerConfig, session: SessionConfig) -> Self {
        Self {
            engine,
            trigger,
            session,
        }
    }

    /// Returns the engine configuration.
    pub fn engine(&self) -> &EngineConfig {
        &self.engine
    }

    /// Returns the trigger configuration.
    pub fn trigger(&self) -> &TriggerConfig {
        &self.trigger
    }

    /// Returns the session configuration.
    pub fn session(&self) -> &SessionConfig {
        &self.session
    }

    /// Checks every section for values the engine cannot work with.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine.validate()?;
        self.session.validate()
    }
}

/// Geometry and search parameters for the placement engine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Inset subtracted from every container edge to form the legal rectangle.
    edge_padding: f32,

    /// Margin added around every protected rectangle before overlap tests.
    overlap_padding: f32,

    /// Horizontal gap between the reference rectangle and the initial position.
    initial_gap: f32,

    /// Minimum jump distance tiers.
    jump: JumpConfig,

    /// Random candidates drawn before falling back to corners.
    retry_budget: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            edge_padding: 12.0,
            overlap_padding: 8.0,
            initial_gap: 12.0,
            jump: JumpConfig::default(),
            retry_budget: 18,
        }
    }
}

impl EngineConfig {
    pub fn edge_padding(&self) -> f32 {
        self.edge_padding
    }

    pub fn overlap_padding(&self) -> f32 {
        self.overlap_padding
    }

    pub fn initial_gap(&self) -> f32 {
        self.initial_gap
    }

    pub fn jump(&self) -> &JumpConfig {
        &self.jump
    }

    pub fn retry_budget(&self) -> u32 {
        self.retry_budget
    }

    /// Sets the legal-rectangle inset (builder style).
    pub fn with_edge_padding(mut self, padding: f32) -> Self {
        self.edge_padding = padding;
        self
    }

    /// Sets the protected-rectangle inflation (builder style).
    pub fn with_overlap_padding(mut self, padding: f32) -> Self {
        self.overlap_padding = padding;
        self
    }

    /// Sets the initial placement gap (builder style).
    pub fn with_initial_gap(mut self, gap: f32) -> Self {
        self.initial_gap = gap;
        self
    }

    /// Sets the jump tiers (builder style).
    pub fn with_jump(mut self, jump: JumpConfig) -> Self {
        self.jump = jump;
        self
    }

    /// Sets the number of random attempts (builder style).
    pub fn with_retry_budget(mut self, budget: u32) -> Self {
        self.retry_budget = budget;
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        non_negative("edge_padding", self.edge_padding)?;
        non_negative("overlap_padding", self.overlap_padding)?;
        non_negative("initial_gap", self.initial_gap)?;
        if self.retry_budget > MAX_RETRY_BUDGET {
            return Err(ConfigError::RetryBudgetTooLarge {
                value: self.retry_budget,
                max: MAX_RETRY_BUDGET,
            });
        }
        self.jump.validate()
    }
}

/// Minimum jump distance, expressed as fractions of the legal rectangle's diagonal.
///
/// Dodge counts below `escalation_threshold` use `base_fraction`; the rest use
/// `escalated_fraction`.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct JumpConfig {
    base_fraction: f32,
    escalated_fraction: f32,
    escalation_threshold: u32,
}

impl Default for JumpConfig {
    fn default() -> Self {
        Self {
            base_fraction: 0.34,
            escalated_fraction: 0.42,
            escalation_threshold: 3,
        }
    }
}

impl JumpConfig {
    /// Creates jump tiers from the two fractions and the threshold between them.
    pub fn new(base_fraction: f32, escalated_fraction: f32, escalation_threshold: u32) -> Self {
        Self {
            base_fraction,
            escalated_fraction,
            escalation_threshold,
        }
    }

    pub fn base_fraction(&self) -> f32 {
        self.base_fraction
    }

    pub fn escalated_fraction(&self) -> f32 {
        self.escalated_fraction
    }

    pub fn escalation_threshold(&self) -> u32 {
        self.escalation_threshold
    }

    /// Returns the diagonal fraction used for the given dodge count.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sidestep::config::JumpConfig;
    /// let jump = JumpConfig::default();
    /// assert_eq!(jump.fraction_for(2), 0.34);
    /// assert_eq!(jump.fraction_for(3), 0.42);
    /// ```
    pub fn fraction_for(&self, dodge_count: u32) -> f32 {
        if dodge_count < self.escalation_threshold {
            self.base_fraction
        } else {
            self.escalated_fraction
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        fraction("base_fraction", self.base_fraction)?;
        fraction("escalated_fraction", self.escalated_fraction)?;
        if self.escalated_fraction <= self.base_fraction {
            return Err(ConfigError::NoEscalation {
                base: self.base_fraction,
                escalated: self.escalated_fraction,
            });
        }
        Ok(())
    }
}

/// Duplicate-trigger coalescing parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TriggerConfig {
    debounce_window_ms: u64,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            debounce_window_ms: 170,
        }
    }
}

impl TriggerConfig {
    pub fn new(debounce_window_ms: u64) -> Self {
        Self { debounce_window_ms }
    }

    /// Triggers closer together than this belong to one logical interaction.
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_window_ms)
    }
}

/// Hosting-layer behavior driven by the dodge counter.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Label shown before the first dodge.
    default_label: String,

    /// Labels cycled through, one per dodge.
    dodge_labels: Vec<String>,

    /// Dodge count at which the easter-egg region appears.
    easter_egg_after: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_label: "No".to_string(),
            dodge_labels: [
                "Nope.",
                "Almost.",
                "Nice try.",
                "Not today.",
                "Still no.",
                "So close.",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            easter_egg_after: 9,
        }
    }
}

impl SessionConfig {
    pub fn new(default_label: impl Into<String>, dodge_labels: Vec<String>, easter_egg_after: u32) -> Self {
        Self {
            default_label: default_label.into(),
            dodge_labels,
            easter_egg_after,
        }
    }

    pub fn default_label(&self) -> &str {
        &self.default_label
    }

    pub fn dodge_labels(&self) -> &[String] {
        &self.dodge_labels
    }

    pub fn easter_egg_after(&self) -> u32 {
        self.easter_egg_after
    }

    /// Returns the label for the control after `dodge_count` dodges.
    pub fn label_for(&self, dodge_count: u32) -> &str {
        if dodge_count == 0 || self.dodge_labels.is_empty() {
            return &self.default_label;
        }
        let index = (dodge_count as usize - 1) % self.dodge_labels.len();
        &self.dodge_labels[index]
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.dodge_labels.is_empty() {
            return Err(ConfigError::EmptyLabels);
        }
        Ok(())
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NegativeValue { field, value })
    }
}

fn fraction(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::FractionOutOfRange { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_tuned_constants() {
        let config = AppConfig::default();
        let engine = config.engine();
        assert_eq!(engine.edge_padding(), 12.0);
        assert_eq!(engine.overlap_padding(), 8.0);
        assert_eq!(engine.initial_gap(), 12.0);
        assert_eq!(engine.retry_budget(), 18);
        assert_eq!(engine.jump().base_fraction(), 0.34);
        assert_eq!(engine.jump().escalated_fraction(), 0.42);
        assert_eq!(engine.jump().escalation_threshold(), 3);
        assert_eq!(config.trigger().debounce_window(), Duration::from_millis(170));
        assert_eq!(config.session().easter_egg_after(), 9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_fraction_for_escalates_at_threshold() {
        let jump = JumpConfig::default();
        assert_eq!(jump.fraction_for(0), 0.34);
        assert_eq!(jump.fraction_for(2), 0.34);
        assert_eq!(jump.fraction_for(3), 0.42);
        assert_eq!(jump.fraction_for(100), 0.42);
    }

    #[test]
    fn test_label_cycle() {
        let session = SessionConfig::default();
        assert_eq!(session.label_for(0), "No");
        assert_eq!(session.label_for(1), "Nope.");
        assert_eq!(session.label_for(6), "So close.");
        assert_eq!(session.label_for(7), "Nope.");
    }

    #[test]
    fn test_validate_rejects_negative_padding() {
        let config = AppConfig::new(
            EngineConfig::default().with_edge_padding(-1.0),
            TriggerConfig::default(),
            SessionConfig::default(),
        );
        assert_eq!(
            config.validate(),
            Err(ConfigError::NegativeValue {
                field: "edge_padding",
                value: -1.0
            })
        );
    }

    #[test]
    fn test_validate_rejects_flat_escalation() {
        let engine = EngineConfig::default().with_jump(JumpConfig::new(0.4, 0.4, 3));
        let config = AppConfig::new(engine, TriggerConfig::default(), SessionConfig::default());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NoEscalation { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_fraction_out_of_range() {
        let engine = EngineConfig::default().with_jump(JumpConfig::new(0.0, 0.5, 3));
        assert!(matches!(
            engine.validate(),
            Err(ConfigError::FractionOutOfRange {
                field: "base_fraction",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_retry_budget_bounds() {
        let engine = EngineConfig::default().with_retry_budget(u32::MAX);
        assert_eq!(
            engine.validate(),
            Err(ConfigError::RetryBudgetTooLarge {
                value: u32::MAX,
                max: MAX_RETRY_BUDGET,
            })
        );
        assert!(EngineConfig::default()
            .with_retry_budget(MAX_RETRY_BUDGET)
            .validate()
            .is_ok());
        // Zero is allowed: every dodge goes straight to the corner fallback.
        assert!(EngineConfig::default().with_retry_budget(0).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_labels() {
        let session = SessionConfig::new("No", Vec::new(), 9);
        assert_eq!(session.validate(), Err(ConfigError::EmptyLabels));
        assert_eq!(session.label_for(4), "No");
    }
}

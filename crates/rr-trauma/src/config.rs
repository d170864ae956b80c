//! Tunable numbers for the trauma economy.
//!
//! Defaults reproduce the tabletop rules. A campaign can override any field
//! from JSON; missing fields keep their defaults.

use serde::{Deserialize, Serialize};

use crate::error::{TraumaError, TraumaResult};
use crate::meter::{METER_MAX, METER_MIN};

/// Configuration for warning levels, check resets and recovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// Stress or corruption at which the economy reports `Elevated`.
    pub warning_threshold: i32,
    /// Stress or corruption at which the economy reports `Critical`.
    pub critical_threshold: i32,
    /// Stress or corruption at which the economy reports `Terminal`.
    pub terminal_threshold: i32,
    /// Difficulty of Terminal Error checks.
    pub terminal_error_dc: u32,
    /// Stress after a passed Trauma Check.
    pub trauma_pass_reset: i32,
    /// Stress after a failed Trauma Check.
    pub trauma_fail_reset: i32,
    /// Stress recovered per point of WILL on a short rest.
    pub short_rest_multiplier: i32,
    /// Stress recovered per point of WILL on a long rest.
    pub long_rest_multiplier: i32,
    /// Stress recovered at a story milestone.
    pub milestone_recovery: i32,
    /// Maximum snapshots kept in a history (oldest dropped when exceeded). 0 = unlimited.
    pub history_limit: usize,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            warning_threshold: 70,
            critical_threshold: 80,
            terminal_threshold: 100,
            terminal_error_dc: rr_mechanics::resolution::terminal::DEFAULT_TERMINAL_DC,
            trauma_pass_reset: 75,
            trauma_fail_reset: 50,
            short_rest_multiplier: 2,
            long_rest_multiplier: 5,
            milestone_recovery: 25,
            history_limit: 0,
        }
    }
}

impl EconomyConfig {
    /// Parse a config from JSON and validate it.
    pub fn from_json(json: &str) -> TraumaResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| TraumaError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that thresholds ascend strictly within 0-100 and resets are in range.
    pub fn validate(&self) -> TraumaResult<()> {
        let thresholds = [
            self.warning_threshold,
            self.critical_threshold,
            self.terminal_threshold,
        ];
        if thresholds
            .iter()
            .any(|t| !(METER_MIN..=METER_MAX).contains(t))
        {
            return Err(TraumaError::InvalidConfig(format!(
                "warning thresholds must lie within {METER_MIN}..={METER_MAX}, got {thresholds:?}"
            )));
        }
        if !thresholds.windows(2).all(|w| w[0] < w[1]) {
            return Err(TraumaError::InvalidConfig(format!(
                "warning thresholds must be strictly ascending, got {thresholds:?}"
            )));
        }
        for (name, reset) in [
            ("trauma_pass_reset", self.trauma_pass_reset),
            ("trauma_fail_reset", self.trauma_fail_reset),
        ] {
            if !(METER_MIN..=METER_MAX).contains(&reset) {
                return Err(TraumaError::InvalidConfig(format!(
                    "{name} must lie within {METER_MIN}..={METER_MAX}, got {reset}"
                )));
            }
        }
        for (name, amount) in [
            ("short_rest_multiplier", self.short_rest_multiplier),
            ("long_rest_multiplier", self.long_rest_multiplier),
            ("milestone_recovery", self.milestone_recovery),
        ] {
            if amount < 0 {
                return Err(TraumaError::InvalidConfig(format!(
                    "{name} must be non-negative, got {amount}"
                )));
            }
        }
        Ok(())
    }

    /// Set the three warning thresholds.
    pub fn with_thresholds(mut self, warning: i32, critical: i32, terminal: i32) -> Self {
        self.warning_threshold = warning;
        self.critical_threshold = critical;
        self.terminal_threshold = terminal;
        self
    }

    /// Set the Terminal Error difficulty.
    pub fn with_terminal_error_dc(mut self, dc: u32) -> Self {
        self.terminal_error_dc = dc;
        self
    }

    /// Set where stress lands after a passed and a failed Trauma Check.
    pub fn with_trauma_resets(mut self, pass: i32, fail: i32) -> Self {
        self.trauma_pass_reset = pass;
        self.trauma_fail_reset = fail;
        self
    }

    /// Set the WILL multipliers for short and long rests.
    pub fn with_rest_multipliers(mut self, short: i32, long: i32) -> Self {
        self.short_rest_multiplier = short;
        self.long_rest_multiplier = long;
        self
    }

    /// Set the flat stress recovered at a milestone.
    pub fn with_milestone_recovery(mut self, amount: i32) -> Self {
        self.milestone_recovery = amount;
        self
    }

    /// Set the snapshot history size (0 = unlimited).
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = EconomyConfig::default();
        assert_eq!(cfg.warning_threshold, 70);
        assert_eq!(cfg.critical_threshold, 80);
        assert_eq!(cfg.terminal_threshold, 100);
        assert_eq!(cfg.terminal_error_dc, 3);
        assert_eq!(cfg.trauma_pass_reset, 75);
        assert_eq!(cfg.trauma_fail_reset, 50);
        assert_eq!(cfg.history_limit, 0);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn builder_chain() {
        let cfg = EconomyConfig::default()
            .with_thresholds(60, 75, 95)
            .with_terminal_error_dc(4)
            .with_trauma_resets(70, 40)
            .with_rest_multipliers(3, 6)
            .with_milestone_recovery(30)
            .with_history_limit(10);
        assert_eq!(cfg.critical_threshold, 75);
        assert_eq!(cfg.terminal_error_dc, 4);
        assert_eq!(cfg.trauma_fail_reset, 40);
        assert_eq!(cfg.long_rest_multiplier, 6);
        assert_eq!(cfg.milestone_recovery, 30);
        assert_eq!(cfg.history_limit, 10);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_unordered_thresholds() {
        let cfg = EconomyConfig::default().with_thresholds(80, 80, 100);
        assert!(matches!(cfg.validate(), Err(TraumaError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_out_of_range_values() {
        let base = EconomyConfig::default();
        assert!(base.clone().with_thresholds(70, 80, 120).validate().is_err());
        assert!(base.clone().with_trauma_resets(101, 50).validate().is_err());
        assert!(base.with_rest_multipliers(-1, 5).validate().is_err());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = EconomyConfig::from_json(r#"{ "history_limit": 5, "terminal_error_dc": 4 }"#)
            .unwrap();
        assert_eq!(cfg.history_limit, 5);
        assert_eq!(cfg.terminal_error_dc, 4);
        assert_eq!(cfg.warning_threshold, 70);
    }

    #[test]
    fn bad_json_is_invalid_config() {
        assert!(matches!(
            EconomyConfig::from_json("{ not json"),
            Err(TraumaError::InvalidConfig(_))
        ));
        assert!(matches!(
            EconomyConfig::from_json(r#"{ "warning_threshold": 90 }"#),
            Err(TraumaError::InvalidConfig(_))
        ));
    }
}

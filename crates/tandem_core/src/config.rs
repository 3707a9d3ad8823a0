use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TandemConfig {
    pub breaker: BreakerConfig,
    pub telemetry: TelemetryConfig,
}

impl TandemConfig {
    /// Load config from a TOML file, falling back to defaults for missing
    /// fields. After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: TandemConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Try to load from path; if the file doesn't exist, return defaults
    /// with env overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({}), using defaults", e);
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                cfg
            }
        }
    }

    /// Apply environment variable overrides on top of file-based config.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("TANDEM_BREAKER_THRESHOLD") {
            if let Ok(n) = v.parse() {
                self.breaker.failure_threshold = n;
            }
        }
        if let Ok(v) = std::env::var("TANDEM_BREAKER_RESET_MS") {
            if let Ok(n) = v.parse() {
                self.breaker.reset_timeout_ms = n;
            }
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

/// Per-instance circuit breaker configuration; one breaker per logical
/// dependency.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BreakerConfig {
    /// Consecutive failures before the circuit opens.
    pub failure_threshold: u32,
    /// How long the circuit stays open before allowing a probe.
    pub reset_timeout_ms: u64,
}

impl Default for BreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 3,
            reset_timeout_ms: 8_000,
        }
    }
}

impl BreakerConfig {
    pub fn reset_timeout(&self) -> Duration {
        Duration::from_millis(self.reset_timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Metric name → budget in milliseconds.
    pub budgets_ms: HashMap<String, u64>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            budgets_ms: crate::telemetry::default_budgets(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = TandemConfig::default();
        assert_eq!(cfg.breaker.failure_threshold, 3);
        assert_eq!(cfg.breaker.reset_timeout_ms, 8_000);
        assert_eq!(cfg.breaker.reset_timeout(), Duration::from_millis(8_000));
        assert!(cfg.telemetry.budgets_ms.contains_key("memory_fetch_time"));
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let cfg: TandemConfig = toml::from_str(
            r#"
            [breaker]
            failure_threshold = 5
            "#,
        )
        .unwrap();
        assert_eq!(cfg.breaker.failure_threshold, 5);
        assert_eq!(cfg.breaker.reset_timeout_ms, 8_000);
    }

    #[test]
    fn test_budget_override() {
        let cfg: TandemConfig = toml::from_str(
            r#"
            [telemetry.budgets_ms]
            memory_fetch_time = 150
            "#,
        )
        .unwrap();
        assert_eq!(cfg.telemetry.budgets_ms["memory_fetch_time"], 150);
    }
}

use serde::{Deserialize, Serialize};

use crate::scoring::DEFAULT_MAX_RESPONSE_MS;

/// Engine tuning knobs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Response time (ms) at which a correct answer earns the minimum score
    pub max_response_ms: i64,
    /// Pause after answer feedback before the next round (ms)
    pub post_answer_delay_ms: u64,
    /// Seed for a reproducible session; entropy when unset
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_response_ms: DEFAULT_MAX_RESPONSE_MS,
            post_answer_delay_ms: 1500,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Create a new configuration builder
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }
}

/// Builder for EngineConfig
#[derive(Debug, Clone, Default)]
pub struct EngineConfigBuilder {
    max_response_ms: Option<i64>,
    post_answer_delay_ms: Option<u64>,
    seed: Option<u64>,
}

impl EngineConfigBuilder {
    /// Set the scoring horizon
    pub fn max_response_ms(mut self, ms: i64) -> Self {
        self.max_response_ms = Some(ms);
        self
    }

    /// Set the pause after answer feedback
    pub fn post_answer_delay_ms(mut self, ms: u64) -> Self {
        self.post_answer_delay_ms = Some(ms);
        self
    }

    /// Fix the random seed
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Build the configuration
    pub fn build(self) -> EngineConfig {
        let default = EngineConfig::default();
        EngineConfig {
            max_response_ms: self.max_response_ms.unwrap_or(default.max_response_ms),
            post_answer_delay_ms: self
                .post_answer_delay_ms
                .unwrap_or(default.post_answer_delay_ms),
            seed: self.seed.or(default.seed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = EngineConfig::builder().build();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.max_response_ms, 10_000);
        assert_eq!(config.post_answer_delay_ms, 1500);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_overrides() {
        let config = EngineConfig::builder()
            .max_response_ms(5000)
            .post_answer_delay_ms(0)
            .seed(42)
            .build();
        assert_eq!(config.max_response_ms, 5000);
        assert_eq!(config.post_answer_delay_ms, 0);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"seed": 7}"#).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.max_response_ms, 10_000);
    }
}

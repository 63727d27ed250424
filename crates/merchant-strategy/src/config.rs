//! Configuration for strategy generation

use std::time::Duration;

/// Default wall-clock budget for one reasoning engine call
const DEFAULT_ENGINE_TIMEOUT: Duration = Duration::from_secs(30);

/// Agent name stamped on audit entries
const DEFAULT_AGENT_NAME: &str = "MarketingAgent";

/// Configuration for the strategy coordinator
#[derive(Debug, Clone)]
pub struct StrategyConfig {
    /// Caller-visible timeout on the engine call; elapsing is treated like
    /// any other engine failure
    pub engine_timeout: Duration,

    /// Logical component name recorded in the audit log
    pub agent_name: String,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            engine_timeout: DEFAULT_ENGINE_TIMEOUT,
            agent_name: DEFAULT_AGENT_NAME.to_string(),
        }
    }
}

impl StrategyConfig {
    /// Override the engine timeout
    pub fn with_engine_timeout(mut self, timeout: Duration) -> Self {
        self.engine_timeout = timeout;
        self
    }

    /// Override the audit agent name
    pub fn with_agent_name(mut self, name: impl Into<String>) -> Self {
        self.agent_name = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StrategyConfig::default();
        assert_eq!(config.engine_timeout, Duration::from_secs(30));
        assert_eq!(config.agent_name, "MarketingAgent");
    }

    #[test]
    fn test_overrides() {
        let config = StrategyConfig::default()
            .with_engine_timeout(Duration::from_secs(5))
            .with_agent_name("NightShiftAgent");
        assert_eq!(config.engine_timeout, Duration::from_secs(5));
        assert_eq!(config.agent_name, "NightShiftAgent");
    }
}

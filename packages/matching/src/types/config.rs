//! Configuration types for matching, rescoring, and delivery.

use std::time::Duration;

/// Additive weights for the rule-engine scoring signals.
///
/// The defaults reproduce the tuning the product shipped with. Relative
/// ordering is what matters; the exact constants are configurable rather
/// than load-bearing.
#[derive(Debug, Clone, Copy)]
pub struct MatchWeights {
    /// Contribution of a location match
    pub location: u32,

    /// Contribution of a job-type match
    pub job_type: u32,

    /// Contribution of a keyword/category match
    pub keyword: u32,

    /// Score assigned to users with no stored preferences at all
    pub wildcard: u32,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            location: 2,
            job_type: 1,
            keyword: 2,
            wildcard: 1,
        }
    }
}

impl MatchWeights {
    /// Maximum score a profile-bearing user can reach.
    pub fn max_score(&self) -> u32 {
        self.location + self.job_type + self.keyword
    }
}

/// Budgets for AI rescoring calls.
#[derive(Debug, Clone)]
pub struct RescoreConfig {
    /// Token budget for the model reply
    pub max_tokens: u32,

    /// Decoding temperature
    pub temperature: f32,

    /// Wall-clock budget for one model call
    pub call_timeout: Duration,

    /// Budget for one (job, user) pair in batch mode, on top of the call budget
    pub pair_timeout: Duration,

    /// Budget for fetching one user's profile in batch mode
    pub profile_timeout: Duration,
}

impl Default for RescoreConfig {
    fn default() -> Self {
        Self {
            max_tokens: 1024,
            temperature: 0.3,
            call_timeout: Duration::from_secs(15),
            pair_timeout: Duration::from_secs(20),
            profile_timeout: Duration::from_secs(5),
        }
    }
}

impl RescoreConfig {
    /// Set the token budget.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the decoding temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the per-call timeout.
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }
}

/// Budgets for notification fan-out.
#[derive(Debug, Clone)]
pub struct DeliveryConfig {
    /// Wall-clock budget for one send; a slow recipient is skipped,
    /// never stalls the rest of the broadcast
    pub send_timeout: Duration,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            send_timeout: Duration::from_secs(10),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = MatchWeights::default();
        assert_eq!(weights.location, 2);
        assert_eq!(weights.job_type, 1);
        assert_eq!(weights.keyword, 2);
        assert_eq!(weights.wildcard, 1);
        assert_eq!(weights.max_score(), 5);
    }

    #[test]
    fn test_default_rescore_budgets() {
        let config = RescoreConfig::default();
        assert_eq!(config.call_timeout, Duration::from_secs(15));
        assert_eq!(config.pair_timeout, Duration::from_secs(20));
        assert_eq!(config.profile_timeout, Duration::from_secs(5));
    }
}

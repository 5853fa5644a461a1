use std::time::Duration;

/// Identity the send path stamps onto outgoing messages. In a real deployment
/// this would come from auth.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub local_user_id: String,
    pub local_user_name: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            local_user_id: "user-1".to_string(),
            local_user_name: "You".to_string(),
        }
    }
}

/// Timing knobs for the inbound message simulator. Tests tighten these to
/// drive cycles deterministically under paused time.
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    pub min_delay: Duration,
    pub max_delay: Duration,
    /// Chance that a cycle actually injects a message.
    pub message_probability: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            min_delay: Duration::from_secs(10),
            max_delay: Duration::from_secs(30),
            message_probability: 0.2,
        }
    }
}

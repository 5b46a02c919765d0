use serde::Deserialize;

/// Settings for the self-critique (reflection) loop
///
/// Read at config-bind time and passed through unvalidated to the external
/// control loop; the adapter itself never loops or retries.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReflectionConfig {
    /// Whether reflection is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Upper bound on reflection attempts
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl Default for ReflectionConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            max_attempts: default_max_attempts(),
        }
    }
}

const fn default_enabled() -> bool {
    true
}

const fn default_max_attempts() -> u32 {
    2
}

use serde::{Deserialize, Serialize};

/// Configuration for the appointments module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppointmentsConfig {
    #[serde(default = "default_max_title_length")]
    pub max_title_length: usize,
}

impl Default for AppointmentsConfig {
    fn default() -> Self {
        Self {
            max_title_length: default_max_title_length(),
        }
    }
}

fn default_max_title_length() -> usize {
    200
}

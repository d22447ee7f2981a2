//! Configuration of rooting operations.

use serde::{Deserialize, Serialize};

/// Default number of intervals the least-squares search splits each edge into
pub const DEFAULT_LEAST_SQUARES_SAMPLES: usize = 20;

/// Default base id for the synthetic root created by rerooting
pub const DEFAULT_SYNTHETIC_ROOT_PREFIX: &str = "root";

/// Settings shared by rerooting and the automatic rooting strategies.
///
/// Can be built in code with the `with_*` methods or deserialized, e.g.
/// from a JSON config file; missing fields take their defaults.
///
/// # Example
/// ```
/// use phyroot::RootingConfig;
///
/// let config = RootingConfig::default()
///     .with_least_squares_samples(40)
///     .with_synthetic_root_prefix("new_root");
/// assert_eq!(config.least_squares_samples, 40);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RootingConfig {
    /// Number of intervals per edge for least-squares rooting;
    /// split fractions `0, 1/n, ..., 1` are evaluated (`n + 1` samples).
    pub least_squares_samples: usize,

    /// Id tried first for a synthetic root; on collision `_1`, `_2`, ...
    /// are appended until the id is unused.
    pub synthetic_root_prefix: String,
}

impl Default for RootingConfig {
    fn default() -> Self {
        RootingConfig {
            least_squares_samples: DEFAULT_LEAST_SQUARES_SAMPLES,
            synthetic_root_prefix: DEFAULT_SYNTHETIC_ROOT_PREFIX.to_string(),
        }
    }
}

impl RootingConfig {
    /// Sets the number of least-squares intervals per edge (at least 1).
    pub fn with_least_squares_samples(mut self, samples: usize) -> Self {
        self.least_squares_samples = samples;
        self
    }

    /// Sets the base id of synthetic roots.
    pub fn with_synthetic_root_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.synthetic_root_prefix = prefix.into();
        self
    }

    /// Number of intervals actually used, never zero.
    pub(crate) fn effective_samples(&self) -> usize {
        self.least_squares_samples.max(1)
    }

    /// Parses a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

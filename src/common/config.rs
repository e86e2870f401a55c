//! Run configuration for pagesim.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Error, Result};
use crate::memory::replacer::Algorithm;
use crate::trace::ReferenceSource;

/// Frame count used by the CLI when none is given.
pub const DEFAULT_NUM_FRAMES: usize = 3;

/// Label for an unoccupied frame in snapshots and exports.
pub const EMPTY_SLOT_LABEL: &str = "Empty";

/// Everything needed to construct a [`Simulator`](crate::Simulator).
///
/// # JSON form
/// ```
/// use pagesim::{Algorithm, SimConfig};
///
/// let config = SimConfig::from_json_str(r#"{
///     "num_frames": 3,
///     "algorithm": "lru",
///     "source": { "per_process": { "1": [1, 2, 3], "2": [2, 3] } }
/// }"#).unwrap();
///
/// assert_eq!(config.algorithm, Algorithm::Lru);
/// assert!(config.demand_paging);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of physical frames in the pool.
    pub num_frames: usize,

    /// Replacement policy, fixed for the whole run.
    pub algorithm: Algorithm,

    /// Load discipline. Only `true` (demand paging) is supported.
    #[serde(default = "default_demand_paging")]
    pub demand_paging: bool,

    /// Where the references come from.
    pub source: ReferenceSource,
}

fn default_demand_paging() -> bool {
    true
}

impl SimConfig {
    /// Create a demand-paging configuration.
    pub fn new(num_frames: usize, algorithm: Algorithm, source: ReferenceSource) -> Self {
        Self {
            num_frames,
            algorithm,
            demand_paging: true,
            source,
        }
    }

    /// Parse a configuration from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Check the scalar settings. The reference source is validated when
    /// it is scheduled.
    pub fn validate(&self) -> Result<()> {
        if self.num_frames == 0 {
            return Err(Error::InvalidFrameCount(self.num_frames));
        }
        if !self.demand_paging {
            return Err(Error::DemandPagingRequired);
        }
        Ok(())
    }
}

//! Config domain: on-disk layout of the movement config file.

use serde::{Deserialize, Serialize};

use crate::look::LookSettings;
use crate::movement::MovementTuning;

/// Top-level structure of `assets/data/movement.ron`.
/// Missing sections and fields fall back to their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfigFile {
    pub movement: MovementTuning,
    pub look: LookSettings,
}

//! Config domain: movement and look tunables loaded from RON.

mod data;
mod loader;

pub use data::MovementConfigFile;
pub use loader::{ConfigLoadError, load_movement_config, parse_movement_config};

use bevy::prelude::*;
use std::path::Path;

pub const MOVEMENT_CONFIG_PATH: &str = "assets/data/movement.ron";

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, apply_movement_config);
    }
}

/// Replace the default tuning resources with the values on disk, keeping the
/// defaults when the file is missing or malformed.
fn apply_movement_config(mut commands: Commands) {
    let config = match load_movement_config(Path::new(MOVEMENT_CONFIG_PATH)) {
        Ok(config) => {
            info!(
                "Loaded movement config: ground_speed={}, air_speed={}, jump_height={}, wall_run_time={}",
                config.movement.maximum_ground_speed,
                config.movement.maximum_air_speed,
                config.movement.jump_height,
                config.movement.max_wall_run_time
            );
            config
        }
        Err(e) => {
            error!("{}", e);
            warn!("Using default movement config");
            MovementConfigFile::default()
        }
    };

    commands.insert_resource(config.movement);
    commands.insert_resource(config.look);
}

//! Look domain: mouse look with wall-run camera roll.

mod components;
mod systems;

pub use components::{LookSettings, LookState, PlayerCamera, ROLL_LAG_TICKS};

use bevy::prelude::*;

use crate::look::systems::{follow_player, grab_cursor, toggle_cursor_grab, update_look};

pub struct LookPlugin;

impl Plugin for LookPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LookSettings>()
            .add_systems(Startup, grab_cursor)
            .add_systems(
                Update,
                (toggle_cursor_grab, update_look, follow_player).chain(),
            );
    }
}

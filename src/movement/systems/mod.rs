//! Movement domain: system modules for locomotion updates.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod movement;

pub(crate) use collisions::track_contacts;
pub(crate) use input::read_input;
pub(crate) use movement::{drive_locomotion, log_locomotion_events};

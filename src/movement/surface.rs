//! Movement domain: classification of contact surfaces into ground and walls.

use avian3d::prelude::*;
use bevy::prelude::*;

/// Minimum up component of a contact normal for the surface to count as floor.
pub const GROUND_NORMAL_MIN_UP: f32 = 0.9;
/// Maximum absolute up component of a contact normal for a runnable wall.
pub const WALL_NORMAL_MAX_UP: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceKind {
    Ground,
    WallRunnable,
    #[default]
    None,
}

impl SurfaceKind {
    /// Resolution order when several surfaces are reported in one tick.
    pub fn priority(self) -> u8 {
        match self {
            SurfaceKind::Ground => 2,
            SurfaceKind::WallRunnable => 1,
            SurfaceKind::None => 0,
        }
    }
}

/// A contact reduced to its dominant normal and classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifiedSurface {
    pub kind: SurfaceKind,
    /// Most upward-facing contact normal, pointing towards the player.
    pub normal: Vec3,
}

impl ClassifiedSurface {
    /// Placeholder for events that carry no contact data, such as exits.
    pub const NONE: Self = Self {
        kind: SurfaceKind::None,
        normal: Vec3::NEG_Y,
    };
}

/// Layer sets used to decide what a contacted object is.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceMasks {
    pub ground: LayerMask,
    pub wall_run: LayerMask,
    pub wall_run_counts_as_ground: bool,
}

impl SurfaceMasks {
    pub fn is_ground(&self, layers: LayerMask) -> bool {
        overlaps(self.ground, layers) || (self.wall_run_counts_as_ground && self.is_wall_run(layers))
    }

    pub fn is_wall_run(&self, layers: LayerMask) -> bool {
        overlaps(self.wall_run, layers)
    }
}

fn overlaps(a: LayerMask, b: LayerMask) -> bool {
    a.0 & b.0 != 0
}

/// The normal with the largest up component, or straight down without contacts.
pub fn best_normal(normals: impl IntoIterator<Item = Vec3>) -> Vec3 {
    normals
        .into_iter()
        .fold(Vec3::NEG_Y, |best, normal| if normal.y > best.y { normal } else { best })
}

pub fn classify(
    normals: impl IntoIterator<Item = Vec3>,
    layers: LayerMask,
    masks: &SurfaceMasks,
) -> ClassifiedSurface {
    let normal = best_normal(normals);

    let kind = if normal.y > GROUND_NORMAL_MIN_UP && masks.is_ground(layers) {
        SurfaceKind::Ground
    } else if normal.y.abs() < WALL_NORMAL_MAX_UP && masks.is_wall_run(layers) {
        SurfaceKind::WallRunnable
    } else {
        SurfaceKind::None
    };

    ClassifiedSurface { kind, normal }
}

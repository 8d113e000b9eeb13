//! Tuning knobs.
//!
//! Every constant that shapes how the automatons look lives here. The
//! defaults are what the arcade ships with.

use crate::arcade::EntityKind;

/// Parameters of [`apply_life_force`](crate::regulate::apply_life_force).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LifeForce {
    /// Density below which cells are injected.
    pub threshold: f64,
    /// Placement attempts per call. Attempts landing on live cells are lost.
    pub injections: usize,
}

impl Default for LifeForce {
    fn default() -> Self {
        LifeForce {
            threshold: 0.35,
            injections: 15,
        }
    }
}

/// Parameters of [`maintain_density`](crate::regulate::maintain_density).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Maintain {
    /// Density kept when the caller has no preference.
    pub target_density: f64,
    /// Placement attempts allowed per missing cell.
    pub attempts_per_cell: usize,
}

impl Default for Maintain {
    fn default() -> Self {
        Maintain {
            target_density: 0.6,
            attempts_per_cell: 4,
        }
    }
}

/// Parameters of [`seed_radial_density`](crate::seeding::seed_radial_density).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialSeed {
    /// Probability of life at the center.
    pub center_density: f64,
    /// Probability of life at the farthest corner.
    pub edge_density: f64,
}

impl Default for RadialSeed {
    fn default() -> Self {
        RadialSeed {
            center_density: 0.7,
            edge_density: 0.1,
        }
    }
}

/// Size and cadence of one entity's automaton.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSettings {
    pub cols: usize,
    pub rows: usize,
    /// Generations per second; zero means the grid is never advanced.
    pub update_rate_fps: u32,
}

/// Host configuration for the arcade showcase.
#[derive(Clone, Debug, PartialEq)]
pub struct ArcadeConfig {
    /// Frames rendered per second.
    pub render_fps: u32,
    pub background: GridSettings,
    pub player: GridSettings,
    pub enemy: GridSettings,
    pub projectile: GridSettings,
    /// Number of past generations compared when looking for stagnation.
    pub stability_window: usize,
    pub life_force: LifeForce,
    pub maintain: Maintain,
    pub radial_seed: RadialSeed,
}

impl ArcadeConfig {
    /// Grid settings for an entity kind, if that kind owns an automaton.
    pub fn grid_settings(&self, kind: EntityKind) -> Option<GridSettings> {
        match kind {
            EntityKind::Background => Some(self.background),
            EntityKind::Player => Some(self.player),
            EntityKind::Enemy => Some(self.enemy),
            EntityKind::Projectile => Some(self.projectile),
            EntityKind::Label => None,
        }
    }
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        ArcadeConfig {
            render_fps: 60,
            background: GridSettings {
                cols: 60,
                rows: 24,
                update_rate_fps: 10,
            },
            player: GridSettings {
                cols: 16,
                rows: 16,
                update_rate_fps: 6,
            },
            enemy: GridSettings {
                cols: 12,
                rows: 12,
                update_rate_fps: 8,
            },
            projectile: GridSettings {
                cols: 6,
                rows: 3,
                update_rate_fps: 0,
            },
            stability_window: 12,
            life_force: LifeForce::default(),
            maintain: Maintain::default(),
            radial_seed: RadialSeed::default(),
        }
    }
}

//! The host side: entities that own automatons and the per-frame loop that
//! drives them.
//!
//! The engine has no clock, so the host decides how often each grid is
//! advanced ([`Cadence`]) and which regulator keeps it looking alive
//! ([`VisualPolicy`]). Stagnation is observed here ([`StabilityMonitor`]),
//! never inside the grid.

use std::collections::hash_map::DefaultHasher;
use std::collections::VecDeque;
use std::hash::{Hash, Hasher};

use log::{debug, info};
use rand::Rng;
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::grid::{CellGrid, DEFAULT_SEED_DENSITY};
use crate::patterns;
use crate::regulate::{apply_life_force_with, maintain_density_with};
use crate::seeding::seed_radial_density_with;
use crate::tuning::ArcadeConfig;

/// What an entity is in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    Enemy,
    Projectile,
    Background,
    /// HUD text; owns no automaton.
    Label,
}

/// How an entity's automaton is kept on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VisualPolicy {
    /// Advanced on cadence, with life force after every generation.
    Evolving,
    /// Advanced on cadence and reseeded once it dies out or freezes.
    Ambient,
    /// Never advanced; topped up to `target_density` every frame.
    Flicker { target_density: f64 },
    /// Nothing to animate.
    Inert,
}

impl VisualPolicy {
    pub fn for_kind(kind: EntityKind, config: &ArcadeConfig) -> Self {
        match kind {
            EntityKind::Player | EntityKind::Enemy => VisualPolicy::Evolving,
            EntityKind::Background => VisualPolicy::Ambient,
            EntityKind::Projectile => VisualPolicy::Flicker {
                target_density: config.maintain.target_density,
            },
            EntityKind::Label => VisualPolicy::Inert,
        }
    }
}

/// Anything that may own an automaton.
pub trait HasAutomaton {
    fn automaton(&self) -> Option<&CellGrid>;
    fn automaton_mut(&mut self) -> Option<&mut CellGrid>;
}

/// Converts an advisory generation rate into "advance every N frames".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence {
    /// `None` when the grid is never advanced.
    frames_per_generation: Option<u32>,
    frame: u32,
}

impl Cadence {
    pub fn new(render_fps: u32, update_rate_fps: u32) -> Self {
        let frames_per_generation = if update_rate_fps == 0 {
            None
        } else {
            let ratio = (render_fps as f64 / update_rate_fps as f64).round() as u32;
            Some(ratio.max(1))
        };
        Cadence {
            frames_per_generation,
            frame: 0,
        }
    }

    pub fn frames_per_generation(&self) -> Option<u32> {
        self.frames_per_generation
    }

    /// Counts one rendered frame. Returns `true` on frames where the grid
    /// should advance.
    pub fn tick(&mut self) -> bool {
        match self.frames_per_generation {
            Some(period) => {
                self.frame += 1;
                if self.frame >= period {
                    self.frame = 0;
                    true
                } else {
                    false
                }
            }
            None => false,
        }
    }
}

/// What the recent history of a grid looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stability {
    Evolving,
    /// The current generation repeats one seen `period` generations ago.
    Stable { period: usize },
    Extinct,
}

impl Stability {
    pub fn is_stagnant(self) -> bool {
        self != Stability::Evolving
    }
}

/// Remembers fingerprints of the last few generations of a grid.
#[derive(Debug, Clone)]
pub struct StabilityMonitor {
    window: usize,
    history: VecDeque<u64>,
}

impl StabilityMonitor {
    pub fn new(window: usize) -> Self {
        StabilityMonitor {
            window: window.max(1),
            history: VecDeque::with_capacity(window.max(1)),
        }
    }

    fn fingerprint(grid: &CellGrid) -> u64 {
        let mut hasher = DefaultHasher::new();
        for y in 0..grid.rows() {
            if let Some(row) = grid.row(y) {
                row.hash(&mut hasher);
            }
        }
        hasher.finish()
    }

    /// Records the grid's current generation and classifies it.
    pub fn observe(&mut self, grid: &CellGrid) -> Stability {
        if grid.is_extinct() {
            self.history.clear();
            return Stability::Extinct;
        }

        let fingerprint = Self::fingerprint(grid);
        let seen = self
            .history
            .iter()
            .rev()
            .position(|&previous| previous == fingerprint);

        if self.history.len() == self.window {
            self.history.pop_front();
        }
        self.history.push_back(fingerprint);

        match seen {
            Some(age) => Stability::Stable { period: age + 1 },
            None => Stability::Evolving,
        }
    }

    pub fn reset(&mut self) {
        self.history.clear();
    }
}

/// A game object and the automaton that draws it, if any.
#[derive(Debug, Clone)]
pub struct Entity {
    kind: EntityKind,
    policy: VisualPolicy,
    automaton: Option<CellGrid>,
    cadence: Cadence,
    monitor: StabilityMonitor,
    stability: Stability,
}

impl HasAutomaton for Entity {
    fn automaton(&self) -> Option<&CellGrid> {
        self.automaton.as_ref()
    }

    fn automaton_mut(&mut self) -> Option<&mut CellGrid> {
        self.automaton.as_mut()
    }
}

impl Entity {
    /// Creates an entity of `kind`, sized and seeded from `config`.
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        kind: EntityKind,
        config: &ArcadeConfig,
    ) -> Result<Self> {
        let automaton = match config.grid_settings(kind) {
            Some(spec) => Some(CellGrid::new(spec.cols, spec.rows, spec.update_rate_fps)?),
            None => None,
        };
        let cadence = Cadence::new(
            config.render_fps,
            automaton.as_ref().map_or(0, CellGrid::update_rate_fps),
        );
        let mut entity = Entity {
            kind,
            policy: VisualPolicy::for_kind(kind, config),
            automaton,
            cadence,
            monitor: StabilityMonitor::new(config.stability_window),
            stability: Stability::Evolving,
        };
        entity.reseed(rng, config);
        Ok(entity)
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn policy(&self) -> VisualPolicy {
        self.policy
    }

    pub fn cadence(&self) -> Cadence {
        self.cadence
    }

    /// Stability seen at the most recent generation.
    pub fn stability(&self) -> Stability {
        self.stability
    }

    /// Gives the entity a fresh starting population.
    pub fn reseed<R: Rng + ?Sized>(&mut self, rng: &mut R, config: &ArcadeConfig) {
        self.monitor.reset();
        self.stability = Stability::Evolving;
        let kind = self.kind;
        let grid = match self.automaton.as_mut() {
            Some(grid) => grid,
            None => return,
        };
        match kind {
            EntityKind::Player | EntityKind::Background => {
                let seed = config.radial_seed;
                seed_radial_density_with(rng, grid, seed.center_density, seed.edge_density);
            }
            EntityKind::Enemy => grid.random_seed_with(rng, DEFAULT_SEED_DENSITY),
            EntityKind::Projectile => {
                grid.clear_grid();
                maintain_density_with(
                    rng,
                    Some(grid),
                    config.maintain.target_density,
                    config.maintain.attempts_per_cell,
                );
            }
            EntityKind::Label => {}
        }
    }

    /// Replaces the automaton's contents with a catalogue pattern, centered.
    pub fn stamp(&mut self, name: &str) -> Result<()> {
        let pattern = patterns::require(name)?;
        let grid = self
            .automaton
            .as_mut()
            .ok_or_else(|| Error::NoAutomaton(format!("{:?}", self.kind)))?;
        grid.clear_grid();
        let x = (grid.cols() as i64 - pattern.cols() as i64) / 2;
        let y = (grid.rows() as i64 - pattern.rows() as i64) / 2;
        grid.set_pattern(pattern, x, y);
        self.monitor.reset();
        self.stability = Stability::Evolving;
        Ok(())
    }

    /// Runs one rendered frame for this entity.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R, config: &ArcadeConfig) {
        match self.policy {
            VisualPolicy::Inert => {}
            VisualPolicy::Flicker { target_density } => {
                maintain_density_with(
                    rng,
                    self.automaton.as_mut(),
                    target_density,
                    config.maintain.attempts_per_cell,
                );
            }
            VisualPolicy::Evolving => {
                if self.advance() {
                    apply_life_force_with(rng, self.automaton.as_mut(), config.life_force);
                }
            }
            VisualPolicy::Ambient => {
                if self.advance() && self.stability.is_stagnant() {
                    debug!("{:?} stagnated ({:?}), reseeding", self.kind, self.stability);
                    self.reseed(rng, config);
                }
            }
        }
    }

    /// Advances the automaton if the cadence says so. Returns `true` if a
    /// generation was computed.
    fn advance(&mut self) -> bool {
        if !self.cadence.tick() {
            return false;
        }
        match self.automaton.as_mut() {
            Some(grid) => {
                grid.update();
                self.stability = self.monitor.observe(grid);
                true
            }
            None => false,
        }
    }
}

/// Every entity on screen, ticked once per rendered frame.
#[derive(Debug, Clone)]
pub struct Arcade {
    config: ArcadeConfig,
    entities: Vec<Entity>,
    frame: u64,
}

impl Arcade {
    /// Default line-up: background, player, two enemies, a projectile and
    /// the score label.
    pub const ROSTER: [EntityKind; 6] = [
        EntityKind::Background,
        EntityKind::Player,
        EntityKind::Enemy,
        EntityKind::Enemy,
        EntityKind::Projectile,
        EntityKind::Label,
    ];

    pub fn new(config: ArcadeConfig) -> Result<Self> {
        Self::with_roster(config, &Self::ROSTER)
    }

    pub fn with_roster(config: ArcadeConfig, roster: &[EntityKind]) -> Result<Self> {
        let mut rng = rand::thread_rng();
        let entities = roster
            .iter()
            .map(|&kind| Entity::spawn(&mut rng, kind, &config))
            .collect::<Result<Vec<_>>>()?;
        info!(
            "arcade ready: {} entities at {} fps",
            entities.len(),
            config.render_fps
        );
        Ok(Arcade {
            config,
            entities,
            frame: 0,
        })
    }

    pub fn config(&self) -> &ArcadeConfig {
        &self.config
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    /// Frames rendered so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// First entity of `kind`.
    pub fn find(&self, kind: EntityKind) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.kind == kind)
    }

    pub fn find_mut(&mut self, kind: EntityKind) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|entity| entity.kind == kind)
    }

    /// Runs one rendered frame. Entities own their grids outright, so they
    /// are ticked in parallel.
    pub fn tick(&mut self) {
        let config = &self.config;
        self.entities
            .par_iter_mut()
            .for_each(|entity| entity.tick(&mut rand::thread_rng(), config));
        self.frame += 1;
    }

    /// Reseeds every entity.
    pub fn reseed(&mut self) {
        let mut rng = rand::thread_rng();
        for entity in &mut self.entities {
            entity.reseed(&mut rng, &self.config);
        }
    }
}

//! MapConfig - map shape definition
//!
//! Describes which coordinates make up a map and which of them are blocked,
//! stored as JSON.

use crate::coord::HexCoord;
use crate::grid::{GridError, HexGrid};
use rand::Rng;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Outline of the map
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MapShape {
    /// Every coordinate within `radius` of the origin
    Hexagonal { radius: u32 },
    /// `width` columns by `height` rows in odd-q offset layout, (0, 0) top-left
    Rectangular { width: u32, height: u32 },
}

impl MapShape {
    pub fn coords(&self) -> Vec<HexCoord> {
        match *self {
            MapShape::Hexagonal { radius } => HexCoord::ORIGIN.coords_in_radius(radius).collect(),
            MapShape::Rectangular { width, height } => (0..width as i32)
                .flat_map(|col| (0..height as i32).map(move |row| HexCoord::from_offset(col, row)))
                .collect(),
        }
    }

    /// Whether `coord` falls inside the outline
    pub fn contains(&self, coord: HexCoord) -> bool {
        match *self {
            MapShape::Hexagonal { radius } => coord.length() <= radius,
            MapShape::Rectangular { width, height } => {
                let (col, row) = coord.to_offset();
                (0..width as i32).contains(&col) && (0..height as i32).contains(&row)
            }
        }
    }

    /// The cell nearest the middle of the shape
    pub fn center(&self) -> HexCoord {
        match *self {
            MapShape::Hexagonal { .. } => HexCoord::ORIGIN,
            MapShape::Rectangular { width, height } => {
                HexCoord::from_offset(width as i32 / 2, height as i32 / 2)
            }
        }
    }
}

/// Error types for map configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Map shape has no cells: {0:?}")]
    EmptyShape(MapShape),

    #[error("Hole {0} lies outside the map")]
    HoleOutside(HexCoord),

    #[error("Blocked cell {0} lies outside the map")]
    BlockedOutside(HexCoord),
}

/// Map definition: shape, holes (no cell) and blocked cells (impassable)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    pub name: String,
    pub shape: MapShape,
    #[serde(default)]
    pub holes: Vec<HexCoord>,
    #[serde(default)]
    pub blocked: Vec<HexCoord>,
}

impl MapConfig {
    pub fn hexagonal(name: &str, radius: u32) -> Self {
        Self {
            name: name.to_string(),
            shape: MapShape::Hexagonal { radius },
            holes: Vec::new(),
            blocked: Vec::new(),
        }
    }

    pub fn rectangular(name: &str, width: u32, height: u32) -> Self {
        Self {
            name: name.to_string(),
            shape: MapShape::Rectangular { width, height },
            holes: Vec::new(),
            blocked: Vec::new(),
        }
    }

    pub fn with_holes(mut self, holes: Vec<HexCoord>) -> Self {
        self.holes = holes;
        self
    }

    pub fn with_blocked(mut self, blocked: Vec<HexCoord>) -> Self {
        self.blocked = blocked;
        self
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: MapConfig = serde_json::from_str(&content)?;
        config.validate()?;
        tracing::info!("Loaded map '{}' from {}", config.name, path.display());
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::info!("Saved map '{}' to {}", self.name, path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let empty = match self.shape {
            MapShape::Hexagonal { .. } => false,
            MapShape::Rectangular { width, height } => width == 0 || height == 0,
        };
        if empty {
            return Err(ConfigError::EmptyShape(self.shape));
        }
        if let Some(&hole) = self.holes.iter().find(|&&c| !self.shape.contains(c)) {
            return Err(ConfigError::HoleOutside(hole));
        }
        if let Some(&blocked) = self.blocked.iter().find(|&&c| !self.shape.contains(c)) {
            return Err(ConfigError::BlockedOutside(blocked));
        }
        Ok(())
    }

    /// Build the grid: every shape coordinate except the holes
    pub fn build_grid(&self) -> Result<HexGrid<HexCoord>, GridError> {
        let holes: FxHashSet<HexCoord> = self.holes.iter().copied().collect();
        let cells = self
            .shape
            .coords()
            .into_iter()
            .filter(|c| !holes.contains(c))
            .collect();
        HexGrid::new(cells)
    }

    /// Unit step cost with blocked cells impassable
    pub fn terrain_cost(&self) -> impl Fn(&HexCoord, &HexCoord) -> Option<f32> + Sync {
        let blocked: FxHashSet<HexCoord> = self.blocked.iter().copied().collect();
        move |_from: &HexCoord, to: &HexCoord| (!blocked.contains(to)).then_some(1.0)
    }

    /// Scatter blocked cells over roughly `fraction` of the map, keeping `keep_clear` open
    pub fn random_blocked<R: Rng>(&mut self, rng: &mut R, fraction: f64, keep_clear: &[HexCoord]) {
        let holes: FxHashSet<HexCoord> = self.holes.iter().copied().collect();
        let fraction = fraction.clamp(0.0, 1.0);
        self.blocked = self
            .shape
            .coords()
            .into_iter()
            .filter(|c| !holes.contains(c) && !keep_clear.contains(c))
            .filter(|_| rng.gen_bool(fraction))
            .collect();
        tracing::debug!("Scattered {} blocked cells on '{}'", self.blocked.len(), self.name);
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self::hexagonal("default", 5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_hexagonal_shape() {
        let config = MapConfig::hexagonal("hex", 3);
        let grid = config.build_grid().unwrap();
        assert_eq!(grid.len(), 37);
        assert!(config.shape.contains(HexCoord::new(3, -3)));
        assert!(!config.shape.contains(HexCoord::new(3, 1)));
    }

    #[test]
    fn test_rectangular_shape() {
        let config = MapConfig::rectangular("rect", 5, 5);
        let grid = config.build_grid().unwrap();
        assert_eq!(grid.len(), 25);
        assert_eq!(config.shape.center(), HexCoord::new(2, 1));
        assert!(grid.coords().all(|c| config.shape.contains(c)));
        assert!(!config.shape.contains(HexCoord::from_offset(5, 0)));
    }

    #[test]
    fn test_holes_are_removed() {
        let config = MapConfig::hexagonal("holey", 2).with_holes(vec![HexCoord::ORIGIN]);
        let grid = config.build_grid().unwrap();
        assert_eq!(grid.len(), 18);
        assert!(!grid.has_cell_at(HexCoord::ORIGIN));
    }

    #[test]
    fn test_validate() {
        assert!(MapConfig::default().validate().is_ok());
        assert_eq!(
            MapConfig::rectangular("flat", 4, 0).validate(),
            Err(ConfigError::EmptyShape(MapShape::Rectangular { width: 4, height: 0 }))
        );
        assert_eq!(
            MapConfig::hexagonal("h", 1).with_holes(vec![HexCoord::new(2, 0)]).validate(),
            Err(ConfigError::HoleOutside(HexCoord::new(2, 0)))
        );
        assert_eq!(
            MapConfig::hexagonal("h", 1).with_blocked(vec![HexCoord::new(0, -2)]).validate(),
            Err(ConfigError::BlockedOutside(HexCoord::new(0, -2)))
        );
    }

    #[test]
    fn test_terrain_cost() {
        let config = MapConfig::hexagonal("h", 2).with_blocked(vec![HexCoord::new(1, 0)]);
        let cost = config.terrain_cost();
        assert_eq!(cost(&HexCoord::ORIGIN, &HexCoord::new(1, 0)), None);
        assert_eq!(cost(&HexCoord::ORIGIN, &HexCoord::new(0, 1)), Some(1.0));
    }

    #[test]
    fn test_random_blocked_is_seeded() {
        let mut a = MapConfig::hexagonal("a", 6);
        let mut b = MapConfig::hexagonal("b", 6);
        let clear = [HexCoord::ORIGIN];
        a.random_blocked(&mut ChaCha8Rng::seed_from_u64(99), 0.3, &clear);
        b.random_blocked(&mut ChaCha8Rng::seed_from_u64(99), 0.3, &clear);
        assert_eq!(a.blocked, b.blocked);
        assert!(!a.blocked.is_empty());
        assert!(!a.blocked.contains(&HexCoord::ORIGIN));
        assert!(a.validate().is_ok());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = MapConfig::rectangular("rect", 3, 2).with_blocked(vec![HexCoord::new(1, 0)]);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""type":"rectangular""#));
        let back: MapConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);

        let minimal: MapConfig =
            serde_json::from_str(r#"{"name":"m","shape":{"type":"hexagonal","radius":2}}"#).unwrap();
        assert!(minimal.holes.is_empty() && minimal.blocked.is_empty());
    }

    #[test]
    fn test_load_save() {
        let path = std::env::temp_dir().join(format!("hexmap-config-{}.json", std::process::id()));
        let config = MapConfig::hexagonal("disk", 4).with_holes(vec![HexCoord::new(1, 1)]);
        config.save(&path).unwrap();
        let loaded = MapConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }
}

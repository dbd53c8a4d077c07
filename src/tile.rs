//! Tiles and terrain classification.

use crate::crop::{Crop, SeedKind};
use serde::{Deserialize, Serialize};

/// Terrain classification of a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Terrain {
    /// Open ground, walkable but not plantable.
    #[default]
    Grass,
    /// Tilled soil, walkable and plantable.
    Soil,
    /// Impassable rock.
    Rock,
    /// Impassable water.
    Water,
}

impl Terrain {
    pub fn is_walkable(&self) -> bool {
        matches!(self, Terrain::Grass | Terrain::Soil)
    }

    pub fn is_plantable(&self) -> bool {
        matches!(self, Terrain::Soil)
    }

    /// Display glyph for text rendering.
    pub fn glyph(&self) -> char {
        match self {
            Terrain::Grass => '.',
            Terrain::Soil => '=',
            Terrain::Rock => '#',
            Terrain::Water => '~',
        }
    }
}

/// One addressable grid cell, hosting at most one crop.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Tile {
    pub terrain: Terrain,
    pub crop: Option<Crop>,
}

impl Tile {
    pub fn new(terrain: Terrain) -> Self {
        Self {
            terrain,
            crop: None,
        }
    }

    /// Soil with no crop on it.
    pub fn is_plantable(&self) -> bool {
        self.terrain.is_plantable() && self.crop.is_none()
    }

    pub fn is_walkable(&self) -> bool {
        self.terrain.is_walkable()
    }

    pub fn has_crop(&self) -> bool {
        self.crop.is_some()
    }

    pub fn is_crop_watered(&self) -> bool {
        self.crop.as_ref().is_some_and(|c| c.watered)
    }

    pub fn is_crop_ready(&self) -> bool {
        self.crop.as_ref().is_some_and(|c| c.is_ready())
    }

    /// Plant a seed. Only succeeds when the tile is plantable.
    pub fn plant(&mut self, kind: SeedKind, tick: u64) -> bool {
        if !self.is_plantable() {
            return false;
        }
        self.crop = Some(Crop::new(kind, tick));
        true
    }

    /// Water the crop, if there is one that can still take water.
    pub fn water_crop(&mut self) -> bool {
        self.crop.as_mut().is_some_and(|c| c.water())
    }

    /// Detach a ready crop, returning its kind. `None` when there is no
    /// crop or the crop is not mature.
    pub fn take_harvest(&mut self) -> Option<SeedKind> {
        if !self.is_crop_ready() {
            return None;
        }
        self.crop.take().map(|c| c.kind)
    }

    /// Detach any crop with no yield, returning the kind that was removed.
    pub fn clear_crop(&mut self) -> Option<SeedKind> {
        self.crop.take().map(|c| c.kind)
    }

    /// Display glyph: the crop's if present, otherwise the terrain's.
    pub fn glyph(&self) -> char {
        match &self.crop {
            Some(crop) => crop.glyph(),
            None => self.terrain.glyph(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plantable_requires_soil_and_no_crop() {
        let mut tile = Tile::new(Terrain::Soil);
        assert!(tile.is_plantable());
        assert!(tile.plant(SeedKind::Wheat, 0));
        assert!(!tile.is_plantable());
        assert!(!tile.plant(SeedKind::Carrot, 0));

        let mut grass = Tile::new(Terrain::Grass);
        assert!(!grass.is_plantable());
        assert!(!grass.plant(SeedKind::Wheat, 0));
    }

    #[test]
    fn test_walkability_by_terrain() {
        assert!(Tile::new(Terrain::Grass).is_walkable());
        assert!(Tile::new(Terrain::Soil).is_walkable());
        assert!(!Tile::new(Terrain::Rock).is_walkable());
        assert!(!Tile::new(Terrain::Water).is_walkable());
    }

    #[test]
    fn test_harvest_only_when_ready() {
        let mut tile = Tile::new(Terrain::Soil);
        tile.plant(SeedKind::Wheat, 0);
        assert_eq!(tile.take_harvest(), None);

        tile.water_crop();
        tile.crop.as_mut().unwrap().age(3, true);
        assert!(tile.is_crop_ready());
        assert_eq!(tile.take_harvest(), Some(SeedKind::Wheat));
        assert!(tile.is_plantable());
    }

    #[test]
    fn test_clear_removes_unripe_crop() {
        let mut tile = Tile::new(Terrain::Soil);
        tile.plant(SeedKind::Pumpkin, 0);
        assert_eq!(tile.clear_crop(), Some(SeedKind::Pumpkin));
        assert!(tile.is_plantable());
        assert_eq!(tile.clear_crop(), None);
    }

    #[test]
    fn test_watering_empty_tile_is_noop() {
        let mut tile = Tile::new(Terrain::Soil);
        assert!(!tile.water_crop());
        assert!(!tile.is_crop_watered());
    }
}

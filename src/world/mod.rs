use std::{error::Error, fmt::Display};

use glam::IVec2;

/// Side length of the square tile map.
pub const MAP_SIZE: usize = 8;

/// Tile `0` is open space, everything else is a wall.
pub const EMPTY_TILE: u32 = 0;

/// The compiled-in level. The border ring must stay solid or rays
/// would escape the map.
pub const MAPDATA: [u32; MAP_SIZE * MAP_SIZE] = [
    1, 1, 1, 1, 1, 1, 1, 1, //
    1, 0, 0, 0, 0, 0, 0, 1, //
    1, 0, 0, 0, 0, 3, 0, 1, //
    1, 0, 0, 0, 0, 0, 0, 1, //
    1, 0, 2, 0, 4, 4, 0, 1, //
    1, 0, 0, 0, 4, 0, 0, 1, //
    1, 0, 3, 0, 0, 0, 0, 1, //
    1, 1, 1, 1, 1, 1, 1, 1, //
];

/// Square grid of tile IDs, row-major, immutable after construction.
#[derive(Debug, PartialEq)]
pub struct TileMap {
    tiles: [u32; MAP_SIZE * MAP_SIZE],
}

impl TileMap {
    /// Validates the tiles before accepting them. A hole in the border
    /// ring would let the DDA loop walk out of the map, so such maps
    /// are rejected here instead of failing during rendering.
    pub fn new(tiles: [u32; MAP_SIZE * MAP_SIZE]) -> Result<Self, MapError> {
        let last = MAP_SIZE as i32 - 1;
        for i in 0..MAP_SIZE as i32 {
            for cell in [
                IVec2::new(i, 0),
                IVec2::new(i, last),
                IVec2::new(0, i),
                IVec2::new(last, i),
            ] {
                if tiles[cell.y as usize * MAP_SIZE + cell.x as usize] == EMPTY_TILE {
                    return Err(MapError::OpenBorder(cell));
                }
            }
        }
        Ok(Self { tiles })
    }

    /// Returns the tile ID at the provided map coordinates or `None`
    /// if the coordinates fall outside the map.
    #[inline]
    pub fn tile_at(&self, cell: IVec2) -> Option<u32> {
        if cell.x < 0
            || cell.x >= MAP_SIZE as i32
            || cell.y < 0
            || cell.y >= MAP_SIZE as i32
        {
            return None;
        }
        Some(self.tiles[cell.y as usize * MAP_SIZE + cell.x as usize])
    }

    /// An in-bounds empty tile. Walls and out-of-map cells both block.
    #[inline]
    pub fn is_open(&self, cell: IVec2) -> bool {
        self.tile_at(cell) == Some(EMPTY_TILE)
    }

    /// Skips border validation so tests can build maps rays escape from.
    #[cfg(test)]
    pub(crate) fn unvalidated(tiles: [u32; MAP_SIZE * MAP_SIZE]) -> Self {
        Self { tiles }
    }
}

impl Default for TileMap {
    fn default() -> Self {
        // MAPDATA has a closed border, validation cannot fail
        Self { tiles: MAPDATA }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum MapError {
    OpenBorder(IVec2),
}

impl Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapError::OpenBorder(cell) => write!(
                f,
                "map border must be solid, found open tile at ({}, {})",
                cell.x, cell.y
            ),
        }
    }
}

impl Error for MapError {}

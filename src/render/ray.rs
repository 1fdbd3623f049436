use glam::{IVec2, Vec2};

use crate::player::camera::Camera;
use crate::world::{TileMap, EMPTY_TILE};

/// Which pair of grid lines the ray crossed on its last step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Crossed a vertical grid line (stepped along the x-axis).
    Vertical,
    /// Crossed a horizontal grid line (stepped along the y-axis).
    Horizontal,
}

/// Result of a successfully terminated ray march.
#[derive(Debug, Clone, Copy)]
pub struct WallHit {
    /// ID of the wall tile that stopped the ray.
    pub tile: u32,
    pub side: Side,
    /// Distance measured along the camera's forward axis, not the
    /// Euclidean ray length. Avoids the fisheye distortion when
    /// projected to a wall height.
    pub perp_dist: f32,
    /// World-space intersection point.
    pub point: Vec2,
}

/// The ray left the map without striking a wall. With a closed border
/// ring this never happens; the caller decides how loudly to complain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RayEscaped {
    pub column_index: usize,
    pub cell: IVec2,
}

#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Index of the canvas column for which the ray was cast.
    pub column_index: usize,
    /// Direction of the ray, not normalized.
    pub dir: Vec2,
    /// Distance traveled along the ray between two consecutive
    /// vertical (x) or horizontal (y) grid lines.
    pub delta_dist: Vec2,
    /// Direction of travel across the map per axis.
    pub step: IVec2,
    /// Ray origin.
    pub origin: Vec2,

    // Variables below change per each DDA step
    /// Accumulated distance to the next vertical (x) or horizontal (y)
    /// grid line.
    pub side_dist: Vec2,
    /// Coordinates of the tile the ray is currently in.
    pub next_tile: IVec2,
}

impl Ray {
    pub fn new(camera: &Camera, column_index: usize) -> Ray {
        // X-coordinate on the camera plane (range [-1.0, 1.0])
        let plane_x = 2.0 * column_index as f32 * camera.width_recip - 1.0;
        // Ray direction for the current pixel column
        let dir = camera.dir + camera.plane * plane_x;
        let origin = camera.position;
        // Length of ray from one x/y grid line to the next. A zero
        // direction component gives an infinite delta by IEEE rules,
        // which keeps that axis from ever being stepped.
        let delta_dist = Vec2::new(1.0 / dir.x.abs(), 1.0 / dir.y.abs());
        // Distance to the nearest x side
        let side_dist_x = delta_dist.x
            * if dir.x < 0.0 {
                origin.x.fract()
            } else {
                1.0 - origin.x.fract()
            };
        // Distance to the nearest y side
        let side_dist_y = delta_dist.y
            * if dir.y < 0.0 {
                origin.y.fract()
            } else {
                1.0 - origin.y.fract()
            };

        Ray {
            column_index,
            dir,
            delta_dist,
            step: IVec2::new(dir.x.signum() as i32, dir.y.signum() as i32),
            origin,

            side_dist: Vec2::new(side_dist_x, side_dist_y),
            next_tile: IVec2::new(origin.x as i32, origin.y as i32),
        }
    }

    /// Runs the DDA loop until a wall tile is struck or the ray leaves
    /// the map. Each step advances the axis whose accumulated side
    /// distance is smaller; on an exact tie the x-axis advances.
    pub fn march(mut self, map: &TileMap) -> Result<WallHit, RayEscaped> {
        loop {
            let side = if self.side_dist.y < self.side_dist.x {
                self.next_tile.y += self.step.y;
                self.side_dist.y += self.delta_dist.y;
                Side::Horizontal
            } else {
                self.next_tile.x += self.step.x;
                self.side_dist.x += self.delta_dist.x;
                Side::Vertical
            };

            let Some(tile) = map.tile_at(self.next_tile) else {
                return Err(RayEscaped {
                    column_index: self.column_index,
                    cell: self.next_tile,
                });
            };

            if tile != EMPTY_TILE {
                // The side distance was already advanced past the hit,
                // back out the last increment.
                let perp_dist = match side {
                    Side::Vertical => self.side_dist.x - self.delta_dist.x,
                    Side::Horizontal => self.side_dist.y - self.delta_dist.y,
                };
                return Ok(WallHit {
                    tile,
                    side,
                    perp_dist,
                    point: self.origin + self.dir * perp_dist,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera(position: Vec2, dir: Vec2, plane: Vec2) -> Camera {
        Camera::new(position, dir, plane, 384, 216)
    }

    /// Camera with a zero-width plane casts every column straight
    /// along `dir`.
    fn line_of_sight(position: Vec2, dir: Vec2) -> Ray {
        Ray::new(&camera(position, dir, Vec2::ZERO), 0)
    }

    #[test]
    fn horizontal_ray_hits_vertical_sides() {
        let map = TileMap::default();
        let hit = line_of_sight(Vec2::new(2.0, 2.0), Vec2::new(1.0, 0.0))
            .march(&map)
            .unwrap();

        assert_eq!(hit.tile, 3);
        assert_eq!(hit.side, Side::Vertical);
        assert!((hit.perp_dist - 3.0).abs() < 1e-6);
        assert!(hit.point.abs_diff_eq(Vec2::new(5.0, 2.0), 1e-5));
    }

    #[test]
    fn vertical_ray_hits_horizontal_sides() {
        let map = TileMap::default();
        let hit = line_of_sight(Vec2::new(2.0, 2.0), Vec2::new(0.0, 1.0))
            .march(&map)
            .unwrap();

        assert_eq!(hit.tile, 2);
        assert_eq!(hit.side, Side::Horizontal);
        assert!((hit.perp_dist - 2.0).abs() < 1e-6);
    }

    #[test]
    fn center_column_golden_distance() {
        // The center column passes through the middle of the plane, so
        // the ray is exactly the initial view direction.
        let camera = camera(
            Vec2::new(2.0, 2.0),
            Vec2::new(-1.0, 0.1),
            Vec2::new(0.0, 0.66),
        );
        let map = TileMap::default();
        let hit = Ray::new(&camera, 192).march(&map).unwrap();

        assert_eq!(hit.tile, 1);
        assert_eq!(hit.side, Side::Vertical);
        assert!((hit.perp_dist - 1.0).abs() < 1e-5);
    }

    #[test]
    fn tie_breaks_toward_x_axis() {
        // From the tile center with a diagonal ray both side distances
        // stay equal, so the first step decides which wall is struck.
        let mut tiles = [1u32; crate::world::MAP_SIZE * crate::world::MAP_SIZE];
        for y in 1..7 {
            for x in 1..7 {
                tiles[y * crate::world::MAP_SIZE + x] = EMPTY_TILE;
            }
        }
        tiles[2 * crate::world::MAP_SIZE + 3] = 2; // (3, 2)
        tiles[3 * crate::world::MAP_SIZE + 2] = 3; // (2, 3)
        let map = TileMap::new(tiles).unwrap();

        let hit = line_of_sight(Vec2::new(2.5, 2.5), Vec2::new(1.0, 1.0))
            .march(&map)
            .unwrap();

        assert_eq!(hit.tile, 2);
        assert_eq!(hit.side, Side::Vertical);
    }

    #[test]
    fn diagonal_ray_through_open_space() {
        let map = TileMap::default();
        let hit = line_of_sight(Vec2::new(2.5, 2.5), Vec2::new(1.0, 1.0))
            .march(&map)
            .unwrap();

        // Steps x, y, x, y and strikes the wall block at (4, 4).
        assert_eq!(hit.tile, 4);
        assert_eq!(hit.side, Side::Horizontal);
        assert!((hit.perp_dist - 1.5).abs() < 1e-6);
    }

    #[test]
    fn escape_is_reported_with_column_and_cell() {
        let map = TileMap::unvalidated([EMPTY_TILE; 64]);
        let escaped = line_of_sight(Vec2::new(2.0, 2.0), Vec2::new(1.0, 0.0))
            .march(&map)
            .unwrap_err();

        assert_eq!(escaped.column_index, 0);
        assert_eq!(escaped.cell, IVec2::new(8, 2));
    }

    #[test]
    fn every_column_terminates_on_a_wall() {
        let camera = camera(
            Vec2::new(2.0, 2.0),
            Vec2::new(-1.0, 0.1),
            Vec2::new(0.0, 0.66),
        );
        let map = TileMap::default();

        for column_index in 0..camera.view_width as usize {
            let hit = Ray::new(&camera, column_index).march(&map).unwrap();
            assert_ne!(hit.tile, EMPTY_TILE);
            assert!(hit.perp_dist > 0.0);
        }
    }
}

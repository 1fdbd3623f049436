pub mod ray;
pub mod shade;
#[cfg(test)]
mod tests;

use rayon::iter::{IndexedParallelIterator, ParallelIterator};
use rayon::slice::ParallelSliceMut;

use crate::player::camera::Camera;
use crate::world::TileMap;

use self::ray::Ray;
use self::shade::Rgba;

/// Lower bound for the projection distance. Keeps the wall height
/// finite if a degenerate camera ever produces a non-positive
/// perpendicular distance.
const MIN_WALL_DIST: f32 = 1e-4;

/// Draws one full frame of the player view into the canvas buffer.
///
/// The buffer is column-major: every canvas column is one contiguous
/// `view_height * 4` byte RGBA slice, so each ray owns exactly one
/// chunk and columns can be rendered independently.
pub struct FrameRenderer<'a> {
    camera: &'a Camera,
    map: &'a TileMap,

    // Frequently used values
    view_height: usize,
    f_height: f32,
}

impl<'a> FrameRenderer<'a> {
    pub fn new(camera: &'a Camera, map: &'a TileMap) -> Self {
        Self {
            camera,
            map,

            view_height: camera.view_height as usize,
            f_height: camera.f_height,
        }
    }

    /// Renders all columns on the calling thread.
    pub fn render(&self, pixel_buffer: &mut [u8]) {
        pixel_buffer
            .chunks_exact_mut(self.view_height * 4)
            .enumerate()
            .for_each(|(column_index, column)| self.render_column(column_index, column));
    }

    /// Renders columns in parallel. Columns share no state, the output
    /// is identical to [`Self::render`].
    pub fn render_par(&self, pixel_buffer: &mut [u8]) {
        pixel_buffer
            .par_chunks_exact_mut(self.view_height * 4)
            .enumerate()
            .for_each(|(column_index, column)| self.render_column(column_index, column));
    }

    fn render_column(&self, column_index: usize, column: &mut [u8]) {
        match Ray::new(self.camera, column_index).march(self.map) {
            Ok(hit) => {
                let perp_dist = hit.perp_dist.max(MIN_WALL_DIST);
                // Project the distance to a wall slice height, closer
                // walls fill more of the column.
                let line_height = (self.f_height / perp_dist) as i32;
                let half_height = self.view_height as i32 / 2;
                let last_row = self.view_height as i32 - 1;
                let draw_start = (-line_height / 2 + half_height).clamp(0, last_row) as usize;
                let draw_end = (line_height / 2 + half_height).clamp(0, last_row) as usize;

                fill_color(column, 0, draw_start, shade::CEILING_COLOR);
                fill_color(
                    column,
                    draw_start,
                    draw_end,
                    shade::wall_color(hit.tile, hit.side),
                );
                fill_color(column, draw_end, self.view_height, shade::FLOOR_COLOR);
            }
            Err(escaped) => {
                log::error!(
                    "ray escaped the map at column {} (cell ({}, {}))",
                    escaped.column_index,
                    escaped.cell.x,
                    escaped.cell.y
                );
                fill_color(column, 0, self.view_height, shade::VOID_COLOR);
            }
        }
    }
}

fn fill_color(column: &mut [u8], from: usize, to: usize, color: Rgba) {
    column[from * 4..to * 4]
        .chunks_exact_mut(4)
        .for_each(|pixel| pixel.copy_from_slice(&color));
}

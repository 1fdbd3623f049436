use glam::Vec2;

use super::shade::{self, Rgba};
use super::FrameRenderer;
use crate::player::camera::Camera;
use crate::world::TileMap;

const VIEW_WIDTH: u32 = 4;
const VIEW_HEIGHT: u32 = 8;

fn pixel(buffer: &[u8], column: usize, row: usize) -> Rgba {
    let offset = (column * VIEW_HEIGHT as usize + row) * 4;
    buffer[offset..offset + 4].try_into().unwrap()
}

fn render(camera: &Camera, map: &TileMap) -> Vec<u8> {
    let mut buffer = vec![0; (VIEW_WIDTH * VIEW_HEIGHT * 4) as usize];
    FrameRenderer::new(camera, map).render(&mut buffer);
    buffer
}

#[test]
fn column_has_ceiling_wall_floor_bands() {
    // The center column looks straight at the west wall from 1.5 tiles
    // away: line height 5, wall rows 2..6.
    let camera = Camera::new(
        Vec2::new(2.5, 2.0),
        Vec2::new(-1.0, 0.0),
        Vec2::new(0.0, 0.66),
        VIEW_WIDTH,
        VIEW_HEIGHT,
    );
    let buffer = render(&camera, &TileMap::default());

    assert_eq!(pixel(&buffer, 2, 0), shade::CEILING_COLOR);
    assert_eq!(pixel(&buffer, 2, 1), shade::CEILING_COLOR);
    for row in 2..6 {
        assert_eq!(pixel(&buffer, 2, row), [255, 0, 0, 255]);
    }
    assert_eq!(pixel(&buffer, 2, 6), shade::FLOOR_COLOR);
    assert_eq!(pixel(&buffer, 2, 7), shade::FLOOR_COLOR);
}

#[test]
fn adjacent_wall_fills_whole_column() {
    let camera = Camera::new(
        Vec2::new(1.5, 2.0),
        Vec2::new(-1.0, 0.0),
        Vec2::new(0.0, 0.66),
        VIEW_WIDTH,
        VIEW_HEIGHT,
    );
    let buffer = render(&camera, &TileMap::default());

    // Distance 0.5 projects past the column, only the clamped last row
    // stays floor.
    for row in 0..7 {
        assert_eq!(pixel(&buffer, 2, row), [255, 0, 0, 255]);
    }
    assert_eq!(pixel(&buffer, 2, 7), shade::FLOOR_COLOR);
}

#[test]
fn parallel_render_matches_serial() {
    let camera = Camera::new(
        Vec2::new(2.0, 2.0),
        Vec2::new(-1.0, 0.1),
        Vec2::new(0.0, 0.66),
        VIEW_WIDTH,
        VIEW_HEIGHT,
    );
    let map = TileMap::default();

    let serial = render(&camera, &map);
    let mut parallel = vec![0; serial.len()];
    FrameRenderer::new(&camera, &map).render_par(&mut parallel);

    assert_eq!(serial, parallel);
}

#[test]
fn escaped_rays_render_as_void() {
    let camera = Camera::new(
        Vec2::new(2.0, 2.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(0.0, 0.66),
        VIEW_WIDTH,
        VIEW_HEIGHT,
    );
    let map = TileMap::unvalidated([crate::world::EMPTY_TILE; 64]);
    let buffer = render(&camera, &map);

    for column in 0..VIEW_WIDTH as usize {
        for row in 0..VIEW_HEIGHT as usize {
            assert_eq!(pixel(&buffer, column, row), shade::VOID_COLOR);
        }
    }
}

use super::ray::Side;

pub type Rgba = [u8; 4];

pub const CEILING_COLOR: Rgba = [32, 32, 32, 255];
pub const FLOOR_COLOR: Rgba = [80, 80, 80, 255];
/// Drawn where a ray escaped the map and there is no wall to show.
pub const VOID_COLOR: Rgba = [0, 0, 0, 255];

/// Used for tile IDs without an assigned color so the mapping is total.
const FALLBACK_COLOR: Rgba = [200, 200, 200, 255];

/// Walls hit on their horizontal side are darkened to fake a second
/// light angle.
const SIDE_SHADE: f32 = 0.75;

/// Maps a wall hit to its flat color.
pub fn wall_color(tile: u32, side: Side) -> Rgba {
    let base = match tile {
        1 => [255, 0, 0, 255],
        2 => [0, 255, 0, 255],
        3 => [255, 0, 0, 255],
        4 => [255, 0, 255, 255],
        _ => FALLBACK_COLOR,
    };
    match side {
        Side::Vertical => base,
        Side::Horizontal => darken(base),
    }
}

fn darken(color: Rgba) -> Rgba {
    let [r, g, b, a] = color;
    [
        (r as f32 * SIDE_SHADE) as u8,
        (g as f32 * SIDE_SHADE) as u8,
        (b as f32 * SIDE_SHADE) as u8,
        a,
    ]
}

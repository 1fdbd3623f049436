use glam::Vec2;

/// Viewpoint state read by the renderer every frame.
///
/// Position is in map units where each tile is `1.0` wide. The
/// direction and plane vectors are not normalized: the plane magnitude
/// encodes half of the horizontal field of view.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Position on the map. Whole part selects the tile, fraction is
    /// the offset inside it.
    pub(crate) position: Vec2,
    /// Facing vector.
    pub(crate) dir: Vec2,
    /// Camera plane, perpendicular to `dir`.
    pub(crate) plane: Vec2,
    /// Width of the output canvas in pixels.
    pub(crate) view_width: u32,
    /// Height of the output canvas in pixels.
    pub(crate) view_height: u32,

    // Cached per-frame values
    pub(crate) width_recip: f32,
    pub(crate) f_height: f32,
}

impl Camera {
    pub fn new(
        position: Vec2,
        dir: Vec2,
        plane: Vec2,
        view_width: u32,
        view_height: u32,
    ) -> Self {
        Self {
            position,
            dir,
            plane,
            view_width,
            view_height,

            width_recip: (view_width as f32).recip(),
            f_height: view_height as f32,
        }
    }

    /// Rotates the facing and plane vectors around the origin by the
    /// same angle, keeping the field of view attached to the view
    /// direction.
    pub fn rotate(&mut self, angle: f32) {
        let rotation = Vec2::from_angle(angle);
        self.dir = rotation.rotate(self.dir);
        self.plane = rotation.rotate(self.plane);
    }

    /// Moves along the facing vector. Backward movement is a negative
    /// distance. No collision handling here, callers clamp the step.
    pub fn advance(&mut self, distance: f32) {
        self.position += self.dir * distance;
    }

    /// Applies an already clamped movement step.
    pub fn translate(&mut self, offset: Vec2) {
        self.position += offset;
    }

    /// The step `advance(distance)` would take, without applying it.
    pub fn displacement(&self, distance: f32) -> Vec2 {
        self.dir * distance
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn dir(&self) -> Vec2 {
        self.dir
    }

    pub fn plane(&self) -> Vec2 {
        self.plane
    }
}

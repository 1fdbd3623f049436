pub mod camera;

use glam::{IVec2, Vec2};

use crate::control::GameInput;
use crate::world::TileMap;

use self::camera::Camera;

/// Radians per second while a turn key is held.
const ROTATION_SPEED: f32 = 3.0;
/// Tiles per second while a move key is held.
const MOVEMENT_SPEED: f32 = 3.0;

pub struct Player {
    camera: Camera,

    input_state: PlayerInputState,
}

impl Player {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,

            input_state: PlayerInputState::default(),
        }
    }

    /// Advances the simulation by `delta` seconds worth of the
    /// currently held inputs.
    pub fn update(&mut self, map: &TileMap, delta: f32) {
        let turn = self.input_state.rotation();
        if turn != 0.0 {
            self.camera.rotate(ROTATION_SPEED * turn * delta);
        }

        let movement = self.input_state.movement();
        if movement != 0.0 {
            let step = self.camera.displacement(MOVEMENT_SPEED * movement * delta);
            self.apply_movement(map, step);
        }
    }

    /// Movement clamped per axis: an axis whose destination cell is a
    /// wall or outside the map contributes nothing, the other axis
    /// still applies so the player slides along walls. Keeps the
    /// position inside the walled interior which the ray marcher
    /// relies on.
    fn apply_movement(&mut self, map: &TileMap, step: Vec2) {
        let position = self.camera.position();

        if map.is_open(to_cell(position + Vec2::new(step.x, 0.0))) {
            self.camera.translate(Vec2::new(step.x, 0.0));
        }
        let position = self.camera.position();
        if map.is_open(to_cell(position + Vec2::new(0.0, step.y))) {
            self.camera.translate(Vec2::new(0.0, step.y));
        }
    }

    pub fn process_input(&mut self, input: GameInput, is_pressed: bool) {
        match input {
            GameInput::MoveForward => self.input_state.forward = is_pressed,
            GameInput::MoveBackward => self.input_state.backward = is_pressed,
            GameInput::RotateLeft => self.input_state.turn_left = is_pressed,
            GameInput::RotateRight => self.input_state.turn_right = is_pressed,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }
}

#[inline]
fn to_cell(position: Vec2) -> IVec2 {
    position.floor().as_ivec2()
}

#[derive(Debug, Default)]
pub struct PlayerInputState {
    pub forward: bool,
    pub backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
}

impl PlayerInputState {
    /// Forward/backward input as -1, 0 or 1.
    pub fn movement(&self) -> f32 {
        (if self.forward { 1.0 } else { 0.0 }) - (if self.backward { 1.0 } else { 0.0 })
    }

    /// Turning input as -1, 0 or 1; left turns are positive angles.
    pub fn rotation(&self) -> f32 {
        (if self.turn_left { 1.0 } else { 0.0 }) - (if self.turn_right { 1.0 } else { 0.0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(position: Vec2, dir: Vec2) -> Player {
        Player::new(Camera::new(position, dir, Vec2::new(0.0, 0.66), 384, 216))
    }

    #[test]
    fn held_forward_key_moves_along_dir() {
        let mut player = player(Vec2::new(2.0, 2.0), Vec2::new(-1.0, 0.1));
        player.process_input(GameInput::MoveForward, true);

        player.update(&TileMap::default(), 0.016);

        let expected = Vec2::new(2.0, 2.0) + Vec2::new(-1.0, 0.1) * (MOVEMENT_SPEED * 0.016);
        assert!(player.camera().position().abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn wall_blocks_movement() {
        let mut player = player(Vec2::new(1.05, 2.0), Vec2::new(-1.0, 0.0));
        player.process_input(GameInput::MoveForward, true);

        player.update(&TileMap::default(), 0.1);

        // Destination cell (0, 2) is the west border wall
        assert!(player
            .camera()
            .position()
            .abs_diff_eq(Vec2::new(1.05, 2.0), 1e-6));
    }

    #[test]
    fn blocked_axis_still_slides_on_the_other() {
        let mut player = player(Vec2::new(1.05, 2.0), Vec2::new(-1.0, 0.5));
        player.process_input(GameInput::MoveForward, true);

        player.update(&TileMap::default(), 0.1);

        let position = player.camera().position();
        assert!((position.x - 1.05).abs() < 1e-6);
        assert!(position.y > 2.0);
    }

    #[test]
    fn release_stops_movement() {
        let mut player = player(Vec2::new(2.0, 2.0), Vec2::new(-1.0, 0.1));
        player.process_input(GameInput::MoveForward, true);
        player.process_input(GameInput::MoveForward, false);

        player.update(&TileMap::default(), 0.016);

        assert!(player
            .camera()
            .position()
            .abs_diff_eq(Vec2::new(2.0, 2.0), 1e-6));
    }

    #[test]
    fn opposite_inputs_cancel() {
        let mut player = player(Vec2::new(2.0, 2.0), Vec2::new(-1.0, 0.1));
        player.process_input(GameInput::MoveForward, true);
        player.process_input(GameInput::MoveBackward, true);
        player.process_input(GameInput::RotateLeft, true);
        player.process_input(GameInput::RotateRight, true);

        let dir = player.camera().dir();
        player.update(&TileMap::default(), 0.016);

        assert!(player
            .camera()
            .position()
            .abs_diff_eq(Vec2::new(2.0, 2.0), 1e-6));
        assert!(player.camera().dir().abs_diff_eq(dir, 1e-6));
    }
}

use hashbrown::HashMap;
use winit::keyboard::KeyCode;

/// Commands the player understands, decoupled from physical keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameInput {
    MoveForward,
    MoveBackward,
    RotateLeft,
    RotateRight,
}

pub struct ControllerSettings {
    keybindings: HashMap<KeyCode, Vec<GameInput>>,
}

impl ControllerSettings {
    pub fn init() -> Self {
        let mut keybindings: HashMap<KeyCode, Vec<GameInput>> = HashMap::new();
        for (input, keys) in [
            (GameInput::MoveForward, [KeyCode::ArrowUp, KeyCode::KeyW]),
            (GameInput::MoveBackward, [KeyCode::ArrowDown, KeyCode::KeyS]),
            (GameInput::RotateLeft, [KeyCode::ArrowLeft, KeyCode::KeyA]),
            (GameInput::RotateRight, [KeyCode::ArrowRight, KeyCode::KeyD]),
        ] {
            for key in keys {
                keybindings.entry(key).or_default().push(input);
            }
        }

        Self { keybindings }
    }

    pub fn get_input_binding(&self, key: &KeyCode) -> Option<&Vec<GameInput>> {
        self.keybindings.get(key)
    }
}

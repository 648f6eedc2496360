//! Input management system
//!
//! Window backends feed key and mouse events into an [`InputManager`]. Once
//! per frame the manager is drained into an [`InputSnapshot`], and the frame
//! loop keeps the current and previous snapshots in an [`InputState`] so
//! edge-triggered actions such as jumping can be detected.

use std::collections::HashSet;

use bitflags::bitflags;

use crate::foundation::math::Vec2;

bitflags! {
    /// Movement actions held during a frame
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MovementKeys: u8 {
        /// Move along the camera's forward direction
        const FORWARD = 1 << 0;
        /// Move against the camera's forward direction
        const BACK = 1 << 1;
        /// Strafe left
        const LEFT = 1 << 2;
        /// Strafe right
        const RIGHT = 1 << 3;
        /// Jump
        const JUMP = 1 << 4;
    }
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// W key
    W,
    /// A key
    A,
    /// S key
    S,
    /// D key
    D,
    /// Space key
    Space,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

/// Mapping from physical keys to movement actions
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: Vec<(KeyCode, MovementKeys)>,
}

impl KeyBindings {
    /// Bindings with no keys mapped
    pub fn empty() -> Self {
        Self { bindings: Vec::new() }
    }

    /// Map `key` to `action`
    pub fn bind(mut self, key: KeyCode, action: MovementKeys) -> Self {
        self.bindings.push((key, action));
        self
    }

    /// Actions triggered by a set of held keys
    pub fn resolve<'a>(&self, held: impl IntoIterator<Item = &'a KeyCode>) -> MovementKeys {
        held.into_iter()
            .flat_map(|key| {
                self.bindings
                    .iter()
                    .filter(move |(bound, _)| bound == key)
                    .map(|(_, action)| *action)
            })
            .fold(MovementKeys::empty(), |acc, action| acc | action)
    }
}

impl Default for KeyBindings {
    /// WASD and arrow keys, Space to jump
    fn default() -> Self {
        Self::empty()
            .bind(KeyCode::W, MovementKeys::FORWARD)
            .bind(KeyCode::Up, MovementKeys::FORWARD)
            .bind(KeyCode::S, MovementKeys::BACK)
            .bind(KeyCode::Down, MovementKeys::BACK)
            .bind(KeyCode::A, MovementKeys::LEFT)
            .bind(KeyCode::Left, MovementKeys::LEFT)
            .bind(KeyCode::D, MovementKeys::RIGHT)
            .bind(KeyCode::Right, MovementKeys::RIGHT)
            .bind(KeyCode::Space, MovementKeys::JUMP)
    }
}

/// Input for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputSnapshot {
    /// Movement actions held this frame
    pub keys: MovementKeys,
    /// Mouse movement since the previous frame
    pub mouse_delta: Vec2,
    /// Whether the user asked to quit
    pub exit_requested: bool,
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self {
            keys: MovementKeys::empty(),
            mouse_delta: Vec2::zeros(),
            exit_requested: false,
        }
    }
}

impl InputSnapshot {
    /// Snapshot with only movement keys held
    pub fn with_keys(keys: MovementKeys) -> Self {
        Self {
            keys,
            ..Self::default()
        }
    }
}

/// Current and previous frame input
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputState {
    /// This frame
    pub current: InputSnapshot,
    /// Last frame
    pub previous: InputSnapshot,
}

impl InputState {
    /// Build from explicit snapshots
    pub fn new(current: InputSnapshot, previous: InputSnapshot) -> Self {
        Self { current, previous }
    }

    /// Shift the current snapshot into `previous` and store a new one
    pub fn advance(&mut self, next: InputSnapshot) {
        self.previous = self.current;
        self.current = next;
    }

    /// Whether all of `keys` are held this frame
    pub fn held(&self, keys: MovementKeys) -> bool {
        self.current.keys.contains(keys)
    }

    /// Whether `keys` went down this frame
    pub fn just_pressed(&self, keys: MovementKeys) -> bool {
        self.current.keys.contains(keys) && !self.previous.keys.contains(keys)
    }
}

/// Input manager
///
/// Accumulates raw events between frames.
#[derive(Debug)]
pub struct InputManager {
    bindings: KeyBindings,
    held: HashSet<KeyCode>,
    last_mouse: Option<Vec2>,
    mouse_delta: Vec2,
    exit_requested: bool,
}

impl InputManager {
    /// Create a new input manager with the default bindings
    pub fn new() -> Self {
        Self::with_bindings(KeyBindings::default())
    }

    /// Create an input manager with custom bindings
    pub fn with_bindings(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            held: HashSet::new(),
            last_mouse: None,
            mouse_delta: Vec2::zeros(),
            exit_requested: false,
        }
    }

    /// Handle key input
    pub fn handle_key_input(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            if key == KeyCode::Escape {
                self.exit_requested = true;
            }
            self.held.insert(key);
        } else {
            self.held.remove(&key);
        }
    }

    /// Handle an absolute cursor position
    ///
    /// The first position only establishes the reference point.
    #[allow(clippy::cast_possible_truncation)]
    pub fn handle_mouse_move(&mut self, x: f64, y: f64) {
        let position = Vec2::new(x as f32, y as f32);
        if let Some(last) = self.last_mouse {
            self.mouse_delta += position - last;
        }
        self.last_mouse = Some(position);
    }

    /// Whether a key is currently down
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Drain the frame's input into a snapshot
    pub fn snapshot(&mut self) -> InputSnapshot {
        let snapshot = InputSnapshot {
            keys: self.bindings.resolve(&self.held),
            mouse_delta: self.mouse_delta,
            exit_requested: self.exit_requested,
        };
        self.mouse_delta = Vec2::zeros();
        snapshot
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

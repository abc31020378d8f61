use macroquad::prelude::*;

use crate::player::PlayerInput;

/// Direction keys held this frame. The four navigation keys double as
/// diagonals.
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectionKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub home: bool,
    pub end: bool,
    pub page_up: bool,
    pub page_down: bool,
}

impl DirectionKeys {
    pub fn poll() -> Self {
        Self {
            left: is_key_down(KeyCode::Left) || is_key_down(KeyCode::A),
            right: is_key_down(KeyCode::Right) || is_key_down(KeyCode::D),
            up: is_key_down(KeyCode::Up) || is_key_down(KeyCode::W),
            down: is_key_down(KeyCode::Down) || is_key_down(KeyCode::S),
            home: is_key_down(KeyCode::Home),
            end: is_key_down(KeyCode::End),
            page_up: is_key_down(KeyCode::PageUp),
            page_down: is_key_down(KeyCode::PageDown),
        }
    }

    /// Stick vector in world axes. Later keys override earlier ones per axis.
    pub fn steer(&self) -> Vec2 {
        let mut v = Vec2::ZERO;
        if self.left {
            v.x = -1.0;
        }
        if self.right {
            v.x = 1.0;
        }
        if self.up {
            v.y = 1.0;
        }
        if self.down {
            v.y = -1.0;
        }
        if self.home {
            v = vec2(-1.0, 1.0);
        }
        if self.end {
            v = vec2(-1.0, -1.0);
        }
        if self.page_down {
            v = vec2(1.0, -1.0);
        }
        if self.page_up {
            v = vec2(1.0, 1.0);
        }
        v
    }
}

/// Map a pointer position to a stick vector: screen centre is neutral, the
/// edges are full deflection, y flipped to world axes.
pub fn pointer_steer(pointer: Vec2, screen: Vec2) -> Vec2 {
    if screen.x <= 0.0 || screen.y <= 0.0 {
        return Vec2::ZERO;
    }
    let uv = pointer / screen * 2.0 - Vec2::ONE;
    vec2(uv.x.clamp(-1.0, 1.0), (-uv.y).clamp(-1.0, 1.0))
}

/// Sample this frame's controls. Keys win over the pointer, which only
/// steers while the left button is held.
pub fn sample() -> PlayerInput {
    let mut steer = DirectionKeys::poll().steer();
    if steer == Vec2::ZERO && is_mouse_button_down(MouseButton::Left) {
        steer = pointer_steer(Vec2::from(mouse_position()), vec2(screen_width(), screen_height()));
    }
    PlayerInput {
        steer,
        sonar: is_key_pressed(KeyCode::Space) || is_mouse_button_pressed(MouseButton::Right),
    }
}

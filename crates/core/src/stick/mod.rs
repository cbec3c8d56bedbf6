use serde::{Deserialize, Serialize};

/// Two component vector used for stick positions and sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Visual role of a stick. The palette turns a role into a concrete colour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorRole {
    #[default]
    Idle,
    Processing,
    Selected,
    TemporaryHighlight,
    Placed,
}

/// Rectangle owned by a stick.
#[derive(Debug, Clone, PartialEq)]
pub struct StickView {
    pub position: Vec2,
    pub size: Vec2,
    pub color: ColorRole,
}

/// A single sortable bar: a value plus the rectangle that draws it.
#[derive(Debug, Clone, PartialEq)]
pub struct Stick {
    pub value: u32,
    pub view: StickView,
}

impl Stick {
    pub fn new(value: u32, size: Vec2) -> Self {
        Self {
            value,
            view: StickView {
                position: Vec2::default(),
                size,
                color: ColorRole::Idle,
            },
        }
    }

    pub fn paint(&mut self, role: ColorRole) {
        self.view.color = role;
    }

    pub fn color(&self) -> ColorRole {
        self.view.color
    }
}

//! Conversion from world coordinates into the square map display space.

/// Side length of the square world the positions are reported in.
pub const WORLD_DIMENSION: f64 = 16000.0;
/// Side length of the square display the positions are drawn onto.
pub const DISPLAY_DIMENSION: f64 = 400.0;

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WorldPosition {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DisplayPosition {
    pub x: f64,
    pub y: f64,
}

impl WorldPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The world Y axis points up, the display Y axis points down.
    pub fn to_display(self) -> DisplayPosition {
        DisplayPosition {
            x: (self.x / WORLD_DIMENSION) * DISPLAY_DIMENSION,
            y: DISPLAY_DIMENSION - (self.y / WORLD_DIMENSION) * DISPLAY_DIMENSION,
        }
    }
}

impl From<WorldPosition> for DisplayPosition {
    fn from(value: WorldPosition) -> Self {
        value.to_display()
    }
}

//! Arena geometry and the brick row table
//!
//! Coordinates are logical pixels. x grows rightward from the inner face of
//! the left wall, y grows upward from the bottom of the house.

use core::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Brick colors, bottom row to top row in the classic layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BrickColor {
    Blue,
    Green,
    Yellow,
    Orange,
    Brown,
    Red,
}

impl BrickColor {
    /// Sprite resource a renderer draws this brick with
    pub fn sprite(&self) -> &'static str {
        match self {
            BrickColor::Blue => "Sprites/BreakoutScreenElements/brickBlue",
            BrickColor::Green => "Sprites/BreakoutScreenElements/brickGreen",
            BrickColor::Yellow => "Sprites/BreakoutScreenElements/brickYellow",
            BrickColor::Orange => "Sprites/BreakoutScreenElements/brickOrange",
            BrickColor::Brown => "Sprites/BreakoutScreenElements/brickBrown",
            BrickColor::Red => "Sprites/BreakoutScreenElements/brickRed",
        }
    }

    pub fn rgb(&self) -> [u8; 3] {
        match self {
            BrickColor::Blue => [0x00, 0x00, 0xFF],
            BrickColor::Green => [0x00, 0xFF, 0x00],
            // Middle rows share one tint and differ only by sprite
            BrickColor::Yellow | BrickColor::Orange | BrickColor::Brown => [0x99, 0x99, 0x00],
            BrickColor::Red => [0xFF, 0x00, 0x00],
        }
    }
}

/// One entry of the row table: what a brick in this row is worth and how it looks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrickRow {
    pub value: u32,
    pub color: BrickColor,
}

impl BrickRow {
    pub const fn new(value: u32, color: BrickColor) -> Self {
        Self { value, color }
    }
}

/// Row table, lowest row first
pub const DEFAULT_ROWS: [BrickRow; NUM_BRICK_ROWS] = [
    BrickRow::new(1, BrickColor::Blue),
    BrickRow::new(1, BrickColor::Green),
    BrickRow::new(4, BrickColor::Yellow),
    BrickRow::new(4, BrickColor::Orange),
    BrickRow::new(7, BrickColor::Brown),
    BrickRow::new(7, BrickColor::Red),
];

/// Reasons a layout cannot be simulated
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    NonPositiveSize { what: &'static str, value: i32 },
    EmptyGrid { rows: usize, columns: usize },
    GridTooWide { grid_width: i32, arena_width: i32 },
    GridAboveTopWall { grid_top: i32, top_wall_y: i32 },
    PaddleTooWide { paddle_width: i32, arena_width: i32 },
    BricksOverlapPaddle { bricks_bottom: i32, paddle_top: i32 },
    BallStartOutside { x: f32, y: f32 },
    BadStartAngle { angle: f32 },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveSize { what, value } => {
                write!(f, "{what} must be positive, got {value}")
            }
            Self::EmptyGrid { rows, columns } => {
                write!(f, "brick grid is empty ({rows} rows x {columns} columns)")
            }
            Self::GridTooWide {
                grid_width,
                arena_width,
            } => write!(
                f,
                "brick grid is {grid_width} wide but the arena is only {arena_width}"
            ),
            Self::GridAboveTopWall {
                grid_top,
                top_wall_y,
            } => write!(
                f,
                "brick grid reaches y={grid_top}, past the top wall at y={top_wall_y}"
            ),
            Self::PaddleTooWide {
                paddle_width,
                arena_width,
            } => write!(
                f,
                "paddle is {paddle_width} wide but the arena is only {arena_width}"
            ),
            Self::BricksOverlapPaddle {
                bricks_bottom,
                paddle_top,
            } => write!(
                f,
                "bricks start at y={bricks_bottom}, not above the paddle top at y={paddle_top}"
            ),
            Self::BallStartOutside { x, y } => {
                write!(f, "ball start ({x}, {y}) is not between the paddle and the bricks")
            }
            Self::BadStartAngle { angle } => {
                write!(f, "ball start angle {angle} must be finite and not axis-aligned")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

/// Fixed playfield geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub width: i32,
    pub height: i32,
    pub paddle_width: i32,
    pub paddle_height: i32,
    pub paddle_y: i32,
    pub brick_width: i32,
    pub brick_height: i32,
    pub bricks_bottom: i32,
    pub columns: usize,
    /// Row table, lowest row first. Its length is the number of rows.
    pub rows: Vec<BrickRow>,
    pub ball_start: Vec2,
    /// Radians, counterclockwise from +x
    pub ball_start_angle: f32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_y: PADDLE_Y,
            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
            bricks_bottom: BRICKS_BOTTOM_Y,
            columns: BRICKS_PER_ROW,
            rows: DEFAULT_ROWS.to_vec(),
            ball_start: Vec2::new(BALL_START_X, BALL_START_Y),
            ball_start_angle: BALL_START_ANGLE,
        }
    }
}

impl Layout {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn brick_count(&self) -> usize {
        self.rows.len() * self.columns
    }

    pub fn top_wall_y(&self) -> i32 {
        self.height - 1
    }

    pub fn right_limit(&self) -> i32 {
        self.width - 1
    }

    /// Range the paddle's left edge can travel over
    pub fn paddle_travel_range(&self) -> i32 {
        self.width - self.paddle_width
    }

    /// The row directly above the paddle, where paddle contacts happen
    pub fn paddle_contact_y(&self) -> i32 {
        self.paddle_y + self.paddle_height
    }

    pub fn grid_width(&self) -> i32 {
        self.columns as i32 * self.brick_width
    }

    /// First y above the top brick row
    pub fn grid_top(&self) -> i32 {
        self.bricks_bottom + self.rows.len() as i32 * self.brick_height
    }

    /// Row whose vertical span contains `y`
    pub fn row_at(&self, y: i32) -> Option<usize> {
        if y < self.bricks_bottom || y >= self.grid_top() {
            return None;
        }
        Some(((y - self.bricks_bottom) / self.brick_height) as usize)
    }

    /// Column whose horizontal span contains `x`
    pub fn column_at(&self, x: i32) -> Option<usize> {
        if x < 0 || x >= self.grid_width() {
            return None;
        }
        Some((x / self.brick_width) as usize)
    }

    /// Left and right edge x of a brick column (both inclusive)
    pub fn column_edges(&self, column: usize) -> (i32, i32) {
        let left = column as i32 * self.brick_width;
        (left, left + self.brick_width - 1)
    }

    /// Arena diagonal, the furthest straight run inside the walls
    pub fn diagonal(&self) -> f32 {
        Vec2::new(self.width as f32, self.height as f32).length()
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        for (what, value) in [
            ("arena width", self.width),
            ("arena height", self.height),
            ("paddle width", self.paddle_width),
            ("paddle height", self.paddle_height),
            ("brick width", self.brick_width),
            ("brick height", self.brick_height),
        ] {
            if value <= 0 {
                return Err(LayoutError::NonPositiveSize { what, value });
            }
        }
        if self.paddle_y < 0 {
            return Err(LayoutError::NonPositiveSize {
                what: "paddle y",
                value: self.paddle_y,
            });
        }
        if self.rows.is_empty() || self.columns == 0 {
            return Err(LayoutError::EmptyGrid {
                rows: self.rows.len(),
                columns: self.columns,
            });
        }
        if self.grid_width() > self.width {
            return Err(LayoutError::GridTooWide {
                grid_width: self.grid_width(),
                arena_width: self.width,
            });
        }
        if self.grid_top() > self.top_wall_y() {
            return Err(LayoutError::GridAboveTopWall {
                grid_top: self.grid_top(),
                top_wall_y: self.top_wall_y(),
            });
        }
        if self.paddle_width > self.width {
            return Err(LayoutError::PaddleTooWide {
                paddle_width: self.paddle_width,
                arena_width: self.width,
            });
        }
        if self.bricks_bottom <= self.paddle_contact_y() {
            return Err(LayoutError::BricksOverlapPaddle {
                bricks_bottom: self.bricks_bottom,
                paddle_top: self.paddle_contact_y(),
            });
        }

        let start = self.ball_start;
        let inside_x = start.x >= 0.0 && start.x <= self.right_limit() as f32;
        let inside_y = start.y > self.paddle_contact_y() as f32 && start.y < self.bricks_bottom as f32;
        if !(start.is_finite() && inside_x && inside_y) {
            return Err(LayoutError::BallStartOutside {
                x: start.x,
                y: start.y,
            });
        }

        let angle = self.ball_start_angle;
        if !angle.is_finite() || angle.cos().abs() < 1e-3 || angle.sin().abs() < 1e-3 {
            return Err(LayoutError::BadStartAngle { angle });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_is_valid() {
        let layout = Layout::default();
        assert_eq!(layout.validate(), Ok(()));
        assert_eq!(layout.width, 90);
        assert_eq!(layout.height, 51);
        assert_eq!(layout.brick_count(), 108);
        assert_eq!(layout.paddle_travel_range(), 80);
    }

    #[test]
    fn test_row_and_column_lookup() {
        let layout = Layout::default();
        assert_eq!(layout.row_at(33), None);
        assert_eq!(layout.row_at(34), Some(0));
        assert_eq!(layout.row_at(35), Some(0));
        assert_eq!(layout.row_at(36), Some(1));
        assert_eq!(layout.row_at(45), Some(5));
        assert_eq!(layout.row_at(46), None);

        assert_eq!(layout.column_at(-1), None);
        assert_eq!(layout.column_at(0), Some(0));
        assert_eq!(layout.column_at(4), Some(0));
        assert_eq!(layout.column_at(5), Some(1));
        assert_eq!(layout.column_at(89), Some(17));
        assert_eq!(layout.column_at(90), None);
        assert_eq!(layout.column_edges(1), (5, 9));
    }

    #[test]
    fn test_row_table_is_ordered_by_value() {
        let values: Vec<u32> = DEFAULT_ROWS.iter().map(|r| r.value).collect();
        assert_eq!(values, vec![1, 1, 4, 4, 7, 7]);
        assert_eq!(DEFAULT_ROWS[0].color, BrickColor::Blue);
        assert_eq!(DEFAULT_ROWS[5].color, BrickColor::Red);
        assert!(BrickColor::Red.sprite().ends_with("brickRed"));
        assert_eq!(BrickColor::Blue.rgb(), [0x00, 0x00, 0xFF]);
    }

    #[test]
    fn test_middle_rows_share_a_tint() {
        assert_eq!(BrickColor::Yellow.rgb(), [0x99, 0x99, 0x00]);
        assert_eq!(BrickColor::Orange.rgb(), BrickColor::Yellow.rgb());
        assert_eq!(BrickColor::Brown.rgb(), BrickColor::Yellow.rgb());
        assert_ne!(BrickColor::Orange.sprite(), BrickColor::Brown.sprite());
    }

    #[test]
    fn test_validate_rejects_bad_geometry() {
        let mut layout = Layout::default();
        layout.columns = 19;
        assert!(matches!(
            layout.validate(),
            Err(LayoutError::GridTooWide { grid_width: 95, .. })
        ));

        let mut layout = Layout::default();
        layout.rows.clear();
        assert!(matches!(layout.validate(), Err(LayoutError::EmptyGrid { .. })));

        let mut layout = Layout::default();
        layout.bricks_bottom = 2;
        assert!(matches!(
            layout.validate(),
            Err(LayoutError::BricksOverlapPaddle { .. })
        ));

        let mut layout = Layout::default();
        layout.ball_start = Vec2::new(45.0, 40.0);
        assert!(matches!(
            layout.validate(),
            Err(LayoutError::BallStartOutside { .. })
        ));

        let mut layout = Layout::default();
        layout.ball_start_angle = std::f32::consts::FRAC_PI_2;
        assert!(matches!(
            layout.validate(),
            Err(LayoutError::BadStartAngle { .. })
        ));

        let mut layout = Layout::default();
        layout.brick_width = 0;
        assert!(matches!(
            layout.validate(),
            Err(LayoutError::NonPositiveSize { what: "brick width", .. })
        ));
    }

    #[test]
    fn test_error_messages_name_the_values() {
        let err = LayoutError::GridTooWide {
            grid_width: 95,
            arena_width: 90,
        };
        assert_eq!(
            err.to_string(),
            "brick grid is 95 wide but the arena is only 90"
        );
    }
}

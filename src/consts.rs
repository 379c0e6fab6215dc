//! Assorted constants & hard-coded configuration
use crate::grid::Cell;
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Time between movements of the snake
pub(crate) const TICK_PERIOD: Duration = Duration::from_millis(150);

/// Width & height of the (square) playing field in canvas units
pub(crate) const CANVAS_SIZE: u16 = 400;

/// Width & height of a single cell in canvas units
pub(crate) const CELL_SIZE: u16 = 20;

/// Where the snake's head is placed at the start of every game
pub(crate) const SNAKE_START: Cell = Cell::new(10, 10);

/// Points awarded for each piece of food eaten
pub(crate) const FOOD_REWARD: u32 = 10;

/// How many random cells food placement tries before falling back to
/// choosing among the free cells directly
pub(crate) const FOOD_PLACEMENT_ATTEMPTS: usize = 64;

/// Environment variable that overrides the configured log filter
pub(crate) const LOG_FILTER_ENV: &str = "GRIDSNAKE_LOG";

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Number of terminal columns used to draw one grid cell
pub(crate) const CELL_WIDTH: u16 = 2;

/// Glyphs for the snake's head, one per terminal column of the cell
pub(crate) const SNAKE_HEAD_GLYPH: [char; 2] = ['█', '█'];

/// Glyphs for the parts of the snake's body
pub(crate) const SNAKE_BODY_GLYPH: [char; 2] = ['▓', '▓'];

/// Glyphs for the food
pub(crate) const FOOD_GLYPH: [char; 2] = ['●', ' '];

/// Default style for the snake's body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Blue);

/// Default style for the snake's head
pub(crate) const SNAKE_HEAD_STYLE: Style = Style::new()
    .fg(Color::Magenta)
    .add_modifier(Modifier::BOLD);

/// Default style for the food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for controls that currently do nothing
pub(crate) const DISABLED_STYLE: Style = Style::new().fg(Color::DarkGray);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

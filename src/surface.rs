use crate::consts;
use crate::game::{GameEvent, GamePhase, Scene};
use crate::grid::{Cell, Grid};
use crate::util::{center_rect, get_display_area, EnumExt};
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Margin, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};

/// Styles for the things drawn on the board
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Palette {
    pub(crate) snake: Style,
    pub(crate) head: Style,
    pub(crate) food: Style,
}

impl Default for Palette {
    fn default() -> Palette {
        Palette {
            snake: consts::SNAKE_STYLE,
            head: consts::SNAKE_HEAD_STYLE,
            food: consts::FOOD_STYLE,
        }
    }
}

/// Everything the player sees besides warnings: the score displays, the
/// board, the control bar, and the pause & game-over panels.
///
/// The surface holds no game logic; it only reflects the [`GameEvent`]s fed to
/// it via [`ControlSurface::apply()`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ControlSurface {
    grid: Grid,
    palette: Palette,
    phase: GamePhase,
    score: u32,
    high_score: u32,
    /// `Some` while the game-over panel is visible
    final_score: Option<u32>,
    scene: Scene,
}

impl ControlSurface {
    pub(crate) fn new(grid: Grid, high_score: u32, palette: Palette) -> ControlSurface {
        ControlSurface {
            grid,
            palette,
            phase: GamePhase::Idle,
            score: 0,
            high_score,
            final_score: None,
            scene: Scene::default(),
        }
    }

    pub(crate) fn apply(&mut self, event: GameEvent) {
        match event {
            GameEvent::Render(scene) => self.scene = scene,
            GameEvent::PhaseChanged(phase) => self.phase = phase,
            GameEvent::ScoreChanged(score) => self.score = score,
            GameEvent::HighScoreChanged(score) => self.high_score = score,
            GameEvent::GameOver { final_score } => self.final_score = Some(final_score),
            GameEvent::GameOverHidden => self.final_score = None,
            GameEvent::StorageFailed(_) => (),
        }
    }

    fn board_size(&self) -> Size {
        let dim = self.grid.dimension();
        Size {
            width: dim.saturating_mul(consts::CELL_WIDTH).saturating_add(2),
            height: dim.saturating_add(2),
        }
    }

    fn controls(&self) -> Line<'static> {
        let mut line = Line::from(" ");
        for (i, ctl) in Control::iter().enumerate() {
            if i > 0 {
                line.push_span("   ");
            }
            line.push_span("[");
            line.push_span(Span::styled(ctl.key(), consts::KEY_STYLE));
            line.push_span("] ");
            let style = if ctl.enabled(self.phase) {
                Style::new()
            } else {
                consts::DISABLED_STYLE
            };
            line.push_span(Span::styled(ctl.label(self.phase), style));
        }
        line
    }
}

impl Widget for &ControlSurface {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [score_area, board_area, controls_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(display);
        Line::styled(
            format!(" Score: {}  High Score: {}", self.score, self.high_score),
            consts::SCORE_BAR_STYLE,
        )
        .render(score_area, buf);

        let block_area = center_rect(board_area, self.board_size());
        Block::bordered().render(block_area, buf);
        let mut board = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            buf,
        };
        for &cell in self.scene.snake.iter().skip(1) {
            board.draw_cell(cell, consts::SNAKE_BODY_GLYPH, self.palette.snake);
        }
        if let Some(food) = self.scene.food {
            board.draw_cell(food, consts::FOOD_GLYPH, self.palette.food);
        }
        if let Some(&head) = self.scene.snake.first() {
            board.draw_cell(head, consts::SNAKE_HEAD_GLYPH, self.palette.head);
        }

        if let Some(final_score) = self.final_score {
            GameOverPanel { final_score }.render(block_area, buf);
        } else if self.phase == GamePhase::Paused {
            PausedPanel.render(block_area, buf);
        }

        self.controls().render(controls_area, buf);
    }
}

/// The buttons shown in the control bar
#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
enum Control {
    Start,
    Pause,
    Reset,
    Quit,
}

impl Control {
    fn key(self) -> &'static str {
        match self {
            Control::Start => "Enter",
            Control::Pause => "p",
            Control::Reset => "r",
            Control::Quit => "q",
        }
    }

    fn label(self, phase: GamePhase) -> &'static str {
        match (self, phase) {
            (Control::Start, GamePhase::Idle | GamePhase::GameOver) => "Start Game",
            (Control::Start, GamePhase::Running | GamePhase::Paused) => "Restart",
            (Control::Pause, GamePhase::Paused) => "Resume",
            (Control::Pause, _) => "Pause",
            (Control::Reset, _) => "Reset",
            (Control::Quit, _) => "Quit",
        }
    }

    fn enabled(self, phase: GamePhase) -> bool {
        match self {
            Control::Pause => matches!(phase, GamePhase::Running | GamePhase::Paused),
            Control::Start | Control::Reset | Control::Quit => true,
        }
    }
}

/// Draws grid cells into the interior of the board, `CELL_WIDTH` columns per
/// cell.  Cells outside the grid are skipped.
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, cell: Cell, glyph: [char; 2], style: Style) {
        let (Ok(x), Ok(y)) = (u16::try_from(cell.x), u16::try_from(cell.y)) else {
            return;
        };
        if y >= self.area.height {
            return;
        }
        let Some(col) = x.checked_mul(consts::CELL_WIDTH) else {
            return;
        };
        for (dx, ch) in (0u16..).zip(glyph) {
            let Some(offset) = col.checked_add(dx).filter(|&c| c < self.area.width) else {
                return;
            };
            if let Some(c) = self.buf.cell_mut((self.area.x + offset, self.area.y + y)) {
                c.set_char(ch);
                c.set_style(Style::reset().patch(style));
            }
        }
    }
}

/// Pop-up shown over the board when the game ends
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct GameOverPanel {
    final_score: u32,
}

impl GameOverPanel {
    const WIDTH: u16 = 26;
    const HEIGHT: u16 = 4;
}

impl Widget for GameOverPanel {
    /*
     * ┌────── GAME OVER ───────┐
     * │     Final Score: 0     │
     * │ Press Enter to restart │
     * └────────────────────────┘
     */

    // `area` is the area of the whole board.
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = center_rect(
            area,
            Size {
                width: GameOverPanel::WIDTH,
                height: GameOverPanel::HEIGHT,
            },
        );
        let block = Block::bordered()
            .title(" GAME OVER ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(area);
        Clear.render(area, buf);
        block.render(area, buf);
        let [score_row, hint_row] = Layout::vertical([1, 1]).areas(inner);
        Line::from(format!("Final Score: {}", self.final_score))
            .centered()
            .render(score_row, buf);
        Line::from_iter([
            Span::raw("Press "),
            Span::styled("Enter", consts::KEY_STYLE),
            Span::raw(" to restart"),
        ])
        .centered()
        .render(hint_row, buf);
    }
}

/// Pop-up shown over the board while the game is paused
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct PausedPanel;

impl PausedPanel {
    const WIDTH: u16 = 24;
    const HEIGHT: u16 = 4;
}

impl Widget for PausedPanel {
    /*
     * ┌─────── PAUSED ───────┐
     * │  Press p to resume   │
     * │   Press r to reset   │
     * └──────────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = center_rect(
            area,
            Size {
                width: PausedPanel::WIDTH,
                height: PausedPanel::HEIGHT,
            },
        );
        let block = Block::bordered()
            .title(" PAUSED ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(area);
        Clear.render(area, buf);
        block.render(area, buf);
        let [resume_row, reset_row] = Layout::vertical([1, 1]).areas(inner);
        for (key, action, row) in [("p", "resume", resume_row), ("r", "reset", reset_row)] {
            Line::from_iter([
                Span::raw("Press "),
                Span::styled(key, consts::KEY_STYLE),
                Span::raw(" to "),
                Span::raw(action),
            ])
            .centered()
            .render(row, buf);
        }
    }
}

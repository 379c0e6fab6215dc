mod collision;
mod direction;
mod food;
mod score;
mod snake;
mod ticker;
pub(crate) use self::direction::Direction;
use self::direction::Steering;
use self::score::ScoreTracker;
use self::snake::Snake;
use self::ticker::Ticker;
use crate::consts;
use crate::grid::{Cell, Grid};
use crate::highscores::HighScoreStore;
use crate::util::error_chain;
use rand::Rng;
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// The phases of a game.
///
/// ```text
/// Idle ──start──▶ Running ◀──pause──▶ Paused
///  ▲               │  ▲                 │
///  │             crash └──────start─────┘
///  │               ▼
///  └──reset──── GameOver ──start──▶ Running
/// ```
///
/// `reset` returns to `Idle` from any phase.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum GamePhase {
    #[default]
    Idle,
    Running,
    Paused,
    GameOver,
}

/// What the board should currently show
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Scene {
    /// The snake's cells, head first.  Empty when the board should be blank.
    pub(crate) snake: Vec<Cell>,
    pub(crate) food: Option<Cell>,
}

/// Notifications for the user interface, in the order they occurred
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum GameEvent {
    /// Redraw the board with the given contents
    Render(Scene),
    PhaseChanged(GamePhase),
    ScoreChanged(u32),
    HighScoreChanged(u32),
    /// Show the game-over panel with the final score
    GameOver { final_score: u32 },
    /// Hide the game-over panel
    GameOverHidden,
    /// Reading or writing the high score failed; the messages are the error
    /// followed by its sources.
    StorageFailed(Vec<String>),
}

/// A single player's game: the snake, the food, the score, and the timer
/// driving them
#[derive(Clone, Debug)]
pub(crate) struct GameSession<S, R = rand::rngs::ThreadRng> {
    rng: R,
    grid: Grid,
    phase: GamePhase,
    snake: Snake,
    steering: Steering,
    food: Option<Cell>,
    scores: ScoreTracker<S>,
    ticker: Ticker,
    events: VecDeque<GameEvent>,
}

impl<S: HighScoreStore> GameSession<S, rand::rngs::ThreadRng> {
    pub(crate) fn new(store: S) -> Self {
        GameSession::new_with_rng(
            Grid::from_canvas(consts::CANVAS_SIZE, consts::CELL_SIZE),
            store,
            rand::rng(),
        )
    }
}

impl<S: HighScoreStore, R: Rng> GameSession<S, R> {
    /// Create an idle session, reading the high score from `store`.  A
    /// failure to read is reported as a [`GameEvent::StorageFailed`] and the
    /// high score starts at zero.
    pub(crate) fn new_with_rng(grid: Grid, mut store: S, rng: R) -> GameSession<S, R> {
        let mut events = VecDeque::new();
        let high_score = match store.load() {
            Ok(hs) => hs.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "could not load high score; starting from zero");
                events.push_back(GameEvent::StorageFailed(error_chain(&e)));
                0
            }
        };
        debug!(dimension = grid.dimension(), high_score, "created game session");
        GameSession {
            rng,
            grid,
            phase: GamePhase::Idle,
            snake: Snake::new(consts::SNAKE_START),
            steering: Steering::new(),
            food: None,
            scores: ScoreTracker::new(store, high_score),
            ticker: Ticker::new(consts::TICK_PERIOD),
            events,
        }
    }

    /// Begin a new game, or resume a paused one.  Does nothing if the game is
    /// already running.
    pub(crate) fn start(&mut self, now: Instant) {
        match self.phase {
            GamePhase::Running => (),
            GamePhase::Paused => self.resume(now),
            GamePhase::Idle | GamePhase::GameOver => {
                if self.phase == GamePhase::GameOver {
                    self.emit(GameEvent::GameOverHidden);
                }
                self.clear();
                self.place_food();
                self.set_phase(GamePhase::Running);
                self.ticker.start(now);
                info!(
                    high_score = self.scores.high_score(),
                    period = ?self.ticker.period(),
                    "game started"
                );
                self.emit(GameEvent::Render(self.scene()));
            }
        }
    }

    /// Pause a running game or resume a paused one
    pub(crate) fn toggle_pause(&mut self, now: Instant) {
        match self.phase {
            GamePhase::Running => {
                self.ticker.cancel();
                self.set_phase(GamePhase::Paused);
            }
            GamePhase::Paused => self.resume(now),
            GamePhase::Idle | GamePhase::GameOver => (),
        }
    }

    /// Abandon the current game and go back to [`GamePhase::Idle`].  The high
    /// score is kept.
    pub(crate) fn reset(&mut self) {
        self.ticker.cancel();
        if self.phase == GamePhase::GameOver {
            self.emit(GameEvent::GameOverHidden);
        }
        self.clear();
        self.food = None;
        self.set_phase(GamePhase::Idle);
        self.emit(GameEvent::Render(Scene::default()));
    }

    /// Ask the snake to turn.  Input is only heeded while the game is
    /// running; returns `true` if the turn will happen on the next tick.
    pub(crate) fn steer(&mut self, direction: Direction) -> bool {
        self.phase == GamePhase::Running && self.steering.request(direction)
    }

    /// Run a tick if one is due at `now`.  Returns `true` if a tick ran.
    pub(crate) fn on_timer(&mut self, now: Instant) -> bool {
        if self.ticker.fire(now) {
            self.tick();
            true
        } else {
            false
        }
    }

    /// Advance the game by one step
    pub(crate) fn tick(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        let velocity = self.steering.commit();
        let new_head = self.snake.advance(velocity);
        if self.food == Some(new_head) {
            self.snake.grow(new_head);
            self.scores.add_reward(consts::FOOD_REWARD);
            self.emit(GameEvent::ScoreChanged(self.scores.score()));
            self.place_food();
            self.update_high_score();
        } else {
            self.snake.move_without_growth(new_head);
        }
        if let Some(collision) = collision::detect(self.grid, &self.snake) {
            self.ticker.cancel();
            self.set_phase(GamePhase::GameOver);
            info!(
                score = self.scores.score(),
                length = self.snake.len(),
                head = %self.snake.head(),
                velocity = ?self.steering.committed(),
                %collision,
                "game over"
            );
            self.emit(GameEvent::GameOver {
                final_score: self.scores.score(),
            });
        } else {
            self.emit(GameEvent::Render(self.scene()));
        }
    }

    fn resume(&mut self, now: Instant) {
        self.set_phase(GamePhase::Running);
        self.ticker.start(now);
        self.emit(GameEvent::Render(self.scene()));
    }

    /// Put the snake, its velocity, and the score back to their initial
    /// values
    fn clear(&mut self) {
        self.snake = Snake::new(consts::SNAKE_START);
        self.steering = Steering::new();
        self.scores.reset();
        self.emit(GameEvent::ScoreChanged(0));
    }

    fn place_food(&mut self) {
        self.food = food::place(self.grid, &self.snake.occupied(), &mut self.rng);
        if let Some(cell) = self.food {
            debug!(%cell, "placed food");
        } else {
            warn!("no free cell left for food");
        }
    }

    fn update_high_score(&mut self) {
        let score = self.scores.score();
        match self.scores.maybe_update_high_score(score) {
            Ok(false) => (),
            Ok(true) => {
                info!(high_score = score, "new high score");
                self.emit(GameEvent::HighScoreChanged(score));
            }
            Err(e) => {
                warn!(high_score = score, error = %e, "new high score could not be saved");
                self.emit(GameEvent::HighScoreChanged(score));
                self.emit(GameEvent::StorageFailed(error_chain(&e)));
            }
        }
    }
}

impl<S, R> GameSession<S, R> {
    pub(crate) fn phase(&self) -> GamePhase {
        self.phase
    }

    pub(crate) fn score(&self) -> u32 {
        self.scores.score()
    }

    pub(crate) fn high_score(&self) -> u32 {
        self.scores.high_score()
    }

    pub(crate) fn grid(&self) -> Grid {
        self.grid
    }

    /// How long the event loop may wait for input before the next tick is
    /// due; `None` if no tick is scheduled
    pub(crate) fn next_timeout(&self, now: Instant) -> Option<Duration> {
        self.ticker.timeout(now)
    }

    /// Take the oldest unhandled event
    pub(crate) fn poll_event(&mut self) -> Option<GameEvent> {
        self.events.pop_front()
    }

    pub(crate) fn scene(&self) -> Scene {
        Scene {
            snake: self.snake.cells().collect(),
            food: self.food,
        }
    }

    fn set_phase(&mut self, phase: GamePhase) {
        debug!(from = ?self.phase, to = ?phase, "phase change");
        self.phase = phase;
        self.emit(GameEvent::PhaseChanged(phase));
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push_back(event);
    }
}

#[cfg(test)]
mod tests {
    use super::direction::Velocity;
    use super::*;
    use crate::highscores::{HighScoreFile, LoadError, MemoryStore, SaveError};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    type TestSession = GameSession<MemoryStore, ChaCha12Rng>;

    fn new_session(store: MemoryStore) -> TestSession {
        GameSession::new_with_rng(Grid::new(20), store, ChaCha12Rng::seed_from_u64(RNG_SEED))
    }

    fn running_session() -> TestSession {
        let mut session = new_session(MemoryStore::new());
        session.start(Instant::now());
        drain(&mut session);
        session
    }

    fn drain<S, R>(session: &mut GameSession<S, R>) -> Vec<GameEvent> {
        std::iter::from_fn(|| session.poll_event()).collect()
    }

    fn cells(coords: &[(i32, i32)]) -> VecDeque<Cell> {
        coords.iter().map(|&(x, y)| Cell::new(x, y)).collect()
    }

    #[test]
    fn new_session_is_idle() {
        let mut session = new_session(MemoryStore::with_score(70));
        assert_eq!(session.phase(), GamePhase::Idle);
        assert_eq!(session.score(), 0);
        assert_eq!(session.high_score(), 70);
        assert_eq!(session.next_timeout(Instant::now()), None);
        assert_eq!(session.food, None);
        assert!(drain(&mut session).is_empty());
    }

    #[test]
    fn start_places_food() {
        let mut session = new_session(MemoryStore::new());
        let now = Instant::now();
        session.start(now);
        assert_eq!(session.phase(), GamePhase::Running);
        assert_eq!(session.next_timeout(now), Some(consts::TICK_PERIOD));
        let food = session.food.unwrap();
        assert!(session.grid().in_bounds(food));
        assert_ne!(food, consts::SNAKE_START);
        assert_eq!(
            drain(&mut session),
            [
                GameEvent::ScoreChanged(0),
                GameEvent::PhaseChanged(GamePhase::Running),
                GameEvent::Render(Scene {
                    snake: vec![consts::SNAKE_START],
                    food: Some(food),
                }),
            ]
        );
    }

    #[test]
    fn first_move() {
        let mut session = running_session();
        session.food = Some(Cell::new(0, 0));
        assert!(session.steer(Direction::East));
        session.tick();
        assert_eq!(session.snake.head(), Cell::new(11, 10));
        assert_eq!(session.snake.len(), 1);
        assert_eq!(session.phase(), GamePhase::Running);
        assert_eq!(
            drain(&mut session),
            [GameEvent::Render(Scene {
                snake: vec![Cell::new(11, 10)],
                food: Some(Cell::new(0, 0)),
            })]
        );
    }

    #[test]
    fn stationary_tick() {
        let mut session = running_session();
        let before = session.scene();
        session.tick();
        assert_eq!(session.scene(), before);
        assert_eq!(session.phase(), GamePhase::Running);
    }

    #[rstest]
    #[case(Direction::East, (1, 0))]
    #[case(Direction::North, (0, -1))]
    #[case(Direction::South, (0, 1))]
    fn plain_tick_shifts_snake(#[case] direction: Direction, #[case] (dx, dy): (i32, i32)) {
        let mut session = running_session();
        session.food = Some(Cell::new(0, 0));
        session.snake.cells = cells(&[(10, 10), (9, 10), (8, 10)]);
        session.steering.request(Direction::East);
        session.steering.commit();
        session.steer(direction);
        session.tick();
        assert_eq!(session.snake.len(), 3);
        assert_eq!(session.snake.head(), Cell::new(10 + dx, 10 + dy));
        assert_eq!(
            session.snake.body().collect::<Vec<_>>(),
            [Cell::new(10, 10), Cell::new(9, 10)]
        );
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn straight_line_shifts_by_velocity() {
        let mut session = running_session();
        session.food = Some(Cell::new(0, 0));
        session.snake.cells = cells(&[(10, 5), (10, 6), (10, 7), (10, 8)]);
        session.steer(Direction::North);
        session.tick();
        assert_eq!(session.snake.cells, cells(&[(10, 4), (10, 5), (10, 6), (10, 7)]));
    }

    #[test]
    fn eat_food() {
        let mut session = running_session();
        session.food = Some(Cell::new(11, 10));
        session.steer(Direction::East);
        session.tick();
        assert_eq!(session.snake.cells, cells(&[(11, 10), (10, 10)]));
        assert_eq!(session.score(), consts::FOOD_REWARD);
        assert_eq!(session.high_score(), consts::FOOD_REWARD);
        assert_eq!(session.scores.store().saves(), 1);
        assert_eq!(session.scores.store().score(), Some(10));
        let food = session.food.unwrap();
        assert!(!session.snake.occupied().contains(&food));
        assert_eq!(
            drain(&mut session),
            [
                GameEvent::ScoreChanged(10),
                GameEvent::HighScoreChanged(10),
                GameEvent::Render(Scene {
                    snake: vec![Cell::new(11, 10), Cell::new(10, 10)],
                    food: Some(food),
                }),
            ]
        );
    }

    #[test]
    fn tie_does_not_save() {
        let mut session = new_session(MemoryStore::with_score(10));
        session.start(Instant::now());
        session.food = Some(Cell::new(11, 10));
        session.steer(Direction::East);
        session.tick();
        assert_eq!(session.score(), 10);
        assert_eq!(session.high_score(), 10);
        assert_eq!(session.scores.store().saves(), 0);
        assert!(!drain(&mut session).contains(&GameEvent::HighScoreChanged(10)));
    }

    #[rstest]
    #[case((0, 7), Direction::West, (-1, 7))]
    #[case((19, 7), Direction::East, (20, 7))]
    #[case((7, 0), Direction::North, (7, -1))]
    #[case((7, 19), Direction::South, (7, 20))]
    fn wall_collision(
        #[case] (x, y): (i32, i32),
        #[case] direction: Direction,
        #[case] (hx, hy): (i32, i32),
    ) {
        let mut session = running_session();
        session.food = Some(Cell::new(12, 12));
        session.snake.cells = cells(&[(x, y)]);
        session.steer(direction);
        session.tick();
        assert_eq!(session.phase(), GamePhase::GameOver);
        assert_eq!(session.snake.head(), Cell::new(hx, hy));
        assert_eq!(session.next_timeout(Instant::now()), None);
        assert_eq!(
            drain(&mut session),
            [
                GameEvent::PhaseChanged(GamePhase::GameOver),
                GameEvent::GameOver { final_score: 0 },
            ]
        );
    }

    #[test]
    fn self_collision() {
        let mut session = running_session();
        session.food = Some(Cell::new(0, 0));
        session.snake.cells = cells(&[(5, 5), (6, 5), (6, 6), (5, 6), (4, 6)]);
        session.steer(Direction::South);
        session.tick();
        assert_eq!(session.phase(), GamePhase::GameOver);
    }

    #[test]
    fn chase_tail_without_growth() {
        let mut session = running_session();
        session.food = Some(Cell::new(0, 0));
        session.snake.cells = cells(&[(5, 5), (5, 6), (6, 6), (6, 5)]);
        session.steer(Direction::East);
        session.tick();
        assert_eq!(session.phase(), GamePhase::Running);
        assert_eq!(session.snake.cells, cells(&[(6, 5), (5, 5), (5, 6), (6, 6)]));
    }

    #[test]
    fn chase_tail_with_growth() {
        let mut session = running_session();
        session.food = Some(Cell::new(6, 5));
        session.snake.cells = cells(&[(5, 5), (5, 6), (6, 6), (6, 5)]);
        session.steer(Direction::East);
        session.tick();
        assert_eq!(session.phase(), GamePhase::GameOver);
        assert_eq!(session.snake.len(), 5);
        assert_eq!(session.score(), 10);
        assert!(drain(&mut session).contains(&GameEvent::GameOver { final_score: 10 }));
    }

    #[test]
    fn no_reversal() {
        let mut session = running_session();
        session.food = Some(Cell::new(0, 0));
        session.snake.cells = cells(&[(10, 10), (9, 10), (8, 10)]);
        assert!(session.steer(Direction::East));
        session.tick();
        assert!(!session.steer(Direction::West));
        assert!(!session.steer(Direction::East));
        session.tick();
        assert_eq!(session.steering.committed(), Velocity::Moving(Direction::East));
        assert_eq!(session.snake.head(), Cell::new(12, 10));
        assert_eq!(session.phase(), GamePhase::Running);
    }

    #[test]
    fn pause_preserves_state() {
        let mut session = running_session();
        session.food = Some(Cell::new(0, 0));
        session.steer(Direction::South);
        session.tick();
        session.tick();
        let scene = session.scene();
        let score = session.score();
        let now = Instant::now();
        session.toggle_pause(now);
        assert_eq!(session.phase(), GamePhase::Paused);
        assert_eq!(session.next_timeout(now), None);
        assert!(!session.on_timer(now + consts::TICK_PERIOD * 3));
        session.tick();
        assert!(!session.steer(Direction::East));
        assert_eq!(session.scene(), scene);
        drain(&mut session);
        session.toggle_pause(now);
        assert_eq!(session.phase(), GamePhase::Running);
        assert_eq!(session.scene(), scene);
        assert_eq!(session.score(), score);
        assert_eq!(session.next_timeout(now), Some(consts::TICK_PERIOD));
        assert_eq!(
            drain(&mut session),
            [
                GameEvent::PhaseChanged(GamePhase::Running),
                GameEvent::Render(scene),
            ]
        );
    }

    #[test]
    fn start_resumes_paused_game() {
        let mut session = running_session();
        session.steer(Direction::South);
        session.tick();
        let scene = session.scene();
        let now = Instant::now();
        session.toggle_pause(now);
        session.start(now);
        assert_eq!(session.phase(), GamePhase::Running);
        assert_eq!(session.scene(), scene);
    }

    #[test]
    fn start_while_running_is_noop() {
        let mut session = running_session();
        session.steer(Direction::South);
        session.tick();
        drain(&mut session);
        let scene = session.scene();
        session.start(Instant::now());
        assert_eq!(session.scene(), scene);
        assert!(drain(&mut session).is_empty());
    }

    #[test]
    fn pause_ignored_when_idle() {
        let mut session = new_session(MemoryStore::new());
        session.toggle_pause(Instant::now());
        assert_eq!(session.phase(), GamePhase::Idle);
        assert!(!session.steer(Direction::North));
    }

    #[test]
    fn timer_drives_ticks() {
        let mut session = new_session(MemoryStore::new());
        let now = Instant::now();
        session.start(now);
        session.food = Some(Cell::new(0, 0));
        session.steer(Direction::North);
        assert!(!session.on_timer(now));
        assert!(session.on_timer(now + consts::TICK_PERIOD));
        assert_eq!(session.snake.head(), Cell::new(10, 9));
        assert!(!session.on_timer(now + consts::TICK_PERIOD));
        assert!(session.on_timer(now + consts::TICK_PERIOD * 2));
        assert_eq!(session.snake.head(), Cell::new(10, 8));
    }

    #[test]
    fn reset_cancels_timer() {
        let mut session = new_session(MemoryStore::new());
        let now = Instant::now();
        session.start(now);
        session.food = Some(Cell::new(11, 10));
        session.steer(Direction::East);
        session.tick();
        assert_eq!(session.score(), 10);
        session.reset();
        assert_eq!(session.phase(), GamePhase::Idle);
        assert_eq!(session.score(), 0);
        assert_eq!(session.high_score(), 10);
        assert_eq!(session.food, None);
        assert_eq!(session.snake.cells, cells(&[(10, 10)]));
        assert_eq!(session.steering, Steering::new());
        assert!(!session.on_timer(now + consts::TICK_PERIOD));
        let events = drain(&mut session);
        assert_eq!(
            events[events.len() - 3..],
            [
                GameEvent::ScoreChanged(0),
                GameEvent::PhaseChanged(GamePhase::Idle),
                GameEvent::Render(Scene::default()),
            ]
        );
    }

    #[test]
    fn restart_after_game_over() {
        let mut session = running_session();
        session.food = Some(Cell::new(11, 10));
        session.snake.cells = cells(&[(10, 0)]);
        session.steer(Direction::North);
        session.tick();
        assert_eq!(session.phase(), GamePhase::GameOver);
        drain(&mut session);
        session.start(Instant::now());
        assert_eq!(session.phase(), GamePhase::Running);
        assert_eq!(session.snake.cells, cells(&[(10, 10)]));
        assert_eq!(session.steering, Steering::new());
        let events = drain(&mut session);
        assert_eq!(events[0], GameEvent::GameOverHidden);
        assert_eq!(events[1], GameEvent::ScoreChanged(0));
    }

    #[test]
    fn reset_after_game_over_hides_panel() {
        let mut session = running_session();
        session.snake.cells = cells(&[(0, 0)]);
        session.steer(Direction::West);
        session.tick();
        drain(&mut session);
        session.reset();
        assert_eq!(drain(&mut session)[0], GameEvent::GameOverHidden);
    }

    #[derive(Debug, Default)]
    struct BrokenStore;

    impl HighScoreStore for BrokenStore {
        fn load(&mut self) -> Result<Option<u32>, LoadError> {
            HighScoreFile::new(None).load()
        }

        fn save(&mut self, score: u32) -> Result<(), SaveError> {
            HighScoreFile::new(None).save(score)
        }
    }

    #[test]
    fn storage_failures_are_reported() {
        let mut session =
            GameSession::new_with_rng(Grid::new(20), BrokenStore, ChaCha12Rng::seed_from_u64(RNG_SEED));
        assert_eq!(session.high_score(), 0);
        assert_eq!(
            drain(&mut session),
            [GameEvent::StorageFailed(vec![
                String::from("Failed to read high score from disk"),
                String::from("failed to determine path to local data directory"),
            ])]
        );
        session.start(Instant::now());
        session.food = Some(Cell::new(10, 11));
        session.steer(Direction::South);
        session.tick();
        assert_eq!(session.high_score(), 10);
        let events = drain(&mut session);
        assert!(events.contains(&GameEvent::HighScoreChanged(10)));
        assert!(events.contains(&GameEvent::StorageFailed(vec![
            String::from("Failed to save high score to disk"),
            String::from("failed to determine path to local data directory"),
        ])));
        assert_eq!(session.phase(), GamePhase::Running);
    }
}

use rand::Rng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::audio::{AudioCue, AudioSink};
use crate::game::{Difficulty, Direction, GameClock, GameConfig, GameEngine, GameState, TickOutcome};
use crate::input::KeyAction;
use crate::metrics::GameMetrics;
use crate::screen::{Effect, Screen, ScreenEvent, ScreenStateMachine, Transition};
use crate::skin::{Skin, Theme, paint::next_hue};
use crate::storage::{KeyValueStore, ScoreStore, load_skin, save_skin};

/// Everything the renderer needs for one frame
pub struct View<'a> {
    pub screen: Screen,
    /// Screen under any overlay
    pub base: Screen,
    /// Current run, or the one that just ended
    pub run: Option<&'a GameState>,
    pub difficulty: Option<Difficulty>,
    pub selected_difficulty: Difficulty,
    pub skin: Skin,
    pub theme: Theme,
    pub hue_base: u16,
    pub scores: &'a ScoreStore,
    pub elapsed: String,
    pub last_outcome: Option<TickOutcome>,
    pub last_rank: Option<usize>,
}

/// Owns the whole game: board, screens, clock, scores and preferences.
///
/// Every input handler and the frame loop go through these methods; all
/// timestamps are milliseconds from one monotonic source.
pub struct GameController<R: Rng = StdRng> {
    engine: GameEngine<R>,
    run: Option<GameState>,
    screens: ScreenStateMachine,
    clock: GameClock,
    scores: ScoreStore,
    store: Box<dyn KeyValueStore>,
    audio: Box<dyn AudioSink>,
    metrics: GameMetrics,
    selected_difficulty: Difficulty,
    skin: Skin,
    theme: Theme,
    hue_base: u16,
    fixed_grid: bool,
    last_outcome: Option<TickOutcome>,
    last_rank: Option<usize>,
    should_quit: bool,
}

impl<R: Rng> GameController<R> {
    pub fn new(
        engine: GameEngine<R>,
        store: Box<dyn KeyValueStore>,
        audio: Box<dyn AudioSink>,
    ) -> Self {
        let scores = ScoreStore::load(store.as_ref());
        let skin = load_skin(store.as_ref());
        let selected_difficulty = Difficulty::default();

        Self {
            engine,
            run: None,
            screens: ScreenStateMachine::new(),
            clock: GameClock::new(selected_difficulty.tick_interval_ms()),
            scores,
            store,
            audio,
            metrics: GameMetrics::new(),
            selected_difficulty,
            skin,
            theme: Theme::default(),
            hue_base: 0,
            fixed_grid: false,
            last_outcome: None,
            last_rank: None,
            should_quit: false,
        }
    }

    /// Preselect the difficulty offered on the menu
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.selected_difficulty = difficulty;
        self
    }

    /// Keep the engine's grid size instead of following the viewport
    pub fn with_fixed_grid(mut self, fixed: bool) -> Self {
        self.fixed_grid = fixed;
        self
    }

    pub fn screen(&self) -> Screen {
        self.screens.current()
    }

    pub fn run(&self) -> Option<&GameState> {
        self.run.as_ref()
    }

    pub fn scores(&self) -> &ScoreStore {
        &self.scores
    }

    pub fn skin(&self) -> Skin {
        self.skin
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn view(&self, now_ms: u64) -> View<'_> {
        View {
            screen: self.screens.current(),
            base: self.screens.base(),
            run: self.run.as_ref(),
            difficulty: self.screens.last_difficulty(),
            selected_difficulty: self.selected_difficulty,
            skin: self.skin,
            theme: self.theme,
            hue_base: self.hue_base,
            scores: &self.scores,
            elapsed: self.metrics.format_time(now_ms),
            last_outcome: self.last_outcome,
            last_rank: self.last_rank,
        }
    }

    /// Frame callback. Runs at most one tick; returns whether it did.
    pub fn on_frame(&mut self, now_ms: u64) -> bool {
        if !self.screens.is_ticking() || !self.clock.on_frame(now_ms) {
            return false;
        }
        self.tick(now_ms);
        true
    }

    fn tick(&mut self, now_ms: u64) {
        let Some(run) = self.run.as_mut() else {
            return;
        };

        let outcome = self.engine.tick(run);
        if outcome == TickOutcome::Finished {
            return;
        }
        if outcome.is_terminal() {
            self.last_outcome = Some(outcome);
            self.dispatch(ScreenEvent::RunEnded, now_ms);
            return;
        }

        if outcome == TickOutcome::Ate {
            self.audio.play(AudioCue::Eat);
        }
        if self.skin.is_animated() {
            self.hue_base = next_hue(self.hue_base);
        }
    }

    /// Route a key press according to the visible screen
    pub fn handle_key(&mut self, action: KeyAction, now_ms: u64) {
        let screen = self.screens.current();
        let overlay_open = self.screens.overlay().is_some();

        match action {
            KeyAction::Move(direction) => self.set_direction(direction),
            KeyAction::TogglePause if overlay_open => {
                self.dispatch(ScreenEvent::CloseOverlay, now_ms);
            }
            KeyAction::TogglePause => self.toggle_pause(now_ms),
            KeyAction::Confirm => match screen {
                Screen::Menu => self.start(self.selected_difficulty, now_ms),
                Screen::Paused => self.resume(now_ms),
                Screen::GameOver => self.restart(now_ms),
                Screen::ScoresView | Screen::InfoView => {
                    self.dispatch(ScreenEvent::CloseOverlay, now_ms);
                }
                Screen::Playing => {}
            },
            KeyAction::SelectDifficulty(difficulty) => {
                self.selected_difficulty = difficulty;
                if screen == Screen::Menu {
                    self.start(difficulty, now_ms);
                }
            }
            KeyAction::Restart => self.restart(now_ms),
            KeyAction::ToMenu => self.to_menu(now_ms),
            KeyAction::ShowScores => self.dispatch(ScreenEvent::ShowScores, now_ms),
            KeyAction::ShowInfo => self.dispatch(ScreenEvent::ShowInfo, now_ms),
            KeyAction::ToggleTheme => self.toggle_theme(),
            KeyAction::NextSkin => self.select_skin(self.skin.next().name()),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    /// Buffer a turn; ignored unless a run is actively ticking
    pub fn set_direction(&mut self, direction: Direction) {
        if !self.screens.is_ticking() {
            return;
        }
        if let Some(run) = self.run.as_mut() {
            if !self.engine.set_direction(run, direction) {
                debug!(?direction, "direction change rejected");
            }
        }
    }

    pub fn start(&mut self, difficulty: Difficulty, now_ms: u64) {
        self.dispatch(ScreenEvent::Start(difficulty), now_ms);
    }

    pub fn restart(&mut self, now_ms: u64) {
        self.dispatch(ScreenEvent::Restart, now_ms);
    }

    pub fn resume(&mut self, now_ms: u64) {
        self.dispatch(ScreenEvent::Resume, now_ms);
    }

    pub fn to_menu(&mut self, now_ms: u64) {
        self.dispatch(ScreenEvent::ToMenu, now_ms);
    }

    pub fn toggle_pause(&mut self, now_ms: u64) {
        self.dispatch(ScreenEvent::TogglePause, now_ms);
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        debug!(theme = self.theme.name(), "theme toggled");
    }

    /// Switch skin by name; unknown names select the default skin
    pub fn select_skin(&mut self, name: &str) {
        self.skin = Skin::resolve(Some(name));
        self.hue_base = 0;
        save_skin(self.store.as_mut(), self.skin);
    }

    /// The terminal changed size. The new grid applies to the next run.
    pub fn resize(&mut self, area_width: u16, area_height: u16, now_ms: u64) {
        self.clock.rebase(now_ms);
        if self.fixed_grid {
            return;
        }

        let config = GameConfig::from_viewport(area_width, area_height);
        if &config != self.engine.config() {
            debug!(
                width = config.grid_width,
                height = config.grid_height,
                "grid resized for next run"
            );
            self.engine.set_config(config);
        }
    }

    fn dispatch(&mut self, event: ScreenEvent, now_ms: u64) {
        match self.screens.handle(event) {
            Some(transition) => self.apply(transition, now_ms),
            None => debug!(?event, screen = ?self.screens.current(), "event ignored"),
        }
    }

    fn apply(&mut self, transition: Transition, now_ms: u64) {
        match transition.effect {
            Effect::StartRun(difficulty) => self.begin_run(difficulty, now_ms),
            Effect::FinishRun => self.finish_run(now_ms),
            Effect::SuspendClock => {
                self.clock.stop();
                self.metrics.on_pause(now_ms);
                if transition.to == Screen::Paused {
                    self.audio.play(AudioCue::Pause);
                }
            }
            Effect::ResumeClock => {
                self.clock.resume(now_ms);
                self.metrics.on_resume(now_ms);
                if transition.from == Screen::Paused {
                    self.audio.play(AudioCue::Resume);
                }
            }
            Effect::AbandonRun => {
                self.clock.stop();
                self.run = None;
                info!("run abandoned");
            }
            Effect::Nothing => {}
        }
    }

    fn begin_run(&mut self, difficulty: Difficulty, now_ms: u64) {
        let run = self.engine.reset();
        info!(
            %difficulty,
            width = run.grid_width,
            height = run.grid_height,
            "run started"
        );

        self.run = Some(run);
        self.selected_difficulty = difficulty;
        self.last_outcome = None;
        self.last_rank = None;
        self.clock.set_interval_ms(difficulty.tick_interval_ms());
        self.clock.start(now_ms);
        self.metrics.on_game_start(now_ms);
    }

    fn finish_run(&mut self, now_ms: u64) {
        self.clock.stop();
        self.audio.play(AudioCue::GameOver);

        let score = self.run.as_ref().map(|run| run.score).unwrap_or(0);
        let difficulty = self.screens.last_difficulty();
        self.metrics.on_game_over(now_ms);
        self.last_rank = self.scores.record(self.store.as_mut(), score, difficulty);

        info!(
            score,
            difficulty = difficulty.map(|d| d.as_str()).unwrap_or("-"),
            outcome = ?self.last_outcome,
            rank = ?self.last_rank,
            "run finished"
        );
    }
}

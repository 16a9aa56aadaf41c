use crate::game::Difficulty;

/// Screen the player currently sees
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    Paused,
    GameOver,
    ScoresView,
    InfoView,
}

/// Views drawn on top of another screen without replacing it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Scores,
    Info,
}

impl Overlay {
    fn screen(&self) -> Screen {
        match self {
            Overlay::Scores => Screen::ScoresView,
            Overlay::Info => Screen::InfoView,
        }
    }
}

/// Inputs to the screen flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenEvent {
    Start(Difficulty),
    /// The current run hit a wall, itself, or filled the board
    RunEnded,
    TogglePause,
    Resume,
    ToMenu,
    Restart,
    ShowScores,
    ShowInfo,
    CloseOverlay,
}

/// Work the owner must carry out after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Nothing,
    /// Reset the board with this difficulty and start the clock
    StartRun(Difficulty),
    /// Stop the clock and persist the final score
    FinishRun,
    /// Stop ticking but keep the run
    SuspendClock,
    /// Restart ticking from the current time
    ResumeClock,
    /// Drop the run without recording it
    AbandonRun,
}

/// An accepted event: where we ended up and what to do about it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Screen,
    pub to: Screen,
    pub effect: Effect,
}

#[derive(Debug, Clone)]
pub struct ScreenStateMachine {
    base: Screen,
    overlay: Option<Overlay>,
    last_difficulty: Option<Difficulty>,
}

impl Default for ScreenStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenStateMachine {
    pub fn new() -> Self {
        Self {
            base: Screen::Menu,
            overlay: None,
            last_difficulty: None,
        }
    }

    /// Visible screen, overlay first
    pub fn current(&self) -> Screen {
        self.overlay.map(|o| o.screen()).unwrap_or(self.base)
    }

    /// Screen underneath any overlay
    pub fn base(&self) -> Screen {
        self.base
    }

    pub fn overlay(&self) -> Option<Overlay> {
        self.overlay
    }

    pub fn last_difficulty(&self) -> Option<Difficulty> {
        self.last_difficulty
    }

    /// True while the run should advance
    pub fn is_ticking(&self) -> bool {
        self.base == Screen::Playing && self.overlay.is_none()
    }

    /// Apply an event. Returns `None` if the event means nothing in the
    /// current state; the state is then left untouched.
    pub fn handle(&mut self, event: ScreenEvent) -> Option<Transition> {
        let from = self.current();

        if let Some(overlay) = self.overlay {
            return self.handle_overlay(overlay, event, from);
        }

        let (to, effect) = match (self.base, event) {
            (_, ScreenEvent::ShowScores) => return Some(self.open(Overlay::Scores, from)),
            (_, ScreenEvent::ShowInfo) => return Some(self.open(Overlay::Info, from)),

            (Screen::Menu, ScreenEvent::Start(difficulty)) => {
                self.last_difficulty = Some(difficulty);
                (Screen::Playing, Effect::StartRun(difficulty))
            }

            (Screen::Playing, ScreenEvent::RunEnded) => (Screen::GameOver, Effect::FinishRun),
            (Screen::Playing, ScreenEvent::TogglePause) => (Screen::Paused, Effect::SuspendClock),

            (Screen::Paused, ScreenEvent::Resume | ScreenEvent::TogglePause) => {
                (Screen::Playing, Effect::ResumeClock)
            }
            (Screen::Paused, ScreenEvent::ToMenu) => (Screen::Menu, Effect::AbandonRun),

            (Screen::GameOver, ScreenEvent::Restart) => {
                let difficulty = *self.last_difficulty.get_or_insert(Difficulty::Medium);
                (Screen::Playing, Effect::StartRun(difficulty))
            }
            (Screen::GameOver, ScreenEvent::ToMenu | ScreenEvent::TogglePause) => {
                (Screen::Menu, Effect::Nothing)
            }

            _ => return None,
        };

        self.base = to;
        Some(Transition { from, to, effect })
    }

    fn open(&mut self, overlay: Overlay, from: Screen) -> Transition {
        self.overlay = Some(overlay);
        let effect = if self.base == Screen::Playing {
            Effect::SuspendClock
        } else {
            Effect::Nothing
        };
        Transition {
            from,
            to: overlay.screen(),
            effect,
        }
    }

    fn handle_overlay(
        &mut self,
        overlay: Overlay,
        event: ScreenEvent,
        from: Screen,
    ) -> Option<Transition> {
        let next = match event {
            ScreenEvent::ShowScores => Overlay::Scores,
            ScreenEvent::ShowInfo => Overlay::Info,
            // one step towards the menu: a running game is left paused
            ScreenEvent::ToMenu => {
                self.overlay = None;
                let to = match self.base {
                    Screen::Playing => Screen::Paused,
                    Screen::GameOver => Screen::Menu,
                    base => base,
                };
                self.base = to;
                return Some(Transition {
                    from,
                    to,
                    effect: Effect::Nothing,
                });
            }
            ScreenEvent::CloseOverlay => {
                self.overlay = None;
                let effect = if self.base == Screen::Playing {
                    Effect::ResumeClock
                } else {
                    Effect::Nothing
                };
                return Some(Transition {
                    from,
                    to: self.base,
                    effect,
                });
            }
            _ => return None,
        };

        if next == overlay {
            return None;
        }
        self.overlay = Some(next);
        Some(Transition {
            from,
            to: next.screen(),
            effect: Effect::Nothing,
        })
    }
}

use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, error, info};

use crate::app::GameController;
use crate::input::InputHandler;
use crate::render::Renderer;

/// Interactive session in the terminal
pub struct PlayMode {
    controller: GameController,
    renderer: Renderer,
    input_handler: InputHandler,
    frame_interval: Duration,
    started: Instant,
}

impl PlayMode {
    pub fn new(controller: GameController, frame_interval: Duration) -> Self {
        Self {
            controller,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            frame_interval,
            started: Instant::now(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut terminal = undo_on_error(enter_terminal, restore_terminal)?;

        let result = self.run_game_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let size = terminal.size().context("Failed to read terminal size")?;
        self.controller.resize(size.width, size.height, self.now_ms());

        let mut event_stream = EventStream::new();
        let mut frame_timer = interval(self.frame_interval);
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(frame_ms = self.frame_interval.as_millis() as u64, "session started");

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => break,
                    }
                }

                // One frame: maybe tick, then draw
                _ = frame_timer.tick() => {
                    let now = self.now_ms();
                    self.controller.on_frame(now);
                    let view = self.controller.view(now);
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &view);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    debug!("ctrl-c received");
                    break;
                }
            }

            if self.controller.should_quit() {
                break;
            }
        }

        info!("session ended");
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let now = self.now_ms();
        match event {
            // Only process key press events, not release
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let action = self.input_handler.handle_key_event(key);
                self.controller.handle_key(action, now);
            }
            Event::Resize(width, height) => self.controller.resize(width, height, now),
            _ => {}
        }
    }

    fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

fn enter_terminal() -> Result<Terminal<CrosstermBackend<Stderr>>> {
    let mut stderr = stderr();
    execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.hide_cursor().context("Failed to hide cursor")?;
    terminal.clear().context("Failed to clear terminal")?;
    Ok(terminal)
}

/// Best-effort teardown after a half-finished setup
fn restore_terminal() {
    if let Err(err) = disable_raw_mode() {
        error!(?err, "failed to disable raw mode");
    }
    if let Err(err) = execute!(stderr(), LeaveAlternateScreen, Show) {
        error!(?err, "failed to leave alternate screen");
    }
}

/// Runs `setup`, calling `undo` before handing back its error
fn undo_on_error<T>(setup: impl FnOnce() -> Result<T>, undo: impl FnOnce()) -> Result<T> {
    setup().inspect_err(|_| undo())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Mute;
    use crate::game::{GameConfig, GameEngine};
    use crate::screen::Screen;
    use crate::storage::MemoryStore;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};
    use std::cell::Cell;

    fn mode() -> PlayMode {
        let controller = GameController::new(
            GameEngine::new(GameConfig::default()),
            Box::new(MemoryStore::new()),
            Box::new(Mute),
        );
        PlayMode::new(controller, Duration::from_millis(16))
    }

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn test_failed_setup_is_undone() {
        let undone = Cell::new(false);
        let result: Result<()> = undo_on_error(
            || Err(anyhow::anyhow!("no alternate screen")),
            || undone.set(true),
        );

        assert!(result.is_err());
        assert!(undone.get());
    }

    #[test]
    fn test_successful_setup_is_kept() {
        let undone = Cell::new(false);
        let result = undo_on_error(|| Ok(7), || undone.set(true));

        assert_eq!(result.unwrap(), 7);
        assert!(!undone.get());
    }

    #[test]
    fn test_key_press_reaches_controller() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Char('2'), KeyEventKind::Press));
        assert_eq!(mode.controller.screen(), Screen::Playing);

        mode.handle_event(key(KeyCode::Char('q'), KeyEventKind::Press));
        assert!(mode.controller.should_quit());
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Char('q'), KeyEventKind::Release));
        assert!(!mode.controller.should_quit());
    }

    #[test]
    fn test_resize_sets_next_grid() {
        let mut mode = mode();
        mode.handle_event(Event::Resize(40, 30));
        mode.handle_event(key(KeyCode::Char('1'), KeyEventKind::Press));

        let run = mode.controller.run().unwrap();
        let expected = GameConfig::from_viewport(40, 30);
        assert_eq!(run.grid_width, expected.grid_width);
        assert_eq!(run.grid_height, expected.grid_height);
    }
}

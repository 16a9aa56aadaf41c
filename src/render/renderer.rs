use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::app::View;
use crate::game::{Difficulty, GameState, Position, TickOutcome};
use crate::screen::Screen;
use crate::skin::{CellFill, Rgb, Skin, Theme};
use crate::storage::TopScores;

/// Entries shown on the scores screen
const SCORES_SHOWN: usize = 5;

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Color::Rgb(rgb.0, rgb.1, rgb.2)
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, view: &View) {
        let palette = view.theme.palette();
        frame.render_widget(
            Block::default().style(Style::default().bg(palette.background.into())),
            frame.area(),
        );

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // HUD
                Constraint::Min(0),    // Board
                Constraint::Length(3), // Key hints
            ])
            .split(frame.area());

        frame.render_widget(self.render_hud(view), chunks[0]);

        match view.base {
            Screen::Menu => {
                let menu = self.render_menu(view);
                frame.render_widget(menu, centered_rect(chunks[1], 44, 14));
            }
            _ => {
                if let Some(run) = view.run {
                    frame.render_widget(self.render_grid(run, view), chunks[1]);
                }
            }
        }

        let overlay = match view.screen {
            Screen::Paused => Some((self.render_paused(view), 40, 10)),
            Screen::GameOver => Some((self.render_game_over(view), 44, 10)),
            Screen::ScoresView => Some((self.render_scores(view), 40, 12)),
            Screen::InfoView => Some((self.render_info(view), 52, 16)),
            Screen::Menu | Screen::Playing => None,
        };
        if let Some((widget, width, height)) = overlay {
            let area = centered_rect(chunks[1], width, height);
            frame.render_widget(Clear, area);
            frame.render_widget(widget, area);
        }

        frame.render_widget(self.render_controls(view), chunks[2]);
    }

    fn render_grid(&self, state: &GameState, view: &View) -> Paragraph<'static> {
        let palette = view.theme.palette();
        let fill = view.skin.fill(view.theme, state.grid_width, view.hue_base);

        // segment index per cell, resolved once per frame
        let mut segments = vec![None; state.grid_width * state.grid_height];
        for (index, pos) in state.snake.body.iter().enumerate() {
            if state.is_in_bounds(*pos) {
                let cell = pos.y as usize * state.grid_width + pos.x as usize;
                segments[cell].get_or_insert(index);
            }
        }

        let mut lines = Vec::with_capacity(state.grid_height);
        for y in 0..state.grid_height {
            let mut spans = Vec::with_capacity(state.grid_width);

            for x in 0..state.grid_width {
                let pos = Position::new(x as i32, y as i32);

                let cell = match segments[y * state.grid_width + x] {
                    Some(index) => snake_cell(&fill, index, pos),
                    None if state.food == Some(pos) => Span::styled(
                        "● ",
                        Style::default()
                            .fg(palette.food.into())
                            .add_modifier(Modifier::BOLD),
                    ),
                    None => Span::styled("· ", Style::default().fg(palette.empty_cell.into())),
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        let border = if state.is_alive {
            palette.text
        } else {
            palette.food
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border.into()))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_hud(&self, view: &View) -> Paragraph<'static> {
        let palette = view.theme.palette();
        let label = Style::default().fg(palette.accent.into());
        let value = Style::default()
            .fg(palette.text.into())
            .add_modifier(Modifier::BOLD);

        let score = view.run.map(|run| run.score).unwrap_or(0);
        let mode = view
            .difficulty
            .map(|d| d.as_str().to_uppercase())
            .unwrap_or_else(|| "-".to_string());

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(score.to_string(), value),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(view.scores.best().max(score).to_string(), value),
            Span::raw("    "),
            Span::styled("Mode: ", label),
            Span::styled(mode, value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(view.elapsed.clone(), value),
        ])];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM))
    }

    fn render_menu(&self, view: &View) -> Paragraph<'static> {
        let palette = view.theme.palette();
        let title = Style::default()
            .fg(palette.snake_head.into())
            .add_modifier(Modifier::BOLD);

        let mut text = vec![
            Line::from(""),
            Line::from(Span::styled("S N A K E", title)),
            Line::from(""),
        ];

        for (key, difficulty) in ["1", "2", "3"].into_iter().zip(Difficulty::ALL) {
            let selected = difficulty == view.selected_difficulty;
            let marker = if selected { "▶ " } else { "  " };
            let style = if selected {
                Style::default()
                    .fg(palette.accent.into())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.text.into())
            };
            text.push(Line::from(vec![
                Span::styled(format!("{marker}[{key}] "), style),
                Span::styled(
                    format!(
                        "{:<7}{:>4} ms",
                        difficulty.as_str().to_uppercase(),
                        difficulty.tick_interval_ms()
                    ),
                    style,
                ),
            ]));
        }

        text.push(Line::from(""));
        text.push(skin_line(view.skin, view.theme));
        text.push(Line::from(Span::styled(
            format!("Theme: {}", view.theme.name()),
            Style::default().fg(palette.text.into()),
        )));
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(
            "Enter to start",
            Style::default().fg(palette.empty_cell.into()),
        )));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(palette.snake_body.into()))
                .title(" Menu "),
        )
    }

    fn render_paused(&self, view: &View) -> Paragraph<'static> {
        let palette = view.theme.palette();
        let mode = view
            .difficulty
            .map(|d| d.as_str().to_uppercase())
            .unwrap_or_else(|| "-".to_string());

        let text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(palette.accent.into())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("Difficulty: {mode}"),
                Style::default().fg(palette.text.into()),
            )),
            skin_line(view.skin, view.theme),
            Line::from(""),
            Line::from(Span::styled(
                "Space to resume, M for menu",
                Style::default().fg(palette.empty_cell.into()),
            )),
        ];

        popup(text, palette.accent)
    }

    fn render_game_over(&self, view: &View) -> Paragraph<'static> {
        let palette = view.theme.palette();
        let score = view.run.map(|run| run.score).unwrap_or(0);

        let headline = match view.last_outcome {
            Some(TickOutcome::BoardFull) => "BOARD CLEARED!",
            _ => "GAME OVER",
        };
        let rank = match view.last_rank {
            Some(0) => "New best score!".to_string(),
            Some(rank) => format!("#{} on the leaderboard", rank + 1),
            None => String::new(),
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                headline,
                Style::default()
                    .fg(palette.food.into())
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(palette.accent.into())),
                Span::styled(
                    score.to_string(),
                    Style::default()
                        .fg(palette.text.into())
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(rank, Style::default().fg(palette.snake_head.into()))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(palette.empty_cell.into())),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(palette.snake_head.into())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(palette.empty_cell.into())),
                Span::styled(
                    "M",
                    Style::default()
                        .fg(palette.food.into())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" for menu", Style::default().fg(palette.empty_cell.into())),
            ]),
        ];

        popup(text, palette.food)
    }

    fn render_scores(&self, view: &View) -> Paragraph<'static> {
        let palette = view.theme.palette();
        let mut text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "HIGH SCORES",
                Style::default()
                    .fg(palette.accent.into())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        match view.scores.top_n(SCORES_SHOWN) {
            TopScores::Empty => text.push(Line::from(Span::styled(
                "No scores yet - be the first!",
                Style::default().fg(palette.text.into()),
            ))),
            TopScores::Entries(entries) => {
                for (i, entry) in entries.iter().enumerate() {
                    text.push(Line::from(vec![
                        Span::styled(
                            format!("{}. {:>5} ", i + 1, entry.score),
                            Style::default().fg(palette.text.into()),
                        ),
                        Span::styled(
                            format!("[{}]", entry.badge()),
                            Style::default().fg(palette.snake_body.into()),
                        ),
                    ]));
                }
            }
        }

        popup(text, palette.accent)
    }

    fn render_info(&self, view: &View) -> Paragraph<'static> {
        let palette = view.theme.palette();
        let key = Style::default()
            .fg(palette.snake_head.into())
            .add_modifier(Modifier::BOLD);
        let desc = Style::default().fg(palette.text.into());

        let rows = [
            ("↑↓←→ / WASD", "steer"),
            ("Space / Esc", "pause / resume"),
            ("1 2 3", "start easy / medium / hard"),
            ("Enter", "start, resume or restart"),
            ("R", "restart after game over"),
            ("K", "next skin"),
            ("T", "toggle theme"),
            ("H / I", "scores / this help"),
            ("M", "back to menu"),
            ("Q", "quit"),
        ];

        let mut text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Eat food to grow. Avoid walls and your tail.",
                desc,
            )),
            Line::from(""),
        ];
        text.extend(rows.iter().map(|(k, d)| {
            Line::from(vec![
                Span::styled(format!("{k:>12}  "), key),
                Span::styled(format!("{d:<26}"), desc),
            ])
        }));

        popup(text, palette.snake_body)
    }

    fn render_controls(&self, view: &View) -> Paragraph<'static> {
        let palette = view.theme.palette();
        let key = Style::default().fg(palette.snake_head.into());
        let sep = Style::default().fg(palette.text.into());

        let hints: &[(&str, &str)] = match view.screen {
            Screen::Menu => &[("1-3", " start"), ("K", " skin"), ("H", " scores"), ("Q", " quit")],
            Screen::Playing => &[("↑↓←→", " move"), ("Space", " pause"), ("T", " theme")],
            Screen::Paused => &[("Space", " resume"), ("K", " skin"), ("M", " menu")],
            Screen::GameOver => &[("R", " restart"), ("M", " menu"), ("H", " scores")],
            Screen::ScoresView | Screen::InfoView => &[("Esc", " back"), ("M", " menu")],
        };

        let mut spans = Vec::new();
        for (i, (k, d)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", sep));
            }
            spans.push(Span::styled(*k, key));
            spans.push(Span::styled(*d, sep));
        }

        Paragraph::new(vec![Line::from(spans)])
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP))
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn snake_cell(fill: &CellFill, index: usize, pos: Position) -> Span<'static> {
    let style = Style::default().fg(fill.paint(index, pos).into());
    if index == 0 {
        Span::styled("██", style.add_modifier(Modifier::BOLD))
    } else {
        Span::styled("▓▓", style)
    }
}

fn skin_line(skin: Skin, theme: Theme) -> Line<'static> {
    let palette = theme.palette();
    let swatch = skin.fill(theme, 5, 0);
    let mut spans = vec![Span::styled(
        format!("Skin: {:<8}", skin.name()),
        Style::default().fg(palette.text.into()),
    )];
    spans.extend((0..5).map(|i| snake_cell(&swatch, i, Position::new(i as i32, 0))));
    Line::from(spans)
}

fn popup(text: Vec<Line<'static>>, border: Rgb) -> Paragraph<'static> {
    Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border.into())),
    )
}

/// A `width` x `height` rectangle centred in `area`, clipped to it
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use super::surface::{Overlay, Scene, Scoreboard};
use crate::game::Position;
use crate::metrics::format_elapsed;

/// Each grid cell is two terminal columns wide so the board looks square
const CELL_WIDTH: u16 = 2;
const GAME_OVER_WIDTH: u16 = 34;
const GAME_OVER_HEIGHT: u16 = 8;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, scene: &Scene) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Scoreboard
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_scoreboard(scene), chunks[0]);

        let board_area = centered(
            chunks[1],
            board_extent(scene.grid_width, CELL_WIDTH),
            board_extent(scene.grid_height, 1),
        );
        frame.render_widget(self.render_grid(scene), board_area);

        if let Overlay::GameOver { score } = scene.overlay {
            let panel = centered(chunks[1], GAME_OVER_WIDTH, GAME_OVER_HEIGHT);
            frame.render_widget(Clear, panel);
            frame.render_widget(self.render_game_over(score), panel);
        }

        frame.render_widget(self.render_footer(scene.overlay), chunks[2]);
    }

    fn render_grid(&self, scene: &Scene) -> Paragraph<'_> {
        let head = scene.snake.first().copied();
        let mut lines = Vec::with_capacity(scene.grid_height);

        for y in 0..scene.grid_height {
            let mut spans = Vec::with_capacity(scene.grid_width);

            for x in 0..scene.grid_width {
                let pos = Position::new(x as i32, y as i32);

                let cell = if Some(pos) == head {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::LightGreen)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if scene.snake.contains(&pos) {
                    Span::styled("● ", Style::default().fg(Color::Green))
                } else if Some(pos) == scene.food {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled("· ", Style::default().fg(Color::Blue))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    fn render_scoreboard(&self, scene: &Scene) -> Paragraph<'_> {
        let Scoreboard {
            score,
            high_score,
            elapsed,
        } = scene.scoreboard;
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let mut spans = vec![
            Span::styled("Score : ", label),
            Span::styled(score.to_string(), value),
            Span::raw("  "),
            Span::styled("High Score : ", label),
            Span::styled(high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(format_elapsed(elapsed), Style::default().fg(Color::White)),
        ];

        if let Some(points) = scene.splash {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!("{points:+}"),
                Style::default()
                    .fg(Color::LightBlue)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn render_game_over(&self, score: u32) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("R", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                Span::styled(" restart  ", Style::default().fg(Color::Gray)),
                Span::styled("Q", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
                Span::styled(" quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_footer(&self, overlay: Overlay) -> Paragraph<'_> {
        let prompt = match overlay {
            Overlay::StartPrompt => Line::from(Span::styled(
                "Press an arrow key or Space to start",
                Style::default()
                    .fg(Color::LightBlue)
                    .add_modifier(Modifier::BOLD),
            )),
            _ => Line::from(""),
        };

        let controls = Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ]);

        Paragraph::new(vec![prompt, controls]).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Terminal cells taken by `cells` grid cells plus the two border lines
fn board_extent(cells: usize, cell_size: u16) -> u16 {
    u16::try_from(cells)
        .unwrap_or(u16::MAX)
        .saturating_mul(cell_size)
        .saturating_add(2)
}

/// A `width` x `height` rect centred in `area`, clipped to it
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

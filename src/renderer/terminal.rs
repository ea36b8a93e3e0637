//! Terminal rendering with ratatui
//!
//! The playfield is sampled onto a character grid scaled to whatever area
//! the terminal gives us. Bricks, paddle and ball snap to the nearest cell.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use super::vertex::colors;
use super::{high_score_label, overlay, score_label};
use crate::sim::GameState;

const FIELD_BG: Color = Color::Rgb(0, 0, 0);

fn rgb(c: [u8; 3]) -> Color {
    Color::Rgb(c[0], c[1], c[2])
}

/// Cell span `[start, end)` covered by the pixel range `[lo, hi)`
fn cell_span(lo: f32, hi: f32, scale: f32, cells: usize) -> (usize, usize) {
    let start = (lo * scale).floor().max(0.0) as usize;
    let end = ((hi * scale).ceil().max(0.0) as usize).min(cells);
    (start.min(cells), end.max(start + 1).min(cells))
}

/// Rasterize the playfield into `width` x `height` cells
pub fn field_lines(state: &GameState, width: usize, height: usize) -> Vec<Line<'static>> {
    if width == 0 || height == 0 {
        return Vec::new();
    }
    let sx = width as f32 / state.config.width;
    let sy = height as f32 / state.config.height;
    let blank = (' ', Style::default().bg(FIELD_BG));
    let mut grid = vec![vec![blank; width]; height];

    for brick in state.bricks.alive() {
        let r = state.config.brick_rect(brick.row, brick.col);
        let color = rgb(colors::brick_base(brick.tier));
        let (x0, x1) = cell_span(r.left(), r.right(), sx, width);
        let row = ((r.top() * sy) as usize).min(height - 1);
        for (x, cell) in grid[row].iter_mut().enumerate().take(x1).skip(x0) {
            let ch = if x == x0 {
                '▐'
            } else if x + 1 == x1 {
                '▌'
            } else {
                '█'
            };
            *cell = (ch, Style::default().fg(color).bg(FIELD_BG));
        }
    }

    let paddle = state.paddle.rect();
    let (x0, x1) = cell_span(paddle.left(), paddle.right(), sx, width);
    let row = ((paddle.top() * sy) as usize).min(height - 1);
    for cell in grid[row].iter_mut().take(x1).skip(x0) {
        *cell = (
            '▀',
            Style::default()
                .fg(Color::Rgb(255, 255, 255))
                .bg(Color::Rgb(191, 191, 191)),
        );
    }

    let ball = state.ball.rect();
    let bx = ((ball.center_x() * sx) as usize).min(width - 1);
    let by = (((ball.top() + ball.h / 2.0) * sy).max(0.0) as usize).min(height - 1);
    grid[by][bx] = (
        '●',
        Style::default()
            .fg(Color::Rgb(255, 255, 255))
            .bg(FIELD_BG)
            .add_modifier(Modifier::BOLD),
    );

    grid.into_iter()
        .map(|row| {
            let spans: Vec<Span<'static>> = row
                .into_iter()
                .map(|(ch, style)| Span::styled(String::from(ch), style))
                .collect();
            Line::from(spans)
        })
        .collect()
}

/// Draw HUD, playfield and overlay into `area`
pub fn render(frame: &mut Frame, area: Rect, state: &GameState, best: u32) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(255, 0, 0)))
        .title(" Breakout ")
        .title_style(Style::default().add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .split(inner);

    let hud = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);
    let hud_style = Style::default().fg(Color::White);
    frame.render_widget(
        Paragraph::new(format!(" {}", score_label(state.score))).style(hud_style),
        hud[0],
    );
    frame.render_widget(
        Paragraph::new(format!("{} ", high_score_label(best)))
            .style(hud_style)
            .alignment(Alignment::Right),
        hud[1],
    );

    let field = chunks[1];
    let lines = field_lines(state, field.width as usize, field.height as usize);
    frame.render_widget(Paragraph::new(lines), field);

    if let Some(o) = overlay(state) {
        let mut text = Vec::new();
        if let Some(title) = o.title {
            text.push(Line::from(Span::styled(
                title,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )));
            text.push(Line::from(Span::styled(
                o.message,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD | Modifier::ITALIC),
            )));
        } else {
            text.push(Line::from(Span::styled(
                o.message,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
        }
        let box_height = text.len() as u16 + 2;
        let box_width = (o.message.len() as u16 + 6).min(field.width);
        let popup = Rect {
            x: field.x + field.width.saturating_sub(box_width) / 2,
            y: field.y + field.height.saturating_sub(box_height) / 2,
            width: box_width,
            height: box_height.min(field.height),
        };
        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL)),
            popup,
        );
    }

    let help = Line::from(vec![
        Span::styled(" ←→ Move ", Style::default().fg(Color::DarkGray)),
        Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
        Span::styled(
            "SPACE Start ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
        Span::styled("Q Quit", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(help), chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn glyphs(lines: &[Line<'static>]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect()
    }

    #[test]
    fn test_field_has_requested_size() {
        let state = GameState::new(GameConfig::default(), 1);
        let lines = field_lines(&state, 85, 35);
        assert_eq!(lines.len(), 35);
        assert!(lines.iter().all(|l| l.spans.len() == 85));
        assert!(field_lines(&state, 0, 10).is_empty());
    }

    #[test]
    fn test_field_shows_bricks_paddle_and_ball() {
        let state = GameState::new(GameConfig::default(), 1);
        let rows = glyphs(&field_lines(&state, 85, 70));

        // Bricks start 60px down: row 6 at 0.1 cells per pixel
        assert!(rows[6].contains('█'));
        assert!(rows.iter().any(|r| r.contains('▀')));
        assert_eq!(rows.iter().filter(|r| r.contains('●')).count(), 1);
    }

    #[test]
    fn test_cleared_field_has_no_bricks() {
        let mut state = GameState::new(GameConfig::default(), 1);
        for row in 0..state.bricks.rows() {
            for col in 0..state.bricks.cols() {
                state.bricks.kill(row, col);
            }
        }
        let rows = glyphs(&field_lines(&state, 85, 70));
        assert!(rows.iter().all(|r| !r.contains('█')));
    }

    #[test]
    fn test_cell_span_clamps() {
        assert_eq!(cell_span(0.0, 100.0, 0.1, 85), (0, 10));
        assert_eq!(cell_span(840.0, 900.0, 0.1, 85), (84, 85));
        assert_eq!(cell_span(-5.0, 3.0, 0.1, 85), (0, 1));
    }
}

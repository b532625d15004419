//! Runner scene rendering.
//!
//! Uses a cell buffer for per-character color control. Mountains, ground,
//! obstacles and the player are drawn into a 2D grid scaled from world
//! units, then stamped row-by-row as Paragraph widgets.

use super::game_common::{
    create_game_layout, format_score, render_game_over_overlay, render_info_panel_frame,
    render_status_bar, GameResultType,
};
use blazing_runner::audio::CuePlayer;
use blazing_runner::high_score::ScoreStore;
use blazing_runner::runner::{GamePhase, RunnerSession};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const BACKGROUND: Color = Color::Rgb(15, 10, 28);
const MOUNTAIN: Color = Color::Rgb(30, 30, 63);
const NEON_PINK: Color = Color::Rgb(255, 0, 255);
const NEON_CYAN: Color = Color::Rgb(0, 255, 255);
const LEG_DIM: Color = Color::Rgb(0, 170, 187);
const GOLD: Color = Color::Rgb(255, 215, 0);

const GROUND_CHAR: char = '▀';
const TICK_CHAR: char = '╵';
const MOUNTAIN_CHAR: char = '▒';
const BODY_CHAR: char = '█';

/// Mountain ridge as (x offset, height above ground) pairs, repeated
/// twice across the field.
const RIDGE: [(f64, f64); 5] = [
    (-100.0, 0.0),
    (250.0, 120.0),
    (500.0, 70.0),
    (850.0, 180.0),
    (1000.0, 0.0),
];

/// Render the whole runner screen.
pub fn render_runner_scene<A: CuePlayer, S: ScoreStore>(
    frame: &mut Frame,
    area: Rect,
    session: &RunnerSession<A, S>,
) {
    if session.phase() == GamePhase::Over {
        render_game_over(frame, area, session);
        return;
    }

    let layout = create_game_layout(frame, area, " Blazing Runner ", NEON_PINK, 10, 24);

    render_play_field(frame, layout.content, session);

    if session.phase() == GamePhase::Ready {
        render_start_prompt(frame, layout.content, session.high_score);
    }

    render_status_bar_content(frame, layout.status_bar, session.phase());
    render_info_panel(frame, layout.info_panel, session);
}

#[derive(Clone, Copy)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: BACKGROUND,
        }
    }
}

/// Height of the mountain layer above the ground at world column `x`.
fn mountain_height_at(x: f64, mountain_x: f64, field_width: f64) -> f64 {
    let mut height: f64 = 0.0;
    for copy in 0..2 {
        let origin = mountain_x + copy as f64 * field_width;
        for pair in RIDGE.windows(2) {
            let (x0, h0) = (origin + pair[0].0, pair[0].1);
            let (x1, h1) = (origin + pair[1].0, pair[1].1);
            if x >= x0 && x <= x1 && x1 > x0 {
                let t = (x - x0) / (x1 - x0);
                height = height.max(h0 + (h1 - h0) * t);
            }
        }
    }
    height
}

fn render_play_field<A: CuePlayer, S: ScoreStore>(
    frame: &mut Frame,
    area: Rect,
    session: &RunnerSession<A, S>,
) {
    if area.height < 4 || area.width < 10 {
        return;
    }

    let field = &session.config().field;
    let width = area.width as usize;
    let height = area.height as usize;
    let x_scale = area.width as f64 / field.width;
    let y_scale = area.height as f64 / field.height;
    let to_col = |x: f64| (x * x_scale).floor() as i32;
    let to_row = |y: f64| (y * y_scale).floor() as i32;

    let flash = session.scenery.jump_flash;
    let background = if flash > 0.0 {
        let level = (flash * 0.5 * 90.0) as u8;
        Color::Rgb(15, 10u8.saturating_add(level), 28u8.saturating_add(level))
    } else {
        BACKGROUND
    };

    let mut buffer: Vec<Vec<Cell>> = vec![
        vec![
            Cell {
                bg: background,
                ..Cell::default()
            };
            width
        ];
        height
    ];

    let ground_y = field.ground_y();
    let ground_row = to_row(ground_y).clamp(0, height as i32 - 1) as usize;

    // ── Mountains ─────────────────────────────────────────────────────
    for col in 0..width {
        let world_x = (col as f64 + 0.5) / x_scale;
        let ridge = mountain_height_at(world_x, session.scenery.mountain_x, field.width);
        if ridge <= 0.0 {
            continue;
        }
        let top_row = to_row(ground_y - ridge).max(0) as usize;
        for row in buffer.iter_mut().take(ground_row).skip(top_row) {
            row[col] = Cell {
                ch: MOUNTAIN_CHAR,
                fg: MOUNTAIN,
                bg: background,
            };
        }
    }

    // ── Ground line and scrolling ticks ───────────────────────────────
    for cell in buffer[ground_row].iter_mut() {
        *cell = Cell {
            ch: GROUND_CHAR,
            fg: Color::Rgb(34, 34, 34),
            bg: BACKGROUND,
        };
    }
    if ground_row + 1 < height {
        let spacing = field.ground_tile_width / 2.0;
        let mut x = session.scenery.ground_x;
        while spacing > 0.0 && x < field.width {
            let col = to_col(x);
            if col >= 0 && (col as usize) < width {
                buffer[ground_row + 1][col as usize] = Cell {
                    ch: TICK_CHAR,
                    fg: NEON_CYAN,
                    bg: BACKGROUND,
                };
            }
            x += spacing;
        }
    }

    // ── Obstacles ─────────────────────────────────────────────────────
    for obstacle in &session.obstacles {
        let left = to_col(obstacle.x);
        let right = to_col(obstacle.right()).max(left + 1);
        let top = to_row(obstacle.y);
        for row in top.max(0)..(ground_row as i32) {
            for col in left.max(0)..right.min(width as i32) {
                buffer[row as usize][col as usize] = Cell {
                    ch: BODY_CHAR,
                    fg: NEON_PINK,
                    bg: background,
                };
            }
        }
    }

    // ── Player ────────────────────────────────────────────────────────
    let player = &session.player;
    let left = to_col(player.x);
    let right = to_col(player.x + player.width).max(left + 1);
    let top = to_row(player.y);
    let bottom = to_row(player.y + player.height).max(top + 1);
    let running = session.phase() == GamePhase::Running && !player.is_jumping;
    for row in top.max(0)..bottom.min(ground_row as i32) {
        let is_leg_row = row == bottom - 1;
        for col in left.max(0)..right.min(width as i32) {
            let cell = if running && is_leg_row {
                // Two alternating leg frames
                let stride = (col - left) % 2 == session.scenery.run_frame() as i32;
                Cell {
                    ch: if stride { BODY_CHAR } else { ' ' },
                    fg: if session.scenery.run_frame() == 0 {
                        NEON_CYAN
                    } else {
                        LEG_DIM
                    },
                    bg: background,
                }
            } else {
                Cell {
                    ch: BODY_CHAR,
                    fg: NEON_PINK,
                    bg: background,
                }
            };
            buffer[row as usize][col as usize] = cell;
        }
    }

    // ── Score (top-right) ─────────────────────────────────────────────
    let score_text = format!("SCORE: {}", format_score(session.score));
    let score_color = if session.is_new_record() {
        GOLD
    } else {
        Color::White
    };
    let start = width.saturating_sub(score_text.chars().count() + 1);
    for (i, ch) in score_text.chars().enumerate() {
        if let Some(cell) = buffer[0].get_mut(start + i) {
            *cell = Cell {
                ch,
                fg: score_color,
                bg: background,
            };
        }
    }

    // ── Stamp rows ────────────────────────────────────────────────────
    for (row_idx, row_data) in buffer.iter().enumerate() {
        let mut spans: Vec<Span> = Vec::new();
        let mut current_fg = Color::Reset;
        let mut current_bg = Color::Reset;
        let mut current_text = String::new();

        for &cell in row_data.iter() {
            if (cell.fg != current_fg || cell.bg != current_bg) && !current_text.is_empty() {
                spans.push(Span::styled(
                    std::mem::take(&mut current_text),
                    Style::default().fg(current_fg).bg(current_bg),
                ));
            }
            current_fg = cell.fg;
            current_bg = cell.bg;
            current_text.push(cell.ch);
        }
        if !current_text.is_empty() {
            spans.push(Span::styled(
                current_text,
                Style::default().fg(current_fg).bg(current_bg),
            ));
        }

        let row_area = Rect::new(area.x, area.y + row_idx as u16, area.width, 1);
        frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
    }
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, phase: GamePhase) {
    match phase {
        GamePhase::Ready => render_status_bar(
            frame,
            area,
            "Ready",
            NEON_CYAN,
            &[("[Space/Up/Click]", "Start"), ("[Q]", "Quit")],
        ),
        GamePhase::Running => render_status_bar(
            frame,
            area,
            "Run!",
            NEON_PINK,
            &[("[Space/Up/Click]", "Jump"), ("[Q]", "Quit")],
        ),
        GamePhase::Over => render_status_bar(
            frame,
            area,
            "Game Over",
            Color::Red,
            &[("[Enter/R]", "Restart"), ("[Q]", "Quit")],
        ),
    }
}

fn render_info_panel<A: CuePlayer, S: ScoreStore>(
    frame: &mut Frame,
    area: Rect,
    session: &RunnerSession<A, S>,
) {
    let inner = render_info_panel_frame(frame, area);
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White);
    let player = &session.player;
    let speed_pct = (session.difficulty.speed_fraction() * 100.0).round() as u32;

    let lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled("State: ", label),
            Span::styled(session.phase().name(), Style::default().fg(NEON_CYAN)),
        ]),
        Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                format_score(session.score),
                value.add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Best:  ", label),
            Span::styled(format_score(session.high_score), Style::default().fg(GOLD)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Speed: ", label),
            Span::styled(
                format!("{:.0} ({}%)", session.speed(), speed_pct),
                value,
            ),
        ]),
        Line::from(vec![
            Span::styled("Gravity: ", label),
            Span::styled(format!("{:.0}", player.gravity), value),
        ]),
        Line::from(vec![
            Span::styled("Jump: ", label),
            Span::styled(format!("{:.0}", player.max_jump_velocity), value),
        ]),
        Line::from(vec![
            Span::styled("Streak: ", label),
            Span::styled(
                format!(
                    "{}/{}",
                    player.successful_jumps,
                    session.difficulty.config().success_threshold
                ),
                value,
            ),
        ]),
        Line::from(vec![
            Span::styled("Adapted: ", label),
            Span::styled(
                format!(
                    "{}/{}",
                    session.difficulty.adaptations,
                    session.difficulty.config().max_adaptations
                ),
                value,
            ),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_start_prompt(frame: &mut Frame, area: Rect, high_score: u64) {
    if area.height < 5 || area.width < 30 {
        return;
    }

    let center_y = area.y + area.height / 3;
    let prompt = "[ Press Space/Up to Start ]";
    let best = format!("High Score: {}", format_score(high_score));

    for (offset, text, style) in [
        (
            0u16,
            prompt.to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        (1, best, Style::default().fg(GOLD)),
    ] {
        let len = text.chars().count() as u16;
        let x = area.x + area.width.saturating_sub(len) / 2;
        let line_area = Rect::new(x, center_y + offset, len.min(area.width), 1);
        frame.render_widget(Paragraph::new(Span::styled(text, style)), line_area);
    }
}

fn render_game_over<A: CuePlayer, S: ScoreStore>(
    frame: &mut Frame,
    area: Rect,
    session: &RunnerSession<A, S>,
) {
    let new_record = session.summary().is_some_and(|s| s.new_record);
    let (result_type, title) = if new_record {
        (GameResultType::NewRecord, ":: NEW HIGH SCORE! ::")
    } else {
        (GameResultType::Over, "GAME OVER")
    };

    render_game_over_overlay(
        frame,
        area,
        result_type,
        title,
        &format!("Final Score: {}", format_score(session.score)),
        &format!("High Score: {}", format_score(session.high_score)),
        "[Enter/R] Restart   [Q] Quit",
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mountain_height_at_peaks() {
        assert!((mountain_height_at(250.0, 0.0, 800.0) - 120.0).abs() < 1e-9);
        assert!((mountain_height_at(850.0, 0.0, 800.0) - 180.0).abs() < 1e-9);
        // Scrolled left by 100
        assert!((mountain_height_at(150.0, -100.0, 800.0) - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_mountain_height_between_ridges() {
        let h = mountain_height_at(375.0, 0.0, 800.0);
        assert!((h - 95.0).abs() < 1e-9);
    }
}

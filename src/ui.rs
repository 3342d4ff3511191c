#![allow(
    // Board dimensions are capped at 64 cells, far below u16::MAX
    clippy::cast_possible_truncation
)]

use crate::app::App;
use crate::config::palette::Palette;
use crate::game::{CELL_HEIGHT, CELL_WIDTH, EMPTY_CELL, FRAME_CORNER, FRAME_EDGE, ROW_BORDER};
use crate::input::KeyBindings;
use crate::view::BoardView;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const MIN_INFO_WIDTH: u16 = 20;

pub fn render(f: &mut Frame, app: &App) {
    draw(f, app.view(), app.palette(), app.bindings());
}

/// Draws the whole screen from the view's latest published state.
pub fn draw(f: &mut Frame, view: &BoardView, palette: &Palette, bindings: &KeyBindings) {
    let Some(snapshot) = view.snapshot() else {
        return;
    };

    let board_width = snapshot.width() as u16 * CELL_WIDTH + 2; // +2 for borders
    let board_height = snapshot.height() as u16 * CELL_HEIGHT + 2; // +2 for borders
    let min_total_width = board_width + MIN_INFO_WIDTH;
    let min_total_height = board_height + 2; // Title row and its border

    // Check if the terminal is too small to render the game properly
    if f.area().width < min_total_width || f.area().height < min_total_height {
        let warning_text = Paragraph::new(format!(
            "Terminal too small!\nNeed at least {min_total_width}x{min_total_height}."
        ))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("stackfall"));

        let warning_area = centered_rect(80, 50, f.area());
        f.render_widget(warning_text, warning_area);
        return;
    }

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(board_width), Constraint::Min(MIN_INFO_WIDTH)])
        .split(f.area());

    let game_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),            // Title
            Constraint::Length(board_height), // Game board (fixed height)
            Constraint::Fill(1),
        ])
        .split(main_layout[0]);

    let title = Paragraph::new("STACKFALL")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, game_layout[0]);

    render_game_board(f, view, palette, game_layout[1]);
    render_info(f, view, bindings, main_layout[1]);
}

/// Draws the snapshot cells inside a bordered area, then any overlay.
///
/// # Panics
///
/// Panics when the snapshot contains a block key the palette has no color for.
pub fn render_game_board(f: &mut Frame, view: &BoardView, palette: &Palette, area: Rect) {
    let Some(snapshot) = view.snapshot() else {
        return;
    };

    let inner_area = Block::default().borders(Borders::ALL).inner(area);
    f.render_widget(Block::default().borders(Borders::ALL), area);

    let mut x: u16 = 0;
    let mut y: u16 = 0;
    let rows = snapshot.height() as u16;
    let text = snapshot.text().get(view.top_of_game()..).unwrap_or_default();

    for c in text.chars() {
        if y >= rows {
            break;
        }
        match c {
            '\n' => {
                y += 1;
                x = 0;
            }
            ROW_BORDER | FRAME_CORNER | FRAME_EDGE => {}
            EMPTY_CELL => x += 1,
            key => {
                let Some(color) = palette.color(key) else {
                    panic!("snapshot references unmapped block key {key:?}");
                };
                draw_cell(f, inner_area, x, y, color);
                x += 1;
            }
        }
    }

    if view.is_game_over() {
        render_overlay(f, inner_area, "GAME OVER", Color::Red);
    } else if view.is_paused() {
        render_overlay(f, inner_area, "PAUSED", Color::Green);
    }
}

// One board cell is CELL_WIDTH x CELL_HEIGHT terminal cells
fn draw_cell(f: &mut Frame, inner_area: Rect, x: u16, y: u16, color: Color) {
    let left = inner_area.left() + x * CELL_WIDTH;
    let top = inner_area.top() + y * CELL_HEIGHT;
    for dy in 0..CELL_HEIGHT {
        for dx in 0..CELL_WIDTH {
            let (cx, cy) = (left + dx, top + dy);
            if cx >= inner_area.right() || cy >= inner_area.bottom() {
                continue;
            }
            if let Some(cell) = f.buffer_mut().cell_mut((cx, cy)) {
                cell.set_symbol("█");
                cell.set_fg(color);
                cell.set_bg(Color::Black);
            }
        }
    }
}

fn render_overlay(f: &mut Frame, inner_area: Rect, text: &str, color: Color) {
    let width = (text.len() as u16).min(inner_area.width);
    let overlay_area = Rect {
        x: inner_area.x + (inner_area.width - width) / 2,
        y: inner_area.y + inner_area.height / 2,
        width,
        height: 1,
    };

    let overlay = Paragraph::new(text.to_string())
        .alignment(Alignment::Center)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD));
    f.render_widget(Clear, overlay_area);
    f.render_widget(overlay, overlay_area);
}

fn render_info(f: &mut Frame, view: &BoardView, bindings: &KeyBindings, area: Rect) {
    let info_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(4), // Lines and status
            Constraint::Min(3),    // Controls
        ])
        .split(area);

    let info_title = Paragraph::new("INFO")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(info_title, info_layout[0]);

    let (status, status_color) = if view.is_game_over() {
        ("GAME OVER!", Color::Red)
    } else if view.is_paused() {
        ("Paused", Color::Green)
    } else {
        ("Playing", Color::White)
    };
    let stats = Paragraph::new(format!("Lines: {}\n{status}", view.lines_cleared()))
        .style(Style::default().fg(status_color))
        .wrap(Wrap { trim: true });
    f.render_widget(stats, info_layout[1]);

    let controls = Paragraph::new(format!("Controls:\n{}", bindings.help_lines().join("\n")))
        .block(Block::default().borders(Borders::TOP))
        .wrap(Wrap { trim: true });
    f.render_widget(controls, info_layout[2]);
}

/// Helper function to create a centered rect using up certain percentage of the available rect
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

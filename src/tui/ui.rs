//! Stateless UI rendering for tic-tac-toe.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tictactoe_engine::games::tictactoe::{Cell, PlacementMode, Player, SIDE};
use tictactoe_engine::{Palette, Rgb};

use super::app::App;

fn color((r, g, b): Rgb) -> Color {
    Color::Rgb(r, g, b)
}

/// Renders the whole screen.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let palette = app.theme().palette();
    frame.render_widget(
        Block::default().style(Style::default().bg(color(palette.background))),
        area,
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(11),   // Board
            Constraint::Length(3), // Status
            Constraint::Length(3), // Scores and keys
        ])
        .split(area);

    let settings = app.session().coordinator().settings();
    let mode = match settings.placement_mode() {
        PlacementMode::Direct => "classic",
        PlacementMode::Gravity => "gravity",
    };
    let title = Paragraph::new(format!(
        "Tic Tac Toe - {} - {} - {}",
        mode,
        app.opponent_label(),
        app.theme()
    ))
    .style(
        Style::default()
            .fg(color(palette.text))
            .add_modifier(Modifier::BOLD),
    )
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    draw_board(frame, chunks[1], app, &palette);

    let status = Paragraph::new(app.status())
        .style(Style::default().fg(color(palette.o)))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color(palette.grid))),
        );
    frame.render_widget(status, chunks[2]);

    let footer = vec![
        Line::from(format!(
            "X {}  O {}  Draws {}{}",
            app.wins(Player::X),
            app.wins(Player::O),
            app.draws(),
            if app.sound() { "" } else { "  (muted)" }
        )),
        Line::from("arrows/1-9 move  enter place  r reset  g gravity  a AI  t theme  m mute  q quit"),
    ];
    let footer = Paragraph::new(footer)
        .style(Style::default().fg(color(palette.text)))
        .alignment(Alignment::Center);
    frame.render_widget(footer, chunks[3]);
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let board_area = center_rect(area, 40, 11);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    for row in 0..SIDE {
        draw_row(frame, rows[row * 2], app, palette, row);
        if row + 1 < SIDE {
            draw_separator(frame, rows[row * 2 + 1], palette);
        }
    }
}

fn draw_row(frame: &mut Frame, area: Rect, app: &App, palette: &Palette, row: usize) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(area);

    for col in 0..SIDE {
        draw_cell(frame, cols[col * 2], app, palette, row * SIDE + col);
        if col + 1 < SIDE {
            draw_separator_vertical(frame, cols[col * 2 + 1], palette);
        }
    }
}

fn draw_cell(frame: &mut Frame, area: Rect, app: &App, palette: &Palette, index: usize) {
    let coordinator = app.session().coordinator();
    let cell = coordinator.board().get(index).unwrap_or_default();
    let winning = coordinator
        .winning_line()
        .is_some_and(|line| line.contains(index));

    let (symbol, base_style) = match cell {
        Cell::Empty => (format!(" {} ", index + 1), Style::default().fg(color(palette.grid))),
        Cell::Occupied(Player::X) => (
            " X ".to_string(),
            Style::default()
                .fg(color(palette.x))
                .add_modifier(Modifier::BOLD),
        ),
        Cell::Occupied(Player::O) => (
            " O ".to_string(),
            Style::default()
                .fg(color(palette.o))
                .add_modifier(Modifier::BOLD),
        ),
    };

    let style = if winning {
        base_style.bg(color(palette.win)).fg(color(palette.background))
    } else if index == app.cursor() {
        base_style.add_modifier(Modifier::REVERSED)
    } else {
        base_style
    };

    let paragraph =
        Paragraph::new(Line::from(Span::styled(symbol, style))).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_separator(frame: &mut Frame, area: Rect, palette: &Palette) {
    let sep = Paragraph::new("────────────────────────────────────────")
        .style(Style::default().fg(color(palette.grid)));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect, palette: &Palette) {
    let sep = Paragraph::new("│\n│\n│").style(Style::default().fg(color(palette.grid)));
    frame.render_widget(sep, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(vert[1])[1]
}

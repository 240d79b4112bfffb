use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::{
    io::{stdout, Stdout},
    time::{Duration, Instant},
};

use blockfall::{
    config::{DEFAULT_HEIGHT, DEFAULT_WIDTH},
    CellState, Game, GameConfig, GameEvent, GameState, RandomPieceProvider, TetrominoType,
};

// ============================================================================
// Command Line
// ============================================================================

/// Falling-block puzzle in the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Seed for piece selection; omit for a fresh random game.
    #[arg(long)]
    seed: Option<u64>,

    /// Board width in cells.
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: usize,

    /// Board height in cells.
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: usize,
}

// ============================================================================
// Visual Constants
// ============================================================================

const CELL_WIDTH: u16 = 2;
const BLOCK_CHAR: &str = "██";
const EMPTY_CHAR: &str = "  ";
const INFO_WIDTH: u16 = 30;

fn tetromino_color(t: TetrominoType) -> Color {
    match t {
        TetrominoType::I => Color::Cyan,
        TetrominoType::O => Color::Yellow,
        TetrominoType::T => Color::Magenta,
        TetrominoType::S => Color::Green,
        TetrominoType::Z => Color::Red,
        TetrominoType::J => Color::Blue,
        TetrominoType::L => Color::Rgb(255, 165, 0),
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Host-side state that is not part of the game itself.
struct Hud {
    last_message: Option<String>,
}

impl Hud {
    fn absorb(&mut self, events: Vec<GameEvent>) {
        for event in events {
            match event {
                GameEvent::LinesCleared(n) => {
                    self.last_message = Some(format!("{n} line{}!", if n == 1 { "" } else { "s" }));
                }
                GameEvent::StatusChanged(label) => self.last_message = Some(label.to_string()),
                GameEvent::LevelUp(level) => self.last_message = Some(format!("Level {level}")),
                GameEvent::GameRestarted => self.last_message = None,
                _ => {}
            }
        }
    }
}

fn render(frame: &mut Frame, game: &Game, hud: &Hud) {
    let area = frame.size();
    render_game(frame, game, hud, area);

    if game.state() == GameState::GameOver {
        render_game_over(frame, game, area);
    }
}

fn render_game(frame: &mut Frame, game: &Game, hud: &Hud, area: Rect) {
    let cells_wide = u16::try_from(game.grid().width()).unwrap_or(u16::MAX);
    let cells_tall = u16::try_from(game.grid().height()).unwrap_or(u16::MAX);
    let grid_display_width = cells_wide.saturating_mul(CELL_WIDTH).saturating_add(2);
    let grid_display_height = cells_tall.saturating_add(2);
    let total_width = grid_display_width.saturating_add(INFO_WIDTH);
    let total_height = grid_display_height.saturating_add(2);

    let main_area = centered_rect(total_width, total_height, area);

    let vertical = Layout::vertical([
        Constraint::Length(grid_display_height),
        Constraint::Fill(1),
    ])
    .split(main_area);

    let horizontal = Layout::horizontal([
        Constraint::Length(grid_display_width),
        Constraint::Length(INFO_WIDTH),
    ])
    .split(vertical[0]);

    render_grid(frame, game, horizontal[0]);
    render_info(frame, game, hud, horizontal[1]);

    let controls = Paragraph::new(Line::from("←→: Move | ↓: Drop | ↑: Rotate | R: Restart | Q/ESC: Quit"))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(controls, vertical[1]);
}

fn render_grid(frame: &mut Frame, game: &Game, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Blockfall ")
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = game
        .render_grid()
        .into_iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .into_iter()
                .map(|cell| match cell {
                    CellState::Empty => Span::raw(EMPTY_CHAR),
                    CellState::Filled(kind) => {
                        Span::styled(BLOCK_CHAR, Style::default().fg(tetromino_color(kind)))
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_info(frame: &mut Frame, game: &Game, hud: &Hud, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Info ")
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("Score", Style::default().fg(Color::Yellow))),
        Line::from(format!("{}", game.score())),
        Line::from(""),
        Line::from(Span::styled("Status", Style::default().fg(Color::Magenta))),
        Line::from(game.status()),
        Line::from(""),
        Line::from(Span::styled("Level", Style::default().fg(Color::Green))),
        Line::from(format!("{}", game.level())),
        Line::from(""),
        Line::from(Span::styled("Lines", Style::default().fg(Color::Cyan))),
        Line::from(format!("{}", game.lines_cleared())),
        Line::from(""),
        Line::from(hud.last_message.clone().unwrap_or_default()),
    ];

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

fn render_game_over(frame: &mut Frame, game: &Game, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("GAME OVER", Style::default().fg(Color::Red))),
        Line::from(""),
        Line::from(format!("Score: {}", game.score())),
        Line::from(game.status()),
        Line::from(""),
        Line::from(Span::styled(
            "R to restart, ESC to quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Game Over ")
            .title_alignment(Alignment::Center)
            .style(Style::default().bg(Color::Black)),
    );

    frame.render_widget(paragraph, centered_rect(30, 10, area));
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let horizontal = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width.min(area.width)),
        Constraint::Fill(1),
    ])
    .split(area);

    let vertical = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(area.height)),
        Constraint::Fill(1),
    ])
    .split(horizontal[1]);

    vertical[1]
}

// ============================================================================
// Main Loop
// ============================================================================

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, mut game: Game) -> Result<()> {
    let mut hud = Hud { last_message: None };
    let mut last_tick = Instant::now();

    loop {
        hud.absorb(game.take_events());
        terminal.draw(|frame| render(frame, &game, &hud))?;

        let tick_duration = game.tick_interval();
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => break,
                        KeyCode::Char('r') | KeyCode::Char('R') => {
                            game.restart();
                            last_tick = Instant::now();
                        }
                        KeyCode::Left => {
                            game.move_left();
                        }
                        KeyCode::Right => {
                            game.move_right();
                        }
                        KeyCode::Down => {
                            game.soft_drop();
                        }
                        KeyCode::Up => {
                            game.rotate();
                        }
                        _ => {}
                    }
                }
            }
        }

        // Gravity stops once the game is over; only restart revives it.
        if !game.is_game_over() && last_tick.elapsed() >= tick_duration {
            game.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}

fn start(game: Game) -> Result<()> {
    stdout()
        .execute(EnterAlternateScreen)
        .context("failed to enter alternate screen")?;
    let mut terminal =
        Terminal::new(CrosstermBackend::new(stdout())).context("failed to create terminal")?;

    run(&mut terminal, game)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let provider = match args.seed {
        Some(seed) => RandomPieceProvider::seeded(seed),
        None => RandomPieceProvider::new(),
    };
    let game = Game::with_config(GameConfig::with_size(args.width, args.height), Box::new(provider))
        .context("invalid board configuration")?;

    enable_raw_mode().context("failed to enable raw mode")?;

    let result = start(game);

    // Always try to restore terminal state.
    let _ = disable_raw_mode();
    let _ = stdout().execute(LeaveAlternateScreen);
    result
}

//! Watch command implementation - Interactive TUI viewer.

// Sprite rectangles are u32 screen units; the viewport is indexed in usize
#![allow(clippy::cast_possible_truncation)]

use super::{CliError, WorldArgs};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use snakepit::render::{CellSize, Sprite, scene};
use snakepit::{EndReason, Phase, Rgb, Signal, SimConfig, World};
use std::io::stdout;
use std::time::{Duration, Instant};
use tracing::warn;

const MIN_TICK_MS: u64 = 10;
const MAX_TICK_MS: u64 = 2000;

/// Execute the watch command.
///
/// # Errors
///
/// Returns an error if the world cannot be built or the TUI fails.
pub(crate) fn execute(
    world: WorldArgs,
    seed: Option<u64>,
    fps: u32,
    cell_width: u16,
    max_ticks: Option<u64>,
) -> Result<(), CliError> {
    let config = world.config(max_ticks);
    let colors = world.colors();
    let sim = World::initialize(config, &colors, seed)?;

    let cell = CellSize {
        width: u32::from(cell_width),
        height: 1,
    };
    let tick_ms = (1000 / u64::from(fps.max(1))).max(MIN_TICK_MS);

    run_tui(App::new(sim, config, colors, cell, tick_ms))
}

/// App state for the TUI.
struct App {
    world: World,
    config: SimConfig,
    colors: Vec<Rgb>,
    cell: CellSize,
    paused: bool,
    tick_ms: u64,
    last_step: Instant,
    last_error: Option<String>,
}

impl App {
    fn new(world: World, config: SimConfig, colors: Vec<Rgb>, cell: CellSize, tick_ms: u64) -> Self {
        Self {
            world,
            config,
            colors,
            cell,
            paused: false,
            tick_ms,
            last_step: Instant::now(),
            last_error: None,
        }
    }

    fn step_forward(&mut self) {
        if self.world.is_running() {
            self.world.tick(Signal::Continue);
            self.last_step = Instant::now();
        }
    }

    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    fn increase_speed(&mut self) {
        self.tick_ms = (self.tick_ms / 2).max(MIN_TICK_MS);
    }

    fn decrease_speed(&mut self) {
        self.tick_ms = (self.tick_ms * 2).min(MAX_TICK_MS);
    }

    /// Start over with a fresh random seed.
    fn restart(&mut self) {
        match World::initialize(self.config, &self.colors, None) {
            Ok(world) => {
                self.world = world;
                self.last_error = None;
            }
            Err(e) => {
                warn!(error = %e, "restart failed");
                self.last_error = Some(e.to_string());
            }
        }
        self.last_step = Instant::now();
    }

    fn should_auto_step(&self) -> bool {
        !self.paused
            && self.world.is_running()
            && self.last_step.elapsed() >= Duration::from_millis(self.tick_ms)
    }
}

fn run_tui(mut app: App) -> Result<(), CliError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| CliError::new(e.to_string()))?;

    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal even if the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), CliError> {
    loop {
        terminal
            .draw(|f| ui(f, app))
            .map_err(|e| CliError::new(e.to_string()))?;

        if app.should_auto_step() {
            app.step_forward();
        }

        let wait = Duration::from_millis(app.tick_ms.min(50));
        if event::poll(wait)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    app.world.tick(Signal::Stop);
                    return Ok(());
                }
                KeyCode::Char(' ') => app.toggle_pause(),
                KeyCode::Right | KeyCode::Char('l') => {
                    app.paused = true;
                    app.step_forward();
                }
                KeyCode::Char('+' | '=') => app.increase_speed(),
                KeyCode::Char('-') => app.decrease_speed(),
                KeyCode::Char('r') => app.restart(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], app);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(75), Constraint::Percentage(25)])
        .split(chunks[1]);

    render_map(f, main_chunks[0], app);
    render_stats(f, main_chunks[1], app);

    render_footer(f, chunks[2], app);
}

fn status_label(app: &App) -> &'static str {
    match app.world.phase() {
        Phase::Ended(EndReason::AllDead) => "ALL DEAD",
        Phase::Ended(EndReason::Stopped) => "STOPPED",
        Phase::Ended(EndReason::TickLimit) => "TICK LIMIT",
        Phase::Ended(EndReason::GridFull) => "GRID FULL",
        Phase::Running if app.paused => "PAUSED",
        Phase::Running => "RUNNING",
    }
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let title = format!(
        " Snakepit | Tick {} | Seed {} | {} | Speed: {}ms ",
        app.world.tick_count(),
        app.world.seed(),
        status_label(app),
        app.tick_ms
    );

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

const fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

/// Paint sprites into a `width` x `height` viewport anchored at the grid
/// origin, later sprites on top. Cells outside the viewport are dropped.
fn paint_viewport(sprites: &[Sprite], width: usize, height: usize) -> Vec<Option<Rgb>> {
    let mut canvas = vec![None; width * height];
    for sprite in sprites {
        let rect = sprite.rect;
        let (left, top) = (rect.x as usize, rect.y as usize);
        let right = (left + rect.width as usize).min(width);
        let bottom = (top + rect.height as usize).min(height);
        for y in top..bottom {
            for x in left..right {
                canvas[y * width + x] = Some(sprite.color);
            }
        }
    }
    canvas
}

fn render_map(f: &mut Frame, area: Rect, app: &App) {
    let grid = app.world.grid();
    let columns = usize::from(grid.width()) * app.cell.width as usize;
    let rows = usize::from(grid.height()) * app.cell.height as usize;

    // Show the portion of the grid that fits
    let visible_width = usize::from(area.width.saturating_sub(2)).min(columns);
    let visible_height = usize::from(area.height.saturating_sub(2)).min(rows);
    let canvas = paint_viewport(&scene(&app.world, app.cell), visible_width, visible_height);

    let lines: Vec<Line> = canvas
        .chunks(visible_width.max(1))
        .take(visible_height)
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .map(|cell| match cell {
                    Some(rgb) => Span::styled("█", Style::default().fg(to_color(*rgb))),
                    None => Span::raw(" "),
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let map_widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {}x{} ", grid.width(), grid.height())),
    );

    f.render_widget(map_widget, area);
}

fn render_stats(f: &mut Frame, area: Rect, app: &App) {
    let mut lines = vec![
        Line::from(format!(
            " Alive: {}/{}",
            app.world.alive_count(),
            app.world.snakes().len()
        )),
        Line::from(""),
    ];

    for snake in app.world.snakes() {
        let status = if snake.is_alive() {
            format!("length {}", snake.length())
        } else {
            format!("length {} [DEAD]", snake.length())
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!(" Snake {} ", snake.id()),
                Style::default()
                    .fg(to_color(snake.color()))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(status),
        ]));
    }

    if let Some(error) = &app.last_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {error}"),
            Style::default().fg(Color::Red),
        )));
    }

    let stats_widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Snakes "))
        .wrap(Wrap { trim: false });

    f.render_widget(stats_widget, area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let controls = if app.world.is_running() {
        " [q] Quit  [Space] Pause  [→] Step  [+/-] Speed  [r] Restart "
    } else {
        " [q] Quit  [r] Restart "
    };

    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}

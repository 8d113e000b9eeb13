//! # Life Arcade showcase
//!
//! A terminal front end for the automaton engine using `ratatui` for the
//! interface and `crossterm` for terminal manipulation. Every arcade entity
//! is drawn in its own pane, next to a diagnostics panel.
//!
//! ## Controls
//!
//! * Space: play/pause
//! * Enter: advance the player by one generation (when paused)
//! * n: stamp the next catalogue pattern into the player
//! * r: reseed every entity
//! * q: quit

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, warn, LevelFilter};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Terminal,
};
use simple_logger::SimpleLogger;
use std::{
    io,
    time::{Duration, Instant},
};
use sysinfo::{System, SystemExt};

use life_arcade::{
    patterns, Arcade, ArcadeConfig, CellGrid, Entity, EntityKind, HasAutomaton, Stability,
};

/// Front-end state around the arcade.
struct App {
    arcade: Arcade,
    /// Indicates whether frames are currently being ticked
    running: bool,
    /// Index into the pattern catalogue of the next pattern to stamp
    pattern: usize,
    /// System information for resource monitoring
    sys: System,
}

impl App {
    fn new(config: ArcadeConfig) -> Result<App> {
        Ok(App {
            arcade: Arcade::new(config).context("building the arcade")?,
            running: false,
            pattern: 0,
            sys: System::new_all(),
        })
    }

    fn tick(&mut self) {
        self.arcade.tick();
        self.sys.refresh_memory();
    }

    /// Ticks frames until the player has computed one more generation.
    fn step(&mut self) {
        let frames = self
            .arcade
            .find(EntityKind::Player)
            .and_then(|player| player.cadence().frames_per_generation())
            .unwrap_or(1);
        for _ in 0..frames {
            self.tick();
        }
    }

    fn stamp_next_pattern(&mut self) {
        let names: Vec<&str> = patterns::names().collect();
        let name = names[self.pattern % names.len()];
        self.pattern = (self.pattern + 1) % names.len();
        match self.arcade.find_mut(EntityKind::Player) {
            Some(player) => {
                if let Err(e) = player.stamp(name) {
                    warn!("could not stamp {}: {}", name, e);
                }
            }
            None => warn!("no player to stamp {} into", name),
        }
    }

    fn toggle_running(&mut self) {
        self.running = !self.running;
    }
}

fn color_of(kind: EntityKind) -> Color {
    match kind {
        EntityKind::Player => Color::Cyan,
        EntityKind::Enemy => Color::Red,
        EntityKind::Projectile => Color::Yellow,
        EntityKind::Background => Color::DarkGray,
        EntityKind::Label => Color::White,
    }
}

fn grid_text(grid: &CellGrid) -> String {
    let mut cells = String::with_capacity((grid.cols() + 1) * grid.rows());
    for y in 0..grid.rows() {
        if let Some(row) = grid.row(y) {
            cells.extend(row.iter().map(|cell| if cell.is_alive() { '•' } else { ' ' }));
        }
        cells.push('\n');
    }
    cells
}

/// Draws one entity's automaton.
fn draw_entity(f: &mut ratatui::Frame, entity: &Entity, area: Rect) {
    let grid = match entity.automaton() {
        Some(grid) => grid,
        None => return,
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("{:?} [gen {}]", entity.kind(), grid.generation()));
    let paragraph = Paragraph::new(grid_text(grid))
        .style(Style::default().fg(color_of(entity.kind())))
        .block(block);
    f.render_widget(paragraph, area);
}

fn describe(stability: Stability) -> String {
    match stability {
        Stability::Evolving => "evolving".to_string(),
        Stability::Stable { period: 1 } => "still".to_string(),
        Stability::Stable { period } => format!("period {}", period),
        Stability::Extinct => "extinct".to_string(),
    }
}

/// Draws the diagnostics panel.
fn draw_stats(f: &mut ratatui::Frame, app: &App, area: Rect) {
    let memory_used = app.sys.used_memory() / 1024;
    let memory_total = app.sys.total_memory() / 1024;

    let mut text = format!(
        "Frame: {}\nStatus: {}\nNext pattern: {}\n\n",
        app.arcade.frame(),
        if app.running { "Running" } else { "Paused" },
        patterns::names().nth(app.pattern).unwrap_or("-"),
    );
    for entity in app.arcade.entities() {
        if let Some(grid) = entity.automaton() {
            let stats = grid.stats();
            text.push_str(&format!(
                "{:?}\n  Generation: {}\n  Alive: {} ({:.0}%)\n  Births/Deaths: {}/{}\n  Created/Destroyed: {}/{}\n  State: {}\n",
                entity.kind(),
                grid.generation(),
                grid.count_alive_cells(),
                grid.get_density() * 100.0,
                stats.last.births,
                stats.last.deaths,
                stats.cells_created,
                stats.cells_destroyed,
                describe(entity.stability()),
            ));
        }
    }
    text.push_str(&format!(
        "\nMemory Usage: {}KB/{:.2}MB\n",
        memory_used,
        memory_total as f64 / 1024.0
    ));

    let stats_widget = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Diagnostics"))
        .wrap(Wrap { trim: true });
    f.render_widget(stats_widget, area);
}

fn draw(f: &mut ratatui::Frame, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(75), Constraint::Percentage(25)].as_ref())
        .split(f.size());
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)].as_ref())
        .split(columns[0]);

    let (background, actors): (Vec<&Entity>, Vec<&Entity>) = app
        .arcade
        .entities()
        .iter()
        .filter(|entity| entity.automaton().is_some())
        .partition(|entity| entity.kind() == EntityKind::Background);

    if let Some(entity) = background.first() {
        draw_entity(f, entity, rows[0]);
    }
    if !actors.is_empty() {
        let constraints: Vec<Constraint> = actors
            .iter()
            .map(|_| Constraint::Ratio(1, actors.len() as u32))
            .collect();
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(rows[1]);
        for (entity, pane) in actors.iter().zip(panes.iter()) {
            draw_entity(f, entity, *pane);
        }
    }
    draw_stats(f, app, columns[1]);
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    let tick_rate = Duration::from_secs_f64(1.0 / app.arcade.config().render_fps.max(1) as f64);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| draw(f, &app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Char(' ') => app.toggle_running(),
                    KeyCode::Char('r') => app.arcade.reseed(),
                    KeyCode::Char('n') => app.stamp_next_pattern(),
                    KeyCode::Enter => {
                        if !app.running {
                            app.step();
                        }
                    }
                    _ => {}
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            if app.running {
                app.tick();
            }
            last_tick = Instant::now();
        }
    }
}

/// Log level when `RUST_LOG` is unset. The logger writes to stderr, which
/// shares the alternate screen with the UI, so only errors get through.
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Error;

fn main() -> Result<()> {
    SimpleLogger::new()
        .with_level(DEFAULT_LOG_LEVEL)
        .env()
        .init()
        .context("initializing logger")?;
    info!("Starting life_arcade v{}", env!("CARGO_PKG_VERSION"));

    let app = App::new(ArcadeConfig::default())?;

    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("entering the alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

use std::io;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
};
use plexus_config::{CellSize, Config};
use plexus_core::{Point, Size, Viewport};
use plexus_field::{FieldEvent, ParticleField};
use rand::{SeedableRng, rngs::StdRng};
use ratatui::{DefaultTerminal, Frame};

mod canvas;
mod cli;
mod theme;

use canvas::{BACKDROP_ID, CanvasSurface, Screen};
use cli::Cli;
use theme::TerminalTheme;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let config = cli.load_config()?;

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut screen = Screen::detect();
    let field = ParticleField::attach(&mut screen, BACKDROP_ID, config.field.clone(), rng);
    let Some(field) = field else {
        // Nothing to draw on.
        return Ok(());
    };

    let (columns, rows) = crossterm::terminal::size()?;
    let app = App::new(field, &config, TerminalViewport::new(columns, rows, config.cell));

    let terminal = ratatui::init();
    let result = execute!(io::stdout(), EnableMouseCapture, EnableFocusChange)
        .map_err(Into::into)
        .and_then(|()| app.run(terminal));
    let cleanup = execute!(io::stdout(), DisableMouseCapture, DisableFocusChange);
    ratatui::restore();
    result?;
    cleanup?;
    Ok(())
}

/// Terminal dimensions expressed in surface pixels.
#[derive(Debug, Clone, Copy)]
pub struct TerminalViewport {
    columns: u16,
    rows: u16,
    cell: CellSize,
}

impl TerminalViewport {
    pub fn new(columns: u16, rows: u16, cell: CellSize) -> Self {
        Self {
            columns,
            rows,
            cell,
        }
    }

    /// Surface position of the center of a terminal cell.
    pub fn cell_center(&self, column: u16, row: u16) -> Point {
        Point::new(
            (f64::from(column) + 0.5) * self.cell.width,
            (f64::from(row) + 0.5) * self.cell.height,
        )
    }
}

impl Viewport for TerminalViewport {
    fn size(&self) -> Size {
        self.cell.surface(self.columns, self.rows)
    }
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// The animated backdrop.
    field: ParticleField<CanvasSurface>,
    /// Current theme preference.
    theme: TerminalTheme,
    viewport: TerminalViewport,
    /// Target time between frames.
    frame_interval: Duration,
}

impl App {
    /// Construct a new instance of [`App`] and initialize its field.
    pub fn new(
        mut field: ParticleField<CanvasSurface>,
        config: &Config,
        viewport: TerminalViewport,
    ) -> Self {
        field.initialize(&viewport);
        Self {
            running: false,
            field,
            theme: TerminalTheme::new(config.theme),
            viewport,
            frame_interval: config.frame_interval(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            let frame_start = Instant::now();
            self.field.step(&self.theme);
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events(frame_start)?;
        }
        Ok(())
    }

    /// Renders the backdrop.
    fn render(&self, frame: &mut Frame) {
        let palette = self.field.resolve_theme(&self.theme);
        frame.render_widget(
            self.field.surface().backdrop(palette.background),
            frame.area(),
        );
    }

    /// Reads crossterm events until this frame's time budget is spent.
    fn handle_crossterm_events(&mut self, frame_start: Instant) -> color_eyre::Result<()> {
        while self.running {
            let remaining = self.frame_interval.saturating_sub(frame_start.elapsed());
            if remaining.is_zero() || !event::poll(remaining)? {
                break;
            }
            self.on_event(event::read()?);
        }
        Ok(())
    }

    /// Dispatches a single terminal event.
    fn on_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
            Event::Mouse(mouse) => self.on_mouse_event(mouse),
            Event::Resize(columns, rows) => {
                self.viewport.columns = columns;
                self.viewport.rows = rows;
                self.field.handle_event(FieldEvent::Resized, &self.viewport);
            }
            Event::FocusLost => {
                self.field.handle_event(FieldEvent::PointerLeft, &self.viewport);
            }
            _ => {}
        }
    }

    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        if let MouseEventKind::Moved | MouseEventKind::Drag(_) = mouse.kind {
            let position = self.viewport.cell_center(mouse.column, mouse.row);
            self.field
                .handle_event(FieldEvent::PointerMoved(position), &self.viewport);
        }
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('t')) => self.theme.cycle(),
            (_, KeyCode::Char(' ')) => self.toggle_pause(),
            _ => {}
        }
    }

    /// Stop or resume the animation.
    fn toggle_pause(&mut self) {
        if self.field.is_running() {
            self.field.stop();
        } else {
            self.field.start();
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

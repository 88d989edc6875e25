// main.rs
mod app;
mod ui;

use std::{io, path::PathBuf, time::Duration};

use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, CommandStatus, Mode, handle_command};

#[derive(Parser, Debug)]
#[command(name = "cellgrid")]
#[command(about = "A terminal spreadsheet over CSV files")]
struct Args {
    /// CSV file to open at start-up
    file: Option<String>,

    /// Directory for the log file (default: the system temp directory)
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Display width of each cell column
    #[arg(short, long, default_value_t = 10)]
    cell_width: usize,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let log_dir = args.log_dir.clone().unwrap_or_else(std::env::temp_dir);
    if let Err(e) = cellgrid::init_logging(&log_dir, &args.log_level) {
        eprintln!("Warning: could not initialize logging: {}", e);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, args);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!("application error: {}", err);
    }
    tracing::info!("cellgrid shutting down");
    res.map_err(Into::into)
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, args: Args) -> io::Result<()> {
    let mut app = App::new(args.cell_width);

    if let Some(path) = args.file {
        app.command_msg = match app.load(&path) {
            Ok(()) => format!("Loaded from {}", path),
            Err(e) => format!("Error loading initial file {}: {}", path, e),
        };
    }

    loop {
        terminal.draw(|f| ui::draw(f, &mut app))?;

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(());
        }

        if let Some(help_popup) = app.help_popup.as_mut() {
            match key.code {
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('h') => {
                    app.help_popup = None;
                }
                KeyCode::Char('j') | KeyCode::Down => help_popup.scroll_down(),
                KeyCode::Char('k') | KeyCode::Up => help_popup.scroll_up(),
                KeyCode::Char('g') => help_popup.scroll_position = 0,
                _ => {}
            }
            continue;
        }

        let exit = match app.mode {
            Mode::Normal | Mode::Visual => {
                handle_navigation_key(&mut app, key);
                false
            }
            Mode::Insert => {
                handle_insert_key(&mut app, key);
                false
            }
            Mode::Command => handle_command_key(&mut app, key),
        };
        if exit {
            return Ok(());
        }
    }
}

fn handle_navigation_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => app.move_cursor(0, -1),
        KeyCode::Char('j') | KeyCode::Down => app.move_cursor(1, 0),
        KeyCode::Char('k') | KeyCode::Up => app.move_cursor(-1, 0),
        KeyCode::Char('l') | KeyCode::Right => app.move_cursor(0, 1),
        KeyCode::Char('g') => {
            app.cursor_row = 0;
            app.keep_cursor_visible();
        }
        KeyCode::Char('G') => {
            app.cursor_row = app.grid.row_count().saturating_sub(1);
            app.keep_cursor_visible();
        }
        KeyCode::Char('0') => {
            app.cursor_col = 0;
            app.keep_cursor_visible();
        }
        KeyCode::Char('$') => {
            app.cursor_col = app.grid.row_len(app.cursor_row).saturating_sub(1);
            app.keep_cursor_visible();
        }
        KeyCode::Char(':') => {
            app.mode = Mode::Command;
            app.input.clear();
        }
        KeyCode::Char('v') if app.mode == Mode::Normal => {
            app.visual_start = Some((app.cursor_row, app.cursor_col));
            app.mode = Mode::Visual;
        }
        KeyCode::Esc => {
            app.visual_start = None;
            app.mode = Mode::Normal;
        }
        KeyCode::Char('i') if app.mode == Mode::Normal => {
            app.input = app.grid.get_cell(app.cursor_row, app.cursor_col).to_content();
            app.insert_mode_cursor = app.input.chars().count();
            app.mode = Mode::Insert;
        }
        KeyCode::Char('x') if app.mode == Mode::Normal => {
            if !app.grid.get_cell(app.cursor_row, app.cursor_col).is_empty() {
                app.grid
                    .set_cell(app.cursor_row, app.cursor_col, cellgrid::CellValue::Empty);
                app.command_msg = "Cell cleared".to_string();
            }
        }
        _ => {}
    }
}

// Byte offset of the `index`-th character of `s`.
fn byte_index(s: &str, index: usize) -> usize {
    s.char_indices().nth(index).map_or(s.len(), |(i, _)| i)
}

fn handle_insert_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.input.clear();
            app.insert_mode_cursor = 0;
            app.mode = Mode::Normal;
        }
        KeyCode::Enter => app.commit_insert(),
        KeyCode::Left => app.insert_mode_cursor = app.insert_mode_cursor.saturating_sub(1),
        KeyCode::Right => {
            app.insert_mode_cursor = (app.insert_mode_cursor + 1).min(app.input.chars().count());
        }
        KeyCode::Backspace => {
            if app.insert_mode_cursor > 0 {
                app.insert_mode_cursor -= 1;
                let at = byte_index(&app.input, app.insert_mode_cursor);
                app.input.remove(at);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.input.clear();
            app.insert_mode_cursor = 0;
        }
        KeyCode::Char(c) => {
            let at = byte_index(&app.input, app.insert_mode_cursor);
            app.input.insert(at, c);
            app.insert_mode_cursor += 1;
        }
        _ => {}
    }
}

// Returns true when the command asks to quit.
fn handle_command_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            app.input.clear();
            app.mode = if app.visual_start.is_some() {
                Mode::Visual
            } else {
                Mode::Normal
            };
            app.command_history_index = None;
            app.current_command_input_buffer.clear();
        }
        KeyCode::Enter => {
            let command_string = app.input.trim().to_string();
            if !command_string.is_empty() && app.command_history.last() != Some(&command_string) {
                app.command_history.push(command_string.clone());
            }
            app.command_history_index = None;
            app.current_command_input_buffer.clear();

            match handle_command(app, &command_string) {
                CommandStatus::Success(msg) => app.command_msg = msg,
                CommandStatus::Exit => return true,
                CommandStatus::Error(err) => app.command_msg = format!("Error: {}", err),
            }
            app.input.clear();
            app.mode = Mode::Normal;
            app.visual_start = None;
        }
        KeyCode::Char(c) => app.input.push(c),
        KeyCode::Backspace => {
            app.input.pop();
            if app.input.is_empty() {
                app.mode = if app.visual_start.is_some() {
                    Mode::Visual
                } else {
                    Mode::Normal
                };
                app.command_history_index = None;
                app.current_command_input_buffer.clear();
            }
        }
        KeyCode::Up => {
            if app.command_history.is_empty() {
                return false;
            }
            let new_idx = match app.command_history_index {
                None => {
                    app.current_command_input_buffer = app.input.clone();
                    app.command_history.len() - 1
                }
                Some(idx) => idx.saturating_sub(1),
            };
            app.command_history_index = Some(new_idx);
            app.input = app.command_history[new_idx].clone();
        }
        KeyCode::Down => {
            if let Some(idx) = app.command_history_index {
                if idx + 1 < app.command_history.len() {
                    app.command_history_index = Some(idx + 1);
                    app.input = app.command_history[idx + 1].clone();
                } else {
                    app.command_history_index = None;
                    app.input = std::mem::take(&mut app.current_command_input_buffer);
                }
            }
        }
        _ => {}
    }
    false
}

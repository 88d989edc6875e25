// app.rs
use std::path::PathBuf;

use tracing::{info, warn};

use cellgrid::{
    CellValue, Conversion, Grid, Range, load_csv, parse_cell_name, run_demo, save_csv,
};

use crate::ui::HelpPopup;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Mode {
    Normal,
    Insert,
    Command,
    Visual,
}

pub struct App {
    pub grid: Grid,
    pub cwidth: usize,
    pub cursor_row: usize,
    pub cursor_col: usize,
    pub scroll_row: usize,
    pub scroll_col: usize,
    pub view_rows: usize,
    pub view_cols: usize,
    pub mode: Mode,
    pub input: String,
    pub insert_mode_cursor: usize,
    pub command_msg: String,
    pub visual_start: Option<(usize, usize)>,
    pub command_history: Vec<String>,
    pub command_history_index: Option<usize>,
    pub current_command_input_buffer: String,
    pub help_popup: Option<HelpPopup>,
    pub filepath: Option<PathBuf>,
    pub result: Option<f64>,
}

impl App {
    pub fn new(cwidth: usize) -> Self {
        App {
            grid: Grid::new(),
            cwidth: cwidth.max(1),
            cursor_row: 0,
            cursor_col: 0,
            scroll_row: 0,
            scroll_col: 0,
            view_rows: 0,
            view_cols: 0,
            mode: Mode::Normal,
            input: String::new(),
            insert_mode_cursor: 0,
            command_msg: String::new(),
            visual_start: None,
            command_history: Vec::new(),
            command_history_index: None,
            current_command_input_buffer: String::new(),
            help_popup: None,
            filepath: None,
            result: None,
        }
    }

    /// The block between the visual anchor and the cursor, if a selection is active.
    pub fn selected_range(&self) -> Option<Range> {
        let (start_row, start_col) = self.visual_start?;
        let (end_row, end_col) = (self.cursor_row, self.cursor_col);
        Some(Range::new(
            (start_row.min(end_row), start_col.min(end_col)),
            (start_row.max(end_row), start_col.max(end_col)),
        ))
    }

    pub fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        self.cursor_row = self.cursor_row.saturating_add_signed(d_row);
        self.cursor_col = self.cursor_col.saturating_add_signed(d_col);
        self.keep_cursor_visible();
    }

    pub fn keep_cursor_visible(&mut self) {
        if self.cursor_row < self.scroll_row {
            self.scroll_row = self.cursor_row;
        } else if self.view_rows > 0 && self.cursor_row >= self.scroll_row + self.view_rows {
            self.scroll_row = self.cursor_row + 1 - self.view_rows;
        }
        if self.cursor_col < self.scroll_col {
            self.scroll_col = self.cursor_col;
        } else if self.view_cols > 0 && self.cursor_col >= self.scroll_col + self.view_cols {
            self.scroll_col = self.cursor_col + 1 - self.view_cols;
        }
    }

    /// Replace the grid with the contents of a CSV file.
    pub fn load(&mut self, path: &str) -> cellgrid::Result<()> {
        self.grid = load_csv(path)?;
        self.filepath = Some(PathBuf::from(path));
        self.cursor_row = 0;
        self.cursor_col = 0;
        self.scroll_row = 0;
        self.scroll_col = 0;
        self.visual_start = None;
        info!(path, rows = self.grid.row_count(), "loaded sheet");
        Ok(())
    }

    fn save_target(&self, arg: Option<&&str>) -> Option<String> {
        match arg {
            Some(path) => Some(path.to_string()),
            None => self
                .filepath
                .as_ref()
                .map(|filepath| filepath.to_string_lossy().to_string()),
        }
    }

    /// Commit the insert-mode buffer into the cursor cell.
    pub fn commit_insert(&mut self) {
        let value = CellValue::text(std::mem::take(&mut self.input));
        let current = self.grid.get_cell(self.cursor_row, self.cursor_col);
        if value != *current {
            self.grid.set_cell(self.cursor_row, self.cursor_col, value);
        }
        self.insert_mode_cursor = 0;
        self.mode = Mode::Normal;
    }
}

pub enum CommandStatus {
    Success(String),
    Exit,
    Error(String),
}

// Aggregates that run over the selected range.
trait SelectionCommand {
    fn name(&self) -> &'static str;
    fn execute(&self, grid: &Grid, range: &Range) -> cellgrid::Result<Option<f64>>;
}

struct SumCommand;
struct AverageCommand;
struct MinCommand;
struct MaxCommand;

impl SelectionCommand for SumCommand {
    fn name(&self) -> &'static str {
        "sum"
    }
    fn execute(&self, grid: &Grid, range: &Range) -> cellgrid::Result<Option<f64>> {
        grid.sum(range).map(Some)
    }
}

impl SelectionCommand for AverageCommand {
    fn name(&self) -> &'static str {
        "average"
    }
    fn execute(&self, grid: &Grid, range: &Range) -> cellgrid::Result<Option<f64>> {
        grid.average(range).map(Some)
    }
}

impl SelectionCommand for MinCommand {
    fn name(&self) -> &'static str {
        "min"
    }
    fn execute(&self, grid: &Grid, range: &Range) -> cellgrid::Result<Option<f64>> {
        grid.min(range)
    }
}

impl SelectionCommand for MaxCommand {
    fn name(&self) -> &'static str {
        "max"
    }
    fn execute(&self, grid: &Grid, range: &Range) -> cellgrid::Result<Option<f64>> {
        grid.max(range)
    }
}

fn get_selection_command(name: &str) -> Option<Box<dyn SelectionCommand>> {
    match name {
        "sum" => Some(Box::new(SumCommand)),
        "average" | "avg" => Some(Box::new(AverageCommand)),
        "min" => Some(Box::new(MinCommand)),
        "max" => Some(Box::new(MaxCommand)),
        _ => None,
    }
}

// Split a command line on whitespace, keeping quoted arguments together.
fn split_args(command_string: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut quoted = false;

    for c in command_string.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                quoted = true;
            }
            ' ' | '\t' if !in_quotes => {
                if !current.is_empty() || quoted {
                    parts.push(std::mem::take(&mut current));
                }
                quoted = false;
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() || quoted {
        parts.push(current);
    }
    parts
}

// Largest row or column index the driver accepts.
const MAX_INDEX: usize = 1_048_575;

fn parse_index(arg: &str, what: &str) -> Result<usize, String> {
    match arg.parse::<usize>() {
        Ok(index) if index <= MAX_INDEX => Ok(index),
        Ok(_) => Err(format!("{} '{}' is past the limit of {}", what, arg, MAX_INDEX)),
        Err(_) => Err(format!("Invalid {} '{}'", what, arg)),
    }
}

fn check_coordinate((row, col): (usize, usize), text: &str) -> Result<(usize, usize), String> {
    if row > MAX_INDEX || col > MAX_INDEX {
        return Err(format!("Cell '{}' is past the limit of {}", text, MAX_INDEX));
    }
    Ok((row, col))
}

/// A cell coordinate from the head of `args`: nothing means the cursor, one
/// argument is a cell name, two are row and column. Returns the coordinate
/// and how many arguments it used.
fn parse_coordinate(app: &App, args: &[&str]) -> Result<((usize, usize), usize), String> {
    match args {
        [] => Ok(((app.cursor_row, app.cursor_col), 0)),
        [first, rest @ ..] => {
            if let Some(coordinate) = parse_cell_name(first) {
                return Ok((check_coordinate(coordinate, first)?, 1));
            }
            let row = parse_index(first, "row")?;
            let col = rest
                .first()
                .ok_or_else(|| "Missing column".to_string())
                .and_then(|arg| parse_index(arg, "column"))?;
            Ok(((row, col), 2))
        }
    }
}

fn parse_range(app: &App, args: &[&str]) -> Result<Range, String> {
    match args {
        [] => Ok(app
            .selected_range()
            .unwrap_or_else(|| Range::cell(app.cursor_row, app.cursor_col))),
        [text] => {
            let range = Range::parse(text).ok_or_else(|| format!("Invalid range '{}'", text))?;
            check_coordinate(range.start, text)?;
            check_coordinate(range.end, text)?;
            Ok(range)
        }
        [r1, c1, r2, c2] => Ok(Range::new(
            (parse_index(r1, "start row")?, parse_index(c1, "start column")?),
            (parse_index(r2, "end row")?, parse_index(c2, "end column")?),
        )),
        _ => Err("Usage: <sum|average|min|max> [r1 c1 r2 c2 | A1:B2]".to_string()),
    }
}

fn describe(conversion: Conversion, row: usize, col: usize) -> CommandStatus {
    match conversion {
        Conversion::Converted(value) => CommandStatus::Success(format!(
            "Converted ({}, {}) to {} '{}'",
            row,
            col,
            value.kind(),
            value
        )),
        Conversion::Skipped => {
            CommandStatus::Success(format!("Cell ({}, {}) is empty, nothing to convert", row, col))
        }
        Conversion::Warning(warning) => CommandStatus::Success(format!("Warning: {}", warning)),
    }
}

pub fn handle_command(app: &mut App, command_string: &str) -> CommandStatus {
    let parts = split_args(command_string);
    let Some(command_name) = parts.first().map(|s| s.as_str()) else {
        return CommandStatus::Success("No command entered.".to_string());
    };
    let args: Vec<&str> = parts.iter().skip(1).map(|s| s.as_str()).collect();

    if let Some(sel_cmd) = get_selection_command(command_name) {
        let range = match parse_range(app, &args) {
            Ok(range) => range,
            Err(e) => return CommandStatus::Error(e),
        };
        return match sel_cmd.execute(&app.grid, &range) {
            Ok(value) => {
                app.result = value;
                let shown = value.map_or_else(|| "none".to_string(), |v| v.to_string());
                CommandStatus::Success(format!("{} of {}: {}", sel_cmd.name(), range, shown))
            }
            Err(e) => {
                warn!(command = sel_cmd.name(), %range, "aggregate failed: {}", e);
                CommandStatus::Error(e.to_string())
            }
        };
    }

    match command_name {
        "q" | "quit" => CommandStatus::Exit,
        "w" | "write" | "save" | "wq" => {
            let Some(path) = app.save_target(args.first()) else {
                return CommandStatus::Error(format!(
                    "Usage: {} <path> (or load a file first)",
                    command_name
                ));
            };
            if let Err(e) = save_csv(&app.grid, &path) {
                return CommandStatus::Error(format!("Error saving: {}", e));
            }
            app.filepath = Some(PathBuf::from(&path));
            info!(path = %path, "saved sheet");
            if command_name == "wq" {
                CommandStatus::Exit
            } else {
                CommandStatus::Success(format!("Saved to {}", path))
            }
        }
        "load" | "open" => match args.first() {
            Some(path) => match app.load(path) {
                Ok(()) => CommandStatus::Success(format!(
                    "Loaded {} rows from {}",
                    app.grid.row_count(),
                    path
                )),
                Err(e) => CommandStatus::Error(format!("Error loading: {}", e)),
            },
            None => CommandStatus::Error("Usage: load <path>".to_string()),
        },
        "set" => {
            if args.is_empty() {
                return CommandStatus::Error("Usage: set <row> <col> <value>".to_string());
            }
            let ((row, col), used) = match parse_coordinate(app, &args) {
                Ok(parsed) => parsed,
                Err(e) => return CommandStatus::Error(e),
            };
            let value = args[used..].join(" ");
            app.grid.set_cell(row, col, value.as_str());
            CommandStatus::Success(format!("Cell ({}, {}) updated.", row, col))
        }
        "get" => match parse_coordinate(app, &args) {
            Ok(((row, col), _)) => {
                let value = app.grid.get_cell(row, col);
                CommandStatus::Success(format!(
                    "Value in cell ({}, {}): {} '{}'",
                    row,
                    col,
                    value.kind(),
                    value
                ))
            }
            Err(e) => CommandStatus::Error(e),
        },
        "sort" => {
            let axis = args.first().copied().unwrap_or("");
            let index = match args.get(1) {
                Some(arg) => match parse_index(arg, "index") {
                    Ok(index) => Some(index),
                    Err(e) => return CommandStatus::Error(e),
                },
                None => None,
            };
            let outcome = match axis {
                "r" | "row" => {
                    let row = index.unwrap_or(app.cursor_row);
                    app.grid.sort_row(row).map(|_| format!("Sorted row {}", row))
                }
                "c" | "col" | "column" => {
                    let col = index.unwrap_or(app.cursor_col);
                    app.grid.sort_column(col).map(|_| format!("Sorted column {}", col))
                }
                _ => return CommandStatus::Error("Usage: sort <row|col> [index]".to_string()),
            };
            match outcome {
                Ok(msg) => CommandStatus::Success(msg),
                Err(e) => CommandStatus::Error(format!("Sort failed: {}", e)),
            }
        }
        "num" | "number" | "float" => match parse_coordinate(app, &args) {
            Ok(((row, col), _)) => describe(app.grid.to_number(row, col), row, col),
            Err(e) => CommandStatus::Error(e),
        },
        "str" | "string" | "text" => match parse_coordinate(app, &args) {
            Ok(((row, col), _)) => describe(app.grid.to_text(row, col), row, col),
            Err(e) => CommandStatus::Error(e),
        },
        "demo" => match args.as_slice() {
            [input, output] => match run_demo(input, output) {
                Ok(report) => {
                    app.help_popup = Some(HelpPopup::new("Demo script", &report.to_string()));
                    CommandStatus::Success(format!("Demo complete. Results written to {}", output))
                }
                Err(e) => CommandStatus::Error(format!("Demo failed: {}", e)),
            },
            _ => CommandStatus::Error("Usage: demo <input.csv> <output.csv>".to_string()),
        },
        "help" => {
            app.help_popup = Some(HelpPopup::new("Help", HELP_MESSAGE));
            CommandStatus::Success("Showing help. Press Esc, q, or h to close.".to_string())
        }
        cmd => CommandStatus::Error(format!("Unknown command: {}", cmd)),
    }
}

pub const HELP_MESSAGE: &str = r#"cellgrid Help

General:
    Ctrl+q          Quit application immediately
    Esc             Leave visual/insert/command mode, or close popups

Navigation (Normal Mode):
    h/j/k/l         Move cursor left/down/up/right (arrow keys work too)
    0/$             Move cursor to first/last column of the current row
    g/G             Jump cursor to the first/last row of the sheet

Editing (Normal Mode):
    i               Edit current cell (pre-filled with its content)
    x               Clear current cell
    v               Start a block selection
    :               Enter Command mode

Visual Mode:
    h/j/k/l         Extend the selection
    :               Run a command on the selection (e.g. :sum)
    Esc             Back to Normal mode

Insert Mode:
    Enter           Store the text in the cell
    Esc             Discard changes
    Left/Right      Move within the input
    Backspace       Delete character before cursor

Command Mode:
    Up/Down         Navigate command history

    :q              Quit
    :w [<file>]     Save sheet to CSV. Uses the loaded file if <file> is omitted.
    :wq [<file>]    Save and quit.
    :save <file>    Save sheet to <file>.
    :load <file>    Load sheet from <file>, replacing the current one.
    :set <r> <c> <value>    Store text in a cell (a cell name such as B3 also works).
    :get <r> <c>    Show a cell's value.
    :sum|:average|:min|:max [r1 c1 r2 c2 | A1:B2]
                    Aggregate a range. Defaults to the selection, else the cursor cell.
                    Empty cells are skipped; text that is not a number is an error.
                    Average divides by the full size of the range.
    :sort row [n]   Sort a row numerically (empty cells first). Defaults to cursor row.
    :sort col [n]   Sort a column. Rows too short for the column are not written.
    :num [r c]      Convert a cell to a number. Defaults to the cursor cell.
    :str [r c]      Convert a cell to text.
    :demo <in> <out>    Run the scripted session on <in>, write the result to <out>.
    :help           Show this help.

Help Popup Navigation:
    j/k             Scroll down/up
    g               Scroll to top
    Esc, q, h       Close help
"#;

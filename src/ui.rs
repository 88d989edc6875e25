// ui.rs
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use cellgrid::{CellValue, cell_name, column_name};

use crate::app::{App, Mode};

// Scrollable text window with a title; j/k scroll, q/Esc/h close.
#[derive(Debug)]
pub struct HelpPopup {
    title: String,
    content: String,
    pub scroll_position: usize,
}

impl HelpPopup {
    pub fn new(title: &str, content: &str) -> Self {
        HelpPopup {
            title: title.to_string(),
            content: content.to_string(),
            scroll_position: 0,
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll_position = self.scroll_position.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        let total_lines = self.content.lines().count();
        if self.scroll_position < total_lines.saturating_sub(1) {
            self.scroll_position += 1;
        }
    }

    pub fn draw(&self, f: &mut Frame, area: Rect) {
        let content_lines: Vec<&str> = self.content.lines().collect();
        let max_visible_lines = area.height.saturating_sub(2) as usize;

        let title = if content_lines.len() > max_visible_lines {
            format!("{} [j/k to scroll]", self.title)
        } else {
            self.title.clone()
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow));

        let content_view = content_lines
            .iter()
            .skip(self.scroll_position)
            .take(max_visible_lines)
            .copied()
            .collect::<Vec<&str>>()
            .join("\n");

        let paragraph = Paragraph::new(content_view)
            .block(block)
            .wrap(Wrap { trim: false });

        f.render_widget(Clear, area);
        f.render_widget(paragraph, area);
    }
}

fn cell_style(value: &CellValue) -> Style {
    match value {
        CellValue::Number(_) => Style::default().fg(Color::Cyan),
        CellValue::Text(_) | CellValue::Empty => Style::default(),
    }
}

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.size();

    if let Some(help_popup) = &app.help_popup {
        help_popup.draw(f, size);
        return;
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(0),    // Spreadsheet area
                Constraint::Length(1), // Inspector Bar
                Constraint::Length(1), // Command Bar / Footer
            ]
            .as_ref(),
        )
        .split(size);

    let main_area = layout[0];
    let inspector_area = layout[1];
    let footer_area = layout[2];

    // Borders take two lines and the header one more.
    app.view_rows = (main_area.height as usize).saturating_sub(3);
    let last_visible_row = app.scroll_row + app.view_rows;
    let number_width = last_visible_row.to_string().len();
    let available_width_for_cells = (main_area.width as usize)
        .saturating_sub(number_width)
        .saturating_sub(2);
    app.view_cols = available_width_for_cells / (app.cwidth + 2);
    app.keep_cursor_visible();

    let selection = app.selected_range();
    let in_selection = |r: usize, c: usize| {
        selection.is_some_and(|range| {
            r >= range.start.0 && r <= range.end.0 && c >= range.start.1 && c <= range.end.1
        })
    };

    let mut lines = vec![];

    let mut header_spans: Vec<Span> = vec![Span::raw(format!(
        "{:width$}",
        "",
        width = number_width
    ))];
    for c in app.scroll_col..app.scroll_col + app.view_cols {
        let header_text = format!(" {:^width$} ", column_name(c), width = app.cwidth);
        let highlighted = app.cursor_col == c
            || selection.is_some_and(|range| c >= range.start.1 && c <= range.end.1);
        let style = if highlighted {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        header_spans.push(Span::styled(header_text, style));
    }
    lines.push(Line::from(header_spans));

    for r in app.scroll_row..last_visible_row {
        let mut row_spans: Vec<Span> = Vec::new();
        let row_highlighted = r == app.cursor_row
            || selection.is_some_and(|range| r >= range.start.0 && r <= range.end.0);
        let row_number_style = if row_highlighted {
            Style::default().add_modifier(Modifier::REVERSED)
        } else if r >= app.grid.row_count() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        row_spans.push(Span::styled(
            format!("{:width$}", r, width = number_width),
            row_number_style,
        ));

        for c in app.scroll_col..app.scroll_col + app.view_cols {
            let value = app.grid.get_cell(r, c);
            let truncated: String = value.to_content().chars().take(app.cwidth).collect();
            let is_cursor = r == app.cursor_row && c == app.cursor_col;

            let mut style = cell_style(value);
            let cell_text = if is_cursor {
                style = style.add_modifier(Modifier::REVERSED);
                format!("[{:^width$}]", truncated, width = app.cwidth)
            } else {
                if in_selection(r, c) {
                    style = style.bg(Color::DarkGray);
                }
                format!(" {:^width$} ", truncated, width = app.cwidth)
            };
            row_spans.push(Span::styled(cell_text, style));
        }
        lines.push(Line::from(row_spans));
    }

    let title = match &app.filepath {
        Some(path) => format!(
            "Spreadsheet - {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        ),
        None => "Spreadsheet".to_string(),
    };
    let sheet_block = Block::default().title(title).borders(Borders::ALL);
    f.render_widget(Paragraph::new(lines).block(sheet_block), main_area);

    // Inspector Bar
    let current = app.grid.get_cell(app.cursor_row, app.cursor_col);
    let mut inspector_text = format!(
        "{} ({}, {}) [{}]: \"{}\" | Rows: {} | Width: {}",
        cell_name(app.cursor_row, app.cursor_col),
        app.cursor_row,
        app.cursor_col,
        current.kind(),
        current.to_content(),
        app.grid.row_count(),
        app.grid.width(),
    );
    if let Some(result) = app.result {
        inspector_text.push_str(&format!(" | Result: {}", result));
    }
    f.render_widget(Paragraph::new(inspector_text), inspector_area);

    // Footer / Command Bar
    let footer_text = match app.mode {
        Mode::Command => {
            let x = footer_area.x + 1 + app.input.chars().count() as u16;
            f.set_cursor(x, footer_area.y);
            format!(":{}", app.input)
        }
        Mode::Insert => {
            let prompt_len = "INSERT ".len();
            let cursor_pos = app.insert_mode_cursor.min(app.input.chars().count());
            f.set_cursor(footer_area.x + (prompt_len + cursor_pos) as u16, footer_area.y);
            format!("INSERT {}", app.input)
        }
        Mode::Normal => format!("-- NORMAL --  {}", app.command_msg),
        Mode::Visual => match app.selected_range() {
            Some(range) => format!("-- VISUAL -- {}", range),
            None => "-- VISUAL --".to_string(),
        },
    };
    f.render_widget(Paragraph::new(footer_text), footer_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_popup_scroll_bounds() {
        let mut popup = HelpPopup::new("Help", "a\nb\nc");
        popup.scroll_up();
        assert_eq!(popup.scroll_position, 0);
        for _ in 0..10 {
            popup.scroll_down();
        }
        assert_eq!(popup.scroll_position, 2);
    }
}

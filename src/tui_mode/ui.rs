use super::app::App;
use super::helpers::{highlight_tokens, stack_rows, wrap_text};
use crate::render_help::render_help;
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use std::time::Duration;

const MIN_TERMINAL_WIDTH: u16 = 50;
const MIN_TERMINAL_HEIGHT: u16 = 10;
const STACK_PANEL_WIDTH: u16 = 26;

pub fn run_ui_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            if app.show_help {
                render_help(f, app.help_scroll);
            } else {
                ui(f, app);
            }
        })?;

        if app.should_quit {
            break;
        }

        if crossterm::event::poll(Duration::from_millis(50))? {
            match crossterm::event::read()? {
                Event::Key(KeyEvent {
                    code,
                    modifiers,
                    kind,
                    ..
                }) if kind == KeyEventKind::Press => {
                    handle_key_event(app, code, modifiers);
                }
                Event::Mouse(event) => {
                    handle_mouse_event(app, event);
                }
                _ => {}
            }
        }
    }
    Ok(())
}

fn handle_key_event(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    if modifiers.contains(KeyModifiers::CONTROL) && matches!(code, KeyCode::Char('c')) {
        app.should_quit = true;
        return;
    }

    if app.show_help {
        match code {
            KeyCode::Down => app.help_scroll = app.help_scroll.saturating_add(1),
            KeyCode::Up => app.help_scroll = app.help_scroll.saturating_sub(1),
            KeyCode::PageDown => app.help_scroll = app.help_scroll.saturating_add(10),
            KeyCode::PageUp => app.help_scroll = app.help_scroll.saturating_sub(10),
            KeyCode::Esc | KeyCode::F(1) => {
                app.show_help = false;
                app.help_scroll = 0;
            }
            _ => {}
        }
        return;
    }

    match code {
        KeyCode::Char('u') | KeyCode::Char('U') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_input();
        }
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => app.input.insert(c),
        KeyCode::Backspace => app.input.backspace(),
        KeyCode::Delete => app.input.delete(),
        KeyCode::Left if modifiers.contains(KeyModifiers::CONTROL) => app.input.move_word_left(),
        KeyCode::Right if modifiers.contains(KeyModifiers::CONTROL) => {
            app.input.move_word_right()
        }
        KeyCode::Left => app.input.move_left(),
        KeyCode::Right => app.input.move_right(),
        KeyCode::Home => {
            app.input.move_home();
            app.input_scroll = 0;
        }
        KeyCode::End => app.input.move_end(),
        KeyCode::Up => app.recall_previous(),
        KeyCode::Down => app.recall_next(),
        KeyCode::PageUp => app.scroll_transcript(-1),
        KeyCode::PageDown => app.scroll_transcript(1),
        KeyCode::Enter => app.submit(),
        KeyCode::F(1) => {
            app.show_help = true;
            app.help_scroll = 0;
        }
        _ => {}
    }
}

fn handle_mouse_event(app: &mut App, event: crossterm::event::MouseEvent) {
    let scroll = if app.show_help {
        &mut app.help_scroll
    } else {
        &mut app.transcript_scroll
    };
    match event.kind {
        MouseEventKind::ScrollDown => *scroll = scroll.saturating_add(3),
        MouseEventKind::ScrollUp => *scroll = scroll.saturating_sub(3),
        _ => {}
    }
}

fn ui(frame: &mut Frame, app: &mut App) {
    let terminal_size = frame.size();

    app.terminal_too_small =
        terminal_size.width < MIN_TERMINAL_WIDTH || terminal_size.height < MIN_TERMINAL_HEIGHT;

    if app.terminal_too_small {
        render_resize_message(frame, terminal_size);
        return;
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .split(terminal_size);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Min(20),
            Constraint::Length(STACK_PANEL_WIDTH),
        ])
        .split(layout[2]);

    render_input(frame, app, layout[0]);
    render_status(frame, layout[1]);
    render_transcript(frame, app, body[0]);
    render_stack(frame, app, body[1]);
    app.list_height = body[0].height as usize;
}

fn render_resize_message(frame: &mut Frame, area: Rect) {
    let message = format!(
        "Terminal too small! Min size: {}x{}. Current: {}x{}",
        MIN_TERMINAL_WIDTH, MIN_TERMINAL_HEIGHT, area.width, area.height
    );

    let text = vec![
        Line::from(Span::styled(
            message,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Please resize your terminal window",
            Style::default().fg(Color::Yellow),
        )),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" Resize Required ")
        .title_alignment(Alignment::Center);

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn render_transcript(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {} ", app.program_title()))
        .title_alignment(Alignment::Center);

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let wrap_width = inner_area.width.saturating_sub(4) as usize;
    let mut items = Vec::new();

    for line in &app.banner {
        items.push(ListItem::new(Line::from(Span::styled(
            line.clone(),
            Style::default().fg(Color::Green),
        ))));
    }

    for entry in &app.transcript {
        let input_lines = wrap_text(&entry.input, wrap_width);
        for (line_idx, line) in input_lines.into_iter().enumerate() {
            let prefix = if line_idx == 0 { "> " } else { "  " };
            let mut spans = vec![Span::styled(prefix, Style::default().fg(Color::Green))];
            spans.extend(highlight_tokens(&line, Style::default().fg(Color::Cyan)));
            items.push(ListItem::new(Line::from(spans)));
        }

        let reply_style = if entry.failed() {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else if entry.reply.is_halt() {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
                .fg(Color::LightMagenta)
                .add_modifier(Modifier::BOLD)
        };

        for reply_line in &entry.reply.lines {
            for line in wrap_text(reply_line, wrap_width) {
                items.push(ListItem::new(Line::from(Span::styled(
                    format!("  {}", line),
                    reply_style,
                ))));
            }
        }
    }

    let visible = inner_area.height as usize;
    let max_scroll = items.len().saturating_sub(visible);
    if app.scroll_to_bottom {
        app.transcript_scroll = max_scroll;
        app.scroll_to_bottom = false;
    }
    app.transcript_scroll = app.transcript_scroll.min(max_scroll);

    let list = List::new(items).block(Block::default());
    let mut state = ListState::default().with_offset(app.transcript_scroll);

    frame.render_stateful_widget(list, inner_area, &mut state);
}

fn render_stack(frame: &mut Frame, app: &App, area: Rect) {
    let stack = app.program.stack();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" Stack ({}) ", stack.len()))
        .title_alignment(Alignment::Center);

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    if stack.is_empty() {
        let empty_msg = Paragraph::new("empty")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(empty_msg, inner_area);
        return;
    }

    // level 1 sits on the bottom row, deeper levels scroll off the top
    let rows = stack_rows(stack.values());
    let height = inner_area.height as usize;
    let skip = rows.len().saturating_sub(height);
    let width = inner_area.width as usize;
    let lines: Vec<Line> = rows
        .into_iter()
        .skip(skip)
        .map(|row| {
            let row = if row.chars().count() > width {
                let kept: String = row.chars().take(width.saturating_sub(1)).collect();
                format!("{}…", kept)
            } else {
                row
            };
            Line::from(Span::styled(row, Style::default().fg(Color::Yellow)))
        })
        .collect();

    let padding = height.saturating_sub(lines.len()) as u16;
    let area = Rect::new(
        inner_area.x,
        inner_area.y + padding,
        inner_area.width,
        inner_area.height - padding,
    );
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_status(frame: &mut Frame, area: Rect) {
    let keys = [
        ("Enter", "Evaluate"),
        ("Up/Down", "Recall"),
        ("PgUp/PgDn", "Scroll"),
        ("F1", "Help"),
        ("Ctrl+U", "Clear Input"),
        ("Ctrl+C", "Quit"),
    ];

    let spans: Vec<Span> = keys
        .iter()
        .flat_map(|(key, desc)| {
            vec![
                Span::styled(
                    *key,
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!(" {} ", desc), Style::default().fg(Color::DarkGray)),
            ]
        })
        .collect();

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_input(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Expression ")
        .title_alignment(Alignment::Center);

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let visible_width = (inner_area.width.saturating_sub(2)) as usize;
    let total = app.input.len();
    app.adjust_input_scroll(visible_width);

    let visible_input = app.input.visible(app.input_scroll, visible_width);
    let input_line = format!("> {}", visible_input);
    frame.render_widget(Paragraph::new(input_line), inner_area);

    let scrolled_width = app.input.width_before(app.input_scroll);
    let cursor_x = inner_area.x + 2 + app.input.cursor_width().saturating_sub(scrolled_width) as u16;
    frame.set_cursor(cursor_x, inner_area.y);

    let scroll_indicator_style = Style::default().fg(Color::DarkGray);

    if app.input_scroll > 0 {
        let left_indicator = Paragraph::new("<").style(scroll_indicator_style);
        frame.render_widget(left_indicator, Rect::new(inner_area.x, inner_area.y, 1, 1));
    }

    if total > app.input_scroll + visible_width {
        let right_indicator = Paragraph::new(">").style(scroll_indicator_style);
        frame.render_widget(
            right_indicator,
            Rect::new(inner_area.x + inner_area.width - 1, inner_area.y, 1, 1),
        );
    }
}

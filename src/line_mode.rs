use crate::program::Program;
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::debug;

#[cfg(feature = "line")]
use crate::input::{History, InputLine};
#[cfg(feature = "line")]
use termion::{clear::CurrentLine as ClearLine, cursor, event::Key, input::TermRead, raw::IntoRawMode};
#[cfg(feature = "line")]
use unicode_width::UnicodeWidthStr;

pub fn prompt(program: &dyn Program) -> String {
    format!("{}> ", program.display_name())
}

/// Runs a session over plain buffered I/O: each input line is echoed after
/// the prompt and followed by the reply. Ends on HALT or end of input.
pub fn run_plain<R: BufRead, W: Write>(
    program: &mut dyn Program,
    input: R,
    mut output: W,
    show_banner: bool,
) -> Result<()> {
    let banner = program.init();
    if show_banner {
        for line in &banner {
            writeln!(output, "{}", line)?;
        }
    }

    let prompt = prompt(program);
    for line in input.lines() {
        let line = line.context("failed to read input line")?;
        writeln!(output, "{}{}", prompt, line)?;

        let reply = program.process_input(&line);
        for text in &reply.lines {
            writeln!(output, "{}", text)?;
        }
        if reply.is_halt() {
            debug!("calculator session halted");
            break;
        }
    }
    output.flush()?;
    Ok(())
}

#[cfg(feature = "line")]
pub fn run_line(program: &mut dyn Program, show_banner: bool) -> Result<()> {
    let banner = program.init();
    let prompt = prompt(program);

    let mut stdout = std::io::stdout()
        .into_raw_mode()
        .context("failed to put terminal into raw mode")?;

    if show_banner {
        for line in &banner {
            write!(stdout, "{}\r\n", line)?;
        }
    }
    write!(stdout, "Navigation: ←/→, Alt+B/Alt+F, Home/End, ↑/↓ for history, Ctrl+C to quit\r\n\r\n")?;

    let mut history = History::new();
    let stdin = std::io::stdin();
    let mut keys = stdin.keys();

    loop {
        let mut line = InputLine::new();

        let submitted = loop {
            redraw(&mut stdout, &prompt, &line)?;

            let key = match keys.next() {
                Some(key) => key.context("failed to read key")?,
                None => break None,
            };
            match edit_line(&mut line, &mut history, key) {
                LineEvent::Editing => {}
                LineEvent::Submit => break Some(line.take()),
                LineEvent::Quit => break None,
            }
        };

        let Some(text) = submitted else {
            write!(stdout, "\r\n")?;
            break;
        };

        history.push(text.trim());
        let reply = program.process_input(&text);
        write!(stdout, "\r\n")?;
        for text in &reply.lines {
            write!(stdout, "{}\r\n", text)?;
        }
        if reply.is_halt() {
            debug!("calculator session halted");
            break;
        }
    }

    stdout.flush()?;
    Ok(())
}

#[cfg(feature = "line")]
#[derive(Debug, PartialEq, Eq)]
enum LineEvent {
    Editing,
    Submit,
    Quit,
}

/// Applies one key to the line being edited. Word movement uses the
/// readline bindings Alt+B / Alt+F.
#[cfg(feature = "line")]
fn edit_line(line: &mut InputLine, history: &mut History, key: Key) -> LineEvent {
    match key {
        Key::Char('\n') | Key::Char('\r') => return LineEvent::Submit,
        Key::Ctrl('c') | Key::Ctrl('d') => return LineEvent::Quit,
        Key::Ctrl('u') => {
            line.clear();
            history.reset_navigation();
        }
        Key::Alt('b') => line.move_word_left(),
        Key::Alt('f') => line.move_word_right(),
        Key::Char(c) => line.insert(c),
        Key::Backspace => line.backspace(),
        Key::Delete => line.delete(),
        Key::Left => line.move_left(),
        Key::Right => line.move_right(),
        Key::Home | Key::Ctrl('a') => line.move_home(),
        Key::End | Key::Ctrl('e') => line.move_end(),
        Key::Up => {
            if let Some(entry) = history.previous(line.as_str()) {
                let entry = entry.to_string();
                line.set(&entry);
            }
        }
        Key::Down => {
            if let Some(entry) = history.next() {
                let entry = entry.to_string();
                line.set(&entry);
            }
        }
        _ => {}
    }
    LineEvent::Editing
}

#[cfg(feature = "line")]
fn redraw<W: Write>(out: &mut W, prompt: &str, line: &InputLine) -> Result<()> {
    write!(out, "\r{}{}{}", ClearLine, prompt, line.as_str())?;
    let offset = prompt.width() + line.cursor_width();
    write!(out, "\r")?;
    if offset > 0 {
        write!(out, "{}", cursor::Right(offset as u16))?;
    }
    out.flush()?;
    Ok(())
}

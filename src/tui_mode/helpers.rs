use crate::rpn_engine::{format_value, Token};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec!["".to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();

        if word_width > width {
            let mut remaining = word;
            while !remaining.is_empty() {
                let mut chunk = String::new();
                let mut chunk_width = 0;
                let mut chunk_byte_len = 0;

                for c in remaining.chars() {
                    let char_width = UnicodeWidthChar::width(c).unwrap_or(1);
                    if chunk_width + char_width > width && !chunk.is_empty() {
                        break;
                    }
                    chunk.push(c);
                    chunk_width += char_width;
                    chunk_byte_len += c.len_utf8();
                }

                if !current_line.is_empty() {
                    lines.push(std::mem::take(&mut current_line));
                    current_width = 0;
                }

                lines.push(chunk);
                remaining = &remaining[chunk_byte_len..];
            }
            continue;
        }

        if current_width + word_width + 1 > width && !current_line.is_empty() {
            lines.push(std::mem::take(&mut current_line));
            current_width = 0;
        }

        if !current_line.is_empty() {
            current_line.push(' ');
            current_width += 1;
        }

        current_line.push_str(word);
        current_width += word_width;
    }

    if !current_line.is_empty() || lines.is_empty() {
        lines.push(current_line);
    }

    lines
}

/// Colors each whitespace-delimited token by how the calculator reads it.
pub fn highlight_tokens(expr: &str, base_style: Style) -> Vec<Span<'static>> {
    let operator_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let number_style = Style::default().fg(Color::LightGreen);

    let invalid_style = Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::UNDERLINED);

    let mut spans = Vec::new();
    for (i, chunk) in expr.split_whitespace().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let style = match Token::classify(chunk) {
            Token::Number(_) => number_style,
            Token::Operator(_) => operator_style,
            Token::Invalid(_) if is_command(chunk) => base_style,
            Token::Invalid(_) => invalid_style,
        };
        spans.push(Span::styled(chunk.to_string(), style));
    }

    spans
}

fn is_command(word: &str) -> bool {
    matches!(word, "exit" | "reset")
}

/// One row per stack level, top of stack last and labelled `1:`.
pub fn stack_rows(values: &[f64]) -> Vec<String> {
    let depth = values.len();
    let label_width = depth.to_string().len();
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| format!("{:>w$}: {}", depth - i, format_value(v), w = label_width))
        .collect()
}

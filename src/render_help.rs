use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn render_help(frame: &mut Frame, scroll: usize) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" RPN Calculator Help ")
        .title_alignment(Alignment::Center)
        .style(Style::default().bg(Color::Black));

    let heading = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::UNDERLINED);

    let help_text = vec![
        Line::from(Span::styled(
            "RPN Calculator - Reverse Polish Notation",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Operands come first, the operator follows them."),
        Line::from("Values wait on the stack until an operator consumes the top two."),
        Line::from(""),
        Line::from(Span::styled("Operators:", heading)),
        Line::from("  + : Addition        (e.g., 5 3 + = 8)"),
        Line::from("  - : Subtraction     (e.g., 10 4 - = 6)"),
        Line::from("  * : Multiplication  (e.g., 6 7 * = 42)"),
        Line::from("  / : Division        (e.g., 15 3 / = 5)"),
        Line::from(""),
        Line::from(Span::styled("Input:", heading)),
        Line::from("  One value or operator per line is applied right away."),
        Line::from("  Several tokens on one line run as a single step:"),
        Line::from("  if any of them fails, the stack stays as it was."),
        Line::from("  Division by zero and overflow are refused."),
        Line::from(""),
        Line::from(Span::styled("Commands:", heading)),
        Line::from("  reset : Empty the stack"),
        Line::from("  exit  : Leave the calculator"),
        Line::from("  help  : Show this help screen"),
        Line::from(""),
        Line::from(Span::styled("Keys:", heading)),
        Line::from("  ← → : Move cursor left/right"),
        Line::from("  Ctrl+←/→ : Move cursor by words"),
        Line::from("  Home/End : Move to start/end of line"),
        Line::from("  ↑ ↓ : Recall previous input"),
        Line::from("  PgUp/PgDn, mouse wheel : Scroll the transcript"),
        Line::from("  Ctrl+U : Clear current input"),
        Line::from("  Ctrl+C : Quit"),
        Line::from("  Esc/F1 : Close this screen"),
        Line::from(""),
        Line::from(Span::styled("Examples:", heading)),
        Line::from("  8 17 -        → -9"),
        Line::from("  2 3 4 * +     → 14"),
        Line::from("  1.5 2 /       → 0.75"),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true })
        .scroll((scroll.min(u16::MAX as usize) as u16, 0));

    frame.render_widget(Clear, frame.size());
    frame.render_widget(paragraph, frame.size());
}

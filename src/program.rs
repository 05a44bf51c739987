//! Line processing on top of the RPN stack, and the protocol hosts use to
//! drive it.

use crate::rpn_engine::{tokenize, EvalError, Stack, Token};
use tracing::{debug, trace};

pub const EXIT_COMMAND: &str = "exit";
pub const RESET_COMMAND: &str = "reset";
pub const FAREWELL: &str = "Thanks for using RPN Calculator";

const BANNER: [&str; 9] = [
    "",
    "Welcome to RPN Calculator!",
    "",
    "Please notice,",
    "if you want to quit type \"exit\"",
    "if you want to reset calculator type \"reset\"",
    "Any unknown or ilegal expression will be ignored",
    "and it will not affect the operation in progress!",
    "",
];

/// Control flag attached to a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    /// End the session and hand control back to the host.
    Halt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub lines: Vec<String>,
    pub flag: Option<Flag>,
    /// Set when the line was refused; the stack is unchanged in that case.
    pub rejection: Option<Unprocessable>,
}

impl Reply {
    pub fn line(text: impl Into<String>) -> Self {
        Reply {
            lines: vec![text.into()],
            flag: None,
            rejection: None,
        }
    }

    pub fn rejected(reason: Unprocessable) -> Self {
        Reply {
            lines: vec![reason.message().to_string()],
            flag: None,
            rejection: Some(reason),
        }
    }

    pub fn halt(text: impl Into<String>) -> Self {
        Reply {
            lines: vec![text.into()],
            flag: Some(Flag::Halt),
            rejection: None,
        }
    }

    pub fn is_halt(&self) -> bool {
        self.flag == Some(Flag::Halt)
    }

    /// First output line, which is the whole message for the calculator.
    pub fn message(&self) -> &str {
        self.lines.first().map(String::as_str).unwrap_or("")
    }
}

/// Something a host can run: it gets a banner on start and one reply per
/// submitted line.
pub trait Program {
    fn display_name(&self) -> &'static str;

    fn init(&mut self) -> Vec<String>;

    fn process_input(&mut self, text: &str) -> Reply;
}

/// Why a line was rejected, as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unprocessable {
    NotRecognized,
    NotEnoughValues,
    InvalidResult,
    NotNumberOrOperator,
}

impl Unprocessable {
    pub fn message(self) -> &'static str {
        match self {
            Unprocessable::NotRecognized => "(The input is not recognized)",
            Unprocessable::NotEnoughValues => {
                "(There are not enough values to process the operation)"
            }
            Unprocessable::InvalidResult => "(One of the values is unprocessable by operator)",
            Unprocessable::NotNumberOrOperator => "(One of the values is not a number or operator)",
        }
    }

    /// Wording depends on whether the offending token stood alone or was
    /// part of a longer expression.
    fn from_error(err: &EvalError, standalone: bool) -> Self {
        match err {
            EvalError::UnrecognizedToken(_) if standalone => Unprocessable::NotRecognized,
            EvalError::UnrecognizedToken(_) => Unprocessable::NotNumberOrOperator,
            EvalError::InsufficientOperands(_) => Unprocessable::NotEnoughValues,
            EvalError::InvalidOperationResult { .. } => Unprocessable::InvalidResult,
        }
    }
}

/// The RPN calculator program.
#[derive(Debug, Default)]
pub struct RpnProgram {
    stack: Stack,
}

impl RpnProgram {
    pub fn new() -> Self {
        RpnProgram {
            stack: Stack::new(),
        }
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    /// Evaluates one expression line against the live stack.
    ///
    /// Multi-token lines are atomic: they run on a copy of the stack that
    /// replaces the live one only if every token succeeds.
    pub fn evaluate(&mut self, expression: &str) -> Result<String, EvalError> {
        let tokens = tokenize(expression);
        match tokens.as_slice() {
            [] => Ok(self.stack.peek_result()),
            [token] => {
                step(&mut self.stack, *token)?;
                Ok(self.stack.peek_result())
            }
            _ => {
                if let Some(Token::Invalid(chunk)) = tokens.iter().find(|t| !t.is_valid()) {
                    return Err(EvalError::UnrecognizedToken(chunk.to_string()));
                }

                let mut scratch = self.stack.clone();
                for token in &tokens {
                    step(&mut scratch, *token)?;
                }
                self.stack = scratch;
                Ok(self.stack.peek_result())
            }
        }
    }
}

fn step(stack: &mut Stack, token: Token<'_>) -> Result<(), EvalError> {
    match token {
        Token::Number(value) => stack.push(value)?,
        Token::Operator(op) => {
            stack.apply_operator(op)?;
        }
        Token::Invalid(chunk) => return Err(EvalError::UnrecognizedToken(chunk.to_string())),
    }
    Ok(())
}

impl Program for RpnProgram {
    fn display_name(&self) -> &'static str {
        "rpn"
    }

    fn init(&mut self) -> Vec<String> {
        self.stack.reset();
        BANNER.iter().map(|line| line.to_string()).collect()
    }

    fn process_input(&mut self, text: &str) -> Reply {
        let trimmed = text.trim();
        match trimmed {
            EXIT_COMMAND => Reply::halt(FAREWELL),
            RESET_COMMAND => {
                self.stack.reset();
                Reply::line(self.stack.peek_result())
            }
            "" => Reply::line(""),
            _ => {
                let standalone = trimmed.split_whitespace().nth(1).is_none();
                match self.evaluate(trimmed) {
                    Ok(display) => {
                        trace!(input = trimmed, depth = self.stack.len(), "committed");
                        Reply::line(display)
                    }
                    Err(err) => {
                        debug!(input = trimmed, error = %err, "rejected");
                        Reply::rejected(Unprocessable::from_error(&err, standalone))
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program_with(lines: &[&str]) -> RpnProgram {
        let mut program = RpnProgram::new();
        program.init();
        for line in lines {
            program.process_input(line);
        }
        program
    }

    #[test]
    fn exit_halts_without_reset() {
        let mut program = program_with(&["4 5"]);
        let reply = program.process_input("  exit ");
        assert!(reply.is_halt());
        assert_eq!(reply.message(), FAREWELL);
        assert_eq!(program.stack().values(), &[4.0, 5.0]);
    }

    #[test]
    fn reset_reports_zero() {
        let mut program = program_with(&["4 5"]);
        assert_eq!(program.process_input("reset"), Reply::line("0"));
        assert_eq!(program.process_input("reset"), Reply::line("0"));
        assert!(program.stack().is_empty());
    }

    #[test]
    fn blank_line_is_a_no_op() {
        let mut program = program_with(&["12"]);
        let reply = program.process_input("   \t ");
        assert_eq!(reply, Reply::line(""));
        assert_eq!(program.stack().values(), &[12.0]);
    }

    #[test]
    fn single_tokens() {
        let mut program = program_with(&[]);
        assert_eq!(program.process_input("5").message(), "5");
        assert_eq!(program.process_input("9").message(), "9");
        assert_eq!(program.process_input("+").message(), "14");
        assert_eq!(program.stack().len(), 1);
    }

    #[test]
    fn single_token_failures() {
        let mut program = program_with(&[]);
        assert_eq!(
            program.process_input("+").message(),
            Unprocessable::NotEnoughValues.message()
        );
        assert_eq!(
            program.process_input("abc").message(),
            Unprocessable::NotRecognized.message()
        );

        program.process_input("2");
        program.process_input("0");
        assert_eq!(
            program.process_input("/").message(),
            Unprocessable::InvalidResult.message()
        );
        assert_eq!(program.stack().values(), &[2.0, 0.0]);
    }

    #[test]
    fn multi_token_line_commits_once() {
        let mut program = program_with(&[]);
        assert_eq!(program.process_input("8 17 -").message(), "-9");
        assert_eq!(program.process_input("3 *").message(), "-27");
        assert_eq!(program.stack().values(), &[-27.0]);
    }

    #[test]
    fn invalid_token_rejects_whole_line() {
        let mut program = program_with(&["1 2"]);
        let reply = program.process_input("3 x +");
        assert_eq!(reply.message(), Unprocessable::NotNumberOrOperator.message());
        assert_eq!(reply.rejection, Some(Unprocessable::NotNumberOrOperator));
        assert_eq!(program.stack().values(), &[1.0, 2.0]);
    }

    #[test]
    fn failing_line_restores_stack() {
        let mut program = program_with(&["2"]);
        let reply = program.process_input("0 /");
        assert_eq!(reply.message(), Unprocessable::InvalidResult.message());
        assert_eq!(program.stack().values(), &[2.0]);

        let reply = program.process_input("1 1 + + + 5");
        assert_eq!(reply.message(), Unprocessable::NotEnoughValues.message());
        assert_eq!(program.stack().values(), &[2.0]);
    }

    #[test]
    fn init_clears_and_returns_banner() {
        let mut program = program_with(&["1 2 3"]);
        let banner = program.init();
        assert!(banner.iter().any(|l| l == "Welcome to RPN Calculator!"));
        assert!(program.stack().is_empty());
        assert_eq!(program.display_name(), "rpn");
    }
}

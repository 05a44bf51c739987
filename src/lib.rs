pub mod input;
pub mod line_mode;
pub mod program;
pub mod rpn_engine;

#[cfg(feature = "tui")]
pub mod render_help;
#[cfg(feature = "tui")]
pub mod tui_mode;

pub use program::{Flag, Program, Reply, RpnProgram, Unprocessable};
pub use rpn_engine::{EvalError, Operator, Stack, Token};

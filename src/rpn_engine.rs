use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("'{0}' is neither a number nor an operator")]
    UnrecognizedToken(String),

    #[error("'{0}' needs two values on the stack")]
    InsufficientOperands(Operator),

    #[error("{lhs} {op} {rhs} does not produce a finite value")]
    InvalidOperationResult { lhs: f64, op: Operator, rhs: f64 },
}

pub type Result<T> = std::result::Result<T, EvalError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    pub fn from_symbol(text: &str) -> Option<Self> {
        match text {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Sub),
            "*" => Some(Operator::Mul),
            "/" => Some(Operator::Div),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
        }
    }

    /// Raw IEEE-754 result; validity is checked by the caller.
    pub fn eval(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Operator::Add => lhs + rhs,
            Operator::Sub => lhs - rhs,
            Operator::Mul => lhs * rhs,
            Operator::Div => lhs / rhs,
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token<'a> {
    Number(f64),
    Operator(Operator),
    Invalid(&'a str),
}

impl<'a> Token<'a> {
    pub fn classify(chunk: &'a str) -> Self {
        if let Some(op) = Operator::from_symbol(chunk) {
            return Token::Operator(op);
        }
        match parse_number(chunk) {
            Some(value) => Token::Number(value),
            None => Token::Invalid(chunk),
        }
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, Token::Invalid(_))
    }
}

/// Splits on whitespace and classifies every chunk.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    input.split_whitespace().map(Token::classify).collect()
}

// `str::parse::<f64>` also accepts "inf" and "NaN", and saturates
// out-of-range literals to infinity; none of those may enter the stack.
fn parse_number(chunk: &str) -> Option<f64> {
    chunk.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Plain decimal, switching to exponent form for very large or very small
/// magnitudes.
pub fn format_value(value: f64) -> String {
    let magnitude = value.abs();
    if value == 0.0 {
        // covers -0
        "0".to_string()
    } else if magnitude >= 1e21 || magnitude < 1e-6 {
        format!("{:e}", value)
    } else {
        value.to_string()
    }
}

/// The operand stack. Every stored value is finite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stack {
    values: Vec<f64>,
}

impl Stack {
    pub fn new() -> Self {
        Stack { values: Vec::new() }
    }

    /// Non-finite values are refused like any other unreadable token.
    pub fn push(&mut self, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(EvalError::UnrecognizedToken(value.to_string()));
        }
        self.values.push(value);
        Ok(())
    }

    /// Replaces the two topmost values with `second <op> top`.
    ///
    /// On error the stack is left exactly as it was.
    pub fn apply_operator(&mut self, op: Operator) -> Result<f64> {
        let depth = self.values.len();
        if depth < 2 {
            return Err(EvalError::InsufficientOperands(op));
        }

        let (lhs, rhs) = (self.values[depth - 2], self.values[depth - 1]);
        let result = op.eval(lhs, rhs);
        if !result.is_finite() {
            return Err(EvalError::InvalidOperationResult { lhs, op, rhs });
        }

        self.values.truncate(depth - 2);
        self.values.push(result);
        Ok(result)
    }

    pub fn top(&self) -> Option<f64> {
        self.values.last().copied()
    }

    pub fn peek_result(&self) -> String {
        self.top().map(format_value).unwrap_or_else(|| "0".to_string())
    }

    pub fn reset(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bottom first, top last.
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack_of(values: &[f64]) -> Stack {
        let mut stack = Stack::new();
        for &v in values {
            stack.push(v).expect("finite test value");
        }
        stack
    }

    #[test]
    fn classifies_tokens() {
        assert_eq!(Token::classify("5"), Token::Number(5.0));
        assert_eq!(Token::classify("-2.5"), Token::Number(-2.5));
        assert_eq!(Token::classify("+7"), Token::Number(7.0));
        assert_eq!(Token::classify(".5"), Token::Number(0.5));
        assert_eq!(Token::classify("1e3"), Token::Number(1000.0));
        assert_eq!(Token::classify("-"), Token::Operator(Operator::Sub));
        assert_eq!(Token::classify("/"), Token::Operator(Operator::Div));
        assert_eq!(Token::classify("x"), Token::Invalid("x"));
        assert_eq!(Token::classify("3x"), Token::Invalid("3x"));
        assert_eq!(Token::classify("++"), Token::Invalid("++"));
        assert_eq!(Token::classify("e5"), Token::Invalid("e5"));
    }

    #[test]
    fn rejects_non_finite_literals() {
        assert!(!Token::classify("inf").is_valid());
        assert!(!Token::classify("-infinity").is_valid());
        assert!(!Token::classify("NaN").is_valid());
        assert!(!Token::classify("1e400").is_valid());
    }

    #[test]
    fn tokenize_ignores_repeated_whitespace() {
        let tokens = tokenize("  8   17\t- ");
        assert_eq!(
            tokens,
            vec![
                Token::Number(8.0),
                Token::Number(17.0),
                Token::Operator(Operator::Sub)
            ]
        );
    }

    #[test]
    fn push_grows_stack_by_one() {
        let mut stack = Stack::new();
        stack.push(3.25).expect("finite");
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.peek_result(), "3.25");
    }

    #[test]
    fn operand_order() {
        let mut stack = stack_of(&[8.0, 17.0]);
        assert_eq!(stack.apply_operator(Operator::Sub), Ok(-9.0));
        assert_eq!(stack.values(), &[-9.0]);

        let mut stack = stack_of(&[1.0, 8.0, 2.0]);
        assert_eq!(stack.apply_operator(Operator::Div), Ok(4.0));
        assert_eq!(stack.values(), &[1.0, 4.0]);
    }

    #[test]
    fn insufficient_operands_leaves_stack() {
        let mut stack = stack_of(&[4.0]);
        assert_eq!(
            stack.apply_operator(Operator::Mul),
            Err(EvalError::InsufficientOperands(Operator::Mul))
        );
        assert_eq!(stack.values(), &[4.0]);

        let mut empty = Stack::new();
        assert!(empty.apply_operator(Operator::Add).is_err());
        assert!(empty.is_empty());
    }

    #[test]
    fn division_by_zero_is_rolled_back() {
        for lhs in [2.0, 0.0, -7.5] {
            let mut stack = stack_of(&[lhs, 0.0]);
            let err = stack.apply_operator(Operator::Div).unwrap_err();
            assert!(matches!(err, EvalError::InvalidOperationResult { .. }));
            assert_eq!(stack.values(), &[lhs, 0.0]);
        }
    }

    #[test]
    fn overflow_is_rejected() {
        let mut stack = stack_of(&[f64::MAX, 2.0]);
        assert!(stack.apply_operator(Operator::Mul).is_err());
        assert_eq!(stack.len(), 2);

        let mut stack = stack_of(&[-f64::MAX, f64::MAX]);
        assert!(stack.apply_operator(Operator::Sub).is_err());
        assert_eq!(stack.values(), &[-f64::MAX, f64::MAX]);
    }

    #[test]
    fn peek_result_formatting() {
        assert_eq!(Stack::new().peek_result(), "0");
        assert_eq!(stack_of(&[14.0]).peek_result(), "14");
        assert_eq!(stack_of(&[-9.0]).peek_result(), "-9");
        assert_eq!(stack_of(&[0.1 + 0.2]).peek_result(), "0.30000000000000004");
        assert_eq!(stack_of(&[-0.0]).peek_result(), "0");
        assert_eq!(stack_of(&[123456.5]).peek_result(), "123456.5");
        assert_eq!(stack_of(&[0.000001]).peek_result(), "0.000001");
    }

    #[test]
    fn extreme_magnitudes_use_exponent_form() {
        assert_eq!(stack_of(&[1e300]).peek_result(), "1e300");
        assert_eq!(stack_of(&[-1.5e22]).peek_result(), "-1.5e22");
        assert_eq!(stack_of(&[1e-7]).peek_result(), "1e-7");
    }

    #[test]
    fn push_refuses_non_finite() {
        let mut stack = stack_of(&[1.0]);
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                stack.push(value),
                Err(EvalError::UnrecognizedToken(_))
            ));
        }
        assert_eq!(stack.values(), &[1.0]);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut stack = stack_of(&[1.0, 2.0]);
        stack.reset();
        assert_eq!(stack.peek_result(), "0");
        stack.reset();
        assert_eq!(stack.peek_result(), "0");
        assert!(stack.is_empty());
    }
}

use rpncalc::{Program, Reply, RpnProgram, Unprocessable};

fn session() -> RpnProgram {
    let mut program = RpnProgram::new();
    program.init();
    program
}

fn feed(program: &mut RpnProgram, lines: &[&str]) -> Vec<Reply> {
    lines.iter().map(|line| program.process_input(line)).collect()
}

#[test]
fn sums_two_numbers_one_by_one() {
    let mut program = session();
    let replies = feed(&mut program, &["5", "9", "+"]);
    let messages: Vec<&str> = replies.iter().map(Reply::message).collect();
    assert_eq!(messages, vec!["5", "9", "14"]);
}

#[test]
fn subtracts_in_one_line() {
    let mut program = session();
    assert_eq!(program.process_input("8 17 -").message(), "-9");
}

#[test]
fn failing_lines_never_touch_the_stack() {
    let cases = [
        ("3 x +", Unprocessable::NotNumberOrOperator),
        ("1 2 + foo", Unprocessable::NotNumberOrOperator),
        ("0 /", Unprocessable::InvalidResult),
        ("4 5 + 0 /", Unprocessable::InvalidResult),
        ("+ + + +", Unprocessable::NotEnoughValues),
        ("7 8 + + + +", Unprocessable::NotEnoughValues),
        ("7 8 9 + + + + +", Unprocessable::NotEnoughValues),
        ("1e308 10 *", Unprocessable::InvalidResult),
    ];

    for (line, reason) in cases {
        let mut program = session();
        feed(&mut program, &["2", "6.5"]);
        let before = program.stack().clone();

        let reply = program.process_input(line);
        assert_eq!(reply.rejection, Some(reason), "line {:?}", line);
        assert_eq!(reply.message(), reason.message());
        assert_eq!(program.stack(), &before, "line {:?}", line);
    }
}

#[test]
fn operators_need_two_values() {
    let setups: [&[&str]; 2] = [&[], &["3"]];
    for setup in setups {
        for op in ["+", "-", "*", "/"] {
            let mut program = session();
            feed(&mut program, setup);
            let before = program.stack().clone();

            let reply = program.process_input(op);
            assert_eq!(reply.rejection, Some(Unprocessable::NotEnoughValues));
            assert_eq!(program.stack(), &before);
        }
    }
}

#[test]
fn division_by_zero_is_refused() {
    for a in ["0", "1", "-3.5", "1e300"] {
        let mut program = session();
        let reply = program.process_input(&format!("{} 0 /", a));
        assert_eq!(reply.rejection, Some(Unprocessable::InvalidResult));
        assert!(program.stack().is_empty());
    }

    let mut program = session();
    feed(&mut program, &["2"]);
    let reply = program.process_input("0 /");
    assert_eq!(reply.message(), "(One of the values is unprocessable by operator)");
    assert_eq!(program.stack().values(), &[2.0]);
}

#[test]
fn reset_is_idempotent() {
    let mut program = session();
    assert_eq!(program.process_input("reset").message(), "0");
    feed(&mut program, &["1 2 3"]);
    assert_eq!(program.process_input("reset").message(), "0");
    assert_eq!(program.process_input("reset").message(), "0");
    assert!(program.stack().is_empty());
}

#[test]
fn work_continues_after_a_failure() {
    let mut program = session();
    let replies = feed(&mut program, &["10 4", "x", "2 0 /", "-", "3 *"]);
    let messages: Vec<&str> = replies.iter().map(Reply::message).collect();
    assert_eq!(
        messages,
        vec![
            "4",
            "(The input is not recognized)",
            "(One of the values is unprocessable by operator)",
            "6",
            "18"
        ]
    );
}

#[test]
fn exit_ends_the_session() {
    let mut program = session();
    feed(&mut program, &["1 2"]);
    let reply = program.process_input("exit");
    assert!(reply.is_halt());
    assert_eq!(reply.message(), "Thanks for using RPN Calculator");
    assert_eq!(program.stack().len(), 2);
}

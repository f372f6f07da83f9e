use basecalc::{Base, CalculatorSession, Operation};

///! Drives a calculator session with key presses, one per argument.
///! Keys are digits, ".", operator labels (+ - x ÷ AND OR XOR NOR << >>),
///! "=", "AC", "+/-" and "base:N".
///!  cargo run --example keypad -- 1 2 + 3 0 = base:16

fn press(session: &mut CalculatorSession, key: &str) -> basecalc::Result<()> {
    if let Some(op) = Operation::from_string(key) {
        session.perform_operation(op);
        return Ok(());
    }
    match key {
        "=" => session.solve(),
        "AC" => {
            session.all_clear();
            Ok(())
        }
        "+/-" => {
            session.change_sign();
            Ok(())
        }
        _ => {
            if let Some(radix) = key.strip_prefix("base:") {
                let base = radix.parse::<u32>().ok().and_then(Base::new);
                return match base {
                    Some(base) => session.change_base(base),
                    None => Err(basecalc::NumberError::InvalidNumber),
                };
            }
            for c in key.chars() {
                session.add_digit(c)?;
            }
            Ok(())
        }
    }
}

fn main() {
    env_logger::init();

    let mut session = CalculatorSession::new();
    for key in std::env::args().skip(1) {
        if let Err(err) = press(&mut session, &key) {
            eprintln!("{:>8}: {}", key, err);
            continue;
        }
        println!(
            "{:>8} | base {:2} | {}",
            key,
            session.current_base(),
            session.current_text()
        );
    }
}

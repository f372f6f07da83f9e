use basecalc::{Base, FloatFormat, Number};

///! Prints a number in every base, with its complements and floating point
///! bits.
///!  cargo run --example convert -- 1010.1011 2

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let text = args.next().unwrap_or_else(|| "39887.5625".to_string());
    let radix = args.next().and_then(|r| r.parse().ok()).unwrap_or(10);

    let Some(base) = Base::new(radix) else {
        eprintln!("base must be between 2 and 16");
        std::process::exit(1);
    };
    let number = match Number::parse(&text, base) {
        Ok(number) => number,
        Err(err) => {
            eprintln!("{}: {}", text, err);
            std::process::exit(1);
        }
    };

    for base in Base::all() {
        println!("base {:2}: {}", base, number.format_in(base));
    }
    if !number.has_fract() {
        match number.radix_complement(None) {
            Ok(c) => println!("radix complement:            {}", c),
            Err(err) => println!("radix complement:            {}", err),
        }
        match number.radix_complement_diminished(None) {
            Ok(c) => println!("diminished radix complement: {}", c),
            Err(err) => println!("diminished radix complement: {}", err),
        }
    }
    println!("single: {}", number.to_floating_point(FloatFormat::SINGLE));
    println!("double: {}", number.to_floating_point(FloatFormat::DOUBLE));
}

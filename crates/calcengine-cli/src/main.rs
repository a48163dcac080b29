//! Command-line front end: evaluate one expression and print the result.

use std::process::ExitCode;

use calcengine::{AngleMode, Engine, Lens, Result, RoundingStrategy};
use clap::{Parser, ValueEnum};

#[derive(Parser)]
#[command(name = "calcengine", version, about = "Evaluate an arithmetic expression")]
struct Cli {
    /// The infix expression to evaluate, e.g. "2+3*MAX(1,4)".
    expression: String,

    /// Unit for trigonometric arguments and results.
    #[arg(long, value_enum, default_value_t = AngleModeArg::Degree)]
    angle_mode: AngleModeArg,

    /// Base the expression's literals and result are written in.
    #[arg(long, value_enum, default_value_t = RadixArg::Dec)]
    radix: RadixArg,

    /// Fractional digits kept by precision-sensitive arithmetic.
    #[arg(long)]
    precision: Option<u32>,

    /// Print the compiled RPN form instead of evaluating.
    #[arg(long)]
    rpn: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum AngleModeArg {
    Degree,
    Radian,
    Gradian,
}

impl From<AngleModeArg> for AngleMode {
    fn from(arg: AngleModeArg) -> Self {
        match arg {
            AngleModeArg::Degree => AngleMode::Degree,
            AngleModeArg::Radian => AngleMode::Radian,
            AngleModeArg::Gradian => AngleMode::Gradian,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum RadixArg {
    Dec,
    Bin,
    Oct,
    Hex,
}

impl From<RadixArg> for Lens {
    fn from(arg: RadixArg) -> Self {
        match arg {
            RadixArg::Dec => Lens::Decimal,
            RadixArg::Bin => Lens::Binary,
            RadixArg::Oct => Lens::Octal,
            RadixArg::Hex => Lens::Hex,
        }
    }
}

fn run(cli: &Cli) -> Result<String> {
    let mut engine = Engine::new();
    engine.set_angle_mode(cli.angle_mode.into());
    if let Some(digits) = cli.precision {
        engine.set_precision(digits, RoundingStrategy::MidpointNearestEven);
    }

    let lens = Lens::from(cli.radix);
    let program = engine.parse_radix(&cli.expression, lens)?;
    if cli.rpn {
        return Ok(program.to_string());
    }
    log::debug!("compiled: {program}");
    engine.evaluate(&program, lens).map(|result| result.to_string())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

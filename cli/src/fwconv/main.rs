use std::error::Error;
use std::fmt::{self, Display, Formatter};

use clap::ArgAction::{Set, SetTrue};
use clap::Parser;
use tracing::{event, span, Level};
use tracing_subscriber::prelude::*;

use fixedwidth::prelude::*;

/// Converts fixed-width integers between decimal, hexadecimal and
/// binary
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
struct Cli {
    /// The value to convert.
    #[clap(action = Set)]
    value: String,

    /// Radix in which VALUE is written (D, X or B).
    #[clap(action = Set, short = 'r', long, default_value = "D")]
    radix: Radix,

    /// Width of the value in bits.
    #[clap(action = Set, short = 'w', long, default_value_t = MAX_WIDTH)]
    width: u32,

    /// Treat the value as signed (two's complement).
    #[clap(action = SetTrue, long)]
    signed: bool,

    /// Truncate the value to this many bits.
    #[clap(action = Set, long)]
    truncate: Option<u32>,

    /// Saturate the value to this many bits.
    #[clap(action = Set, long)]
    saturate: Option<u32>,

    /// Expand or saturate the value to this many bits.
    #[clap(action = Set, long)]
    set_width: Option<u32>,

    /// Print only the bit field MSB:LSB.
    #[clap(action = Set, long, value_parser = parse_field)]
    field: Option<(u32, u32)>,

    /// Radix to print (D, X or B).  All three are printed when this
    /// is not given.
    #[clap(action = Set, short = 'o', long)]
    output: Option<Radix>,
}

fn parse_field(s: &str) -> Result<(u32, u32), String> {
    let (msb, lsb) = s
        .split_once(':')
        .ok_or_else(|| format!("expected MSB:LSB, got {s:?}"))?;
    let msb: u32 = msb
        .trim()
        .parse()
        .map_err(|e| format!("bad MSB {msb:?}: {e}"))?;
    let lsb: u32 = lsb
        .trim()
        .parse()
        .map_err(|e| format!("bad LSB {lsb:?}: {e}"))?;
    Ok((msb, lsb))
}

#[derive(Debug)]
enum Fail {
    /// The value could not be built, converted or formatted.
    Value(fixedwidth::Error),
    /// We were not able to correctly initialise the program.
    InitialisationFailure(String),
}

impl Display for Fail {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Fail::Value(e) => e.fmt(f),
            Fail::InitialisationFailure(msg) => f.write_str(msg.as_str()),
        }
    }
}

impl Error for Fail {}

impl From<fixedwidth::Error> for Fail {
    fn from(e: fixedwidth::Error) -> Fail {
        Fail::Value(e)
    }
}

fn convert(cli: &Cli) -> Result<Vec<(Radix, String)>, Fail> {
    let mut value = FixedWidthInteger::from_str_radix(&cli.value, cli.radix, cli.width, cli.signed)?;
    event!(Level::DEBUG, "parsed {:?}", value);
    if let Some(w) = cli.truncate {
        value.truncate(w)?;
    }
    if let Some(w) = cli.saturate {
        value.saturate(w)?;
    }
    if let Some(w) = cli.set_width {
        value.set_new_width(w)?;
    }
    event!(Level::DEBUG, "converted to {:?}", value);

    let radixes: Vec<Radix> = match cli.output {
        Some(radix) => vec![radix],
        None => Radix::ALL.to_vec(),
    };
    radixes
        .into_iter()
        .map(|radix| {
            let text = match cli.field {
                Some((msb, lsb)) => value.format_field(radix, msb, lsb)?,
                None => value.format(radix),
            };
            Ok((radix, text))
        })
        .collect()
}

fn run_converter() -> Result<(), Fail> {
    let cli = Cli::parse();

    // Select which trace messages get printed with RUST_LOG, for
    // example RUST_LOG=debug.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);
    let filter_layer = match tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("warn"))
    {
        Err(e) => {
            return Err(Fail::InitialisationFailure(format!(
                "failed to initialise tracing filter (perhaps there is a problem with environment variables): {e}"
            )));
        }
        Ok(layer) => layer,
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    let span = span!(Level::ERROR, "convert", value=%cli.value, radix=%cli.radix, width=cli.width);
    let _enter = span.enter();
    let lines = convert(&cli)?;
    if cli.output.is_some() {
        for (_, text) in &lines {
            println!("{text}");
        }
    } else {
        for (radix, text) in &lines {
            println!("{}: {}", radix.code(), text);
        }
    }
    Ok(())
}

fn main() {
    match run_converter() {
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
        Ok(()) => {
            std::process::exit(0);
        }
    }
}

//! Inspection tool for Q24.8 fixed-point values.
//!
//! Converts each command-line value into a [`FixedPoint`] and prints its raw
//! bit pattern next to the integer and float views.

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use fixed8::FixedPoint;

#[derive(Parser, Debug)]
#[command(name = "fixed8")]
#[command(about = "Show the raw bits, integer and float views of Q24.8 fixed-point values")]
struct Args {
    /// Values to convert (integers are shifted, everything else is rounded)
    #[arg(required = true, allow_negative_numbers = true)]
    values: Vec<String>,

    /// Treat every value as an already-scaled raw i32 (decimal or 0x hex)
    #[arg(long, conflicts_with = "checked")]
    raw: bool,

    /// Reject values that would wrap or saturate instead of converting them
    #[arg(long)]
    checked: bool,

    /// Digits after the decimal point in the float column
    #[arg(short, long)]
    precision: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// How a command-line value is turned into a [`FixedPoint`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    /// Shift integers, round floats, wrap/saturate silently
    Convert,
    /// Like `Convert` but overflow is an error
    Checked,
    /// Value is the raw bit pattern
    Raw,
}

impl Mode {
    fn from_args(args: &Args) -> Self {
        if args.raw {
            Mode::Raw
        } else if args.checked {
            Mode::Checked
        } else {
            Mode::Convert
        }
    }
}

fn looks_like_int(text: &str) -> bool {
    let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn parse_raw(text: &str) -> Result<i32> {
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    match body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        // Hex is read as a 32-bit pattern so 0xFFFFFF00 means -256.
        Some(hex) => {
            let bits = u32::from_str_radix(hex, 16)? as i32;
            Ok(if negative { bits.wrapping_neg() } else { bits })
        }
        None => Ok(text.parse::<i32>()?),
    }
}

fn parse_value(text: &str, mode: Mode) -> Result<FixedPoint> {
    let text = text.trim();
    let fp = match mode {
        Mode::Raw => FixedPoint::from_raw_bits(
            parse_raw(text).with_context(|| format!("invalid raw value {text:?}"))?,
        ),
        _ if looks_like_int(text) => {
            let n: i32 = text
                .parse()
                .with_context(|| format!("integer {text:?} does not fit in i32"))?;
            if mode == Mode::Checked {
                FixedPoint::checked_from_int(n)
                    .with_context(|| format!("cannot convert {text:?}"))?
            } else {
                FixedPoint::from_int(n)
            }
        }
        Mode::Checked => text
            .parse::<FixedPoint>()
            .with_context(|| format!("cannot convert {text:?}"))?,
        Mode::Convert => {
            let f: f32 = text
                .parse()
                .with_context(|| format!("invalid number {text:?}"))?;
            FixedPoint::from_float(f)
        }
    };
    log::debug!("{text:?} ({mode:?}) -> {fp:?}");
    Ok(fp)
}

fn describe(input: &str, fp: FixedPoint, precision: Option<usize>) -> String {
    let raw = fp.raw_bits();
    let float = match precision {
        Some(p) => format!("{fp:.p$}"),
        None => fp.to_string(),
    };
    format!(
        "{input:>12}  raw={raw:>11} (0x{raw:08X})  int={int:>8}  float={float}",
        int = fp.to_int()
    )
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mode = Mode::from_args(&args);
    log::info!(
        "Converting {} value(s) with {} fractional bits ({mode:?})",
        args.values.len(),
        FixedPoint::FRACTIONAL_BITS
    );

    for value in &args.values {
        let fp = parse_value(value, mode)?;
        println!("{}", describe(value, fp, args.precision));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_definition() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn test_negative_values_are_positional() {
        let args = Args::try_parse_from(["fixed8", "-1", "-2.5", "-vv"]).unwrap();
        assert_eq!(args.values, vec!["-1", "-2.5"]);
        assert_eq!(args.verbose, 2);
        assert_eq!(Mode::from_args(&args), Mode::Convert);
    }

    #[test]
    fn test_raw_conflicts_with_checked() {
        assert!(Args::try_parse_from(["fixed8", "--raw", "--checked", "1"]).is_err());
    }

    #[test]
    fn test_parse_value_convert() {
        assert_eq!(parse_value("10", Mode::Convert).unwrap(), FixedPoint::from_int(10));
        assert_eq!(parse_value("5.05", Mode::Convert).unwrap().raw_bits(), 1293);
        assert_eq!(parse_value("-1", Mode::Convert).unwrap().to_int(), -1);
        // Wraps silently outside the checked mode
        assert_eq!(parse_value("16777216", Mode::Convert).unwrap().raw_bits(), 0);
        assert!(parse_value("ten", Mode::Convert).is_err());
    }

    #[test]
    fn test_parse_value_checked() {
        assert_eq!(parse_value("5.05", Mode::Checked).unwrap().raw_bits(), 1293);
        let err = parse_value("16777216", Mode::Checked).unwrap_err();
        assert!(err.to_string().contains("\"16777216\""));
        assert!(err.root_cause().to_string().contains("Integer overflow"));
        assert!(parse_value("1e9", Mode::Checked).is_err());
        assert!(parse_value("inf", Mode::Checked).is_err());
    }

    #[test]
    fn test_parse_value_raw() {
        assert_eq!(parse_value("1293", Mode::Raw).unwrap().raw_bits(), 1293);
        assert_eq!(parse_value("0x100", Mode::Raw).unwrap(), FixedPoint::ONE);
        assert_eq!(parse_value("0xFFFFFF00", Mode::Raw).unwrap().to_int(), -1);
        assert_eq!(parse_value("-0x80", Mode::Raw).unwrap().raw_bits(), -128);
        assert!(parse_value("1.5", Mode::Raw).is_err());

        assert_eq!(
            parse_value("-2147483648", Mode::Raw).unwrap(),
            FixedPoint::MIN
        );
        assert_eq!(
            parse_value("0x80000000", Mode::Raw).unwrap().raw_bits(),
            i32::MIN
        );
        assert!(parse_value("--5", Mode::Raw).is_err());
        assert!(parse_value("-+5", Mode::Raw).is_err());
        assert!(parse_value("--0x5", Mode::Raw).is_err());
    }

    #[test]
    fn test_describe() {
        let line = describe("2.5", FixedPoint::from_float(2.5), None);
        assert_eq!(
            line,
            "         2.5  raw=        640 (0x00000280)  int=       2  float=2.5"
        );

        let line = describe("-1", FixedPoint::from_int(-1), Some(2));
        assert!(line.contains("(0xFFFFFF00)"));
        assert!(line.ends_with("float=-1.00"));
    }
}

// Command-line interface.
//
// Token streams have no wire format, so the CLI is a driver for
// inspecting and exercising the codec rather than a file compressor:
// dump the logical token stream for an input, or run a full
// encode/decode roundtrip and report what happened.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};
use log::LevelFilter;

use crate::decoder;
use crate::encoder::{self, DEFAULT_WINDOW_SIZE, EncodeOptions};
use crate::token::Token;

// ---------------------------------------------------------------------------
// Byte size parsing (supports K, M, G suffixes)
// ---------------------------------------------------------------------------

fn parse_byte_size(s: &str) -> Result<usize, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty size string".into());
    }
    let (num_part, multiplier) = match s.as_bytes().last() {
        Some(b'k' | b'K') => (&s[..s.len() - 1], 1024usize),
        Some(b'm' | b'M') => (&s[..s.len() - 1], 1024 * 1024),
        Some(b'g' | b'G') => (&s[..s.len() - 1], 1024 * 1024 * 1024),
        _ => (s, 1usize),
    };
    let num: usize = num_part
        .trim()
        .parse()
        .map_err(|e| format!("invalid size '{s}': {e}"))?;
    num.checked_mul(multiplier)
        .ok_or_else(|| format!("size overflow: '{s}'"))
}

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// Sliding-window LZ77 token codec.
#[derive(Parser, Debug)]
#[command(
    name = "oxilz",
    version,
    about = "Sliding-window LZ77 token codec",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// Quiet mode (suppress non-error output).
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Output stats as JSON to stderr.
    #[arg(long = "json", global = true)]
    json_output: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Encode an input and print its token stream.
    Tokens(InputArgs),
    /// Encode then decode an input, verifying the reconstruction.
    Roundtrip(InputArgs),
    /// Print build/configuration details.
    Config,
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Input file (use '-' for stdin).
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,

    #[command(flatten)]
    tuning: TuningArgs,
}

#[derive(Args, Debug)]
struct TuningArgs {
    /// History window size (supports K/M/G suffix).
    #[arg(long = "window-size", value_parser = parse_byte_size, default_value_t = DEFAULT_WINDOW_SIZE)]
    window_size: usize,

    /// Minimum match length to prefer a backreference over a literal.
    #[arg(long = "min-match", default_value_t = 1)]
    min_match: usize,
}

impl TuningArgs {
    fn options(&self) -> EncodeOptions {
        EncodeOptions {
            window_size: self.window_size,
            min_match: self.min_match,
        }
    }
}

// ---------------------------------------------------------------------------
// Stream stats
// ---------------------------------------------------------------------------

struct StreamStats {
    input_len: usize,
    tokens: usize,
    literals: usize,
    backrefs: usize,
    backref_bytes: usize,
    longest_match: usize,
    /// References whose copy range outruns the data existing when the
    /// copy starts (length > distance + 1).
    overlapping: usize,
}

impl StreamStats {
    fn collect(input_len: usize, tokens: &[Token]) -> Self {
        let mut stats = Self {
            input_len,
            tokens: tokens.len(),
            literals: 0,
            backrefs: 0,
            backref_bytes: 0,
            longest_match: 0,
            overlapping: 0,
        };
        for token in tokens {
            match token {
                Token::Literal(_) => stats.literals += 1,
                Token::Backref(b) => {
                    stats.backrefs += 1;
                    stats.backref_bytes += b.length;
                    stats.longest_match = stats.longest_match.max(b.length);
                    if b.length > b.distance + 1 {
                        stats.overlapping += 1;
                    }
                }
            }
        }
        stats
    }

    fn report(&self, quiet: bool, json: bool) {
        if json {
            let value = serde_json::json!({
                "input_bytes": self.input_len,
                "tokens": self.tokens,
                "literals": self.literals,
                "backrefs": self.backrefs,
                "backref_bytes": self.backref_bytes,
                "longest_match": self.longest_match,
                "overlapping_backrefs": self.overlapping,
            });
            eprintln!("{value}");
        } else if !quiet {
            eprintln!(
                "{} bytes in, {} tokens out ({} literals, {} backrefs covering {} bytes)",
                self.input_len, self.tokens, self.literals, self.backrefs, self.backref_bytes
            );
            eprintln!(
                "longest match: {} bytes; overlapping backrefs: {}",
                self.longest_match, self.overlapping
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn read_input(path: &PathBuf) -> Result<Vec<u8>, String> {
    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .map_err(|e| format!("reading stdin: {e}"))?;
        Ok(buf)
    } else {
        fs::read(path).map_err(|e| format!("reading {}: {e}", path.display()))
    }
}

fn cmd_tokens(args: &InputArgs, quiet: bool, json: bool) -> Result<(), String> {
    let input = read_input(&args.input)?;
    let tokens = encoder::encode_with_options(&input, &args.tuning.options());

    for token in &tokens {
        match token {
            Token::Literal(byte) => {
                if byte.is_ascii_graphic() || *byte == b' ' {
                    println!("literal {:#04x} '{}'", byte, *byte as char);
                } else {
                    println!("literal {byte:#04x}");
                }
            }
            Token::Backref(b) => {
                println!("backref length={} distance={}", b.length, b.distance);
            }
        }
    }

    StreamStats::collect(input.len(), &tokens).report(quiet, json);
    Ok(())
}

fn cmd_roundtrip(args: &InputArgs, quiet: bool, json: bool) -> Result<(), String> {
    let input = read_input(&args.input)?;
    let tokens = encoder::encode_with_options(&input, &args.tuning.options());
    let output = decoder::decode(&tokens).map_err(|e| e.to_string())?;

    if output != input {
        return Err(format!(
            "roundtrip mismatch: {} bytes in, {} bytes out",
            input.len(),
            output.len()
        ));
    }

    StreamStats::collect(input.len(), &tokens).report(quiet, json);
    if !quiet && !json {
        eprintln!("roundtrip verified: {} bytes", output.len());
    }
    Ok(())
}

fn print_config() {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!("oxilz version {version} (Rust)");
    eprintln!("DEFAULT_WINDOW_SIZE={DEFAULT_WINDOW_SIZE}");
    eprintln!("DEFAULT_MIN_MATCH=1");
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn init_logging(quiet: bool, verbose: u8) {
    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

/// Parse arguments and run the selected command, exiting nonzero on
/// failure.
pub fn run() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    let result = match &cli.command {
        Cmd::Tokens(args) => cmd_tokens(args, cli.quiet, cli.json_output),
        Cmd::Roundtrip(args) => cmd_roundtrip(args, cli.quiet, cli.json_output),
        Cmd::Config => {
            print_config();
            Ok(())
        }
    };

    if let Err(message) = result {
        eprintln!("oxilz: {message}");
        process::exit(1);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_size_suffixes() {
        assert_eq!(parse_byte_size("512"), Ok(512));
        assert_eq!(parse_byte_size("4k"), Ok(4096));
        assert_eq!(parse_byte_size("4K"), Ok(4096));
        assert_eq!(parse_byte_size("2M"), Ok(2 * 1024 * 1024));
        assert_eq!(parse_byte_size("1G"), Ok(1024 * 1024 * 1024));
        assert!(parse_byte_size("").is_err());
        assert!(parse_byte_size("12Q").is_err());
    }

    #[test]
    fn stats_count_overlapping_refs() {
        let tokens = crate::encoder::encode(b"ABCABCABC");
        let stats = StreamStats::collect(9, &tokens);
        assert_eq!(stats.tokens, 4);
        assert_eq!(stats.literals, 3);
        assert_eq!(stats.backrefs, 1);
        assert_eq!(stats.backref_bytes, 6);
        assert_eq!(stats.longest_match, 6);
        assert_eq!(stats.overlapping, 1);
    }
}

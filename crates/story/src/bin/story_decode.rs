//! `story-decode`: decode a wrapped story token to JSON.
//!
//! Usage:
//!   story-decode [TOKEN] [--mode auto|v3|legacy] [--allow-legacy] [--current-year N] [--pretty]
//!
//! Reads the token from stdin when it is not given as an argument. Exits 1
//! when the token cannot be decoded and 2 when it decodes but fails
//! validation.

use std::io::{self, Read};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::error;
use tracing_subscriber::EnvFilter;
use wrapped_story::{
    decode_legacy, decode_story, decode_story_auto_with, verify_dictionaries, DecodeOptions,
    LegacyPolicy, VersionedStory,
};

const DEFAULT_LOG_FILTER: &str = "wrapped_story=info";

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Detect the version; V1/V2 only with --allow-legacy.
    Auto,
    /// Require a V3 payload.
    V3,
    /// Decode an archived V1/V2 payload.
    Legacy,
}

#[derive(Debug, Parser)]
#[command(name = "story-decode", version, about = "Decode a wrapped story token to JSON")]
struct Args {
    /// Token to decode. Read from stdin when omitted.
    token: Option<String>,

    #[arg(long, value_enum, default_value_t = Mode::Auto)]
    mode: Mode,

    /// Let auto detection fall back to the V1/V2 decoders.
    #[arg(long, env = "STORY_ALLOW_LEGACY")]
    allow_legacy: bool,

    /// Year the validator treats as the current one.
    #[arg(long, env = "STORY_CURRENT_YEAR")]
    current_year: Option<i64>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,

    /// Debug logging on stderr (overridden by RUST_LOG).
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let fallback = if verbose {
        "wrapped_story=debug"
    } else {
        DEFAULT_LOG_FILTER
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_token(arg: Option<String>) -> Result<String> {
    match arg {
        Some(token) => Ok(token),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read token from stdin")?;
            Ok(buf)
        }
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose);
    verify_dictionaries().context("Label dictionaries are out of sync with the producer")?;

    let token = read_token(args.token)?;
    let token = token.trim();
    let options = DecodeOptions {
        legacy: if args.allow_legacy {
            LegacyPolicy::Accept
        } else {
            LegacyPolicy::Reject
        },
        current_year: args.current_year,
    };

    let decoded = match args.mode {
        Mode::Auto => decode_story_auto_with(token, &options),
        Mode::V3 => decode_story(token).map(VersionedStory::from),
        Mode::Legacy => decode_legacy(token),
    };
    let story = match decoded {
        Ok(story) => story,
        Err(err) => {
            error!(%err, "decode failed");
            eprintln!("{}", err.public_message());
            return Ok(ExitCode::from(1));
        }
    };

    let validation = options.validate(&story);
    let output = serde_json::json!({ "story": story, "validation": validation });
    let text = if args.pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    }
    .context("Failed to serialize story")?;
    println!("{text}");

    Ok(if validation.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(2)
    })
}

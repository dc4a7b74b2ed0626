//! emx-nbt CLI
//!
//! Encode and decode single NBT tag values and modified UTF-8 strings.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use emx_nbt::{mutf8, parse_value, BinaryText, Decoder, TagKind, Value};
use std::fs;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "emx-nbt")]
#[command(author = "nzinfo <li.monan@gmail.com>")]
#[command(version)]
#[command(about = "NBT tag value codec tool")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a value and print its binary form
    Encode {
        /// Tag kind (byte, short, int, long, float, double, string)
        kind: TagKind,

        /// Native value
        value: String,

        /// Write raw bytes to this file instead of printing
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Print hex instead of base64
        #[arg(long)]
        hex: bool,
    },

    /// Decode a binary value and print its native form
    Decode {
        /// Tag kind (byte, short, int, long, float, double, string)
        kind: TagKind,

        /// Base64 (or hex with --hex) payload
        #[arg(required_unless_present = "input")]
        data: Option<String>,

        /// Read raw bytes from this file
        #[arg(short = 'i', long, conflicts_with = "data")]
        input: Option<PathBuf>,

        /// Payload is hex instead of base64
        #[arg(long)]
        hex: bool,

        /// Fail on malformed strings instead of replacing characters
        #[arg(long)]
        strict: bool,
    },

    /// Raw modified UTF-8 conversion
    #[command(subcommand)]
    Mutf8(Mutf8Command),
}

#[derive(Subcommand, Debug)]
enum Mutf8Command {
    /// Encode text to modified UTF-8
    Encode {
        text: String,

        /// Print hex instead of base64
        #[arg(long)]
        hex: bool,
    },

    /// Decode modified UTF-8 to text
    Decode {
        /// Base64 (or hex with --hex) bytes
        data: String,

        /// Payload is hex instead of base64
        #[arg(long)]
        hex: bool,

        /// Fail on malformed input instead of replacing characters
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Encode { kind, value, output, hex } => {
            encode_value(kind, &value, output, text_format(hex))?;
        }
        Commands::Decode { kind, data, input, hex, strict } => {
            decode_value(kind, data, input, text_format(hex), strict)?;
        }
        Commands::Mutf8(Mutf8Command::Encode { text, hex }) => {
            println!("{}", text_format(hex).encode(&mutf8::encode(&text)));
        }
        Commands::Mutf8(Mutf8Command::Decode { data, hex, strict }) => {
            let bytes = text_format(hex).decode(&data)?;
            let text = Decoder::new().strict(strict).decode(&bytes)?;
            println!("{}", text);
        }
    }

    Ok(())
}

fn text_format(hex: bool) -> BinaryText {
    if hex {
        BinaryText::Hex
    } else {
        BinaryText::Base64
    }
}

fn encode_value(
    kind: TagKind,
    text: &str,
    output: Option<PathBuf>,
    format: BinaryText,
) -> Result<()> {
    let value = parse_value(kind, text)?;

    if let Some(output_path) = output {
        value.write_to_file(&output_path)?;
        tracing::info!(kind = %kind, path = %output_path.display(), "wrote value");
    } else {
        println!("{}", format.encode(&value.bin()));
    }

    Ok(())
}

fn decode_value(
    kind: TagKind,
    data: Option<String>,
    input: Option<PathBuf>,
    format: BinaryText,
    strict: bool,
) -> Result<()> {
    let bin = if let Some(input_path) = input {
        fs::read(&input_path)
            .with_context(|| format!("Failed to read: {}", input_path.display()))?
    } else {
        let data = data.context("No payload given")?;
        format.decode(&data)?
    };

    let value = Value::from_bin(kind, &bin);
    tracing::debug!(kind = %kind, bytes = bin.len(), "decoding value");

    match &value {
        Value::String(string) => {
            let decoder = Decoder::new().strict(strict);
            println!("{}", string.value_with(&decoder)?);
        }
        _ => println!("{}", value.native()?),
    }

    Ok(())
}

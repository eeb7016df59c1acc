/*!
CLI front-end for the `topdec` codec library: a thin wrapper doing file
I/O and container-header framing around [`topdec::decode`] and
[`topdec::encode`]. File I/O and header framing live outside the
codec core on purpose: they vary per caller, the token format doesn't.
*/

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

#[cfg(target_os = "linux")]
use mimalloc::MiMalloc;

#[cfg(target_os = "linux")]
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use topdec::{CompressionType, ContainerHeader};

#[derive(Parser)]
#[command(name = "topdec", version, about = "Game asset LZSS container codec")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decompress a container file to its raw payload.
    Decompress {
        input: PathBuf,
        output: PathBuf,
    },
    /// Compress a raw file into a container, tagged with the chosen type.
    Compress {
        input: PathBuf,
        output: PathBuf,
        #[arg(value_enum, long, default_value_t = CliCompressionType::SelfRef83)]
        kind: CliCompressionType,
    },
}

/// Mirrors [`topdec::CompressionType`] for clap's derive, since the
/// library type doesn't (and shouldn't) depend on clap.
#[derive(Clone, Copy, ValueEnum)]
enum CliCompressionType {
    Stored,
    Dict01,
    Dict03,
    SelfRef81,
    SelfRef83,
}

impl From<CliCompressionType> for CompressionType {
    fn from(kind: CliCompressionType) -> Self {
        match kind {
            CliCompressionType::Stored => CompressionType::Stored,
            CliCompressionType::Dict01 => CompressionType::Dict01,
            CliCompressionType::Dict03 => CompressionType::Dict03,
            CliCompressionType::SelfRef81 => CompressionType::SelfRef81,
            CliCompressionType::SelfRef83 => CompressionType::SelfRef83,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Decompress { input, output } => decompress(&input, &output),
        Commands::Compress { input, output, kind } => compress(&input, &output, kind.into()),
    }
}

fn decompress(input: &PathBuf, output: &PathBuf) -> Result<()> {
    let raw = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    if raw.len() < ContainerHeader::SIZE {
        bail!(
            "{} is {} bytes, too short to hold a {}-byte container header",
            input.display(),
            raw.len(),
            ContainerHeader::SIZE
        );
    }
    let header = ContainerHeader::read(&raw[..ContainerHeader::SIZE])
        .with_context(|| format!("reading container header from {}", input.display()))?;
    let payload = &raw[ContainerHeader::SIZE..];

    let decoded = topdec::decode(header.kind, payload, header.uncompressed_len as usize)
        .with_context(|| format!("decompressing {}", input.display()))?;

    if decoded.len() != header.uncompressed_len as usize {
        eprintln!(
            "warning: {} declared an uncompressed length of {} but produced {} bytes",
            input.display(),
            header.uncompressed_len,
            decoded.len()
        );
    }

    let mut out = fs::File::create(output)
        .with_context(|| format!("creating {}", output.display()))?;
    out.write_all(&decoded)
        .with_context(|| format!("writing {}", output.display()))?;
    Ok(())
}

fn compress(input: &PathBuf, output: &PathBuf, kind: CompressionType) -> Result<()> {
    let raw = fs::read(input).with_context(|| format!("reading {}", input.display()))?;

    let compressed = topdec::encode(kind, &raw)
        .with_context(|| format!("compressing {}", input.display()))?;

    let header = ContainerHeader {
        kind,
        compressed_len: compressed
            .len()
            .try_into()
            .context("compressed payload too large for a 32-bit container length")?,
        uncompressed_len: raw
            .len()
            .try_into()
            .context("input too large for a 32-bit container length")?,
    };

    let mut out = fs::File::create(output)
        .with_context(|| format!("creating {}", output.display()))?;
    header
        .write(&mut out)
        .with_context(|| format!("writing container header to {}", output.display()))?;
    out.write_all(&compressed)
        .with_context(|| format!("writing {}", output.display()))?;
    Ok(())
}

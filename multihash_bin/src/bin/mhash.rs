use std::{
    error::Error,
    fs,
    io,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info};
use multihash::{AlgorithmId, Content, DigestProviders, Multihash};

/// Compute, inspect and verify multihashes
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hash a file, or stdin when no file is given
    Hash {
        #[arg(short, long, default_value = "sha2-256")]
        algorithm: String,
        #[arg(short, long, value_enum, default_value_t = Format::Base58)]
        format: Format,
        file: Option<PathBuf>,
    },
    /// Decode a hex or base58 multihash and print its parts
    Inspect { encoded: String },
    /// Check a file, or stdin, against a multihash. Exits with 1 on mismatch
    Verify {
        encoded: String,
        file: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Hex,
    Base58,
    Display,
}

fn hash_input(
    providers: &DigestProviders,
    algorithm: AlgorithmId<'_>,
    file: Option<&Path>,
) -> Result<Multihash, Box<dyn Error>> {
    let mhash = match file {
        Some(path) => {
            let file = fs::File::open(path)?;
            // can't map an empty file
            if file.metadata()?.len() == 0 {
                providers.hash(algorithm, Content::Bytes(&[]))?
            } else {
                let mmap = unsafe { memmap2::Mmap::map(&file)? };
                debug!("mapped {} bytes from {}", mmap.len(), path.display());
                providers.hash(algorithm, &mmap[..])?
            }
        }
        None => {
            let mut stdin = io::stdin().lock();
            providers.hash(algorithm, &mut stdin)?
        }
    };
    Ok(mhash)
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();
    let providers = DigestProviders::with_defaults();

    match args.command {
        Command::Hash { algorithm, format, file } => {
            let mhash = hash_input(&providers, AlgorithmId::Name(&algorithm), file.as_deref())?;
            match format {
                Format::Hex => println!("{}", mhash.to_hex()),
                Format::Base58 => println!("{}", mhash.to_base58()),
                Format::Display => println!("{}", mhash),
            }
        }
        Command::Inspect { encoded } => {
            let mhash: Multihash = encoded.trim().parse()?;
            println!("algorithm: {}", mhash.algorithm());
            println!("length:    {}", mhash.length());
            println!("digest:    {}", mhash.hex_digest());
            println!("hex:       {}", mhash.to_hex());
            println!("base58:    {}", mhash.to_base58());
        }
        Command::Verify { encoded, file } => {
            let expected: Multihash = encoded.trim().parse()?;
            let actual = hash_input(&providers, AlgorithmId::Code(expected.code()), file.as_deref())?;
            if actual != expected {
                info!("expected {}, got {}", expected, actual);
                println!("MISMATCH {}", actual);
                return Ok(ExitCode::from(1));
            }
            println!("OK {}", actual);
        }
    }

    Ok(ExitCode::SUCCESS)
}

//! Command-line interface for the Rijndael CBC engine.

#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rijndael_cbc::{decrypt_blob, CbcConfig, PaddingScheme, RijndaelCbc};
use rijndael_core::{BlockSize, Rijndael};

/// Rijndael CLI.
#[derive(Parser)]
#[command(
    name = "rijndael",
    version,
    author,
    about = "Rijndael (128/192/256-bit blocks) in CBC mode"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PaddingArg {
    /// Zero bytes up to the block boundary.
    Zero,
    /// PKCS#7 padding.
    Pkcs7,
}

impl From<PaddingArg> for PaddingScheme {
    fn from(value: PaddingArg) -> Self {
        match value {
            PaddingArg::Zero => PaddingScheme::Zero,
            PaddingArg::Pkcs7 => PaddingScheme::Pkcs7,
        }
    }
}

/// Key, IV and mode parameters shared by `enc` and `dec`.
#[derive(Args)]
struct CbcArgs {
    /// Key as 32, 48 or 64 hex characters.
    #[arg(long, value_name = "HEX")]
    key_hex: String,
    /// IV as hex; must be exactly one block long.
    #[arg(long, value_name = "HEX")]
    iv_hex: String,
    /// Block size in bytes (16, 24 or 32).
    #[arg(long, default_value_t = 16)]
    block_size: usize,
    /// Padding scheme.
    #[arg(long, value_enum, default_value_t = PaddingArg::Pkcs7)]
    padding: PaddingArg,
    /// Input file.
    #[arg(long, value_name = "FILE")]
    input: PathBuf,
    /// Output file.
    #[arg(long, value_name = "FILE")]
    output: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a file in CBC mode.
    Enc(CbcArgs),
    /// Decrypt a file in CBC mode.
    Dec(CbcArgs),
    /// Decrypt a colon-separated blob (32-byte key, IV and blocks, zero padding).
    Blob {
        /// Key as 64 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// IV as 64 hex characters.
        #[arg(long, value_name = "HEX")]
        iv_hex: String,
        /// Ciphertext file.
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
    },
    /// Round-trip random blocks under random keys of every size.
    Check {
        /// Block size in bytes (16, 24 or 32).
        #[arg(long, default_value_t = 16)]
        block_size: usize,
        /// Number of random samples per key size.
        #[arg(long, default_value_t = 64)]
        samples: usize,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run a local demo: random key and IV, encrypt a message, decrypt back.
    Demo {
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Enc(args) => cmd_enc(&args),
        Commands::Dec(args) => cmd_dec(&args),
        Commands::Blob {
            key_hex,
            iv_hex,
            input,
        } => cmd_blob(&key_hex, &iv_hex, &input),
        Commands::Check {
            block_size,
            samples,
            seed,
        } => cmd_check(block_size, samples, seed),
        Commands::Demo { seed } => cmd_demo(seed),
    }
}

fn cmd_enc(args: &CbcArgs) -> Result<()> {
    let cbc = build_cbc(args)?;
    let data = read_file(&args.input)?;
    let ciphertext = cbc.encrypt(&data).context("encrypt")?;
    info!(
        "encrypted {} bytes into {} bytes ({}-byte blocks, {:?} padding)",
        data.len(),
        ciphertext.len(),
        cbc.block_size(),
        cbc.padding()
    );
    write_file(&args.output, &ciphertext)
}

fn cmd_dec(args: &CbcArgs) -> Result<()> {
    let cbc = build_cbc(args)?;
    let data = read_file(&args.input)?;
    let plaintext = cbc.decrypt(&data).context("decrypt")?;
    info!(
        "decrypted {} bytes into {} bytes ({}-byte blocks, {:?} padding)",
        data.len(),
        plaintext.len(),
        cbc.block_size(),
        cbc.padding()
    );
    write_file(&args.output, &plaintext)
}

fn cmd_blob(key_hex: &str, iv_hex: &str, input: &Path) -> Result<()> {
    let key = parse_hex("key", key_hex)?;
    let iv = parse_hex("iv", iv_hex)?;
    let data = read_file(input)?;
    let fields = decrypt_blob(&key, &iv, &data).context("decrypt blob")?;
    info!("blob contains {} fields", fields.len());
    for field in fields {
        println!("{}", field);
    }
    Ok(())
}

fn cmd_check(block_size: usize, samples: usize, seed: Option<u64>) -> Result<()> {
    let block = BlockSize::try_from(block_size)?;
    let mut rng = seeded_rng(seed);
    for key_len in [16usize, 24, 32] {
        for _ in 0..samples {
            let mut key = vec![0u8; key_len];
            rng.fill_bytes(&mut key);
            let cipher = Rijndael::with_block(&key, block)?;
            let mut original = vec![0u8; block.bytes()];
            rng.fill_bytes(&mut original);
            let ciphertext = cipher.encrypt(&original)?;
            if cipher.decrypt(&ciphertext)? != original {
                bail!(
                    "round trip mismatch for {}-byte key, {}-byte block, key {}",
                    key_len,
                    block.bytes(),
                    hex::encode(&key)
                );
            }
        }
        info!(
            "{}-byte key, {}-byte block: {} samples ok",
            key_len,
            block.bytes(),
            samples
        );
    }
    Ok(())
}

fn cmd_demo(seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let mut key = [0u8; 32];
    let mut iv = [0u8; 32];
    rng.fill_bytes(&mut key);
    rng.fill_bytes(&mut iv);

    let config = CbcConfig {
        block_size: BlockSize::B256,
        padding: PaddingScheme::Zero,
    };
    let cbc = RijndaelCbc::with_config(&key, &iv, config)?;
    let message = b"field1:field2:field3";
    let ciphertext = cbc.encrypt(message)?;
    let fields = decrypt_blob(&key, &iv, &ciphertext)?;

    println!("demo key: {}", hex::encode(key));
    println!("demo iv: {}", hex::encode(iv));
    println!("plaintext: {}", String::from_utf8_lossy(message));
    println!("ciphertext: {}", hex::encode(&ciphertext));
    println!("fields: {:?}", fields);
    if fields.join(":").as_bytes() != message {
        bail!("demo roundtrip failed");
    }
    Ok(())
}

fn build_cbc(args: &CbcArgs) -> Result<RijndaelCbc> {
    let key = parse_hex("key", &args.key_hex)?;
    let iv = parse_hex("iv", &args.iv_hex)?;
    let cbc = RijndaelCbc::new(&key, &iv, args.padding.into(), args.block_size)
        .context("configure cipher")?;
    Ok(cbc)
}

fn parse_hex(what: &str, hex_str: &str) -> Result<Vec<u8>> {
    hex::decode(hex_str.trim()).with_context(|| format!("decode {} hex", what))
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("read {}", path.display()))
}

fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    fs::write(path, data).with_context(|| format!("write {}", path.display()))
}

fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}

//! Command-line harness for the AES-CMAC engine.

#![forbid(unsafe_code)]

use std::fs;
use std::path::PathBuf;

use aes_cmac::{expand_key, parse_key, Aes128Key, Cmac, Tag, TagLength};
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// AES-128 CMAC (NIST SP 800-38B) CLI.
#[derive(Parser)]
#[command(name = "aescmac", version, author, about = "AES-128 CMAC (NIST SP 800-38B)")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the built-in known-answer vectors, one hex tag per line.
    Vectors {
        /// Override every vector's tag length in bits.
        #[arg(long)]
        tlen: Option<u32>,
    },
    /// Compute the tag of a message.
    Mac {
        /// AES-128 key as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        #[command(flatten)]
        message: MessageArgs,
        /// Tag length in bits (0..=128).
        #[arg(long, default_value_t = 128)]
        tlen: u32,
    },
    /// Check a tag against a message; exits non-zero on mismatch.
    Verify {
        /// AES-128 key as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Expected tag, `ceil(tlen / 8)` bytes as hex.
        #[arg(long, value_name = "HEX")]
        tag_hex: String,
        #[command(flatten)]
        message: MessageArgs,
        /// Tag length in bits (0..=128).
        #[arg(long, default_value_t = 128)]
        tlen: u32,
    },
    /// Print the K1 and K2 subkeys for a key.
    Subkeys {
        /// AES-128 key as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
    },
    /// Generate a random AES-128 key.
    Keygen {
        /// Optional RNG seed for reproducible keys.
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Exactly one message source.
#[derive(Args)]
#[group(required = true, multiple = false)]
struct MessageArgs {
    /// Message as hex (use "" for the empty message).
    #[arg(long, value_name = "HEX")]
    msg_hex: Option<String>,
    /// Message as UTF-8 text.
    #[arg(long)]
    text: Option<String>,
    /// Read the message from a file.
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,
}

impl MessageArgs {
    fn load(&self) -> Result<Vec<u8>> {
        if let Some(hex_str) = &self.msg_hex {
            return hex::decode(hex_str.trim()).context("decode message hex");
        }
        if let Some(text) = &self.text {
            return Ok(text.as_bytes().to_vec());
        }
        if let Some(path) = &self.input {
            return fs::read(path).with_context(|| format!("read {}", path.display()));
        }
        bail!("no message source given")
    }
}

/// A test case with its expected untruncated tag.
struct KnownAnswer {
    name: &'static str,
    key_hex: &'static str,
    message: Vec<u8>,
    tlen: u32,
    full_tag_hex: &'static str,
}

const SP800_38B_KEY: &str = "2b7e151628aed2a6abf7158809cf4f3c";
const SP800_38B_PLAINTEXT: &str = "6bc1bee22e409f96e93d7e117393172a\
                                   ae2d8a571e03ac9c9eb76fac45af8e51\
                                   30c81c46a35ce411e5fbc1191a0a52ef\
                                   f69f2445df4f9b17ad2b417be66c3710";
const ALTERNATING_KEY: &str = "00010001000100010001000100010001";

fn known_answers() -> Result<Vec<KnownAnswer>> {
    let plaintext = hex::decode(SP800_38B_PLAINTEXT).context("decode built-in plaintext")?;
    let mut sparse = vec![0u8; 58];
    sparse[0] = 0x01;
    sparse[2] = 0x01;

    Ok(vec![
        KnownAnswer {
            name: "sp800-38b example 1 (empty)",
            key_hex: SP800_38B_KEY,
            message: Vec::new(),
            tlen: 128,
            full_tag_hex: "bb1d6929e95937287fa37d129b756746",
        },
        KnownAnswer {
            name: "sp800-38b example 2 (16 bytes)",
            key_hex: SP800_38B_KEY,
            message: plaintext[..16].to_vec(),
            tlen: 128,
            full_tag_hex: "070a16b46b4d4144f79bdd9dd04a287c",
        },
        KnownAnswer {
            name: "sp800-38b example 3 (40 bytes)",
            key_hex: SP800_38B_KEY,
            message: plaintext[..40].to_vec(),
            tlen: 128,
            full_tag_hex: "dfa66747de9ae63030ca32611497c827",
        },
        KnownAnswer {
            name: "sp800-38b example 4 (64 bytes)",
            key_hex: SP800_38B_KEY,
            message: plaintext.clone(),
            tlen: 128,
            full_tag_hex: "51f0bebf7e3b9d92fc49741779363cfe",
        },
        KnownAnswer {
            name: "alternating key, 16 bytes",
            key_hex: ALTERNATING_KEY,
            message: plaintext[..16].to_vec(),
            tlen: 53,
            full_tag_hex: "96e3602b6f9e73f0264ff2d23b5ba8b4",
        },
        KnownAnswer {
            name: "alternating key, 58 sparse bytes",
            key_hex: ALTERNATING_KEY,
            message: sparse,
            tlen: 53,
            full_tag_hex: "8db8c7b6939ad90d0bb9a81fe57796d1",
        },
        KnownAnswer {
            name: "ascii sentence",
            key_hex: "000102030405060708090a0b0c0d0e0f",
            message: b"The quick brown fox jumps over the lazy dog".to_vec(),
            tlen: 128,
            full_tag_hex: "d84a342f88b831c2dcea669d1c8f92df",
        },
    ])
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Vectors { tlen } => cmd_vectors(tlen),
        Commands::Mac {
            key_hex,
            message,
            tlen,
        } => cmd_mac(&key_hex, &message, tlen),
        Commands::Verify {
            key_hex,
            tag_hex,
            message,
            tlen,
        } => cmd_verify(&key_hex, &tag_hex, &message, tlen),
        Commands::Subkeys { key_hex } => cmd_subkeys(&key_hex),
        Commands::Keygen { seed } => cmd_keygen(seed),
    }
}

/// Logs go to stderr so stdout carries only results.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("aescmac=info,aes_cmac=warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn cmd_vectors(tlen_override: Option<u32>) -> Result<()> {
    let cases = known_answers()?;
    let mut failures = 0usize;
    for case in &cases {
        let bits = tlen_override.unwrap_or(case.tlen);
        let len = tag_length(bits)?;
        let cmac = Cmac::new(&parse_key_hex(case.key_hex)?);
        let tag = cmac.compute(&case.message, len);

        let mut expected_full = [0u8; 16];
        hex::decode_to_slice(case.full_tag_hex, &mut expected_full)
            .with_context(|| format!("decode expected tag for {}", case.name))?;
        let expected = Tag::from_block(&expected_full, len);

        println!("{}", hex::encode(tag.as_bytes()));
        if tag == expected {
            info!(case = case.name, tlen = bits, "vector passed");
        } else {
            warn!(case = case.name, tlen = bits, "vector failed");
            failures += 1;
        }
    }
    if failures > 0 {
        bail!("{failures} of {} known-answer vectors failed", cases.len());
    }
    Ok(())
}

fn cmd_mac(key_hex: &str, message: &MessageArgs, tlen: u32) -> Result<()> {
    let len = tag_length(tlen)?;
    let key = parse_key_hex(key_hex)?;
    let data = message.load()?;
    debug!(len = data.len(), tlen, "computing tag");
    let tag = Cmac::new(&key).compute(&data, len);
    println!("{}", hex::encode(tag.as_bytes()));
    Ok(())
}

fn cmd_verify(key_hex: &str, tag_hex: &str, message: &MessageArgs, tlen: u32) -> Result<()> {
    let len = tag_length(tlen)?;
    let key = parse_key_hex(key_hex)?;
    let tag = hex::decode(tag_hex.trim()).context("decode tag hex")?;
    if tag.len() != len.byte_len() {
        bail!(
            "a {}-bit tag must be {} bytes, got {}",
            len.bits(),
            len.byte_len(),
            tag.len()
        );
    }
    let data = message.load()?;
    if !Cmac::new(&key).verify(&data, &tag, len) {
        bail!("tag mismatch");
    }
    println!("ok");
    Ok(())
}

fn cmd_subkeys(key_hex: &str) -> Result<()> {
    let key = parse_key_hex(key_hex)?;
    let subkeys = aes_cmac::derive_subkeys(&expand_key(&key));
    println!("k1: {}", hex::encode(subkeys.k1));
    println!("k2: {}", hex::encode(subkeys.k2));
    Ok(())
}

fn cmd_keygen(seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let mut key_bytes = [0u8; 16];
    rng.fill_bytes(&mut key_bytes);
    if seed.is_some() {
        warn!("seeded keys are reproducible; do not use them in production");
    }
    println!("{}", hex::encode(key_bytes));
    Ok(())
}

fn tag_length(bits: u32) -> Result<TagLength> {
    TagLength::new(bits).context("invalid --tlen")
}

fn parse_key_hex(hex_str: &str) -> Result<Aes128Key> {
    let bytes = hex::decode(hex_str.trim()).context("decode key hex")?;
    parse_key(&bytes).context("AES-128 key must be 32 hex characters")
}

fn seeded_rng(seed: Option<u64>) -> impl RngCore + CryptoRng {
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

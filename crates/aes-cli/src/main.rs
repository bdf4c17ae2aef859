//! Command-line interface for `aes-core`.

#![forbid(unsafe_code)]

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use aes_core::round::{
    inv_mix_column, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_column, mix_columns,
    shift_rows, sub_bytes, transpose,
};
use aes_core::{generate_key, AesEngine, Block, CipherMode, Key};
use aes_stream::{decrypt_stream, decrypt_to_vec, encrypt_stream, encrypt_to_vec};
use anyhow::{bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use zeroize::Zeroizing;

/// AES file encryption CLI.
#[derive(Parser)]
#[command(
    name = "aescrypt",
    version,
    author,
    about = "AES-128/192/256 stream encryption in ECB or CBC mode"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random key and write it as raw bytes.
    Keygen {
        /// Cipher mode the key is for (decides its length).
        #[arg(long, default_value_t = CipherMode::AES_128_ECB)]
        mode: CipherMode,
        /// Output path for the key.
        #[arg(long, value_name = "FILE")]
        out: PathBuf,
        /// Overwrite `out` if it already exists.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Encrypt a file or stdin.
    Enc(StreamArgs),
    /// Decrypt a file or stdin.
    Dec(StreamArgs),
    /// Check the round transforms, a known-answer vector and a stream round trip.
    Selftest {
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Args)]
struct StreamArgs {
    /// Cipher mode, e.g. aes-256-cbc.
    #[arg(long, default_value_t = CipherMode::AES_128_ECB)]
    mode: CipherMode,
    #[command(flatten)]
    key: KeySource,
    /// Input file (stdin when omitted).
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,
    /// Output file (stdout when omitted).
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct KeySource {
    /// Raw key file holding exactly the mode's key length.
    #[arg(long, value_name = "FILE")]
    key: Option<PathBuf>,
    /// Key as hex characters.
    #[arg(long, value_name = "HEX")]
    key_hex: Option<String>,
}

#[derive(Clone, Copy)]
enum Direction {
    Encrypt,
    Decrypt,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.command {
        Commands::Keygen { mode, out, force } => cmd_keygen(mode, &out, force),
        Commands::Enc(args) => cmd_stream(&args, Direction::Encrypt),
        Commands::Dec(args) => cmd_stream(&args, Direction::Decrypt),
        Commands::Selftest { seed } => cmd_selftest(seed),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn cmd_keygen(mode: CipherMode, out: &Path, force: bool) -> Result<()> {
    let key = generate_key(mode).context("generate key")?;
    let mut options = OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options
        .open(out)
        .with_context(|| format!("create {}", out.display()))?;
    // `mode` only applies to newly created files; --force may reuse one.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))
            .with_context(|| format!("restrict permissions on {}", out.display()))?;
    }
    file.write_all(key.as_bytes())
        .with_context(|| format!("write {}", out.display()))?;
    log::info!("wrote {}-byte {mode} key to {}", key.as_bytes().len(), out.display());
    Ok(())
}

fn cmd_stream(args: &StreamArgs, direction: Direction) -> Result<()> {
    let key = resolve_key(args.mode, &args.key)?;
    let mut engine = AesEngine::with_key(args.mode, key);

    let input: Box<dyn Read> = match &args.input {
        Some(path) => Box::new(
            File::open(path).with_context(|| format!("open {}", path.display()))?,
        ),
        None => Box::new(io::stdin().lock()),
    };
    let output: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("create {}", path.display()))?,
        ),
        None => Box::new(io::stdout().lock()),
    };
    let input = BufReader::new(input);
    let output = BufWriter::new(output);

    let result = match direction {
        Direction::Encrypt => encrypt_stream(&mut engine, input, output).context("encrypt"),
        Direction::Decrypt => decrypt_stream(&mut engine, input, output).context("decrypt"),
    };
    match result {
        Ok(written) => {
            log::info!("wrote {written} bytes");
            Ok(())
        }
        Err(e) => {
            if let Some(path) = &args.output {
                log::warn!("{} holds incomplete output", path.display());
            }
            Err(e)
        }
    }
}

fn resolve_key(mode: CipherMode, source: &KeySource) -> Result<Key> {
    match (&source.key, &source.key_hex) {
        (Some(path), _) => load_key(path, mode),
        (None, Some(hex_str)) => parse_key_hex(hex_str, mode),
        (None, None) => bail!("either --key or --key-hex is required"),
    }
}

fn load_key(path: &Path, mode: CipherMode) -> Result<Key> {
    let bytes = Zeroizing::new(fs::read(path).with_context(|| format!("read {}", path.display()))?);
    Key::new(mode, &bytes).with_context(|| format!("load key from {}", path.display()))
}

fn parse_key_hex(hex_str: &str, mode: CipherMode) -> Result<Key> {
    let bytes = Zeroizing::new(hex::decode(hex_str.trim()).context("decode key hex")?);
    Ok(Key::new(mode, &bytes)?)
}

fn cmd_selftest(seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);

    println!("testing sub_bytes");
    let original = random_block(&mut rng);
    let mut block = original;
    sub_bytes(&mut block);
    // The S-box has no fixed points.
    if block.iter().zip(&original).any(|(a, b)| a == b) {
        bail!("sub_bytes left a byte unchanged");
    }
    inv_sub_bytes(&mut block);
    check(block == original, "sub_bytes round trip")?;

    println!("testing transpose");
    let original = random_block(&mut rng);
    let mut block = original;
    transpose(&mut block);
    transpose(&mut block);
    check(block == original, "transpose involution")?;

    println!("testing shift_rows");
    let original = random_block(&mut rng);
    let mut block = original;
    shift_rows(&mut block);
    inv_shift_rows(&mut block);
    check(block == original, "shift_rows round trip")?;

    println!("testing mix_column");
    for _ in 0..8 {
        let original = rng.next_u32().to_be_bytes();
        let mut col = original;
        mix_column(&mut col);
        inv_mix_column(&mut col);
        check(col == original, "mix_column round trip")?;
    }

    println!("testing mix_columns");
    let original = random_block(&mut rng);
    let mut block = original;
    mix_columns(&mut block);
    inv_mix_columns(&mut block);
    check(block == original, "mix_columns round trip")?;

    println!("testing known answer");
    let mut engine = AesEngine::new(CipherMode::AES_128_ECB, &[0u8; 16])?;
    let mut block = [0u8; 16];
    engine.encrypt_block(&mut block);
    check(
        hex::encode(block) == "66e94bd4ef8a2c3b884cfa59ca342b2e",
        "AES-128 zero-key vector",
    )?;

    println!("testing stream round trip");
    for mode in CipherMode::ALL {
        let mut key = vec![0u8; mode.key_len()];
        rng.fill_bytes(&mut key);
        let mut plaintext = vec![0u8; 1000];
        rng.fill_bytes(&mut plaintext);
        let ciphertext = encrypt_to_vec(&mut AesEngine::new(mode, &key)?, &plaintext)?;
        let recovered = decrypt_to_vec(&mut AesEngine::new(mode, &key)?, &ciphertext)?;
        check(recovered == plaintext, "stream round trip")?;
    }

    println!();
    println!("PASS");
    Ok(())
}

fn check(ok: bool, what: &str) -> Result<()> {
    if !ok {
        bail!("self-test failed: {what}");
    }
    Ok(())
}

fn random_block(rng: &mut impl RngCore) -> Block {
    let mut block = [0u8; 16];
    rng.fill_bytes(&mut block);
    block
}

fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => ChaCha20Rng::from_entropy(),
    }
}

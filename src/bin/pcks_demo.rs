//! pcks-demo: in-process simulation of collective public-key switching
//!
//! Splits a secret key among N simulated parties, encrypts a random message
//! under the joint key, and re-encrypts it under a fresh target key with one
//! PCKS round. Reports the resulting noise and whether the target key
//! recovers the message.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use eyre::{Context, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use pcks::context::SchemeContext;
use pcks::math::Poly;
use pcks::params::SchemeParams;
use pcks::pcks::{PcksProtocol, PcksShare};
use pcks::rlwe::{Ciphertext, PublicKey, SecretKey};

#[derive(Parser)]
#[command(name = "pcks-demo")]
#[command(about = "Simulate an N-party collective public-key switch")]
#[command(version)]
struct Args {
    /// Number of parties sharing the input key
    #[arg(long, default_value = "4")]
    parties: usize,

    /// Ring dimension (power of two); ignored when --params is given
    #[arg(long, default_value = "2048")]
    ring_dim: usize,

    /// Standard deviation of the smudging noise
    #[arg(long, default_value = "1048576")]
    smudging_sigma: f64,

    /// JSON file with scheme parameters, overriding --ring-dim
    #[arg(long)]
    params: Option<PathBuf>,

    /// Random seed for a reproducible run (optional)
    #[arg(long)]
    seed: Option<u64>,

    /// Leave the last party's share out of the aggregate
    #[arg(long)]
    drop_party: bool,

    /// Log at debug level
    #[arg(long, short)]
    verbose: bool,
}

fn load_params(args: &Args) -> Result<SchemeParams> {
    match &args.params {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Failed to read params from {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse params from {}", path.display()))
        }
        None => Ok(SchemeParams {
            ring_dim: args.ring_dim,
            ..SchemeParams::d2048()
        }),
    }
}

/// Pairwise tree reduction, the shape a relay network would aggregate in.
fn tree_aggregate(pcks: &PcksProtocol, mut level: Vec<PcksShare>) -> PcksShare {
    while level.len() > 1 {
        let mut next = Vec::with_capacity(level.len().div_ceil(2));
        for pair in level.chunks(2) {
            match pair {
                [a, b] => {
                    let mut sum = pcks.allocate_share();
                    pcks.aggregate_shares(a, b, &mut sum);
                    next.push(sum);
                }
                [a] => next.push(a.clone()),
                _ => unreachable!(),
            }
        }
        level = next;
    }
    level.pop().unwrap_or_else(|| pcks.allocate_share())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    run(&args)?;
    Ok(())
}

/// Runs one simulated round; returns whether the target key recovered the message.
fn run(args: &Args) -> Result<bool> {
    if args.parties == 0 {
        return Err(eyre::eyre!("At least one party is required"));
    }

    let params = load_params(args)?;
    let ctx = SchemeContext::try_new(params).wrap_err("Invalid parameters")?;
    let params = ctx.params();

    info!("PCKS demo");
    info!("Parties: {}", args.parties);
    info!("Ring dimension: {}", params.ring_dim);
    info!("Smudging sigma: {}", args.smudging_sigma);

    let seed = args.seed.unwrap_or_else(rand::random);
    info!("Seed: {}", seed);
    let mut rng = ChaCha20Rng::seed_from_u64(seed);

    let total_start = Instant::now();

    let key_shares: Vec<SecretKey> = (0..args.parties)
        .map(|_| SecretKey::generate(&ctx, &mut rng))
        .collect();
    let sk_in = SecretKey::sum(&ctx, &key_shares);
    let pk_in = PublicKey::generate(&ctx, &sk_in, &mut rng);

    let sk_out = SecretKey::generate(&ctx, &mut rng);
    let pk_out = PublicKey::generate(&ctx, &sk_out, &mut rng);

    let message = Poly::from_coeffs(
        (0..params.ring_dim)
            .map(|_| rng.gen_range(0..params.p))
            .collect(),
        params.p,
    );
    let ct = Ciphertext::encrypt(&ctx, &pk_in, &message, &mut rng);
    info!(
        "Input ciphertext noise: 2^{:.2}",
        ct.noise(&ctx, &sk_in, &message)
    );

    let mut pcks = PcksProtocol::try_new(ctx.clone(), args.smudging_sigma)
        .wrap_err("Invalid smudging sigma")?;

    let share_start = Instant::now();
    let mut shares = Vec::with_capacity(args.parties);
    for sk_i in &key_shares {
        let mut share = pcks.allocate_share();
        pcks.generate_share(sk_i, &pk_out, &ct, &mut share, &mut rng);
        shares.push(share);
    }
    info!(
        "Generated {} shares in {:.2?}",
        shares.len(),
        share_start.elapsed()
    );

    if args.drop_party {
        warn!("Dropping the last party's share");
        shares.pop();
    }

    let combined = tree_aggregate(&pcks, shares);
    let mut ct_out = Ciphertext::zero(ctx.ring());
    pcks.key_switch(&combined, &ct, &mut ct_out);

    let noise = ct_out.noise(&ctx, &sk_out, &message);
    let recovered = ct_out.decrypt(&ctx, &sk_out) == message;
    info!("Output ciphertext noise: 2^{:.2}", noise);
    info!(
        "Noise budget: 2^{:.2}",
        ((params.delta() / 2) as f64).log2()
    );
    if recovered {
        info!("Message recovered under the target key");
    } else {
        warn!("Message NOT recovered under the target key");
    }
    info!("Total time: {:.2?}", total_start.elapsed());

    Ok(recovered)
}

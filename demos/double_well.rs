//! Single-bead Metropolis for a particle in the double well V = x⁴ - 5x²/2
//!
//! Run with: cargo run --release --example double_well
//!
//! Prints a coarse text histogram of the bead position. At low temperature the
//! density has two peaks near x = ±1.1.

use ideal_bosons::{BeadChain, DoubleWell, Histogram, RingPath};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> ideal_bosons::Result<()> {
    let n_slices = 64;
    let beta = 8.0;
    let delta = 0.5;
    let n_thermalize = 2_000;
    let n_production = 20_000;

    let path = RingPath::new(vec![0.0; n_slices], beta, DoubleWell)?;
    let mut chain = BeadChain::new(path, delta)?;
    let mut histogram = Histogram::new(-2.0, 0.2, 20)?;
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..n_thermalize {
        chain.sweep(&mut rng);
    }
    for _ in 0..n_production {
        chain.sweep(&mut rng);
        for &x in &chain.path.beads {
            histogram.fill(x);
        }
    }

    println!("Acceptance rate: {:.2}%", 100.0 * chain.acceptance_rate());
    println!();
    let density = histogram.density();
    let peak = density.iter().cloned().fold(0.0, f64::max);
    for (i, d) in density.iter().enumerate() {
        let bar = if peak > 0.0 { (50.0 * d / peak) as usize } else { 0 };
        println!("{:6.2} {:8.4} {}", histogram.center(i), d, "#".repeat(bar));
    }
    Ok(())
}

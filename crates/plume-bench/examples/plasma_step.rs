//! Step the reference plasma and report per-stage timings.
//!
//! Run with: `cargo run --release -p plume-bench --example plasma_step`

use plume_bench::reference_profile;
use plume_fluid::EvolveMetrics;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut level = reference_profile(42)?;
    let steps = 50;
    let mut totals: Vec<EvolveMetrics> = Vec::new();

    for _ in 0..steps {
        let metrics = level.step()?;
        if totals.is_empty() {
            totals = metrics;
            continue;
        }
        for (t, m) in totals.iter_mut().zip(&metrics) {
            t.total_us += m.total_us;
            t.push_us += m.push_us;
            t.advect_us += m.advect_us;
            t.deposit_us += m.deposit_us;
        }
    }

    println!("{steps} steps on {} boxes, dt = {:.3e} s", level.layout.len(), level.dt);
    println!("{:<12} {:>10} {:>10} {:>10} {:>10}", "species", "push", "advect", "deposit", "total");
    for (name, t) in level.fluids.names().zip(&totals) {
        println!(
            "{:<12} {:>8}us {:>8}us {:>8}us {:>8}us",
            name,
            t.push_us / steps,
            t.advect_us / steps,
            t.deposit_us / steps,
            t.total_us / steps,
        );
    }
    Ok(())
}

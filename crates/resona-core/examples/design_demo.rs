//! Design demo: resonance, notch, and canonical responses side by side.
//!
//! Run with: RUST_LOG=warn cargo run -p resona-core --example design_demo

use resona_core::{BiquadDesign, FilterType, SampleRateHub};
use tracing_subscriber::EnvFilter;

fn print_response(label: &str, filter: &BiquadDesign, probes: &[f64]) {
    let c = filter.coefficients();
    let rate = filter.sample_rate();
    print!("{label:<14}");
    for &freq in probes {
        let omega = core::f64::consts::TAU * freq / rate;
        print!(" {:>8.2}", c.magnitude_db(omega));
    }
    println!();
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let hub = SampleRateHub::new(44100.0);
    let mut filter = BiquadDesign::new(&hub);
    let probes = [100.0, 500.0, 1000.0, 2000.0, 5000.0, 10000.0];

    println!("=== Magnitude (dB) at 44.1 kHz ===\n");
    print!("{:<14}", "Design");
    for freq in &probes {
        print!(" {freq:>8}");
    }
    println!();
    println!("{:-<14}{:->54}", "", "");

    filter.set_resonance(1000.0, 0.9, true).unwrap();
    print_response("resonance", &filter, &probes);
    let c = filter.coefficients();
    println!(
        "{:<14} b=[{:.4}, {:.4}, {:.4}] a=[1, {:.4}, {:.4}]",
        "", c.b0, c.b1, c.b2, c.a1, c.a2
    );

    filter.set_coefficients(1.0, 0.0, 0.0, 0.0, 0.0, true);
    filter.set_notch(2000.0, 0.98).unwrap();
    print_response("notch", &filter, &probes);

    for kind in FilterType::ALL {
        filter.set_filter_type(kind, 1000.0, 0.707).unwrap();
        print_response(&format!("{kind:?}"), &filter, &probes);
    }

    // Out-of-range radius: rejected with a warning, coefficients kept.
    println!("\n--- Rejected argument ---\n");
    if let Err(err) = filter.set_resonance(1000.0, 1.5, true) {
        println!("set_resonance: {err}");
    }

    // Rate change: cached coefficients are now stale and a warning is logged.
    println!("\n--- Sample rate change ---\n");
    hub.set_sample_rate(48000.0).unwrap();
    print_response("AllPass@48k", &filter, &probes);
}

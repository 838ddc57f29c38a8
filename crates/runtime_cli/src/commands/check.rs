//! Check command implementation
//!
//! Validates configuration and reports the runtime environment.

use expr_core::prelude::*;
use infra_config::Settings;
use tracing::info;

use crate::error::CliError;
use crate::Result;

/// Differentiate a known expression and compare with its closed form.
///
/// d/dx [x² · sin x] = 2x · sin x + x² · cos x
pub fn self_test() -> Result<()> {
    let x = leaf("x");
    let e = (&x ^ 2.0) * sin(&x);
    let at = 1.3_f64;
    let ctx: Context = [("x", at)].into_iter().collect();

    let (value, gradient) = e.evaluate_with_gradient(&ctx)?;
    let expected_value = at * at * at.sin();
    let expected_slope = 2.0 * at * at.sin() + at * at * at.cos();

    if (value - expected_value).abs() > 1e-12 || (gradient[0] - expected_slope).abs() > 1e-12 {
        return Err(CliError::SelfTest(format!(
            "{} at x = {}: got ({}, {}), expected ({}, {})",
            e, at, value, gradient[0], expected_value, expected_slope
        )));
    }
    Ok(())
}

/// Run the check command
pub fn run(settings: &Settings) -> Result<()> {
    info!("Checking system configuration...");

    println!("symgrad System Check");
    println!("====================\n");

    println!("Rust Toolchain:");
    println!("  Version: {}", env!("CARGO_PKG_VERSION"));
    println!("  Edition: 2021");
    println!();

    settings.validate()?;
    println!("Configuration:");
    println!("  Learning rate: {}", settings.training.learning_rate);
    println!("  Epochs: {}", settings.training.epochs);
    println!(
        "  Data: {} samples x {} features (seed {})",
        settings.data.samples, settings.data.features, settings.data.seed
    );
    println!("  Log level: {}", settings.logging.level);
    println!();

    println!("Parallelisation:");
    println!("  Rayon threads: {}", rayon::current_num_threads());
    println!("  CPU cores: {}", num_cpus::get());
    println!();

    println!("Available Modules:");
    println!("  ✓ expr_core");
    println!("  ✓ expr_optimiser");
    println!("  ✓ infra_config");
    println!("  ✓ runtime_cli");
    println!();

    self_test()?;
    println!("Differentiation self-test: ✓");
    println!();

    println!("All checks passed!");

    Ok(())
}

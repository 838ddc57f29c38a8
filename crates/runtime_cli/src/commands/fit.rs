//! Fit command implementation
//!
//! Samples synthetic logistic data from hidden weights, trains
//! `LogisticRegression` on it and reports how close the fit came.

use clap::Args;
use expr_optimiser::{GradientDescent, LogisticRegression};
use infra_config::{ConfigError, DataConfig, Settings};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use tracing::info;

use crate::Result;

/// Overrides for the `[training]` and `[data]` settings.
#[derive(Args, Debug, Default)]
pub struct FitArgs {
    /// Passes over the training set
    #[arg(long)]
    pub epochs: Option<usize>,

    /// Gradient descent step size
    #[arg(long)]
    pub learning_rate: Option<f64>,

    /// Number of synthetic samples
    #[arg(long)]
    pub samples: Option<usize>,

    /// Features per sample
    #[arg(long)]
    pub features: Option<usize>,

    /// Seed for data generation and weight initialisation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Standard deviation of noise added to the hidden score before labelling
    #[arg(long)]
    pub noise: Option<f64>,
}

impl FitArgs {
    /// Write every given flag over `settings`.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(epochs) = self.epochs {
            settings.training.epochs = epochs;
        }
        if let Some(learning_rate) = self.learning_rate {
            settings.training.learning_rate = learning_rate;
        }
        if let Some(samples) = self.samples {
            settings.data.samples = samples;
        }
        if let Some(features) = self.features {
            settings.data.features = features;
        }
        if let Some(seed) = self.seed {
            settings.data.seed = seed;
        }
        if let Some(noise) = self.noise {
            settings.data.noise = noise;
        }
    }
}

/// Labelled samples drawn from a hidden linear rule.
#[derive(Debug, Clone)]
pub struct SyntheticData {
    /// Weights used to label the samples
    pub weights: Vec<f64>,
    /// Standard-normal features
    pub xs: Vec<Vec<f64>>,
    /// 1.0 where `weights · x + noise >= 0`, else 0.0
    pub ys: Vec<f64>,
}

impl SyntheticData {
    /// Draw hidden weights from N(0, 2²), then `config.samples` samples.
    ///
    /// # Errors
    /// `CliError::Config` if `config.noise` is negative or not finite.
    pub fn generate(config: &DataConfig, rng: &mut StdRng) -> Result<Self> {
        if !(config.noise.is_finite() && config.noise >= 0.0) {
            return Err(ConfigError::InvalidValue {
                key: "data.noise".to_string(),
                message: format!("must be non-negative and finite, got {}", config.noise),
            }
            .into());
        }

        let weight_dist = Normal::new(0.0, 2.0)?;
        let feature_dist = Normal::new(0.0, 1.0)?;
        let noise_dist = Normal::new(0.0, config.noise)?;

        let weights: Vec<f64> = (0..config.features)
            .map(|_| weight_dist.sample(rng))
            .collect();

        let mut xs = Vec::with_capacity(config.samples);
        let mut ys = Vec::with_capacity(config.samples);
        for _ in 0..config.samples {
            let x: Vec<f64> = (0..config.features)
                .map(|_| feature_dist.sample(rng))
                .collect();
            let score: f64 = x.iter().zip(&weights).map(|(xi, wi)| xi * wi).sum();
            let label = if score + noise_dist.sample(rng) >= 0.0 {
                1.0
            } else {
                0.0
            };
            xs.push(x);
            ys.push(label);
        }

        Ok(Self { weights, xs, ys })
    }
}

/// Outcome of a training run.
#[derive(Debug, Clone)]
pub struct FitReport {
    /// Hidden weights the data was labelled with
    pub true_weights: Vec<f64>,
    /// Coefficients after the last epoch
    pub fitted: Vec<f64>,
    /// Mean loss of each epoch
    pub losses: Vec<f64>,
    /// Training-set accuracy of the fitted model
    pub accuracy: f64,
}

impl FitReport {
    /// Cosine of the angle between fitted and true weights.
    ///
    /// Without an intercept only the direction of the weights is
    /// identifiable, so this is the meaningful comparison.
    pub fn alignment(&self) -> f64 {
        let dot: f64 = self
            .fitted
            .iter()
            .zip(&self.true_weights)
            .map(|(a, b)| a * b)
            .sum();
        let norm = |v: &[f64]| v.iter().map(|x| x * x).sum::<f64>().sqrt();
        dot / (norm(&self.fitted) * norm(&self.true_weights))
    }
}

/// Generate data and train for `settings.training.epochs` passes.
pub fn train(settings: &Settings) -> Result<FitReport> {
    let mut rng = StdRng::seed_from_u64(settings.data.seed);
    let data = SyntheticData::generate(&settings.data, &mut rng)?;

    let mut model = LogisticRegression::new(settings.data.features, &mut rng)?;
    let optimiser = GradientDescent::with_learning_rate(settings.training.learning_rate);

    info!(
        samples = settings.data.samples,
        features = settings.data.features,
        epochs = settings.training.epochs,
        learning_rate = settings.training.learning_rate,
        "training logistic regression"
    );

    let mut losses = Vec::with_capacity(settings.training.epochs);
    for epoch in 1..=settings.training.epochs {
        let loss = model.fit(&data.xs, &data.ys, &optimiser)?;
        info!(epoch, loss, "epoch complete");
        losses.push(loss);
    }

    let accuracy = model.accuracy(&data.xs, &data.ys)?;
    Ok(FitReport {
        true_weights: data.weights,
        fitted: model.coefficients().values().collect(),
        losses,
        accuracy,
    })
}

/// Run the fit command
pub fn run(args: &FitArgs, mut settings: Settings) -> Result<()> {
    args.apply(&mut settings);
    settings.validate()?;

    let report = train(&settings)?;

    println!("Logistic Regression Fit");
    println!("=======================\n");
    println!("  {:<8} {:>12} {:>12}", "weight", "true", "fitted");
    for (i, (t, f)) in report.true_weights.iter().zip(&report.fitted).enumerate() {
        println!("  {:<8} {:>12.6} {:>12.6}", format!("w{}", i + 1), t, f);
    }
    println!();
    if let (Some(first), Some(last)) = (report.losses.first(), report.losses.last()) {
        println!("  Mean loss: {:.6} -> {:.6}", first, last);
    }
    println!("  Alignment: {:.4}", report.alignment());
    println!("  Accuracy:  {:.2}%", report.accuracy * 100.0);

    Ok(())
}

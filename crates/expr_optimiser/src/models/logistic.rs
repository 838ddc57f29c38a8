//! Logistic regression trained by per-sample gradient descent.

use expr_core::math::functions::{log, sigmoid};
use expr_core::{leaf, Context, Expr, ParamId};
use rand::Rng;
use rayon::prelude::*;
use tracing::debug;

use crate::error::OptimiserError;
use crate::solvers::GradientDescent;

/// Binary logistic regression without intercept.
///
/// The model is the expression `sigmoid(w1*x1 + ... + wn*xn)` over input
/// leaves `x1..xn` and coefficient leaves `w1..wn`. Training builds one
/// context per sample holding the inputs followed by the coefficients, and
/// only the coefficients are moved by the optimiser.
///
/// # Examples
/// ```
/// use expr_optimiser::models::LogisticRegression;
/// use expr_optimiser::solvers::GradientDescent;
///
/// let mut model = LogisticRegression::with_coefficients(&[0.0])?;
/// let xs = vec![vec![1.0], vec![-1.0]];
/// let ys = vec![1.0, 0.0];
///
/// let loss = model.fit(&xs, &ys, &GradientDescent::with_learning_rate(0.5))?;
/// assert!(loss > 0.0);
/// assert!(model.coefficients().values().all(|w| w > 0.0));
/// assert_eq!(model.accuracy(&xs, &ys)?, 1.0);
/// # Ok::<(), expr_optimiser::OptimiserError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    inputs: Vec<ParamId>,
    coefficients: Context,
    prediction: Expr,
}

impl LogisticRegression {
    /// Create a model with `n_features` coefficients drawn uniformly from [-1, 1).
    ///
    /// # Errors
    /// `OptimiserError::InvalidConfig` if `n_features` is zero.
    pub fn new<R: Rng + ?Sized>(n_features: usize, rng: &mut R) -> Result<Self, OptimiserError> {
        let initial: Vec<f64> = (0..n_features).map(|_| rng.gen_range(-1.0..1.0)).collect();
        Self::with_coefficients(&initial)
    }

    /// Create a model with fixed starting coefficients, one per feature.
    ///
    /// # Errors
    /// `OptimiserError::InvalidConfig` if `values` is empty.
    pub fn with_coefficients(values: &[f64]) -> Result<Self, OptimiserError> {
        if values.is_empty() {
            return Err(OptimiserError::InvalidConfig(
                "logistic regression needs at least one feature".to_string(),
            ));
        }

        let inputs: Vec<ParamId> = (1..=values.len())
            .map(|i| ParamId::new(format!("x{}", i)))
            .collect();
        let coefficients: Context = (1..=values.len())
            .map(|i| format!("w{}", i))
            .zip(values.iter().copied())
            .collect();

        let linear: Expr = coefficients
            .keys()
            .zip(&inputs)
            .map(|(w, x)| leaf(w) * leaf(x))
            .sum();
        let prediction = sigmoid(linear);

        Ok(Self {
            inputs,
            coefficients,
            prediction,
        })
    }

    /// Number of input features.
    pub fn n_features(&self) -> usize {
        self.inputs.len()
    }

    /// Current coefficient values, keyed `w1..wn`.
    pub fn coefficients(&self) -> &Context {
        &self.coefficients
    }

    /// The prediction expression `sigmoid(Σ wi·xi)`.
    pub fn prediction(&self) -> &Expr {
        &self.prediction
    }

    /// Cross-entropy loss of the prediction against label `y`.
    ///
    /// For the hard labels 0 and 1 the term with a zero weight is left out,
    /// so a saturated prediction cannot produce `0 * ln(0)`.
    pub fn loss_for(&self, y: f64) -> Expr {
        let pred = &self.prediction;
        if y == 1.0 {
            0.0 - log(pred)
        } else if y == 0.0 {
            0.0 - log(1.0 - pred)
        } else {
            0.0 - y * log(pred) - (1.0 - y) * log(1.0 - pred)
        }
    }

    /// One pass of per-sample gradient descent over `xs`/`ys`.
    ///
    /// Returns the mean loss over the pass, each sample's loss taken before
    /// its update.
    ///
    /// # Errors
    ///
    /// - `InsufficientData` when `xs` is empty.
    /// - `DimensionMismatch` when `xs` and `ys` differ in length or a sample
    ///   has the wrong number of features.
    /// - `NumericalInstability` when a sample drives the loss to a
    ///   non-finite value; coefficients updated by earlier samples are kept.
    pub fn fit(
        &mut self,
        xs: &[Vec<f64>],
        ys: &[f64],
        optimiser: &GradientDescent,
    ) -> Result<f64, OptimiserError> {
        if xs.is_empty() {
            return Err(OptimiserError::InsufficientData {
                required: 1,
                provided: 0,
            });
        }
        if xs.len() != ys.len() {
            return Err(OptimiserError::DimensionMismatch {
                expected: xs.len(),
                found: ys.len(),
            });
        }

        let mut total = 0.0;
        for (x, &y) in xs.iter().zip(ys) {
            let mut context = self.sample_context(x)?;
            let loss = self.loss_for(y);

            let coefficients = &self.coefficients;
            total += optimiser.step(&loss, &mut context, |id| coefficients.contains(id))?;

            for (id, value) in self.coefficients.iter_mut() {
                if let Some(updated) = context.get(id) {
                    *value = updated;
                }
            }
        }

        let mean = total / xs.len() as f64;
        debug!(samples = xs.len(), mean_loss = mean, "logistic regression pass");
        Ok(mean)
    }

    /// Predicted probability for each sample, evaluated in parallel.
    pub fn predict(&self, xs: &[Vec<f64>]) -> Result<Vec<f64>, OptimiserError> {
        xs.par_iter()
            .map(|x| -> Result<f64, OptimiserError> {
                let context = self.sample_context(x)?;
                Ok(self.prediction.evaluate(&context)?)
            })
            .collect()
    }

    /// Fraction of samples whose thresholded prediction matches the label.
    pub fn accuracy(&self, xs: &[Vec<f64>], ys: &[f64]) -> Result<f64, OptimiserError> {
        if xs.len() != ys.len() {
            return Err(OptimiserError::DimensionMismatch {
                expected: xs.len(),
                found: ys.len(),
            });
        }
        if xs.is_empty() {
            return Err(OptimiserError::InsufficientData {
                required: 1,
                provided: 0,
            });
        }

        let predictions = self.predict(xs)?;
        let correct = predictions
            .iter()
            .zip(ys)
            .filter(|(p, y)| (**p >= 0.5) == (**y >= 0.5))
            .count();
        Ok(correct as f64 / xs.len() as f64)
    }

    /// Inputs `x1..xn` then coefficients `w1..wn`.
    fn sample_context(&self, x: &[f64]) -> Result<Context, OptimiserError> {
        if x.len() != self.n_features() {
            return Err(OptimiserError::DimensionMismatch {
                expected: self.n_features(),
                found: x.len(),
            });
        }

        let mut context = Context::with_capacity(2 * self.n_features());
        context.extend(self.inputs.iter().cloned().zip(x.iter().copied()));
        context.extend(self.coefficients.iter().map(|(id, w)| (id.clone(), w)));
        Ok(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use expr_core::traits::transcendental::Transcendental;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_structure() {
        let model = LogisticRegression::with_coefficients(&[0.5, -0.25]).unwrap();
        assert_eq!(model.n_features(), 2);
        assert_eq!(
            model.prediction().to_string(),
            "(1 / (1 + (2.718281828459045 ^ (0 - ((w1 * x1) + (w2 * x2))))))"
        );
        let keys: Vec<&str> = model.coefficients().keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, ["w1", "w2"]);
    }

    #[test]
    fn test_random_initialisation_is_bounded_and_seeded() {
        let mut rng = StdRng::seed_from_u64(7);
        let model = LogisticRegression::new(5, &mut rng).unwrap();
        assert!(model.coefficients().values().all(|w| (-1.0..1.0).contains(&w)));

        let mut rng = StdRng::seed_from_u64(7);
        let again = LogisticRegression::new(5, &mut rng).unwrap();
        assert_eq!(model.coefficients(), again.coefficients());
    }

    #[test]
    fn test_zero_features_rejected() {
        assert!(matches!(
            LogisticRegression::with_coefficients(&[]),
            Err(OptimiserError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_loss_matches_cross_entropy() {
        let model = LogisticRegression::with_coefficients(&[0.3]).unwrap();
        let ctx: Context = [("x1", 2.0), ("w1", 0.3)].into_iter().collect();
        let p = Transcendental::sigmoid(0.6_f64);

        assert_relative_eq!(
            model.loss_for(1.0).evaluate(&ctx).unwrap(),
            -p.ln(),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            model.loss_for(0.0).evaluate(&ctx).unwrap(),
            -(1.0 - p).ln(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_soft_label_loss() {
        let model = LogisticRegression::with_coefficients(&[0.3]).unwrap();
        let ctx: Context = [("x1", 2.0), ("w1", 0.3)].into_iter().collect();
        let p = Transcendental::sigmoid(0.6_f64);

        let loss = model.loss_for(0.25).evaluate(&ctx).unwrap();
        assert_relative_eq!(
            loss,
            -0.25 * p.ln() - 0.75 * (1.0 - p).ln(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_saturated_prediction_keeps_loss_finite() {
        let mut model = LogisticRegression::with_coefficients(&[50.0]).unwrap();
        let gd = GradientDescent::with_learning_rate(0.1);

        // sigmoid(50) rounds to exactly 1.0
        assert_eq!(model.predict(&[vec![1.0]]).unwrap(), vec![1.0]);
        let loss = model.fit(&[vec![1.0]], &[1.0], &gd).unwrap();
        assert_eq!(loss, 0.0);
        assert!(model.coefficients().values().all(f64::is_finite));
    }

    #[test]
    fn test_single_update_follows_logistic_gradient() {
        let mut model = LogisticRegression::with_coefficients(&[0.3]).unwrap();
        let gd = GradientDescent::with_learning_rate(0.1);

        let loss = model.fit(&[vec![2.0]], &[1.0], &gd).unwrap();

        let p = Transcendental::sigmoid(0.6_f64);
        assert_relative_eq!(loss, -p.ln(), epsilon = 1e-12);
        // w -= lr * (p - y) * x
        let w = model.coefficients().get(&ParamId::from("w1")).unwrap();
        assert_relative_eq!(w, 0.3 - 0.1 * (p - 1.0) * 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_fit_validates_shapes() {
        let mut model = LogisticRegression::with_coefficients(&[0.0, 0.0]).unwrap();
        let gd = GradientDescent::new();

        assert_eq!(
            model.fit(&[], &[], &gd),
            Err(OptimiserError::InsufficientData {
                required: 1,
                provided: 0
            })
        );
        assert_eq!(
            model.fit(&[vec![1.0, 2.0]], &[1.0, 0.0], &gd),
            Err(OptimiserError::DimensionMismatch {
                expected: 1,
                found: 2
            })
        );
        assert_eq!(
            model.fit(&[vec![1.0]], &[1.0], &gd),
            Err(OptimiserError::DimensionMismatch {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_predict_in_parallel_matches_sequential() {
        let model = LogisticRegression::with_coefficients(&[0.8, -1.2]).unwrap();
        let xs: Vec<Vec<f64>> = (0..64)
            .map(|i| vec![i as f64 * 0.1 - 3.0, 1.5 - i as f64 * 0.05])
            .collect();

        let predictions = model.predict(&xs).unwrap();
        assert_eq!(predictions.len(), xs.len());
        for (x, p) in xs.iter().zip(&predictions) {
            let expected = Transcendental::sigmoid(0.8 * x[0] - 1.2 * x[1]);
            assert_relative_eq!(*p, expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_accuracy() {
        let model = LogisticRegression::with_coefficients(&[1.0]).unwrap();
        let xs = vec![vec![2.0], vec![-2.0], vec![3.0], vec![-1.0]];
        let ys = vec![1.0, 0.0, 0.0, 0.0];
        assert_relative_eq!(model.accuracy(&xs, &ys).unwrap(), 0.75);
    }
}

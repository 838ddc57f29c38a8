//! Plain gradient descent over an expression's context.

use expr_core::{Context, Expr, ParamId};
use tracing::{debug, trace};

use crate::error::OptimiserError;
use crate::solvers::DescentResult;

/// Configuration for gradient descent.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientDescentConfig {
    /// Step size applied to every gradient entry
    pub learning_rate: f64,
    /// Maximum number of steps taken by `minimise`
    pub epochs: usize,
    /// Stop once the loss changes by less than this between steps
    pub tolerance: f64,
}

impl Default for GradientDescentConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.01,
            epochs: 1,
            tolerance: 0.0,
        }
    }
}

impl GradientDescentConfig {
    /// Check that the configuration describes a usable descent.
    pub fn validate(&self) -> Result<(), OptimiserError> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(OptimiserError::InvalidConfig(format!(
                "learning_rate must be positive and finite, got {}",
                self.learning_rate
            )));
        }
        if self.epochs == 0 {
            return Err(OptimiserError::InvalidConfig(
                "epochs must be at least 1".to_string(),
            ));
        }
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(OptimiserError::InvalidConfig(format!(
                "tolerance must be non-negative, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

/// Gradient descent solver.
///
/// Each step evaluates the loss and its exact gradient against a context and
/// moves every trainable entry against its gradient component:
/// `value -= learning_rate * d(loss)/d(value)`. Entries rejected by the
/// `trainable` predicate (model inputs, typically) are left untouched.
pub struct GradientDescent {
    config: GradientDescentConfig,
}

impl GradientDescent {
    /// Create a new solver with default configuration.
    pub fn new() -> Self {
        Self {
            config: GradientDescentConfig::default(),
        }
    }

    /// Create a new solver with custom configuration.
    pub fn with_config(config: GradientDescentConfig) -> Self {
        Self { config }
    }

    /// Create a solver with the given learning rate and otherwise default settings.
    pub fn with_learning_rate(learning_rate: f64) -> Self {
        Self::with_config(GradientDescentConfig {
            learning_rate,
            ..GradientDescentConfig::default()
        })
    }

    /// Current configuration.
    pub fn config(&self) -> &GradientDescentConfig {
        &self.config
    }

    /// Take one descent step and return the loss before the update.
    ///
    /// # Errors
    ///
    /// - `OptimiserError::Expression` if the loss references a parameter the
    ///   context does not hold.
    /// - `OptimiserError::NumericalInstability` if the loss or any gradient
    ///   component is not finite; the context is left unchanged.
    pub fn step<P>(
        &self,
        loss: &Expr,
        context: &mut Context,
        trainable: P,
    ) -> Result<f64, OptimiserError>
    where
        P: Fn(&ParamId) -> bool,
    {
        let (value, gradient) = loss.evaluate_with_gradient(context)?;
        if !value.is_finite() {
            return Err(OptimiserError::NumericalInstability(format!(
                "loss evaluated to {}",
                value
            )));
        }
        if let Some((id, g)) = context
            .keys()
            .zip(&gradient)
            .find(|(id, g)| trainable(id) && !g.is_finite())
        {
            return Err(OptimiserError::NumericalInstability(format!(
                "gradient with respect to {} is {}",
                id, g
            )));
        }

        let lr = self.config.learning_rate;
        for ((id, param), g) in context.iter_mut().zip(&gradient) {
            if trainable(id) {
                *param -= lr * g;
            }
        }

        trace!(loss = value, "descent step");
        Ok(value)
    }

    /// Step repeatedly until the loss settles or `epochs` steps are taken.
    ///
    /// # Arguments
    ///
    /// * `loss` - Loss expression to minimise
    /// * `context` - Parameter values, updated in place
    /// * `trainable` - Selects the entries that may move
    ///
    /// # Returns
    ///
    /// A `DescentResult` with the last loss seen. Running out of epochs is
    /// not an error; check `converged`.
    pub fn minimise<P>(
        &self,
        loss: &Expr,
        context: &mut Context,
        trainable: P,
    ) -> Result<DescentResult, OptimiserError>
    where
        P: Fn(&ParamId) -> bool,
    {
        self.config.validate()?;

        let mut previous = f64::INFINITY;
        for iteration in 0..self.config.epochs {
            let value = self.step(loss, context, &trainable)?;
            if (previous - value).abs() < self.config.tolerance {
                debug!(iterations = iteration + 1, loss = value, "descent converged");
                return Ok(DescentResult {
                    loss: value,
                    iterations: iteration + 1,
                    converged: true,
                });
            }
            previous = value;
        }

        debug!(
            iterations = self.config.epochs,
            loss = previous,
            "descent stopped at epoch limit"
        );
        Ok(DescentResult {
            loss: previous,
            iterations: self.config.epochs,
            converged: false,
        })
    }
}

impl Default for GradientDescent {
    fn default() -> Self {
        Self::new()
    }
}

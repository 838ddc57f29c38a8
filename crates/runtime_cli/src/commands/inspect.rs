//! Inspect command implementation
//!
//! Prints a few canonical expressions with their rendering, value and
//! gradient.

use expr_core::prelude::*;

use crate::Result;

/// An expression together with the context it is shown at.
pub struct Demo {
    pub expr: Expr,
    pub context: Context,
}

/// x², sin x, ln(x₁x₂) and a one-feature logistic prediction.
pub fn demos() -> Vec<Demo> {
    let x1 = leaf(1);
    let x2 = leaf(2);
    let w = leaf("w");
    let x = leaf("x");

    vec![
        Demo {
            expr: &x1 ^ 2.0,
            context: [(1, 3.0)].into_iter().collect(),
        },
        Demo {
            expr: sin(&x1),
            context: [(1, 0.0)].into_iter().collect(),
        },
        Demo {
            expr: log(&x1 * &x2),
            context: [(1, 2.0), (2, 3.0)].into_iter().collect(),
        },
        Demo {
            expr: sigmoid(&w * &x),
            context: [("x", 2.0), ("w", 0.3)].into_iter().collect(),
        },
    ]
}

/// Run the inspect command
pub fn run() -> Result<()> {
    println!("Expression Inspection");
    println!("=====================\n");

    for demo in demos() {
        let (value, gradient) = demo.expr.evaluate_with_gradient(&demo.context)?;
        let point: Vec<String> = demo
            .context
            .iter()
            .map(|(id, v)| format!("{} = {}", id, v))
            .collect();

        println!("  {}", demo.expr);
        println!("    at:    {}", point.join(", "));
        println!("    value: {:.6}", value);
        for (id, g) in demo.context.named_gradient(&gradient)? {
            println!("    d/d{}: {:.6}", id, g);
        }
        println!();
    }

    Ok(())
}

//! Integration tests for expr_core module exports and public API.

use approx::assert_relative_eq;
use expr_core::math::functions::{cos, exp, log, sigmoid, sin, tan};
use expr_core::traits::transcendental::Transcendental;
use expr_core::types::{Context, ExprError, ParamId};
use expr_core::{leaf, Expr, MemoEvaluator, Node};

fn context(entries: &[(i32, f64)]) -> Context {
    entries.iter().copied().collect()
}

#[test]
fn test_square_scenario() {
    let e = leaf(1) ^ 2.0;
    let ctx = context(&[(1, 3.0)]);
    assert_eq!(e.evaluate(&ctx).unwrap(), 9.0);
    assert_eq!(e.gradient(&ctx).unwrap(), vec![6.0]);
}

#[test]
fn test_sine_scenario() {
    let e = sin(leaf(1));
    let ctx = context(&[(1, 0.0)]);
    assert_eq!(e.evaluate(&ctx).unwrap(), 0.0);
    assert_eq!(e.gradient(&ctx).unwrap(), vec![1.0]);
}

#[test]
fn test_log_product_scenario_against_finite_differences() {
    let e = log(leaf(1) * leaf(2));
    let ctx = context(&[(1, 2.0), (2, 3.0)]);

    assert_relative_eq!(e.evaluate(&ctx).unwrap(), 1.791759469228055, epsilon = 1e-12);

    let grad = e.gradient(&ctx).unwrap();
    let h = 1e-6;
    let fd_x1 = (e.evaluate(&context(&[(1, 2.0 + h), (2, 3.0)])).unwrap()
        - e.evaluate(&context(&[(1, 2.0 - h), (2, 3.0)])).unwrap())
        / (2.0 * h);
    let fd_x2 = (e.evaluate(&context(&[(1, 2.0), (2, 3.0 + h)])).unwrap()
        - e.evaluate(&context(&[(1, 2.0), (2, 3.0 - h)])).unwrap())
        / (2.0 * h);
    assert_relative_eq!(grad[0], fd_x1, epsilon = 1e-4);
    assert_relative_eq!(grad[1], fd_x2, epsilon = 1e-4);
    assert_relative_eq!(grad[0], 0.5, epsilon = 1e-4);
    assert_relative_eq!(grad[1], 0.3333, epsilon = 1e-4);
}

#[test]
fn test_missing_variable_scenario() {
    let e = leaf(5);
    let ctx = context(&[(1, 0.0)]);
    assert_eq!(
        e.evaluate(&ctx),
        Err(ExprError::MissingVariable(ParamId::from(5)))
    );
    assert_eq!(
        e.gradient(&ctx),
        Err(ExprError::MissingVariable(ParamId::from(5)))
    );
}

#[test]
fn test_single_leaf_context() {
    let p = leaf("p");
    let ctx: Context = [("p", -7.5)].into_iter().collect();
    assert_eq!(p.evaluate(&ctx).unwrap(), -7.5);
    assert_eq!(p.gradient(&ctx).unwrap(), vec![1.0]);
}

#[test]
fn test_context_reordering_permutes_gradient() {
    let x1 = leaf(1);
    let x2 = leaf(2);
    let x3 = leaf(3);
    let e = &x1 * exp(&x2) - cos(&x3) / &x1;

    let ordered = context(&[(1, 0.5), (2, 1.5), (3, -0.2)]);
    let shuffled = context(&[(3, -0.2), (1, 0.5), (2, 1.5)]);

    let g_ordered = e.gradient(&ordered).unwrap();
    let g_shuffled = e.gradient(&shuffled).unwrap();

    for id in [1, 2, 3] {
        let key = ParamId::from(id);
        let i = ordered.index_of(&key).unwrap();
        let j = shuffled.index_of(&key).unwrap();
        assert_relative_eq!(g_ordered[i], g_shuffled[j], epsilon = 1e-12);
    }
    assert_eq!(
        e.evaluate(&ordered).unwrap(),
        e.evaluate(&shuffled).unwrap()
    );
}

#[test]
fn test_rendering_of_mixed_expression() {
    let x = leaf("x");
    let y = leaf("y");
    let e = (2.0 * &x - 1.0) / tan(&y) + log(&x ^ &y);
    assert_eq!(e.to_string(), "((((2 * x) - 1) / tan(y)) + ln((x ^ y)))");
}

#[test]
fn test_logistic_loss_gradient() {
    // Loss of a one-feature logistic model, as the training loop builds it.
    let x = leaf("x1");
    let w = leaf("w1");
    let pred = sigmoid(&w * &x);
    let y = 1.0;
    let loss = 0.0 - y * log(&pred) - (1.0 - y) * log(1.0 - &pred);

    let ctx: Context = [("x1", 2.0), ("w1", 0.3)].into_iter().collect();
    let (value, grad) = loss.evaluate_with_gradient(&ctx).unwrap();

    let p = Transcendental::sigmoid(0.6_f64);
    assert_relative_eq!(value, -p.ln(), epsilon = 1e-12);
    // d/dw = (p - y) * x, d/dx = (p - y) * w
    assert_relative_eq!(grad[0], (p - y) * 0.3, epsilon = 1e-12);
    assert_relative_eq!(grad[1], (p - y) * 2.0, epsilon = 1e-12);
}

#[test]
fn test_memoised_and_plain_agree() {
    let x = leaf("x");
    let inner = sin(&x) + &x;
    let e = &inner * &inner / (1.0 + &inner);
    let ctx: Context = [("x", 1.1)].into_iter().collect();

    let mut memo = MemoEvaluator::new(&ctx);
    let (mv, mg) = memo.evaluate_with_gradient(&e).unwrap();
    let (pv, pg) = e.evaluate_with_gradient(&ctx).unwrap();
    assert_relative_eq!(mv, pv);
    assert_relative_eq!(mg[0], pg[0]);
}

#[test]
fn test_node_inspection() {
    let x = leaf("x");
    let e = 3.0 - &x;
    match e.node() {
        Node::Sub(lhs, rhs) => {
            assert_eq!(lhs.as_constant(), Some(3.0));
            assert!(rhs.ptr_eq(&x));
        }
        other => panic!("expected Sub, got {:?}", other),
    }
}

#[test]
fn test_parallel_evaluation_of_shared_expression() {
    let x = leaf("x");
    let e: Expr = sin(&x) * cos(&x);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let e = e.clone();
                scope.spawn(move || {
                    let v = i as f64 * 0.25;
                    let ctx: Context = [("x", v)].into_iter().collect();
                    (v, e.evaluate(&ctx).unwrap())
                })
            })
            .collect();
        for handle in handles {
            let (v, value) = handle.join().unwrap();
            assert_relative_eq!(value, 0.5 * (2.0 * v).sin(), epsilon = 1e-12);
        }
    });
}

#[test]
fn test_f32_support() {
    let x: Expr<f32> = Expr::leaf("x");
    let e = sin(&x) * 2.0_f32;
    let ctx: Context<f32> = [("x", 0.0_f32)].into_iter().collect();
    assert_eq!(e.gradient(&ctx).unwrap(), vec![2.0_f32]);
}

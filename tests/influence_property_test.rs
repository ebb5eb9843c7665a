//! Property-based tests for influence-model evaluation
//!
//! Uses proptest to generate random models and configurations and verify
//! the algebraic invariants of prediction and rendering.

use proptest::prelude::*;
use splconq::{Configuration, InfluenceModel, Term};

fn any_term() -> impl Strategy<Value = Term> {
    let coefficient = -100.0..100.0f64;
    let options = prop::collection::vec(
        prop_oneof![Just("A".to_string()), Just("B".to_string()), Just("C".to_string())],
        0..3,
    );
    (coefficient, options).prop_map(|(coefficient, options)| Term {
        coefficient,
        options,
    })
}

fn any_model() -> impl Strategy<Value = InfluenceModel> {
    prop::collection::vec(any_term(), 1..5).prop_map(InfluenceModel::new)
}

fn config(a: f64, b: f64, c: f64) -> Configuration {
    [("A", a), ("B", b), ("C", c)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

proptest! {
    #[test]
    fn test_render_reparse_round_trip(model in any_model()) {
        let reparsed: InfluenceModel = model.to_string().parse().unwrap();
        prop_assert_eq!(reparsed.terms().len(), model.terms().len());
        for (reparsed_term, term) in reparsed.terms().iter().zip(model.terms()) {
            prop_assert_eq!(&reparsed_term.options, &term.options);
            // coefficients survive modulo float formatting
            prop_assert!((reparsed_term.coefficient - term.coefficient).abs() < 1e-9);
        }
    }

    #[test]
    fn test_scaling_is_multiplicative_per_term(
        coefficient in 0.5..10.0f64,
        value in 0.5..4.0f64,
        k in 1.0..3.0f64,
    ) {
        // a term over n options scales by k^n when every value scales by k
        for n in 0..3usize {
            let model = InfluenceModel::new(vec![Term {
                coefficient,
                options: vec!["A".to_string(); n],
            }]);
            let base = model.predict(&config(value, 0.0, 0.0)).unwrap();
            let scaled = model.predict(&config(k * value, 0.0, 0.0)).unwrap();
            prop_assert!((scaled - base * k.powi(n as i32)).abs() <= 1e-6 * scaled.abs().max(1.0));
        }
    }

    #[test]
    fn test_prediction_is_additive_over_terms(
        model in any_model(),
        a in 0.0..2.0f64,
        b in 0.0..2.0f64,
        c in 0.0..2.0f64,
    ) {
        let x = config(a, b, c);
        let whole = model.predict(&x).unwrap();
        let by_term: f64 = model
            .terms()
            .iter()
            .map(|term| {
                InfluenceModel::new(vec![term.clone()])
                    .predict(&x)
                    .unwrap()
            })
            .sum();
        prop_assert!((whole - by_term).abs() <= 1e-9 * whole.abs().max(1.0));
    }

    #[test]
    fn test_missing_option_always_fails(model in any_model()) {
        let needs_options = model.terms().iter().any(|t| !t.options.is_empty());
        prop_assume!(needs_options);
        prop_assert!(model.predict(&Configuration::new()).is_err());
    }
}

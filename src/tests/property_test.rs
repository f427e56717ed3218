use crate::core::log_sum_exp;
use crate::discrete::DiscreteMessage;
use crate::gaussian::GaussianMessage;
use proptest::prelude::*;

fn gaussian() -> impl Strategy<Value = GaussianMessage> {
    (-100f64..100f64, 0f64..100f64).prop_map(|(tau, rho)| GaussianMessage::new(tau, rho).unwrap())
}

fn discrete_pair() -> impl Strategy<Value = (DiscreteMessage, DiscreteMessage)> {
    (1usize..32).prop_flat_map(|n| {
        (
            prop::collection::vec(-700f64..700f64, n),
            prop::collection::vec(-700f64..700f64, n),
        )
            .prop_map(|(p, q)| {
                (
                    DiscreteMessage::new(p).unwrap(),
                    DiscreteMessage::new(q).unwrap(),
                )
            })
    })
}

proptest! {
    #[test]
    fn moments_match_natural_parameters(tau in -1e3f64..1e3f64, rho in 1e-3f64..1e3f64) {
        let msg = GaussianMessage::new(tau, rho).unwrap();
        prop_assert!((msg.mean() - tau / rho).abs() <= 1e-12 * (tau / rho).abs());
        prop_assert!((msg.variance() - 1f64 / rho).abs() <= 1e-12 / rho);
    }

    #[test]
    fn divide_restores_multiplied_message(a in gaussian(), b in gaussian()) {
        let restored = a.multiply(&b).divide(&b);
        prop_assert!((restored.tau() - a.tau()).abs() < 1e-12 * (1f64 + a.tau().abs() + b.tau().abs()));
        prop_assert!((restored.rho() - a.rho()).abs() < 1e-12 * (1f64 + a.rho() + b.rho()));
    }

    #[test]
    fn multiply_keeps_precision_non_negative(a in gaussian(), b in gaussian()) {
        prop_assert!(a.multiply(&b).rho() >= 0f64);
    }

    #[test]
    fn improper_operands_have_zero_log_normalization(tau_a in -1e3f64..1e3f64, tau_b in -1e3f64..1e3f64) {
        let a = GaussianMessage::new(tau_a, 0f64).unwrap();
        let b = GaussianMessage::new(tau_b, 0f64).unwrap();
        prop_assert_eq!(a.log_normalization_of_product(&b), 0f64);
        prop_assert_eq!(a.log_normalization_of_ratio(&b), 0f64);
    }

    #[test]
    fn absolute_difference_is_finite_and_non_negative(a in gaussian(), b in gaussian()) {
        let d = a.absolute_difference(&b);
        prop_assert!(d.is_finite());
        prop_assert!(d >= 0f64);
        prop_assert_eq!(d, b.absolute_difference(&a));
    }

    #[test]
    fn product_probabilities_sum_to_one((p, q) in discrete_pair()) {
        let probs = p.multiply(&q).unwrap().probabilities();
        prop_assert!(probs.iter().all(|x| *x >= 0f64 && *x <= 1f64));
        prop_assert!((probs.sum() - 1f64).abs() < 1e-9);
        let probs = p.divide(&q).unwrap().probabilities();
        prop_assert!((probs.sum() - 1f64).abs() < 1e-9);
    }

    #[test]
    fn log_sum_exp_is_shift_invariant(values in prop::collection::vec(-50f64..50f64, 1..16), shift in -1e4f64..1e4f64) {
        let lse = log_sum_exp(&values).unwrap();
        let shifted: Vec<f64> = values.iter().map(|x| x + shift).collect();
        let shifted_lse = log_sum_exp(&shifted).unwrap();
        prop_assert!((shifted_lse - lse - shift).abs() < 1e-9 * (1f64 + shift.abs()));
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(lse >= max);
        prop_assert!(lse <= max + f64::ln(values.len() as f64) + 1e-12);
    }
}

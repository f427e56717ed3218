use crate::core::{
    cavities, max_discrepancy, par_cavities, par_product_all, product_all, Message, MessageError,
};
use crate::discrete::DiscreteMessage;
use crate::gaussian::GaussianMessage;
use rand::thread_rng;

use super::utils::{assert_close, random_discrete, random_gaussian};

#[test]
fn empty_products_fail() {
    let messages: Vec<GaussianMessage> = Vec::new();
    assert_eq!(product_all(&messages).unwrap_err(), MessageError::EmptyInput);
    assert_eq!(par_product_all(&messages).unwrap_err(), MessageError::EmptyInput);
    assert_eq!(cavities(&messages).unwrap_err(), MessageError::EmptyInput);
}

#[test]
fn gaussian_marginal_and_cavities() {
    let mut rng = thread_rng();
    let messages: Vec<_> = (0..100).map(|_| random_gaussian(&mut rng)).collect();
    let marginal = product_all(&messages).unwrap();
    let par_marginal = par_product_all(&messages).unwrap();
    assert_close(marginal.tau(), messages.iter().map(|x| x.tau()).sum(), 1e-12);
    assert_close(marginal.rho(), messages.iter().map(|x| x.rho()).sum(), 1e-12);
    assert_close(par_marginal.tau(), marginal.tau(), 1e-12);
    assert_close(par_marginal.rho(), marginal.rho(), 1e-12);
    let dst = cavities(&messages).unwrap();
    let par_dst = par_cavities(&messages).unwrap();
    for (i, (cavity, par_cavity)) in dst.iter().zip(&par_dst).enumerate() {
        let expected = messages
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .fold(GaussianMessage::uninformative(), |acc, (_, x)| acc * *x);
        assert!(cavity.absolute_difference(&expected) < 1e-6);
        assert!(par_cavity.absolute_difference(&expected) < 1e-6);
    }
}

#[test]
fn discrete_marginal() {
    let mut rng = thread_rng();
    let messages: Vec<_> = (0..50).map(|_| random_discrete(&mut rng, 4)).collect();
    let marginal = product_all(&messages).unwrap();
    let par_marginal = par_product_all(&messages).unwrap();
    assert!(marginal.discrepancy(&par_marginal) < 1e-9);
    let dst = cavities(&messages).unwrap();
    let restored = dst[0].multiply(&messages[0]).unwrap();
    assert!(restored.discrepancy(&marginal) < 1e-9);
}

#[test]
fn discrete_product_with_mismatched_message_fails() {
    let mut rng = thread_rng();
    let mut messages: Vec<_> = (0..10).map(|_| random_discrete(&mut rng, 3)).collect();
    messages.push(random_discrete(&mut rng, 2));
    assert!(matches!(
        product_all(&messages).unwrap_err(),
        MessageError::DimensionMismatch { .. }
    ));
    assert!(matches!(
        par_product_all(&messages).unwrap_err(),
        MessageError::DimensionMismatch { .. }
    ));
}

#[test]
fn max_discrepancy_logic() {
    let old = vec![
        GaussianMessage::new(0f64, 1f64).unwrap(),
        GaussianMessage::new(1f64, 1f64).unwrap(),
    ];
    let new = vec![
        GaussianMessage::new(0f64, 2f64).unwrap(),
        GaussianMessage::new(3f64, 1f64).unwrap(),
    ];
    assert_eq!(max_discrepancy(&old, &new).unwrap(), 2f64);
    assert_eq!(max_discrepancy(&old, &old).unwrap(), 0f64);
    assert_eq!(
        max_discrepancy(&old, &new[..1]).unwrap_err(),
        MessageError::DimensionMismatch { left: 2, right: 1 }
    );
    let empty: Vec<DiscreteMessage> = Vec::new();
    assert_eq!(max_discrepancy(&empty, &empty).unwrap(), 0f64);
}

#[test]
fn uninformative_is_identity() {
    let mut rng = thread_rng();
    let gaussian = random_gaussian(&mut rng);
    assert_eq!(gaussian.product(&gaussian.uninformative_like()).unwrap(), gaussian);
    let discrete = random_discrete(&mut rng, 5);
    assert_eq!(discrete.product(&discrete.uninformative_like()).unwrap(), discrete);
}

use crate::{discrete::DiscreteMessage, gaussian::GaussianMessage};
use rand::Rng;
use rand_distr::Uniform;

#[inline]
pub(super) fn assert_close(lhs: f64, rhs: f64, tol: f64) {
    assert!(
        (lhs - rhs).abs() <= tol * (1f64 + rhs.abs()),
        "{} and {} differ by more than {}",
        lhs,
        rhs,
        tol
    );
}

#[inline]
pub(super) fn random_gaussian(rng: &mut impl Rng) -> GaussianMessage {
    let tau = rng.sample(Uniform::new(-10f64, 10f64));
    let rho = rng.sample(Uniform::new(0f64, 5f64));
    GaussianMessage::new(tau, rho).unwrap()
}

#[inline]
pub(super) fn random_discrete(rng: &mut impl Rng, n: usize) -> DiscreteMessage {
    let distr = Uniform::new(-50f64, 50f64);
    DiscreteMessage::new((0..n).map(|_| rng.sample(distr)).collect::<Vec<_>>()).unwrap()
}

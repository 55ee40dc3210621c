mod count_bonus;
mod optimistic;

pub use count_bonus::CountBonus;
pub use optimistic::Optimistic;

/// An exploration function f(u, n)
///
/// Trades off greed (preference for a high estimated value `u`) against curiosity
/// (preference for actions that have been tried few times `n`). The agent picks the
/// action with the highest score.
///
/// `value` is `None` when the state-action pair has never been given a value, which
/// is distinct from a learned value of `0.0`.
///
/// Implementations should be non-decreasing in `value` and non-increasing in `visits`.
/// This is not checked.
///
/// Implemented for any `Fn(Option<f64>, u32) -> f64`.
pub trait Exploration {
    fn score(&self, value: Option<f64>, visits: u32) -> f64;
}

impl<F> Exploration for F
where
    F: Fn(Option<f64>, u32) -> f64,
{
    fn score(&self, value: Option<f64>, visits: u32) -> f64 {
        self(value, visits)
    }
}

use thiserror::Error;

use crate::{assert_interval, decay::Decay};

/// A function α(n) that returns the learning rate given the number of times a
/// state-action pair has been updated
///
/// `n` already counts the update in progress, so it is at least `1`. Returned
/// rates are expected to lie in `(0, 1]`.
///
/// A rate that decreases with `n` makes the learned values converge; a fixed
/// rate keeps tracking recent rewards.
///
/// Implemented for any `Fn(u32) -> f64`, so a closure such as
/// `|n: u32| 1.0 / n as f64` can be used directly.
pub trait LearningRate {
    fn rate(&self, visits: u32) -> f64;
}

impl<F> LearningRate for F
where
    F: Fn(u32) -> f64,
{
    fn rate(&self, visits: u32) -> f64 {
        self(visits)
    }
}

/// Invalid learning rate
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RateError {
    #[error("learning rate must be in the interval (0, 1], got {0}")]
    OutOfRange(f64),

    /// A decay schedule that can leave the interval `(0, 1]`
    #[error("learning rate schedule from {start} to {end} leaves the interval (0, 1]")]
    Schedule { start: f64, end: f64 },
}

/// A fixed learning rate that ignores the visit count
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fixed {
    alpha: f64,
}

impl Fixed {
    /// **Panics** if `alpha` is not in the interval `(0,1]`
    pub fn new(alpha: f64) -> Self {
        assert_interval!(alpha, 0.0, 1.0, exclusive_start);
        Self { alpha }
    }

    pub fn try_new(alpha: f64) -> Result<Self, RateError> {
        (alpha > 0.0 && alpha <= 1.0)
            .then_some(Self { alpha })
            .ok_or(RateError::OutOfRange(alpha))
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl LearningRate for Fixed {
    fn rate(&self, _visits: u32) -> f64 {
        self.alpha
    }
}

/// A learning rate that follows a [`Decay`] strategy over the visit count
///
/// The strategy is evaluated at `t = n - 1`, so the first update of a pair uses
/// the strategy's start value. Its start must be in `(0, 1]` and its end must be
/// positive, or zero when the end is never reached (as with
/// [`InverseTime`](crate::decay::InverseTime)).
#[derive(Debug, Clone, PartialEq)]
pub struct Decayed<D: Decay> {
    decay: D,
}

impl<D: Decay> Decayed<D> {
    /// **Panics** if the schedule can yield a rate outside `(0, 1]`
    pub fn new(decay: D) -> Self {
        match Self::try_new(decay) {
            Ok(decayed) => decayed,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_new(decay: D) -> Result<Self, RateError> {
        let (start, end) = (decay.start(), decay.end());
        let end_ok = if decay.is_asymptotic() {
            end >= 0.0
        } else {
            end > 0.0
        };

        (start > 0.0 && start <= 1.0 && end_ok && end <= start)
            .then_some(Self { decay })
            .ok_or(RateError::Schedule { start, end })
    }
}

impl<D: Decay> LearningRate for Decayed<D> {
    fn rate(&self, visits: u32) -> f64 {
        self.decay.evaluate(visits.saturating_sub(1) as f64)
    }
}

#[cfg(test)]
mod tests {
    use crate::decay;

    use super::*;

    #[test]
    fn fixed_ignores_visits() {
        let lr = Fixed::new(0.3);
        assert_eq!(lr.rate(1), 0.3);
        assert_eq!(lr.rate(1000), 0.3);
        assert_eq!(lr.alpha(), 0.3);
    }

    #[test]
    fn fixed_try_new_checks_range() {
        assert!(Fixed::try_new(1.0).is_ok());
        assert_eq!(Fixed::try_new(0.0), Err(RateError::OutOfRange(0.0)));
        assert_eq!(Fixed::try_new(1.5), Err(RateError::OutOfRange(1.5)));
    }

    #[test]
    #[should_panic(expected = "Invalid value for `alpha`")]
    fn fixed_new_panics_on_zero() {
        Fixed::new(0.0);
    }

    #[test]
    fn closure_is_a_learning_rate() {
        let lr = |n: u32| 1.0 / n as f64;
        assert_eq!(lr.rate(1), 1.0);
        assert_eq!(lr.rate(4), 0.25);
    }

    #[test]
    fn decayed_rejects_schedules_leaving_unit_interval() {
        let reaches_zero = decay::Linear::new(0.1, 1.0, 0.0).unwrap();
        assert_eq!(
            Decayed::try_new(reaches_zero),
            Err(RateError::Schedule {
                start: 1.0,
                end: 0.0
            })
        );
        assert!(Decayed::try_new(decay::Constant::new(3.0)).is_err());
        assert!(Decayed::try_new(decay::Constant::new(0.0)).is_err());
        assert!(Decayed::try_new(decay::Exponential::new(1.0, 1.0, 0.0).unwrap()).is_err());
    }

    #[test]
    fn decayed_linear_stops_at_its_floor() {
        let lr = Decayed::new(decay::Linear::new(0.1, 1.0, 0.05).unwrap());
        assert_eq!(lr.rate(1), 1.0);
        assert_eq!(lr.rate(11), 0.05);
        assert_eq!(lr.rate(1000), 0.05);
    }

    #[test]
    #[should_panic(expected = "leaves the interval (0, 1]")]
    fn decayed_new_panics_on_oversized_rate() {
        Decayed::new(decay::Constant::new(3.0));
    }

    #[test]
    fn inverse_time_decay_gives_sample_average_rate() {
        let lr = Decayed::new(decay::InverseTime::new(1.0, 1.0, 0.0).unwrap());
        assert_eq!(lr.rate(1), 1.0);
        assert_eq!(lr.rate(2), 0.5);
        assert_eq!(lr.rate(4), 0.25);
    }
}

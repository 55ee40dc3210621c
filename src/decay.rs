use thiserror::Error;

/// A value that decays over time from a start value toward an end value
///
/// Schedules are non-increasing in `t` and stay within `[end, start]`.
pub trait Decay {
    /// Calculate value at time `t`
    fn evaluate(&self, t: f64) -> f64;

    /// Value at `t = 0`
    fn start(&self) -> f64;

    /// Value approached as `t` grows
    fn end(&self) -> f64;

    /// Whether [`end`](Decay::end) is only approached and never returned
    fn is_asymptotic(&self) -> bool {
        false
    }
}

/// Invalid parameters for a decay strategy
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecayError {
    /// The schedule would not move down from `start` to `end`
    #[error("decay must run downward from `start` to `end` (start = {start}, end = {end})")]
    NotDecreasing { start: f64, end: f64 },

    #[error("decay rate must be positive, got {0}")]
    Rate(f64),

    #[error("step factor must be in the interval (0, 1), got {0}")]
    Factor(f64),

    #[error("step width must be positive, got {0}")]
    StepWidth(f64),
}

fn check_range(start: f64, end: f64) -> Result<(), DecayError> {
    (start > end)
        .then_some(())
        .ok_or(DecayError::NotDecreasing { start, end })
}

fn check_rate(rate: f64) -> Result<(), DecayError> {
    (rate > 0.0).then_some(()).ok_or(DecayError::Rate(rate))
}

/// A value that does not decay
#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    value: f64,
}

impl Constant {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl Decay for Constant {
    fn evaluate(&self, _t: f64) -> f64 {
        self.value
    }

    fn start(&self) -> f64 {
        self.value
    }

    fn end(&self) -> f64 {
        self.value
    }
}

/// v(t) = end + (start - end) * e<sup>-rt</sup>
#[derive(Debug, Clone, PartialEq)]
pub struct Exponential {
    rate: f64,
    start: f64,
    end: f64,
}

impl Exponential {
    pub fn new(rate: f64, start: f64, end: f64) -> Result<Self, DecayError> {
        check_rate(rate)?;
        check_range(start, end)?;
        Ok(Self { rate, start, end })
    }
}

impl Decay for Exponential {
    fn evaluate(&self, t: f64) -> f64 {
        self.end + (self.start - self.end) * (-self.rate * t).exp()
    }

    fn start(&self) -> f64 {
        self.start
    }

    // e^-rt underflows to zero for large t, so `end` is eventually returned
    fn end(&self) -> f64 {
        self.end
    }
}

/// v(t) = end + (start - end) / (1 + rt)
///
/// With `rate = 1`, `start = 1` and `end = 0` this is the classic 1/n schedule
/// when used through [`Decayed`](crate::learning_rate::Decayed).
#[derive(Debug, Clone, PartialEq)]
pub struct InverseTime {
    rate: f64,
    start: f64,
    end: f64,
}

impl InverseTime {
    pub fn new(rate: f64, start: f64, end: f64) -> Result<Self, DecayError> {
        check_rate(rate)?;
        check_range(start, end)?;
        Ok(Self { rate, start, end })
    }
}

impl Decay for InverseTime {
    fn evaluate(&self, t: f64) -> f64 {
        self.end + (self.start - self.end) / (1.0 + self.rate * t)
    }

    fn start(&self) -> f64 {
        self.start
    }

    fn end(&self) -> f64 {
        self.end
    }

    fn is_asymptotic(&self) -> bool {
        true
    }
}

/// v(t) = max(start - rt, end)
#[derive(Debug, Clone, PartialEq)]
pub struct Linear {
    rate: f64,
    start: f64,
    end: f64,
}

impl Linear {
    pub fn new(rate: f64, start: f64, end: f64) -> Result<Self, DecayError> {
        check_rate(rate)?;
        check_range(start, end)?;
        Ok(Self { rate, start, end })
    }
}

impl Decay for Linear {
    fn evaluate(&self, t: f64) -> f64 {
        (self.start - self.rate * t).max(self.end)
    }

    fn start(&self) -> f64 {
        self.start
    }

    fn end(&self) -> f64 {
        self.end
    }
}

/// v(t) = max(start * f<sup>floor(t/w)</sup>, end), dropping by the factor `f` every `w` time units
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    factor: f64,
    width: f64,
    start: f64,
    end: f64,
}

impl Step {
    pub fn new(factor: f64, width: f64, start: f64, end: f64) -> Result<Self, DecayError> {
        (factor > 0.0 && factor < 1.0)
            .then_some(())
            .ok_or(DecayError::Factor(factor))?;
        (width > 0.0)
            .then_some(())
            .ok_or(DecayError::StepWidth(width))?;
        check_range(start, end)?;
        Ok(Self {
            factor,
            width,
            start,
            end,
        })
    }
}

impl Decay for Step {
    fn evaluate(&self, t: f64) -> f64 {
        let drops = (t / self.width).floor();
        (self.start * self.factor.powf(drops)).max(self.end)
    }

    fn start(&self) -> f64 {
        self.start
    }

    fn end(&self) -> f64 {
        self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedules_must_decrease() {
        assert!(Linear::new(1.0, 1.0, 0.0).is_ok());
        assert_eq!(
            Linear::new(1.0, 0.0, 1.0).unwrap_err(),
            DecayError::NotDecreasing {
                start: 0.0,
                end: 1.0
            }
        );
        assert_eq!(
            Exponential::new(-1.0, 1.0, 0.0).unwrap_err(),
            DecayError::Rate(-1.0)
        );
        assert!(InverseTime::new(1.0, f64::NAN, 0.0).is_err());
    }

    #[test]
    fn step_parameters_are_checked() {
        assert_eq!(
            Step::new(2.0, 1.0, 1.0, 0.0).unwrap_err(),
            DecayError::Factor(2.0)
        );
        assert_eq!(
            Step::new(0.5, 0.0, 1.0, 0.0).unwrap_err(),
            DecayError::StepWidth(0.0)
        );
        assert!(DecayError::Factor(2.0).to_string().contains("(0, 1)"));
    }

    #[test]
    fn constant_decay() {
        let x = Constant::new(0.3);
        assert_eq!(x.evaluate(0.0), 0.3);
        assert_eq!(x.evaluate(100.0), 0.3);
        assert_eq!((x.start(), x.end()), (0.3, 0.3));
    }

    #[test]
    fn exponential_decay() {
        let x = Exponential::new(2.0, 2.0, 0.5).unwrap();
        assert_eq!(x.evaluate(0.0), 2.0);
        assert_eq!(x.evaluate(1.0), 0.5 + 1.5 * f64::exp(-2.0));
        assert!(!x.is_asymptotic());
    }

    #[test]
    fn inverse_time_decay() {
        let x = InverseTime::new(2.0, 2.0, 0.5).unwrap();
        assert_eq!(x.evaluate(0.0), 2.0);
        assert_eq!(x.evaluate(1.0), 1.0);
        assert!(x.is_asymptotic());
    }

    #[test]
    fn linear_decay() {
        let x = Linear::new(0.5, 2.0, 0.5).unwrap();
        assert_eq!(x.evaluate(0.0), 2.0);
        assert_eq!(x.evaluate(1.0), 1.5);
        assert_eq!(x.evaluate(10.0), 0.5);
    }

    #[test]
    fn step_decay() {
        let x = Step::new(0.5, 0.5, 2.0, 0.1).unwrap();
        assert_eq!(x.evaluate(0.25), 2.0);
        assert_eq!(x.evaluate(0.75), 1.0);
        assert_eq!(x.evaluate(1.0), 0.5);
        assert_eq!(x.evaluate(100.0), 0.1);
    }
}

use super::Exploration;

/// Optimism in the face of uncertainty
///
/// Scores every pair that is unknown or has been visited fewer than `ne` times
/// with the optimistic reward estimate `r_plus`, and every other pair with its
/// learned value. Under-explored actions look as good as the best possible
/// outcome until the agent has tried them often enough.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Optimistic {
    ne: u32,
    r_plus: f64,
}

impl Optimistic {
    /// ### Parameters
    /// - `ne` - Number of visits after which the learned value is trusted
    /// - `r_plus` - Optimistic estimate of the best reward obtainable in any state
    pub fn new(ne: u32, r_plus: f64) -> Self {
        Self { ne, r_plus }
    }

    pub fn ne(&self) -> u32 {
        self.ne
    }

    pub fn r_plus(&self) -> f64 {
        self.r_plus
    }
}

impl Exploration for Optimistic {
    fn score(&self, value: Option<f64>, visits: u32) -> f64 {
        match value {
            Some(u) if visits >= self.ne => u,
            _ => self.r_plus,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_value_is_optimistic() {
        let f = Optimistic::new(0, 2.0);
        assert_eq!(f.score(None, 0), 2.0);
        assert_eq!(f.score(None, 10), 2.0);
    }

    #[test]
    fn under_visited_value_is_optimistic() {
        let f = Optimistic::new(3, 2.0);
        assert_eq!(f.score(Some(0.5), 0), 2.0);
        assert_eq!(f.score(Some(0.5), 2), 2.0);
        assert_eq!(f.score(Some(0.5), 3), 0.5);
    }

    #[test]
    fn stored_zero_is_not_unknown() {
        let f = Optimistic::new(0, 1.0);
        assert_eq!(f.score(Some(0.0), 0), 0.0);
    }
}

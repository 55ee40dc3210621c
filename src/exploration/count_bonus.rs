use super::Exploration;

/// Count-based exploration bonus
///
/// f(u, n) = u + c / sqrt(n), with unknown or never-visited pairs scored as
/// `f64::MAX` so that every action is tried at least once.
///
/// A higher `c` value equates to more exploration. If unsure where to start, 1 is a good default value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountBonus {
    c: f64,
}

impl CountBonus {
    pub fn new(c: f64) -> Self {
        Self { c }
    }
}

impl Default for CountBonus {
    fn default() -> Self {
        Self { c: 1.0 }
    }
}

impl Exploration for CountBonus {
    fn score(&self, value: Option<f64>, visits: u32) -> f64 {
        match value {
            Some(u) if visits > 0 => u + self.c / (visits as f64).sqrt(),
            _ => f64::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untried_pairs_score_highest() {
        let f = CountBonus::default();
        assert_eq!(f.score(None, 0), f64::MAX);
        assert_eq!(f.score(Some(3.0), 0), f64::MAX);
    }

    #[test]
    fn bonus_shrinks_with_visits() {
        let f = CountBonus::new(2.0);
        assert_eq!(f.score(Some(1.0), 1), 3.0);
        assert_eq!(f.score(Some(1.0), 4), 2.0);
        assert!(f.score(Some(1.0), 100) < f.score(Some(1.0), 4));
    }
}

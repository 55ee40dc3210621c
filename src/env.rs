/// What an agent observes on each time step: the state it is in and the reward
/// signal received for being there
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Percept<S> {
    pub state: S,
    pub reward: f64,
}

impl<S> Percept<S> {
    pub fn new(state: S, reward: f64) -> Self {
        Self { state, reward }
    }
}

/// Lists the legal actions in a state
///
/// A state without legal actions is terminal. Implementations must return the same
/// actions for the same state every time they are asked.
///
/// Implemented for any `Fn(&S) -> Vec<A>`.
pub trait ActionsFunction<S, A> {
    /// Get the available actions for a state
    fn actions(&self, state: &S) -> Vec<A>;

    /// Determine if a state is terminal
    fn is_terminal(&self, state: &S) -> bool {
        self.actions(state).is_empty()
    }
}

impl<S, A, F> ActionsFunction<S, A> for F
where
    F: Fn(&S) -> Vec<A>,
{
    fn actions(&self, state: &S) -> Vec<A> {
        self(state)
    }
}

/// The dynamics of an environment in which an agent can run trials
///
/// Terminality is not reported here. Agents learn it through their
/// [`ActionsFunction`].
pub trait Environment {
    /// A representation of the state of the environment to be passed to an agent
    type State;

    /// A representation of an action that an agent can take to affect the environment
    type Action;

    /// Reset the environment to an initial state
    ///
    /// **Returns** the percept for the initial state
    fn reset(&mut self) -> Percept<Self::State>;

    /// Update the environment in response to an action taken by an agent
    ///
    /// **Returns** the percept for the state the environment moved to
    fn step(&mut self, action: Self::Action) -> Percept<Self::State>;
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub enum Move {
        Forward,
        Stay,
    }

    /// A corridor of `len + 1` cells walked from `0` to the terminal cell `len`
    ///
    /// Every cell pays `-1` except the terminal one, which pays `10`. The only legal
    /// move is `Forward`; `Stay` is the no-op.
    pub struct Corridor {
        pub pos: u8,
        pub len: u8,
    }

    impl Corridor {
        pub fn new(len: u8) -> Self {
            Self { pos: 0, len }
        }

        pub fn actions_fn(len: u8) -> impl Fn(&u8) -> Vec<Move> {
            move |&pos| {
                if pos == len {
                    vec![]
                } else {
                    vec![Move::Forward]
                }
            }
        }

        fn percept(&self) -> Percept<u8> {
            let reward = if self.pos == self.len { 10.0 } else { -1.0 };
            Percept::new(self.pos, reward)
        }
    }

    impl Environment for Corridor {
        type State = u8;
        type Action = Move;

        fn reset(&mut self) -> Percept<u8> {
            self.pos = 0;
            self.percept()
        }

        fn step(&mut self, action: Move) -> Percept<u8> {
            if action == Move::Forward {
                self.pos = (self.pos + 1).min(self.len);
            }
            self.percept()
        }
    }

    #[test]
    fn closure_actions_function() {
        let actions = Corridor::actions_fn(2);
        assert_eq!(actions.actions(&0u8), vec![Move::Forward]);
        assert!(!actions.is_terminal(&1u8));
        assert!(actions.is_terminal(&2u8));
    }

    #[test]
    fn corridor_functional() {
        let mut env = Corridor::new(2);
        assert_eq!(env.reset(), Percept::new(0, -1.0));
        assert_eq!(env.step(Move::Stay), Percept::new(0, -1.0));
        assert_eq!(env.step(Move::Forward), Percept::new(1, -1.0));
        assert_eq!(env.step(Move::Forward), Percept::new(2, 10.0));
    }
}

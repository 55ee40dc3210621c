use std::collections::{HashMap, HashSet};

use log::{debug, trace};

use crate::{
    assert_interval,
    env::{ActionsFunction, Environment, Percept},
    exploration::{Exploration, Optimistic},
    learning_rate::{Fixed, LearningRate},
};

use super::Hashable;

/// Configuration for the [`QLearningAgent`]
#[derive(Debug, Clone)]
pub struct QLearningAgentConfig<L = Fixed, X = Optimistic> {
    /// A function α(n) that returns the learning rate given the number of updates of a state-action pair
    ///
    /// **Default**: [`Fixed`] rate of `0.2`
    pub learning_rate: L,
    /// The exploration function f(u, n) used to pick the next action
    ///
    /// **Default**: [`Optimistic`] with `Ne = 5` and `R+ = 2.0`
    pub exploration: X,
    /// The discount factor - must be in the interval `[0,1)`
    ///
    /// **Default**: `0.9`
    pub gamma: f64,
}

impl QLearningAgentConfig {
    /// Configuration with a fixed learning rate `alpha` and [`Optimistic`] exploration
    ///
    /// **Panics** if `alpha` is not in the interval `(0,1]`
    pub fn new(alpha: f64, gamma: f64, ne: u32, r_plus: f64) -> Self {
        Self {
            learning_rate: Fixed::new(alpha),
            exploration: Optimistic::new(ne, r_plus),
            gamma,
        }
    }
}

impl Default for QLearningAgentConfig {
    fn default() -> Self {
        Self::new(0.2, 0.9, 5, 2.0)
    }
}

impl<L, X> QLearningAgentConfig<L, X> {
    /// Replace the learning-rate function
    pub fn with_learning_rate<L2: LearningRate>(
        self,
        learning_rate: L2,
    ) -> QLearningAgentConfig<L2, X> {
        QLearningAgentConfig {
            learning_rate,
            exploration: self.exploration,
            gamma: self.gamma,
        }
    }

    /// Replace the exploration function
    pub fn with_exploration<X2: Exploration>(
        self,
        exploration: X2,
    ) -> QLearningAgentConfig<L, X2> {
        QLearningAgentConfig {
            learning_rate: self.learning_rate,
            exploration,
            gamma: self.gamma,
        }
    }
}

/// The previous state, action, and reward of the running episode
#[derive(Debug, Clone, PartialEq)]
struct Previous<S, A> {
    state: S,
    action: A,
    reward: f64,
}

/// An exploratory Q-learning agent
///
/// An active learner that learns the value Q(s, a) of each action in each state
/// without a model of the environment's transitions. Each call to [`step`](Self::step)
/// receives a percept, updates the previous state-action pair with the one-step
/// temporal-difference rule
///
/// Q(s, a) ← Q(s, a) + α(N(s, a)) (r + γ max<sub>a'</sub> Q(s', a') - Q(s, a))
///
/// and returns the action maximizing the exploration function f(Q(s', a'), N(s', a')).
///
/// A state is terminal when the [`ActionsFunction`] lists no legal actions for it. Its
/// reward is recorded as Q(s', none) and the episode memory is cleared, so the next
/// percept starts a new episode.
///
/// ### Generics
/// - `S` - State, `A` - Action: used as keys in a [`HashMap`], so both must be [`Hashable`]
/// - `P` - The [`ActionsFunction`] that decides which states are terminal
/// - `L` - The [`LearningRate`] function
/// - `X` - The [`Exploration`] function
pub struct QLearningAgent<S, A, P, L = Fixed, X = Optimistic>
where
    S: Hashable,
    A: Hashable,
    P: ActionsFunction<S, A>,
    L: LearningRate,
    X: Exploration,
{
    q_table: HashMap<(S, A), f64>,
    n_sa: HashMap<(S, A), u32>,
    previous: Option<Previous<S, A>>,
    actions_fn: P,
    actions: Vec<A>,
    none_action: A,
    learning_rate: L,
    exploration: X,
    gamma: f64,
}

impl<S, A, P, L, X> QLearningAgent<S, A, P, L, X>
where
    S: Hashable,
    A: Hashable,
    P: ActionsFunction<S, A>,
    L: LearningRate,
    X: Exploration,
{
    /// Initialize a new `QLearningAgent`
    ///
    /// ### Parameters
    /// - `actions_fn` - Lists the legal actions of a state
    /// - `actions` - Every action the agent may ever consider, scanned in the given order.
    ///   Should contain `none_action` so terminal values are seen when looking ahead.
    ///   Duplicates are dropped.
    /// - `none_action` - The action representing "do nothing"
    /// - `config` - Learning rate, exploration function, and discount factor
    ///
    /// **Panics** if `gamma` is not in the interval `[0,1)`
    pub fn new(
        actions_fn: P,
        actions: impl IntoIterator<Item = A>,
        none_action: A,
        config: QLearningAgentConfig<L, X>,
    ) -> Self {
        assert_interval!(config.gamma, 0.0, 1.0, exclusive_end);
        let mut seen = HashSet::new();
        let actions = actions
            .into_iter()
            .filter(|a| seen.insert(a.clone()))
            .collect();

        Self {
            q_table: HashMap::new(),
            n_sa: HashMap::new(),
            previous: None,
            actions_fn,
            actions,
            none_action,
            learning_rate: config.learning_rate,
            exploration: config.exploration,
            gamma: config.gamma,
        }
    }

    /// Receive a percept, learn from the transition that led to it, and choose the next action
    ///
    /// **Returns** the none-action if the percept's state is terminal
    pub fn step(&mut self, percept: Percept<S>) -> A {
        let Percept {
            state: next_state,
            reward: next_reward,
        } = percept;
        let terminal = self.actions_fn.is_terminal(&next_state);

        if terminal {
            self.q_table
                .insert((next_state.clone(), self.none_action.clone()), next_reward);
        }

        if let Some(Previous {
            state,
            action,
            reward,
        }) = self.previous.take()
        {
            self.learn(state, action, reward, &next_state);
        }

        if terminal {
            debug!("Terminal state reached with reward {next_reward}, episode ended");
            return self.none_action.clone();
        }

        let action = self.act(&next_state);
        self.previous = Some(Previous {
            state: next_state,
            action: action.clone(),
            reward: next_reward,
        });
        action
    }

    /// Forget everything learned and end the running episode
    pub fn reset(&mut self) {
        self.q_table.clear();
        self.n_sa.clear();
        self.previous = None;
        debug!("Agent reset");
    }

    /// The currently learned utility of every state seen so far
    ///
    /// U(s) = max<sub>a</sub> Q(s, a). States the agent has not seen yet are missing.
    pub fn utility(&self) -> HashMap<S, f64> {
        let mut utility = HashMap::new();
        for ((state, _), &q) in &self.q_table {
            utility
                .entry(state.clone())
                .and_modify(|u: &mut f64| {
                    if q > *u {
                        *u = q;
                    }
                })
                .or_insert(q);
        }
        utility
    }

    /// Run the agent through one trial of the given environment
    ///
    /// The trial starts from `env.reset()` and ends when the agent perceives a terminal
    /// state. An episode left unfinished by earlier calls to [`step`](Self::step) is dropped
    /// without learning from it.
    ///
    /// **Returns** the number of actions taken
    pub fn go<E>(&mut self, env: &mut E) -> u32
    where
        E: Environment<State = S, Action = A>,
    {
        if self.previous.take().is_some() {
            debug!("Dropping unfinished episode");
        }

        let mut percept = env.reset();
        let mut steps = 0;
        loop {
            let action = self.step(percept);
            if self.previous.is_none() {
                break;
            }
            percept = env.step(action);
            steps += 1;
        }

        debug!("Trial finished after {steps} steps");
        steps
    }

    /// The learned value of every state-action pair given one so far
    pub fn get_q_table(&self) -> &HashMap<(S, A), f64> {
        &self.q_table
    }

    /// The number of updates of every state-action pair updated so far
    pub fn get_visit_table(&self) -> &HashMap<(S, A), u32> {
        &self.n_sa
    }

    /// The learned value of a state-action pair, or `None` if it was never given one
    pub fn q_value(&self, state: &S, action: &A) -> Option<f64> {
        self.q_table
            .get(&(state.clone(), action.clone()))
            .copied()
    }

    /// The number of updates of a state-action pair
    pub fn visits(&self, state: &S, action: &A) -> u32 {
        self.n_sa
            .get(&(state.clone(), action.clone()))
            .copied()
            .unwrap_or(0)
    }

    /// The action returned from terminal states
    pub fn none_action(&self) -> &A {
        &self.none_action
    }

    /// Every action the agent considers, in scanning order
    pub fn actions(&self) -> &[A] {
        &self.actions
    }

    /// The discount factor
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Whether the agent remembers a previous step of an episode in progress
    pub fn is_mid_episode(&self) -> bool {
        self.previous.is_some()
    }

    /// Apply the temporal-difference update to `(state, action)` given the state it led to
    fn learn(&mut self, state: S, action: A, reward: f64, next_state: &S) {
        // Taken before the pair gets an entry of its own
        let max_next_q = self.max_q(next_state);
        let key = (state, action);

        let n = self.n_sa.entry(key.clone()).or_insert(0);
        *n += 1;
        let visits = *n;
        let alpha = self.learning_rate.rate(visits);

        let q = self.q_table.entry(key).or_insert(0.0);
        let td_error = reward + self.gamma * max_next_q - *q;
        *q += alpha * td_error;

        trace!(
            "Updated Q value to {} (visits = {visits}, alpha = {alpha}, td error = {td_error})",
            *q
        );
    }

    /// max<sub>a</sub> Q(state, a) over the known values of `state`, or `0.0` if it has none
    fn max_q(&self, state: &S) -> f64 {
        self.actions
            .iter()
            .filter_map(|a| self.q_table.get(&(state.clone(), a.clone())).copied())
            .fold(None, |max: Option<f64>, q| Some(max.map_or(q, |m| m.max(q))))
            .unwrap_or(0.0)
    }

    /// argmax<sub>a</sub> f(Q(state, a), N(state, a)), taking the first action on ties
    fn act(&self, state: &S) -> A {
        let choice = self
            .actions
            .iter()
            .map(|a| {
                let key = (state.clone(), a.clone());
                let value = self.q_table.get(&key).copied();
                let visits = self.n_sa.get(&key).copied().unwrap_or(0);
                (a, self.exploration.score(value, visits))
            })
            .fold(None, |best: Option<(&A, f64)>, (a, score)| match best {
                // NaN scores never displace a comparable best
                Some((_, max)) if score > max || (max.is_nan() && !score.is_nan()) => {
                    Some((a, score))
                }
                Some(_) => best,
                None => Some((a, score)),
            });

        match choice {
            Some((action, score)) => {
                trace!("Chose action with exploration score {score}");
                action.clone()
            }
            None => self.none_action.clone(),
        }
    }
}

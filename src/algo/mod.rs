/// Table-based agents for discrete state and action spaces
pub mod tabular;

pub use tabular::q_learning::{QLearningAgent, QLearningAgentConfig};

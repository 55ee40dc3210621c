/// Implemented RL algorithms
pub mod algo;

/// Implementations of strategies for time-decaying hyperparameters
pub mod decay;

/// Environment
pub mod env;

/// Exploration functions
pub mod exploration;

/// Learning-rate functions
pub mod learning_rate;

/// Testing environments
#[cfg(feature = "gym")]
pub mod gym;

mod util;

//! Segregation, homophily and attention indices

pub mod freeman;
pub mod homophily;
pub mod proximity;
pub mod spectral;

pub use freeman::{freeman_global, freeman_one_vs_rest, freeman_two_group};
pub use homophily::{homophily, pairwise_homophily, HomophilyResult, PairwiseHomophily};
pub use proximity::{attention_baseline, proximity, Direction, Proximity, Target};
pub use spectral::{spectral_segregation, ComponentSegregation};

pub mod cli;
pub mod config;
pub mod fetch;
pub mod recommend;

pub use recommend::{Recommendation, Recommender};

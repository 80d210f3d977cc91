pub mod challenge;
pub mod challenge_solver;

pub use challenge::{Operation, Solution};
pub use challenge_solver::ChallengeSolver;

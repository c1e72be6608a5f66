pub mod clause;
pub mod config;
pub mod error;
pub mod interfaces;
pub mod node;
pub mod normalize;
pub mod nursery;
pub mod parser;
pub mod prover;
pub mod sequent;
pub mod substitution;
pub mod trace;
pub mod unify;

pub use clause::Clause;
pub use config::ProverConfig;
pub use error::ProverError;
pub use node::{ConstantValue, Node};
pub use prover::{Outcome, Prover};
pub use sequent::{Sequent, SequentSide};
pub use trace::{ResolutionStep, Rule, TransformationInfo};

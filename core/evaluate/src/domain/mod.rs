//! evaluate 固有のドメイン型（型と不変条件）

pub mod command;
pub mod document;
pub mod evaluation;
pub mod strategy_schema;
pub use command::{EvaluateCommand, ModelSelection};
pub use document::{Document, InputSource};
pub use evaluation::{ScoreConsistency, StrategyEvaluation};
pub use strategy_schema::strategy_evaluation_schema;

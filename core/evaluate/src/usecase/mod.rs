//! ユースケース層

pub mod evaluate;

pub use evaluate::{render_compact, render_pretty, EvaluateOptions, EvaluateUseCase};

pub mod analysis;
pub mod pools;
pub mod sampler;
pub mod simulate;
pub mod strategy;

pub use analysis::{AnalysisSummary, PowerballStatus, SumBand, analyze};
pub use strategy::{StrategyConfig, generate, generate_rotation, generate_sets, generate_with};

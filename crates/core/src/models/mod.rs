pub mod chart;
pub mod holding;
pub mod quote;
pub mod recommendation;
pub mod settings;
pub mod valuation;

pub mod builder;
pub mod profile;
pub mod statement;

pub use builder::{build_statement, build_statement_at};
pub use profile::{BusinessProfile, GrowthStage, MarketPosition, QualitativeFactors};
pub use statement::{chronological, FinancialStatement, Metric, ReportingPeriod};

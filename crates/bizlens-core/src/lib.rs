pub mod analysis;
pub mod arithmetic;
pub mod constants;
pub mod data_quality;
pub mod error;
pub mod session;
pub mod statements;
pub mod types;

#[cfg(feature = "forecast")]
pub mod forecast;

#[cfg(feature = "valuation")]
pub mod valuation;

#[cfg(feature = "report")]
pub mod report;

pub use constants::EstimationConstants;
pub use error::AnalysisError;
pub use session::BusinessContext;
pub use types::*;

/// Standard result type for all analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

pub mod adjustments;
pub mod engine;
pub mod industry;
pub mod methods;

pub use adjustments::AdjustmentDimension;
pub use engine::{
    estimate_valuation, ValuationInput, ValuationMetrics, ValuationRange, ValuationResult,
};
pub use industry::{IndustryMultipleTable, IndustryMultiples, DEFAULT_REVENUE_MULTIPLE};
pub use methods::{MethodEstimate, ValuationMethod};

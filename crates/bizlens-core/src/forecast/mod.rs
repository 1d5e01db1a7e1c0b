pub mod projection;

pub use projection::{generate_forecast, FinancialForecast, ScenarioAnalysis, ScenarioProjection};

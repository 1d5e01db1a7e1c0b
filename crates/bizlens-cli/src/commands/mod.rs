pub mod analysis;
pub mod forecast;
pub mod report;
pub mod request;
pub mod valuation;

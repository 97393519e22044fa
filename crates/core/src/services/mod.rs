pub mod advisor_service;
pub mod chart_service;
pub mod ingest_service;
pub mod price_service;
pub mod valuation_service;

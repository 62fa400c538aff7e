pub mod analytics;
pub mod chart;
pub mod dataset;
pub mod news;
pub mod settings;
pub mod table;
pub mod trade;
pub mod upload;
pub mod valuation;
pub mod view;
pub mod xirr;

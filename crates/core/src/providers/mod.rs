pub mod traits;

// News provider implementations
pub mod newsapi;

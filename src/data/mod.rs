//! Data acquisition: one module per upstream, plus the rules and chains that
//! tie scraped sources together.

pub mod fred;
pub mod investing;
pub mod portal;
pub mod resolver;
pub mod rules;
pub mod sentiment;
pub mod yahoo;

pub use resolver::{Provider, ProviderChain};
pub use sentiment::{SentimentBucket, SentimentClient, SentimentReading, SentimentStatus};
pub use yahoo::HistoryClient;

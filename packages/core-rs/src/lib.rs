pub mod aggregate;
pub mod categories;
pub mod config;
pub mod error;
pub mod export;
pub mod ingest;
pub mod pipeline;
pub mod report;
pub mod risk;
pub mod source;
pub mod types;

pub use aggregate::*;
pub use categories::*;
pub use config::*;
pub use error::*;
pub use export::*;
pub use ingest::*;
pub use pipeline::*;
pub use report::*;
pub use risk::*;
pub use source::*;
pub use types::*;

//! Query-time retrieval: free text to filter, filter to ordered items.

pub mod filter;
pub mod query;
pub mod relevance;

pub use filter::{ItemQuery, ListScope, RetrievalFilter};
pub use query::parse_query;

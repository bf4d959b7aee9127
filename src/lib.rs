// entrybook - Generic in-memory record store with secondary indexes

pub mod command;
pub mod error;
pub mod filter;
pub mod models;
pub mod record;
pub mod session;
pub mod store;

// Re-export main types for convenience
pub use error::StoreError;
pub use filter::Filter;
pub use models::{FormEntry, Question, Run};
pub use record::{Record, RecordId};
pub use session::Session;
pub use store::Store;

//! Store Layer
//!
//! The content store is an external collaborator: it owns the persisted page
//! records and exposes a snapshot read path plus a per-course order write.
//!
//! - [`PageStore`] - the boundary trait the services depend on
//! - [`InMemoryPageStore`] - reference implementation over a materialized
//!   page vector (JSON snapshots, tests)

mod error;
mod memory_store;
mod page_store;

pub use error::StoreError;
pub use memory_store::InMemoryPageStore;
pub use page_store::{PageSnapshot, PageStore};

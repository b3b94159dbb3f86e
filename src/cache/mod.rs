//! Response caching for the gateway
//!
//! - `keys`: cache keys derived verbatim from the request parameters
//! - `store`: the concurrent cache table plus the scheduled flush task

pub mod keys;
pub mod store;

pub use keys::RequestKey;
pub use store::{spawn_flush_task, CacheStats, FlushSchedule, ResponseCache};

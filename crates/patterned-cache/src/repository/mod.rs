pub mod memory;
pub mod traits;

pub use memory::MemoryPersister;
pub use traits::{
    CacheValue, Cacher, Persistence, Persister, SharedCacher, SharedPersister,
};

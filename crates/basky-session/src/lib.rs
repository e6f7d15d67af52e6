pub mod cache;
pub mod clock;
pub mod search;
pub mod store;
pub mod validation;

pub use cache::{CacheEntry, ValidatedLocationCache, VALIDITY_WINDOW_MS};
pub use clock::{Clock, ManualClock, SystemClock};
pub use search::{ProductSearch, SearchView, Ticket};
pub use store::{FileStore, MemoryStore, SessionError, SessionStore};
pub use validation::{LocationValidator, ValidLocation, ValidationState};

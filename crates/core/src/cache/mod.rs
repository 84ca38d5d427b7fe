mod clock;
mod error;
mod keys;
mod serialization;
mod snapshot;
mod traits;

pub use clock::{Clock, MockClock, SystemClock};
pub use error::{CacheError, Result};
pub use keys::{is_user_key, profile_key, reviews_page_key, EVENTS_PREFIX, PROFILE_PREFIX};
pub use serialization::{
    deserialize_profile, deserialize_reviews, serialize_profile, serialize_reviews,
    SerializationError,
};
pub use snapshot::{
    decode_snapshot, encode_snapshot, expires_at, is_expired, Snapshot, SnapshotEntry,
    SNAPSHOT_VERSION,
};
pub use traits::{Cache, CacheMaintenance, FullCache, Ttl};

//! Inventory engine: REST store client and request execution.
mod engine;
mod error;
mod store;
mod types;

pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use error::{EngineError, StoreError};
pub use store::{
    normalize_failure, ItemStore, ReqwestItemStore, StoreSettings, DEFAULT_BASE_URL,
};
pub use types::{EngineEvent, StoreAction, StoreOutcome, StoreRequest};

// Adapters layer: concrete implementations for external systems (clock, storage, notifications, audio).

pub mod audio;
pub mod clock;
pub mod notifier;
pub mod storage;

pub use audio::LoggingAudioBackend;
pub use clock::{FixedClock, SystemClock};
pub use notifier::OutboxScheduler;
pub use storage::{FileKeyValueStore, MemoryKeyValueStore};

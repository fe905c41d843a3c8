//! Operator Notifier Implementations
//!
//! ## Available Providers
//!
//! | Provider | Type | Description |
//! |----------|------|-------------|
//! | LogNotifier | Log | `tracing` error events |
//! | BroadcastNotifier | In-Process | Tokio broadcast channel, also logs |
//! | NullNotifier | Testing | Discards notices |

pub mod broadcast;
pub mod log;
pub mod null;

pub use broadcast::BroadcastNotifier;
pub use log::LogNotifier;
pub use null::NullNotifier;

//! Identity extraction, windowing and counter dispatch.

mod clock;
mod key;
mod limiter;
mod path;
mod store;
mod strategy;
mod window;

pub use clock::{Clock, SystemClock};
pub use key::CounterKey;
pub use limiter::Throttle;
pub use path::resolve_path;
pub use store::{CounterStore, CounterValue, IncrementFuture};
pub use strategy::{evaluate, StrategyKind, REMOTE_ADDRESS_PATH};
pub use window::{TimeWindow, WindowIndex};

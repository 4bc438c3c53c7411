//! Delays module - named, cancelable, single-shot timers driven by the tick.

mod plugin;
mod registry;
mod world;

pub use plugin::{tick_delays, DelayPlugin};
pub use registry::{CancelPolicy, DelayCallback, DelayRegistry};
pub use world::{delay_key, DelayCommandsExt, DelayWorldExt};

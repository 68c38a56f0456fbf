//! Form change events and their distribution.
//!
//! - [`FieldChanged`]: the event published when a watched field changes
//! - [`EventBus`] / [`InMemoryEventBus`]: broadcast pub/sub
//! - [`Debounced`]: quiescence-window consumption of a subscription

pub mod bus;
pub mod debounce;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use debounce::Debounced;
pub use event::{Event, FieldChanged};
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};

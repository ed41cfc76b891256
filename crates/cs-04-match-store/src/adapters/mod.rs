//! Store adapters

pub mod bus;
pub mod clock;
pub mod memory;

pub use bus::BusNotificationSink;
pub use clock::SystemClock;
pub use memory::InMemoryMatchRepository;

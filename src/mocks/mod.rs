//! Mocked transports and hardware of all kinds (useful for tests mostly).
//!
//! Each mock is a cheap clonable handle over shared state, so a test can keep
//! one clone for scripting/inspection while the controller owns the other.

mod host_link;
mod i2c_bus;
mod pulse_driver;
mod sense;

pub use host_link::MockHostLink;
pub use i2c_bus::MockI2cBus;
pub use pulse_driver::MockPulseDriver;
pub use sense::MockSense;

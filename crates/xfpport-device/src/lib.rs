//! XFP device state behind a backend trait.
//!
//! [`XfpBackend`] is what command handlers talk to. [`DeviceRegistry`] is the
//! emulated implementation: a fixed arena of [`MAX_INSTANCES`] transceivers,
//! each with a 256-byte register map and seven control/status pins, indexed
//! only through validated ids.

pub mod backend;
pub mod error;
pub mod ids;
pub mod image;
pub mod registry;

pub use backend::XfpBackend;
pub use error::{DeviceError, Result};
pub use ids::{InstanceId, Pin, RegisterAddr, MAX_INSTANCES, PIN_COUNT, REGISTER_COUNT};
pub use image::{vendor_field, VendorField, DEFAULT_IMAGE};
pub use registry::{DeviceInstance, DeviceRegistry};

//! Domain delegates, one per registered behavior.

pub mod device;

pub use device::{
    Device, DeviceAddDelegate, DeviceReadDelegate, DeviceStore, ReadingAddDelegate,
};

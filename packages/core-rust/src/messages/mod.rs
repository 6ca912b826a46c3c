//! Request and response contracts, grouped per resource kind.

pub mod base;
pub mod device;
pub mod reading;
pub mod response;

pub use base::{FieldFault, KindRequest};
pub use device::{DeviceAddRequest, DeviceReadRequest};
pub use reading::ReadingAddRequest;
pub use response::{ErrorResponse, Outcome, Response, SuccessResponse};

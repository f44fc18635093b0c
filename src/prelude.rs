//! The softusb-mouse prelude.
//!
//! The purpose of this module is to alleviate imports of the items
//! required to build and run a [`crate::device::MouseDevice`]:
//!
//! ```
//! # #![allow(unused_imports)]
//! use softusb_mouse::prelude::*;
//! ```

pub use crate::descriptor::{DEVICE_DESCRIPTOR, MOUSE_REPORT_DESCRIPTOR, REPORT_SIZE};
pub use crate::device::{MouseDevice, MouseDeviceBuilder};
pub use crate::report::{MouseReport, LEFT_BUTTON, MIDDLE_BUTTON, RIGHT_BUTTON};
pub use crate::transport::{DescriptorKind, HidRequest, Transport};
pub use crate::{BuilderError, BuilderResult};

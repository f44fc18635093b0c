//! USB HID mouse report scheduling for bit-banged software USB transports
//!
//! The transport (enumeration, control transfers, bit-level signalling) is
//! consumed through the [`transport::Transport`] trait; this crate decides
//! *when* and *what* to hand to its interrupt endpoint.
#![no_std]

//Allow the use of std in tests
#[cfg(test)]
#[macro_use]
extern crate std;

pub mod descriptor;
pub mod device;
pub mod prelude;
pub mod report;
pub mod scheduler;
pub mod transport;

#[cfg(test)]
mod test_support;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderError {
    ValueOverflow,
}

pub type BuilderResult<B> = core::result::Result<B, BuilderError>;

//!Boundary to the underlying software USB protocol engine
use packed_struct::prelude::*;

/// Operations consumed from the bit-banged USB transport
///
/// All of these are non-blocking; the engine runs its protocol state
/// machine from [`Transport::poll`] and accepts at most one in-flight
/// interrupt transfer at a time. Enumeration callbacks (descriptor and
/// class request handling) flow the other way, into
/// [`crate::device::MouseDevice`].
pub trait Transport {
    /// One-time protocol engine initialization
    fn init(&mut self);
    /// Pull the pull-up, taking the device off the bus
    fn disconnect(&mut self);
    /// Present the device to the host
    fn connect(&mut self);
    /// Drive the protocol engine; must be called every tick
    fn poll(&mut self);
    /// True when the engine can accept a new interrupt transfer
    fn interrupt_ready(&self) -> bool;
    /// Hand one report to the interrupt endpoint, fire-and-forget
    ///
    /// Only valid when [`Transport::interrupt_ready`] returned true this
    /// tick.
    fn send_interrupt(&mut self, data: &[u8]);
}

/// HID class requests - HID spec 7.2
#[derive(Clone, Copy, Debug, PartialEq, Eq, PrimitiveEnum)]
#[repr(u8)]
pub enum HidRequest {
    GetReport = 0x01,
    GetIdle = 0x02,
    GetProtocol = 0x03,
    SetReport = 0x09,
    SetIdle = 0x0A,
    SetProtocol = 0x0B,
}

/// Descriptor types requested during enumeration - USB spec 9.4.3 and
/// HID spec 7.1.1
#[derive(Clone, Copy, Debug, PartialEq, Eq, PrimitiveEnum)]
#[repr(u8)]
pub enum DescriptorKind {
    Device = 0x01,
    Configuration = 0x02,
    String = 0x03,
    Hid = 0x21,
    Report = 0x22,
}

//!Software USB mouse device
use delegate::delegate;
use embedded_time::duration::Milliseconds;
use embedded_time::fixed_point::FixedPoint;
use embedded_time::{Clock, TimeInt};
use heapless::Vec;
use log::{error, info, trace, warn};
use packed_struct::prelude::*;

use crate::descriptor::{DEVICE_DESCRIPTOR, MOUSE_REPORT_DESCRIPTOR};
use crate::report::MouseReport;
use crate::scheduler::{ReportScheduler, DEFAULT_IDLE_RATE};
use crate::transport::{DescriptorKind, HidRequest, Transport};
use crate::{BuilderError, BuilderResult};

/// Time spent off the bus during [`MouseDevice::init`] so the host notices
/// the disconnect and re-enumerates
pub const SETTLE_DELAY: Milliseconds = Milliseconds(200);

/// Largest class request response - a full report plus headroom
pub const CLASS_RESPONSE_LEN: usize = 8;

#[must_use = "this `MouseDeviceBuilder` must be assigned or consumed by `::build()`"]
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct MouseDeviceBuilder {
    default_idle_rate: u8,
}

impl MouseDeviceBuilder {
    pub fn new() -> Self {
        Self {
            default_idle_rate: DEFAULT_IDLE_RATE,
        }
    }

    /// Idle rate the device reverts to on reset, rounded to 4ms units
    pub fn idle_default<D: Into<Milliseconds>>(mut self, duration: D) -> BuilderResult<Self> {
        let d_ms = duration.into();

        if d_ms == Milliseconds(0_u32) {
            self.default_idle_rate = 0;
        } else {
            let scaled_duration = d_ms.integer() / 4;

            if scaled_duration == 0 {
                //round up for 1-3ms
                self.default_idle_rate = 1;
            } else {
                self.default_idle_rate =
                    u8::try_from(scaled_duration).map_err(|_| BuilderError::ValueOverflow)?;
            }
        }
        Ok(self)
    }

    pub fn build<'a, T, C, TICK>(self, transport: T, clock: &'a C) -> MouseDevice<'a, T, C>
    where
        T: Transport,
        C: Clock<T = TICK>,
        TICK: TimeInt,
        u32: TryFrom<TICK>,
    {
        MouseDevice {
            transport,
            clock,
            scheduler: ReportScheduler::new(clock, self.default_idle_rate),
        }
    }
}

impl Default for MouseDeviceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A HID mouse on a software USB transport
///
/// Owns the [`ReportScheduler`] and a [`Transport`]; the hosting firmware
/// calls [`MouseDevice::tick`] (or [`MouseDevice::run_for`]) continuously
/// and feeds input through the mutators. Descriptor and class request
/// callbacks from the transport's control pipeline land on
/// [`MouseDevice::descriptor`] and [`MouseDevice::handle_class_request`].
pub struct MouseDevice<'a, T: Transport, C: Clock> {
    transport: T,
    clock: &'a C,
    scheduler: ReportScheduler<'a, C>,
}

impl<'a, T, C, TICK> MouseDevice<'a, T, C>
where
    T: Transport,
    C: Clock<T = TICK>,
    TICK: TimeInt,
    u32: TryFrom<TICK>,
{
    pub fn new(transport: T, clock: &'a C) -> Self {
        MouseDeviceBuilder::new().build(transport, clock)
    }

    delegate! {
        to self.scheduler {
            #[call(apply)]
            pub fn set_motion(&mut self, buttons: u8, dx: i8, dy: i8, dwheel: i8);
            #[call(set_motion)]
            pub fn move_rel(&mut self, dx: i8, dy: i8, dwheel: i8);
            pub fn set_buttons(&mut self, buttons: u8);
            pub fn idle_rate(&self) -> u8;
        }
    }

    /// Bring the device onto the bus
    ///
    /// Drops off the bus first and settles for [`SETTLE_DELAY`] so a host
    /// that already enumerated a previous incarnation re-enumerates this
    /// one.
    pub fn init(&mut self) {
        info!("Starting USB mouse");
        self.transport.disconnect();
        self.settle(SETTLE_DELAY);
        self.transport.connect();
        self.transport.init();
        self.scheduler.start();
    }

    fn settle(&self, duration: Milliseconds) {
        let timer = self.clock.new_timer(duration).start().unwrap();
        while !timer.is_expired().unwrap() {}
    }

    /// Drive the transport and the report schedule; never blocks
    pub fn tick(&mut self) {
        self.transport.poll();

        let ready = self.transport.interrupt_ready();
        if let Some(report) = self.scheduler.update(ready) {
            match report.pack() {
                Ok(data) => {
                    trace!("Sending report {:X?}", data);
                    self.transport.send_interrupt(&data);
                }
                Err(e) => {
                    error!("Error packing MouseReport: {:?}", e);
                }
            }
        }
    }

    /// Tick continuously for at least `duration`
    ///
    /// Interleaving input updates is the caller's business; this simply
    /// keeps the device serviced while the hosting firmware has nothing
    /// else to do.
    pub fn run_for(&mut self, duration: Milliseconds) {
        let timer = self.clock.new_timer(duration).start().unwrap();
        while !timer.is_expired().unwrap() {
            self.tick();
        }
    }

    /// Restore power-on defaults after a bus reset
    pub fn reset(&mut self) {
        info!("Reset");
        self.scheduler.reset();
    }

    /// Descriptor provider, called back by the transport during
    /// enumeration; unknown kinds yield an empty blob
    pub fn descriptor(&self, kind: u8) -> &'static [u8] {
        match DescriptorKind::from_primitive(kind) {
            Some(DescriptorKind::Device) => DEVICE_DESCRIPTOR,
            Some(DescriptorKind::Report) => MOUSE_REPORT_DESCRIPTOR,
            _ => {
                warn!("Unsupported descriptor request, kind {:X}", kind);
                &[]
            }
        }
    }

    /// Handle a HID class control request, returning the response payload
    pub fn handle_class_request(&mut self, request: u8, value: u16) -> Vec<u8, CLASS_RESPONSE_LEN> {
        let mut response = Vec::new();
        match HidRequest::from_primitive(request) {
            Some(HidRequest::GetReport) => {
                //wValue carries report type and ID; there is only one report
                match self.scheduler.current().pack() {
                    Ok(data) => {
                        response.extend_from_slice(&data).ok();
                        trace!("Get report, {:X} bytes", data.len());
                    }
                    Err(e) => {
                        error!("Error packing MouseReport: {:?}", e);
                    }
                }
            }
            Some(HidRequest::GetIdle) => {
                let rate = self.scheduler.idle_rate();
                response.push(rate).ok();
                info!("Get idle: {:X}", rate);
            }
            Some(HidRequest::SetIdle) => {
                //wValue: duration (high byte), report ID (low byte) - HID spec 7.2.4
                self.scheduler.set_idle_rate((value >> 8) as u8);
            }
            _ => {
                warn!(
                    "Unsupported class request: {:X}, value: {:X}",
                    request, value
                );
            }
        }
        response
    }

    /// The report the host would receive next
    pub fn current_report(&self) -> &MouseReport {
        self.scheduler.current()
    }
}

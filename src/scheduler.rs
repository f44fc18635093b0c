//!Input report scheduling - decides when the pending report is handed to
//!the transport's interrupt endpoint
use delegate::delegate;
use embedded_time::duration::Milliseconds;
use embedded_time::fixed_point::FixedPoint;
use embedded_time::timer::param::{OneShot, Running};
use embedded_time::{Clock, TimeInt, Timer};
use log::{info, trace};

use crate::report::{MouseReport, ReportState};

/// The recommended default idle rate (rate when the device is initialized)
/// is 500 milliseconds for keyboards (delay before first repeat rate) and
/// infinity for joysticks and mice - HID spec 7.2.4 "remarks". 0 == infinity.
pub const DEFAULT_IDLE_RATE: u8 = 0;

/// Tracks the host configured idle rate and the deadline for the next
/// forced report
///
/// The idle rate is kept as the raw request byte, in units of 4ms - HID
/// spec 7.2.4 Set_Idle Request. A rate of zero inhibits idle reporting;
/// the endpoint then only reports when the report data changes.
///
/// Deadlines stay anchored to a fixed phase: on expiry the next timer is
/// shortened by however late the expiry was observed, so reports land at
/// `t0 + k * rate * 4ms` rather than drifting with tick jitter.
pub struct IdleManager<'a, C: Clock> {
    clock: &'a C,
    rate: u8,
    default_rate: u8,
    timer: Option<Timer<'a, OneShot, Running, C, Milliseconds>>,
    armed: Milliseconds,
    carry: Milliseconds,
}

impl<'a, C, TICK> IdleManager<'a, C>
where
    C: Clock<T = TICK>,
    TICK: TimeInt,
    u32: TryFrom<TICK>,
{
    pub fn new(clock: &'a C, default_rate: u8) -> Self {
        Self {
            clock,
            rate: default_rate,
            default_rate,
            timer: None,
            armed: Milliseconds(0),
            carry: Milliseconds(0),
        }
    }

    /// The idle rate as reported to GetIdle, in units of 4ms
    pub fn rate(&self) -> u8 {
        self.rate
    }

    fn period(&self) -> Milliseconds {
        Milliseconds(u32::from(self.rate) * 4)
    }

    fn arm_for(&mut self, duration: Milliseconds) {
        self.armed = duration;
        self.timer = Some(self.clock.new_timer(duration).start().unwrap());
    }

    /// Arm the timer for a full period from now
    pub fn rearm(&mut self) {
        self.carry = Milliseconds(0);
        if self.rate == 0 {
            self.timer = None;
        } else {
            let period = self.period();
            self.arm_for(period);
        }
    }

    /// Restore the default rate, discarding any host configuration
    pub fn reset(&mut self) {
        self.rate = self.default_rate;
        self.rearm();
    }

    /// Apply a SetIdle request
    pub fn set_rate(&mut self, rate: u8) {
        self.rate = rate;
        self.carry = Milliseconds(0);

        if rate == 0 {
            self.timer = None;
            info!("Set idle rate to indefinite");
            return;
        }

        let period = self.period();
        match self.timer.as_ref().map(|t| t.elapsed().unwrap()) {
            Some(elapsed) if elapsed > period => {
                //sending a report is now overdue, set a zero time timer
                self.arm_for(Milliseconds(0));
            }
            Some(elapsed) => {
                //carry over elapsed time
                self.arm_for(period - elapsed);
            }
            None => {
                self.arm_for(period);
            }
        }
        info!("Set idle rate to {}ms", period.integer());
    }

    /// True once per elapsed idle interval
    ///
    /// On expiry the timer is re-armed against the previous deadline, not
    /// against now. An interval missed entirely results in a zero length
    /// timer, so catch-up reports fire on consecutive ticks until the
    /// schedule is back in phase.
    pub fn check_expired(&mut self) -> bool {
        let elapsed = match self.timer.as_ref() {
            Some(t) if t.is_expired().unwrap() => t.elapsed().unwrap(),
            _ => return false,
        };

        let period = self.period();
        let overshoot = (elapsed - self.armed) + self.carry;

        if overshoot >= period {
            self.arm_for(Milliseconds(0));
            self.carry = overshoot - period;
        } else {
            self.arm_for(period - overshoot);
            self.carry = Milliseconds(0);
        }
        true
    }
}

/// Decides once per tick whether the pending report goes out
///
/// A report is due when its content changed since the last send or when a
/// nonzero idle interval elapsed. Due-ness is latched until the transport
/// is ready to accept an interrupt transfer, so a stalled host delays a
/// send but never loses one - the report state keeps tracking the latest
/// input in the meantime.
pub struct ReportScheduler<'a, C: Clock> {
    state: ReportState,
    idle: IdleManager<'a, C>,
    must_send: bool,
}

impl<'a, C, TICK> ReportScheduler<'a, C>
where
    C: Clock<T = TICK>,
    TICK: TimeInt,
    u32: TryFrom<TICK>,
{
    pub fn new(clock: &'a C, default_idle_rate: u8) -> Self {
        Self {
            state: ReportState::default(),
            idle: IdleManager::new(clock, default_idle_rate),
            must_send: false,
        }
    }

    delegate! {
        to self.state {
            pub fn apply(&mut self, buttons: u8, dx: i8, dy: i8, dwheel: i8);
            pub fn set_buttons(&mut self, buttons: u8);
            pub fn set_motion(&mut self, dx: i8, dy: i8, dwheel: i8);
            pub fn current(&self) -> &MouseReport;
        }
    }

    delegate! {
        to self.idle {
            #[call(rate)]
            pub fn idle_rate(&self) -> u8;
            #[call(set_rate)]
            pub fn set_idle_rate(&mut self, rate: u8);
        }
    }

    /// Start the idle schedule, anchoring its phase to now
    pub fn start(&mut self) {
        self.idle.rearm();
    }

    /// Restore power-on state after a bus reset
    pub fn reset(&mut self) {
        self.state.reset();
        self.idle.reset();
        self.must_send = false;
    }

    /// Evaluate one tick; returns the report to hand to the transport, if
    /// one is due and the transport can take it
    pub fn update(&mut self, transport_ready: bool) -> Option<MouseReport> {
        if self.idle.check_expired() {
            trace!("Idle interval elapsed, report due");
            self.must_send = true;
        }

        //a content change always forces a send, whatever the idle schedule
        if self.state.changed() {
            self.must_send = true;
        }

        if self.must_send && transport_ready {
            self.must_send = false;
            Some(self.state.snapshot_and_clear())
        } else {
            None
        }
    }
}

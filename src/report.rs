//!Mouse input report state
use packed_struct::prelude::*;

pub const LEFT_BUTTON: u8 = 0x01;
pub const RIGHT_BUTTON: u8 = 0x02;
pub const MIDDLE_BUTTON: u8 = 0x04;

/// Boot compatible mouse report with a vertical wheel and three buttons
///
/// Matches the wire layout described by [`crate::descriptor::MOUSE_REPORT_DESCRIPTOR`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, PackedStruct)]
#[packed_struct(endian = "lsb", size_bytes = "4")]
pub struct MouseReport {
    #[packed_field]
    pub buttons: u8,
    #[packed_field]
    pub x: i8,
    #[packed_field]
    pub y: i8,
    #[packed_field]
    pub wheel: i8,
}

/// Clamp a motion delta to the logical range of the report descriptor
///
/// The descriptor declares -127..127; -128 can't be represented so it is
/// saturated rather than rejected
pub fn clamp_delta(delta: i8) -> i8 {
    if delta == i8::MIN {
        -127
    } else {
        delta
    }
}

/// Pending and last-sent report pair
///
/// `pending` accumulates state between sends; motion fields hold the most
/// recent delta (replace, not add - see [`ReportState::set_motion`]).
/// `last_sent` tracks what the host last received so a change can force a
/// send ahead of the idle schedule.
#[derive(Debug, Default)]
pub struct ReportState {
    pending: MouseReport,
    last_sent: MouseReport,
}

impl ReportState {
    /// Replace buttons and motion in one call
    pub fn apply(&mut self, buttons: u8, dx: i8, dy: i8, dwheel: i8) {
        self.set_buttons(buttons);
        self.set_motion(dx, dy, dwheel);
    }

    /// Set the absolute button mask
    pub fn set_buttons(&mut self, buttons: u8) {
        self.pending.buttons = buttons;
    }

    /// Set the motion deltas for the next report
    ///
    /// Each field is replaced, not accumulated - if several calls land
    /// between two sends only the last survives
    pub fn set_motion(&mut self, dx: i8, dy: i8, dwheel: i8) {
        self.pending.x = clamp_delta(dx);
        self.pending.y = clamp_delta(dy);
        self.pending.wheel = clamp_delta(dwheel);
    }

    /// True when the pending report differs from the last one sent
    pub fn changed(&self) -> bool {
        self.pending != self.last_sent
    }

    /// The report that would be sent next
    pub fn current(&self) -> &MouseReport {
        &self.pending
    }

    /// Take a copy of the pending report and clear its deltas
    ///
    /// Deltas are relative so they are zeroed once consumed; buttons are
    /// absolute state and persist. `last_sent` is recorded post-clear so
    /// the cleared pending report never reads as changed.
    pub fn snapshot_and_clear(&mut self) -> MouseReport {
        let snapshot = self.pending;
        self.pending.x = 0;
        self.pending.y = 0;
        self.pending.wheel = 0;
        self.last_sent = self.pending;
        snapshot
    }

    pub fn reset(&mut self) {
        self.pending = MouseReport::default();
        self.last_sent = MouseReport::default();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use packed_struct::PackedStruct;

    #[test]
    fn clamp_delta_saturates_most_negative() {
        assert_eq!(clamp_delta(-128), -127);
        assert_eq!(clamp_delta(-127), -127);
        assert_eq!(clamp_delta(-1), -1);
        assert_eq!(clamp_delta(0), 0);
        assert_eq!(clamp_delta(127), 127);
    }

    #[test]
    fn set_motion_clamps_each_field_independently() {
        let mut state = ReportState::default();

        state.set_motion(-128, 64, 127);
        assert_eq!(state.current().x, -127);
        assert_eq!(state.current().y, 64);
        assert_eq!(state.current().wheel, 127);

        state.set_motion(5, -128, -128);
        assert_eq!(state.current().x, 5);
        assert_eq!(state.current().y, -127);
        assert_eq!(state.current().wheel, -127);
    }

    #[test]
    fn set_motion_replaces_rather_than_accumulates() {
        let mut state = ReportState::default();

        state.set_motion(10, 10, 1);
        state.set_motion(3, -4, 0);

        assert_eq!(state.current().x, 3);
        assert_eq!(state.current().y, -4);
        assert_eq!(state.current().wheel, 0);
    }

    #[test]
    fn snapshot_clears_motion_but_keeps_buttons() {
        let mut state = ReportState::default();
        state.apply(LEFT_BUTTON | MIDDLE_BUTTON, 5, -3, 1);

        let snapshot = state.snapshot_and_clear();

        assert_eq!(snapshot.buttons, LEFT_BUTTON | MIDDLE_BUTTON);
        assert_eq!(snapshot.x, 5);
        assert_eq!(snapshot.y, -3);
        assert_eq!(snapshot.wheel, 1);

        assert_eq!(state.current().buttons, LEFT_BUTTON | MIDDLE_BUTTON);
        assert_eq!(state.current().x, 0);
        assert_eq!(state.current().y, 0);
        assert_eq!(state.current().wheel, 0);
    }

    #[test]
    fn snapshot_settles_change_flag() {
        let mut state = ReportState::default();
        state.apply(RIGHT_BUTTON, 1, 2, 3);
        assert!(state.changed());

        state.snapshot_and_clear();

        //held buttons with no new motion are not a change
        assert!(!state.changed());
    }

    #[test]
    fn button_release_reads_as_change() {
        let mut state = ReportState::default();
        state.set_buttons(LEFT_BUTTON);
        state.snapshot_and_clear();

        state.set_buttons(0);
        assert!(state.changed());
    }

    #[test]
    fn report_packs_to_wire_layout() {
        let report = MouseReport {
            buttons: MIDDLE_BUTTON,
            x: -2,
            y: 3,
            wheel: -1,
        };

        assert_eq!(report.pack().unwrap(), [0x04, 0xFE, 0x03, 0xFF]);
    }

    #[test]
    fn reset_returns_to_default() {
        let mut state = ReportState::default();
        state.apply(LEFT_BUTTON, 1, 1, 1);
        state.snapshot_and_clear();

        state.reset();

        assert_eq!(*state.current(), MouseReport::default());
        assert!(!state.changed());
    }
}

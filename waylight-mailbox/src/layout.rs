//! Byte offsets of the mailbox fields
//!
//! These constants are the wire contract between the two cores; both
//! sides compile against this module, so the layout can only change in
//! lockstep.

/// Number of pixels on the LED string
///
/// Part of the wire contract: the progress field carries a lit-pixel
/// count scaled to this length.
pub const STRIP_LEN: usize = 8;

/// Reserved message buffer at the start of the region (unused here)
pub const MSG_REGION_OFFSET: usize = 0;

/// Length of the reserved message buffer in bytes
pub const MSG_REGION_LEN: usize = 32;

/// Lit-LED count, pre-scaled by the arbiter to the string length
pub const PROGRESS_OFFSET: usize = MSG_REGION_OFFSET + MSG_REGION_LEN;

/// Color class word (see [`crate::status::ColorClass`])
pub const COLOR_OFFSET: usize = PROGRESS_OFFSET + 4;

/// Animation mode word (see [`crate::status::Mode`])
pub const MODE_OFFSET: usize = COLOR_OFFSET + 4;

/// GPS fix validity, 0 or 1
pub const GPS_SIGNAL_OFFSET: usize = MODE_OFFSET + 4;

/// Total mailbox length in bytes
pub const MAILBOX_LEN: usize = GPS_SIGNAL_OFFSET + 4;

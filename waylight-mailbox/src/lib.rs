//! Shared-Memory Status Mailbox
//!
//! This crate defines the fixed-layout memory region through which the
//! host publishes vehicle status to the LED co-processor. The mailbox is
//! a one-way, continuously-redrawn status channel: the host overwrites the
//! fields on every arbitration tick and the co-processor re-reads them on
//! every repaint. There is no handshake and no locking.
//!
//! # Layout
//!
//! ```text
//! ┌────────────┬──────────┬──────────┬──────────┬────────────┐
//! │ msg region │ progress │ color    │ mode     │ gps signal │
//! │ 0..32      │ 32..36   │ 36..40   │ 40..44   │ 44..48     │
//! └────────────┴──────────┴──────────┴──────────┴────────────┘
//! ```
//!
//! All fields are little-endian `u32` words. A reader may observe a
//! half-updated mailbox for at most one redraw cycle; every consumer
//! treats the fields as a level signal and repaints idempotently, so no
//! sequence counter is needed.

#![no_std]
#![deny(unsafe_code)]

pub mod color;
pub mod layout;
pub mod status;

pub use color::Grbw;
pub use layout::{
    COLOR_OFFSET, GPS_SIGNAL_OFFSET, MAILBOX_LEN, MODE_OFFSET, MSG_REGION_LEN, MSG_REGION_OFFSET,
    PROGRESS_OFFSET, STRIP_LEN,
};
pub use status::{ColorClass, Mode, StatusReader, StatusUpdate, StatusWriter, DISABLE_SENTINEL};

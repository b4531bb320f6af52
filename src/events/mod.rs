//! # Events Module
//!
//! Injected reporting for the cleaner.
//!
//! ## Design
//! The scanner and remover emit typed events through a channel instead of
//! logging directly. The CLI turns them into log lines; tests collect them.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//! let report = SidecarScanner::new(config).run(&sender)?;
//! drop(sender);
//!
//! for event in receiver.iter() {
//!     if let Event::Scan(ScanEvent::SidecarFound { sidecar, .. }) = event {
//!         println!("{}", sidecar.display());
//!     }
//! }
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;

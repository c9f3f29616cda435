//! # thoughtz
//!
//! A dual-mode persistence gateway for fleeting thoughts. Records live in
//! exactly one of two worlds: an on-device slot store for guests, or a
//! remote document collection for signed-in users. The gateway owns the
//! routing, so the UI on top never has to branch on mode.
//!
//! ## Architecture
//!
//! The crate is layered, each layer only reaching downward:
//!
//! ```text
//! ThoughtzApi (api)          facade: routing, validation, fallback
//!     |
//! Session (session)          guest flag + identity, one owner
//!     |
//! ThoughtStore (store)       the storage port
//!    / \
//! LocalStore  RemoteStore    whole-blob slots | HTTP document collection
//!     |
//! SlotBackend (store::slot)  named slots: FsSlots on disk, MemSlots in tests
//! ```
//!
//! [`api::ThoughtzApi`] is the only type most callers need. It is generic
//! over the slot backend, so every flow can run against
//! [`store::mem_slot::MemSlots`] in tests and [`store::fs_slot::FsSlots`]
//! in production.
//!
//! ## Example
//!
//! ```no_run
//! use thoughtz::api::ThoughtzApi;
//! use thoughtz::config::GatewayConfig;
//! use thoughtz::draft::Draft;
//!
//! # fn main() -> thoughtz::error::Result<()> {
//! let mut api = ThoughtzApi::open(&GatewayConfig::default())?;
//! api.enter_guest_mode()?;
//!
//! let thought = api.create_thought(Draft::new(
//!     "Shower Paradox",
//!     "If the shower cleans you, what cleans the shower?",
//! ))?;
//! println!("saved {}", thought.id);
//!
//! for t in api.list_thoughts()? {
//!     println!("{}  {}", thoughtz::share::format_date(&t.date), t.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod draft;
pub mod error;
pub mod model;
pub mod sample;
pub mod session;
pub mod share;
pub mod store;

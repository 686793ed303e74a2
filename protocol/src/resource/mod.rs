//! # did:key Resources
//!
//! The host-side lifecycle around the minting core. Each named resource is
//! either absent or present; the caller drives every transition:
//!
//! ```text
//!            create / import / apply(Create)
//!   Absent ───────────────────────────────────▶ Present
//!     ▲                                            │  read        (no-op)
//!     │                 delete                     │  apply(Replace): delete + mint
//!     └────────────────────────────────────────────┘
//! ```
//!
//! Reads never re-derive anything: a minted identifier is immutable. Deletes
//! only forget local state, since minting had no external side effects to
//! undo. Imports trust the given ID as opaque state.

pub mod lifecycle;

pub use lifecycle::{DidKeyResource, Plan, ResourceError, ResourceStatus};

//! Core dataflow primitives for incrementally rendered lists
//!
//! This crate holds the building blocks that know nothing about sorting,
//! selection or any particular UI. A list lives in a [`Store`]; a
//! [`PatchStream`] turns its successive states into minimal [`Patch`]es;
//! a consumer applies them and ties the work to a [`Lifetime`].
//!
//! # Core Components
//!
//! - **[`Store`]** - Single-value reactive state with one serialized apply point
//! - **[`Relay`]** - Type-safe event streaming using simple channels
//! - **[`IdProvider`]** - Decides when two items are the same entity
//! - **[`Differ`]** - Structural delta between two list states
//! - **[`PatchStream`]** - Restartable patch stream over a [`DataSource`]
//! - **[`Lifetime`]** - Explicit owner that cancels bound streams
//!
//! # Architecture Principles
//!
//! 1. **One Apply Point** - Every write to a Store is committed under one lock
//! 2. **Event-Source Naming** - Relays follow `{source}_{event}_relay` pattern
//! 3. **Identity First** - Diffing and matching always go through an IdProvider
//! 4. **Explicit Ownership** - Nothing runs in an ambient scope; bind to a Lifetime

pub mod data_source;
pub mod identity;
pub mod lifetime;
pub mod patch;
pub mod patch_stream;
pub mod relay;
pub mod store;

pub use data_source::{BoxSignal, DataSource};
pub use identity::IdProvider;
pub use lifetime::Lifetime;
pub use patch::{Differ, Patch};
pub use patch_stream::{PatchStream, patches};
pub use relay::{Relay, RelayError, relay};
pub use store::{Handler, Store, StoreStream};

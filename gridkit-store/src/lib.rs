//! Observable state for gridkit.
//!
//! A small publish/subscribe substrate: [`Observable`] holds an immutable
//! snapshot behind `Rc<RefCell<..>>`, replaces it wholesale on every
//! mutation and synchronously notifies subscribers. The selection stores
//! and the edit store are all built on it.
//!
//! # Invariants
//!
//! 1. Subscribers are notified once per changing mutation, in subscription order.
//! 2. Writing a value equal to the current one is a no-op: the snapshot
//!    pointer and version are unchanged and nobody is notified.
//! 3. Dropping a [`Subscription`] removes its listener before the next
//!    notification cycle.
//! 4. A listener that writes during notification starts a new cycle; the
//!    interrupted cycle stops, so every subscriber's last delivered value
//!    is the current snapshot.
//!
//! Everything here is single-threaded (`!Send`).

mod observable;
mod selection;

pub use observable::{Observable, StoreReader, Subscription};
pub use selection::{MultiSelectionStore, SelectionStore};

//! Task store: the single owner of the in-memory collection.
//!
//! # Responsibility
//! - Route every mutation of the task collection through one API.
//! - Write through to the persistence adapter after each mutation.
//!
//! # Invariants
//! - Collection order equals creation order.
//! - At most one task per id.
//! - A persistence fault never fails the mutation that triggered it.

pub mod task_store;

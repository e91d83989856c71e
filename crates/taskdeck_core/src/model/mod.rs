//! Domain model for the task collection.
//!
//! # Responsibility
//! - Define the canonical task record used by core business logic.
//! - Keep one shape for both the in-memory collection and the persisted
//!   slot payload.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - `created_at` is set once at creation and never mutated afterwards.

pub mod task;

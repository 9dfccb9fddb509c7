//! eq-contract: value-identity done explicitly — a checkable equality/hash
//! contract, a hash container driven by pluggable equality strategies, and a
//! defensive-copy holder.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: make the equals/hash relationship an explicit object instead of an
//!   implicit language convention, so hash-based membership can never
//!   silently mix value equality with identity hashing.
//! - Pieces:
//!   - Semantics<T>: strategy trait carrying *both* `equivalent` and
//!     `hash_one`. Shipped strategies: ValueSemantics (content equality via
//!     `Eq + Hash`), IdentitySemantics (reference comparison), FnSemantics
//!     (closure pair, including deliberately inconsistent ones).
//!   - contract::check: pure checker that validates reflexivity, symmetry,
//!     transitivity, repeated-call consistency, and the
//!     `equivalent(a,b) ⇒ hash_one(a) == hash_one(b)` law over samples,
//!     collecting every violation rather than stopping at the first.
//!   - ValueSet<T, E>: hash set resolving membership through its strategy;
//!     stable generational handles to entries, duplicate inserts rejected.
//!   - DefensiveBuffer<T>: owns an independent copy of its source at
//!     construction and clones again on every accessor, so no external
//!     reference aliases internal state.
//!   - runner::Suite: row-parameterized case runner with xUnit-shaped
//!     lifecycle hooks; `after_each` runs even when a case body panics.
//!
//! Constraints
//! - Single-threaded, synchronous; no blocking operations, no shared
//!   resources beyond the container's own storage.
//! - Each ValueSet entry stores its hash computed at insert; the index
//!   always rehashes from stored hashes, so strategy code never runs during
//!   a resize.
//! - Elements are immutable post-insert; in-place mutation could
//!   desynchronize a value from its stored hash.
//! - Reentrancy: strategy code runs during probes while internals may be
//!   transiently inconsistent; a debug-only guard panics on nested entry and
//!   compiles out in release builds.
//!
//! Error policy
//! - Contract violations are detected, not fatal: `contract::check` reports
//!   the full list. Out-of-range and invalid-argument conditions abort the
//!   operation immediately with a descriptive `Error`.

mod contract_proptest;
mod reentrancy;

pub mod contract;
pub mod defensive;
pub mod runner;
pub mod semantics;
pub mod value_set;

mod error;

// Public surface
pub use contract::{check, ContractReport, Violation};
pub use defensive::DefensiveBuffer;
pub use error::Error;
pub use semantics::{FnSemantics, IdentitySemantics, Semantics, ValueSemantics};
pub use value_set::{Handle, ValueSet};

//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the record access contract for customers.
//! - Isolate SQLite query details from validation and bulk exchange.
//!
//! # Invariants
//! - Repository APIs report "no row affected" as `false`/`None`, never as an
//!   error; errors are reserved for storage failures.

pub mod customer_repo;

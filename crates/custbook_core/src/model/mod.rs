//! Customer domain model.
//!
//! # Responsibility
//! - Define the canonical customer record shared by storage and exchange.
//! - Own normalization and validation rules for raw customer input.
//!
//! # Invariants
//! - A customer is identified by its normalized phone (digits only).
//! - Validation runs on normalized values, never on raw input.

pub mod customer;

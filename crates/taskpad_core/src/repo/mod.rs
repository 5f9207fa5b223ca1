//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes must validate titles before persistence.
//! - Repository APIs return typed errors; silent-failure policy is applied
//!   one layer up, at the service seam.

pub mod task_repo;

//! Core pagination layer for scanql.
//!
//! This crate contains the domain models, port traits and the cursor-window
//! pagination engine that sits between the GraphQL API and the legacy,
//! offset-based list protocol of the vulnerability scanner. It follows
//! hexagonal architecture principles - this is the innermost layer with
//! no dependencies on infrastructure.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │           scanql-graphql (API, Relay connections)           │
//! ├─────────────────────────────────────────────────────────────┤
//! │           scanql-gmp (XML list protocol adapter)            │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   scanql-core  ← YOU ARE HERE               │
//! │      (models, ports, pagination engine, pager service)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`models`] - Filter strings and count envelopes
//! - [`ports`] - Relay pagination types and the [`ports::ListSource`] port
//! - [`pagination`] - Window calculation, cursors, counts, connection assembly
//! - [`services`] - [`services::PagerService`], the end-to-end request flow
//! - [`error`] - Error types
//! - [`metrics`] - Metrics definitions
//!
//! # Request Flow
//!
//! 1. Resolve `after`/`before`/`first`/`last` into a window
//! 2. Rewrite the `first=`/`rows=` terms of the caller's filter string
//! 3. Execute the filter against the list source
//! 4. Normalize the returned count envelope
//! 5. Assemble edges, cursors and page info
//!
//! Every step except 3 is a pure function of its inputs.

pub mod error;
pub mod metrics;
pub mod models;
pub mod pagination;
pub mod ports;
pub mod services;

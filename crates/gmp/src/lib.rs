//! Management protocol adapter for scanql.
//!
//! This crate implements the [`ListSource`] port from `scanql-core` for the
//! scanner's XML management protocol. It renders `get_<entities>` list
//! commands carrying the computed filter string and parses the count/window
//! envelope of the responses.
//!
//! # Usage
//!
//! ```ignore
//! use scanql_core::services::PagerService;
//! use scanql_gmp::GmpListSource;
//!
//! let tasks = GmpListSource::for_entity(transport.clone(), "task");
//! let pager = PagerService::new(Arc::new(tasks));
//! let connection = pager.paginate(&filter, &pagination).await?;
//! ```
//!
//! # Architecture
//!
//! The wire connection itself is behind [`GmpTransport`]; this crate only
//! deals with command and response documents. Result nodes are handed on as
//! verbatim [`XmlNode`] subtrees.
//!
//! [`ListSource`]: scanql_core::ports::ListSource

mod command;
mod envelope;
mod source;

pub use command::GetCommand;
pub use envelope::{EnvelopeLayout, XmlNode, parse_list_response};
pub use source::{GmpListSource, GmpTransport};

//! Core services.

mod pager;

pub use pager::PagerService;

//! Link-based containers.

pub mod slist;

pub use slist::SList;

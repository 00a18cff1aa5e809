//! Internal helpers shared across container families.

pub mod index_type;

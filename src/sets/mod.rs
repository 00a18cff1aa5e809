pub mod set;

pub use set::Set;

pub mod rb_tree;

pub use rb_tree::{NodeId, RbTree};

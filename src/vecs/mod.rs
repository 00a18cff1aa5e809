//! Index-addressed containers: the growable [`Array`] and the ring [`Deque`].

pub mod array;
pub mod deque;

pub use array::{Array, DEFAULT_CAPACITY};
pub use deque::Deque;

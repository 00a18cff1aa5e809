//! # Boxed Collections
//!
//! Generic containers that own boxed copies of their payloads and release them
//! through caller-supplied hooks.
//!
//! Every container is built with a [`Comparator`] (used for ordering or linear
//! search) and one [`Destructor`] per payload kind. Plain closures work for both.
//! Values the container discards on its own (`remove*`, in-place replacement,
//! teardown) go through the destructor; values handed back (`pop_*`, `take*`) do
//! not.
//!
//! ## Containers
//!
//! | Type | Shape | Ordering |
//! |------|-------|----------|
//! | [`Array`] | growable contiguous vector | insertion / index |
//! | [`Deque`] | growable ring buffer | insertion, both ends |
//! | [`SList`] | singly linked list | insertion / position |
//! | [`Set`] | red-black tree of keys | comparator, unique |
//! | [`Map`] | red-black tree of pairs | comparator, unique keys |
//!
//! All fallible operations return [`Result`] with the shared [`Error`] taxonomy.
//! Structural mutation during iteration is rejected at compile time because
//! iterators borrow the container.
//!
//! ## Examples
//!
//! ### Array
//!
//! ```rust
//! use boxed_collections::{Array, Error};
//!
//! let mut arr: Array<i32> = Array::with_capacity(2);
//! arr.push_back(10).unwrap();
//! arr.push_back(30).unwrap();
//! arr.insert_at(1, 20).unwrap();
//!
//! assert_eq!(arr.element_at(1), Ok(&20));
//! assert_eq!(arr.capacity(), 4);
//! assert_eq!(arr.element_at(9), Err(Error::IndexOutOfBound { index: 9, len: 3 }));
//! ```
//!
//! ### Deque
//!
//! ```rust
//! use boxed_collections::Deque;
//!
//! let mut q: Deque<&str> = Deque::with_capacity(2);
//! q.push_back("b").unwrap();
//! q.push_front("a").unwrap();
//! q.push_back("c").unwrap(); // grows and relinearizes
//!
//! assert_eq!(q.pop_front(), Ok("a"));
//! assert_eq!(q.iter().copied().collect::<Vec<_>>(), vec!["b", "c"]);
//! ```
//!
//! ### Map
//!
//! ```rust
//! use boxed_collections::{Error, Map};
//!
//! let mut pending: Map<String, u16> = Map::natural();
//! pending.insert("example.org".to_string(), 443).unwrap();
//!
//! assert_eq!(
//!     pending.insert("example.org".to_string(), 80),
//!     Err(Error::KeyDuplicate)
//! );
//! assert_eq!(pending.find(&"example.org".to_string()), Some(&443));
//! ```

// --- Module Declarations ---

pub mod error;
pub mod hooks;
pub mod iter;
pub mod lists;
pub mod maps;
pub mod object;
pub mod sets;
pub mod trees;
pub mod utils;
pub mod vecs;

// --- Re-exports ---

pub use error::{Error, Result};
pub use hooks::{Comparator, Destructor, DropValue, NaturalOrder};
pub use iter::{ReplaceCursor, Traversable};
pub use lists::SList;
pub use maps::Map;
pub use object::ObjectBox;
pub use sets::Set;
pub use trees::{NodeId, RbTree};
pub use utils::index_type::NodeIndex;
pub use vecs::{Array, DEFAULT_CAPACITY, Deque};

//! Error taxonomy shared by every container.
//!
//! Success is `Ok(..)`; every failure is one of the [`Error`] variants below.
//! A failing call never leaves a container half-updated: the observable state
//! is exactly the state before the call.

use core::fmt;
use std::collections::TryReserveError;

/// Failure returned by container operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Internal consistency failure (e.g. a broken tree invariant found by a check).
    Generic,
    /// The allocator refused to provide storage.
    Memory,
    /// There is no element to return (front/back of an empty container).
    ElementReturn,
    /// The container holds nothing to pop, or a cursor has not been positioned yet.
    NotInitialized,
    /// `index` is not addressable in a container of length `len`.
    IndexOutOfBound {
        /// Requested position.
        index: usize,
        /// Length at the time of the call.
        len: usize,
    },
    /// Positional insert past the end of a list.
    InsertFailed {
        /// Requested position.
        pos: usize,
        /// Length at the time of the call.
        len: usize,
    },
    /// An equal key is already present.
    KeyDuplicate,
    /// No entry compares equal to the key.
    KeyNotFound,
    /// Arguments are inconsistent with each other.
    InvalidInput,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Generic => write!(f, "container invariant violated"),
            Error::Memory => write!(f, "memory allocation failed"),
            Error::ElementReturn => write!(f, "no element to return"),
            Error::NotInitialized => write!(f, "container is empty"),
            Error::IndexOutOfBound { index, len } => {
                write!(f, "index {} out of bounds for length {}", index, len)
            }
            Error::InsertFailed { pos, len } => {
                write!(f, "cannot insert at position {} in list of length {}", pos, len)
            }
            Error::KeyDuplicate => write!(f, "key already present"),
            Error::KeyNotFound => write!(f, "key not found"),
            Error::InvalidInput => write!(f, "invalid input"),
        }
    }
}

impl std::error::Error for Error {}

impl From<TryReserveError> for Error {
    fn from(_: TryReserveError) -> Self {
        Error::Memory
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

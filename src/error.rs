// Copyright 2025 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// A [`Result`](core::result::Result) defaulting to the crate's [`Error`] type.
pub type Result<T = (), E = Error> = core::result::Result<T, E>;

/// The failure modes of a structural vector operation.
///
/// Every fallible operation offers the *strong guarantee*: when an error is returned, the vector
/// (and, for clone-on-write paths, the shared source block) is left exactly as it was before the
/// call. No partially-copied elements and no allocated blocks remain observable.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum Error {
	/// A heap block could not be allocated, or its size overflowed [`isize::MAX`] bytes.
	#[error("failed to allocate a block of {capacity} element slots")]
	Alloc {
		/// The element capacity requested from the allocator.
		capacity: usize,
	},
	/// An element copy reported failure while elements were being cloned.
	///
	/// Raised from [`TryClone::try_clone`](crate::TryClone::try_clone) and propagated unchanged.
	#[error("element copy failed")]
	Element,
}

impl Error {
	/// Escalates the error into a panic, for conversions documented as infallible.
	#[allow(clippy::panic)]
	#[cold]
	#[inline(never)]
	#[track_caller]
	pub(crate) fn handle(self) -> ! {
		match self {
			Self::Alloc { capacity } =>
				panic!("failed to allocate a block of {capacity} element slots"),
			Self::Element => panic!("element copy failed"),
		}
	}
}

// Copyright 2025 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

use core::mem::MaybeUninit;
use core::{ptr, slice};
use crate::clone::TryClone;
use crate::error::Result;

/// Fixed-size element storage embedded directly in the vector, with no heap allocation.
///
/// The buffer itself does not track which slots are initialized; the owning vector passes its
/// live-prefix length into every access. Slots within that prefix hold constructed elements,
/// slots past it are uninitialized memory. [`InlineBuf`] has no [`Drop`] implementation for the
/// same reason — the owner drops the prefix explicitly.
pub(crate) struct InlineBuf<T, const N: usize> {
	slots: [MaybeUninit<T>; N],
}

impl<T, const N: usize> InlineBuf<T, N> {
	pub(crate) const fn new() -> Self {
		Self { slots: [const { MaybeUninit::uninit() }; N] }
	}

	/// Clones a slice of at most `N` elements into a fresh buffer.
	///
	/// # Errors
	///
	/// Propagates the first failed element copy. Clones made before the failure are dropped; no
	/// partially-initialized buffer escapes.
	pub(crate) fn try_clone_from_slice(src: &[T]) -> Result<Self>
	where
		T: TryClone,
	{
		debug_assert!(src.len() <= N, "the slice should fit in the inline capacity");

		let mut buf = Self::new();
		for (index, value) in src.iter().enumerate() {
			match value.try_clone() {
				Ok(clone) => buf.slots[index] = MaybeUninit::new(clone),
				Err(error) => {
					// Roll back the clones made so far.
					// Safety: slots before `index` were just initialized.
					unsafe {
						buf.drop_prefix(index);
					}
					return Err(error)
				}
			}
		}
		Ok(buf)
	}

	pub(crate) const fn as_ptr(&self) -> *const T {
		self.slots.as_ptr().cast()
	}

	pub(crate) fn as_mut_ptr(&mut self) -> *mut T {
		self.slots.as_mut_ptr().cast()
	}

	/// Returns the initialized prefix as a slice.
	///
	/// # Safety
	///
	/// The first `len` slots must be initialized.
	pub(crate) unsafe fn as_slice(&self, len: usize) -> &[T] {
		debug_assert!(len <= N, "the length should be within the inline capacity");
		// Safety: the caller guarantees `len` initialized elements.
		unsafe {
			slice::from_raw_parts(self.as_ptr(), len)
		}
	}

	/// Returns the initialized prefix as a mutable slice.
	///
	/// # Safety
	///
	/// The first `len` slots must be initialized.
	pub(crate) unsafe fn as_mut_slice(&mut self, len: usize) -> &mut [T] {
		debug_assert!(len <= N, "the length should be within the inline capacity");
		// Safety: the caller guarantees `len` initialized elements.
		unsafe {
			slice::from_raw_parts_mut(self.as_mut_ptr(), len)
		}
	}

	/// Constructs `value` in the slot at `index`.
	///
	/// # Safety
	///
	/// `index` must be less than `N` and the slot must be uninitialized, or its current element
	/// is leaked.
	pub(crate) unsafe fn write(&mut self, index: usize, value: T) {
		self.slots[index] = MaybeUninit::new(value);
	}

	/// Moves the element at `index` out of the buffer, leaving the slot uninitialized.
	///
	/// # Safety
	///
	/// The slot at `index` must be initialized, and must not be read again.
	pub(crate) unsafe fn read(&mut self, index: usize) -> T {
		// Safety: the caller guarantees the slot is initialized.
		unsafe {
			self.slots[index].assume_init_read()
		}
	}

	/// Drops the elements in the first `len` slots, leaving them uninitialized.
	///
	/// # Safety
	///
	/// The first `len` slots must be initialized.
	pub(crate) unsafe fn drop_prefix(&mut self, len: usize) {
		// Safety: the caller guarantees `len` initialized elements.
		unsafe {
			ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.as_mut_ptr(), len));
		}
	}
}

// Copyright 2025 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

//! # Internal Layout
//!
//! A heap block is a single allocation holding a header followed by the element slots, exactly
//! equivalent to `Rc<(usize, [T])>` without the weak count:
//!
//! ```text
//!  0        8       16       24..
//! |--------|--------|--------|-------~
//! | strong |  cap   | length | slots..
//! |--------|--------|--------|-------~
//! ```
//!
//! `strong` counts the vectors holding a handle to the block. `length` tracks the initialized
//! element prefix so the last handle to drop can destroy the elements; while a block is shared,
//! every owner's length agrees with it by the read-only rule.

use alloc::alloc::{alloc, dealloc};
use core::alloc::Layout;
use core::cell::Cell;
use core::marker::PhantomData;
use core::ptr::NonNull;
use core::{ptr, slice};
use crate::clone::TryClone;
use crate::error::{Error, Result};

#[repr(C)]
struct Header {
	strong: Cell<usize>,
	capacity: usize,
	len: usize,
}

/// An owning handle to a reference-counted heap block of element slots.
///
/// Dropping a handle decrements the strong count; the handle that brings it to zero drops the
/// initialized elements and frees the allocation. Cloning elements *into* a block is only
/// permitted through a unique handle; a freshly allocated block is always unique, so a fallible
/// fill can rely on the handle's own [`Drop`] for rollback — populate a temporary block fully,
/// then install it.
pub(crate) struct HeapBuf<T> {
	ptr: NonNull<Header>,
	_marker: PhantomData<T>,
}

impl<T> HeapBuf<T> {
	/// Allocates a block of `capacity` uninitialized slots, with a strong count of one.
	///
	/// # Errors
	///
	/// Returns [`Error::Alloc`] if the allocator fails or the block size overflows
	/// [`isize::MAX`] bytes.
	pub(crate) fn allocate(capacity: usize) -> Result<Self> {
		debug_assert!(capacity >= 1, "heap blocks should hold at least one slot");

		let (layout, offset) = Self::layout(capacity)?;
		debug_assert_eq!(offset, Self::slots_offset(), "layout and projection should agree");

		// Safety: the layout has non-zero size, as it includes the header.
		let Some(ptr) = NonNull::new(unsafe { alloc(layout) }) else {
			return Err(Error::Alloc { capacity })
		};

		let ptr = ptr.cast::<Header>();
		// Safety: the block was just allocated and is exclusively owned.
		unsafe {
			ptr.write(Header {
				strong: Cell::new(1),
				capacity,
				len: 0,
			});
		}
		Ok(Self { ptr, _marker: PhantomData })
	}

	fn layout(capacity: usize) -> Result<(Layout, usize)> {
		let slots = Layout::array::<T>(capacity)
			.map_err(|_| Error::Alloc { capacity })?;
		let (layout, offset) = Layout::new::<Header>()
			.extend(slots)
			.map_err(|_| Error::Alloc { capacity })?;
		Ok((layout.pad_to_align(), offset))
	}

	/// Byte offset from the header to the first element slot, as computed by [`Layout::extend`].
	const fn slots_offset() -> usize {
		size_of::<Header>().next_multiple_of(align_of::<T>())
	}

	fn header(&self) -> &Header {
		// Safety: the pointer is valid for the lifetime of any handle.
		unsafe {
			self.ptr.as_ref()
		}
	}

	fn slots(&self) -> NonNull<T> {
		// Safety: the offset stays within the allocation.
		unsafe {
			self.ptr.cast::<u8>().add(Self::slots_offset()).cast()
		}
	}

	pub(crate) fn capacity(&self) -> usize {
		self.header().capacity
	}

	pub(crate) fn len(&self) -> usize {
		self.header().len
	}

	pub(crate) fn strong_count(&self) -> usize {
		self.header().strong.get()
	}

	pub(crate) fn is_unique(&self) -> bool {
		self.strong_count() == 1
	}

	/// Returns a new handle to the same block, incrementing the strong count.
	pub(crate) fn share(&self) -> Self {
		let strong = &self.header().strong;
		strong.set(strong.get() + 1);
		Self { ptr: self.ptr, _marker: PhantomData }
	}

	/// Records `len` slots as initialized.
	///
	/// # Safety
	///
	/// The handle must be unique, and the first `len` slots must hold initialized elements.
	pub(crate) unsafe fn set_len(&mut self, len: usize) {
		debug_assert!(len <= self.capacity(), "the length should be within capacity");
		// Safety: the header is valid, and no shared reference to `len` is live across this
		//  write.
		unsafe {
			(&raw mut (*self.ptr.as_ptr()).len).write(len);
		}
	}

	pub(crate) fn as_ptr(&self) -> *const T {
		self.slots().as_ptr()
	}

	pub(crate) fn as_mut_ptr(&mut self) -> *mut T {
		self.slots().as_ptr()
	}

	/// Returns the initialized prefix as a slice.
	///
	/// # Safety
	///
	/// The first `len` slots must be initialized.
	pub(crate) unsafe fn as_slice(&self, len: usize) -> &[T] {
		debug_assert!(len <= self.len(), "the length should be within the initialized prefix");
		// Safety: the caller guarantees `len` initialized elements.
		unsafe {
			slice::from_raw_parts(self.as_ptr(), len)
		}
	}

	/// Returns the initialized prefix as a mutable slice.
	///
	/// # Safety
	///
	/// The first `len` slots must be initialized, and the handle must be unique.
	pub(crate) unsafe fn as_mut_slice(&mut self, len: usize) -> &mut [T] {
		debug_assert!(len <= self.len(), "the length should be within the initialized prefix");
		debug_assert!(self.is_unique(), "mutable access requires a unique handle");
		// Safety: the caller guarantees `len` initialized elements and exclusivity.
		unsafe {
			slice::from_raw_parts_mut(self.as_mut_ptr(), len)
		}
	}

	/// Constructs `value` in the slot at `index`.
	///
	/// # Safety
	///
	/// `index` must be within capacity, the slot must be uninitialized, and the handle must be
	/// unique.
	pub(crate) unsafe fn write(&mut self, index: usize, value: T) {
		debug_assert!(index < self.capacity(), "the index should be within capacity");
		// Safety: upheld by the caller.
		unsafe {
			self.slots().add(index).write(value);
		}
	}

	/// Moves the element at `index` out of the block.
	///
	/// # Safety
	///
	/// The slot at `index` must be initialized, the handle must be unique, and the slot must not
	/// be read again.
	pub(crate) unsafe fn read(&mut self, index: usize) -> T {
		// Safety: upheld by the caller.
		unsafe {
			self.slots().add(index).read()
		}
	}

	/// Appends clones of `src` after the initialized prefix, advancing the recorded length one
	/// element at a time.
	///
	/// Used to populate freshly allocated blocks: if a copy fails midway, the clones made so far
	/// stay recorded in the length, and dropping the (unique) handle reclaims them along with the
	/// block.
	///
	/// # Errors
	///
	/// Propagates the first failed element copy.
	///
	/// # Safety
	///
	/// The handle must be unique, and `src` must fit in the remaining capacity.
	pub(crate) unsafe fn try_extend_from_slice(&mut self, src: &[T]) -> Result
	where
		T: TryClone,
	{
		debug_assert!(self.is_unique(), "filling a block requires a unique handle");
		debug_assert!(
			src.len() <= self.capacity() - self.len(),
			"the slice should fit in the remaining capacity",
		);

		let mut len = self.len();
		for value in src {
			let clone = value.try_clone()?;
			// Safety: `len` is within capacity and the slot past the prefix is uninitialized.
			//  Advancing the length after each write keeps rollback exact.
			unsafe {
				self.write(len, clone);
				len += 1;
				self.set_len(len);
			}
		}
		Ok(())
	}
}

impl<T> Drop for HeapBuf<T> {
	fn drop(&mut self) {
		let strong = &self.header().strong;
		let remaining = strong.get() - 1;
		strong.set(remaining);
		if remaining != 0 {
			// Other handles keep the block alive.
			return
		}

		struct DeallocGuard {
			ptr: *mut u8,
			layout: Layout,
		}

		impl Drop for DeallocGuard {
			fn drop(&mut self) {
				// Safety: `ptr` is currently allocated with `layout`.
				unsafe {
					dealloc(self.ptr, self.layout);
				}
			}
		}

		let Ok((layout, _)) = Self::layout(self.capacity()) else {
			// The layout was validated when the block was allocated.
			unreachable!()
		};

		// Free the block even if an element's drop panics.
		let _guard = DeallocGuard {
			ptr: self.ptr.cast().as_ptr(),
			layout,
		};

		let len = self.len();
		// Safety: this is the last handle, and `len` slots are initialized.
		unsafe {
			ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.slots().as_ptr(), len));
		}
	}
}

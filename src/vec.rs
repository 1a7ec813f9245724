// Copyright 2025 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

//! A growable vector that stores small contents inline and shares large contents
//! copy-on-write.
//!
//! See [`CowVec`] for details.

use core::fmt::{self, Debug, Formatter};
use core::hash::{Hash, Hasher};
use core::mem;
use core::ops::{Bound, Index, RangeBounds};
use core::slice::{self, SliceIndex};
use crate::clone::TryClone;
use crate::error::{Error, Result};
use crate::inline::InlineBuf;
use crate::raw::HeapBuf;

mod eq;

/// The two storage modes of a vector. Exactly one is live at a time; the vector's length is held
/// outside, as both buffers track only capacity.
enum Repr<T, const N: usize> {
	/// Up to `N` elements embedded in the vector itself. Always exclusively owned.
	Inline(InlineBuf<T, N>),
	/// A handle to a reference-counted heap block. Read-only while any other vector holds a
	/// handle to the same block.
	Heap(HeapBuf<T>),
}

/// A growable vector with an inline buffer of `N` elements and copy-on-write shared heap
/// storage beyond it.
///
/// A vector is born empty and inline, holding its first `N` elements without any allocation. The
/// push that exceeds `N` *promotes* it to a heap block. Cloning the vector through
/// [`TryClone`] is cheap in both modes: small contents (`len <= N`) are deep-copied back into
/// inline storage — regardless of the source's current mode — while large contents share the heap
/// block in *O*(1) by bumping its reference count.
///
/// # Mutability Rules
///
/// A shared heap block is read-only to every vector referencing it. Read accessors ([`as_slice`],
/// [`get`], [`iter`], indexing) never resolve ownership and never allocate. Mutating operations
/// first make the vector the *unique* owner of its storage: if the block is shared, it is cloned
/// into a fresh exclusive block before any write — clone-on-write. All such operations are
/// fallible, named `try_*`, and offer the strong guarantee: on error, the vector and any shared
/// source block are left exactly as they were.
///
/// The reference count is non-atomic. Sharing is a copy-elision optimization for sequential use;
/// the type is neither [`Send`] nor [`Sync`].
///
/// [`as_slice`]: Self::as_slice
/// [`get`]: Self::get
/// [`iter`]: Self::iter
///
/// # Examples
///
/// ```
/// use cowvec::{CowVec, TryClone};
///
/// let mut vec: CowVec<i32, 4> = CowVec::new();
/// for i in 1..=5 {
/// 	vec.try_push(i)?;
/// }
///
/// // The fifth push spilled to the heap.
/// assert!(!vec.is_inline());
///
/// // Clones share the heap block until one of them is written to.
/// let mut copy = vec.try_clone()?;
/// assert_eq!(vec.strong_count(), 2);
/// copy.try_push(6)?;
/// assert_eq!(vec, [1, 2, 3, 4, 5]);
/// assert_eq!(copy, [1, 2, 3, 4, 5, 6]);
/// assert_eq!(vec.strong_count(), 1);
/// # Ok::<_, cowvec::Error>(())
/// ```
pub struct CowVec<T, const N: usize> {
	len: usize,
	repr: Repr<T, N>,
}

#[allow(clippy::panic)]
#[cold]
#[inline(never)]
#[track_caller]
fn insert_assert_failed(index: usize, len: usize) -> ! {
	panic!("insertion index (is {index}) should be <= len (is {len})");
}

#[allow(clippy::panic)]
#[cold]
#[inline(never)]
#[track_caller]
fn remove_assert_failed(index: usize, len: usize) -> ! {
	panic!("removal index (is {index}) should be < len (is {len})");
}

#[allow(clippy::panic)]
#[cold]
#[inline(never)]
#[track_caller]
fn range_assert_failed(start: usize, end: usize, len: usize) -> ! {
	panic!("erase range (is {start}..{end}) should be within len (is {len})");
}

#[allow(clippy::panic)]
#[cold]
#[inline(never)]
#[track_caller]
fn range_overflow_failed() -> ! {
	panic!("erase range exceeds usize::MAX");
}

#[track_caller]
fn normalize_range<R: RangeBounds<usize>>(range: R, len: usize) -> (usize, usize) {
	// Half-open bounds on exclusive-start and inclusive-end ranges sit one past the named
	// index, which has no representation when it is `usize::MAX`.
	let start = match range.start_bound() {
		Bound::Included(&start) => start,
		Bound::Excluded(&start) =>
			start.checked_add(1).unwrap_or_else(|| range_overflow_failed()),
		Bound::Unbounded => 0,
	};
	let end = match range.end_bound() {
		Bound::Included(&end) =>
			end.checked_add(1).unwrap_or_else(|| range_overflow_failed()),
		Bound::Excluded(&end) => end,
		Bound::Unbounded => len,
	};

	if start > end || end > len {
		range_assert_failed(start, end, len);
	}
	(start, end)
}

fn grow_capacity(capacity: usize) -> Result<usize> {
	// Geometric growth, always producing at least one free slot.
	capacity
		.checked_mul(2)
		.and_then(|doubled| doubled.checked_add(1))
		.ok_or(Error::Alloc { capacity: usize::MAX })
}

impl<T, const N: usize> CowVec<T, N> {
	/// The number of elements the vector holds without allocating.
	pub const INLINE_CAPACITY: usize = N;

	/// Creates a new, empty vector. No memory is allocated until the length exceeds `N`.
	///
	/// # Examples
	///
	/// ```
	/// use cowvec::CowVec;
	///
	/// let vec: CowVec<i32, 8> = CowVec::new();
	/// assert!(vec.is_empty());
	/// assert!(vec.is_inline());
	/// assert_eq!(vec.capacity(), 8);
	/// ```
	#[must_use]
	pub const fn new() -> Self {
		Self { len: 0, repr: Repr::Inline(InlineBuf::new()) }
	}

	/// Clones the contents of a slice into a new vector.
	///
	/// The copy lands inline when the slice fits, and otherwise in a heap block of capacity
	/// equal to the slice length.
	///
	/// # Errors
	///
	/// Returns an error if a heap block cannot be allocated, or if an element copy fails. No
	/// clones survive a failure.
	pub fn try_from_slice(slice: &[T]) -> Result<Self>
	where
		T: TryClone,
	{
		if slice.len() <= N {
			let inline = InlineBuf::try_clone_from_slice(slice)?;
			return Ok(Self { len: slice.len(), repr: Repr::Inline(inline) })
		}

		let mut heap = HeapBuf::allocate(slice.len())?;
		// Safety: the block is unique and sized for the slice.
		unsafe {
			heap.try_extend_from_slice(slice)?;
		}
		Ok(Self { len: slice.len(), repr: Repr::Heap(heap) })
	}

	/// Returns the number of elements in the vector.
	pub const fn len(&self) -> usize {
		self.len
	}

	/// Returns `true` if the vector contains no elements.
	pub const fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Returns the total number of elements the vector can hold without reallocating: `N` while
	/// inline, otherwise the capacity of its heap block.
	pub fn capacity(&self) -> usize {
		match &self.repr {
			Repr::Inline(_) => N,
			Repr::Heap(buf) => buf.capacity(),
		}
	}

	/// Returns `true` if the elements are stored inline, embedded in the vector itself.
	pub fn is_inline(&self) -> bool {
		matches!(self.repr, Repr::Inline(_))
	}

	/// Returns the number of vectors referencing this vector's storage, `1` when inline.
	///
	/// # Examples
	///
	/// ```
	/// use cowvec::{CowVec, TryClone};
	///
	/// let vec: CowVec<i32, 2> = CowVec::from([1, 2, 3]);
	/// let clone = vec.try_clone()?;
	/// assert_eq!(vec.strong_count(), 2);
	/// # Ok::<_, cowvec::Error>(())
	/// ```
	pub fn strong_count(&self) -> usize {
		match &self.repr {
			Repr::Inline(_) => 1,
			Repr::Heap(buf) => buf.strong_count(),
		}
	}

	/// Returns `true` if this vector is the only owner of its storage, allowing modification
	/// without cloning.
	pub fn is_unique(&self) -> bool {
		self.strong_count() == 1
	}

	/// Returns `true` if this vector's heap block is also referenced by another vector, making
	/// it read-only until [resolved](Self::try_unshare).
	pub fn is_shared(&self) -> bool {
		!self.is_unique()
	}

	/// Returns a slice over the vector contents.
	///
	/// Never resolves ownership and never allocates.
	pub fn as_slice(&self) -> &[T] {
		let len = self.len;
		match &self.repr {
			// Safety: elements within `len` are initialized.
			Repr::Inline(buf) => unsafe { buf.as_slice(len) },
			// Safety: as above; shared reads are always permitted.
			Repr::Heap(buf) => unsafe { buf.as_slice(len) },
		}
	}

	/// Returns a reference to an element or subslice, or `None` if out of bounds.
	pub fn get<I: SliceIndex<[T]>>(&self, index: I) -> Option<&I::Output> {
		self.as_slice().get(index)
	}

	/// Returns a reference to the first element, or `None` if the vector is empty.
	pub fn front(&self) -> Option<&T> {
		self.as_slice().first()
	}

	/// Returns a reference to the last element, or `None` if the vector is empty.
	pub fn back(&self) -> Option<&T> {
		self.as_slice().last()
	}

	/// Returns an iterator over the vector contents.
	pub fn iter(&self) -> slice::Iter<'_, T> {
		self.as_slice().iter()
	}

	/// Exchanges the full contents and storage of two vectors.
	///
	/// Constant-time in every mode combination: storage handles, inline buffers, lengths, and
	/// modes move wholesale. Reference counts stay attached to their blocks.
	///
	/// # Examples
	///
	/// ```
	/// use cowvec::CowVec;
	///
	/// let mut a: CowVec<i32, 2> = CowVec::from([1, 2]);
	/// let mut b: CowVec<i32, 2> = CowVec::from([3, 4, 5]);
	/// a.swap(&mut b);
	///
	/// assert_eq!(a, [3, 4, 5]);
	/// assert_eq!(b, [1, 2]);
	/// ```
	pub fn swap(&mut self, other: &mut Self) {
		mem::swap(self, other);
	}

	/// Returns the mutable contents without resolving ownership.
	///
	/// # Safety
	///
	/// The storage must be exclusively owned.
	unsafe fn mut_slice_unchecked(&mut self) -> &mut [T] {
		let len = self.len;
		match &mut self.repr {
			// Safety: elements within `len` are initialized; the caller guarantees exclusivity.
			Repr::Inline(buf) => unsafe { buf.as_mut_slice(len) },
			// Safety: as above.
			Repr::Heap(buf) => unsafe { buf.as_mut_slice(len) },
		}
	}

	/// Appends an element without checking capacity or ownership.
	///
	/// # Safety
	///
	/// The storage must be exclusively owned, with a free slot past the length.
	unsafe fn push_unchecked(&mut self, value: T) {
		let len = self.len;
		match &mut self.repr {
			Repr::Inline(buf) =>
				// Safety: upheld by the caller.
				unsafe {
					buf.write(len, value);
				},
			Repr::Heap(buf) =>
				// Safety: upheld by the caller.
				unsafe {
					buf.write(len, value);
					buf.set_len(len + 1);
				},
		}
		self.len = len + 1;
	}

	/// Moves the last element out of the vector.
	///
	/// # Safety
	///
	/// The vector must be non-empty and its storage exclusively owned.
	unsafe fn pop_unchecked(&mut self) -> T {
		let len = self.len - 1;
		self.len = len;
		match &mut self.repr {
			// Safety: the slot at `len` holds the last element, now past the length.
			Repr::Inline(buf) => unsafe { buf.read(len) },
			// Safety: as above; the recorded length shrinks before the move.
			Repr::Heap(buf) => unsafe {
				buf.set_len(len);
				buf.read(len)
			},
		}
	}

	/// Drops the elements at `[new_len, len)` and commits the new length.
	///
	/// # Safety
	///
	/// The storage must be exclusively owned, and `new_len` must not exceed the length.
	unsafe fn truncate_unchecked(&mut self, new_len: usize) {
		debug_assert!(new_len <= self.len, "the new length should not exceed the length");

		let count = self.len - new_len;
		if count == 0 {
			return
		}

		// Commit the length before dropping, in case an element's drop panics.
		self.len = new_len;
		let tail = match &mut self.repr {
			Repr::Inline(buf) =>
				// Safety: the dropped tail is within the initialized prefix.
				unsafe {
					buf.as_mut_ptr().add(new_len)
				},
			Repr::Heap(buf) =>
				// Safety: as above; the recorded length shrinks first for the same reason.
				unsafe {
					buf.set_len(new_len);
					buf.as_mut_ptr().add(new_len)
				},
		};
		// Safety: `count` initialized elements start at `tail`.
		unsafe {
			core::ptr::drop_in_place(core::ptr::slice_from_raw_parts_mut(tail, count));
		}
	}

	/// Installs new storage, releasing the old: inline elements are dropped in place, a heap
	/// handle is dropped — freeing the block only if no other vector shares it.
	fn replace_storage(&mut self, repr: Repr<T, N>) {
		match mem::replace(&mut self.repr, repr) {
			Repr::Inline(mut buf) =>
				// Safety: `self.len` elements were initialized in the replaced buffer.
				unsafe {
					buf.drop_prefix(self.len);
				},
			Repr::Heap(_) => {}
		}
	}
}

impl<T: TryClone, const N: usize> CowVec<T, N> {
	/// Makes this vector the exclusive owner of its storage, cloning a shared heap block.
	///
	/// This is the clone-on-write gate every mutating operation passes through. Inline storage
	/// and unshared blocks need no work. A shared block is cloned at equal capacity into a fresh
	/// block; the old block keeps serving its other owners, with its reference count decremented.
	///
	/// # Errors
	///
	/// Returns an error if the replacement block cannot be allocated or an element copy fails.
	/// On failure this vector still shares the original block, unchanged.
	pub fn try_unshare(&mut self) -> Result {
		let Repr::Heap(buf) = &self.repr else { return Ok(()) };
		if buf.is_unique() {
			return Ok(())
		}

		let mut copy = HeapBuf::allocate(buf.capacity())?;
		// Safety: `copy` is freshly allocated, unique, and sized for the contents. If a clone
		//  fails, dropping `copy` reclaims the partial contents and the block.
		unsafe {
			copy.try_extend_from_slice(buf.as_slice(self.len))?;
		}
		// Dropping the old handle releases this vector's share without disturbing the other
		// owners.
		self.repr = Repr::Heap(copy);
		Ok(())
	}

	/// Returns a mutable slice over the vector contents, resolving ownership first.
	///
	/// # Errors
	///
	/// Returns an error if resolving ownership of a shared block fails; see
	/// [`try_unshare`](Self::try_unshare).
	pub fn try_as_mut_slice(&mut self) -> Result<&mut [T]> {
		self.try_unshare()?;
		// Safety: ownership was resolved above.
		Ok(unsafe { self.mut_slice_unchecked() })
	}

	/// Returns a mutable reference to an element or subslice, or `None` if out of bounds.
	///
	/// Ownership is resolved before indexing, whether or not the index is in bounds.
	///
	/// # Errors
	///
	/// Returns an error if resolving ownership of a shared block fails.
	pub fn try_get_mut<I: SliceIndex<[T]>>(&mut self, index: I) -> Result<Option<&mut I::Output>> {
		Ok(self.try_as_mut_slice()?.get_mut(index))
	}

	/// Returns a mutable reference to the first element, or `None` if the vector is empty.
	///
	/// # Errors
	///
	/// Returns an error if resolving ownership of a shared block fails.
	pub fn try_front_mut(&mut self) -> Result<Option<&mut T>> {
		Ok(self.try_as_mut_slice()?.first_mut())
	}

	/// Returns a mutable reference to the last element, or `None` if the vector is empty.
	///
	/// # Errors
	///
	/// Returns an error if resolving ownership of a shared block fails.
	pub fn try_back_mut(&mut self) -> Result<Option<&mut T>> {
		Ok(self.try_as_mut_slice()?.last_mut())
	}

	/// Returns a mutable iterator over the vector contents, resolving ownership first.
	///
	/// Resolving ownership may relocate the elements, so this iterator must not be assumed to
	/// visit the same addresses [`iter`](Self::iter) would have.
	///
	/// # Errors
	///
	/// Returns an error if resolving ownership of a shared block fails.
	pub fn try_iter_mut(&mut self) -> Result<slice::IterMut<'_, T>> {
		Ok(self.try_as_mut_slice()?.iter_mut())
	}

	/// Appends an element to the back of the vector.
	///
	/// While inline with spare slots, or uniquely heap-backed with spare capacity, this writes
	/// in place. The push past the inline capacity promotes the vector to a heap block of
	/// capacity `2 * len + 1`; a full block grows the same way to `2 * capacity + 1`. When the
	/// block is shared, ownership is resolved first — and if it is shared *and* full, the clone
	/// and the growth are merged into a single allocation.
	///
	/// # Errors
	///
	/// Returns an error if a block cannot be allocated or a copy of an existing element fails.
	/// The vector is unchanged on failure; `value` is dropped.
	///
	/// # Examples
	///
	/// ```
	/// use cowvec::CowVec;
	///
	/// let mut vec: CowVec<i32, 4> = CowVec::new();
	/// for i in 1..=4 {
	/// 	vec.try_push(i)?;
	/// }
	/// assert!(vec.is_inline());
	///
	/// vec.try_push(5)?;
	/// assert!(!vec.is_inline());
	/// assert_eq!(vec.capacity(), 9);
	/// assert_eq!(vec, [1, 2, 3, 4, 5]);
	/// # Ok::<_, cowvec::Error>(())
	/// ```
	pub fn try_push(&mut self, value: T) -> Result {
		let len = self.len;
		match &mut self.repr {
			Repr::Inline(buf) if len < N => {
				// Safety: slot `len` is within the inline capacity and uninitialized.
				unsafe {
					buf.write(len, value);
				}
				self.len = len + 1;
				return Ok(())
			}
			Repr::Heap(buf) if buf.is_unique() && len < buf.capacity() => {
				// Safety: the handle is unique and slot `len` is within capacity.
				unsafe {
					buf.write(len, value);
					buf.set_len(len + 1);
				}
				self.len = len + 1;
				return Ok(())
			}
			_ => {}
		}

		if let Repr::Heap(buf) = &self.repr {
			if len < buf.capacity() {
				// Shared block with slack: resolve ownership, then append in place.
				self.try_unshare()?;
				// Safety: the vector was just made exclusive, with room to spare.
				unsafe {
					self.push_unchecked(value);
				}
				return Ok(())
			}
		}

		// Storage is full: promote inline contents to a heap block, or grow the block. A shared
		// full block is cloned and grown in the same allocation.
		let capacity = grow_capacity(self.capacity())?;
		self.grow_push(value, capacity)
	}

	/// Copies the current elements and `value` into a fresh block of the given capacity, then
	/// releases the old storage.
	fn grow_push(&mut self, value: T, capacity: usize) -> Result {
		let mut grown = HeapBuf::allocate(capacity)?;
		// Safety: the new block is unique and sized past the current length. The move of `value`
		//  cannot fail, and the block is fully populated before the old storage is released.
		unsafe {
			grown.try_extend_from_slice(self.as_slice())?;
			grown.write(self.len, value);
			grown.set_len(self.len + 1);
		}
		self.replace_storage(Repr::Heap(grown));
		self.len += 1;
		Ok(())
	}

	/// Removes and returns the last element from the vector, or `None` if it is empty.
	///
	/// # Errors
	///
	/// Returns an error if resolving ownership of a shared block fails; the vector is unchanged.
	///
	/// # Examples
	///
	/// ```
	/// use cowvec::CowVec;
	///
	/// let mut vec: CowVec<i32, 2> = CowVec::from([1, 2]);
	/// assert_eq!(vec.try_pop(), Ok(Some(2)));
	/// assert_eq!(vec.try_pop(), Ok(Some(1)));
	/// assert_eq!(vec.try_pop(), Ok(None));
	/// ```
	pub fn try_pop(&mut self) -> Result<Option<T>> {
		if self.is_empty() {
			return Ok(None)
		}

		self.try_unshare()?;

		// Safety: ownership was resolved, and the vector is not empty.
		Ok(Some(unsafe { self.pop_unchecked() }))
	}

	/// Inserts an element at position `index`, shifting all subsequent elements to the right,
	/// and returns a reference to its slot.
	///
	/// The element is appended through [`try_push`](Self::try_push), inheriting its growth and
	/// ownership behavior, then the tail is rotated to carry it into place.
	///
	/// # Errors
	///
	/// Returns an error under the same conditions as [`try_push`](Self::try_push); the vector is
	/// unchanged and `value` is dropped.
	///
	/// # Panics
	///
	/// Panics if `index` is greater than the vector length.
	///
	/// # Examples
	///
	/// ```
	/// use cowvec::CowVec;
	///
	/// let mut vec: CowVec<char, 4> = CowVec::from(['a', 'c']);
	/// vec.try_insert(1, 'b')?;
	/// assert_eq!(vec, ['a', 'b', 'c']);
	/// vec.try_insert(3, 'd')?;
	/// assert_eq!(vec, ['a', 'b', 'c', 'd']);
	/// # Ok::<_, cowvec::Error>(())
	/// ```
	///
	/// # Time complexity
	///
	/// Takes at most *O*(*n*) time, as all elements after `index` must be shifted.
	pub fn try_insert(&mut self, index: usize, value: T) -> Result<&mut T> {
		if index > self.len {
			insert_assert_failed(index, self.len);
		}

		self.try_push(value)?;

		// Safety: a successful push always leaves the storage exclusively owned.
		let slice = unsafe { self.mut_slice_unchecked() };
		slice[index..].rotate_right(1);
		Ok(&mut slice[index])
	}

	/// Removes and returns the element at position `index`, shifting all subsequent elements to
	/// the left.
	///
	/// # Errors
	///
	/// Returns an error if resolving ownership of a shared block fails; the vector is unchanged.
	///
	/// # Panics
	///
	/// Panics if `index` is out of bounds.
	///
	/// # Examples
	///
	/// ```
	/// use cowvec::CowVec;
	///
	/// let mut vec: CowVec<i32, 4> = CowVec::from([1, 2, 3]);
	/// assert_eq!(vec.try_remove(1), Ok(2));
	/// assert_eq!(vec, [1, 3]);
	/// ```
	///
	/// # Time complexity
	///
	/// Takes at most *O*(*n*) time, as all elements after `index` must be shifted.
	pub fn try_remove(&mut self, index: usize) -> Result<T> {
		if index >= self.len {
			remove_assert_failed(index, self.len);
		}

		self.try_unshare()?;

		// Safety: ownership was resolved; the rotation moves the removed element to the end,
		//  where it is popped without disturbing its neighbors.
		unsafe {
			self.mut_slice_unchecked()[index..].rotate_left(1);
			Ok(self.pop_unchecked())
		}
	}

	/// Removes the elements in the given range, shifting all subsequent elements to the left.
	///
	/// Ownership is resolved once up front; the tail is then shifted over the vacated slots and
	/// the trailing duplicates are dropped.
	///
	/// # Errors
	///
	/// Returns an error if resolving ownership of a shared block fails; the vector is unchanged.
	///
	/// # Panics
	///
	/// Panics if the range is inverted or ends out of bounds.
	///
	/// # Examples
	///
	/// ```
	/// use cowvec::CowVec;
	///
	/// let mut vec: CowVec<i32, 2> = CowVec::from([1, 2, 3, 4, 5]);
	/// vec.try_erase(1..3)?;
	/// assert_eq!(vec, [1, 4, 5]);
	/// # Ok::<_, cowvec::Error>(())
	/// ```
	pub fn try_erase<R: RangeBounds<usize>>(&mut self, range: R) -> Result {
		let (start, end) = normalize_range(range, self.len);

		self.try_unshare()?;

		let count = end - start;
		if count == 0 {
			return Ok(())
		}

		// Safety: ownership was resolved; the rotation moves the erased elements to the end,
		//  where the truncation drops them.
		unsafe {
			self.mut_slice_unchecked()[start..].rotate_left(count);
			self.truncate_unchecked(self.len - count);
		}
		Ok(())
	}

	/// Removes all elements, keeping the allocated capacity.
	///
	/// A shared block is released and replaced by a fresh, empty block of equal capacity, so the
	/// other owners never observe the removal.
	///
	/// # Errors
	///
	/// Returns an error if the replacement block cannot be allocated; the vector is unchanged.
	pub fn try_clear(&mut self) -> Result {
		if let Repr::Heap(buf) = &self.repr {
			if !buf.is_unique() {
				// The contents are about to be destroyed, so resolving ownership does not
				// require cloning them.
				let fresh = HeapBuf::allocate(buf.capacity())?;
				self.repr = Repr::Heap(fresh);
				self.len = 0;
				return Ok(())
			}
		}

		// Safety: inline storage and unshared blocks are exclusively owned.
		unsafe {
			self.truncate_unchecked(0);
		}
		Ok(())
	}

	/// Reserves capacity for at least `capacity` elements in total.
	///
	/// If the current capacity suffices, this only resolves ownership. Otherwise the contents
	/// are copied into an exclusive heap block of capacity exactly `capacity`, even from inline
	/// storage.
	///
	/// # Errors
	///
	/// Returns an error if the block cannot be allocated or an element copy fails; the vector is
	/// unchanged.
	pub fn try_reserve(&mut self, capacity: usize) -> Result {
		if capacity <= self.capacity() {
			return self.try_unshare()
		}

		let mut grown = HeapBuf::allocate(capacity)?;
		// Safety: the new block is unique and larger than the current length.
		unsafe {
			grown.try_extend_from_slice(self.as_slice())?;
		}
		self.replace_storage(Repr::Heap(grown));
		Ok(())
	}

	/// Reduces the capacity to the smallest that holds the current contents.
	///
	/// Contents fitting the inline buffer are compacted back into it, releasing the heap block
	/// entirely. Larger contents are copied into an exact-capacity block. Inline vectors and
	/// full blocks are left as they are.
	///
	/// # Errors
	///
	/// Returns an error if the block cannot be allocated or an element copy fails; the vector
	/// (and its original block) is unchanged.
	///
	/// # Examples
	///
	/// ```
	/// use cowvec::CowVec;
	///
	/// let mut vec: CowVec<i32, 4> = CowVec::from([1, 2, 3, 4, 5]);
	/// vec.try_erase(2..)?;
	/// vec.try_shrink_to_fit()?;
	///
	/// assert!(vec.is_inline());
	/// assert_eq!(vec, [1, 2]);
	/// # Ok::<_, cowvec::Error>(())
	/// ```
	pub fn try_shrink_to_fit(&mut self) -> Result {
		let len = self.len;
		let Repr::Heap(buf) = &self.repr else { return Ok(()) };
		if len == buf.capacity() {
			return Ok(())
		}

		if len <= N {
			// Compact back into inline storage. The copy completes before the handle is
			// released, so a failure leaves the block untouched.
			// Safety: `len` elements are initialized.
			let inline = InlineBuf::try_clone_from_slice(unsafe { buf.as_slice(len) })?;
			self.repr = Repr::Inline(inline);
			return Ok(())
		}

		let mut exact = HeapBuf::allocate(len)?;
		// Safety: the new block is unique, with capacity equal to the length.
		unsafe {
			exact.try_extend_from_slice(buf.as_slice(len))?;
		}
		self.repr = Repr::Heap(exact);
		Ok(())
	}

	/// Replaces the contents of this vector with a copy of `source`, releasing the current
	/// contents.
	///
	/// The copy follows the [`TryClone`] rules: small contents are deep-copied inline, large
	/// contents share `source`'s block. The copy is completed before the old storage is released,
	/// so a failure leaves this vector untouched. Aliasing is a non-issue; the borrow rules rule
	/// out assigning a vector to itself.
	///
	/// # Errors
	///
	/// Returns an error under the same conditions as [`try_clone`](TryClone::try_clone); this
	/// vector is unchanged.
	pub fn try_clone_from(&mut self, source: &Self) -> Result {
		*self = source.try_clone()?;
		Ok(())
	}

	/// Appends clones of the slice's elements to the back of the vector.
	///
	/// # Errors
	///
	/// Returns an error if a block cannot be allocated or an element copy fails. The vector is
	/// unchanged on failure: clones appended in place before the failing one are rolled back.
	pub fn try_extend_from_slice(&mut self, other: &[T]) -> Result {
		let Some(required) = self.len.checked_add(other.len()) else {
			return Err(Error::Alloc { capacity: usize::MAX })
		};

		if required <= self.capacity() {
			self.try_unshare()?;
			let start = self.len;
			for value in other {
				match value.try_clone() {
					// Safety: ownership was resolved and capacity checked above.
					Ok(clone) => unsafe {
						self.push_unchecked(clone);
					},
					Err(error) => {
						// Roll back the clones appended so far.
						// Safety: the vector is exclusively owned.
						unsafe {
							self.truncate_unchecked(start);
						}
						return Err(error)
					}
				}
			}
			return Ok(())
		}

		// Build the result in a fresh block, then commit.
		let mut grown = HeapBuf::allocate(required)?;
		// Safety: the new block is unique and sized for both slices.
		unsafe {
			grown.try_extend_from_slice(self.as_slice())?;
			grown.try_extend_from_slice(other)?;
		}
		self.replace_storage(Repr::Heap(grown));
		self.len = required;
		Ok(())
	}
}

impl<T: TryClone, const N: usize> TryClone for CowVec<T, N> {
	/// Copies the vector.
	///
	/// Contents fitting the inline buffer are deep-copied into an inline vector, regardless of
	/// the source's storage mode. Larger contents share the source's heap block in *O*(1),
	/// without touching any element.
	///
	/// # Errors
	///
	/// Returns an error if an element copy fails on the deep-copy path; no clones survive. The
	/// sharing path cannot fail.
	fn try_clone(&self) -> Result<Self> {
		if self.len <= N {
			let inline = InlineBuf::try_clone_from_slice(self.as_slice())?;
			return Ok(Self { len: self.len, repr: Repr::Inline(inline) })
		}

		let Repr::Heap(buf) = &self.repr else {
			// More elements than inline slots can only live in a heap block.
			unreachable!()
		};
		Ok(Self { len: self.len, repr: Repr::Heap(buf.share()) })
	}
}

impl<T, const N: usize> Drop for CowVec<T, N> {
	fn drop(&mut self) {
		match &mut self.repr {
			Repr::Inline(buf) =>
				// Safety: `self.len` elements are initialized.
				unsafe {
					buf.drop_prefix(self.len);
				},
			// The handle's drop releases this vector's share, freeing the block and its
			// elements only if no other vector references it.
			Repr::Heap(_) => {}
		}
	}
}

impl<T, const N: usize> Default for CowVec<T, N> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T, const N: usize, const M: usize> From<[T; M]> for CowVec<T, N> {
	/// Moves the array's elements into a vector: inline when `M` fits, otherwise into a heap
	/// block of capacity exactly `M`.
	///
	/// # Panics
	///
	/// Panics if the heap block cannot be allocated.
	fn from(array: [T; M]) -> Self {
		if M <= N {
			let mut buf = InlineBuf::new();
			for (index, value) in array.into_iter().enumerate() {
				// Safety: `index` is within the inline capacity and the slot is fresh.
				unsafe {
					buf.write(index, value);
				}
			}
			return Self { len: M, repr: Repr::Inline(buf) }
		}

		let mut heap = match HeapBuf::allocate(M) {
			Ok(buf) => buf,
			Err(error) => error.handle(),
		};
		for (index, value) in array.into_iter().enumerate() {
			// Safety: the block is unique with capacity `M`; moves cannot fail.
			unsafe {
				heap.write(index, value);
			}
		}
		// Safety: all `M` slots were just initialized.
		unsafe {
			heap.set_len(M);
		}
		Self { len: M, repr: Repr::Heap(heap) }
	}
}

impl<T: Debug, const N: usize> Debug for CowVec<T, N> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		Debug::fmt(self.as_slice(), f)
	}
}

impl<T: Hash, const N: usize> Hash for CowVec<T, N> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.as_slice().hash(state);
	}
}

impl<T, const N: usize, I: SliceIndex<[T]>> Index<I> for CowVec<T, N> {
	type Output = I::Output;

	fn index(&self, index: I) -> &I::Output {
		&self.as_slice()[index]
	}
}

impl<'a, T, const N: usize> IntoIterator for &'a CowVec<T, N> {
	type Item = &'a T;
	type IntoIter = slice::Iter<'a, T>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

#[test]
fn push_to_shared_full_block_clones_and_grows() {
	let mut vec = CowVec::<i32, 2>::from([1, 2, 3]);
	let Ok(sibling) = vec.try_clone() else { unreachable!() };

	assert_eq!(vec.try_push(4), Ok(()));
	assert_eq!(vec, [1, 2, 3, 4]);
	assert_eq!(sibling, [1, 2, 3]);
	assert!(vec.is_unique());
	assert!(sibling.is_unique());
}

// Copyright 2025 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

use cowvec::CowVec;

#[test]
fn new_vector_is_empty_and_inline() {
	let vec: CowVec<i32, 4> = CowVec::new();
	assert!(vec.is_empty());
	assert_eq!(vec.len(), 0);
	assert!(vec.is_inline());
	assert!(vec.is_unique());
	assert_eq!(vec.capacity(), 4);
	assert_eq!(vec.strong_count(), 1);
}

#[test]
fn push_within_inline_capacity_does_not_allocate() {
	let mut vec: CowVec<i32, 4> = CowVec::new();
	for i in 1..=4 {
		vec.try_push(i).unwrap();
		assert!(vec.is_inline());
	}
	assert_eq!(vec, [1, 2, 3, 4]);
	assert_eq!(vec.capacity(), 4);
}

#[test]
fn push_past_inline_capacity_promotes_to_heap() {
	let mut vec: CowVec<i32, 4> = CowVec::new();
	for i in 1..=5 {
		vec.try_push(i).unwrap();
	}
	assert!(!vec.is_inline());
	assert_eq!(vec.capacity(), 9);
	assert_eq!(vec, [1, 2, 3, 4, 5]);
}

#[test]
fn push_grows_full_heap_block() {
	let mut vec: CowVec<i32, 0> = CowVec::new();
	let mut capacities = Vec::new();
	for i in 0..8 {
		if vec.len() == vec.capacity() {
			capacities.push(vec.capacity());
		}
		vec.try_push(i).unwrap();
	}
	// Each growth step doubles and adds one.
	assert_eq!(capacities, [0, 1, 3, 7]);
	assert_eq!(vec, [0, 1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn pop_returns_elements_in_reverse() {
	let mut vec: CowVec<i32, 2> = CowVec::from([1, 2, 3]);
	assert_eq!(vec.try_pop(), Ok(Some(3)));
	assert_eq!(vec.try_pop(), Ok(Some(2)));
	assert_eq!(vec.try_pop(), Ok(Some(1)));
	assert_eq!(vec.try_pop(), Ok(None));
	// Popping never shrinks storage.
	assert!(!vec.is_inline());
}

#[test]
fn insert_shifts_subsequent_elements() {
	let mut vec: CowVec<char, 8> = CowVec::from(['a', 'd']);
	vec.try_insert(1, 'b').unwrap();
	vec.try_insert(2, 'c').unwrap();
	vec.try_insert(0, '_').unwrap();
	vec.try_insert(5, '!').unwrap();
	assert_eq!(vec, ['_', 'a', 'b', 'c', 'd', '!']);
}

#[test]
fn insert_returns_reference_to_slot() {
	let mut vec: CowVec<i32, 4> = CowVec::from([1, 3]);
	*vec.try_insert(1, 0).unwrap() = 2;
	assert_eq!(vec, [1, 2, 3]);
}

#[test]
fn remove_then_insert_restores_the_vector() {
	let original = [1, 2, 3, 4, 5];
	for index in 0..original.len() {
		let mut vec: CowVec<i32, 4> = CowVec::from(original);
		let removed = vec.try_remove(index).unwrap();
		assert_eq!(removed, original[index]);
		assert_eq!(vec.len(), 4);
		vec.try_insert(index, removed).unwrap();
		assert_eq!(vec, original);
	}
}

#[test]
#[should_panic = "insertion index (is 3) should be <= len (is 2)"]
fn insert_past_len_panics() {
	let mut vec: CowVec<i32, 4> = CowVec::from([1, 2]);
	let _ = vec.try_insert(3, 0);
}

#[test]
#[should_panic = "removal index (is 2) should be < len (is 2)"]
fn remove_out_of_bounds_panics() {
	let mut vec: CowVec<i32, 4> = CowVec::from([1, 2]);
	let _ = vec.try_remove(2);
}

#[test]
fn erase_removes_a_middle_range() {
	let mut vec: CowVec<i32, 2> = CowVec::from([1, 2, 3, 4, 5]);
	vec.try_erase(1..3).unwrap();
	assert_eq!(vec, [1, 4, 5]);
	assert_eq!(vec.capacity(), 5);
}

#[test]
fn erase_accepts_any_range_form() {
	let mut vec: CowVec<i32, 8> = CowVec::from([1, 2, 3, 4, 5]);
	vec.try_erase(..1).unwrap();
	assert_eq!(vec, [2, 3, 4, 5]);
	vec.try_erase(2..=2).unwrap();
	assert_eq!(vec, [2, 3, 5]);
	vec.try_erase(2..).unwrap();
	assert_eq!(vec, [2, 3]);
	vec.try_erase(..).unwrap();
	assert!(vec.is_empty());
}

#[test]
fn erase_of_empty_range_is_a_no_op() {
	let mut vec: CowVec<i32, 4> = CowVec::from([1, 2, 3]);
	vec.try_erase(1..1).unwrap();
	assert_eq!(vec, [1, 2, 3]);
}

#[test]
#[should_panic = "erase range (is 1..4) should be within len (is 3)"]
fn erase_past_len_panics() {
	let mut vec: CowVec<i32, 4> = CowVec::from([1, 2, 3]);
	let _ = vec.try_erase(1..4);
}

#[test]
#[should_panic = "erase range exceeds usize::MAX"]
fn erase_with_inclusive_max_end_panics() {
	let mut vec: CowVec<i32, 4> = CowVec::from([1, 2, 3]);
	let _ = vec.try_erase(0..=usize::MAX);
}

#[test]
fn clear_keeps_capacity() {
	let mut vec: CowVec<i32, 2> = CowVec::from([1, 2, 3, 4, 5]);
	vec.try_clear().unwrap();
	assert!(vec.is_empty());
	assert!(!vec.is_inline());
	assert_eq!(vec.capacity(), 5);
}

#[test]
fn reserve_allocates_the_exact_capacity() {
	let mut vec: CowVec<i32, 4> = CowVec::from([1, 2, 3]);
	vec.try_reserve(10).unwrap();
	assert!(!vec.is_inline());
	assert_eq!(vec.capacity(), 10);
	assert_eq!(vec, [1, 2, 3]);
}

#[test]
fn reserve_within_capacity_is_a_no_op() {
	let mut vec: CowVec<i32, 4> = CowVec::from([1, 2, 3]);
	vec.try_reserve(4).unwrap();
	assert!(vec.is_inline());
	assert_eq!(vec.capacity(), 4);
}

#[test]
fn shrink_compacts_small_contents_back_inline() {
	let mut vec: CowVec<i32, 4> = CowVec::from([1, 2, 3, 4, 5]);
	vec.try_erase(2..).unwrap();
	assert!(!vec.is_inline());

	vec.try_shrink_to_fit().unwrap();
	assert!(vec.is_inline());
	assert_eq!(vec.capacity(), 4);
	assert_eq!(vec, [1, 2]);
}

#[test]
fn shrink_reallocates_large_contents_exactly() {
	let mut vec: CowVec<i32, 2> = CowVec::from([1, 2, 3, 4, 5]);
	vec.try_pop().unwrap();
	vec.try_shrink_to_fit().unwrap();
	assert!(!vec.is_inline());
	assert_eq!(vec.capacity(), 4);
	assert_eq!(vec, [1, 2, 3, 4]);
}

#[test]
fn shrink_then_reserve_preserves_contents_and_order() {
	// Exact-realloc shrink, then a reserve back to the original capacity.
	let mut vec: CowVec<i32, 2> = CowVec::from([1, 2, 3, 4, 5]);
	vec.try_pop().unwrap();
	let original = vec.capacity();
	vec.try_shrink_to_fit().unwrap();
	assert_eq!(vec.capacity(), 4);
	vec.try_reserve(original).unwrap();
	assert_eq!(vec.capacity(), original);
	assert_eq!(vec, [1, 2, 3, 4]);

	// Inline-compaction shrink, then a reserve past the original capacity.
	let mut small: CowVec<i32, 4> = CowVec::from([1, 2, 3, 4, 5]);
	small.try_erase(3..).unwrap();
	small.try_shrink_to_fit().unwrap();
	assert!(small.is_inline());
	small.try_reserve(8).unwrap();
	assert!(!small.is_inline());
	assert_eq!(small.capacity(), 8);
	assert_eq!(small, [1, 2, 3]);
}

#[test]
fn shrink_of_full_or_inline_storage_is_a_no_op() {
	let mut inline: CowVec<i32, 4> = CowVec::from([1, 2]);
	inline.try_shrink_to_fit().unwrap();
	assert!(inline.is_inline());

	let mut full: CowVec<i32, 2> = CowVec::from([1, 2, 3]);
	assert_eq!(full.capacity(), 3);
	full.try_shrink_to_fit().unwrap();
	assert_eq!(full.capacity(), 3);
}

#[test]
fn swap_exchanges_contents_and_modes() {
	let mut a: CowVec<i32, 4> = CowVec::from([1, 2]);
	let mut b: CowVec<i32, 4> = CowVec::from([1, 2, 3, 4, 5]);

	a.swap(&mut b);
	assert_eq!(a, [1, 2, 3, 4, 5]);
	assert!(!a.is_inline());
	assert_eq!(b, [1, 2]);
	assert!(b.is_inline());

	// A second swap restores the original state.
	a.swap(&mut b);
	assert_eq!(a, [1, 2]);
	assert!(a.is_inline());
	assert_eq!(b, [1, 2, 3, 4, 5]);
}

#[test]
fn extend_from_slice_appends_in_place_when_room_allows() {
	let mut vec: CowVec<i32, 8> = CowVec::from([1, 2]);
	vec.try_extend_from_slice(&[3, 4, 5]).unwrap();
	assert!(vec.is_inline());
	assert_eq!(vec, [1, 2, 3, 4, 5]);
}

#[test]
fn extend_from_slice_grows_to_the_required_capacity() {
	let mut vec: CowVec<i32, 4> = CowVec::from([1, 2, 3]);
	vec.try_extend_from_slice(&[4, 5, 6]).unwrap();
	assert!(!vec.is_inline());
	assert_eq!(vec.capacity(), 6);
	assert_eq!(vec, [1, 2, 3, 4, 5, 6]);
}

#[test]
fn from_slice_picks_the_storage_mode_by_length() {
	let small = CowVec::<i32, 4>::try_from_slice(&[1, 2]).unwrap();
	assert!(small.is_inline());
	assert_eq!(small, [1, 2]);

	let large = CowVec::<i32, 4>::try_from_slice(&[1, 2, 3, 4, 5]).unwrap();
	assert!(!large.is_inline());
	assert_eq!(large.capacity(), 5);
	assert_eq!(large, [1, 2, 3, 4, 5]);
}

#[test]
fn from_array_moves_elements() {
	let inline: CowVec<String, 2> = CowVec::from([String::from("a"), String::from("b")]);
	assert!(inline.is_inline());
	assert_eq!(inline, ["a", "b"]);

	let heap: CowVec<String, 2> =
		CowVec::from([String::from("a"), String::from("b"), String::from("c")]);
	assert!(!heap.is_inline());
	assert_eq!(heap.capacity(), 3);
	assert_eq!(heap, ["a", "b", "c"]);
}

#[test]
fn read_accessors_agree_with_the_slice() {
	let vec: CowVec<i32, 4> = CowVec::from([1, 2, 3]);
	assert_eq!(vec.as_slice(), [1, 2, 3]);
	assert_eq!(vec.get(1), Some(&2));
	assert_eq!(vec.get(3), None);
	assert_eq!(vec.get(0..2), Some(&[1, 2][..]));
	assert_eq!(vec.front(), Some(&1));
	assert_eq!(vec.back(), Some(&3));
	assert_eq!(vec[2], 3);
	assert_eq!(&vec[1..], [2, 3]);
	assert_eq!(vec.iter().copied().sum::<i32>(), 6);
	assert_eq!((&vec).into_iter().count(), 3);
}

#[test]
fn mutable_accessors_write_through() {
	let mut vec: CowVec<i32, 4> = CowVec::from([1, 2, 3]);
	*vec.try_get_mut(1).unwrap().unwrap() = 20;
	*vec.try_front_mut().unwrap().unwrap() = 10;
	*vec.try_back_mut().unwrap().unwrap() = 30;
	assert_eq!(vec, [10, 20, 30]);

	for value in vec.try_iter_mut().unwrap() {
		*value /= 10;
	}
	assert_eq!(vec, [1, 2, 3]);

	vec.try_as_mut_slice().unwrap().reverse();
	assert_eq!(vec, [3, 2, 1]);
}

#[test]
fn equality_ignores_inline_capacity_and_mode() {
	let inline: CowVec<i32, 8> = CowVec::from([1, 2, 3]);
	let heap: CowVec<i32, 2> = CowVec::from([1, 2, 3]);
	assert_eq!(inline, heap);
	assert_eq!(inline, [1, 2, 3]);
	assert_eq!(inline, &[1, 2, 3][..]);
	assert_eq!([1, 2, 3], heap);
	assert_ne!(inline, [1, 2]);
	assert_ne!(inline, [1, 2, 4]);
}

#[test]
fn debug_formats_as_a_list() {
	let vec: CowVec<i32, 4> = CowVec::from([1, 2, 3]);
	assert_eq!(format!("{vec:?}"), "[1, 2, 3]");
}

#[test]
fn default_is_a_new_empty_vector() {
	let vec: CowVec<i32, 4> = CowVec::default();
	assert!(vec.is_empty());
	assert!(vec.is_inline());
}

#[test]
fn zero_sized_elements_work_in_both_modes() {
	let mut vec: CowVec<(), 2> = CowVec::new();
	for _ in 0..100 {
		vec.try_push(()).unwrap();
	}
	assert_eq!(vec.len(), 100);
	assert!(!vec.is_inline());
	while vec.try_pop().unwrap().is_some() {}
	assert!(vec.is_empty());
}

#[test]
fn zero_inline_slots_allocates_on_first_push() {
	let mut vec: CowVec<i32, 0> = CowVec::new();
	assert_eq!(vec.capacity(), 0);
	vec.try_push(1).unwrap();
	assert!(!vec.is_inline());
	assert_eq!(vec.capacity(), 1);
	assert_eq!(vec, [1]);
}

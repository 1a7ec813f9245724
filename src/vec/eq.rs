// Copyright 2025 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

use super::CowVec;

macro_rules! gen_eq {
	($([$($vars:tt)+] $lhs:ty, $rhs:ty;)+) => {
		$(
		impl<$($vars)+> PartialEq<$rhs> for $lhs {
			fn eq(&self, other: &$rhs) -> bool {
				self[..] == other[..]
			}
		}
		)+
	};
}

// Comparisons see only the element sequence; inline capacity and storage mode are invisible to
// equality, so vectors of different `N` compare freely.
gen_eq! {
	[T: PartialEq<U>, U, const N: usize, const M: usize] CowVec<T, N>, CowVec<U, M>;
	[T: PartialEq<U>, U, const N: usize] CowVec<T, N>, [U];
	[T: PartialEq<U>, U, const N: usize] CowVec<T, N>, &[U];
	[T: PartialEq<U>, U, const N: usize] CowVec<T, N>, &mut [U];
	[T: PartialEq<U>, U, const N: usize] [T], CowVec<U, N>;
	[T: PartialEq<U>, U, const N: usize] &[T], CowVec<U, N>;
	[T: PartialEq<U>, U, const N: usize, const M: usize] CowVec<T, N>, [U; M];
	[T: PartialEq<U>, U, const N: usize, const M: usize] CowVec<T, N>, &[U; M];
	[T: PartialEq<U>, U, const N: usize, const M: usize] [T; M], CowVec<U, N>;
	[T: PartialEq<U>, U, const N: usize, const M: usize] &[T; M], CowVec<U, N>;
}

impl<T: Eq, const N: usize> Eq for CowVec<T, N> {}

// Copyright 2025 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use crate::error::{Error, Result};

/// A fallible version of the [`Clone`] trait.
///
/// Element types stored in a [`CowVec`](crate::CowVec) are duplicated through this trait whenever
/// existing elements must be copied: resolving exclusive ownership of a shared block, growing into
/// a larger block, reserving or shrinking capacity, and deep-cloning the vector itself. A failed
/// copy is reported as [`Error::Element`] and rolled back by the calling operation.
///
/// Types whose copies cannot fail simply wrap [`Clone`]:
///
/// ```
/// use cowvec::{TryClone, Result};
///
/// #[derive(Clone)]
/// struct Point { x: i32, y: i32 }
///
/// impl TryClone for Point {
/// 	fn try_clone(&self) -> Result<Self> {
/// 		Ok(self.clone())
/// 	}
/// }
/// ```
pub trait TryClone: Sized {
	/// Returns a copy of the value, or an error if the copy cannot be completed.
	///
	/// # Errors
	///
	/// Returns [`Error::Element`] or [`Error::Alloc`] at the implementation's discretion. An
	/// implementation returning an error must leave no observable side effects.
	fn try_clone(&self) -> Result<Self>;
}

macro_rules! trivial {
	($($ty:ty),+ $(,)?) => {
		$(
		impl TryClone for $ty {
			#[inline(always)]
			fn try_clone(&self) -> Result<Self> {
				Ok(*self)
			}
		}
		)+
	};
}

trivial! {
	(), bool, char,
	u8, u16, u32, u64, u128, usize,
	i8, i16, i32, i64, i128, isize,
	f32, f64,
}

impl<T: ?Sized> TryClone for &T {
	#[inline(always)]
	fn try_clone(&self) -> Result<Self> {
		Ok(*self)
	}
}

impl TryClone for String {
	fn try_clone(&self) -> Result<Self> {
		Ok(self.clone())
	}
}

impl<T: TryClone> TryClone for Option<T> {
	fn try_clone(&self) -> Result<Self> {
		self.as_ref().map(T::try_clone).transpose()
	}
}

impl<T: TryClone> TryClone for Box<T> {
	fn try_clone(&self) -> Result<Self> {
		Ok(Self::new((**self).try_clone()?))
	}
}

impl<T: TryClone> TryClone for Vec<T> {
	fn try_clone(&self) -> Result<Self> {
		self.iter().map(T::try_clone).collect()
	}
}

impl<T: TryClone, E: TryClone> TryClone for Result<T, E> {
	fn try_clone(&self) -> Result<Self> {
		Ok(match self {
			Ok(value) => Ok(value.try_clone()?),
			Err(error) => Err(error.try_clone()?),
		})
	}
}

impl TryClone for Error {
	#[inline(always)]
	fn try_clone(&self) -> Result<Self> {
		Ok(*self)
	}
}

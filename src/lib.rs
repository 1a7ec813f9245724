// Copyright 2025 - Strixpyrr
// SPDX-License-Identifier: Apache-2.0

//! Small-buffer vectors with copy-on-write heap storage.
//!
//! [`CowVec<T, N>`] combines two classic space optimizations behind one contiguous-vector API:
//!
//! - **Inline storage**: the first `N` elements live in the vector itself, with no allocation.
//! - **Shared heap storage**: once the contents outgrow the inline buffer they move to a
//!   reference-counted heap block, and cloning the vector shares that block in *O*(1). The block
//!   is only copied when one of its owners mutates — clone-on-write.
//!
//! Compared to the standard containers:
//!
//! | | [`Vec<T>`](alloc::vec::Vec) | [`Rc<[T]>`](alloc::rc::Rc) | [`CowVec<T, N>`] |
//! |----------------------|-----|-----|-----|
//! | Growable             | yes | no  | yes |
//! | Small-size optimized | no  | no  | yes |
//! | *O*(1) clone         | no  | yes | for large contents |
//!
//! Mutating operations are fallible and named `try_*`: resolving ownership of a shared block and
//! growing storage both allocate and copy elements, and element copies themselves go through the
//! [`TryClone`] trait, which may fail. Every operation offers the strong guarantee — on error,
//! the vector and any block it shares are left untouched.
//!
//! # Examples
//!
//! ```
//! use cowvec::{CowVec, TryClone};
//!
//! let mut line: CowVec<&str, 4> = CowVec::new();
//! line.try_push("git")?;
//! line.try_push("commit")?;
//!
//! // Still inline, no allocation has happened yet.
//! assert!(line.is_inline());
//!
//! line.try_extend_from_slice(&["--amend", "--no-edit", "--quiet"])?;
//! assert!(!line.is_inline());
//!
//! // Large contents clone by sharing.
//! let saved = line.try_clone()?;
//! assert!(line.is_shared());
//!
//! // The first write copies the block; `saved` is unaffected.
//! line.try_erase(2..)?;
//! assert_eq!(line, ["git", "commit"]);
//! assert_eq!(saved, ["git", "commit", "--amend", "--no-edit", "--quiet"]);
//! # Ok::<_, cowvec::Error>(())
//! ```
//!
//! # Feature Flags
//!
//! - `std`: links the standard library. The crate is `no_std` without it; errors implement
//!   `core::error::Error` either way.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(
	clippy::alloc_instead_of_core,
	clippy::clone_on_ref_ptr,
	clippy::missing_errors_doc,
	clippy::missing_panics_doc,
	clippy::missing_safety_doc,
	clippy::panic,
	clippy::std_instead_of_alloc,
	clippy::std_instead_of_core,
	clippy::undocumented_unsafe_blocks,
	clippy::unwrap_used,
)]

extern crate alloc;

pub mod clone;
pub mod error;
mod inline;
mod raw;
pub mod vec;

pub use clone::TryClone;
pub use error::{Error, Result};
pub use vec::CowVec;

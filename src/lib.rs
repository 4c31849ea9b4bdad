//! This crate provides a cloneable type-erased value holder, a replacement for `Box<dyn Any>`
//! that stores small values inline without heap allocation.
//!
//! `SmallAny` holds at most one value of any type that implements `Clone`, `Send`, `Sync` and is `'static`.
//! `LocalSmallAny` is relaxed version of `SmallAny` that doesn't require `Send`, `Sync` bounds.
//!
//! Both are generic over the inline capacity `N`, measured in pointer widths (3 by default).
//! Values larger than that, or aligned to more than 8 bytes, are boxed.
//!
//! ## Usage
//!
//! ```
//! use smallany::{SmallAny, StorageOrigin, TypeTag};
//!
//! // u32 fits inline storage, so no allocation is performed.
//! let mut a: SmallAny = SmallAny::new(42u32);
//! assert_eq!(a.origin(), Some(StorageOrigin::Inline));
//! assert_eq!(a.type_tag(), TypeTag::of::<u32>());
//!
//! // Get reference to the value.
//! let r: &u32 = a.downcast_ref::<u32>().unwrap();
//!
//! // Get mutable reference to the value, or an error describing the mismatch.
//! let r: &mut u32 = a.cast_mut::<u32>().unwrap();
//! *r += 1;
//! assert!(a.cast_ref::<String>().is_err());
//!
//! // Deep copy.
//! let b = a.clone();
//! assert_eq!(b.downcast_ref::<u32>(), Some(&43));
//!
//! // Too large for inline storage, boxed.
//! a.emplace([1u64; 8]);
//! assert_eq!(a.origin(), Some(StorageOrigin::Heap));
//!
//! // Take ownership of the value, leaving the holder empty.
//! let array = a.take_value::<[u64; 8]>().unwrap();
//! assert_eq!(array, [1u64; 8]);
//! assert!(!a.has_value());
//!
//! // Capacity is a type parameter.
//! let c: SmallAny<8> = SmallAny::new([1usize; 8]);
//! assert_eq!(c.origin(), Some(StorageOrigin::Inline));
//! ```

#![no_std]

extern crate alloc;

mod error;
mod small_any;
mod storage;
mod tag;

pub use self::{
    error::BadCast,
    small_any::{make_any, make_local_any, LocalSmallAny, SmallAny},
    storage::StorageOrigin,
    tag::TypeTag,
};

use core::mem::{align_of, size_of, MaybeUninit};

/// Alignment of every inline storage, regardless of its capacity.
pub(crate) const STORAGE_ALIGN: usize = 8;

/// Storage that can hold any value of at most `N` pointer widths and alignment `STORAGE_ALIGN`.
#[repr(C, align(8))] // kept in sync with `STORAGE_ALIGN`
pub(crate) struct InlineStorage<const N: usize> {
    storage: MaybeUninit<[usize; N]>,
}

impl<const N: usize> InlineStorage<N> {
    /// Size of the storage in bytes.
    pub const SIZE: usize = N * size_of::<usize>();

    /// Construct new storage without initializing any value in it.
    pub const fn new() -> Self {
        InlineStorage {
            storage: MaybeUninit::uninit(),
        }
    }

    /// Returns `true` if the type `T` fits into the storage.
    pub const fn fits<T>() -> bool {
        size_of::<T>() <= Self::SIZE && align_of::<T>() <= STORAGE_ALIGN
    }

    /// Returns reference to the potentially uninitialized value.
    ///
    /// The caller is responsible to ensure that the type is correct and the value is initialized before accessing it.
    pub fn as_ref<T>(&self) -> &MaybeUninit<T> {
        // This can't be const, because then it'll be checked in branches that are not taken.
        assert!(Self::fits::<T>());

        // Safety: size and alignment are checked above.
        unsafe { &*self.storage.as_ptr().cast() }
    }

    /// Returns mutable reference to the potentially uninitialized value.
    ///
    /// The caller is responsible to ensure that the type is correct and the value is initialized before accessing it.
    pub fn as_mut<T>(&mut self) -> &mut MaybeUninit<T> {
        assert!(Self::fits::<T>());

        // Safety: size and alignment are checked above.
        unsafe { &mut *self.storage.as_mut_ptr().cast() }
    }
}

/// Where the payload of a holder lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StorageOrigin {
    /// In the embedded buffer, no allocation.
    Inline,
    /// In a separate heap allocation owned by the holder.
    Heap,
}

use core::{
    any::type_name,
    fmt,
    marker::PhantomData,
    mem::{self, size_of, ManuallyDrop},
    ptr,
};

use alloc::boxed::Box;
use log::trace;

use crate::{
    storage::{InlineStorage, StorageOrigin},
    BadCast, TypeTag,
};

unsafe fn drop_inlined<T, const N: usize>(storage: &mut InlineStorage<N>) {
    // Safety: It was initialized as `T`.
    unsafe {
        storage.as_mut::<T>().assume_init_drop();
    }
}

unsafe fn drop_boxed<T, const N: usize>(storage: &mut InlineStorage<N>) {
    // Safety: It was initialized as `Box<T>`.
    unsafe {
        storage.as_mut::<Box<T>>().assume_init_drop();
    }
}

unsafe fn drop_empty_inlined<T, const N: usize>(_storage: &mut InlineStorage<N>) {
    // It was initialized as `T`, but value was taken out.
}

unsafe fn drop_empty_boxed<T, const N: usize>(storage: &mut InlineStorage<N>) {
    // Safety: It was initialized as `Box<T>`, but value was taken out.
    // Thus it is safe to drop the box itself without dropping the value.
    unsafe {
        storage.as_mut::<Box<ManuallyDrop<T>>>().assume_init_drop();
    }
}

unsafe fn clone_inlined<T: Clone, const N: usize>(storage: &InlineStorage<N>) -> InlineStorage<N> {
    // Safety: It was initialized as `T`.
    let value: &T = unsafe { storage.as_ref::<T>().assume_init_ref() };

    let mut cloned = InlineStorage::new();
    cloned.as_mut::<T>().write(value.clone());
    cloned
}

unsafe fn clone_boxed<T: Clone, const N: usize>(storage: &InlineStorage<N>) -> InlineStorage<N> {
    // Safety: It was initialized as `Box<T>`.
    let boxed: &Box<T> = unsafe { storage.as_ref::<Box<T>>().assume_init_ref() };

    trace!("Cloning boxed `{}`", type_name::<T>());

    let mut cloned = InlineStorage::new();
    cloned.as_mut::<Box<T>>().write(boxed.clone());
    cloned
}

unsafe fn as_ptr_inlined<T, const N: usize>(storage: &InlineStorage<N>) -> *const u8 {
    // Safety: It was initialized as `T`.
    let r: &T = unsafe { storage.as_ref::<T>().assume_init_ref() };
    ptr::from_ref(r).cast()
}

unsafe fn as_ptr_boxed<T, const N: usize>(storage: &InlineStorage<N>) -> *const u8 {
    // Safety: It was initialized as `Box<T>`.
    let r: &T = &**unsafe { storage.as_ref::<Box<T>>().assume_init_ref() };
    ptr::from_ref(r).cast()
}

unsafe fn as_mut_inlined<T, const N: usize>(storage: &mut InlineStorage<N>) -> *mut u8 {
    // Safety: It was initialized as `T`.
    let r: &mut T = unsafe { storage.as_mut::<T>().assume_init_mut() };
    ptr::from_mut(r).cast()
}

unsafe fn as_mut_boxed<T, const N: usize>(storage: &mut InlineStorage<N>) -> *mut u8 {
    // Safety: It was initialized as `Box<T>`.
    let r: &mut T = &mut **unsafe { storage.as_mut::<Box<T>>().assume_init_mut() };
    ptr::from_mut(r).cast()
}

// Virtual table to operate on the storage.
// One per payload type and storage origin.
struct VTable<const N: usize> {
    type_tag: fn() -> TypeTag,
    origin: StorageOrigin,
    drop: unsafe fn(&mut InlineStorage<N>),
    drop_empty: unsafe fn(&mut InlineStorage<N>),
    clone: unsafe fn(&InlineStorage<N>) -> InlineStorage<N>,
    as_ptr: unsafe fn(&InlineStorage<N>) -> *const u8,
    as_mut: unsafe fn(&mut InlineStorage<N>) -> *mut u8,
}

fn inline_vtable<T: Clone + 'static, const N: usize>() -> &'static VTable<N> {
    &VTable {
        type_tag: TypeTag::of::<T>,
        origin: StorageOrigin::Inline,
        drop: drop_inlined::<T, N>,
        drop_empty: drop_empty_inlined::<T, N>,
        clone: clone_inlined::<T, N>,
        as_ptr: as_ptr_inlined::<T, N>,
        as_mut: as_mut_inlined::<T, N>,
    }
}

fn boxed_vtable<T: Clone + 'static, const N: usize>() -> &'static VTable<N> {
    &VTable {
        type_tag: TypeTag::of::<T>,
        origin: StorageOrigin::Heap,
        drop: drop_boxed::<T, N>,
        drop_empty: drop_empty_boxed::<T, N>,
        clone: clone_boxed::<T, N>,
        as_ptr: as_ptr_boxed::<T, N>,
        as_mut: as_mut_boxed::<T, N>,
    }
}

/// Cloneable `dyn Any` with inline storage of `N` pointer widths.
///
/// Types that fit in the storage are stored without allocation.
/// Types that are too large are boxed, with exactly one allocation.
/// The holder may also be empty.
///
/// Stored types must be `Clone`, so that the holder itself can be cloned,
/// but they may not implement `Send` and `Sync`.
/// For thread-safe version see [`SmallAny`].
///
/// `N` only tunes which types avoid allocation, it never changes observable values.
pub struct LocalSmallAny<const N: usize = 3> {
    vtable: Option<&'static VTable<N>>,
    storage: InlineStorage<N>,
    unsend: PhantomData<*mut u8>,
}

impl<const N: usize> Drop for LocalSmallAny<N> {
    #[inline(always)]
    fn drop(&mut self) {
        self.reset();
    }
}

impl<const N: usize> Default for LocalSmallAny<N> {
    #[inline(always)]
    fn default() -> Self {
        LocalSmallAny::empty()
    }
}

impl<const N: usize> Clone for LocalSmallAny<N> {
    /// Deep copy of the payload.
    /// Inlined payload is cloned inline, boxed payload is cloned into a new box.
    fn clone(&self) -> Self {
        match self.vtable {
            None => LocalSmallAny::empty(),
            Some(vtable) => LocalSmallAny {
                vtable: Some(vtable),
                // Safety: `vtable` describes what is in the storage.
                storage: unsafe { (vtable.clone)(&self.storage) },
                unsend: PhantomData,
            },
        }
    }
}

impl<const N: usize> fmt::Debug for LocalSmallAny<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalSmallAny")
            .field("type", &self.type_tag())
            .field("origin", &self.origin())
            .finish_non_exhaustive()
    }
}

impl<const N: usize> LocalSmallAny<N> {
    /// Construct an empty holder.
    ///
    /// # Example
    ///
    /// ```
    /// # use smallany::LocalSmallAny;
    /// let a: LocalSmallAny = LocalSmallAny::empty();
    ///
    /// assert!(!a.has_value());
    /// ```
    #[inline]
    pub const fn empty() -> Self {
        LocalSmallAny {
            vtable: None,
            storage: InlineStorage::new(),
            unsend: PhantomData,
        }
    }

    /// Returns `true` if the type `T` fits and can be stored without allocation.
    /// If `true`, then `LocalSmallAny::<N>::new::<T>` is guaranteed to not allocate.
    ///
    /// # Example
    ///
    /// ```
    /// # use smallany::LocalSmallAny;
    /// if <LocalSmallAny>::fits::<u32>() {
    ///   // Guaranteed to not allocate.
    ///   let _: LocalSmallAny = LocalSmallAny::new(42u32);
    /// }
    ///
    /// assert!(!<LocalSmallAny<1>>::fits::<[u64; 2]>());
    /// ```
    pub const fn fits<T>() -> bool {
        InlineStorage::<N>::fits::<T>()
    }

    /// Construct new [`LocalSmallAny`] with the given value.
    ///
    /// If the type `T` fits in the storage, it is stored without allocation.
    /// Otherwise, it will be boxed.
    ///
    /// # Example
    ///
    /// ```
    /// # use smallany::LocalSmallAny;
    /// let a: LocalSmallAny = LocalSmallAny::new(42u32);
    ///
    /// assert_eq!(a.downcast_ref::<u32>().unwrap(), &42);
    /// ```
    #[inline]
    pub fn new<T>(value: T) -> Self
    where
        T: Clone + 'static,
    {
        if Self::fits::<T>() {
            Self::store_inline(value)
        } else {
            trace!(
                "`{}` ({} bytes) does not fit {} bytes of inline storage, boxing",
                type_name::<T>(),
                size_of::<T>(),
                InlineStorage::<N>::SIZE,
            );

            Self::store_boxed(Box::new(value))
        }
    }

    /// Construct new [`LocalSmallAny`] with the value returned by `f`.
    ///
    /// If `f` panics, nothing is constructed.
    ///
    /// # Example
    ///
    /// ```
    /// # use smallany::LocalSmallAny;
    /// let a: LocalSmallAny = LocalSmallAny::new_with(|| String::from("hello"));
    ///
    /// assert_eq!(a.downcast_ref::<String>().unwrap(), "hello");
    /// ```
    #[inline]
    pub fn new_with<T, F>(f: F) -> Self
    where
        T: Clone + 'static,
        F: FnOnce() -> T,
    {
        Self::new(f())
    }

    /// Construct new [`LocalSmallAny`] holding a `T` collected from `iter`.
    ///
    /// # Example
    ///
    /// ```
    /// # use smallany::LocalSmallAny;
    /// use std::collections::LinkedList;
    ///
    /// let a: LocalSmallAny = LocalSmallAny::new_from_iter::<LinkedList<u8>, _>([1, 2, 3]);
    ///
    /// assert_eq!(a.downcast_ref::<LinkedList<u8>>().unwrap().len(), 3);
    /// ```
    #[inline]
    pub fn new_from_iter<T, I>(iter: I) -> Self
    where
        T: FromIterator<I::Item> + Clone + 'static,
        I: IntoIterator,
    {
        Self::new(iter.into_iter().collect::<T>())
    }

    /// Construct new [`LocalSmallAny`] from the given boxed value.
    ///
    /// If type fits in the storage, value will be unboxed.
    /// Otherwise it will be stored as boxed, but no allocation will be performed.
    ///
    /// # Example
    ///
    /// ```
    /// # use smallany::{LocalSmallAny, StorageOrigin};
    /// let boxed = Box::new([1u32; 42]);
    ///
    /// // No additional allocation is performed.
    /// let a: LocalSmallAny = LocalSmallAny::from_box(boxed);
    ///
    /// assert_eq!(a.downcast_ref::<[u32; 42]>().unwrap(), &[1u32; 42]);
    /// assert_eq!(a.origin(), Some(StorageOrigin::Heap));
    /// ```
    #[inline]
    pub fn from_box<T>(boxed: Box<T>) -> Self
    where
        T: Clone + 'static,
    {
        if Self::fits::<T>() {
            trace!("Unboxing `{}` into inline storage", type_name::<T>());
            Self::store_inline(*boxed)
        } else {
            Self::store_boxed(boxed)
        }
    }

    fn store_inline<T>(value: T) -> Self
    where
        T: Clone + 'static,
    {
        let mut storage = InlineStorage::new();
        storage.as_mut::<T>().write(value);

        LocalSmallAny {
            vtable: Some(inline_vtable::<T, N>()),
            storage,
            unsend: PhantomData,
        }
    }

    fn store_boxed<T>(boxed: Box<T>) -> Self
    where
        T: Clone + 'static,
    {
        const {
            assert!(
                InlineStorage::<N>::fits::<Box<T>>(),
                "inline storage must hold at least one pointer"
            );
        }

        let mut storage = InlineStorage::new();
        storage.as_mut::<Box<T>>().write(boxed);

        LocalSmallAny {
            vtable: Some(boxed_vtable::<T, N>()),
            storage,
            unsend: PhantomData,
        }
    }

    /// Replaces the stored value with `value`.
    ///
    /// Same as `*self = LocalSmallAny::new(value)`.
    #[inline]
    pub fn assign<T>(&mut self, value: T)
    where
        T: Clone + 'static,
    {
        *self = LocalSmallAny::new(value);
    }

    /// Replaces the stored value with `value` and returns a reference to it.
    ///
    /// The new payload is constructed before the previous one is dropped.
    ///
    /// # Example
    ///
    /// ```
    /// # use smallany::LocalSmallAny;
    /// let mut a: LocalSmallAny = LocalSmallAny::new(1u8);
    ///
    /// *a.emplace(vec![1, 2, 3]) = vec![4];
    ///
    /// assert!(!a.is::<u8>());
    /// assert_eq!(a.downcast_ref::<Vec<i32>>().unwrap(), &[4]);
    /// ```
    #[inline]
    pub fn emplace<T>(&mut self, value: T) -> &mut T
    where
        T: Clone + 'static,
    {
        self.assign(value);

        // Safety: Just stored `T`.
        unsafe { self.downcast_mut_unchecked::<T>() }
    }

    /// Replaces the stored value with the value returned by `f`.
    ///
    /// If `f` panics, the holder keeps its previous value.
    #[inline]
    pub fn emplace_with<T, F>(&mut self, f: F) -> &mut T
    where
        T: Clone + 'static,
        F: FnOnce() -> T,
    {
        self.emplace(f())
    }

    /// Replaces the stored value with a `T` collected from `iter`.
    #[inline]
    pub fn emplace_from_iter<T, I>(&mut self, iter: I) -> &mut T
    where
        T: FromIterator<I::Item> + Clone + 'static,
        I: IntoIterator,
    {
        self.emplace(iter.into_iter().collect::<T>())
    }

    /// Replaces the stored value with the value returned by `f`, if it succeeds.
    ///
    /// On error the holder keeps its previous value and the error is returned.
    ///
    /// # Example
    ///
    /// ```
    /// # use smallany::LocalSmallAny;
    /// let mut a: LocalSmallAny = LocalSmallAny::new(7u32);
    ///
    /// let r = a.try_emplace_with(|| "x".parse::<u64>());
    /// assert!(r.is_err());
    /// assert_eq!(a.downcast_ref::<u32>(), Some(&7));
    ///
    /// let r = a.try_emplace_with(|| "42".parse::<u64>());
    /// assert_eq!(r, Ok(&mut 42));
    /// ```
    #[inline]
    pub fn try_emplace_with<T, E, F>(&mut self, f: F) -> Result<&mut T, E>
    where
        T: Clone + 'static,
        F: FnOnce() -> Result<T, E>,
    {
        let value = f()?;
        Ok(self.emplace(value))
    }

    /// Drops stored value, if any, leaving the holder empty.
    ///
    /// # Example
    ///
    /// ```
    /// # use smallany::{LocalSmallAny, TypeTag};
    /// let mut a: LocalSmallAny = LocalSmallAny::new(42u32);
    /// a.reset();
    ///
    /// assert!(!a.has_value());
    /// assert_eq!(a.type_tag(), TypeTag::empty());
    /// ```
    #[inline]
    pub fn reset(&mut self) {
        // Taken first, so that a panicking destructor can't cause a second drop.
        if let Some(vtable) = self.vtable.take() {
            // Safety: `vtable` describes what is in the storage.
            unsafe {
                (vtable.drop)(&mut self.storage);
            }
        }
    }

    /// Moves the payload out into a new holder, leaving this one empty.
    ///
    /// Never touches the payload itself: boxed values keep their allocation.
    #[inline]
    pub fn take(&mut self) -> Self {
        mem::replace(self, LocalSmallAny::empty())
    }

    /// Exchanges payloads of two holders.
    ///
    /// Works the same for any combination of inline and boxed payloads.
    /// Payload code is never called.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Returns `true` if the holder is not empty.
    #[inline]
    pub fn has_value(&self) -> bool {
        self.vtable.is_some()
    }

    /// Returns the tag of the stored type, or [`TypeTag::empty`].
    ///
    /// # Example
    ///
    /// ```
    /// # use smallany::{LocalSmallAny, TypeTag};
    /// let a: LocalSmallAny = LocalSmallAny::new(42u32);
    ///
    /// assert_eq!(a.type_tag(), TypeTag::of::<u32>());
    /// ```
    #[inline]
    pub fn type_tag(&self) -> TypeTag {
        match self.vtable {
            None => TypeTag::empty(),
            Some(vtable) => (vtable.type_tag)(),
        }
    }

    /// Returns where the payload lives, or `None` if the holder is empty.
    #[inline]
    pub fn origin(&self) -> Option<StorageOrigin> {
        self.vtable.map(|vtable| vtable.origin)
    }

    /// Returns `true` if the stored value is of type `T`.
    ///
    /// Always `false` for an empty holder.
    #[inline]
    pub fn is<T>(&self) -> bool
    where
        T: 'static,
    {
        self.type_tag().is::<T>()
    }

    fn bad_cast<T: 'static>(&self) -> BadCast {
        BadCast::new(TypeTag::of::<T>(), self.type_tag())
    }

    /// Returns some reference to the stored value if it is of type `T`.
    /// Otherwise returns none.
    ///
    /// # Example
    ///
    /// ```
    /// # use smallany::LocalSmallAny;
    /// let a: LocalSmallAny = LocalSmallAny::new(42u32);
    ///
    /// assert_eq!(a.downcast_ref::<u32>(), Some(&42));
    /// assert_eq!(a.downcast_ref::<i32>(), None);
    /// ```
    #[inline]
    pub fn downcast_ref<T>(&self) -> Option<&T>
    where
        T: 'static,
    {
        if self.is::<T>() {
            Some(unsafe { self.downcast_ref_unchecked::<T>() })
        } else {
            None
        }
    }

    /// Returns some mutable reference to the stored value if it is of type `T`.
    /// Otherwise returns none.
    #[inline]
    pub fn downcast_mut<T>(&mut self) -> Option<&mut T>
    where
        T: 'static,
    {
        if self.is::<T>() {
            Some(unsafe { self.downcast_mut_unchecked::<T>() })
        } else {
            None
        }
    }

    /// Returns reference to the stored value if it is of type `T`.
    /// Otherwise returns [`BadCast`] error.
    ///
    /// # Example
    ///
    /// ```
    /// # use smallany::{LocalSmallAny, TypeTag};
    /// let a: LocalSmallAny = LocalSmallAny::new(42u32);
    ///
    /// let err = a.cast_ref::<String>().unwrap_err();
    /// assert_eq!(err.stored(), TypeTag::of::<u32>());
    /// ```
    #[inline]
    pub fn cast_ref<T>(&self) -> Result<&T, BadCast>
    where
        T: 'static,
    {
        self.downcast_ref::<T>().ok_or_else(|| self.bad_cast::<T>())
    }

    /// Returns mutable reference to the stored value if it is of type `T`.
    /// Otherwise returns [`BadCast`] error.
    #[inline]
    pub fn cast_mut<T>(&mut self) -> Result<&mut T, BadCast>
    where
        T: 'static,
    {
        if self.is::<T>() {
            Ok(unsafe { self.downcast_mut_unchecked::<T>() })
        } else {
            Err(self.bad_cast::<T>())
        }
    }

    /// Returns a copy of the stored value if it is of type `T`.
    /// Otherwise returns [`BadCast`] error.
    #[inline]
    pub fn cast<T>(&self) -> Result<T, BadCast>
    where
        T: Clone + 'static,
    {
        self.cast_ref::<T>().cloned()
    }

    /// Moves the stored value out if it is of type `T`, leaving the holder empty.
    /// Otherwise returns [`BadCast`] error and the holder is not modified.
    ///
    /// # Example
    ///
    /// ```
    /// # use smallany::LocalSmallAny;
    /// let mut a: LocalSmallAny = LocalSmallAny::new(vec![1, 2, 3]);
    ///
    /// assert!(a.take_value::<u32>().is_err());
    /// assert_eq!(a.take_value::<Vec<i32>>().unwrap(), [1, 2, 3]);
    /// assert!(!a.has_value());
    /// ```
    #[inline]
    pub fn take_value<T>(&mut self) -> Result<T, BadCast>
    where
        T: 'static,
    {
        if self.is::<T>() {
            Ok(unsafe { self.take().downcast_unchecked() })
        } else {
            Err(self.bad_cast::<T>())
        }
    }

    /// Returns the stored value if it is of type `T`.
    /// Otherwise return self back.
    ///
    /// This will unbox the value if it was stored as boxed.
    #[inline]
    pub fn downcast<T>(self) -> Result<T, Self>
    where
        T: 'static,
    {
        if self.is::<T>() {
            Ok(unsafe { self.downcast_unchecked() })
        } else {
            Err(self)
        }
    }

    /// Returns reference to the stored value without type checking.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the holder is not empty and the type is correct.
    #[inline]
    pub unsafe fn downcast_ref_unchecked<T>(&self) -> &T
    where
        T: 'static,
    {
        debug_assert!(self.is::<T>());
        let vtable = unsafe { self.vtable.unwrap_unchecked() };
        let ptr = unsafe { (vtable.as_ptr)(&self.storage) };
        unsafe { &*ptr.cast() }
    }

    /// Returns mutable reference to the stored value without type checking.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the holder is not empty and the type is correct.
    #[inline]
    pub unsafe fn downcast_mut_unchecked<T>(&mut self) -> &mut T
    where
        T: 'static,
    {
        debug_assert!(self.is::<T>());
        let vtable = unsafe { self.vtable.unwrap_unchecked() };
        let ptr = unsafe { (vtable.as_mut)(&mut self.storage) };
        unsafe { &mut *ptr.cast() }
    }

    /// Returns the stored value without type checking.
    ///
    /// This will unbox the value if it was stored as boxed.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the holder is not empty and the type is correct.
    #[inline]
    pub unsafe fn downcast_unchecked<T>(self) -> T
    where
        T: 'static,
    {
        debug_assert!(self.is::<T>());
        // Prevent dropping using `vtable.drop`.
        let mut me = ManuallyDrop::new(self);
        let vtable = unsafe { me.vtable.unwrap_unchecked() };

        // Read value out.
        let ptr = unsafe { (vtable.as_ptr)(&me.storage) };
        let value = unsafe { ptr.cast::<T>().read() };

        // Drop emptied storage.
        unsafe {
            (vtable.drop_empty)(&mut me.storage);
        }

        value
    }
}

/// Cloneable `dyn Any` with inline storage of `N` pointer widths.
///
/// Same as [`LocalSmallAny`], but requires stored types to be `Send` and `Sync`,
/// and is `Send` and `Sync` itself.
/// It performs no synchronization, mutation still needs `&mut`.
#[derive(Clone, Default)]
pub struct SmallAny<const N: usize = 3> {
    inner: LocalSmallAny<N>,
}

// Safety: Every constructor requires the payload to be `Send + Sync`.
unsafe impl<const N: usize> Send for SmallAny<N> {}
unsafe impl<const N: usize> Sync for SmallAny<N> {}

impl<const N: usize> From<SmallAny<N>> for LocalSmallAny<N> {
    #[inline(always)]
    fn from(value: SmallAny<N>) -> Self {
        value.inner
    }
}

impl<const N: usize> fmt::Debug for SmallAny<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmallAny")
            .field("type", &self.type_tag())
            .field("origin", &self.origin())
            .finish_non_exhaustive()
    }
}

impl<const N: usize> SmallAny<N> {
    /// Construct an empty holder.
    #[inline]
    pub const fn empty() -> Self {
        SmallAny {
            inner: LocalSmallAny::empty(),
        }
    }

    /// Returns `true` if the type `T` fits and can be stored without allocation.
    pub const fn fits<T>() -> bool {
        InlineStorage::<N>::fits::<T>()
    }

    /// Construct new [`SmallAny`] with the given value.
    ///
    /// # Example
    ///
    /// ```
    /// # use smallany::SmallAny;
    /// let a: SmallAny = SmallAny::new(42u32);
    ///
    /// std::thread::spawn(move || {
    ///     assert_eq!(a.downcast_ref::<u32>(), Some(&42));
    /// })
    /// .join()
    /// .unwrap();
    /// ```
    #[inline]
    pub fn new<T>(value: T) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        SmallAny {
            inner: LocalSmallAny::new(value),
        }
    }

    #[inline]
    pub fn new_with<T, F>(f: F) -> Self
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> T,
    {
        SmallAny {
            inner: LocalSmallAny::new_with(f),
        }
    }

    #[inline]
    pub fn new_from_iter<T, I>(iter: I) -> Self
    where
        T: FromIterator<I::Item> + Clone + Send + Sync + 'static,
        I: IntoIterator,
    {
        SmallAny {
            inner: LocalSmallAny::new_from_iter::<T, I>(iter),
        }
    }

    /// Construct new [`SmallAny`] from the given boxed value.
    ///
    /// If type fits in the storage, value will be unboxed.
    /// Otherwise it will be stored as boxed, but no allocation will be performed.
    #[inline]
    pub fn from_box<T>(boxed: Box<T>) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        SmallAny {
            inner: LocalSmallAny::from_box(boxed),
        }
    }

    #[inline]
    pub fn assign<T>(&mut self, value: T)
    where
        T: Clone + Send + Sync + 'static,
    {
        self.inner.assign(value);
    }

    #[inline]
    pub fn emplace<T>(&mut self, value: T) -> &mut T
    where
        T: Clone + Send + Sync + 'static,
    {
        self.inner.emplace(value)
    }

    #[inline]
    pub fn emplace_with<T, F>(&mut self, f: F) -> &mut T
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> T,
    {
        self.inner.emplace_with(f)
    }

    #[inline]
    pub fn emplace_from_iter<T, I>(&mut self, iter: I) -> &mut T
    where
        T: FromIterator<I::Item> + Clone + Send + Sync + 'static,
        I: IntoIterator,
    {
        self.inner.emplace_from_iter::<T, I>(iter)
    }

    /// Replaces the stored value with the value returned by `f`, if it succeeds.
    /// On error the holder keeps its previous value.
    #[inline]
    pub fn try_emplace_with<T, E, F>(&mut self, f: F) -> Result<&mut T, E>
    where
        T: Clone + Send + Sync + 'static,
        F: FnOnce() -> Result<T, E>,
    {
        self.inner.try_emplace_with(f)
    }

    #[inline]
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    #[inline]
    pub fn take(&mut self) -> Self {
        SmallAny {
            inner: self.inner.take(),
        }
    }

    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        self.inner.swap(&mut other.inner);
    }

    #[inline]
    pub fn has_value(&self) -> bool {
        self.inner.has_value()
    }

    #[inline]
    pub fn type_tag(&self) -> TypeTag {
        self.inner.type_tag()
    }

    #[inline]
    pub fn origin(&self) -> Option<StorageOrigin> {
        self.inner.origin()
    }

    #[inline]
    pub fn is<T>(&self) -> bool
    where
        T: 'static,
    {
        self.inner.is::<T>()
    }

    #[inline]
    pub fn downcast_ref<T>(&self) -> Option<&T>
    where
        T: 'static,
    {
        self.inner.downcast_ref()
    }

    #[inline]
    pub fn downcast_mut<T>(&mut self) -> Option<&mut T>
    where
        T: 'static,
    {
        self.inner.downcast_mut()
    }

    #[inline]
    pub fn cast_ref<T>(&self) -> Result<&T, BadCast>
    where
        T: 'static,
    {
        self.inner.cast_ref()
    }

    #[inline]
    pub fn cast_mut<T>(&mut self) -> Result<&mut T, BadCast>
    where
        T: 'static,
    {
        self.inner.cast_mut()
    }

    #[inline]
    pub fn cast<T>(&self) -> Result<T, BadCast>
    where
        T: Clone + 'static,
    {
        self.inner.cast()
    }

    #[inline]
    pub fn take_value<T>(&mut self) -> Result<T, BadCast>
    where
        T: 'static,
    {
        self.inner.take_value()
    }

    /// Returns the stored value if it is of type `T`.
    /// Otherwise return self back.
    #[inline]
    pub fn downcast<T>(self) -> Result<T, Self>
    where
        T: 'static,
    {
        if self.is::<T>() {
            Ok(unsafe { self.inner.downcast_unchecked() })
        } else {
            Err(self)
        }
    }

    /// Returns reference to the stored value without type checking.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the holder is not empty and the type is correct.
    #[inline]
    pub unsafe fn downcast_ref_unchecked<T>(&self) -> &T
    where
        T: 'static,
    {
        unsafe { self.inner.downcast_ref_unchecked() }
    }

    /// Returns mutable reference to the stored value without type checking.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the holder is not empty and the type is correct.
    #[inline]
    pub unsafe fn downcast_mut_unchecked<T>(&mut self) -> &mut T
    where
        T: 'static,
    {
        unsafe { self.inner.downcast_mut_unchecked() }
    }

    /// Returns the stored value without type checking.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the holder is not empty and the type is correct.
    #[inline]
    pub unsafe fn downcast_unchecked<T>(self) -> T
    where
        T: 'static,
    {
        unsafe { self.inner.downcast_unchecked() }
    }
}

/// Construct a [`SmallAny`] holding the value returned by `f`.
///
/// ```
/// # use smallany::{make_any, SmallAny};
/// let a: SmallAny = make_any(|| [7u8; 64]);
///
/// assert_eq!(a.downcast_ref::<[u8; 64]>().unwrap()[63], 7);
/// ```
#[inline]
pub fn make_any<T, const N: usize>(f: impl FnOnce() -> T) -> SmallAny<N>
where
    T: Clone + Send + Sync + 'static,
{
    SmallAny::new_with(f)
}

/// Construct a [`LocalSmallAny`] holding the value returned by `f`.
#[inline]
pub fn make_local_any<T, const N: usize>(f: impl FnOnce() -> T) -> LocalSmallAny<N>
where
    T: Clone + 'static,
{
    LocalSmallAny::new_with(f)
}

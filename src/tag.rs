use core::{
    any::{type_name, TypeId},
    fmt,
    hash::{Hash, Hasher},
};

// Never instantiated, only its `TypeId` is used to mark an empty holder.
enum Vacant {}

/// Runtime identity of the value stored in a holder.
///
/// Two tags are equal only if they were produced for exactly the same type.
/// The type name is kept for diagnostics and does not take part in comparison.
#[derive(Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    /// Returns the tag of type `T`.
    ///
    /// ```
    /// # use smallany::TypeTag;
    /// assert_eq!(TypeTag::of::<u32>(), TypeTag::of::<u32>());
    /// assert_ne!(TypeTag::of::<u32>(), TypeTag::of::<i32>());
    /// ```
    #[inline]
    pub fn of<T: ?Sized + 'static>() -> Self {
        TypeTag {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// Returns the sentinel tag reported by empty holders.
    ///
    /// It never equals the tag of a real type.
    #[inline]
    pub fn empty() -> Self {
        TypeTag {
            id: TypeId::of::<Vacant>(),
            name: "<empty>",
        }
    }

    /// Returns `true` if this is the empty sentinel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.id == TypeId::of::<Vacant>()
    }

    /// Returns `true` if this tag was produced for `T`.
    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// Returns the name of the type, as given by [`core::any::type_name`].
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Default for TypeTag {
    #[inline]
    fn default() -> Self {
        TypeTag::empty()
    }
}

impl PartialEq for TypeTag {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeTag").field(&self.name).finish()
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

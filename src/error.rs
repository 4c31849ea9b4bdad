use core::fmt;

use crate::TypeTag;

/// Requested type does not match the type stored in a holder.
///
/// Extracting from an empty holder is a mismatch as well,
/// in which case [`BadCast::stored`] is the empty sentinel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BadCast {
    requested: TypeTag,
    stored: TypeTag,
}

impl BadCast {
    pub(crate) fn new(requested: TypeTag, stored: TypeTag) -> Self {
        BadCast { requested, stored }
    }

    /// Type the caller asked for.
    pub fn requested(&self) -> TypeTag {
        self.requested
    }

    /// Type that was actually stored, or the empty sentinel.
    pub fn stored(&self) -> TypeTag {
        self.stored
    }
}

impl fmt::Display for BadCast {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.stored.is_empty() {
            write!(f, "bad cast to `{}`: holder is empty", self.requested)
        } else {
            write!(
                f,
                "bad cast to `{}`: holder contains `{}`",
                self.requested, self.stored
            )
        }
    }
}

impl core::error::Error for BadCast {}

use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::num::NonZeroU32;

/// Compact handle for one registered phase variable.
///
/// Handles replace string paths once a variable is registered: a typo'd
/// name cannot survive past phase construction, and the kind marker keeps
/// handles for different variable kinds apart at compile time, so a
/// `ControlId` cannot be used to look up a state.
pub struct Id<K> {
    raw: NonZeroU32,
    _kind: PhantomData<K>,
}

impl<K> Id<K> {
    /// Create a handle from a 0-based index by storing index+1.
    pub fn from_index(index: u32) -> Self {
        Self {
            raw: NonZeroU32::MIN.saturating_add(index),
            _kind: PhantomData,
        }
    }

    /// Recover the 0-based index.
    pub fn index(self) -> u32 {
        self.raw.get() - 1
    }
}

// Manual impls: the derives would put bounds on the marker type.
impl<K> Clone for Id<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Id<K> {}

impl<K> PartialEq for Id<K> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<K> Eq for Id<K> {}

impl<K> Hash for Id<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<K> fmt::Debug for Id<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.index())
    }
}

impl<K> fmt::Display for Id<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Marker kinds for the handle types below.
pub enum StateKind {}
pub enum ControlKind {}
pub enum ParamKind {}

pub type StateId = Id<StateKind>;
pub type ControlId = Id<ControlKind>;
pub type ParamId = Id<ParamKind>;

use core::fmt::Debug;
use core::hash::Hash;

/// Bound for item identities: stable, globally unique, cheap to clone.
pub trait ItemKey: Hash + Eq + Clone + Debug {}
impl<T: Hash + Eq + Clone + Debug> ItemKey for T {}

//! Re-exports of performance-oriented collection types.

pub use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// SmallVec sized for index column lists (usually <4).
pub type SmallVec4<T> = SmallVec<[T; 4]>;

//! Bidirectional maps and a lazily populated instance registry.

mod collection;
mod error;
mod factory;
mod iter_ext;
mod map_ext;
mod one_to_many;
mod one_to_one;
mod registry;
mod slice_ext;
#[cfg(feature = "snapshot")]
mod snapshot;

pub use collection::Collection;
pub use error::{MapError, Side};
pub use factory::LazyInstanceFactory;
pub use iter_ext::MapIteratorExt;
pub use map_ext::MapExt;
pub use one_to_many::OneToManyMap;
pub use one_to_one::OneToOneMap;
pub use registry::InstanceRegistry;
pub use slice_ext::SliceExt;
#[cfg(feature = "snapshot")]
pub use snapshot::SnapshotError;

//! subtype-core: deterministic mapping of bank transaction descriptions to categories

pub mod category;
pub mod entry;
pub mod error;
pub mod normalize;
pub mod resolver;

pub use category::Category;
pub use entry::{DuplicatePattern, Entry, Match};
pub use error::{InvalidTableError, UnknownNormalize};
pub use normalize::Normalize;
pub use resolver::{CategoryResolver, ClassificationResult, ResolverOptions};

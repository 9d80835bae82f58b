//! Catalog record types.

mod datafile;
mod dataset;
mod investigation;
mod sample;

pub use datafile::Datafile;
pub use dataset::Dataset;
pub use investigation::Investigation;
pub use sample::Sample;

use crate::catalog::MetadataRegistry;
use crate::error::Result;

/// Maximum length of names, titles and other short strings.
pub const NAME_MAX_LENGTH: usize = 255;

/// Maximum length of free-text descriptions and locations.
pub const DESCRIPTION_MAX_LENGTH: usize = 4000;

/// Build the constraint sets of every catalog record type.
pub fn register_all(registry: &MetadataRegistry) -> Result<()> {
    registry.register::<Investigation>()?;
    registry.register::<Dataset>()?;
    registry.register::<Datafile>()?;
    registry.register::<Sample>()?;
    Ok(())
}

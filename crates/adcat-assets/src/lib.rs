//! Maps `(category, filename)` asset requests onto files under a single
//! assets root, refusing anything that resolves outside it.

mod error;
mod resolver;

pub use error::AssetError;
pub use resolver::AssetResolver;

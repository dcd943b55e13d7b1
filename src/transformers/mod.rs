//! Link transformers
//!
//! Transformers post-process the raw attribute values an extractor selected
//! from a page, with the fetched page available for context:
//!
//! - [`TrimmingTransformer`]: trims whitespace, drops empty values
//! - [`ResolvingTransformer`]: makes links absolute and drops non-HTTP(S) ones
//! - [`TransformerGroup`]: runs transformers one after another

mod group;
mod resolving;
mod trimming;

pub use group::TransformerGroup;
pub use resolving::ResolvingTransformer;
pub(crate) use trimming::trim_links;
pub use trimming::TrimmingTransformer;

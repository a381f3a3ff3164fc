#![forbid(unsafe_code)]

mod builder;
mod error;
mod fragment;
mod type_map;
mod walker;

pub use builder::{TypeAnnotations, TypeMapBuilder};
pub use error::Error;
pub use fragment::{BlockedOn, FragmentResolution, FragmentResolver, UnresolvedFragment};
pub use type_map::{HoverType, TypeMap, TypeNode};

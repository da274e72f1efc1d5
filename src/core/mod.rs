pub mod compare;
pub mod envelope;
pub mod fetcher;
pub mod service;
pub mod transform;

pub use crate::domain::model::{PokemonRef, PokemonSummary, UpstreamPokemon, UpstreamType};
pub use crate::domain::ports::{ConfigProvider, PokemonSource, Storage, SummarySource, TypeSource};
pub use crate::utils::error::Result;

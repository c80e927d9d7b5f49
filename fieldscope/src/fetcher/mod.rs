pub mod elasticsearch;
pub mod traits;

pub use elasticsearch::ElasticsearchFetcher;
pub use traits::MappingFetcher;

pub mod areas;
pub mod fetcher;

pub use areas::resolve_area_id;
pub use fetcher::HttpPageFetcher;

pub mod aggregation;
pub mod dates;
pub mod fetching;
pub mod images;
pub mod news;
pub mod normalize;
pub mod sources;

pub use news::NewsService;

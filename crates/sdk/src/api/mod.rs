//! API endpoint groups.

mod categories;
mod ideas;
mod search;
mod tags;
mod topics;

pub use categories::CategoriesApi;
pub use ideas::IdeasApi;
pub use search::SearchApi;
pub use tags::TagsApi;
pub use topics::TopicsApi;

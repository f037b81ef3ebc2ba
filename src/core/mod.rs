pub mod bookmarks;
pub mod categories;
pub mod detail;
pub mod explore;

#[cfg(test)]
pub(crate) mod test_support;

pub use bookmarks::BookmarkStore;
pub use detail::{DetailState, DetailViewModel};
pub use explore::{ExploreState, ExploreViewModel};

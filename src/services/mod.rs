pub mod analytics;
pub mod catalog;
pub mod fallback;
pub mod notifications;
pub mod recent_searches;
pub mod session;
pub mod toasts;
pub mod watchlist;

pub use analytics::AnalyticsService;
pub use catalog::MovieCatalog;
pub use notifications::{NotificationSettings, NotificationStore};
pub use recent_searches::RecentSearches;
pub use session::SessionStore;
pub use toasts::ToastQueue;
pub use watchlist::{derive_view, unique_genres, SortKey, SortOrder, WatchlistQuery, WatchlistService};

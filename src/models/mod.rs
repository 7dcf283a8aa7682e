mod analytics;
mod movie;
mod notification;
mod user;

pub use analytics::{
    ActivityAction, ComparisonStats, GenreStats, MonthlyActivity, RatingDistribution,
    RecentActivity, ViewingStats,
};
pub use movie::{genre_id, genre_name, Genre, Movie, MovieRecommendations, RateRequest, GENRES};
pub use notification::{
    Notification, NotificationKind, NotificationMetadata, NotificationPreferences, Toast,
    ToastKind,
};
pub use user::{
    ApiErrorBody, AuthResponse, LoginRequest, RefreshRequest, RefreshResponse, RegisterRequest,
    Session, SessionState, User,
};

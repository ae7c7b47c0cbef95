use crate::error::SourceError;
use crate::models::Activity;
use async_trait::async_trait;

mod client;
pub use client::BacklogClient;

/// Fetch parameters the source honors. The service applies its own paging
/// limits on top of `count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    pub count: u32,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self { count: 100 }
    }
}

/// Where activities come from. Implementations return recent activities for
/// one user; callers make no assumption about sort order beyond being able
/// to filter by day.
#[async_trait]
pub trait ActivitySource {
    async fn fetch_user_activities(
        &self,
        user_id: u64,
        options: FetchOptions,
    ) -> Result<Vec<Activity>, SourceError>;
}

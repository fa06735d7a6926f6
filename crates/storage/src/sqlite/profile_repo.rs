use buddy_core::model::{UserId, UserProfile};

use super::SqliteRepository;
use super::mapping::{conn, map_profile_row};
use crate::repository::{ProfileRepository, StorageError};

#[async_trait::async_trait]
impl ProfileRepository for SqliteRepository {
    async fn get_profile(&self, user_id: &UserId) -> Result<Option<UserProfile>, StorageError> {
        let row = sqlx::query(
            r"
                SELECT user_id, display_name, email, photo_url, created_at
                FROM profiles
                WHERE user_id = ?1
            ",
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_profile_row).transpose()
    }

    async fn upsert_profile(&self, profile: &UserProfile) -> Result<UserProfile, StorageError> {
        let row = sqlx::query(
            r"
                INSERT INTO profiles (user_id, display_name, email, photo_url, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                ON CONFLICT(user_id) DO UPDATE SET
                    display_name = COALESCE(excluded.display_name, profiles.display_name),
                    email = COALESCE(excluded.email, profiles.email),
                    photo_url = COALESCE(excluded.photo_url, profiles.photo_url)
                RETURNING user_id, display_name, email, photo_url, created_at
            ",
        )
        .bind(profile.user_id().as_str())
        .bind(profile.display_name())
        .bind(profile.email())
        .bind(profile.photo_url())
        .bind(profile.created_at())
        .fetch_one(&self.pool)
        .await
        .map_err(conn)?;

        map_profile_row(&row)
    }
}

use buddy_core::model::{NewQuizResult, QuizResult, QuizResultId, UserId, UserProfile};
use sqlx::Row;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

fn u32_from_i64(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

pub(crate) fn map_profile_row(row: &sqlx::sqlite::SqliteRow) -> Result<UserProfile, StorageError> {
    let user_id = UserId::new(row.try_get::<String, _>("user_id").map_err(ser)?).map_err(ser)?;
    UserProfile::from_persisted(
        user_id,
        row.try_get("display_name").map_err(ser)?,
        row.try_get("email").map_err(ser)?,
        row.try_get("photo_url").map_err(ser)?,
        row.try_get("created_at").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_quiz_result_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<QuizResult, StorageError> {
    let id: i64 = row.try_get("id").map_err(ser)?;
    let user_id = UserId::new(row.try_get::<String, _>("user_id").map_err(ser)?).map_err(ser)?;
    let score = u32_from_i64("score", row.try_get::<i64, _>("score").map_err(ser)?)?;
    let total = u32_from_i64("total", row.try_get::<i64, _>("total").map_err(ser)?)?;

    let result = NewQuizResult::new(
        user_id,
        row.try_get::<String, _>("topic").map_err(ser)?,
        score,
        total,
        row.try_get("completed_at").map_err(ser)?,
    )
    .map_err(ser)?;
    Ok(result.with_id(QuizResultId::new(id)))
}

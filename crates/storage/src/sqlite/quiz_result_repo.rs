use buddy_core::model::{NewQuizResult, QuizResult, QuizResultId, UserId};

use super::SqliteRepository;
use super::mapping::{conn, map_quiz_result_row};
use crate::repository::{QuizResultRepository, StorageError};

#[async_trait::async_trait]
impl QuizResultRepository for SqliteRepository {
    async fn append_result(&self, result: &NewQuizResult) -> Result<QuizResult, StorageError> {
        let res = sqlx::query(
            r"
                INSERT INTO quiz_results (user_id, topic, score, total, completed_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(result.user_id().as_str())
        .bind(result.topic())
        .bind(i64::from(result.score()))
        .bind(i64::from(result.total()))
        .bind(result.completed_at())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(result
            .clone()
            .with_id(QuizResultId::new(res.last_insert_rowid())))
    }

    async fn list_results(
        &self,
        user_id: &UserId,
        limit: u32,
    ) -> Result<Vec<QuizResult>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT id, user_id, topic, score, total, completed_at
                FROM quiz_results
                WHERE user_id = ?1
                ORDER BY completed_at DESC, id DESC
                LIMIT ?2
            ",
        )
        .bind(user_id.as_str())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_quiz_result_row).collect()
    }
}

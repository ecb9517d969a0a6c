//! PostgreSQL implementation of ChatMessageRepository.
//!
//! One row per chat message in `chat_messages`; intent descriptors and dispatch
//! results are stored as JSONB in their flat wire form.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::domain::chat::{ChatMessage, IntentData};
use crate::domain::foundation::{MessageId, SessionId, Timestamp, UserId};
use crate::ports::{ChatMessageRepository, RepositoryError};

const SCHEMA: [&str; 2] = [
    r#"
    CREATE TABLE IF NOT EXISTS chat_messages (
        id UUID PRIMARY KEY,
        session_id TEXT NOT NULL,
        user_id TEXT NOT NULL,
        message TEXT NOT NULL,
        response TEXT NOT NULL,
        intent_data JSONB NOT NULL,
        approved BOOLEAN,
        edited_data JSONB,
        dispatch_result JSONB,
        created_at TIMESTAMPTZ NOT NULL
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_chat_messages_session_created
        ON chat_messages (session_id, created_at)
    "#,
];

const SELECT_COLUMNS: &str = "id, session_id, user_id, message, response, intent_data, \
                              approved, edited_data, dispatch_result, created_at";

/// PostgreSQL implementation of ChatMessageRepository.
#[derive(Clone)]
pub struct PostgresChatMessageRepository {
    pool: PgPool,
}

impl PostgresChatMessageRepository {
    /// Creates a new PostgresChatMessageRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the table and index if they do not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), RepositoryError> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    RepositoryError::Database(format!("Failed to ensure schema: {}", e))
                })?;
        }
        Ok(())
    }
}

#[async_trait]
impl ChatMessageRepository for PostgresChatMessageRepository {
    async fn save(&self, message: &ChatMessage) -> Result<(), RepositoryError> {
        let intent_data = encode(message.intent_data())?;
        let edited_data = message.edited_data().map(encode).transpose()?;

        sqlx::query(
            r#"
            INSERT INTO chat_messages (
                id, session_id, user_id, message, response, intent_data,
                approved, edited_data, dispatch_result, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(message.id().as_uuid())
        .bind(message.session_id().as_str())
        .bind(message.user_id().as_str())
        .bind(message.message())
        .bind(message.response())
        .bind(intent_data)
        .bind(message.approved())
        .bind(edited_data)
        .bind(message.dispatch_result().cloned())
        .bind(message.timestamp().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(format!("Failed to insert chat message: {}", e)))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &MessageId) -> Result<Option<ChatMessage>, RepositoryError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM chat_messages WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(format!("Failed to fetch chat message: {}", e)))?;

        row.as_ref()
            .map(|row| ChatMessageRecord::from_row(row)?.into_message())
            .transpose()
    }

    async fn find_by_session(
        &self,
        session_id: &SessionId,
        limit: usize,
    ) -> Result<Vec<ChatMessage>, RepositoryError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let rows = sqlx::query(&format!(
            "SELECT {} FROM chat_messages WHERE session_id = $1 \
             ORDER BY created_at ASC, id ASC LIMIT $2",
            SELECT_COLUMNS
        ))
        .bind(session_id.as_str())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(format!("Failed to fetch history: {}", e)))?;

        rows.iter()
            .map(|row| ChatMessageRecord::from_row(row)?.into_message())
            .collect()
    }

    async fn update(&self, message: &ChatMessage) -> Result<(), RepositoryError> {
        let edited_data = message.edited_data().map(encode).transpose()?;

        let result = sqlx::query(
            r#"
            UPDATE chat_messages SET
                approved = $2,
                edited_data = $3,
                dispatch_result = $4
            WHERE id = $1
            "#,
        )
        .bind(message.id().as_uuid())
        .bind(message.approved())
        .bind(edited_data)
        .bind(message.dispatch_result().cloned())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(format!("Failed to update chat message: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(message.id()));
        }

        Ok(())
    }

    async fn delete_by_session(&self, session_id: &SessionId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM chat_messages WHERE session_id = $1")
            .bind(session_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(format!("Failed to clear history: {}", e)))?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        Ok(())
    }
}

fn encode(intent: &IntentData) -> Result<Value, RepositoryError> {
    intent
        .to_value()
        .map_err(|e| RepositoryError::Database(format!("Failed to encode intent: {}", e)))
}

/// Raw column values of one `chat_messages` row.
#[derive(Debug, Clone)]
struct ChatMessageRecord {
    id: Uuid,
    session_id: String,
    user_id: String,
    message: String,
    response: String,
    intent_data: Value,
    approved: Option<bool>,
    edited_data: Option<Value>,
    dispatch_result: Option<Value>,
    created_at: DateTime<Utc>,
}

impl ChatMessageRecord {
    fn from_row(row: &PgRow) -> Result<Self, RepositoryError> {
        let read = |e: sqlx::Error| RepositoryError::Database(format!("Failed to read row: {}", e));

        Ok(Self {
            id: row.try_get("id").map_err(read)?,
            session_id: row.try_get("session_id").map_err(read)?,
            user_id: row.try_get("user_id").map_err(read)?,
            message: row.try_get("message").map_err(read)?,
            response: row.try_get("response").map_err(read)?,
            intent_data: row.try_get("intent_data").map_err(read)?,
            approved: row.try_get("approved").map_err(read)?,
            edited_data: row.try_get("edited_data").map_err(read)?,
            dispatch_result: row.try_get("dispatch_result").map_err(read)?,
            created_at: row.try_get("created_at").map_err(read)?,
        })
    }

    fn into_message(self) -> Result<ChatMessage, RepositoryError> {
        let corrupt = |what: &str, err: String| {
            RepositoryError::Corrupt(format!("message {}: {} ({})", self.id, what, err))
        };

        let session_id =
            SessionId::new(self.session_id.clone()).map_err(|e| corrupt("session_id", e.to_string()))?;
        let user_id =
            UserId::new(self.user_id.clone()).map_err(|e| corrupt("user_id", e.to_string()))?;
        let intent_data = IntentData::from_value(self.intent_data.clone())
            .map_err(|e| corrupt("intent_data", e.to_string()))?;
        let edited_data = self
            .edited_data
            .clone()
            .map(IntentData::from_value)
            .transpose()
            .map_err(|e| corrupt("edited_data", e.to_string()))?;

        Ok(ChatMessage::reconstitute(
            MessageId::from_uuid(self.id),
            session_id,
            user_id,
            self.message,
            self.response,
            intent_data,
            self.approved,
            edited_data,
            self.dispatch_result,
            Timestamp::from_datetime(self.created_at),
        ))
    }
}

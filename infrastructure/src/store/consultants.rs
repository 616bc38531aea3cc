use super::sqlite::backend;
use async_trait::async_trait;
use consult_domain::{Consultant, ConsultantId, ConsultantRepository, StoreError};
use sqlx::SqlitePool;

const ROTATION_CURSOR_KEY: &str = "rotation_cursor";

/// Internal row type for sqlx mapping.
#[derive(sqlx::FromRow)]
struct ConsultantRow {
    id: i64,
    display_name: Option<String>,
    display_handle: Option<String>,
    assigned_count: i64,
    answered_count: i64,
}

impl TryFrom<ConsultantRow> for Consultant {
    type Error = StoreError;

    fn try_from(r: ConsultantRow) -> Result<Self, StoreError> {
        let counter = |name: &str, value: i64| {
            u64::try_from(value)
                .map_err(|_| StoreError::Corrupt(format!("consultant {}: {name} {value}", r.id)))
        };
        Ok(Self {
            id: ConsultantId::new(r.id),
            display_name: r.display_name.clone(),
            display_handle: r.display_handle.clone(),
            assigned_count: counter("assigned_count", r.assigned_count)?,
            answered_count: counter("answered_count", r.answered_count)?,
        })
    }
}

/// SQLite-backed consultant counters and rotation cursor.
pub struct SqliteConsultantStore {
    pool: SqlitePool,
}

impl SqliteConsultantStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConsultantRepository for SqliteConsultantStore {
    async fn ensure(&self, ids: &[ConsultantId]) -> Result<(), StoreError> {
        for id in ids {
            sqlx::query("INSERT INTO consultants (id) VALUES (?) ON CONFLICT(id) DO NOTHING")
                .bind(id.get())
                .execute(&self.pool)
                .await
                .map_err(backend)?;
        }
        Ok(())
    }

    async fn get(&self, id: ConsultantId) -> Result<Option<Consultant>, StoreError> {
        let row = sqlx::query_as::<_, ConsultantRow>("SELECT * FROM consultants WHERE id = ?")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?;
        row.map(TryInto::try_into).transpose()
    }

    async fn list(&self) -> Result<Vec<Consultant>, StoreError> {
        let rows = sqlx::query_as::<_, ConsultantRow>("SELECT * FROM consultants ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(backend)?;
        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn increment_assigned(&self, id: ConsultantId) -> Result<(), StoreError> {
        sqlx::query(
            r#"INSERT INTO consultants (id, assigned_count) VALUES (?, 1)
               ON CONFLICT(id) DO UPDATE SET assigned_count = assigned_count + 1"#,
        )
        .bind(id.get())
        .execute(&self.pool)
        .await
        .map_err(backend)?;
        Ok(())
    }

    async fn increment_answered(&self, id: ConsultantId) -> Result<(), StoreError> {
        sqlx::query(
            r#"INSERT INTO consultants (id, answered_count) VALUES (?, 1)
               ON CONFLICT(id) DO UPDATE SET answered_count = answered_count + 1"#,
        )
        .bind(id.get())
        .execute(&self.pool)
        .await
        .map_err(backend)?;
        Ok(())
    }

    async fn update_identity(
        &self,
        id: ConsultantId,
        display_name: Option<&str>,
        display_handle: Option<&str>,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"INSERT INTO consultants (id, display_name, display_handle) VALUES (?, ?, ?)
               ON CONFLICT(id) DO UPDATE SET
                 display_name = excluded.display_name,
                 display_handle = excluded.display_handle"#,
        )
        .bind(id.get())
        .bind(display_name)
        .bind(display_handle)
        .execute(&self.pool)
        .await
        .map_err(backend)?;
        Ok(())
    }

    async fn rotation_cursor(&self) -> Result<usize, StoreError> {
        let value: Option<(String,)> = sqlx::query_as("SELECT value FROM settings WHERE key = ?")
            .bind(ROTATION_CURSOR_KEY)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?;
        match value {
            None => Ok(0),
            Some((raw,)) => raw
                .parse()
                .map_err(|_| StoreError::Corrupt(format!("{ROTATION_CURSOR_KEY}: {raw:?}"))),
        }
    }

    async fn set_rotation_cursor(&self, index: usize) -> Result<(), StoreError> {
        sqlx::query(
            r#"INSERT INTO settings (key, value) VALUES (?, ?)
               ON CONFLICT(key) DO UPDATE SET value = excluded.value"#,
        )
        .bind(ROTATION_CURSOR_KEY)
        .bind(index.to_string())
        .execute(&self.pool)
        .await
        .map_err(backend)?;
        Ok(())
    }
}

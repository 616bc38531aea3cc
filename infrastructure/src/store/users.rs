use super::sqlite::backend;
use async_trait::async_trait;
use consult_domain::{
    Assignment, BillingMonth, ConsultantId, Profile, StoreError, User, UserId, UserRepository,
};
use sqlx::SqlitePool;

/// Internal row type for sqlx mapping.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    full_name: Option<String>,
    phone: Option<String>,
    city: Option<String>,
    message_count: i64,
    last_message_month: Option<i64>,
    assigned_consultant: Option<i64>,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(r: UserRow) -> Result<Self, StoreError> {
        let message_count = u32::try_from(r.message_count).map_err(|_| {
            StoreError::Corrupt(format!("user {}: message_count {}", r.id, r.message_count))
        })?;
        let last_message_month = r
            .last_message_month
            .map(|key| {
                BillingMonth::from_key(key).ok_or_else(|| {
                    StoreError::Corrupt(format!("user {}: last_message_month {key}", r.id))
                })
            })
            .transpose()?;

        Ok(Self {
            id: UserId::new(r.id),
            profile: Profile {
                full_name: r.full_name,
                phone: r.phone,
                city: r.city,
            },
            message_count,
            last_message_month,
            assignment: Assignment::from_option(r.assigned_consultant.map(ConsultantId::new)),
        })
    }
}

/// SQLite-backed user directory.
pub struct SqliteUserStore {
    pool: SqlitePool,
}

impl SqliteUserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserStore {
    async fn get_or_create(&self, id: UserId) -> Result<User, StoreError> {
        sqlx::query("INSERT INTO users (id) VALUES (?) ON CONFLICT(id) DO NOTHING")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(backend)?;

        let row = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = ?")
            .bind(id.get())
            .fetch_one(&self.pool)
            .await
            .map_err(backend)?;
        row.try_into()
    }

    async fn update_profile(&self, id: UserId, profile: &Profile) -> Result<(), StoreError> {
        sqlx::query(
            r#"INSERT INTO users (id, full_name, phone, city)
               VALUES (?, ?, ?, ?)
               ON CONFLICT(id) DO UPDATE SET
                 full_name = excluded.full_name,
                 phone = excluded.phone,
                 city = excluded.city"#,
        )
        .bind(id.get())
        .bind(&profile.full_name)
        .bind(&profile.phone)
        .bind(&profile.city)
        .execute(&self.pool)
        .await
        .map_err(backend)?;
        Ok(())
    }

    async fn save(&self, user: &User) -> Result<(), StoreError> {
        sqlx::query(
            r#"INSERT INTO users
                 (id, full_name, phone, city, message_count, last_message_month, assigned_consultant)
               VALUES (?, ?, ?, ?, ?, ?, ?)
               ON CONFLICT(id) DO UPDATE SET
                 full_name = excluded.full_name,
                 phone = excluded.phone,
                 city = excluded.city,
                 message_count = excluded.message_count,
                 last_message_month = excluded.last_message_month,
                 assigned_consultant = excluded.assigned_consultant"#,
        )
        .bind(user.id.get())
        .bind(&user.profile.full_name)
        .bind(&user.profile.phone)
        .bind(&user.profile.city)
        .bind(i64::from(user.message_count))
        .bind(user.last_message_month.map(|m| m.as_key()))
        .bind(user.assignment.consultant().map(|c| c.get()))
        .execute(&self.pool)
        .await
        .map_err(backend)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::sqlite::{MEMORY_DATABASE, connect};

    async fn store() -> SqliteUserStore {
        SqliteUserStore::new(connect(MEMORY_DATABASE).await.unwrap())
    }

    #[tokio::test]
    async fn test_get_or_create_returns_fresh_user() {
        let store = store().await;
        let user = store.get_or_create(UserId::new(5)).await.unwrap();
        assert_eq!(user, User::new(UserId::new(5)));
        assert!(!user.is_registered());
    }

    #[tokio::test]
    async fn test_save_and_reload() {
        let store = store().await;
        let mut user = store.get_or_create(UserId::new(5)).await.unwrap();
        user.profile = Profile::new("Sara Ahmadi", "09120000000", "Shiraz");
        user.message_count = 2;
        user.last_message_month = BillingMonth::new(2026, 11);
        user.assignment = Assignment::Assigned(ConsultantId::new(77));
        store.save(&user).await.unwrap();

        let reloaded = store.get_or_create(UserId::new(5)).await.unwrap();
        assert_eq!(reloaded, user);
    }

    #[tokio::test]
    async fn test_update_profile_keeps_quota_fields() {
        let store = store().await;
        let mut user = store.get_or_create(UserId::new(9)).await.unwrap();
        user.message_count = 1;
        user.last_message_month = BillingMonth::new(2026, 3);
        store.save(&user).await.unwrap();

        let profile = Profile::new("Reza Karimi", "09350000000", "Tabriz");
        store.update_profile(UserId::new(9), &profile).await.unwrap();

        let reloaded = store.get_or_create(UserId::new(9)).await.unwrap();
        assert_eq!(reloaded.profile, profile);
        assert_eq!(reloaded.message_count, 1);
        assert!(reloaded.is_registered());
    }

    #[tokio::test]
    async fn test_corrupt_month_is_reported() {
        let pool = connect(MEMORY_DATABASE).await.unwrap();
        sqlx::query("INSERT INTO users (id, last_message_month) VALUES (1, 202613)")
            .execute(&pool)
            .await
            .unwrap();

        let store = SqliteUserStore::new(pool);
        assert!(matches!(
            store.get_or_create(UserId::new(1)).await,
            Err(StoreError::Corrupt(_))
        ));
    }
}

//! Key-value table operations
//!
//! Plain get/set accessors over `kv_store`, plus a transactional batch write.

use sqlx::{Pool, Sqlite};

/// Get the raw value stored under `key`
pub async fn get_value(db: &Pool<Sqlite>, key: &str) -> Result<Option<String>, sqlx::Error> {
    let row: Option<(String,)> = sqlx::query_as("SELECT value FROM kv_store WHERE key = ?")
        .bind(key)
        .fetch_optional(db)
        .await?;

    Ok(row.map(|(value,)| value))
}

/// Upsert a single key
pub async fn set_value(db: &Pool<Sqlite>, key: &str, value: &str) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT OR REPLACE INTO kv_store (key, value) VALUES (?, ?)")
        .bind(key)
        .bind(value)
        .execute(db)
        .await?;

    Ok(())
}

/// Upsert several keys in one transaction (all or nothing)
pub async fn set_values(db: &Pool<Sqlite>, entries: &[(String, String)]) -> Result<(), sqlx::Error> {
    let mut tx = db.begin().await?;

    for (key, value) in entries {
        sqlx::query("INSERT OR REPLACE INTO kv_store (key, value) VALUES (?, ?)")
            .bind(key)
            .bind(value)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_test_db() -> Pool<Sqlite> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await
            .unwrap();
        crate::db::init_tables(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let pool = setup_test_db().await;
        assert_eq!(get_value(&pool, "absent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let pool = setup_test_db().await;
        set_value(&pool, "k", "v1").await.unwrap();
        set_value(&pool, "k", "v2").await.unwrap();
        assert_eq!(get_value(&pool, "k").await.unwrap(), Some("v2".to_string()));
    }

    #[tokio::test]
    async fn test_set_values_writes_all() {
        let pool = setup_test_db().await;
        set_values(
            &pool,
            &[
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string()),
            ],
        )
        .await
        .unwrap();

        assert_eq!(get_value(&pool, "a").await.unwrap(), Some("1".to_string()));
        assert_eq!(get_value(&pool, "b").await.unwrap(), Some("2".to_string()));
    }
}

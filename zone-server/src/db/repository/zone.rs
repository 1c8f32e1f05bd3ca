//! Zone Repository

use async_trait::async_trait;
use shared::models::{DEFAULT_ZONE_COLOR, LatLng, Zone, ZoneCreate, ZoneUpdate};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use crate::zoning::ZoneStore;

const ZONE_COLUMNS: &str = "id, name, description, color, coordinates, created_at, updated_at";

/// Zone row as stored; `coordinates` is JSON text
#[derive(Debug, sqlx::FromRow)]
struct ZoneRow {
    id: i64,
    name: String,
    description: Option<String>,
    color: String,
    coordinates: String,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<ZoneRow> for Zone {
    type Error = RepoError;

    fn try_from(row: ZoneRow) -> Result<Self, Self::Error> {
        let coordinates: Vec<LatLng> = serde_json::from_str(&row.coordinates)?;
        Ok(Zone {
            id: row.id,
            name: row.name,
            description: row.description,
            color: row.color,
            coordinates,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Clone)]
pub struct ZoneRepository {
    pool: SqlitePool,
}

impl ZoneRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ZoneStore for ZoneRepository {
    async fn find_all(&self) -> RepoResult<Vec<Zone>> {
        let rows = sqlx::query_as::<_, ZoneRow>(&format!(
            "SELECT {ZONE_COLUMNS} FROM zone ORDER BY name, id"
        ))
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Zone::try_from).collect()
    }

    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Zone>> {
        let row = sqlx::query_as::<_, ZoneRow>(&format!(
            "SELECT {ZONE_COLUMNS} FROM zone WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Zone::try_from).transpose()
    }

    async fn create(&self, data: ZoneCreate) -> RepoResult<Zone> {
        let id = shared::util::snowflake_id();
        let now = shared::util::now_millis();
        let coordinates = serde_json::to_string(&data.coordinates)?;
        let color = data.color.unwrap_or_else(|| DEFAULT_ZONE_COLOR.to_string());

        sqlx::query(
            "INSERT INTO zone (id, name, description, color, coordinates, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .bind(&color)
        .bind(&coordinates)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create zone".into()))
    }

    async fn update(&self, id: i64, data: ZoneUpdate) -> RepoResult<Option<Zone>> {
        let coordinates = data
            .coordinates
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let rows = sqlx::query(
            "UPDATE zone SET name = COALESCE(?1, name), description = COALESCE(?2, description), \
             color = COALESCE(?3, color), coordinates = COALESCE(?4, coordinates), updated_at = ?5 \
             WHERE id = ?6",
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(&data.color)
        .bind(&coordinates)
        .bind(shared::util::now_millis())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if rows.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }

    async fn delete(&self, id: i64) -> RepoResult<Option<u64>> {
        let mut tx = self.pool.begin().await?;

        let released = sqlx::query("UPDATE property SET zone_id = NULL, updated_at = ? WHERE zone_id = ?")
            .bind(shared::util::now_millis())
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM zone WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;
        Ok(Some(released))
    }
}

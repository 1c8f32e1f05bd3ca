//! Property Repository

use async_trait::async_trait;
use shared::models::{Property, PropertyCreate};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::{MAX_IDS_PER_STATEMENT, RepoError, RepoResult};
use crate::zoning::PropertyLocator;
use crate::zoning::geometry::BoundingBox;

const PROPERTY_COLUMNS: &str = "id, address, latitude, longitude, zone_id, created_at, updated_at";

#[derive(Clone)]
pub struct PropertyRepository {
    pool: SqlitePool,
}

impl PropertyRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, data: PropertyCreate) -> RepoResult<Property> {
        let id = shared::util::snowflake_id();
        let now = shared::util::now_millis();

        sqlx::query(
            "INSERT INTO property (id, address, latitude, longitude, zone_id, created_at, updated_at) \
             VALUES (?, ?, ?, ?, NULL, ?, ?)",
        )
        .bind(id)
        .bind(&data.address)
        .bind(data.latitude)
        .bind(data.longitude)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create property".into()))
    }

    pub async fn find_by_id(&self, id: i64) -> RepoResult<Option<Property>> {
        let property = sqlx::query_as::<_, Property>(&format!(
            "SELECT {PROPERTY_COLUMNS} FROM property WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(property)
    }

    /// All properties, optionally restricted to one zone
    pub async fn find_all(&self, zone_id: Option<i64>) -> RepoResult<Vec<Property>> {
        let mut qb: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {PROPERTY_COLUMNS} FROM property"));
        if let Some(zone_id) = zone_id {
            qb.push(" WHERE zone_id = ").push_bind(zone_id);
        }
        qb.push(" ORDER BY id");

        let properties = qb.build_query_as::<Property>().fetch_all(&self.pool).await?;
        Ok(properties)
    }

    /// Store new coordinates. Zone membership is left untouched.
    pub async fn update_location(
        &self,
        id: i64,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> RepoResult<Option<Property>> {
        let rows = sqlx::query("UPDATE property SET latitude = ?, longitude = ?, updated_at = ? WHERE id = ?")
            .bind(latitude)
            .bind(longitude)
            .bind(shared::util::now_millis())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if rows.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(id).await
    }
}

#[async_trait]
impl PropertyLocator for PropertyRepository {
    async fn find_candidates(&self, bbox: &BoundingBox) -> RepoResult<Vec<Property>> {
        let properties = sqlx::query_as::<_, Property>(&format!(
            "SELECT {PROPERTY_COLUMNS} FROM property \
             WHERE latitude IS NOT NULL AND longitude IS NOT NULL \
             AND latitude BETWEEN ? AND ? AND longitude BETWEEN ? AND ?"
        ))
        .bind(bbox.min_lat)
        .bind(bbox.max_lat)
        .bind(bbox.min_lng)
        .bind(bbox.max_lng)
        .fetch_all(&self.pool)
        .await?;
        Ok(properties)
    }

    async fn find_by_zone(&self, zone_id: i64) -> RepoResult<Vec<Property>> {
        self.find_all(Some(zone_id)).await
    }

    async fn batch_set_zone(&self, property_ids: &[i64], zone_id: Option<i64>) -> RepoResult<u64> {
        if property_ids.is_empty() {
            return Ok(0);
        }

        let now = shared::util::now_millis();
        let mut tx = self.pool.begin().await?;
        let mut changed = 0;

        for chunk in property_ids.chunks(MAX_IDS_PER_STATEMENT) {
            let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE property SET zone_id = ");
            qb.push_bind(zone_id);
            qb.push(", updated_at = ").push_bind(now);
            qb.push(" WHERE id IN (");
            let mut ids = qb.separated(", ");
            for id in chunk {
                ids.push_bind(*id);
            }
            ids.push_unseparated(")");

            changed += qb.build().execute(&mut *tx).await?.rows_affected();
        }

        tx.commit().await?;
        tracing::debug!(count = property_ids.len(), changed, ?zone_id, "Batch zone update");
        Ok(changed)
    }

    async fn set_zone(&self, property_id: i64, zone_id: Option<i64>) -> RepoResult<bool> {
        let rows = sqlx::query("UPDATE property SET zone_id = ?, updated_at = ? WHERE id = ?")
            .bind(zone_id)
            .bind(shared::util::now_millis())
            .bind(property_id)
            .execute(&self.pool)
            .await?;
        Ok(rows.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::repository::ZoneRepository;
    use crate::zoning::ZoneStore;
    use shared::models::{LatLng, ZoneCreate};

    async fn seed(repo: &PropertyRepository, address: &str, lat: Option<f64>, lng: Option<f64>) -> Property {
        repo.create(PropertyCreate {
            address: address.to_string(),
            latitude: lat,
            longitude: lng,
        })
        .await
        .unwrap()
    }

    async fn zone(db: &DbService, name: &str) -> i64 {
        ZoneRepository::new(db.pool.clone())
            .create(ZoneCreate {
                name: name.to_string(),
                description: None,
                color: None,
                coordinates: vec![LatLng::new(0.0, 0.0), LatLng::new(0.0, 1.0), LatLng::new(1.0, 1.0)],
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_create_starts_unassigned() {
        let db = DbService::in_memory().await.unwrap();
        let repo = PropertyRepository::new(db.pool.clone());

        let p = seed(&repo, "Calle Colón 4", Some(39.47), Some(-0.37)).await;
        assert_eq!(p.zone_id, None);
        assert_eq!(p.latitude, Some(39.47));
        assert_eq!(repo.find_by_id(p.id).await.unwrap(), Some(p));
    }

    #[tokio::test]
    async fn test_candidates_are_inclusive_and_skip_ungeocoded() {
        let db = DbService::in_memory().await.unwrap();
        let repo = PropertyRepository::new(db.pool.clone());

        let inside = seed(&repo, "inside", Some(0.5), Some(0.5)).await;
        let corner = seed(&repo, "corner", Some(1.0), Some(1.0)).await;
        seed(&repo, "outside", Some(1.5), Some(0.5)).await;
        seed(&repo, "no lat", None, Some(0.5)).await;
        seed(&repo, "no location", None, None).await;

        let bbox = BoundingBox {
            min_lat: 0.0,
            max_lat: 1.0,
            min_lng: 0.0,
            max_lng: 1.0,
        };
        let mut ids: Vec<i64> = repo
            .find_candidates(&bbox)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        ids.sort();
        let mut expected = vec![inside.id, corner.id];
        expected.sort();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn test_batch_set_zone_spans_several_statements() {
        let db = DbService::in_memory().await.unwrap();
        let repo = PropertyRepository::new(db.pool.clone());
        let zone_id = zone(&db, "Centro").await;

        let mut ids = Vec::new();
        for i in 0..(MAX_IDS_PER_STATEMENT * 2 + 7) {
            ids.push(seed(&repo, &format!("Calle {i}"), Some(0.5), Some(0.5)).await.id);
        }

        let changed = repo.batch_set_zone(&ids, Some(zone_id)).await.unwrap();
        assert_eq!(changed, ids.len() as u64);
        assert_eq!(repo.find_by_zone(zone_id).await.unwrap().len(), ids.len());

        let cleared = repo.batch_set_zone(&ids[..3], None).await.unwrap();
        assert_eq!(cleared, 3);
        assert_eq!(repo.find_by_zone(zone_id).await.unwrap().len(), ids.len() - 3);
    }

    #[tokio::test]
    async fn test_batch_set_zone_empty_is_noop() {
        let db = DbService::in_memory().await.unwrap();
        let repo = PropertyRepository::new(db.pool.clone());
        assert_eq!(repo.batch_set_zone(&[], Some(1)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_set_zone_reports_missing_property() {
        let db = DbService::in_memory().await.unwrap();
        let repo = PropertyRepository::new(db.pool.clone());
        let zone_id = zone(&db, "Ruzafa").await;
        let p = seed(&repo, "Calle Sueca 10", Some(0.2), Some(0.1)).await;

        assert!(repo.set_zone(p.id, Some(zone_id)).await.unwrap());
        assert_eq!(repo.find_by_id(p.id).await.unwrap().unwrap().zone_id, Some(zone_id));
        assert!(!repo.set_zone(p.id + 1, Some(zone_id)).await.unwrap());
    }

    #[tokio::test]
    async fn test_find_all_filters_by_zone() {
        let db = DbService::in_memory().await.unwrap();
        let repo = PropertyRepository::new(db.pool.clone());
        let zone_id = zone(&db, "Centro").await;

        let a = seed(&repo, "a", Some(0.5), Some(0.5)).await;
        seed(&repo, "b", None, None).await;
        repo.set_zone(a.id, Some(zone_id)).await.unwrap();

        assert_eq!(repo.find_all(None).await.unwrap().len(), 2);
        let in_zone = repo.find_all(Some(zone_id)).await.unwrap();
        assert_eq!(in_zone.len(), 1);
        assert_eq!(in_zone[0].id, a.id);
    }

    #[tokio::test]
    async fn test_update_location_keeps_zone() {
        let db = DbService::in_memory().await.unwrap();
        let repo = PropertyRepository::new(db.pool.clone());
        let zone_id = zone(&db, "Centro").await;
        let p = seed(&repo, "a", None, None).await;
        repo.set_zone(p.id, Some(zone_id)).await.unwrap();

        let moved = repo.update_location(p.id, Some(0.3), Some(0.4)).await.unwrap().unwrap();
        assert_eq!(moved.location(), Some(LatLng::new(0.3, 0.4)));
        assert_eq!(moved.zone_id, Some(zone_id));
        assert!(repo.update_location(p.id + 1, None, None).await.unwrap().is_none());
    }
}

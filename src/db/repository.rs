// src/db/repository.rs
// DOCUMENTATION: Database access layer - all SQL queries
// PURPOSE: PostgreSQL storage engine (schema in migrations/0001_hbnb_schema.sql)

use crate::db::Storage;
use crate::errors::PlacesError;
use crate::models::*;
use async_trait::async_trait;
use sqlx::PgPool;

const PLACE_COLUMNS: &str = r#"
    id, city_id, user_id, name, description,
    number_rooms, number_bathrooms, max_guest, price_by_night,
    latitude, longitude, created_at, updated_at
"#;

fn db_error(e: sqlx::Error) -> PlacesError {
    log::error!("Database query failed: {}", e);
    PlacesError::DatabaseError(e.to_string())
}

/// DbStorage: All database operations behind the Storage trait
/// DOCUMENTATION: Uses query_as for type-safe SQL queries. Every write commits
/// immediately, so save() has nothing left to flush.
pub struct DbStorage {
    pool: PgPool,
}

impl DbStorage {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Storage for DbStorage {
    async fn all_places(&self) -> Result<Vec<Place>, PlacesError> {
        let sql = format!(
            "SELECT {} FROM places ORDER BY created_at, id",
            PLACE_COLUMNS
        );
        sqlx::query_as::<_, Place>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn get_state(&self, id: &str) -> Result<Option<State>, PlacesError> {
        sqlx::query_as::<_, State>(
            "SELECT id, name, created_at, updated_at FROM states WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn get_city(&self, id: &str) -> Result<Option<City>, PlacesError> {
        sqlx::query_as::<_, City>(
            "SELECT id, state_id, name, created_at, updated_at FROM cities WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn get_place(&self, id: &str) -> Result<Option<Place>, PlacesError> {
        let sql = format!("SELECT {} FROM places WHERE id = $1", PLACE_COLUMNS);
        sqlx::query_as::<_, Place>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, PlacesError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, first_name, last_name, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn get_amenity(&self, id: &str) -> Result<Option<Amenity>, PlacesError> {
        sqlx::query_as::<_, Amenity>(
            "SELECT id, name, created_at, updated_at FROM amenities WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn cities_of_state(&self, state_id: &str) -> Result<Vec<City>, PlacesError> {
        sqlx::query_as::<_, City>(
            r#"
            SELECT id, state_id, name, created_at, updated_at
            FROM cities
            WHERE state_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(state_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn places_of_city(&self, city_id: &str) -> Result<Vec<Place>, PlacesError> {
        let sql = format!(
            "SELECT {} FROM places WHERE city_id = $1 ORDER BY created_at, id",
            PLACE_COLUMNS
        );
        sqlx::query_as::<_, Place>(&sql)
            .bind(city_id)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn amenities_of_place(&self, place_id: &str) -> Result<Vec<Amenity>, PlacesError> {
        sqlx::query_as::<_, Amenity>(
            r#"
            SELECT a.id, a.name, a.created_at, a.updated_at
            FROM amenities a
            JOIN place_amenity pa ON pa.amenity_id = a.id
            WHERE pa.place_id = $1
            ORDER BY a.created_at, a.id
            "#,
        )
        .bind(place_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)
    }

    async fn new_place(&self, place: Place) -> Result<(), PlacesError> {
        sqlx::query(
            r#"
            INSERT INTO places (
                id, city_id, user_id, name, description,
                number_rooms, number_bathrooms, max_guest, price_by_night,
                latitude, longitude, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(&place.id)
        .bind(&place.city_id)
        .bind(&place.user_id)
        .bind(&place.name)
        .bind(&place.description)
        .bind(place.number_rooms)
        .bind(place.number_bathrooms)
        .bind(place.max_guest)
        .bind(place.price_by_night)
        .bind(place.latitude)
        .bind(place.longitude)
        .bind(place.created_at)
        .bind(place.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        log::debug!("Inserted place {}", place.id);
        Ok(())
    }

    async fn update_place(&self, place: Place) -> Result<(), PlacesError> {
        let result = sqlx::query(
            r#"
            UPDATE places SET
                name = $2,
                description = $3,
                number_rooms = $4,
                number_bathrooms = $5,
                max_guest = $6,
                price_by_night = $7,
                latitude = $8,
                longitude = $9,
                updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(&place.id)
        .bind(&place.name)
        .bind(&place.description)
        .bind(place.number_rooms)
        .bind(place.number_bathrooms)
        .bind(place.max_guest)
        .bind(place.price_by_night)
        .bind(place.latitude)
        .bind(place.longitude)
        .bind(place.updated_at)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(PlacesError::NotFound(format!("Place {}", place.id)));
        }
        Ok(())
    }

    async fn delete_place(&self, place_id: &str) -> Result<bool, PlacesError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        sqlx::query("DELETE FROM place_amenity WHERE place_id = $1")
            .bind(place_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        let result = sqlx::query("DELETE FROM places WHERE id = $1")
            .bind(place_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn save(&self) -> Result<(), PlacesError> {
        Ok(())
    }
}

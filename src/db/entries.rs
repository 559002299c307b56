//! Community entry table: append and bounded recent reads

use crate::models::{BiometricRecord, CommunityEntry, Coordinate, SpeciesLabel};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Create the community_entries table if it does not exist (idempotent)
pub async fn init_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS community_entries (
            entry_id TEXT PRIMARY KEY,
            created_at TEXT NOT NULL,
            img_url TEXT NOT NULL,
            bill_length_mm REAL NOT NULL,
            bill_depth_mm REAL NOT NULL,
            flipper_length_mm REAL NOT NULL,
            body_mass_g REAL NOT NULL,
            sex INTEGER NOT NULL,
            species TEXT NOT NULL,
            nickname TEXT NOT NULL,
            lat REAL NOT NULL,
            lon REAL NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_community_entries_created_at
         ON community_entries(created_at DESC)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Append one entry. The row id is a fresh UUIDv4 that never leaves
/// this module; timestamps are stored as RFC 3339 text.
pub async fn append_entry(pool: &SqlitePool, entry: &CommunityEntry) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO community_entries (
            entry_id, created_at, img_url,
            bill_length_mm, bill_depth_mm, flipper_length_mm, body_mass_g, sex,
            species, nickname, lat, lon
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(entry.created_at.to_rfc3339())
    .bind(&entry.img_url)
    .bind(entry.features.bill_length_mm)
    .bind(entry.features.bill_depth_mm)
    .bind(entry.features.flipper_length_mm)
    .bind(entry.features.body_mass_g)
    .bind(entry.features.sex as i64)
    .bind(entry.species.as_str())
    .bind(&entry.nickname)
    .bind(entry.coordinate.lat)
    .bind(entry.coordinate.lon)
    .execute(pool)
    .await?;

    Ok(())
}

#[derive(sqlx::FromRow)]
struct EntryRow {
    created_at: String,
    img_url: String,
    bill_length_mm: f64,
    bill_depth_mm: f64,
    flipper_length_mm: f64,
    body_mass_g: f64,
    sex: i64,
    species: String,
    nickname: String,
    lat: f64,
    lon: f64,
}

impl EntryRow {
    fn into_entry(self) -> Result<CommunityEntry> {
        let created_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|e| Error::Internal(format!("corrupt timestamp in store: {e}")))?
            .with_timezone(&Utc);

        let sex = match self.sex {
            0 | 1 => self.sex as u8,
            other => {
                return Err(Error::Internal(format!(
                    "corrupt sex value in store: {other}"
                )))
            }
        };

        Ok(CommunityEntry {
            created_at,
            img_url: self.img_url,
            features: BiometricRecord {
                bill_length_mm: self.bill_length_mm,
                bill_depth_mm: self.bill_depth_mm,
                flipper_length_mm: self.flipper_length_mm,
                body_mass_g: self.body_mass_g,
                sex,
            },
            species: SpeciesLabel::from_name(&self.species),
            nickname: self.nickname,
            coordinate: Coordinate {
                lat: self.lat,
                lon: self.lon,
            },
        })
    }
}

/// Most recent entries, newest first, bounded to `limit`.
/// Internal row ids are never selected.
pub async fn recent_entries(pool: &SqlitePool, limit: i64) -> Result<Vec<CommunityEntry>> {
    let rows: Vec<EntryRow> = sqlx::query_as(
        r#"
        SELECT created_at, img_url,
               bill_length_mm, bill_depth_mm, flipper_length_mm, body_mass_g, sex,
               species, nickname, lat, lon
        FROM community_entries
        ORDER BY created_at DESC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(EntryRow::into_entry).collect()
}

//! Result store integration tests: bounded recent window, ordering,
//! field preservation

use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use pinguinos::db;
use pinguinos::models::{BiometricRecord, CommunityEntry, Coordinate, SpeciesLabel};

async fn temp_store() -> (sqlx::SqlitePool, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
    let pool = db::init_pool(&url).await.expect("store should initialize");
    (pool, dir)
}

fn entry(offset_secs: i64, species: SpeciesLabel) -> CommunityEntry {
    // Fixed base keeps timestamps reproducible across runs
    let base = Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap();
    CommunityEntry {
        created_at: base + ChronoDuration::seconds(offset_secs),
        img_url: format!("http://example.com/{offset_secs}.jpg"),
        features: BiometricRecord {
            bill_length_mm: 45.5,
            bill_depth_mm: 14.2,
            flipper_length_mm: 210.0,
            body_mass_g: 4200.0,
            sex: 1,
        },
        species,
        nickname: "Copito".to_string(),
        coordinate: Coordinate {
            lat: -51.7,
            lon: -59.0,
        },
    }
}

#[tokio::test]
async fn round_trips_all_entry_fields() {
    let (pool, _dir) = temp_store().await;
    let written = entry(0, SpeciesLabel::Gentoo);
    db::entries::append_entry(&pool, &written).await.unwrap();

    let read = db::entries::recent_entries(&pool, 50).await.unwrap();
    assert_eq!(read.len(), 1);
    let got = &read[0];
    assert_eq!(got.created_at, written.created_at);
    assert_eq!(got.img_url, written.img_url);
    assert_eq!(got.features, written.features);
    assert_eq!(got.species, SpeciesLabel::Gentoo);
    assert_eq!(got.nickname, "Copito");
    assert_eq!(got.coordinate, written.coordinate);
}

#[tokio::test]
async fn recent_window_is_bounded_and_strictly_descending() {
    let (pool, _dir) = temp_store().await;
    for i in 0..55 {
        db::entries::append_entry(&pool, &entry(i, SpeciesLabel::Adelie))
            .await
            .unwrap();
    }

    let recent = db::entries::recent_entries(&pool, 50).await.unwrap();
    assert_eq!(recent.len(), 50);

    for pair in recent.windows(2) {
        assert!(
            pair[0].created_at > pair[1].created_at,
            "entries must be strictly newest-first"
        );
    }

    // The five oldest entries fell out of the window
    let oldest_kept = recent.last().unwrap().created_at;
    assert_eq!(oldest_kept, entry(5, SpeciesLabel::Adelie).created_at);
}

#[tokio::test]
async fn unknown_species_names_survive_as_unknown() {
    let (pool, _dir) = temp_store().await;
    db::entries::append_entry(&pool, &entry(0, SpeciesLabel::Unknown))
        .await
        .unwrap();

    let read = db::entries::recent_entries(&pool, 50).await.unwrap();
    assert_eq!(read[0].species, SpeciesLabel::Unknown);
}

#[tokio::test]
async fn corrupt_sex_value_in_store_surfaces_as_error() {
    let (pool, _dir) = temp_store().await;

    // Bypass append_entry to plant a row our writer could never produce
    sqlx::query(
        r#"
        INSERT INTO community_entries (
            entry_id, created_at, img_url,
            bill_length_mm, bill_depth_mm, flipper_length_mm, body_mass_g, sex,
            species, nickname, lat, lon
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind("corrupt-row")
    .bind("2026-08-25T12:00:00+00:00")
    .bind("http://example.com/corrupt.jpg")
    .bind(38.0)
    .bind(18.0)
    .bind(185.0)
    .bind(3400.0)
    .bind(7_i64)
    .bind("Adelie")
    .bind("Pingu")
    .bind(-77.0)
    .bind(166.0)
    .execute(&pool)
    .await
    .unwrap();

    let result = db::entries::recent_entries(&pool, 50).await;
    assert!(matches!(result, Err(pinguinos::Error::Internal(_))));
}

#[tokio::test]
async fn append_to_closed_pool_is_a_store_error() {
    let (pool, _dir) = temp_store().await;
    pool.close().await;

    let result = db::entries::append_entry(&pool, &entry(0, SpeciesLabel::Adelie)).await;
    assert!(matches!(result, Err(pinguinos::Error::Store(_))));
}

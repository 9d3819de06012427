//! SQLite repository integration tests.

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};
    use weather_types::{City, Reading, ReadingRepository, RepoError};

    use crate::SqliteRepo;

    async fn setup_repo() -> SqliteRepo {
        SqliteRepo::new("sqlite::memory:").await.unwrap()
    }

    fn city(name: &str) -> City {
        City::new(name).unwrap()
    }

    fn reading_at(hour: u32, temperature: f64) -> Reading {
        Reading::new(
            Utc.with_ymd_and_hms(2025, 1, 15, hour, 0, 0).unwrap(),
            temperature,
        )
    }

    #[tokio::test]
    async fn test_save_and_latest() {
        let repo = setup_repo().await;
        let moscow = city("moscow");

        repo.save(&moscow, &reading_at(12, -4.3)).await.unwrap();

        let latest = repo.latest(&moscow).await.unwrap();
        assert_eq!(latest, reading_at(12, -4.3));
    }

    #[tokio::test]
    async fn test_latest_not_found() {
        let repo = setup_repo().await;

        let result = repo.latest(&city("moscow")).await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_latest_not_found_despite_other_cities() {
        let repo = setup_repo().await;
        repo.save(&city("berlin"), &reading_at(12, 3.0)).await.unwrap();

        let result = repo.latest(&city("moscow")).await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_latest_picks_greatest_timestamp() {
        let repo = setup_repo().await;
        let moscow = city("moscow");

        repo.save(&moscow, &reading_at(14, -2.0)).await.unwrap();
        repo.save(&moscow, &reading_at(9, -8.0)).await.unwrap();

        let latest = repo.latest(&moscow).await.unwrap();
        assert_eq!(latest.temperature_2m, -2.0);
    }

    #[tokio::test]
    async fn test_latest_same_timestamp_prefers_last_saved() {
        let repo = setup_repo().await;
        let moscow = city("moscow");

        repo.save(&moscow, &reading_at(12, -4.0)).await.unwrap();
        repo.save(&moscow, &reading_at(12, -3.5)).await.unwrap();

        let latest = repo.latest(&moscow).await.unwrap();
        assert_eq!(latest.temperature_2m, -3.5);
    }

    #[tokio::test]
    async fn test_save_appends_rows() {
        let repo = setup_repo().await;
        let moscow = city("moscow");

        repo.save(&moscow, &reading_at(12, -4.0)).await.unwrap();
        repo.save(&moscow, &reading_at(12, -4.0)).await.unwrap();
        repo.save(&city("berlin"), &reading_at(12, 3.0)).await.unwrap();

        assert_eq!(repo.count(&moscow).await.unwrap(), 2);
        assert_eq!(repo.count(&city("berlin")).await.unwrap(), 1);
        assert_eq!(repo.count(&city("paris")).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_sub_second_timestamps_order_correctly() {
        let repo = setup_repo().await;
        let moscow = city("moscow");
        let base = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();

        repo.save(&moscow, &Reading::new(base + Duration::milliseconds(500), 2.0))
            .await
            .unwrap();
        repo.save(&moscow, &Reading::new(base + Duration::seconds(1), 3.0))
            .await
            .unwrap();
        repo.save(&moscow, &Reading::new(base, 1.0)).await.unwrap();

        let latest = repo.latest(&moscow).await.unwrap();
        assert_eq!(latest.temperature_2m, 3.0);
        assert_eq!(latest.time, base + Duration::seconds(1));
    }

    #[tokio::test]
    async fn test_history_newest_first_with_limit() {
        let repo = setup_repo().await;
        let moscow = city("moscow");

        for hour in 8..12 {
            repo.save(&moscow, &reading_at(hour, hour as f64)).await.unwrap();
        }

        let history = repo.history(&moscow, 3).await.unwrap();

        let temperatures: Vec<f64> = history.iter().map(|r| r.temperature_2m).collect();
        assert_eq!(temperatures, vec![11.0, 10.0, 9.0]);
    }

    #[tokio::test]
    async fn test_history_empty_for_unknown_city() {
        let repo = setup_repo().await;

        let history = repo.history(&city("moscow"), 10).await.unwrap();

        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_on_disk_database_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("weather.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());

        let repo = SqliteRepo::new(&url).await.unwrap();
        repo.save(&city("moscow"), &reading_at(12, 1.0)).await.unwrap();

        assert!(db_path.exists());
    }
}

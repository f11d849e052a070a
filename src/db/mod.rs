//! SQLite-backed sink for the weather_data table.

use crate::domain::model::WeatherRecord;
use crate::domain::ports::RecordSink;
use crate::utils::error::{EtlError, Result};
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS weather_data (
    latitude      REAL,
    longitude     REAL,
    temperature   REAL,
    windspeed     REAL,
    winddirection REAL,
    weathercode   REAL,
    timestamp     TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

const INSERT_SQL: &str = "INSERT INTO weather_data \
    (latitude, longitude, temperature, windspeed, winddirection, weathercode) \
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

/// Appends records to a SQLite database, creating the schema on first use.
///
/// Each `append` call is one transaction. Rows from a failed call are
/// rolled back, so a retried run never leaves a partial batch behind.
#[derive(Debug, Clone)]
pub struct SqliteSink {
    path: PathBuf,
}

impl SqliteSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse_coordinate(value: &str) -> Result<f64> {
        value
            .trim()
            .parse::<f64>()
            .map_err(|_| EtlError::InvalidCoordinateError {
                value: value.to_string(),
            })
    }
}

impl RecordSink for SqliteSink {
    async fn append(&self, records: &[WeatherRecord]) -> Result<usize> {
        if let Some(parent) = self.path.parent() {
            // Path::parent yields "" for bare filenames like "weather.db".
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut conn = Connection::open(&self.path)?;
        conn.execute(CREATE_TABLE_SQL, [])?;

        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(INSERT_SQL)?;
            for record in records {
                stmt.execute(params![
                    Self::parse_coordinate(&record.latitude)?,
                    Self::parse_coordinate(&record.longitude)?,
                    record.temperature,
                    record.windspeed,
                    record.winddirection,
                    record.weathercode,
                ])?;
            }
        }
        tx.commit()?;

        tracing::debug!(
            "Committed {} rows to weather_data at {}",
            records.len(),
            self.path.display()
        );
        Ok(records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<WeatherRecord> {
        vec![
            WeatherRecord {
                latitude: "37.7749".to_string(),
                longitude: "-122.4194".to_string(),
                temperature: 15.2,
                windspeed: 5.1,
                winddirection: 220.0,
                weathercode: 3.0,
            },
            WeatherRecord {
                latitude: "40.7128".to_string(),
                longitude: "-74.0060".to_string(),
                temperature: 21.7,
                windspeed: 3.4,
                winddirection: 180.0,
                weathercode: 0.0,
            },
        ]
    }

    #[tokio::test]
    async fn append_creates_table_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let sink = SqliteSink::new(dir.path().join("weather.db"));

        let inserted = sink.append(&sample_records()).await.unwrap();
        assert_eq!(inserted, 2);

        let conn = Connection::open(sink.path()).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM weather_data", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn append_fills_timestamp_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let sink = SqliteSink::new(dir.path().join("weather.db"));
        sink.append(&sample_records()).await.unwrap();

        let conn = Connection::open(sink.path()).unwrap();
        let mut stmt = conn.prepare("SELECT timestamp FROM weather_data").unwrap();
        let timestamps: Vec<String> = stmt
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<_, _>>()
            .unwrap();

        assert_eq!(timestamps.len(), 2);
        for ts in timestamps {
            chrono::NaiveDateTime::parse_from_str(&ts, "%Y-%m-%d %H:%M:%S").unwrap();
        }
    }

    #[tokio::test]
    async fn append_twice_keeps_existing_rows() {
        let dir = tempfile::tempdir().unwrap();
        let sink = SqliteSink::new(dir.path().join("weather.db"));

        sink.append(&sample_records()).await.unwrap();
        let conn = Connection::open(sink.path()).unwrap();
        let first_batch: Vec<(f64, f64)> = conn
            .prepare("SELECT latitude, temperature FROM weather_data ORDER BY rowid")
            .unwrap()
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
            .unwrap()
            .collect::<std::result::Result<_, _>>()
            .unwrap();
        drop(conn);

        sink.append(&sample_records()).await.unwrap();

        let conn = Connection::open(sink.path()).unwrap();
        let all_rows: Vec<(f64, f64)> = conn
            .prepare("SELECT latitude, temperature FROM weather_data ORDER BY rowid")
            .unwrap()
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
            .unwrap()
            .collect::<std::result::Result<_, _>>()
            .unwrap();

        assert_eq!(all_rows.len(), 4);
        assert_eq!(&all_rows[..2], &first_batch[..]);
    }

    #[tokio::test]
    async fn schema_creation_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let sink = SqliteSink::new(dir.path().join("weather.db"));

        sink.append(&[]).await.unwrap();
        sink.append(&[]).await.unwrap();

        let conn = Connection::open(sink.path()).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM weather_data", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn rows_keep_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let sink = SqliteSink::new(dir.path().join("weather.db"));
        sink.append(&sample_records()).await.unwrap();

        let conn = Connection::open(sink.path()).unwrap();
        let latitudes: Vec<f64> = conn
            .prepare("SELECT latitude FROM weather_data ORDER BY rowid")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<_, _>>()
            .unwrap();

        assert_eq!(latitudes, vec![37.7749, 40.7128]);
    }

    #[tokio::test]
    async fn coordinates_are_stored_as_real_values() {
        let dir = tempfile::tempdir().unwrap();
        let sink = SqliteSink::new(dir.path().join("weather.db"));
        sink.append(&sample_records()).await.unwrap();

        let conn = Connection::open(sink.path()).unwrap();
        let column_type: String = conn
            .query_row(
                "SELECT typeof(latitude) FROM weather_data LIMIT 1",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(column_type, "real");
    }

    #[tokio::test]
    async fn failed_append_rolls_back_partial_batch() {
        let dir = tempfile::tempdir().unwrap();
        let sink = SqliteSink::new(dir.path().join("weather.db"));

        // First record is fine, second fails mid-transaction.
        let mut records = sample_records();
        records[1].latitude = "north".to_string();

        let err = sink.append(&records).await.unwrap_err();
        assert!(matches!(err, EtlError::InvalidCoordinateError { .. }));

        let conn = Connection::open(sink.path()).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM weather_data", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn creates_missing_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let sink = SqliteSink::new(dir.path().join("nested/output/weather.db"));

        sink.append(&sample_records()).await.unwrap();
        assert!(sink.path().exists());
    }
}

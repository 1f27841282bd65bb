pub mod queries;

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

pub use queries::categories::Category;
pub use queries::questions::{NewQuestion, Question};

use sqlx::Error;

pub const QUESTIONS_PER_PAGE: i64 = 10;

/// 1-based window of `QUESTIONS_PER_PAGE` rows into an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: i64,
    offset: i64,
}

impl Page {
    /// Returns `None` for page numbers that can never hold rows.
    pub fn new(number: i64) -> Option<Page> {
        if number < 1 {
            return None;
        }
        let offset = (number - 1).checked_mul(QUESTIONS_PER_PAGE)?;
        Some(Page { number, offset })
    }

    pub fn number(&self) -> i64 {
        self.number
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn limit(&self) -> i64 {
        QUESTIONS_PER_PAGE
    }
}

impl Default for Page {
    fn default() -> Self {
        Page {
            number: 1,
            offset: 0,
        }
    }
}

pub async fn establish_connection(path: &Path) -> Result<SqlitePool, Error> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .foreign_keys(true);
    SqlitePoolOptions::new().connect_with(options).await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), Error> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_offsets_are_ten_apart() {
        assert_eq!(Page::new(1).unwrap().offset(), 0);
        assert_eq!(Page::new(3).unwrap().offset(), 20);
        assert_eq!(Page::default(), Page::new(1).unwrap());
    }

    #[test]
    fn page_rejects_numbers_without_rows() {
        assert!(Page::new(0).is_none());
        assert!(Page::new(-4).is_none());
        assert!(Page::new(i64::MAX).is_none());
    }

    #[tokio::test]
    async fn migrations_seed_categories() {
        let pool = testing::pool().await;
        let categories = queries::categories::get_all_categories(&pool).await.unwrap();
        assert_eq!(categories.len(), 6);
        assert_eq!(categories[0].kind, "Science");
    }

    #[tokio::test]
    async fn establish_connection_creates_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trivia.db");
        let pool = establish_connection(&path).await.unwrap();
        run_migrations(&pool).await.unwrap();
        assert!(path.exists());
    }
}

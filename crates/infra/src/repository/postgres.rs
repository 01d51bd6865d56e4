//! Postgres-backed catalog repositories.
//!
//! Products and reviews live in two plain tables (see `migrations/`). The
//! adapter only filters by exact column matches; ordering by computed values
//! (ratings) is the pipeline's job, not the store's.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use souk_catalog::{Price, Product, Rating, Review};
use souk_core::{ArtisanId, CategoryId, CooperativeId, DomainError, ProductId, ReviewId, UserId};

use super::{ProductRepository, RepositoryError, ReviewRepository};
use crate::seed::SeedEntry;

const PRODUCT_COLUMNS: &str = r#"
    id,
    name,
    description,
    price,
    category_id,
    cooperative_id,
    artisan_id,
    image_url,
    image_hint
"#;

/// Postgres catalog store.
///
/// Uses a SQLx connection pool, which is cheap to clone and safe to share
/// across tasks.
#[derive(Debug, Clone)]
pub struct PostgresCatalogStore {
    pool: PgPool,
}

impl PostgresCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to `database_url` with a small pool.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, RepositoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Apply the bundled schema migrations.
    pub async fn migrate(&self) -> Result<(), RepositoryError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| RepositoryError::Unavailable(e.to_string()))
    }

    /// Insert seed entries that are not stored yet; returns how many products were added.
    ///
    /// Existing products (by id) are left untouched, along with their reviews, so
    /// seeding is safe to repeat on every start.
    pub async fn seed(&self, entries: Vec<SeedEntry>) -> Result<usize, RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;
        for SeedEntry { product, reviews } in entries {
            let result = sqlx::query(
                "INSERT INTO products (id, name, description, price, category_id, cooperative_id, artisan_id, image_url, image_hint) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) ON CONFLICT (id) DO NOTHING",
            )
            .bind(product.id.as_str())
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price.value())
            .bind(product.category_id.as_str())
            .bind(product.cooperative_id.as_str())
            .bind(product.artisan_id.as_ref().map(ArtisanId::as_str))
            .bind(&product.image_url)
            .bind(product.image_hint.as_deref())
            .execute(&mut *tx)
            .await?;
            if result.rows_affected() == 0 {
                continue;
            }
            inserted += 1;

            for review in reviews {
                sqlx::query(
                    "INSERT INTO reviews (id, product_id, author_id, author, rating, body, created_at) \
                     VALUES ($1, $2, $3, $4, $5, $6, $7)",
                )
                .bind(review.id.as_str())
                .bind(review.product_id.as_str())
                .bind(review.author_id.as_str())
                .bind(&review.author)
                .bind(i16::from(review.rating.stars()))
                .bind(&review.text)
                .bind(review.created_at)
                .execute(&mut *tx)
                .await?;
            }
        }
        tx.commit().await?;
        Ok(inserted)
    }

    async fn fetch_products(
        &self,
        filter: Option<(&'static str, &str)>,
    ) -> Result<Vec<Product>, RepositoryError> {
        let rows = match filter {
            Some((column, value)) => {
                let sql = format!(
                    "SELECT {PRODUCT_COLUMNS} FROM products WHERE {column} = $1 ORDER BY created_at, id"
                );
                sqlx::query(&sql).bind(value).fetch_all(&self.pool).await?
            }
            None => {
                let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY created_at, id");
                sqlx::query(&sql).fetch_all(&self.pool).await?
            }
        };
        rows.iter().map(product_from_row).collect()
    }
}

fn decode(err: DomainError) -> RepositoryError {
    RepositoryError::Decode(err.to_string())
}

fn product_from_row(row: &PgRow) -> Result<Product, RepositoryError> {
    let artisan_id: Option<String> = row.try_get("artisan_id")?;
    Ok(Product {
        id: ProductId::new(row.try_get::<String, _>("id")?).map_err(decode)?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        price: Price::new(row.try_get("price")?).map_err(decode)?,
        category_id: CategoryId::new(row.try_get::<String, _>("category_id")?).map_err(decode)?,
        cooperative_id: CooperativeId::new(row.try_get::<String, _>("cooperative_id")?).map_err(decode)?,
        artisan_id: artisan_id
            .filter(|a| !a.trim().is_empty())
            .map(ArtisanId::new)
            .transpose()
            .map_err(decode)?,
        image_url: row.try_get("image_url")?,
        image_hint: row.try_get("image_hint")?,
    })
}

fn review_from_row(row: &PgRow) -> Result<Review, RepositoryError> {
    let stars: i16 = row.try_get("rating")?;
    let stars = u8::try_from(stars).map_err(|_| RepositoryError::Decode(format!("rating out of range: {stars}")))?;
    Ok(Review {
        id: ReviewId::new(row.try_get::<String, _>("id")?).map_err(decode)?,
        product_id: ProductId::new(row.try_get::<String, _>("product_id")?).map_err(decode)?,
        author_id: UserId::new(row.try_get::<String, _>("author_id")?).map_err(decode)?,
        author: row.try_get("author")?,
        rating: Rating::new(stars).map_err(decode)?,
        text: row.try_get("body")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

#[async_trait]
impl ProductRepository for PostgresCatalogStore {
    async fn list_all(&self, category: Option<&CategoryId>) -> Result<Vec<Product>, RepositoryError> {
        self.fetch_products(category.map(|c| ("category_id", c.as_str()))).await
    }

    async fn get_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(product_from_row).transpose()
    }

    async fn list_by_cooperative(&self, cooperative: &CooperativeId) -> Result<Vec<Product>, RepositoryError> {
        self.fetch_products(Some(("cooperative_id", cooperative.as_str()))).await
    }

    async fn list_by_artisan(&self, artisan: &ArtisanId) -> Result<Vec<Product>, RepositoryError> {
        self.fetch_products(Some(("artisan_id", artisan.as_str()))).await
    }

    async fn count(&self, category: Option<&CategoryId>) -> Result<usize, RepositoryError> {
        let count: i64 = match category {
            Some(c) => {
                sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE category_id = $1")
                    .bind(c.as_str())
                    .fetch_one(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_scalar("SELECT COUNT(*) FROM products")
                    .fetch_one(&self.pool)
                    .await?
            }
        };
        usize::try_from(count).map_err(|_| RepositoryError::Decode(format!("negative count: {count}")))
    }
}

#[async_trait]
impl ReviewRepository for PostgresCatalogStore {
    async fn list_for_product(&self, product_id: &ProductId) -> Result<Vec<Review>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, product_id, author_id, author, rating, body, created_at
            FROM reviews
            WHERE product_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(product_id.as_str())
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(review_from_row).collect()
    }
}

use std::collections::HashMap;
use std::sync::{RwLock, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;

use souk_catalog::{Product, ProductDraft, Review, ReviewDraft};
use souk_core::{ArtisanId, CategoryId, CooperativeId, DomainError, Entity, ProductId, ReviewId, UserId};

use super::{ProductRepository, RepositoryError, ReviewRepository};
use crate::seed::{SeedCatalog, SeedEntry, SeedError};

#[derive(Debug, Default)]
struct Inner {
    /// Insertion order is the natural iteration order.
    products: Vec<Product>,
    reviews: HashMap<ProductId, Vec<Review>>,
}

/// In-memory product + review store.
///
/// Intended for tests/dev. Not optimized for performance: every listing scans
/// the full product list.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    inner: RwLock<Inner>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and store a new product under a freshly generated id.
    pub fn create_product(&self, draft: ProductDraft) -> Result<Product, DomainError> {
        let product = draft.validate(ProductId::generate())?;
        self.upsert_product(product.clone())?;
        Ok(product)
    }

    /// Insert a product, replacing any product with the same id in place.
    pub fn upsert_product(&self, product: Product) -> Result<(), DomainError> {
        let mut inner = self.write()?;
        upsert(&mut inner.products, product);
        Ok(())
    }

    /// Validate and append a review to an existing product.
    pub fn add_review(
        &self,
        product_id: &ProductId,
        draft: ReviewDraft,
        author_id: UserId,
        author: &str,
    ) -> Result<Review, DomainError> {
        let review = draft.validate(ReviewId::generate(), product_id.clone(), author_id, author, Utc::now())?;
        self.insert_review(review.clone())?;
        Ok(review)
    }

    /// Append an already validated review. The product must exist.
    pub fn insert_review(&self, review: Review) -> Result<(), DomainError> {
        let mut inner = self.write()?;
        if !inner.products.iter().any(|p| p.id == review.product_id) {
            return Err(DomainError::not_found());
        }
        inner
            .reviews
            .entry(review.product_id.clone())
            .or_default()
            .push(review);
        Ok(())
    }

    /// A store holding the bundled demo catalog.
    pub fn seeded() -> Result<Self, SeedError> {
        let store = Self::new();
        store.load(SeedCatalog::bundled()?.validate(Utc::now())?)?;
        Ok(store)
    }

    /// Store validated seed entries; returns how many products were loaded.
    pub fn load(&self, entries: Vec<SeedEntry>) -> Result<usize, DomainError> {
        let count = entries.len();
        for entry in entries {
            self.upsert_product(entry.product)?;
            for review in entry.reviews {
                self.insert_review(review)?;
            }
        }
        Ok(count)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>, DomainError> {
        self.inner
            .write()
            .map_err(|_| DomainError::validation("store lock poisoned"))
    }

    fn read<T>(&self, f: impl FnOnce(&Inner) -> T) -> Result<T, RepositoryError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| RepositoryError::Unavailable("lock poisoned".to_string()))?;
        Ok(f(&inner))
    }

    fn filtered(&self, keep: impl Fn(&Product) -> bool) -> Result<Vec<Product>, RepositoryError> {
        self.read(|inner| inner.products.iter().filter(|p| keep(p)).cloned().collect())
    }
}

fn upsert<E: Entity>(items: &mut Vec<E>, item: E) {
    match items.iter_mut().find(|existing| existing.id() == item.id()) {
        Some(existing) => *existing = item,
        None => items.push(item),
    }
}

#[async_trait]
impl ProductRepository for InMemoryCatalogStore {
    async fn list_all(&self, category: Option<&CategoryId>) -> Result<Vec<Product>, RepositoryError> {
        self.filtered(|p| category.is_none_or(|c| &p.category_id == c))
    }

    async fn get_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        self.read(|inner| inner.products.iter().find(|p| &p.id == id).cloned())
    }

    async fn list_by_cooperative(&self, cooperative: &CooperativeId) -> Result<Vec<Product>, RepositoryError> {
        self.filtered(|p| &p.cooperative_id == cooperative)
    }

    async fn list_by_artisan(&self, artisan: &ArtisanId) -> Result<Vec<Product>, RepositoryError> {
        self.filtered(|p| p.artisan_id.as_ref() == Some(artisan))
    }

    async fn count(&self, category: Option<&CategoryId>) -> Result<usize, RepositoryError> {
        self.read(|inner| {
            inner
                .products
                .iter()
                .filter(|p| category.is_none_or(|c| &p.category_id == c))
                .count()
        })
    }
}

#[async_trait]
impl ReviewRepository for InMemoryCatalogStore {
    async fn list_for_product(&self, product_id: &ProductId) -> Result<Vec<Review>, RepositoryError> {
        self.read(|inner| inner.reviews.get(product_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, category: &str, cooperative: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            description: format!("{name}, fabriqué à la main."),
            price: 20.0,
            cooperative_id: cooperative.to_string(),
            category_id: category.to_string(),
            artisan_id: Some(format!("{cooperative}-a1")),
            ..ProductDraft::default()
        }
    }

    fn review(stars: u8) -> ReviewDraft {
        ReviewDraft {
            text: "Magnifique, je recommande.".to_string(),
            rating: stars,
        }
    }

    #[tokio::test]
    async fn category_filter_is_exact() {
        let store = InMemoryCatalogStore::new();
        store.create_product(draft("Bracelet", "bijoux", "c1")).unwrap();
        store.create_product(draft("Tapis", "decoration-interieure", "c2")).unwrap();
        store.create_product(draft("Collier", "bijoux", "c3")).unwrap();

        let bijoux = CategoryId::new("bijoux").unwrap();
        let names: Vec<_> = store
            .list_all(Some(&bijoux))
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Bracelet", "Collier"]);
        assert_eq!(store.count(Some(&bijoux)).await.unwrap(), 2);
        assert_eq!(store.count(None).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn upsert_replaces_in_place() {
        let store = InMemoryCatalogStore::new();
        let first = store.create_product(draft("Bracelet", "bijoux", "c1")).unwrap();
        store.create_product(draft("Tapis", "decoration-interieure", "c2")).unwrap();

        let mut edited = first.clone();
        edited.name = "Bracelet en argent".to_string();
        store.upsert_product(edited).unwrap();

        let all = store.list_all(None).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Bracelet en argent");
    }

    #[test]
    fn writes_to_a_poisoned_store_are_reported() {
        let store = InMemoryCatalogStore::new();
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = store.inner.write().unwrap();
            panic!("writer crashed");
        }));

        assert!(store.create_product(draft("Bracelet", "bijoux", "c1")).is_err());
        let product = draft("Tapis", "decoration-interieure", "c2")
            .validate(ProductId::new("p1").unwrap())
            .unwrap();
        assert!(store.upsert_product(product).is_err());
    }

    #[tokio::test]
    async fn reviews_belong_to_their_product() {
        let store = InMemoryCatalogStore::new();
        let a = store.create_product(draft("Bracelet", "bijoux", "c1")).unwrap();
        let b = store.create_product(draft("Tapis", "decoration-interieure", "c2")).unwrap();
        let author = UserId::new("u1").unwrap();

        store.add_review(&a.id, review(5), author.clone(), "Salma").unwrap();
        store.add_review(&a.id, review(3), author, "Salma").unwrap();

        assert_eq!(store.list_for_product(&a.id).await.unwrap().len(), 2);
        assert!(store.list_for_product(&b.id).await.unwrap().is_empty());
    }

    #[test]
    fn review_for_unknown_product_is_not_found() {
        let store = InMemoryCatalogStore::new();
        let err = store
            .add_review(&ProductId::new("ghost").unwrap(), review(4), UserId::new("u1").unwrap(), "Salma")
            .unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }

    #[tokio::test]
    async fn seeded_store_lists_the_bundled_catalog() {
        let store = InMemoryCatalogStore::seeded().unwrap();
        assert_eq!(store.count(None).await.unwrap(), 12);

        for slug in ["bijoux", "decoration-interieure", "sacs-sacs-a-main", "chaussures", "pour-elle"] {
            let category = CategoryId::new(slug).unwrap();
            let products = store.list_all(Some(&category)).await.unwrap();
            assert!(!products.is_empty(), "no products in {slug}");
        }

        let rug = ProductId::new("p11").unwrap();
        assert_eq!(store.list_for_product(&rug).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn lookups_by_owner() {
        let store = InMemoryCatalogStore::new();
        let p = store.create_product(draft("Bracelet", "bijoux", "c1")).unwrap();
        store.create_product(draft("Tapis", "decoration-interieure", "c2")).unwrap();

        let by_coop = store.list_by_cooperative(&CooperativeId::new("c1").unwrap()).await.unwrap();
        assert_eq!(by_coop, vec![p.clone()]);

        let by_artisan = store.list_by_artisan(&ArtisanId::new("c2-a1").unwrap()).await.unwrap();
        assert_eq!(by_artisan.len(), 1);
        assert_eq!(by_artisan[0].name, "Tapis");

        assert_eq!(store.get_by_id(&p.id).await.unwrap(), Some(p));
        assert_eq!(store.get_by_id(&ProductId::new("ghost").unwrap()).await.unwrap(), None);
    }
}

//! Product categories.
//!
//! The category list is fixed and ships with the application; products refer to
//! a category by its slug.

use serde::Serialize;

use souk_core::CategoryId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub slug: &'static str,
    /// Name of the icon shown next to the category.
    pub icon: &'static str,
}

const CATEGORIES: &[Category] = &[
    Category { id: "1", name: "Cuisine & Salle à Manger", slug: "cuisine-salle-a-manger", icon: "Utensils" },
    Category { id: "2", name: "Sacs & Sacs à Main", slug: "sacs-sacs-a-main", icon: "Briefcase" },
    Category { id: "3", name: "Décoration Intérieure", slug: "decoration-interieure", icon: "Home" },
    Category { id: "4", name: "Chaussures", slug: "chaussures", icon: "ShoppingBag" },
    Category { id: "5", name: "Bijoux", slug: "bijoux", icon: "Gem" },
    Category { id: "6", name: "Pour Elle", slug: "pour-elle", icon: "Scissors" },
    Category { id: "7", name: "Pour Lui", slug: "pour-lui", icon: "Palette" },
];

impl Category {
    pub fn all() -> &'static [Category] {
        CATEGORIES
    }

    pub fn by_slug(slug: &str) -> Option<&'static Category> {
        CATEGORIES.iter().find(|c| c.slug == slug)
    }

    /// Whether products filed under `id` belong to this category.
    pub fn contains(&self, id: &CategoryId) -> bool {
        id.as_str() == self.slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_slug() {
        assert_eq!(Category::by_slug("bijoux").map(|c| c.name), Some("Bijoux"));
        assert!(Category::by_slug("electronique").is_none());
    }

    #[test]
    fn slugs_are_unique() {
        let mut slugs: Vec<_> = Category::all().iter().map(|c| c.slug).collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), Category::all().len());
    }

    #[test]
    fn products_reference_categories_by_slug() {
        let c = Category::by_slug("chaussures").unwrap();
        assert!(c.contains(&CategoryId::new("chaussures").unwrap()));
        assert!(!c.contains(&CategoryId::new("4").unwrap()));
    }
}

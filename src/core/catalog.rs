use crate::domain::model::{
    AvailableFilters, CatalogStats, IndexDocument, IndexMetadata, Resource,
};
use crate::domain::ports::IndexSource;
use crate::utils::error::Result;
use std::collections::BTreeSet;

/// The loaded resource index: a flat, read-only list of records plus the
/// generator's header block. Loaded once, queried in memory afterwards.
pub struct Catalog {
    metadata: IndexMetadata,
    resources: Vec<Resource>,
}

impl Catalog {
    pub async fn load(source: &dyn IndexSource) -> Result<Self> {
        tracing::info!("Loading index from {}", source.location());
        let bytes = source.fetch().await?;
        let catalog = Self::from_json(&bytes)?;
        tracing::info!("✅ {} resources loaded", catalog.len());
        Ok(catalog)
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let document: IndexDocument = serde_json::from_slice(bytes)?;
        Ok(Self::from_document(document))
    }

    pub fn from_document(document: IndexDocument) -> Self {
        Self {
            metadata: document.metadata,
            resources: document.resources,
        }
    }

    pub fn metadata(&self) -> &IndexMetadata {
        &self.metadata
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id == id)
    }

    /// Resources in a given musical key (exact match on `metadata.key`).
    pub fn by_key(&self, key: &str) -> Vec<&Resource> {
        self.resources
            .iter()
            .filter(|r| r.metadata.key.as_deref() == Some(key))
            .collect()
    }

    /// Sorted, deduplicated kind/style/level values present in the index.
    pub fn available_filters(&self) -> AvailableFilters {
        let mut kinds = BTreeSet::new();
        let mut styles = BTreeSet::new();
        let mut levels = BTreeSet::new();

        for resource in &self.resources {
            if !resource.kind.is_empty() {
                kinds.insert(resource.kind.clone());
            }
            for label in resource.style_labels() {
                styles.insert(label.clone());
            }
            if let Some(level) = &resource.metadata.level {
                levels.insert(level.clone());
            }
        }

        AvailableFilters {
            kinds: kinds.into_iter().collect(),
            styles: styles.into_iter().collect(),
            levels: levels.into_iter().collect(),
        }
    }

    /// Sorted unique book names.
    pub fn available_books(&self) -> Vec<String> {
        let mut books = BTreeSet::new();
        for resource in &self.resources {
            if let Some(book) = &resource.metadata.book {
                books.insert(book.clone());
            }
        }
        books.into_iter().collect()
    }

    pub fn stats(&self) -> CatalogStats {
        let mut stats = CatalogStats {
            total: self.resources.len(),
            ..Default::default()
        };

        for resource in &self.resources {
            if resource.metadata.has_mp3 {
                stats.with_mp3 += 1;
            }

            let kind = if resource.kind.is_empty() {
                "unknown"
            } else {
                &resource.kind
            };
            *stats.by_kind.entry(kind.to_string()).or_insert(0) += 1;

            for style in resource.style_labels() {
                *stats.by_style.entry(style.clone()).or_insert(0) += 1;
            }

            if let Some(level) = &resource.metadata.level {
                *stats.by_level.entry(level.clone()).or_insert(0) += 1;
            }

            let book = resource.metadata.book.as_deref().unwrap_or("unknown");
            *stats.by_book.entry(book.to_string()).or_insert(0) += 1;

            if let Some(difficulty) = &resource.metadata.difficulty {
                *stats.by_difficulty.entry(difficulty.clone()).or_insert(0) += 1;
            }
        }

        stats
    }
}

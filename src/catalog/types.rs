//! Catalog wire and domain types.
//!
//! Wire DTOs mirror the JSON schema of the catalog API field for field.
//! Domain entities are what the rest of the app consumes. Every `into_domain`
//! mapping is total: optional wire fields get defaults (absent rating is 0.0)
//! and unparseable URLs become `None`, so mapping never fails.

use reqwest::Url;
use serde::Deserialize;

// ============================================================================
// Domain entities
// ============================================================================

/// One catalog row: a collection summary.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: String,
    pub title: String,
    pub count: usize,
    pub image: Option<Url>,
}

/// A full collection with its items.
#[derive(Debug, Clone, PartialEq)]
pub struct NftCollection {
    pub id: String,
    pub title: String,
    pub cover: Option<Url>,
    pub description: String,
    pub author: String,
    pub author_site: Option<Url>,
    pub items: Vec<NftShort>,
}

/// One item inside a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct NftShort {
    pub id: String,
    pub title: String,
    pub image: Option<Url>,
    pub rating: f64,
    pub price_eth: f64,
}

// ============================================================================
// Wire DTOs
// ============================================================================

/// `GET /api/v1/collections` element. The list endpoint carries item ids
/// only; the detail endpoint expands them into [`NftDto`]s.
#[derive(Debug, Deserialize)]
pub struct CategoryDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub cover: String,
    #[serde(default)]
    pub nfts: Vec<String>,
}

impl CategoryDto {
    pub fn into_domain(self) -> Category {
        Category {
            id: self.id,
            title: self.name,
            count: self.nfts.len(),
            image: parse_url(&self.cover),
        }
    }
}

/// `GET /api/v1/collections/{id}` payload.
#[derive(Debug, Deserialize)]
pub struct CollectionDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub cover: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub author: String,
    #[serde(rename = "authorLink")]
    pub author_link: Option<String>,
    #[serde(default)]
    pub nfts: Vec<NftDto>,
}

impl CollectionDto {
    pub fn into_domain(self) -> NftCollection {
        NftCollection {
            id: self.id,
            title: self.name,
            cover: parse_url(&self.cover),
            description: self.description,
            author: self.author,
            author_site: self.author_link.as_deref().and_then(parse_url),
            items: self.nfts.into_iter().map(NftDto::into_domain).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NftDto {
    pub id: String,
    pub name: String,
    pub images: Option<Vec<String>>,
    pub rating: Option<f64>,
    pub price: Option<f64>,
}

impl NftDto {
    pub fn into_domain(self) -> NftShort {
        NftShort {
            id: self.id,
            title: self.name,
            image: self
                .images
                .as_ref()
                .and_then(|imgs| imgs.first())
                .and_then(|s| parse_url(s)),
            rating: self.rating.unwrap_or(0.0),
            price_eth: self.price.unwrap_or(0.0),
        }
    }
}

fn parse_url(s: &str) -> Option<Url> {
    Url::parse(s).ok()
}

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Which catalog a record belongs to.
///
/// Known variants drive routing (`/spotlight/...` vs `/meetings/...`); `Other`
/// keeps catalogs with new keys loadable.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum CatalogKey {
    Spotlight,
    Forums,
    Other(String),
}

/// Stable identifier for a content item.
///
/// Forums are numbered; articles are addressed by slug. Both forms appear in
/// catalog files as plain JSON numbers or strings.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Numeric(u64),
    Slug(String),
}

/// Category tag used to bucket items for filtering.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(pub String);

/// Current filter selection. `All` disables filtering.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

pub const ALL_CATEGORIES_LABEL: &str = "All";

impl Serialize for CatalogKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CatalogKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_str(&value))
    }
}

impl CatalogKey {
    pub fn as_str(&self) -> &str {
        match self {
            CatalogKey::Spotlight => "spotlight",
            CatalogKey::Forums => "forums",
            CatalogKey::Other(value) => value.as_str(),
        }
    }

    pub fn from_str(value: &str) -> Self {
        match value {
            "spotlight" => CatalogKey::Spotlight,
            "forums" => CatalogKey::Forums,
            other => CatalogKey::Other(other.to_string()),
        }
    }
}

impl fmt::Display for CatalogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ItemId {
    /// Interpret a command-line or URL token as an id.
    ///
    /// All-digit tokens become `Numeric`; everything else is a slug.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<u64>() {
            Ok(number) => ItemId::Numeric(number),
            Err(_) => ItemId::Slug(trimmed.to_string()),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, ItemId::Slug(slug) if slug.trim().is_empty())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Numeric(number) => write!(f, "{number}"),
            ItemId::Slug(slug) => f.write_str(slug),
        }
    }
}

impl Category {
    pub fn new(value: impl Into<String>) -> Self {
        Category(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for CategoryFilter {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CategoryFilter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::from_str(&value))
    }
}

impl CategoryFilter {
    pub fn only(category: impl Into<String>) -> Self {
        CategoryFilter::Only(Category::new(category))
    }

    pub fn as_str(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES_LABEL,
            CategoryFilter::Only(category) => category.as_str(),
        }
    }

    /// Parse a filter label. Anything other than `All` is taken literally, so
    /// stale labels become filters that match nothing rather than errors.
    pub fn from_str(value: &str) -> Self {
        match value {
            ALL_CATEGORIES_LABEL => CategoryFilter::All,
            other => CategoryFilter::Only(Category::new(other)),
        }
    }

    pub fn matches(&self, category: Option<&Category>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => category == Some(wanted),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

use std::{
    collections::HashMap,
    path::PathBuf,
    sync::Arc,
};

use anyhow::Context;

use crate::foundation::error::{MemeError, MemeResult};

/// Font request carried by a caption style.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FontDescriptor {
    /// Preferred family name, matched against the system font database.
    pub family: String,
    /// Font size in pixels.
    pub size_px: f32,
    /// CSS-style weight (100..=900).
    #[serde(default = "default_weight")]
    pub weight: u16,
    /// Prefer condensed faces when falling back.
    #[serde(default)]
    pub condensed: bool,
    /// Font file to load instead of querying the system database.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
}

fn default_weight() -> u16 {
    400
}

impl FontDescriptor {
    /// Check the size is usable for layout.
    pub fn validate(&self) -> MemeResult<()> {
        if !self.size_px.is_finite() || self.size_px <= 0.0 {
            return Err(MemeError::validation(
                "font size_px must be finite and > 0",
            ));
        }
        if !(1..=1000).contains(&self.weight) {
            return Err(MemeError::validation("font weight must be in 1..=1000"));
        }
        Ok(())
    }

    fn key(&self) -> FontKey {
        FontKey {
            family: self.family.clone(),
            weight: self.weight,
            condensed: self.condensed,
            source: self.source.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct FontKey {
    family: String,
    weight: u16,
    condensed: bool,
    source: Option<PathBuf>,
}

/// Font bytes ready for shaping and glyph rendering.
#[derive(Clone)]
pub struct ResolvedFont {
    /// Raw font file bytes.
    pub bytes: Arc<Vec<u8>>,
    /// Face index inside a collection file.
    pub index: u32,
}

impl std::fmt::Debug for ResolvedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedFont")
            .field("bytes_len", &self.bytes.len())
            .field("index", &self.index)
            .finish()
    }
}

/// Resolves [`FontDescriptor`]s to font bytes, caching each distinct request.
///
/// The system font database is only loaded the first time a descriptor without an explicit
/// `source` is resolved.
#[derive(Default)]
pub struct FontResolver {
    db: Option<usvg::fontdb::Database>,
    cache: HashMap<FontKey, ResolvedFont>,
}

impl FontResolver {
    /// Resolver backed by system fonts only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a descriptor to font bytes.
    pub fn resolve(&mut self, desc: &FontDescriptor) -> MemeResult<ResolvedFont> {
        let key = desc.key();
        if let Some(font) = self.cache.get(&key) {
            return Ok(font.clone());
        }

        let font = match &desc.source {
            Some(path) => {
                let bytes = std::fs::read(path)
                    .with_context(|| format!("read font bytes from '{}'", path.display()))?;
                ResolvedFont {
                    bytes: Arc::new(bytes),
                    index: 0,
                }
            }
            None => self.query_database(desc)?,
        };

        tracing::debug!(family = %desc.family, index = font.index, "resolved caption font");
        self.cache.insert(key, font.clone());
        Ok(font)
    }

    fn query_database(&mut self, desc: &FontDescriptor) -> MemeResult<ResolvedFont> {
        let db = self.db.get_or_insert_with(|| {
            let mut db = usvg::fontdb::Database::new();
            db.load_system_fonts();
            db
        });

        let families = [
            usvg::fontdb::Family::Name(desc.family.as_str()),
            usvg::fontdb::Family::SansSerif,
        ];
        let query = usvg::fontdb::Query {
            families: &families,
            weight: usvg::fontdb::Weight(desc.weight),
            stretch: if desc.condensed {
                usvg::fontdb::Stretch::Condensed
            } else {
                usvg::fontdb::Stretch::Normal
            },
            style: usvg::fontdb::Style::Normal,
        };

        let id = db
            .query(&query)
            .or_else(|| db.faces().next().map(|f| f.id))
            .ok_or_else(|| {
                MemeError::font(format!(
                    "no font faces available for family '{}'",
                    desc.family
                ))
            })?;

        db.with_face_data(id, |data, index| ResolvedFont {
            bytes: Arc::new(data.to_vec()),
            index,
        })
        .ok_or_else(|| MemeError::font("font face data is unavailable"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;

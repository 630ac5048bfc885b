//! Deck files: one article, its blocks and their slider settings, in TOML.
//!
//! ```toml
//! direction = "ltr"
//!
//! [course._defaults]
//! _slideAnimationDuration = 400
//!
//! [article]
//! id = "a-05"
//! title = "Getting started"
//!
//! [article.slider]
//! _isEnabled = true
//! _hasTabs = true
//!
//! [[article.blocks]]
//! id = "b-05"
//! title = "Welcome"
//! body = "..."
//! images = ["img/welcome.png"]
//! components = ["c-05"]
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use blockslider_core::{
    ArticleModel, BlockModel, CourseSliderConfig, Device, Direction, HostContext, ScreenSize,
    SliderSettings,
};

#[derive(Debug, Clone, Deserialize)]
pub struct Deck {
    #[serde(default)]
    pub direction: Direction,
    /// Simulate an active screen reader
    #[serde(default)]
    pub accessibility: bool,
    #[serde(default)]
    pub course: Option<CourseSliderConfig>,
    pub article: DeckArticle,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeckArticle {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slider: Option<SliderSettings>,
    #[serde(default)]
    pub blocks: Vec<DeckBlock>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeckBlock {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    /// Image paths, relative to the deck file
    #[serde(default)]
    pub images: Vec<PathBuf>,
    #[serde(default)]
    pub components: Vec<String>,
}

impl Deck {
    /// Read a deck, resolving image paths against its directory
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read deck {}", path.display()))?;
        let mut deck = Self::parse(&content)
            .with_context(|| format!("Failed to parse deck {}", path.display()))?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        for block in &mut deck.article.blocks {
            for image in &mut block.images {
                if image.is_relative() {
                    *image = base.join(&*image);
                }
            }
        }
        Ok(deck)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn article_model(&self) -> ArticleModel {
        ArticleModel {
            id: self.article.id.clone(),
            title: self.article.title.clone(),
            blocks: self
                .article
                .blocks
                .iter()
                .map(|b| BlockModel {
                    id: b.id.clone(),
                    title: b.title.clone(),
                    component_ids: b.components.clone(),
                })
                .collect(),
            slider: self.article.slider.clone(),
        }
    }

    pub fn host_context(&self, screen_size: ScreenSize) -> HostContext {
        HostContext {
            course: self.course.clone(),
            device: Device::new(screen_size, self.direction),
            accessibility_active: self.accessibility,
        }
    }

    /// Every image path in block order
    pub fn image_paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.article.blocks.iter().flat_map(|b| b.images.iter())
    }
}

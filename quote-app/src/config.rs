//! Application configuration, read from an optional `quote.toml`.
//!
//! Every field has a default so the tool runs out of the box in an empty
//! directory; the config file only overrides what it mentions.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use quote_render::{Branding, Watermark};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub files: FilesConfig,
    pub company: CompanyConfig,
    pub assets: AssetsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilesConfig {
    pub catalog: PathBuf,
    pub history: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            catalog: PathBuf::from("materiais.csv"),
            history: PathBuf::from("historico.csv"),
            output_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CompanyConfig {
    pub name: String,
    pub tax_id: String,
    pub city: String,
    pub signer: String,
    pub document_title: String,
}

impl Default for CompanyConfig {
    fn default() -> Self {
        let branding = Branding::default();
        Self {
            name: branding.company_name,
            tax_id: branding.company_tax_id,
            city: branding.company_city_line,
            signer: branding.signer_name,
            document_title: branding.document_title,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    pub logo: Option<PathBuf>,
    pub intro_covers: Vec<PathBuf>,
    pub closing_covers: Vec<PathBuf>,
    pub watermark: bool,
    pub watermark_opacity: f32,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        let defaults = Watermark::default();
        Self {
            logo: Branding::default().logo_path,
            intro_covers: Vec::new(),
            closing_covers: Vec::new(),
            watermark: defaults.enabled,
            watermark_opacity: defaults.opacity,
        }
    }
}

impl AppConfig {
    /// Loads the config file, falling back to defaults when it is absent.
    /// A present-but-malformed file is an error; silently ignoring it would
    /// hide typos.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config: {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("invalid config: {}", path.display()))
    }

    pub fn branding(&self) -> Branding {
        Branding {
            company_name: self.company.name.clone(),
            company_tax_id: self.company.tax_id.clone(),
            company_city_line: self.company.city.clone(),
            signer_name: self.company.signer.clone(),
            document_title: self.company.document_title.clone(),
            logo_path: self.assets.logo.clone(),
            intro_covers: self.assets.intro_covers.clone(),
            closing_covers: self.assets.closing_covers.clone(),
            watermark: Watermark {
                enabled: self.assets.watermark,
                opacity: self.assets.watermark_opacity,
                cache_path: None,
            },
        }
    }
}

//! Branding assets: company identification, logo, cover pages and the
//! derived watermark.

use std::path::{Path, PathBuf};

use image::GenericImageView;
use tracing::{debug, warn};

/// Watermark settings. The watermark image is derived from the logo by
/// fading it against white, cached to disk on first use and reused
/// thereafter.
#[derive(Debug, Clone)]
pub struct Watermark {
    pub enabled: bool,

    /// Ink retained in the faded copy; 0.0 is invisible, 1.0 is the
    /// unmodified logo.
    pub opacity: f32,

    /// Where the derived image is cached. Defaults to a sibling of the logo.
    pub cache_path: Option<PathBuf>,
}

impl Default for Watermark {
    fn default() -> Self {
        Self {
            enabled: true,
            opacity: 0.08,
            cache_path: None,
        }
    }
}

/// Fixed branding applied to every proposal.
#[derive(Debug, Clone)]
pub struct Branding {
    pub company_name: String,
    pub company_tax_id: String,
    pub company_city_line: String,
    pub signer_name: String,
    pub document_title: String,

    pub logo_path: Option<PathBuf>,

    /// Full-bleed pages emitted before any content, in order.
    pub intro_covers: Vec<PathBuf>,

    /// Full-bleed pages emitted after all content, in order.
    pub closing_covers: Vec<PathBuf>,

    pub watermark: Watermark,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            company_name: "UPDOWN SERVIÇOS DE ALTA PERFORMANCE".to_string(),
            company_tax_id: "CNPJ: 36.130.036/0001-37".to_string(),
            company_city_line: "Ponta Grossa - PR".to_string(),
            signer_name: "Celso Alex Sandro de Oliveira".to_string(),
            document_title: "ORÇAMENTO COMERCIAL".to_string(),
            logo_path: Some(PathBuf::from("logo_updown.png")),
            intro_covers: Vec::new(),
            closing_covers: Vec::new(),
            watermark: Watermark::default(),
        }
    }
}

impl Branding {
    /// Path of the watermark image, deriving and caching it on first use.
    ///
    /// Returns `None` when the watermark is disabled, the logo is missing,
    /// or derivation fails; the proposal then simply renders without one.
    pub fn watermark_path(&self) -> Option<PathBuf> {
        if !self.watermark.enabled {
            return None;
        }
        let logo = self.logo_path.as_deref()?;
        if !logo.exists() {
            debug!(logo = %logo.display(), "no logo file, skipping watermark");
            return None;
        }

        let cache = match &self.watermark.cache_path {
            Some(p) => p.clone(),
            None => logo.with_file_name(derived_name(logo)),
        };
        if cache.exists() {
            return Some(cache);
        }

        match derive_watermark(logo, &cache, self.watermark.opacity) {
            Ok(()) => Some(cache),
            Err(error) => {
                warn!(%error, "watermark derivation failed, rendering without it");
                None
            }
        }
    }
}

fn derived_name(logo: &Path) -> String {
    let stem = logo
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "logo".to_string());
    format!("{stem}_marca_dagua.png")
}

/// Fades the logo against a white background and writes the result as an
/// opaque PNG. Compositing (rather than an alpha channel) keeps the
/// embedded image friendly to viewers that ignore soft masks.
fn derive_watermark(
    logo: &Path,
    cache: &Path,
    opacity: f32,
) -> Result<(), image::ImageError> {
    let source = image::open(logo)?;
    let opacity = opacity.clamp(0.0, 1.0);
    let (width, height) = source.dimensions();

    let rgba = source.to_rgba8();
    let mut faded = image::RgbImage::new(width, height);
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        // Ink proportional to the source alpha, scaled by the opacity.
        let ink = opacity * (a as f32 / 255.0);
        let blend = |c: u8| (255.0 * (1.0 - ink) + c as f32 * ink).round() as u8;
        faded.put_pixel(x, y, image::Rgb([blend(r), blend(g), blend(b)]));
    }

    faded.save(cache)?;
    debug!(cache = %cache.display(), "watermark cached");
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn write_logo(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("logo_updown.png");
        let mut img = image::RgbaImage::new(4, 4);
        for pixel in img.pixels_mut() {
            *pixel = image::Rgba([10, 20, 30, 255]);
        }
        img.save(&path).unwrap();
        path
    }

    fn branding_with_logo(path: PathBuf) -> Branding {
        Branding {
            logo_path: Some(path),
            ..Branding::default()
        }
    }

    #[test]
    fn watermark_is_derived_and_cached() {
        let dir = tempfile::tempdir().unwrap();
        let branding = branding_with_logo(write_logo(&dir));

        let first = branding.watermark_path().expect("watermark should derive");
        assert!(first.exists());
        assert_eq!(
            first.file_name().and_then(|n| n.to_str()),
            Some("logo_updown_marca_dagua.png")
        );

        // Second call reuses the cache.
        let second = branding.watermark_path().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn faded_copy_is_nearly_white() {
        let dir = tempfile::tempdir().unwrap();
        let branding = branding_with_logo(write_logo(&dir));

        let path = branding.watermark_path().unwrap();
        let faded = image::open(path).unwrap().to_rgb8();

        let pixel = faded.get_pixel(0, 0);
        assert!(pixel.0.iter().all(|&c| c > 200), "expected a pale pixel, got {pixel:?}");
    }

    #[test]
    fn missing_logo_means_no_watermark() {
        let branding = branding_with_logo(PathBuf::from("/nonexistent/logo.png"));

        assert_eq!(branding.watermark_path(), None);
    }

    #[test]
    fn disabled_watermark_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let mut branding = branding_with_logo(write_logo(&dir));
        branding.watermark.enabled = false;

        assert_eq!(branding.watermark_path(), None);
    }
}

//! Font loading.
//!
//! The face is read once at startup and bound to every text tier. The
//! resulting [`FontSet`] is shared read-only by all requests.

use std::path::Path;

use ab_glyph::FontArc;
use image_processor::{FontTiers, ScaledFont};

/// The process-wide font tiers.
pub type FontSet = FontTiers<ScaledFont>;

#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("failed to read font {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid font file {path} (only TTF/OTF supported)")]
    InvalidFont { path: String },
}

/// Read and parse the face at `path`, binding it at every tier size.
pub fn load_font_set(path: &Path) -> Result<FontSet, FontError> {
    let shown = path.display().to_string();
    let data = std::fs::read(path).map_err(|source| FontError::Io {
        path: shown.clone(),
        source,
    })?;
    let size = data.len();
    let font = FontArc::try_from_vec(data).map_err(|_| FontError::InvalidFont {
        path: shown.clone(),
    })?;

    tracing::info!(path = %shown, bytes = size, "Loaded font");
    Ok(FontTiers::from_font(font))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_processor::{FontMetric, FontTier};

    #[test]
    fn missing_font_is_an_io_error() {
        let err = load_font_set(Path::new("/nonexistent/caption-font.otf")).unwrap_err();
        assert!(matches!(err, FontError::Io { .. }));
        assert!(err.to_string().contains("caption-font.otf"));
    }

    #[test]
    fn valid_font_binds_every_tier() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../crates/image-processor/fixtures/DejaVuSans.ttf");
        let fonts = load_font_set(&path).unwrap();

        for tier in FontTier::ALL {
            assert_eq!(fonts.get(tier).px(), tier.px());
        }
        assert!(fonts.main_1.measure("Hello").width > 0);
    }

    #[test]
    fn garbage_font_is_rejected() {
        let path = std::env::temp_dir().join(format!(
            "caption-server-bad-font-{}.ttf",
            std::process::id()
        ));
        std::fs::write(&path, b"not a font at all").unwrap();
        let result = load_font_set(&path);
        let _ = std::fs::remove_file(&path);

        assert!(matches!(result, Err(FontError::InvalidFont { .. })));
    }
}

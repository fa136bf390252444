//! Static assets – the organization logo, loaded once per process and
//! shared read-only across render invocations.
//!
//! A missing or undecodable logo never fails a render; the header simply
//! falls back to its text-only form.

use std::io;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Collaborator-facing reader for static assets.
pub trait AssetReader {
    fn read(&self, name: &str) -> io::Result<Vec<u8>>;
}

/// Reads assets from a directory on disk.
pub struct FileAssetReader {
    root: PathBuf,
}

impl FileAssetReader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetReader for FileAssetReader {
    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        std::fs::read(self.root.join(name))
    }
}

/// Asset name the logo is looked up under.
pub const LOGO_ASSET: &str = "logo.png";

/// Decoded logo with its pixel dimensions (needed to aspect-fit at emission).
pub struct LogoImage {
    pub bytes: Vec<u8>,
    pub px_width: u32,
    pub px_height: u32,
}

/// Load and decode the logo. `None` means "use the text fallback".
pub fn load_logo(reader: &dyn AssetReader) -> Option<LogoImage> {
    let bytes = match reader.read(LOGO_ASSET) {
        Ok(b) => b,
        Err(e) => {
            log::warn!("logo asset unavailable ({e}); header falls back to text");
            return None;
        }
    };
    match image::load_from_memory(&bytes) {
        Ok(img) => Some(LogoImage {
            px_width: img.width(),
            px_height: img.height(),
            bytes,
        }),
        Err(e) => {
            log::warn!("logo asset undecodable ({e}); header falls back to text");
            None
        }
    }
}

static LOGO: OnceLock<Option<LogoImage>> = OnceLock::new();

/// Process-wide logo cache: the first call loads, later calls reuse.
pub fn cached_logo(reader: &dyn AssetReader) -> Option<&'static LogoImage> {
    LOGO.get_or_init(|| load_logo(reader)).as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MissingAssets;
    impl AssetReader for MissingAssets {
        fn read(&self, _name: &str) -> io::Result<Vec<u8>> {
            Err(io::Error::new(io::ErrorKind::NotFound, "no such asset"))
        }
    }

    struct GarbageAssets;
    impl AssetReader for GarbageAssets {
        fn read(&self, _name: &str) -> io::Result<Vec<u8>> {
            Ok(vec![0x00, 0x01, 0x02])
        }
    }

    #[test]
    fn missing_logo_degrades_to_none() {
        assert!(load_logo(&MissingAssets).is_none());
    }

    #[test]
    fn undecodable_logo_degrades_to_none() {
        assert!(load_logo(&GarbageAssets).is_none());
    }
}

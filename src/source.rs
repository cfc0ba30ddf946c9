//! Panorama discovery and decoding.
//!
//! Listing is a flat scan of one directory. File names must end with exactly
//! `.jpg` or `.png`; the match is case-sensitive, so `SCENE.JPG` is skipped.

use crate::error::ViewerError;
use crate::texture::TextureBuffer;

use image::io::Reader as ImageReader;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

const EXTENSIONS: [&str; 2] = [".jpg", ".png"];

/// Opaque reference to one panorama in the set.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImageHandle(PathBuf);

impl ImageHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// File name for display; falls back to the full path.
    pub fn name(&self) -> String {
        self.0
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.0.display().to_string())
    }
}

/// Ordered set of panoramas plus a way to decode them.
pub trait ImageSource {
    fn handles(&self) -> &[ImageHandle];

    fn decode(&self, handle: &ImageHandle) -> Result<TextureBuffer, ViewerError>;

    fn len(&self) -> usize {
        self.handles().len()
    }

    fn is_empty(&self) -> bool {
        self.handles().is_empty()
    }

    fn decode_index(&self, index: usize) -> Option<Result<TextureBuffer, ViewerError>> {
        self.handles().get(index).map(|h| self.decode(h))
    }
}

/// Panoramas found in a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
    handles: Vec<ImageHandle>,
}

impl DirectorySource {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, ViewerError> {
        let dir = dir.into();
        let handles = list_images(&dir)?;
        log::info!("found {} panorama(s) in {}", handles.len(), dir.display());
        Ok(Self { dir, handles })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ImageSource for DirectorySource {
    fn handles(&self) -> &[ImageHandle] {
        &self.handles
    }

    fn decode(&self, handle: &ImageHandle) -> Result<TextureBuffer, ViewerError> {
        decode(handle)
    }
}

/// Lists `.jpg`/`.png` files directly inside `dir`, sorted by file name.
pub fn list_images(dir: &Path) -> Result<Vec<ImageHandle>, ViewerError> {
    let io_err = |source| ViewerError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut handles = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            log::debug!("skipping non UTF-8 file name {:?}", entry.path());
            continue;
        };
        if !EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
            continue;
        }
        if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            continue;
        }
        handles.push(ImageHandle::new(entry.path()));
    }

    handles.sort_by_key(ImageHandle::name);
    Ok(handles)
}

/// Decodes one panorama to 8-bit RGB. The format is sniffed from the content,
/// not the extension.
pub fn decode(handle: &ImageHandle) -> Result<TextureBuffer, ViewerError> {
    let path = handle.path();
    let decode_err = |source| ViewerError::Decode {
        path: path.to_path_buf(),
        source,
    };

    // an unreadable file is reported like a corrupt one
    let file = File::open(path).map_err(|e| decode_err(image::ImageError::IoError(e)))?;
    let mut reader = ImageReader::new(BufReader::new(file))
        .with_guessed_format()
        .map_err(|e| decode_err(image::ImageError::IoError(e)))?;
    reader.no_limits();
    let img = reader.decode().map_err(decode_err)?;

    let buffer = TextureBuffer::from_image(img.to_rgb8());
    log::debug!(
        "decoded {} ({}x{})",
        handle.name(),
        buffer.width,
        buffer.height
    );
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "panorama_tour_{}_{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_png(path: &Path, w: u32, h: u32, rgb: [u8; 3]) {
        RgbImage::from_pixel(w, h, Rgb(rgb)).save(path).unwrap();
    }

    #[test]
    fn lists_only_exact_lowercase_suffixes_sorted() {
        let dir = scratch_dir("listing");
        write_png(&dir.join("b.png"), 2, 1, [0, 0, 0]);
        write_png(&dir.join("a.png"), 2, 1, [0, 0, 0]);
        fs::write(dir.join("c.jpg"), b"not really a jpeg").unwrap();
        fs::write(dir.join("D.PNG"), b"").unwrap();
        fs::write(dir.join("notes.txt"), b"").unwrap();
        fs::create_dir_all(dir.join("sub.png")).unwrap();

        let names: Vec<_> = list_images(&dir)
            .unwrap()
            .iter()
            .map(ImageHandle::name)
            .collect();
        assert_eq!(names, vec!["a.png", "b.png", "c.jpg"]);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_directory_is_io_error() {
        let dir = std::env::temp_dir().join("panorama_tour_definitely_missing_dir");
        let err = list_images(&dir).unwrap_err();
        assert!(matches!(err, ViewerError::Io { .. }));
    }

    #[test]
    fn empty_directory_lists_nothing() {
        let dir = scratch_dir("empty");
        assert!(list_images(&dir).unwrap().is_empty());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn decode_keeps_top_row_first() {
        let dir = scratch_dir("decode");
        let path = dir.join("stripes.png");
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 0, Rgb([255, 0, 0]));
        img.put_pixel(0, 1, Rgb([0, 0, 255]));
        img.put_pixel(1, 1, Rgb([0, 0, 255]));
        img.save(&path).unwrap();

        let buf = decode(&ImageHandle::new(&path)).unwrap();
        assert_eq!(buf.dimensions(), (2, 2));
        assert_eq!(&buf.pixels[..3], &[255, 0, 0]);
        assert_eq!(&buf.pixels[6..9], &[0, 0, 255]);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn decode_drops_alpha() {
        let dir = scratch_dir("alpha");
        let path = dir.join("alpha.png");
        RgbaImage::from_pixel(3, 1, Rgba([10, 20, 30, 40]))
            .save(&path)
            .unwrap();

        let buf = decode(&ImageHandle::new(&path)).unwrap();
        assert_eq!(buf.pixels, vec![10, 20, 30, 10, 20, 30, 10, 20, 30]);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn corrupt_file_is_decode_error() {
        let dir = scratch_dir("corrupt");
        let path = dir.join("broken.jpg");
        fs::write(&path, b"garbage bytes").unwrap();

        let err = decode(&ImageHandle::new(&path)).unwrap_err();
        assert!(matches!(err, ViewerError::Decode { .. }));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_is_decode_error() {
        let handle = ImageHandle::new(std::env::temp_dir().join("panorama_tour_gone.png"));
        assert!(matches!(decode(&handle).unwrap_err(), ViewerError::Decode { .. }));
    }

    #[test]
    fn directory_source_decodes_by_index() {
        let dir = scratch_dir("source");
        write_png(&dir.join("only.png"), 4, 2, [1, 2, 3]);

        let source = DirectorySource::open(&dir).unwrap();
        assert_eq!(source.len(), 1);
        let buf = source.decode_index(0).unwrap().unwrap();
        assert_eq!(buf, TextureBuffer::filled(4, 2, [1, 2, 3]));
        assert!(source.decode_index(1).is_none());

        fs::remove_dir_all(&dir).unwrap();
    }
}

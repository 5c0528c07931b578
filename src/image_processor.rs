//! # Image Processing Module
//!
//! Questo modulo gestisce la trasformazione di un singolo file thumbnail, usando
//! esclusivamente la libreria `image` in memoria.
//!
//! ## Pipeline di Trasformazione
//!
//! 1. **Decodifica**: Formato rilevato dal contenuto del file (non solo dall'estensione)
//! 2. **Calcolo dimensioni**: `larghezza / 2`, `altezza / 2` (divisione intera)
//! 3. **Resize**: Filtro Lanczos3 per la massima qualità in downscaling; le immagini con
//!    alpha vengono ridimensionate con colori premoltiplicati
//! 4. **Miglioramento**: Sharpen per immagini con alpha, autocontrast 2% per le altre
//!    (vedi `enhance`)
//! 5. **Codifica**: Formato dedotto dall'estensione del file
//! 6. **Sostituzione**: Scrittura su file temporaneo nella stessa directory, poi rename
//!    sopra l'originale (se il path è un symlink, sopra il file a cui punta)
//!
//! ## Formati di Output
//!
//! | Estensione | Encoder | Parametri |
//! |------------|---------|-----------|
//! | `.png`     | PNG     | compressione massima, filtro adattivo, alpha preservato |
//! | `.jpg`     | JPEG    | qualità 85, tabelle Huffman ottimizzate, alpha rimosso |
//! | `.jpeg`    | JPEG    | qualità 85, tabelle Huffman ottimizzate, alpha rimosso |
//!
//! ## Error Handling
//!
//! `process()` non fallisce mai: ogni errore (decodifica, immagine troppo piccola,
//! codifica, I/O) diventa un `ProcessResult` con `succeeded = false`. Poiché la
//! decodifica e la codifica avvengono interamente in memoria prima della scrittura,
//! un file che fallisce resta byte per byte invariato.
//!
//! ## Immagini troppo piccole
//!
//! Un'immagine con larghezza o altezza pari a 1 si dimezzerebbe a 0 pixel: il file
//! viene lasciato intatto e segnalato come errore (`ThumbnailError::TooSmall`).
//!
//! ## Esempio
//!
//! ```rust,ignore
//! let processor = ThumbnailProcessor::new();
//! let result = processor.process(Path::new("/site/a/thumbnail.png"));
//! println!("{}", result.message);
//! ```

use crate::enhance;
use crate::error::ThumbnailError;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::error::{EncodingError, ImageFormatHint, LimitError, LimitErrorKind};
use image::imageops::FilterType;
use image::{DynamicImage, ImageError, ImageFormat, RgbaImage};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// JPEG quality used when writing `.jpg` / `.jpeg` thumbnails
pub const JPEG_QUALITY: u8 = 85;

/// Output encoder chosen from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
}

impl OutputFormat {
    /// Determine the output format from the (case-insensitive) extension
    pub fn from_path(path: &Path) -> Result<Self, ThumbnailError> {
        let ext = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            _ => Err(ThumbnailError::UnsupportedFormat(format!(
                "'{}' ({})",
                ext,
                path.display()
            ))),
        }
    }
}

/// Original and new dimensions of a processed thumbnail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Resize {
    pub width: u32,
    pub height: u32,
    pub new_width: u32,
    pub new_height: u32,
}

impl Resize {
    /// Halve both dimensions, rejecting results with a zero side
    pub fn halve(width: u32, height: u32) -> Result<Self, ThumbnailError> {
        let resize = Self {
            width,
            height,
            new_width: width / 2,
            new_height: height / 2,
        };

        if resize.new_width == 0 || resize.new_height == 0 {
            return Err(ThumbnailError::TooSmall {
                width,
                height,
                new_width: resize.new_width,
                new_height: resize.new_height,
            });
        }

        Ok(resize)
    }
}

/// Outcome of processing one thumbnail file
#[derive(Debug, Clone, Serialize)]
pub struct ProcessResult {
    pub path: PathBuf,
    pub succeeded: bool,
    pub message: String,
    /// Present only when the file was rewritten
    pub dimensions: Option<Resize>,
}

/// Halves, enhances and rewrites thumbnail files in place
#[derive(Debug, Clone, Copy, Default)]
pub struct ThumbnailProcessor;

impl ThumbnailProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Process a single file. Never returns an error: failures are reported in the result.
    pub fn process(&self, path: &Path) -> ProcessResult {
        match self.transform_file(path) {
            Ok(resize) => {
                debug!(
                    "Rewrote {} ({}x{} -> {}x{})",
                    path.display(),
                    resize.width,
                    resize.height,
                    resize.new_width,
                    resize.new_height
                );
                ProcessResult {
                    path: path.to_path_buf(),
                    succeeded: true,
                    message: format!(
                        "[OK] Processed: {} ({}x{} -> {}x{})",
                        path.display(),
                        resize.width,
                        resize.height,
                        resize.new_width,
                        resize.new_height
                    ),
                    dimensions: Some(resize),
                }
            }
            Err(e) => {
                error!("Failed to process {}: {}", path.display(), e);
                ProcessResult {
                    path: path.to_path_buf(),
                    succeeded: false,
                    message: format!("[ERROR] {}: {}", path.display(), e),
                    dimensions: None,
                }
            }
        }
    }

    fn transform_file(&self, path: &Path) -> Result<Resize, ThumbnailError> {
        let format = OutputFormat::from_path(path)?;
        let img = Self::decode(path)?;

        let resize = Resize::halve(img.width(), img.height())?;
        let resized = Self::resize(&img, &resize);
        let enhanced = enhance::enhance(resized);

        let bytes = Self::encode(&enhanced, format)?;
        Self::replace_contents(path, &bytes)?;

        Ok(resize)
    }

    /// Lanczos3 resize; alpha-bearing images are resized premultiplied so fully
    /// transparent pixels do not bleed colour into their neighbours
    fn resize(img: &DynamicImage, resize: &Resize) -> DynamicImage {
        if !img.color().has_alpha() {
            return img.resize_exact(resize.new_width, resize.new_height, FilterType::Lanczos3);
        }

        let mut rgba = img.to_rgba8();
        premultiply(&mut rgba);
        let mut resized = image::imageops::resize(
            &rgba,
            resize.new_width,
            resize.new_height,
            FilterType::Lanczos3,
        );
        unpremultiply(&mut resized);
        DynamicImage::ImageRgba8(resized)
    }

    fn decode(path: &Path) -> Result<DynamicImage, ThumbnailError> {
        image::io::Reader::open(path)
            .map_err(|e| ThumbnailError::Decode(e.into()))?
            .with_guessed_format()
            .map_err(|e| ThumbnailError::Decode(e.into()))?
            .decode()
            .map_err(ThumbnailError::Decode)
    }

    /// Encode the image in memory with the format-specific settings
    pub fn encode(img: &DynamicImage, format: OutputFormat) -> Result<Vec<u8>, ThumbnailError> {
        let mut bytes = Vec::new();

        match format {
            OutputFormat::Png => {
                let encoder = PngEncoder::new_with_quality(
                    &mut bytes,
                    CompressionType::Best,
                    PngFilter::Adaptive,
                );
                img.write_with_encoder(encoder).map_err(ThumbnailError::Encode)?;
            }
            OutputFormat::Jpeg => Self::encode_jpeg(img, &mut bytes).map_err(ThumbnailError::Encode)?,
        }

        Ok(bytes)
    }

    /// JPEG at `JPEG_QUALITY` with optimized Huffman tables; alpha is dropped
    fn encode_jpeg(img: &DynamicImage, bytes: &mut Vec<u8>) -> Result<(), ImageError> {
        let (width, height) = match (u16::try_from(img.width()), u16::try_from(img.height())) {
            (Ok(width), Ok(height)) => (width, height),
            _ => {
                return Err(ImageError::Limits(LimitError::from_kind(
                    LimitErrorKind::DimensionError,
                )))
            }
        };

        let mut encoder = jpeg_encoder::Encoder::new(bytes, JPEG_QUALITY);
        encoder.set_optimized_huffman_tables(true);

        let written = match img {
            DynamicImage::ImageLuma8(buf) => {
                encoder.encode(buf.as_raw(), width, height, jpeg_encoder::ColorType::Luma)
            }
            DynamicImage::ImageRgb8(buf) => {
                encoder.encode(buf.as_raw(), width, height, jpeg_encoder::ColorType::Rgb)
            }
            other => encoder.encode(
                other.to_rgb8().as_raw(),
                width,
                height,
                jpeg_encoder::ColorType::Rgb,
            ),
        };

        written.map_err(|e| {
            ImageError::Encoding(EncodingError::new(
                ImageFormatHint::Exact(ImageFormat::Jpeg),
                e,
            ))
        })
    }

    /// Replace the file behind `path` with `bytes` via a temporary sibling file and a
    /// rename. Symlinks are resolved first so the link itself survives.
    fn replace_contents(path: &Path, bytes: &[u8]) -> Result<(), ThumbnailError> {
        let target = fs::canonicalize(path)?;
        let dir = target.parent().unwrap_or_else(|| Path::new("/"));
        let permissions = fs::metadata(&target)?.permissions();

        let mut temp = tempfile::NamedTempFile::new_in(dir)?;
        temp.write_all(bytes)?;
        temp.as_file().sync_all()?;
        fs::set_permissions(temp.path(), permissions)?;

        temp.persist(&target).map_err(|e| ThumbnailError::Io(e.error))?;
        Ok(())
    }
}

fn premultiply(img: &mut RgbaImage) {
    for pixel in img.pixels_mut() {
        let alpha = pixel.0[3] as u32;
        for channel in &mut pixel.0[..3] {
            *channel = ((*channel as u32 * alpha + 127) / 255) as u8;
        }
    }
}

fn unpremultiply(img: &mut RgbaImage) {
    for pixel in img.pixels_mut() {
        let alpha = pixel.0[3] as u32;
        for channel in &mut pixel.0[..3] {
            *channel = match alpha {
                0 => 0,
                _ => ((*channel as u32 * 255 + alpha / 2) / alpha).min(255) as u8,
            };
        }
    }
}

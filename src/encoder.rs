//! QR encoding collaborator.
//!
//! The symbol itself comes from the `qrcode` crate and the PNG bytes from
//! `image`. This module picks the options, lays the modules out on a pixel
//! grid and hands back an [`EncodedImage`].

use std::fmt;
use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use qrcode::{EcLevel, QrCode};
use thiserror::Error;

/// Output raster width in pixels
pub const DEFAULT_WIDTH: u32 = 256;

/// Quiet zone around the symbol, in modules
pub const DEFAULT_MARGIN: u32 = 2;

/// Pixels per module when the requested width cannot fit the symbol
const FALLBACK_SCALE: f64 = 4.0;

/// Errors that can occur while encoding
#[derive(Error, Debug)]
pub enum EncodeError {
    #[error("QR encode error: {0}")]
    Qr(#[from] qrcode::types::QrError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// QR error-correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorCorrectionLevel {
    /// ~7% recovery
    Low,
    /// ~15% recovery
    #[default]
    Medium,
    /// ~25% recovery
    Quartile,
    /// ~30% recovery
    High,
}

impl ErrorCorrectionLevel {
    /// Single-letter name used by the QR standard
    pub fn letter(&self) -> &'static str {
        match self {
            ErrorCorrectionLevel::Low => "L",
            ErrorCorrectionLevel::Medium => "M",
            ErrorCorrectionLevel::Quartile => "Q",
            ErrorCorrectionLevel::High => "H",
        }
    }
}

impl From<ErrorCorrectionLevel> for EcLevel {
    fn from(level: ErrorCorrectionLevel) -> Self {
        match level {
            ErrorCorrectionLevel::Low => EcLevel::L,
            ErrorCorrectionLevel::Medium => EcLevel::M,
            ErrorCorrectionLevel::Quartile => EcLevel::Q,
            ErrorCorrectionLevel::High => EcLevel::H,
        }
    }
}

impl fmt::Display for ErrorCorrectionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

/// Image container produced by the encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Png,
}

impl OutputFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
        }
    }

    /// Serialize pixels into this format
    fn write(&self, pixels: &RgbaImage) -> Result<Vec<u8>, EncodeError> {
        let mut bytes = Vec::new();
        let format = match self {
            OutputFormat::Png => ImageFormat::Png,
        };
        pixels.write_to(&mut Cursor::new(&mut bytes), format)?;
        Ok(bytes)
    }
}

/// RGBA color, displayed as `#RRGGBB` or `#RRGGBBAA`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor(pub [u8; 4]);

impl HexColor {
    pub const BLACK: HexColor = HexColor([0, 0, 0, 255]);
    pub const WHITE: HexColor = HexColor([255, 255, 255, 255]);

    fn pixel(self) -> Rgba<u8> {
        Rgba(self.0)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.0;
        write!(f, "#{:02X}{:02X}{:02X}", r, g, b)?;
        if a != 255 {
            write!(f, "{:02X}", a)?;
        }
        Ok(())
    }
}

/// Options passed to the encoder for every generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Output raster width in pixels
    pub width: u32,
    /// Quiet zone in modules
    pub margin: u32,
    pub dark: HexColor,
    pub light: HexColor,
    pub error_correction: ErrorCorrectionLevel,
    pub format: OutputFormat,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            margin: DEFAULT_MARGIN,
            dark: HexColor::BLACK,
            light: HexColor::WHITE,
            error_correction: ErrorCorrectionLevel::Medium,
            format: OutputFormat::Png,
        }
    }
}

/// A rendered QR code: the encoded file bytes plus the pixels for display
#[derive(Clone)]
pub struct EncodedImage {
    bytes: Vec<u8>,
    pixels: RgbaImage,
    modules: usize,
    format: OutputFormat,
}

impl EncodedImage {
    /// Serialize `pixels` with `format` and wrap the result
    pub fn new(pixels: RgbaImage, modules: usize, format: OutputFormat) -> Result<Self, EncodeError> {
        let bytes = format.write(&pixels)?;
        Ok(Self {
            bytes,
            pixels,
            modules,
            format,
        })
    }

    /// Encoded file contents
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Symbol width in modules, excluding the quiet zone
    pub fn modules(&self) -> usize {
        self.modules
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }
}

impl fmt::Debug for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodedImage")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("modules", &self.modules)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Something that turns text into a QR image.
///
/// Implementations are called off the UI thread and must not touch UI state.
pub trait QrEncoder: Send + Sync + 'static {
    fn encode(&self, text: &str, options: &EncodeOptions) -> Result<EncodedImage, EncodeError>;
}

/// Default encoder backed by the `qrcode` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct QrCodeEncoder;

impl QrEncoder for QrCodeEncoder {
    fn encode(&self, text: &str, options: &EncodeOptions) -> Result<EncodedImage, EncodeError> {
        let code = QrCode::with_error_correction_level(text.as_bytes(), options.error_correction.into())?;
        let pixels = rasterize(&code, options);
        EncodedImage::new(pixels, code.width(), options.format)
    }
}

/// Lay the symbol out on a square canvas of `options.width` pixels.
///
/// Module size is fractional so the canvas hits the requested width exactly;
/// each pixel takes the color of the module under it.
fn rasterize(code: &QrCode, options: &EncodeOptions) -> RgbaImage {
    let modules = code.width();
    let colors = code.to_colors();
    let span = modules as u32 + options.margin * 2;

    let scale = if options.width >= span {
        options.width as f64 / span as f64
    } else {
        FALLBACK_SCALE
    };
    let size = (span as f64 * scale).floor() as u32;
    let edge = options.margin as f64 * scale;
    let far_edge = size as f64 - edge;

    let dark = options.dark.pixel();
    let light = options.light.pixel();

    RgbaImage::from_fn(size, size, |x, y| {
        let (fx, fy) = (x as f64, y as f64);
        if fx < edge || fy < edge || fx >= far_edge || fy >= far_edge {
            return light;
        }

        let col = ((fx - edge) / scale).floor() as usize;
        let row = ((fy - edge) / scale).floor() as usize;
        if col >= modules || row >= modules {
            return light;
        }

        match colors[row * modules + col] {
            qrcode::Color::Dark => dark,
            qrcode::Color::Light => light,
        }
    })
}

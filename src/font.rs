/*!
# Font

TrueType/OpenType label font used to measure and draw grid labels.
 */

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::{Rgb, RgbImage};
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::text::{TextMeasurer, TextPainter};

/// A font bound to one size.
pub struct LabelFont {
    font: FontVec,
    size: f32,
    scale: PxScale,
}

impl LabelFont {
    /**
    Load a font file at the given size.

    A bare file name such as `arial.ttf` that is not a file in the working
    directory is looked up in the system font directories, see [`system_font_dirs`].

    # Arguments
    - path: The font file (`.ttf` / `.otf`) or its file name
    - size: f32 - The em size in pixels

    # Errors
    `FontLoad` if the file cannot be found or read, `InvalidFont` if it is not a font.
     */
    pub fn from_file<P: AsRef<Path>>(path: P, size: f32) -> Result<Self> {
        Self::from_file_in(path, size, &system_font_dirs())
    }

    /// Like [`LabelFont::from_file`], looking up bare file names in `font_dirs`.
    pub fn from_file_in<P: AsRef<Path>>(path: P, size: f32, font_dirs: &[PathBuf]) -> Result<Self> {
        let path = path.as_ref();
        let path = if path.exists() {
            path.to_path_buf()
        } else {
            bare_file_name(path)
                .and_then(|name| find_font(name, font_dirs))
                .unwrap_or_else(|| path.to_path_buf())
        };
        let bytes = std::fs::read(&path).map_err(|source| Error::FontLoad {
            path: path.clone(),
            source,
        })?;
        tracing::debug!("Loaded font {} at size {size}", path.display());
        Self::parse(bytes, size, path)
    }

    /// Parse in-memory font data at the given size.
    pub fn from_bytes(bytes: Vec<u8>, size: f32) -> Result<Self> {
        Self::parse(bytes, size, PathBuf::from("<memory>"))
    }

    fn parse(bytes: Vec<u8>, size: f32, path: PathBuf) -> Result<Self> {
        check_font_size(size)?;
        let font = FontVec::try_from_vec(bytes).map_err(|source| Error::InvalidFont { path, source })?;
        // ab_glyph scales by ascent - descent, sizes are em sizes
        let scale = match font.units_per_em() {
            Some(units_per_em) => PxScale::from(size * font.height_unscaled() / units_per_em),
            None => PxScale::from(size),
        };
        Ok(Self { font, size, scale })
    }

    /// The em size in pixels.
    pub fn size(&self) -> f32 {
        self.size
    }
}

/// Directories searched for fonts given by file name only.
pub fn system_font_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![
        PathBuf::from("/usr/share/fonts"),
        PathBuf::from("/usr/local/share/fonts"),
        PathBuf::from("/Library/Fonts"),
        PathBuf::from("/System/Library/Fonts"),
    ];
    if let Some(home) = home::home_dir() {
        dirs.push(home.join(".local/share/fonts"));
        dirs.push(home.join(".fonts"));
        dirs.push(home.join("Library/Fonts"));
    }
    if let Some(windir) = std::env::var_os("WINDIR") {
        dirs.push(PathBuf::from(windir).join("Fonts"));
    }
    dirs
}

fn bare_file_name(path: &Path) -> Option<&OsStr> {
    let mut components = path.components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) => Some(name),
        _ => None,
    }
}

/// First file named `name` (ASCII case-insensitive) under `dirs`, searched recursively.
fn find_font(name: &OsStr, dirs: &[PathBuf]) -> Option<PathBuf> {
    let name = name.to_str()?;
    dirs.iter()
        .flat_map(|dir| WalkDir::new(dir).follow_links(true).into_iter().filter_map(|entry| entry.ok()))
        .find(|entry| {
            entry.file_type().is_file()
                && entry
                    .file_name()
                    .to_str()
                    .is_some_and(|file_name| file_name.eq_ignore_ascii_case(name))
        })
        .map(walkdir::DirEntry::into_path)
}

pub(crate) fn check_font_size(size: f32) -> Result<()> {
    if size.is_finite() && size > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidParameter {
            name: "font_size".to_string(),
            reason: format!("must be a positive number, got {size}"),
        })
    }
}

impl TextMeasurer for LabelFont {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn text_width(&self, text: &str) -> u32 {
        let scaled = self.font.as_scaled(self.scale);
        let mut width = 0.0f32;
        let mut previous = None;
        for c in text.chars() {
            let glyph = scaled.glyph_id(c);
            if let Some(previous) = previous {
                width += scaled.kern(previous, glyph);
            }
            width += scaled.h_advance(glyph);
            previous = Some(glyph);
        }
        width.max(0.0).ceil() as u32
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn line_height(&self) -> u32 {
        self.font.as_scaled(self.scale).ascent().max(0.0).ceil() as u32
    }
}

impl TextPainter for LabelFont {
    fn draw_text(&self, canvas: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, text: &str) {
        imageproc::drawing::draw_text_mut(canvas, color, x, y, self.scale, &self.font, text);
    }
}

//! Embedded TrueType face for text WinAnsiEncoding cannot carry.
//!
//! Characters are drawn through a Type0 font with Identity-H encoding, so
//! each two-byte code is the glyph id. A ToUnicode map keeps the text layer
//! searchable. The whole font file is embedded, not a subset.

use super::writer::ObjectWriter;
use crate::error::{RenderError, RenderResult};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::collections::BTreeMap;
use std::fmt::{self, Write as _};
use std::io::Write as _;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;
use ttf_parser::{Face, GlyphId};

/// Well-known locations of broad-coverage TrueType fonts.
const SEARCH_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/arphic/uming.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/Library/Fonts/Arial Unicode.ttf",
    "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
    "C:\\Windows\\Fonts\\arialuni.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

const FALLBACK_NAME: &str = "IntakeUnicode";

/// Max entries per `beginbfchar` block.
const BFCHAR_CHUNK: usize = 100;

/// A TrueType font the report embeds for characters outside WinAnsi.
#[derive(Clone)]
pub struct ReportFont {
    data: Arc<[u8]>,
    name: String,
}

impl ReportFont {
    /// Accepts a single TrueType font file. Collections and CFF-flavoured
    /// OpenType files are rejected.
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> RenderResult<Self> {
        let data: Vec<u8> = data.into();
        if !(data.starts_with(&[0, 1, 0, 0]) || data.starts_with(b"true")) {
            return Err(RenderError::Font(
                "not a single TrueType font file".to_string(),
            ));
        }
        let face = Face::parse(&data, 0).map_err(|e| RenderError::Font(e.to_string()))?;
        let name = postscript_name(&face);
        Ok(Self {
            data: data.into(),
            name,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> RenderResult<Self> {
        Self::from_bytes(std::fs::read(path.as_ref())?)
    }

    /// First usable font from a list of common system locations.
    pub fn discover() -> Option<Self> {
        SEARCH_PATHS.iter().map(Path::new).find_map(|path| {
            if !path.is_file() {
                return None;
            }
            match Self::load(path) {
                Ok(font) => {
                    debug!(path = %path.display(), name = %font.name, "report font found");
                    Some(font)
                }
                Err(e) => {
                    debug!(path = %path.display(), error = %e, "skipping font");
                    None
                }
            }
        })
    }

    /// PostScript name used as the PDF `/BaseFont`.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for ReportFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportFont")
            .field("name", &self.name)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl PartialEq for ReportFont {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

/// Name-table PostScript name limited to characters legal in a PDF name.
fn postscript_name(face: &Face<'_>) -> String {
    face.names()
        .into_iter()
        .filter(|n| n.name_id == ttf_parser::name_id::POST_SCRIPT_NAME)
        .find_map(|n| n.to_string())
        .map(|s| {
            s.chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
                .collect::<String>()
        })
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| FALLBACK_NAME.to_string())
}

/// A parsed [`ReportFont`] that records the glyphs one report draws.
pub(crate) struct UnicodeFace<'a> {
    font: &'a ReportFont,
    face: Face<'a>,
    scale: f32,
    /// Glyph id to the character it was drawn for and its width.
    used: BTreeMap<u16, (char, u16)>,
}

impl<'a> UnicodeFace<'a> {
    pub(crate) fn new(font: &'a ReportFont) -> RenderResult<Self> {
        let face = Face::parse(&font.data, 0).map_err(|e| RenderError::Font(e.to_string()))?;
        let scale = 1000.0 / f32::from(face.units_per_em());
        Ok(Self {
            font,
            face,
            scale,
            used: BTreeMap::new(),
        })
    }

    /// Glyph for `c`, `None` when the font maps it to `.notdef`.
    pub(crate) fn glyph(&self, c: char) -> Option<GlyphId> {
        self.face.glyph_index(c).filter(|g| g.0 != 0)
    }

    /// Advance of `glyph` in 1/1000 em.
    fn advance(&self, glyph: GlyphId) -> u16 {
        let units = self.face.glyph_hor_advance(glyph).unwrap_or(0);
        (f32::from(units) * self.scale).round() as u16
    }

    pub(crate) fn width(&self, text: &str, size: f32) -> f32 {
        let units: u32 = text
            .chars()
            .filter_map(|c| self.glyph(c))
            .map(|g| u32::from(self.advance(g)))
            .sum();
        units as f32 * size / 1000.0
    }

    /// Hex string body for `text`. Characters without a glyph are skipped;
    /// callers route those elsewhere.
    pub(crate) fn encode(&mut self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() * 4);
        for c in text.chars() {
            let Some(glyph) = self.glyph(c) else { continue };
            let width = self.advance(glyph);
            self.used.entry(glyph.0).or_insert((c, width));
            let _ = write!(out, "{:04X}", glyph.0);
        }
        out
    }

    pub(crate) fn is_used(&self) -> bool {
        !self.used.is_empty()
    }

    /// Writes the Type0 font and its dependents. Returns the font's object id.
    pub(crate) fn write_objects(&self, w: &mut ObjectWriter) -> RenderResult<usize> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&self.font.data)?;
        let packed = encoder.finish()?;
        let file = w.add_binary_stream(
            &format!(" /Filter /FlateDecode /Length1 {}", self.font.data.len()),
            &packed,
        );

        let descriptor = w.add(self.descriptor(file));
        let widths: Vec<String> = self
            .used
            .iter()
            .map(|(gid, (_, width))| format!("{gid} [{width}]"))
            .collect();
        let default_width = self.advance(GlyphId(0));
        let cid_font = w.add(format!(
            "<< /Type /Font /Subtype /CIDFontType2 /BaseFont /{name} \
             /CIDSystemInfo << /Registry (Adobe) /Ordering (Identity) /Supplement 0 >> \
             /FontDescriptor {descriptor} 0 R /DW {default_width} /W [{}] /CIDToGIDMap /Identity >>",
            widths.join(" "),
            name = self.font.name,
        ));
        let to_unicode = w.add_stream(&self.to_unicode());
        Ok(w.add(format!(
            "<< /Type /Font /Subtype /Type0 /BaseFont /{} /Encoding /Identity-H \
             /DescendantFonts [{cid_font} 0 R] /ToUnicode {to_unicode} 0 R >>",
            self.font.name
        )))
    }

    fn descriptor(&self, file: usize) -> String {
        let s = |v: i16| (f32::from(v) * self.scale).round() as i32;
        let bbox = self.face.global_bounding_box();
        let ascent = s(self.face.ascender());
        let cap_height = self.face.capital_height().map_or(ascent, s);
        format!(
            "<< /Type /FontDescriptor /FontName /{} /Flags 32 /FontBBox [{} {} {} {}] \
             /ItalicAngle {} /Ascent {ascent} /Descent {} /CapHeight {cap_height} /StemV 80 \
             /FontFile2 {file} 0 R >>",
            self.font.name,
            s(bbox.x_min),
            s(bbox.y_min),
            s(bbox.x_max),
            s(bbox.y_max),
            self.face.italic_angle().round() as i32,
            s(self.face.descender()),
        )
    }

    /// CMap from glyph codes back to UTF-16BE text.
    fn to_unicode(&self) -> String {
        let mut cmap = String::from(
            "/CIDInit /ProcSet findresource begin\n12 dict begin\nbegincmap\n\
             /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n/CMapType 2 def\n\
             1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n",
        );
        let entries: Vec<_> = self.used.iter().collect();
        for chunk in entries.chunks(BFCHAR_CHUNK) {
            let _ = writeln!(cmap, "{} beginbfchar", chunk.len());
            for (gid, (c, _)) in chunk {
                let mut units = [0u16; 2];
                let utf16: String = c
                    .encode_utf16(&mut units)
                    .iter()
                    .map(|u| format!("{u:04X}"))
                    .collect();
                let _ = writeln!(cmap, "<{gid:04X}> <{utf16}>");
            }
            cmap.push_str("endbfchar\n");
        }
        cmap.push_str("endcmap\nCMapName currentdict /CMapResource defineresource pop\nend\nend");
        cmap
    }
}

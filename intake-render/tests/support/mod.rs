//! Shared helpers for the render integration tests.

use intake_render::ReportFont;

/// PostScript name of the font built by [`test_font`].
pub const TEST_FONT_NAME: &str = "IntakeTestSans";

/// Builds a minimal TrueType font with one outline-free glyph per
/// character in `texts`. Glyph 0 is `.notdef`; every other glyph is
/// 1000 units wide.
pub fn test_font(texts: &[&str]) -> ReportFont {
    ReportFont::from_bytes(test_font_bytes(texts)).unwrap()
}

/// Raw file bytes of [`test_font`].
pub fn test_font_bytes(texts: &[&str]) -> Vec<u8> {
    let mut chars: Vec<char> = texts.iter().flat_map(|t| t.chars()).collect();
    chars.sort_unstable();
    chars.dedup();
    truetype(&chars)
}

fn truetype(chars: &[char]) -> Vec<u8> {
    let glyphs = u16::try_from(chars.len() + 1).unwrap();
    let tables: Vec<(&[u8; 4], Vec<u8>)> = vec![
        (b"cmap", cmap(chars)),
        (b"head", head()),
        (b"hhea", hhea(glyphs)),
        (b"hmtx", hmtx(glyphs)),
        (b"maxp", maxp(glyphs)),
        (b"name", name(TEST_FONT_NAME)),
    ];

    let mut out = Vec::new();
    out.extend(0x0001_0000u32.to_be_bytes());
    out.extend(u16::try_from(tables.len()).unwrap().to_be_bytes());
    out.extend([0u8; 6]); // search hints, unused by readers here

    let mut offset = 12 + 16 * tables.len();
    let mut bodies = Vec::new();
    for (tag, body) in &tables {
        out.extend(*tag);
        out.extend(0u32.to_be_bytes());
        out.extend(u32::try_from(offset).unwrap().to_be_bytes());
        out.extend(u32::try_from(body.len()).unwrap().to_be_bytes());
        let mut padded = body.clone();
        padded.resize(body.len().div_ceil(4) * 4, 0);
        offset += padded.len();
        bodies.extend(padded);
    }
    out.extend(bodies);
    out
}

fn head() -> Vec<u8> {
    let mut t = Vec::new();
    t.extend(0x0001_0000u32.to_be_bytes()); // version
    t.extend(0x0001_0000u32.to_be_bytes()); // revision
    t.extend(0u32.to_be_bytes()); // checksum adjustment
    t.extend(0x5F0F_3CF5u32.to_be_bytes()); // magic
    t.extend(0u16.to_be_bytes()); // flags
    t.extend(1000u16.to_be_bytes()); // units per em
    t.extend(0u64.to_be_bytes()); // created
    t.extend(0u64.to_be_bytes()); // modified
    for v in [0i16, -200, 1000, 800] {
        t.extend(v.to_be_bytes()); // bbox
    }
    t.extend(0u16.to_be_bytes()); // mac style
    t.extend(8u16.to_be_bytes()); // lowest ppem
    t.extend(2i16.to_be_bytes()); // direction hint
    t.extend(0i16.to_be_bytes()); // short loca
    t.extend(0i16.to_be_bytes()); // glyph data format
    t
}

fn hhea(glyphs: u16) -> Vec<u8> {
    let mut t = Vec::new();
    t.extend(0x0001_0000u32.to_be_bytes());
    for v in [800i16, -200, 0] {
        t.extend(v.to_be_bytes()); // ascender, descender, line gap
    }
    t.extend(1000u16.to_be_bytes()); // advance max
    t.extend([0u8; 6]); // min bearings, max extent
    t.extend(1i16.to_be_bytes()); // caret rise
    t.extend([0u8; 4]); // caret run, offset
    t.extend([0u8; 8]); // reserved
    t.extend(0i16.to_be_bytes()); // metric format
    t.extend(glyphs.to_be_bytes());
    t
}

fn hmtx(glyphs: u16) -> Vec<u8> {
    let mut t = Vec::new();
    for gid in 0..glyphs {
        let advance: u16 = if gid == 0 { 500 } else { 1000 };
        t.extend(advance.to_be_bytes());
        t.extend(0i16.to_be_bytes());
    }
    t
}

fn maxp(glyphs: u16) -> Vec<u8> {
    let mut t = Vec::new();
    t.extend(0x0000_5000u32.to_be_bytes());
    t.extend(glyphs.to_be_bytes());
    t
}

/// Windows Unicode cmap, format 12, one group per character.
fn cmap(chars: &[char]) -> Vec<u8> {
    let mut t = Vec::new();
    t.extend(0u16.to_be_bytes()); // version
    t.extend(1u16.to_be_bytes()); // one subtable
    t.extend(3u16.to_be_bytes()); // Windows
    t.extend(10u16.to_be_bytes()); // full repertoire
    t.extend(12u32.to_be_bytes()); // subtable offset

    let groups = u32::try_from(chars.len()).unwrap();
    t.extend(12u16.to_be_bytes());
    t.extend(0u16.to_be_bytes());
    t.extend((16 + 12 * groups).to_be_bytes());
    t.extend(0u32.to_be_bytes()); // language
    t.extend(groups.to_be_bytes());
    for (i, c) in chars.iter().enumerate() {
        let code = u32::from(*c);
        t.extend(code.to_be_bytes());
        t.extend(code.to_be_bytes());
        t.extend(u32::try_from(i + 1).unwrap().to_be_bytes());
    }
    t
}

/// A name table holding only the PostScript name.
fn name(postscript: &str) -> Vec<u8> {
    let text: Vec<u8> = postscript.encode_utf16().flat_map(u16::to_be_bytes).collect();
    let mut t = Vec::new();
    t.extend(0u16.to_be_bytes()); // format
    t.extend(1u16.to_be_bytes()); // one record
    t.extend(18u16.to_be_bytes()); // storage offset
    for v in [3u16, 1, 0x0409, 6] {
        t.extend(v.to_be_bytes()); // platform, encoding, language, name id
    }
    t.extend(u16::try_from(text.len()).unwrap().to_be_bytes());
    t.extend(0u16.to_be_bytes());
    t.extend(text);
    t
}

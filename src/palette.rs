use std::sync::OnceLock;

use regex::Regex;

use crate::color::Rgb;

/// Recognized color spelling: the bare fill attribute with exactly six hex
/// digits and a closing quote. Other spellings (`style="fill:#..."`,
/// `rgb()`, named colors, `stroke`, 8-digit literals) are deliberately not
/// matched. The closing quote keeps longer literals from half-matching.
const FILL_LITERAL: &str = r##"fill="#([0-9a-fA-F]{6})""##;

fn fill_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(FILL_LITERAL).expect("fill literal pattern must compile"))
}

/// One distinct fill color and every byte offset where its hex digits begin.
///
/// `original` is the color found at scan time and never changes; `current`
/// tracks repaints. Offsets always point at the first of six ASCII hex
/// digits in the document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    original: Rgb,
    current: Rgb,
    offsets: Vec<usize>,
}

impl PaletteEntry {
    pub fn original(&self) -> Rgb {
        self.original
    }

    pub fn current(&self) -> Rgb {
        self.current
    }

    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    pub fn occurrence_count(&self) -> usize {
        self.offsets.len()
    }

    pub(crate) fn set_current(&mut self, color: Rgb) {
        self.current = color;
    }
}

/// The color occurrence index for one document: every distinct fill color in
/// first-occurrence order, each with the offsets of its literals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Single left-to-right pass over the raw SVG text. Colors equal in
    /// decoded RGB are grouped into one entry regardless of hex case.
    pub fn scan(svg: &str) -> Self {
        let mut entries: Vec<PaletteEntry> = Vec::new();

        for caps in fill_regex().captures_iter(svg) {
            let Some(digits) = caps.get(1) else { continue };
            let Ok(color) = Rgb::from_hex(digits.as_str()) else {
                continue;
            };

            match entries.iter_mut().find(|entry| entry.original == color) {
                Some(entry) => entry.offsets.push(digits.start()),
                None => entries.push(PaletteEntry {
                    original: color,
                    current: color,
                    offsets: vec![digits.start()],
                }),
            }
        }

        Self { entries }
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&PaletteEntry> {
        self.entries.get(index)
    }

    pub(crate) fn entry_mut(&mut self, index: usize) -> Option<&mut PaletteEntry> {
        self.entries.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of matched literals across all entries.
    pub fn occurrence_count(&self) -> usize {
        self.entries.iter().map(PaletteEntry::occurrence_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groups_sum_to_total_occurrences() {
        let svg = r##"<svg>
            <rect fill="#112233"/>
            <circle fill="#445566"/>
            <path fill="#112233"/>
            <path fill="#445566"/>
            <path fill="#778899"/>
        </svg>"##;

        let palette = Palette::scan(svg);
        assert_eq!(palette.len(), 3);
        assert_eq!(palette.occurrence_count(), 5);
    }

    #[test]
    fn test_first_seen_order_with_case_insensitive_grouping() {
        let svg = r##"<rect fill="#FF0000"/><rect fill="#00ff00"/><rect fill="#ff0000"/>"##;

        let palette = Palette::scan(svg);
        assert_eq!(palette.len(), 2);

        let first = palette.entry(0).unwrap();
        assert_eq!(first.original(), Rgb::new(255, 0, 0));
        assert_eq!(first.occurrence_count(), 2);

        let second = palette.entry(1).unwrap();
        assert_eq!(second.original(), Rgb::new(0, 255, 0));
        assert_eq!(second.occurrence_count(), 1);
    }

    #[test]
    fn test_offsets_point_at_hex_digits() {
        let svg = r##"<rect fill="#a1b2c3"/><rect fill="#A1B2C3"/>"##;

        let palette = Palette::scan(svg);
        assert_eq!(palette.len(), 1);

        let entry = palette.entry(0).unwrap();
        for &offset in entry.offsets() {
            let digits = &svg[offset..offset + 6];
            assert_eq!(Rgb::from_hex(digits), Ok(entry.original()));
        }
    }

    #[test]
    fn test_offsets_are_strictly_increasing() {
        let svg = r##"<a fill="#0000ff"/><b fill="#0000FF"/><c fill="#0000ff"/>"##;

        let palette = Palette::scan(svg);
        let offsets = palette.entry(0).unwrap().offsets();
        assert_eq!(offsets.len(), 3);
        assert!(offsets.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_other_spellings_are_not_matched() {
        let cases = [
            r##"<rect stroke="#112233"/>"##,
            r##"<rect style="fill:#112233"/>"##,
            r##"<rect fill="rgb(17,34,51)"/>"##,
            r##"<rect fill="red"/>"##,
            r##"<rect fill="#123"/>"##,
            r##"<rect fill="#12345"/>"##,
            r##"<rect fill="#1234567"/>"##,
            r##"<rect fill="#AABBCCDD"/>"##,
            r##"<rect fill="#12345g"/>"##,
        ];

        for svg in cases {
            let palette = Palette::scan(svg);
            assert!(palette.is_empty(), "expected no match in {svg}");
        }
    }

    #[test]
    fn test_unterminated_literal_is_not_matched() {
        let palette = Palette::scan(r##"<rect fill="#123456"##);
        assert!(palette.is_empty());
    }

    #[test]
    fn test_empty_and_fill_free_text() {
        assert!(Palette::scan("").is_empty());
        assert!(Palette::scan("<svg><rect width=\"4\"/></svg>").is_empty());
        assert_eq!(Palette::scan("").occurrence_count(), 0);
    }
}

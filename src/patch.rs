use crate::color::{Rgb, HEX_DIGITS};
use crate::error::PatchError;

/// Splice `color`'s canonical hex encoding over the six characters starting
/// at each offset. The replacement width equals the matched width, so the
/// text length never changes and offsets stored for other colors stay
/// valid. Offsets must come from a scan of this same text.
pub fn apply_at_offsets(
    svg: &mut String,
    offsets: &[usize],
    color: Rgb,
) -> Result<(), PatchError> {
    let hex = color.to_hex();
    debug_assert_eq!(hex.len(), HEX_DIGITS);

    for &offset in offsets {
        let end = offset + HEX_DIGITS;
        if end > svg.len() || !svg.is_char_boundary(offset) || !svg.is_char_boundary(end) {
            return Err(PatchError::OffsetOutOfBounds {
                offset,
                len: svg.len(),
            });
        }
    }

    for &offset in offsets {
        svg.replace_range(offset..offset + HEX_DIGITS, &hex);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Palette;

    const SVG: &str =
        r##"<rect fill="#FF0000"/><rect fill="#00ff00"/><rect fill="#ff0000"/>"##;

    #[test]
    fn test_patched_offsets_decode_to_new_color() {
        let mut text = SVG.to_string();
        let palette = Palette::scan(&text);
        let offsets = palette.entry(0).unwrap().offsets().to_vec();

        apply_at_offsets(&mut text, &offsets, Rgb::new(18, 52, 86)).unwrap();

        for offset in offsets {
            assert_eq!(&text[offset..offset + 6], "123456");
        }
    }

    #[test]
    fn test_other_spans_are_untouched() {
        let mut text = SVG.to_string();
        let palette = Palette::scan(&text);
        let red_offsets = palette.entry(0).unwrap().offsets().to_vec();
        let green_offset = palette.entry(1).unwrap().offsets()[0];

        apply_at_offsets(&mut text, &red_offsets, Rgb::new(0, 0, 0)).unwrap();

        assert_eq!(&text[green_offset..green_offset + 6], "00ff00");
        assert!(text.starts_with(r##"<rect fill="#000000"/>"##));
    }

    #[test]
    fn test_length_is_preserved() {
        let mut text = SVG.to_string();
        let palette = Palette::scan(&text);
        let before = text.len();

        for entry in palette.entries() {
            apply_at_offsets(&mut text, entry.offsets(), Rgb::new(1, 2, 3)).unwrap();
            assert_eq!(text.len(), before);
        }
    }

    #[test]
    fn test_repaint_to_own_value_roundtrips() {
        let mut text = r##"<rect fill="#ABCDEF"/>"##.to_string();
        let palette = Palette::scan(&text);
        let entry = palette.entry(0).unwrap();

        apply_at_offsets(&mut text, entry.offsets(), entry.current()).unwrap();

        assert_eq!(text, r##"<rect fill="#ABCDEF"/>"##);
    }

    #[test]
    fn test_lowercase_literal_canonicalizes_on_self_repaint() {
        let mut text = r##"<rect fill="#abcdef"/>"##.to_string();
        let palette = Palette::scan(&text);
        let entry = palette.entry(0).unwrap();

        apply_at_offsets(&mut text, entry.offsets(), entry.current()).unwrap();

        assert_eq!(text, r##"<rect fill="#ABCDEF"/>"##);
    }

    #[test]
    fn test_out_of_bounds_offset_is_rejected() {
        let mut text = "short".to_string();

        let err = apply_at_offsets(&mut text, &[3], Rgb::new(0, 0, 0)).unwrap_err();
        assert_eq!(err, PatchError::OffsetOutOfBounds { offset: 3, len: 5 });
        assert_eq!(text, "short");
    }

    #[test]
    fn test_invalid_offset_leaves_text_untouched() {
        let mut text = r##"<rect fill="#FF0000"/>"##.to_string();
        let palette = Palette::scan(&text);
        let mut offsets = palette.entry(0).unwrap().offsets().to_vec();
        offsets.push(text.len());

        let result = apply_at_offsets(&mut text, &offsets, Rgb::new(0, 0, 0));

        assert!(result.is_err());
        assert_eq!(text, r##"<rect fill="#FF0000"/>"##);
    }
}

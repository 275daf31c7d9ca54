use crate::models::QrCode;

/// Render the QR code as multi-line text art.
///
/// Each module becomes a two-character cell so the output is roughly square
/// in a terminal. With `invert` set, dark modules print as spaces on a dark
/// background instead.
pub fn to_string_art(qr: &QrCode, invert: bool) -> String {
    let width = qr.width();
    let mut out = String::with_capacity((width * 2 + 1) * width);
    for y in 0..width {
        for x in 0..width {
            if qr.modules.get(x, y) != invert {
                out.push_str("██");
            } else {
                out.push_str("  ");
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{encode, ECLevel};

    #[test]
    fn test_dimensions() {
        let qr = encode(b"text art", ECLevel::M).unwrap();
        let art = to_string_art(&qr, false);
        let lines: Vec<&str> = art.lines().collect();
        assert_eq!(lines.len(), qr.width());
        assert_eq!(lines[0].chars().count(), qr.width() * 2);
    }

    #[test]
    fn test_invert_swaps_cells() {
        let qr = encode(b"text art", ECLevel::M).unwrap();
        let normal = to_string_art(&qr, false);
        let inverted = to_string_art(&qr, true);
        assert_ne!(normal, inverted);
        // Quiet zone row is all spaces normally, all blocks inverted
        assert!(normal.lines().next().unwrap().chars().all(|c| c == ' '));
        assert!(inverted.lines().next().unwrap().chars().all(|c| c == '█'));
    }
}

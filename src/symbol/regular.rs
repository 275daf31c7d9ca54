//! Function pattern placement, data placement and per-mask finalization.

use crate::encoder::bits::BitBuffer;
use crate::encoder::format::{format_info, version_info};
use crate::encoder::version::{alignment_centers, VersionDescriptor};
use crate::models::{ECLevel, MaskPattern};
use crate::symbol::Symbol;

/// Build the symbol with every function pattern placed, the format and
/// version slots reserved, and the unmasked message stream written along the
/// zig-zag path. Masking and the format/version values are applied per
/// candidate by [`finalize_candidate`].
///
/// Panics if the message stream does not exactly fill the data modules.
pub(crate) fn build_base_symbol(
    descriptor: &VersionDescriptor,
    message: &BitBuffer,
    quiet_zone: usize,
) -> Symbol {
    let mut symbol = Symbol::new(descriptor.symbol_size(), quiet_zone);
    place_function_patterns(&mut symbol, descriptor.version);
    place_message(&mut symbol, message);
    assert_eq!(
        symbol.empty_count(),
        0,
        "unfilled modules after data placement (version={})",
        descriptor.version
    );
    symbol
}

/// Produce one mask candidate: apply the mask to the data modules, then
/// write the format information (and version information for versions 7+)
/// so penalty scoring sees the finished symbol.
pub(crate) fn finalize_candidate(
    base: &Symbol,
    descriptor: &VersionDescriptor,
    level: ECLevel,
    mask: MaskPattern,
) -> Symbol {
    let mut symbol = base.clone();
    symbol.apply_mask(mask);
    place_format_info(&mut symbol, level, mask);
    if descriptor.version >= 7 {
        place_version_info(&mut symbol, descriptor.version);
    }
    symbol
}

fn place_function_patterns(symbol: &mut Symbol, version: u8) {
    let size = symbol.size();

    place_finder_patterns(symbol);
    place_timing_patterns(symbol);
    place_alignment_patterns(symbol, version);

    // Dark module, always present above the bottom-left finder
    symbol.set_function(8, size - 8, true);

    reserve_format_slots(symbol);
    if version >= 7 {
        reserve_version_slots(symbol);
    }
}

/// The three 7x7 finder patterns with their one-module light separators
fn place_finder_patterns(symbol: &mut Symbol) {
    let size = symbol.size();
    for (left, top) in [(0, 0), (size - 7, 0), (0, size - 7)] {
        // 8x8 block covering finder plus separator, clipped to the symbol
        for dy in -1i32..=7 {
            for dx in -1i32..=7 {
                let x = left as i32 + dx;
                let y = top as i32 + dy;
                if x < 0 || y < 0 || x >= size as i32 || y >= size as i32 {
                    continue;
                }
                // Concentric rings: dark 7x7 border, light ring, dark 3x3 core
                let dist = (dx - 3).abs().max((dy - 3).abs());
                symbol.set_function(x as usize, y as usize, dist != 2 && dist != 4);
            }
        }
    }
}

/// Alternating timing patterns on row 6 and column 6, dark at even indices
fn place_timing_patterns(symbol: &mut Symbol) {
    let size = symbol.size();
    for i in 8..size - 8 {
        symbol.set_function(i, 6, i % 2 == 0);
        symbol.set_function(6, i, i % 2 == 0);
    }
}

/// 5x5 alignment patterns at the version's center grid, skipping the three
/// corners occupied by finder patterns
fn place_alignment_patterns(symbol: &mut Symbol, version: u8) {
    let centers = alignment_centers(version);
    let last = centers.len().wrapping_sub(1);
    for (i, &cx) in centers.iter().enumerate() {
        for (j, &cy) in centers.iter().enumerate() {
            if (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0) {
                continue;
            }
            for dy in -2i32..=2 {
                for dx in -2i32..=2 {
                    let dark = dx.abs().max(dy.abs()) != 1;
                    symbol.set_function(
                        (cx as i32 + dx) as usize,
                        (cy as i32 + dy) as usize,
                        dark,
                    );
                }
            }
        }
    }
}

/// Mark the 15 format slots around the top-left finder and their copies
/// along the right and bottom edges; values are written per mask candidate.
fn reserve_format_slots(symbol: &mut Symbol) {
    let size = symbol.size();
    for i in 0..9 {
        if i != 6 {
            symbol.set_function(8, i, false);
            symbol.set_function(i, 8, false);
        }
    }
    for i in 0..8 {
        symbol.set_function(size - 1 - i, 8, false);
    }
    for i in 0..7 {
        symbol.set_function(8, size - 7 + i, false);
    }
}

/// Mark the two 3x6 version information regions for versions 7+
fn reserve_version_slots(symbol: &mut Symbol) {
    let size = symbol.size();
    for y in 0..6 {
        for x in size - 11..size - 8 {
            symbol.set_function(x, y, false);
            symbol.set_function(y, x, false);
        }
    }
}

/// Write the 15-bit format word into both reserved locations.
///
/// Bit 0 is the least significant bit of the BCH-protected word; placement
/// follows ISO/IEC 18004 figure 25.
fn place_format_info(symbol: &mut Symbol, level: ECLevel, mask: MaskPattern) {
    let bits = format_info(level, mask);
    let bit = |i: usize| (bits >> i) & 1 == 1;
    let size = symbol.size();

    // First copy around the top-left finder
    for i in 0..6 {
        symbol.set_function(8, i, bit(i));
    }
    symbol.set_function(8, 7, bit(6));
    symbol.set_function(8, 8, bit(7));
    symbol.set_function(7, 8, bit(8));
    for i in 9..15 {
        symbol.set_function(14 - i, 8, bit(i));
    }

    // Second copy split between the top-right and bottom-left edges
    for i in 0..8 {
        symbol.set_function(size - 1 - i, 8, bit(i));
    }
    for i in 8..15 {
        symbol.set_function(8, size - 15 + i, bit(i));
    }
}

/// Write the 18-bit version word into both reserved regions (versions 7+)
fn place_version_info(symbol: &mut Symbol, version: u8) {
    let bits = version_info(version);
    let size = symbol.size();
    for i in 0..18 {
        let bit = (bits >> i) & 1 == 1;
        let a = size - 11 + i % 3;
        let b = i / 3;
        symbol.set_function(a, b, bit);
        symbol.set_function(b, a, bit);
    }
}

/// Write the message stream into the unfilled modules along the canonical
/// path: two-column strips from the right edge leftward, direction flipping
/// per strip, the vertical timing column skipped.
fn place_message(symbol: &mut Symbol, message: &BitBuffer) {
    let size = symbol.size();
    let mut i = 0usize;
    let mut right = size as i32 - 1;
    while right >= 1 {
        if right == 6 {
            right = 5;
        }
        let upward = ((right + 1) & 2) == 0;
        for vert in 0..size {
            let y = if upward { size - 1 - vert } else { vert };
            for j in 0..2 {
                let x = (right - j) as usize;
                if !symbol.is_filled(x, y) {
                    assert!(i < message.len(), "message stream exhausted early");
                    symbol.set_data(x, y, message.at(i));
                    i += 1;
                }
            }
        }
        right -= 2;
    }
    assert_eq!(i, message.len(), "message stream did not fill the symbol");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::version::raw_data_modules;

    fn zero_message(version: u8) -> BitBuffer {
        let mut message = BitBuffer::new();
        message.append_zeros(raw_data_modules(version));
        message
    }

    fn base(version: u8) -> Symbol {
        let descriptor = VersionDescriptor::new(version, ECLevel::L);
        build_base_symbol(&descriptor, &zero_message(version), 0)
    }

    #[test]
    fn test_finder_patterns() {
        let symbol = base(1);
        for (left, top) in [(0usize, 0usize), (14, 0), (0, 14)] {
            // Outer border and core dark, ring light; all fixed
            assert!(symbol.get(left, top));
            assert!(symbol.get(left + 6, top + 6));
            assert!(symbol.get(left + 3, top + 3));
            assert!(!symbol.get(left + 1, top + 1));
            assert!(symbol.is_fixed(left + 3, top + 3));
        }
        // Separators are light
        assert!(!symbol.get(7, 0));
        assert!(!symbol.get(0, 7));
        assert!(!symbol.get(13, 0));
        assert!(!symbol.get(7, 20));
    }

    #[test]
    fn test_timing_patterns() {
        let symbol = base(2);
        for i in 8..symbol.size() - 8 {
            assert_eq!(symbol.get(i, 6), i % 2 == 0);
            assert_eq!(symbol.get(6, i), i % 2 == 0);
            assert!(symbol.is_fixed(i, 6));
            assert!(symbol.is_fixed(6, i));
        }
    }

    #[test]
    fn test_alignment_pattern_v2() {
        // Version 2 has a single alignment pattern centered at (18, 18)
        let symbol = base(2);
        assert!(symbol.get(18, 18));
        assert!(!symbol.get(17, 18));
        assert!(symbol.get(16, 16));
        assert!(symbol.is_fixed(16, 16));
    }

    #[test]
    fn test_dark_module() {
        let symbol = base(1);
        assert!(symbol.get(8, 13));
        assert!(symbol.is_fixed(8, 13));
    }

    #[test]
    fn test_base_symbol_is_complete() {
        for version in [1u8, 2, 5, 7, 10, 25, 40] {
            let symbol = base(version);
            assert_eq!(symbol.empty_count(), 0, "v{}", version);
        }
    }

    #[test]
    fn test_format_info_placement() {
        let descriptor = VersionDescriptor::new(1, ECLevel::M);
        let base = build_base_symbol(&descriptor, &zero_message(1), 0);
        let symbol = finalize_candidate(&base, &descriptor, ECLevel::M, MaskPattern::Pattern0);
        // Format word for (M, 0) is 0x5412 = 101010000010010; bit 0 sits at
        // (8, 0) and at (size-1, 8).
        assert!(!symbol.get(8, 0));
        assert!(symbol.get(8, 1));
        assert!(!symbol.get(20, 8));
        assert!(symbol.get(19, 8));
        // Bit 14 lands at (0, 8) and at the bottom of column 8
        assert!(symbol.get(0, 8));
        assert!(symbol.get(8, 20));
        assert!(!symbol.get(8, 14));
    }

    #[test]
    fn test_version_info_placement() {
        let descriptor = VersionDescriptor::new(7, ECLevel::L);
        let base = build_base_symbol(&descriptor, &zero_message(7), 0);
        let symbol = finalize_candidate(&base, &descriptor, ECLevel::L, MaskPattern::Pattern0);
        let bits = version_info(7);
        let size = symbol.size();
        for i in 0..18 {
            let expected = (bits >> i) & 1 == 1;
            assert_eq!(symbol.get(size - 11 + i % 3, i / 3), expected);
            assert_eq!(symbol.get(i / 3, size - 11 + i % 3), expected);
        }
    }

    #[test]
    fn test_function_modules_survive_masking() {
        let descriptor = VersionDescriptor::new(7, ECLevel::Q);
        let base = build_base_symbol(&descriptor, &zero_message(7), 0);
        for index in 0..8u8 {
            let mask = MaskPattern::from_index(index).unwrap();
            let candidate = finalize_candidate(&base, &descriptor, ECLevel::Q, mask);
            for y in 0..base.size() {
                for x in 0..base.size() {
                    if base.is_fixed(x, y) {
                        assert!(candidate.is_fixed(x, y));
                    }
                }
            }
            // Finder cores and timing stay put under every mask
            assert!(candidate.get(3, 3));
            assert!(candidate.get(10, 6));
            assert!(!candidate.get(11, 6));
        }
    }
}

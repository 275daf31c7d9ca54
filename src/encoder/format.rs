use crate::models::{ECLevel, MaskPattern};

/// 15-bit format information word: 2 level bits and 3 mask bits protected by
/// BCH(15,5) with generator 0x537, XOR-masked with 0x5412.
pub fn format_info(level: ECLevel, mask: MaskPattern) -> u16 {
    let data = u32::from(level.format_bits() << 3 | mask.index());
    let mut rem = data;
    for _ in 0..10 {
        rem = (rem << 1) ^ ((rem >> 9) & 1) * 0x537;
    }
    (((data << 10) | rem) ^ 0x5412) as u16
}

/// 18-bit version information word for versions 7-40: 6 version bits
/// protected by BCH(18,6) with generator 0x1F25.
pub fn version_info(version: u8) -> u32 {
    debug_assert!((7..=40).contains(&version));
    let data = u32::from(version);
    let mut rem = data;
    for _ in 0..12 {
        rem = (rem << 1) ^ ((rem >> 11) & 1) * 0x1F25;
    }
    (data << 12) | rem
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_format_words() {
        assert_eq!(format_info(ECLevel::M, MaskPattern::Pattern0), 0x5412);
        assert_eq!(format_info(ECLevel::L, MaskPattern::Pattern0), 0x77C4);
    }

    #[test]
    fn test_format_words_distinct() {
        let mut seen = Vec::new();
        for level in [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H] {
            for index in 0..8u8 {
                let word = format_info(level, MaskPattern::from_index(index).unwrap());
                assert!(word < 1 << 15);
                assert!(!seen.contains(&word));
                seen.push(word);
            }
        }
        assert_eq!(seen.len(), 32);
    }

    #[test]
    fn test_known_version_words() {
        assert_eq!(version_info(7), 0x07C94);
        assert_eq!(version_info(8), 0x085BC);
    }

    #[test]
    fn test_version_words_self_check() {
        // Dividing the full word by the generator must leave no remainder
        for version in 7..=40u8 {
            let word = version_info(version);
            assert_eq!(word >> 12, u32::from(version));
            let mut rem = word;
            for i in (0..6).rev() {
                if (rem >> (12 + i)) & 1 == 1 {
                    rem ^= 0x1F25 << i;
                }
            }
            assert_eq!(rem, 0, "v{}", version);
        }
    }
}

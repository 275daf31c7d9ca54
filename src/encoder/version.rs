use crate::encoder::data::VersionClass;
use crate::models::ECLevel;

// Error correction tables from the QR Code specification (Model 2) via
// Nayuki QR Code generator. Index: [ec_level][version]
const ECC_CODEWORDS_PER_BLOCK: [[i8; 41]; 4] = [
    [
        -1, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28,
        30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Low
    [
        -1, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ], // Medium
    [
        -1, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30,
        30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Quartile
    [
        -1, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // High
];

const NUM_ERROR_CORRECTION_BLOCKS: [[i8; 41]; 4] = [
    [
        -1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12,
        13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ], // Low
    [
        -1, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ], // Medium
    [
        -1, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27,
        29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ], // Quartile
    [
        -1, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32,
        35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ], // High
];

/// One group of identically sized blocks within a version's block layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockGroup {
    /// Number of blocks in the group
    pub num_blocks: usize,
    /// Total codewords per block (data + error correction)
    pub total_codewords: usize,
    /// Data codewords per block
    pub data_codewords: usize,
}

/// Capacity and layout of one (version, level) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionDescriptor {
    /// Version number (1-40)
    pub version: u8,
    /// Error correction level
    pub level: ECLevel,
    /// Block groups in interleaving order; unequal data lengths appear as
    /// a short group followed by a long group
    pub groups: Vec<BlockGroup>,
}

impl VersionDescriptor {
    /// Build the descriptor for a version and level
    pub fn new(version: u8, level: ECLevel) -> VersionDescriptor {
        assert!((1..=40).contains(&version), "version out of range");
        let total_codewords = raw_data_modules(version) / 8;
        let ecc_per_block =
            ECC_CODEWORDS_PER_BLOCK[level.table_index()][version as usize] as usize;
        let num_blocks =
            NUM_ERROR_CORRECTION_BLOCKS[level.table_index()][version as usize] as usize;

        // Blocks differ in length by at most one codeword; the shorter
        // blocks come first in interleaving order.
        let short_length = total_codewords / num_blocks;
        let num_long_blocks = total_codewords % num_blocks;
        let num_short_blocks = num_blocks - num_long_blocks;

        let mut groups = vec![BlockGroup {
            num_blocks: num_short_blocks,
            total_codewords: short_length,
            data_codewords: short_length - ecc_per_block,
        }];
        if num_long_blocks > 0 {
            groups.push(BlockGroup {
                num_blocks: num_long_blocks,
                total_codewords: short_length + 1,
                data_codewords: short_length + 1 - ecc_per_block,
            });
        }

        VersionDescriptor {
            version,
            level,
            groups,
        }
    }

    /// Symbol side length in modules
    pub fn symbol_size(&self) -> usize {
        17 + 4 * self.version as usize
    }

    /// Total codewords (data + error correction)
    pub fn num_total_codewords(&self) -> usize {
        self.groups
            .iter()
            .map(|g| g.num_blocks * g.total_codewords)
            .sum()
    }

    /// Data codewords across all blocks
    pub fn num_data_codewords(&self) -> usize {
        self.groups
            .iter()
            .map(|g| g.num_blocks * g.data_codewords)
            .sum()
    }

    /// Data capacity in bits
    pub fn num_data_bits(&self) -> usize {
        self.num_data_codewords() * 8
    }

    /// Error correction codewords per block (equal for every block)
    pub fn ec_codewords_per_block(&self) -> usize {
        ECC_CODEWORDS_PER_BLOCK[self.level.table_index()][self.version as usize] as usize
    }

    /// Number of blocks across all groups
    pub fn num_blocks(&self) -> usize {
        self.groups.iter().map(|g| g.num_blocks).sum()
    }

    /// Leftover bits appended as zeros after the interleaved codewords
    pub fn remainder_bits(&self) -> usize {
        raw_data_modules(self.version) % 8
    }

    /// Terminator bits to append: up to 4, fewer when the capacity is tight
    pub fn num_terminator_bits(&self, encoded_bits: usize) -> usize {
        (self.num_data_bits() - encoded_bits).min(4)
    }
}

/// Modules available for data and error correction in a version: the symbol
/// area minus finder, separator, timing and alignment patterns and the
/// format/version information regions.
pub fn raw_data_modules(version: u8) -> usize {
    let v = version as usize;
    let mut result = (16 * v + 128) * v + 64;
    if v >= 2 {
        let num_align = v / 7 + 2;
        result -= (25 * num_align - 10) * num_align - 55;
        if v >= 7 {
            result -= 36;
        }
    }
    result
}

/// Alignment pattern center coordinates for a version (empty for version 1).
///
/// Centers are evenly stepped between column 6 and the last column, with the
/// irregular version 32 spacing from ISO/IEC 18004 Annex E.
pub fn alignment_centers(version: u8) -> Vec<usize> {
    if version == 1 {
        return Vec::new();
    }
    let num_align = (version / 7 + 2) as usize;
    let size = 17 + 4 * version as usize;
    let step = if version == 32 {
        26
    } else {
        (version as usize * 4 + num_align * 2 + 1) / (num_align * 2 - 2) * 2
    };

    let mut centers = vec![6usize];
    let mut position = size - 7;
    for _ in 1..num_align {
        centers.push(position);
        position -= step;
    }
    centers[1..].reverse();
    centers
}

/// Smallest version in the class whose data capacity admits the encoded
/// stream at the requested level
pub fn choose_version(level: ECLevel, class: VersionClass, encoded_bits: usize) -> Option<u8> {
    (class.min_version()..=class.max_version())
        .find(|&v| VersionDescriptor::new(v, level).num_data_bits() >= encoded_bits)
}

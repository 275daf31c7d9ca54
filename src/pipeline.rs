use rayon::prelude::*;

use crate::encoder::bits::BitBuffer;
use crate::encoder::data::{encode_segment, VersionClass, VERSION_CLASSES};
use crate::encoder::reed_solomon::ReedSolomonEncoder;
use crate::encoder::version::{choose_version, VersionDescriptor};
use crate::models::{ECLevel, MaskPattern, QrCode};
use crate::symbol::regular::{build_base_symbol, finalize_candidate};
use crate::symbol::Symbol;
use crate::{EncodeError, EncodeOptions};

/// Run the full encoding pipeline: segment encoding, version selection,
/// terminator and padding, block error correction and interleaving, symbol
/// construction and mask selection.
pub(crate) fn encode_to_qr_code(
    content: &[u8],
    level: ECLevel,
    options: &EncodeOptions,
) -> Result<QrCode, EncodeError> {
    let mask_override = match options.mask {
        Some(index) => match MaskPattern::from_index(index) {
            Some(mask) => Some(mask),
            None => return Err(EncodeError::InvalidOption),
        },
        None => None,
    };

    let (descriptor, mut encoded) = select_version(content, level, options.version)?;

    // Terminator, then zero-fill to a codeword boundary
    encoded.append_zeros(descriptor.num_terminator_bits(encoded.len()));
    encoded.append_zeros(encoded.len().wrapping_neg() & 7);

    // Alternating pad codewords up to the version's exact data capacity
    for &pad in [0xEC_u32, 0x11].iter().cycle() {
        if encoded.len() >= descriptor.num_data_bits() {
            break;
        }
        encoded.append(pad, 8);
    }
    assert_eq!(
        encoded.len(),
        descriptor.num_data_bits(),
        "padded stream does not match capacity (version={})",
        descriptor.version
    );

    let message = interleave_blocks(&descriptor, &encoded);

    let base = build_base_symbol(&descriptor, &message, options.quiet_zone);
    let (mask, symbol) = match mask_override {
        Some(mask) => (mask, finalize_candidate(&base, &descriptor, level, mask)),
        None => select_mask(&base, &descriptor, level),
    };

    Ok(QrCode {
        content: content.to_vec(),
        version: descriptor.version,
        size: descriptor.symbol_size(),
        level,
        mask,
        quiet_zone: options.quiet_zone,
        modules: symbol.to_matrix(),
    })
}

/// Encode the payload against each version class in order and pick the
/// smallest version that holds it; wider classes re-encode because the
/// character count indicator grows.
fn select_version(
    content: &[u8],
    level: ECLevel,
    forced: Option<u8>,
) -> Result<(VersionDescriptor, BitBuffer), EncodeError> {
    if let Some(version) = forced {
        if !(1..=40).contains(&version) {
            return Err(EncodeError::InvalidVersion);
        }
        let class = VersionClass::for_version(version);
        let encoded = encode_segment(content, class).ok_or(EncodeError::ContentTooLong)?;
        let descriptor = VersionDescriptor::new(version, level);
        if descriptor.num_data_bits() < encoded.len() {
            return Err(EncodeError::ContentTooLong);
        }
        return Ok((descriptor, encoded));
    }

    for class in VERSION_CLASSES {
        let Some(encoded) = encode_segment(content, class) else {
            continue;
        };
        if let Some(version) = choose_version(level, class, encoded.len()) {
            if crate::debug::debug_enabled() {
                eprintln!(
                    "DEBUG: chose version {} ({} of {} data bits used)",
                    version,
                    encoded.len(),
                    VersionDescriptor::new(version, level).num_data_bits()
                );
            }
            return Ok((VersionDescriptor::new(version, level), encoded));
        }
    }
    Err(EncodeError::ContentTooLong)
}

/// Split the padded stream into blocks, compute each block's error
/// correction codewords, and interleave: data codewords column by column
/// across the blocks, then the error correction codewords, then the
/// version's remainder bits as zeros.
fn interleave_blocks(descriptor: &VersionDescriptor, encoded: &BitBuffer) -> BitBuffer {
    let rs = ReedSolomonEncoder::new(descriptor.ec_codewords_per_block());

    let mut blocks: Vec<(Vec<u8>, Vec<u8>)> = Vec::with_capacity(descriptor.num_blocks());
    let mut start = 0usize;
    for group in &descriptor.groups {
        for _ in 0..group.num_blocks {
            let end = start + group.data_codewords * 8;
            let data = encoded.substring(start, end).to_bytes();
            let ec = rs.encode(&data);
            blocks.push((data, ec));
            start = end;
        }
    }

    let mut message = BitBuffer::new();
    // Blocks may hold unequal data counts; exhausted blocks are skipped
    let max_data = blocks.iter().map(|(d, _)| d.len()).max().unwrap_or(0);
    for i in 0..max_data {
        for (data, _) in &blocks {
            if let Some(&byte) = data.get(i) {
                message.append(u32::from(byte), 8);
            }
        }
    }
    for i in 0..descriptor.ec_codewords_per_block() {
        for (_, ec) in &blocks {
            message.append(u32::from(ec[i]), 8);
        }
    }
    message.append_zeros(descriptor.remainder_bits());
    message
}

/// Score all eight mask candidates and keep the cheapest; ties break to the
/// lowest mask index regardless of evaluation order.
fn select_mask(
    base: &Symbol,
    descriptor: &VersionDescriptor,
    level: ECLevel,
) -> (MaskPattern, Symbol) {
    let (_, mask, symbol) = (0u8..8)
        .into_par_iter()
        .map(|index| {
            let mask = MaskPattern::from_index(index).unwrap();
            let candidate = finalize_candidate(base, descriptor, level, mask);
            let penalty = candidate.penalty();
            if crate::debug::debug_enabled() {
                eprintln!(
                    "DEBUG: mask={} p1={} p2={} p3={} p4={} total={}",
                    index,
                    candidate.penalty1(),
                    candidate.penalty2(),
                    candidate.penalty3(),
                    candidate.penalty4(),
                    penalty
                );
            }
            (penalty, index, candidate)
        })
        .min_by_key(|&(penalty, index, _)| (penalty, index))
        .expect("eight mask candidates");
    (MaskPattern::from_index(mask).unwrap(), symbol)
}

use crate::encoder::galois::{generator_polynomial, Gf256};

/// Reed-Solomon error correction encoder for one block size.
///
/// Computes the remainder of D(x) * x^t divided by the generator polynomial
/// of degree t over GF(256); the t remainder coefficients (high degree first)
/// are the error correction codewords appended to the data block.
pub struct ReedSolomonEncoder {
    divisor: Vec<u8>,
}

impl ReedSolomonEncoder {
    /// Create an encoder producing `ec_codewords` error correction codewords
    pub fn new(ec_codewords: usize) -> Self {
        Self {
            divisor: generator_polynomial(ec_codewords),
        }
    }

    /// Error correction codewords for one data block
    pub fn encode(&self, data: &[u8]) -> Vec<u8> {
        let degree = self.divisor.len();
        let mut remainder = vec![0u8; degree];
        for &byte in data {
            let factor = byte ^ remainder[0];
            remainder.rotate_left(1);
            remainder[degree - 1] = 0;
            for (r, &d) in remainder.iter_mut().zip(&self.divisor) {
                *r ^= Gf256::mul(d, factor);
            }
        }
        remainder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Syndrome check: the codeword polynomial (data followed by EC bytes)
    /// must vanish at alpha^0 .. alpha^(t-1).
    fn syndromes_are_zero(codeword: &[u8], ec_codewords: usize) -> bool {
        (0..ec_codewords).all(|i| {
            let x = Gf256::exp(i);
            let mut acc = 0u8;
            for &byte in codeword {
                acc = Gf256::mul(acc, x) ^ byte;
            }
            acc == 0
        })
    }

    #[test]
    fn test_known_block() {
        // "HELLO WORLD" encoded as a version 1-M data block: 16 data
        // codewords and 10 error correction codewords.
        let data = [
            32, 91, 11, 120, 209, 114, 220, 77, 67, 64, 236, 17, 236, 17, 236, 17,
        ];
        let encoder = ReedSolomonEncoder::new(10);
        assert_eq!(
            encoder.encode(&data),
            vec![196, 35, 39, 119, 235, 215, 231, 226, 93, 23]
        );
    }

    #[test]
    fn test_zero_data() {
        let encoder = ReedSolomonEncoder::new(7);
        assert_eq!(encoder.encode(&[0u8; 19]), vec![0u8; 7]);
    }

    #[test]
    fn test_divisibility_property() {
        // D * x^t + E must be divisible by the generator polynomial, i.e.
        // all syndromes of the full codeword are zero.
        for &ec in &[7usize, 10, 13, 18, 30] {
            let data: Vec<u8> = (0..25u8).map(|i| i.wrapping_mul(37).wrapping_add(11)).collect();
            let encoder = ReedSolomonEncoder::new(ec);
            let mut codeword = data.clone();
            codeword.extend(encoder.encode(&data));
            assert!(syndromes_are_zero(&codeword, ec), "ec={}", ec);
        }
    }
}

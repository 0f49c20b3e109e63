//! Linear quantization between bounded reals and fixed-width bit vectors.
//!
//! A value in `[min, max]` maps onto the integer grid `0..=2^w - 1` and is
//! emitted most-significant bit first. Decoding inverts the mapping, so the
//! round trip loses at most half a quantization step.

use crate::error::{EvolutionError, GaResult};
use crate::schema::Bound;

/// Widest supported encoding per variable.
pub const MAX_BIT_WIDTH: u32 = 32;

fn check_width(bit_width: u32) -> GaResult<()> {
    if bit_width == 0 || bit_width > MAX_BIT_WIDTH {
        Err(EvolutionError::InvalidBitWidth(bit_width))
    } else {
        Ok(())
    }
}

/// Largest integer representable in `bit_width` bits.
fn max_level(bit_width: u32) -> u64 {
    (1u64 << bit_width) - 1
}

/// Encode `value` into `bit_width` bits, most-significant bit first.
///
/// Out-of-range values saturate to the nearest end of the bound.
pub fn encode(value: f64, bound: Bound, bit_width: u32) -> GaResult<Vec<bool>> {
    check_width(bit_width)?;
    let max_level = max_level(bit_width);

    let clamped = bound.clamp(value);
    let scaled = ((clamped - bound.min()) / bound.span() * max_level as f64).round();
    let level = (scaled.max(0.0) as u64).min(max_level);

    Ok((0..bit_width)
        .rev()
        .map(|shift| (level >> shift) & 1 == 1)
        .collect())
}

/// Decode a most-significant-first bit sequence back into `bound`.
///
/// All zeros decode to exactly `bound.min()` and all ones to exactly
/// `bound.max()`.
pub fn decode(bits: &[bool], bound: Bound) -> GaResult<f64> {
    let bit_width =
        u32::try_from(bits.len()).map_err(|_| EvolutionError::InvalidBitWidth(u32::MAX))?;
    check_width(bit_width)?;
    let max_level = max_level(bit_width);

    let level = bits
        .iter()
        .fold(0u64, |acc, &bit| (acc << 1) | u64::from(bit));

    if level == max_level {
        return Ok(bound.max());
    }
    Ok(bound.min() + (level as f64 / max_level as f64) * bound.span())
}

/// Distance between two adjacent representable values.
pub fn resolution(bound: Bound, bit_width: u32) -> GaResult<f64> {
    check_width(bit_width)?;
    Ok(bound.span() / max_level(bit_width) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bound(min: f64, max: f64) -> Bound {
        Bound::new(min, max).unwrap()
    }

    #[test]
    fn test_encode_msb_first() {
        let b = bound(0.0, 15.0);
        assert_eq!(encode(0.0, b, 4).unwrap(), vec![false; 4]);
        assert_eq!(encode(15.0, b, 4).unwrap(), vec![true; 4]);
        assert_eq!(encode(1.0, b, 4).unwrap(), vec![false, false, false, true]);
        assert_eq!(encode(8.0, b, 4).unwrap(), vec![true, false, false, false]);
    }

    #[test]
    fn test_encode_saturates_out_of_range() {
        let b = bound(-1.0, 1.0);
        assert_eq!(encode(-50.0, b, 6).unwrap(), vec![false; 6]);
        assert_eq!(encode(50.0, b, 6).unwrap(), vec![true; 6]);
    }

    #[test]
    fn test_decode_boundaries_exact() {
        let b = bound(-5.12, 5.12);
        assert_eq!(decode(&[false; 10], b).unwrap(), -5.12);
        assert_eq!(decode(&[true; 10], b).unwrap(), 5.12);

        let b = bound(0.1, 0.7);
        assert_eq!(decode(&[true; 7], b).unwrap(), 0.7);
    }

    #[test]
    fn test_zero_round_trip_within_step() {
        let b = bound(-5.12, 5.12);
        let bits = encode(0.0, b, 10).unwrap();
        let decoded = decode(&bits, b).unwrap();
        assert!(decoded.abs() < 0.006, "decoded {decoded}");
    }

    #[test]
    fn test_round_trip_half_step() {
        let b = bound(10.0, 50.0);
        let step = resolution(b, 10).unwrap();
        for i in 0..=400 {
            let v = 10.0 + f64::from(i) * 0.1;
            let decoded = decode(&encode(v, b, 10).unwrap(), b).unwrap();
            assert!((decoded - v).abs() <= step / 2.0 + 1e-12);
        }
    }

    #[test]
    fn test_invalid_width() {
        let b = bound(0.0, 1.0);
        assert_eq!(encode(0.5, b, 0), Err(EvolutionError::InvalidBitWidth(0)));
        assert_eq!(encode(0.5, b, 33), Err(EvolutionError::InvalidBitWidth(33)));
        assert_eq!(decode(&[], b), Err(EvolutionError::InvalidBitWidth(0)));
    }

    #[test]
    fn test_full_width_boundaries() {
        let b = bound(0.0, 1.0);
        let bits = encode(1.0, b, MAX_BIT_WIDTH).unwrap();
        assert_eq!(bits.len(), 32);
        assert_eq!(decode(&bits, b).unwrap(), 1.0);
    }
}

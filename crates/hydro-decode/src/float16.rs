//! IEEE-754 binary16 decoding.
//!
//! UV coordinates are stored as big-endian half floats. There is no native
//! 16-bit float type, so the bit pattern is widened to `f32` by hand.

/// 2^-24, the value of the lowest subnormal mantissa bit.
const SUBNORMAL_SCALE: f32 = 1.0 / 16_777_216.0;

/// Widen a binary16 bit pattern (1 sign, 5 exponent, 10 mantissa bits).
///
/// Every one of the 65536 patterns is valid. Subnormals, infinities and NaN
/// payloads are preserved exactly.
#[must_use]
pub fn f16_to_f32(bits: u16) -> f32 {
    let sign = u32::from(bits & 0x8000) << 16;
    let exponent = (bits >> 10) & 0x1F;
    let mantissa = bits & 0x03FF;

    let magnitude = match exponent {
        // Zero and subnormals: mantissa * 2^-24 is exact in f32.
        0 => (f32::from(mantissa) * SUBNORMAL_SCALE).to_bits(),
        0x1F => 0x7F80_0000 | (u32::from(mantissa) << 13),
        _ => ((u32::from(exponent) + 112) << 23) | (u32::from(mantissa) << 13),
    };
    f32::from_bits(sign | magnitude)
}

/// Decode a big-endian binary16 value.
#[must_use]
pub fn read_f16_be(bytes: [u8; 2]) -> f32 {
    f16_to_f32(u16::from_be_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values() {
        assert_eq!(f16_to_f32(0x3C00), 1.0);
        assert_eq!(f16_to_f32(0x0000), 0.0);
        assert_eq!(f16_to_f32(0xC000), -2.0);
        assert_eq!(f16_to_f32(0x3800), 0.5);
        assert_eq!(f16_to_f32(0x7BFF), 65504.0);
        assert_eq!(f16_to_f32(0x0001), SUBNORMAL_SCALE);
        assert_eq!(f16_to_f32(0x7C00), f32::INFINITY);
        assert_eq!(f16_to_f32(0xFC00), f32::NEG_INFINITY);
        assert!(f16_to_f32(0x7E00).is_nan());
    }

    #[test]
    fn negative_zero_keeps_sign() {
        let value = f16_to_f32(0x8000);
        assert_eq!(value, 0.0);
        assert!(value.is_sign_negative());
    }

    #[test]
    fn big_endian_bytes() {
        assert_eq!(read_f16_be([0x38, 0x00]), 0.5);
        assert_eq!(read_f16_be([0xBC, 0x00]), -1.0);
    }

    #[test]
    fn matches_reference_for_every_pattern() {
        for bits in 0..=u16::MAX {
            let expected = half::f16::from_bits(bits).to_f32();
            let actual = f16_to_f32(bits);
            if expected.is_nan() {
                assert!(actual.is_nan(), "{bits:#06x}");
            } else {
                assert_eq!(actual.to_bits(), expected.to_bits(), "{bits:#06x}");
            }
        }
    }
}

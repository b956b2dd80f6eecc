//! Tests for hex encoding and decoding of colors

#[cfg(test)]
mod tests {
    use photomosaic::MosaicError;
    use photomosaic::color::{color_to_hex, hex_to_color};

    // Tests lowercase #rrggbb output with zero padding
    // Verified by switching to uppercase formatting
    #[test]
    fn test_color_to_hex_format() {
        assert_eq!(color_to_hex([255, 0, 128]), "#ff0080");
        assert_eq!(color_to_hex([0, 0, 0]), "#000000");
        assert_eq!(color_to_hex([1, 2, 3]), "#010203");
    }

    // Tests parsing accepts either case and an optional hash
    // Verified by requiring the leading hash
    #[test]
    fn test_hex_to_color_variants() {
        assert_eq!(hex_to_color("#ff0080").unwrap(), [255, 0, 128]);
        assert_eq!(hex_to_color("#FF0080").unwrap(), [255, 0, 128]);
        assert_eq!(hex_to_color("a1B2c3").unwrap(), [0xa1, 0xb2, 0xc3]);
    }

    // Tests malformed strings are rejected
    // Verified by skipping the length check
    #[test]
    fn test_hex_to_color_rejects_malformed() {
        for input in ["", "#", "#fff", "#ff00801", "#gg0000", "##ff0080", "#ff 080"] {
            assert!(
                matches!(
                    hex_to_color(input),
                    Err(MosaicError::InvalidParameter { .. })
                ),
                "accepted {input:?}"
            );
        }
    }

    // Tests every channel value survives encoding and decoding
    // Verified by truncating the channel to one digit
    #[test]
    fn test_round_trip_channel_values() {
        for value in 0..=255u8 {
            let color = [value, 255 - value, value / 2];
            assert_eq!(hex_to_color(&color_to_hex(color)).unwrap(), color);
        }
    }
}

//! Numeric coercion for unquoted tokens.

use crate::value::Number;

/// Decode a token through the narrowest-fit ladder.
///
/// The leading byte gates which decoders run: a digit tries signed, then
/// unsigned, then double; a `+` skips the signed step; a `-` skips the
/// unsigned step. Any other leading byte is not a number, which also keeps
/// float-parser specials like `inf` and `nan` out.
pub(crate) fn decode_token(token: &str) -> Option<Number> {
    let (try_signed, try_unsigned) = match token.as_bytes().first()? {
        b'0'..=b'9' => (true, true),
        b'+' => (false, true),
        b'-' => (true, false),
        _ => return None,
    };

    if try_signed {
        if let Ok(i) = token.parse::<i64>() {
            return Some(Number::I64(i));
        }
    }
    if try_unsigned {
        if let Ok(u) = token.parse::<u64>() {
            return Some(Number::U64(u));
        }
    }
    if let Ok(d) = token.parse::<f64>() {
        return Some(Number::F64(d));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_gating() {
        assert_eq!(decode_token("42"), Some(Number::I64(42)));
        assert_eq!(decode_token("+42"), Some(Number::U64(42)));
        assert_eq!(decode_token("-42"), Some(Number::I64(-42)));
        assert_eq!(
            decode_token("18446744073709551615"),
            Some(Number::U64(u64::MAX))
        );
        assert_eq!(decode_token("3.14"), Some(Number::F64(3.14)));
        assert_eq!(decode_token("abc"), None);
        assert_eq!(decode_token("inf"), None);
        assert_eq!(decode_token("nan"), None);
        assert_eq!(decode_token("0x10"), None);
    }

    #[test]
    fn overflow_promotes_to_double() {
        assert_eq!(
            decode_token("18446744073709551616"),
            Some(Number::F64(18446744073709551616.0))
        );
        assert_eq!(
            decode_token("-9223372036854775809"),
            Some(Number::F64(-9223372036854775809.0))
        );
    }

    #[test]
    fn exponent_overflow_is_infinite() {
        assert_eq!(decode_token("1e400"), Some(Number::F64(f64::INFINITY)));
    }
}

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses a currency-formatted field (`"$1,234.56"`, `"(75.25)"`) into a
/// `Decimal`. Anything unparsable degrades to zero — the weekly export
/// carries free-text junk in monetary columns and a bad cell must never
/// abort a run.
pub fn parse_amount(s: &str) -> Decimal {
    let s = s.trim();
    if s.is_empty() {
        return Decimal::ZERO;
    }

    let (negative, s) = if s.starts_with('(') && s.ends_with(')') {
        (true, &s[1..s.len() - 1])
    } else {
        (false, s)
    };
    let cleaned = s.replace([',', '$', ' '], "");

    match Decimal::from_str(&cleaned) {
        Ok(dec) => {
            if negative {
                -dec
            } else {
                dec
            }
        }
        Err(_) => {
            tracing::debug!(raw = %s, "unparsable monetary field, degrading to 0");
            Decimal::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn plain_value() {
        assert_eq!(parse_amount("123.45"), dec("123.45"));
    }

    #[test]
    fn dollar_sign_and_commas() {
        assert_eq!(parse_amount("$1,234.56"), dec("1234.56"));
    }

    #[test]
    fn accounting_parens_negate() {
        assert_eq!(parse_amount("(75.25)"), dec("-75.25"));
    }

    #[test]
    fn leading_whitespace() {
        assert_eq!(parse_amount("  $99.99 "), dec("99.99"));
    }

    #[test]
    fn blank_is_zero() {
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("   "), Decimal::ZERO);
    }

    #[test]
    fn garbage_degrades_to_zero() {
        assert_eq!(parse_amount("N/A"), Decimal::ZERO);
        assert_eq!(parse_amount("pending"), Decimal::ZERO);
    }

    #[test]
    fn explicit_zero_parses() {
        assert_eq!(parse_amount("$0.00"), Decimal::ZERO);
    }
}

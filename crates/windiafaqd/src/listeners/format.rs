//! Number formatting for reply text.

/// Formats `value` with `decimals` fixed places and comma thousands
/// separators, e.g. `1,750,000,000.00`.
pub(crate) fn fixed(value: f64, decimals: usize) -> String {
    let raw = format!("{:.*}", decimals, value.abs());
    let (whole, fraction) = match raw.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (raw.as_str(), None),
    };

    let mut formatted = String::with_capacity(raw.len() + raw.len() / 3 + 1);
    if value.is_sign_negative() && raw.bytes().any(|byte| matches!(byte, b'1'..=b'9')) {
        formatted.push('-');
    }
    for (position, digit) in whole.chars().enumerate() {
        if position > 0 && (whole.len() - position) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(digit);
    }
    if let Some(fraction) = fraction {
        formatted.push('.');
        formatted.push_str(fraction);
    }
    formatted
}

/// Formats whole numbers without decimals and anything else with at most
/// two, trailing zeros dropped.
pub(crate) fn number(value: f64) -> String {
    if value.fract() == 0.0 {
        return fixed(value, 0);
    }
    let formatted = fixed(value, 2);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_owned()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::small(5.0, 0, "5")]
    #[case::thousands(10_000.0, 0, "10,000")]
    #[case::billions(1_750_000_000.0, 2, "1,750,000,000.00")]
    #[case::rounded(1_234.567, 2, "1,234.57")]
    #[case::negative(-12_345.0, 0, "-12,345")]
    #[case::negative_zero(-0.001, 0, "0")]
    fn groups_thousands(#[case] value: f64, #[case] decimals: usize, #[case] expected: &str) {
        assert_eq!(fixed(value, decimals), expected);
    }

    #[rstest]
    #[case::whole(160.0, "160")]
    #[case::one_place(1.5, "1.5")]
    #[case::two_places(1.25, "1.25")]
    #[case::grouped(90_000.0, "90,000")]
    fn trims_needless_decimals(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(number(value), expected);
    }
}

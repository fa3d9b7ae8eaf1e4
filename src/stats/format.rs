//! KPI display formatting.

/// `$` followed by the value rounded to whole dollars, thousands grouped.
/// Halves round to the even dollar.
pub fn format_usd(value: f64) -> String {
    let rounded = value.round_ties_even() as i64;
    if rounded < 0 {
        format!("-${}", group_thousands(rounded.unsigned_abs()))
    } else {
        format!("${}", group_thousands(rounded as u64))
    }
}

/// Integer with `,` every three digits.
pub fn format_count(value: usize) -> String {
    group_thousands(value as u64)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency() {
        assert_eq!(format_usd(0.0), "$0");
        assert_eq!(format_usd(999.4), "$999");
        assert_eq!(format_usd(1234.6), "$1,235");
        assert_eq!(format_usd(150_000.0), "$150,000");
        assert_eq!(format_usd(12_345_678.0), "$12,345,678");
    }

    #[test]
    fn currency_halves_round_to_even() {
        assert_eq!(format_usd(2.5), "$2");
        assert_eq!(format_usd(3.5), "$4");
        assert_eq!(format_usd(1_234_500.5), "$1,234,500");
    }

    #[test]
    fn counts() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(100), "100");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }
}

/// Format an amount as US dollars: `$1,234.50`.
pub fn format_usd(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    let dollars = (cents / 100).to_string();

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::format_usd;

    #[test]
    fn formats_currency() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(12.5), "$12.50");
        assert_eq!(format_usd(999.999), "$1,000.00");
        assert_eq!(format_usd(1234567.891), "$1,234,567.89");
        assert_eq!(format_usd(-5.0), "-$5.00");
    }
}

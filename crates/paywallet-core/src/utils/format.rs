use chrono::{DateTime, Utc};

/// Format an amount as US dollars with thousands separators: `$1,250.75`
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = cents / 100;
    let digits = dollars.to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

/// `Mar 1`
pub fn format_date_short(date: &DateTime<Utc>) -> String {
    date.format("%b %-d").to_string()
}

/// `March 1, 2024, 10:30 AM`
pub fn format_date_long(date: &DateTime<Utc>) -> String {
    date.format("%B %-d, %Y, %I:%M %p").to_string()
}

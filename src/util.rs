use anyhow::{Context, Result};
use std::process::Command;

/// URL schemes the opener will hand to the OS.
const ALLOWED_URL_SCHEMES: [&str; 3] = ["mailto:", "https://", "http://"];

pub fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }

    let char_count = s.chars().count();
    if char_count <= max {
        return s.to_string();
    }

    if max <= 3 {
        return s.chars().take(max).collect();
    }

    let truncated: String = s.chars().take(max - 3).collect();
    format!("{}...", truncated)
}

/// First `keep` characters followed by `...` when the text is longer.
pub fn preview(s: &str, keep: usize) -> String {
    if s.chars().count() > keep {
        let head: String = s.chars().take(keep).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}

/// Format an amount in the given currency, ko-KR style.
///
/// Zero-decimal currencies (KRW, JPY) are rounded to whole units. Unknown
/// codes fall back to `CODE 1,234.00`.
pub fn format_currency(amount: f64, currency: &str) -> String {
    let code = currency.trim().to_ascii_uppercase();
    let (symbol, decimals) = match code.as_str() {
        "KRW" => (Some("₩"), 0),
        "JPY" => (Some("¥"), 0),
        "USD" => (Some("US$"), 2),
        "EUR" => (Some("€"), 2),
        "GBP" => (Some("£"), 2),
        _ => (None, 2),
    };

    let grouped = group_thousands(amount.abs(), decimals);
    let sign = if amount < 0.0 { "-" } else { "" };
    match symbol {
        Some(symbol) => format!("{}{}{}", sign, symbol, grouped),
        None => format!("{}{} {}", sign, code, grouped),
    }
}

fn group_thousands(amount: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, amount);
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit);
    }

    match frac_part {
        Some(frac) => format!("{}.{}", grouped, frac),
        None => grouped,
    }
}

/// Hand a URL to the platform opener (browser, mail client).
pub fn open_url(url: &str) -> Result<()> {
    let url_lower = url.to_lowercase();
    let is_safe = ALLOWED_URL_SCHEMES
        .iter()
        .any(|scheme| url_lower.starts_with(scheme));
    if !is_safe {
        return Err(anyhow::anyhow!(
            "URL scheme not allowed. Only mailto:, http:// and https:// URLs are permitted."
        ));
    }

    #[cfg(target_os = "macos")]
    {
        Command::new("open")
            .arg(url)
            .spawn()
            .context("Failed to open URL")?;
    }

    #[cfg(target_os = "linux")]
    {
        Command::new("xdg-open")
            .arg(url)
            .spawn()
            .context("Failed to open URL")?;
    }

    #[cfg(target_os = "windows")]
    {
        Command::new("cmd")
            .args(["/C", "start", "", url])
            .spawn()
            .context("Failed to open URL")?;
    }

    Ok(())
}

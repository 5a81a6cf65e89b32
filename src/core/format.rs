/// Rounded whole-dollar currency string with thousands grouping. Any
/// non-finite input renders as "$0" so a display layer never shows NaN.
pub fn format_currency(value: f64) -> String {
    let Some((sign, magnitude)) = sign_and_magnitude(value) else {
        return "$0".to_string();
    };
    format!("{sign}${}", group_thousands(magnitude.round() as u64))
}

/// Compact currency notation ("$1.2M", "$45K"); falls back to the plain
/// rounded form below one thousand. Non-finite input renders as "$0".
pub fn format_currency_compact(value: f64) -> String {
    let Some((sign, magnitude)) = sign_and_magnitude(value) else {
        return "$0".to_string();
    };

    let (scaled, suffix) = if magnitude >= 1e9 {
        (magnitude / 1e9, "B")
    } else if magnitude >= 1e6 {
        (magnitude / 1e6, "M")
    } else if magnitude >= 1e3 {
        (magnitude / 1e3, "K")
    } else {
        return format!("{sign}${}", magnitude.round());
    };

    let text = format!("{scaled:.1}");
    let text = text.strip_suffix(".0").unwrap_or(&text);
    format!("{sign}${text}{suffix}")
}

/// Percentage string with a configurable number of decimal places.
/// Non-finite input renders as "0%".
pub fn format_percent(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "0%".to_string();
    }
    format!("{value:.decimals$}%")
}

fn sign_and_magnitude(value: f64) -> Option<(&'static str, f64)> {
    if !value.is_finite() {
        return None;
    }
    if value < 0.0 {
        Some(("-", -value))
    } else {
        Some(("", value))
    }
}

fn group_thousands(mut value: u64) -> String {
    let mut groups = Vec::new();
    loop {
        let group = value % 1_000;
        value /= 1_000;
        if value == 0 {
            groups.push(group.to_string());
            break;
        }
        groups.push(format!("{group:03}"));
    }
    groups.reverse();
    groups.join(",")
}

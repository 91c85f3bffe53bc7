use shared::domain::Project;

/// Formats `amount` as Indian Rupees, e.g. `₹12,34,567.80`.
pub fn format_inr(amount: f64) -> String {
    if amount.is_nan() {
        return "₹NaN".to_string();
    }
    let sign = if amount < 0.0 { "-" } else { "" };
    if amount.is_infinite() {
        return format!("{sign}₹∞");
    }

    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if whole.bytes().all(|b| b == b'0') && fraction.bytes().all(|b| b == b'0') {
        ""
    } else {
        sign
    };
    format!("{sign}₹{}.{fraction}", group_indian(whole))
}

/// Cost cell text; costs that do not parse render as `₹NaN`.
pub fn format_cost(project: &Project) -> String {
    format_inr(project.cost_amount().unwrap_or(f64::NAN))
}

/// Groups the last three digits, then every two: `1234567` → `12,34,567`.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{tail}", groups.join(","))
}

#[cfg(test)]
#[path = "tests/format_tests.rs"]
mod tests;

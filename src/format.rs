//! Display formatting for prices and parcel sizes.

/// The number of square metres in a hectare
const SQM_PER_HECTARE: f64 = 10_000.0;

/// Format an amount as whole naira with thousands separators (e.g. `₦85,000,000`)
pub fn format_naira(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}₦{}", group_thousands(&format!("{:.0}", rounded.abs())))
}

/// Format a size in square metres, switching to hectares from one hectare upwards
pub fn format_size(sqm: f64) -> String {
    if sqm < SQM_PER_HECTARE {
        format!("{sqm} sqm")
    } else {
        format!("{:.2} hectares", sqm / SQM_PER_HECTARE)
    }
}

/// Insert a comma between each group of three digits
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

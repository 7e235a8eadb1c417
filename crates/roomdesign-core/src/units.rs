//! Pixel/inch conversion. The scale is fixed at 2 pixels per inch.

/// Surface pixels per real-world inch.
pub const PIXELS_PER_INCH: f64 = 2.0;

pub const INCHES_PER_FOOT: f64 = 12.0;

pub fn px_to_inches(px: f64) -> f64 {
    px / PIXELS_PER_INCH
}

pub fn inches_to_px(inches: f64) -> f64 {
    inches * PIXELS_PER_INCH
}

pub fn feet_to_px(feet: f64) -> f64 {
    inches_to_px(feet * INCHES_PER_FOOT)
}

/// Format a pixel length as feet and whole inches, e.g. `12' 6"`.
pub fn format_feet_inches(px: f64) -> String {
    let total_inches = px_to_inches(px).abs().round() as u64;
    let feet = total_inches / 12;
    let inches = total_inches % 12;
    format!("{feet}' {inches}\"")
}

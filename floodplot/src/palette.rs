use plotters::style::RGBColor;

/// Color stops approximating the "terrain" ramp, as `(t, (r, g, b))`.
/// Blue lowlands through green and sand to white peaks.
const STOPS: [(f64, (u8, u8, u8)); 6] = [
    (0.00, (51, 51, 153)),
    (0.15, (0, 153, 255)),
    (0.25, (0, 204, 102)),
    (0.50, (255, 255, 153)),
    (0.75, (128, 92, 84)),
    (1.00, (255, 255, 255)),
];

/// Maps a normalized elevation in `[0, 1]` onto the terrain ramp.
pub fn terrain_color(t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);
    for pair in STOPS.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t <= t1 {
            let f = if t1 > t0 { (t - t0) / (t1 - t0) } else { 0.0 };
            return RGBColor(
                lerp(c0.0, c1.0, f),
                lerp(c0.1, c1.1, f),
                lerp(c0.2, c1.2, f),
            );
        }
    }
    let (_, (r, g, b)) = STOPS[STOPS.len() - 1];
    RGBColor(r, g, b)
}

fn lerp(a: u8, b: u8, f: f64) -> u8 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let v = (f64::from(a) + (f64::from(b) - f64::from(a)) * f).round() as u8;
    v
}

#[cfg(test)]
mod tests {
    use super::terrain_color;
    use plotters::style::RGBColor;

    #[test]
    fn test_ramp_endpoints() {
        assert_eq!(terrain_color(0.0), RGBColor(51, 51, 153));
        assert_eq!(terrain_color(1.0), RGBColor(255, 255, 255));
    }

    #[test]
    fn test_out_of_range_clamps() {
        assert_eq!(terrain_color(-2.0), terrain_color(0.0));
        assert_eq!(terrain_color(7.5), terrain_color(1.0));
    }

    #[test]
    fn test_stop_midpoint_interpolates() {
        // Halfway between the 0.25 and 0.50 stops.
        assert_eq!(terrain_color(0.375), RGBColor(128, 230, 128));
    }
}

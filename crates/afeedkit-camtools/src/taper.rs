//! Linear Z taper along X
//!
//! Superimposes a conical profile on the cut: no adjustment at the large end
//! (`x = length`), the full radius difference deeper at the small end (`x = 0`).

use afeedkit_core::TaperParameters;

/// Number of decimals written for adjusted depths
pub const DEPTH_DECIMALS: usize = 4;

/// Depth offset for a move ending at `x`
pub fn z_adjustment(taper: &TaperParameters, x: f64) -> f64 {
    -taper.radius_difference() * (1.0 - x / taper.length())
}

/// Change in depth per unit of X travel
pub fn rate_per_unit(taper: &TaperParameters) -> f64 {
    taper.radius_difference() / taper.length()
}

/// Format a depth value the way it is written back into the program
pub fn format_depth(z: f64) -> String {
    format!("{:.*}", DEPTH_DECIMALS, z)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taper() -> TaperParameters {
        TaperParameters::new(2.0, 1.0, 10.0).unwrap()
    }

    #[test]
    fn test_no_adjustment_at_large_end() {
        assert_eq!(z_adjustment(&taper(), 10.0), 0.0);
    }

    #[test]
    fn test_full_adjustment_at_small_end() {
        assert_eq!(z_adjustment(&taper(), 0.0), -0.5);
    }

    #[test]
    fn test_adjustment_is_linear() {
        assert!((z_adjustment(&taper(), 5.0) + 0.25).abs() < 1e-12);
        assert!((rate_per_unit(&taper()) - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_format_depth() {
        assert_eq!(format_depth(-1.0), "-1.0000");
        assert_eq!(format_depth(-0.123456), "-0.1235");
        assert_eq!(format_depth(2.5), "2.5000");
    }
}

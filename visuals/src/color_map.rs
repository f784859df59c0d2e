//! Color maps for colorizing field values.

use itertools::izip;
use plotters::style::RGBColor;

pub(crate) const LUT_SIZE: usize = 256;

/// A map from normalized scalar values to display colors,
/// expressed as a 256-entry lookup table.
///
/// The table representation keeps sampling cheap inside per-cell
/// drawing loops and does not tie the map to any particular
/// gradient parametrization.
#[derive(Clone, Debug)]
pub struct ColorMap {
    name: String,
    lut: [RGBColor; LUT_SIZE],
}

impl ColorMap {
    /// Create a color map from an [`enterpolation`] curve
    /// interpolating [`palette`] colors.
    pub fn from_curve<Curve, Color>(name: String, curve: Curve) -> Self
    where
        Color: palette::IntoColor<palette::Srgb>,
        Curve: enterpolation::Curve<f32, Output = Color>,
    {
        let vals = curve.take(LUT_SIZE);
        let mut lut = [RGBColor(0, 0, 0); LUT_SIZE];
        for (color, lut_val) in izip!(vals, lut.iter_mut()) {
            let c: palette::Srgb = color.into_color();
            let as_u8 = |channel: f32| (u8::MAX as f32 * channel).round() as u8;
            *lut_val = RGBColor(as_u8(c.red), as_u8(c.green), as_u8(c.blue));
        }
        Self { name, lut }
    }

    /// Create a color map from a function
    /// mapping a float value between 0 and 1 to a color.
    pub fn from_fn(name: String, curve: impl Fn(f32) -> RGBColor) -> Self {
        // minus one because the LUT has LUT_SIZE points
        // and thus (LUT_SIZE-1) gaps between points in the interval
        let increment = 1.0 / (LUT_SIZE - 1) as f32;
        Self {
            name,
            lut: std::array::from_fn(|i| (curve)(increment * i as f32)),
        }
    }

    /// Name of the map.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up the color for a normalized value in [0, 1].
    /// Values outside the interval are clamped.
    pub fn sample(&self, t: f64) -> RGBColor {
        let idx = (t.clamp(0.0, 1.0) * (LUT_SIZE - 1) as f64).round() as usize;
        self.lut[idx]
    }

    /// Look up the color for a value within a (min, max) range.
    /// A degenerate range maps everything to the middle of the map.
    pub fn sample_in(&self, value: f64, range: (f64, f64)) -> RGBColor {
        let (min, max) = range;
        let t = if max > min {
            (value - min) / (max - min)
        } else {
            0.5
        };
        self.sample(t)
    }
}

pub mod builtin_color_maps {
    //! Premade color maps.
    //!
    //! [`vivid`] is the default map used by the renderer.

    use super::ColorMap;
    use enterpolation::linear::ConstEquidistantLinear;
    use palette::Srgb;

    /// Convert an sRGB hexadecimal code in 0xRRGGBB format
    /// to a float color for interpolation.
    fn srgb_hex(val: u32) -> Srgb<f32> {
        let srgb_u8 = Srgb::from(val);
        srgb_u8.into_format()
    }

    /// Convenience function to make a color map
    /// as an array of equally spaced, linearly interpolated colors.
    fn linear_equidistant<const COUNT: usize>(name: &str, colors: [Srgb<f32>; COUNT]) -> ColorMap {
        ColorMap::from_curve(
            name.to_string(),
            ConstEquidistantLinear::equidistant_unchecked(colors),
        )
    }

    /// A vibrant coolwarm-like gradient from blue through purple
    /// and orange to red.
    pub fn vivid() -> ColorMap {
        linear_equidistant(
            "vivid",
            [
                srgb_hex(0x2E86AB),
                srgb_hex(0xA23B72),
                srgb_hex(0xF18F01),
                srgb_hex(0xC73E1D),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vivid_lut_ends_at_the_anchor_colors() {
        let map = builtin_color_maps::vivid();
        assert_eq!(map.sample(0.0), RGBColor(0x2E, 0x86, 0xAB));
        assert_eq!(map.sample(1.0), RGBColor(0xC7, 0x3E, 0x1D));
    }

    #[test]
    fn sampling_is_clamped() {
        let map = builtin_color_maps::vivid();
        assert_eq!(map.sample(-2.0), map.sample(0.0));
        assert_eq!(map.sample(3.0), map.sample(1.0));
    }

    #[test]
    fn range_sampling_normalizes_and_handles_degenerate_ranges() {
        let map = ColorMap::from_fn("ramp".to_string(), |t| {
            let v = (t * 255.0).round() as u8;
            RGBColor(v, v, v)
        });
        assert_eq!(map.sample_in(5.0, (0.0, 10.0)), map.sample(0.5));
        assert_eq!(map.sample_in(10.0, (0.0, 10.0)), map.sample(1.0));
        // min == max maps to the middle
        assert_eq!(map.sample_in(7.0, (7.0, 7.0)), map.sample(0.5));
    }
}

/// A pixel value, one byte per component in `ARGB` order.
///
/// An alpha of zero marks a cell that holds no paint at all. Buffers
/// use it to represent areas a sprite or drawing never touched, which
/// lets them be composited over arbitrary backgrounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Argb(u32);

/// The classic set of numbered pen colors.
///
/// The first eight match the minimal palette all Logo dialects agree on,
/// the remaining 24 are the extended named colors.
pub const PEN_COLORS: [Argb; 32] = [
    Argb(0xFF000000), // black
    Argb(0xFF0000FF), // blue
    Argb(0xFF00FF00), // green
    Argb(0xFF00FFFF), // cyan
    Argb(0xFFFF0000), // red
    Argb(0xFFFF00FF), // magenta
    Argb(0xFFFFFF00), // yellow
    Argb(0xFFFFFFFF), // white
    Argb(0xFF965A37), // brown
    Argb(0xFFD2B48C), // tan
    Argb(0xFF228B22), // forest
    Argb(0xFF78BBBB), // aqua
    Argb(0xFFFA8072), // salmon
    Argb(0xFFEE82EE), // violet
    Argb(0xFFFFA500), // orange
    Argb(0xFF808080), // gray
    Argb(0xFF000080), // navy
    Argb(0xFF00BFFF), // sky blue
    Argb(0xFF32CD32), // lime
    Argb(0xFF4682B4), // steel blue
    Argb(0xFFD2691E), // chocolate
    Argb(0xFF800080), // purple
    Argb(0xFFFFD700), // gold
    Argb(0xFFD3D3D3), // light gray
    Argb(0xFFCD853F), // peru
    Argb(0xFFF5DEB3), // wheat
    Argb(0xFF98FB98), // pale green
    Argb(0xFFADD8E6), // light blue
    Argb(0xFFF0E68C), // khaki
    Argb(0xFFFFC0CB), // pink
    Argb(0xFF7CFC00), // lawn green
    Argb(0xFF808000), // olive
];

impl Argb {
    pub const TRANSPARENT: Self = Self(0);
    pub const BLACK: Self = Self(0xFF000000);
    pub const WHITE: Self = Self(0xFFFFFFFF);

    const ALPHA_BITS: u32 = 0xFF000000;
    const RGB_BITS: u32 = 0x00FFFFFF;

    #[inline]
    #[must_use]
    pub const fn from_u32(value: u32) -> Self {
        Self(value)
    }

    /// A fully opaque pixel with the given `0xRRGGBB` value.
    #[inline]
    #[must_use]
    pub const fn opaque(rgb: u32) -> Self {
        Self(Self::ALPHA_BITS | (rgb & Self::RGB_BITS))
    }

    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// The color components without the alpha byte.
    #[inline]
    #[must_use]
    pub const fn rgb(self) -> u32 {
        self.0 & Self::RGB_BITS
    }

    #[inline]
    #[must_use]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    #[must_use]
    pub const fn is_transparent(self) -> bool {
        self.alpha() == 0
    }

    /// Replace the color components, keeping the alpha byte.
    #[inline]
    #[must_use]
    pub const fn with_rgb_of(self, other: Self) -> Self {
        Self((self.0 & Self::ALPHA_BITS) | other.rgb())
    }

    /// Interpret a numbered pen color value.
    ///
    /// Values up to 31 index [`PEN_COLORS`], anything larger is taken as a
    /// direct `0xAARRGGBB` value. An alpha of zero is replaced with `0xFF`
    /// since a pen is assumed to paint opaquely unless told otherwise.
    #[must_use]
    pub fn from_pen_value(value: u32) -> Self {
        let alpha = value >> 24;
        let rgb = value & Self::RGB_BITS;

        if alpha == 0 || alpha == 0xFF {
            if rgb < PEN_COLORS.len() as u32 {
                return PEN_COLORS[rgb as usize];
            }
            return Self::opaque(rgb);
        }

        let rgb = if rgb < PEN_COLORS.len() as u32 {
            PEN_COLORS[rgb as usize].rgb()
        } else {
            rgb
        };

        Self((alpha << 24) | rgb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_pen_values_index_the_palette() {
        assert_eq!(Argb::from_pen_value(0), Argb::BLACK);
        assert_eq!(Argb::from_pen_value(7), Argb::WHITE);
        assert_eq!(Argb::from_pen_value(31), Argb::from_u32(0xFF808000));
    }

    #[test]
    fn large_pen_values_are_direct_rgb() {
        assert_eq!(Argb::from_pen_value(0x123456), Argb::opaque(0x123456));
    }

    #[test]
    fn pen_values_with_partial_alpha_keep_it() {
        let color = Argb::from_pen_value(0x80000004);
        assert_eq!(color.alpha(), 0x80);
        assert_eq!(color.rgb(), 0xFF0000);
    }

    #[test]
    fn zero_alpha_means_opaque_pen() {
        assert_eq!(Argb::from_pen_value(0x00FF00FF).alpha(), 0xFF);
    }
}

//! Packed 32-bit color.

/// RGBA color packed as `0xRRGGBBAA`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color(u32);

impl Color {
    pub const BLACK: Color = Color(0x0000_00FF);
    pub const WHITE: Color = Color(0xFFFF_FFFF);
    pub const TRANSPARENT: Color = Color(0);

    pub const fn new(rgba: u32) -> Self {
        Self(rgba)
    }

    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | a as u32)
    }

    /// Build from `0xAARRGGBB`.
    pub const fn from_argb(argb: u32) -> Self {
        Self(argb.rotate_left(8))
    }

    pub const fn rgba(self) -> u32 {
        self.0
    }

    /// Pack as `0xAARRGGBB`.
    pub const fn to_argb(self) -> u32 {
        self.0.rotate_right(8)
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn blue(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn alpha(self) -> u8 {
        self.0 as u8
    }

    /// Components normalised to `[0, 1]`, in RGBA order.
    pub fn components(self) -> [f64; 4] {
        [
            self.red() as f64 / 255.0,
            self.green() as f64 / 255.0,
            self.blue() as f64 / 255.0,
            self.alpha() as f64 / 255.0,
        ]
    }

    pub const fn with_alpha(self, alpha: u8) -> Self {
        Self((self.0 & 0xFFFF_FF00) | alpha as u32)
    }
}

impl From<u32> for Color {
    fn from(rgba: u32) -> Self {
        Self(rgba)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels_of_packed_value() {
        let c = Color::new(0x10203040);
        assert_eq!(c.red(), 0x10);
        assert_eq!(c.green(), 0x20);
        assert_eq!(c.blue(), 0x30);
        assert_eq!(c.alpha(), 0x40);
    }

    #[test]
    fn test_from_argb_reorders_channels() {
        let c = Color::from_argb(0x40102030);
        assert_eq!(c, Color::new(0x10203040));
        assert_eq!(c.to_argb(), 0x40102030);
    }

    #[test]
    fn test_from_rgba_matches_packed() {
        assert_eq!(Color::from_rgba(1, 2, 3, 4), Color::new(0x01020304));
    }

    #[test]
    fn test_components_are_normalised() {
        let [r, g, b, a] = Color::WHITE.components();
        assert_eq!((r, g, b, a), (1.0, 1.0, 1.0, 1.0));
        assert_eq!(Color::BLACK.components()[0], 0.0);
    }

    #[test]
    fn test_with_alpha_keeps_rgb() {
        assert_eq!(Color::new(0xAABBCCDD).with_alpha(0x11), Color::new(0xAABBCC11));
    }
}

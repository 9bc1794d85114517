use std::fmt;
use std::ops::{Add, Div, Mul, Sub};
use std::str::FromStr;

use thiserror::Error;

const LUM_R: f32 = 0.2126 / 255.0;
const LUM_G: f32 = 0.7152 / 255.0;
const LUM_B: f32 = 0.0722 / 255.0;

/// A 24-bit color, packed as `0x00RRGGBB`.
///
/// Channel values are always in `[0, 255]`; arithmetic saturates per channel
/// instead of wrapping.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Debug)]
pub struct Rgb(u32);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseColorError {
    #[error("expected three channels, found {0}")]
    ChannelCount(usize),
    #[error("invalid channel value '{0}'")]
    Channel(String),
    #[error("invalid hex color '{0}'")]
    Hex(String),
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
    pub const YELLOW: Rgb = Rgb::new(255, 255, 0);
    pub const CYAN: Rgb = Rgb::new(0, 255, 255);
    pub const MAGENTA: Rgb = Rgb::new(255, 0, 255);
    pub const GRAY: Rgb = Rgb::new(85, 85, 85);
    pub const SILVER: Rgb = Rgb::new(170, 170, 170);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// The top byte is discarded.
    #[inline]
    pub const fn from_packed(v: u32) -> Self {
        Self(v & 0x00FF_FFFF)
    }

    /// Builds a color from unit-range channels, clamping each to `[0, 1]`.
    pub fn from_unit(r: f32, g: f32, b: f32) -> Self {
        let scale = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(scale(r), scale(g), scale(b))
    }

    #[inline]
    pub const fn packed(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    #[inline]
    pub const fn channels(self) -> (u8, u8, u8) {
        (self.r(), self.g(), self.b())
    }

    pub fn max_channel(self) -> u8 {
        self.r().max(self.g()).max(self.b())
    }

    pub fn min_channel(self) -> u8 {
        self.r().min(self.g()).min(self.b())
    }

    pub fn is_gray(self) -> bool {
        self.r() == self.g() && self.g() == self.b()
    }

    /// Relative luminance in `[0, 1]` (Rec. 709 weights, no gamma).
    pub fn luminance(self) -> f32 {
        LUM_R * self.r() as f32 + LUM_G * self.g() as f32 + LUM_B * self.b() as f32
    }

    /// Channel mean.
    pub fn intensity(self) -> u8 {
        ((self.r() as u16 + self.g() as u16 + self.b() as u16) / 3) as u8
    }

    /// HSL lightness in `[0, 1]`.
    pub fn brightness(self) -> f32 {
        (self.max_channel() as f32 + self.min_channel() as f32) / (255.0 * 2.0)
    }

    /// Hue in degrees, `[0, 360)`. Grays have hue 0.
    pub fn hue(self) -> f32 {
        if self.is_gray() {
            return 0.0;
        }

        let (r, g, b) = (self.r() as i32, self.g() as i32, self.b() as i32);
        let max = self.max_channel() as i32;
        let delta = (max - self.min_channel() as i32) as f32;

        let mut hue = if r == max {
            (g - b) as f32 / delta
        } else if g == max {
            (b - r) as f32 / delta + 2.0
        } else {
            (r - g) as f32 / delta + 4.0
        };

        hue *= 60.0;
        if hue < 0.0 {
            hue += 360.0;
        }
        hue
    }

    /// HSL saturation in `[0, 1]`. Grays have saturation 0.
    pub fn saturation(self) -> f32 {
        if self.is_gray() {
            return 0.0;
        }

        let max = self.max_channel() as i32;
        let min = self.min_channel() as i32;

        let mut div = max + min;
        if div > 255 {
            div = 255 * 2 - max - min;
        }

        (max - min) as f32 / div as f32
    }

    /// Linear interpolation; `t` is clamped to `[0, 1]`.
    pub fn lerp(a: Rgb, b: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |x: u8, y: u8| (x as f32 * (1.0 - t) + y as f32 * t) / 255.0;
        Rgb::from_unit(mix(a.r(), b.r()), mix(a.g(), b.g()), mix(a.b(), b.b()))
    }

    /// Squared Euclidean distance over the three channels.
    pub fn distance(a: Rgb, b: Rgb) -> u32 {
        let dr = a.r() as i32 - b.r() as i32;
        let dg = a.g() as i32 - b.g() as i32;
        let db = a.b() as i32 - b.b() as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    pub fn parse_hex(s: &str) -> Result<Self, ParseColorError> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseColorError::Hex(s.to_string()));
        }
        u32::from_str_radix(digits, 16)
            .map(Self::from_packed)
            .map_err(|_| ParseColorError::Hex(s.to_string()))
    }

    #[inline]
    fn zip_with(self, other: Rgb, f: impl Fn(u8, u8) -> u8) -> Rgb {
        Rgb::new(f(self.r(), other.r()), f(self.g(), other.g()), f(self.b(), other.b()))
    }

    #[inline]
    fn map(self, f: impl Fn(u8) -> u8) -> Rgb {
        Rgb::new(f(self.r()), f(self.g()), f(self.b()))
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Rgb::new(r, g, b)
    }
}

impl From<Rgb> for (u8, u8, u8) {
    fn from(c: Rgb) -> Self {
        c.channels()
    }
}

impl Add for Rgb {
    type Output = Rgb;
    fn add(self, rhs: Rgb) -> Rgb {
        self.zip_with(rhs, u8::saturating_add)
    }
}

impl Sub for Rgb {
    type Output = Rgb;
    fn sub(self, rhs: Rgb) -> Rgb {
        self.zip_with(rhs, u8::saturating_sub)
    }
}

impl Mul for Rgb {
    type Output = Rgb;
    fn mul(self, rhs: Rgb) -> Rgb {
        self.zip_with(rhs, u8::saturating_mul)
    }
}

impl Mul<u8> for Rgb {
    type Output = Rgb;
    fn mul(self, rhs: u8) -> Rgb {
        self.map(|c| c.saturating_mul(rhs))
    }
}

impl Mul<f32> for Rgb {
    type Output = Rgb;
    // float -> u8 casts saturate
    fn mul(self, rhs: f32) -> Rgb {
        self.map(|c| (c as f32 * rhs) as u8)
    }
}

impl Div for Rgb {
    type Output = Rgb;
    fn div(self, rhs: Rgb) -> Rgb {
        self.zip_with(rhs, |a, b| a.checked_div(b).unwrap_or(u8::MAX))
    }
}

impl Div<u8> for Rgb {
    type Output = Rgb;
    fn div(self, rhs: u8) -> Rgb {
        self.map(|c| c.checked_div(rhs).unwrap_or(u8::MAX))
    }
}

impl Div<f32> for Rgb {
    type Output = Rgb;
    fn div(self, rhs: f32) -> Rgb {
        self.map(|c| (c as f32 / rhs) as u8)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.r(), self.g(), self.b())
    }
}

impl fmt::LowerHex for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r(), self.g(), self.b())
    }
}

impl fmt::UpperHex for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r(), self.g(), self.b())
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Accepts `"R G B"` (decimal, whitespace separated) or `#RRGGBB`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with('#') {
            return Rgb::parse_hex(s);
        }

        let parts: Vec<&str> = s.split_whitespace().collect();
        if parts.len() == 1 && parts[0].len() == 6 {
            return Rgb::parse_hex(parts[0]);
        }
        if parts.len() != 3 {
            return Err(ParseColorError::ChannelCount(parts.len()));
        }

        let channel = |p: &str| p.parse::<u8>().map_err(|_| ParseColorError::Channel(p.to_string()));
        Ok(Rgb::new(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?))
    }
}

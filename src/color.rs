//! Color classification: maps sampled pixel colors onto the piece palette.
//!
//! Classification works on hue and saturation. Samples below a saturation
//! threshold are treated as white, everything else is assigned to the color whose
//! hue arc contains the sample. Arcs are centered on fixed reference hues and
//! bounded by the midpoints between neighbouring references.
use crate::engine::PieceColor;

/// Saturation, in permille, below which every sample is white.
pub const SATURATION_THRESHOLD: u32 = 180;

/// Relative channel tolerance under which a sample counts as gray.
pub const GRAY_TOLERANCE: f32 = 0.15;

/// Reference hue, in degrees, of every piece color, by descending hue.
pub const REFERENCE_HUES: [(PieceColor, u32); 7] = [
    (PieceColor::Red, 350),
    (PieceColor::Purple, 300),
    (PieceColor::Blue, 210),
    (PieceColor::Green, 130),
    (PieceColor::Yellow, 55),
    (PieceColor::Orange, 31),
    (PieceColor::White, 10),
];

/// Maps a hue and a saturation onto a piece color.
///
/// # Arguments
/// * `hue`: hue in whole degrees, `0..360`.
/// * `saturation_permille`: saturation scaled to `0..=1000`.
///
/// # Returns
/// `PieceColor::White` when the saturation is below `SATURATION_THRESHOLD`.
/// Otherwise the color whose arc contains `hue`: a hue belongs to the first
/// reference (by descending hue) whose lower boundary it strictly exceeds, the
/// lower boundary being the integer midpoint with the next reference. Hues at or
/// below the last boundary fall into the white arc, which meets the red arc at 0°.
///
/// # Examples
/// ```
/// use jewel_solver::color::classify;
/// use jewel_solver::engine::PieceColor;
/// assert_eq!(classify(210, 800), PieceColor::Blue);
/// assert_eq!(classify(210, 100), PieceColor::White);
/// assert_eq!(classify(325, 800), PieceColor::Purple);
/// assert_eq!(classify(326, 800), PieceColor::Red);
/// ```
pub fn classify(hue: u32, saturation_permille: u32) -> PieceColor {
    if saturation_permille < SATURATION_THRESHOLD {
        return PieceColor::White;
    }

    REFERENCE_HUES
        .windows(2)
        .find(|pair| hue > (pair[0].1 + pair[1].1) / 2)
        .map_or(PieceColor::White, |pair| pair[0].0)
}

/// Replaces near-gray samples with an exact gray.
///
/// When both green and blue are within `GRAY_TOLERANCE` of red (relative to red),
/// green and blue are set to red so that the sample has no hue at all. A sample with
/// a red channel of zero is never normalized.
pub fn neutralize_near_gray(rgb: [u8; 3]) -> [u8; 3] {
    let [r, g, b] = rgb;
    if r == 0 {
        return rgb;
    }
    let red = f32::from(r);
    let near = |channel: u8| (f32::from(channel) / red - 1.0).abs() < GRAY_TOLERANCE;
    if near(g) && near(b) {
        [r, r, r]
    } else {
        rgb
    }
}

/// Converts an RGB sample into HSL hue and saturation.
///
/// # Returns
/// `(hue, saturation_permille)`, the hue in whole degrees (`0..360`, truncated) and
/// the HSL saturation scaled by 1000 (truncated). Grays have hue and saturation 0.
pub fn hue_saturation(rgb: [u8; 3]) -> (u32, u32) {
    let [r, g, b] = rgb.map(|channel| f32::from(channel) / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    if max == min {
        return (0, 0);
    }

    let delta = max - min;
    let sector = if r == max {
        (g - b) / delta
    } else if g == max {
        2.0 + (b - r) / delta
    } else {
        4.0 + (r - g) / delta
    };
    let mut hue = sector * 60.0;
    if hue < 0.0 {
        hue += 360.0;
    }

    let lightness = (max + min) / 2.0;
    let saturation = if lightness <= 0.5 {
        delta / (max + min)
    } else {
        delta / (2.0 - max - min)
    };

    ((hue as u32).min(359), (saturation * 1000.0) as u32)
}

/// Classifies an averaged RGB sample: gray normalization, HSL conversion, then
/// [`classify`].
pub fn classify_rgb(rgb: [u8; 3]) -> PieceColor {
    let (hue, saturation) = hue_saturation(neutralize_near_gray(rgb));
    classify(hue, saturation)
}

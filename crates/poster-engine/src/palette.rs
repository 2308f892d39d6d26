//! Curated hue families for gradient stop colors.
//!
//! Each family pairs a dark variant (left gradient stop) with a light
//! variant (right stop). The per-channel ranges of every dark variant sit
//! strictly below the paired light ranges, so a gradient built from any
//! family combination always darkens toward the left edge.

use image::Rgb;
use rand::Rng;

/// A named hue bucket. The dark and light variants of one family are
/// related in tone but sampled independently per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteFamily {
    Red,
    Orange,
    Amber,
    Green,
    Blue,
    Purple,
    Crimson,
    Wine,
    Russet,
    Tangerine,
    Mustard,
    Olive,
    Emerald,
    Forest,
    Teal,
    Lake,
    Navy,
    Indigo,
    Violet,
    Magenta,
    Gray,
    WarmGray,
    CoolGray,
    Brown,
    Bronze,
    Moss,
}

/// All families, in the order used for uniform selection.
pub const FAMILIES: [PaletteFamily; 26] = [
    PaletteFamily::Red,
    PaletteFamily::Orange,
    PaletteFamily::Amber,
    PaletteFamily::Green,
    PaletteFamily::Blue,
    PaletteFamily::Purple,
    PaletteFamily::Crimson,
    PaletteFamily::Wine,
    PaletteFamily::Russet,
    PaletteFamily::Tangerine,
    PaletteFamily::Mustard,
    PaletteFamily::Olive,
    PaletteFamily::Emerald,
    PaletteFamily::Forest,
    PaletteFamily::Teal,
    PaletteFamily::Lake,
    PaletteFamily::Navy,
    PaletteFamily::Indigo,
    PaletteFamily::Violet,
    PaletteFamily::Magenta,
    PaletteFamily::Gray,
    PaletteFamily::WarmGray,
    PaletteFamily::CoolGray,
    PaletteFamily::Brown,
    PaletteFamily::Bronze,
    PaletteFamily::Moss,
];

/// Pick a family uniformly at random.
pub fn random_family(rng: &mut impl Rng) -> PaletteFamily {
    FAMILIES[rng.gen_range(0..FAMILIES.len())]
}

fn sample(rng: &mut impl Rng, r: (u8, u8), g: (u8, u8), b: (u8, u8)) -> Rgb<u8> {
    Rgb([
        rng.gen_range(r.0..=r.1),
        rng.gen_range(g.0..=g.1),
        rng.gen_range(b.0..=b.1),
    ])
}

/// Sample the dark variant of a family (left gradient stop).
pub fn dark_stop(family: PaletteFamily, rng: &mut impl Rng) -> Rgb<u8> {
    use PaletteFamily::*;
    match family {
        Red => sample(rng, (80, 150), (20, 70), (20, 70)),
        Orange => sample(rng, (80, 150), (50, 100), (20, 50)),
        Amber => sample(rng, (80, 150), (70, 140), (20, 50)),
        Green => sample(rng, (20, 70), (80, 150), (40, 90)),
        Blue => sample(rng, (20, 70), (50, 100), (80, 150)),
        Purple => sample(rng, (60, 120), (20, 80), (80, 150)),
        Crimson => sample(rng, (60, 100), (10, 30), (10, 30)),
        Wine => sample(rng, (70, 120), (10, 40), (30, 70)),
        Russet => sample(rng, (70, 120), (30, 70), (10, 40)),
        Tangerine => sample(rng, (70, 130), (40, 80), (0, 30)),
        Mustard => sample(rng, (70, 130), (60, 110), (0, 30)),
        Olive => sample(rng, (50, 100), (60, 110), (0, 40)),
        Emerald => sample(rng, (0, 50), (60, 110), (0, 50)),
        Forest => sample(rng, (20, 60), (50, 100), (30, 80)),
        Teal => sample(rng, (0, 50), (60, 110), (60, 110)),
        Lake => sample(rng, (0, 50), (50, 100), (70, 120)),
        Navy => sample(rng, (0, 40), (0, 50), (70, 120)),
        Indigo => sample(rng, (20, 60), (0, 40), (70, 130)),
        Violet => sample(rng, (40, 90), (0, 40), (70, 130)),
        Magenta => sample(rng, (70, 120), (0, 40), (70, 120)),
        Gray => {
            let gray = rng.gen_range(40..=80);
            Rgb([gray, gray, gray])
        }
        WarmGray => {
            let gray: u8 = rng.gen_range(40..=80);
            Rgb([
                gray + rng.gen_range(10..=30),
                gray,
                gray - rng.gen_range(5..=15),
            ])
        }
        CoolGray => {
            let gray: u8 = rng.gen_range(40..=80);
            Rgb([
                gray - rng.gen_range(5..=15),
                gray,
                gray + rng.gen_range(10..=30),
            ])
        }
        Brown => sample(rng, (60, 100), (40, 80), (20, 50)),
        Bronze => sample(rng, (80, 120), (60, 100), (10, 40)),
        Moss => sample(rng, (50, 90), (60, 100), (30, 70)),
    }
}

/// Sample the light variant of a family (right gradient stop).
pub fn light_stop(family: PaletteFamily, rng: &mut impl Rng) -> Rgb<u8> {
    use PaletteFamily::*;
    match family {
        Red => sample(rng, (180, 255), (100, 180), (100, 180)),
        Orange => sample(rng, (200, 255), (150, 220), (70, 150)),
        Amber => sample(rng, (200, 255), (180, 255), (70, 150)),
        Green => sample(rng, (100, 180), (180, 255), (120, 200)),
        Blue => sample(rng, (100, 180), (150, 220), (180, 255)),
        Purple => sample(rng, (150, 220), (100, 170), (180, 255)),
        Crimson => sample(rng, (220, 255), (50, 100), (50, 100)),
        Wine => sample(rng, (220, 255), (100, 160), (130, 190)),
        Russet => sample(rng, (230, 255), (130, 200), (30, 90)),
        Tangerine => sample(rng, (230, 255), (110, 170), (100, 160)),
        Mustard => sample(rng, (230, 255), (200, 255), (100, 160)),
        Olive => sample(rng, (200, 255), (230, 255), (50, 130)),
        Emerald => sample(rng, (130, 190), (230, 255), (100, 160)),
        Forest => sample(rng, (50, 110), (220, 255), (50, 130)),
        Teal => sample(rng, (50, 110), (200, 255), (200, 255)),
        Lake => sample(rng, (100, 160), (180, 230), (230, 255)),
        Navy => sample(rng, (50, 130), (130, 190), (230, 255)),
        Indigo => sample(rng, (150, 210), (100, 160), (230, 255)),
        Violet => sample(rng, (180, 230), (130, 190), (220, 255)),
        Magenta => sample(rng, (230, 255), (130, 190), (200, 255)),
        Gray => {
            let gray = rng.gen_range(200..=240);
            Rgb([gray, gray, gray])
        }
        WarmGray => sample(rng, (220, 255), (180, 230), (80, 140)),
        CoolGray => sample(rng, (220, 255), (210, 245), (170, 220)),
        Brown => sample(rng, (180, 230), (140, 190), (100, 160)),
        Bronze => sample(rng, (150, 200), (220, 255), (180, 230)),
        Moss => sample(rng, (220, 255), (220, 255), (220, 255)),
    }
}

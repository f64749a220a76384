use ratatui::style::Color;

use crate::{
    cli::ColorArg,
    domain::condition::{ParticleClass, WeatherCondition, condition_particle_class},
};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCapability {
    TrueColor,
    Xterm256,
    Basic16,
}

/// Vertical background wash, painted top to bottom each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gradient {
    pub top: Color,
    pub bottom: Color,
}

/// Resolved lookup result for one (condition, scheme) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub particle_count: usize,
    pub particle_class: ParticleClass,
    pub gradient: Gradient,
    pub particle_color: Color,
}

type Rgb = (u8, u8, u8);

/// (gradient top, gradient bottom, particle color).
type SchemeSeed = (Rgb, Rgb, Rgb);

/// Light and dark schemes per condition, keyed by `dark = false | true`.
const SCHEME_SEEDS: &[((WeatherCondition, bool), SchemeSeed)] = &[
    (
        (WeatherCondition::Clear, false),
        ((135, 206, 235), (30, 144, 255), (255, 215, 0)),
    ),
    (
        (WeatherCondition::Clear, true),
        ((11, 61, 145), (0, 0, 0), (255, 255, 153)),
    ),
    (
        (WeatherCondition::Clouds, false),
        ((169, 208, 245), (130, 202, 255), (255, 255, 255)),
    ),
    (
        (WeatherCondition::Clouds, true),
        ((44, 62, 80), (26, 26, 46), (211, 211, 211)),
    ),
    (
        (WeatherCondition::Rain, false),
        ((93, 140, 174), (109, 143, 170), (166, 206, 227)),
    ),
    (
        (WeatherCondition::Rain, true),
        ((31, 41, 55), (17, 24, 39), (107, 147, 214)),
    ),
    (
        (WeatherCondition::Snow, false),
        ((227, 227, 227), (201, 214, 255), (255, 255, 255)),
    ),
    (
        (WeatherCondition::Snow, true),
        ((42, 59, 76), (26, 32, 46), (240, 248, 255)),
    ),
    (
        (WeatherCondition::Thunderstorm, false),
        ((75, 90, 105), (55, 65, 81), (255, 235, 59)),
    ),
    (
        (WeatherCondition::Thunderstorm, true),
        ((17, 24, 39), (3, 7, 18), (255, 235, 59)),
    ),
    (
        (WeatherCondition::Mist, false),
        ((229, 231, 235), (209, 213, 219), (243, 244, 246)),
    ),
    (
        (WeatherCondition::Mist, true),
        ((31, 41, 55), (17, 24, 39), (156, 163, 175)),
    ),
];

#[must_use]
pub fn particle_count(condition: WeatherCondition) -> usize {
    match condition {
        WeatherCondition::Clear => 20,
        WeatherCondition::Clouds => 15,
        WeatherCondition::Rain => 100,
        WeatherCondition::Snow => 50,
        WeatherCondition::Thunderstorm => 40,
        WeatherCondition::Mist => 80,
    }
}

/// Resolve the scheme for a condition. Colors stay true-color here;
/// the draw layer blends in RGB space and quantizes per cell.
#[must_use]
pub fn palette_for(condition: WeatherCondition, dark: bool) -> Palette {
    let (top, bottom, particle) = scheme_seed(condition, dark);
    Palette {
        particle_count: particle_count(condition),
        particle_class: condition_particle_class(condition),
        gradient: Gradient {
            top: rgb(top),
            bottom: rgb(bottom),
        },
        particle_color: rgb(particle),
    }
}

fn scheme_seed(condition: WeatherCondition, dark: bool) -> SchemeSeed {
    // Clear-day seed; unreachable while the table stays complete.
    const FALLBACK: SchemeSeed = ((135, 206, 235), (30, 144, 255), (255, 215, 0));
    SCHEME_SEEDS
        .iter()
        .find(|((c, d), _)| *c == condition && *d == dark)
        .map_or(FALLBACK, |(_, seed)| *seed)
}

fn rgb((r, g, b): Rgb) -> Color {
    Color::Rgb(r, g, b)
}

#[must_use]
pub fn detect_color_capability(mode: ColorArg) -> ColorCapability {
    detect_color_capability_from(
        mode,
        std::env::var("TERM").ok().as_deref(),
        std::env::var("COLORTERM").ok().as_deref(),
        std::env::var("NO_COLOR").ok().as_deref(),
    )
}

pub(crate) fn detect_color_capability_from(
    mode: ColorArg,
    term: Option<&str>,
    colorterm: Option<&str>,
    no_color: Option<&str>,
) -> ColorCapability {
    if mode == ColorArg::Always {
        return ColorCapability::TrueColor;
    }
    if mode == ColorArg::Never
        || no_color.is_some_and(|value| !value.is_empty())
        || term.is_some_and(|value| value.eq_ignore_ascii_case("dumb"))
    {
        return ColorCapability::Basic16;
    }

    let colorterm = colorterm.unwrap_or_default().to_lowercase();
    let term = term.unwrap_or_default().to_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") || term.contains("direct") {
        ColorCapability::TrueColor
    } else if term.contains("256color") {
        ColorCapability::Xterm256
    } else {
        ColorCapability::Basic16
    }
}

/// Degrade an RGB color to what the terminal can actually show.
#[must_use]
pub fn quantize(color: Color, capability: ColorCapability) -> Color {
    let Color::Rgb(r, g, b) = color else {
        return color;
    };
    match capability {
        ColorCapability::TrueColor => color,
        ColorCapability::Xterm256 => Color::Indexed(xterm_cube_index(r, g, b)),
        ColorCapability::Basic16 => nearest_basic(r, g, b),
    }
}

fn xterm_cube_index(r: u8, g: u8, b: u8) -> u8 {
    let level = |c: u8| ((u16::from(c) * 5 + 127) / 255) as u8;
    16 + 36 * level(r) + 6 * level(g) + level(b)
}

fn nearest_basic(r: u8, g: u8, b: u8) -> Color {
    const CANDIDATES: [(Color, (u8, u8, u8)); 8] = [
        (Color::Black, (0, 0, 0)),
        (Color::Red, (205, 49, 49)),
        (Color::Green, (13, 188, 121)),
        (Color::Yellow, (229, 229, 16)),
        (Color::Blue, (36, 114, 200)),
        (Color::Magenta, (188, 63, 188)),
        (Color::Cyan, (17, 168, 205)),
        (Color::White, (229, 229, 229)),
    ];

    let distance = |(cr, cg, cb): (u8, u8, u8)| -> u32 {
        let d = |a: u8, b: u8| {
            let diff = i32::from(a) - i32::from(b);
            (diff * diff) as u32
        };
        d(r, cr) + d(g, cg) + d(b, cb)
    };

    CANDIDATES
        .iter()
        .min_by_key(|(_, seed)| distance(*seed))
        .map(|(color, _)| *color)
        .unwrap_or(Color::White)
}

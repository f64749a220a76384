#![allow(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use crate::ui::{
    palette::{ColorCapability, Gradient, quantize},
    particles::{CELL_PX_H, CELL_PX_W, Particle, ParticleKind},
};

/// The backdrop sits behind the foreground content; every particle and
/// flash blend is scaled by this constant so it never dominates.
const SURFACE_OPACITY: f32 = 0.8;

/// Center alpha of the thunderstorm flash wash (0.3 gradient stop
/// drawn at 0.2 global alpha in the source animation).
const FLASH_ALPHA: f32 = 0.3 * 0.2;
const FLASH_COLOR: (f32, f32, f32) = (255.0, 255.0, 220.0);

pub struct Backdrop<'a> {
    pub gradient: Gradient,
    pub particle_color: Color,
    pub particles: &'a [Particle],
    pub flash: bool,
    pub capability: ColorCapability,
}

impl Widget for Backdrop<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        paint_gradient(area, buf, self.gradient);

        let color = color_to_rgb(self.particle_color);
        for particle in self.particles {
            paint_particle(area, buf, particle, color);
        }

        if self.flash {
            paint_flash_wash(area, buf);
        }

        if self.capability != ColorCapability::TrueColor {
            quantize_area(area, buf, self.capability);
        }
    }
}

fn paint_gradient(area: Rect, buf: &mut Buffer, gradient: Gradient) {
    let top = color_to_rgb(gradient.top);
    let bottom = color_to_rgb(gradient.bottom);
    for y in area.top()..area.bottom() {
        let t = gradient_ratio(area, y);
        let color = lerp_color(top, bottom, t);
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(' ').set_bg(color);
            }
        }
    }
}

fn gradient_ratio(area: Rect, y: u16) -> f32 {
    if area.height <= 1 {
        0.0
    } else {
        (y - area.top()) as f32 / (area.height - 1) as f32
    }
}

fn paint_particle(area: Rect, buf: &mut Buffer, p: &Particle, color: (f32, f32, f32)) {
    let alpha = p.opacity * SURFACE_OPACITY;
    match &p.kind {
        ParticleKind::Rain { length } | ParticleKind::Thunderstorm { length, .. } => {
            paint_stroke(area, buf, p, *length, color, alpha);
        }
        ParticleKind::Snow { .. } => {
            let glyph = if p.size < 2.5 {
                "·"
            } else if p.size < 4.0 {
                "•"
            } else {
                "✧"
            };
            paint_glyph(area, buf, p.x, p.y, glyph, color, alpha);
        }
        ParticleKind::Mist => {
            paint_disc(area, buf, p, p.size, 0.2 * alpha, color, Falloff::Linear);
        }
        ParticleKind::Cloud => {
            paint_disc(area, buf, p, p.size * 10.0, alpha, color, Falloff::Solid);
        }
        ParticleKind::Sun { night } => {
            if *night {
                paint_glyph(area, buf, p.x, p.y, "✦", color, alpha);
            } else {
                paint_disc(area, buf, p, p.size * 3.0, alpha, color, Falloff::Linear);
            }
        }
    }
}

/// Vertical stroke of `length` px for rain and thunderstorm drops.
fn paint_stroke(
    area: Rect,
    buf: &mut Buffer,
    p: &Particle,
    length: f32,
    color: (f32, f32, f32),
    alpha: f32,
) {
    let glyph = if p.size >= 2.0 { "┃" } else { "│" };
    let mut y = p.y;
    while y < p.y + length {
        paint_glyph(area, buf, p.x, y, glyph, color, alpha);
        y += CELL_PX_H;
    }
}

fn paint_glyph(
    area: Rect,
    buf: &mut Buffer,
    px: f32,
    py: f32,
    glyph: &str,
    color: (f32, f32, f32),
    alpha: f32,
) {
    let Some((x, y)) = cell_at(area, px, py) else {
        return;
    };
    if let Some(cell) = buf.cell_mut((x, y)) {
        let fg = lerp_color(color_to_rgb(cell.bg), color, alpha.clamp(0.0, 1.0));
        cell.set_symbol(glyph).set_fg(fg);
    }
}

enum Falloff {
    /// Full alpha across the disc (cloud puffs).
    Solid,
    /// Alpha fades linearly to zero at the rim (glows, mist wisps).
    Linear,
}

fn paint_disc(
    area: Rect,
    buf: &mut Buffer,
    p: &Particle,
    radius: f32,
    alpha: f32,
    color: (f32, f32, f32),
    falloff: Falloff,
) {
    if radius <= 0.0 {
        return;
    }
    let min_col = ((p.x - radius) / CELL_PX_W).floor() as i32;
    let max_col = ((p.x + radius) / CELL_PX_W).ceil() as i32;
    let min_row = ((p.y - radius) / CELL_PX_H).floor() as i32;
    let max_row = ((p.y + radius) / CELL_PX_H).ceil() as i32;

    for row in min_row..=max_row {
        for col in min_col..=max_col {
            if col < 0 || row < 0 || col >= i32::from(area.width) || row >= i32::from(area.height) {
                continue;
            }
            let cx = (col as f32 + 0.5) * CELL_PX_W;
            let cy = (row as f32 + 0.5) * CELL_PX_H;
            let distance = ((cx - p.x).powi(2) + (cy - p.y).powi(2)).sqrt();
            if distance > radius {
                continue;
            }
            let cell_alpha = match falloff {
                Falloff::Solid => alpha,
                Falloff::Linear => alpha * (1.0 - distance / radius),
            };
            blend_bg(
                buf,
                area.left() + col as u16,
                area.top() + row as u16,
                color,
                cell_alpha,
            );
        }
    }
}

/// Full-viewport radial wash while a thunderstorm flash is active.
fn paint_flash_wash(area: Rect, buf: &mut Buffer) {
    let width_px = f32::from(area.width) * CELL_PX_W;
    let height_px = f32::from(area.height) * CELL_PX_H;
    let center = (width_px / 2.0, height_px / 2.0);

    for row in 0..area.height {
        for col in 0..area.width {
            let cx = (f32::from(col) + 0.5) * CELL_PX_W;
            let cy = (f32::from(row) + 0.5) * CELL_PX_H;
            let distance = ((cx - center.0).powi(2) + (cy - center.1).powi(2)).sqrt();
            let t = (1.0 - distance / width_px).max(0.0);
            blend_bg(
                buf,
                area.left() + col,
                area.top() + row,
                FLASH_COLOR,
                FLASH_ALPHA * t * SURFACE_OPACITY,
            );
        }
    }
}

fn blend_bg(buf: &mut Buffer, x: u16, y: u16, color: (f32, f32, f32), alpha: f32) {
    if alpha <= 0.0 {
        return;
    }
    if let Some(cell) = buf.cell_mut((x, y)) {
        let bg = lerp_color(color_to_rgb(cell.bg), color, alpha.clamp(0.0, 1.0));
        cell.set_bg(bg);
    }
}

fn quantize_area(area: Rect, buf: &mut Buffer, capability: ColorCapability) {
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                let bg = quantize(cell.bg, capability);
                let fg = quantize(cell.fg, capability);
                cell.set_bg(bg).set_fg(fg);
            }
        }
    }
}

fn cell_at(area: Rect, px: f32, py: f32) -> Option<(u16, u16)> {
    if px < 0.0 || py < 0.0 {
        return None;
    }
    let col = (px / CELL_PX_W) as u16;
    let row = (py / CELL_PX_H) as u16;
    if col < area.width && row < area.height {
        Some((area.left() + col, area.top() + row))
    } else {
        None
    }
}

fn color_to_rgb(c: Color) -> (f32, f32, f32) {
    match c {
        Color::Rgb(r, g, b) => (r as f32, g as f32, b as f32),
        Color::Black => (0., 0., 0.),
        Color::DarkGray => (85., 85., 85.),
        Color::Gray => (170., 170., 170.),
        Color::White => (255., 255., 255.),
        _ => (0., 0., 0.),
    }
}

fn lerp_color(a: (f32, f32, f32), b: (f32, f32, f32), t: f32) -> Color {
    let r = (a.0 + (b.0 - a.0) * t).clamp(0.0, 255.0) as u8;
    let g = (a.1 + (b.1 - a.1) * t).clamp(0.0, 255.0) as u8;
    let b_val = (a.2 + (b.2 - a.2) * t).clamp(0.0, 255.0) as u8;
    Color::Rgb(r, g, b_val)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::particles::FlashState;

    fn rgb_of(color: Color) -> (u8, u8, u8) {
        match color {
            Color::Rgb(r, g, b) => (r, g, b),
            other => panic!("expected Color::Rgb, got {other:?}"),
        }
    }

    fn cell(buf: &Buffer, x: u16, y: u16) -> &ratatui::buffer::Cell {
        buf.cell((x, y)).expect("cell in bounds")
    }

    fn backdrop<'a>(particles: &'a [Particle], flash: bool) -> Backdrop<'a> {
        Backdrop {
            gradient: Gradient {
                top: Color::Rgb(10, 20, 30),
                bottom: Color::Rgb(110, 120, 130),
            },
            particle_color: Color::Rgb(200, 200, 200),
            particles,
            flash,
            capability: ColorCapability::TrueColor,
        }
    }

    fn particle(x: f32, y: f32, size: f32, kind: ParticleKind) -> Particle {
        Particle {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            size,
            opacity: 1.0,
            kind,
        }
    }

    #[test]
    fn gradient_spans_top_to_bottom() {
        let area = Rect::new(0, 0, 4, 3);
        let mut buf = Buffer::empty(area);
        backdrop(&[], false).render(area, &mut buf);

        assert_eq!(rgb_of(cell(&buf, 0, 0).bg), (10, 20, 30));
        assert_eq!(rgb_of(cell(&buf, 3, 2).bg), (110, 120, 130));
        let (_, g_mid, _) = rgb_of(cell(&buf, 1, 1).bg);
        assert!(g_mid > 20 && g_mid < 120);
    }

    #[test]
    fn snow_particle_paints_a_dot_glyph() {
        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        let flakes = [particle(
            20.0,
            20.0,
            1.5,
            ParticleKind::Snow {
                angle: 0.0,
                angle_speed: 0.0,
                swing_range: 0.0,
            },
        )];
        backdrop(&flakes, false).render(area, &mut buf);

        assert_eq!(cell(&buf, 2, 1).symbol(), "·");
        assert_ne!(cell(&buf, 2, 1).fg, Color::Reset);
    }

    #[test]
    fn rain_stroke_spans_rows_for_its_length() {
        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        let drops = [particle(
            8.0,
            0.0,
            1.2,
            ParticleKind::Rain { length: 29.0 },
        )];
        backdrop(&drops, false).render(area, &mut buf);

        assert_eq!(cell(&buf, 1, 0).symbol(), "│");
        assert_eq!(cell(&buf, 1, 1).symbol(), "│");
        assert_eq!(cell(&buf, 1, 2).symbol(), " ");
    }

    #[test]
    fn offscreen_particles_are_skipped() {
        let area = Rect::new(0, 0, 4, 3);
        let mut buf = Buffer::empty(area);
        let strays = [
            particle(-5.0, 10.0, 2.0, ParticleKind::Sun { night: true }),
            particle(1_000.0, 10.0, 2.0, ParticleKind::Sun { night: true }),
        ];
        backdrop(&strays, false).render(area, &mut buf);
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(cell(&buf, x, y).symbol(), " ");
            }
        }
    }

    #[test]
    fn cloud_disc_tints_cells_around_center() {
        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        let mut base = Buffer::empty(area);
        let clouds = [particle(40.0, 40.0, 3.0, ParticleKind::Cloud)];

        backdrop(&[], false).render(area, &mut base);
        backdrop(&clouds, false).render(area, &mut buf);

        assert_ne!(cell(&buf, 5, 2).bg, cell(&base, 5, 2).bg);
        assert_eq!(cell(&buf, 5, 2).symbol(), " ");
    }

    #[test]
    fn flash_wash_lightens_the_center() {
        let area = Rect::new(0, 0, 4, 3);
        let mut lit = Buffer::empty(area);
        let mut unlit = Buffer::empty(area);
        let storm = [particle(
            -100.0,
            -100.0,
            1.0,
            ParticleKind::Thunderstorm {
                length: 10.0,
                flash: FlashState {
                    active: true,
                    timer: 100.0,
                    duration: 2.0,
                },
            },
        )];
        backdrop(&storm, true).render(area, &mut lit);
        backdrop(&storm, false).render(area, &mut unlit);

        let (lr, lg, lb) = rgb_of(cell(&lit, 2, 1).bg);
        let (ur, ug, ub) = rgb_of(cell(&unlit, 2, 1).bg);
        assert!(lr > ur);
        assert!(lg > ug);
        assert!(lb >= ub);
    }

    #[test]
    fn quantized_render_emits_no_rgb_cells() {
        let area = Rect::new(0, 0, 6, 4);
        let mut buf = Buffer::empty(area);
        let mut widget = backdrop(&[], false);
        widget.capability = ColorCapability::Xterm256;
        widget.render(area, &mut buf);

        for y in 0..4 {
            for x in 0..6 {
                assert!(matches!(cell(&buf, x, y).bg, Color::Indexed(_)));
            }
        }
    }

    #[test]
    fn lerp_color_interpolates_and_clamps() {
        assert!(matches!(
            lerp_color((0.0, 0.0, 0.0), (100.0, 100.0, 100.0), 0.5),
            Color::Rgb(50, 50, 50)
        ));
        assert!(matches!(
            lerp_color((200.0, 200.0, 200.0), (300.0, 300.0, 300.0), 2.0),
            Color::Rgb(255, 255, 255)
        ));
    }

    #[test]
    fn cell_at_rejects_negative_and_out_of_range() {
        let area = Rect::new(0, 0, 10, 5);
        assert_eq!(cell_at(area, -0.1, 0.0), None);
        assert_eq!(cell_at(area, 0.0, -0.1), None);
        assert_eq!(cell_at(area, 81.0, 0.0), None);
        assert_eq!(cell_at(area, 0.0, 81.0), None);
        assert_eq!(cell_at(area, 12.0, 20.0), Some((1, 1)));
    }
}

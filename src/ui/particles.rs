//! Weather particle pool and per-frame update step.
//!
//! The simulation runs in a virtual pixel space (8×16 px per terminal
//! cell) so speeds and sizes are independent of the cell grid. All
//! motion constants are per-frame; the frame ticker's rate controls
//! real-time speed.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::domain::condition::ParticleClass;


pub const CELL_PX_W: f32 = 8.0;
pub const CELL_PX_H: f32 = 16.0;

/// Per-frame chance that a night star re-rolls its opacity.
const TWINKLE_CHANCE: f64 = 0.01;

/// Drawing-surface dimensions in virtual pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    #[must_use]
    pub fn from_cells(cols: u16, rows: u16) -> Self {
        Self::new(f32::from(cols) * CELL_PX_W, f32::from(rows) * CELL_PX_H)
    }
}

/// Countdown machine for the thunderstorm screen flash. Runs
/// independently of the particle's position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlashState {
    pub active: bool,
    pub timer: f32,
    pub duration: f32,
}

impl FlashState {
    fn step(&mut self, rng: &mut StdRng) {
        self.timer -= 1.0;
        if self.timer <= 0.0 {
            self.active = true;
            self.timer = rng.random_range(100.0..600.0);
        }
        if self.active {
            self.duration -= 1.0;
            if self.duration <= 0.0 {
                self.active = false;
                self.duration = rng.random_range(1.0..4.0);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParticleKind {
    Rain {
        length: f32,
    },
    Snow {
        angle: f32,
        angle_speed: f32,
        swing_range: f32,
    },
    Thunderstorm {
        length: f32,
        flash: FlashState,
    },
    Mist,
    Sun {
        night: bool,
    },
    Cloud,
}

impl ParticleKind {
    #[must_use]
    pub fn class(&self) -> ParticleClass {
        match self {
            ParticleKind::Rain { .. } => ParticleClass::Rain,
            ParticleKind::Snow { .. } => ParticleClass::Snow,
            ParticleKind::Thunderstorm { .. } => ParticleClass::Thunderstorm,
            ParticleKind::Mist => ParticleClass::Mist,
            ParticleKind::Sun { .. } => ParticleClass::Sun,
            ParticleKind::Cloud => ParticleClass::Cloud,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub size: f32,
    pub opacity: f32,
    pub kind: ParticleKind,
}

/// Owns the pool, the viewport geometry, and the random source. The
/// pool is only ever replaced wholesale (condition change), never
/// added to or drained incrementally.
#[derive(Debug)]
pub struct ParticleEngine {
    viewport: Viewport,
    no_flash: bool,
    particles: Vec<Particle>,
    rng: StdRng,
}

impl ParticleEngine {
    #[must_use]
    pub fn new(viewport: Viewport, seed: Option<u64>, no_flash: bool) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            viewport,
            no_flash,
            particles: Vec::new(),
            rng,
        }
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Geometry-only update on resize; the pool survives.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    #[must_use]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[must_use]
    pub fn flash_active(&self) -> bool {
        !self.no_flash
            && self.particles.iter().any(|p| {
                matches!(&p.kind, ParticleKind::Thunderstorm { flash, .. } if flash.active)
            })
    }

    /// Replace the whole pool with `count` fresh particles of `class`.
    pub fn regenerate(&mut self, count: usize, class: ParticleClass, night: bool) {
        let viewport = self.viewport;
        self.particles = (0..count)
            .map(|_| spawn_particle(&mut self.rng, viewport, class, night))
            .collect();
    }

    /// One update step over every particle.
    pub fn advance(&mut self) {
        let Self {
            viewport,
            particles,
            rng,
            ..
        } = self;
        for particle in particles.iter_mut() {
            update_particle(particle, *viewport, rng);
        }
    }
}

fn spawn_particle(
    rng: &mut StdRng,
    viewport: Viewport,
    class: ParticleClass,
    night: bool,
) -> Particle {
    let mut particle = Particle {
        x: rng.random_range(0.0..viewport.width),
        y: rng.random_range(0.0..viewport.height),
        vx: rng.random_range(-1.0..1.0),
        vy: rng.random_range(0.5..1.5),
        size: rng.random_range(1.0..6.0),
        opacity: rng.random_range(0.3..1.0),
        kind: ParticleKind::Cloud,
    };

    particle.kind = match class {
        ParticleClass::Rain => {
            particle.vy = rng.random_range(10.0..15.0);
            particle.size = rng.random_range(1.0..3.0);
            ParticleKind::Rain {
                length: rng.random_range(10.0..30.0),
            }
        }
        ParticleClass::Snow => {
            particle.vy = rng.random_range(0.5..1.5);
            ParticleKind::Snow {
                angle: rng.random_range(0.0..std::f32::consts::TAU),
                angle_speed: rng.random_range(-0.005..0.005),
                swing_range: rng.random_range(0.0..5.0),
            }
        }
        ParticleClass::Thunderstorm => {
            particle.vy = rng.random_range(10.0..15.0);
            particle.size = rng.random_range(1.0..3.0);
            ParticleKind::Thunderstorm {
                length: rng.random_range(10.0..30.0),
                flash: FlashState {
                    active: false,
                    timer: rng.random_range(0.0..200.0),
                    duration: rng.random_range(1.0..4.0),
                },
            }
        }
        ParticleClass::Mist => {
            particle.size = rng.random_range(50.0..150.0);
            particle.vx = rng.random_range(-0.15..0.15);
            particle.vy = rng.random_range(-0.05..0.05);
            ParticleKind::Mist
        }
        ParticleClass::Sun => ParticleKind::Sun { night },
        ParticleClass::Cloud => ParticleKind::Cloud,
    };

    particle
}

fn update_particle(p: &mut Particle, viewport: Viewport, rng: &mut StdRng) {
    match &mut p.kind {
        ParticleKind::Rain { length } => {
            p.y += p.vy;
            p.x += p.vx;
            if p.y > viewport.height {
                p.y = -*length;
                p.x = rng.random_range(0.0..viewport.width);
            }
        }
        ParticleKind::Snow {
            angle,
            angle_speed,
            swing_range,
        } => {
            *angle += *angle_speed;
            p.x += angle.sin() * *swing_range;
            p.y += p.vy;
            if p.y > viewport.height {
                p.y = -p.size;
                p.x = rng.random_range(0.0..viewport.width);
            }
        }
        ParticleKind::Thunderstorm { length, flash } => {
            p.y += p.vy;
            p.x += p.vx;
            flash.step(rng);
            if p.y > viewport.height {
                p.y = -*length;
                p.x = rng.random_range(0.0..viewport.width);
            }
        }
        ParticleKind::Mist => {
            p.x += p.vx;
            p.y += p.vy;
            if p.x < -p.size {
                p.x = viewport.width + p.size;
            } else if p.x > viewport.width + p.size {
                p.x = -p.size;
            }
            if p.y < -p.size {
                p.y = viewport.height + p.size;
            } else if p.y > viewport.height + p.size {
                p.y = -p.size;
            }
        }
        ParticleKind::Sun { night } => {
            let night = *night;
            p.x += p.vx;
            p.y += p.vy;
            bounce(p, viewport);
            if night && rng.random_bool(TWINKLE_CHANCE) {
                p.opacity = rng.random_range(0.3..1.0);
            }
        }
        ParticleKind::Cloud => {
            p.x += p.vx;
            p.y += p.vy;
            bounce(p, viewport);
        }
    }
}

fn bounce(p: &mut Particle, viewport: Viewport) {
    if p.x < 0.0 || p.x > viewport.width {
        p.vx = -p.vx;
    }
    if p.y < 0.0 || p.y > viewport.height {
        p.vy = -p.vy;
    }
}

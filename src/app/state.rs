use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEventKind};
use tokio::sync::mpsc;

use crate::{
    app::{
        events::{AppEvent, FrameTicker, MODE_SETTLE_DELAY, schedule_mode_settle},
        settings::RuntimeSettings,
    },
    cli::Cli,
    domain::condition::{IconCode, WeatherCondition},
    ui::{
        palette::{ColorCapability, Palette, palette_for},
        particles::{ParticleEngine, Viewport},
    },
};


/// Single owner of all animation state: scheme flag, last icon code,
/// palette, particle pool, and the frame-ticker handle. Everything
/// weather-related flows through `set_weather_background`.
#[derive(Debug)]
pub struct AppState {
    pub running: bool,
    pub dark_mode: bool,
    pub condition: WeatherCondition,
    pub last_icon: IconCode,
    pub palette: Palette,
    pub engine: ParticleEngine,
    pub capability: ColorCapability,
    pub frame_tick: u64,
    pub fps: u8,
    ticker: FrameTicker,
}

impl AppState {
    #[must_use]
    pub fn new(
        cli: &Cli,
        settings: &RuntimeSettings,
        viewport: Viewport,
        capability: ColorCapability,
    ) -> Self {
        let mut state = Self {
            running: true,
            dark_mode: settings.dark_mode,
            condition: WeatherCondition::Clear,
            last_icon: IconCode::new(""),
            palette: palette_for(WeatherCondition::Clear, settings.dark_mode),
            engine: ParticleEngine::new(viewport, cli.seed, settings.no_flash),
            capability,
            frame_tick: 0,
            fps: settings.fps,
            ticker: FrameTicker::default(),
        };
        state.set_weather_background(&settings.last_icon);
        state
    }

    /// The sole inbound entry point for weather updates: resolves the
    /// condition, applies the scheme for the current mode, and
    /// regenerates the particle pool wholesale.
    pub fn set_weather_background(&mut self, icon_code: &str) {
        self.last_icon = IconCode::new(icon_code);
        self.condition = self.last_icon.condition();
        self.palette = palette_for(self.condition, self.dark_mode);
        self.engine.regenerate(
            self.palette.particle_count,
            self.palette.particle_class,
            self.last_icon.is_night(),
        );
    }

    #[must_use]
    pub fn ticker_running(&self) -> bool {
        self.ticker.is_running()
    }

    pub async fn handle_event(
        &mut self,
        event: AppEvent,
        tx: &mpsc::Sender<AppEvent>,
    ) -> Result<()> {
        match event {
            AppEvent::Bootstrap => {
                self.ticker.restart(tx.clone(), self.fps);
                self.reapply_last_icon();
            }
            AppEvent::TickFrame => {
                self.frame_tick = self.frame_tick.saturating_add(1);
                self.engine.advance();
            }
            AppEvent::Input(event) => self.handle_input(event, tx).await?,
            AppEvent::ModeSettled => {
                // The flag may have toggled any number of times during
                // the settle window; whatever it reads now wins.
                self.reapply_last_icon();
            }
            AppEvent::Quit => {
                self.ticker.stop();
                self.running = false;
            }
        }

        Ok(())
    }

    async fn handle_input(&mut self, event: Event, tx: &mpsc::Sender<AppEvent>) -> Result<()> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => {
                    tx.send(AppEvent::Quit).await?;
                }
                KeyCode::Char('d') => {
                    self.dark_mode = !self.dark_mode;
                    schedule_mode_settle(tx.clone(), MODE_SETTLE_DELAY);
                }
                KeyCode::Char('n') => {
                    let prefix = self
                        .last_icon
                        .as_str()
                        .get(..2)
                        .unwrap_or_else(|| self.condition.icon_prefix())
                        .to_string();
                    let suffix = if self.last_icon.is_night() { "d" } else { "n" };
                    self.set_weather_background(&format!("{prefix}{suffix}"));
                }
                KeyCode::Char(digit @ '1'..='6') => {
                    let condition = WeatherCondition::ALL[(digit as usize) - ('1' as usize)];
                    let suffix = if self.last_icon.is_night() { "n" } else { "d" };
                    self.set_weather_background(&format!("{}{suffix}", condition.icon_prefix()));
                }
                _ => {}
            },
            Event::Resize(cols, rows) => {
                // Geometry only; the pool survives a resize.
                self.engine.set_viewport(Viewport::from_cells(cols, rows));
            }
            _ => {}
        }

        Ok(())
    }

    fn reapply_last_icon(&mut self) {
        let icon = self.last_icon.as_str().to_string();
        self.set_weather_background(&icon);
    }
}

pub mod backdrop;
pub mod hud;
pub mod palette;
pub mod particles;

use ratatui::{
    Frame,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::state::AppState;

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    if area.width < 20 || area.height < 5 {
        let warning = Paragraph::new("Terminal too small. Resize to at least 20x5.")
            .block(Block::default().borders(Borders::ALL).title("skywash"));
        frame.render_widget(warning, area);
        return;
    }

    frame.render_widget(
        backdrop::Backdrop {
            gradient: state.palette.gradient,
            particle_color: state.palette.particle_color,
            particles: state.engine.particles(),
            flash: state.engine.flash_active(),
            capability: state.capability,
        },
        area,
    );

    hud::render(frame, area, state);
}

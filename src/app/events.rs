use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{interval, sleep},
};

#[derive(Debug)]
pub enum AppEvent {
    Bootstrap,
    TickFrame,
    Input(Event),
    ModeSettled,
    Quit,
}

/// Delay between a scheme toggle and the re-read of the flag.
pub const MODE_SETTLE_DELAY: Duration = Duration::from_millis(50);

pub fn spawn_input_task() -> impl futures::Stream<Item = Event> {
    EventStream::new().filter_map(|event| async move { event.ok() })
}

/// Owns the animation loop. `restart` aborts the previous ticker
/// before spawning the next one, so at most one task posts `TickFrame`
/// at any time. Aborting never interrupts a frame already being drawn;
/// it only stops further ticks.
#[derive(Debug, Default)]
pub struct FrameTicker {
    handle: Option<JoinHandle<()>>,
}

impl FrameTicker {
    pub fn restart(&mut self, tx: mpsc::Sender<AppEvent>, fps: u8) {
        self.stop();
        let frame_interval = Duration::from_millis(1000 / u64::from(fps.max(15)));
        self.handle = Some(tokio::spawn(async move {
            let mut ticker = interval(frame_interval);
            loop {
                ticker.tick().await;
                if tx.send(AppEvent::TickFrame).await.is_err() {
                    break;
                }
            }
        }));
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

pub fn schedule_mode_settle(tx: mpsc::Sender<AppEvent>, delay: Duration) {
    tokio::spawn(async move {
        sleep(delay).await;
        let _ = tx.send(AppEvent::ModeSettled).await;
    });
}

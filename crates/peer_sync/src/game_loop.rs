//! Fixed-cadence driver for a coordinator.

use crate::{GameView, InputSource, SyncCoordinator, Transport};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{info, instrument};

/// Ticks a coordinator at a fixed rate and publishes each resulting view.
///
/// The loop is the coordinator's only user while it runs, which makes it the
/// single writer of the game state.
pub struct GameLoop<T, I> {
    coordinator: SyncCoordinator<T>,
    input: I,
    period: Duration,
    views: watch::Sender<GameView>,
}

impl<T: Transport, I: InputSource> GameLoop<T, I> {
    /// Creates a loop and the receiver renderers read views from.
    pub fn new(
        coordinator: SyncCoordinator<T>,
        input: I,
        period: Duration,
    ) -> (Self, watch::Receiver<GameView>) {
        let (views, rx) = watch::channel(coordinator.view());
        let game_loop = Self {
            coordinator,
            input,
            period: period.max(Duration::from_millis(1)),
            views,
        };
        (game_loop, rx)
    }

    /// The driven coordinator.
    pub fn coordinator(&self) -> &SyncCoordinator<T> {
        &self.coordinator
    }

    /// Runs a single tick immediately and publishes its view.
    pub fn step(&mut self) {
        let view = self.coordinator.tick(&self.input);
        self.views.send_replace(view);
    }

    /// Ticks until `shutdown` turns true or its sender is dropped, then
    /// hands the coordinator back.
    #[instrument(skip_all, fields(local_id = %self.coordinator.local_id(), period = ?self.period))]
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) -> SyncCoordinator<T> {
        info!("Game loop started");
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            if *shutdown.borrow_and_update() {
                break;
            }
            tokio::select! {
                _ = ticker.tick() => self.step(),
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }

        info!("Game loop stopped");
        self.coordinator
    }
}

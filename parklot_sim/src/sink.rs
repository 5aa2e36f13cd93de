//! Event sinks that report through `tracing`.

use parklot_core::{EventSink, LotEvent};
use tracing::{debug, info};

/// Logs admissions and exits at INFO, arrivals and departures at DEBUG.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn on_event(&mut self, event: &LotEvent) {
        match event {
            LotEvent::Entered { .. } | LotEvent::Exited { .. } => info!("{}", event),
            LotEvent::Arrived { .. } | LotEvent::Departed { .. } => debug!("{}", event),
        }
    }
}

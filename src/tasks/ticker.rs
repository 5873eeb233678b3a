//! Periodic ticker background task

use std::sync::Weak;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error};

use crate::controller::{Shared, TickerKind, TICK_INTERVAL};

/// Fire `kind` events into the controller once per interval until cancelled
///
/// The task stops when the controller is dropped, when it is disposed, or
/// when this ticker is no longer the one armed for `kind`.
pub(crate) async fn ticker_task(shared: Weak<Shared>, kind: TickerKind, id: u64) {
    debug!("Starting {} ticker #{}", kind, id);

    let mut interval = interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let Some(shared) = shared.upgrade() else {
            debug!("{} ticker #{}: controller dropped", kind, id);
            break;
        };

        match shared.fire(kind, id) {
            Ok(true) => {}
            Ok(false) => {
                debug!("{} ticker #{} no longer armed, stopping", kind, id);
                break;
            }
            Err(e) => {
                error!("{} ticker #{} failed: {}", kind, id, e);
                break;
            }
        }
    }
}

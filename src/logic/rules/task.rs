//! Asynchronous wrapper around the synchronous engine.
//!
//! Derivation is modeled as a task that sleeps through an artificial
//! "analysis" delay and then runs the pure engine. Each spawn carries the
//! caller's generation counter; the caller keeps only results matching its
//! latest generation, so a superseded derivation is discarded rather than
//! rendered. The engine itself knows nothing about cancellation.

use super::InsightEngine;
use crate::models::{Insight, WeatherSnapshot};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// Simulated analysis latency before the (instant) derivation runs.
const DERIVE_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone)]
pub struct InsightEvent {
    pub generation: u64,
    pub insight: Insight,
}

/// Spawn a derivation for `snapshot`, delivering the result on `tx` tagged
/// with `generation`. Dropping the returned handle detaches the task; the
/// stale result is filtered by generation on arrival.
pub fn spawn_derive(
    snapshot: WeatherSnapshot,
    generation: u64,
    tx: UnboundedSender<InsightEvent>,
) -> JoinHandle<()> {
    spawn_derive_after(snapshot, generation, DERIVE_DELAY, tx)
}

fn spawn_derive_after(
    snapshot: WeatherSnapshot,
    generation: u64,
    delay: Duration,
    tx: UnboundedSender<InsightEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let insight = InsightEngine::new().derive(&snapshot);
        // The receiver may be gone if the UI shut down; nothing to do then.
        let _ = tx.send(InsightEvent {
            generation,
            insight,
        });
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn snapshot(temp_c: f64) -> WeatherSnapshot {
        WeatherSnapshot {
            temperature_c: temp_c,
            condition: "clear".into(),
            humidity_pct: 50.0,
            wind_speed_kmh: 5.0,
            uv_index: Some(0.0),
        }
    }

    #[tokio::test]
    async fn delivers_tagged_result() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_derive_after(snapshot(15.0), 7, Duration::from_millis(1), tx);

        let event = rx.recv().await.expect("derivation result");
        assert_eq!(event.generation, 7);
        assert!(!event.insight.summary.is_empty());
    }

    #[tokio::test]
    async fn stale_generations_are_distinguishable() {
        let (tx, mut rx) = mpsc::unbounded_channel();

        // An older spawn with a longer delay finishes after a newer one;
        // the caller's generation check drops it.
        spawn_derive_after(snapshot(-10.0), 1, Duration::from_millis(30), tx.clone());
        spawn_derive_after(snapshot(35.0), 2, Duration::from_millis(1), tx);

        let latest_generation = 2u64;
        let mut accepted = None;
        for _ in 0..2 {
            let event = rx.recv().await.expect("derivation result");
            if event.generation == latest_generation {
                accepted = Some(event.insight);
            }
        }

        let insight = accepted.expect("latest generation arrived");
        assert!(insight.summary.starts_with("Hot day"));
    }

    #[tokio::test]
    async fn dropped_receiver_does_not_panic() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let handle = spawn_derive_after(snapshot(15.0), 1, Duration::from_millis(1), tx);
        handle.await.expect("task completes cleanly");
    }
}

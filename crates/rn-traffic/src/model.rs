//! The traffic model: per-edge state machines driven by the event engine.
//!
//! # Event protocol
//!
//! The model schedules `TrafficUpdate { from, to }` payloads on the engine,
//! one per tracked edge, each re-scheduling itself at
//! `t + update_interval`.  Incidents schedule a matching
//! `IncidentResolution` at `t + duration`.  Both payloads are inert inside
//! the engine; [`TrafficModel::process_until`] pops events and routes the
//! traffic kinds back into the model, which mutates its state and pushes
//! the resulting effective weight into the graph store.
//!
//! # Determinism
//!
//! All randomness flows through one seeded [`SimRng`].  Edge keys are
//! sorted wherever iteration order would otherwise depend on hash order,
//! so a run is reproducible given the same seed and the same sequence of
//! external calls.  Manual triggers and read-only scans never draw from
//! the generator.

use rustc_hash::FxHashMap;

use rn_core::{NodeId, SimRng, SimTime};
use rn_events::{Event, EventEngine, EventPayload};
use rn_graph::Graph;

use crate::config::TrafficConfig;
use crate::error::{TrafficError, TrafficResult};
use crate::incident::{Incident, IncidentKind};
use crate::state::EdgeTraffic;

/// Resolution events outrank updates at the same minute, so an incident
/// clears before the edge's next stochastic step.
const PRIORITY_RESOLUTION: u8 = 3;
const PRIORITY_UPDATE: u8 = 5;

/// Key identifying one tracked edge.  Normalised to `(min, max)` on
/// undirected graphs so both stored directions share a single state.
type EdgeKey = (NodeId, NodeId);

/// Traffic dynamics over one graph.
pub struct TrafficModel {
    config: TrafficConfig,
    states: FxHashMap<EdgeKey, EdgeTraffic>,
    /// Mirrors `!graph.is_directed()`; fixed at `initialize()`.
    normalise_keys: bool,
    rng: SimRng,
}

impl TrafficModel {
    pub fn new(config: TrafficConfig) -> Self {
        let rng = SimRng::new(config.seed);
        Self {
            config,
            states: FxHashMap::default(),
            normalise_keys: false,
            rng,
        }
    }

    pub fn config(&self) -> &TrafficConfig {
        &self.config
    }

    fn key(&self, from: NodeId, to: NodeId) -> EdgeKey {
        if self.normalise_keys && to < from {
            (to, from)
        } else {
            (from, to)
        }
    }

    // ── Setup ─────────────────────────────────────────────────────────────

    /// Seed one free-flow state per edge of `graph`, capturing each edge's
    /// current weight as the value `reset()` restores.
    ///
    /// Call before [`start`](Self::start); calling again re-seeds from the
    /// graph's current edges and discards all existing traffic state.
    pub fn initialize(&mut self, graph: &Graph) {
        self.normalise_keys = !graph.is_directed();
        self.states.clear();
        for edge in graph.edges() {
            let key = self.key(edge.from, edge.to);
            self.states
                .entry(key)
                .or_insert_with(|| EdgeTraffic::new(edge.weight));
        }
        log::debug!("traffic model tracking {} edges", self.states.len());
    }

    /// Schedule the first `TrafficUpdate` for every tracked edge at
    /// `now + update_interval`.
    pub fn start(&mut self, engine: &mut EventEngine) {
        let mut keys: Vec<EdgeKey> = self.states.keys().copied().collect();
        keys.sort_unstable();
        let at = engine.now().offset(self.config.update_interval_min);
        for (from, to) in keys {
            if let Err(e) = engine.schedule(
                at,
                PRIORITY_UPDATE,
                EventPayload::TrafficUpdate { from, to },
            ) {
                log::warn!("failed to schedule initial update for {from}->{to}: {e}");
            }
        }
    }

    // ── Event dispatch ────────────────────────────────────────────────────

    /// Drive the engine up to `end`, dispatching traffic payloads into the
    /// model.  Non-traffic events run their intrinsic behaviour inside the
    /// engine and pass through untouched.  Returns the number of events
    /// processed.
    pub fn process_until(
        &mut self,
        engine: &mut EventEngine,
        graph: &mut Graph,
        end: SimTime,
    ) -> usize {
        let mut processed = 0;
        while engine.peek_next().is_some_and(|e| e.time <= end) {
            if let Some(event) = engine.process_next() {
                self.handle_event(&event, engine, graph);
                processed += 1;
            }
        }
        // Advance the clock to the bound even if nothing fired.
        engine.process_until(end);
        processed
    }

    /// Dispatch a single popped event.  Returns `true` if it was a traffic
    /// payload this model consumed.
    pub fn handle_event(
        &mut self,
        event: &Event,
        engine: &mut EventEngine,
        graph: &mut Graph,
    ) -> bool {
        match event.payload {
            EventPayload::TrafficUpdate { from, to } => {
                self.on_update(from, to, engine, graph);
                true
            }
            EventPayload::IncidentResolution { from, to } => {
                self.on_resolution(from, to, engine.now(), graph);
                true
            }
            _ => false,
        }
    }

    // ── Update step ───────────────────────────────────────────────────────

    fn on_update(
        &mut self,
        from: NodeId,
        to: NodeId,
        engine: &mut EventEngine,
        graph: &mut Graph,
    ) {
        let key = self.key(from, to);
        // An edge removed from the graph stops its update chain here.
        if !graph.has_edge(key.0, key.1) {
            self.states.remove(&key);
            return;
        }
        let Some(state) = self.states.get_mut(&key) else {
            return;
        };
        let now = engine.now();

        // 1. Stochastic one-level congestion step.  Rush hour and weather
        //    scale the worsening probability only.
        let mut scale = self.config.weather.multiplier();
        if self.config.is_rush_hour(now.minute_of_day()) {
            scale *= self.config.rush_hour_multiplier;
        }
        let step_up = (self.config.step_up_prob * scale).min(0.95);
        let old_level = state.level;
        if self.rng.gen_bool(step_up) {
            state.level = state.level.step_up();
        } else if self.rng.gen_bool(self.config.step_down_prob) {
            state.level = state.level.step_down();
        }
        if state.level != old_level {
            log::trace!("[{now}] {}->{}: {} -> {}", key.0, key.1, old_level, state.level);
        }

        // 2. Factors follow the level (and any still-active incident).
        state.recompute_factors();

        // 3. Weather-scaled incident roll, only when the edge is clear.
        if state.incident.is_none() {
            let p = (self.config.incident_prob * self.config.weather.multiplier()).min(1.0);
            if self.rng.gen_bool(p) {
                let kind = sample_incident_kind(&mut self.rng);
                let duration = jittered_duration(&mut self.rng, &self.config, kind);
                state.incident = Some(Incident {
                    kind,
                    until: now.offset(duration),
                });
                state.recompute_factors();
                log::debug!(
                    "[{now}] incident {kind} on {}->{} for {duration} min",
                    key.0,
                    key.1
                );
                if let Err(e) = engine.schedule_after(
                    duration as i64,
                    PRIORITY_RESOLUTION,
                    EventPayload::IncidentResolution {
                        from: key.0,
                        to: key.1,
                    },
                ) {
                    log::warn!("failed to schedule resolution for {}->{}: {e}", key.0, key.1);
                }
            }
        }

        // 4. Keep the per-edge update chain alive.
        if let Err(e) = engine.schedule_after(
            self.config.update_interval_min as i64,
            PRIORITY_UPDATE,
            EventPayload::TrafficUpdate {
                from: key.0,
                to: key.1,
            },
        ) {
            log::warn!("failed to re-schedule update for {}->{}: {e}", key.0, key.1);
        }

        // 5. Push the new effective weight into the graph store.
        graph.update_edge_weight(key.0, key.1, state.effective_weight());
    }

    fn on_resolution(&mut self, from: NodeId, to: NodeId, now: SimTime, graph: &mut Graph) {
        let key = self.key(from, to);
        let Some(state) = self.states.get_mut(&key) else {
            return;
        };
        // A newer incident overwrote the one this resolution belongs to;
        // its own resolution is still pending.
        let Some(incident) = state.incident else {
            return;
        };
        if now < incident.until {
            return;
        }
        state.incident = None;
        state.recompute_factors();
        graph.update_edge_weight(key.0, key.1, state.effective_weight());
        log::debug!("[{now}] incident {} cleared on {}->{}", incident.kind, key.0, key.1);
    }

    // ── External control ──────────────────────────────────────────────────

    /// Force an incident on an edge, outside the stochastic loop.
    ///
    /// Overwrites any active incident and schedules its own resolution.
    /// Does not consume randomness, so forced incidents never perturb the
    /// stochastic stream.
    pub fn trigger_incident(
        &mut self,
        engine: &mut EventEngine,
        graph: &mut Graph,
        from: NodeId,
        to: NodeId,
        kind: IncidentKind,
        duration_min: Option<u64>,
    ) -> TrafficResult<()> {
        let key = self.key(from, to);
        let Some(state) = self.states.get_mut(&key) else {
            return Err(TrafficError::EdgeNotTracked { from, to });
        };
        let duration = duration_min
            .unwrap_or_else(|| kind.mean_duration_min())
            .max(self.config.min_incident_duration_min);
        let now = engine.now();
        state.incident = Some(Incident {
            kind,
            until: now.offset(duration),
        });
        state.recompute_factors();
        graph.update_edge_weight(key.0, key.1, state.effective_weight());
        engine.schedule_after(
            duration as i64,
            PRIORITY_RESOLUTION,
            EventPayload::IncidentResolution {
                from: key.0,
                to: key.1,
            },
        )?;
        log::info!("[{now}] forced incident {kind} on {}->{} for {duration} min", key.0, key.1);
        Ok(())
    }

    /// Return every tracked edge to free-flow with no incident and restore
    /// its original weight in the graph store.
    ///
    /// Pending traffic events are not touched; cancel them through the
    /// engine if the simulation should stay quiet afterwards.
    pub fn reset(&mut self, graph: &mut Graph) {
        for (key, state) in self.states.iter_mut() {
            *state = EdgeTraffic::new(state.original_weight);
            graph.update_edge_weight(key.0, key.1, state.original_weight);
        }
    }

    // ── Read-only queries ─────────────────────────────────────────────────

    /// Traffic state of one edge, if tracked.
    pub fn state(&self, from: NodeId, to: NodeId) -> Option<&EdgeTraffic> {
        self.states.get(&self.key(from, to))
    }

    /// All currently blocked edges, sorted by key.
    pub fn blocked_roads(&self) -> Vec<EdgeKey> {
        let mut blocked: Vec<EdgeKey> = self
            .states
            .iter()
            .filter(|(_, s)| s.is_blocked())
            .map(|(k, _)| *k)
            .collect();
        blocked.sort_unstable();
        blocked
    }

    /// Number of tracked edges.
    pub fn tracked_edges(&self) -> usize {
        self.states.len()
    }
}

fn jittered_duration(rng: &mut SimRng, config: &TrafficConfig, kind: IncidentKind) -> u64 {
    let jitter: f64 = rng.gen_range(0.5..1.5);
    let minutes = (kind.mean_duration_min() as f64 * jitter).round() as u64;
    minutes.max(config.min_incident_duration_min)
}

/// Weighted sample over the incident categories.
fn sample_incident_kind(rng: &mut SimRng) -> IncidentKind {
    let total: u32 = IncidentKind::ALL.iter().map(|k| k.sample_weight()).sum();
    let mut roll = rng.gen_range(0..total);
    for kind in IncidentKind::ALL {
        let w = kind.sample_weight();
        if roll < w {
            return kind;
        }
        roll -= w;
    }
    // Unreachable: weights sum to `total` and the roll is below it.
    IncidentKind::MinorAccident
}

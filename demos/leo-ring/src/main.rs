//! leo-ring: smallest end-to-end run of the contact-plan synthesizer.
//!
//! One orbital plane of 12 satellites at 550 km plus three ground stations,
//! two of which share a terrestrial link.  Samples one orbit, builds the
//! single-interferer plan, and writes both plans as CSV.
//!
//! Pass a JSON config path as the first argument to override the embedded
//! one.  `RUST_LOG=cp_sampler=debug` shows per-tick summaries.

use std::f64::consts::TAU;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cp_core::{NodeId, PlanConfig, Position, SimTime};
use cp_link::{FeasibilityOracle, FreeSpaceMedium, RadioProfile};
use cp_node::{Motion, NodeSpec, NodeTable, NodeTableBuilder};
use cp_output::{CsvWriter, PlanOutputObserver, PlanWriter};
use cp_plan::ExportedPlan;
use cp_sampler::{PlanEngineBuilder, PlanObserver, TickStats};

// ── Constants ─────────────────────────────────────────────────────────────────

const SATELLITES:       usize = 12;
const ORBIT_RADIUS_M:   f64   = Position::EARTH_RADIUS_M + 550_000.0;
const ORBIT_PERIOD_S:   u64   = 5_736;
const INCLINATION_DEG:  f64   = 53.0;
const SAT_COMM_M:       f64   = 4.0e6;
const SAT_INTERFERE_M:  f64   = 5.0e6;
const GROUND_COMM_M:    f64   = 3.0e6;
const OUTPUT_DIR:       &str  = "output/leo-ring";

const CONFIG_JSON: &str = r#"{
    "checkInterval": "30s",
    "simTimeLimit": "1h 35min 36s",
    "assumeBidirectionalSatContacts": true,
    "buildInterferencePlan": true
}"#;

// ── Scenario ──────────────────────────────────────────────────────────────────

/// (name, lat, lon) for each ground station.
const STATIONS: [(&str, f64, f64); 3] = [
    ("hartebeesthoek", -25.89, 27.69),
    ("santiago", -33.15, -70.67),
    ("punta-arenas", -53.16, -70.91),
];

fn build_nodes() -> Result<NodeTable> {
    let mut b = NodeTableBuilder::with_capacity(SATELLITES + STATIONS.len());

    for i in 0..SATELLITES {
        let motion = Motion::CircularOrbit {
            radius_m:        ORBIT_RADIUS_M,
            inclination_rad: INCLINATION_DEG.to_radians(),
            raan_rad:        0.0,
            phase_rad:       TAU * i as f64 / SATELLITES as f64,
            period:          SimTime::from_secs(ORBIT_PERIOD_S),
        };
        b.add(NodeSpec::satellite(motion, SAT_COMM_M).with_interference_radius(SAT_INTERFERE_M));
    }

    let stations: Vec<NodeId> = STATIONS
        .iter()
        .map(|&(_, lat, lon)| {
            b.add(NodeSpec::ground(Position::from_lat_lon_deg(lat, lon, 0.0), GROUND_COMM_M))
        })
        .collect();
    // Santiago and Punta Arenas are backhauled over fibre.
    b.internet_link(stations[1], stations[2]);

    Ok(b.build()?)
}

// ── Observer wrapper to count ticks ──────────────────────────────────────────

struct CountingObserver<W: PlanWriter> {
    inner:        PlanOutputObserver<W>,
    ticks:        usize,
    peak_working: usize,
    probes:       usize,
}

impl<W: PlanWriter> CountingObserver<W> {
    fn new(inner: PlanOutputObserver<W>) -> Self {
        Self { inner, ticks: 0, peak_working: 0, probes: 0 }
    }

    /// Surface the first write error the output observer stored.
    fn finish(&mut self) -> Result<()> {
        match self.inner.take_error() {
            Some(e) => Err(anyhow::Error::new(e).context("writing plan output")),
            None => Ok(()),
        }
    }
}

impl<W: PlanWriter> PlanObserver for CountingObserver<W> {
    fn on_tick_end(&mut self, now: SimTime, stats: &TickStats) {
        self.ticks += 1;
        self.peak_working = self.peak_working.max(stats.working);
        self.probes += stats.contact_probes + stats.interference_probes;
        self.inner.on_tick_end(now, stats);
    }

    fn on_plan_end(&mut self, plan: &ExportedPlan) {
        self.inner.on_plan_end(plan);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 1. Configuration.
    let config = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            PlanConfig::from_json(&json)?
        }
        None => PlanConfig::from_json(CONFIG_JSON)?,
    };

    // 2. Nodes and radio medium share one registry.
    let nodes = Arc::new(build_nodes()?);
    info!(satellites = SATELLITES, stations = STATIONS.len(), "scenario built");
    let medium = FreeSpaceMedium::new(Arc::clone(&nodes), RadioProfile::default());

    // 3. Engine.
    let mut engine = PlanEngineBuilder::new(config, Arc::clone(&nodes), FeasibilityOracle::new(medium))
        .build()?;

    // 4. Output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = CountingObserver::new(PlanOutputObserver::new(writer));

    // 5. Run.
    let t0 = Instant::now();
    let plan = engine.run(&mut obs)?;
    let elapsed = t0.elapsed();

    obs.finish()?;

    // 6. Summary.
    let ledger = engine.oracle().ledger();
    println!("Run complete in {:.3} s", elapsed.as_secs_f64());
    println!("  ticks               : {}", obs.ticks);
    println!("  probes              : {}", obs.probes);
    println!("  probe objects       : {} created, {} live", ledger.created(), ledger.live());
    println!("  peak working links  : {}", obs.peak_working);
    println!("  contact_plan.csv    : {} rows", plan.contacts.len());
    println!("  interference_plan.csv: {} rows", plan.interferences.len());
    println!();

    println!("{:<8} {:<8} {:>10} {:>10} {:>8}", "Source", "Sink", "Start (s)", "End (s)", "Range");
    println!("{}", "-".repeat(48));
    for c in plan.contacts.iter().filter(|c| c.source_id != c.sink_id).take(20) {
        println!(
            "{:<8} {:<8} {:>10.0} {:>10.0} {:>8}",
            c.source_id.0,
            c.sink_id.0,
            c.start_time.as_secs_f64(),
            c.end_time.as_secs_f64(),
            c.range,
        );
    }

    Ok(())
}

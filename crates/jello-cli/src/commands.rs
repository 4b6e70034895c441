//! CLI command implementations.

use jello_bench::metrics::BenchmarkMetrics;
use jello_bench::runner::BenchmarkRunner;
use jello_bench::scenarios::{Scenario, ScenarioKind};
use jello_cube::JelloCube;
use jello_debug::frame_export::JsonFrameExporter;
use jello_debug::hooks::TelemetryHook;
use jello_debug::snapshot::StateSnapshot;
use jello_solver::{IntegratorKind, PresetDatabase, SimulationConfig, SpringClass};
use jello_telemetry::{EventBus, TracingSink, VecSink};
use jello_types::JelloError;

type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Options for `jello simulate`.
pub struct SimulateArgs<'a> {
    pub config: Option<&'a str>,
    pub preset: Option<&'a str>,
    pub resolution: Option<u32>,
    pub integrator: Option<&'a str>,
    pub ticks: u64,
    pub snapshot: Option<&'a str>,
    pub export: Option<&'a str>,
}

fn parse_integrator(name: &str) -> Result<IntegratorKind, JelloError> {
    IntegratorKind::from_name(name).ok_or_else(|| JelloError::UnknownName {
        kind: "integrator",
        name: name.to_string(),
    })
}

fn load_config(path: &str) -> Result<SimulationConfig, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let config: SimulationConfig =
        toml::from_str(&content).map_err(|e| JelloError::InvalidConfig(e.to_string()))?;
    Ok(config)
}

/// Run a simulation.
pub fn simulate(args: SimulateArgs<'_>) -> CommandResult {
    println!("Jello Simulation");
    println!("────────────────");

    let mut config = match args.config {
        Some(path) => {
            println!("Config:      {path}");
            load_config(path)?
        }
        None => SimulationConfig::default(),
    };
    if let Some(name) = args.preset {
        config.physics = PresetDatabase::with_defaults().physics(name)?;
        println!("Preset:      {name}");
    }
    if let Some(resolution) = args.resolution {
        config.resolution = resolution;
    }
    if let Some(name) = args.integrator {
        config.integrator = parse_integrator(name)?;
    }

    let mut bus = EventBus::new();
    let counts = VecSink::new();
    bus.add_sink(Box::new(counts.clone()));
    bus.add_sink(Box::new(TracingSink::new()));

    let mut cube = JelloCube::new(config);
    cube.add_hook(Box::new(TelemetryHook::connected(&bus).without_steps()));

    println!("Resolution:  {} ({} points)", cube.resolution(), cube.lattice().point_count());
    println!("Integrator:  {}", cube.integrator_name());
    println!(
        "Timing:      dt = {}s × {} steps/tick, {} ticks",
        cube.config().dt,
        cube.config().steps_per_tick,
        args.ticks
    );
    println!();

    let mut exporter = args
        .export
        .map(|path| JsonFrameExporter::new(path, cube.resolution()));
    if let Some(exporter) = exporter.as_mut() {
        exporter.submit_frame(cube.tick_count(), cube.sim_time(), cube.surface());
    }

    let mut wall_time = 0.0;
    let mut floor_touched = false;
    for _ in 0..args.ticks {
        let timestamp = cube.sim_time();
        let report = cube.tick(timestamp);
        wall_time += report.wall_time;
        floor_touched |= cube.floor_contacts().count > 0;
        if let Some(exporter) = exporter.as_mut() {
            exporter.submit_frame(report.tick + 1, report.sim_time, cube.surface());
        }
        bus.flush();
    }
    cube.finish();
    bus.finish();

    println!("Sim time:      {:.3}s", cube.sim_time());
    println!("Wall time:     {:.3}s", wall_time);
    println!("Kinetic:       {:.6e}", cube.kinetic_energy());
    println!("Elastic:       {:.6e}", cube.elastic_energy());
    println!("Min height:    {:.4}", cube.lattice().min_height());
    println!("Floor contact: {}", if floor_touched { "yes" } else { "no" });
    println!("Events:        {}", counts.len());

    if let Some(path) = args.snapshot {
        cube.snapshot().save(path)?;
        println!("Snapshot written to: {path}");
    }
    if let Some(mut exporter) = exporter {
        let frames = exporter.frame_count();
        exporter.finalize()?;
        println!("{frames} frames written to: {}", exporter.output_path().display());
    }

    Ok(())
}

/// Run benchmark suite.
pub fn benchmark(scenario_name: &str, integrator: &str, output_path: Option<&str>) -> CommandResult {
    println!("Jello Benchmark Suite");
    println!("═════════════════════");
    println!();

    let integrator = parse_integrator(integrator)?;
    let scenarios: Vec<ScenarioKind> = if scenario_name == "all" {
        ScenarioKind::all().to_vec()
    } else {
        vec![ScenarioKind::from_name(scenario_name)?]
    };

    let mut all_metrics = Vec::new();
    for &kind in &scenarios {
        let scenario = Scenario::from_kind(kind).with_integrator(integrator);

        println!(
            "Running: {} (resolution {}, {} ticks × {} steps, {})",
            kind.name(),
            scenario.config.resolution,
            scenario.ticks,
            scenario.config.steps_per_tick,
            integrator.name(),
        );

        let metrics = BenchmarkRunner::run(&scenario);

        println!("  Wall time:     {:.3}s", metrics.total_wall_time);
        println!("  Avg tick:      {:.3}ms", metrics.avg_tick_time * 1000.0);
        println!("  Final KE:      {:.6e}", metrics.final_kinetic_energy);
        println!("  Max displace:  {:.4}", metrics.max_displacement);
        println!("  Min height:    {:.4}", metrics.min_height);
        println!();

        all_metrics.push(metrics);
    }

    let csv = BenchmarkMetrics::to_csv(&all_metrics);
    if let Some(path) = output_path {
        std::fs::write(path, &csv)?;
        println!("Results written to: {path}");
    } else {
        println!("CSV Output:");
        println!("{csv}");
    }

    Ok(())
}

/// Inspect a state snapshot.
pub fn inspect(path: &str) -> CommandResult {
    println!("Jello Snapshot Inspector");
    println!("────────────────────────");
    println!();

    let snapshot = StateSnapshot::load(path)?;

    println!("Tick:         {}", snapshot.tick);
    println!("Sim time:     {:.4}s", snapshot.sim_time);
    println!("Resolution:   {}", snapshot.resolution);
    println!("Points:       {}", snapshot.point_count);
    println!("Pos entries:  {}", snapshot.positions.len());
    println!("Vel entries:  {}", snapshot.velocities.len());

    if !snapshot.positions.is_empty() {
        let ys = || snapshot.positions.iter().skip(1).step_by(3).copied();
        let min_y = ys().fold(f32::INFINITY, f32::min);
        let max_y = ys().fold(f32::NEG_INFINITY, f32::max);
        println!("Y range:      [{:.4}, {:.4}]", min_y, max_y);
    }

    match snapshot.restore() {
        Ok(lattice) => println!("✅ Restores to a {}³ lattice.", lattice.dim()),
        Err(e) => println!("❌ Snapshot does not restore: {e}"),
    }

    Ok(())
}

/// Validate a simulation config.
pub fn validate(path: &str) -> CommandResult {
    println!("Jello Config Validator");
    println!("──────────────────────");
    println!();

    if !path.ends_with(".toml") {
        println!("Unsupported file format. Use .toml.");
        return Ok(());
    }

    println!("Validating config: {path}");
    let config = load_config(path)?;
    let sanitized = config.sanitized();
    if sanitized == config {
        println!("✅ Config is valid.");
    } else {
        println!("⚠️  Config parsed; out-of-range values will be clamped:");
        if sanitized.resolution != config.resolution {
            println!("  resolution:     {} → {}", config.resolution, sanitized.resolution);
        }
        if sanitized.dt != config.dt {
            println!("  dt:             {} → {}", config.dt, sanitized.dt);
        }
        if sanitized.steps_per_tick != config.steps_per_tick {
            println!(
                "  steps_per_tick: {} → {}",
                config.steps_per_tick, sanitized.steps_per_tick
            );
        }
        if sanitized.physics != config.physics {
            println!("  physics:        mass or coefficients clamped");
        }
    }

    let c = &sanitized;
    println!();
    println!("Resolution:  {} ({} points)", c.resolution, (c.resolution as usize + 1).pow(3));
    println!("Integrator:  {}", c.integrator.name());
    println!("Mass:        {}", c.physics.mass);
    println!("Hooke mode:  {:?}", c.physics.hooke_mode);
    for &class in SpringClass::all() {
        let coeffs = c.physics.springs.for_class(class);
        println!(
            "  {:<11} k = {:<8} d = {}",
            class.name(),
            coeffs.stiffness,
            coeffs.damping
        );
    }

    Ok(())
}

/// List the built-in physics presets.
pub fn presets() -> CommandResult {
    println!("Jello Physics Presets");
    println!("─────────────────────");
    println!();

    let db = PresetDatabase::with_defaults();
    for name in db.names() {
        if let Some(preset) = db.get(name) {
            let structural = preset.physics.springs.structural;
            println!(
                "{:<14} k = {:<7} {}",
                preset.name, structural.stiffness, preset.description
            );
        }
    }

    Ok(())
}

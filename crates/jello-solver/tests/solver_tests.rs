//! Integration tests for jello-solver.

use jello_lattice::{Lattice, Vec3};
use jello_solver::config::{
    CollisionParams, HookeMode, PhysicsParams, SimulationConfig, SpringCoefficients, SpringParams,
};
use jello_solver::euler::ExplicitEuler;
use jello_solver::forces::{floor_force, spring_force, SpringForceEvaluator};
use jello_solver::presets::PresetDatabase;
use jello_solver::rk4::RungeKutta4;
use jello_solver::springs::{spring_offsets, SpringClass};
use jello_solver::strategy::{IntegratorKind, IntegratorStrategy};
use jello_types::{GridCoord, GridOffset};

// ─── Helpers ──────────────────────────────────────────────────

/// Structural springs only, no gravity, floor far below.
fn structural_params(stiffness: f32, damping: f32, mass: f32) -> PhysicsParams {
    PhysicsParams {
        mass,
        gravity: [0.0; 3],
        springs: SpringParams::structural_only(stiffness, damping),
        collision: CollisionParams {
            floor_height: -100.0,
            ..CollisionParams::default()
        },
        hooke_mode: HookeMode::Corrected,
    }
}

/// Resolution-1 lattice with the `j = 1` column shifted along +X.
fn stretched_cell(stretch: f32) -> Lattice {
    let mut lattice = Lattice::build(1);
    for idx in 0..lattice.point_count() {
        if lattice.coord(idx).j == 1 {
            lattice.positions[idx].x += stretch;
        }
    }
    lattice
}

fn max_error(lattice: &Lattice, expected: impl Fn(GridCoord) -> f32) -> f32 {
    (0..lattice.point_count())
        .map(|idx| (lattice.positions[idx].x - expected(lattice.coord(idx))).abs())
        .fold(0.0f32, f32::max)
}

// ─── Spring Table Tests ───────────────────────────────────────

#[test]
fn offset_table_counts() {
    let table = spring_offsets();
    assert_eq!(table.len(), 32);
    let count = |class| table.iter().filter(|e| e.class == class).count();
    assert_eq!(count(SpringClass::Structural), 6);
    assert_eq!(count(SpringClass::Shear), 12);
    assert_eq!(count(SpringClass::Diagonal), 8);
    assert_eq!(count(SpringClass::Bend), 6);
}

#[test]
fn offset_table_is_symmetric() {
    let table = spring_offsets();
    for entry in &table {
        let reversed = entry.offset.reversed();
        assert!(
            table.iter().any(|e| e.offset == reversed && e.class == entry.class),
            "missing reverse of {:?}",
            entry.offset
        );
    }
}

#[test]
fn classify_rejects_non_springs() {
    assert_eq!(SpringClass::classify(GridOffset::new(0, 0, 0)), None);
    assert_eq!(SpringClass::classify(GridOffset::new(2, 1, 0)), None);
    assert_eq!(SpringClass::classify(GridOffset::new(2, 2, 0)), None);
    assert_eq!(
        SpringClass::classify(GridOffset::new(0, -2, 0)),
        Some(SpringClass::Bend)
    );
}

#[test]
fn spring_counts_single_cell() {
    let lattice = Lattice::build(1);
    let eval = SpringForceEvaluator::for_lattice(&lattice, &PhysicsParams::default());
    assert_eq!(eval.spring_count(SpringClass::Structural), 12);
    assert_eq!(eval.spring_count(SpringClass::Shear), 12);
    assert_eq!(eval.spring_count(SpringClass::Diagonal), 4);
    assert_eq!(eval.spring_count(SpringClass::Bend), 0);
}

#[test]
fn spring_counts_resolution_two() {
    let lattice = Lattice::build(2);
    let eval = SpringForceEvaluator::for_lattice(&lattice, &PhysicsParams::default());
    assert_eq!(eval.spring_count(SpringClass::Structural), 54);
    assert_eq!(eval.spring_count(SpringClass::Shear), 72);
    assert_eq!(eval.spring_count(SpringClass::Diagonal), 32);
    assert_eq!(eval.spring_count(SpringClass::Bend), 27);
}

#[test]
fn disabled_classes_are_skipped() {
    let lattice = Lattice::build(2);
    let eval = SpringForceEvaluator::for_lattice(&lattice, &structural_params(10.0, 0.0, 1.0));
    assert_eq!(eval.active_offsets(), 6);
}

// ─── Force Tests ──────────────────────────────────────────────

#[test]
fn hooke_restores_toward_rest() {
    let coeffs = SpringCoefficients::new(10.0, 0.0);
    let f = spring_force(
        Vec3::new(1.5, 0.0, 0.0),
        Vec3::ZERO,
        Vec3::ZERO,
        Vec3::ZERO,
        1.0,
        coeffs,
        HookeMode::Corrected,
    );
    assert!((f - Vec3::new(-5.0, 0.0, 0.0)).length() < 1e-5);

    let f = spring_force(
        Vec3::new(0.5, 0.0, 0.0),
        Vec3::ZERO,
        Vec3::ZERO,
        Vec3::ZERO,
        1.0,
        coeffs,
        HookeMode::Corrected,
    );
    assert!((f - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-5);
}

#[test]
fn legacy_hooke_acts_as_zero_rest_length() {
    // Rest length 1 is ignored: the pull is -k·d at every extension.
    let coeffs = SpringCoefficients::new(10.0, 0.0);
    for (x, expected) in [(0.5f32, -5.0f32), (1.0, -10.0), (1.5, -15.0)] {
        let f = spring_force(
            Vec3::new(x, 0.0, 0.0),
            Vec3::ZERO,
            Vec3::ZERO,
            Vec3::ZERO,
            1.0,
            coeffs,
            HookeMode::Legacy,
        );
        assert!((f - Vec3::new(expected, 0.0, 0.0)).length() < 1e-5, "x={x}: {f:?}");
    }

    let f = spring_force(
        Vec3::new(0.0, 0.3, 0.4),
        Vec3::ZERO,
        Vec3::ZERO,
        Vec3::ZERO,
        2.0,
        coeffs,
        HookeMode::Legacy,
    );
    assert!((f - Vec3::new(0.0, -3.0, -4.0)).length() < 1e-5, "{f:?}");
}

#[test]
fn legacy_hooke_keeps_axial_damping() {
    let coeffs = SpringCoefficients::new(10.0, 3.0);
    let f = spring_force(
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::ZERO,
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::ZERO,
        1.0,
        coeffs,
        HookeMode::Legacy,
    );
    assert!((f - Vec3::new(-13.0, 0.0, 0.0)).length() < 1e-5, "{f:?}");
}

#[test]
fn damping_opposes_axial_motion_only() {
    let coeffs = SpringCoefficients::new(0.0, 3.0);
    let f = spring_force(
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::ZERO,
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::ZERO,
        1.0,
        coeffs,
        HookeMode::Corrected,
    );
    assert!((f - Vec3::new(-3.0, 0.0, 0.0)).length() < 1e-5);

    let f = spring_force(
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::ZERO,
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::ZERO,
        1.0,
        coeffs,
        HookeMode::Corrected,
    );
    assert!(f.length() < 1e-6);
}

#[test]
fn coincident_points_exert_nothing() {
    let f = spring_force(
        Vec3::ONE,
        Vec3::ONE,
        Vec3::X,
        Vec3::ZERO,
        1.0,
        SpringCoefficients::new(100.0, 1.0),
        HookeMode::Corrected,
    );
    assert_eq!(f, Vec3::ZERO);
}

#[test]
fn floor_pushes_up_when_penetrating() {
    let collision = CollisionParams {
        stiffness: 100.0,
        damping: 10.0,
        floor_height: -2.0,
    };
    let f = floor_force(Vec3::new(0.0, -2.1, 0.0), Vec3::new(0.0, -1.0, 0.0), &collision);
    assert!((f.y - 20.0).abs() < 1e-3);
    assert_eq!(f.x, 0.0);
    assert_eq!(f.z, 0.0);

    let f = floor_force(Vec3::new(0.0, -1.9, 0.0), Vec3::new(0.0, -1.0, 0.0), &collision);
    assert_eq!(f, Vec3::ZERO);
}

#[test]
fn rest_lattice_is_in_equilibrium() {
    let lattice = Lattice::build(4);
    let params = PhysicsParams::default().without_gravity();
    let eval = SpringForceEvaluator::for_lattice(&lattice, &params);
    let acc = eval.compute_accelerations(&lattice.positions, &lattice.velocities);

    assert_eq!(acc.len(), lattice.point_count());
    for (idx, a) in acc.iter().enumerate() {
        assert!(a.length() < 1e-2, "point {idx}: {a:?}");
    }
}

#[test]
fn legacy_mode_breaks_equilibrium_at_boundary() {
    let lattice = Lattice::build(2);
    let params = PhysicsParams {
        hooke_mode: HookeMode::Legacy,
        ..PhysicsParams::default().without_gravity()
    };
    let eval = SpringForceEvaluator::for_lattice(&lattice, &params);
    let acc = eval.compute_accelerations(&lattice.positions, &lattice.velocities);

    let corner = lattice.index(GridCoord::new(0, 0, 0));
    let center = lattice.index(GridCoord::new(1, 1, 1));
    assert!(acc[corner].length() > 1.0);
    // Every neighbor of a corner lies inward, so the zero-rest-length
    // springs pull it toward the center of the cube.
    assert!(acc[corner].dot(-lattice.positions[corner]) > 0.0);
    // Fully surrounded point: contributions cancel.
    assert!(acc[center].length() < 1e-2);
}

#[test]
fn evaluator_clamps_invalid_mass() {
    let lattice = Lattice::build(1);
    for mass in [0.0f32, -1.0, f32::NAN, f32::INFINITY] {
        let params = PhysicsParams {
            mass,
            ..PhysicsParams::default()
        };
        let eval = SpringForceEvaluator::for_lattice(&lattice, &params);
        assert_eq!(eval.params().mass, PhysicsParams::default().mass);

        let acc = eval.compute_accelerations(&lattice.positions, &lattice.velocities);
        for a in &acc {
            assert!(a.is_finite(), "mass {mass}: {a:?}");
            assert!((a.y + 9.81).abs() < 1e-2, "mass {mass}: {a:?}");
        }
    }
}

#[test]
fn evaluator_clamps_negative_coefficients() {
    let mut params = PhysicsParams::default();
    params.springs.shear = SpringCoefficients::new(-5.0, -1.0);
    params.collision.stiffness = -10.0;
    let eval = SpringForceEvaluator::new(2, 1.0, &params);
    assert_eq!(eval.params().springs.shear, SpringCoefficients::new(0.0, 0.0));
    assert_eq!(eval.params().collision.stiffness, 0.0);
    assert_eq!(eval.params(), &params.sanitized());
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "acceleration buffer does not match lattice")]
fn mismatched_acceleration_buffer_is_caught() {
    let lattice = Lattice::build(1);
    let eval = SpringForceEvaluator::for_lattice(&lattice, &PhysicsParams::default());
    let mut out = vec![Vec3::ZERO; 3];
    eval.compute_accelerations_into(&lattice.positions, &lattice.velocities, &mut out);
}

#[test]
fn gravity_accelerates_free_lattice() {
    let lattice = Lattice::build(2);
    let eval = SpringForceEvaluator::for_lattice(&lattice, &PhysicsParams::default());
    let acc = eval.compute_accelerations(&lattice.positions, &lattice.velocities);
    for a in &acc {
        assert!((a.y + 9.81).abs() < 1e-2, "{a:?}");
    }
}

#[test]
fn single_structural_spring_by_hand() {
    // k = 40, m = 2, stretch 0.1 → |a| = k·0.1 / m = 2.
    let lattice = stretched_cell(0.1);
    let eval = SpringForceEvaluator::for_lattice(&lattice, &structural_params(40.0, 5.0, 2.0));
    let acc = eval.compute_accelerations(&lattice.positions, &lattice.velocities);

    for (idx, a) in acc.iter().enumerate() {
        let expected = if lattice.coord(idx).j == 0 {
            Vec3::new(2.0, 0.0, 0.0)
        } else {
            Vec3::new(-2.0, 0.0, 0.0)
        };
        assert!((*a - expected).length() < 1e-4, "point {idx}: {a:?}");
    }
}

#[test]
fn elastic_energy_of_stretched_cell() {
    // Four x-springs stretched by 0.1: 4 × ½ · 40 · 0.01 = 0.8
    let lattice = stretched_cell(0.1);
    let eval = SpringForceEvaluator::for_lattice(&lattice, &structural_params(40.0, 0.0, 1.0));
    assert!((eval.elastic_energy(&lattice.positions) - 0.8).abs() < 1e-4);

    let rest = Lattice::build(1);
    assert!(eval.elastic_energy(&rest.positions) < 1e-10);
}

#[test]
fn floor_contacts_report_depth() {
    let mut lattice = Lattice::build(1);
    lattice.translate(Vec3::new(0.0, -1.6, 0.0));
    let eval = SpringForceEvaluator::for_lattice(&lattice, &PhysicsParams::default());
    let contacts = eval.floor_contacts(&lattice.positions);
    // Bottom layer sits at y = -2.1, floor at -2.0
    assert_eq!(contacts.count, 4);
    assert!((contacts.max_penetration - 0.1).abs() < 1e-5);
}

// ─── Integrator Tests ─────────────────────────────────────────

#[test]
fn euler_step_matches_hand_computation() {
    let mut lattice = stretched_cell(0.1);
    let before = lattice.positions.clone();
    let eval = SpringForceEvaluator::for_lattice(&lattice, &structural_params(40.0, 5.0, 2.0));

    let mut euler = ExplicitEuler::new();
    let result = euler.step(&mut lattice, &eval, 0.01);
    assert_eq!(result.evaluations, 1);

    // Zero initial velocity: positions unchanged, v = dt · a.
    assert_eq!(lattice.positions, before);
    for idx in 0..lattice.point_count() {
        let expected_vx = if lattice.coord(idx).j == 0 { 0.02 } else { -0.02 };
        let v = lattice.velocities[idx];
        assert!((v.x - expected_vx).abs() < 1e-6, "point {idx}: {v:?}");
        assert!(v.y.abs() < 1e-7 && v.z.abs() < 1e-7);
    }
    assert_eq!(euler.last_acceleration().len(), 8);
}

#[test]
fn euler_moves_with_pre_update_velocity() {
    let mut lattice = Lattice::build(1);
    lattice.set_uniform_velocity(Vec3::new(1.0, 0.0, 0.0));
    let before = lattice.positions.clone();
    let params = PhysicsParams::default();
    let eval = SpringForceEvaluator::for_lattice(&lattice, &params);

    ExplicitEuler::new().step(&mut lattice, &eval, 0.1);

    for (p, b) in lattice.positions.iter().zip(&before) {
        assert!(((*p - *b) - Vec3::new(0.1, 0.0, 0.0)).length() < 1e-6);
    }
    for v in &lattice.velocities {
        assert!((v.y + 0.981).abs() < 1e-3);
    }
}

#[test]
fn rk4_first_stage_is_euler_derivative() {
    let mut lattice = stretched_cell(0.1);
    for idx in 0..lattice.point_count() {
        lattice.velocities[idx] = Vec3::new(0.0, 0.1 * idx as f32, -0.05);
    }
    let params = structural_params(40.0, 5.0, 2.0);
    let eval = SpringForceEvaluator::for_lattice(&lattice, &params);
    let dt = 0.001;

    let acc = eval.compute_accelerations(&lattice.positions, &lattice.velocities);

    let mut euler_lattice = lattice.clone();
    ExplicitEuler::new().step(&mut euler_lattice, &eval, dt);

    let mut rk = RungeKutta4::new();
    let mut rk_lattice = lattice.clone();
    let result = rk.step(&mut rk_lattice, &eval, dt);
    assert_eq!(result.evaluations, 4);

    let k1 = &rk.stages()[0];
    for idx in 0..lattice.point_count() {
        assert_eq!(k1.dv[idx], dt * acc[idx]);
        assert_eq!(k1.dx[idx], dt * lattice.velocities[idx]);

        let euler_dv = euler_lattice.velocities[idx] - lattice.velocities[idx];
        assert!((euler_dv - k1.dv[idx]).length() < 1e-6);
        let euler_dx = euler_lattice.positions[idx] - lattice.positions[idx];
        assert!((euler_dx - k1.dx[idx]).length() < 1e-6);
    }
}

#[test]
fn rk4_stage_buffers_are_independent() {
    let mut lattice = stretched_cell(0.2);
    let eval = SpringForceEvaluator::for_lattice(&lattice, &structural_params(50.0, 0.0, 1.0));
    let mut rk = RungeKutta4::new();
    rk.step(&mut lattice, &eval, 0.05);

    let stages = rk.stages();
    for stage in stages {
        assert_eq!(stage.dx.len(), 8);
        assert_eq!(stage.dv.len(), 8);
    }
    // The stages see different intermediate states, so their
    // derivatives differ.
    assert_ne!(stages[0].dx, stages[1].dx);
    assert_ne!(stages[1].dv, stages[2].dv);
    assert_ne!(stages[2].dv, stages[3].dv);
}

#[test]
fn rk4_resizes_with_lattice() {
    let params = PhysicsParams::default();
    let mut rk = RungeKutta4::new();

    let mut small = Lattice::build(1);
    let eval = SpringForceEvaluator::for_lattice(&small, &params);
    rk.step(&mut small, &eval, 0.001);
    assert_eq!(rk.stages()[3].dx.len(), 8);

    let mut large = Lattice::build(3);
    let eval = SpringForceEvaluator::for_lattice(&large, &params);
    rk.step(&mut large, &eval, 0.001);
    assert_eq!(rk.stages()[3].dx.len(), 64);
}

#[test]
fn vanishing_dt_gives_vanishing_delta() {
    for kind in IntegratorKind::all() {
        let mut previous = f32::INFINITY;
        for dt in [1e-2f32, 1e-3, 1e-4, 1e-5] {
            let mut lattice = Lattice::build(1);
            lattice.set_uniform_velocity(Vec3::new(1.0, 0.5, 0.0));
            let before = lattice.positions.clone();
            let eval = SpringForceEvaluator::for_lattice(&lattice, &PhysicsParams::default());

            let mut integrator = kind.create();
            integrator.step(&mut lattice, &eval, dt);

            let delta = lattice
                .positions
                .iter()
                .zip(&before)
                .map(|(p, b)| (*p - *b).length())
                .fold(0.0f32, f32::max);
            assert!(delta < 2.0 * dt, "{}: dt={dt} delta={delta}", kind.name());
            assert!(delta < previous);
            previous = delta;
        }
    }
}

/// Integrates a stretched single cell (a harmonic oscillator along X
/// with ω = √(2k/m) = 10) and returns the worst position error against
/// the closed-form solution at `t_end`.
fn oscillator_error(kind: IntegratorKind, dt: f32, t_end: f32) -> f32 {
    let stretch = 0.4;
    let mut lattice = stretched_cell(stretch);
    let eval = SpringForceEvaluator::for_lattice(&lattice, &structural_params(50.0, 0.0, 1.0));
    let mut integrator = kind.create();

    let steps = (t_end / dt).round() as u32;
    for _ in 0..steps {
        integrator.step(&mut lattice, &eval, dt);
    }

    let omega = 10.0f64;
    let t = (steps as f64) * dt as f64;
    let half_gap = 0.5 * (1.0 + stretch as f64 * (omega * t).cos());
    let center = 0.2f64;
    max_error(&lattice, |c| {
        if c.j == 0 {
            (center - half_gap) as f32
        } else {
            (center + half_gap) as f32
        }
    })
}

#[test]
fn rk4_converges_faster_than_euler() {
    let t_end = 0.16;
    let euler_coarse = oscillator_error(IntegratorKind::ExplicitEuler, 0.04, t_end);
    let euler_fine = oscillator_error(IntegratorKind::ExplicitEuler, 0.02, t_end);
    let rk_coarse = oscillator_error(IntegratorKind::RungeKutta4, 0.04, t_end);
    let rk_fine = oscillator_error(IntegratorKind::RungeKutta4, 0.02, t_end);

    assert!(rk_coarse < euler_coarse);
    assert!(rk_fine < euler_fine);
    assert!(rk_fine < 1e-4, "rk4 fine error {rk_fine}");

    let euler_ratio = euler_coarse / euler_fine;
    let rk_ratio = rk_coarse / rk_fine;
    assert!(rk_ratio > 8.0, "rk4 ratio {rk_ratio}");
    assert!(rk_ratio > euler_ratio);
}

#[test]
fn rk4_keeps_rest_lattice_at_rest() {
    let mut lattice = Lattice::build(3);
    let params = PhysicsParams::default().without_gravity();
    let eval = SpringForceEvaluator::for_lattice(&lattice, &params);
    let mut rk = RungeKutta4::new();
    for _ in 0..100 {
        rk.step(&mut lattice, &eval, 0.001);
    }
    let rest = Lattice::build(3);
    for (p, r) in lattice.positions.iter().zip(&rest.positions) {
        assert!((*p - *r).length() < 1e-4);
    }
}

#[test]
fn integrator_kind_names() {
    assert_eq!(IntegratorKind::from_name("euler"), Some(IntegratorKind::ExplicitEuler));
    assert_eq!(IntegratorKind::from_name("rk4"), Some(IntegratorKind::RungeKutta4));
    assert_eq!(IntegratorKind::from_name("verlet"), None);
    for kind in IntegratorKind::all() {
        let integrator = kind.create();
        assert_eq!(integrator.kind(), *kind);
        assert_eq!(integrator.name(), kind.name());
        assert_eq!(IntegratorKind::from_name(kind.name()), Some(*kind));
    }
}

// ─── Config Tests ─────────────────────────────────────────────

#[test]
fn default_config_is_sane() {
    let config = SimulationConfig::default();
    assert_eq!(config.dt, 0.001);
    assert_eq!(config.resolution, 7);
    assert_eq!(config.sanitized(), config);
}

#[test]
fn sanitize_clamps_instead_of_rejecting() {
    let mut config = SimulationConfig::default();
    config.resolution = 0;
    config.dt = -1.0;
    config.steps_per_tick = 0;
    config.physics.mass = 0.0;
    config.physics.springs.bend.stiffness = -5.0;

    let clean = config.sanitized();
    assert_eq!(clean.resolution, 1);
    assert_eq!(clean.dt, 0.001);
    assert_eq!(clean.steps_per_tick, 1);
    assert!(clean.physics.mass > 0.0);
    assert_eq!(clean.physics.springs.bend.stiffness, 0.0);
}

#[test]
fn config_from_partial_toml() {
    let text = r#"
        resolution = 3
        integrator = "rk4"

        [physics]
        mass = 0.1
        hooke_mode = "legacy"

        [physics.springs.shear]
        stiffness = 10.0
        damping = 0.5
    "#;
    let config: SimulationConfig = toml::from_str(text).unwrap();
    assert_eq!(config.resolution, 3);
    assert_eq!(config.integrator, IntegratorKind::RungeKutta4);
    assert_eq!(config.dt, 0.001);
    assert_eq!(config.physics.mass, 0.1);
    assert_eq!(config.physics.hooke_mode, HookeMode::Legacy);
    assert_eq!(config.physics.springs.shear, SpringCoefficients::new(10.0, 0.5));
    assert_eq!(config.physics.springs.structural, SpringParams::default().structural);
}

#[test]
fn config_toml_round_trip_names() {
    let config = SimulationConfig {
        integrator: IntegratorKind::ExplicitEuler,
        ..SimulationConfig::default()
    };
    let text = toml::to_string(&config).unwrap();
    assert!(text.contains("explicit_euler"));
    let back: SimulationConfig = toml::from_str(&text).unwrap();
    assert_eq!(back, config);
}

// ─── Preset Tests ─────────────────────────────────────────────

#[test]
fn builtin_presets() {
    let db = PresetDatabase::with_defaults();
    assert_eq!(db.len(), 4);
    assert_eq!(db.names(), vec!["firm_jello", "jello", "rubber", "wobbly_jello"]);
    assert_eq!(db.physics("jello").unwrap(), PhysicsParams::default());
}

#[test]
fn unknown_preset_is_an_error() {
    let db = PresetDatabase::with_defaults();
    let err = db.physics("lime").unwrap_err();
    assert!(err.to_string().contains("lime"));
}

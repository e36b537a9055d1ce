use approx::{assert_abs_diff_eq, assert_relative_eq};
use asv_sim::config::vessel::SurveyCatamaran;
use asv_sim::models::{Actuator, Asv, Dimensions, MetacentricHeight, ThrustPolicy};
use asv_sim::physics::spectrum::{Discretisation, Spectrum};
use asv_sim::{
    Environment, ErrorKind, IntegratorKind, IrregularWave, RegularWave, SeaState,
    VehicleSpecification,
};
use nalgebra as na;
use std::f64::consts::TAU;
use test_case::test_case;

/// Fresh water, g = 9.81: a 1000 kg hull displacing 1 m³ floats at its design draft.
fn fresh_water() -> Environment {
    Environment::new(1000.0, 9.81, None).unwrap()
}

/// Metacentric height giving a roll/pitch restoring stiffness ρ·g·V·GM of 200 N⋅m/rad
/// for [`box_hull`] in [`fresh_water`].
const GM_FOR_STIFFNESS_200: f64 = 200.0 / (1000.0 * 9.81 * 1.0);

/// Neutrally buoyant box hull with the COG at the reference origin.
fn box_hull(damping: f64, gm: f64) -> VehicleSpecification {
    VehicleSpecification {
        mass: 1000.0,
        inertia: na::Matrix3::from_diagonal(&na::Vector3::new(500.0, 2000.0, 2000.0)),
        added_mass: na::Vector6::zeros(),
        dimensions: Dimensions {
            length: 5.0,
            breadth: 2.0,
            draft: 0.5,
        },
        cog: na::Vector3::zeros(),
        linear_damping: na::Vector6::repeat(damping),
        quadratic_damping: na::Vector6::zeros(),
        metacentric_height: MetacentricHeight {
            transverse: gm,
            longitudinal: gm,
        },
        displacement: 1.0,
        waterplane_coefficient: 0.8,
    }
}

fn thruster(
    name: &str,
    position: na::Vector3<f64>,
    direction: na::Vector3<f64>,
    thrust: f64,
) -> Actuator {
    Actuator::new(name, position, direction, ThrustPolicy::default())
        .and_then(|a| a.with_thrust(thrust))
        .unwrap()
}

fn irregular_sea(seed: u64) -> SeaState {
    SeaState::irregular(
        Environment::default(),
        IrregularWave {
            spectrum: Spectrum::Jonswap {
                hs: 1.0,
                tp: 6.0,
                gamma: 3.3,
            },
            direction: 0.6,
            discretisation: Discretisation::with_seed(seed),
        },
    )
    .unwrap()
}

fn catamaran(sea: &SeaState) -> Asv<'_> {
    let spec = SurveyCatamaran::specification();
    let mut thrusters = SurveyCatamaran::twin_thrusters().unwrap();
    for t in thrusters.iter_mut() {
        t.set_thrust(120.0).unwrap();
    }
    Asv::builder()
        .pose(spec.cog, na::Vector3::new(0.0, 0.0, 0.3))
        .specification(spec)
        .sea_state(sea)
        .actuators(thrusters)
        .build()
        .unwrap()
}

#[test]
fn zero_step_is_identity() {
    let sea = irregular_sea(3);
    let mut asv = catamaran(&sea);
    for _ in 0..20 {
        asv.advance(0.05).unwrap();
    }
    let before = asv.snapshot();
    let after = asv.advance(0.0).unwrap();

    assert_eq!(after.cog_position, before.cog_position);
    assert_eq!(after.attitude, before.attitude);
    assert_eq!(after.velocity, before.velocity);
    assert_eq!(after.time, before.time);
}

#[test_case(IntegratorKind::Rk4; "rk4")]
#[test_case(IntegratorKind::SemiImplicitEuler; "semi-implicit euler")]
fn floating_at_rest_stays_at_rest(integrator: IntegratorKind) {
    let sea = SeaState::still_water(fresh_water());
    let mut asv =
        Asv::new(box_hull(0.0, 0.0), na::Vector3::zeros(), na::Vector3::zeros(), &sea).unwrap();
    asv.set_integrator(integrator);

    for _ in 0..200 {
        let s = asv.advance(0.1).unwrap();
        assert_abs_diff_eq!(s.force, na::Vector6::zeros(), epsilon = 1e-9);
        assert_abs_diff_eq!(s.velocity, na::Vector6::zeros(), epsilon = 1e-12);
    }
    assert_abs_diff_eq!(asv.cog_position(), na::Vector3::zeros(), epsilon = 1e-12);
    assert_abs_diff_eq!(asv.attitude(), na::Vector3::zeros(), epsilon = 1e-12);
    assert_relative_eq!(asv.time(), 20.0, max_relative = 1e-12);
}

#[test]
fn damped_surge_approaches_terminal_speed() {
    let sea = SeaState::still_water(fresh_water());
    let spec = box_hull(50.0, GM_FOR_STIFFNESS_200);
    assert_relative_eq!(
        spec.restoring_stiffness(&fresh_water())[3],
        200.0,
        max_relative = 1e-12
    );
    let mut asv = Asv::new(spec, na::Vector3::zeros(), na::Vector3::zeros(), &sea).unwrap();
    asv.add_actuator(thruster("main", na::Vector3::zeros(), na::Vector3::x(), 100.0))
        .unwrap();

    let mut previous = 0.0;
    for _ in 0..10 {
        let s = asv.advance(1.0).unwrap();
        let surge = s.velocity[0];
        assert!(surge > previous);
        assert!(surge < 2.0);
        previous = surge;
    }
    // u(t) = 2·(1 − e^(−t/20))
    assert_relative_eq!(previous, 2.0 * (1.0 - (-0.5_f64).exp()), max_relative = 1e-4);
    assert_abs_diff_eq!(asv.velocity()[1], 0.0, epsilon = 1e-12);
    assert_abs_diff_eq!(asv.velocity()[5], 0.0, epsilon = 1e-12);
}

#[test_case(0.0, na::Vector2::new(0.5, 0.0), 0; "following current")]
#[test_case(std::f64::consts::FRAC_PI_2, na::Vector2::new(0.5, 0.0), 1; "beam current")]
fn unpowered_hull_drifts_with_current(heading: f64, current: na::Vector2<f64>, dof: usize) {
    let sea = SeaState::still_water(fresh_water());
    let mut asv = Asv::new(
        box_hull(50.0, GM_FOR_STIFFNESS_200),
        na::Vector3::zeros(),
        na::Vector3::new(0.0, 0.0, heading),
        &sea,
    )
    .unwrap();
    asv.set_ocean_current(current).unwrap();

    let mut previous = 0.0_f64;
    for _ in 0..200 {
        let s = asv.advance(1.0).unwrap();
        let speed = s.velocity[dof].abs();
        assert!(speed >= previous);
        assert!(speed <= current.norm() + 1e-9);
        previous = speed;
    }
    // Linear damping only: time constant m / c = 20 s
    assert_relative_eq!(previous, current.norm(), max_relative = 1e-3);

    let drift = asv.cog_position();
    let direction = na::Vector2::new(drift.x, drift.y).normalize();
    assert_abs_diff_eq!(direction, current.normalize(), epsilon = 1e-6);
}

#[test]
fn semi_implicit_euler_tracks_first_order_solution() {
    let sea = SeaState::still_water(fresh_water());
    let mut asv = Asv::builder()
        .specification(box_hull(50.0, 0.0))
        .sea_state(&sea)
        .actuators(vec![thruster("main", na::Vector3::zeros(), na::Vector3::x(), 100.0)])
        .integrator(IntegratorKind::SemiImplicitEuler)
        .build()
        .unwrap();

    for _ in 0..100 {
        asv.advance(0.1).unwrap();
    }
    assert_abs_diff_eq!(asv.velocity()[0], 2.0 * (1.0 - (-0.5_f64).exp()), epsilon = 5e-3);
    assert!(asv.cog_position().x > 0.0);
}

#[test]
fn heading_wraps_while_spinning() {
    let sea = SeaState::still_water(fresh_water());
    let mut asv = Asv::new(
        box_hull(50.0, 1.0),
        na::Vector3::zeros(),
        na::Vector3::new(0.0, 0.0, 7.0),
        &sea,
    )
    .unwrap();
    assert_abs_diff_eq!(asv.heading(), 7.0 - TAU, epsilon = 1e-12);

    // Lateral thruster forward of the COG: yaw moment +d·T
    asv.add_actuator(thruster("bow", na::Vector3::new(2.0, 0.0, 0.0), na::Vector3::y(), 50.0))
        .unwrap();

    let mut turned = 0.0;
    let mut last = asv.heading();
    for _ in 0..2000 {
        let s = asv.advance(0.1).unwrap();
        let heading = s.attitude[2];
        assert!((0.0..TAU).contains(&heading), "heading {} escaped [0, 2π)", heading);
        turned += asv_sim::numerics::euler::wrap_to_pi(heading - last);
        last = heading;
    }
    assert!(turned > 2.0 * TAU);
}

#[test]
fn zero_mass_is_rejected() {
    let sea = SeaState::default();
    let mut spec = box_hull(0.0, 0.0);
    spec.mass = 0.0;
    let err = Asv::new(spec, na::Vector3::zeros(), na::Vector3::zeros(), &sea)
        .err()
        .unwrap();
    assert_eq!(err.kind(), ErrorKind::InvalidSpecification);
}

#[test]
fn identical_regular_seas_are_bit_identical() {
    let wave = RegularWave {
        amplitude: 0.4,
        period: 5.0,
        direction: 1.1,
        phase: 0.3,
    };
    let a = SeaState::regular(Environment::default(), wave).unwrap();
    let b = SeaState::regular(Environment::default(), wave).unwrap();
    let spec = SurveyCatamaran::specification();
    let position = na::Vector3::new(3.0, -7.0, 0.0);

    for i in 0..50 {
        let t = i as f64 * 0.37;
        assert_eq!(
            a.elevation(t, position.x, position.y).unwrap(),
            b.elevation(t, position.x, position.y).unwrap()
        );
        assert_eq!(
            a.excitation(t, &position, 0.4, &spec).unwrap(),
            b.excitation(t, &position, 0.4, &spec).unwrap()
        );
    }
}

#[test]
fn irregular_seed_reproduces_force_history() {
    let first = irregular_sea(42);
    let second = irregular_sea(42);
    assert_eq!(first.components(), second.components());

    let run = |sea: &SeaState| -> Vec<na::Vector6<f64>> {
        let mut asv = catamaran(sea);
        (0..200).map(|_| asv.advance(0.05).unwrap().force).collect()
    };
    assert_eq!(run(&first), run(&second));

    let other = irregular_sea(43);
    assert_ne!(run(&first), run(&other));
}

#[test]
fn roll_oscillation_conserves_energy() {
    let sea = SeaState::still_water(fresh_water());
    let mut asv = Asv::new(
        box_hull(0.0, 1.0),
        na::Vector3::zeros(),
        na::Vector3::new(0.1, 0.0, 0.0),
        &sea,
    )
    .unwrap();
    let initial = asv.mechanical_energy();
    assert!(initial > 0.0);

    let mut min_heel = f64::MAX;
    for _ in 0..1000 {
        asv.advance(0.01).unwrap();
        min_heel = min_heel.min(asv.attitude()[0]);
    }
    // Swung through to the other side
    assert!(min_heel < -0.09);
    assert_relative_eq!(asv.mechanical_energy(), initial, max_relative = 1e-4);
}

#[test]
fn vehicles_share_a_sea_state_across_threads() {
    let sea = irregular_sea(11);

    let finals: Vec<na::Vector3<f64>> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    let mut asv = catamaran(&sea);
                    for _ in 0..100 {
                        asv.advance(0.05).unwrap();
                    }
                    asv.cog_position()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(finals.iter().all(|p| *p == finals[0]));
    assert!(finals[0].x > SurveyCatamaran::specification().cog.x);
}

#[test]
fn invalidated_vehicle_refuses_to_advance() {
    let sea = SeaState::still_water(fresh_water());
    let mut asv = Asv::new(
        box_hull(0.0, 1.0),
        na::Vector3::zeros(),
        na::Vector3::new(0.1, 0.0, 0.0),
        &sea,
    )
    .unwrap();

    let err = asv.advance(1e300).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FatalConfiguration);
    assert!(!asv.is_valid());

    let err = asv.advance(0.01).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidState);
    assert!(asv.last_error().is_some());
}

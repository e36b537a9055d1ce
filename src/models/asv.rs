//! The vehicle aggregate: one hull, its actuators and its evolving state.

use crate::error::{AsvError, AsvResult};
use crate::integrators::IntegratorKind;
use crate::models::actuator::Actuator;
use crate::models::specification::VehicleSpecification;
use crate::models::state::{DynamicsState, State};
use crate::numerics::euler::wrap_heading;
use crate::physics::dynamics::{AsvDynamics, Loads};
use crate::physics::energy::mechanical_energy;
use crate::physics::mass::MassMatrix;
use crate::physics::sea_state::SeaState;
use nalgebra as na;
use std::collections::BTreeMap;
use tracing::{debug, error, info, trace};

/// An autonomous surface vehicle.
///
/// Owns its specification and actuators; borrows the sea state, which may be
/// shared with other vehicles. Accessors return copies.
#[derive(Debug, Clone)]
pub struct Asv<'a> {
    spec: VehicleSpecification,
    actuators: BTreeMap<String, Actuator>,
    sea_state: &'a SeaState,
    mass: MassMatrix,
    state: State,
    loads: Loads,
    acceleration: na::Vector6<f64>,
    integrator: IntegratorKind,
    enforce_hull_bounds: bool,
    ocean_current: na::Vector2<f64>, // world frame, m/s
    invalidated: Option<String>,
    last_error: Option<String>,
}

impl<'a> Asv<'a> {
    /// Creates a vehicle at rest with its COG at `position` (world frame) and
    /// the given [heel, trim, heading].
    pub fn new(
        spec: VehicleSpecification,
        position: na::Vector3<f64>,
        attitude: na::Vector3<f64>,
        sea_state: &'a SeaState,
    ) -> AsvResult<Self> {
        spec.validate()?;
        if position.iter().chain(attitude.iter()).any(|v| !v.is_finite()) {
            return Err(AsvError::state("initial pose must be finite"));
        }
        let mass = MassMatrix::assemble(&spec)?;

        let mut attitude = attitude;
        attitude[2] = wrap_heading(attitude[2]);

        info!(
            mass = spec.mass,
            length = spec.dimensions.length,
            sea = ?sea_state.wave_type(),
            "Vehicle initialized"
        );

        Ok(Asv {
            spec,
            actuators: BTreeMap::new(),
            sea_state,
            mass,
            state: State::new(position, attitude),
            loads: Loads::zero(),
            acceleration: na::Vector6::zeros(),
            integrator: IntegratorKind::default(),
            enforce_hull_bounds: false,
            ocean_current: na::Vector2::zeros(),
            invalidated: None,
            last_error: None,
        })
    }

    pub fn builder() -> AsvBuilder<'a> {
        AsvBuilder::default()
    }

    /// Advances the simulation by `dt` seconds.
    ///
    /// On a non-finite result the vehicle is invalidated and every later
    /// call fails; the previous state is kept for inspection only.
    pub fn advance(&mut self, dt: f64) -> AsvResult<DynamicsState> {
        let result = self.step(dt);
        if let Err(e) = &result {
            self.last_error = Some(e.to_string());
        }
        result
    }

    fn step(&mut self, dt: f64) -> AsvResult<DynamicsState> {
        if let Some(reason) = &self.invalidated {
            return Err(AsvError::state(format!(
                "vehicle was invalidated by an earlier failure: {}",
                reason
            )));
        }
        if !(dt.is_finite() && dt >= 0.0) {
            return Err(AsvError::state(format!(
                "time step must be finite and non-negative, got {}",
                dt
            )));
        }

        let dynamics = AsvDynamics::new(
            &self.spec,
            self.sea_state,
            &self.mass,
            self.actuators.values(),
        )
        .with_current(na::Vector3::new(self.ocean_current.x, self.ocean_current.y, 0.0));
        let loads = dynamics.loads(&self.state);
        let acceleration = dynamics.acceleration(&loads);

        let mut next = self.integrator.step(dynamics, &self.state, dt);
        next.attitude[2] = wrap_heading(next.attitude[2]);

        if !next.is_finite() || acceleration.iter().any(|a| !a.is_finite()) {
            let reason = format!(
                "non-finite dynamics at t = {:.3} s (dt = {})",
                self.state.time, dt
            );
            error!(%reason, "Vehicle invalidated");
            self.invalidated = Some(reason.clone());
            return Err(AsvError::fatal(reason));
        }

        self.state = next;
        self.loads = loads;
        self.acceleration = acceleration;

        trace!(
            t = self.state.time,
            x = self.state.position.x,
            y = self.state.position.y,
            heading = self.state.heading(),
            surge = self.state.velocity[0],
            "Step complete"
        );

        Ok(self.snapshot())
    }

    pub fn snapshot(&self) -> DynamicsState {
        DynamicsState {
            cog_position: self.state.position,
            origin_position: self.origin_position(),
            attitude: self.state.attitude,
            velocity: self.state.velocity,
            acceleration: self.acceleration,
            force: self.loads.total(),
            time: self.state.time,
        }
    }

    // Actuators

    /// Replaces the whole actuator set. On error the previous set is kept.
    pub fn set_actuators(&mut self, actuators: Vec<Actuator>) -> AsvResult<()> {
        let result = self.build_actuator_map(actuators);
        match result {
            Ok(map) => {
                debug!(count = map.len(), "Actuator set replaced");
                self.actuators = map;
                Ok(())
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    fn build_actuator_map(
        &self,
        actuators: Vec<Actuator>,
    ) -> AsvResult<BTreeMap<String, Actuator>> {
        let mut map = BTreeMap::new();
        for actuator in actuators {
            self.check_mount(&actuator)?;
            let name = actuator.name().to_string();
            if map.insert(name.clone(), actuator).is_some() {
                return Err(AsvError::state(format!("duplicate actuator name '{}'", name)));
            }
        }
        Ok(map)
    }

    pub fn add_actuator(&mut self, actuator: Actuator) -> AsvResult<()> {
        let result = self.check_mount(&actuator).and_then(|_| {
            if self.actuators.contains_key(actuator.name()) {
                Err(AsvError::state(format!(
                    "duplicate actuator name '{}'",
                    actuator.name()
                )))
            } else {
                Ok(())
            }
        });
        if let Err(e) = result {
            self.last_error = Some(e.to_string());
            return Err(e);
        }
        debug!(name = actuator.name(), "Actuator added");
        self.actuators.insert(actuator.name().to_string(), actuator);
        Ok(())
    }

    pub fn remove_actuator(&mut self, name: &str) -> Option<Actuator> {
        let removed = self.actuators.remove(name);
        if removed.is_some() {
            debug!(name, "Actuator removed");
        }
        removed
    }

    pub fn set_thrust(&mut self, name: &str, thrust: f64) -> AsvResult<()> {
        let result = match self.actuators.get_mut(name) {
            Some(actuator) => actuator.set_thrust(thrust),
            None => Err(AsvError::state(format!("no actuator named '{}'", name))),
        };
        if let Err(e) = &result {
            self.last_error = Some(e.to_string());
        }
        result
    }

    fn check_mount(&self, actuator: &Actuator) -> AsvResult<()> {
        if self.enforce_hull_bounds && !actuator.within_hull(&self.spec) {
            return Err(AsvError::geometry(format!(
                "actuator '{}' at {:?} lies outside the hull",
                actuator.name(),
                actuator.position().as_slice()
            )));
        }
        Ok(())
    }

    // Configuration

    pub fn set_sea_state(&mut self, sea_state: &'a SeaState) {
        info!(sea = ?sea_state.wave_type(), "Sea state replaced");
        self.sea_state = sea_state;
    }

    pub fn set_integrator(&mut self, integrator: IntegratorKind) {
        self.integrator = integrator;
    }

    /// Sets the horizontal ocean current (world frame, m/s) the hull is
    /// damped against.
    pub fn set_ocean_current(&mut self, current: na::Vector2<f64>) -> AsvResult<()> {
        if current.iter().any(|c| !c.is_finite()) {
            let err = AsvError::state(format!(
                "ocean current must be finite, got {:?}",
                current.as_slice()
            ));
            self.last_error = Some(err.to_string());
            return Err(err);
        }
        debug!(east = current.x, north = current.y, "Ocean current set");
        self.ocean_current = current;
        Ok(())
    }

    /// Turns the hull-bounds check on mounts on or off. Already mounted
    /// actuators are checked when enabling.
    pub fn set_enforce_hull_bounds(&mut self, enforce: bool) -> AsvResult<()> {
        if enforce {
            if let Some(outside) = self
                .actuators
                .values()
                .find(|a| !a.within_hull(&self.spec))
            {
                let err = AsvError::geometry(format!(
                    "actuator '{}' lies outside the hull",
                    outside.name()
                ));
                self.last_error = Some(err.to_string());
                return Err(err);
            }
        }
        self.enforce_hull_bounds = enforce;
        Ok(())
    }

    // Accessors

    pub fn specification(&self) -> VehicleSpecification {
        self.spec.clone()
    }

    pub fn sea_state(&self) -> &'a SeaState {
        self.sea_state
    }

    pub fn integrator(&self) -> IntegratorKind {
        self.integrator
    }

    pub fn actuators(&self) -> Vec<Actuator> {
        self.actuators.values().cloned().collect()
    }

    pub fn actuator(&self, name: &str) -> Option<Actuator> {
        self.actuators.get(name).cloned()
    }

    pub fn actuator_count(&self) -> usize {
        self.actuators.len()
    }

    pub fn mass_matrix(&self) -> na::Matrix6<f64> {
        self.mass.matrix()
    }

    /// Net body-frame force/moment that drove the most recent step.
    pub fn force(&self) -> na::Vector6<f64> {
        self.loads.total()
    }

    pub fn loads(&self) -> Loads {
        self.loads
    }

    pub fn acceleration(&self) -> na::Vector6<f64> {
        self.acceleration
    }

    pub fn velocity(&self) -> na::Vector6<f64> {
        self.state.velocity
    }

    /// [heel, trim, heading] in radians, heading in [0, 2π).
    pub fn attitude(&self) -> na::Vector3<f64> {
        self.state.attitude
    }

    pub fn heading(&self) -> f64 {
        self.state.heading()
    }

    pub fn cog_position(&self) -> na::Vector3<f64> {
        self.state.position
    }

    pub fn origin_position(&self) -> na::Vector3<f64> {
        self.state.origin_position(&self.spec.cog)
    }

    pub fn time(&self) -> f64 {
        self.state.time
    }

    pub fn ocean_current(&self) -> na::Vector2<f64> {
        self.ocean_current
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_valid(&self) -> bool {
        self.invalidated.is_none()
    }

    /// Message of the most recent failed operation on this vehicle.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Kinetic plus hydrostatic potential energy of the current state.
    pub fn mechanical_energy(&self) -> f64 {
        mechanical_energy(
            &self.spec,
            &self.mass,
            self.sea_state.environment(),
            &self.state,
        )
    }
}

/// Step-by-step construction of an [`Asv`].
#[derive(Debug)]
pub struct AsvBuilder<'a> {
    spec: Option<VehicleSpecification>,
    sea_state: Option<&'a SeaState>,
    position: na::Vector3<f64>,
    attitude: na::Vector3<f64>,
    actuators: Vec<Actuator>,
    integrator: IntegratorKind,
    enforce_hull_bounds: bool,
    ocean_current: na::Vector2<f64>,
}

impl Default for AsvBuilder<'_> {
    fn default() -> Self {
        AsvBuilder {
            spec: None,
            sea_state: None,
            position: na::Vector3::zeros(),
            attitude: na::Vector3::zeros(),
            actuators: Vec::new(),
            integrator: IntegratorKind::default(),
            enforce_hull_bounds: false,
            ocean_current: na::Vector2::zeros(),
        }
    }
}

impl<'a> AsvBuilder<'a> {
    pub fn specification(mut self, spec: VehicleSpecification) -> Self {
        self.spec = Some(spec);
        self
    }

    pub fn sea_state(mut self, sea_state: &'a SeaState) -> Self {
        self.sea_state = Some(sea_state);
        self
    }

    pub fn pose(mut self, position: na::Vector3<f64>, attitude: na::Vector3<f64>) -> Self {
        self.position = position;
        self.attitude = attitude;
        self
    }

    pub fn actuators(mut self, actuators: Vec<Actuator>) -> Self {
        self.actuators = actuators;
        self
    }

    pub fn integrator(mut self, integrator: IntegratorKind) -> Self {
        self.integrator = integrator;
        self
    }

    pub fn enforce_hull_bounds(mut self, enforce: bool) -> Self {
        self.enforce_hull_bounds = enforce;
        self
    }

    pub fn ocean_current(mut self, current: na::Vector2<f64>) -> Self {
        self.ocean_current = current;
        self
    }

    pub fn build(self) -> AsvResult<Asv<'a>> {
        let spec = self
            .spec
            .ok_or_else(|| AsvError::not_initialized("vehicle has no specification"))?;
        let sea_state = self
            .sea_state
            .ok_or_else(|| AsvError::not_initialized("vehicle has no sea state"))?;

        let mut asv = Asv::new(spec, self.position, self.attitude, sea_state)?;
        asv.integrator = self.integrator;
        asv.enforce_hull_bounds = self.enforce_hull_bounds;
        asv.set_ocean_current(self.ocean_current)?;
        asv.set_actuators(self.actuators)?;
        Ok(asv)
    }
}

//! TOML scenario files for the command-line runner.
//!
//! Every section has a default taken from [`SurveyCatamaran`], so a scenario
//! only needs to name what it changes. Angles are written in degrees and
//! converted to radians on the way into the core types.

use crate::config::vessel::SurveyCatamaran;
use crate::constants::{SEAWATER_DENSITY, STANDARD_GRAVITY};
use crate::error::AsvError;
use crate::integrators::IntegratorKind;
use crate::models::actuator::{Actuator, ThrustPolicy};
use crate::models::asv::Asv;
use crate::models::specification::{Dimensions, MetacentricHeight, VehicleSpecification};
use crate::physics::environment::Environment;
use crate::physics::sea_state::{IrregularWave, RegularWave, SeaState};
use crate::physics::spectrum::{Discretisation, Spectrum};
use nalgebra as na;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read scenario {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed scenario: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid scenario: {0}")]
    Model(#[from] AsvError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub simulation: SimulationConfig,
    pub environment: EnvironmentConfig,
    pub vehicle: VehicleConfig,
    pub initial: PoseConfig,
    pub actuators: Vec<ActuatorConfig>,
    pub sea_state: SeaStateConfig,
    pub autopilot: Option<AutopilotConfig>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        ScenarioConfig {
            simulation: SimulationConfig::default(),
            environment: EnvironmentConfig::default(),
            vehicle: VehicleConfig::default(),
            initial: PoseConfig::default(),
            actuators: ActuatorConfig::twin_thrusters(),
            sea_state: SeaStateConfig::StillWater,
            autopilot: None,
        }
    }
}

impl ScenarioConfig {
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn sea_state(&self) -> ConfigResult<SeaState> {
        let env = self.environment.to_environment()?;
        self.sea_state.to_sea_state(env)
    }

    /// Builds the vehicle described by this scenario, floating in `sea_state`.
    pub fn build_vehicle<'a>(&self, sea_state: &'a SeaState) -> ConfigResult<Asv<'a>> {
        let actuators = self
            .actuators
            .iter()
            .map(ActuatorConfig::to_actuator)
            .collect::<Result<Vec<_>, _>>()?;

        let asv = Asv::builder()
            .specification(self.vehicle.to_specification())
            .sea_state(sea_state)
            .pose(self.initial.position(), self.initial.attitude())
            .actuators(actuators)
            .integrator(self.simulation.integrator.into())
            .enforce_hull_bounds(self.simulation.enforce_hull_bounds)
            .ocean_current(na::Vector2::from(self.environment.current))
            .build()?;
        Ok(asv)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorChoice {
    Rk4,
    SemiImplicitEuler,
}

impl From<IntegratorChoice> for IntegratorKind {
    fn from(choice: IntegratorChoice) -> Self {
        match choice {
            IntegratorChoice::Rk4 => IntegratorKind::Rk4,
            IntegratorChoice::SemiImplicitEuler => IntegratorKind::SemiImplicitEuler,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub dt: f64,    // s
    pub steps: usize,
    pub integrator: IntegratorChoice,
    /// Write one CSV row every `record_every` steps.
    pub record_every: usize,
    pub enforce_hull_bounds: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            dt: 0.05,
            steps: 2400,
            integrator: IntegratorChoice::Rk4,
            record_every: 10,
            enforce_hull_bounds: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub water_density: f64, // kg/m³
    pub gravity: f64,       // m/s²
    pub depth: Option<f64>, // m, absent for deep water
    /// Horizontal ocean current, world frame [east, north] in m/s.
    pub current: [f64; 2],
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        EnvironmentConfig {
            water_density: SEAWATER_DENSITY,
            gravity: STANDARD_GRAVITY,
            depth: None,
            current: [0.0, 0.0],
        }
    }
}

impl EnvironmentConfig {
    pub fn to_environment(&self) -> Result<Environment, AsvError> {
        Environment::new(self.water_density, self.gravity, self.depth)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleConfig {
    pub mass: f64,
    /// Rigid-body inertia about the COG, row-major.
    pub inertia: [[f64; 3]; 3],
    pub added_mass: [f64; 6],
    pub length: f64,
    pub breadth: f64,
    pub draft: f64,
    pub cog: [f64; 3],
    pub linear_damping: [f64; 6],
    pub quadratic_damping: [f64; 6],
    pub gm_transverse: f64,
    pub gm_longitudinal: f64,
    pub displacement: f64,
    pub waterplane_coefficient: f64,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        VehicleConfig::from(&SurveyCatamaran::specification())
    }
}

impl From<&VehicleSpecification> for VehicleConfig {
    fn from(spec: &VehicleSpecification) -> Self {
        let mut inertia = [[0.0; 3]; 3];
        for (i, row) in inertia.iter_mut().enumerate() {
            for (j, value) in row.iter_mut().enumerate() {
                *value = spec.inertia[(i, j)];
            }
        }
        VehicleConfig {
            mass: spec.mass,
            inertia,
            added_mass: six(&spec.added_mass),
            length: spec.dimensions.length,
            breadth: spec.dimensions.breadth,
            draft: spec.dimensions.draft,
            cog: [spec.cog.x, spec.cog.y, spec.cog.z],
            linear_damping: six(&spec.linear_damping),
            quadratic_damping: six(&spec.quadratic_damping),
            gm_transverse: spec.metacentric_height.transverse,
            gm_longitudinal: spec.metacentric_height.longitudinal,
            displacement: spec.displacement,
            waterplane_coefficient: spec.waterplane_coefficient,
        }
    }
}

impl VehicleConfig {
    /// Unvalidated; the vehicle constructor rejects non-physical values.
    pub fn to_specification(&self) -> VehicleSpecification {
        let i = &self.inertia;
        VehicleSpecification {
            mass: self.mass,
            inertia: na::Matrix3::new(
                i[0][0], i[0][1], i[0][2], i[1][0], i[1][1], i[1][2], i[2][0], i[2][1], i[2][2],
            ),
            added_mass: na::Vector6::from_row_slice(&self.added_mass),
            dimensions: Dimensions {
                length: self.length,
                breadth: self.breadth,
                draft: self.draft,
            },
            cog: na::Vector3::from(self.cog),
            linear_damping: na::Vector6::from_row_slice(&self.linear_damping),
            quadratic_damping: na::Vector6::from_row_slice(&self.quadratic_damping),
            metacentric_height: MetacentricHeight {
                transverse: self.gm_transverse,
                longitudinal: self.gm_longitudinal,
            },
            displacement: self.displacement,
            waterplane_coefficient: self.waterplane_coefficient,
        }
    }
}

fn six(v: &na::Vector6<f64>) -> [f64; 6] {
    [v[0], v[1], v[2], v[3], v[4], v[5]]
}

/// Initial COG position (world frame, m) and attitude (degrees).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoseConfig {
    pub position: [f64; 3],
    pub heel_deg: f64,
    pub trim_deg: f64,
    pub heading_deg: f64,
}

impl Default for PoseConfig {
    fn default() -> Self {
        let cog = SurveyCatamaran::specification().cog;
        PoseConfig {
            position: [cog.x, cog.y, cog.z],
            heel_deg: 0.0,
            trim_deg: 0.0,
            heading_deg: 0.0,
        }
    }
}

impl PoseConfig {
    pub fn position(&self) -> na::Vector3<f64> {
        na::Vector3::from(self.position)
    }

    pub fn attitude(&self) -> na::Vector3<f64> {
        na::Vector3::new(
            self.heel_deg.to_radians(),
            self.trim_deg.to_radians(),
            self.heading_deg.to_radians(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActuatorConfig {
    pub name: String,
    pub position: [f64; 3],
    pub orientation: [f64; 3],
    #[serde(default)]
    pub thrust: f64,
    #[serde(default = "allow_reverse_default")]
    pub allow_reverse: bool,
    #[serde(default)]
    pub max_thrust: Option<f64>,
}

fn allow_reverse_default() -> bool {
    true
}

impl ActuatorConfig {
    fn twin_thrusters() -> Vec<ActuatorConfig> {
        let policy = SurveyCatamaran::thrust_policy();
        [("port", 0.9), ("starboard", -0.9)]
            .into_iter()
            .map(|(name, y)| ActuatorConfig {
                name: name.to_string(),
                position: [-2.2, y, -0.25],
                orientation: [1.0, 0.0, 0.0],
                thrust: 150.0,
                allow_reverse: policy.allow_reverse,
                max_thrust: policy.max_thrust,
            })
            .collect()
    }

    pub fn to_actuator(&self) -> Result<Actuator, AsvError> {
        let policy = ThrustPolicy {
            allow_reverse: self.allow_reverse,
            max_thrust: self.max_thrust,
        };
        Actuator::new(
            self.name.clone(),
            na::Vector3::from(self.position),
            na::Vector3::from(self.orientation),
            policy,
        )?
        .with_thrust(self.thrust)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SeaStateConfig {
    StillWater,
    RegularWave {
        amplitude: f64,
        period: f64,
        #[serde(default)]
        direction_deg: f64,
        #[serde(default)]
        phase_deg: f64,
    },
    IrregularWave {
        spectrum: SpectrumConfig,
        #[serde(default)]
        direction_deg: f64,
        #[serde(default = "bins_default")]
        bins: usize,
        #[serde(default = "directions_default")]
        directions: usize,
        #[serde(default)]
        seed: u64,
        #[serde(default)]
        omega_min: Option<f64>,
        #[serde(default)]
        omega_max: Option<f64>,
    },
}

fn bins_default() -> usize {
    crate::constants::DEFAULT_SPECTRAL_BINS
}

fn directions_default() -> usize {
    1
}

impl SeaStateConfig {
    pub fn to_sea_state(&self, env: Environment) -> ConfigResult<SeaState> {
        let sea = match *self {
            SeaStateConfig::StillWater => SeaState::still_water(env),
            SeaStateConfig::RegularWave {
                amplitude,
                period,
                direction_deg,
                phase_deg,
            } => SeaState::regular(
                env,
                RegularWave {
                    amplitude,
                    period,
                    direction: direction_deg.to_radians(),
                    phase: phase_deg.to_radians(),
                },
            )?,
            SeaStateConfig::IrregularWave {
                spectrum,
                direction_deg,
                bins,
                directions,
                seed,
                omega_min,
                omega_max,
            } => SeaState::irregular(
                env,
                IrregularWave {
                    spectrum: spectrum.into(),
                    direction: direction_deg.to_radians(),
                    discretisation: Discretisation {
                        bins,
                        directions,
                        omega_min,
                        omega_max,
                        seed,
                    },
                },
            )?,
        };
        Ok(sea)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpectrumConfig {
    PiersonMoskowitz {
        hs: f64,
        tp: f64,
    },
    Jonswap {
        hs: f64,
        tp: f64,
        #[serde(default = "gamma_default")]
        gamma: f64,
    },
}

fn gamma_default() -> f64 {
    3.3
}

impl From<SpectrumConfig> for Spectrum {
    fn from(config: SpectrumConfig) -> Self {
        match config {
            SpectrumConfig::PiersonMoskowitz { hs, tp } => Spectrum::PiersonMoskowitz { hs, tp },
            SpectrumConfig::Jonswap { hs, tp, gamma } => Spectrum::Jonswap { hs, tp, gamma },
        }
    }
}

/// Heading hold on a pair of actuators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutopilotConfig {
    pub target_heading_deg: f64,
    pub surge_thrust: f64, // N, shared between both actuators
    pub kp: f64,
    pub kd: f64,
    pub max_moment: f64, // N⋅m
    pub port: String,
    pub starboard: String,
}

use crate::error::{AsvError, AsvResult};
use crate::models::specification::VehicleSpecification;
use crate::physics::environment::Environment;
use crate::physics::spectrum::{discretise, Discretisation, Spectrum};
use crate::physics::waves::WaveComponent;
use nalgebra as na;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaveType {
    StillWater,
    RegularWave,
    IrregularWave,
}

/// Parameters of a single-frequency sea.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegularWave {
    pub amplitude: f64, // m
    pub period: f64,    // s
    pub direction: f64, // rad, direction of travel
    pub phase: f64,     // rad
}

/// Parameters of a spectral sea.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrregularWave {
    pub spectrum: Spectrum,
    pub direction: f64, // rad, mean direction of travel
    pub discretisation: Discretisation,
}

/// Immutable description of the sea around one or more vehicles.
///
/// The wave components are fixed at construction; queries only read them, so
/// a `SeaState` can be shared by reference between vehicles and threads.
#[derive(Debug, Clone, PartialEq)]
pub struct SeaState {
    environment: Environment,
    wave_type: WaveType,
    components: Vec<WaveComponent>,
}

impl SeaState {
    pub fn still_water(environment: Environment) -> Self {
        SeaState {
            environment,
            wave_type: WaveType::StillWater,
            components: Vec::new(),
        }
    }

    pub fn regular(environment: Environment, wave: RegularWave) -> AsvResult<Self> {
        if !(wave.amplitude.is_finite() && wave.amplitude >= 0.0) {
            return Err(AsvError::specification(format!(
                "wave amplitude must be non-negative, got {}",
                wave.amplitude
            )));
        }
        if !(wave.period.is_finite() && wave.period > 0.0) {
            return Err(AsvError::specification(format!(
                "wave period must be positive, got {}",
                wave.period
            )));
        }
        if !(wave.direction.is_finite() && wave.phase.is_finite()) {
            return Err(AsvError::specification("wave direction and phase must be finite"));
        }

        let omega = std::f64::consts::TAU / wave.period;
        let component =
            WaveComponent::new(wave.amplitude, omega, wave.direction, wave.phase, &environment);
        info!(
            amplitude = wave.amplitude,
            period = wave.period,
            wavelength = component.wavelength(),
            "Regular sea state created"
        );

        Ok(SeaState {
            environment,
            wave_type: WaveType::RegularWave,
            components: vec![component],
        })
    }

    pub fn irregular(environment: Environment, wave: IrregularWave) -> AsvResult<Self> {
        if !wave.direction.is_finite() {
            return Err(AsvError::specification("mean wave direction must be finite"));
        }
        let components = discretise(
            &wave.spectrum,
            &wave.discretisation,
            wave.direction,
            &environment,
        )?;
        info!(
            hs = wave.spectrum.significant_height(),
            tp = wave.spectrum.peak_period(),
            bins = components.len(),
            seed = wave.discretisation.seed,
            "Irregular sea state created"
        );

        Ok(SeaState {
            environment,
            wave_type: WaveType::IrregularWave,
            components,
        })
    }

    pub fn wave_type(&self) -> WaveType {
        self.wave_type
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn components(&self) -> &[WaveComponent] {
        &self.components
    }

    /// Surface elevation (m, + up) at world time `t` and horizontal position.
    pub fn elevation(&self, t: f64, x: f64, y: f64) -> AsvResult<f64> {
        check_time(t)?;
        Ok(self.elevation_at(t, x, y))
    }

    /// Body-frame excitation on a hull whose COG sits at `position` with
    /// heading `heading`.
    pub fn excitation(
        &self,
        t: f64,
        position: &na::Vector3<f64>,
        heading: f64,
        spec: &VehicleSpecification,
    ) -> AsvResult<na::Vector6<f64>> {
        check_time(t)?;
        Ok(self.excitation_at(t, position, heading, spec))
    }

    pub(crate) fn elevation_at(&self, t: f64, x: f64, y: f64) -> f64 {
        self.components.iter().map(|c| c.elevation(t, x, y)).sum()
    }

    pub(crate) fn excitation_at(
        &self,
        t: f64,
        position: &na::Vector3<f64>,
        heading: f64,
        spec: &VehicleSpecification,
    ) -> na::Vector6<f64> {
        self.components
            .iter()
            .fold(na::Vector6::zeros(), |sum, c| {
                sum + c.excitation(t, position, heading, spec, &self.environment)
            })
    }
}

impl Default for SeaState {
    fn default() -> Self {
        SeaState::still_water(Environment::default())
    }
}

fn check_time(t: f64) -> AsvResult<()> {
    if !(t.is_finite() && t >= 0.0) {
        return Err(AsvError::state(format!(
            "sea state queried at invalid time {}",
            t
        )));
    }
    Ok(())
}

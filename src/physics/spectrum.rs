//! Wave energy spectra and their discretisation into wave components.

use crate::constants::*;
use crate::error::{AsvError, AsvResult};
use crate::physics::environment::Environment;
use crate::physics::waves::WaveComponent;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// One-sided wave spectral density S(ω) in m²⋅s/rad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Spectrum {
    /// Fully developed sea, parameterised by significant wave height and peak period.
    PiersonMoskowitz { hs: f64, tp: f64 },
    /// Fetch-limited sea with peak enhancement factor `gamma` (3.3 is typical).
    Jonswap { hs: f64, tp: f64, gamma: f64 },
}

impl Spectrum {
    pub fn significant_height(&self) -> f64 {
        match *self {
            Spectrum::PiersonMoskowitz { hs, .. } | Spectrum::Jonswap { hs, .. } => hs,
        }
    }

    pub fn peak_period(&self) -> f64 {
        match *self {
            Spectrum::PiersonMoskowitz { tp, .. } | Spectrum::Jonswap { tp, .. } => tp,
        }
    }

    pub fn peak_frequency(&self) -> f64 {
        TWO_PI / self.peak_period()
    }

    pub fn validate(&self) -> AsvResult<()> {
        let hs = self.significant_height();
        let tp = self.peak_period();
        if !(hs.is_finite() && hs >= 0.0) {
            return Err(AsvError::specification(format!(
                "significant wave height must be non-negative, got {}",
                hs
            )));
        }
        if !(tp.is_finite() && tp > 0.0) {
            return Err(AsvError::specification(format!(
                "peak period must be positive, got {}",
                tp
            )));
        }
        if let Spectrum::Jonswap { gamma, .. } = *self {
            if !(gamma.is_finite() && gamma >= 1.0) {
                return Err(AsvError::specification(format!(
                    "JONSWAP peak enhancement must be at least 1, got {}",
                    gamma
                )));
            }
        }
        Ok(())
    }

    pub fn density(&self, omega: f64) -> f64 {
        if omega <= 0.0 {
            return 0.0;
        }
        let hs = self.significant_height();
        let wp = self.peak_frequency();
        let pm = 5.0 / 16.0 * hs * hs * wp.powi(4) / omega.powi(5)
            * (-1.25 * (wp / omega).powi(4)).exp();

        match *self {
            Spectrum::PiersonMoskowitz { .. } => pm,
            Spectrum::Jonswap { gamma, .. } => {
                let sigma = if omega <= wp { 0.07 } else { 0.09 };
                let r = (-(omega - wp).powi(2) / (2.0 * sigma * sigma * wp * wp)).exp();
                let normalisation = 1.0 - 0.287 * gamma.ln();
                normalisation * pm * gamma.powf(r)
            }
        }
    }
}

/// How a spectrum is cut into discrete components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Discretisation {
    pub bins: usize,
    /// Direction bands spread over ±90° about the mean direction with a
    /// cos² weighting. One band is a long-crested, unidirectional sea.
    pub directions: usize,
    /// Lower/upper frequency cut-offs in rad/s. `None` derives them from the peak.
    pub omega_min: Option<f64>,
    pub omega_max: Option<f64>,
    pub seed: u64,
}

impl Discretisation {
    pub fn with_seed(seed: u64) -> Self {
        Discretisation {
            bins: DEFAULT_SPECTRAL_BINS,
            directions: 1,
            omega_min: None,
            omega_max: None,
            seed,
        }
    }

    /// Offsets from the mean direction and their spreading weights
    /// G(μ) = (2/π)·cos²μ·Δμ, which sum to one.
    fn direction_bands(&self) -> Vec<(f64, f64)> {
        if self.directions <= 1 {
            return vec![(0.0, 1.0)];
        }
        let d_mu = PI / self.directions as f64;
        (0..self.directions)
            .map(|i| {
                let mu = -PI / 2.0 + (i as f64 + 0.5) * d_mu;
                (mu, 2.0 / PI * mu.cos().powi(2) * d_mu)
            })
            .collect()
    }

    fn range(&self, spectrum: &Spectrum) -> AsvResult<(f64, f64)> {
        let wp = spectrum.peak_frequency();
        let lo = self.omega_min.unwrap_or(DEFAULT_OMEGA_MIN_RATIO * wp);
        let hi = self.omega_max.unwrap_or(DEFAULT_OMEGA_MAX_RATIO * wp);
        if !(lo.is_finite() && hi.is_finite() && lo > 0.0 && hi > lo) {
            return Err(AsvError::specification(format!(
                "spectral range must satisfy 0 < ω_min < ω_max, got [{}, {}]",
                lo, hi
            )));
        }
        Ok((lo, hi))
    }
}

/// Samples `spectrum` into `bins` equal-width frequency bins times
/// `directions` direction bands. Each frequency bin gets a frequency drawn
/// uniformly inside the bin, and each band within it an amplitude
/// √(2 S(ω) Δω G(μ)) and a uniform random phase. Draws happen frequency-major
/// in a fixed order, so equal seeds give equal components.
pub fn discretise(
    spectrum: &Spectrum,
    discretisation: &Discretisation,
    direction: f64,
    env: &Environment,
) -> AsvResult<Vec<WaveComponent>> {
    spectrum.validate()?;
    if discretisation.bins == 0 {
        return Err(AsvError::specification("irregular sea needs at least one bin"));
    }
    if discretisation.directions == 0 {
        return Err(AsvError::specification(
            "irregular sea needs at least one direction band",
        ));
    }
    let (lo, hi) = discretisation.range(spectrum)?;
    let d_omega = (hi - lo) / discretisation.bins as f64;
    let bands = discretisation.direction_bands();
    let mut rng = ChaCha8Rng::seed_from_u64(discretisation.seed);

    let mut components = Vec::with_capacity(discretisation.bins * bands.len());
    for i in 0..discretisation.bins {
        let omega = lo + (i as f64 + rng.gen::<f64>()) * d_omega;
        let energy = 2.0 * spectrum.density(omega) * d_omega;
        for &(mu, weight) in &bands {
            let phase = rng.gen_range(0.0..TWO_PI);
            let heading = (direction + mu).rem_euclid(TWO_PI);
            components.push(WaveComponent::new(
                (energy * weight).sqrt(),
                omega,
                heading,
                phase,
                env,
            ));
        }
    }

    Ok(components)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn zeroth_moment(components: &[WaveComponent]) -> f64 {
        components.iter().map(|c| 0.5 * c.amplitude * c.amplitude).sum()
    }

    #[test]
    fn pierson_moskowitz_peaks_at_tp() {
        let spectrum = Spectrum::PiersonMoskowitz { hs: 2.0, tp: 9.0 };
        let wp = spectrum.peak_frequency();
        let peak = spectrum.density(wp);
        assert!(peak > spectrum.density(0.9 * wp));
        assert!(peak > spectrum.density(1.1 * wp));
    }

    #[test]
    fn jonswap_is_peakier_than_pierson_moskowitz() {
        let pm = Spectrum::PiersonMoskowitz { hs: 2.0, tp: 9.0 };
        let js = Spectrum::Jonswap {
            hs: 2.0,
            tp: 9.0,
            gamma: 3.3,
        };
        let wp = pm.peak_frequency();
        assert!(js.density(wp) > pm.density(wp));
    }

    #[test]
    fn discretised_sea_recovers_significant_height() {
        let spectrum = Spectrum::PiersonMoskowitz { hs: 1.5, tp: 7.0 };
        let discretisation = Discretisation {
            bins: 200,
            directions: 1,
            omega_min: Some(0.3),
            omega_max: Some(6.0),
            seed: 7,
        };
        let components =
            discretise(&spectrum, &discretisation, 0.0, &Environment::default()).unwrap();
        let hs = 4.0 * zeroth_moment(&components).sqrt();
        assert_relative_eq!(hs, 1.5, max_relative = 0.03);
    }

    #[test]
    fn spreading_weights_sum_to_one() {
        for directions in [1, 2, 5, 12, 31] {
            let discretisation = Discretisation {
                directions,
                ..Discretisation::with_seed(0)
            };
            let total: f64 = discretisation.direction_bands().iter().map(|b| b.1).sum();
            assert_relative_eq!(total, 1.0, max_relative = 1e-12);
        }
    }

    #[test]
    fn spread_sea_recovers_significant_height() {
        let spectrum = Spectrum::Jonswap {
            hs: 1.2,
            tp: 6.5,
            gamma: 3.3,
        };
        let discretisation = Discretisation {
            bins: 200,
            directions: 9,
            omega_min: Some(0.3),
            omega_max: Some(6.0),
            seed: 11,
        };
        let components =
            discretise(&spectrum, &discretisation, 1.0, &Environment::default()).unwrap();
        assert_eq!(components.len(), 200 * 9);

        let hs = 4.0 * zeroth_moment(&components).sqrt();
        assert_relative_eq!(hs, 1.2, max_relative = 0.03);

        // Bands straddle the mean direction within ±90°
        for c in &components {
            let offset = crate::numerics::euler::wrap_to_pi(c.direction - 1.0);
            assert!(offset.abs() < PI / 2.0);
        }
        assert!(components.iter().any(|c| c.direction > 1.0));
        assert!(components.iter().any(|c| c.direction < 1.0));
    }

    #[test]
    fn same_seed_same_components() {
        let spectrum = Spectrum::Jonswap {
            hs: 1.0,
            tp: 6.0,
            gamma: 3.3,
        };
        let env = Environment::default();
        let a = discretise(&spectrum, &Discretisation::with_seed(42), 0.5, &env).unwrap();
        let b = discretise(&spectrum, &Discretisation::with_seed(42), 0.5, &env).unwrap();
        let c = discretise(&spectrum, &Discretisation::with_seed(43), 0.5, &env).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn rejects_bad_parameters() {
        let env = Environment::default();
        let bad_tp = Spectrum::PiersonMoskowitz { hs: 1.0, tp: 0.0 };
        assert!(discretise(&bad_tp, &Discretisation::with_seed(1), 0.0, &env).is_err());

        let spectrum = Spectrum::PiersonMoskowitz { hs: 1.0, tp: 6.0 };
        let no_bins = Discretisation {
            bins: 0,
            ..Discretisation::with_seed(1)
        };
        assert!(discretise(&spectrum, &no_bins, 0.0, &env).is_err());

        let no_directions = Discretisation {
            directions: 0,
            ..Discretisation::with_seed(1)
        };
        assert!(discretise(&spectrum, &no_directions, 0.0, &env).is_err());

        let inverted = Discretisation {
            omega_min: Some(2.0),
            omega_max: Some(1.0),
            ..Discretisation::with_seed(1)
        };
        assert!(discretise(&spectrum, &inverted, 0.0, &env).is_err());
    }
}

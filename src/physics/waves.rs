//! Linear (Airy) wave components and their excitation on a hull.
//!
//! Excitation model: Froude–Krylov loads scaled by a size-ratio attenuation
//!
//!   γ = sinc(k·L·cosβ / 2) · sinc(k·B·sinβ / 2) · depth_decay
//!
//! where β is the wave direction relative to the heading. A hull much shorter
//! than the wavelength feels the full undisturbed pressure field (γ → 1); one
//! spanning whole wavelengths averages it out. Per component, with the phase
//! ϑ = k(x cosθ + y sinθ) − ωt + φ at the centre of gravity:
//!
//!   heave  F₃ = ρ g A_wp a γ cos ϑ
//!   surge  F₁ = ρ V ω² a γ sin ϑ · cosβ      (horizontal pressure gradient)
//!   sway   F₂ = ρ V ω² a γ sin ϑ · sinβ
//!   roll   M₄ = K₄₄ · ∂η/∂y_body · γ          (wave slope on the righting arm)
//!   pitch  M₅ = -K₅₅ · ∂η/∂x_body · γ
//!   yaw    M₆ = 0
//!
//! Loads are resolved in the heading-aligned horizontal frame, which is the
//! body frame to first order in heel and trim. Every term is linear in the
//! amplitude, so a spectrum's excitation is the sum of its components'.

use crate::models::specification::VehicleSpecification;
use crate::physics::environment::Environment;
use nalgebra as na;

const DISPERSION_TOLERANCE: f64 = 1e-12;
const DISPERSION_MAX_ITERATIONS: usize = 50;

/// Solves ω² = g·k·tanh(k·h) for the wavenumber k.
/// Deep water (no depth) reduces to k = ω²/g.
pub fn wavenumber(omega: f64, env: &Environment) -> f64 {
    let deep = omega * omega / env.gravity;
    let Some(h) = env.depth else {
        return deep;
    };

    // Newton on f(k) = g k tanh(kh) - ω². The deep and shallow water limits
    // are both lower bounds on the root; start from the larger one.
    let shallow = omega / (env.gravity * h).sqrt();
    let mut k = deep.max(shallow);
    for _ in 0..DISPERSION_MAX_ITERATIONS {
        let tanh_kh = (k * h).tanh();
        let f = env.gravity * k * tanh_kh - omega * omega;
        let df = env.gravity * (tanh_kh + k * h * (1.0 - tanh_kh * tanh_kh));
        let step = f / df;
        k -= step;
        if step.abs() <= DISPERSION_TOLERANCE * k {
            break;
        }
    }
    k
}

/// sin(x)/x with the removable singularity filled in.
fn sinc(x: f64) -> f64 {
    if x.abs() < 1e-8 {
        1.0 - x * x / 6.0
    } else {
        x.sin() / x
    }
}

/// Decay of the wave pressure field evaluated at half draft.
///
/// The finite-depth ratio cosh(k(h − z)) / cosh(kh) is written in terms of
/// decaying exponentials so it stays finite for any kh and meets the
/// deep-water value e^(−kz) as h → ∞.
fn depth_decay(k: f64, draft: f64, env: &Environment) -> f64 {
    let z = 0.5 * draft;
    match env.depth {
        Some(h) if z < h => {
            (-k * z).exp() * (1.0 + (-2.0 * k * (h - z)).exp()) / (1.0 + (-2.0 * k * h).exp())
        }
        Some(_) => 0.0,
        None => (-k * z).exp(),
    }
}

/// A single sinusoidal wave train.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveComponent {
    pub amplitude: f64,  // m
    pub omega: f64,      // rad/s
    pub wavenumber: f64, // rad/m
    pub direction: f64,  // rad, direction of travel in the world frame
    pub phase: f64,      // rad
}

impl WaveComponent {
    pub fn new(amplitude: f64, omega: f64, direction: f64, phase: f64, env: &Environment) -> Self {
        WaveComponent {
            amplitude,
            omega,
            wavenumber: wavenumber(omega, env),
            direction,
            phase,
        }
    }

    pub fn period(&self) -> f64 {
        std::f64::consts::TAU / self.omega
    }

    pub fn wavelength(&self) -> f64 {
        std::f64::consts::TAU / self.wavenumber
    }

    pub fn phase_at(&self, t: f64, x: f64, y: f64) -> f64 {
        let (sin_dir, cos_dir) = self.direction.sin_cos();
        self.wavenumber * (x * cos_dir + y * sin_dir) - self.omega * t + self.phase
    }

    pub fn elevation(&self, t: f64, x: f64, y: f64) -> f64 {
        self.amplitude * self.phase_at(t, x, y).cos()
    }

    /// Size-ratio attenuation γ for a hull heading `heading`.
    pub fn response_coefficient(
        &self,
        heading: f64,
        spec: &VehicleSpecification,
        env: &Environment,
    ) -> f64 {
        let k = self.wavenumber;
        let (sin_beta, cos_beta) = (self.direction - heading).sin_cos();
        let d = &spec.dimensions;
        sinc(0.5 * k * d.length * cos_beta)
            * sinc(0.5 * k * d.breadth * sin_beta)
            * depth_decay(k, d.draft, env)
    }

    /// Body-frame excitation force/moment at the COG world position.
    pub fn excitation(
        &self,
        t: f64,
        position: &na::Vector3<f64>,
        heading: f64,
        spec: &VehicleSpecification,
        env: &Environment,
    ) -> na::Vector6<f64> {
        let vartheta = self.phase_at(t, position.x, position.y);
        let (sin_v, cos_v) = vartheta.sin_cos();
        let (sin_beta, cos_beta) = (self.direction - heading).sin_cos();
        let a = self.amplitude * self.response_coefficient(heading, spec, env);

        let rho = env.water_density;
        let stiffness = spec.restoring_stiffness(env);
        let horizontal = rho * spec.displacement * self.omega * self.omega * a * sin_v;

        // Wave slope along the body axes: ∂η/∂s = -a k sin ϑ · (cosβ, sinβ)
        let slope = -a * self.wavenumber * sin_v;

        na::Vector6::new(
            horizontal * cos_beta,
            horizontal * sin_beta,
            env.specific_weight() * spec.waterplane_area() * a * cos_v,
            stiffness[3] * slope * sin_beta,
            -stiffness[4] * slope * cos_beta,
            0.0,
        )
    }
}

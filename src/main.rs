use asv_sim::config::scenario::{AutopilotConfig, ScenarioConfig};
use asv_sim::gnc::control::heading_controller::{allocate_differential, HeadingController};
use asv_sim::models::{Asv, DynamicsState};
use asv_sim::AsvError;
use clap::Parser;
use csv::Writer;
use std::error::Error;
use std::fs::{self, File};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "asv-sim")]
#[command(about = "Six-DOF surface vessel simulation in waves", long_about = None)]
struct Args {
    /// Scenario TOML file; the built-in survey catamaran when omitted
    #[arg(long)]
    scenario: Option<PathBuf>,
    /// Trajectory CSV destination
    #[arg(long, default_value = "output/trajectory.csv")]
    output: PathBuf,
    /// Override the scenario's step count
    #[arg(long)]
    steps: Option<usize>,
}

struct Autopilot {
    controller: HeadingController,
    config: AutopilotConfig,
}

impl Autopilot {
    fn new(config: AutopilotConfig) -> Self {
        Autopilot {
            controller: HeadingController::new(config.kp, config.kd, config.max_moment),
            config,
        }
    }

    fn command(&self, asv: &mut Asv<'_>) -> Result<(), AsvError> {
        let (Some(port), Some(starboard)) = (
            asv.actuator(&self.config.port),
            asv.actuator(&self.config.starboard),
        ) else {
            return Err(AsvError::InvalidState {
                what: format!(
                    "autopilot actuators '{}'/'{}' are not mounted",
                    self.config.port, self.config.starboard
                ),
            });
        };

        let moment = self.controller.compute_yaw_moment(
            self.config.target_heading_deg.to_radians(),
            asv.heading(),
            asv.velocity()[5],
        );
        let cog = asv.specification().cog;
        let (t_port, t_starboard) =
            allocate_differential(self.config.surge_thrust, moment, &port, &starboard, &cog)?;
        asv.set_thrust(&self.config.port, t_port)?;
        asv.set_thrust(&self.config.starboard, t_starboard)
    }
}

fn write_row(
    writer: &mut Writer<File>,
    asv: &Asv<'_>,
    snapshot: &DynamicsState,
) -> Result<(), Box<dyn Error>> {
    let cog = snapshot.cog_position;
    let elevation = asv.sea_state().elevation(snapshot.time, cog.x, cog.y)?;
    let mut record = vec![snapshot.time.to_string()];
    record.extend(cog.iter().map(|v| v.to_string()));
    record.extend(snapshot.origin_position.iter().map(|v| v.to_string()));
    record.extend(snapshot.attitude.iter().map(|v| v.to_degrees().to_string()));
    record.extend(snapshot.velocity.iter().map(|v| v.to_string()));
    record.extend(snapshot.force.iter().map(|v| v.to_string()));
    record.push(elevation.to_string());
    record.push(asv.mechanical_energy().to_string());
    writer.write_record(&record)?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = match &args.scenario {
        Some(path) => ScenarioConfig::from_path(path)?,
        None => ScenarioConfig::default(),
    };
    info!(scenario = ?args.scenario, sea = ?config.sea_state, "Scenario loaded");

    let sea_state = config.sea_state()?;
    let mut asv = config.build_vehicle(&sea_state)?;
    let autopilot = config.autopilot.clone().map(Autopilot::new);

    let dt = config.simulation.dt;
    let steps = args.steps.unwrap_or(config.simulation.steps);
    let record_every = config.simulation.record_every.max(1);

    if let Some(dir) = args.output.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = File::create(&args.output)?;
    let mut writer = Writer::from_writer(file);

    writer.write_record([
        "Time (s)",
        "COG X (m)",
        "COG Y (m)",
        "COG Z (m)",
        "Origin X (m)",
        "Origin Y (m)",
        "Origin Z (m)",
        "Heel (deg)",
        "Trim (deg)",
        "Heading (deg)",
        "Surge (m/s)",
        "Sway (m/s)",
        "Heave (m/s)",
        "Roll Rate (rad/s)",
        "Pitch Rate (rad/s)",
        "Yaw Rate (rad/s)",
        "Force X (N)",
        "Force Y (N)",
        "Force Z (N)",
        "Moment K (N⋅m)",
        "Moment M (N⋅m)",
        "Moment N (N⋅m)",
        "Wave Elevation (m)",
        "Mechanical Energy (J)",
    ])?;

    write_row(&mut writer, &asv, &asv.snapshot())?;
    for i in 1..=steps {
        if let Some(autopilot) = &autopilot {
            autopilot.command(&mut asv)?;
        }
        let snapshot = match asv.advance(dt) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(step = i, error = %e, "Simulation stopped");
                writer.flush()?;
                return Err(e.into());
            }
        };
        if i % record_every == 0 {
            write_row(&mut writer, &asv, &snapshot)?;
        }
    }

    writer.flush()?;
    info!(steps, t = asv.time(), "Simulation complete");
    println!("Trajectory has been written to {}", args.output.display());

    Ok(())
}

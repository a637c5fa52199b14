//! Rube Goldberg entry point
//!
//! Headless driver: runs a marble through a track at a fixed frame rate and
//! prints the impact log once the bell rings.
//!
//! Usage: `rube-goldberg [track.json] [settings.json]`

use std::process::ExitCode;

use rube_goldberg::sim::{FixedStepper, RunStatus, Simulation, TickOutcome, Track};
use rube_goldberg::consts::PX_PER_CM;
use rube_goldberg::{SimSettings, TrackError};

/// Ten simulated minutes is far longer than any sane machine needs
const MAX_FRAMES: u32 = 60 * 60 * 10;

fn read_file(path: &str) -> Result<String, TrackError> {
    std::fs::read_to_string(path).map_err(|source| TrackError::Io {
        path: path.to_string(),
        source,
    })
}

fn load() -> Result<Simulation, TrackError> {
    let mut args = std::env::args().skip(1);
    let track = match args.next() {
        Some(path) => Track::from_json(&read_file(&path)?)?,
        None => Track::reference(),
    };
    let settings = match args.next() {
        Some(path) => SimSettings::from_json(&read_file(&path)?)?,
        None => SimSettings::default(),
    };
    Simulation::new(track, settings)
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Rube Goldberg (native) starting...");

    let mut sim = match load() {
        Ok(sim) => sim,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    sim.set_on_finished(|event| {
        println!("*ding* bell struck at {:.2}s", event.timestamp);
    });

    let settings = sim.settings();
    log::info!(
        "Machine {}x{} cm ({}x{} px), marble radius {:.1} cm, {} segments",
        settings.machine_width_cm,
        settings.machine_height_cm,
        settings.machine_width_cm * PX_PER_CM,
        settings.machine_height_cm * PX_PER_CM,
        settings.marble_radius_cm(),
        sim.track().len()
    );

    let frame_dt = sim.settings().time_step;
    let mass = sim.settings().marble_mass_kg;
    let gravity = sim.settings().gravity;
    let mut stepper = FixedStepper::new();
    sim.start();

    let mut frames = 0;
    while sim.status() == RunStatus::Running && frames < MAX_FRAMES {
        for outcome in stepper.advance(&mut sim, frame_dt) {
            if let TickOutcome::Transitioned(_) = outcome {
                let (step, total) = sim.current_step();
                let marble = sim.marble();
                println!(
                    "step {step}/{total}: v={:.2} m/s h={:.2} m K={:.2e} J PE={:.2e} J",
                    marble.velocity,
                    marble.height_m(),
                    marble.kinetic_energy(mass),
                    marble.potential_energy(mass, gravity)
                );
            }
        }
        frames += 1;
    }

    println!();
    println!("step     v_pre    v_post     time");
    if sim.collision_log().is_empty() {
        println!("No events yet...");
    }
    for event in sim.collision_log() {
        println!("{event}");
    }

    if sim.status() == RunStatus::Finished {
        ExitCode::SUCCESS
    } else {
        log::warn!("Marble did not reach the bell within {MAX_FRAMES} frames");
        ExitCode::FAILURE
    }
}

mod engine;
mod midi;
mod midi_api;
mod project;
mod repl;
mod shared;
mod tracker;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use log::{info, warn};

use midi::MidiOut;
use project::persistence;
use shared::{Command, DisplayState};
use tracker::Tracker;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    env_logger::init(); // Log to stderr (run with RUST_LOG=debug for more).
    let project_dir: PathBuf = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());
    let state = persistence::load_project(&project_dir)
        .unwrap_or_default();
    let mut tracker = Tracker::with_state(state);
    let mut device = MidiOut::connect();
    let commands = repl::spawn_stdin_reader();
    info!("project dir {}", project_dir.display());

    let tick_rate = Duration::from_millis(16);
    let autosave_every = Duration::from_millis(5000);
    let mut last_save = Instant::now();

    loop {
        while let Ok(cmd) = commands.try_recv() {
            match cmd {
                Command::Quit => {
                    // flush the releases, then save on the way out
                    for mc in tracker.halt() {
                        device.send(mc);
                    }
                    persistence::save_project(&project_dir, &tracker.state)?;
                    return Ok(());
                }
                Command::Save => {
                    if let Err(e) = persistence::save_project(&project_dir, &tracker.state) {
                        warn!("save failed: {e:#}");
                    } else {
                        info!("saved");
                    }
                    last_save = Instant::now();
                }
                Command::NewProject => {
                    for mc in tracker.new_project() {
                        device.send(mc);
                    }
                    if let Err(e) = persistence::save_project(&project_dir, &tracker.state) {
                        warn!("save failed: {e:#}");
                    }
                    last_save = Instant::now();
                }
                Command::Status => print_status(&tracker.display_state()),
                other => {
                    for mc in tracker.handle_command(other) {
                        device.send(mc);
                    }
                }
            }
        }

        for mc in tracker.tick(Instant::now()) {
            device.send(mc);
        }

        if last_save.elapsed() >= autosave_every {
            if let Err(e) = persistence::save_project(&project_dir, &tracker.state) {
                warn!("autosave failed: {e:#}");
            }
            last_save = Instant::now();
        }

        std::thread::sleep(tick_rate);
    }
}

fn print_status(ds: &DisplayState) {
    let mode = if ds.playing { "playing" } else { "stopped" };
    let notes: Vec<String> = ds
        .channels
        .iter()
        .map(|c| match c {
            Some(n) => midi::note_name(*n),
            None => "---".to_string(),
        })
        .collect();
    println!(
        "{mode}  bpm {bpm}  pos {pos}  row {row}  pattern {pat}",
        bpm = ds.bpm,
        pos = midi::hex2(ds.song_pos as u8),
        row = midi::hex2(ds.row as u8),
        pat = midi::hex2(ds.selected_pattern),
    );
    println!("channels {}", notes.join(" "));
}

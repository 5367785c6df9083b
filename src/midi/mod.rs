// The instrument side of the engine: a best-effort midi out. Having no
// port is not an error, the sends just go nowhere.

use log::{info, warn};
use midir::{MidiOutput, MidiOutputConnection};

use crate::midi_api::MidiCommand;

pub struct MidiOut {
    connection: Option<MidiOutputConnection>,
}

impl MidiOut {
    // grab the first output port the system offers, if there is one
    pub fn connect() -> Self {
        Self {
            connection: open_first_port(),
        }
    }

    pub fn send(&mut self, cmd: MidiCommand) {
        if let Some(conn) = self.connection.as_mut() {
            let _ = conn.send(&encode(cmd));
        }
    }
}

fn open_first_port() -> Option<MidiOutputConnection> {
    let midi_out = match MidiOutput::new("gridseq") {
        Ok(out) => out,
        Err(e) => {
            warn!("midi unavailable: {e}");
            return None;
        }
    };
    let ports = midi_out.ports();
    let Some(port) = ports.first() else {
        warn!("no midi outputs available, playing silent");
        return None;
    };
    let name = midi_out.port_name(port).unwrap_or_else(|_| "?".to_string());
    match midi_out.connect(port, "gridseq") {
        Ok(conn) => {
            info!("midi output set to {name}");
            Some(conn)
        }
        Err(e) => {
            warn!("failed to open midi output {name}: {e}");
            None
        }
    }
}

// The raw three bytes for a command; the track index rides in the low
// nibble of the status byte. Note-ons always go out at max velocity.
pub fn encode(cmd: MidiCommand) -> [u8; 3] {
    match cmd {
        MidiCommand::NoteOn { channel, note } => [0x90 + channel, note, 0x7f],
        MidiCommand::NoteOff { channel } => [0x80 + channel, 0, 0x00],
    }
}

const NOTE_NAMES: [&str; 12] = [
    "C-", "C#", "D-", "D#", "E-", "F-", "F#", "G-", "G#", "A-", "A#", "B-",
];

// tracker-style note display with the octave as one hex digit: 60 is C-5
pub fn note_name(note: u8) -> String {
    let octave = note / 12;
    format!("{}{:X}", NOTE_NAMES[(note % 12) as usize], octave)
}

pub fn hex2(value: u8) -> String {
    format!("{value:02X}")
}

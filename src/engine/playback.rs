// The step engine. advance() gets polled with the current time every tick
// and does nothing until a row is due; nothing in here ever waits.

use std::time::Instant;

use crate::midi_api::MidiCommand;
use crate::project::state::{PatternBank, Song, Transport};
use crate::shared::{NUM_TRACKS, ROWS_PER_PATTERN, SONG_LENGTH};

// Holds the per-channel sounding state. It lives here and not in the saved
// project because it mirrors whatever the last resolved row was; a stopped
// engine has nothing sounding.
#[derive(Debug, Default)]
pub struct Engine {
    channels: [Option<u8>; NUM_TRACKS],
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    // what each track is currently sounding, for the display
    pub fn channels(&self) -> &[Option<u8>; NUM_TRACKS] {
        &self.channels
    }

    // Toggle between stopped and playing. Playing resumes from wherever
    // the transport already sits.
    pub fn toggle_play(&mut self, transport: &mut Transport) -> Vec<MidiCommand> {
        if transport.playing {
            self.stop(transport)
        } else {
            transport.playing = true;
            // no last step yet, so the first poll fires row 0 right away
            transport.last_step = None;
            Vec::new()
        }
    }

    // Play from the top no matter the current state. Anything still
    // sounding gets released first so the jump can't strand a note.
    pub fn play_from_top(&mut self, transport: &mut Transport) -> Vec<MidiCommand> {
        let out = self.release_all();
        transport.song_pos = 0;
        transport.row = 0;
        transport.playing = true;
        transport.last_step = None;
        out
    }

    // Stop. Every sounding channel gets exactly one note-off; the device
    // must never be left holding a note.
    pub fn stop(&mut self, transport: &mut Transport) -> Vec<MidiCommand> {
        if !transport.playing {
            return Vec::new();
        }
        transport.playing = false;
        transport.last_step = None;
        self.release_all()
    }

    fn release_all(&mut self) -> Vec<MidiCommand> {
        let mut out = Vec::new();
        for (t, channel) in self.channels.iter_mut().enumerate() {
            if channel.take().is_some() {
                out.push(MidiCommand::NoteOff { channel: t as u8 });
            }
        }
        out
    }

    // One poll. Steps at most one row, and only once the step interval has
    // elapsed since the last one (or the transport just started and has no
    // last step yet).
    pub fn advance(
        &mut self,
        now: Instant,
        transport: &mut Transport,
        song: &Song,
        patterns: &PatternBank,
    ) -> Vec<MidiCommand> {
        if !transport.playing {
            return Vec::new();
        }
        let due = match transport.last_step {
            Some(last) => now.duration_since(last) >= transport.step_interval(),
            None => true,
        };
        if !due {
            return Vec::new();
        }
        // anchored to now, not to last + interval; a late tick stretches
        // the grid instead of bunching catch-up steps
        transport.last_step = Some(now);

        let mut out = Vec::new();
        for (t, track) in song.tracks.iter().enumerate() {
            let channel = t as u8;
            match track.slots[transport.song_pos] {
                None => {
                    // silent slot: release only what was actually sounding
                    if self.channels[t].take().is_some() {
                        out.push(MidiCommand::NoteOff { channel });
                    }
                }
                Some(id) => {
                    let note = patterns.pattern(id).note_at(transport.row);
                    self.channels[t] = note;
                    match note {
                        Some(note) => out.push(MidiCommand::NoteOn { channel, note }),
                        None => out.push(MidiCommand::NoteOff { channel }),
                    }
                }
            }
        }

        transport.row += 1;
        if transport.row >= ROWS_PER_PATTERN {
            transport.row = 0;
            transport.song_pos += 1;
            if transport.song_pos >= SONG_LENGTH || song.ended_at(transport.song_pos) {
                transport.song_pos = 0;
            }
        }
        out
    }
}

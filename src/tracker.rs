// The middle layer, and the only place state lives. main shuttles
// Commands in and MidiCommands out, and reads a DisplayState off it when
// somebody asks for status.

use std::time::Instant;

use crate::engine::Engine;
use crate::midi_api::MidiCommand;
use crate::project::edits;
use crate::project::state::ProjectState;
use crate::shared::{Command, DisplayState};

pub struct Tracker {
    pub state: ProjectState,
    engine: Engine,
}

impl Tracker {
    pub fn with_state(state: ProjectState) -> Self {
        Self {
            state,
            engine: Engine::new(),
        }
    }

    // one poll of the step engine
    pub fn tick(&mut self, now: Instant) -> Vec<MidiCommand> {
        self.engine.advance(
            now,
            &mut self.state.transport,
            &self.state.song,
            &self.state.patterns,
        )
    }

    pub fn handle_command(&mut self, cmd: Command) -> Vec<MidiCommand> {
        match cmd {
            Command::TogglePlay => self.engine.toggle_play(&mut self.state.transport),
            Command::PlayFromTop => self.engine.play_from_top(&mut self.state.transport),
            Command::Stop => self.engine.stop(&mut self.state.transport),
            Command::SetBpm(bpm) => {
                edits::set_bpm(&mut self.state, bpm);
                Vec::new()
            }
            Command::SelectPattern(id) => {
                edits::select_pattern(&mut self.state, id);
                Vec::new()
            }
            Command::BumpPattern(delta) => {
                edits::bump_pattern(&mut self.state, delta);
                Vec::new()
            }
            Command::SetCell { col, row, value } => {
                edits::set_cell(&mut self.state, col, row, value);
                Vec::new()
            }
            Command::PutCell { col, row } => {
                edits::put_cell(&mut self.state, col, row);
                Vec::new()
            }
            Command::CutCell { col, row } => {
                edits::cut_cell(&mut self.state, col, row);
                Vec::new()
            }
            Command::BumpCell { col, row, delta } => {
                edits::bump_cell(&mut self.state, col, row, delta);
                Vec::new()
            }
            Command::SetSlot { track, pos, id } => {
                edits::set_slot(&mut self.state, track, pos, id);
                Vec::new()
            }
            Command::PutSlot { track, pos } => {
                edits::put_slot(&mut self.state, track, pos);
                Vec::new()
            }
            Command::CutSlot { track, pos } => {
                edits::cut_slot(&mut self.state, track, pos);
                Vec::new()
            }
            Command::BumpSlot { track, pos, delta } => {
                edits::bump_slot(&mut self.state, track, pos, delta);
                Vec::new()
            }
            // disk and console traffic, main routes these itself
            Command::NewProject | Command::Save | Command::Status | Command::Quit => Vec::new(),
        }
    }

    // stop and release everything, for the way out
    pub fn halt(&mut self) -> Vec<MidiCommand> {
        self.engine.stop(&mut self.state.transport)
    }

    // back to an empty project; anything sounding is released first
    pub fn new_project(&mut self) -> Vec<MidiCommand> {
        let out = self.halt();
        self.state = ProjectState::default();
        out
    }

    pub fn display_state(&self) -> DisplayState {
        DisplayState {
            playing: self.state.transport.playing,
            song_pos: self.state.transport.song_pos,
            row: self.state.transport.row,
            bpm: self.state.transport.bpm,
            selected_pattern: self.state.selected_pattern,
            channels: *self.engine.channels(),
        }
    }
}

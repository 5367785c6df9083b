// The only place pattern and song data gets written. Cell edits address
// the selected pattern, slot edits a track/position pair; the playback
// engine only ever reads these grids.
//
// All the wrapping edits share one rule: treat an empty cell as 0, add
// the delta, wrap modulo the column's value range.

use crate::project::state::ProjectState;
use crate::shared::{BPM_MAX, BPM_MIN, COLUMN_MAX, NUM_PATTERNS};

fn cell_mut(state: &mut ProjectState, col: usize, row: usize) -> &mut Option<u8> {
    let id = state.selected_pattern;
    &mut state.patterns.pattern_mut(id).columns[col][row]
}

pub fn set_cell(state: &mut ProjectState, col: usize, row: usize, value: u16) {
    let max = COLUMN_MAX[col];
    *cell_mut(state, col, row) = Some((value % max) as u8);
}

// Paste the clipboard into an empty cell, or start it off at 0. Occupied
// cells are left alone. Pasted values get folded into the column's range
// since the clipboard doesn't remember which grid it came from.
pub fn put_cell(state: &mut ProjectState, col: usize, row: usize) {
    let pasted = u16::from(state.clipboard.unwrap_or(0));
    let max = COLUMN_MAX[col];
    let cell = cell_mut(state, col, row);
    if cell.is_none() {
        *cell = Some((pasted % max) as u8);
    }
}

// move the cell's value (or its emptiness) into the clipboard
pub fn cut_cell(state: &mut ProjectState, col: usize, row: usize) {
    let taken = cell_mut(state, col, row).take();
    state.clipboard = taken;
}

pub fn bump_cell(state: &mut ProjectState, col: usize, row: usize, delta: i32) {
    let max = i32::from(COLUMN_MAX[col]);
    let cell = cell_mut(state, col, row);
    let value = i32::from(cell.unwrap_or(0));
    *cell = Some((value + delta).rem_euclid(max) as u8);
}

pub fn set_slot(state: &mut ProjectState, track: usize, pos: usize, id: Option<u8>) {
    state.song.tracks[track].slots[pos] = id;
}

pub fn put_slot(state: &mut ProjectState, track: usize, pos: usize) {
    let pasted = state.clipboard.unwrap_or(0);
    let slot = &mut state.song.tracks[track].slots[pos];
    if slot.is_none() {
        *slot = Some(pasted);
    }
}

pub fn cut_slot(state: &mut ProjectState, track: usize, pos: usize) {
    let taken = state.song.tracks[track].slots[pos].take();
    state.clipboard = taken;
}

pub fn bump_slot(state: &mut ProjectState, track: usize, pos: usize, delta: i32) {
    let slot = &mut state.song.tracks[track].slots[pos];
    let value = i32::from(slot.unwrap_or(0));
    *slot = Some((value + delta).rem_euclid(NUM_PATTERNS as i32) as u8);
}

pub fn select_pattern(state: &mut ProjectState, id: u8) {
    state.selected_pattern = id;
}

pub fn bump_pattern(state: &mut ProjectState, delta: i32) {
    let value = i32::from(state.selected_pattern);
    state.selected_pattern = (value + delta).rem_euclid(NUM_PATTERNS as i32) as u8;
}

pub fn set_bpm(state: &mut ProjectState, bpm: u32) {
    state.transport.bpm = bpm.clamp(BPM_MIN, BPM_MAX);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::{INSTRUMENT_COL, NOTE_COL, VOLUME_COL};

    #[test]
    fn test_set_cell_folds_into_column_range() {
        let mut state = ProjectState::default();
        set_cell(&mut state, NOTE_COL, 0, 60);
        set_cell(&mut state, NOTE_COL, 1, 300);
        assert_eq!(state.patterns.pattern(0).note_at(0), Some(60));
        assert_eq!(state.patterns.pattern(0).note_at(1), Some(44));
    }

    #[test]
    fn test_cell_edits_follow_the_selected_pattern() {
        let mut state = ProjectState::default();
        select_pattern(&mut state, 9);
        set_cell(&mut state, NOTE_COL, 0, 42);
        assert_eq!(state.patterns.pattern(9).note_at(0), Some(42));
        assert_eq!(state.patterns.pattern(0).note_at(0), None);
    }

    #[test]
    fn test_bump_wraps_at_column_bounds() {
        let mut state = ProjectState::default();
        set_cell(&mut state, NOTE_COL, 0, 127);
        bump_cell(&mut state, NOTE_COL, 0, 1);
        assert_eq!(state.patterns.pattern(0).note_at(0), Some(0));
        bump_cell(&mut state, NOTE_COL, 0, -1);
        assert_eq!(state.patterns.pattern(0).note_at(0), Some(127));

        set_cell(&mut state, NOTE_COL, 1, 120);
        bump_cell(&mut state, NOTE_COL, 1, 16);
        assert_eq!(state.patterns.pattern(0).note_at(1), Some((120 + 16) % 128));

        set_cell(&mut state, VOLUME_COL, 0, 255);
        bump_cell(&mut state, VOLUME_COL, 0, 1);
        assert_eq!(state.patterns.pattern(0).columns[VOLUME_COL][0], Some(0));
    }

    #[test]
    fn test_bump_treats_empty_as_zero() {
        let mut state = ProjectState::default();
        bump_cell(&mut state, NOTE_COL, 0, -1);
        assert_eq!(state.patterns.pattern(0).note_at(0), Some(127));
        bump_cell(&mut state, INSTRUMENT_COL, 0, 16);
        assert_eq!(state.patterns.pattern(0).columns[INSTRUMENT_COL][0], Some(16));
    }

    #[test]
    fn test_cut_then_put_moves_the_value() {
        let mut state = ProjectState::default();
        set_cell(&mut state, VOLUME_COL, 2, 99);
        cut_cell(&mut state, VOLUME_COL, 2);
        assert_eq!(state.patterns.pattern(0).columns[VOLUME_COL][2], None);
        assert_eq!(state.clipboard, Some(99));
        put_cell(&mut state, VOLUME_COL, 5);
        assert_eq!(state.patterns.pattern(0).columns[VOLUME_COL][5], Some(99));
    }

    #[test]
    fn test_put_initializes_empty_and_spares_occupied() {
        let mut state = ProjectState::default();
        put_cell(&mut state, NOTE_COL, 0);
        assert_eq!(state.patterns.pattern(0).note_at(0), Some(0));

        set_cell(&mut state, NOTE_COL, 1, 50);
        state.clipboard = Some(7);
        put_cell(&mut state, NOTE_COL, 1);
        assert_eq!(state.patterns.pattern(0).note_at(1), Some(50));
    }

    #[test]
    fn test_put_folds_clipboard_into_note_range() {
        let mut state = ProjectState::default();
        state.clipboard = Some(200);
        put_cell(&mut state, NOTE_COL, 0);
        assert_eq!(state.patterns.pattern(0).note_at(0), Some(200 % 128));
    }

    #[test]
    fn test_slot_edits() {
        let mut state = ProjectState::default();
        set_slot(&mut state, 0, 0, Some(5));
        assert_eq!(state.song.tracks[0].slots[0], Some(5));
        set_slot(&mut state, 0, 0, None);
        assert_eq!(state.song.tracks[0].slots[0], None);

        bump_slot(&mut state, 1, 3, -1);
        assert_eq!(state.song.tracks[1].slots[3], Some(255));

        cut_slot(&mut state, 1, 3);
        assert_eq!(state.song.tracks[1].slots[3], None);
        assert_eq!(state.clipboard, Some(255));
        put_slot(&mut state, 2, 10);
        assert_eq!(state.song.tracks[2].slots[10], Some(255));
    }

    #[test]
    fn test_bump_pattern_wraps_around_the_bank() {
        let mut state = ProjectState::default();
        bump_pattern(&mut state, -1);
        assert_eq!(state.selected_pattern, 255);
        bump_pattern(&mut state, 16);
        assert_eq!(state.selected_pattern, 15);
    }

    #[test]
    fn test_set_bpm_clamps() {
        let mut state = ProjectState::default();
        set_bpm(&mut state, 0);
        assert_eq!(state.transport.bpm, BPM_MIN);
        set_bpm(&mut state, 5000);
        assert_eq!(state.transport.bpm, BPM_MAX);
        set_bpm(&mut state, 140);
        assert_eq!(state.transport.bpm, 140);
    }
}

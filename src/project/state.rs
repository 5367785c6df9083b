// the data model everything else reads and edits; all of it persists
// except the transport's timestamp

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::shared::{
    BPM_MAX, BPM_MIN, COLUMN_MAX, NOTE_COL, NUM_COLS, NUM_PATTERNS, NUM_TRACKS,
    ROWS_PER_PATTERN, SONG_LENGTH,
};

// One pattern: a small grid of optional cells, one array per column
// (note, volume, instrument). None means "nothing here", which is not
// the same thing as 0. serde derives arrays only up to 32 wide; the
// pattern grid fits inside that, the 64/256-long containers further down
// are Vecs for the same reason.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pattern {
    pub columns: [[Option<u8>; ROWS_PER_PATTERN]; NUM_COLS],
}

impl Default for Pattern {
    fn default() -> Self {
        Self {
            columns: [[None; ROWS_PER_PATTERN]; NUM_COLS],
        }
    }
}

impl Pattern {
    pub fn note_at(&self, row: usize) -> Option<u8> {
        self.columns[NOTE_COL][row]
    }
}

// All NUM_PATTERNS patterns, preallocated, so any u8 a song slot can hold
// is a valid id and "missing pattern" is not a state that exists.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternBank {
    patterns: Vec<Pattern>,
}

impl Default for PatternBank {
    fn default() -> Self {
        Self {
            patterns: vec![Pattern::default(); NUM_PATTERNS],
        }
    }
}

impl PatternBank {
    pub fn pattern(&self, id: u8) -> &Pattern {
        &self.patterns[id as usize]
    }

    pub fn pattern_mut(&mut self, id: u8) -> &mut Pattern {
        &mut self.patterns[id as usize]
    }

    fn normalize(&mut self) {
        self.patterns.resize_with(NUM_PATTERNS, Pattern::default);
        for pattern in &mut self.patterns {
            for (col, cells) in pattern.columns.iter_mut().enumerate() {
                let max = COLUMN_MAX[col];
                for cell in cells {
                    *cell = cell.map(|v| (u16::from(v) % max) as u8);
                }
            }
        }
    }
}

// One track's worth of song timeline: SONG_LENGTH slots, each holding a
// pattern id or nothing.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SongTrack {
    pub slots: Vec<Option<u8>>,
}

impl Default for SongTrack {
    fn default() -> Self {
        Self {
            slots: vec![None; SONG_LENGTH],
        }
    }
}

impl SongTrack {
    // index of the last slot that still references a pattern
    pub fn last_used_slot(&self) -> Option<usize> {
        self.slots.iter().rposition(|s| s.is_some())
    }

    fn normalize(&mut self) {
        self.slots.resize(SONG_LENGTH, None);
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Song {
    pub tracks: [SongTrack; NUM_TRACKS],
}

impl Default for Song {
    fn default() -> Self {
        Self {
            tracks: std::array::from_fn(|_| SongTrack::default()),
        }
    }
}

impl Song {
    // The song has ended once every track is past its last used slot. A
    // track with no used slots at all never holds the loop open.
    pub fn ended_at(&self, pos: usize) -> bool {
        self.tracks.iter().all(|t| match t.last_used_slot() {
            Some(last) => pos > last,
            None => true,
        })
    }

    fn normalize(&mut self) {
        for track in &mut self.tracks {
            track.normalize();
        }
    }
}

// The playback engine's own knobs and position.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Transport {
    pub playing: bool,
    pub song_pos: usize, // 0..SONG_LENGTH
    pub row: usize,      // 0..ROWS_PER_PATTERN
    pub bpm: u32,

    // When the last row fired. Not restored on startup; a timestamp from
    // the previous process would be garbage here.
    #[serde(skip)]
    pub last_step: Option<Instant>,
}

impl Default for Transport {
    fn default() -> Self {
        Self {
            playing: false,
            song_pos: 0,
            row: 0,
            bpm: 120,
            last_step: None,
        }
    }
}

impl Transport {
    // one row every beat: (60 / bpm) * 1000 milliseconds
    pub fn step_interval(&self) -> Duration {
        Duration::from_secs_f64(60.0 / f64::from(self.bpm))
    }

    fn normalize(&mut self) {
        // a restarted process never resumes playing on its own, and a
        // position saved by an older, larger grid goes back to the top
        self.playing = false;
        self.last_step = None;
        self.bpm = self.bpm.clamp(BPM_MIN, BPM_MAX);
        if self.song_pos >= SONG_LENGTH {
            self.song_pos = 0;
        }
        if self.row >= ROWS_PER_PATTERN {
            self.row = 0;
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectState {
    pub song: Song,
    pub patterns: PatternBank,
    pub selected_pattern: u8,  // which pattern the cell edits address
    pub clipboard: Option<u8>, // one shared cell value moved by cut/put
    pub transport: Transport,
}

impl Default for ProjectState {
    fn default() -> Self {
        Self {
            song: Song::default(),
            patterns: PatternBank::default(),
            selected_pattern: 0,
            clipboard: None,
            transport: Transport::default(),
        }
    }
}

impl ProjectState {
    // Bring whatever came out of an old or hand-edited json back to the
    // fixed dimensions and value ranges. Runs once right after load.
    pub fn normalize(&mut self) {
        self.song.normalize();
        self.patterns.normalize();
        self.transport.normalize();
    }
}

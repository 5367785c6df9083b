// The control surface, one command per stdin line:
//
//   play                    //  TogglePlay (resume from wherever the transport sits)
//   play top                //  PlayFromTop (reset to position 0, row 0, then play)
//   stop                    //  Stop
//   bpm 140                 //  SetBpm(140)
//   pattern 5               //  SelectPattern(5), what the cell commands address
//   pattern bump -16        //  BumpPattern(-16)
//   set note 0 60           //  SetCell (columns are note/vol/ins, or 0/1/2)
//   put vol 3               //  PutCell (paste clipboard, or 0 if empty)
//   cut note 0              //  CutCell (cell moves to clipboard)
//   bump ins 3 16           //  BumpCell (wrapping add, delta is 1/-1/16/-16)
//   slot 0 0 5              //  SetSlot (pattern 5 on track 0 at song position 0)
//   slot 0 0 -              //  SetSlot clearing the slot
//   song put 2 10           //  PutSlot
//   song cut 2 10           //  CutSlot
//   song bump 2 10 1        //  BumpSlot
//   status                  //  Status (print the display snapshot)
//   new                     //  NewProject
//   save                    //  Save
//   quit                    //  Quit (EOF does the same)
//
// The idea of the layering:
//   - repl.rs turns lines into `Command`s on its own thread, nothing more.
//   - tracker.rs is where all the state lives; it turns `Command`s and elapsed
//     time into `MidiCommand`s for the device, and hands main a `DisplayState`
//     when asked. main just shuttles values between the three.

pub const NUM_TRACKS: usize = 8;
pub const SONG_LENGTH: usize = 64;
pub const NUM_PATTERNS: usize = 256;
pub const ROWS_PER_PATTERN: usize = 16;
pub const NUM_COLS: usize = 3;

// column order within a pattern
pub const NOTE_COL: usize = 0;
pub const VOLUME_COL: usize = 1;
pub const INSTRUMENT_COL: usize = 2;

// exclusive value bound per column; also the modulus for the wrapping edits
pub const COLUMN_MAX: [u16; NUM_COLS] = [128, 256, 256];

pub const BPM_MIN: u32 = 1;
pub const BPM_MAX: u32 = 999;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    // transport
    TogglePlay,
    PlayFromTop,
    Stop,
    SetBpm(u32), // clamped to BPM_MIN..=BPM_MAX on the way in

    // pattern selection (which pattern the cell commands below address)
    SelectPattern(u8),
    BumpPattern(i32),

    // cell edits on the selected pattern
    SetCell { col: usize, row: usize, value: u16 },
    PutCell { col: usize, row: usize },
    CutCell { col: usize, row: usize },
    BumpCell { col: usize, row: usize, delta: i32 },

    // song timeline edits
    SetSlot { track: usize, pos: usize, id: Option<u8> },
    PutSlot { track: usize, pos: usize },
    CutSlot { track: usize, pos: usize },
    BumpSlot { track: usize, pos: usize, delta: i32 },

    // project file ops, routed by main since they touch the disk
    NewProject,
    Save,

    Status,
    Quit,
}

// What the host reads back when asked. Plain data, no references into the
// model.
#[derive(Clone, Debug)]
pub struct DisplayState {
    pub playing: bool,
    pub song_pos: usize,
    pub row: usize,
    pub bpm: u32,
    pub selected_pattern: u8,
    pub channels: [Option<u8>; NUM_TRACKS], // currently sounding note per track
}

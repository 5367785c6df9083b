// Line commands in, Command values out. Reading happens on its own thread
// so the tick loop never blocks on stdin; bad lines get logged and
// swallowed right here.

use std::io::BufRead;
use std::thread;

use crossbeam_channel::Receiver;
use log::warn;

use crate::shared::{
    Command, INSTRUMENT_COL, NOTE_COL, NUM_COLS, NUM_TRACKS, ROWS_PER_PATTERN, SONG_LENGTH,
    VOLUME_COL,
};

// The tick loop only ever try_recvs, so a closed channel alone wouldn't
// stop it; EOF turns into an explicit Quit instead.
pub fn spawn_stdin_reader() -> Receiver<Command> {
    let (tx, rx) = crossbeam_channel::bounded::<Command>(64);
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match parse(&line) {
                Some(cmd) => {
                    let quit = cmd == Command::Quit;
                    if tx.send(cmd).is_err() || quit {
                        return;
                    }
                }
                None => {
                    if !line.trim().is_empty() {
                        warn!("unknown command: {}", line.trim());
                    }
                }
            }
        }
        let _ = tx.send(Command::Quit);
    });
    rx
}

pub fn parse(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        ["play"] => Some(Command::TogglePlay),
        ["play", "top"] => Some(Command::PlayFromTop),
        ["stop"] => Some(Command::Stop),
        ["bpm", n] => n.parse().ok().map(Command::SetBpm),
        ["pattern", "bump", d] => parse_delta(d).map(Command::BumpPattern),
        ["pattern", id] => id.parse().ok().map(Command::SelectPattern),
        ["set", col, row, value] => Some(Command::SetCell {
            col: parse_col(col)?,
            row: parse_index(row, ROWS_PER_PATTERN)?,
            value: value.parse().ok()?,
        }),
        ["put", col, row] => Some(Command::PutCell {
            col: parse_col(col)?,
            row: parse_index(row, ROWS_PER_PATTERN)?,
        }),
        ["cut", col, row] => Some(Command::CutCell {
            col: parse_col(col)?,
            row: parse_index(row, ROWS_PER_PATTERN)?,
        }),
        ["bump", col, row, d] => Some(Command::BumpCell {
            col: parse_col(col)?,
            row: parse_index(row, ROWS_PER_PATTERN)?,
            delta: parse_delta(d)?,
        }),
        ["slot", track, pos, id] => Some(Command::SetSlot {
            track: parse_index(track, NUM_TRACKS)?,
            pos: parse_index(pos, SONG_LENGTH)?,
            id: if *id == "-" { None } else { Some(id.parse().ok()?) },
        }),
        ["song", "put", track, pos] => Some(Command::PutSlot {
            track: parse_index(track, NUM_TRACKS)?,
            pos: parse_index(pos, SONG_LENGTH)?,
        }),
        ["song", "cut", track, pos] => Some(Command::CutSlot {
            track: parse_index(track, NUM_TRACKS)?,
            pos: parse_index(pos, SONG_LENGTH)?,
        }),
        ["song", "bump", track, pos, d] => Some(Command::BumpSlot {
            track: parse_index(track, NUM_TRACKS)?,
            pos: parse_index(pos, SONG_LENGTH)?,
            delta: parse_delta(d)?,
        }),
        ["status"] => Some(Command::Status),
        ["new"] => Some(Command::NewProject),
        ["save"] => Some(Command::Save),
        ["quit"] | ["exit"] | ["q"] => Some(Command::Quit),
        _ => None,
    }
}

fn parse_col(token: &str) -> Option<usize> {
    match token {
        "note" | "n" => Some(NOTE_COL),
        "vol" | "v" => Some(VOLUME_COL),
        "ins" | "i" => Some(INSTRUMENT_COL),
        _ => token.parse().ok().filter(|c| *c < NUM_COLS),
    }
}

fn parse_index(token: &str, bound: usize) -> Option<usize> {
    token.parse().ok().filter(|i| *i < bound)
}

// a bump is one of the four tracker nudges, nothing else
fn parse_delta(token: &str) -> Option<i32> {
    let delta: i32 = token.parse().ok()?;
    matches!(delta, 1 | -1 | 16 | -16).then_some(delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_lines() {
        assert_eq!(parse("play"), Some(Command::TogglePlay));
        assert_eq!(parse("play top"), Some(Command::PlayFromTop));
        assert_eq!(parse("  stop  "), Some(Command::Stop));
        assert_eq!(parse("bpm 140"), Some(Command::SetBpm(140)));
        assert_eq!(parse("bpm"), None);
        assert_eq!(parse("bpm fast"), None);
    }

    #[test]
    fn test_pattern_selection_lines() {
        assert_eq!(parse("pattern 5"), Some(Command::SelectPattern(5)));
        assert_eq!(parse("pattern 256"), None);
        assert_eq!(parse("pattern bump -16"), Some(Command::BumpPattern(-16)));
        assert_eq!(parse("pattern bump 3"), None);
    }

    #[test]
    fn test_cell_lines() {
        assert_eq!(
            parse("set note 0 60"),
            Some(Command::SetCell { col: NOTE_COL, row: 0, value: 60 })
        );
        assert_eq!(
            parse("set 2 15 255"),
            Some(Command::SetCell { col: 2, row: 15, value: 255 })
        );
        assert_eq!(parse("set vol 16 10"), None);
        assert_eq!(parse("set fx 0 10"), None);
        assert_eq!(
            parse("cut i 3"),
            Some(Command::CutCell { col: INSTRUMENT_COL, row: 3 })
        );
        assert_eq!(
            parse("put v 0"),
            Some(Command::PutCell { col: VOLUME_COL, row: 0 })
        );
        assert_eq!(
            parse("bump note 0 16"),
            Some(Command::BumpCell { col: NOTE_COL, row: 0, delta: 16 })
        );
        assert_eq!(parse("bump note 0 2"), None);
    }

    #[test]
    fn test_slot_lines() {
        assert_eq!(
            parse("slot 0 0 5"),
            Some(Command::SetSlot { track: 0, pos: 0, id: Some(5) })
        );
        assert_eq!(
            parse("slot 3 63 -"),
            Some(Command::SetSlot { track: 3, pos: 63, id: None })
        );
        assert_eq!(parse("slot 8 0 5"), None);
        assert_eq!(parse("slot 0 64 5"), None);
        assert_eq!(
            parse("song bump 2 10 1"),
            Some(Command::BumpSlot { track: 2, pos: 10, delta: 1 })
        );
        assert_eq!(
            parse("song cut 2 10"),
            Some(Command::CutSlot { track: 2, pos: 10 })
        );
        assert_eq!(
            parse("song put 7 63"),
            Some(Command::PutSlot { track: 7, pos: 63 })
        );
    }

    #[test]
    fn test_file_and_misc_lines() {
        assert_eq!(parse("status"), Some(Command::Status));
        assert_eq!(parse("new"), Some(Command::NewProject));
        assert_eq!(parse("save"), Some(Command::Save));
        assert_eq!(parse("quit"), Some(Command::Quit));
        assert_eq!(parse("exit"), Some(Command::Quit));
        assert_eq!(parse("q"), Some(Command::Quit));
        assert_eq!(parse(""), None);
        assert_eq!(parse("   "), None);
        assert_eq!(parse("jazz hands"), None);
    }
}

// What the sequencer asks the device layer to do. Channel is the track
// index, mapped 1:1 onto a midi channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MidiCommand {
    // Start sounding `note` on `channel`. A channel only ever carries one
    // note at a time, so a NoteOn also replaces whatever was sounding.
    NoteOn { channel: u8, note: u8 },

    // Release whatever `channel` is sounding. Safe to send to an already
    // silent channel.
    NoteOff { channel: u8 },
}

mod playback;

pub use playback::Engine;

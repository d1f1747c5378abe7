//! MIDI cue playback for edge events.
//!
//! The original interaction rig answered every button hit and joint
//! intersection with a short sound. Here each event maps to a MIDI note and
//! is played on a dedicated worker thread: the sink's `on_event` only sends
//! over a channel, so a slow or blocking note never delays the next frame's
//! evaluation.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use skeleton_interact_core::{EventSink, InteractionEvent};

const CHANNEL: u8 = 0;
const VELOCITY: u8 = 100;
const NOTE_MS: u64 = 120;

/// MIDI note announcing an event. Buttons walk up from middle C, proximity
/// pairings from the C an octave above, so every detector in a rig gets a
/// distinct pitch.
pub fn cue_note(event: &InteractionEvent) -> u8 {
    match event {
        InteractionEvent::RegionEntered { button, .. } => 60 + (*button as u8 % 12),
        InteractionEvent::ProximityEntered { pair, .. } => 72 + (*pair as u8 % 12),
    }
}

trait MidiOut: Send {
    fn note_on(&mut self, channel: u8, note: u8, velocity: u8);
    fn note_off(&mut self, channel: u8, note: u8);
}

struct MidirOut {
    conn: midir::MidiOutputConnection,
}

impl MidiOut for MidirOut {
    fn note_on(&mut self, channel: u8, note: u8, velocity: u8) {
        let _ = self.conn.send(&[0x90 | (channel & 0x0F), note, velocity]);
    }
    fn note_off(&mut self, channel: u8, note: u8) {
        let _ = self.conn.send(&[0x80 | (channel & 0x0F), note, 0]);
    }
}

/// Silent stand-in used when no MIDI port can be opened.
struct NullOut;

impl MidiOut for NullOut {
    fn note_on(&mut self, _channel: u8, _note: u8, _velocity: u8) {}
    fn note_off(&mut self, _channel: u8, _note: u8) {}
}

/// Opens the first available MIDI output port, falling back to the silent
/// output so the pipeline keeps running on machines without a synthesiser.
fn open_midi_output() -> Box<dyn MidiOut> {
    let midi_out = match midir::MidiOutput::new("skeleton-interact-cues") {
        Ok(out) => out,
        Err(err) => {
            tracing::warn!(%err, "MIDI init failed, cues will be silent");
            return Box::new(NullOut);
        }
    };

    let ports = midi_out.ports();
    if ports.is_empty() {
        tracing::warn!("no MIDI output ports found, cues will be silent");
        return Box::new(NullOut);
    }

    let port = &ports[0];
    let name = midi_out
        .port_name(port)
        .unwrap_or_else(|_| "unknown".to_string());
    match midi_out.connect(port, "skeleton-interact-cue") {
        Ok(conn) => {
            tracing::info!(port = %name, "MIDI cue output connected");
            Box::new(MidirOut { conn })
        }
        Err(err) => {
            tracing::warn!(%err, port = %name, "MIDI connect failed, cues will be silent");
            Box::new(NullOut)
        }
    }
}

fn cue_thread(rx: Receiver<u8>) {
    let mut midi = open_midi_output();
    for note in rx {
        midi.note_on(CHANNEL, note, VELOCITY);
        thread::sleep(Duration::from_millis(NOTE_MS));
        midi.note_off(CHANNEL, note);
    }
}

/// Event sink that plays a short MIDI note per edge event.
///
/// The worker thread owns the MIDI connection; dropping the sink closes the
/// channel and lets the worker finish its last note and exit.
pub struct MidiCueSink {
    tx: Sender<u8>,
}

impl MidiCueSink {
    /// Spawns the playback worker and returns the sink to register.
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || cue_thread(rx));
        Self { tx }
    }

    #[cfg(test)]
    fn with_sender(tx: Sender<u8>) -> Self {
        Self { tx }
    }
}

impl EventSink for MidiCueSink {
    fn on_event(&mut self, event: &InteractionEvent) {
        // Fire and forget; a gone worker only means silent cues.
        let _ = self.tx.send(cue_note(event));
    }
}

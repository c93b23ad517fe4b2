/// Audio cues: short procedural tones for game events, played via rodio.
///
/// Every cue is synthesised once into an in-memory WAV buffer when the
/// engine starts. Playback is fire-and-forget through a detached Sink.
///
/// Build without the "sound" feature to drop audio entirely; the stub
/// engine keeps the same API and does nothing.

use crate::sim::event::GameEvent;

/// The distinct sounds the game can make.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cue {
    Pickup,
    TaskComplete,
    Discovery,
    Warp,
    Refusal,
    MissionComplete,
}

#[cfg_attr(not(feature = "sound"), allow(dead_code))]
impl Cue {
    const ALL: [Cue; 6] = [
        Cue::Pickup,
        Cue::TaskComplete,
        Cue::Discovery,
        Cue::Warp,
        Cue::Refusal,
        Cue::MissionComplete,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Which cue (if any) an event should trigger. Spawns, expiries and the end
/// of a warp are silent.
pub fn cue_for(event: &GameEvent) -> Option<Cue> {
    match event {
        GameEvent::PowerPackCollected { .. } => Some(Cue::Pickup),
        GameEvent::TaskCompleted { .. } => Some(Cue::TaskComplete),
        GameEvent::SystemScanned { .. } => Some(Cue::Discovery),
        GameEvent::WarpEngaged { .. } => Some(Cue::Warp),
        GameEvent::ScanRefused | GameEvent::WarpRefused | GameEvent::NothingToScan => Some(Cue::Refusal),
        GameEvent::MissionComplete { .. } => Some(Cue::MissionComplete),
        GameEvent::PowerPackSpawned { .. }
        | GameEvent::PowerPackExpired { .. }
        | GameEvent::WarpFinished { .. } => None,
    }
}

#[cfg(feature = "sound")]
mod inner {
    use std::f32::consts::TAU;
    use std::io::Cursor;
    use std::sync::Arc;

    use rodio::{OutputStream, OutputStreamHandle, Sink};

    use super::Cue;

    const SAMPLE_RATE: u32 = 22050;

    pub struct SoundEngine {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        buffers: Vec<Arc<Vec<u8>>>,
    }

    impl SoundEngine {
        /// None when no audio device is available.
        pub fn new() -> Option<Self> {
            let (stream, handle) = OutputStream::try_default().ok()?;
            let buffers = Cue::ALL
                .iter()
                .map(|&cue| Arc::new(make_wav(&synth(cue))))
                .collect();
            Some(SoundEngine { _stream: stream, handle, buffers })
        }

        pub fn play(&self, cue: Cue) {
            let Some(buf) = self.buffers.get(cue.index()) else { return };
            if let Ok(sink) = Sink::try_new(&self.handle) {
                if let Ok(src) = rodio::Decoder::new(Cursor::new(buf.as_ref().clone())) {
                    sink.append(src);
                    sink.detach();
                }
            }
        }
    }

    fn synth(cue: Cue) -> Vec<f32> {
        match cue {
            // bright two-step chirp
            Cue::Pickup => notes(&[(1319.0, 0.04), (1760.0, 0.07)], 0.22),
            Cue::TaskComplete => notes(&[(659.0, 0.08), (784.0, 0.08), (1047.0, 0.18)], 0.28),
            Cue::Discovery => notes(&[(880.0, 0.06)], 0.18),
            Cue::Warp => sweep(180.0, 1400.0, 0.6, 0.25),
            Cue::Refusal => notes(&[(220.0, 0.09), (165.0, 0.12)], 0.25),
            Cue::MissionComplete => {
                notes(&[(523.0, 0.1), (659.0, 0.1), (784.0, 0.1), (1047.0, 0.1), (1319.0, 0.3)], 0.3)
            }
        }
    }

    /// Sequence of tones with a soft decay per note and a touch of octave.
    fn notes(seq: &[(f32, f32)], volume: f32) -> Vec<f32> {
        let mut out = Vec::new();
        for &(freq, secs) in seq {
            let n = (SAMPLE_RATE as f32 * secs) as usize;
            for i in 0..n {
                let t = i as f32 / SAMPLE_RATE as f32;
                let env = 1.0 - (i as f32 / n as f32).powf(0.7);
                let wave = (t * freq * TAU).sin() * 0.75 + (t * freq * 2.0 * TAU).sin() * 0.25;
                out.push(wave * env * volume);
            }
        }
        out
    }

    /// Rising whoosh for the warp jump.
    fn sweep(from: f32, to: f32, secs: f32, volume: f32) -> Vec<f32> {
        let n = (SAMPLE_RATE as f32 * secs) as usize;
        let mut phase = 0.0_f32;
        (0..n)
            .map(|i| {
                let p = i as f32 / n as f32;
                let freq = from + (to - from) * p * p;
                phase += freq / SAMPLE_RATE as f32;
                let env = (p * 8.0).min(1.0) * (1.0 - p);
                (phase * TAU).sin() * env * volume
            })
            .collect()
    }

    /// 16-bit mono PCM WAV.
    fn make_wav(samples: &[f32]) -> Vec<u8> {
        let data_size = samples.len() as u32 * 2;
        let mut buf = Vec::with_capacity(44 + data_size as usize);

        buf.extend_from_slice(b"RIFF");
        buf.extend_from_slice(&(36 + data_size).to_le_bytes());
        buf.extend_from_slice(b"WAVE");

        buf.extend_from_slice(b"fmt ");
        buf.extend_from_slice(&16u32.to_le_bytes());
        buf.extend_from_slice(&1u16.to_le_bytes());            // PCM
        buf.extend_from_slice(&1u16.to_le_bytes());            // mono
        buf.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
        buf.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes()); // byte rate
        buf.extend_from_slice(&2u16.to_le_bytes());            // block align
        buf.extend_from_slice(&16u16.to_le_bytes());           // bits per sample

        buf.extend_from_slice(b"data");
        buf.extend_from_slice(&data_size.to_le_bytes());
        for &s in samples {
            let v = (s.clamp(-1.0, 1.0) * 32767.0) as i16;
            buf.extend_from_slice(&v.to_le_bytes());
        }
        buf
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn wav_header_matches_payload() {
            let wav = make_wav(&synth(Cue::Discovery));
            assert_eq!(&wav[0..4], b"RIFF");
            assert_eq!(&wav[8..12], b"WAVE");
            let data_size = u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]]) as usize;
            assert_eq!(wav.len(), 44 + data_size);
        }

        #[test]
        fn every_cue_has_audio() {
            for cue in Cue::ALL {
                let s = synth(cue);
                assert!(!s.is_empty());
                assert!(s.iter().all(|v| v.abs() <= 1.0));
            }
        }
    }
}

#[cfg(feature = "sound")]
pub use inner::SoundEngine;

#[cfg(not(feature = "sound"))]
pub struct SoundEngine;

#[cfg(not(feature = "sound"))]
impl SoundEngine {
    pub fn new() -> Option<Self> { Some(SoundEngine) }
    pub fn play(&self, _cue: Cue) {}
}

/// Play the cue of every event in order.
pub fn play_events(sound: Option<&SoundEngine>, events: &[GameEvent]) {
    let Some(sfx) = sound else { return };
    for cue in events.iter().filter_map(cue_for) {
        sfx.play(cue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_map_to_cues() {
        assert_eq!(cue_for(&GameEvent::PowerPackCollected { x: 1, y: 1 }), Some(Cue::Pickup));
        assert_eq!(cue_for(&GameEvent::WarpRefused), Some(Cue::Refusal));
        assert_eq!(cue_for(&GameEvent::ScanRefused), Some(Cue::Refusal));
        assert_eq!(cue_for(&GameEvent::WarpEngaged { galaxy: "Andromeda" }), Some(Cue::Warp));
        assert_eq!(cue_for(&GameEvent::MissionComplete { galaxy: "Andromeda" }), Some(Cue::MissionComplete));
        assert_eq!(cue_for(&GameEvent::PowerPackSpawned { x: 0, y: 0 }), None);
        assert_eq!(cue_for(&GameEvent::WarpFinished { galaxy: "Andromeda" }), None);
    }

    #[test]
    fn cue_indices_are_dense() {
        for (i, cue) in Cue::ALL.iter().enumerate() {
            assert_eq!(cue.index(), i);
        }
    }
}

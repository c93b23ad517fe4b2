/// Events emitted during a simulation step.
/// The presentation layer consumes these for audio cues; the log records them.

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    PowerPackSpawned { x: i32, y: i32 },
    PowerPackExpired { x: i32, y: i32 },
    PowerPackCollected { x: i32, y: i32 },
    TaskCompleted { system: String, task: &'static str, reward: u64 },
    SystemScanned { system: String },
    NothingToScan,
    ScanRefused,
    WarpEngaged { galaxy: &'static str },
    WarpRefused,
    WarpFinished { galaxy: &'static str },
    MissionComplete { galaxy: &'static str },
}

/// Why the player was sent back to the spawn point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    Hazard,
    FellOut,
}

/// Something notable that happened during a tick. Drained by the driver after each step.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameEvent {
    /// x/y is where the player was when it died, before the respawn moved it.
    PlayerDied { cause: DeathCause, x: f32, y: f32 },
    Jumped,
    /// Only emitted on the airborne -> grounded transition.
    Landed { y: f32 },
    SceneRebuilt { generation: u64 },
}

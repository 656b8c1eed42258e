//! Compact MessagePack snapshots of a ball, for replays and broadcasting a
//! shot in flight.

use glam::Vec3;

use crate::ball::{BallState, Trail};

/// Leading byte of every snapshot.
pub const SNAPSHOT_VERSION: u8 = 1;

/// Maximum encoded snapshot size in bytes.
pub const MAX_SNAPSHOT_SIZE: usize = 64 * 1024; // 64 KiB

#[derive(Debug)]
pub enum SnapshotError {
    Encode(String),
    Decode(String),
    TooLarge(usize),
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(e) => write!(f, "snapshot encode error: {e}"),
            Self::Decode(e) => write!(f, "snapshot decode error: {e}"),
            Self::TooLarge(size) => {
                write!(
                    f,
                    "snapshot too large: {size} bytes (max {MAX_SNAPSHOT_SIZE})"
                )
            },
        }
    }
}

impl std::error::Error for SnapshotError {}

/// Encode a ball with a 1-byte version prefix.
pub fn encode_snapshot(ball: &BallState) -> Result<Vec<u8>, SnapshotError> {
    let body = rmp_serde::to_vec(ball).map_err(|e| SnapshotError::Encode(e.to_string()))?;
    let total = 1 + body.len();
    if total > MAX_SNAPSHOT_SIZE {
        return Err(SnapshotError::TooLarge(total));
    }
    let mut buf = Vec::with_capacity(total);
    buf.push(SNAPSHOT_VERSION);
    buf.extend_from_slice(&body);
    Ok(buf)
}

pub fn decode_snapshot(data: &[u8]) -> Result<BallState, SnapshotError> {
    if data.len() > MAX_SNAPSHOT_SIZE {
        return Err(SnapshotError::TooLarge(data.len()));
    }
    let Some((&version, body)) = data.split_first() else {
        return Err(SnapshotError::Decode("empty snapshot".to_string()));
    };
    if version != SNAPSHOT_VERSION {
        return Err(SnapshotError::Decode(format!(
            "unsupported snapshot version {version}"
        )));
    }
    let ball: BallState =
        rmp_serde::from_slice(body).map_err(|e| SnapshotError::Decode(e.to_string()))?;
    if ball.trail().len() > Trail::CAPACITY {
        return Err(SnapshotError::Decode(format!(
            "trail holds {} points (max {})",
            ball.trail().len(),
            Trail::CAPACITY
        )));
    }
    if !(ball.position.is_finite() && ball.velocity.is_finite() && ball.spin.is_finite()) {
        return Err(SnapshotError::Decode("non-finite ball state".to_string()));
    }
    if !ball.trail().iter().all(|p| p.is_finite()) {
        return Err(SnapshotError::Decode("non-finite trail point".to_string()));
    }
    // A stopped ball has zero velocity and spin
    if !ball.is_moving() && (ball.velocity != Vec3::ZERO || ball.spin != Vec3::ZERO) {
        return Err(SnapshotError::Decode(
            "stopped ball still has velocity or spin".to_string(),
        ));
    }
    Ok(ball)
}

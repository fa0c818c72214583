//! Interactive commands and the state transition they cause.
//!
//! Keys map onto a closed set of [`Command`]s; [`transition`] turns a
//! command into a [`Transition`] without touching any state, and the
//! engine applies the result.

use crate::config::RenderConfig;
use crate::math::vec3::Vec3;
use crate::transform::Transform;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// key: w
    RotateYPos,
    /// key: s
    RotateYNeg,
    /// key: d
    RotateXPos,
    /// key: a
    RotateXNeg,
    /// key: i (light y + step)
    LightUp,
    /// key: k (light y - step)
    LightDown,
    /// key: j (light x + step)
    LightLeft,
    /// key: l (light x - step)
    LightRight,
    /// key: n (light z - half step, toward the viewer)
    LightNear,
    /// key: m (light z + half step)
    LightFar,
}

impl Command {
    /// Maps a key to its command. Unknown keys map to `None`.
    pub fn from_key(key: char) -> Option<Command> {
        match key {
            'w' => Some(Command::RotateYPos),
            's' => Some(Command::RotateYNeg),
            'd' => Some(Command::RotateXPos),
            'a' => Some(Command::RotateXNeg),
            'i' => Some(Command::LightUp),
            'k' => Some(Command::LightDown),
            'j' => Some(Command::LightLeft),
            'l' => Some(Command::LightRight),
            'n' => Some(Command::LightNear),
            'm' => Some(Command::LightFar),
            _ => None,
        }
    }

    /// Parses a run of keys, dropping unrecognized characters.
    pub fn parse_keys(keys: &str) -> Vec<Command> {
        keys.chars().filter_map(Command::from_key).collect()
    }
}

/// The effect a command has on the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// Rotate every triangle, then refit the scene to the canvas.
    Rotate(Transform),
    /// Add this offset to the light direction.
    MoveLight(Vec3),
}

pub fn transition(command: Command, config: &RenderConfig) -> Transition {
    let angle = config.rotation_step;
    let step = config.light_step;
    let depth_step = step * 0.5;

    match command {
        Command::RotateYPos => Transition::Rotate(Transform::rotation_y(angle)),
        Command::RotateYNeg => Transition::Rotate(Transform::rotation_y(-angle)),
        Command::RotateXPos => Transition::Rotate(Transform::rotation_x(angle)),
        Command::RotateXNeg => Transition::Rotate(Transform::rotation_x(-angle)),
        Command::LightUp => Transition::MoveLight(Vec3::new(0.0, step, 0.0)),
        Command::LightDown => Transition::MoveLight(Vec3::new(0.0, -step, 0.0)),
        Command::LightLeft => Transition::MoveLight(Vec3::new(step, 0.0, 0.0)),
        Command::LightRight => Transition::MoveLight(Vec3::new(-step, 0.0, 0.0)),
        Command::LightNear => Transition::MoveLight(Vec3::new(0.0, 0.0, -depth_step)),
        Command::LightFar => Transition::MoveLight(Vec3::new(0.0, 0.0, depth_step)),
    }
}

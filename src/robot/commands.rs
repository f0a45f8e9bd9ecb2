//! Command frames exchanged with the robot, and text gait selection.
//!
//! A frame is `[command_type, payload_count, payload..]`. Integer payloads are
//! little-endian `i32`s; a gait selection is a single byte.
use heapless::Vec;
use thiserror::Error;

use crate::error::CommandError;
use crate::gait::{Frame, GaitFamily, Movement};

/// Largest encoded frame: header plus eight `i32`s.
pub const MAX_FRAME_LEN: usize = 2 + 8 * 4;

pub type EncodedCommand = Vec<u8, MAX_FRAME_LEN>;

/// Command type byte, in the order the receiver enumerates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CommandType {
    Move = 0,
    Battery = 1,
    Record = 2,
    SendRecorded = 3,
    Jump = 4,
    SetTorque = 5,
    SetProfile = 6,
    SetGait = 7,
}

impl TryFrom<u8> for CommandType {
    type Error = CommandError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CommandType::Move),
            1 => Ok(CommandType::Battery),
            2 => Ok(CommandType::Record),
            3 => Ok(CommandType::SendRecorded),
            4 => Ok(CommandType::Jump),
            5 => Ok(CommandType::SetTorque),
            6 => Ok(CommandType::SetProfile),
            7 => Ok(CommandType::SetGait),
            other => Err(CommandError::UnknownCommand(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Joint targets in whole degrees, [`Frame`] order.
    Move([i32; 8]),
    Battery,
    Record,
    SendRecorded,
    Jump,
    SetTorque(bool),
    /// Move duration in milliseconds.
    SetProfile(i32),
    /// Start replaying a gait by index, or stop with `None`.
    SetGait(Option<u8>),
}

impl Command {
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Move(_) => CommandType::Move,
            Command::Battery => CommandType::Battery,
            Command::Record => CommandType::Record,
            Command::SendRecorded => CommandType::SendRecorded,
            Command::Jump => CommandType::Jump,
            Command::SetTorque(_) => CommandType::SetTorque,
            Command::SetProfile(_) => CommandType::SetProfile,
            Command::SetGait(_) => CommandType::SetGait,
        }
    }

    pub fn encode(&self) -> EncodedCommand {
        let mut out = EncodedCommand::new();
        let mut push = |bytes: &[u8]| {
            // never exceeds MAX_FRAME_LEN
            let _ = out.extend_from_slice(bytes);
        };

        let kind = self.command_type() as u8;
        match self {
            Command::Move(values) => {
                push(&[kind, values.len() as u8]);
                for value in values {
                    push(&value.to_le_bytes());
                }
            }
            Command::SetTorque(enabled) => {
                push(&[kind, 1]);
                push(&i32::from(*enabled).to_le_bytes());
            }
            Command::SetProfile(duration) => {
                push(&[kind, 1]);
                push(&duration.to_le_bytes());
            }
            Command::SetGait(Some(id)) => push(&[kind, 1, *id]),
            Command::SetGait(None)
            | Command::Battery
            | Command::Record
            | Command::SendRecorded
            | Command::Jump => push(&[kind, 0]),
        }
        out
    }

    pub fn decode(bytes: &[u8]) -> Result<Command, CommandError> {
        let [kind, count, payload @ ..] = bytes else {
            return Err(CommandError::Truncated {
                len: bytes.len(),
                expected: 2,
            });
        };
        let (kind, count) = (*kind, *count);
        let wrong_count = || CommandError::PayloadCount {
            command: kind,
            count,
        };

        let (command, used) = match CommandType::try_from(kind)? {
            CommandType::Move => {
                if count != 8 {
                    return Err(wrong_count());
                }
                let mut values = [0; 8];
                for (i, value) in values.iter_mut().enumerate() {
                    *value = read_i32(payload, i * 4)?;
                }
                (Command::Move(values), 32)
            }
            CommandType::SetTorque | CommandType::SetProfile => {
                if count != 1 {
                    return Err(wrong_count());
                }
                let value = read_i32(payload, 0)?;
                let command = if kind == CommandType::SetTorque as u8 {
                    Command::SetTorque(value != 0)
                } else {
                    Command::SetProfile(value)
                };
                (command, 4)
            }
            CommandType::SetGait => match count {
                0 => (Command::SetGait(None), 0),
                1 => {
                    let id = *payload.first().ok_or(CommandError::Truncated {
                        len: bytes.len(),
                        expected: 3,
                    })?;
                    (Command::SetGait(Some(id)), 1)
                }
                _ => return Err(wrong_count()),
            },
            simple => {
                if count != 0 {
                    return Err(wrong_count());
                }
                let command = match simple {
                    CommandType::Battery => Command::Battery,
                    CommandType::Record => Command::Record,
                    CommandType::SendRecorded => Command::SendRecorded,
                    _ => Command::Jump,
                };
                (command, 0)
            }
        };

        if payload.len() > used {
            return Err(CommandError::TrailingBytes(payload.len() - used));
        }
        Ok(command)
    }
}

fn read_i32(payload: &[u8], offset: usize) -> Result<i32, CommandError> {
    payload
        .get(offset..offset + 4)
        .and_then(|bytes| bytes.try_into().ok())
        .map(i32::from_le_bytes)
        .ok_or(CommandError::Truncated {
            len: payload.len() + 2,
            expected: offset + 6,
        })
}

impl From<&Frame> for Command {
    fn from(frame: &Frame) -> Self {
        Command::Move(frame.to_degrees())
    }
}

/// Flat index of a gait the robot knows by number.
pub fn gait_index(family: GaitFamily, movement: Movement) -> usize {
    family.index() * Movement::COUNT + movement.index()
}

/// A gait family and one of its movements, e.g. `"trot fl_0.75"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GaitSelection {
    pub family: GaitFamily,
    pub movement: Movement,
}

impl GaitSelection {
    pub fn new(family: GaitFamily, movement: Movement) -> Result<Self, CommandError> {
        if !family.supports(movement) {
            return Err(CommandError::UnsupportedMovement { family, movement });
        }
        Ok(Self { family, movement })
    }

    pub fn index(&self) -> usize {
        gait_index(self.family, self.movement)
    }
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum ParseSelectionError {
    #[error("expected `<family> [movement]`")]
    Syntax,
    #[error(transparent)]
    Command(#[from] CommandError),
}

impl TryFrom<&str> for GaitSelection {
    type Error = ParseSelectionError;

    /// The movement defaults to forward when omitted.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let mut tokens = value.split_whitespace();

        let family = tokens
            .next()
            .and_then(|s| s.parse::<GaitFamily>().ok())
            .ok_or(ParseSelectionError::Syntax)?;
        let movement = match tokens.next() {
            Some(key) => key.parse::<Movement>().map_err(|_| ParseSelectionError::Syntax)?,
            None => Movement::Forward,
        };
        if tokens.next().is_some() {
            return Err(ParseSelectionError::Syntax);
        }

        Ok(GaitSelection::new(family, movement)?)
    }
}

impl From<GaitSelection> for Command {
    fn from(selection: GaitSelection) -> Self {
        // 5 families x 12 movements fits in a byte
        Command::SetGait(Some(selection.index() as u8))
    }
}

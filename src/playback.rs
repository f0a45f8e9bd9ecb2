//! Cyclic replay of a generated gait as `MOVE` commands.
use log::{debug, info};

use crate::error::CommandError;
use crate::gait::{Frame, GaitTrajectorySet, Movement};
use crate::robot::commands::{Command, GaitSelection};

/// Steps through one movement of a borrowed set, wrapping at the end of the
/// cycle. The set is only read, so any number of players can share it.
#[derive(Debug, Clone)]
pub struct GaitPlayer<'a> {
    set: &'a GaitTrajectorySet,
    active: Option<(Movement, &'a [Frame])>,
    step: usize,
}

impl<'a> GaitPlayer<'a> {
    pub fn new(set: &'a GaitTrajectorySet) -> Self {
        Self {
            set,
            active: None,
            step: 0,
        }
    }

    /// Start `movement` from its first frame.
    pub fn select(&mut self, movement: Movement) -> Result<(), CommandError> {
        let unsupported = CommandError::UnsupportedMovement {
            family: self.set.family(),
            movement,
        };
        let frames = self.set.get(movement).ok_or(unsupported)?;
        if frames.is_empty() {
            return Err(unsupported);
        }

        info!("[PLAYER] {} {} ({} frames)", self.set.family(), movement, frames.len());
        self.active = Some((movement, frames));
        self.step = 0;
        Ok(())
    }

    pub fn stop(&mut self) {
        if let Some((movement, _)) = self.active.take() {
            info!("[PLAYER] stopped {movement} at step {}", self.step);
        }
        self.step = 0;
    }

    pub fn active(&self) -> Option<Movement> {
        self.active.map(|(movement, _)| movement)
    }

    /// Index of the frame the next call returns.
    pub fn step(&self) -> usize {
        self.step
    }

    /// The `SET_GAIT` command that makes the robot replay the same gait.
    pub fn selection_command(&self) -> Command {
        let selection = self
            .active()
            .and_then(|movement| GaitSelection::new(self.set.family(), movement).ok());
        match selection {
            Some(selection) => selection.into(),
            None => Command::SetGait(None),
        }
    }

    pub fn next_frame(&mut self) -> Option<&'a Frame> {
        let (_, frames) = self.active?;
        let frame = &frames[self.step];
        self.step += 1;
        if self.step == frames.len() {
            debug!("[PLAYER] cycle complete");
            self.step = 0;
        }
        Some(frame)
    }
}

impl Iterator for GaitPlayer<'_> {
    type Item = Command;

    fn next(&mut self) -> Option<Command> {
        self.next_frame().map(Command::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gait::GaitFamily;
    use alloc::collections::BTreeMap;
    use alloc::vec::Vec;

    fn bound_set() -> GaitTrajectorySet {
        let frames = |sign: i32| -> Vec<Frame> {
            (0..3)
                .map(|i| Frame::from([sign * i, 90, 0, 90, 0, 90, 0, 90]))
                .collect()
        };
        let trajectories = BTreeMap::from([
            (Movement::Forward, frames(1)),
            (Movement::Backward, frames(-1)),
        ]);
        GaitTrajectorySet::new(GaitFamily::Bound, trajectories)
    }

    #[test]
    fn idle_player_yields_nothing() {
        let set = bound_set();
        let mut player = GaitPlayer::new(&set);
        assert_eq!(player.next(), None);
        assert_eq!(player.selection_command(), Command::SetGait(None));
    }

    #[test]
    fn replays_cyclically() {
        let set = bound_set();
        let mut player = GaitPlayer::new(&set);
        player.select(Movement::Forward).unwrap();

        let first: Vec<i32> = player
            .by_ref()
            .take(7)
            .map(|command| match command {
                Command::Move(values) => values[0],
                other => panic!("unexpected {other:?}"),
            })
            .collect();

        assert_eq!(first, [0, 1, 2, 0, 1, 2, 0]);
        assert_eq!(player.step(), 1);
    }

    #[test]
    fn selecting_restarts_and_stop_clears() {
        let set = bound_set();
        let mut player = GaitPlayer::new(&set);
        player.select(Movement::Forward).unwrap();
        player.next();
        player.next();

        player.select(Movement::Backward).unwrap();
        assert_eq!(player.step(), 0);
        assert_eq!(player.next_frame().map(|f| f.0[0]), Some(0.0));
        assert_eq!(player.next_frame().map(|f| f.0[0]), Some(-1.0));
        assert_eq!(player.selection_command(), Command::SetGait(Some(25)));

        player.stop();
        assert_eq!(player.active(), None);
        assert_eq!(player.next(), None);
    }

    #[test]
    fn rejects_movements_the_set_lacks() {
        let set = bound_set();
        let mut player = GaitPlayer::new(&set);

        assert_eq!(
            player.select(Movement::Left),
            Err(CommandError::UnsupportedMovement {
                family: GaitFamily::Bound,
                movement: Movement::Left,
            })
        );
        assert_eq!(player.active(), None);
    }
}

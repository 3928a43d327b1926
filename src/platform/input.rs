//! Queued input
//!
//! Input may come from any thread. Commands wait in a channel until the loop
//! drains them, once per tick and before physics runs, so a tick always sees
//! a consistent state.

use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::sim::{Command, GamePhase, Simulation, Snapshot};

/// Commands buffered before senders start seeing `Full`
pub const QUEUE_CAPACITY: usize = 1024;

pub struct InputQueue {
    tx: Sender<Command>,
    rx: Receiver<Command>,
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl InputQueue {
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::bounded(QUEUE_CAPACITY);
        Self { tx, rx }
    }

    pub fn sender(&self) -> CommandSender {
        CommandSender {
            tx: self.tx.clone(),
        }
    }

    /// Apply every queued command in arrival order; returns how many
    pub fn drain(&self, sim: &mut Simulation) -> usize {
        let mut applied = 0;
        for command in self.rx.try_iter() {
            sim.apply(command);
            applied += 1;
        }
        applied
    }

    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}

/// Cloneable handle for producing commands
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: Sender<Command>,
}

impl CommandSender {
    /// Queue `command` without blocking; false when it was dropped
    pub fn send(&self, command: Command) -> bool {
        match self.tx.try_send(command) {
            Ok(()) => true,
            Err(TrySendError::Full(c)) => {
                log::warn!("input queue full, dropping {c:?}");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Plays by itself: launches when serving and keeps the paddle under the ball
#[derive(Debug, Default, Clone, Copy)]
pub struct Autopilot;

impl Autopilot {
    pub fn commands(&self, snapshot: &Snapshot) -> Vec<Command> {
        match snapshot.phase {
            GamePhase::Serve => vec![Command::Launch],
            GamePhase::Playing => vec![Command::MovePaddleTo(snapshot.ball.position.x)],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::sim::Level;

    fn sim() -> Simulation {
        let settings = Settings {
            seed: Some(5),
            ..Default::default()
        };
        Simulation::new(&settings, Level::parse("11"))
    }

    #[test]
    fn test_drain_applies_in_order() {
        let queue = InputQueue::new();
        let tx = queue.sender();
        let mut s = sim();

        assert!(tx.send(Command::MovePaddleTo(0.3)));
        assert!(tx.send(Command::Launch));
        assert!(tx.send(Command::TogglePause));
        assert_eq!(queue.pending(), 3);

        assert_eq!(queue.drain(&mut s), 3);
        assert_eq!(s.phase(), GamePhase::Paused);
        assert_eq!(s.paddle().position.x, 0.3);
        assert_eq!(queue.drain(&mut s), 0);
    }

    #[test]
    fn test_send_from_another_thread() {
        let queue = InputQueue::new();
        let tx = queue.sender();
        std::thread::spawn(move || {
            for _ in 0..10 {
                tx.send(Command::ToggleMute);
            }
        })
        .join()
        .unwrap();

        let mut s = sim();
        assert_eq!(queue.drain(&mut s), 10);
        assert!(!s.state().is_muted());
    }

    #[test]
    fn test_full_queue_drops() {
        let queue = InputQueue::new();
        let tx = queue.sender();
        for _ in 0..QUEUE_CAPACITY {
            assert!(tx.send(Command::ToggleMute));
        }
        assert!(!tx.send(Command::Launch));
    }

    #[test]
    fn test_autopilot() {
        let mut s = sim();
        let pilot = Autopilot;
        assert_eq!(pilot.commands(&s.snapshot()), vec![Command::Launch]);

        s.apply(Command::Launch);
        let snap = s.snapshot();
        assert_eq!(
            pilot.commands(&snap),
            vec![Command::MovePaddleTo(snap.ball.position.x)]
        );

        s.apply(Command::TogglePause);
        assert!(pilot.commands(&s.snapshot()).is_empty());
    }
}

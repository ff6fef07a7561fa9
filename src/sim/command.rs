//! Single-consumer command queue
//!
//! Input may arrive on other threads; it is funneled through a channel and
//! applied by the one loop that owns the session, right before each tick.

use std::sync::mpsc::{self, Receiver, Sender};

use super::state::GameSession;
use super::tick::Command;

/// Cloneable handle for input producers
#[derive(Debug, Clone)]
pub struct CommandSender {
    tx: Sender<Command>,
}

impl CommandSender {
    /// Queue a command; returns false once the loop is gone
    pub fn send(&self, command: Command) -> bool {
        self.tx.send(command).is_ok()
    }

    pub fn flap(&self) -> bool {
        self.send(Command::Flap)
    }

    pub fn restart(&self) -> bool {
        self.send(Command::Restart)
    }
}

/// Receiving end owned by the simulation loop
#[derive(Debug)]
pub struct CommandQueue {
    rx: Receiver<Command>,
}

impl CommandQueue {
    /// Connected sender/queue pair
    pub fn channel() -> (CommandSender, CommandQueue) {
        let (tx, rx) = mpsc::channel();
        (CommandSender { tx }, CommandQueue { rx })
    }

    /// Apply everything queued so far to the session, in arrival order
    pub fn drain_into(&self, session: &mut GameSession) -> usize {
        let mut applied = 0;
        while let Ok(command) = self.rx.try_recv() {
            session.apply(command);
            applied += 1;
        }
        applied
    }

    /// Advance one frame: pending commands first, then the tick
    pub fn step(&self, session: &mut GameSession, now_ms: f64) {
        self.drain_into(session);
        session.tick(now_ms);
    }
}

//! Process-wide pause switch.
//!
//! While paused, both the send and the receive paths reject with
//! [`SpiralError::SystemPaused`]. Pausing is a flag, not a shutdown: state is
//! untouched and unpausing restores both paths.

use spiral_types::{Result, SpiralError};

#[derive(Debug, Clone, Copy, Default)]
pub struct PauseSwitch {
    paused: bool,
}

impl PauseSwitch {
    /// Create a switch in the running (unpaused) state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pause. Returns `true` if the state changed.
    pub fn pause(&mut self) -> bool {
        !std::mem::replace(&mut self.paused, true)
    }

    /// Unpause. Returns `true` if the state changed.
    pub fn unpause(&mut self) -> bool {
        std::mem::replace(&mut self.paused, false)
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Guard a send or delivery. `Ok(())` while running.
    pub fn check_active(&self) -> Result<()> {
        if self.paused {
            Err(SpiralError::SystemPaused)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_running() {
        let switch = PauseSwitch::new();
        assert!(!switch.is_paused());
        assert!(switch.check_active().is_ok());
    }

    #[test]
    fn paused_blocks() {
        let mut switch = PauseSwitch::new();
        assert!(switch.pause());
        assert_eq!(switch.check_active(), Err(SpiralError::SystemPaused));
    }

    #[test]
    fn transitions_report_changes() {
        let mut switch = PauseSwitch::new();
        assert!(!switch.unpause(), "already running");
        assert!(switch.pause());
        assert!(!switch.pause(), "already paused");
        assert!(switch.unpause());
        assert!(switch.check_active().is_ok());
    }
}

//! Display state structure and management

use serde::{Deserialize, Serialize};

/// Display state structure - holds the host-reported conditions that decide
/// whether the redraw timer may run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayState {
    /// Whether the face is currently on screen
    pub visible: bool,
    /// Whether the watch is in low-power ambient mode
    pub ambient: bool,
}

impl DisplayState {
    /// Create a new DisplayState: hidden and interactive
    pub fn new() -> Self {
        Self {
            visible: false,
            ambient: false,
        }
    }

    /// Check if the redraw timer should be running
    pub fn timer_should_run(&self) -> bool {
        self.visible && !self.ambient
    }

    /// Copy with a new visibility
    pub fn with_visible(self, visible: bool) -> Self {
        Self { visible, ..self }
    }

    /// Copy with a new ambient flag
    pub fn with_ambient(self, ambient: bool) -> Self {
        Self { ambient, ..self }
    }
}

/// Device features the host reports during property negotiation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceProperties {
    /// Ambient mode only supports a reduced color depth
    pub low_bit_ambient: bool,
    /// Ambient mode requires burn-in protection
    pub burn_in_protection: bool,
}

impl DeviceProperties {
    /// Whether text should be anti-aliased in the given display state
    pub fn anti_alias_text(&self, state: DisplayState) -> bool {
        !(state.ambient && self.low_bit_ambient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_runs_only_when_visible_and_interactive() {
        let hidden = DisplayState::new();
        assert!(!hidden.timer_should_run());
        assert!(hidden.with_visible(true).timer_should_run());
        assert!(!hidden.with_visible(true).with_ambient(true).timer_should_run());
        assert!(!hidden.with_ambient(true).timer_should_run());
    }

    #[test]
    fn low_bit_ambient_disables_anti_aliasing() {
        let props = DeviceProperties {
            low_bit_ambient: true,
            burn_in_protection: false,
        };
        let active = DisplayState::new().with_visible(true);
        assert!(props.anti_alias_text(active));
        assert!(!props.anti_alias_text(active.with_ambient(true)));
        assert!(DeviceProperties::default().anti_alias_text(active.with_ambient(true)));
    }
}

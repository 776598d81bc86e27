//! # Camera Controls
//!
//! Maps keyboard, pointer and wheel events onto [`CameraState`]. The
//! interaction mode is not stored; it is derived from the modifier keys
//! currently held:
//!
//! - Control: pan with the primary button
//! - Alt: rotate (primary = pitch/yaw, secondary = pitch/roll)
//!
//! Alt wins when both are held. Every handler returns `true` when the
//! camera changed and the host should request a redraw.

use glam::DVec2;
use tracing::trace;

use super::camera::CameraState;

/// Keys the controller cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Control,
    Alt,
    Other,
}

/// A single pointer button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Set of held pointer buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerButtons {
    bits: u8,
}

impl PointerButtons {
    pub const NONE: PointerButtons = PointerButtons { bits: 0 };
    pub const PRIMARY: PointerButtons = PointerButtons { bits: 1 };
    pub const SECONDARY: PointerButtons = PointerButtons { bits: 2 };
    pub const MIDDLE: PointerButtons = PointerButtons { bits: 4 };

    pub fn with(self, button: PointerButton) -> Self {
        Self {
            bits: self.bits | Self::from(button).bits,
        }
    }

    pub fn without(self, button: PointerButton) -> Self {
        Self {
            bits: self.bits & !Self::from(button).bits,
        }
    }

    pub fn contains(&self, button: PointerButton) -> bool {
        self.bits & Self::from(button).bits != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

impl From<PointerButton> for PointerButtons {
    fn from(button: PointerButton) -> Self {
        match button {
            PointerButton::Primary => Self::PRIMARY,
            PointerButton::Secondary => Self::SECONDARY,
            PointerButton::Middle => Self::MIDDLE,
        }
    }
}

/// Interaction mode derived from held modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Idle,
    Panning,
    Rotating,
}

/// Cursor shape the host should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    Default,
    OpenHand,
    PointingHand,
    ClosedHand,
}

/// Event state machine driving a [`CameraState`]
#[derive(Debug, Clone, Default)]
pub struct CameraController {
    pan_held: bool,
    rotate_held: bool,
    buttons: PointerButtons,
    last_pos: DVec2,
}

impl CameraController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> InputMode {
        if self.rotate_held {
            InputMode::Rotating
        } else if self.pan_held {
            InputMode::Panning
        } else {
            InputMode::Idle
        }
    }

    pub fn buttons(&self) -> PointerButtons {
        self.buttons
    }

    pub fn cursor(&self) -> CursorHint {
        match self.mode() {
            InputMode::Idle => CursorHint::Default,
            _ if !self.buttons.is_empty() => CursorHint::ClosedHand,
            InputMode::Panning => CursorHint::OpenHand,
            InputMode::Rotating => CursorHint::PointingHand,
        }
    }

    pub fn key_down(&mut self, key: Key) -> bool {
        match key {
            Key::Control => self.pan_held = true,
            Key::Alt => self.rotate_held = true,
            Key::Other => {}
        }
        false
    }

    pub fn key_up(&mut self, key: Key) -> bool {
        match key {
            Key::Control => self.pan_held = false,
            Key::Alt => self.rotate_held = false,
            Key::Other => {}
        }
        false
    }

    pub fn pointer_down(&mut self, pos: DVec2, button: PointerButton) -> bool {
        self.last_pos = pos;
        self.buttons = self.buttons.with(button);
        false
    }

    pub fn pointer_up(&mut self, pos: DVec2, button: PointerButton) -> bool {
        self.last_pos = pos;
        self.buttons = self.buttons.without(button);
        false
    }

    /// `buttons` is the full set held during the move.
    pub fn pointer_move(
        &mut self,
        camera: &mut CameraState,
        pos: DVec2,
        buttons: PointerButtons,
    ) -> bool {
        self.buttons = buttons;
        let dx = pos.x - self.last_pos.x;
        let dy = -(pos.y - self.last_pos.y);
        self.last_pos = pos;

        let changed = match self.mode() {
            InputMode::Rotating if buttons == PointerButtons::PRIMARY => {
                camera.rotate(dx, dy, false);
                true
            }
            InputMode::Rotating if buttons == PointerButtons::SECONDARY => {
                camera.rotate(dx, dy, true);
                true
            }
            InputMode::Panning if buttons == PointerButtons::PRIMARY => {
                camera.pan(dx, dy);
                true
            }
            _ => false,
        };

        if changed {
            trace!("Pointer drag ({}, {}) in {:?}", dx, dy, self.mode());
        }
        changed
    }

    /// Wheel zoom is always available, whatever the modifiers.
    pub fn wheel(&mut self, camera: &mut CameraState, pos: DVec2, delta: f64) -> bool {
        if delta == 0.0 || !delta.is_finite() {
            return false;
        }
        camera.zoom_at(pos, delta);
        true
    }

    pub fn resize(&mut self, camera: &mut CameraState, width: f64, height: f64) -> bool {
        camera.resize(width, height);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    fn setup() -> (CameraController, CameraState) {
        let mut camera = CameraState::default();
        camera.resize(512.0, 512.0);
        (CameraController::new(), camera)
    }

    #[test]
    fn test_mode_from_modifiers() {
        let (mut ctl, _) = setup();
        assert_eq!(ctl.mode(), InputMode::Idle);
        ctl.key_down(Key::Control);
        assert_eq!(ctl.mode(), InputMode::Panning);
        ctl.key_down(Key::Alt);
        assert_eq!(ctl.mode(), InputMode::Rotating);
        ctl.key_up(Key::Alt);
        ctl.key_up(Key::Control);
        assert_eq!(ctl.mode(), InputMode::Idle);
    }

    #[test]
    fn test_cursor_hints() {
        let (mut ctl, _) = setup();
        assert_eq!(ctl.cursor(), CursorHint::Default);
        ctl.key_down(Key::Control);
        assert_eq!(ctl.cursor(), CursorHint::OpenHand);
        ctl.pointer_down(DVec2::ZERO, PointerButton::Primary);
        assert_eq!(ctl.cursor(), CursorHint::ClosedHand);
        ctl.pointer_up(DVec2::ZERO, PointerButton::Primary);
        assert_eq!(ctl.cursor(), CursorHint::OpenHand);
        ctl.key_up(Key::Control);
        ctl.key_down(Key::Alt);
        assert_eq!(ctl.cursor(), CursorHint::PointingHand);
    }

    #[test]
    fn test_drag_without_modifier_does_nothing() {
        let (mut ctl, mut camera) = setup();
        let before = camera.clone();
        ctl.pointer_down(DVec2::ZERO, PointerButton::Primary);
        assert!(!ctl.pointer_move(&mut camera, DVec2::new(30.0, 40.0), PointerButtons::PRIMARY));
        assert_eq!(camera, before);
    }

    #[test]
    fn test_pan_drag() {
        let (mut ctl, mut camera) = setup();
        ctl.key_down(Key::Control);
        ctl.pointer_down(DVec2::new(100.0, 100.0), PointerButton::Primary);
        assert!(ctl.pointer_move(&mut camera, DVec2::new(164.0, 132.0), PointerButtons::PRIMARY));
        assert_eq!(camera.position, DVec3::new(0.125, 0.0625, -10.0));
    }

    #[test]
    fn test_rotate_requires_exact_button_set() {
        let (mut ctl, mut camera) = setup();
        ctl.key_down(Key::Alt);
        ctl.pointer_down(DVec2::ZERO, PointerButton::Primary);

        let both = PointerButtons::PRIMARY.with(PointerButton::Secondary);
        assert!(!ctl.pointer_move(&mut camera, DVec2::new(5.0, 0.0), both));

        assert!(ctl.pointer_move(&mut camera, DVec2::new(6.0, -2.0), PointerButtons::PRIMARY));
        assert_eq!(camera.rotation_x(), 16.0);
        assert_eq!(camera.rotation_y(), 8.0);

        assert!(ctl.pointer_move(&mut camera, DVec2::new(7.0, -2.0), PointerButtons::SECONDARY));
        assert_eq!(camera.rotation_z(), 8.0);
    }

    #[test]
    fn test_wheel_ignores_zero_delta() {
        let (mut ctl, mut camera) = setup();
        assert!(!ctl.wheel(&mut camera, DVec2::ZERO, 0.0));
        assert!(ctl.wheel(&mut camera, DVec2::ZERO, 120.0));
        assert!(camera.scale > 1.0);
    }
}

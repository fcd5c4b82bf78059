//! Activation model: buttons, input events, and per-tracker transient state.

use std::fmt;

use crate::domain::element::Element;

/// A normalized mouse button.
///
/// Raw button codes from the host environment are mapped into this enum by a
/// [`crate::domain::buttons::ButtonNormalizer`] before the tracker ever sees
/// them; nothing downstream deals with platform quirks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// The input that drove a link activation, as reported to the URL builder.
///
/// Keyboard-driven activations (Enter on a focused link) carry no mouse
/// button and are reported as [`ActivationButton::Key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationButton {
    Left,
    Middle,
    Right,
    Key,
}

impl From<MouseButton> for ActivationButton {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => Self::Left,
            MouseButton::Middle => Self::Middle,
            MouseButton::Right => Self::Right,
        }
    }
}

impl fmt::Display for ActivationButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Left => "left",
            Self::Middle => "middle",
            Self::Right => "right",
            Self::Key => "key",
        };
        f.write_str(name)
    }
}

/// An input notification delivered to the tracker by the host environment.
///
/// Mouse events carry the raw button code exactly as the environment reported
/// it; normalization happens inside the tracker via its injected
/// [`crate::domain::buttons::ButtonNormalizer`].
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// A key was released anywhere in scope.
    KeyRelease,
    /// A mouse button was released over `target`.
    MouseRelease { button: u8, target: Element },
    /// A click fired on `target`. Browsers only fire this reliably for
    /// left-clicks and keyboard activations.
    Click { target: Element },
}

/// Transient per-tracker state, overwritten on every mouse or key release.
///
/// Lives for the lifetime of the tracker instance and is never persisted.
#[derive(Debug, Default)]
pub struct ActivationState {
    pub last_mouse_button: Option<MouseButton>,
    pub last_target: Option<Element>,
    pub last_was_keyboard: bool,
}

/// A qualifying link activation, handed to the URL-builder callback.
#[derive(Debug, Clone)]
pub struct LinkActivation {
    /// The anchor element that was activated.
    pub link: Element,
    /// Which input drove the activation.
    pub button: ActivationButton,
    /// `true` when the destination is the current page, differing only by
    /// fragment. Such activations are always dispatched asynchronously.
    pub is_same_page_link: bool,
}

//! Movement intent plus discrete input edges.

/// Level-sensitive movement flags, read once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
}

/// One input signal from the environment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    LeftPressed,
    LeftReleased,
    RightPressed,
    RightReleased,
    /// Press edge of the fire key.
    Fire,
    /// Press edge of the restart key.
    Restart,
}

impl InputState {
    /// Fold a press/release into the movement flags.  `Fire` and `Restart`
    /// are edges and leave the flags untouched.
    pub fn apply(self, event: InputEvent) -> InputState {
        match event {
            InputEvent::LeftPressed => InputState { left: true, ..self },
            InputEvent::LeftReleased => InputState { left: false, ..self },
            InputEvent::RightPressed => InputState { right: true, ..self },
            InputEvent::RightReleased => InputState { right: false, ..self },
            InputEvent::Fire | InputEvent::Restart => self,
        }
    }
}

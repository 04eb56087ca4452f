use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DisplaySide {
    Left,
    Right,
}

impl fmt::Display for DisplaySide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplaySide::Left => write!(f, "left"),
            DisplaySide::Right => write!(f, "right"),
        }
    }
}

/// Command produced for one gaze sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureCommand {
    None,
    MoveToLeftDisplay,
    MoveToRightDisplay,
}

impl GestureCommand {
    pub fn toward(side: DisplaySide) -> Self {
        match side {
            DisplaySide::Left => GestureCommand::MoveToLeftDisplay,
            DisplaySide::Right => GestureCommand::MoveToRightDisplay,
        }
    }

    pub fn side(&self) -> Option<DisplaySide> {
        match self {
            GestureCommand::None => None,
            GestureCommand::MoveToLeftDisplay => Some(DisplaySide::Left),
            GestureCommand::MoveToRightDisplay => Some(DisplaySide::Right),
        }
    }
}

/// Which movement directions the interpreter may emit.
///
/// A single-direction setup disables one side; crossings toward a disabled
/// side are ignored and do not start the cooldown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnabledDirections {
    pub left: bool,
    pub right: bool,
}

impl EnabledDirections {
    pub const BOTH: EnabledDirections = EnabledDirections {
        left: true,
        right: true,
    };

    pub fn only(side: DisplaySide) -> Self {
        Self {
            left: side == DisplaySide::Left,
            right: side == DisplaySide::Right,
        }
    }

    pub fn allows(&self, side: DisplaySide) -> bool {
        match side {
            DisplaySide::Left => self.left,
            DisplaySide::Right => self.right,
        }
    }
}

impl Default for EnabledDirections {
    fn default() -> Self {
        Self::BOTH
    }
}

/// Why the interpreter produced the command it did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureOutcome {
    /// No threshold crossing on this sample.
    Idle,
    /// Inside the cooldown window without a crossing.
    CoolingDown,
    /// Crossing that happened inside the cooldown window and was dropped.
    Absorbed(DisplaySide),
    /// Crossing toward a side that is not enabled.
    Suppressed(DisplaySide),
    Fired(DisplaySide),
}

impl GestureOutcome {
    pub fn command(&self) -> GestureCommand {
        match self {
            GestureOutcome::Fired(side) => GestureCommand::toward(*side),
            _ => GestureCommand::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::left(DisplaySide::Left, GestureCommand::MoveToLeftDisplay)]
    #[case::right(DisplaySide::Right, GestureCommand::MoveToRightDisplay)]
    fn test_toward_and_side_agree(#[case] side: DisplaySide, #[case] command: GestureCommand) {
        assert_eq!(GestureCommand::toward(side), command);
        assert_eq!(command.side(), Some(side));
    }

    #[test]
    fn test_none_has_no_side() {
        assert_eq!(GestureCommand::None.side(), None);
    }

    #[test]
    fn test_default_enables_both() {
        let enabled = EnabledDirections::default();
        assert!(enabled.allows(DisplaySide::Left));
        assert!(enabled.allows(DisplaySide::Right));
    }

    #[test]
    fn test_only_enables_single_side() {
        let enabled = EnabledDirections::only(DisplaySide::Right);
        assert!(!enabled.allows(DisplaySide::Left));
        assert!(enabled.allows(DisplaySide::Right));
    }

    #[rstest]
    #[case::idle(GestureOutcome::Idle, GestureCommand::None)]
    #[case::cooling(GestureOutcome::CoolingDown, GestureCommand::None)]
    #[case::absorbed(GestureOutcome::Absorbed(DisplaySide::Right), GestureCommand::None)]
    #[case::suppressed(GestureOutcome::Suppressed(DisplaySide::Left), GestureCommand::None)]
    #[case::fired(GestureOutcome::Fired(DisplaySide::Left), GestureCommand::MoveToLeftDisplay)]
    fn test_outcome_command(#[case] outcome: GestureOutcome, #[case] expected: GestureCommand) {
        assert_eq!(outcome.command(), expected);
    }

    #[test]
    fn test_side_display_lowercase() {
        assert_eq!(DisplaySide::Left.to_string(), "left");
        assert_eq!(DisplaySide::Right.to_string(), "right");
    }
}

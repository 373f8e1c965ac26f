use crate::targets::Target;

/// A command received on the control socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlCommand {
    Exit,
    SetTarget(Target),
}

impl ControlCommand {
    pub const EXIT: &'static str = "exit";

    /// Interpret raw connection data.
    ///
    /// Only the first non-blank line counts, trimmed. Blank input yields `None`. Anything
    /// other than `exit` is taken literally as a target, garbage included.
    pub fn parse(raw: &str) -> Option<Self> {
        let line = raw.lines().map(str::trim).find(|l| !l.is_empty())?;
        if line == Self::EXIT {
            return Some(ControlCommand::Exit);
        }
        Target::new(line).ok().map(ControlCommand::SetTarget)
    }

    /// Text sent on the wire for this command.
    pub fn to_wire(&self) -> String {
        match self {
            ControlCommand::Exit => format!("{}\n", Self::EXIT),
            ControlCommand::SetTarget(target) => format!("{}\n", target),
        }
    }
}

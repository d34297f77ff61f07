//! Validation problems found in an inbound request, and the policy that
//! decides which of them stop a request from being answered.

use std::fmt;

/// A request field the validator looks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Ref,
    Command,
    CommandData,
    /// A command-specific field under `command_data`.
    CommandDataField(String),
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ref => f.write_str("ref"),
            Self::Command => f.write_str("command"),
            Self::CommandData => f.write_str("command_data"),
            Self::CommandDataField(name) => write!(f, "command_data.{name}"),
        }
    }
}

/// One problem reported by the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Problem {
    MissingField(Field),
    UnknownCommand(String),
}

impl Problem {
    /// Whether this problem prevents any answer under `policy`.
    ///
    /// A missing or unknown command always blocks. Other missing fields only
    /// block under [`RequestPolicy::Strict`].
    #[must_use]
    pub fn blocks(&self, policy: RequestPolicy) -> bool {
        match self {
            Self::MissingField(Field::Command) | Self::UnknownCommand(_) => true,
            Self::MissingField(_) => policy == RequestPolicy::Strict,
        }
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "Missing property {field} in request payload"),
            Self::UnknownCommand(name) => write!(
                f,
                "Command {name} is not supported - maybe check your spelling"
            ),
        }
    }
}

/// How the dispatcher treats requests with missing fields but a known command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestPolicy {
    /// Log the missing fields and answer anyway.
    #[default]
    Lenient,
    /// Log the missing fields and do not answer.
    Strict,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_describe_missing_nested_field() {
        let problem = Problem::MissingField(Field::CommandDataField("machine_uid".to_string()));
        assert_eq!(
            problem.to_string(),
            "Missing property command_data.machine_uid in request payload"
        );
    }

    #[test]
    fn should_describe_unknown_command() {
        let problem = Problem::UnknownCommand("open_sesame".to_string());
        assert_eq!(
            problem.to_string(),
            "Command open_sesame is not supported - maybe check your spelling"
        );
    }

    #[test]
    fn should_always_block_on_command_problems() {
        for policy in [RequestPolicy::Lenient, RequestPolicy::Strict] {
            assert!(Problem::MissingField(Field::Command).blocks(policy));
            assert!(Problem::UnknownCommand("x".to_string()).blocks(policy));
        }
    }

    #[test]
    fn should_block_on_other_fields_only_when_strict() {
        let problem = Problem::MissingField(Field::Ref);
        assert!(!problem.blocks(RequestPolicy::Lenient));
        assert!(problem.blocks(RequestPolicy::Strict));
    }
}

//! Launch readiness decisions.

/// The launch decision for one subsystem.
///
/// Produced by a readiness probe; the message list is fixed once the
/// decision exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchReadiness {
    /// Subsystem the decision is about.
    pub subsystem: String,
    /// Whether configuration and environment permit a launch.
    pub ready: bool,
    /// Diagnostic lines. A ready decision leads with one header message
    /// naming the subsystem; an unready one explains why.
    pub messages: Vec<String>,
}

impl LaunchReadiness {
    /// A ready decision with the standard header message.
    #[must_use]
    pub fn ready(subsystem: impl Into<String>) -> Self {
        let subsystem = subsystem.into();
        let header = format!("{subsystem} subsystem ready");
        Self {
            subsystem,
            ready: true,
            messages: vec![header],
        }
    }

    /// An unready decision with diagnostics.
    #[must_use]
    pub fn not_ready(subsystem: impl Into<String>, messages: Vec<String>) -> Self {
        Self {
            subsystem: subsystem.into(),
            ready: false,
            messages,
        }
    }

    /// Append context to a decision while it is being built.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.messages.push(message.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_carries_header_naming_the_subsystem() {
        let decision = LaunchReadiness::ready("webserver");
        assert!(decision.ready);
        assert_eq!(decision.messages.len(), 1);
        assert!(decision.messages[0].contains("webserver"));
    }

    #[test]
    fn test_not_ready_carries_diagnostics() {
        let decision = LaunchReadiness::not_ready(
            "terminal",
            vec!["terminal disabled in configuration".to_owned()],
        );
        assert!(!decision.ready);
        assert_eq!(decision.messages.len(), 1);
    }
}

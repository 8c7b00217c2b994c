//! Event trait for values fed to a state machine.

/// An input consumed by exactly one dispatch.
///
/// Closed event sets are usually declared with [`event_set!`](crate::event_set),
/// which implements this trait from the variant names.
pub trait Event {
    /// Name printed in the `EVENT:` log line.
    fn name(&self) -> &'static str;
}

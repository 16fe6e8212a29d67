/// Human-in-the-loop approval for destructive actions.
///
/// Implemented for any `Fn(&str) -> bool`, so a closure or a fixed answer
/// (`|_| false`) works as a gate.
pub trait ConfirmationGate {
    /// Ask the question and report whether the user approved
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> ConfirmationGate for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

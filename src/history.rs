//! Push-state history: back/forward stacks of location hashes.

#[derive(Debug, Clone, Default)]
pub struct History {
    back_stack: Vec<String>,
    forward_stack: Vec<String>,
    current: Option<String>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a navigation to `hash`. Pushes the current entry to the back
    /// stack and clears the forward stack. Re-pushing the current hash is a no-op.
    pub fn push(&mut self, hash: &str) {
        if self.current.as_deref() == Some(hash) {
            return;
        }
        if let Some(entry) = self.current.replace(hash.to_owned()) {
            self.back_stack.push(entry);
        }
        self.forward_stack.clear();
    }

    /// Replace the current entry without touching the stacks.
    pub fn replace(&mut self, hash: &str) {
        self.current = Some(hash.to_owned());
    }

    /// Step back. Returns the hash to show, or `None` at the start.
    pub fn go_back(&mut self) -> Option<&str> {
        let prev = self.back_stack.pop()?;
        if let Some(current) = self.current.replace(prev) {
            self.forward_stack.push(current);
        }
        self.current.as_deref()
    }

    /// Step forward. Returns the hash to show, or `None` at the end.
    pub fn go_forward(&mut self) -> Option<&str> {
        let next = self.forward_stack.pop()?;
        if let Some(current) = self.current.replace(next) {
            self.back_stack.push(current);
        }
        self.current.as_deref()
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn can_go_back(&self) -> bool {
        !self.back_stack.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward_stack.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_and_forward() {
        let mut history = History::new();
        history.push("#home");
        history.push("#project");
        history.push("#post/a");

        assert_eq!(history.go_back(), Some("#project"));
        assert_eq!(history.go_back(), Some("#home"));
        assert_eq!(history.go_back(), None);
        assert_eq!(history.current(), Some("#home"));

        assert_eq!(history.go_forward(), Some("#project"));
        assert!(history.can_go_forward());
    }

    #[test]
    fn test_push_clears_forward() {
        let mut history = History::new();
        history.push("#home");
        history.push("#paper");
        history.go_back();
        history.push("#about");
        assert!(!history.can_go_forward());
        assert_eq!(history.go_back(), Some("#home"));
    }

    #[test]
    fn test_duplicate_push_is_ignored() {
        let mut history = History::new();
        history.push("#home");
        history.push("#home");
        assert!(!history.can_go_back());
    }

    #[test]
    fn test_replace_keeps_stacks() {
        let mut history = History::new();
        history.push("#home");
        history.push("#post/x");
        history.replace("#home");
        assert_eq!(history.current(), Some("#home"));
        assert!(history.can_go_back());
    }
}

/// Capability interface for the login gate. Holds the allowed pairs instead of
/// embedding them at the call site, so a real identity service can be swapped
/// in behind the same `authenticate` signature.
#[derive(Clone)]
pub struct CredentialGate {
    pairs: Vec<(String, String)>,
}

impl CredentialGate {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// Exact, plaintext match. No hashing, no lockout, no timing guarantees.
    pub fn authenticate(&self, username: &str, password: &str) -> bool {
        self.pairs
            .iter()
            .any(|(user, pass)| user == username && pass == password)
    }
}

impl Default for CredentialGate {
    fn default() -> Self {
        Self::new(vec![
            ("admin".to_string(), "admin".to_string()),
            ("abhishek".to_string(), "abhishek".to_string()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pairs_authenticate() {
        let gate = CredentialGate::default();
        assert!(gate.authenticate("admin", "admin"));
        assert!(gate.authenticate("abhishek", "abhishek"));
    }

    #[test]
    fn anything_else_is_rejected() {
        let gate = CredentialGate::default();
        assert!(!gate.authenticate("admin", "abhishek"));
        assert!(!gate.authenticate("abhishek", "admin"));
        assert!(!gate.authenticate("", ""));
        assert!(!gate.authenticate("Admin", "admin"));
    }

    #[test]
    fn injected_pairs_replace_defaults() {
        let gate = CredentialGate::new(vec![("clinic".to_string(), "s3cret".to_string())]);
        assert!(gate.authenticate("clinic", "s3cret"));
        assert!(!gate.authenticate("admin", "admin"));
    }
}

/// Chooses which fallback template to use.
///
/// Injected so tests can pin the choice; production uses a seeded or
/// entropy-backed RNG.
pub trait TemplateSelector: Send + Sync {
    /// Return an index in `0..len`. `len` is never zero.
    fn select(&self, len: usize) -> usize;
}

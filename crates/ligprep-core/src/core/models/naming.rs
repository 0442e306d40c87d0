use std::collections::HashMap;

/// Running per-element counters used to give every atom a unique name.
///
/// Names take the form `{symbol}{count}` where `count` is 1-based within the element,
/// so the third carbon becomes `C3`. The state lives for a single conversion.
#[derive(Debug, Clone, Default)]
pub struct AtomNamingState {
    counters: HashMap<String, usize>,
}

impl AtomNamingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_name(&mut self, symbol: &str) -> String {
        let count = self.counters.entry(symbol.to_string()).or_insert(0);
        *count += 1;
        format!("{}{}", symbol, count)
    }
}

/// Names every atom in input order.
pub fn assign_atom_names<S: AsRef<str>>(symbols: &[S]) -> Vec<String> {
    let mut state = AtomNamingState::new();
    symbols
        .iter()
        .map(|symbol| state.next_name(symbol.as_ref()))
        .collect()
}

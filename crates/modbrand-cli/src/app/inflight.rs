//! Per-id in-flight guard for actions that must not be doubled.

use std::collections::BTreeSet;

#[derive(Debug, Default)]
pub struct InFlight {
    ids: BTreeSet<String>,
}

impl InFlight {
    /// Mark `id` as outstanding. `false` if it already was.
    pub fn try_begin(&mut self, id: &str) -> bool {
        self.ids.insert(id.to_string())
    }

    pub fn finish(&mut self, id: &str) {
        self.ids.remove(id);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_begin_for_same_id_is_refused() {
        let mut guard = InFlight::default();
        assert!(guard.try_begin("42"));
        assert!(!guard.try_begin("42"));
        assert!(guard.try_begin("43"));
        guard.finish("42");
        assert!(guard.try_begin("42"));
    }
}

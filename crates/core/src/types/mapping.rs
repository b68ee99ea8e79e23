use serde::{Deserialize, Serialize};

/// Explicit target -> source field pairs, kept in first-insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectiveMap {
    entries: Vec<(String, String)>,
}

impl DirectiveMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. Used within one comment, where the last group wins.
    pub fn insert(&mut self, target: impl Into<String>, source: impl Into<String>) {
        let target = target.into();
        let source = source.into();
        match self.entries.iter_mut().find(|(t, _)| *t == target) {
            Some(entry) => entry.1 = source,
            None => self.entries.push((target, source)),
        }
    }

    /// Add entries from another comment without overwriting existing targets.
    ///
    /// An entry with an empty source maps nothing, so a later complete entry may
    /// replace it. Returns the entries that were rejected because the target was
    /// already mapped.
    pub fn absorb(&mut self, other: DirectiveMap) -> Vec<(String, String)> {
        let mut rejected = Vec::new();
        for (target, source) in other.entries {
            match self.entries.iter_mut().find(|(t, _)| *t == target) {
                Some(entry) if entry.1.is_empty() && !target.is_empty() => entry.1 = source,
                Some(_) => rejected.push((target, source)),
                None => self.entries.push((target, source)),
            }
        }
        rejected
    }

    pub fn get(&self, target: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(t, _)| t == target)
            .map(|(_, s)| s.as_str())
    }

    pub fn contains_target(&self, target: &str) -> bool {
        self.entries.iter().any(|(t, _)| t == target)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(t, s)| (t.as_str(), s.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Into<String>, S: Into<String>> FromIterator<(T, S)> for DirectiveMap {
    fn from_iter<I: IntoIterator<Item = (T, S)>>(iter: I) -> Self {
        let mut map = DirectiveMap::new();
        for (target, source) in iter {
            map.insert(target, source);
        }
        map
    }
}

/// Where a resolved assignment came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingOrigin {
    Explicit,
    Implicit,
}

/// `target.<target> = <param>.<source>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldAssignment {
    pub target: String,
    pub source: String,
    pub origin: MappingOrigin,
}

/// Resolved correspondence for one method, in target declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    assignments: Vec<FieldAssignment>,
}

impl FieldMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an assignment unless the target already has a source
    pub fn push(&mut self, assignment: FieldAssignment) -> bool {
        if self.source_for(&assignment.target).is_some() {
            return false;
        }
        self.assignments.push(assignment);
        true
    }

    pub fn source_for(&self, target: &str) -> Option<&str> {
        self.assignments
            .iter()
            .find(|a| a.target == target)
            .map(|a| a.source.as_str())
    }

    pub fn assignments(&self) -> &[FieldAssignment] {
        &self.assignments
    }

    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.assignments
            .iter()
            .map(|a| (a.target.as_str(), a.source.as_str()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut map = DirectiveMap::new();
        map.insert("b", "a");
        map.insert("d", "c");
        map.insert("b", "x");
        assert_eq!(map.iter().collect::<Vec<_>>(), vec![("b", "x"), ("d", "c")]);
    }

    #[test]
    fn test_absorb_keeps_existing_targets() {
        let mut first: DirectiveMap = [("age", "name")].into_iter().collect();
        let second: DirectiveMap = [("age", "id"), ("name", "age")].into_iter().collect();

        let rejected = first.absorb(second);

        assert_eq!(first.get("age"), Some("name"));
        assert_eq!(first.get("name"), Some("age"));
        assert_eq!(rejected, vec![("age".to_string(), "id".to_string())]);
    }

    #[test]
    fn test_field_mapping_never_overwrites() {
        let mut mapping = FieldMapping::new();
        assert!(mapping.push(FieldAssignment {
            target: "age".into(),
            source: "name".into(),
            origin: MappingOrigin::Explicit,
        }));
        assert!(!mapping.push(FieldAssignment {
            target: "age".into(),
            source: "age".into(),
            origin: MappingOrigin::Implicit,
        }));
        assert_eq!(mapping.source_for("age"), Some("name"));
        assert_eq!(mapping.len(), 1);
    }
}

//! Name-indexed record collections.

use std::collections::HashMap;

use super::TrackedRecord;

/// Records of one collection, indexed by display name, in backend order.
///
/// When the backend returns the same name twice, the record keeps the
/// position of the first occurrence and the value of the last one.
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<R> {
    records: Vec<R>,
    index: HashMap<String, usize>,
}

impl<R> Default for Collection<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<R: TrackedRecord> Collection<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, replacing any record with the same name in place.
    pub fn insert(&mut self, record: R) {
        match self.index.get(record.name()) {
            Some(&position) => self.records[position] = record,
            None => {
                self.index
                    .insert(record.name().to_string(), self.records.len());
                self.records.push(record);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&R> {
        self.index.get(name).map(|&position| &self.records[position])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.records.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.name())
    }
}

impl<R: TrackedRecord> FromIterator<R> for Collection<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        let mut collection = Collection::new();
        for record in iter {
            collection.insert(record);
        }
        collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Game;
    use serde_json::json;

    fn game(name: &str, stars: i64) -> Game {
        serde_json::from_value(json!({"Name": name, "Stars": stars})).unwrap()
    }

    #[test]
    fn test_keeps_backend_order() {
        let collection: Collection<Game> =
            vec![game("Hades", 5), game("Celeste", 4), game("Tunic", 3)]
                .into_iter()
                .collect();
        let names: Vec<&str> = collection.names().collect();
        assert_eq!(names, vec!["Hades", "Celeste", "Tunic"]);
        assert_eq!(collection.get("Celeste").unwrap().stars, 4);
        assert!(!collection.contains("Outer Wilds"));
    }

    #[test]
    fn test_duplicate_name_last_value_first_position() {
        let collection: Collection<Game> =
            vec![game("Hades", 1), game("Celeste", 4), game("Hades", 5)]
                .into_iter()
                .collect();
        assert_eq!(collection.len(), 2);
        let names: Vec<&str> = collection.names().collect();
        assert_eq!(names, vec!["Hades", "Celeste"]);
        assert_eq!(collection.get("Hades").unwrap().stars, 5);
    }
}

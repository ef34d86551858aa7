//! Ordered row mapping produced by the CSV reader

/// One input row: ordered (header, value) pairs.
///
/// Column order is preserved because loaders that receive no explicit
/// field selection consume values in natural column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from (header, value) pairs, keeping their order
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Append a (header, value) pair
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.push((key.into(), value.into()));
    }

    /// Look up a value by header name
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// Header names in column order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Values in column order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, value)| value.as_str())
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check whether the record has no columns
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_by_key() {
        let record = Record::from_pairs([("question", "Q"), ("subject", "S")]);
        assert_eq!(record.get("question"), Some("Q"));
        assert_eq!(record.get("subject"), Some("S"));
        assert_eq!(record.get("missing"), None);
    }

    #[test]
    fn test_values_keep_column_order() {
        let record = Record::from_pairs([("b", "2"), ("a", "1"), ("c", "3")]);
        let values: Vec<&str> = record.values().collect();
        assert_eq!(values, vec!["2", "1", "3"]);
    }

    #[test]
    fn test_push_and_len() {
        let mut record = Record::new();
        assert!(record.is_empty());
        record.push("a", "1");
        record.push("b", "2");
        assert_eq!(record.len(), 2);
        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
    }
}

//! Decoded representations: dynamic [`Value`]s and the [`Record`]
//! produced by struct layouts.

/// A decoded value.
///
/// Layouts are built at runtime, so decode results are dynamically typed:
/// fixed-width integers decode to `Int`, sequences to `List`, structs to
/// `Record`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    List(Vec<Value>),
    Record(Record),
}

impl Value {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Shape name used in error messages.
    pub(crate) fn shape(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::List(_) => "list",
            Value::Record(_) => "record",
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Record(record)
    }
}

/// A fixed set of named fields, the decoded form of a struct layout.
///
/// Fields may be inserted in any order; iteration follows insertion
/// order. Equality compares field names and values without regard to
/// order.
///
/// # Examples
///
/// ```
/// use dapper::{Record, Value};
///
/// let a = Record::new().with("kind", 1).with("size", 20);
/// let b = Record::new().with("size", 20).with("kind", 1);
/// assert_eq!(a, b);
/// assert_eq!(a.get("size"), Some(&Value::Int(20)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Record { fields: Vec::new() }
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts a field, replacing any existing field of the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Looks up a field by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Iterates fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        // Names are unique within a record, so matching lengths plus a
        // one-way containment check is a full equality test.
        self.fields.len() == other.fields.len()
            && self.fields.iter().all(|(n, v)| other.get(n) == Some(v))
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_ignores_field_order() {
        let a = Record::new().with("x", 1).with("y", 2);
        let b = Record::new().with("y", 2).with("x", 1);
        assert_eq!(a, b);
    }

    #[test]
    fn equality_requires_same_names_and_values() {
        let a = Record::new().with("x", 1);
        assert_ne!(a, Record::new().with("x", 2));
        assert_ne!(a, Record::new().with("z", 1));
        assert_ne!(a, Record::new().with("x", 1).with("y", 2));
    }

    #[test]
    fn insert_replaces_existing_field() {
        let mut record = Record::new().with("x", 1);
        record.insert("x", 9);
        assert_eq!(record.len(), 1);
        assert_eq!(record.get("x"), Some(&Value::Int(9)));
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let record = Record::new().with("b", 2).with("a", 1);
        let names: Vec<&str> = record.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["b", "a"]);
    }
}

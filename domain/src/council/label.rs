//! Answer anonymization for the peer-ranking stage.
//!
//! Stage-1 answers are relabeled "Response A", "Response B", ... before
//! judges see them, so a judge cannot recognize (and favor) a model by
//! name. Labels are assigned by declared member order, never by call
//! completion order, which keeps runs deterministic under network jitter.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of labels in the fixed alphabet (A through Z).
///
/// The alphabet caps the council size; member lists longer than this are
/// rejected at input validation.
pub const LABEL_ALPHABET_SIZE: usize = 26;

/// An anonymized answer identifier such as "Response A" (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label(String);

impl Label {
    /// Label for the i-th answer (0-indexed). `None` beyond the alphabet.
    pub fn from_index(index: usize) -> Option<Self> {
        if index < LABEL_ALPHABET_SIZE {
            Some(Self(format!("Response {}", (b'A' + index as u8) as char)))
        } else {
            None
        }
    }

    /// Label for a capital letter, e.g. 'C' -> "Response C".
    ///
    /// Accepts the full A-Z range: the ranking parser may encounter
    /// letters outside the assigned set, and the aggregator discards
    /// them against the run's [`LabelMap`].
    pub fn from_letter(letter: char) -> Option<Self> {
        if letter.is_ascii_uppercase() {
            Some(Self(format!("Response {}", letter)))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Label {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Label {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self(s))
    }
}

/// Bijection from [`Label`] to model id for one pipeline run.
///
/// Built once after stage 1 from the surviving answers, read-only
/// afterwards. Entry order is label order (A, B, C, ...), which mirrors
/// the declared member order of the answers it was built from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelMap {
    entries: Vec<(Label, String)>,
}

impl LabelMap {
    /// Assign labels to model ids in the order given.
    ///
    /// The i-th model receives label i. Callers pass the surviving
    /// stage-1 answers in declared member order, so assignment is
    /// independent of which call finished first.
    pub fn assign<S: AsRef<str>>(models: &[S]) -> Self {
        let entries = models
            .iter()
            .enumerate()
            .filter_map(|(i, model)| {
                Label::from_index(i).map(|label| (label, model.as_ref().to_string()))
            })
            .collect();
        Self { entries }
    }

    /// Model id for a label, if the label was assigned in this run.
    pub fn model_for(&self, label: &Label) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, m)| m.as_str())
    }

    /// Position of a label in assignment order.
    pub fn index_of(&self, label: &Label) -> Option<usize> {
        self.entries.iter().position(|(l, _)| l == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Label, &str)> {
        self.entries.iter().map(|(l, m)| (l, m.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Serialized as a JSON object {"Response A": "model-id", ...} to match
// what API consumers expect from the run metadata.
impl Serialize for LabelMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, model) in &self.entries {
            map.serialize_entry(label.as_str(), model)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for LabelMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct LabelMapVisitor;

        impl<'de> Visitor<'de> for LabelMapVisitor {
            type Value = LabelMap;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a map of label to model id")
            }

            fn visit_map<A>(self, mut access: A) -> Result<LabelMap, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((label, model)) = access.next_entry::<String, String>()? {
                    entries.push((Label(label), model));
                }
                Ok(LabelMap { entries })
            }
        }

        deserializer.deserialize_map(LabelMapVisitor)
    }
}

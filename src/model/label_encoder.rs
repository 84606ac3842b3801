// src/model/label_encoder.rs
use serde::{Deserialize, Serialize};

/// Bidirectional mapping between job titles and dense class ids.
///
/// Ids follow the sorted order of the distinct labels seen at fit time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn fit<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut classes: Vec<String> = labels.into_iter().map(Into::into).collect();
        classes.sort();
        classes.dedup();
        Self { classes }
    }

    pub fn encode(&self, label: &str) -> Option<u32> {
        self.classes
            .binary_search_by(|c| c.as_str().cmp(label))
            .ok()
            .map(|idx| idx as u32)
    }

    pub fn decode(&self, id: u32) -> Option<&str> {
        self.classes.get(id as usize).map(String::as_str)
    }

    /// Encode every label, failing on the first one unseen at fit time
    pub fn encode_all<I, S>(&self, labels: I) -> anyhow::Result<Vec<u32>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        labels
            .into_iter()
            .map(|label| {
                let label = label.as_ref();
                self.encode(label)
                    .ok_or_else(|| anyhow::anyhow!("unknown job title '{}'", label))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

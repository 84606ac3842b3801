// src/model/vectorizer.rs
//! Bag-of-words term counting over a fixed vocabulary

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::SparseVector;

/// Term-count vectorizer.
///
/// Documents are lower-cased and split into runs of word characters
/// (alphanumerics and `_`); runs shorter than two characters are dropped.
/// Vocabulary indices follow alphabetical term order. Terms outside the
/// vocabulary contribute nothing at transform time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountVectorizer {
    vocabulary: BTreeMap<String, u32>,
}

impl CountVectorizer {
    pub fn fit<I, S>(documents: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms: BTreeSet<String> = documents
            .into_iter()
            .flat_map(|doc| tokenize(doc.as_ref()).collect::<Vec<_>>())
            .collect();

        if terms.is_empty() {
            anyhow::bail!("empty vocabulary; the skills column contains no usable terms");
        }

        Ok(Self::from_terms(terms))
    }

    pub fn from_terms<I: IntoIterator<Item = String>>(terms: I) -> Self {
        let sorted: BTreeSet<String> = terms.into_iter().collect();
        let vocabulary = sorted
            .into_iter()
            .enumerate()
            .map(|(idx, term)| (term, idx as u32))
            .collect();
        Self { vocabulary }
    }

    pub fn transform(&self, document: &str) -> SparseVector {
        let mut counts = BTreeMap::new();
        for token in tokenize(document) {
            if let Some(&idx) = self.vocabulary.get(&token) {
                *counts.entry(idx).or_insert(0u32) += 1;
            }
        }
        SparseVector::from_counts(&counts)
    }

    pub fn transform_all<I, S>(&self, documents: I) -> Vec<SparseVector>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        documents
            .into_iter()
            .map(|doc| self.transform(doc.as_ref()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    pub fn term_index(&self, term: &str) -> Option<u32> {
        self.vocabulary.get(term).copied()
    }
}

pub fn tokenize(document: &str) -> impl Iterator<Item = String> + '_ {
    document
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= 2)
        .map(str::to_lowercase)
}

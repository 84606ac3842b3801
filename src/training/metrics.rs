// src/training/metrics.rs
//! Holdout classification metrics

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMetrics {
    pub label: String,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AverageMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// Per-class precision, recall and F1 plus overall accuracy.
///
/// Classes are the sorted union of true and predicted labels. A zero
/// denominator yields a zero score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationReport {
    pub accuracy: f64,
    pub classes: Vec<ClassMetrics>,
    pub macro_avg: AverageMetrics,
    pub weighted_avg: AverageMetrics,
    pub total: usize,
}

#[derive(Default)]
struct Tally {
    true_positive: usize,
    false_positive: usize,
    false_negative: usize,
}

pub fn accuracy<T: PartialEq>(y_true: &[T], y_pred: &[T]) -> f64 {
    if y_true.is_empty() {
        return 0.0;
    }
    let correct = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();
    correct as f64 / y_true.len() as f64
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

impl ClassificationReport {
    pub fn from_predictions<S: AsRef<str>>(y_true: &[S], y_pred: &[S]) -> anyhow::Result<Self> {
        if y_true.len() != y_pred.len() {
            anyhow::bail!(
                "{} true labels but {} predictions",
                y_true.len(),
                y_pred.len()
            );
        }

        let mut tallies: BTreeMap<&str, Tally> = BTreeMap::new();
        for (t, p) in y_true.iter().zip(y_pred) {
            let (t, p) = (t.as_ref(), p.as_ref());
            if t == p {
                tallies.entry(t).or_default().true_positive += 1;
            } else {
                tallies.entry(t).or_default().false_negative += 1;
                tallies.entry(p).or_default().false_positive += 1;
            }
        }

        let classes: Vec<ClassMetrics> = tallies
            .into_iter()
            .map(|(label, tally)| {
                let predicted = tally.true_positive + tally.false_positive;
                let precision = ratio(tally.true_positive, predicted);
                let recall = ratio(tally.true_positive, tally.true_positive + tally.false_negative);
                let f1 = if precision + recall == 0.0 {
                    0.0
                } else {
                    2.0 * precision * recall / (precision + recall)
                };
                ClassMetrics {
                    label: label.to_string(),
                    precision,
                    recall,
                    f1,
                    support: tally.true_positive + tally.false_negative,
                }
            })
            .collect();

        let n_classes = classes.len().max(1) as f64;
        let total = y_true.len();
        let support_total = total.max(1) as f64;

        let macro_avg = AverageMetrics {
            precision: classes.iter().map(|c| c.precision).sum::<f64>() / n_classes,
            recall: classes.iter().map(|c| c.recall).sum::<f64>() / n_classes,
            f1: classes.iter().map(|c| c.f1).sum::<f64>() / n_classes,
        };
        let weighted = |score: fn(&ClassMetrics) -> f64| {
            classes
                .iter()
                .map(|c| score(c) * c.support as f64)
                .sum::<f64>()
                / support_total
        };
        let weighted_avg = AverageMetrics {
            precision: weighted(|c| c.precision),
            recall: weighted(|c| c.recall),
            f1: weighted(|c| c.f1),
        };

        let y_true: Vec<&str> = y_true.iter().map(AsRef::as_ref).collect();
        let y_pred: Vec<&str> = y_pred.iter().map(AsRef::as_ref).collect();

        Ok(Self {
            accuracy: accuracy(&y_true, &y_pred),
            classes,
            macro_avg,
            weighted_avg,
            total,
        })
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .classes
            .iter()
            .map(|c| c.label.chars().count())
            .chain(std::iter::once("weighted avg".len()))
            .max()
            .unwrap_or(0);

        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for c in &self.classes {
            writeln!(
                f,
                "{:>width$} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                c.label, c.precision, c.recall, c.f1, c.support
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy", "", "", self.accuracy, self.total
        )?;
        for (name, avg) in [("macro avg", &self.macro_avg), ("weighted avg", &self.weighted_avg)] {
            writeln!(
                f,
                "{:>width$} {:>9.2} {:>9.2} {:>9.2} {:>9}",
                name, avg.precision, avg.recall, avg.f1, self.total
            )?;
        }
        Ok(())
    }
}

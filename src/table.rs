use crate::covariate::Covariate;
use crate::types::{ConfigKey, ScoreRow};
use serde::Serialize;

/// Derived table for one covariate: one row per scored bucket per
/// configuration, ordered by configuration then bucket.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreTable {
    pub covariate: Covariate,
    pub rows: Vec<ScoreRow>,
}

/// Mean score of one `detector+descriptor` label at one field of view.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub label: String,
    pub field_of_view: u32,
    pub rows: usize,
    pub mean_score: f64,
}

impl ScoreTable {
    pub fn new(covariate: Covariate) -> Self {
        Self {
            covariate,
            rows: Vec::new(),
        }
    }

    pub fn axis_label(&self) -> &'static str {
        self.covariate.axis_label()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows belonging to `key`.
    pub fn rows_for<'a>(&'a self, key: &'a ConfigKey) -> impl Iterator<Item = &'a ScoreRow> + 'a {
        let label = key.label();
        self.rows
            .iter()
            .filter(move |r| r.field_of_view == key.field_of_view && r.label == label)
    }

    /// Per label/FOV mean scores, in table order.
    pub fn summarize(&self) -> Vec<GroupSummary> {
        let mut out: Vec<GroupSummary> = Vec::new();
        for row in &self.rows {
            match out.last_mut() {
                Some(g) if g.label == row.label && g.field_of_view == row.field_of_view => {
                    g.mean_score += row.score;
                    g.rows += 1;
                }
                _ => out.push(GroupSummary {
                    label: row.label.clone(),
                    field_of_view: row.field_of_view,
                    rows: 1,
                    mean_score: row.score,
                }),
            }
        }
        for g in &mut out {
            g.mean_score /= g.rows as f64;
        }
        out
    }
}

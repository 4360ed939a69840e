//! # Predictive accuracy
//!
//! Ranking based accuracy metrics for hot spot forecasts. Areal units are ordered from
//! the highest to the lowest prediction, and the crime captured by the top ranked units
//! is compared with the area they cover.
//!
//! - PAI, Predictive Accuracy Index: share of crime captured over share of area covered.
//! - PEI, Predictive Efficiency Index: crime captured over the most crime any selection
//!   of the same number of units could have captured.
//! - RRI, Recapture Rate Index: predicted count captured over crime captured.
//!
//! <https://doi.org/10.1080/15230406.2008.9990022>
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{Error, PtoolsResult};

/// One areal unit, at its rank by prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaiRow {
    /// One based rank, 1 is the highest prediction.
    pub rank: usize,

    /// Position of this unit in the input.
    pub index: usize,

    /// Prediction for this unit.
    pub prediction: f64,

    /// Crime observed in this unit.
    pub crimes: f64,

    /// Area of this unit.
    pub area: f64,

    /// Crime captured by this and all higher ranked units.
    pub cum_crimes: f64,

    /// Area covered by this and all higher ranked units.
    pub cum_area: f64,

    /// Predictions summed over this and all higher ranked units.
    pub cum_prediction: f64,

    /// Predictive accuracy index.
    pub pai: f64,

    /// Predictive efficiency index.
    pub pei: f64,

    /// Recapture rate index, undefined while no crime has been captured.
    pub rri: Option<f64>,
}

/// Units ranked by prediction with cumulative accuracy metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaiTable {
    /// Crime summed over all units.
    pub total_crimes: f64,

    /// Area summed over all units.
    pub total_area: f64,

    /// Rows in rank order.
    pub rows: Vec<PaiRow>,
}

impl PaiTable {
    /// Metrics for the top `cutoff` ranked units.
    pub fn at(&self, cutoff: usize) -> Option<&PaiRow> {
        cutoff.checked_sub(1).and_then(|idx| self.rows.get(idx))
    }
}

fn validate(predictions: &[f64], crimes: &[f64], areas: &[f64]) -> PtoolsResult<()> {
    if predictions.len() != crimes.len() || crimes.len() != areas.len() {
        return Err(Error::ValueError(format!(
            "Predictions ({}), crimes ({}), and areas ({}) must be the same length.",
            predictions.len(),
            crimes.len(),
            areas.len()
        )));
    }
    if predictions.is_empty() {
        return Err(Error::ValueError(
            "At least one areal unit is required.".into(),
        ));
    }
    if let Some(idx) = predictions.iter().position(|p| !p.is_finite()) {
        return Err(Error::ValueError(format!(
            "Prediction {} at unit {} is not finite.",
            predictions[idx], idx
        )));
    }
    if let Some(idx) = crimes.iter().position(|c| !c.is_finite() || *c < 0.0) {
        return Err(Error::ValueError(format!(
            "Crime count {} at unit {} must be finite and non-negative.",
            crimes[idx], idx
        )));
    }
    if let Some(idx) = areas.iter().position(|a| !a.is_finite() || *a <= 0.0) {
        return Err(Error::ValueError(format!(
            "Area {} at unit {} must be finite and positive.",
            areas[idx], idx
        )));
    }
    if crimes.iter().sum::<f64>() <= 0.0 {
        return Err(Error::ValueError(
            "Total crime must be positive to score predictions.".into(),
        ));
    }
    Ok(())
}

/// Rank units by prediction and compute cumulative PAI, PEI, and RRI.
///
/// Units with equal predictions keep their input order.
///
/// ```
///     use ptools_core::scoring::pai_table;
///     let table = pai_table(&[0.1, 0.9, 0.5], &[0.0, 3.0, 1.0], &[1.0, 1.0, 1.0]).unwrap();
///     let top = table.at(1).unwrap();
///     assert_eq!(top.index, 1);
///     assert!((top.pai - 2.25).abs() < 1e-12);
/// ```
pub fn pai_table(predictions: &[f64], crimes: &[f64], areas: &[f64]) -> PtoolsResult<PaiTable> {
    validate(predictions, crimes, areas)?;

    let total_crimes: f64 = crimes.iter().sum();
    let total_area: f64 = areas.iter().sum();

    let best_cum = crimes
        .iter()
        .sorted_by(|a, b| b.total_cmp(a))
        .scan(0.0, |acc, c| {
            *acc += c;
            Some(*acc)
        })
        .collect_vec();

    let mut cum_crimes = 0.0;
    let mut cum_area = 0.0;
    let mut cum_prediction = 0.0;
    let rows = (0..predictions.len())
        .sorted_by(|a, b| predictions[*b].total_cmp(&predictions[*a]))
        .enumerate()
        .map(|(rank, index)| {
            cum_crimes += crimes[index];
            cum_area += areas[index];
            cum_prediction += predictions[index];
            PaiRow {
                rank: rank + 1,
                index,
                prediction: predictions[index],
                crimes: crimes[index],
                area: areas[index],
                cum_crimes,
                cum_area,
                cum_prediction,
                pai: (cum_crimes / total_crimes) / (cum_area / total_area),
                pei: cum_crimes / best_cum[rank],
                rri: (cum_crimes > 0.0).then(|| cum_prediction / cum_crimes),
            }
        })
        .collect();

    Ok(PaiTable {
        total_crimes,
        total_area,
        rows,
    })
}

/// Metrics for one model at one cutoff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaiSummaryRow {
    /// Model name.
    pub model: String,

    /// Number of top ranked units selected.
    pub cutoff: usize,

    /// Crime captured by the selected units.
    pub crimes_captured: f64,

    /// Area covered by the selected units.
    pub area_covered: f64,

    /// Predictive accuracy index.
    pub pai: f64,

    /// Predictive efficiency index.
    pub pei: f64,

    /// Recapture rate index.
    pub rri: Option<f64>,
}

/// Accuracy of several competing forecasts at a set of cutoffs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaiSummary {
    /// Rows grouped by model, then by cutoff in the order given.
    pub rows: Vec<PaiSummaryRow>,
}

/// Compare forecasts of the same units at several cutoffs.
///
/// Each cutoff is a number of top ranked units and must be between 1 and the number
/// of units.
pub fn pai_summary(
    models: &[(&str, &[f64])],
    crimes: &[f64],
    areas: &[f64],
    cutoffs: &[usize],
) -> PtoolsResult<PaiSummary> {
    if models.is_empty() {
        return Err(Error::ValueError("At least one model is required.".into()));
    }
    if let Some(bad) = cutoffs.iter().find(|c| **c < 1 || **c > crimes.len()) {
        return Err(Error::ValueError(format!(
            "Cutoff {} must be between 1 and the number of units, {}.",
            bad,
            crimes.len()
        )));
    }

    let mut rows = Vec::with_capacity(models.len() * cutoffs.len());
    for (name, predictions) in models {
        let table = pai_table(predictions, crimes, areas)?;
        for cutoff in cutoffs {
            // Cutoffs were bounds checked above.
            let row = &table.rows[cutoff - 1];
            rows.push(PaiSummaryRow {
                model: name.to_string(),
                cutoff: *cutoff,
                crimes_captured: row.cum_crimes,
                area_covered: row.cum_area,
                pai: row.pai,
                pei: row.pei,
                rri: row.rri,
            });
        }
    }
    Ok(PaiSummary { rows })
}

impl fmt::Display for PaiSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let width = self
            .rows
            .iter()
            .map(|r| r.model.len())
            .max()
            .unwrap_or(0)
            .max("Model".len());
        writeln!(
            f,
            "{:<width$} {:>7} {:>10} {:>10} {:>8} {:>8} {:>8}",
            "Model",
            "Cutoff",
            "Crimes",
            "Area",
            "PAI",
            "PEI",
            "RRI",
            width = width
        )?;
        for row in &self.rows {
            let rri = row
                .rri
                .map_or_else(|| "n/a".to_string(), |r| format!("{:.3}", r));
            writeln!(
                f,
                "{:<width$} {:>7} {:>10.1} {:>10.2} {:>8.3} {:>8.3} {:>8}",
                row.model,
                row.cutoff,
                row.crimes_captured,
                row.area_covered,
                row.pai,
                row.pei,
                rri,
                width = width
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CRIMES: [f64; 5] = [0.0, 4.0, 1.0, 3.0, 2.0];
    const AREAS: [f64; 5] = [1.0, 1.0, 1.0, 1.0, 1.0];

    #[test]
    fn test_table() {
        let predictions = [0.5, 3.0, 2.0, 1.0, 0.1];
        let table = pai_table(&predictions, &CRIMES, &AREAS).unwrap();
        assert_eq!(table.total_crimes, 10.0);
        assert_eq!(table.total_area, 5.0);
        assert_eq!(
            table.rows.iter().map(|r| r.index).collect_vec(),
            vec![1, 2, 3, 0, 4]
        );

        // Top unit: 4 of 10 crimes in 1 of 5 areas.
        let top = table.at(1).unwrap();
        assert!((top.pai - 2.0).abs() < 1e-12);
        assert!((top.pei - 1.0).abs() < 1e-12);
        assert!((top.rri.unwrap() - 0.75).abs() < 1e-12);

        // Top two capture 5 crimes, the best two units hold 7.
        let two = table.at(2).unwrap();
        assert!((two.cum_crimes - 5.0).abs() < 1e-12);
        assert!((two.pai - 1.25).abs() < 1e-12);
        assert!((two.pei - 5.0 / 7.0).abs() < 1e-12);

        let all = table.at(5).unwrap();
        assert!((all.pai - 1.0).abs() < 1e-12);
        assert!((all.pei - 1.0).abs() < 1e-12);
        assert!(table.at(0).is_none());
        assert!(table.at(6).is_none());
    }

    #[test]
    fn test_ties_keep_input_order() {
        let table = pai_table(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(
            table.rows.iter().map(|r| r.index).collect_vec(),
            vec![0, 1, 2]
        );
    }

    #[test]
    fn test_rri_undefined_without_crime() {
        let table = pai_table(&[5.0, 1.0], &[0.0, 2.0], &[1.0, 1.0]).unwrap();
        assert!(table.at(1).unwrap().rri.is_none());
        assert_eq!(table.at(1).unwrap().pai, 0.0);
        assert!(table.at(2).unwrap().rri.is_some());
    }

    #[test]
    fn test_validation() {
        assert!(pai_table(&[1.0], &[1.0, 2.0], &[1.0, 1.0]).is_err());
        assert!(pai_table(&[], &[], &[]).is_err());
        assert!(pai_table(&[f64::NAN], &[1.0], &[1.0]).is_err());
        assert!(pai_table(&[1.0], &[-1.0], &[1.0]).is_err());
        assert!(pai_table(&[1.0], &[1.0], &[0.0]).is_err());
        assert!(pai_table(&[1.0, 2.0], &[0.0, 0.0], &[1.0, 1.0]).is_err());
    }

    #[test]
    fn test_summary() {
        let good = [0.5, 3.0, 2.0, 1.0, 0.1];
        let bad = [3.0, 0.0, 0.0, 0.0, 1.0];
        let models: [(&str, &[f64]); 2] = [("good", &good), ("bad", &bad)];
        let summary = pai_summary(&models, &CRIMES, &AREAS, &[1, 2]).unwrap();
        assert_eq!(summary.rows.len(), 4);
        assert_eq!(summary.rows[0].model, "good");
        assert_eq!(summary.rows[1].cutoff, 2);
        assert!(summary.rows[0].pai > summary.rows[2].pai);
        assert_eq!(summary.rows[2].crimes_captured, 0.0);

        let text = summary.to_string();
        assert_eq!(text.lines().count(), 5);
        assert!(text.lines().next().unwrap().starts_with("Model"));

        assert!(pai_summary(&models, &CRIMES, &AREAS, &[0]).is_err());
        assert!(pai_summary(&models, &CRIMES, &AREAS, &[6]).is_err());
        assert!(pai_summary(&[], &CRIMES, &AREAS, &[1]).is_err());
    }
}

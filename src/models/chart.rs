use log::warn;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::{fmt, str::FromStr};

use crate::models::lenient::{self, number_from_value, Text};

/// The kinds of chart a chart slide can draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    /// Grouped horizontal bars, one bar per series for every label.
    #[default]
    Bar,
    /// Overlaid polylines with point markers.
    Line,
    /// One pie per series, laid out left to right.
    Pie,
    /// Like `Line`, with the region under each series filled.
    Area,
}

impl ChartType {
    pub fn as_str(self) -> &'static str {
        match self {
            ChartType::Bar => "bar",
            ChartType::Line => "line",
            ChartType::Pie => "pie",
            ChartType::Area => "area",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bar" | "column" | "horizontalbar" => Ok(ChartType::Bar),
            "line" => Ok(ChartType::Line),
            "pie" | "donut" | "doughnut" => Ok(ChartType::Pie),
            "area" => Ok(ChartType::Area),
            other => Err(format!("unknown chart type '{other}'")),
        }
    }
}

/// Unknown or missing chart types fall back to a bar chart.
impl<'de> Deserialize<'de> for ChartType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let Some(raw) = lenient::scalar_to_string(&value) else {
            return Ok(ChartType::default());
        };
        Ok(raw.parse().unwrap_or_else(|e| {
            warn!("{e}; rendering as a bar chart");
            ChartType::default()
        }))
    }
}

/// A single data point. Non-numeric input is kept as `None` so it can be excluded from
/// min/max computation without shifting the positions of its neighbours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ChartValue(pub Option<f64>);

impl ChartValue {
    pub fn get(self) -> Option<f64> {
        self.0
    }
}

impl From<f64> for ChartValue {
    fn from(value: f64) -> Self {
        ChartValue(Some(value).filter(|v| v.is_finite()))
    }
}

impl<'de> Deserialize<'de> for ChartValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(ChartValue(number_from_value(&value)))
    }
}

/// One named data series.
///
/// `labels` and `values` should have the same length; consumers pair them up to the shorter
/// of the two.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartSeries {
    pub name: Text,
    #[serde(deserialize_with = "lenient::string_list")]
    pub labels: Vec<String>,
    #[serde(deserialize_with = "lenient::seq")]
    pub values: Vec<ChartValue>,
}

impl ChartSeries {
    pub fn new(name: &str, labels: &[&str], values: &[f64]) -> Self {
        ChartSeries {
            name: Text::from(name),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            values: values.iter().copied().map(ChartValue::from).collect(),
        }
    }

    /// Number of label/value pairs usable for plotting.
    pub fn len(&self) -> usize {
        self.labels.len().min(self.values.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Label/value pairs truncated to the shorter side; the value is `None` when the
    /// supplied entry was not numeric.
    pub fn points(&self) -> impl Iterator<Item = (&str, Option<f64>)> {
        self.labels
            .iter()
            .zip(self.values.iter())
            .map(|(label, value)| (label.as_str(), value.get()))
    }

    /// Numeric values among the usable pairs.
    pub fn numeric_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points().filter_map(|(_, value)| value)
    }

    /// The value at `index`, if that pair exists and is numeric.
    pub fn value_at(&self, index: usize) -> Option<f64> {
        if index < self.len() {
            self.values[index].get()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chart_type_is_lenient() {
        let parsed: ChartType = serde_json::from_value(json!("PIE")).unwrap();
        assert_eq!(parsed, ChartType::Pie);
        let parsed: ChartType = serde_json::from_value(json!("radar")).unwrap();
        assert_eq!(parsed, ChartType::Bar);
        let parsed: ChartType = serde_json::from_value(json!(null)).unwrap();
        assert_eq!(parsed, ChartType::Bar);
    }

    #[test]
    fn series_pairs_truncate_to_shorter_side() {
        let series: ChartSeries = serde_json::from_value(json!({
            "name": "Revenue",
            "labels": ["Q1", "Q2", "Q3"],
            "values": [10, "n/a"]
        }))
        .unwrap();
        assert_eq!(series.len(), 2);
        let points: Vec<_> = series.points().collect();
        assert_eq!(points, vec![("Q1", Some(10.0)), ("Q2", None)]);
        assert_eq!(series.numeric_values().collect::<Vec<_>>(), vec![10.0]);
        assert_eq!(series.value_at(2), None);
    }

    #[test]
    fn series_accepts_numeric_strings() {
        let series: ChartSeries = serde_json::from_value(json!({
            "name": 2024,
            "labels": ["a", "b"],
            "values": ["12.5", "40%"]
        }))
        .unwrap();
        assert_eq!(series.name.as_str(), "2024");
        assert_eq!(series.numeric_values().collect::<Vec<_>>(), vec![12.5, 40.0]);
    }
}

//! Parameter Summary Module
//! Text for the first page of the exported report.

use crate::charts::CircleChart;
use crate::geometry::CircleSpec;

/// Author block printed under the parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorInfo {
    pub name: String,
    pub email: String,
}

impl AuthorInfo {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Parse the first entry of a Cargo `authors` value (`Name <email>`).
    pub fn from_cargo_authors(authors: &str) -> Self {
        let first = authors.split(':').next().unwrap_or_default().trim();
        match (first.find('<'), first.rfind('>')) {
            (Some(open), Some(close)) if open < close => {
                Self::new(first[..open].trim(), first[open + 1..close].trim())
            }
            _ => Self::new(first, ""),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Author: {}", self.name)];
        if !self.email.is_empty() {
            lines.push(format!("Email: {}", self.email));
        }
        lines
    }
}

impl Default for AuthorInfo {
    fn default() -> Self {
        Self::from_cargo_authors(env!("CARGO_PKG_AUTHORS"))
    }
}

/// Human-readable summary of the parameters behind a chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSummary {
    lines: Vec<String>,
}

impl ParameterSummary {
    pub const HEADING: &'static str = "Task parameters:";

    pub fn new(spec: &CircleSpec, author: &AuthorInfo) -> Self {
        let mut lines = vec![
            Self::HEADING.to_string(),
            format!("Center: [{:.2}, {:.2}] m", spec.center.0, spec.center.1),
            format!("Radius: {:.2} m", spec.radius),
            format!("Number of points: {}", spec.point_count),
            format!("Point color: {}", spec.point_color),
            String::new(),
        ];
        lines.extend(author.lines());
        Self { lines }
    }

    /// Summary of the parameters the chart was built from.
    pub fn from_chart(chart: &CircleChart, author: &AuthorInfo) -> Self {
        Self::new(chart.spec(), author)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

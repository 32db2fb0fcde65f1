use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use drillmap_core::Transition;
use drillmap_model::{Interaction, RegionCode, RegionPrefix, RenderFrame};
use serde::Serialize;

/// One replayed interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// A region was clicked; `None` when it carries no data.
    Region(Option<RegionPrefix>),
    /// Empty map space was clicked.
    Outside,
}

impl Step {
    pub fn interaction(&self) -> Interaction {
        match self {
            Self::Region(prefix) => Interaction::RegionClicked {
                prefix: prefix.clone(),
            },
            Self::Outside => Interaction::EmptySpaceClicked,
        }
    }
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("outside") {
            return Ok(Self::Outside);
        }
        if s.eq_ignore_ascii_case("region") {
            return Ok(Self::Region(None));
        }
        match s.split_once(':') {
            Some((kind, prefix)) if kind.eq_ignore_ascii_case("region") => {
                RegionPrefix::new(prefix.trim())
                    .map(|prefix| Self::Region(Some(prefix)))
                    .map_err(|error| error.to_string())
            }
            _ => Err(format!(
                "unknown step '{s}': expected region:<prefix>, region or outside"
            )),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Region(Some(prefix)) => write!(f, "region:{prefix}"),
            Self::Region(None) => f.write_str("region"),
            Self::Outside => f.write_str("outside"),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InferResult {
    pub data: PathBuf,
    pub records: usize,
    pub prefix: RegionPrefix,
    pub depth: usize,
    pub map_code: RegionCode,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    pub prefix: RegionPrefix,
    pub total: f64,
    pub frame: RenderFrame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepOutcome {
    Committed,
    NoData,
    NoDeeperLevel,
    AtCountryLevel,
    Superseded,
    Failed,
}

impl StepOutcome {
    pub fn of(transition: &Transition) -> Self {
        match transition {
            Transition::Committed(_) => Self::Committed,
            Transition::NoData => Self::NoData,
            Transition::NoDeeperLevel => Self::NoDeeperLevel,
            Transition::AtCountryLevel => Self::AtCountryLevel,
            Transition::Superseded { .. } => Self::Superseded,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Committed => "committed",
            Self::NoData => "no data for region",
            Self::NoDeeperLevel => "no deeper level",
            Self::AtCountryLevel => "already at country level",
            Self::Superseded => "superseded",
            Self::Failed => "failed",
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepReport {
    pub step: String,
    pub outcome: StepOutcome,
    /// Committed scope after the step.
    pub scope: RegionPrefix,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame: Option<RenderFrame>,
}

#[derive(Debug, Serialize)]
pub struct NavigateResult {
    pub steps: Vec<StepReport>,
    pub has_errors: bool,
}

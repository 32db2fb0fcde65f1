use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, info_span, warn};

use drillmap_core::{
    CachingLoader, FsGeometryLoader, GeometryLoader, MapView, Navigator, NavigatorOptions,
    RegionNameResolver, RegionNameTable, Transition, aggregate, build_frame, depth_of,
    derive_map_code, infer_common_prefix, total,
};
use drillmap_ingest::{DatasetColumns, NameColumns, read_dataset, read_region_names};
use drillmap_model::{Dataset, RegionPrefix};

use crate::cli::{AggregateArgs, DataArgs, InferArgs, NameArgs, NavigateArgs};
use crate::types::{AggregateResult, InferResult, NavigateResult, StepOutcome, StepReport};

pub fn load_dataset(args: &DataArgs) -> Result<Dataset> {
    let columns = DatasetColumns::default()
        .with_code(&args.code_column)
        .with_value(&args.value_column);
    read_dataset(&args.data, &columns)
        .with_context(|| format!("load dataset {}", args.data.display()))
}

pub fn load_names(args: &NameArgs) -> Result<RegionNameTable> {
    let Some(path) = &args.names else {
        return Ok(RegionNameTable::new());
    };
    let columns = NameColumns {
        code: args.name_code_column.clone(),
        name: args.name_column.clone(),
    };
    read_region_names(path, &columns).with_context(|| format!("load names {}", path.display()))
}

pub fn run_infer(args: &InferArgs) -> Result<InferResult> {
    let dataset = load_dataset(&args.data)?;
    let prefix = infer_common_prefix(&dataset);
    Ok(InferResult {
        data: args.data.data.clone(),
        records: dataset.len(),
        depth: depth_of(&prefix),
        map_code: derive_map_code(&prefix),
        prefix,
    })
}

pub fn run_aggregate(args: &AggregateArgs) -> Result<AggregateResult> {
    let dataset = load_dataset(&args.data)?;
    let names = load_names(&args.names)?;
    let prefix = match &args.prefix {
        Some(raw) => RegionPrefix::new(raw.trim()).context("parse --prefix")?,
        None => infer_common_prefix(&dataset),
    };
    let span = info_span!("aggregate", prefix = %prefix);
    let _guard = span.enter();

    let records = aggregate(&prefix, &dataset, &names);
    let frame = build_frame(derive_map_code(&prefix), args.data.series_name(), records);
    let total = total(&frame.records);
    info!(entries = frame.records.len(), total, "aggregated");
    Ok(AggregateResult {
        prefix,
        total,
        frame,
    })
}

pub async fn run_navigate(args: &NavigateArgs) -> Result<NavigateResult> {
    let dataset = load_dataset(&args.data)?;
    let names = load_names(&args.names)?;
    let loader = CachingLoader::new(FsGeometryLoader::new(&args.geometry_dir));
    let navigator = Navigator::new(
        dataset,
        names,
        loader,
        NavigatorOptions::new().with_series_name(args.data.series_name()),
    );
    let indicator = spawn_loading_indicator(navigator.subscribe());

    let mut steps = Vec::with_capacity(args.steps.len() + 1);
    let outcome = navigator.start().await;
    steps.push(step_report("start".to_string(), outcome, &navigator));
    for step in &args.steps {
        let outcome = navigator.handle(&step.interaction()).await;
        steps.push(step_report(step.to_string(), outcome, &navigator));
    }

    drop(navigator);
    if let Err(error) = indicator.await {
        warn!(%error, "loading indicator task failed");
    }

    let has_errors = steps.iter().any(|s| s.outcome == StepOutcome::Failed);
    Ok(NavigateResult { steps, has_errors })
}

fn step_report<L, N>(
    step: String,
    outcome: drillmap_core::Result<Transition>,
    navigator: &Navigator<L, N>,
) -> StepReport
where
    L: GeometryLoader,
    N: RegionNameResolver,
{
    let scope = navigator.scope().prefix().clone();
    match outcome {
        Ok(transition) => {
            let outcome = StepOutcome::of(&transition);
            let frame = transition
                .is_committed()
                .then(|| navigator.view().frame);
            StepReport {
                step,
                outcome,
                scope,
                message: None,
                frame,
            }
        }
        Err(error) => StepReport {
            step,
            outcome: StepOutcome::Failed,
            scope,
            message: Some(format!("{:#}", anyhow::Error::new(error))),
            frame: None,
        },
    }
}

/// Show a spinner on stderr while the published view is loading.
///
/// The task ends once the navigator is dropped.
pub fn spawn_loading_indicator(mut views: watch::Receiver<MapView>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut spinner: Option<ProgressBar> = None;
        while views.changed().await.is_ok() {
            let loading = views.borrow_and_update().is_loading();
            spinner = match (loading, spinner.take()) {
                (true, Some(active)) => Some(active),
                (true, None) => Some(start_spinner()),
                (false, Some(active)) => {
                    active.finish_and_clear();
                    None
                }
                (false, None) => None,
            };
        }
        if let Some(active) = spinner {
            active.finish_and_clear();
        }
    })
}

fn start_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message("loading map geometry");
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

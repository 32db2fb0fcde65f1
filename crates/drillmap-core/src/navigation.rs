//! Drill-down / drill-up navigation over the administrative hierarchy.
//!
//! A [`Navigator`] owns the committed [`Scope`] and publishes a [`MapView`]
//! to subscribers after every committed transition. Each transition:
//!
//! 1. picks its target scope from the committed one,
//! 2. marks the view as loading and awaits the target's boundary geometry,
//! 3. re-aggregates the dataset for the target and commits scope and view
//!    together.
//!
//! Transitions may overlap. The most recently started one wins: an older
//! transition that finishes its geometry load after a newer one has started
//! discards its result and reports [`Transition::Superseded`].

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use drillmap_model::{Dataset, Interaction, RegionCode, RegionPrefix};
use tokio::sync::watch;
use tracing::{Instrument, debug, info, info_span, warn};

use crate::adcode::derive_map_code;
use crate::aggregate::aggregate;
use crate::error::{NavigationError, Result};
use crate::geometry::GeometryLoader;
use crate::inference::infer_common_prefix;
use crate::names::RegionNameResolver;
use crate::render::{MapView, build_frame};

/// The region currently being viewed.
///
/// The map code is always derived from the prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scope {
    prefix: RegionPrefix,
    map_code: RegionCode,
}

impl Scope {
    pub fn new(prefix: RegionPrefix) -> Self {
        let map_code = derive_map_code(&prefix);
        Self { prefix, map_code }
    }

    pub fn country() -> Self {
        Self::new(RegionPrefix::country())
    }

    pub fn prefix(&self) -> &RegionPrefix {
        &self.prefix
    }

    pub fn map_code(&self) -> &RegionCode {
        &self.map_code
    }

    /// The enclosing scope, or `None` at the country level.
    pub fn parent(&self) -> Option<Self> {
        self.prefix.parent().map(Self::new)
    }

    /// The scope a click on an entry with `prefix` leads to, or `None` when
    /// the entry is a leaf.
    pub fn child(prefix: &RegionPrefix) -> Option<Self> {
        if prefix.is_leaf() {
            None
        } else {
            Some(Self::new(prefix.clone()))
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.prefix.is_country() {
            write!(f, "country (map {})", self.map_code)
        } else {
            write!(f, "{} (map {})", self.prefix, self.map_code)
        }
    }
}

/// Outcome of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The scope changed and a new view was published.
    Committed(Scope),
    /// The activated region has no data behind it.
    NoData,
    /// The activated entry is already a leaf.
    NoDeeperLevel,
    /// Drill-up requested at the country level.
    AtCountryLevel,
    /// A newer transition started while this one was loading; its result was
    /// discarded.
    Superseded { requested: Scope },
}

impl Transition {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }

    /// True for the recognized "nothing to do" signals.
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::NoData | Self::NoDeeperLevel | Self::AtCountryLevel)
    }
}

/// Presentation options for a navigator.
#[derive(Debug, Clone, Default)]
pub struct NavigatorOptions {
    /// Label given to the map series (usually the metric name).
    pub series_name: String,
}

impl NavigatorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_series_name(mut self, name: impl Into<String>) -> Self {
        self.series_name = name.into();
        self
    }
}

/// Navigation state machine for one dataset.
pub struct Navigator<L, N> {
    dataset: Dataset,
    names: N,
    loader: L,
    options: NavigatorOptions,
    scope: Mutex<Scope>,
    generation: AtomicU64,
    view: watch::Sender<MapView>,
}

impl<L, N> Navigator<L, N>
where
    L: GeometryLoader,
    N: RegionNameResolver,
{
    /// Create a navigator whose initial scope is the longest prefix shared by
    /// the whole dataset. Nothing is loaded until [`start`](Self::start).
    pub fn new(dataset: Dataset, names: N, loader: L, options: NavigatorOptions) -> Self {
        let scope = Scope::new(infer_common_prefix(&dataset));
        info!(
            records = dataset.len(),
            scope = %scope,
            "navigator created"
        );
        let (view, _) = watch::channel(MapView::placeholder(
            scope.map_code().clone(),
            &options.series_name,
        ));
        Self {
            dataset,
            names,
            loader,
            options,
            scope: Mutex::new(scope),
            generation: AtomicU64::new(0),
            view,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn options(&self) -> &NavigatorOptions {
        &self.options
    }

    /// The committed scope.
    pub fn scope(&self) -> Scope {
        self.lock_scope().clone()
    }

    /// Receive every published view; the receiver starts at the current one.
    pub fn subscribe(&self) -> watch::Receiver<MapView> {
        self.view.subscribe()
    }

    /// Snapshot of the current view.
    pub fn view(&self) -> MapView {
        self.view.borrow().clone()
    }

    /// Load and publish the initial scope.
    pub async fn start(&self) -> Result<Transition> {
        let target = self.scope();
        self.transition_to(target).await
    }

    /// Drill into the entry identified by `prefix`.
    pub async fn drill_down(&self, prefix: &RegionPrefix) -> Result<Transition> {
        let Some(target) = Scope::child(prefix) else {
            debug!(prefix = %prefix, "no deeper level");
            return Ok(Transition::NoDeeperLevel);
        };
        self.transition_to(target).await
    }

    /// Move one level up from the committed scope.
    pub async fn drill_up(&self) -> Result<Transition> {
        let current = self.scope();
        let Some(target) = current.parent() else {
            debug!(scope = %current, "already at country level");
            return Ok(Transition::AtCountryLevel);
        };
        self.transition_to(target).await
    }

    /// Dispatch an interaction raised by the renderer.
    pub async fn handle(&self, interaction: &Interaction) -> Result<Transition> {
        match interaction {
            Interaction::RegionClicked { prefix: None } => {
                debug!("clicked region has no data");
                Ok(Transition::NoData)
            }
            Interaction::RegionClicked {
                prefix: Some(prefix),
            } => self.drill_down(prefix).await,
            Interaction::EmptySpaceClicked => self.drill_up().await,
        }
    }

    async fn transition_to(&self, target: Scope) -> Result<Transition> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let span = info_span!(
            "transition",
            generation,
            prefix = %target.prefix(),
            map_code = %target.map_code()
        );
        self.run_transition(generation, target)
            .instrument(span)
            .await
    }

    async fn run_transition(&self, generation: u64, target: Scope) -> Result<Transition> {
        self.view.send_modify(|view| view.frame.loading = true);
        debug!("loading geometry");

        let loaded = self.loader.load_geometry(target.map_code()).await;

        let mut scope = self.lock_scope();
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("superseded by a newer transition");
            return Ok(Transition::Superseded { requested: target });
        }

        let geometry = match loaded {
            Ok(geometry) => geometry,
            Err(source) => {
                self.view.send_modify(|view| view.frame.loading = false);
                warn!(error = %source, "geometry load failed, scope unchanged");
                return Err(NavigationError::Geometry {
                    map_code: target.map_code().to_string(),
                    source,
                });
            }
        };

        let records = aggregate(target.prefix(), &self.dataset, &self.names);
        let frame = build_frame(
            target.map_code().clone(),
            &self.options.series_name,
            records,
        );
        info!(
            entries = frame.records.len(),
            min = frame.color_scale_min,
            max = frame.color_scale_max,
            "scope committed"
        );
        *scope = target.clone();
        self.view.send_replace(MapView {
            frame,
            geometry: Some(geometry),
        });
        Ok(Transition::Committed(target))
    }

    fn lock_scope(&self) -> MutexGuard<'_, Scope> {
        self.scope.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

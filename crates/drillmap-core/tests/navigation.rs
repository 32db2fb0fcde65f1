//! Drill-down / drill-up behaviour of the navigator against in-memory loaders.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use geojson::GeoJson;
use tokio::sync::Notify;

use drillmap_core::{
    Geometry, GeometryError, GeometryLoader, NavigationError, Navigator, NavigatorOptions,
    NoNames, RegionNameTable, Scope, Transition,
};
use drillmap_model::{DataRecord, Dataset, Interaction, RegionCode, RegionPrefix};

fn empty_collection() -> Geometry {
    match r#"{"type":"FeatureCollection","features":[]}"#
        .parse::<GeoJson>()
        .unwrap()
    {
        GeoJson::FeatureCollection(collection) => collection,
        other => panic!("unexpected geojson: {other:?}"),
    }
}

/// Serves an empty collection for every map code except the failing ones and
/// records every request.
#[derive(Default)]
struct RecordingLoader {
    failing: HashSet<String>,
    requests: Mutex<Vec<String>>,
}

impl RecordingLoader {
    fn failing(codes: &[&str]) -> Self {
        Self {
            failing: codes.iter().map(|c| c.to_string()).collect(),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl GeometryLoader for RecordingLoader {
    async fn load_geometry(&self, map_code: &RegionCode) -> Result<Arc<Geometry>, GeometryError> {
        self.requests.lock().unwrap().push(map_code.to_string());
        if self.failing.contains(map_code.as_str()) {
            return Err(GeometryError::Unavailable {
                map_code: map_code.to_string(),
                message: "offline".to_string(),
            });
        }
        Ok(Arc::new(empty_collection()))
    }
}

/// Blocks loads of one map code until the gate is opened.
struct GatedLoader {
    gated: String,
    gate: Arc<Notify>,
}

#[async_trait]
impl GeometryLoader for GatedLoader {
    async fn load_geometry(&self, map_code: &RegionCode) -> Result<Arc<Geometry>, GeometryError> {
        if map_code.as_str() == self.gated {
            self.gate.notified().await;
        }
        Ok(Arc::new(empty_collection()))
    }
}

fn dataset(rows: &[(&str, f64)]) -> Dataset {
    rows.iter()
        .map(|(c, v)| DataRecord::new(RegionCode::new(*c).unwrap(), *v).unwrap())
        .collect()
}

fn sample() -> Dataset {
    dataset(&[
        ("110101", 10.0),
        ("110102", 5.0),
        ("110201", 2.0),
        ("310101", 7.0),
    ])
}

fn prefix(s: &str) -> RegionPrefix {
    RegionPrefix::new(s).unwrap()
}

fn navigator<L: GeometryLoader>(data: Dataset, loader: L) -> Navigator<L, NoNames> {
    Navigator::new(
        data,
        NoNames,
        loader,
        NavigatorOptions::new().with_series_name("population"),
    )
}

#[tokio::test]
async fn start_renders_inferred_scope() {
    let nav = navigator(sample(), RecordingLoader::default());
    assert_eq!(nav.scope(), Scope::country());
    assert!(nav.view().geometry.is_none());

    let outcome = nav.start().await.unwrap();

    assert_eq!(outcome, Transition::Committed(Scope::country()));
    let view = nav.view();
    assert!(view.geometry.is_some());
    assert!(!view.frame.loading);
    assert_eq!(view.frame.map_code.as_str(), "100000");
    assert_eq!(view.frame.series_name, "population");
    let values: Vec<(&str, f64)> = view
        .frame
        .records
        .iter()
        .map(|r| (r.code.as_str(), r.value))
        .collect();
    assert_eq!(values, vec![("110000", 17.0), ("310000", 7.0)]);
    assert_eq!(view.frame.color_scale_min, 7.0);
    assert_eq!(view.frame.color_scale_max, 17.0);
}

#[tokio::test]
async fn drill_down_then_up_restores_scope() {
    let loader = Arc::new(RecordingLoader::default());
    let nav = navigator(sample(), Arc::clone(&loader));
    nav.start().await.unwrap();

    let down = nav.drill_down(&prefix("11")).await.unwrap();
    assert_eq!(down, Transition::Committed(Scope::new(prefix("11"))));
    assert_eq!(nav.view().frame.map_code.as_str(), "110000");
    let view = nav.view();
    let cities: Vec<(&str, &str)> = view
        .frame
        .records
        .iter()
        .map(|r| (r.code.as_str(), r.prefix.as_str()))
        .collect();
    assert_eq!(cities, vec![("110100", "1101"), ("110200", "1102")]);

    let up = nav.drill_up().await.unwrap();
    assert_eq!(up, Transition::Committed(Scope::country()));
    assert_eq!(loader.requests(), vec!["100000", "110000", "100000"]);
}

#[tokio::test]
async fn county_level_uses_city_geometry_and_leaf_entries() {
    let nav = navigator(sample(), RecordingLoader::default());
    nav.start().await.unwrap();
    nav.drill_down(&prefix("11")).await.unwrap();
    nav.drill_down(&prefix("1101")).await.unwrap();

    let view = nav.view();
    assert_eq!(view.frame.map_code.as_str(), "110100");
    assert_eq!(view.frame.records.len(), 2);
    assert!(view.frame.records.iter().all(|r| r.prefix.is_leaf()));

    let leaf = view.frame.records[0].prefix.clone();
    let outcome = nav
        .handle(&Interaction::RegionClicked { prefix: Some(leaf) })
        .await
        .unwrap();
    assert_eq!(outcome, Transition::NoDeeperLevel);
    assert_eq!(nav.scope(), Scope::new(prefix("1101")));
}

#[tokio::test]
async fn drill_up_at_country_is_a_signalled_noop() {
    let loader = Arc::new(RecordingLoader::default());
    let nav = navigator(sample(), Arc::clone(&loader));
    nav.start().await.unwrap();
    let before = nav.view().frame;

    let outcome = nav.handle(&Interaction::EmptySpaceClicked).await.unwrap();

    assert_eq!(outcome, Transition::AtCountryLevel);
    assert!(outcome.is_noop());
    assert_eq!(nav.scope(), Scope::country());
    assert_eq!(nav.view().frame, before);
    assert_eq!(loader.requests().len(), 1);
}

#[tokio::test]
async fn region_without_data_is_a_noop() {
    let nav = navigator(sample(), RecordingLoader::default());
    nav.start().await.unwrap();
    let outcome = nav
        .handle(&Interaction::RegionClicked { prefix: None })
        .await
        .unwrap();
    assert_eq!(outcome, Transition::NoData);
    assert_eq!(nav.scope(), Scope::country());
}

#[tokio::test]
async fn geometry_failure_leaves_scope_unchanged() {
    let nav = navigator(sample(), RecordingLoader::failing(&["310000"]));
    nav.start().await.unwrap();
    let before = nav.view().frame;

    let err = nav.drill_down(&prefix("31")).await.unwrap_err();

    assert!(matches!(err, NavigationError::Geometry { ref map_code, .. } if map_code == "310000"));
    assert_eq!(nav.scope(), Scope::country());
    let after = nav.view().frame;
    assert!(!after.loading);
    assert_eq!(after, before);
}

#[tokio::test]
async fn leaf_dataset_starts_at_full_code() {
    let data = dataset(&[("440305", 3.0), ("440305", 4.0)]);
    let nav = navigator(data, RecordingLoader::default());
    assert_eq!(nav.scope().prefix().as_str(), "440305");

    nav.start().await.unwrap();
    let view = nav.view();
    assert_eq!(view.frame.map_code.as_str(), "440300");
    assert_eq!(view.frame.records.len(), 2);

    let up = nav.drill_up().await.unwrap();
    assert_eq!(up, Transition::Committed(Scope::new(prefix("4403"))));
}

#[tokio::test]
async fn empty_dataset_renders_empty_country_map() {
    let nav = navigator(Dataset::default(), RecordingLoader::default());
    nav.start().await.unwrap();
    let frame = nav.view().frame;
    assert!(frame.records.is_empty());
    assert_eq!(frame.color_scale_min, 0.0);
    assert_eq!(frame.color_scale_max, 0.0);
}

#[tokio::test]
async fn names_are_attached_to_entries() {
    let names: RegionNameTable = [
        (RegionCode::new("110000").unwrap(), "Beijing"),
        (RegionCode::new("310000").unwrap(), "Shanghai"),
    ]
    .into_iter()
    .collect();
    let nav = Navigator::new(
        sample(),
        names,
        RecordingLoader::default(),
        NavigatorOptions::new(),
    );
    nav.start().await.unwrap();
    let names: Vec<String> = nav
        .view()
        .frame
        .records
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(names, vec!["Beijing", "Shanghai"]);
}

#[tokio::test]
async fn latest_transition_wins() {
    let gate = Arc::new(Notify::new());
    let nav = navigator(
        sample(),
        GatedLoader {
            gated: "110000".to_string(),
            gate: Arc::clone(&gate),
        },
    );
    nav.start().await.unwrap();
    let mut views = nav.subscribe();
    drop(views.borrow_and_update());

    let (beijing, shanghai) = (prefix("11"), prefix("31"));
    let slow = nav.drill_down(&beijing);
    let fast = async {
        let outcome = nav.drill_down(&shanghai).await;
        gate.notify_one();
        outcome
    };
    let (slow, fast) = tokio::join!(slow, fast);

    assert_eq!(fast.unwrap(), Transition::Committed(Scope::new(prefix("31"))));
    assert_eq!(
        slow.unwrap(),
        Transition::Superseded {
            requested: Scope::new(prefix("11"))
        }
    );
    assert_eq!(nav.scope(), Scope::new(prefix("31")));

    assert!(views.has_changed().unwrap());
    let view = views.borrow_and_update().clone();
    assert_eq!(view.frame.map_code.as_str(), "310000");
    assert!(!view.frame.loading);
}

#[tokio::test]
async fn subscribers_see_loading_then_commit() {
    let gate = Arc::new(Notify::new());
    let nav = navigator(
        sample(),
        GatedLoader {
            gated: "110000".to_string(),
            gate: Arc::clone(&gate),
        },
    );
    nav.start().await.unwrap();
    let views = nav.subscribe();

    let target = prefix("11");
    let drill = nav.drill_down(&target);
    let observe = async {
        tokio::task::yield_now().await;
        let loading = views.borrow().frame.loading;
        let map_code = views.borrow().frame.map_code.clone();
        gate.notify_one();
        (loading, map_code)
    };
    let (outcome, (loading, map_code)) = tokio::join!(drill, observe);

    assert!(outcome.unwrap().is_committed());
    assert!(loading);
    assert_eq!(map_code.as_str(), "100000");
    assert!(!views.borrow().frame.loading);
    assert_eq!(views.borrow().frame.map_code.as_str(), "110000");
}

#[tokio::test]
async fn failing_latest_transition_supersedes_older_and_clears_loading() {
    struct GatedFailingLoader {
        gate: Arc<Notify>,
    }

    #[async_trait]
    impl GeometryLoader for GatedFailingLoader {
        async fn load_geometry(
            &self,
            map_code: &RegionCode,
        ) -> Result<Arc<Geometry>, GeometryError> {
            match map_code.as_str() {
                "110000" => {
                    self.gate.notified().await;
                    Ok(Arc::new(empty_collection()))
                }
                "310000" => Err(GeometryError::Unavailable {
                    map_code: map_code.to_string(),
                    message: "offline".to_string(),
                }),
                _ => Ok(Arc::new(empty_collection())),
            }
        }
    }

    let gate = Arc::new(Notify::new());
    let nav = navigator(
        sample(),
        GatedFailingLoader {
            gate: Arc::clone(&gate),
        },
    );
    nav.start().await.unwrap();
    let before = nav.view().frame;

    let (beijing, shanghai) = (prefix("11"), prefix("31"));
    let slow = nav.drill_down(&beijing);
    let fast = async {
        let outcome = nav.drill_down(&shanghai).await;
        gate.notify_one();
        outcome
    };
    let (slow, fast) = tokio::join!(slow, fast);

    assert_eq!(
        slow.unwrap(),
        Transition::Superseded {
            requested: Scope::new(prefix("11"))
        }
    );
    assert!(matches!(
        fast,
        Err(NavigationError::Geometry { ref map_code, .. }) if map_code == "310000"
    ));
    assert_eq!(nav.scope(), Scope::country());
    let after = nav.view().frame;
    assert!(!after.loading);
    assert_eq!(after, before);
}

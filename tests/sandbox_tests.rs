use mirror_optics::core::{ProjectionKind, RemovalReason, SandboxEvent};
use mirror_optics::error::OpticsError;
use mirror_optics::projection::ProjectionManager;
use mirror_optics::reflection::{InfiniteReflectionConfig, ReflectionSet};
use mirror_optics::scene::{MirrorDescription, PolygonDescription, ViewerDescription};
use mirror_optics::{
    Axis, ClickOutcome, Mirror, MirrorHandle, OpticsSandbox, Point2, Polygon, PolygonHandle,
    ReflectionMode, SandboxConfig, SceneDescription, Vector2, Viewer,
};

fn triangle_at(x: f64, y: f64) -> Polygon {
    Polygon::from_vertices(vec![
        Point2::new(x - 10.0, y - 10.0),
        Point2::new(x + 10.0, y - 10.0),
        Point2::new(x, y + 20.0),
    ])
    .expect("valid triangle")
}

fn sandbox_with_mirror() -> (OpticsSandbox, MirrorHandle, PolygonHandle) {
    let mut sandbox = OpticsSandbox::new();
    let mirror = sandbox.add_mirror(Mirror::from_axis(Axis::from_coords(0.0, -100.0, 0.0, 100.0)));
    let polygon = sandbox.add_polygon(triangle_at(50.0, 0.0));
    sandbox.add_viewer(Viewer::new(Point2::new(50.0, 40.0), 10.0));
    sandbox.update_reflections().expect("reflections build");
    sandbox.events_mut().clear();
    (sandbox, mirror, polygon)
}

#[test]
fn test_default_config() {
    let config = SandboxConfig::default();
    assert_eq!(config.recursive_reflection_depth, 2);
    assert_eq!(config.reflection_mode, ReflectionMode::FixedDepth);
    assert_eq!(config.trace.max_reflections, 10);
    assert_eq!(config.trace.self_intersection_epsilon, 0.1);
    assert_eq!(config.projection_tolerance, 10.0);
    assert!(config.validate().is_ok());
}

#[test]
fn test_invalid_config_is_rejected() {
    let negative_tolerance = SandboxConfig {
        projection_tolerance: -1.0,
        ..SandboxConfig::default()
    };
    assert!(matches!(
        OpticsSandbox::with_config(negative_tolerance),
        Err(OpticsError::InvalidParameter(_))
    ));

    let bad_fade = SandboxConfig {
        reflection_mode: ReflectionMode::InfiniteFade,
        infinite: InfiniteReflectionConfig {
            fade_rate: 1.5,
            ..InfiniteReflectionConfig::default()
        },
        ..SandboxConfig::default()
    };
    assert!(OpticsSandbox::with_config(bad_fade).is_err());
}

#[test]
fn test_structure_changes_trigger_rebuild() {
    let mut sandbox = OpticsSandbox::new();
    assert!(!sandbox.is_structure_dirty());

    sandbox.add_mirror(Mirror::from_axis(Axis::from_coords(0.0, -100.0, 0.0, 100.0)));
    sandbox.add_polygon(triangle_at(50.0, 0.0));
    assert!(sandbox.is_structure_dirty());

    sandbox.update_reflections().expect("reflections build");
    assert!(!sandbox.is_structure_dirty());
    assert_eq!(sandbox.reflections().virtual_polygons().len(), 1);
    assert_eq!(
        sandbox.events_mut().next_event(),
        Some(SandboxEvent::ReflectionsRebuilt {
            polygons: 1,
            viewers: 0,
            mirrors: 0,
        })
    );
}

#[test]
fn test_click_toggles_projections() {
    let (mut sandbox, _, _) = sandbox_with_mirror();

    let id = sandbox
        .resolve_click_target(Point2::new(-50.0, 0.0))
        .expect("click lands on the virtual polygon");
    assert!(sandbox.resolve_click_target(Point2::new(-200.0, 0.0)).is_none());

    let outcome = sandbox.handle_virtual_polygon_click(id).expect("click handled");
    assert_eq!(outcome, ClickOutcome::Created { real_valid: true });
    assert!(sandbox.virtual_projections().has_projection(id));
    assert!(sandbox.real_projections().has_projection(id));

    let outcome = sandbox.handle_virtual_polygon_click(id).expect("click handled");
    assert_eq!(outcome, ClickOutcome::Removed);
    assert!(sandbox.virtual_projections().is_empty());
    assert!(sandbox.real_projections().is_empty());

    // Two clicks leave the sandbox as it was, so a third starts over
    let outcome = sandbox.handle_virtual_polygon_click(id).expect("click handled");
    assert_eq!(outcome, ClickOutcome::Created { real_valid: true });

    let events = sandbox.events_mut().drain();
    assert_eq!(events.len(), 6);
    assert_eq!(
        events[0],
        SandboxEvent::ProjectionCreated {
            id,
            kind: ProjectionKind::Virtual
        }
    );
    assert_eq!(
        events[3],
        SandboxEvent::ProjectionRemoved {
            id,
            kind: ProjectionKind::Real,
            reason: RemovalReason::Toggled
        }
    );
}

#[test]
fn test_drag_invalidates_real_projection() {
    let (mut sandbox, mirror, _) = sandbox_with_mirror();
    let id = sandbox.reflections().polygon_ids()[0];
    sandbox.handle_virtual_polygon_click(id).expect("click handled");
    sandbox.events_mut().clear();

    // Still valid after a small drag of the viewer
    let viewer = sandbox.scene().viewer_handles()[0];
    sandbox.move_viewer(viewer, Vector2::new(0.0, 5.0)).expect("viewer exists");
    sandbox.update_reflections().expect("refresh");
    assert!(sandbox.update_all_projections().is_empty());
    assert!(sandbox.real_projections().has_projection(id));

    sandbox
        .set_mirror_axis(mirror, Axis::from_coords(0.0, -100.0, 0.0, 10.0))
        .expect("mirror exists");
    sandbox.update_reflections().expect("refresh");
    assert_eq!(sandbox.update_all_projections(), vec![id]);

    assert!(sandbox.virtual_projections().has_projection(id));
    assert!(!sandbox.real_projections().has_projection(id));
    assert_eq!(
        sandbox.events_mut().drain(),
        vec![SandboxEvent::ProjectionRemoved {
            id,
            kind: ProjectionKind::Real,
            reason: RemovalReason::Invalidated
        }]
    );
}

#[test]
fn test_real_projection_returns_after_drag_back() {
    let (mut sandbox, mirror, _) = sandbox_with_mirror();
    let id = sandbox.reflections().polygon_ids()[0];
    sandbox.handle_virtual_polygon_click(id).expect("click handled");
    sandbox.events_mut().clear();

    sandbox
        .set_mirror_axis(mirror, Axis::from_coords(0.0, -100.0, 0.0, 10.0))
        .expect("mirror exists");
    sandbox.update_reflections().expect("refresh");
    assert_eq!(sandbox.update_all_projections(), vec![id]);
    assert!(!sandbox.real_projections().has_projection(id));

    sandbox
        .set_mirror_axis(mirror, Axis::from_coords(0.0, -100.0, 0.0, 100.0))
        .expect("mirror exists");
    sandbox.update_reflections().expect("refresh");
    assert!(sandbox.update_all_projections().is_empty());

    assert!(sandbox.virtual_projections().has_projection(id));
    assert!(sandbox.real_projections().has_projection(id));
    assert_eq!(
        sandbox.events_mut().drain(),
        vec![
            SandboxEvent::ProjectionRemoved {
                id,
                kind: ProjectionKind::Real,
                reason: RemovalReason::Invalidated
            },
            SandboxEvent::ProjectionCreated {
                id,
                kind: ProjectionKind::Real
            },
        ]
    );

    // Already present, so a further update restores nothing
    assert!(sandbox.update_all_projections().is_empty());
    assert!(sandbox.events().is_empty());
}

#[test]
fn test_rebuild_clears_projections() {
    let (mut sandbox, _, _) = sandbox_with_mirror();
    let id = sandbox.reflections().polygon_ids()[0];
    sandbox.handle_virtual_polygon_click(id).expect("click handled");

    sandbox.add_polygon(triangle_at(50.0, -60.0));
    sandbox.update_reflections().expect("rebuild");

    assert!(sandbox.virtual_projections().is_empty());
    assert!(sandbox.real_projections().is_empty());
    assert_eq!(sandbox.reflections().virtual_polygons().len(), 2);

    let rebuilt = sandbox
        .events()
        .events_of_kind(ProjectionKind::Virtual)
        .into_iter()
        .any(|event| {
            *event
                == SandboxEvent::ProjectionRemoved {
                    id,
                    kind: ProjectionKind::Virtual,
                    reason: RemovalReason::Rebuilt,
                }
        });
    assert!(rebuilt);
}

#[test]
fn test_stale_id_is_rejected() {
    let (mut sandbox, _, polygon) = sandbox_with_mirror();
    let id = sandbox.reflections().polygon_ids()[0];

    sandbox.remove_polygon(polygon).expect("polygon exists");
    sandbox.update_reflections().expect("rebuild");

    let result = sandbox.handle_virtual_polygon_click(id);
    assert!(matches!(result, Err(OpticsError::StaleReflection(_))));
    assert!(sandbox.remove_polygon(polygon).is_err());
}

#[test]
fn test_failed_click_leaves_no_projection() {
    let (mut sandbox, _, polygon) = sandbox_with_mirror();
    let id = sandbox.reflections().polygon_ids()[0];

    // The image is still in the reflections, but its real source is gone
    sandbox.remove_polygon(polygon).expect("polygon exists");

    let result = sandbox.handle_virtual_polygon_click(id);
    assert!(matches!(result, Err(OpticsError::ResourceNotFound(_))));
    assert!(sandbox.virtual_projections().is_empty());
    assert!(sandbox.real_projections().is_empty());
    assert!(sandbox.events().is_empty());

    // A second click fails the same way instead of toggling a hidden projection off
    let result = sandbox.handle_virtual_polygon_click(id);
    assert!(matches!(result, Err(OpticsError::ResourceNotFound(_))));
    assert!(sandbox.virtual_projections().is_empty());
}

#[test]
fn test_click_without_viewer_fails() {
    let mut sandbox = OpticsSandbox::new();
    sandbox.add_mirror(Mirror::from_axis(Axis::from_coords(0.0, -100.0, 0.0, 100.0)));
    sandbox.add_polygon(triangle_at(50.0, 0.0));
    sandbox.update_reflections().expect("rebuild");

    let id = sandbox.reflections().polygon_ids()[0];
    let result = sandbox.handle_virtual_polygon_click(id);
    assert!(matches!(result, Err(OpticsError::ResourceNotFound(_))));
}

#[test]
fn test_clear_projections() {
    let (mut sandbox, _, _) = sandbox_with_mirror();
    let id = sandbox.reflections().polygon_ids()[0];
    sandbox.handle_virtual_polygon_click(id).expect("click handled");

    assert_eq!(sandbox.clear_projections(), 2);
    assert_eq!(sandbox.clear_projections(), 0);
    assert_eq!(sandbox.events().events_for(id).len(), 4);
}

#[test]
fn test_from_description_with_infinite_mode() {
    let description = SceneDescription {
        polygons: vec![PolygonDescription::new(vec![[40.0, -10.0], [60.0, -10.0], [50.0, 20.0]])],
        mirrors: vec![MirrorDescription::new([0.0, -100.0, 0.0, 100.0])],
        viewers: vec![ViewerDescription::new([50.0, 40.0], 10.0)],
    };
    let config = SandboxConfig {
        reflection_mode: ReflectionMode::InfiniteFade,
        ..SandboxConfig::default()
    };

    let mut sandbox = OpticsSandbox::from_description(&description, config).expect("valid scene");
    assert_eq!(sandbox.reflection_engine_name(), "opacity-fading infinite");
    assert!(!sandbox.is_structure_dirty());
    assert_eq!(sandbox.reflections().virtual_polygons().len(), 1);

    let polygon = sandbox.scene().polygon_handles()[0];
    sandbox.move_polygon(polygon, Vector2::new(0.0, 10.0)).expect("polygon exists");
    sandbox.update_reflections().expect("refresh");

    let id = sandbox
        .resolve_click_target(Point2::new(-50.0, 10.0))
        .expect("image followed the drag");
    let outcome = sandbox.handle_virtual_polygon_click(id).expect("click handled");
    assert_eq!(outcome, ClickOutcome::Created { real_valid: true });
}

#[test]
fn test_switching_config_rebuilds() {
    let (mut sandbox, _, _) = sandbox_with_mirror();
    assert_eq!(sandbox.reflection_engine_name(), "fixed-depth tree");

    let config = SandboxConfig {
        recursive_reflection_depth: 0,
        ..SandboxConfig::default()
    };
    sandbox.set_config(config).expect("valid config");
    assert!(sandbox.is_structure_dirty());

    sandbox.update_reflections().expect("rebuild");
    assert_eq!(sandbox.reflections().object_count(), 0);
    assert_eq!(sandbox.config().recursive_reflection_depth, 0);
}

use mirror_optics::beam::{
    calculate_reflection_path, trace_path, LightBeam, TraceSettings, DEFAULT_MAX_REFLECTIONS,
};
use mirror_optics::geometry::Axis;
use mirror_optics::math::{Point2, Vector2};
use approx::assert_relative_eq;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

fn assert_path_eq(path: &[Point2], expected: &[(f64, f64)]) {
    assert_eq!(path.len(), expected.len(), "path was {:?}", path);
    for (point, &(x, y)) in path.iter().zip(expected) {
        assert_relative_eq!(*point, Point2::new(x, y), epsilon = 1e-9);
    }
}

#[test]
fn test_no_mirrors_gives_straight_beam() {
    let mirrors: Vec<Axis> = Vec::new();
    let path = calculate_reflection_path(
        Point2::new(1.0, 2.0),
        Vector2::new(0.0, 1.0),
        &mirrors,
        50.0,
        DEFAULT_MAX_REFLECTIONS,
    );
    assert_path_eq(&path, &[(1.0, 2.0), (1.0, 52.0)]);
}

#[test]
fn test_perpendicular_bounce() {
    let mirrors = vec![Axis::from_coords(10.0, -10.0, 10.0, 10.0)];
    let path = calculate_reflection_path(
        Point2::new(0.0, 0.0),
        Vector2::new(1.0, 0.0),
        &mirrors,
        30.0,
        DEFAULT_MAX_REFLECTIONS,
    );
    assert_path_eq(&path, &[(0.0, 0.0), (10.0, 0.0), (-10.0, 0.0)]);
}

#[test]
fn test_short_mirror_bounce_returns_to_start() {
    let mirrors = vec![Axis::from_coords(10.0, -5.0, 10.0, 5.0)];
    let path = calculate_reflection_path(
        Point2::new(0.0, 0.0),
        Vector2::new(1.0, 0.0),
        &mirrors,
        20.0,
        DEFAULT_MAX_REFLECTIONS,
    );
    assert_path_eq(&path, &[(0.0, 0.0), (10.0, 0.0), (0.0, 0.0)]);
}

#[test]
fn test_mirror_beyond_length_is_not_hit() {
    let mirrors = vec![Axis::from_coords(10.0, -10.0, 10.0, 10.0)];
    let path = calculate_reflection_path(
        Point2::new(0.0, 0.0),
        Vector2::new(1.0, 0.0),
        &mirrors,
        5.0,
        DEFAULT_MAX_REFLECTIONS,
    );
    assert_path_eq(&path, &[(0.0, 0.0), (5.0, 0.0)]);
}

#[test]
fn test_zero_reflections_is_straight() {
    let mirrors = vec![Axis::from_coords(10.0, -10.0, 10.0, 10.0)];
    let path = calculate_reflection_path(
        Point2::new(0.0, 0.0),
        Vector2::new(1.0, 0.0),
        &mirrors,
        30.0,
        0,
    );
    assert_path_eq(&path, &[(0.0, 0.0), (30.0, 0.0)]);
}

#[test]
fn test_bounce_budget_caps_path() {
    // Two parallel mirrors trap the beam
    let mirrors = vec![
        Axis::from_coords(-10.0, -100.0, -10.0, 100.0),
        Axis::from_coords(10.0, -100.0, 10.0, 100.0),
    ];
    let path = calculate_reflection_path(
        Point2::new(0.0, 0.0),
        Vector2::new(1.0, 0.0),
        &mirrors,
        1000.0,
        3,
    );

    assert_eq!(path.len(), 4);
    assert_relative_eq!(path[1], Point2::new(10.0, 0.0), epsilon = 1e-9);
    assert_relative_eq!(path[2], Point2::new(-10.0, 0.0), epsilon = 1e-9);
    assert_relative_eq!(path[3], Point2::new(10.0, 0.0), epsilon = 1e-9);
}

#[test]
fn test_equal_distance_tie_goes_to_first_mirror() {
    let vertical = Axis::from_coords(10.0, -10.0, 10.0, 10.0);
    let diagonal = Axis::from_coords(5.0, -5.0, 15.0, 5.0);

    let vertical_first = [vertical, diagonal];
    let path = calculate_reflection_path(
        Point2::new(0.0, 0.0),
        Vector2::new(1.0, 0.0),
        &vertical_first,
        30.0,
        DEFAULT_MAX_REFLECTIONS,
    );
    assert_path_eq(&path, &[(0.0, 0.0), (10.0, 0.0), (-10.0, 0.0)]);

    let diagonal_first = [diagonal, vertical];
    let path = calculate_reflection_path(
        Point2::new(0.0, 0.0),
        Vector2::new(1.0, 0.0),
        &diagonal_first,
        30.0,
        DEFAULT_MAX_REFLECTIONS,
    );
    assert_path_eq(&path, &[(0.0, 0.0), (10.0, 0.0), (10.0, 20.0)]);
}

#[test]
fn test_random_paths_respect_bounds() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..200 {
        let mirrors: Vec<Axis> = (0..rng.gen_range(0..8))
            .map(|_| {
                Axis::from_coords(
                    rng.gen_range(-200.0..200.0),
                    rng.gen_range(-200.0..200.0),
                    rng.gen_range(-200.0..200.0),
                    rng.gen_range(-200.0..200.0),
                )
            })
            .collect();

        let emission = Point2::new(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0));
        let direction = Vector2::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)).normalize();
        let max_reflections = rng.gen_range(0..6);

        let path = calculate_reflection_path(emission, direction, &mirrors, 500.0, max_reflections);

        assert_eq!(path[0], emission);
        assert!(path.len() >= 2);
        assert!(path.len() <= max_reflections.max(1) + 1);
    }
}

#[test]
fn test_custom_self_intersection_epsilon() {
    let mirrors = vec![Axis::from_coords(0.05, -1.0, 0.05, 1.0)];
    let emission = Point2::new(0.0, 0.0);

    // The default epsilon ignores a mirror this close
    let path = trace_path(emission, Vector2::new(1.0, 0.0), &mirrors, 1.0, &TraceSettings::default());
    assert_path_eq(&path, &[(0.0, 0.0), (1.0, 0.0)]);

    let settings = TraceSettings {
        self_intersection_epsilon: 0.01,
        ..TraceSettings::default()
    };
    let path = trace_path(emission, Vector2::new(1.0, 0.0), &mirrors, 1.0, &settings);
    assert_path_eq(&path, &[(0.0, 0.0), (0.05, 0.0), (-0.9, 0.0)]);
}

#[test]
fn test_light_beam() {
    let mirrors = vec![Axis::from_coords(10.0, -10.0, 10.0, 10.0)];
    let beam = LightBeam::trace(
        Point2::new(0.0, 0.0),
        Vector2::new(2.0, 0.0),
        &mirrors,
        30.0,
        &TraceSettings::default(),
    );

    assert_relative_eq!(beam.direction, Vector2::new(1.0, 0.0));
    assert_eq!(beam.bounce_count(), 1);
    assert_relative_eq!(beam.endpoint(), Point2::new(-10.0, 0.0), epsilon = 1e-9);
    assert_relative_eq!(beam.traveled_length(), 30.0, epsilon = 1e-9);
    assert_eq!(beam.segments().count(), 2);

    let straight = LightBeam::straight(Point2::new(0.0, 0.0), Point2::new(3.0, 4.0));
    assert_eq!(straight.path.len(), 2);
    assert_eq!(straight.bounce_count(), 0);
    assert_relative_eq!(straight.max_length, 5.0);
    assert_relative_eq!(straight.direction, Vector2::new(0.6, 0.8));
}

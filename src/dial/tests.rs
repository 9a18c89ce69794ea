use super::*;

const CENTER: TouchPoint = TouchPoint::new(200, 200);
const MIN_RADIUS: f32 = 20.0;

fn sector_at(x: i32, y: i32) -> Option<u8> {
    classify(TouchPoint::new(x, y), CENTER, MIN_RADIUS).map(DialSector::digit)
}

// Point at `deg` degrees counter-clockwise from the positive x axis.
fn polar(deg: f64, radius: f64) -> (i32, i32) {
    let rad = deg.to_radians();
    let x = CENTER.x as f64 + radius * rad.cos();
    let y = CENTER.y as f64 - radius * rad.sin();
    (x.round() as i32, y.round() as i32)
}

#[test]
fn reference_scenario_points() {
    assert_eq!(sector_at(200, 150), Some(0));
    assert_eq!(sector_at(250, 200), Some(2));
    assert_eq!(sector_at(205, 205), None);
}

#[test]
fn dead_zone_is_inclusive_of_min_radius() {
    assert_eq!(sector_at(200, 200), None);
    assert_eq!(sector_at(220, 200), None);
    assert_eq!(sector_at(200, 180), None);
    assert_eq!(sector_at(212, 216), None);
    assert_eq!(sector_at(221, 200), Some(2));
}

#[test]
fn exact_axes_map_to_fixed_sectors() {
    for radius in [21, 60, 150, 2_000] {
        assert_eq!(sector_at(200, 200 - radius), Some(0), "up r={radius}");
        assert_eq!(sector_at(200, 200 + radius), Some(5), "down r={radius}");
        assert_eq!(sector_at(200 + radius, 200), Some(2), "right r={radius}");
        assert_eq!(sector_at(200 - radius, 200), Some(8), "left r={radius}");
    }
}

#[test]
fn sector_centers_run_clockwise_from_twelve() {
    for digit in 0..10u8 {
        let deg = 90.0 - 36.0 * f64::from(digit);
        let (x, y) = polar(deg, 120.0);
        assert_eq!(sector_at(x, y), Some(digit), "digit {digit} at {deg}°");
    }
}

#[test]
fn diagonals_follow_slope_chain() {
    assert_eq!(sector_at(250, 150), Some(1));
    assert_eq!(sector_at(250, 250), Some(4));
    assert_eq!(sector_at(150, 250), Some(6));
    assert_eq!(sector_at(150, 150), Some(9));
}

#[test]
fn horizontal_axis_splits_upper_and_lower_halves() {
    assert_eq!(sector_at(300, 201), Some(3));
    assert_eq!(sector_at(100, 201), Some(7));
    assert_eq!(sector_at(300, 199), Some(2));
    assert_eq!(sector_at(100, 199), Some(8));
}

#[test]
fn every_point_outside_dead_zone_has_one_sector() {
    let mut seen = [false; DialSector::COUNT as usize];
    for y in (0..=400).step_by(7) {
        for x in (0..=400).step_by(7) {
            let dx = f64::from(x - CENTER.x);
            let dy = f64::from(CENTER.y - y);
            let outside = (dx * dx + dy * dy).sqrt() as f32 > MIN_RADIUS;
            match sector_at(x, y) {
                Some(digit) => {
                    assert!(outside, "({x},{y}) inside dead zone got {digit}");
                    assert!(digit < DialSector::COUNT);
                    seen[digit as usize] = true;
                }
                None => assert!(!outside, "({x},{y}) outside dead zone got none"),
            }
        }
    }
    assert!(seen.iter().all(|hit| *hit));
}

#[test]
fn extreme_coordinates_do_not_overflow() {
    let far = classify(
        TouchPoint::new(i32::MAX, i32::MIN),
        TouchPoint::new(i32::MIN, i32::MAX),
        MIN_RADIUS,
    );
    assert_eq!(far.map(DialSector::digit), Some(1));
}

#[test]
fn special_keys_live_on_three_five_seven() {
    let specials: Vec<(u8, char)> = DialSector::all()
        .filter_map(|s| s.special_key().map(|k| (s.digit(), k.symbol())))
        .collect();
    assert_eq!(specials, vec![(3, '#'), (5, '+'), (7, '*')]);
}

#[test]
fn sector_constructor_rejects_out_of_range() {
    assert!(DialSector::new(9).is_some());
    assert!(DialSector::new(10).is_none());
}

#[test]
fn geometry_delegates_to_classify() {
    let geometry = DialGeometry::new(CENTER, MIN_RADIUS);
    assert_eq!(
        geometry.classify(TouchPoint::new(200, 100)),
        DialSector::new(0)
    );
    assert_eq!(geometry.classify(TouchPoint::new(201, 201)), None);
}

#[test]
fn slope_ties_fall_to_next_sector_down_the_chain() {
    assert_eq!(sector_for_slope(SLOPE_TAN_72, true), 1);
    assert_eq!(sector_for_slope(SLOPE_TAN_36, true), 2);
    assert_eq!(sector_for_slope(SLOPE_TAN_0, true), 8);
    assert_eq!(sector_for_slope(SLOPE_TAN_144, false), 4);
    assert_eq!(sector_for_slope(SLOPE_TAN_108, true), 0);
}

#[test]
fn integer_touch_on_tan72_boundary_lands_in_sector_one() {
    // 15570 / 5059 rounds to exactly SLOPE_TAN_72 in f32.
    assert_eq!(15_570f32 / 5_059f32, SLOPE_TAN_72);
    let sector = classify(
        TouchPoint::new(5_059, -15_570),
        TouchPoint::new(0, 0),
        MIN_RADIUS,
    );
    assert_eq!(sector.map(DialSector::digit), Some(1));
}

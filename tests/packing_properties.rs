//! Property and scenario tests for the packing calculator.
//!
//! These tests sweep input ranges to check invariants that must hold for
//! every input, plus the reference scenarios operators use to sanity-check
//! the numbers.

use chamber_packer::error::PackingError;
use chamber_packer::packing::{
    compute, Dimensions, PackingCalculator, PackingRequest, PartSpec, RawPackingRequest,
    DEFAULT_SHELF_CAP,
};

fn scenario_part() -> PartSpec {
    PartSpec::new(50.0, 50.0, 100.0).with_spacing(10.0, 10.0, 30.0)
}

// =============================================================================
// Reference Scenarios
// =============================================================================

#[test]
fn test_sf50_reference_scenario() {
    let result = compute("SF50", "", &scenario_part()).expect("valid input");

    assert_eq!(result.effective_chamber, Dimensions::new(350.0, 250.0, 350.0));
    assert_eq!(result.pitch, Dimensions::new(60.0, 60.0, 130.0));
    assert_eq!(result.counts.width, 5);
    assert_eq!(result.counts.depth, 4);
    assert_eq!(result.counts.height, 2);
    assert_eq!(result.counts.total, 40);
}

#[test]
fn test_sf50_pure_solvent_scenario() {
    let result = compute("SF50", "PURE", &scenario_part()).expect("valid input");

    assert_eq!(result.clearance.margins, Dimensions::uniform(100.0));
    assert_eq!(result.effective_chamber, Dimensions::new(300.0, 200.0, 300.0));
    assert_eq!(result.pitch, Dimensions::new(70.0, 70.0, 130.0));
    assert_eq!(result.counts.total, 16);
}

#[test]
fn test_sf100_scenario() {
    let result = compute("SF100", "", &scenario_part()).expect("valid input");

    assert!((result.clearance.margins.depth - 50.0).abs() < f64::EPSILON);
    assert!((result.effective_chamber.depth - 550.0).abs() < f64::EPSILON);
    assert_eq!(result.counts.depth, 9);
    assert_eq!(result.counts.total, 5 * 9 * 2);
}

#[test]
fn test_extended_matches_sf100_depth() {
    // SF50 effective depth 250 + 300 = 550, the same as SF100 without bonus.
    let extended = PackingCalculator::new()
        .compute(&PackingRequest::new("SF50", scenario_part()).with_extended(true))
        .expect("valid input")
        .extended
        .expect("extended requested");
    let sf100 = compute("SF100", "", &scenario_part()).expect("valid input");

    assert_eq!(extended, sf100.counts);
}

#[test]
fn test_invalid_machine_type() {
    let err = compute("SF75", "", &scenario_part()).unwrap_err();
    assert_eq!(
        err,
        PackingError::InvalidMachineType {
            value: "SF75".to_string()
        }
    );
}

#[test]
fn test_zero_and_negative_part_width() {
    for width in [0.0, -10.0] {
        let err = compute("SF50", "", &PartSpec::new(width, 50.0, 50.0)).unwrap_err();
        assert!(
            matches!(err, PackingError::InvalidDimension { .. }),
            "width {width} gave {err:?}"
        );
    }
}

// =============================================================================
// Invariants
// =============================================================================

const SIZES: [f64; 8] = [1.0, 7.5, 20.0, 33.3, 50.0, 99.0, 150.0, 420.0];
const SPACINGS: [f64; 5] = [0.0, 0.5, 5.0, 12.0, 40.0];

#[test]
fn test_total_is_exact_product() {
    for machine in ["SF50", "SF100"] {
        for solvent in ["", "PURE"] {
            for &size in &SIZES {
                for &gap in &SPACINGS {
                    let part =
                        PartSpec::new(size, size * 0.5 + 1.0, size).with_spacing(gap, gap, gap);
                    let c = compute(machine, solvent, &part).expect("valid input").counts;
                    assert_eq!(
                        c.total,
                        u64::from(c.width) * u64::from(c.depth) * u64::from(c.height)
                    );
                }
            }
        }
    }
}

#[test]
fn test_height_never_exceeds_shelf_cap() {
    for &height in &[1e-300, 1e-8, 0.1, 1.0, 10.0, 50.0, 69.0, 350.0] {
        let part = PartSpec::new(50.0, 50.0, height);
        for machine in ["SF50", "SF100"] {
            for solvent in ["", "PURE"] {
                let c = compute(machine, solvent, &part)
                    .unwrap_or_else(|e| panic!("height {height} should be valid: {e}"))
                    .counts;
                assert!(c.height <= DEFAULT_SHELF_CAP, "height {height}: {}", c.height);
            }
        }
    }

    // A vanishing part height fills every shelf.
    let c = compute("SF50", "", &PartSpec::new(50.0, 50.0, 1e-8))
        .expect("valid input")
        .counts;
    assert_eq!(c.height, DEFAULT_SHELF_CAP);
}

#[test]
fn test_grid_fits_in_effective_chamber() {
    for &size in &SIZES {
        let part = PartSpec::new(size, size, size);
        let result = compute("SF50", "", &part).expect("valid input");
        let c = result.counts;
        let eff = result.effective_chamber;
        assert!(f64::from(c.width) * result.pitch.width <= eff.width + 1e-9);
        assert!(f64::from(c.depth) * result.pitch.depth <= eff.depth + 1e-9);
        assert!(f64::from(c.height) * result.pitch.height <= eff.height + 1e-9);
    }
}

/// Count along `axis` (0 = width, 1 = depth, 2 = height).
fn axis_count(machine: &str, solvent: &str, part: &PartSpec, axis: usize) -> u32 {
    let c = compute(machine, solvent, part).expect("valid input").counts;
    [c.width, c.depth, c.height][axis]
}

#[test]
fn test_spacing_is_monotonic_per_axis() {
    let base = PartSpec::new(40.0, 40.0, 60.0);
    let fixed = [5.0, 10.0, 15.0];

    for machine in ["SF50", "SF100"] {
        for solvent in ["", "PURE"] {
            for axis in 0..3 {
                let mut previous = None;
                for &gap in &[0.0, 1.0, 5.0, 10.0, 25.0, 60.0, 200.0] {
                    let mut spacing = fixed;
                    spacing[axis] = gap;
                    let part = base.with_spacing(spacing[0], spacing[1], spacing[2]);
                    let n = axis_count(machine, solvent, &part, axis);
                    if let Some(prev) = previous {
                        assert!(
                            n <= prev,
                            "{machine}/{solvent:?} axis {axis}: gap {gap} gave {n} > {prev}"
                        );
                    }
                    previous = Some(n);
                }
            }
        }
    }
}

#[test]
fn test_part_size_is_monotonic_per_axis() {
    for machine in ["SF50", "SF100"] {
        for solvent in ["", "PURE"] {
            for axis in 0..3 {
                let mut previous = None;
                for &size in &[5.0, 20.0, 40.0, 75.0, 120.0, 400.0] {
                    let mut dims = [30.0, 30.0, 30.0];
                    dims[axis] = size;
                    let part = PartSpec::new(dims[0], dims[1], dims[2]);
                    let n = axis_count(machine, solvent, &part, axis);
                    if let Some(prev) = previous {
                        assert!(n <= prev, "{machine}/{solvent:?} axis {axis}: size {size}");
                    }
                    previous = Some(n);
                }
            }
        }
    }
}

#[test]
fn test_computation_is_idempotent() {
    let calc = PackingCalculator::new();
    let request = PackingRequest::new("SF50", scenario_part())
        .with_solvent("PURE")
        .with_extended(true);
    let first = calc.compute(&request).expect("valid input");
    let second = calc.compute(&request).expect("valid input");
    assert_eq!(first, second);
}

#[test]
fn test_concurrent_calls_agree() {
    let calc = PackingCalculator::new();
    let expected = calc
        .compute(&PackingRequest::new("SF100", scenario_part()))
        .expect("valid input");

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    calc.compute(&PackingRequest::new("SF100", scenario_part()))
                        .expect("valid input")
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().expect("thread panicked"), expected);
        }
    });
}

// =============================================================================
// Layout
// =============================================================================

#[test]
fn test_layout_box_count_matches_total() {
    for machine in ["SF50", "SF100"] {
        let result = compute(machine, "PURE", &scenario_part()).expect("valid input");
        let total = usize::try_from(result.counts.total).expect("small layout");
        assert_eq!(result.layout().boxes().count(), total);
    }
}

#[test]
fn test_layout_is_centred_on_width_and_depth() {
    let result = compute("SF100", "", &scenario_part()).expect("valid input");
    let chamber = result.chamber.size;
    let boxes: Vec<_> = result.layout().boxes().collect();

    let min_x = boxes.iter().map(|b| b.origin.x).fold(f64::INFINITY, f64::min);
    let max_x = boxes.iter().map(|b| b.origin.x + result.pitch.width).fold(0.0, f64::max);
    assert!((min_x - (chamber.width - max_x)).abs() < 1e-9);

    let min_y = boxes.iter().map(|b| b.origin.y).fold(f64::INFINITY, f64::min);
    let max_y = boxes.iter().map(|b| b.origin.y + result.pitch.depth).fold(0.0, f64::max);
    assert!((min_y - (chamber.depth - max_y)).abs() < 1e-9);
}

// =============================================================================
// Request Parsing
// =============================================================================

#[test]
fn test_json_request_end_to_end() {
    let json = r#"{
        "machine_type": " SF50 ",
        "solvent": "PURE",
        "part_width": "50",
        "part_depth": 50,
        "part_height": 100,
        "spacing_width": 10,
        "spacing_depth": 10,
        "spacing_height": 30
    }"#;
    let request = RawPackingRequest::from_json(json)
        .expect("well-formed JSON")
        .into_request()
        .expect("all fields present");
    let result = PackingCalculator::new().compute(&request).expect("valid input");
    assert_eq!(result.counts.total, 16);
    assert_eq!(result.solvent, "PURE");
}

#[test]
fn test_json_request_with_null_field() {
    let json = r#"{ "machine_type": "SF50", "part_width": null }"#;
    let err = RawPackingRequest::from_json(json)
        .expect("well-formed JSON")
        .into_request()
        .unwrap_err();
    assert_eq!(
        err,
        PackingError::InvalidDimension {
            field: "part_width".to_string(),
            message: "is required".to_string(),
        }
    );
}

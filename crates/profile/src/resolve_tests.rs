use crate::parser::Parser;
use crate::{
    resolve_widths, ControlPoint, PathMeasurement, ResolveContext, ResolveOptions, ResolveResult,
    StrokeWidthsAttributes, StyleResolver,
};

struct Style {
    stroke_width: f32,
}

impl StyleResolver for Style {
    fn base_stroke_width_px(&self) -> f32 {
        self.stroke_width
    }
    fn em_size_px(&self) -> f32 {
        16.0
    }
    fn ex_size_px(&self) -> f32 {
        8.0
    }
}

/// A path made of straight segments of the given lengths.
struct Segments(Vec<f32>);

impl PathMeasurement for Segments {
    fn total_length(&self) -> f32 {
        self.0.iter().sum()
    }

    fn drawable_segment_count(&self) -> usize {
        self.0.len()
    }

    fn length_up_to_segment(&self, index: usize, fraction: f32) -> f32 {
        self.0[..index].iter().sum::<f32>() + fraction * self.0[index]
    }
}

const STYLE: Style = Style { stroke_width: 7.0 };

fn resolve_on(attributes: &[(&str, &str)], path: Option<&dyn PathMeasurement>) -> ResolveResult {
    let attributes = StrokeWidthsAttributes::from_pairs(attributes.iter().copied());
    let mut ctx = ResolveContext::new(&STYLE);
    ctx.path = path;

    resolve_widths(&attributes, &Parser::new(), &ctx, &ResolveOptions::DEFAULT).unwrap()
}

fn resolve(attributes: &[(&str, &str)]) -> ResolveResult {
    resolve_on(attributes, None)
}

fn points(expected: &[[f32; 3]]) -> Vec<ControlPoint> {
    expected
        .iter()
        .map(|&[offset, left, right]| ControlPoint::new(offset, left, right))
        .collect()
}

fn check(attributes: &[(&str, &str)], expected: &[[f32; 3]]) {
    let result = resolve(attributes);
    assert_eq!(result.widths, points(expected), "{:?}", attributes);
    assert!(result.parse_errors.is_empty(), "{:?}", result.parse_errors);
}

fn check_rough(result: &ResolveResult, expected: &[[f32; 3]]) {
    let round = |v: f32| (v * 1e4).round() / 1e4;
    let actual: Vec<[f32; 3]> = result
        .widths
        .iter()
        .map(|p| [round(p.offset), round(p.left), round(p.right)])
        .collect();
    let expected: Vec<[f32; 3]> = expected
        .iter()
        .map(|p| [round(p[0]), round(p[1]), round(p[2])])
        .collect();

    assert_eq!(actual, expected);
    assert!(result.parse_errors.is_empty(), "{:?}", result.parse_errors);
}

fn px(value: f32, unit: &str) -> f32 {
    match unit {
        "cm" => value * 96.0 / 2.54,
        "mm" => value * 96.0 / 25.4,
        "in" => value * 96.0,
        "em" => value * 16.0,
        "ex" => value * 8.0,
        "pt" => value * 96.0 / 72.0,
        "pc" => value * 96.0 / 6.0,
        _ => value,
    }
}

#[test]
fn nothing_specified() {
    check(&[], &[[0.0, 7.0, 7.0], [1.0, 7.0, 7.0]]);
}

#[test]
fn parse_errors() {
    let result = resolve(&[("stroke-widths", "abc")]);
    assert_eq!(result.widths, points(&[[0.0, 7.0, 7.0], [1.0, 7.0, 7.0]]));
    assert_eq!(result.parse_errors, vec!["stroke-widths"]);

    let result = resolve(&[("stroke-widths", "abc"), ("stroke-widths-values", "abc")]);
    assert_eq!(result.widths, points(&[[0.0, 7.0, 7.0], [1.0, 7.0, 7.0]]));
    assert_eq!(
        result.parse_errors,
        vec!["stroke-widths-values", "stroke-widths"]
    );
}

#[test]
fn failed_longhand_falls_back_to_shorthand() {
    let result = resolve(&[
        ("stroke-widths-values", "10seg"),
        ("stroke-widths", "1px, 2px"),
    ]);
    assert_eq!(result.widths, points(&[[0.0, 1.0, 1.0], [1.0, 2.0, 2.0]]));
    assert_eq!(result.parse_errors, vec!["stroke-widths-values"]);
}

#[test]
fn values_only() {
    check(
        &[("stroke-widths-values", "10px")],
        &[[0.0, 10.0, 10.0], [1.0, 10.0, 10.0]],
    );
    check(
        &[("stroke-widths-values", "10px, 20px")],
        &[[0.0, 10.0, 10.0], [1.0, 20.0, 20.0]],
    );
    check(
        &[("stroke-widths-values", "10px, 20px, 30px")],
        &[[0.0, 10.0, 10.0], [0.5, 20.0, 20.0], [1.0, 30.0, 30.0]],
    );
    check(
        &[("stroke-widths-values", "10px / 20px")],
        &[[0.0, 10.0, 20.0], [1.0, 10.0, 20.0]],
    );
    check(
        &[("stroke-widths-values", "10px / 20px, 30px / 40px")],
        &[[0.0, 10.0, 20.0], [1.0, 30.0, 40.0]],
    );
    check(
        &[("stroke-widths-values", "10px / 20px, 30px")],
        &[[0.0, 10.0, 20.0], [1.0, 30.0, 30.0]],
    );
}

#[test]
fn empty_values() {
    check(
        &[("stroke-widths-values", ""), ("stroke-widths", "1px, 2px")],
        &[[0.0, 7.0, 7.0], [1.0, 7.0, 7.0]],
    );
}

#[test]
fn positions_only() {
    check(
        &[("stroke-widths-positions", "10px, 20px")],
        &[[0.0, 7.0, 7.0], [1.0, 7.0, 7.0]],
    );
}

#[test]
fn repeat_only() {
    check(
        &[("stroke-widths-repeat", "no-repeat")],
        &[[0.0, 7.0, 7.0], [1.0, 7.0, 7.0]],
    );
    check(
        &[("stroke-widths-repeat", "repeat")],
        &[[0.0, 7.0, 7.0], [1.0, 7.0, 7.0]],
    );
}

#[test]
fn values_and_positions_of_equal_length() {
    check(
        &[
            ("stroke-widths-values", "10px"),
            ("stroke-widths-positions", "50%"),
        ],
        &[[0.0, 10.0, 10.0], [1.0, 10.0, 10.0]],
    );
    check(
        &[
            ("stroke-widths-values", "10px, 20px"),
            ("stroke-widths-positions", "50%, 80%"),
        ],
        &[
            [0.0, 10.0, 10.0],
            [0.5, 10.0, 10.0],
            [0.8, 20.0, 20.0],
            [1.0, 20.0, 20.0],
        ],
    );
    check(
        &[
            ("stroke-widths-values", "10px, 20px, 30px"),
            ("stroke-widths-positions", "50%, 80%, 120%"),
        ],
        &[
            [0.0, 10.0, 10.0],
            [0.5, 10.0, 10.0],
            [0.8, 20.0, 20.0],
            [1.2, 30.0, 30.0],
        ],
    );
}

#[test]
fn fewer_values_than_positions() {
    check(
        &[
            ("stroke-widths-values", "10px"),
            ("stroke-widths-positions", "50%, 100%"),
        ],
        &[[0.0, 10.0, 10.0], [1.0, 10.0, 10.0]],
    );
    check(
        &[
            ("stroke-widths-values", "10px, 20px"),
            ("stroke-widths-positions", "50%, 80%, 90%"),
        ],
        &[
            [0.0, 10.0, 10.0],
            [0.5, 10.0, 10.0],
            [0.8, 20.0, 20.0],
            [1.0, 20.0, 20.0],
        ],
    );
}

#[test]
fn fewer_positions_than_values() {
    check(
        &[
            ("stroke-widths-values", "10px, 20px, 30px"),
            ("stroke-widths-positions", "50%"),
        ],
        &[
            [0.0, 10.0, 10.0],
            [0.5, 10.0, 10.0],
            [0.75, 20.0, 20.0],
            [1.0, 30.0, 30.0],
        ],
    );

    // Last position past the end.
    check(
        &[
            ("stroke-widths-values", "10px, 20px, 30px"),
            ("stroke-widths-positions", "50%, 120%"),
        ],
        &[
            [0.0, 10.0, 10.0],
            [0.5, 10.0, 10.0],
            [1.2, 20.0, 20.0],
            [1.2, 30.0, 30.0],
        ],
    );
}

#[test]
fn repeating_patterns() {
    // Starting at 0.
    check(
        &[
            ("stroke-widths-values", "10px, 20px"),
            ("stroke-widths-positions", "0%, 20%"),
            ("stroke-widths-repeat", "repeat"),
        ],
        &[
            [0.0, 10.0, 10.0],
            [0.2, 20.0, 20.0],
            [0.2, 10.0, 10.0],
            [0.4, 20.0, 20.0],
            [0.4, 10.0, 10.0],
            [0.6, 20.0, 20.0],
            [0.6, 10.0, 10.0],
            [0.8, 20.0, 20.0],
            [0.8, 10.0, 10.0],
            [1.0, 20.0, 20.0],
        ],
    );

    // Starting at 0 and returning to the same value.
    check(
        &[
            ("stroke-widths-values", "10px, 20px, 10px"),
            ("stroke-widths-positions", "0%, 20%, 40%"),
            ("stroke-widths-repeat", "repeat"),
        ],
        &[
            [0.0, 10.0, 10.0],
            [0.2, 20.0, 20.0],
            [0.4, 10.0, 10.0],
            [0.6, 20.0, 20.0],
            [0.8, 10.0, 10.0],
            [1.0, 20.0, 20.0],
        ],
    );

    // Starting at 20%.
    check(
        &[
            ("stroke-widths-values", "10px, 20px"),
            ("stroke-widths-positions", "20%, 40%"),
            ("stroke-widths-repeat", "repeat"),
        ],
        &[
            [0.0, 10.0, 10.0],
            [0.2, 10.0, 10.0],
            [0.4, 20.0, 20.0],
            [0.4, 10.0, 10.0],
            [0.6, 10.0, 10.0],
            [0.8, 20.0, 20.0],
            [0.8, 10.0, 10.0],
            [1.0, 10.0, 10.0],
        ],
    );

    // Starting before 0.
    check(
        &[
            ("stroke-widths-values", "10px, 20px"),
            ("stroke-widths-positions", "-20%, 30%"),
            ("stroke-widths-repeat", "repeat"),
        ],
        &[
            [-0.2, 10.0, 10.0],
            [0.3, 20.0, 20.0],
            [0.3, 10.0, 10.0],
            [0.8, 20.0, 20.0],
            [0.8, 10.0, 10.0],
            [1.3, 20.0, 20.0],
        ],
    );

    // Single value.
    check(
        &[
            ("stroke-widths-values", "10px"),
            ("stroke-widths-positions", "0%"),
            ("stroke-widths-repeat", "repeat"),
        ],
        &[[0.0, 10.0, 10.0], [1.0, 10.0, 10.0]],
    );

    // No distance.
    check(
        &[
            ("stroke-widths-values", "10px, 20px"),
            ("stroke-widths-positions", "0%, 0%"),
            ("stroke-widths-repeat", "repeat"),
        ],
        &[[0.0, 10.0, 10.0], [0.0, 20.0, 20.0], [1.0, 20.0, 20.0]],
    );
}

#[test]
fn shorthand_only() {
    check(
        &[("stroke-widths", "1px / 2px 10%, 30px 50%, 50px")],
        &[
            [0.0, 1.0, 2.0],
            [0.1, 1.0, 2.0],
            [0.5, 30.0, 30.0],
            [1.0, 50.0, 50.0],
        ],
    );
}

#[test]
fn shorthand_repeat() {
    check(
        &[("stroke-widths", "10px 0%, 20px 20% repeat")],
        &[
            [0.0, 10.0, 10.0],
            [0.2, 20.0, 20.0],
            [0.2, 10.0, 10.0],
            [0.4, 20.0, 20.0],
            [0.4, 10.0, 10.0],
            [0.6, 20.0, 20.0],
            [0.6, 10.0, 10.0],
            [0.8, 20.0, 20.0],
            [0.8, 10.0, 10.0],
            [1.0, 20.0, 20.0],
        ],
    );

    // The longhand wins.
    check(
        &[
            ("stroke-widths", "10px 0%, 20px 20% repeat"),
            ("stroke-widths-repeat", "no-repeat"),
        ],
        &[[0.0, 10.0, 10.0], [0.2, 20.0, 20.0], [1.0, 20.0, 20.0]],
    );

    // The keyword is dropped when the shorthand's widths are overridden.
    check(
        &[
            ("stroke-widths-values", "10px, 20px"),
            ("stroke-widths-positions", "0%, 20%"),
            ("stroke-widths", "5px repeat"),
        ],
        &[[0.0, 10.0, 10.0], [0.2, 20.0, 20.0], [1.0, 20.0, 20.0]],
    );
}

#[test]
fn shorthand_gaps() {
    check(
        &[("stroke-widths", "10px, 20px 50%, 30px, 40px")],
        &[
            [0.0, 10.0, 10.0],
            [0.5, 20.0, 20.0],
            [0.75, 30.0, 30.0],
            [1.0, 40.0, 40.0],
        ],
    );
}

#[test]
fn values_unit_conversion() {
    let result = resolve(&[(
        "stroke-widths-values",
        "1px / 2cm, 30mm / 4in, 5em / 6ex, 7pt / 8pc, 9%",
    )]);

    check_rough(
        &result,
        &[
            [0.0, 1.0, px(2.0, "cm")],
            [0.25, px(30.0, "mm"), px(4.0, "in")],
            [0.5, px(5.0, "em"), px(6.0, "ex")],
            [0.75, px(7.0, "pt"), px(8.0, "pc")],
            [1.0, 0.09 * 7.0, 0.09 * 7.0],
        ],
    );
}

#[test]
fn positions_unit_conversion() {
    // M0 0h100
    let path = Segments(vec![100.0]);
    let result = resolve_on(
        &[
            (
                "stroke-widths-values",
                "1px, 1px, 1px, 1px, 1px, 1px, 1px, 1px, 1px",
            ),
            (
                "stroke-widths-positions",
                "1px, 0.2cm, 3mm, 0.4in, 3em, 8ex, 50pt, 5pc, 95%",
            ),
        ],
        Some(&path),
    );

    check_rough(
        &result,
        &[
            [0.0, 1.0, 1.0],
            [0.01, 1.0, 1.0],
            [px(0.2, "cm") / 100.0, 1.0, 1.0],
            [px(3.0, "mm") / 100.0, 1.0, 1.0],
            [px(0.4, "in") / 100.0, 1.0, 1.0],
            [px(3.0, "em") / 100.0, 1.0, 1.0],
            [px(8.0, "ex") / 100.0, 1.0, 1.0],
            [px(50.0, "pt") / 100.0, 1.0, 1.0],
            [px(5.0, "pc") / 100.0, 1.0, 1.0],
            [0.95, 1.0, 1.0],
            [1.0, 1.0, 1.0],
        ],
    );
}

#[test]
fn segment_positions() {
    // M0 0h100v50h-50
    let path = Segments(vec![100.0, 50.0, 50.0]);
    let result = resolve_on(
        &[
            ("stroke-widths-values", "1px, 1px, 1px"),
            ("stroke-widths-positions", "0.5seg, 2seg, 2.5seg"),
        ],
        Some(&path),
    );

    check_rough(
        &result,
        &[
            [0.0, 1.0, 1.0],
            [0.25, 1.0, 1.0],
            [0.75, 1.0, 1.0],
            [0.875, 1.0, 1.0],
            [1.0, 1.0, 1.0],
        ],
    );
}

#[test]
fn lengths_without_path() {
    check(
        &[
            ("stroke-widths-values", "10px, 20px"),
            ("stroke-widths-positions", "20px, 1seg"),
        ],
        &[[0.0, 10.0, 10.0], [0.0, 20.0, 20.0], [1.0, 20.0, 20.0]],
    );
}

#[test]
fn position_ordering() {
    check(
        &[
            ("stroke-widths-values", "10px, 20px, 30px, 40px"),
            ("stroke-widths-positions", "10%, 0%, 40%, 30%"),
        ],
        &[
            [0.0, 10.0, 10.0],
            [0.1, 10.0, 10.0],
            [0.1, 20.0, 20.0],
            [0.4, 30.0, 30.0],
            [0.4, 40.0, 40.0],
            [1.0, 40.0, 40.0],
        ],
    );
}

#[test]
fn profile_invariants() {
    let inputs: &[&[(&str, &str)]] = &[
        &[("stroke-widths", "1px 150%, 2px -30%, 3px")],
        &[("stroke-widths", "1px 90%, 2px, 3px 10% repeat")],
        &[
            ("stroke-widths-values", "1px, 2px, 3px, 4px, 5px"),
            ("stroke-widths-positions", "30%, 0, 1px, 110%"),
            ("stroke-widths-repeat", "repeat"),
        ],
        &[
            ("stroke-widths-values", "1px, 2px"),
            ("stroke-widths-positions", "-250%, -200%"),
            ("stroke-widths-repeat", "repeat"),
        ],
        // Tile boundaries that round below the previous offset.
        &[
            ("stroke-widths-values", "10px, 20px"),
            ("stroke-widths-positions", "0%, 12.3454%"),
            ("stroke-widths-repeat", "repeat"),
        ],
        // Patterns too short to move the offsets forward.
        &[
            ("stroke-widths-values", "10px, 10px"),
            ("stroke-widths-positions", "0%, 0.0000001%"),
            ("stroke-widths-repeat", "repeat"),
        ],
        &[
            ("stroke-widths-values", "10px, 10px"),
            ("stroke-widths-positions", "0%, 0.00001%"),
            ("stroke-widths-repeat", "repeat"),
        ],
        &[
            ("stroke-widths-values", "10px, 20px"),
            ("stroke-widths-positions", "0%, 0.0000001%"),
            ("stroke-widths-repeat", "repeat"),
        ],
    ];

    for attributes in inputs {
        let result = resolve(attributes);
        let widths = &result.widths;
        assert!(!widths.is_empty());
        assert!(widths[0].offset <= 0.0, "{:?}", widths);
        assert!(widths[widths.len() - 1].offset >= 1.0, "{:?}", widths);
        for pair in widths.windows(2) {
            assert!(pair[0].offset <= pair[1].offset, "{:?}", widths);
        }

        // Resolving is a pure function of its inputs.
        assert_eq!(resolve(attributes), result);
    }
}

#[test]
fn invalid_context() {
    let style = Style {
        stroke_width: std::f32::INFINITY,
    };
    let attributes = StrokeWidthsAttributes::new();
    let ctx = ResolveContext::new(&style);
    assert!(resolve_widths(&attributes, &Parser::new(), &ctx, &ResolveOptions::DEFAULT).is_err());

    let path = Segments(vec![std::f32::NAN]);
    let ctx = ResolveContext::new(&STYLE).with_path(&path);
    assert!(resolve_widths(&attributes, &Parser::new(), &ctx, &ResolveOptions::DEFAULT).is_err());
}

// tests/interpreter.rs
use cancan::{
    Coord, Instruction, Mode, PatternConfig, PatternError, PatternInterpreter, Recorder, Start,
};
use glam::Vec2;

fn setup() -> (PatternInterpreter, Recorder) {
    let config = PatternConfig {
        stroke_color: "#ffffff".to_owned(),
        stroke_width: 2.0,
        ..Default::default()
    };
    (PatternInterpreter::new(config), Recorder::new())
}

fn origin() -> Start {
    Start::at(0.0, 0.0)
}

#[test]
fn test_multiplier_moves_and_bounds() {
    let (interpreter, mut surface) = setup();

    // "10." with a step of 10 is one move of 100 units along +X.
    let cursor = interpreter
        .execute(&mut surface, Vec2::ZERO, "10.", Mode::Measure)
        .unwrap();

    assert_eq!(cursor.position, Vec2::new(100.0, 0.0));
    assert_eq!(cursor.bounds.min_x(), 0.0);
    assert_eq!(cursor.bounds.max_x(), 100.0);
    assert_eq!(cursor.bounds.min_y(), 0.0);
    assert_eq!(cursor.bounds.max_y(), 0.0);
}

#[test]
fn test_reset_neither_shrinks_nor_extends_bounds() {
    let (interpreter, mut surface) = setup();

    let cursor = interpreter
        .execute(&mut surface, Vec2::ZERO, "5.5|@", Mode::Measure)
        .unwrap();

    assert_eq!(cursor.position, Vec2::ZERO);
    assert_eq!(cursor.bounds.min, Vec2::ZERO);
    assert_eq!(cursor.bounds.max, Vec2::new(50.0, 50.0));
}

#[test]
fn test_jump_and_reset_do_not_extend_bounds() {
    let (interpreter, mut surface) = setup();

    // After `3.` the box is (5,5)..(35,5); jumping back to `a` and resetting
    // to the start leaves it unchanged.
    let bounds = interpreter
        .measure(&mut surface, Start::at(5.0, 5.0), "a3.A@")
        .unwrap();

    assert_eq!(bounds.min, Vec2::new(5.0, 5.0));
    assert_eq!(bounds.max, Vec2::new(35.0, 5.0));
}

#[test]
fn test_waypoint_jump_returns_to_bound_point() {
    let (interpreter, mut surface) = setup();

    let cursor = interpreter
        .execute(&mut surface, Vec2::new(7.0, 3.0), "a10.A", Mode::Draw)
        .unwrap();

    assert_eq!(cursor.position, Vec2::new(7.0, 3.0));
    assert_eq!(cursor.waypoint('a'), Some(Vec2::new(7.0, 3.0)));

    // The jump is a position change outside any lifted region, so it draws.
    assert_eq!(
        surface.lines(),
        vec![Vec2::new(107.0, 3.0), Vec2::new(7.0, 3.0)]
    );
}

#[test]
fn test_waypoint_redefinition_overwrites() {
    let (interpreter, mut surface) = setup();

    let cursor = interpreter
        .execute(&mut surface, Vec2::ZERO, "b2.b3|B", Mode::Measure)
        .unwrap();

    assert_eq!(cursor.position, Vec2::new(20.0, 0.0));
}

#[test]
fn test_undefined_waypoint_is_a_no_op() {
    let (interpreter, mut surface) = setup();

    interpreter.draw(&mut surface, origin(), "3.Q3.").unwrap();

    assert_eq!(
        surface.path(),
        vec![
            Instruction::move_to(0.0, 0.0),
            Instruction::line_to(30.0, 0.0),
            Instruction::line_to(60.0, 0.0),
        ]
    );
}

#[test]
fn test_capture_region_draws_single_connector() {
    let (interpreter, mut surface) = setup();

    // 1. `5.` draws to (50, 0).
    // 2. `[` anchors at (50, 0).
    // 3. `5.5|` lifts through (100, 0) to (100, 50).
    // 4. `]` lifts back to the anchor and draws straight to (100, 50).
    interpreter.draw(&mut surface, origin(), "5.[5.5|]").unwrap();

    assert_eq!(
        surface.instructions,
        vec![
            Instruction::SetStrokeStyle {
                color: "#ffffff".to_owned(),
                width: 2.0,
            },
            Instruction::BeginPath,
            Instruction::move_to(0.0, 0.0),
            Instruction::line_to(50.0, 0.0),
            Instruction::move_to(100.0, 0.0),
            Instruction::move_to(100.0, 50.0),
            Instruction::move_to(50.0, 0.0),
            Instruction::line_to(100.0, 50.0),
            Instruction::Stroke,
        ]
    );
}

#[test]
fn test_capture_region_in_measure_mode_only_lifts() {
    let (interpreter, mut surface) = setup();

    let bounds = interpreter
        .measure(&mut surface, origin(), "5.[5.5|]")
        .unwrap();

    assert_eq!(
        surface.moves(),
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(50.0, 0.0),
            Vec2::new(100.0, 0.0),
            Vec2::new(100.0, 50.0),
            Vec2::new(50.0, 0.0),
            Vec2::new(100.0, 50.0),
        ]
    );
    assert_eq!(bounds.max, Vec2::new(100.0, 50.0));
}

#[test]
fn test_capture_connector_draws_even_with_pen_lifted() {
    let (interpreter, mut surface) = setup();

    interpreter.draw(&mut surface, origin(), "(2.[3|])").unwrap();

    assert_eq!(surface.lines(), vec![Vec2::new(20.0, 30.0)]);
}

#[test]
fn test_blank_region_lifts_pen() {
    let (interpreter, mut surface) = setup();

    interpreter.draw(&mut surface, origin(), "2.(3|)2.").unwrap();

    assert_eq!(
        surface.path(),
        vec![
            Instruction::move_to(0.0, 0.0),
            Instruction::line_to(20.0, 0.0),
            Instruction::move_to(20.0, 30.0),
            Instruction::line_to(40.0, 30.0),
        ]
    );
}

#[test]
fn test_reset_draws_back_to_origin() {
    let (interpreter, mut surface) = setup();

    interpreter.draw(&mut surface, Start::at(10.0, 10.0), "5.@").unwrap();

    assert_eq!(
        surface.lines(),
        vec![Vec2::new(60.0, 10.0), Vec2::new(10.0, 10.0)]
    );
}

#[test]
fn test_whitespace_is_insignificant() {
    let (interpreter, mut a) = setup();
    let mut b = Recorder::new();

    interpreter.draw(&mut a, origin(), "1 0\t.\r\n 2 |").unwrap();
    interpreter.draw(&mut b, origin(), "10.2|").unwrap();

    assert_eq!(a.instructions, b.instructions);
}

#[test]
fn test_measure_never_draws() {
    let (interpreter, _) = setup();
    let patterns = [
        "",
        "10.",
        "5.[5.5|]",
        "a3|2-(4/)A@",
        "78.25|15-10|15.1|16-12/15.23/38-15|1-15/37-23|15.12|16-1/15.10/15-25/",
        "[[2.]3|]]",
    ];

    for step in [Vec2::splat(1.0), Vec2::splat(10.0), Vec2::new(3.0, 0.5)] {
        let interpreter = interpreter.clone().with_step(step);
        for pattern in patterns {
            let mut surface = Recorder::new();
            interpreter.measure(&mut surface, origin(), pattern).unwrap();

            assert!(
                surface
                    .instructions
                    .iter()
                    .all(|i| matches!(i, Instruction::MoveTo { .. })),
                "measure of {pattern:?} emitted {:?}",
                surface.instructions
            );
        }
    }
}

#[test]
fn test_empty_pattern() {
    let (interpreter, mut surface) = setup();

    interpreter.measure(&mut surface, Start::at(4.0, 2.0), "").unwrap();
    assert_eq!(surface.instructions, vec![Instruction::move_to(4.0, 2.0)]);

    surface.clear();
    interpreter.draw(&mut surface, Start::at(4.0, 2.0), "").unwrap();
    assert_eq!(surface.path(), vec![Instruction::move_to(4.0, 2.0)]);
    assert_eq!(surface.instructions.last(), Some(&Instruction::Stroke));
}

#[test]
fn test_interpret_returns_bounds_only_when_measuring() {
    let (interpreter, mut surface) = setup();

    let drawn = interpreter
        .interpret(&mut surface, origin(), "3.", Mode::Draw)
        .unwrap();
    assert_eq!(drawn, None);

    let measured = interpreter
        .interpret(&mut surface, origin(), "3.", Mode::Measure)
        .unwrap()
        .expect("measure returns bounds");
    assert_eq!(measured.max, Vec2::new(30.0, 0.0));
}

#[test]
fn test_step_rescales_without_touching_text() {
    let (mut interpreter, mut surface) = setup();
    interpreter.set_step(Vec2::new(5.0, 20.0));

    let cursor = interpreter
        .execute(&mut surface, Vec2::ZERO, "2.3|", Mode::Measure)
        .unwrap();

    assert_eq!(cursor.position, Vec2::new(10.0, 60.0));
    assert_eq!(interpreter.config().step, Vec2::new(5.0, 20.0));
}

#[test]
fn test_invalid_token_aborts() {
    let (interpreter, mut surface) = setup();

    let err = interpreter.draw(&mut surface, origin(), "5?").unwrap_err();

    assert_eq!(err, PatternError::InvalidToken { token: '?', index: 1 });
    assert!(surface.lines().is_empty());
    assert!(!surface.instructions.contains(&Instruction::Stroke));
}

#[test]
fn test_invalid_token_keeps_partial_output() {
    let (interpreter, mut surface) = setup();

    let err = interpreter
        .draw(&mut surface, origin(), "3.3|#2.")
        .unwrap_err();

    assert_eq!(err.token(), '#');
    assert_eq!(err.index(), 4);
    // Everything before `#` reached the surface; nothing after it did.
    assert_eq!(
        surface.lines(),
        vec![Vec2::new(30.0, 0.0), Vec2::new(30.0, 30.0)]
    );
    assert!(!surface.instructions.contains(&Instruction::Stroke));
}

#[test]
fn test_invalid_token_index_counts_characters() {
    let (interpreter, mut surface) = setup();

    let err = interpreter
        .measure(&mut surface, origin(), "é")
        .unwrap_err();

    assert_eq!(err, PatternError::invalid_token('é', 0));
}

#[test]
fn test_centered_start_measures_then_draws() {
    let (interpreter, mut surface) = setup();

    // From the origin "10.10|" spans (0,0)..(100,100); centered on the
    // default 800x800 canvas it must start at (350, 350).
    interpreter
        .draw(&mut surface, Start::centered(), "10.10|")
        .unwrap();

    let style_at = surface
        .instructions
        .iter()
        .position(|i| matches!(i, Instruction::SetStrokeStyle { .. }))
        .expect("draw pass sets stroke style");

    // Pass 1 only lifted the pen.
    assert!(
        surface.instructions[..style_at]
            .iter()
            .all(|i| matches!(i, Instruction::MoveTo { .. }))
    );
    assert_eq!(
        surface.instructions[style_at + 1..],
        [
            Instruction::BeginPath,
            Instruction::move_to(350.0, 350.0),
            Instruction::line_to(450.0, 350.0),
            Instruction::line_to(450.0, 450.0),
            Instruction::Stroke,
        ]
    );
}

#[test]
fn test_centering_one_axis() {
    let (interpreter, mut surface) = setup();

    let start = Start {
        x: Coord::Centered,
        y: Coord::At(10.0),
    };
    let bounds = interpreter.measure(&mut surface, start, "4-").unwrap();

    // Box from origin is -40..0; its center -20 lands on 400.
    assert_eq!(bounds.min, Vec2::new(380.0, 10.0));
    assert_eq!(bounds.max, Vec2::new(420.0, 10.0));
}

#[test]
fn test_centering_respects_canvas_size() {
    let config = PatternConfig {
        canvas: Vec2::new(200.0, 100.0),
        ..Default::default()
    };
    let interpreter = PatternInterpreter::new(config);
    let mut surface = Recorder::new();

    let bounds = interpreter
        .measure(&mut surface, Start::centered(), "4.2|")
        .unwrap();

    assert_eq!(bounds.center(), Vec2::new(100.0, 50.0));
}

#[test]
fn test_config_deserializes_with_defaults() {
    let config: PatternConfig =
        serde_json::from_str(r##"{"step": [5.0, 5.0], "stroke_color": "#00ff00"}"##).unwrap();

    assert_eq!(config.step, Vec2::splat(5.0));
    assert_eq!(config.stroke_color, "#00ff00");
    assert_eq!(config.canvas, Vec2::splat(800.0));
    assert_eq!(config.stroke_width, 1.0);
}

//! Whole-program generation from the built-in resources.

use sudoplot_config::PlotterConfig;
use sudoplot_engine::{RunError, build_program, load_resources};
use sudoplot_layout::{LINES_PER_AXIS, LayoutError};
use sudoplot_types::{GlyphCommand, Instruction, Precision};

fn config(puzzle: usize) -> PlotterConfig {
    PlotterConfig {
        puzzle: Some(puzzle),
        ..PlotterConfig::default()
    }
}

#[test]
fn every_embedded_puzzle_fits_the_board() {
    let config = PlotterConfig::default();
    let resources = load_resources(&config).unwrap();

    for index in 0..resources.puzzles.len() {
        let program = build_program(&config, &resources, |_| index).unwrap();
        assert_eq!(program.puzzle_index, index);
        assert!(
            program
                .instructions
                .move_targets()
                .all(|point| point.x <= 280.0 && point.y <= 300.0),
            "puzzle {index}"
        );
        assert_eq!(program.instructions.first_unsettled_pen_change(), None);
    }
}

#[test]
fn one_glyph_per_clue() {
    let mut config = config(0);
    config.draw.grid = false;
    config.draw.wipe = false;
    config.draw.start_end = false;
    let resources = load_resources(&config).unwrap();
    let program = build_program(&config, &resources, |_| 0).unwrap();

    let grid = resources.puzzles.get(0).unwrap();
    let expected_moves: usize = grid
        .rows()
        .flat_map(|row| row.iter().flatten())
        .map(|digit| {
            resources
                .glyphs
                .get(*digit)
                .unwrap()
                .iter()
                .filter(|command| matches!(command, GlyphCommand::MoveTo { .. }))
                .count()
        })
        .sum();

    let glyph_moves = program
        .instructions
        .iter()
        .filter(|instruction| {
            matches!(
                instruction,
                Instruction::MoveTo {
                    precision: Precision::Hundredths,
                    ..
                }
            )
        })
        .count();
    assert_eq!(glyph_moves, expected_moves);
    assert_eq!(grid.filled_count(), 30);
}

#[test]
fn grid_only_program_has_every_stroke() {
    let mut config = config(0);
    config.draw.numbers = false;
    config.draw.wipe = false;
    config.draw.start_end = false;
    let resources = load_resources(&config).unwrap();
    let program = build_program(&config, &resources, |_| 0).unwrap();

    let strokes = 2 * LINES_PER_AXIS + 4;
    assert_eq!(program.instructions.len(), strokes * 6);
    assert!(
        program
            .instructions
            .iter()
            .all(|instruction| !matches!(
                instruction,
                Instruction::MoveTo {
                    precision: Precision::Hundredths,
                    ..
                }
            ))
    );
}

#[test]
fn custom_pens_reach_templates_and_body() {
    let mut config = config(2);
    config.pen.up = 65.0;
    config.pen.dock = 240.0;
    let resources = load_resources(&config).unwrap();
    let program = build_program(&config, &resources, |_| 0).unwrap();
    let lines: Vec<String> = program.instructions.lines().collect();

    assert!(lines.iter().any(|line| line == "M106 S240.0"));
    assert!(!lines.iter().any(|line| line.contains("{{")));
    assert!(!lines.iter().any(|line| line == "M106 S70.0"));
    assert!(lines.iter().filter(|line| *line == "M106 S65.0").count() > 10);
}

#[test]
fn origin_far_right_overflows_before_any_output() {
    let mut config = config(0);
    config.origin.x = 60;
    let resources = load_resources(&config).unwrap();
    match build_program(&config, &resources, |_| 0) {
        Err(RunError::Layout(LayoutError::Overflow { emitted, point, .. })) => {
            assert_eq!(emitted, 5);
            assert!(point.x > 280.0);
        }
        other => panic!("expected overflow, got {other:?}"),
    }
}

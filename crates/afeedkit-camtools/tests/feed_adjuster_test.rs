use afeedkit_camtools::{FeedAdjuster, Tier};
use afeedkit_core::{FeedTiers, ProcessingParameters, TaperParameters};

fn default_adjuster() -> FeedAdjuster {
    FeedAdjuster::new(ProcessingParameters::default()).unwrap()
}

#[test]
fn test_small_forward_change_slows_to_tier2() {
    let program = default_adjuster().process_text("G1 X10 A2.0 F200\nG1 X11 A2.3 F200\n");
    assert_eq!(program.lines[0], "G1 X10 A2.0 F50");
    assert_eq!(program.stats.tier2_lines, 1);
    assert_eq!(program.stats.details.len(), 1);
    assert_eq!(program.stats.details[0].tier, Tier::Tier2);
    assert_eq!(program.stats.details[0].line_number, 1);
}

#[test]
fn test_modal_continuation_uses_previous_value() {
    let program = default_adjuster().process_text("G1 X4 A1.8 F380\nX5 A1.0\n");
    assert_eq!(program.lines[1], "X5 A1.0 F100");
    assert_eq!(program.stats.tier1_lines, 2);
}

#[test]
fn test_taper_deepens_small_end() {
    let taper = TaperParameters::new(2.0, 1.0, 10.0).unwrap();
    let params = ProcessingParameters::new(FeedTiers::default(), Some(taper));
    let program = FeedAdjuster::new(params)
        .unwrap()
        .process_text("G1 X0 Z-0.5\n");
    assert_eq!(program.lines[0], "G1 X0 Z-1.0000");
    assert_eq!(program.stats.taper_adjusted, 1);
}

#[test]
fn test_program_without_moves_is_unchanged() {
    let input = "%\n(setup)\nG21 G90\nG0 X0 Y0 Z5\nM3 S12000\nM5\n%\n";
    let program = default_adjuster().process_text(input);
    assert_eq!(program.to_text(), input);
    assert_eq!(program.stats.total_lines, 7);
    assert_eq!(program.stats.feed_rewrites(), 0);
}

#[test]
fn test_custom_tiers() {
    let tiers = FeedTiers {
        threshold1: 10.0,
        feed_rate1: 240.0,
        threshold2: 2.0,
        feed_rate2: 120.0,
        default_feed_rate: 600.0,
    };
    let program = FeedAdjuster::new(ProcessingParameters::new(tiers, None))
        .unwrap()
        .process_lines(&["G1 A0", "A1.5", "A7", "A30"]);
    // forward from A0 to A1.5
    assert_eq!(program.lines[0], "G1 A0 F120");
    assert_eq!(program.lines[1], "A1.5 F120");
    assert_eq!(program.lines[2], "A7 F240");
    assert_eq!(program.lines[3], "A30 F600");
}

#[test]
fn test_typical_wrapped_program() {
    let taper = TaperParameters::new(40.0, 30.0, 100.0).unwrap();
    let params = ProcessingParameters::new(FeedTiers::default(), Some(taper));
    let input = "\
(wrapped toolpath)
G0 X100 A0
G1Z-0.0071 F300
G1 X100 A0.2
X90 A0.4
X50 A2.4
G0 Z5
";
    let program = FeedAdjuster::new(params).unwrap().process_text(input);

    assert_eq!(program.lines[0], "(wrapped toolpath)");
    assert_eq!(program.lines[1], "G0 X100 A0");
    // depth-only move sets the modal depth and is otherwise untouched
    assert_eq!(program.lines[2], "G1Z-0.0071 F300");
    // forward to A0.4: delta 0.2, large end so no taper offset
    assert_eq!(program.lines[3], "G1 X100Z-0.0071 A0.2 F50");
    // backward from A0.2: delta 0.2, offset -5 * 0.1
    assert_eq!(program.lines[4], "X90Z-0.5071 A0.4 F50");
    // backward from A0.4: delta 2.0, offset -5 * 0.5
    assert_eq!(program.lines[5], "X50Z-2.5071 A2.4 F380");
    assert_eq!(program.lines[6], "G0 Z5");

    assert_eq!(program.stats.tier2_lines, 2);
    assert_eq!(program.stats.default_lines, 1);
    assert_eq!(program.stats.feed_changes(), 2);
    assert_eq!(program.stats.taper_adjusted, 3);
}

#[test]
fn test_plane_select_header_enables_modal_moves() {
    let program = default_adjuster().process_lines(&["G17", "X1 A1.0", "X2 A1.2"]);
    assert_eq!(program.lines[0], "G17");
    // no previous A value yet
    assert_eq!(program.lines[1], "X1 A1.0");
    assert_eq!(program.lines[2], "X2 A1.2 F50");
}

#[test]
fn test_commented_g1_looks_backward() {
    let program = default_adjuster().process_lines(&["G1 A0", "(c) G1 X1 A1.0", "X2 A9"]);
    // backward to A0: delta 1.0
    assert_eq!(program.lines[1], "(c) G1 X1 A1.0 F100");
}

#[test]
fn test_triple_zero_rapid_suppresses_moves() {
    let lines = ["G1 X0 A0", "G001 X1 A0.2", "X2 A0.4"];
    let program = default_adjuster().process_lines(&lines);
    assert_eq!(program.lines[0], "G1 X0 A0");
    assert_eq!(program.lines[1], lines[1]);
    assert_eq!(program.lines[2], lines[2]);
}

#[test]
fn test_angular_line_without_x_is_feed_only_under_taper() {
    let taper = TaperParameters::new(2.0, 1.0, 10.0).unwrap();
    let params = ProcessingParameters::new(FeedTiers::default(), Some(taper));
    let program = FeedAdjuster::new(params)
        .unwrap()
        .process_lines(&["G1 X0 A0", "A0.2"]);
    assert_eq!(program.lines[0], "G1 X0Z-0.5000 A0 F50");
    assert_eq!(program.lines[1], "A0.2 F50");
    assert_eq!(program.stats.taper_adjusted, 1);
}

#[test]
fn test_feed_glued_to_x_keeps_spacing() {
    let program = default_adjuster().process_lines(&["G1 X0 A0", "X10F200 A2"]);
    assert_eq!(program.lines[1], "X10 A2 F380");
}

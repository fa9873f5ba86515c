//! End-to-end behavior of the rule list: hover ordering, cache lifetime,
//! selection propagation, press/click suppression and diagnostics.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use rule_lattice::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HoverEvent {
    Enter(usize),
    Exit(usize),
}

const ROW_HEIGHT: f32 = 24.0;

/// A view over `rules` whose factory counts constructions and gives every row
/// one inline toggle at (100, 4, 16, 16).
fn build_view(rules: &[&'static str]) -> (RuleListView<&'static str>, Arc<AtomicUsize>) {
    let built = Arc::new(AtomicUsize::new(0));
    let counter = built.clone();
    let factory = FnDecoratorFactory::new(move |rule: &&'static str, _row: usize, first_render: bool| {
        assert!(first_render);
        counter.fetch_add(1, Ordering::SeqCst);
        let decorator = DefaultRowDecorator::new(*rule)
            .with_toggle(ToggleRegion::new(Rect::new(100.0, 4.0, 16.0, 16.0), false));
        Ok::<_, DecoratorError>(Box::new(decorator) as Box<dyn RowDecorator>)
    });

    let config = RuleListConfig::default().with_row_height(ROW_HEIGHT);
    let mut view = RuleListView::with_config(factory, config);
    view.set_viewport_size(Size::new(320.0, 240.0));
    view.set_rules(Some(rules.iter().copied()));
    view.take_repaint_requests();
    (view, built)
}

fn record_hover(view: &RuleListView<&'static str>) -> Arc<Mutex<Vec<HoverEvent>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let entered = log.clone();
    view.row_entered
        .connect(move |&row| entered.lock().push(HoverEvent::Enter(row)));
    let exited = log.clone();
    view.row_exited
        .connect(move |&row| exited.lock().push(HoverEvent::Exit(row)));
    log
}

fn in_row(row: usize) -> Point {
    Point::new(20.0, row as f32 * ROW_HEIGHT + ROW_HEIGHT / 2.0)
}

fn on_toggle(row: usize) -> Point {
    Point::new(104.0, row as f32 * ROW_HEIGHT + 8.0)
}

fn hovered_rows(view: &RuleListView<&'static str>) -> Vec<usize> {
    view.cache()
        .rows()
        .into_iter()
        .filter(|&row| view.cache().get(row).is_some_and(|d| d.is_hovered()))
        .collect()
}

#[test]
fn test_scenario_hover_walk() {
    let (mut view, _) = build_view(&["A", "B", "C"]);
    let log = record_hover(&view);

    assert!(view.paint_row(1).is_ok());
    assert_eq!(view.cache().rows(), vec![1]);

    view.mouse_move(&MouseMoveEvent::new(in_row(1)));
    assert_eq!(*log.lock(), vec![HoverEvent::Enter(1)]);
    assert_eq!(view.hovered_row(), Some(1));

    view.mouse_move(&MouseMoveEvent::new(in_row(2)));
    assert_eq!(
        *log.lock(),
        vec![HoverEvent::Enter(1), HoverEvent::Exit(1), HoverEvent::Enter(2)]
    );
    assert_eq!(view.hovered_row(), Some(2));

    view.mouse_leave(&LeaveEvent::new());
    assert_eq!(log.lock().last(), Some(&HoverEvent::Exit(2)));
    assert_eq!(log.lock().len(), 4);
    assert_eq!(view.hovered_row(), None);
}

#[test]
fn test_scenario_structural_invalidation() {
    let (mut view, built) = build_view(&["A", "B", "C", "D"]);
    for row in 0..4 {
        assert!(view.paint_row(row).is_ok());
    }
    assert_eq!(built.load(Ordering::SeqCst), 4);

    view.repaint_rows(1, 2, true);
    assert_eq!(view.cache().rows(), vec![0, 3]);
    assert_eq!(
        view.take_repaint_requests(),
        vec![Rect::new(0.0, ROW_HEIGHT, 320.0, 2.0 * ROW_HEIGHT)]
    );

    for row in 0..4 {
        assert!(view.paint_row(row).is_ok());
    }
    assert_eq!(built.load(Ordering::SeqCst), 6);
    assert_eq!(view.cache().rows(), vec![0, 1, 2, 3]);
}

#[test]
fn test_scenario_reset_with_empty_rules() {
    let (mut view, _) = build_view(&["A", "B", "C"]);
    let _ = view.paint_visible();
    view.mouse_move(&MouseMoveEvent::new(in_row(0)));

    view.set_rules(Some(Vec::<&'static str>::new()));

    assert!(view.cache().is_empty());
    assert!(view.rules().is_empty());
    assert_eq!(view.hovered_row(), None);
}

#[test]
fn test_repaint_without_structure_change_keeps_cache() {
    let (mut view, built) = build_view(&["A", "B", "C"]);
    let _ = view.paint_visible();

    view.repaint_rows(0, 2, false);
    assert_eq!(view.cache().len(), 3);
    let _ = view.paint_visible();
    assert_eq!(built.load(Ordering::SeqCst), 3);
}

#[test]
fn test_invalidation_keeps_hover_binding_and_rebuilds_hovered() {
    let (mut view, _) = build_view(&["A", "B", "C"]);
    let _ = view.paint_visible();
    view.mouse_move(&MouseMoveEvent::new(in_row(1)));

    view.repaint_rows(0, 2, true);
    assert_eq!(view.hovered_row(), Some(1));

    let paint = view.paint_row(1).ok();
    assert_eq!(paint.as_ref().and_then(RowPaint::visual).map(|v| v.hovered), Some(true));
    assert_eq!(hovered_rows(&view), vec![1]);
}

#[test]
fn test_hover_is_exclusive() {
    let (mut view, _) = build_view(&["A", "B", "C", "D"]);
    let _ = view.paint_visible();

    for row in [0, 3, 1, 1, 2, 0] {
        view.mouse_move(&MouseMoveEvent::new(in_row(row)));
        assert_eq!(hovered_rows(&view), vec![row]);
    }

    // Blank space below the rows clears hover.
    view.mouse_move(&MouseMoveEvent::new(Point::new(20.0, 200.0)));
    assert!(hovered_rows(&view).is_empty());
    assert_eq!(view.hovered_row(), None);
}

#[test]
fn test_hover_changes_repaint_exact_rows() {
    let (mut view, _) = build_view(&["A", "B", "C"]);
    let _ = view.paint_visible();
    view.mouse_move(&MouseMoveEvent::new(in_row(0)));
    view.take_repaint_requests();

    view.mouse_move(&MouseMoveEvent::new(in_row(2)));
    assert_eq!(
        view.take_repaint_requests(),
        vec![
            Rect::new(0.0, 0.0, 320.0, ROW_HEIGHT),
            Rect::new(0.0, 2.0 * ROW_HEIGHT, 320.0, ROW_HEIGHT),
        ]
    );
}

#[test]
fn test_selection_reaches_only_cached_rows() {
    let (mut view, built) = build_view(&["A", "B", "C", "D", "E"]);
    view.set_selection_mode(SelectionMode::MultiSelection);
    assert!(view.paint_row(1).is_ok());
    assert!(view.paint_row(3).is_ok());
    view.take_repaint_requests();

    view.select_range(0, 4, SelectionFlags::SELECT);

    assert_eq!(built.load(Ordering::SeqCst), 2);
    assert_eq!(view.cache().rows(), vec![1, 3]);
    assert!(view.cache().get(1).is_some_and(|d| d.is_selected()));
    assert!(view.cache().get(3).is_some_and(|d| d.is_selected()));
    assert_eq!(view.take_repaint_requests().len(), 2);

    // Rows built later pick the selection up at construction.
    let paint = view.paint_row(4).ok();
    assert_eq!(paint.as_ref().and_then(RowPaint::visual).map(|v| v.selected), Some(true));
}

#[test]
fn test_on_selection_changed_never_builds() {
    let (mut view, built) = build_view(&["A", "B", "C"]);
    view.on_selection_changed(SelectionRange::new(0, 2));
    assert_eq!(built.load(Ordering::SeqCst), 0);
    assert!(view.cache().is_empty());
}

#[test]
fn test_consumed_press_suppresses_click() {
    let (mut view, _) = build_view(&["A", "B", "C"]);
    let _ = view.paint_visible();
    let clicks = Arc::new(Mutex::new(Vec::new()));
    let sink = clicks.clone();
    view.clicked.connect(move |&row| sink.lock().push(row));

    let mut press = MousePressEvent::new(MouseButton::Left, on_toggle(1), KeyboardModifiers::NONE);
    view.mouse_press(&mut press);
    assert!(press.base.is_accepted());
    assert!(view.is_click_suppressed());

    view.mouse_click(&MouseClickEvent::new(MouseButton::Left, on_toggle(1), KeyboardModifiers::NONE));
    assert!(clicks.lock().is_empty());
    assert!(!view.selection_model().is_selected(1));
    assert!(!view.is_click_suppressed());

    let toggled = view.paint_row(1).ok();
    let regions = toggled.as_ref().and_then(RowPaint::visual).map(|v| v.regions.clone());
    assert_eq!(regions.map(|r| r[0].enabled), Some(true));

    // The latch is one-shot: the next click is handled normally.
    view.mouse_click(&MouseClickEvent::new(MouseButton::Left, in_row(1), KeyboardModifiers::NONE));
    assert_eq!(*clicks.lock(), vec![1]);
    assert!(view.selection_model().is_selected(1));
}

#[test]
fn test_unconsumed_press_keeps_click() {
    let (mut view, _) = build_view(&["A", "B"]);
    let _ = view.paint_visible();

    let mut press = MousePressEvent::new(MouseButton::Left, in_row(0), KeyboardModifiers::NONE);
    view.mouse_press(&mut press);
    assert!(!press.base.is_accepted());
    assert!(!view.is_click_suppressed());

    view.mouse_click(&MouseClickEvent::new(MouseButton::Left, in_row(0), KeyboardModifiers::NONE));
    assert!(view.selection_model().is_selected(0));
}

#[test]
fn test_new_press_clears_stale_latch() {
    let (mut view, _) = build_view(&["A", "B"]);
    let _ = view.paint_visible();

    let mut consumed = MousePressEvent::new(MouseButton::Left, on_toggle(0), KeyboardModifiers::NONE);
    view.mouse_press(&mut consumed);
    assert!(view.is_click_suppressed());

    // The gesture never produced a click; the next press starts fresh.
    let mut plain = MousePressEvent::new(MouseButton::Left, in_row(1), KeyboardModifiers::NONE);
    view.mouse_press(&mut plain);
    assert!(!view.is_click_suppressed());
}

#[test]
fn test_set_rules_clears_latch_and_selection() {
    let (mut view, _) = build_view(&["A", "B"]);
    let _ = view.paint_visible();
    view.select(0, SelectionFlags::CLEAR_AND_SELECT);
    let mut press = MousePressEvent::new(MouseButton::Left, on_toggle(1), KeyboardModifiers::NONE);
    view.mouse_press(&mut press);

    view.set_rules(Some(["X"]));

    assert!(!view.is_click_suppressed());
    assert!(!view.selection_model().has_selection());
    assert_eq!(view.rules(), vec!["X"]);
}

#[test]
fn test_ctrl_click_toggles_in_multi_selection() {
    let (mut view, _) = build_view(&["A", "B", "C"]);
    view.set_selection_mode(SelectionMode::ExtendedSelection);

    view.mouse_click(&MouseClickEvent::new(MouseButton::Left, in_row(0), KeyboardModifiers::NONE));
    view.mouse_click(&MouseClickEvent::new(MouseButton::Left, in_row(2), KeyboardModifiers::CTRL));
    assert_eq!(view.selection_model().selected_rows(), vec![0, 2]);

    view.mouse_click(&MouseClickEvent::new(MouseButton::Left, in_row(0), KeyboardModifiers::CTRL));
    assert_eq!(view.selection_model().selected_rows(), vec![2]);
}

#[test]
fn test_placeholders_are_not_rules() {
    let (mut view, _) = build_view(&["A"]);
    view.append_placeholder();
    view.append_rule("B");

    assert_eq!(view.row_count(), 3);
    assert_eq!(view.rules(), vec!["A", "B"]);

    let painted = view.paint_visible().unwrap_or_default();
    let labels: Vec<Option<String>> = painted
        .iter()
        .map(|(_, paint)| paint.visual().map(|v| v.label.clone()))
        .collect();
    assert_eq!(labels, vec![Some("A".to_string()), None, Some("B".to_string())]);
    assert_eq!(view.cache().rows(), vec![0, 2]);
}

#[test]
fn test_display_index_follows_row() {
    let (mut view, _) = build_view(&["A", "B", "C"]);
    let indices: Vec<usize> = view
        .paint_visible()
        .unwrap_or_default()
        .iter()
        .filter_map(|(_, paint)| paint.visual().map(|v| v.display_index))
        .collect();
    assert_eq!(indices, vec![1, 2, 3]);
}

#[test]
fn test_factory_failure_is_reported() {
    let factory = FnDecoratorFactory::new(|rule: &String, _row: usize, _first: bool| {
        if rule.is_empty() {
            return Err(DecoratorError::Unrenderable("empty rule".into()));
        }
        Ok(Box::new(DefaultRowDecorator::new(rule.clone())) as Box<dyn RowDecorator>)
    });
    let mut view = RuleListView::new(factory);
    view.set_rules(Some(vec!["ok".to_string(), String::new()]));

    assert!(view.paint_row(0).is_ok());
    let err = view.paint_row(1).err();
    assert!(matches!(err, Some(LatticeError::DecoratorFactory { row: 1, .. })));
    assert_eq!(
        err.map(|e| e.to_string()).as_deref(),
        Some("failed to build decorator for row 1: rule cannot be rendered: empty rule")
    );
    assert_eq!(view.cache().rows(), vec![0]);
}

#[test]
fn test_scrolled_rows_map_to_container_coordinates() {
    let (mut view, _) = build_view(&["A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L"]);
    view.set_scroll_offset(2.0 * ROW_HEIGHT);

    assert_eq!(view.index_at(Point::new(20.0, 5.0)), Some(2));
    assert_eq!(view.row_rect(2).map(|r| r.top()), Some(0.0));
    assert_eq!(view.visible_range(), Some((2, 11)));

    let _ = view.paint_visible();
    view.take_repaint_requests();
    view.mouse_move(&MouseMoveEvent::new(Point::new(104.0, 8.0)));
    // Row 2 is hovered, then its toggle lights up in container coordinates.
    assert_eq!(
        view.take_repaint_requests(),
        vec![
            Rect::new(0.0, 0.0, 320.0, ROW_HEIGHT),
            Rect::new(100.0, 4.0, 16.0, 16.0),
        ]
    );
}

#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl CapturedLog {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

fn dispatch_into(log: &CapturedLog, level: tracing::Level) -> tracing::Dispatch {
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(level)
        .with_writer(move || writer.clone())
        .finish();
    tracing::Dispatch::new(subscriber)
}

#[test]
fn test_rule_dump_goes_to_injected_logger() {
    let log = CapturedLog::default();
    let config = RuleListConfig::default().with_log_rule_modification(true);
    let mut view = RuleListView::with_config(DebugLabelFactory, config).with_logger(dispatch_into(&log, tracing::Level::INFO));

    view.set_rules(Some(["name: *.rs", "kind: fn"]));

    let text = log.text();
    assert!(text.contains("rule list updated"), "missing dump in {text:?}");
    assert!(text.contains("name: *.rs"));
    assert!(text.contains("kind: fn"));
}

#[test]
fn test_rule_dump_is_optional() {
    let log = CapturedLog::default();
    let mut view = RuleListView::new(DebugLabelFactory).with_logger(dispatch_into(&log, tracing::Level::INFO));

    view.set_rules(Some(["name: *.rs"]));

    assert!(!log.text().contains("rule list updated"));
}

#[test]
fn test_injected_logger_sees_every_view_event() {
    let log = CapturedLog::default();
    let mut view = RuleListView::new(DebugLabelFactory).with_logger(dispatch_into(&log, tracing::Level::TRACE));
    view.set_viewport_size(Size::new(200.0, 100.0));

    view.set_rules(Some(["a", "b"]));
    assert!(view.paint_row(0).is_ok());
    view.mouse_move(&MouseMoveEvent::new(Point::new(5.0, 5.0)));
    view.repaint_rows(0, 0, true);
    view.mouse_leave(&LeaveEvent::new());

    let text = log.text();
    for expected in [
        "rules replaced",
        "built row decorator",
        "row entered",
        "invalidated decorators",
        "repaint rows",
        "row exited",
    ] {
        assert!(text.contains(expected), "missing {expected:?} in {text:?}");
    }
}

#[test]
fn test_injected_logger_scope_ends_with_the_call() {
    let log = CapturedLog::default();
    let mut view = RuleListView::new(DebugLabelFactory).with_logger(dispatch_into(&log, tracing::Level::TRACE));
    view.set_rules(Some(["a"]));

    tracing::info!("outside the view");

    assert!(log.text().contains("rules replaced"));
    assert!(!log.text().contains("outside the view"));
}

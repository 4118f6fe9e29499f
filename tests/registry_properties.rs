use proptest::prelude::*;

use folio_wm::constants::{NARROW_SIDE_PADDING, SCREEN_MARGIN};
use folio_wm::geometry::{Point, ScreenSize, Size, initial_position};
use folio_wm::window::{InteractionController, Manifest, Registry, WindowId, WindowSpec};

const EPS: f64 = 1e-9;

#[derive(Debug, Clone, Copy)]
enum Op {
    Toggle(u16),
    Focus(u16),
    Close(u16),
    MinimizeAll,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1u16..=5).prop_map(Op::Toggle),
        (1u16..=5).prop_map(Op::Focus),
        (1u16..=5).prop_map(Op::Close),
        Just(Op::MinimizeAll),
    ]
}

fn apply(registry: &Registry, op: Op) -> Registry {
    match op {
        Op::Toggle(id) => registry.toggle_visibility(WindowId(id)).unwrap(),
        Op::Focus(id) => registry.focus(WindowId(id)).unwrap(),
        Op::Close(id) => registry.close(WindowId(id)).unwrap(),
        Op::MinimizeAll => registry.toggle_minimize_all(),
    }
}

fn portfolio() -> Registry {
    Registry::from_manifest(&Manifest::portfolio())
}

fn all_shown() -> Registry {
    (2..=5).fold(portfolio(), |reg, id| {
        reg.toggle_visibility(WindowId(id)).unwrap()
    })
}

proptest! {
    #[test]
    fn default_placement_stays_inside_margins(
        id in 1u16..=5,
        width in 768.0f64..4000.0,
        height in 400.0f64..2400.0,
        w in 1.0f64..5000.0,
        h in 1.0f64..5000.0,
    ) {
        let screen = ScreenSize::new(width, height);
        let rect = initial_position(WindowId(id), Size::new(w, h), screen);
        prop_assert!(rect.x >= SCREEN_MARGIN - EPS);
        prop_assert!(rect.y >= SCREEN_MARGIN - EPS);
        prop_assert!(rect.right() <= width - SCREEN_MARGIN + EPS);
        prop_assert!(rect.bottom() <= screen.available_height() - SCREEN_MARGIN + EPS);
    }

    #[test]
    fn narrow_placement_leaves_side_padding(
        id in 1u16..=5,
        width in 320.0f64..768.0,
        w in 1.0f64..3000.0,
    ) {
        let screen = ScreenSize::new(width, 900.0);
        let rect = initial_position(WindowId(id), Size::new(w, 300.0), screen);
        prop_assert!(rect.width <= width - NARROW_SIDE_PADDING + EPS);
    }

    #[test]
    fn visible_z_indices_stay_unique(ops in prop::collection::vec(op(), 0..40)) {
        let registry = ops.iter().fold(portfolio(), |reg, op| apply(&reg, *op));
        let mut seen: Vec<u32> = registry
            .records()
            .iter()
            .filter(|w| w.visible())
            .map(|w| w.z_index())
            .collect();
        let count = seen.len();
        seen.sort_unstable();
        seen.dedup();
        prop_assert_eq!(seen.len(), count);
        prop_assert!(registry.records().iter().all(|w| w.z_index() <= registry.max_z()));
    }

    #[test]
    fn focus_twice_keeps_unique_maximum(
        ops in prop::collection::vec(op(), 0..20),
        id in 1u16..=5,
    ) {
        let registry = ops.iter().fold(portfolio(), |reg, op| apply(&reg, *op));
        let once = registry.focus(WindowId(id)).unwrap();
        let twice = once.focus(WindowId(id)).unwrap();
        prop_assert_eq!(once.draw_order(), twice.draw_order());
        let top = twice.get(WindowId(id)).unwrap().z_index();
        prop_assert_eq!(top, twice.max_z());
        prop_assert!(twice.records().iter().filter(|w| w.z_index() == top).count() == 1);
    }

    #[test]
    fn minimize_all_twice_is_involution(ops in prop::collection::vec(op(), 0..30)) {
        let registry = ops.iter().fold(portfolio(), |reg, op| apply(&reg, *op));
        let twice = registry.toggle_minimize_all().toggle_minimize_all();
        for (before, after) in registry.records().iter().zip(twice.records()) {
            prop_assert_eq!(before.is_minimized(), after.is_minimized());
            prop_assert_eq!(before.visible(), after.visible());
        }
        prop_assert_eq!(registry.dock_mode(), twice.dock_mode());
    }

    #[test]
    fn shown_window_outranks_previous_top(a in 2u16..=5, b in 2u16..=5) {
        prop_assume!(a != b);
        let registry = portfolio();
        let first = registry.toggle_visibility(WindowId(a)).unwrap();
        let second = first.toggle_visibility(WindowId(b)).unwrap();
        let za = first.get(WindowId(a)).unwrap().z_index();
        let zb = second.get(WindowId(b)).unwrap().z_index();
        prop_assert!(za > registry.max_z());
        prop_assert!(zb > za);
        prop_assert_eq!(second.get(WindowId(a)).unwrap().z_index(), za);
    }

    #[test]
    fn resize_never_shrinks_below_floor(dx in 0.0f64..600.0, dy in 0.0f64..600.0) {
        let manifest = Manifest::new(vec![
            WindowSpec::new(1, "floor", 300.0, 200.0).visible(true),
        ])
        .unwrap();
        let registry = Registry::from_manifest(&manifest);
        let screen = ScreenSize::new(1920.0, 1080.0);
        let rect = registry.placement(WindowId(1), screen).unwrap();
        let grip = Point::new(rect.right(), rect.bottom());

        let mut controller = InteractionController::new();
        let registry = controller
            .begin_resize(&registry, WindowId(1), grip, screen)
            .unwrap();
        let released = controller
            .release(&registry, Point::new(grip.x - dx, grip.y - dy), screen)
            .unwrap();
        prop_assert_eq!(
            released.get(WindowId(1)).unwrap().size(),
            Size::new(300.0, 200.0)
        );
    }

    #[test]
    fn dock_slots_survive_other_windows(hidden in 1u16..=5) {
        let docked = all_shown().toggle_minimize_all();
        let without = docked.toggle_visibility(WindowId(hidden)).unwrap();
        for record in without.records() {
            if record.id() == WindowId(hidden) {
                prop_assert_eq!(record.dock_slot(), None);
            } else {
                prop_assert_eq!(record.dock_slot(), docked.get(record.id()).unwrap().dock_slot());
            }
        }
        // showing it again reclaims the slot it left
        let back = without.toggle_visibility(WindowId(hidden)).unwrap();
        prop_assert_eq!(
            back.get(WindowId(hidden)).unwrap().dock_slot(),
            docked.get(WindowId(hidden)).unwrap().dock_slot()
        );
    }
}

#[test]
fn close_depends_on_dock_mode() {
    let registry = portfolio();
    let hidden = registry.close(WindowId(1)).unwrap();
    assert!(!hidden.get(WindowId(1)).unwrap().visible());

    // in dock mode a restored window goes back to the strip instead
    let docked = registry.toggle_minimize_all();
    let restored = docked
        .restore_from_dock(WindowId(1), ScreenSize::new(1920.0, 1080.0))
        .unwrap();
    let closed = restored.close(WindowId(1)).unwrap();
    let record = closed.get(WindowId(1)).unwrap();
    assert!(record.visible());
    assert!(record.is_minimized());
}

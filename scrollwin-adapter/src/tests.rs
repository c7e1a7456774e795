use crate::*;

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::RefCell;

use scrollwin::{ItemHeight, VirtualListOptions};

#[derive(Clone, Debug)]
struct Customer {
    id: Option<u32>,
    name: &'static str,
}

fn customers(n: usize) -> Vec<Customer> {
    (0..n)
        .map(|i| Customer {
            id: (i % 10 != 3).then_some(i as u32 + 1000),
            name: "customer",
        })
        .collect()
}

fn customer_key(c: &Customer, i: usize) -> String {
    match c.id {
        Some(id) => format!("{id}"),
        None => format!("customer-{i}"),
    }
}

#[test]
fn render_only_materializes_the_virtual_range() {
    let calls = Rc::new(RefCell::new(Vec::<usize>::new()));
    let mut list = VirtualList::new(
        VirtualListOptions::new(0, 600)
            .with_fixed_item_height(73)
            .with_overscan(5),
        customers(1000),
        {
            let calls = Rc::clone(&calls);
            move |c: &Customer, i| {
                calls.borrow_mut().push(i);
                format!("{} #{i}", c.name)
            }
        },
    );
    assert_eq!(list.engine().count(), 1000);

    list.on_scroll(73 * 100, 0);
    let frame = list.render();

    let range = list.engine().virtual_range().unwrap();
    assert_eq!(range.start_index, 95);
    let rendered: Vec<usize> = frame.children.iter().map(|c| c.slot.index).collect();
    assert_eq!(rendered, range.indexes().collect::<Vec<_>>());
    assert_eq!(*calls.borrow(), rendered);

    assert_eq!(frame.total_height, 73_000);
    assert_eq!(frame.viewport_height, 600);
    assert!(frame.is_scrolling);
    assert_eq!(frame.children[0].view, "customer #95");
    assert_eq!(frame.children[0].slot.top_offset, 95 * 73);
    assert_eq!(frame.children[0].key, 95);
}

#[test]
fn custom_keys_fall_back_to_index_based_identity() {
    let list = VirtualList::new_with_key(
        VirtualListOptions::new(0, 100)
            .with_fixed_item_height(10)
            .with_overscan(0),
        customers(20),
        |c: &Customer, _| c.name,
        customer_key,
    );
    let keys: Vec<String> = list.render().children.into_iter().map(|c| c.key).collect();
    assert_eq!(keys[0], "1000");
    assert_eq!(keys[3], "customer-3");
    assert_eq!(keys.len(), 10);
}

#[test]
fn swapping_items_recomputes_layout() {
    let mut list = VirtualList::new(
        VirtualListOptions::new(0, 100).with_fixed_item_height(10),
        vec![1u8; 50],
        |v: &u8, _| *v,
    );
    let version = list.engine().version();
    assert_eq!(list.render().total_height, 500);

    list.set_items(vec![2u8; 5]);
    assert!(list.engine().version() > version);
    let frame = list.render();
    assert_eq!(frame.total_height, 50);
    assert_eq!(frame.children.len(), 5);
    assert!(frame.children.iter().all(|c| c.view == 2));

    list.set_items(Vec::new());
    let frame = list.render();
    assert!(frame.is_empty());
    assert_eq!(frame.total_height, 0);
    assert!(list.is_empty());
}

#[test]
fn height_resolver_swap_applies_to_the_next_render() {
    let mut list = VirtualList::new(
        VirtualListOptions::new(0, 100).with_overscan(0),
        vec![(); 30],
        |_: &(), i| i,
    );
    // Estimated at 50px until told otherwise.
    assert_eq!(list.render().children.len(), 2);

    list.set_item_height(Some(ItemHeight::dynamic(|i| if i < 10 { 10 } else { 40 })));
    let frame = list.render();
    assert_eq!(frame.children.len(), 10);
    assert_eq!(frame.total_height, 10 * 10 + 20 * 40);

    assert_eq!(list.measure(0, 30), 20);
    assert_eq!(list.render().children.len(), 8);
}

#[test]
fn driver_timer_is_rearmed_on_every_scroll_event() {
    let timers = ManualTimers::shared();
    let mut list = VirtualList::new(
        VirtualListOptions::new(0, 100).with_fixed_item_height(10),
        vec![0u8; 100],
        |_: &u8, i| i,
    )
    .with_timer_driver(Rc::clone(&timers));

    list.on_scroll(10, 0);
    list.on_scroll(20, 40);
    list.on_scroll(30, 80);
    {
        let t = timers.borrow();
        assert_eq!(t.pending().len(), 1);
        assert_eq!(t.next_deadline_ms(), Some(230));
    }

    assert!(timers.borrow_mut().take_due(229).is_empty());
    assert!(list.is_scrolling());

    let due = timers.borrow_mut().take_due(230);
    assert_eq!(due.len(), 1);
    assert!(list.on_timer_fired(due[0], 230));
    assert!(!list.is_scrolling());
    assert!(timers.borrow().is_empty());
}

#[test]
fn early_timer_delivery_is_rescheduled_until_the_deadline() {
    let timers = ManualTimers::shared();
    let mut list = VirtualList::new(
        VirtualListOptions::new(0, 100).with_fixed_item_height(10),
        vec![0u8; 100],
        |_: &u8, i| i,
    )
    .with_timer_driver(Rc::clone(&timers));

    list.on_scroll(10, 0);
    let due = timers.borrow_mut().take_due(150);
    assert_eq!(due.len(), 1);

    // Host clock reads one millisecond short.
    assert!(!list.on_timer_fired(due[0], 149));
    assert!(list.is_scrolling());
    assert_eq!(
        timers.borrow().pending(),
        &[PendingTimer {
            token: due[0],
            deadline_ms: 150,
        }]
    );

    let due = timers.borrow_mut().take_due(150);
    assert!(list.on_timer_fired(due[0], 150));
    assert!(!list.is_scrolling());
    assert!(timers.borrow().is_empty());
}

#[test]
fn stale_timer_delivery_schedules_nothing() {
    let timers = ManualTimers::shared();
    let mut list = VirtualList::new(
        VirtualListOptions::new(0, 100).with_fixed_item_height(10),
        vec![0u8; 100],
        |_: &u8, i| i,
    )
    .with_timer_driver(Rc::clone(&timers));

    list.on_scroll(10, 0);
    let first = timers.borrow().pending()[0].token;
    list.on_scroll(20, 50);
    assert!(!list.on_timer_fired(first, 150));
    assert_eq!(timers.borrow().pending().len(), 1);
    assert_eq!(timers.borrow().next_deadline_ms(), Some(200));
}

#[test]
fn polling_settle_releases_the_driver_timer() {
    let timers = ManualTimers::shared();
    let mut list = VirtualList::new(
        VirtualListOptions::new(0, 100)
            .with_fixed_item_height(10)
            .with_is_scrolling_reset_delay_ms(60),
        vec![0u8; 100],
        |_: &u8, i| i,
    )
    .with_timer_driver(Rc::clone(&timers));

    list.on_scroll(50, 0);
    assert!(!timers.borrow().is_empty());
    assert!(list.tick(60));
    assert!(timers.borrow().is_empty());

    list.on_scroll(60, 100);
    assert!(list.on_scroll_end());
    assert!(timers.borrow().is_empty());
}

#[test]
fn dispose_and_drop_cancel_outstanding_timers() {
    let timers = ManualTimers::shared();
    let mut list = VirtualList::new(
        VirtualListOptions::new(0, 100).with_fixed_item_height(10),
        vec![0u8; 100],
        |_: &u8, i| i,
    )
    .with_timer_driver(Rc::clone(&timers));

    list.on_scroll(10, 0);
    list.dispose();
    assert!(timers.borrow().is_empty());
    assert!(list.is_disposed());

    // Events after teardown schedule nothing.
    list.on_scroll(20, 10);
    assert!(timers.borrow().is_empty());
    assert!(!list.is_scrolling());
    list.dispose();

    let mut dropped = VirtualList::new(
        VirtualListOptions::new(0, 100).with_fixed_item_height(10),
        vec![0u8; 100],
        |_: &u8, i| i,
    )
    .with_timer_driver(Rc::clone(&timers));
    dropped.on_scroll(10, 0);
    assert_eq!(timers.borrow().pending().len(), 1);
    drop(dropped);
    assert!(timers.borrow().is_empty());
}

#[test]
fn replacing_the_driver_cancels_on_the_old_one() {
    let old = ManualTimers::shared();
    let new = ManualTimers::shared();
    let mut list = VirtualList::new(
        VirtualListOptions::new(0, 100).with_fixed_item_height(10),
        vec![0u8; 100],
        |_: &u8, i| i,
    )
    .with_timer_driver(Rc::clone(&old));

    list.on_scroll(10, 0);
    list.set_timer_driver(Some(alloc::boxed::Box::new(Rc::clone(&new))));
    assert!(old.borrow().is_empty());

    list.on_scroll(20, 10);
    assert_eq!(new.borrow().pending().len(), 1);
    assert!(old.borrow().is_empty());
}

#[test]
fn manual_timers_drain_in_deadline_order() {
    let mut source = scrollwin::ScrollStateMachine::new(10);
    let a = source.on_scroll_event(0).unwrap();
    let b = source.on_scroll_event(0).unwrap();
    let c = source.on_scroll_event(0).unwrap();

    let mut timers = ManualTimers::new();
    timers.schedule(c, 30);
    timers.schedule(a, 10);
    timers.schedule(b, 20);
    timers.cancel(b);

    assert_eq!(timers.take_due(25), vec![a]);
    assert_eq!(timers.take_due(100), vec![c]);
    assert!(timers.is_empty());
}

#[test]
fn scroll_to_index_moves_without_marking_scrolling() {
    let mut list = VirtualList::new(
        VirtualListOptions::new(0, 100)
            .with_fixed_item_height(10)
            .with_overscan(0),
        vec![0u8; 100],
        |_: &u8, i| i,
    );
    assert_eq!(list.scroll_to_index(50, scrollwin::Align::Start), 500);
    let frame = list.render();
    assert!(!frame.is_scrolling);
    assert_eq!(frame.children.first().map(|c| c.view), Some(50));
}

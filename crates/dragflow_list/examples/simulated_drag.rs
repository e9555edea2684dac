//! Simulated Drag Demo
//!
//! Drives a draggable list without any UI:
//! - A frame thread feeds touch/pan events and ticks the engine at 60 Hz
//! - An application thread drains the inbox and runs the callbacks
//! - The reordered data travels back and is applied with `set_data`
//!
//! Run with: cargo run -p dragflow_list --example simulated_drag

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use dragflow_list::{
    event_types, DragListCallbacks, DragListConfig, DraggableList, Event, Layout, PointerKind,
};

const ROW: f32 = 48.0;
const FRAME: f32 = 1.0 / 60.0;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let tasks: Vec<String> = (1..=8).map(|i| format!("Task {i}")).collect();
    let (mut list, inbox) = DraggableList::builder()
        .data(tasks.clone())
        .key_extractor(|task: &String, _| task.clone())
        .config(DragListConfig::default().activation_distance(4.0))
        .build()?;

    list.on_container_layout(Layout::new(0.0, 0.0, 360.0, 240.0));
    list.on_content_size_change(360.0, tasks.len() as f32 * ROW);
    for (i, task) in tasks.iter().enumerate() {
        list.on_cell_layout(task.clone(), i as f32 * ROW, ROW);
    }

    // Application side
    let (reordered_tx, reordered_rx) = mpsc::channel();
    let app = thread::spawn(move || {
        let mut callbacks = DragListCallbacks::new()
            .on_drag_begin(|index| tracing::info!("picked up row {}", index))
            .on_placeholder_index_change(|index| tracing::info!("placeholder now at {}", index))
            .on_release(|index| tracing::info!("released row {}", index))
            .on_drag_end(move |end| {
                tracing::info!("moved {} -> {}", end.from, end.to);
                let _ = reordered_tx.send(end.data);
            });

        while let Some(event) = inbox.recv_timeout(Duration::from_secs(1)) {
            callbacks.deliver(event);
        }
    });

    // Frame side: long-press "Task 2", drag it down three rows, let go
    let key = tasks[1].clone();
    let start_y = ROW * 1.5;
    list.handle_event(&Event::touch_down(20.0, start_y, PointerKind::Touch));
    list.drag(&key);
    list.handle_event(&Event::pan(
        event_types::PAN_BEGIN,
        (0.0, 0.0),
        (20.0, start_y),
        PointerKind::Touch,
    ));

    let mut translation = 0.0;
    while translation < ROW * 3.0 {
        translation += 6.0;
        list.handle_event(&Event::pan(
            event_types::PAN_UPDATE,
            (0.0, translation),
            (20.0, start_y + translation),
            PointerKind::Touch,
        ));
        list.frame(FRAME);
    }

    list.handle_event(&Event::pan(
        event_types::PAN_END,
        (0.0, translation),
        (20.0, start_y + translation),
        PointerKind::Touch,
    ));
    list.handle_event(&Event::touch_up(20.0, start_y + translation, PointerKind::Touch));
    for _ in 0..600 {
        if !list.frame(FRAME) {
            break;
        }
    }

    let data = reordered_rx.recv_timeout(Duration::from_secs(1))?;
    list.set_data(data);
    tracing::info!("new order: {:?}", list.data());

    drop(list);
    app.join()
        .map_err(|_| anyhow::anyhow!("application thread panicked"))?;
    Ok(())
}

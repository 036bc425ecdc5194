// Copyright 2025 the Brushwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted lasso selection over a large scatter: 10k dots, a pile of
//! coincident dots, and one dot outside the indexed region. Prints what a
//! rectangle drag and a click select, and the replayable encoding of the
//! result.

use brushwork_gesture::{GestureConfig, Modifiers, PointerButton, SelectionGesture};
use brushwork_markers::shapes::CircleMarker;
use brushwork_markers::{Marker, MarkerIndex};
use brushwork_quadtree::PixelPoint;
use brushwork_selection::{RecordId, SelectionSet};
use kurbo::Point;

const WIDTH: i32 = 500;

struct Rng(u64);

impl Rng {
    fn next_coord(&mut self, bound: i32) -> i32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        (x % bound as u64) as i32
    }
}

fn main() {
    let mut rng = Rng(0xDECAF_C0FFEE);
    let mut markers: Vec<Box<dyn Marker>> = Vec::new();
    let mut record = 0_u32;
    let dot = |x: i32, y: i32, record: &mut u32| {
        let marker = CircleMarker::new(PixelPoint::new(x, y), 2.0, Some(RecordId::new(*record)));
        *record += 1;
        Box::new(marker) as Box<dyn Marker>
    };

    for _ in 0..10_000 {
        let (x, y) = (rng.next_coord(WIDTH), rng.next_coord(WIDTH));
        markers.push(dot(x, y, &mut record));
    }
    // A pile of coincident dots, and a stray outside the indexed region.
    for _ in 0..7 {
        markers.push(dot(5, 5, &mut record));
    }
    markers.push(dot(WIDTH + 5, WIDTH + 5, &mut record));

    let record_count = record as usize;
    let mut index = MarkerIndex::new();
    index.invalidate(WIDTH, WIDTH);

    let mut selection = SelectionSet::new();
    let mut gesture = SelectionGesture::new(GestureConfig::default());

    // Rectangle-drag over the top-left quadrant (catches the pile at (5,5)).
    gesture.on_pointer_down(
        Point::new(0.0, 0.0),
        PointerButton::Secondary,
        Modifiers::empty(),
        &mut selection,
    );
    for step in 1..=25 {
        let d = f64::from(step) * 10.0;
        gesture.on_pointer_move(
            Point::new(d, d),
            Modifiers::empty(),
            &mut index,
            &markers,
            &mut selection,
        );
    }
    gesture.on_pointer_up(
        Point::new(250.0, 250.0),
        Modifiers::empty(),
        &mut index,
        &markers,
        &mut selection,
    );

    let group = &selection.groups().expect("drag selected something")[0];
    println!(
        "rectangle (0,0)-(250,250): {} of {} records selected ({} hit points indexed)",
        group.len(),
        record_count,
        index.len(),
    );

    let encoded = selection.as_bitsets(record_count).expect("selection exists");
    println!(
        "encoded as {} bitset group(s); group 0 is {} base64 chars",
        encoded.len(),
        encoded[0].len(),
    );

    let mut replayed = SelectionSet::new();
    replayed.set_from_bitsets(Some(&encoded), record_count);
    assert_eq!(replayed.groups(), selection.groups());
    println!("round-trip decode matches");

    // A click on the stray dot outside the indexed region: the point probe
    // is a draw-order scan, so out-of-region markers are still clickable.
    let stray = Point::new(f64::from(WIDTH) + 5.0, f64::from(WIDTH) + 5.0);
    gesture.on_pointer_down(
        stray,
        PointerButton::Primary,
        Modifiers::empty(),
        &mut selection,
    );
    gesture.on_pointer_up(stray, Modifiers::empty(), &mut index, &markers, &mut selection);
    let clicked = &selection.groups().expect("click selected something")[0];
    println!(
        "click at {stray:?}: record {:?}",
        clicked.members().first().map(|r| r.index()),
    );
}

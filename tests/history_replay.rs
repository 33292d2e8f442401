use eframe_crop::{SelectionHistory, SelectionRect, SelectionSnapshot};

fn rect(i: usize) -> SelectionRect {
    let v = i as f32 * 10.0;
    SelectionRect::new(v, v + 1.0, v + 50.0, v + 20.0)
}

// Deterministic pseudo-random op sequence without extra dependencies
fn ops(seed: u64, len: usize) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((state >> 33) % 3) as u8
        })
        .collect()
}

#[test]
fn test_redo_undo_commit_returns_committed_rect() {
    let mut history = SelectionHistory::new();
    for i in 0..5 {
        history.commit(rect(i));
        history.undo();
        let redone = history.redo();
        assert_eq!(redone.and_then(|s| s.rect()), Some(rect(i)));
    }
}

#[test]
fn test_stacks_reconstruct_linear_history() {
    for seed in 0..20 {
        let mut history = SelectionHistory::new();
        // Model: a timeline of states and a cursor into it
        let mut timeline: Vec<SelectionSnapshot> = vec![SelectionSnapshot::empty()];
        let mut cursor = 0usize;
        let mut next = 0usize;

        for op in ops(seed, 60) {
            match op {
                0 => {
                    history.commit(rect(next));
                    timeline.truncate(cursor + 1);
                    timeline.push(SelectionSnapshot::from(rect(next)));
                    cursor += 1;
                    next += 1;
                }
                1 => {
                    let undone = history.undo();
                    if cursor > 0 {
                        cursor -= 1;
                        assert_eq!(undone, Some(timeline[cursor]));
                    } else {
                        assert_eq!(undone, None);
                    }
                }
                _ => {
                    let redone = history.redo();
                    if cursor + 1 < timeline.len() {
                        cursor += 1;
                        assert_eq!(redone, Some(timeline[cursor]));
                    } else {
                        assert_eq!(redone, None);
                    }
                }
            }

            assert_eq!(history.current(), timeline[cursor]);
            assert_eq!(history.undo_stack(), &timeline[..cursor]);
            assert_eq!(history.undo_stack().len() + history.redo_stack().len() + 1, timeline.len());
            assert_eq!(history.can_undo(), cursor > 0);
            assert_eq!(history.can_redo(), cursor + 1 < timeline.len());
        }
    }
}

#[test]
fn test_commit_after_undos_discards_future() {
    let mut history = SelectionHistory::new();
    for i in 0..4 {
        history.commit(rect(i));
    }
    history.undo();
    history.undo();
    history.undo();
    assert_eq!(history.redo_stack().len(), 3);

    history.commit(rect(9));
    assert!(history.redo_stack().is_empty());

    // Stale states never come back
    while history.redo().is_some() {}
    let mut seen = vec![history.current().rect()];
    while let Some(snapshot) = history.undo() {
        seen.push(snapshot.rect());
    }
    assert_eq!(seen, vec![Some(rect(9)), Some(rect(0)), None]);
}

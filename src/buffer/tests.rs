use super::*;

fn buffer(text: &str) -> Buffer {
    Buffer::from_bytes("test", text.as_bytes())
}

fn assert_consistent(buf: &Buffer) {
    let store = &buf.store;
    assert!(store.gap_start() <= store.gap_end());
    assert!(store.gap_end() <= store.size());
    assert_eq!(store.size() - store.gap_size(), buf.len());

    let starts = buf.line_starts();
    assert_eq!(starts[0], 0);
    assert_eq!(*starts.last().unwrap(), buf.len() + 1);
    assert!(starts.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(buf.line_index, LineIndex::build(store));
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn test_new_buffer() {
    let buf = Buffer::new("scratch");
    assert!(buf.is_empty());
    assert_eq!(buf.len(), 0);
    assert_eq!(buf.line_count(), 1);
    assert_eq!(buf.line_length(0), 0);
    assert_eq!(buf.name(), "scratch");
    assert_eq!(buf.line_ending(), LineEnding::Lf);
    assert_eq!(buf.revision(), 0);
    assert!(buf.history().is_empty());
    assert_consistent(&buf);
}

#[test]
fn test_default_uses_no_name() {
    assert_eq!(Buffer::default().name(), "[No Name]");
}

#[test]
fn test_with_options() {
    let options = BufferOptions {
        grow_amount: 4,
        history_limit: 2,
        default_line_ending: LineEnding::Crlf,
    };
    let mut buf = Buffer::with_options("opts", &options);
    assert_eq!(buf.line_ending(), LineEnding::Crlf);
    assert_eq!(buf.history().limit(), 2);

    buf.insert(0, b"a");
    assert_eq!(buf.store.size(), 4);
}

#[test]
fn test_from_bytes_crlf() {
    let buf = buffer("a\r\nb\r\nc");
    assert_eq!(buf.to_string(), "a\nb\nc");
    assert_eq!(buf.line_ending(), LineEnding::Crlf);
    assert_eq!(buf.to_string_apply_line_endings(), "a\r\nb\r\nc");
    assert_eq!(buf.line_count(), 3);
    assert_consistent(&buf);
}

#[test]
fn test_from_bytes_cr_and_none() {
    let buf = buffer("a\rb");
    assert_eq!(buf.to_string(), "a\nb");
    assert_eq!(buf.line_ending(), LineEnding::Cr);
    assert_eq!(buf.to_bytes_apply_line_endings(), b"a\rb");

    let buf = buffer("single line");
    assert_eq!(buf.line_ending(), LineEnding::None);
    assert_eq!(buf.to_string_apply_line_endings(), "single line");
}

#[test]
fn test_from_bytes_lfcr_pair_is_one_line_break() {
    let raw = b"a\n\rb";
    let raw_index = LineIndex::build(&GapStore::from_bytes(raw.to_vec(), 8));

    let buf = Buffer::from_bytes("lfcr", raw);
    assert_eq!(buf.line_count(), raw_index.line_count());
    assert_eq!(buf.line_count(), 2);
    assert_eq!(buf.to_string(), "a\nb");
    assert_eq!(buf.line_ending(), LineEnding::Lf);
    assert_consistent(&buf);

    // Writing out and loading again keeps the same lines
    let exported = buf.to_bytes_apply_line_endings();
    assert_eq!(exported, b"a\nb");
    let reloaded = Buffer::from_bytes("lfcr", &exported);
    assert_eq!(reloaded.to_bytes(), buf.to_bytes());
    assert_eq!(reloaded.line_starts(), buf.line_starts());
}

// =============================================================================
// Queries and cursors
// =============================================================================

#[test]
fn test_cursor_and_line_length() {
    let buf = buffer("hello\nworld");
    let cursor = buf.cursor_from_position(6);
    assert_eq!((cursor.line, cursor.col), (1, 0));
    assert_eq!(buf.line_length(0), 5);
    // Last line has no terminator and reports its full length
    assert_eq!(buf.line_length(1), 5);
    assert_eq!(buf.position_from_line(1), 6);
    assert_eq!(buf.cursor_from_line(1), cursor);
}

#[test]
fn test_char_at() {
    let mut buf = buffer("abc");
    buf.insert(1, b"XY");
    let bytes: Vec<u8> = (0..buf.len()).map(|i| buf.char_at(i)).collect();
    assert_eq!(bytes, b"aXYbc");
}

#[test]
fn test_line_text() {
    let buf = buffer("first\n\nthird");
    assert_eq!(buf.line_text(0), "first");
    assert_eq!(buf.line_text(1), "");
    assert_eq!(buf.line_text(2), "third");
}

#[test]
fn test_line_round_trip() {
    let buf = buffer("a\nbb\n\nccc\n");
    for line in 0..buf.line_count() {
        assert_eq!(buf.cursor_from_position(buf.position_from_line(line)).line, line);
    }
}

#[test]
fn test_buffer_view() {
    fn describe(view: &impl BufferView) -> Vec<(usize, usize)> {
        (0..view.line_count())
            .map(|l| (view.line_start(l), view.line_end(l)))
            .collect()
    }

    let buf = buffer("ab\ncde\n");
    assert_eq!(describe(&buf), vec![(0, 2), (3, 6), (7, 7)]);
    assert_eq!(BufferView::char_at(&buf, 3), b'c');
    assert!(!BufferView::is_empty(&buf));
}

// =============================================================================
// Mutations
// =============================================================================

#[test]
fn test_insert_and_delete_single() {
    let mut buf = Buffer::new("t");
    buf.insert_single(0, b'b');
    buf.insert_single(0, b'a');
    buf.insert_single(2, b'\n');
    assert_eq!(buf.to_string(), "ab\n");
    assert_eq!(buf.line_count(), 2);

    buf.delete_single(2);
    assert_eq!(buf.to_string(), "ab");
    assert_eq!(buf.line_count(), 1);
    assert_consistent(&buf);
}

#[test]
fn test_insert_text_updates_lines() {
    let mut buf = buffer("one\nthree");
    buf.insert_text(4, b"two\n");
    assert_eq!(buf.to_string(), "one\ntwo\nthree");
    assert_eq!(buf.line_starts(), &[0, 4, 8, 14]);
    assert_consistent(&buf);
}

#[test]
fn test_delete_region_joins_lines() {
    let mut buf = buffer("one\ntwo\nthree");
    buf.delete_region(3, 8);
    assert_eq!(buf.to_string(), "onethree");
    assert_eq!(buf.line_count(), 1);
    assert_consistent(&buf);
}

#[test]
fn test_replace_region() {
    let mut buf = buffer("hello world");
    buf.replace_region(b"there", 6, 11);
    assert_eq!(buf.to_string(), "hello there");
    buf.replace_region(b"", 0, 6);
    assert_eq!(buf.to_string(), "there");
    assert_consistent(&buf);
}

#[test]
fn test_clear() {
    let mut buf = buffer("a\nb");
    buf.insert(3, b"c");
    buf.clear();
    assert!(buf.is_empty());
    assert_eq!(buf.line_count(), 1);
    assert!(buf.history().is_empty());
    assert!(buf.undo().is_none());
    assert_consistent(&buf);
}

#[test]
fn test_revision_increments_on_mutation_only() {
    let mut buf = buffer("abc");
    let _ = buf.cursor_from_position(2);
    let _ = buf.to_string();
    assert_eq!(buf.revision(), 0);

    buf.insert_text(0, b"x");
    buf.delete_region(0, 1);
    buf.insert_text(0, b"");
    assert_eq!(buf.revision(), 2);
}

#[test]
fn test_checked_mutations() {
    let mut buf = buffer("abc");

    let err = buf.try_insert_text(4, b"x").unwrap_err();
    assert_eq!(err.kind, crate::error::ErrorType::Range);
    assert_eq!(err.code, "OUT_OF_RANGE");

    let err = buf.try_delete_region(2, 2).unwrap_err();
    assert_eq!(err.code, "INVALID_SPAN");

    let err = buf.try_replace_region(b"x", 1, 9).unwrap_err();
    assert_eq!(err.code, "OUT_OF_RANGE");

    // Nothing changed on failure
    assert_eq!(buf.to_string(), "abc");
    assert_eq!(buf.revision(), 0);

    buf.try_insert_text(3, b"d").unwrap();
    buf.try_delete_region(0, 1).unwrap();
    buf.try_replace_region(b"B", 0, 1).unwrap();
    assert_eq!(buf.to_string(), "Bcd");
}

#[test]
#[should_panic(expected = "invalid delete span")]
fn test_delete_inverted_region_panics() {
    let mut buf = buffer("abc");
    buf.delete_region(2, 1);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn test_insert_past_end_panics() {
    let mut buf = buffer("abc");
    buf.insert_text(5, b"x");
}

#[test]
#[should_panic(expected = "out of bounds")]
fn test_empty_insert_past_end_still_panics() {
    let mut buf = buffer("abc");
    buf.insert_text(5, b"");
}

// =============================================================================
// Materialization
// =============================================================================

#[test]
fn test_to_string_span() {
    let mut buf = buffer("hello world");
    // Force the gap into the middle of the requested span
    buf.insert_text(5, b",");
    assert_eq!(buf.to_string_span(Span::new(3, 9)), "lo, wo");
    assert_eq!(buf.to_string_span(Span::new(4, 4)), "");
    assert_eq!(buf.bytes_span(Span::new(0, 12)), b"hello, world");
}

#[test]
fn test_to_bytes_matches_display() {
    let mut buf = buffer("abc\ndef");
    buf.insert_text(2, b"--");
    assert_eq!(buf.to_bytes(), buf.to_string().into_bytes());
}

// =============================================================================
// History
// =============================================================================

#[test]
fn test_typing_coalesces() {
    let mut buf = Buffer::new("t");
    buf.insert(0, b"ab");
    let cursor = buf.insert(2, b"c");
    assert_eq!(buf.to_string(), "abc");
    assert_eq!(cursor.position, 3);
    assert_eq!(buf.history().len(), 1);
    assert_eq!(
        buf.history().last(),
        Some(&EditRecord::Insert {
            span: Span::new(0, 3),
            text: b"abc".to_vec(),
        })
    );

    let cursor = buf.undo().unwrap();
    assert_eq!(buf.to_string(), "");
    assert_eq!(cursor.position, 0);
}

#[test]
fn test_manual_pairing() {
    let mut buf = Buffer::new("t");
    buf.record_insert(0, b"ab");
    buf.insert_text(0, b"ab");
    buf.record_insert(2, b"c");
    buf.insert_text(2, b"c");
    assert_eq!(buf.history().len(), 1);

    buf.record_delete(1, 2);
    buf.delete_region(1, 2);
    assert_eq!(buf.to_string(), "ac");

    buf.undo();
    assert_eq!(buf.to_string(), "abc");
    buf.undo();
    assert_eq!(buf.to_string(), "");
}

#[test]
fn test_undo_delete_restores_text() {
    let mut buf = buffer("abc");
    let cursor = buf.delete(1, 2);
    assert_eq!(buf.to_string(), "ac");
    assert_eq!(cursor.position, 1);

    let cursor = buf.undo().unwrap();
    assert_eq!(buf.to_string(), "abc");
    assert_eq!(cursor.position, 2);
    assert!(buf.history().is_empty());
}

#[test]
fn test_undo_delete_across_lines() {
    let mut buf = buffer("one\ntwo\nthree");
    buf.delete(2, 9);
    assert_eq!(buf.to_string(), "onhree");
    let cursor = buf.undo().unwrap();
    assert_eq!(buf.to_string(), "one\ntwo\nthree");
    assert_eq!((cursor.line, cursor.col), (2, 1));
    assert_consistent(&buf);
}

#[test]
fn test_undo_replace() {
    let mut buf = buffer("hello world");
    let cursor = buf.replace(b"there", 6, 11);
    assert_eq!(cursor.position, 11);
    assert_eq!(buf.to_string(), "hello there");

    buf.replace(b"", 0, 6);
    assert_eq!(buf.to_string(), "there");

    let cursor = buf.undo().unwrap();
    assert_eq!(buf.to_string(), "hello there");
    assert_eq!(cursor.position, 6);

    let cursor = buf.undo().unwrap();
    assert_eq!(buf.to_string(), "hello world");
    assert_eq!(cursor.position, 11);
}

#[test]
fn test_undo_on_empty_history_is_noop() {
    let mut buf = buffer("keep\nme");
    let before = buf.to_string();
    let revision = buf.revision();
    let cursor = buf.cursor_from_position(3);

    assert!(buf.undo().is_none());
    assert_eq!(buf.to_string(), before);
    assert_eq!(buf.revision(), revision);
    assert_eq!(buf.cursor_from_position(3), cursor);
}

#[test]
fn test_undo_sequence_returns_to_original() {
    let mut buf = buffer("The quick fox");
    buf.insert(4, b"very ");
    buf.delete(0, 4);
    buf.replace(b"slow", 5, 10);
    buf.insert(buf.len(), b"\njumps");

    while buf.undo().is_some() {}
    assert_eq!(buf.to_string(), "The quick fox");
    assert_consistent(&buf);
}

#[test]
fn test_history_limit_bounds_undo() {
    let options = BufferOptions {
        history_limit: 2,
        ..BufferOptions::default()
    };
    let mut buf = Buffer::from_bytes_with_options("t", b"abcd", &options);
    buf.delete(3, 4);
    buf.delete(2, 3);
    buf.delete(1, 2);
    assert_eq!(buf.history().len(), 2);

    while buf.undo().is_some() {}
    assert_eq!(buf.to_string(), "abc");
}

// =============================================================================
// Properties
// =============================================================================

mod properties {
    use super::*;
    use proptest::prelude::*;

    // Bytes with every terminator shape mixed in
    fn text_with_terminators(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
        prop::collection::vec(
            prop_oneof![
                4 => b'a'..=b'z',
                1 => Just(b' '),
                2 => Just(b'\n'),
                1 => Just(b'\r'),
            ],
            0..max_len,
        )
    }

    /// Offsets and lengths are reduced against the live length when applied
    #[derive(Debug, Clone)]
    enum Operation {
        Insert { offset: usize, text: Vec<u8> },
        Delete { offset: usize, bytes: usize },
        Replace { offset: usize, bytes: usize, text: Vec<u8> },
    }

    fn operation_strategy() -> impl Strategy<Value = Vec<Operation>> {
        prop::collection::vec(
            prop_oneof![
                (0usize..200, text_with_terminators(8))
                    .prop_map(|(offset, text)| Operation::Insert { offset, text }),
                (0usize..200, 1usize..20)
                    .prop_map(|(offset, bytes)| Operation::Delete { offset, bytes }),
                (0usize..200, 1usize..20, text_with_terminators(6)).prop_map(
                    |(offset, bytes, text)| Operation::Replace { offset, bytes, text }
                ),
            ],
            0..60,
        )
    }

    /// Clamp a non-empty region `[start, end)` into `0..len`
    fn region(len: usize, offset: usize, bytes: usize) -> Option<(usize, usize)> {
        if len == 0 {
            return None;
        }
        let start = offset % len;
        Some((start, start + bytes.min(len - start)))
    }

    fn small_gap_options() -> BufferOptions {
        BufferOptions {
            grow_amount: 3,
            ..BufferOptions::default()
        }
    }

    proptest! {
        #[test]
        fn prop_insert_then_delete_conserves_text(
            original in text_with_terminators(40),
            offset in 0usize..100,
            inserted in text_with_terminators(20)
        ) {
            let mut buf = Buffer::from_bytes_with_options("p", &original, &small_gap_options());
            let before = buf.to_bytes();
            let pos = offset % (buf.len() + 1);

            buf.insert_text(pos, &inserted);
            prop_assert_eq!(buf.len(), before.len() + inserted.len());
            assert_consistent(&buf);
            if !inserted.is_empty() {
                buf.delete_region(pos, pos + inserted.len());
            }
            prop_assert_eq!(buf.to_bytes(), before);
            assert_consistent(&buf);
        }

        #[test]
        fn prop_raw_edits_match_model(ops in operation_strategy()) {
            let mut buf = Buffer::with_options("p", &small_gap_options());
            let mut model: Vec<u8> = Vec::new();

            for op in ops {
                match op {
                    Operation::Insert { offset, text } => {
                        let pos = offset % (model.len() + 1);
                        buf.insert_text(pos, &text);
                        model.splice(pos..pos, text);
                    }
                    Operation::Delete { offset, bytes } => {
                        if let Some((start, end)) = region(model.len(), offset, bytes) {
                            buf.delete_region(start, end);
                            model.drain(start..end);
                        }
                    }
                    Operation::Replace { offset, bytes, text } => {
                        if let Some((start, end)) = region(model.len(), offset, bytes) {
                            buf.replace_region(&text, start, end);
                            model.splice(start..end, text);
                        }
                    }
                }
                prop_assert_eq!(buf.to_bytes(), model.clone());
                assert_consistent(&buf);
                for line in 0..buf.line_count() {
                    let pos = buf.position_from_line(line);
                    prop_assert_eq!(buf.cursor_from_position(pos).line, line);
                }
            }
        }

        #[test]
        fn prop_recorded_edits_undo_to_start(
            original in text_with_terminators(30),
            ops in operation_strategy()
        ) {
            let mut buf = Buffer::from_bytes_with_options("p", &original, &small_gap_options());
            let start_text = buf.to_bytes();

            for op in ops {
                let len = buf.len();
                match op {
                    Operation::Insert { offset, text } => {
                        buf.insert(offset % (len + 1), &text);
                    }
                    Operation::Delete { offset, bytes } => {
                        if let Some((start, end)) = region(len, offset, bytes) {
                            buf.delete(start, end);
                        }
                    }
                    Operation::Replace { offset, bytes, text } => {
                        if let Some((start, end)) = region(len, offset, bytes) {
                            buf.replace(&text, start, end);
                        }
                    }
                }
            }

            while buf.undo().is_some() {
                assert_consistent(&buf);
            }
            prop_assert!(buf.history().is_empty());
            prop_assert_eq!(buf.to_bytes(), start_text);
        }
    }
}

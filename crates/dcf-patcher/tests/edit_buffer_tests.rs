use super::*;

#[test]
fn test_untouched_buffer_renders_original() {
    let buffer = EditBuffer::new("a in b");
    assert!(!buffer.has_changes());
    assert_eq!(buffer.render(), "a in b");
}

#[test]
fn test_same_offset_inserts_accumulate_forward() {
    let mut buffer = EditBuffer::new("a");
    buffer.insert(0, "!").unwrap();
    buffer.insert(0, "b.includes(").unwrap();
    buffer.insert(1, ")").unwrap();
    assert_eq!(buffer.render(), "!b.includes(a)");
}

#[test]
fn test_identical_inserts_are_not_deduplicated() {
    let mut buffer = EditBuffer::new("x");
    buffer.insert(1, ")").unwrap();
    buffer.insert(1, ")").unwrap();
    assert_eq!(buffer.render(), "x))");
}

#[test]
fn test_remove_keeps_inserts_at_start_boundary() {
    let mut buffer = EditBuffer::new("a in b");
    buffer.insert(1, ", ").unwrap();
    buffer.remove(1, 5).unwrap();
    assert_eq!(buffer.render(), "a, b");
}

#[test]
fn test_remove_drops_earlier_inserts_inside_and_at_end() {
    let mut buffer = EditBuffer::new("a in (b or c)");
    // Edits a nested patcher made before its text was replaced wholesale.
    buffer.insert(8, "||").unwrap();
    buffer.insert(13, "!").unwrap();
    buffer.remove(1, 13).unwrap();
    assert_eq!(buffer.render(), "a");
}

#[test]
fn test_inserts_after_remove_survive() {
    let mut buffer = EditBuffer::new("a in b");
    buffer.remove(1, 5).unwrap();
    buffer.insert(5, "!").unwrap();
    buffer.insert(3, "?").unwrap();
    assert_eq!(buffer.render(), "a?!b");
}

#[test]
fn test_slice_includes_boundary_inserts() {
    let mut buffer = EditBuffer::new("x in (a or b)");
    buffer.remove(8, 10).unwrap();
    buffer.insert(8, "||").unwrap();
    buffer.insert(5, "<").unwrap();
    buffer.insert(13, ">").unwrap();
    assert_eq!(buffer.slice(5, 13).unwrap(), "<(a || b)>");
    assert_eq!(buffer.slice(0, 1).unwrap(), "x");
}

#[test]
fn test_overlapping_removals() {
    let mut buffer = EditBuffer::new("abcdef");
    buffer.remove(1, 4).unwrap();
    buffer.remove(2, 5).unwrap();
    assert_eq!(buffer.render(), "af");
}

#[test]
fn test_multibyte_text_is_kept_whole() {
    let mut buffer = EditBuffer::new("'é' in s");
    buffer.remove(4, 9).unwrap();
    buffer.insert(0, "s.includes(").unwrap();
    buffer.insert(4, ")").unwrap();
    assert_eq!(buffer.render(), "s.includes('é')");
}

#[test]
fn test_offset_errors() {
    let mut buffer = EditBuffer::new("é");
    assert_eq!(
        buffer.insert(5, "x"),
        Err(EditError::OffsetOutOfBounds { offset: 5, len: 2 })
    );
    assert_eq!(
        buffer.insert(1, "x"),
        Err(EditError::NotCharBoundary { offset: 1 })
    );
    assert_eq!(
        buffer.remove(2, 0),
        Err(EditError::InvertedRange { start: 2, end: 0 })
    );
    assert_eq!(buffer.render(), "é");
}

//! Component G: the textual pruner.
//!
//! A pure function of `(content, target_name)`. Every line that contains a
//! whole-word occurrence of `target_name` is kept verbatim; every other
//! line has each of its bytes replaced with a single ASCII space. Because
//! the replacement is one space byte per original byte, and original line
//! terminators are copied through untouched, every surviving byte offset
//! — and therefore every line/column position — is identical to the
//! unpruned source.
//!
//! Region granularity is the physical line, not the enclosing statement or
//! block: a full structural pruner would need a real parser, which this
//! workspace deliberately doesn't have (§1). A line is already enough
//! context for the batch compiler's deterministic scanning facility to
//! keep binding the name to `target_name`'s declaration.

use jls_core::LineIndex;

pub fn prune(content: &str, target_name: &str) -> String {
    let index = LineIndex::new(content);
    let line_count = index.line_count() as usize;
    let mut keep_lines = vec![false; line_count];

    for occurrence in jls_compiler::find_word_occurrences(content, target_name) {
        let line = index.line_col(occurrence.start()).line as usize;
        if let Some(slot) = keep_lines.get_mut(line) {
            *slot = true;
        }
    }

    let mut out = String::with_capacity(content.len());
    for (i, keep) in keep_lines.iter().enumerate() {
        let line = i as u32;
        let start = u32::from(index.line_start(line).expect("line within bounds")) as usize;
        let end = u32::from(index.line_end(line).expect("line within bounds")) as usize;
        let line_text = &content[start..end];

        if *keep {
            out.push_str(line_text);
        } else {
            out.extend(std::iter::repeat(' ').take(line_text.len()));
        }

        if let Some(next_start) = index.line_start(line + 1) {
            let next_start = u32::from(next_start) as usize;
            out.push_str(&content[end..next_start]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_lines_mentioning_the_target_and_blanks_the_rest() {
        let src = "class A {\n  int widget;\n  int other;\n}\n";
        let pruned = prune(src, "widget");
        assert!(pruned.contains("widget"));
        assert!(!pruned.contains("other"));
        assert_eq!(pruned.len(), src.len());
    }

    #[test]
    fn preserves_every_byte_offset() {
        let src = "package p;\n\nclass Foo {\n  void bar() { bar(); }\n}\n";
        let pruned = prune(src, "bar");
        assert_eq!(pruned.len(), src.len());
        let orig_index = LineIndex::new(src);
        let pruned_index = LineIndex::new(&pruned);
        assert_eq!(orig_index.line_count(), pruned_index.line_count());
        for line in 0..orig_index.line_count() {
            assert_eq!(orig_index.line_start(line), pruned_index.line_start(line));
            assert_eq!(orig_index.line_end(line), pruned_index.line_end(line));
        }
    }

    #[test]
    fn blanks_whole_file_when_name_is_absent() {
        let src = "class A {\n  int x;\n}\n";
        let pruned = prune(src, "nowhere");
        assert_eq!(pruned.len(), src.len());
        assert!(pruned.chars().all(|c| c == ' ' || c == '\n'));
    }

    #[test]
    fn preserves_crlf_terminators() {
        let src = "class A {\r\n  int widget;\r\n  int other;\r\n}\r\n";
        let pruned = prune(src, "widget");
        assert_eq!(pruned.len(), src.len());
        assert!(pruned.contains("\r\n"));
    }
}

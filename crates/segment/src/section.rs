use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Joins ancestor titles in [`Section::section_path`].
pub const SECTION_PATH_SEPARATOR: &str = " > ";

/// Title of the synthetic section used for heading-free text and preambles.
pub const DOCUMENT_TITLE: &str = "Document";

/// A titled, nested region of a policy document.
///
/// `start_offset..end_offset` is a byte range into the document text. It
/// starts at the heading line and covers every nested subsection, so a
/// child's range always lies inside its parent's. Use [`section_bodies`] for
/// the disjoint "own text" of each section.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Section {
    /// `section_<n>`, numbered from 1 in document order.
    pub section_id: String,
    /// Normalized heading text.
    pub title: String,
    /// 1 is outermost.
    pub level: u8,
    /// Ancestor titles and this title, joined with `" > "`.
    pub section_path: String,
    pub start_offset: usize,
    pub end_offset: usize,
}

impl Section {
    pub(crate) fn document(ordinal: usize, start_offset: usize, end_offset: usize) -> Self {
        Self {
            section_id: section_id(ordinal),
            title: DOCUMENT_TITLE.to_string(),
            level: 1,
            section_path: DOCUMENT_TITLE.to_string(),
            start_offset,
            end_offset,
        }
    }

    pub fn span(&self) -> Range<usize> {
        self.start_offset..self.end_offset
    }

    pub fn len(&self) -> usize {
        self.end_offset - self.start_offset
    }

    pub fn is_empty(&self) -> bool {
        self.start_offset == self.end_offset
    }

    /// True when `other` lies entirely inside this section.
    pub fn contains(&self, other: &Section) -> bool {
        self.start_offset <= other.start_offset && other.end_offset <= self.end_offset
    }

    /// Slice of `text` covered by this section, or `None` when the offsets
    /// do not belong to `text`.
    pub fn text<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.span())
    }
}

pub(crate) fn section_id(ordinal: usize) -> String {
    format!("section_{ordinal}")
}

/// Own-text range of every section, in order.
///
/// A section's body runs from its start to the earlier of its end and the
/// next section's start. For a tree built from `text` the bodies are
/// disjoint and together cover `0..text.len()`.
pub fn section_bodies(sections: &[Section]) -> Vec<Range<usize>> {
    sections
        .iter()
        .enumerate()
        .map(|(idx, section)| {
            let end = sections
                .get(idx + 1)
                .map_or(section.end_offset, |next| next.start_offset.min(section.end_offset));
            section.start_offset..end
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(n: usize, level: u8, start: usize, end: usize) -> Section {
        Section {
            section_id: section_id(n),
            title: format!("S{n}"),
            level,
            section_path: format!("S{n}"),
            start_offset: start,
            end_offset: end,
        }
    }

    #[test]
    fn bodies_stop_at_next_section() {
        let sections = vec![section(1, 1, 0, 30), section(2, 2, 14, 30)];
        assert_eq!(section_bodies(&sections), vec![0..14, 14..30]);
    }

    #[test]
    fn sibling_bodies_are_their_spans() {
        let sections = vec![section(1, 1, 0, 10), section(2, 1, 10, 25)];
        assert_eq!(section_bodies(&sections), vec![0..10, 10..25]);
    }

    #[test]
    fn containment_and_text() {
        let parent = section(1, 1, 0, 10);
        let child = section(2, 2, 4, 10);
        assert!(parent.contains(&child));
        assert!(!child.contains(&parent));
        assert_eq!(child.text("0123456789"), Some("456789"));
        assert_eq!(child.text("short"), None);
    }

    #[test]
    fn document_section_shape() {
        let doc = Section::document(1, 0, 0);
        assert_eq!(doc.section_id, "section_1");
        assert_eq!(doc.section_path, DOCUMENT_TITLE);
        assert!(doc.is_empty());
    }

    #[test]
    fn serializes_with_field_names() {
        let json = serde_json::to_value(section(3, 2, 1, 2)).unwrap();
        assert_eq!(json["section_id"], "section_3");
        assert_eq!(json["start_offset"], 1);
    }
}

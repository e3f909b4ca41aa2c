use quillpad_text::Cursor;

/// Style layers in ascending paint priority. The merge order is fixed:
/// current-line background below everything, then replacement marks and
/// live search matches, then the two externally owned selection layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StyleTag {
    CurrentLine,
    Replacement,
    SearchMatch,
    SelectionBlue,
    SelectionRed,
}

/// One rendering instruction for the display layer: paint `cursor`'s span
/// with `style`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decoration {
    pub cursor: Cursor,
    pub style: StyleTag,
}

impl Decoration {
    pub fn new(cursor: Cursor, style: StyleTag) -> Self {
        Self { cursor, style }
    }
}

/// Assembles the complete decoration list in priority order, ready to be
/// pushed to the display layer in one call.
pub fn merge_layers(
    current_line: Option<Cursor>,
    replacements: &[Cursor],
    matches: &[Cursor],
    blue: &[Cursor],
    red: &[Cursor],
) -> Vec<Decoration> {
    let mut decorations = Vec::with_capacity(
        usize::from(current_line.is_some())
            + replacements.len()
            + matches.len()
            + blue.len()
            + red.len(),
    );
    if let Some(cursor) = current_line {
        decorations.push(Decoration::new(cursor, StyleTag::CurrentLine));
    }
    decorations.extend(
        replacements
            .iter()
            .map(|cursor| Decoration::new(*cursor, StyleTag::Replacement)),
    );
    decorations.extend(
        matches
            .iter()
            .map(|cursor| Decoration::new(*cursor, StyleTag::SearchMatch)),
    );
    decorations.extend(
        blue.iter()
            .map(|cursor| Decoration::new(*cursor, StyleTag::SelectionBlue)),
    );
    decorations.extend(
        red.iter()
            .map(|cursor| Decoration::new(*cursor, StyleTag::SelectionRed)),
    );
    decorations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layers_keep_their_priority_order() {
        let merged = merge_layers(
            Some(Cursor::spanning(0, 10)),
            &[Cursor::spanning(1, 2)],
            &[Cursor::spanning(3, 4), Cursor::spanning(5, 6)],
            &[Cursor::spanning(7, 8)],
            &[Cursor::spanning(9, 10)],
        );
        let styles: Vec<_> = merged.iter().map(|d| d.style).collect();
        assert_eq!(
            styles,
            vec![
                StyleTag::CurrentLine,
                StyleTag::Replacement,
                StyleTag::SearchMatch,
                StyleTag::SearchMatch,
                StyleTag::SelectionBlue,
                StyleTag::SelectionRed,
            ]
        );
    }

    #[test]
    fn absent_layers_produce_no_entries() {
        assert!(merge_layers(None, &[], &[], &[], &[]).is_empty());
    }
}

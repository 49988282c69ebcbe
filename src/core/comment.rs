use anyhow::Result;
use ton_types::{BuilderData, Cell, IBitstring};
use tonpay_utils::store_string_tail;

/// Tag which marks a message body as a plain text comment
pub const COMMENT_TAG: u32 = 0;

/// Immutable comment cell together with its source text
#[derive(Clone, Debug)]
pub struct Comment {
    text: String,
    cell: Cell,
}

impl Comment {
    pub fn new(text: &str) -> Result<Self> {
        let mut builder = BuilderData::new();
        builder.append_u32(COMMENT_TAG)?;
        store_string_tail(&mut builder, text.as_bytes())?;

        Ok(Self {
            text: text.to_owned(),
            cell: builder.into_cell()?,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cell(&self) -> &Cell {
        &self.cell
    }
}

#[cfg(test)]
mod tests {
    use ton_types::SliceData;

    use super::*;
    use crate::core::parsing::parse_comment_payload;
    use crate::models::DEFAULT_COMMENT;

    #[test]
    fn default_comment_fits_one_cell() {
        let comment = Comment::new(DEFAULT_COMMENT).unwrap();
        let cell = comment.cell();

        assert_eq!(cell.references_count(), 0);
        assert_eq!(cell.bit_length(), 32 + DEFAULT_COMMENT.len() * 8);

        let mut slice = SliceData::load_cell_ref(cell).unwrap();
        assert_eq!(slice.get_next_u32().unwrap(), COMMENT_TAG);
        assert_eq!(
            slice.get_next_bytes(DEFAULT_COMMENT.len()).unwrap(),
            DEFAULT_COMMENT.as_bytes()
        );
    }

    #[test]
    fn long_comment_roundtrip() {
        let text = "Длинный комментарий ".repeat(20);
        let comment = Comment::new(&text).unwrap();
        assert_eq!(comment.text(), text);

        assert_eq!(comment.cell().references_count(), 1);
        assert_eq!(parse_comment_payload(comment.cell()).as_deref(), Some(text.as_str()));
    }

    #[test]
    fn empty_comment() {
        let comment = Comment::new("").unwrap();
        assert_eq!(comment.cell().bit_length(), 32);
        assert_eq!(parse_comment_payload(comment.cell()).as_deref(), Some(""));
    }
}

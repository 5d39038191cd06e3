//! Turns an ordered list of cards into front/back sheet grids for
//! duplex printing. Pure data in, pure data out; rendering lives in
//! `print::pdf`.

use crate::core::{
    KarteiError,
    Orientation,
};

pub const VALID_CARDS_PER_PAGE: [u32; 6] = [2, 4, 6, 8, 10, 12];

/// One selected card scheduled for printing.
#[derive(Debug, Clone, PartialEq)]
pub struct PrintCard {
    pub lesson: String,
    pub front: String,
    pub back: String,
    pub copies: u32,
}

/// One physical card after copy expansion.
#[derive(Debug, Clone, PartialEq)]
pub struct CardFace {
    pub lesson: String,
    pub front: String,
    pub back: String,
}

/// Text destined for one slot of a sheet. The heading is the lesson
/// label and is only populated on front sheets.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotText {
    pub heading: String,
    pub body: String,
}

/// A rows-by-cols sheet. Slots are row-major; `None` is a blank pad
/// slot on a partial final sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetGrid {
    pub rows: usize,
    pub cols: usize,
    slots: Vec<Option<SlotText>>,
}

impl SheetGrid {
    fn blank(rows: usize, cols: usize) -> Self {
        SheetGrid { rows, cols, slots: vec![None; rows * cols] }
    }

    fn set(&mut self, row: usize, col: usize, text: SlotText) {
        self.slots[row * self.cols + col] = Some(text);
    }

    pub fn slot(&self, row: usize, col: usize) -> Option<&SlotText> {
        self.slots.get(row * self.cols + col).and_then(|slot| slot.as_ref())
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

/// A front sheet and the back sheet that prints behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetPair {
    pub front: SheetGrid,
    pub back: SheetGrid,
}

/// Grid dimensions (rows, cols) for one sheet. Portrait sheets run two
/// columns and `cards_per_page / 2` rows; landscape sheets transpose
/// that. Odd or out-of-range values are configuration errors.
pub fn grid_dimensions(
    cards_per_page: u32,
    orientation: Orientation,
) -> Result<(usize, usize), KarteiError> {
    if !VALID_CARDS_PER_PAGE.contains(&cards_per_page) {
        return Err(KarteiError::InvalidCardsPerPage(cards_per_page));
    }
    let half = (cards_per_page / 2) as usize;
    Ok(match orientation {
        Orientation::Portrait => (half, 2),
        Orientation::Landscape => (2, half),
    })
}

/// Back-sheet position that ends up behind the given front slot once
/// the sheet comes out of a duplex printer.
///
/// Portrait pages flip on the long edge, which swaps left and right:
/// the column index mirrors, rows stay put. Landscape pages flip on
/// the short edge, which swaps top and bottom: the row index mirrors,
/// columns stay put. Picking the wrong axis misaligns every card on
/// the sheet, so this rule is kept in one place.
pub fn mirrored_slot(
    row: usize,
    col: usize,
    rows: usize,
    cols: usize,
    orientation: Orientation,
) -> (usize, usize) {
    match orientation {
        Orientation::Portrait => (row, cols - 1 - col),
        Orientation::Landscape => (rows - 1 - row, col),
    }
}

/// Repeats each card `copies` times, preserving order. Zero copies
/// contributes nothing.
pub fn expand_copies(cards: &[PrintCard]) -> Vec<CardFace> {
    let mut faces = Vec::new();
    for card in cards {
        for _ in 0..card.copies {
            faces.push(CardFace {
                lesson: card.lesson.clone(),
                front: card.front.clone(),
                back: card.back.clone(),
            });
        }
    }
    faces
}

/// Lays the cards out as consecutive sheet pairs.
///
/// The expanded sequence fills front sheets row-major in groups of
/// `cards_per_page`; the final group keeps its blank slots so page
/// geometry never changes. Each back sheet places its text at the
/// mirrored slot of the matching front entry. An empty card list (or
/// all-zero copies) yields an empty plan, not an error.
pub fn paginate(
    cards: &[PrintCard],
    cards_per_page: u32,
    orientation: Orientation,
) -> Result<Vec<SheetPair>, KarteiError> {
    let (rows, cols) = grid_dimensions(cards_per_page, orientation)?;
    let per_page = rows * cols;

    let faces = expand_copies(cards);
    let mut pairs = Vec::new();

    for group in faces.chunks(per_page) {
        let mut front = SheetGrid::blank(rows, cols);
        let mut back = SheetGrid::blank(rows, cols);

        for (position, face) in group.iter().enumerate() {
            let row = position / cols;
            let col = position % cols;
            front.set(
                row,
                col,
                SlotText { heading: face.lesson.clone(), body: face.front.clone() },
            );

            let (back_row, back_col) = mirrored_slot(row, col, rows, cols, orientation);
            back.set(
                back_row,
                back_col,
                SlotText { heading: String::new(), body: face.back.clone() },
            );
        }

        pairs.push(SheetPair { front, back });
    }

    Ok(pairs)
}

//! Glyph and colour types for terminal rendering.
//!
//! A [`Glyph`] is what one terminal character cell shows: a character from the
//! IBM PC (CP437) set plus foreground and background colours. Game logic never
//! sees these; they exist only between the renderer and the terminal driver.

use crate::types::{PieceKind, Tile, CELLS_PER_TILE};

/// CP437 medium shade, used for the well walls
pub const G_CHECKER: u8 = 0xb1;
pub const G_VLINE: u8 = 0xb3;
pub const G_R_TEE: u8 = 0xb4;
pub const G_UR_CORNER: u8 = 0xbf;
pub const G_LL_CORNER: u8 = 0xc0;
pub const G_B_TEE: u8 = 0xc1;
pub const G_T_TEE: u8 = 0xc2;
pub const G_L_TEE: u8 = 0xc3;
pub const G_HLINE: u8 = 0xc4;
pub const G_CROSS: u8 = 0xc5;
pub const G_LR_CORNER: u8 = 0xd9;
pub const G_UL_CORNER: u8 = 0xda;

/// The eight standard terminal colours, in PC attribute order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Yellow = 6,
    White = 7,
}

impl Color {
    /// Colour from the low three bits of `index`
    pub fn from_index(index: u8) -> Self {
        match index & 7 {
            0 => Color::Black,
            1 => Color::Blue,
            2 => Color::Green,
            3 => Color::Cyan,
            4 => Color::Red,
            5 => Color::Magenta,
            6 => Color::Yellow,
            _ => Color::White,
        }
    }
}

/// One character cell: character code plus colours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Glyph {
    pub code: u8,
    pub fg: Color,
    pub bg: Color,
}

impl Glyph {
    pub const fn new(code: u8, fg: Color, bg: Color) -> Self {
        Self { code, fg, bg }
    }

    /// Packed attribute byte: foreground in the high nibble, background in the low
    pub fn attribute(&self) -> u8 {
        ((self.fg as u8) << 4) | self.bg as u8
    }

    /// Split a packed attribute byte into `(fg, bg)`
    pub fn split_attribute(attribute: u8) -> (Color, Color) {
        (Color::from_index(attribute >> 4), Color::from_index(attribute & 0xf))
    }
}

const fn solid(color: Color) -> [Glyph; CELLS_PER_TILE] {
    [Glyph::new(b' ', color, color), Glyph::new(b' ', color, color)]
}

/// Glyph pair a tile is drawn with
pub fn tile_glyphs(tile: Tile) -> [Glyph; CELLS_PER_TILE] {
    match tile {
        Tile::Black => solid(Color::Black),
        Tile::Playfield => solid(Color::White),
        Tile::Separator => [
            Glyph::new(G_CHECKER, Color::White, Color::Black),
            Glyph::new(G_CHECKER, Color::White, Color::Black),
        ],
        Tile::Piece(kind) => piece_glyphs(kind),
    }
}

fn piece_glyphs(kind: PieceKind) -> [Glyph; CELLS_PER_TILE] {
    match kind {
        PieceKind::I => solid(Color::Cyan),
        PieceKind::O => solid(Color::Blue),
        PieceKind::J => solid(Color::Green),
        PieceKind::L => solid(Color::Yellow),
        PieceKind::S => solid(Color::Magenta),
        // Dark block so T stays distinct from Z
        PieceKind::T => [
            Glyph::new(b' ', Color::Red, Color::Black),
            Glyph::new(b' ', Color::Red, Color::Black),
        ],
        PieceKind::Z => solid(Color::Red),
    }
}

/// Unicode equivalent of a CP437 character code
///
/// Covers printable ASCII, the shade blocks and the single-line box-drawing
/// set; anything else renders as `?`.
pub fn cp437_to_char(code: u8) -> char {
    match code {
        0x20..=0x7e => code as char,
        0x04 => '♦',
        0xb0 => '░',
        G_CHECKER => '▒',
        0xb2 => '▓',
        G_VLINE => '│',
        G_R_TEE => '┤',
        G_UR_CORNER => '┐',
        G_LL_CORNER => '└',
        G_B_TEE => '┴',
        G_T_TEE => '┬',
        G_L_TEE => '├',
        G_HLINE => '─',
        G_CROSS => '┼',
        G_LR_CORNER => '┘',
        G_UL_CORNER => '┌',
        0xdb => '█',
        0xf8 => '°',
        _ => '?',
    }
}

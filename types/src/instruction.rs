//! Device-bound motion instructions and the immutable stream that carries them.

use std::fmt;

use crate::geometry::{Point, format_decimal};

/// Marks a protocol comment line.
pub const COMMENT_MARKER: char = ';';

/// How a move renders its coordinates on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    /// Whole units, `G1 X27 Y300`. Used for grid strokes.
    Whole,
    /// Two decimals, `G1 X37.00 Y294.00`. Used for glyph strokes.
    Hundredths,
}

/// One line of the device motion protocol.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// Raise the pen to the given actuator value.
    PenUp(f64),
    /// Lower the pen to the given actuator value.
    PenDown(f64),
    MoveTo { to: Point, precision: Precision },
    /// Pause for mechanical settling.
    Dwell(f64),
    /// Literal template text, sent verbatim.
    Raw(String),
}

impl Instruction {
    #[must_use]
    pub fn move_to(to: Point, precision: Precision) -> Self {
        Self::MoveTo { to, precision }
    }

    #[must_use]
    pub fn is_pen_change(&self) -> bool {
        matches!(self, Self::PenUp(_) | Self::PenDown(_))
    }

    /// The device never sees blank or comment lines.
    #[must_use]
    pub fn is_protocol_noop(&self) -> bool {
        match self {
            Self::Raw(text) => is_noop_line(text),
            _ => false,
        }
    }

    /// The wire text, without line terminator.
    #[must_use]
    pub fn text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PenUp(value) | Self::PenDown(value) => {
                write!(f, "M106 S{}", format_decimal(*value))
            }
            Self::MoveTo {
                to,
                precision: Precision::Whole,
            } => write!(f, "G1 X{:.0} Y{:.0}", to.x, to.y),
            Self::MoveTo {
                to,
                precision: Precision::Hundredths,
            } => write!(f, "G1 X{:.2} Y{:.2}", to.x, to.y),
            Self::Dwell(duration) => write!(f, "G4 P{}", format_decimal(*duration)),
            Self::Raw(text) => f.write_str(text),
        }
    }
}

/// True for lines the protocol treats as no-ops: blank, or a `;` comment.
#[must_use]
pub fn is_noop_line(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with(COMMENT_MARKER)
}

/// Ordered, immutable instruction sequence. Built once per run; consumers
/// only read it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstructionStream {
    instructions: Vec<Instruction>,
}

impl InstructionStream {
    #[must_use]
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    /// Template text, one `Raw` instruction per line.
    #[must_use]
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        lines
            .into_iter()
            .map(|line| Instruction::Raw(line.into()))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    /// Wire text of every instruction, in order.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.instructions.iter().map(Instruction::text)
    }

    /// Index of the first pen change not immediately followed by a dwell.
    #[must_use]
    pub fn first_unsettled_pen_change(&self) -> Option<usize> {
        self.instructions
            .iter()
            .enumerate()
            .filter(|(_, instruction)| instruction.is_pen_change())
            .find(|(i, _)| !matches!(self.instructions.get(i + 1), Some(Instruction::Dwell(_))))
            .map(|(i, _)| i)
    }

    /// Every move target, in order.
    pub fn move_targets(&self) -> impl Iterator<Item = Point> + '_ {
        self.instructions.iter().filter_map(|instruction| match instruction {
            Instruction::MoveTo { to, .. } => Some(*to),
            _ => None,
        })
    }
}

impl FromIterator<Instruction> for InstructionStream {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
        Self {
            instructions: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for InstructionStream {
    type Item = Instruction;
    type IntoIter = std::vec::IntoIter<Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.into_iter()
    }
}

impl<'a> IntoIterator for &'a InstructionStream {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}

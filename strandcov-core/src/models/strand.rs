use std::fmt::{self, Display};

/// Genomic strand of a coverage track.
#[derive(Eq, PartialEq, Hash, Debug, Clone, Copy, PartialOrd, Ord)]
pub enum Strand {
    Plus,
    Minus,
}

impl Strand {
    pub const BOTH: [Strand; 2] = [Strand::Plus, Strand::Minus];

    pub fn symbol(&self) -> &'static str {
        match self {
            Strand::Plus => "+",
            Strand::Minus => "-",
        }
    }
}

impl Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

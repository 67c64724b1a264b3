use std::fmt::{self, Display};
use std::io::{self, Write};

///
/// Score column of a feature record.
///
/// Numeric scores are always rendered with two decimals.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Score<'a> {
    Text(&'a str),
    Value(f64),
}

impl Display for Score<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Text(text) => write!(f, "{}", text),
            Score::Value(value) => write!(f, "{:.2}", value),
        }
    }
}

///
/// One line of the tab separated, 9 column feature format:
///
/// `seqid  source  feature  start  end  score  strand  frame  attribute`
///
/// There is no header line and every record is newline terminated when written.
///
#[derive(Debug, Clone, PartialEq)]
pub struct GffRecord<'a> {
    pub seqid: &'a str,
    pub source: &'a str,
    pub feature: &'a str,
    pub start: u64,
    pub end: u64,
    pub score: Score<'a>,
    pub strand: &'a str,
    pub frame: &'a str,
    pub attribute: &'a str,
}

impl GffRecord<'_> {
    ///
    /// Write the record as one newline terminated line
    ///
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer, "{}", self)
    }
}

impl Display for GffRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.seqid,
            self.source,
            self.feature,
            self.start,
            self.end,
            self.score,
            self.strand,
            self.frame,
            self.attribute
        )
    }
}

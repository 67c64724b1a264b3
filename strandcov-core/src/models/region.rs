use std::fmt::{self, Display};

use crate::consts::DELIMITER;

///
/// Region struct, representation of one row of a BED-like region list
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct Region {
    pub chr: String,
    pub start: u32,
    pub end: u32,

    pub rest: Option<String>,
}

impl Region {
    ///
    /// Parse a tab separated BED-like line into a region.
    ///
    /// Anything after the third column is kept verbatim in `rest`.
    ///
    pub fn from_bed_line(line: &str) -> Result<Region, String> {
        let mut fields = line.splitn(4, DELIMITER);

        let chr = fields
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| "missing chromosome column".to_string())?;
        let start = fields
            .next()
            .ok_or_else(|| "missing start column".to_string())?;
        let end = fields
            .next()
            .ok_or_else(|| "missing end column".to_string())?;

        let start = start
            .trim()
            .parse::<u32>()
            .map_err(|e| format!("cannot parse start '{}': {}", start, e))?;
        let end = end
            .trim()
            .parse::<u32>()
            .map_err(|e| format!("cannot parse end '{}': {}", end, e))?;

        let rest = fields.next().map(|s| s.to_string()).filter(|s| !s.is_empty());

        Ok(Region {
            chr: chr.to_string(),
            start,
            end,
            rest,
        })
    }

    ///
    /// Get the extra columns beyond chr, start and end
    ///
    pub fn rest_fields(&self) -> impl Iterator<Item = &str> {
        self.rest.as_deref().into_iter().flat_map(|s| s.split(DELIMITER))
    }

    ///
    /// Get file string of Region
    ///
    pub fn as_string(&self) -> String {
        format!(
            "{}\t{}\t{}{}",
            self.chr,
            self.start,
            self.end,
            self.rest
                .as_deref()
                .map_or(String::new(), |s| format!("\t{}", s)),
        )
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

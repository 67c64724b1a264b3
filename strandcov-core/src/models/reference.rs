use log::warn;

///
/// A reference sequence as announced by the header of an alignment source.
///
/// `declared_length` is `None` when the source carries no length for it.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct ReferenceSequence {
    pub name: String,
    pub declared_length: Option<usize>,
}

impl ReferenceSequence {
    pub fn new(name: impl Into<String>, declared_length: Option<usize>) -> Self {
        ReferenceSequence {
            name: name.into(),
            declared_length,
        }
    }

    ///
    /// Number of addressable positions for this reference's coverage arrays.
    ///
    /// A declared length `n` yields `n + 1` slots so that half-open ends up to `n` stay
    /// addressable. Otherwise `fallback` is used as is and must exceed every coordinate on
    /// the reference.
    ///
    pub fn track_length(&self, fallback: usize) -> usize {
        if let Some(length) = self.declared_length {
            return length + 1;
        }

        warn!(
            "No length known for reference {}, falling back to {}",
            self.name, fallback
        );
        fallback
    }
}

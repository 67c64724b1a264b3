use crate::accumulator::CoverageTrack;

///
/// Maps accumulated strands onto the strands reported downstream.
///
/// Libraries whose reads come off the opposite strand of the transcript (dUTP RNA-seq,
/// for example) are reported with `flip` set. ChIP-exo and similar are not.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrandPolicy {
    pub flip: bool,
}

impl StrandPolicy {
    pub fn new(flip: bool) -> Self {
        StrandPolicy { flip }
    }

    /// Relabel a finished track. Counts are never touched.
    pub fn apply(&self, mut track: CoverageTrack) -> CoverageTrack {
        if self.flip {
            track.swap_strands();
        }
        track
    }
}

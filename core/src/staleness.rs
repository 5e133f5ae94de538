use std::fmt;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

/// Why a cached index cannot be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaleReason {
    IndexMissing,
    SourceMissing,
    /// Source modified at or after the index.
    SourceNewer,
    /// The index looked fresh but could not be read back.
    IndexUnreadable,
    /// Rebuild requested by the caller.
    Forced,
}

impl fmt::Display for StaleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StaleReason::IndexMissing => "index artifact not found",
            StaleReason::SourceMissing => "source artifact not found",
            StaleReason::SourceNewer => "source artifact is newer than the index",
            StaleReason::IndexUnreadable => "index artifact could not be read",
            StaleReason::Forced => "rebuild forced",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Fresh,
    Stale(StaleReason),
}

impl Freshness {
    pub fn is_fresh(&self) -> bool {
        matches!(self, Freshness::Fresh)
    }
}

/// Modification times of both artifacts; `None` when the file is absent or its
/// mtime unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtifactTimes {
    pub source: Option<SystemTime>,
    pub index: Option<SystemTime>,
}

impl ArtifactTimes {
    pub fn read(source: &Path, index: &Path) -> Self {
        Self { source: modified(source), index: modified(index) }
    }

    /// The index is fresh only when strictly newer than the source.
    pub fn freshness(&self) -> Freshness {
        match (self.source, self.index) {
            (_, None) => Freshness::Stale(StaleReason::IndexMissing),
            (None, Some(_)) => Freshness::Stale(StaleReason::SourceMissing),
            (Some(source), Some(index)) if index > source => Freshness::Fresh,
            (Some(_), Some(_)) => Freshness::Stale(StaleReason::SourceNewer),
        }
    }
}

pub fn check(source: &Path, index: &Path) -> Freshness {
    ArtifactTimes::read(source, index).freshness()
}

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn times(source: Option<u64>, index: Option<u64>) -> ArtifactTimes {
        let at = |secs| SystemTime::UNIX_EPOCH + Duration::from_secs(secs);
        ArtifactTimes { source: source.map(at), index: index.map(at) }
    }

    #[test]
    fn decides_from_timestamps() {
        assert_eq!(times(Some(10), Some(20)).freshness(), Freshness::Fresh);
        assert_eq!(times(Some(20), Some(10)).freshness(), Freshness::Stale(StaleReason::SourceNewer));
        assert_eq!(times(Some(10), Some(10)).freshness(), Freshness::Stale(StaleReason::SourceNewer));
        assert_eq!(times(Some(10), None).freshness(), Freshness::Stale(StaleReason::IndexMissing));
        assert_eq!(times(None, None).freshness(), Freshness::Stale(StaleReason::IndexMissing));
        assert_eq!(times(None, Some(10)).freshness(), Freshness::Stale(StaleReason::SourceMissing));
    }

    #[test]
    fn absent_files_have_no_times() {
        let dir = tempfile::tempdir().unwrap();
        let t = ArtifactTimes::read(&dir.path().join("a.json"), &dir.path().join("b.json"));
        assert_eq!(t, ArtifactTimes { source: None, index: None });
    }
}

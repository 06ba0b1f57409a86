use crate::config::MarkersConfig;

/// Breaking/feature flags accumulated from commit messages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReleaseSignal {
    pub breaking: bool,
    pub feature: bool,
}

impl ReleaseSignal {
    pub fn new(breaking: bool, feature: bool) -> Self {
        ReleaseSignal { breaking, feature }
    }

    /// Scan the first line of a commit message for the configured markers
    pub fn scan(message: &str, markers: &MarkersConfig) -> Self {
        let first_line = message.lines().next().unwrap_or("");

        ReleaseSignal {
            breaking: contains_marker(first_line, &markers.breaking),
            feature: contains_marker(first_line, &markers.feature),
        }
    }

    /// OR another signal into this one; flags never reset once set
    pub fn absorb(&mut self, other: ReleaseSignal) {
        self.breaking |= other.breaking;
        self.feature |= other.feature;
    }
}

// An empty marker would match every line.
fn contains_marker(line: &str, marker: &str) -> bool {
    !marker.is_empty() && line.contains(marker)
}

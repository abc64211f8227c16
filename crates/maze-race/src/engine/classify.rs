//! Maps free-text engine output to a tagged outcome.
//!
//! The engine has no structured status channel, so a handful of known
//! substrings decide whether an otherwise clean invocation is a warning or a
//! failure. The substrings live in [`Sentinel`] tables so they can be swapped
//! without touching callers.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    ErrorStream,
    SpawnFailed,
    NoMazeLoaded,
    NoPath,
    EngineError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Success,
    Warning(Reason),
    Failure(Reason),
}

impl Classification {
    pub fn is_success(self) -> bool {
        matches!(self, Classification::Success)
    }

    pub fn is_failure(self) -> bool {
        matches!(self, Classification::Failure(_))
    }

    pub fn reason(self) -> Option<Reason> {
        match self {
            Classification::Success => None,
            Classification::Warning(reason) | Classification::Failure(reason) => Some(reason),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Failure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentinel {
    pub needle: &'static str,
    pub severity: Severity,
    pub reason: Reason,
}

impl Sentinel {
    const fn new(needle: &'static str, severity: Severity, reason: Reason) -> Self {
        Self {
            needle,
            severity,
            reason,
        }
    }

    fn classification(&self) -> Classification {
        match self.severity {
            Severity::Warning => Classification::Warning(self.reason),
            Severity::Failure => Classification::Failure(self.reason),
        }
    }
}

/// Sentinels applied to every invocation. Order matters: first match wins.
pub const ENGINE_SENTINELS: &[Sentinel] = &[
    Sentinel::new("No maze loaded", Severity::Failure, Reason::NoMazeLoaded),
    Sentinel::new("ERROR: No path found", Severity::Warning, Reason::NoPath),
    Sentinel::new("No path found", Severity::Warning, Reason::NoPath),
];

/// Stricter table used when confirming a `load`.
pub const LOAD_SENTINELS: &[Sentinel] = &[
    Sentinel::new("No maze loaded", Severity::Failure, Reason::NoMazeLoaded),
    Sentinel::new("Error", Severity::Failure, Reason::EngineError),
];

#[derive(Debug, Clone, Copy)]
pub struct Classifier {
    sentinels: &'static [Sentinel],
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(ENGINE_SENTINELS)
    }
}

impl Classifier {
    pub const fn new(sentinels: &'static [Sentinel]) -> Self {
        Self { sentinels }
    }

    pub fn classify(&self, stdout: &str, stderr: &str) -> Classification {
        if !stderr.is_empty() {
            return Classification::Failure(Reason::ErrorStream);
        }
        self.sentinels
            .iter()
            .find(|sentinel| stdout.contains(sentinel.needle))
            .map(Sentinel::classification)
            .unwrap_or(Classification::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stderr_overrides_any_stdout() {
        let classifier = Classifier::default();
        assert_eq!(
            classifier.classify("Maze generated", "boom"),
            Classification::Failure(Reason::ErrorStream)
        );
        assert_eq!(
            classifier.classify("No path found!", "boom"),
            Classification::Failure(Reason::ErrorStream)
        );
    }

    #[test]
    fn sentinels_reclassify_clean_output() {
        let classifier = Classifier::default();
        assert_eq!(
            classifier.classify("No maze loaded.\n", ""),
            Classification::Failure(Reason::NoMazeLoaded)
        );
        assert_eq!(
            classifier.classify("ERROR: No path found between S and E", ""),
            Classification::Warning(Reason::NoPath)
        );
        assert_eq!(
            classifier.classify("Searching...\nNo path found!", ""),
            Classification::Warning(Reason::NoPath)
        );
        assert_eq!(
            classifier.classify("Path length: 42", ""),
            Classification::Success
        );
    }

    #[test]
    fn load_table_rejects_error_text() {
        let classifier = Classifier::new(LOAD_SENTINELS);
        assert_eq!(
            classifier.classify("Error reading maze.txt", ""),
            Classification::Failure(Reason::EngineError)
        );
        assert!(classifier.classify("Maze 20x20 loaded", "").is_success());
    }

    #[test]
    fn empty_output_is_structurally_successful() {
        assert!(Classifier::default().classify("", "").is_success());
    }
}

use super::{
    Classifier, CommandResult, CommandRunner, EngineBridge, EngineCommand, LOAD_SENTINELS,
};

/// Read-only questions asked of the engine. A probe only answers `true`
/// when the engine positively confirms; empty replies count as "unknown".
pub struct StateProbe<'a, R: CommandRunner> {
    bridge: &'a EngineBridge<R>,
}

impl<'a, R: CommandRunner> StateProbe<'a, R> {
    pub fn new(bridge: &'a EngineBridge<R>) -> Self {
        Self { bridge }
    }

    pub fn probe_maze_loaded(&self) -> bool {
        confirmed(&self.bridge.invoke(&EngineCommand::current()))
    }

    pub fn probe_path_exists(&self) -> bool {
        confirmed(&self.bridge.invoke(&EngineCommand::find()))
    }

    pub fn probe_race_state(&self) -> Option<String> {
        let result = self.bridge.invoke(&EngineCommand::race_state());
        confirmed(&result).then(|| result.stdout.trim_end().to_string())
    }

    /// `current` checked against the stricter load table.
    pub fn verify_load(&self) -> bool {
        let result = self
            .bridge
            .invoke_with(&EngineCommand::current(), Classifier::new(LOAD_SENTINELS));
        confirmed(&result)
    }
}

fn confirmed(result: &CommandResult) -> bool {
    result.is_success() && result.has_output()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::{bridge, StubRunner};

    #[test]
    fn maze_loaded_requires_positive_reply() {
        let dir = tempfile::tempdir().expect("tempdir");
        let loaded = bridge(
            StubRunner::new().reply("current", "Maze 20x20, start (0,0)"),
            dir.path(),
        );
        assert!(StateProbe::new(&loaded).probe_maze_loaded());

        let missing = bridge(
            StubRunner::new().reply("current", "No maze loaded"),
            dir.path(),
        );
        assert!(!StateProbe::new(&missing).probe_maze_loaded());

        let silent = bridge(StubRunner::new().reply("current", "  \n"), dir.path());
        assert!(!StateProbe::new(&silent).probe_maze_loaded());
    }

    #[test]
    fn path_probe_rejects_both_no_path_spellings() {
        let dir = tempfile::tempdir().expect("tempdir");
        for reply in ["No path found!", "ERROR: No path found"] {
            let b = bridge(StubRunner::new().reply("find", reply), dir.path());
            assert!(!StateProbe::new(&b).probe_path_exists(), "{reply}");
        }
        let b = bridge(StubRunner::new().reply("find", "Path length: 37"), dir.path());
        assert!(StateProbe::new(&b).probe_path_exists());
    }

    #[test]
    fn race_state_is_none_when_engine_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let b = bridge(StubRunner::failing_spawn(), dir.path());
        assert_eq!(StateProbe::new(&b).probe_race_state(), None);

        let b = bridge(StubRunner::new().reply("race_state", "#S..\n#..E\n"), dir.path());
        assert_eq!(
            StateProbe::new(&b).probe_race_state().as_deref(),
            Some("#S..\n#..E")
        );
    }

    #[test]
    fn verify_load_rejects_error_text() {
        let dir = tempfile::tempdir().expect("tempdir");
        let b = bridge(
            StubRunner::new().reply("current", "Error: bad header"),
            dir.path(),
        );
        assert!(!StateProbe::new(&b).verify_load());
        assert!(StateProbe::new(&b).probe_maze_loaded());
    }
}

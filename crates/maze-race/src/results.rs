use crate::input::InputSource;
use crate::markers::EngineState;
use crate::present::Presenter;
use std::io;

/// Read-only view of the engine's results log. The text is shown exactly as
/// the engine wrote it.
pub struct ResultsViewer<'a, S: EngineState + ?Sized> {
    state: &'a S,
}

impl<'a, S: EngineState + ?Sized> ResultsViewer<'a, S> {
    pub fn new(state: &'a S) -> Self {
        Self { state }
    }

    pub fn show(
        &self,
        presenter: &mut dyn Presenter,
        input: &mut dyn InputSource,
    ) -> io::Result<()> {
        let log = self.state.read_results_log();
        presenter.show_results(log.as_deref())?;
        input.wait_key()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::testing::{ch, ScriptedInput};
    use crate::markers::{MarkerFiles, RESULTS_LOG};
    use crate::present::testing::{RecordingPresenter, Shown};

    #[test]
    fn absent_log_shows_empty_results() {
        let dir = tempfile::tempdir().expect("tempdir");
        let markers = MarkerFiles::new(dir.path());
        let mut presenter = RecordingPresenter::default();
        let mut input = ScriptedInput::new([ch('x')]);

        ResultsViewer::new(&markers)
            .show(&mut presenter, &mut input)
            .expect("show");

        assert_eq!(presenter.shown, vec![Shown::Results(None)]);
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn log_text_is_passed_through_untouched() {
        let dir = tempfile::tempdir().expect("tempdir");
        let text = "[gold1]Best: 31 moves[/]\n";
        std::fs::write(dir.path().join(RESULTS_LOG), text).expect("write");
        let markers = MarkerFiles::new(dir.path());
        let mut presenter = RecordingPresenter::default();
        let mut input = ScriptedInput::new([ch(' ')]);

        ResultsViewer::new(&markers)
            .show(&mut presenter, &mut input)
            .expect("show");

        assert_eq!(presenter.shown, vec![Shown::Results(Some(text.to_string()))]);
    }
}

use std::io::Write;

/// The process-level side effects of a run
///
/// `run` only touches stdout, stderr and the exit code through this trait, so tests can
/// capture all three.
pub trait Host: Send + Sync {
    /// Stream that receives the NDJSON records.
    fn output(&mut self) -> impl Write;

    /// Stream that receives batch-level error messages.
    fn error(&mut self) -> impl Write;

    /// End the batch with a failure status. A real process stops here; a test host records `code`.
    fn exit(&mut self, code: i32);
}

/// Captures both streams and the requested exit code
#[cfg(test)]
#[derive(Debug, Default)]
pub struct TestHost {
    pub output_buf: Vec<u8>,
    pub error_buf: Vec<u8>,
    pub exit_code: Option<i32>,
}

#[cfg(test)]
impl TestHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output_text(&self) -> String {
        String::from_utf8_lossy(&self.output_buf).into_owned()
    }

    pub fn error_text(&self) -> String {
        String::from_utf8_lossy(&self.error_buf).into_owned()
    }
}

#[cfg(test)]
impl Host for TestHost {
    fn output(&mut self) -> impl Write {
        &mut self.output_buf
    }

    fn error(&mut self) -> impl Write {
        &mut self.error_buf
    }

    fn exit(&mut self, code: i32) {
        self.exit_code = Some(code);
    }
}

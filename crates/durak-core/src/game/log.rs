/// Human-readable game trace. Lines are only formatted and kept when the log
/// is enabled, so a disabled log costs nothing on the hot path.
#[derive(Debug, Clone, Default)]
pub struct GameLog {
    enabled: bool,
    lines: Vec<String>,
}

impl GameLog {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            lines: Vec::new(),
        }
    }

    pub fn record<F>(&mut self, line: F)
    where
        F: FnOnce() -> String,
    {
        if self.enabled {
            self.lines.push(line());
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

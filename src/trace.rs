use super::*;

/// Bounded in-memory trace of dispatched events and timer activity.
#[derive(Debug)]
pub(crate) struct TraceState {
    pub(crate) enabled: bool,
    pub(crate) events: bool,
    pub(crate) timers: bool,
    pub(crate) logs: VecDeque<String>,
    pub(crate) log_limit: usize,
    pub(crate) to_stderr: bool,
}

impl Default for TraceState {
    fn default() -> Self {
        Self {
            enabled: false,
            events: true,
            timers: true,
            logs: VecDeque::new(),
            log_limit: 10_000,
            to_stderr: true,
        }
    }
}

impl TraceState {
    pub(crate) fn event_line(&mut self, line: String) {
        if self.enabled && self.events {
            self.line(line);
        }
    }

    pub(crate) fn timer_line(&mut self, line: String) {
        if self.enabled && self.timers {
            self.line(line);
        }
    }

    pub(crate) fn line(&mut self, line: String) {
        if !self.enabled {
            return;
        }
        tracing::trace!(target: "clinic_page::trace", "{line}");
        if self.to_stderr {
            eprintln!("{line}");
        }
        if self.logs.len() >= self.log_limit {
            self.logs.pop_front();
        }
        self.logs.push_back(line);
    }

    pub(crate) fn set_log_limit(&mut self, max_entries: usize) -> Result<()> {
        if max_entries == 0 {
            return Err(Error::Runtime(
                "set_trace_log_limit requires at least 1 entry".into(),
            ));
        }
        self.log_limit = max_entries;
        while self.logs.len() > self.log_limit {
            self.logs.pop_front();
        }
        Ok(())
    }
}

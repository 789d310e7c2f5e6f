use super::*;

impl Page {
    pub fn now_ms(&self) -> i64 {
        self.scheduler.now_ms
    }

    pub fn clear_timer(&mut self, timer_id: i64) -> bool {
        let cleared = self.scheduler.clear(timer_id);
        self.trace_state
            .timer_line(format!("[timer] clear id={timer_id} cleared={cleared}"));
        cleared
    }

    /// Pending timers in the order they would fire.
    pub fn pending_timers(&self) -> Vec<PendingTimer> {
        self.scheduler.pending()
    }

    pub fn set_timer_step_limit(&mut self, max_steps: usize) -> Result<()> {
        if max_steps == 0 {
            return Err(Error::Runtime(
                "set_timer_step_limit requires at least 1 step".into(),
            ));
        }
        self.scheduler.timer_step_limit = max_steps;
        Ok(())
    }

    /// Moves the clock forward by `delta_ms` and fires everything now due.
    pub fn advance_time(&mut self, delta_ms: i64) -> Result<()> {
        if delta_ms < 0 {
            return Err(Error::Runtime(
                "advance_time requires non-negative milliseconds".into(),
            ));
        }
        let target = self.scheduler.now_ms.saturating_add(delta_ms);
        self.move_clock("advance", target)
    }

    pub fn advance_time_to(&mut self, target_ms: i64) -> Result<()> {
        let now = self.scheduler.now_ms;
        if target_ms < now {
            return Err(Error::Runtime(format!(
                "advance_time_to requires target >= now_ms (target={target_ms}, now_ms={now})"
            )));
        }
        self.move_clock("advance_to", target_ms)
    }

    fn move_clock(&mut self, label: &str, target_ms: i64) -> Result<()> {
        let from = self.scheduler.now_ms;
        self.scheduler.now_ms = target_ms;
        let ran = self.drain_timers(Some(target_ms), false)?;
        self.trace_state.timer_line(format!(
            "[timer] {label} from={from} to={target_ms} ran_due={ran}"
        ));
        Ok(())
    }

    /// Runs every pending timer, including ones scheduled while flushing,
    /// jumping the clock to each due time.
    pub fn flush(&mut self) -> Result<()> {
        let from = self.scheduler.now_ms;
        let ran = self.drain_timers(None, true)?;
        self.trace_state.timer_line(format!(
            "[timer] flush from={from} to={} ran={ran}",
            self.scheduler.now_ms
        ));
        Ok(())
    }

    /// Fires timers already due without moving the clock.
    pub fn run_due_timers(&mut self) -> Result<usize> {
        let now = self.scheduler.now_ms;
        let ran = self.drain_timers(Some(now), false)?;
        self.trace_state
            .timer_line(format!("[timer] run_due now_ms={now} ran={ran}"));
        Ok(ran)
    }

    fn drain_timers(&mut self, due_limit: Option<i64>, jump_clock: bool) -> Result<usize> {
        let mut ran = 0usize;
        loop {
            if ran >= self.scheduler.timer_step_limit && self.scheduler.has_due(due_limit) {
                return Err(self.scheduler.step_limit_error(ran + 1, due_limit));
            }
            let Some(task) = self.scheduler.pop_next(due_limit) else {
                return Ok(ran);
            };
            ran += 1;
            if jump_clock {
                self.scheduler.now_ms = self.scheduler.now_ms.max(task.due_at);
            }
            self.fire_timer(task)?;
        }
    }

    fn fire_timer(&mut self, task: ScheduledTask) -> Result<()> {
        self.trace_state.timer_line(format!(
            "[timer] run id={} due_at={} kind={:?} now_ms={}",
            task.id,
            task.due_at,
            task.task.kind(),
            self.scheduler.now_ms
        ));
        self.with_controller(|controller, host| controller.on_timer(host, task.task))?;
        Ok(())
    }
}
